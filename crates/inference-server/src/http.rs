//! The HTTP and websocket surface (`spec.md` §6, "External Interfaces").
//!
//! Mirrors the teacher's `chat-cli` web server module: an `axum::Router`
//! built once in [`build_router`], `AppState` cloned into every handler, and
//! per-connection Tokio tasks for the websocket multiplex.

use std::sync::atomic::AtomicBool;
use std::sync::Arc;

use axum::extract::ws::{Message, WebSocket};
use axum::extract::{State, WebSocketUpgrade};
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Json, Router};
use futures::{SinkExt, StreamExt};
use serde_json::Value;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::adapter::Adapter;
use crate::disconnect::{ConnectionGuard, DropSignal, RequestGuard};
use crate::envelope::Envelope;
use crate::error::RequestError;
use crate::event_box::EventBox;
use crate::ordered_pipe::OrderedPipe;
use crate::work_item::WorkItem;
use crate::worker_pool::WorkerPool;

/// Application state shared across handlers, built once in `main` and
/// handed into `axum::serve` (`spec.md` §9, "Global module state").
#[derive(Clone)]
pub struct AppState {
    pub adapter: Arc<dyn Adapter>,
    pub pool: Arc<WorkerPool>,
    pub model_name: Arc<str>,
}

impl AppState {
    /// Base `{"model": ...}` map overlaid with the adapter's extra pairs
    /// (`spec.md` §4.8). The adapter cannot override the model name itself.
    pub fn meta(&self) -> serde_json::Map<String, Value> {
        let mut m = serde_json::Map::new();
        m.insert("model".to_string(), Value::String(self.model_name.to_string()));
        for (key, value) in self.adapter.meta() {
            if key != "model" {
                m.insert(key, value);
            }
        }
        m
    }
}

pub fn build_router(state: AppState) -> Router {
    let router: Router<AppState> = Router::new()
        .route("/", post(index))
        .route("/validate", post(validate))
        .route("/health", get(health))
        .route("/statistics", get(statistics))
        .route("/schema", get(schema))
        .route("/websocket", get(websocket_handler));

    let router = state.adapter.router_hook(router);
    router
        .with_state(state)
        // Same middleware stack the teacher's `chat-cli` web server applies
        // (`web_server/server.rs`'s `CorsLayer`), plus request tracing and
        // panic containment so a single handler panic degrades to a 500
        // instead of dropping the connection.
        .layer(CorsLayer::new().allow_origin(Any).allow_methods(Any).allow_headers(Any))
        .layer(TraceLayer::new_for_http())
        .layer(CatchPanicLayer::new())
}

async fn index(State(state): State<AppState>, Json(body): Json<Value>) -> Envelope {
    let shape = match state.adapter.schema().validate(&body) {
        Ok(shape) => shape,
        Err(err) => return Envelope::from_error(&err, state.meta()),
    };

    let disconnect = Arc::new(AtomicBool::new(false));
    let mut guard = RequestGuard::new(disconnect.clone());
    let event_box = Arc::new(EventBox::new(disconnect));
    let item = WorkItem::new(body, shape, event_box.clone());

    if let Err(err) = state.pool.submit(item).await {
        return Envelope::from_error(&err, state.meta());
    }

    event_box.wait().await;
    guard.disarm();

    match event_box.make_response() {
        Ok(value) => Envelope::success(value, state.meta()),
        Err(err) => {
            if !matches!(err, RequestError::Disconnected) {
                tracing::warn!(kind = err.kind(), "unary request completed with an error");
            }
            Envelope::from_error(&err, state.meta())
        }
    }
}

async fn validate(State(state): State<AppState>, Json(body): Json<Value>) -> Envelope {
    match state.adapter.schema().validate(&body) {
        Ok(_) => Envelope::success(Value::Null, state.meta()),
        Err(err) => Envelope::from_error(&err, state.meta()),
    }
}

async fn health(State(state): State<AppState>) -> Envelope {
    Envelope::success(Value::Null, state.meta())
}

async fn statistics(State(state): State<AppState>) -> Envelope {
    let stats = state.pool.statistics().await;
    Envelope::success(
        serde_json::to_value(stats).expect("Statistics always serializes"),
        state.meta(),
    )
}

async fn schema(State(state): State<AppState>) -> Envelope {
    Envelope::success(state.adapter.schema().to_json_schema(), state.meta())
}

async fn websocket_handler(State(state): State<AppState>, ws: WebSocketUpgrade) -> impl IntoResponse {
    ws.on_upgrade(move |socket| handle_websocket(socket, state))
}

/// One task per connection drives the receive loop and spawns one task per
/// inbound frame; a second task drains the [`OrderedPipe`] those per-frame
/// tasks feed, so replies reach the client strictly in submission order
/// regardless of completion order (`spec.md` §4.5).
async fn handle_websocket(socket: WebSocket, state: AppState) {
    // Matches the teacher's `web_server/websocket.rs` convention of tagging
    // every connection with a `Uuid` for log correlation across its tasks.
    let connection_id = uuid::Uuid::new_v4();
    tracing::info!(%connection_id, "websocket connection opened");

    let (mut sender, mut receiver) = socket.split();
    let pipe = OrderedPipe::new();
    let connection = ConnectionGuard::new();

    let mut drained = pipe.clone().drain();
    let send_task = tokio::spawn(async move {
        while let Some(payload) = drained.next().await {
            let text = serde_json::to_string(&payload).unwrap_or_else(|_| "null".to_string());
            if sender.send(Message::Text(text)).await.is_err() {
                break;
            }
        }
    });

    // Held for the lifetime of the receive loop; any exit path (clean close,
    // stream error) flips the connection's shared disconnect flag.
    let drop_signal = DropSignal::new(connection.flag());

    while let Some(message) = receiver.next().await {
        let Ok(message) = message else { break };
        let Message::Text(text) = message else { continue };

        let index = pipe.next_index();
        let body: Value = match serde_json::from_str(&text) {
            Ok(body) => body,
            Err(err) => {
                tracing::debug!(%connection_id, index, %err, "dropping malformed websocket frame");
                let parse_error = RequestError::Validation(vec![serde_json::json!({
                    "loc": "",
                    "msg": format!("invalid JSON frame: {err}"),
                })]);
                let envelope = Envelope::from_error(&parse_error, state.meta());
                pipe.add(index, serde_json::to_value(&envelope).unwrap_or(Value::Null)).await;
                continue;
            }
        };

        let state = state.clone();
        let pipe = pipe.clone();
        let connection_flag = connection.flag();
        tokio::spawn(async move {
            let envelope = process_frame(&state, body, connection_flag).await;
            pipe.add(index, serde_json::to_value(&envelope).unwrap_or(Value::Null)).await;
        });
    }

    drop(drop_signal);
    pipe.close();
    let _ = send_task.await;
    tracing::info!(%connection_id, "websocket connection closed");
}

async fn process_frame(state: &AppState, body: Value, connection_flag: Arc<AtomicBool>) -> Envelope {
    let shape = match state.adapter.schema().validate(&body) {
        Ok(shape) => shape,
        Err(err) => return Envelope::from_error(&err, state.meta()),
    };

    let event_box = Arc::new(EventBox::new(connection_flag));
    let item = WorkItem::new(body, shape, event_box.clone());

    if let Err(err) = state.pool.submit(item).await {
        return Envelope::from_error(&err, state.meta());
    }

    event_box.wait().await;
    match event_box.make_response() {
        Ok(value) => Envelope::success(value, state.meta()),
        Err(err) => Envelope::from_error(&err, state.meta()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapter::{AdapterKind, RequestSchema};
    use crate::queue::RequestQueue;

    struct EchoAdapter;

    #[async_trait::async_trait]
    impl Adapter for EchoAdapter {
        fn kind(&self) -> AdapterKind {
            AdapterKind::Generation
        }
        fn schema(&self) -> RequestSchema {
            RequestSchema { kind: AdapterKind::Generation, fields: Vec::new() }
        }
        async fn call(&self, batch: Vec<Value>) -> Result<Vec<Value>, RequestError> {
            Ok(batch)
        }
    }

    fn state() -> AppState {
        let adapter: Arc<dyn Adapter> = Arc::new(EchoAdapter);
        let queue = Arc::new(RequestQueue::new(8));
        let pool = Arc::new(WorkerPool::new(queue, adapter.clone(), 1, 4, 0));
        AppState { adapter, pool, model_name: Arc::from("dummy") }
    }

    #[test]
    fn meta_stamps_model_name_and_does_not_let_the_adapter_override_it() {
        struct OverridingAdapter;
        #[async_trait::async_trait]
        impl Adapter for OverridingAdapter {
            fn kind(&self) -> AdapterKind {
                AdapterKind::Generation
            }
            fn schema(&self) -> RequestSchema {
                RequestSchema { kind: AdapterKind::Generation, fields: Vec::new() }
            }
            async fn call(&self, batch: Vec<Value>) -> Result<Vec<Value>, RequestError> {
                Ok(batch)
            }
            fn meta(&self) -> serde_json::Map<String, Value> {
                let mut m = serde_json::Map::new();
                m.insert("model".to_string(), Value::String("sneaky".to_string()));
                m.insert("extra".to_string(), Value::String("info".to_string()));
                m
            }
        }
        let adapter: Arc<dyn Adapter> = Arc::new(OverridingAdapter);
        let queue = Arc::new(RequestQueue::new(8));
        let pool = Arc::new(WorkerPool::new(queue, adapter.clone(), 1, 4, 0));
        let state = AppState { adapter, pool, model_name: Arc::from("dummy") };
        let meta = state.meta();
        assert_eq!(meta["model"], "dummy");
        assert_eq!(meta["extra"], "info");
    }

    #[tokio::test]
    async fn index_returns_success_envelope_for_a_valid_body() {
        let state = state();
        state.pool.startup().await;
        let response = index(State(state.clone()), Json(serde_json::json!({"batch": ["hi"]}))).await;
        match response {
            Envelope::Success { data, .. } => assert_eq!(data, serde_json::json!({"batch": ["hi"]})),
            Envelope::Error { .. } => panic!("expected success"),
        }
        state.pool.shutdown().await;
    }

    #[tokio::test]
    async fn health_always_succeeds() {
        let state = state();
        let response = health(State(state)).await;
        assert!(matches!(response, Envelope::Success { .. }));
    }

    struct FailingAdapter;

    #[async_trait::async_trait]
    impl Adapter for FailingAdapter {
        fn kind(&self) -> AdapterKind {
            AdapterKind::Generation
        }
        fn schema(&self) -> RequestSchema {
            RequestSchema { kind: AdapterKind::Generation, fields: Vec::new() }
        }
        async fn call(&self, _batch: Vec<Value>) -> Result<Vec<Value>, RequestError> {
            Err(RequestError::User("unsupported option combination".to_string()))
        }
    }

    #[tracing_test::traced_test]
    #[tokio::test]
    async fn index_logs_a_warning_when_the_request_completes_with_an_error() {
        let adapter: Arc<dyn Adapter> = Arc::new(FailingAdapter);
        let queue = Arc::new(RequestQueue::new(8));
        let pool = Arc::new(WorkerPool::new(queue, adapter.clone(), 1, 4, 0));
        let state = AppState { adapter, pool, model_name: Arc::from("dummy") };
        state.pool.startup().await;

        let response = index(State(state.clone()), Json(serde_json::json!({"batch": ["hi"]}))).await;
        assert!(matches!(response, Envelope::Error { .. }));
        assert!(tracing_test::logs_contain("unary request completed with an error"));

        state.pool.shutdown().await;
    }
}
