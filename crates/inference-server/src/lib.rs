//! Request fan-in / batched-execution / fan-out subsystem for a language
//! model inference server (`spec.md` §1).
//!
//! The binary entry point lives in `main.rs`; this library exposes the
//! pieces so a real adapter crate can depend on `inference_server` and
//! supply its own [`adapter::Adapter`] to [`build_server`].

pub mod adapter;
pub mod adapters;
pub mod config;
pub mod disconnect;
pub mod envelope;
pub mod error;
pub mod event_box;
pub mod http;
pub mod ordered_pipe;
pub mod queue;
pub mod stopstring;
pub mod stream_detokenizer;
pub mod token_counter;
pub mod work_item;
pub mod worker_pool;

use std::sync::Arc;

use crate::adapter::Adapter;
use crate::config::Config;
use crate::error::ServerError;
use crate::http::AppState;
use crate::queue::RequestQueue;
use crate::worker_pool::WorkerPool;

/// Everything `main` needs to start accepting connections: the built
/// `axum::Router`, the bind address, and a handle to the pool for graceful
/// shutdown (`spec.md` §9, "Global module state" — no module singletons,
/// this struct is constructed once and owned by the root task).
pub struct Server {
    pub router: axum::Router,
    pub bind_addr: std::net::SocketAddr,
    pub pool: Arc<WorkerPool>,
}

/// Wires together the Request Queue, Worker Pool, and HTTP router for a
/// given adapter and configuration. Does not bind the listener or start the
/// worker loops; callers decide exactly when I/O begins.
pub fn build_server(adapter: Arc<dyn Adapter>, config: &Config) -> Result<Server, ServerError> {
    let queue = Arc::new(RequestQueue::new(request_queue_capacity(config)));
    let pool = Arc::new(WorkerPool::new(
        queue,
        Arc::clone(&adapter),
        config.threads,
        config.batch_size,
        config.cache_size,
    ));

    let state = AppState {
        adapter,
        pool: Arc::clone(&pool),
        model_name: Arc::from(config.language_model.as_str()),
    };
    let router = http::build_router(state);

    Ok(Server {
        router,
        bind_addr: config.bind_addr,
        pool,
    })
}

/// The queue is sized generously relative to `batch_size` so a burst of
/// same-shape requests can accumulate for one batch without immediately
/// back-pressuring callers; this is a tuning default, not a spec'd value.
fn request_queue_capacity(config: &Config) -> usize {
    (config.batch_size as usize * 16).max(64)
}
