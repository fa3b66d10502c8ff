//! Per-websocket reorder buffer (`spec.md` §4.5, "Ordered Pipe").
//!
//! Workers complete out of order because of shape-based batching, but a
//! single client expects replies in the order it submitted requests.

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;

use futures::Stream;
use serde_json::Value;
use tokio::sync::{Mutex, Notify};

struct State {
    next_emit: u64,
    buffer: BTreeMap<u64, Value>,
}

pub struct OrderedPipe {
    next_index: AtomicU64,
    state: Mutex<State>,
    notify: Notify,
    closed: AtomicBool,
}

impl OrderedPipe {
    pub fn new() -> Arc<Self> {
        Arc::new(OrderedPipe {
            next_index: AtomicU64::new(0),
            state: Mutex::new(State {
                next_emit: 0,
                buffer: BTreeMap::new(),
            }),
            notify: Notify::new(),
            closed: AtomicBool::new(false),
        })
    }

    /// Returns a fresh, monotonically increasing index for a newly
    /// submitted request.
    pub fn next_index(&self) -> u64 {
        self.next_index.fetch_add(1, Ordering::SeqCst)
    }

    /// Idempotent and safe to call from any submitter task concurrently.
    pub async fn add(&self, index: u64, payload: Value) {
        let mut state = self.state.lock().await;
        debug_assert!(
            index >= state.next_emit || state.buffer.contains_key(&index),
            "index {index} is already behind next_emit {}",
            state.next_emit
        );
        state.buffer.insert(index, payload);
        drop(state);
        self.notify.notify_waiters();
    }

    /// Terminates `drain()` after it flushes whatever contiguous prefix is
    /// already buffered.
    pub fn close(&self) {
        self.closed.store(true, Ordering::SeqCst);
        self.notify.notify_waiters();
    }

    /// An asynchronous producer yielding payloads in strict ascending
    /// index order, suspending whenever the next expected index is
    /// missing and resuming as soon as [`OrderedPipe::add`] supplies it.
    pub fn drain(self: Arc<Self>) -> impl Stream<Item = Value> {
        async_stream::stream! {
            loop {
                loop {
                    let mut state = self.state.lock().await;
                    let Some(payload) = state.buffer.remove(&state.next_emit) else {
                        break;
                    };
                    state.next_emit += 1;
                    drop(state);
                    yield payload;
                }

                // Registered before the closed/buffer re-check below, so an
                // `add()` or `close()` landing in the gap is not missed
                // (same pattern as `event_box.rs::wait`).
                let notified = self.notify.notified();
                let state = self.state.lock().await;
                let next_is_ready = state.buffer.contains_key(&state.next_emit);
                drop(state);
                if next_is_ready {
                    continue;
                }
                if self.closed.load(Ordering::SeqCst) {
                    break;
                }
                notified.await;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::StreamExt;

    #[tokio::test]
    async fn emits_strictly_in_submission_order_regardless_of_completion_order() {
        let pipe = OrderedPipe::new();
        let zero = pipe.next_index();
        let one = pipe.next_index();
        let two = pipe.next_index();

        let mut drained = pipe.clone().drain();

        // Completion order: 30ms, 10ms, 20ms latencies (`spec.md` §8 scenario 5).
        let writer = {
            let pipe = pipe.clone();
            tokio::spawn(async move {
                tokio::time::sleep(std::time::Duration::from_millis(10)).await;
                pipe.add(one, serde_json::json!("second")).await;
                tokio::time::sleep(std::time::Duration::from_millis(10)).await;
                pipe.add(two, serde_json::json!("third")).await;
                tokio::time::sleep(std::time::Duration::from_millis(10)).await;
                pipe.add(zero, serde_json::json!("first")).await;
                pipe.close();
            })
        };

        let mut received = Vec::new();
        while let Some(payload) = drained.next().await {
            received.push(payload);
        }
        writer.await.unwrap();

        assert_eq!(
            received,
            vec![
                serde_json::json!("first"),
                serde_json::json!("second"),
                serde_json::json!("third"),
            ]
        );
    }

    #[tokio::test]
    async fn close_flushes_contiguous_prefix_and_drops_the_gap() {
        let pipe = OrderedPipe::new();
        let zero = pipe.next_index();
        let _one = pipe.next_index();
        pipe.add(zero, serde_json::json!("only one ready")).await;
        pipe.close();

        let received: Vec<_> = pipe.clone().drain().collect().await;
        assert_eq!(received, vec![serde_json::json!("only one ready")]);
    }

    #[tokio::test]
    async fn next_index_is_dense_and_monotonic() {
        let pipe = OrderedPipe::new();
        let indices: Vec<_> = (0..5).map(|_| pipe.next_index()).collect();
        assert_eq!(indices, vec![0, 1, 2, 3, 4]);
    }
}
