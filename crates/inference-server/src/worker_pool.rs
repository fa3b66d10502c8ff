//! Fixed pool of worker loops, each batching pending Work Items into model
//! calls (`spec.md` §4.1, "Worker Pool").
//!
//! This is the component the rest of the crate exists to feed: the Request
//! Queue supplies Work Items, the Worker Pool groups them by [`ShapeKey`] and
//! drives the [`Adapter`], and each item's [`EventBox`] is how the result
//! gets back out.

use std::collections::{HashMap, VecDeque};
use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use std::sync::Arc;

use futures::FutureExt;
use serde_json::Value;
use tokio::sync::Mutex;
use tokio::task::JoinHandle;

use crate::adapter::Adapter;
use crate::error::RequestError;
use crate::queue::RequestQueue;
use crate::work_item::{Batch, ShapeKey, WorkItem};

/// Live counters exposed at `GET /statistics` (`spec.md` §6).
#[derive(Debug, Default, serde::Serialize)]
pub struct Statistics {
    pub queued: usize,
    pub in_flight: usize,
    pub completed: u64,
    pub worker_states: Vec<&'static str>,
}

#[derive(Debug)]
enum WorkerState {
    Idle,
    Batching,
    Invoking,
}

impl WorkerState {
    fn label(&self) -> &'static str {
        match self {
            WorkerState::Idle => "idle",
            WorkerState::Batching => "batching",
            WorkerState::Invoking => "invoking",
        }
    }
}

/// Exact-input cache (`spec.md` §4.1 step 4, §9 Open Question — declared but
/// never populated in the source; populated here since "optional
/// optimization" invites a real one).
struct Cache {
    capacity: usize,
    order: VecDeque<(ShapeKey, String)>,
    entries: HashMap<(ShapeKey, String), Value>,
}

impl Cache {
    fn new(capacity: usize) -> Self {
        Cache {
            capacity,
            order: VecDeque::new(),
            entries: HashMap::new(),
        }
    }

    fn key(shape: &ShapeKey, input: &Value) -> (ShapeKey, String) {
        (shape.clone(), input.to_string())
    }

    fn get(&self, shape: &ShapeKey, input: &Value) -> Option<Value> {
        self.entries.get(&Self::key(shape, input)).cloned()
    }

    fn insert(&mut self, shape: &ShapeKey, input: &Value, output: Value) {
        if self.capacity == 0 {
            return;
        }
        let key = Self::key(shape, input);
        if self.entries.insert(key.clone(), output).is_none() {
            self.order.push_back(key);
            while self.order.len() > self.capacity {
                if let Some(evicted) = self.order.pop_front() {
                    self.entries.remove(&evicted);
                }
            }
        }
    }
}

pub struct WorkerPool {
    queue: Arc<RequestQueue>,
    adapter: Arc<dyn Adapter>,
    num_workers: u32,
    batch_size: u32,
    cache: Arc<Mutex<Cache>>,
    worker_states: Arc<Vec<std::sync::Mutex<WorkerState>>>,
    completed: Arc<AtomicU64>,
    in_flight: Arc<AtomicUsize>,
    handles: Mutex<Vec<JoinHandle<()>>>,
}

impl WorkerPool {
    pub fn new(queue: Arc<RequestQueue>, adapter: Arc<dyn Adapter>, num_workers: u32, batch_size: u32, cache_size: u32) -> Self {
        let worker_states = (0..num_workers).map(|_| std::sync::Mutex::new(WorkerState::Idle)).collect();
        WorkerPool {
            queue,
            adapter,
            num_workers,
            batch_size: batch_size.max(1),
            cache: Arc::new(Mutex::new(Cache::new(cache_size as usize))),
            worker_states: Arc::new(worker_states),
            completed: Arc::new(AtomicU64::new(0)),
            in_flight: Arc::new(AtomicUsize::new(0)),
            handles: Mutex::new(Vec::new()),
        }
    }

    /// Enqueues a Work Item. Blocks the caller while the queue is at
    /// capacity; fails once shutdown has begun (`spec.md` §4.1 "submit").
    pub async fn submit(&self, item: WorkItem) -> Result<(), RequestError> {
        if self.queue.submit(item).await.is_err() {
            return Err(RequestError::QueueClosed);
        }
        Ok(())
    }

    /// Side-effect-free snapshot of pool activity (`spec.md` §4.1
    /// "statistics").
    pub async fn statistics(&self) -> Statistics {
        Statistics {
            queued: self.queue.len().await,
            in_flight: self.in_flight.load(Ordering::SeqCst),
            completed: self.completed.load(Ordering::SeqCst),
            worker_states: self
                .worker_states
                .iter()
                .map(|s| s.lock().unwrap().label())
                .collect(),
        }
    }

    /// Idempotent: spawns `num_workers` loop tasks. Calling twice is a
    /// programmer error guarded by the empty-handles check, not a runtime
    /// failure, since the source treats lifecycle calls as idempotent.
    pub async fn startup(self: &Arc<Self>) {
        let mut handles = self.handles.lock().await;
        if !handles.is_empty() {
            return;
        }
        for worker_id in 0..self.num_workers {
            let pool = Arc::clone(self);
            handles.push(tokio::spawn(async move {
                pool.worker_loop(worker_id as usize).await;
            }));
        }
    }

    /// Idempotent: drains the queue, completes every outstanding Work Item
    /// with a `shutting_down` application error, and joins every worker
    /// task (`spec.md` §4.2 "shutdown").
    pub async fn shutdown(&self) {
        let drained = self.queue.shutdown().await;
        for item in drained {
            item.event_box.set_application_error("server is shutting down");
        }
        let mut handles = self.handles.lock().await;
        for handle in handles.drain(..) {
            let _ = handle.await;
        }
    }

    async fn worker_loop(self: Arc<Self>, worker_id: usize) {
        loop {
            self.set_state(worker_id, WorkerState::Idle);
            let Some(first) = self.queue.dequeue_one().await else {
                tracing::debug!(worker_id, "worker loop exiting: queue closed");
                return;
            };

            self.set_state(worker_id, WorkerState::Batching);
            let shape = first.shape.clone();
            let mut rest = self
                .queue
                .try_dequeue_matching(&shape, self.batch_size.saturating_sub(1) as usize)
                .await;
            let mut items = Vec::with_capacity(1 + rest.len());
            items.push(first);
            items.append(&mut rest);

            self.in_flight.fetch_add(items.len(), Ordering::SeqCst);
            self.run_batch(Batch::new(items)).await;
            self.set_state(worker_id, WorkerState::Idle);
        }
    }

    fn set_state(&self, worker_id: usize, state: WorkerState) {
        *self.worker_states[worker_id].lock().unwrap() = state;
    }

    async fn run_batch(&self, batch: Batch) {
        let started = batch.items.len();
        // Step 3: short-circuit any item that has already disconnected
        // before dispatch (`spec.md` §4.1 step 3).
        let mut live = Vec::with_capacity(batch.items.len());
        let mut disconnected = 0u64;
        for item in batch.items {
            if item.event_box.is_disconnected() {
                tracing::debug!("dropping disconnected item before dispatch");
                item.event_box.wake();
                disconnected += 1;
            } else {
                live.push(item);
            }
        }
        if live.is_empty() {
            self.completed.fetch_add(disconnected, Ordering::SeqCst);
            self.in_flight.fetch_sub(started, Ordering::SeqCst);
            return;
        }

        // Step 4: split into cached and uncached inputs.
        let mut cached_outputs: Vec<Option<Value>> = Vec::with_capacity(live.len());
        let mut uncached_indices = Vec::new();
        let mut uncached_payloads = Vec::new();
        {
            let cache = self.cache.lock().await;
            for item in &live {
                match cache.get(&batch.shape, &item.payload) {
                    Some(cached) => cached_outputs.push(Some(cached)),
                    None => {
                        cached_outputs.push(None);
                        uncached_indices.push(cached_outputs.len() - 1);
                        uncached_payloads.push(item.payload.clone());
                    }
                }
            }
        }

        let invoked = !uncached_payloads.is_empty();
        let call_result = if invoked {
            self.invoke_adapter(uncached_payloads).await
        } else {
            Ok(Vec::new())
        };

        match call_result {
            Ok(outputs) => {
                for (slot, output) in uncached_indices.into_iter().zip(outputs) {
                    cached_outputs[slot] = Some(output);
                }
                let mut cache = self.cache.lock().await;
                for (item, output) in live.iter().zip(&cached_outputs) {
                    if let Some(output) = output {
                        cache.insert(&batch.shape, &item.payload, output.clone());
                    }
                }
                for (item, output) in live.into_iter().zip(cached_outputs) {
                    match output {
                        Some(output) => item.event_box.set_done(output),
                        None => item
                            .event_box
                            .set_application_error("adapter produced fewer outputs than requested"),
                    }
                }
            }
            Err(err) => {
                // Step 6: every item in the offending batch fails together;
                // partial success is not attempted (`spec.md` §4.1 "Error
                // semantics").
                tracing::warn!(error = %err, "adapter call failed for batch");
                for item in live {
                    match &err {
                        RequestError::User(msg) => item.event_box.set_user_error(msg.clone()),
                        other => item.event_box.set_application_error(other.to_string()),
                    }
                }
            }
        }

        self.completed.fetch_add(started as u64, Ordering::SeqCst);
        self.in_flight.fetch_sub(started, Ordering::SeqCst);
    }

    /// Traps adapter panics so a single bad batch cannot kill the worker
    /// loop (`spec.md` §7, "the worker loop itself must not die").
    async fn invoke_adapter(&self, batch: Vec<Value>) -> Result<Vec<Value>, RequestError> {
        let adapter = Arc::clone(&self.adapter);
        let result = std::panic::AssertUnwindSafe(adapter.call(batch)).catch_unwind().await;
        match result {
            Ok(inner) => inner,
            Err(_) => Err(RequestError::Application("adapter panicked".to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapter::{AdapterKind, RequestSchema};
    use crate::event_box::EventBox;
    use std::sync::atomic::AtomicBool;

    struct EchoAdapter {
        calls: std::sync::atomic::AtomicUsize,
        fail: bool,
    }

    #[async_trait::async_trait]
    impl Adapter for EchoAdapter {
        fn kind(&self) -> AdapterKind {
            AdapterKind::Generation
        }
        fn schema(&self) -> RequestSchema {
            RequestSchema { kind: AdapterKind::Generation, fields: Vec::new() }
        }
        async fn call(&self, batch: Vec<Value>) -> Result<Vec<Value>, RequestError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.fail {
                return Err(RequestError::Application("boom".to_string()));
            }
            Ok(batch)
        }
    }

    fn item(shape_value: i64, payload: Value) -> (WorkItem, Arc<EventBox>) {
        let mut fields = std::collections::BTreeMap::new();
        fields.insert("max_new_tokens".to_string(), serde_json::json!(shape_value));
        let event_box = Arc::new(EventBox::new(Arc::new(AtomicBool::new(false))));
        (
            WorkItem::new(payload, ShapeKey::new(fields), event_box.clone()),
            event_box,
        )
    }

    #[tokio::test]
    async fn same_shape_items_submitted_together_batch_into_one_call() {
        let adapter = Arc::new(EchoAdapter { calls: Default::default(), fail: false });
        let queue = Arc::new(RequestQueue::new(8));
        let pool = Arc::new(WorkerPool::new(queue, adapter.clone(), 1, 4, 0));
        pool.startup().await;

        let (item_a, box_a) = item(4, serde_json::json!("a"));
        let (item_b, box_b) = item(4, serde_json::json!("b"));
        let (item_c, box_c) = item(4, serde_json::json!("c"));
        pool.submit(item_a).await.unwrap();
        pool.submit(item_b).await.unwrap();
        pool.submit(item_c).await.unwrap();

        box_a.wait().await;
        box_b.wait().await;
        box_c.wait().await;

        assert_eq!(adapter.calls.load(Ordering::SeqCst), 1);
        assert_eq!(box_a.make_response().unwrap(), serde_json::json!("a"));

        pool.shutdown().await;
    }

    #[tokio::test]
    async fn mismatched_shapes_produce_separate_calls() {
        let adapter = Arc::new(EchoAdapter { calls: Default::default(), fail: false });
        let queue = Arc::new(RequestQueue::new(8));
        let pool = Arc::new(WorkerPool::new(queue, adapter.clone(), 1, 4, 0));
        pool.startup().await;

        let (item_a, box_a) = item(4, serde_json::json!("a"));
        let (item_b, box_b) = item(8, serde_json::json!("b"));
        pool.submit(item_a).await.unwrap();
        pool.submit(item_b).await.unwrap();

        box_a.wait().await;
        box_b.wait().await;

        assert_eq!(adapter.calls.load(Ordering::SeqCst), 2);
        pool.shutdown().await;
    }

    #[tokio::test]
    async fn adapter_failure_marks_every_item_in_the_batch_as_application_error() {
        let adapter = Arc::new(EchoAdapter { calls: Default::default(), fail: true });
        let queue = Arc::new(RequestQueue::new(8));
        let pool = Arc::new(WorkerPool::new(queue, adapter, 1, 4, 0));
        pool.startup().await;

        let (item_a, box_a) = item(1, serde_json::json!("a"));
        let (item_b, box_b) = item(1, serde_json::json!("b"));
        pool.submit(item_a).await.unwrap();
        pool.submit(item_b).await.unwrap();
        box_a.wait().await;
        box_b.wait().await;

        assert_eq!(box_a.make_response().unwrap_err().kind(), "APPLICATION");
        assert_eq!(box_b.make_response().unwrap_err().kind(), "APPLICATION");
        pool.shutdown().await;
    }

    #[tokio::test]
    async fn disconnected_item_is_short_circuited_without_invoking_the_adapter() {
        let adapter = Arc::new(EchoAdapter { calls: Default::default(), fail: false });
        let queue = Arc::new(RequestQueue::new(8));
        let pool = Arc::new(WorkerPool::new(queue, adapter.clone(), 1, 4, 0));

        let disconnect = Arc::new(AtomicBool::new(true));
        let event_box = Arc::new(EventBox::new(disconnect));
        let mut fields = std::collections::BTreeMap::new();
        fields.insert("max_new_tokens".to_string(), serde_json::json!(1));
        let work_item = WorkItem::new(serde_json::json!("gone"), ShapeKey::new(fields), event_box.clone());

        pool.startup().await;
        pool.submit(work_item).await.unwrap();
        event_box.wait().await;

        assert_eq!(event_box.make_response().unwrap_err().kind(), "DISCONNECTED");
        assert_eq!(adapter.calls.load(Ordering::SeqCst), 0);
        pool.shutdown().await;
    }

    /// A waiter already parked in `wait()` while its item still sits in the
    /// queue must be woken once the worker discovers the disconnect at
    /// dispatch time, even though no `set_*` outcome is ever written.
    #[tokio::test]
    async fn a_waiter_parked_before_disconnect_is_woken_by_the_short_circuit() {
        let adapter = Arc::new(EchoAdapter { calls: Default::default(), fail: false });
        let queue = Arc::new(RequestQueue::new(8));
        let pool = Arc::new(WorkerPool::new(queue, adapter.clone(), 1, 4, 0));

        let disconnect = Arc::new(AtomicBool::new(false));
        let event_box = Arc::new(EventBox::new(disconnect.clone()));
        let mut fields = std::collections::BTreeMap::new();
        fields.insert("max_new_tokens".to_string(), serde_json::json!(1));
        let work_item = WorkItem::new(serde_json::json!("gone"), ShapeKey::new(fields), event_box.clone());

        pool.submit(work_item).await.unwrap();

        let waiter = {
            let event_box = event_box.clone();
            tokio::spawn(async move {
                event_box.wait().await;
            })
        };
        tokio::time::sleep(std::time::Duration::from_millis(10)).await;
        disconnect.store(true, Ordering::SeqCst);

        pool.startup().await;
        tokio::time::timeout(std::time::Duration::from_secs(1), waiter)
            .await
            .expect("waiter should be woken once the worker short-circuits the disconnected item")
            .unwrap();

        assert_eq!(event_box.make_response().unwrap_err().kind(), "DISCONNECTED");
        assert_eq!(adapter.calls.load(Ordering::SeqCst), 0);
        pool.shutdown().await;
    }

    #[tokio::test]
    async fn cache_hit_avoids_a_second_adapter_invocation() {
        let adapter = Arc::new(EchoAdapter { calls: Default::default(), fail: false });
        let queue = Arc::new(RequestQueue::new(8));
        let pool = Arc::new(WorkerPool::new(queue, adapter.clone(), 1, 4, 4));
        pool.startup().await;

        let (item_a, box_a) = item(1, serde_json::json!("same"));
        pool.submit(item_a).await.unwrap();
        box_a.wait().await;

        let (item_b, box_b) = item(1, serde_json::json!("same"));
        pool.submit(item_b).await.unwrap();
        box_b.wait().await;

        assert_eq!(adapter.calls.load(Ordering::SeqCst), 1);
        assert_eq!(box_b.make_response().unwrap(), serde_json::json!("same"));
        pool.shutdown().await;
    }
}
