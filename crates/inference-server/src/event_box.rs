//! Per-request synchronization object (`spec.md` §3, §4.3).
//!
//! Built on a single-writer/single-waiter contract: one worker task calls
//! `set_*` at most once, one handler task calls `wait()`/`make_response()`.
//! Extra waiters are explicitly unsupported, matching `spec.md` §5's
//! "Shared resources" note.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use serde_json::Value;
use tokio::sync::Notify;

use crate::error::RequestError;

#[derive(Debug, Clone)]
enum Outcome {
    Done(Value),
    UserError(String),
    AppError(String),
}

pub struct EventBox {
    notify: Notify,
    disconnect: Arc<AtomicBool>,
    outcome: Mutex<Option<Outcome>>,
}

impl EventBox {
    /// `disconnect` is shared with whatever watcher (HTTP poll or websocket
    /// connection guard) is responsible for this request, so a single flip
    /// is visible to every Event Box issued under that connection.
    pub fn new(disconnect: Arc<AtomicBool>) -> Self {
        EventBox {
            notify: Notify::new(),
            disconnect,
            outcome: Mutex::new(None),
        }
    }

    fn set(&self, outcome: Outcome) {
        let mut guard = self.outcome.lock().unwrap();
        if guard.is_none() {
            *guard = Some(outcome);
            drop(guard);
            self.notify.notify_one();
        }
        // First write wins; later calls are no-ops (`spec.md` §4.3).
    }

    pub fn set_done(&self, result: Value) {
        self.set(Outcome::Done(result));
    }

    pub fn set_user_error(&self, message: impl Into<String>) {
        self.set(Outcome::UserError(message.into()));
    }

    pub fn set_application_error(&self, message: impl Into<String>) {
        self.set(Outcome::AppError(message.into()));
    }

    pub fn disconnect_signal(&self) -> Arc<AtomicBool> {
        self.disconnect.clone()
    }

    /// Wakes a suspended `wait()` without writing a terminal outcome. Used
    /// when a caller discovers `is_disconnected()` already true (the short
    /// circuit in the Worker Pool's batch step 3) and needs to release a
    /// handler that may already be parked in `wait()` — the disconnect flag
    /// alone does not wake the `Notify` it did not go through.
    pub fn wake(&self) {
        self.notify.notify_one();
    }

    pub fn is_disconnected(&self) -> bool {
        self.disconnect.load(Ordering::SeqCst)
    }

    fn is_terminal(&self) -> bool {
        self.is_disconnected() || self.outcome.lock().unwrap().is_some()
    }

    /// Suspends until the result is set or the disconnect signal fires,
    /// whichever happens first.
    pub async fn wait(&self) {
        loop {
            let notified = self.notify.notified();
            if self.is_terminal() {
                return;
            }
            notified.await;
        }
    }

    /// Derives the envelope payload. The disconnect signal dominates a
    /// written result even if it fired after (`spec.md` §8, disconnect
    /// dominance).
    pub fn make_response(&self) -> Result<Value, RequestError> {
        if self.is_disconnected() {
            return Err(RequestError::Disconnected);
        }
        match &*self.outcome.lock().unwrap() {
            Some(Outcome::Done(value)) => Ok(value.clone()),
            Some(Outcome::UserError(message)) => Err(RequestError::User(message.clone())),
            Some(Outcome::AppError(message)) => Err(RequestError::Application(message.clone())),
            None => Err(RequestError::Application(
                "request was not done and had no errors".to_string(),
            )),
        }
    }
}
