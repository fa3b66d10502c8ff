//! Disconnect detection for HTTP unary requests and websockets (`spec.md`
//! §4.4, "Disconnect Watcher").
//!
//! `spec.md` §9 notes this crate cannot hook a raw socket disconnect
//! without bypassing `axum::serve`'s abstraction, so this module observes
//! client presence the way the handler's own task lifetime does: a guard's
//! `Drop` flips the shared flag the moment axum cancels the handler future
//! (request body gone) or the websocket receive loop ends, rather than
//! polling a liveness check. The flag is only ever read, never used to
//! interrupt a worker mid-inference (`spec.md` §5 "Cancellation").

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Shared per-websocket-connection disconnect flag. Every Event Box issued
/// for requests submitted over one connection clones this `Arc`, so a
/// single flip (from the receive loop ending) is visible to all of them
/// (`spec.md` §4.4, websocket case).
#[derive(Clone)]
pub struct ConnectionGuard {
    flag: Arc<AtomicBool>,
}

impl ConnectionGuard {
    pub fn new() -> Self {
        ConnectionGuard {
            flag: Arc::new(AtomicBool::new(false)),
        }
    }

    pub fn flag(&self) -> Arc<AtomicBool> {
        self.flag.clone()
    }
}

impl Default for ConnectionGuard {
    fn default() -> Self {
        Self::new()
    }
}

/// Flips the connection's disconnect flag when dropped — the receive loop
/// holds one of these so any exit path (clean close, error, panic unwind)
/// marks every outstanding request on the connection as disconnected.
pub struct DropSignal {
    flag: Arc<AtomicBool>,
}

impl DropSignal {
    pub fn new(flag: Arc<AtomicBool>) -> Self {
        DropSignal { flag }
    }
}

impl Drop for DropSignal {
    fn drop(&mut self) {
        self.flag.store(true, Ordering::SeqCst);
    }
}

/// Per-unary-request guard: if the handler's surrounding task is dropped
/// before [`RequestGuard::disarm`] is called — the only way that happens
/// under `axum::serve` is the client going away — the shared flag flips.
/// A handler that reaches its normal return path disarms the guard first,
/// so completing a response is never mistaken for a disconnect.
pub struct RequestGuard {
    flag: Arc<AtomicBool>,
    armed: bool,
}

impl RequestGuard {
    pub fn new(flag: Arc<AtomicBool>) -> Self {
        RequestGuard { flag, armed: true }
    }

    pub fn disarm(&mut self) {
        self.armed = false;
    }
}

impl Drop for RequestGuard {
    fn drop(&mut self) {
        if self.armed {
            self.flag.store(true, Ordering::SeqCst);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn connection_guard_is_shared_across_clones() {
        let guard = ConnectionGuard::new();
        let flag_a = guard.flag();
        let flag_b = guard.flag();
        {
            let _signal = DropSignal::new(guard.flag());
        }
        assert!(flag_a.load(Ordering::SeqCst));
        assert!(flag_b.load(Ordering::SeqCst));
    }

    #[test]
    fn disarmed_request_guard_does_not_flip_on_drop() {
        let flag = Arc::new(AtomicBool::new(false));
        {
            let mut guard = RequestGuard::new(flag.clone());
            guard.disarm();
        }
        assert!(!flag.load(Ordering::SeqCst));
    }

    #[test]
    fn armed_request_guard_flips_on_drop() {
        let flag = Arc::new(AtomicBool::new(false));
        {
            let _guard = RequestGuard::new(flag.clone());
        }
        assert!(flag.load(Ordering::SeqCst));
    }
}
