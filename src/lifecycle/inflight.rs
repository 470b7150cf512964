//! In-flight request tracking.
//!
//! `axum::serve` already waits for accepted connections during a graceful
//! shutdown; this counter only makes the drain observable in the logs and
//! lets the coordinator report how many requests a timed-out drain abandoned.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

/// Shared count of requests currently inside a handler.
#[derive(Debug, Clone, Default)]
pub struct InFlight {
    active: Arc<AtomicU64>,
}

impl InFlight {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a request entering the service. The returned guard decrements
    /// the count when dropped, including when the request future is
    /// cancelled mid-delay.
    pub fn track(&self) -> InFlightGuard {
        self.active.fetch_add(1, Ordering::SeqCst);
        InFlightGuard {
            active: Arc::clone(&self.active),
        }
    }

    pub fn count(&self) -> u64 {
        self.active.load(Ordering::SeqCst)
    }
}

/// Decrements the in-flight count on drop.
#[derive(Debug)]
pub struct InFlightGuard {
    active: Arc<AtomicU64>,
}

impl Drop for InFlightGuard {
    fn drop(&mut self) {
        self.active.fetch_sub(1, Ordering::SeqCst);
    }
}
