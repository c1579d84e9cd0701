//! Request counters owned by the synthetic target.
//!
//! Two independent atomics; increments never get lost under concurrent
//! handlers. A snapshot reads both fields but gives no cross-field atomicity.

use std::sync::atomic::{AtomicU64, Ordering};

/// Values observed by [`CounterStore::snapshot`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CounterSnapshot {
    pub success: u64,
    pub error: u64,
}

/// Monotonic success/error counters, reset only on process restart.
#[derive(Debug, Default)]
pub struct CounterStore {
    success: AtomicU64,
    error: AtomicU64,
}

impl CounterStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one successful response.
    pub fn increment_success(&self) {
        self.success.fetch_add(1, Ordering::Relaxed);
    }

    /// Record one error response.
    pub fn increment_error(&self) {
        self.error.fetch_add(1, Ordering::Relaxed);
    }

    pub fn snapshot(&self) -> CounterSnapshot {
        CounterSnapshot {
            success: self.success.load(Ordering::Relaxed),
            error: self.error.load(Ordering::Relaxed),
        }
    }
}
