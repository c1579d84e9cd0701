//! statsbridge core: counters, the statistics wire document, and errors.
//!
//! This crate carries no transport or runtime dependencies; the exporter crate
//! builds the HTTP surfaces on top of it.
//!
//! # Defensive guarantees
//! Panics, `unwrap`, and `expect` are compile-denied here. All fallible paths
//! surface as `BridgeError`/`Result`.

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]

pub mod counters;
pub mod error;
pub mod stats;

/// Shared result type.
pub use error::{BridgeError, ErrorKind, Result};

pub use counters::{CounterSnapshot, CounterStore};
pub use stats::{StatsDocument, StatsSnapshot, STATS_PATH};
