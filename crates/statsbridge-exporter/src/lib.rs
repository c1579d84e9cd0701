//! statsbridge exporter library entry.
//!
//! This crate wires the synthetic target, the stats fetcher, the scrape-time
//! collector and the exposition endpoint into two HTTP listeners. It is
//! consumed by the binary (`main.rs`) and by integration tests.

pub mod app_state;
pub mod collector;
pub mod config;
pub mod fetch;
pub mod lifecycle;
pub mod obs;
pub mod ops;
pub mod router;
pub mod target;
