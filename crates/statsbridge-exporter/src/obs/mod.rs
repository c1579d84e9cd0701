//! Metrics exposition.
//!
//! Collectors are registered once at startup; every scrape gathers them anew
//! and renders the Prometheus text format. Nothing is cached between scrapes.

pub mod exposition;
pub mod registry;

pub use registry::Registry;
