//! Scrape-time collectors.
//!
//! A collector enumerates its descriptors once and produces fresh values on
//! every scrape. The registry in [`crate::obs`] consumes them through the
//! [`Collector`] trait.

pub mod descriptor;
pub mod stats;

use std::sync::Arc;

use async_trait::async_trait;

pub use descriptor::{build_fq_name, MetricDescriptor, Sample, ValueKind};
pub use stats::MetricCollector;

#[async_trait]
pub trait Collector: Send + Sync {
    /// Every descriptor this collector may emit. Must return the same set on
    /// every call.
    fn describe(&self) -> Vec<Arc<MetricDescriptor>>;

    /// Produce current values. Called once per scrape.
    async fn collect(&self) -> Vec<Sample>;
}
