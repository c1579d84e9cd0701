//! Shared state for the two listeners.
//!
//! The synthetic target owns the counters; the exporter owns the collector
//! registry and the draining flag reported by `/readyz`.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use axum::http::StatusCode;

use statsbridge_core::error::Result;
use statsbridge_core::CounterStore;

use crate::collector::MetricCollector;
use crate::config::BridgeConfig;
use crate::fetch::{StatsFetcher, TargetUrl};
use crate::obs::Registry;

#[derive(Clone)]
pub struct TargetState {
    inner: Arc<TargetStateInner>,
}

struct TargetStateInner {
    counters: CounterStore,
    stats_status: StatusCode,
}

impl TargetState {
    pub fn new(legacy_stats_status: bool) -> Self {
        let stats_status = if legacy_stats_status {
            StatusCode::INTERNAL_SERVER_ERROR
        } else {
            StatusCode::OK
        };
        Self {
            inner: Arc::new(TargetStateInner {
                counters: CounterStore::new(),
                stats_status,
            }),
        }
    }

    pub fn from_config(cfg: &BridgeConfig) -> Self {
        Self::new(cfg.target.legacy_stats_status)
    }

    pub fn counters(&self) -> &CounterStore {
        &self.inner.counters
    }

    pub fn stats_status(&self) -> StatusCode {
        self.inner.stats_status
    }
}

#[derive(Clone)]
pub struct ExporterState {
    inner: Arc<ExporterStateInner>,
}

struct ExporterStateInner {
    registry: Registry,
    draining: AtomicBool,
}

impl ExporterState {
    pub fn new(registry: Registry) -> Self {
        Self {
            inner: Arc::new(ExporterStateInner {
                registry,
                draining: AtomicBool::new(false),
            }),
        }
    }

    /// Build the registry with the stats collector pointed at the configured target.
    /// Returns Result so main can handle errors gracefully (no panic).
    pub fn from_config(cfg: &BridgeConfig) -> Result<Self> {
        let target = TargetUrl::parse(&cfg.exporter.target_url)?;
        let fetcher = StatsFetcher::new(cfg.exporter.fetch_timeout());

        let mut registry = Registry::new();
        registry.register(Arc::new(MetricCollector::new(fetcher, target)))?;

        Ok(Self::new(registry))
    }

    pub fn registry(&self) -> &Registry {
        &self.inner.registry
    }

    /// Mark draining state.
    pub fn set_draining(&self) {
        self.inner.draining.store(true, Ordering::Relaxed);
    }

    /// Return whether draining is active.
    pub fn is_draining(&self) -> bool {
        self.inner.draining.load(Ordering::Relaxed)
    }
}
