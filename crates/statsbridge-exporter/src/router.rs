//! Axum router wiring for both listeners.

use axum::{routing::get, Router};

use crate::app_state::{ExporterState, TargetState};
use crate::{ops, target};

/// Synthetic target: `/test200`, `/test500`, `/stats`.
pub fn build_target_router(state: TargetState) -> Router {
    Router::new()
        .route("/test200", get(target::test200))
        .route("/test500", get(target::test500))
        .route("/stats", get(target::stats))
        .with_state(state)
}

/// Exposition: `/metrics` plus liveness/readiness.
pub fn build_exporter_router(state: ExporterState) -> Router {
    Router::new()
        .route("/metrics", get(ops::metrics))
        .route("/healthz", get(ops::healthz))
        .route("/readyz", get(ops::readyz))
        .with_state(state)
}
