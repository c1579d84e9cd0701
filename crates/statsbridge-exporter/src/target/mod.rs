//! Synthetic target endpoints.
//!
//! - `/test200` : always 200, counts a success
//! - `/test500` : always 500, counts an error
//! - `/stats`   : current counters as JSON

use axum::{
    extract::State,
    http::{header, StatusCode},
    response::{IntoResponse, Response},
};

use statsbridge_core::StatsDocument;

use crate::app_state::TargetState;

pub const OK_BODY: &str = r#"{"message": "HTTP Endpoint OK!"}"#;
pub const ERROR_BODY: &str = r#"{"message": "HTTP Endpoint Internal Error"}"#;

fn json_response(status: StatusCode, body: impl IntoResponse) -> Response {
    (status, [(header::CONTENT_TYPE, "application/json")], body).into_response()
}

pub async fn test200(State(state): State<TargetState>) -> Response {
    state.counters().increment_success();
    json_response(StatusCode::OK, OK_BODY)
}

pub async fn test500(State(state): State<TargetState>) -> Response {
    state.counters().increment_error();
    json_response(StatusCode::INTERNAL_SERVER_ERROR, ERROR_BODY)
}

pub async fn stats(State(state): State<TargetState>) -> Response {
    tracing::info!("serving target statistics");
    let doc = StatsDocument::from(state.counters().snapshot());
    match doc.to_json() {
        Ok(body) => json_response(state.stats_status(), body),
        Err(e) => {
            tracing::error!(error = %e, "stats document encode failed");
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}
