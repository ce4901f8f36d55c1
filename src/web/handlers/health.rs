//! Health check handler

use axum::{extract::State, response::Response};
use serde::Serialize;

use crate::web::{responses::ok, AppState};

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
    pub backend: &'static str,
}

/// Liveness check; does not contact the backend
pub async fn health_check(State(state): State<AppState>) -> Response {
    ok(HealthResponse {
        status: "healthy",
        version: env!("CARGO_PKG_VERSION"),
        backend: state.backend.name(),
    })
}
