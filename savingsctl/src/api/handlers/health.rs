use crate::{AppState, api::models::health::HealthResponse};
use axum::{Json, extract::State};
use chrono::Utc;

/// Liveness check. Does not touch the database.
#[tracing::instrument(skip_all)]
pub async fn healthz(State(state): State<AppState>) -> Json<HealthResponse> {
    let now = Utc::now();
    Json(HealthResponse {
        ok: true,
        time: now,
        uptime_seconds: (now - state.started_at).num_seconds().max(0),
        pid: std::process::id(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}
