//! Automation run statistics endpoints.

use crate::{
    AppState,
    api::models::runs::{RecentRunResponse, RecentRunsQuery, RunSummaryResponse},
    db::handlers::Runs,
    errors::Result,
};
use axum::{
    Json,
    extract::{Query, State},
};

#[utoipa::path(
    get,
    path = "/runs/summary",
    tag = "runs",
    summary = "Run totals",
    responses(
        (status = 200, description = "Totals across all runs; zeros when no runs are recorded", body = RunSummaryResponse),
        (status = 500, description = "Internal server error")
    )
)]
#[tracing::instrument(skip_all)]
pub async fn get_run_summary(State(state): State<AppState>) -> Result<Json<RunSummaryResponse>> {
    let summary = Runs::new(&state.db).summary().await?;
    Ok(Json(summary.into()))
}

#[utoipa::path(
    get,
    path = "/runs/recent",
    tag = "runs",
    summary = "Most recent runs",
    params(RecentRunsQuery),
    responses(
        (status = 200, description = "Runs, newest first", body = Vec<RecentRunResponse>),
        (status = 500, description = "Internal server error")
    )
)]
#[tracing::instrument(skip_all)]
pub async fn list_recent_runs(
    State(state): State<AppState>,
    Query(query): Query<RecentRunsQuery>,
) -> Result<Json<Vec<RecentRunResponse>>> {
    let runs = Runs::new(&state.db).recent(query.limit).await?;
    Ok(Json(runs.into_iter().map(Into::into).collect()))
}
