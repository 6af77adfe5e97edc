//! Use case directory and per use case overview endpoints.

use super::reporting::parse_range;
use crate::{
    AppState,
    api::models::use_cases::{ListUseCasesQuery, OverviewQuery, UseCaseDetailResponse, UseCaseResponse},
    db::handlers::{
        Reporting, Savings, UseCases,
        reporting::{AggregateFilter, DEFAULT_AGGREGATE_SPAN},
        use_cases::UseCaseFilter,
    },
    errors::{Error, Result},
    types::UseCaseStatus,
};
use axum::{
    Json,
    extract::{Query, State},
};

#[utoipa::path(
    get,
    path = "/use-cases",
    tag = "use-cases",
    summary = "List use cases",
    description = "Lists the use case directory. The savings table is used when it exists, with columns detected at runtime; \
                   otherwise the canonical use case table.",
    params(ListUseCasesQuery),
    responses(
        (status = 200, description = "Use cases", body = Vec<UseCaseResponse>),
        (status = 400, description = "Unknown status"),
        (status = 500, description = "Internal server error")
    )
)]
#[tracing::instrument(skip_all)]
pub async fn list_use_cases(
    State(state): State<AppState>,
    Query(query): Query<ListUseCasesQuery>,
) -> Result<Json<Vec<UseCaseResponse>>> {
    let status = query
        .status
        .as_deref()
        .filter(|s| !s.trim().is_empty())
        .map(str::parse::<UseCaseStatus>)
        .transpose()
        .map_err(Error::bad_request)?;

    let filter = UseCaseFilter {
        search: query.search,
        status,
        live_only: query.live.unwrap_or(true),
        limit: query.pagination.limit,
        offset: query.pagination.offset,
    };

    let use_cases = UseCases::new(&state.db).list(&filter).await?;
    Ok(Json(use_cases.into_iter().map(Into::into).collect()))
}

#[utoipa::path(
    get,
    path = "/use-cases/overview",
    tag = "use-cases",
    summary = "Use case overview",
    description = "Directory details, reporting aggregate, hours saved and savings configuration for one use case.",
    params(OverviewQuery),
    responses(
        (status = 200, description = "Overview; parts with no data are null", body = UseCaseDetailResponse),
        (status = 400, description = "Missing name or unparseable date"),
        (status = 500, description = "Internal server error")
    )
)]
#[tracing::instrument(skip_all)]
pub async fn get_use_case_overview(
    State(state): State<AppState>,
    Query(query): Query<OverviewQuery>,
) -> Result<Json<UseCaseDetailResponse>> {
    let name = query.name.as_deref().map(str::trim).unwrap_or_default();
    if name.is_empty() {
        return Err(Error::bad_request("Missing name"));
    }
    let range = parse_range(query.from.as_deref(), query.to.as_deref(), DEFAULT_AGGREGATE_SPAN)?;

    let mut filter = AggregateFilter::new(range);
    filter.names = vec![name.to_string()];

    let use_cases = UseCases::new(&state.db);
    let reporting = Reporting::new(&state.db);
    let savings = Savings::new(&state.db);
    let (overview, aggregates, savings) = tokio::try_join!(
        use_cases.overview_by_name(name),
        reporting.aggregate(&filter),
        savings.find_by_name(name),
    )?;

    Ok(Json(UseCaseDetailResponse {
        name: name.to_string(),
        overview: overview.map(Into::into),
        reporting: aggregates.into_iter().next().map(Into::into),
        savings: savings.unwrap_or_default().map(Into::into),
        range: range.into(),
    }))
}
