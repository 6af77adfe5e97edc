//! Reporting aggregate endpoints.

use crate::{
    AppState,
    api::models::reporting::{AggregatesQuery, DailyAggregateResponse, DailyQuery, ReportingAggregateResponse},
    db::{
        handlers::{
            Reporting,
            reporting::{AggregateFilter, DEFAULT_AGGREGATE_SPAN, DEFAULT_DAILY_SPAN, DailyFilter},
        },
        models::reporting::{TimeRange, parse_instant},
    },
    errors::{Error, Result},
    types::FixedPeriod,
};
use axum::{
    Json,
    extract::{Query, RawQuery, State},
};
use chrono::{DateTime, TimeDelta, Utc};

fn parse_bound(label: &str, value: Option<&str>) -> Result<Option<DateTime<Utc>>> {
    match value.map(str::trim).filter(|v| !v.is_empty()) {
        None => Ok(None),
        Some(v) => parse_instant(v)
            .map(Some)
            .ok_or_else(|| Error::bad_request(format!("Invalid '{label}' date: {v}"))),
    }
}

/// Resolve `from`/`to` query values into a window, defaulting to `default_span` ending now
pub(crate) fn parse_range(from: Option<&str>, to: Option<&str>, default_span: TimeDelta) -> Result<TimeRange> {
    let from = parse_bound("from", from)?;
    let to = parse_bound("to", to)?;
    Ok(TimeRange::resolve(from, to, default_span, Utc::now()))
}

/// All values of a repeated query parameter, in order
fn repeated_param(raw: Option<&str>, key: &str) -> Vec<String> {
    raw.map(|raw| {
        url::form_urlencoded::parse(raw.as_bytes())
            .filter(|(k, _)| k == key)
            .map(|(_, v)| v.into_owned())
            .collect()
    })
    .unwrap_or_default()
}

#[utoipa::path(
    get,
    path = "/reporting/aggregates",
    tag = "reporting",
    summary = "Aggregate runs and savings per use case",
    description = "Run counts per use case over the window, with minutes saved computed from the savings configuration. \
                   Missing reporting or savings tables yield an empty list or zero minutes.",
    params(
        AggregatesQuery,
        ("name" = Option<Vec<String>>, Query, description = "Exact use case name; repeat to match several"),
    ),
    responses(
        (status = 200, description = "Aggregates ordered by use case name", body = Vec<ReportingAggregateResponse>),
        (status = 400, description = "Unparseable date"),
        (status = 500, description = "Internal server error")
    )
)]
#[tracing::instrument(skip_all)]
pub async fn get_aggregates(
    State(state): State<AppState>,
    Query(query): Query<AggregatesQuery>,
    RawQuery(raw): RawQuery,
) -> Result<Json<Vec<ReportingAggregateResponse>>> {
    let range = parse_range(query.from.as_deref(), query.to.as_deref(), DEFAULT_AGGREGATE_SPAN)?;

    let fixed_period = query
        .fixed_period
        .as_deref()
        .filter(|v| !v.trim().is_empty())
        .and_then(|v| match v.parse::<FixedPeriod>() {
            Ok(period) => Some(period),
            Err(e) => {
                tracing::debug!("Ignoring fixed period parameter: {}", e);
                None
            }
        });

    let filter = AggregateFilter {
        range,
        search: query.search,
        names: repeated_param(raw.as_deref(), "name"),
        fixed_period,
    };

    let aggregates = Reporting::new(&state.db).aggregate(&filter).await?;
    Ok(Json(aggregates.into_iter().map(Into::into).collect()))
}

#[utoipa::path(
    get,
    path = "/reporting/daily",
    tag = "reporting",
    summary = "Daily run counts per use case",
    description = "Run counts per use case and calendar day (UTC), limited to the most recent days that have data.",
    params(DailyQuery),
    responses(
        (status = 200, description = "Daily aggregates, newest day first", body = Vec<DailyAggregateResponse>),
        (status = 400, description = "Unparseable date"),
        (status = 500, description = "Internal server error, including a reporting table without a date column")
    )
)]
#[tracing::instrument(skip_all)]
pub async fn get_daily_aggregates(
    State(state): State<AppState>,
    Query(query): Query<DailyQuery>,
) -> Result<Json<Vec<DailyAggregateResponse>>> {
    let range = parse_range(query.from.as_deref(), query.to.as_deref(), DEFAULT_DAILY_SPAN)?;
    let filter = DailyFilter {
        range,
        search: query.search,
        limit_days: query.limit_days,
    };

    let days = Reporting::new(&state.db).aggregate_daily(&filter).await?;
    Ok(Json(days.into_iter().map(Into::into).collect()))
}
