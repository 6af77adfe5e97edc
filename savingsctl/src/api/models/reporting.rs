//! API request/response models for reporting aggregates.

use crate::db::models::reporting::{DailyAggregate, MinutesBreakdown, ReportingAggregate};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_with::{DisplayFromStr, serde_as};
use utoipa::{IntoParams, ToSchema};

/// Query parameters for windowed aggregates.
///
/// Use case names to match exactly are passed as repeated `name` parameters and read from the
/// raw query string, since they do not fit a flat struct.
#[derive(Debug, Default, Deserialize, IntoParams, ToSchema)]
pub struct AggregatesQuery {
    /// Window start: `YYYY-MM-DD` or RFC 3339 (default: 30 days before `to`)
    pub from: Option<String>,
    /// Last included day: `YYYY-MM-DD` or RFC 3339 (default: now)
    pub to: Option<String>,
    /// Case-insensitive substring match on the use case name
    pub search: Option<String>,
    /// Amortization period for fixed savings: `per_day`, `per_week`, `per_month` or `per_range`.
    /// Unrecognised values fall back to the configured period.
    #[serde(alias = "fixedPeriod")]
    pub fixed_period: Option<String>,
}

/// Query parameters for daily aggregates
#[serde_as]
#[derive(Debug, Default, Deserialize, IntoParams, ToSchema)]
pub struct DailyQuery {
    /// Window start (default: 7 days before `to`)
    pub from: Option<String>,
    /// Last included day (default: now)
    pub to: Option<String>,
    pub search: Option<String>,
    /// Number of most recent days to return (default: 7, max: 31)
    #[param(default = 7, minimum = 1, maximum = 31)]
    #[serde(alias = "limitDays")]
    #[serde_as(as = "Option<DisplayFromStr>")]
    pub limit_days: Option<i64>,
}

/// Minutes saved, split by where the saving comes from
#[derive(Debug, Clone, Copy, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MinutesResponse {
    /// Flat savings: per fixed period for fixed types, per execution otherwise
    pub fixed_total: f64,
    /// Savings credited to successful runs
    pub variable_success_total: f64,
    /// Savings credited to partially successful runs
    pub variable_partial_total: f64,
    pub total: f64,
}

impl From<MinutesBreakdown> for MinutesResponse {
    fn from(m: MinutesBreakdown) -> Self {
        Self {
            fixed_total: m.fixed_total,
            variable_success_total: m.variable_success_total,
            variable_partial_total: m.variable_partial_total,
            total: m.total,
        }
    }
}

/// Run counts and minutes saved for one use case over the requested window
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ReportingAggregateResponse {
    #[schema(example = "Invoice Bot")]
    pub use_case_name: String,
    pub success: i64,
    pub failure: i64,
    pub invalid: i64,
    pub partial: i64,
    /// Sum of all four outcome counts
    pub executions: i64,
    pub minutes: MinutesResponse,
}

impl From<ReportingAggregate> for ReportingAggregateResponse {
    fn from(a: ReportingAggregate) -> Self {
        Self {
            use_case_name: a.use_case_name,
            success: a.success,
            failure: a.failure,
            invalid: a.invalid,
            partial: a.partial,
            executions: a.executions,
            minutes: a.minutes.into(),
        }
    }
}

/// Run counts for one use case on one calendar day (UTC)
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DailyAggregateResponse {
    #[schema(value_type = String, format = Date, example = "2024-03-01")]
    pub day: NaiveDate,
    pub use_case_name: String,
    pub success: i64,
    pub failure: i64,
    pub invalid: i64,
    pub partial: i64,
    pub total: i64,
}

impl From<DailyAggregate> for DailyAggregateResponse {
    fn from(d: DailyAggregate) -> Self {
        Self {
            day: d.day,
            use_case_name: d.use_case_name,
            success: d.success,
            failure: d.failure,
            invalid: d.invalid,
            partial: d.partial,
            total: d.total,
        }
    }
}
