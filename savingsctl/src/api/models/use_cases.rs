//! API request/response models for the use case directory and overview.

use super::pagination::Pagination;
use super::reporting::MinutesResponse;
use super::savings::SavingsResponse;
use crate::db::models::{
    reporting::{ReportingAggregate, TimeRange},
    use_cases::{UseCaseOverview, UseCaseRef},
};
use crate::types::UseCaseStatus;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_with::{DisplayFromStr, serde_as};
use utoipa::{IntoParams, ToSchema};

/// Query parameters for listing use cases
#[serde_as]
#[derive(Debug, Default, Deserialize, IntoParams, ToSchema)]
pub struct ListUseCasesQuery {
    /// Pagination parameters (default limit: 24, max: 200)
    #[serde(flatten)]
    #[param(inline)]
    pub pagination: Pagination,

    /// Case-insensitive substring match on name or description
    pub search: Option<String>,

    /// `ACTIVE`, `DRAFT` or `DEPRECATED`
    pub status: Option<String>,

    /// Only list use cases that are live in production (default: true)
    #[serde_as(as = "Option<DisplayFromStr>")]
    pub live: Option<bool>,
}

/// A use case directory entry
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UseCaseResponse {
    pub id: String,
    #[schema(example = "Invoice Bot")]
    pub name: String,
    pub description: Option<String>,
    pub owner: Option<String>,
    pub status: UseCaseStatus,
    pub created_at: String,
    pub updated_at: Option<String>,
}

impl From<UseCaseRef> for UseCaseResponse {
    fn from(u: UseCaseRef) -> Self {
        Self {
            id: u.id,
            name: u.name,
            description: u.description,
            owner: u.owner,
            status: u.status,
            created_at: u.created_at,
            updated_at: u.updated_at,
        }
    }
}

/// Query parameters for a single use case overview
#[derive(Debug, Default, Deserialize, IntoParams, ToSchema)]
pub struct OverviewQuery {
    /// Use case name, matched case-insensitively (required)
    pub name: Option<String>,
    /// Reporting window start (default: 30 days before `to`)
    pub from: Option<String>,
    /// Last included day of the reporting window (default: now)
    pub to: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UseCaseOverviewResponse {
    pub name: String,
    pub stakeholder: Option<String>,
    pub description: Option<String>,
    /// Link to the high level design document
    pub hld_url: Option<String>,
}

impl From<UseCaseOverview> for UseCaseOverviewResponse {
    fn from(o: UseCaseOverview) -> Self {
        Self {
            name: o.name,
            stakeholder: o.stakeholder,
            description: o.description,
            hld_url: o.hld_url,
        }
    }
}

/// Run counts and savings for the overview window
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct OverviewReportingResponse {
    pub executions: i64,
    pub success: i64,
    pub failure: i64,
    pub partial: i64,
    pub invalid: i64,
    pub minutes: MinutesResponse,
    /// Total minutes saved divided by 60
    pub hours_saved: f64,
}

impl From<ReportingAggregate> for OverviewReportingResponse {
    fn from(a: ReportingAggregate) -> Self {
        Self {
            executions: a.executions,
            success: a.success,
            failure: a.failure,
            partial: a.partial,
            invalid: a.invalid,
            hours_saved: a.minutes.total / 60.0,
            minutes: a.minutes.into(),
        }
    }
}

/// The window the overview was computed over, after defaults were applied
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct RangeResponse {
    pub from: DateTime<Utc>,
    pub to: DateTime<Utc>,
}

impl From<TimeRange> for RangeResponse {
    fn from(r: TimeRange) -> Self {
        Self { from: r.from, to: r.to }
    }
}

/// Everything known about one use case: directory details, reporting and savings
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct UseCaseDetailResponse {
    /// The requested name, trimmed
    pub name: String,
    /// Absent when no directory entry matches
    pub overview: Option<UseCaseOverviewResponse>,
    /// Absent when the use case has no runs in the window
    pub reporting: Option<OverviewReportingResponse>,
    /// Absent when no savings are configured
    pub savings: Option<SavingsResponse>,
    pub range: RangeResponse,
}
