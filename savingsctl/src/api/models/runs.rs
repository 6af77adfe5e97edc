//! API request/response models for automation runs.

use crate::db::models::runs::{RecentRun, RunSummary};
use crate::types::RunStatus;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_with::{DisplayFromStr, serde_as};
use utoipa::{IntoParams, ToSchema};

#[serde_as]
#[derive(Debug, Default, Deserialize, IntoParams, ToSchema)]
pub struct RecentRunsQuery {
    /// Maximum number of runs to return (default: 10, max: 100)
    #[param(default = 10, minimum = 1, maximum = 100)]
    #[serde_as(as = "Option<DisplayFromStr>")]
    pub limit: Option<i64>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RunSummaryResponse {
    pub total_runs: i64,
    pub passed: i64,
    pub failed: i64,
    /// Mean run duration in seconds, rounded
    pub avg_duration: i64,
}

impl From<RunSummary> for RunSummaryResponse {
    fn from(s: RunSummary) -> Self {
        Self {
            total_runs: s.total_runs,
            passed: s.passed,
            failed: s.failed,
            avg_duration: s.avg_duration,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RecentRunResponse {
    pub id: String,
    pub use_case_id: String,
    pub use_case_name: String,
    pub status: RunStatus,
    pub duration_seconds: i64,
    pub started_at: DateTime<Utc>,
}

impl From<RecentRun> for RecentRunResponse {
    fn from(r: RecentRun) -> Self {
        Self {
            id: r.id,
            use_case_id: r.use_case_id,
            use_case_name: r.use_case_name,
            status: r.status,
            duration_seconds: r.duration_seconds,
            started_at: r.started_at,
        }
    }
}
