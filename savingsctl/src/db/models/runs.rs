//! Automation run records.

use chrono::{DateTime, Utc};

use crate::types::RunStatus;

/// Totals across every recorded run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub total_runs: i64,
    pub passed: i64,
    pub failed: i64,
    /// Mean duration in whole seconds
    pub avg_duration: i64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RecentRun {
    pub id: String,
    pub use_case_id: String,
    pub use_case_name: String,
    pub status: RunStatus,
    pub duration_seconds: i64,
    pub started_at: DateTime<Utc>,
}
