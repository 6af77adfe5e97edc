//! Run statistics over the canonical `automation_runs` table.

use tracing::instrument;

use crate::{
    db::{
        Database,
        errors::{DbError, OrMissing, Result},
        executor::Row,
        models::runs::{RecentRun, RunSummary},
        sql::SqlBuilder,
    },
    types::RunStatus,
};

pub const DEFAULT_RECENT_LIMIT: i64 = 10;
pub const MAX_RECENT_LIMIT: i64 = 100;

pub struct Runs<'a> {
    db: &'a Database,
}

impl<'a> Runs<'a> {
    pub fn new(db: &'a Database) -> Self {
        Self { db }
    }

    /// Totals across all runs; zeros when the runs table does not exist
    #[instrument(skip(self), err)]
    pub async fn summary(&self) -> Result<RunSummary> {
        let mut query = SqlBuilder::new(
            "SELECT COUNT(*)::bigint AS total_runs, \
             COUNT(*) FILTER (WHERE status = 'PASS')::bigint AS passed, \
             COUNT(*) FILTER (WHERE status = 'FAIL')::bigint AS failed, \
             COALESCE(ROUND(AVG(duration_seconds)), 0)::bigint AS avg_duration FROM ",
        );
        query.push(self.db.table_ref(&self.db.settings().runs_table));

        let rows = self.db.executor().fetch_all(&query.build()).await.or_missing()?;
        Ok(rows
            .present()
            .and_then(|rows| rows.into_iter().next())
            .map(|row| RunSummary {
                total_runs: row.int("total_runs"),
                passed: row.int("passed"),
                failed: row.int("failed"),
                avg_duration: row.int("avg_duration"),
            })
            .unwrap_or_default())
    }

    /// Most recent runs, newest first; empty when either table does not exist
    #[instrument(skip(self), err)]
    pub async fn recent(&self, limit: Option<i64>) -> Result<Vec<RecentRun>> {
        let settings = self.db.settings();
        let limit = limit.unwrap_or(DEFAULT_RECENT_LIMIT).clamp(1, MAX_RECENT_LIMIT);

        let mut query = SqlBuilder::new(
            "SELECT CAST(r.id AS TEXT) AS id, CAST(r.use_case_id AS TEXT) AS use_case_id, \
             CAST(u.name AS TEXT) AS use_case_name, CAST(r.status AS TEXT) AS status, \
             COALESCE(r.duration_seconds, 0)::bigint AS duration_seconds, r.started_at FROM ",
        );
        query
            .push(self.db.table_ref(&settings.runs_table))
            .push(" r JOIN ")
            .push(self.db.table_ref(&settings.use_case_table))
            .push(" u ON u.id = r.use_case_id ORDER BY r.started_at DESC LIMIT ")
            .push_bind(limit);

        let rows = self.db.executor().fetch_all(&query.build()).await.or_missing()?;
        rows.unwrap_or_default().iter().map(recent_from_row).collect()
    }
}

fn recent_from_row(row: &Row) -> Result<RecentRun> {
    let status = row.text("status").unwrap_or_default();
    let status: RunStatus = status.parse().map_err(|e: String| DbError::Other(anyhow::anyhow!(e)))?;
    let started_at = row
        .timestamp("started_at")
        .ok_or_else(|| DbError::Other(anyhow::anyhow!("run has no start time")))?;

    Ok(RecentRun {
        id: row.text("id").unwrap_or_default(),
        use_case_id: row.text("use_case_id").unwrap_or_default(),
        use_case_name: row.text("use_case_name").unwrap_or_default(),
        status,
        duration_seconds: row.int("duration_seconds"),
        started_at,
    })
}
