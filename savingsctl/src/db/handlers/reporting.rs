//! Aggregation over the externally-owned reporting table.
//!
//! The reporting table holds one row per use case per run (or per day, depending on the writer)
//! with success/failure/invalid/partial counts. Its column names are discovered per request with
//! [`ColumnMapping`], then a single grouped query is issued and joined in memory against the
//! savings configuration.

use chrono::{NaiveDate, TimeDelta};
use std::collections::BTreeSet;
use tracing::{debug, instrument, warn};

use crate::{
    db::{
        Database,
        errors::{MaybeTable, OrMissing, Result},
        executor::Row,
        handlers::savings::Savings,
        mapping::{ColumnMapping, ColumnRole},
        models::{
            reporting::{DailyAggregate, MinutesBreakdown, ReportingAggregate, TimeRange},
            savings::{SavingsConfig, SavingsMap, normalize_name},
        },
        sql::{SqlBuilder, Statement, contains_pattern, quote_ident},
    },
    types::FixedPeriod,
};

/// Window used by [`Reporting::aggregate`] when the request gives no bounds
pub const DEFAULT_AGGREGATE_SPAN: TimeDelta = TimeDelta::days(30);
/// Window used by [`Reporting::aggregate_daily`] when the request gives no bounds
pub const DEFAULT_DAILY_SPAN: TimeDelta = TimeDelta::days(7);

pub const DEFAULT_LIMIT_DAYS: i64 = 7;
pub const MAX_LIMIT_DAYS: i64 = 31;

/// Filter for [`Reporting::aggregate`]
#[derive(Debug, Clone)]
pub struct AggregateFilter {
    pub range: TimeRange,
    /// Case-insensitive substring match on the use case name
    pub search: Option<String>,
    /// Exact use case names, compared after trimming and lower-casing
    pub names: Vec<String>,
    /// Overrides the configured amortization period for fixed savings
    pub fixed_period: Option<FixedPeriod>,
}

impl AggregateFilter {
    pub fn new(range: TimeRange) -> Self {
        Self {
            range,
            search: None,
            names: Vec::new(),
            fixed_period: None,
        }
    }

    fn normalized_names(&self) -> Vec<String> {
        self.names
            .iter()
            .map(|n| normalize_name(n))
            .filter(|n| !n.is_empty())
            .collect()
    }
}

/// Filter for [`Reporting::aggregate_daily`]
#[derive(Debug, Clone)]
pub struct DailyFilter {
    pub range: TimeRange,
    pub search: Option<String>,
    /// Number of most recent distinct days to keep
    pub limit_days: Option<i64>,
}

impl DailyFilter {
    pub fn new(range: TimeRange) -> Self {
        Self {
            range,
            search: None,
            limit_days: None,
        }
    }

    pub fn limit_days(&self) -> usize {
        self.limit_days.unwrap_or(DEFAULT_LIMIT_DAYS).clamp(1, MAX_LIMIT_DAYS) as usize
    }
}

pub struct Reporting<'a> {
    db: &'a Database,
}

impl<'a> Reporting<'a> {
    pub fn new(db: &'a Database) -> Self {
        Self { db }
    }

    fn table(&self) -> &str {
        &self.db.settings().reporting_table
    }

    /// Column mapping for the reporting table, or `Missing` when the table does not exist
    #[instrument(skip(self), err)]
    pub async fn resolve_mapping(&self) -> Result<MaybeTable<ColumnMapping>> {
        if !self.db.prober().table_exists(self.table()).await? {
            return Ok(MaybeTable::Missing);
        }
        let columns = self.db.prober().columns(self.table()).await?;
        let mapping = ColumnMapping::resolve(&columns, &self.db.settings().columns);
        debug!(table = self.table(), ?mapping, "Resolved reporting columns");
        Ok(MaybeTable::Present(mapping))
    }

    /// Per use case run counts and minutes saved over the filter's window
    #[instrument(skip(self), err)]
    pub async fn aggregate(&self, filter: &AggregateFilter) -> Result<Vec<ReportingAggregate>> {
        let Some(mapping) = self.resolve_mapping().await?.present() else {
            debug!(table = self.table(), "Reporting table absent, no aggregates");
            return Ok(Vec::new());
        };
        if mapping.date.is_none() {
            warn!(
                table = self.table(),
                "No date column detected; time range filter ignored. Set reporting.columns.date (REPORTING_DATE_COLUMN) to fix"
            );
        }

        let statement = aggregate_statement(self.table(), &self.db.table_ref(self.table()), &mapping, filter)?;
        let Some(rows) = self.db.executor().fetch_all(&statement).await.or_missing()?.present() else {
            return Ok(Vec::new());
        };

        let savings = match Savings::new(self.db).load_all().await? {
            MaybeTable::Present(map) => map,
            MaybeTable::Missing => {
                debug!("Savings table absent, minutes saved are zero");
                SavingsMap::default()
            }
        };

        let period = filter.fixed_period.unwrap_or(self.db.settings().fixed_period);
        let periods = filter.range.fixed_periods(period);
        Ok(rows.iter().map(|row| compute_aggregate(row, &savings, periods)).collect())
    }

    /// Per day, per use case run counts for the most recent days of the filter's window
    #[instrument(skip(self), err)]
    pub async fn aggregate_daily(&self, filter: &DailyFilter) -> Result<Vec<DailyAggregate>> {
        let Some(mapping) = self.resolve_mapping().await?.present() else {
            return Ok(Vec::new());
        };

        let statement = daily_statement(self.table(), &self.db.table_ref(self.table()), &mapping, filter)?;
        let Some(rows) = self.db.executor().fetch_all(&statement).await.or_missing()?.present() else {
            return Ok(Vec::new());
        };

        let daily = rows.iter().filter_map(daily_from_row).collect();
        Ok(keep_recent_days(daily, filter.limit_days()))
    }
}

fn sum_expr(mapping: &ColumnMapping, role: ColumnRole) -> String {
    match mapping.get(role) {
        Some(column) => format!("SUM(COALESCE({}, 0))::bigint", quote_ident(column)),
        None => "0::bigint".to_string(),
    }
}

fn count_columns(mapping: &ColumnMapping) -> String {
    format!(
        "{} AS success, {} AS failure, {} AS invalid, {} AS partial",
        sum_expr(mapping, ColumnRole::Success),
        sum_expr(mapping, ColumnRole::Failure),
        sum_expr(mapping, ColumnRole::Invalid),
        sum_expr(mapping, ColumnRole::Partial),
    )
}

fn push_range(query: &mut SqlBuilder, date: &str, range: &TimeRange) {
    let date = quote_ident(date);
    query
        .push(format!(" AND ({date}::timestamptz) >= "))
        .push_bind(range.from)
        .push(format!(" AND ({date}::timestamptz) < "))
        .push_bind(range.to_exclusive());
}

/// The grouped aggregate query. The name column must be mapped.
pub fn aggregate_statement(table: &str, table_ref: &str, mapping: &ColumnMapping, filter: &AggregateFilter) -> Result<Statement> {
    let name = quote_ident(mapping.require(ColumnRole::Name, table)?);

    let mut query = SqlBuilder::new(format!(
        "SELECT LOWER(TRIM(CAST({name} AS TEXT))) AS key_name, CAST({name} AS TEXT) AS use_case_name, {} FROM {table_ref} WHERE 1=1",
        count_columns(mapping)
    ));

    if let Some(date) = mapping.get(ColumnRole::Date) {
        push_range(&mut query, date, &filter.range);
    }

    if let Some(pattern) = contains_pattern(filter.search.as_deref()) {
        query.push(format!(" AND CAST({name} AS TEXT) ILIKE ")).push_bind(pattern);
    }

    let names = filter.normalized_names();
    if !names.is_empty() {
        query
            .push(format!(" AND LOWER(TRIM(CAST({name} AS TEXT))) = ANY("))
            .push_bind(names)
            .push("::text[])");
    }

    query.push(" GROUP BY 1, 2 ORDER BY 2 ASC");
    Ok(query.build())
}

/// The per-day grouped query. Both the name and date columns must be mapped.
pub fn daily_statement(table: &str, table_ref: &str, mapping: &ColumnMapping, filter: &DailyFilter) -> Result<Statement> {
    let name = quote_ident(mapping.require(ColumnRole::Name, table)?);
    let date = mapping.require(ColumnRole::Date, table)?;

    let mut query = SqlBuilder::new(format!(
        "SELECT (DATE_TRUNC('day', ({}::timestamptz)))::date AS day, CAST({name} AS TEXT) AS use_case_name, {} FROM {table_ref} WHERE 1=1",
        quote_ident(date),
        count_columns(mapping)
    ));
    push_range(&mut query, date, &filter.range);

    if let Some(pattern) = contains_pattern(filter.search.as_deref()) {
        query.push(format!(" AND CAST({name} AS TEXT) ILIKE ")).push_bind(pattern);
    }

    query.push(" GROUP BY 1, 2 ORDER BY 1 DESC, 2 ASC");
    Ok(query.build())
}

/// Combine one grouped row with its savings configuration.
///
/// Fixed savings types are counted once per period in the window; any other type counts the
/// fixed amount once per execution.
pub fn compute_aggregate(row: &Row, savings: &SavingsMap, fixed_periods: i64) -> ReportingAggregate {
    let use_case_name = row.text("use_case_name").unwrap_or_default();
    let key = row.text("key_name").unwrap_or_else(|| normalize_name(&use_case_name));

    let success = row.int("success");
    let failure = row.int("failure");
    let invalid = row.int("invalid");
    let partial = row.int("partial");
    let executions = success + failure + invalid + partial;

    let zero = SavingsConfig::zero(&use_case_name);
    let config = savings.get(&key).unwrap_or(&zero);

    let fixed_multiplier = if config.is_fixed_type() { fixed_periods } else { executions };
    let fixed_total = fixed_multiplier as f64 * config.fixed_minutes_per_run;
    let variable_success_total = success as f64 * config.variable_minutes_per_success;
    let variable_partial_total = partial as f64 * config.variable_minutes_per_partial;

    ReportingAggregate {
        use_case_name,
        success,
        failure,
        invalid,
        partial,
        executions,
        minutes: MinutesBreakdown {
            fixed_total,
            variable_success_total,
            variable_partial_total,
            total: fixed_total + variable_success_total + variable_partial_total,
        },
    }
}

fn daily_from_row(row: &Row) -> Option<DailyAggregate> {
    let day = row.date("day")?;
    let success = row.int("success");
    let failure = row.int("failure");
    let invalid = row.int("invalid");
    let partial = row.int("partial");
    Some(DailyAggregate {
        day,
        use_case_name: row.text("use_case_name").unwrap_or_default(),
        success,
        failure,
        invalid,
        partial,
        total: success + failure + invalid + partial,
    })
}

/// Keep rows belonging to the `limit` most recent distinct days, newest first
pub fn keep_recent_days(rows: Vec<DailyAggregate>, limit: usize) -> Vec<DailyAggregate> {
    let days: BTreeSet<NaiveDate> = rows.iter().map(|r| r.day).collect();
    let kept: BTreeSet<NaiveDate> = days.into_iter().rev().take(limit).collect();

    let mut rows: Vec<_> = rows.into_iter().filter(|r| kept.contains(&r.day)).collect();
    rows.sort_by(|a, b| b.day.cmp(&a.day).then_with(|| a.use_case_name.cmp(&b.use_case_name)));
    rows
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        config::{ReportingColumns, ReportingConfig},
        db::{errors::DbError, sql::Param},
        test_utils::{ScriptedExecutor, scripted_database, scripted_database_with},
    };
    use chrono::{DateTime, TimeZone, Utc};
    use std::sync::Arc;

    const AGGREGATE_SQL: &str = "AS key_name";
    const DAILY_SQL: &str = "DATE_TRUNC('day'";
    const SAVINGS_SQL: &str = "fixed_savings_per_run";

    fn day(y: i32, m: u32, d: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, 0, 0, 0).unwrap()
    }

    /// Seven included days: Jan 1 through Jan 7
    fn one_week() -> TimeRange {
        TimeRange::resolve(Some(day(2024, 1, 1)), Some(day(2024, 1, 7)), DEFAULT_AGGREGATE_SPAN, day(2024, 2, 1))
    }

    fn reporting_executor() -> Arc<ScriptedExecutor> {
        let executor = Arc::new(ScriptedExecutor::new());
        executor.table("reporting", true).columns(
            "reporting",
            &[
                ("Use_Case_Name", "text"),
                ("run_date", "date"),
                ("success", "integer"),
                ("failure", "integer"),
                ("invalid", "integer"),
                ("partial", "integer"),
            ],
        );
        executor
    }

    fn aggregate_row(name: &str, success: i64, failure: i64, invalid: i64, partial: i64) -> Row {
        Row::new()
            .with("key_name", normalize_name(name))
            .with("use_case_name", name)
            .with("success", success)
            .with("failure", failure)
            .with("invalid", invalid)
            .with("partial", partial)
    }

    fn savings_row(name: &str, savings_type: &str, fixed: f64, variable: f64, partial: f64) -> Row {
        Row::new()
            .with("id", "x")
            .with("use_case_name", name)
            .with("savings_type", savings_type)
            .with("fixed_savings_per_run", fixed)
            .with("savings_per_run", variable)
            .with("partial_savings_per_run", partial)
    }

    fn daily_row(d: NaiveDate, name: &str, success: i64) -> Row {
        Row::new()
            .with("day", d)
            .with("use_case_name", name)
            .with("success", success)
            .with("failure", 1i64)
            .with("invalid", 0i64)
            .with("partial", 0i64)
    }

    #[tokio::test]
    async fn invoice_bot_weekly_fixed_savings() {
        let executor = reporting_executor();
        executor
            .on(AGGREGATE_SQL, vec![aggregate_row("Invoice Bot", 10, 2, 0, 1)])
            .table("usecase_savings_ref", true)
            .on(SAVINGS_SQL, vec![savings_row("invoice bot", "Fixed Weekly", 5.0, 3.0, 2.0)]);
        let db = scripted_database(executor);

        let mut filter = AggregateFilter::new(one_week());
        filter.fixed_period = Some(FixedPeriod::PerWeek);
        let rows = Reporting::new(&db).aggregate(&filter).await.unwrap();

        assert_eq!(rows.len(), 1);
        let invoice = &rows[0];
        assert_eq!(invoice.executions, 13);
        assert_eq!(invoice.minutes.fixed_total, 5.0);
        assert_eq!(invoice.minutes.variable_success_total, 30.0);
        assert_eq!(invoice.minutes.variable_partial_total, 2.0);
        assert_eq!(invoice.minutes.total, 37.0);
    }

    #[tokio::test]
    async fn per_execution_type_counts_fixed_per_run() {
        let executor = reporting_executor();
        executor
            .on(AGGREGATE_SQL, vec![aggregate_row("Invoice Bot", 10, 2, 0, 1)])
            .table("usecase_savings_ref", true)
            .on(SAVINGS_SQL, vec![savings_row("Invoice Bot", "Per Execution", 1.0, 3.0, 2.0)]);
        let db = scripted_database(executor);

        let rows = Reporting::new(&db).aggregate(&AggregateFilter::new(one_week())).await.unwrap();
        assert_eq!(rows[0].minutes.fixed_total, 13.0);
        assert_eq!(rows[0].minutes.total, 13.0 + 30.0 + 2.0);
    }

    #[tokio::test]
    async fn configured_period_applies_when_request_omits_it() {
        let executor = reporting_executor();
        executor
            .on(AGGREGATE_SQL, vec![aggregate_row("Invoice Bot", 0, 0, 0, 0)])
            .table("usecase_savings_ref", true)
            .on(SAVINGS_SQL, vec![savings_row("Invoice Bot", "fixed", 5.0, 0.0, 0.0)]);
        let settings = ReportingConfig {
            fixed_period: FixedPeriod::PerDay,
            ..Default::default()
        };
        let db = scripted_database_with(executor, settings);

        let rows = Reporting::new(&db).aggregate(&AggregateFilter::new(one_week())).await.unwrap();
        assert_eq!(rows[0].minutes.fixed_total, 35.0);
    }

    #[tokio::test]
    async fn missing_reporting_table_yields_nothing() {
        let executor = Arc::new(ScriptedExecutor::new());
        executor.table("reporting", false);
        let db = scripted_database(executor.clone());

        let reporting = Reporting::new(&db);
        assert!(reporting.aggregate(&AggregateFilter::new(one_week())).await.unwrap().is_empty());
        assert!(reporting.aggregate_daily(&DailyFilter::new(one_week())).await.unwrap().is_empty());
        assert_eq!(executor.count_matching("information_schema.columns"), 0);
    }

    #[tokio::test]
    async fn table_dropped_between_probe_and_query_yields_nothing() {
        let executor = reporting_executor();
        executor.missing(AGGREGATE_SQL);
        let db = scripted_database(executor);

        assert!(Reporting::new(&db).aggregate(&AggregateFilter::new(one_week())).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn missing_savings_table_means_zero_minutes() {
        let executor = reporting_executor();
        executor
            .on(AGGREGATE_SQL, vec![aggregate_row("Order Sync", 4, 1, 0, 2)])
            .table("usecase_savings_ref", false);
        let db = scripted_database(executor);

        let rows = Reporting::new(&db).aggregate(&AggregateFilter::new(one_week())).await.unwrap();
        assert_eq!(rows[0].executions, 7);
        assert_eq!(rows[0].minutes, MinutesBreakdown::default());
    }

    #[tokio::test]
    async fn query_failures_propagate() {
        let executor = reporting_executor();
        executor.fail(AGGREGATE_SQL, "connection reset");
        let db = scripted_database(executor);

        let err = Reporting::new(&db).aggregate(&AggregateFilter::new(one_week())).await.unwrap_err();
        assert!(matches!(err, DbError::Other(_)));
    }

    #[tokio::test]
    async fn unmapped_name_column_is_a_mapping_error() {
        let executor = Arc::new(ScriptedExecutor::new());
        executor
            .table("reporting", true)
            .columns("reporting", &[("run_date", "date"), ("success", "integer")]);
        let db = scripted_database(executor);

        let err = Reporting::new(&db).aggregate(&AggregateFilter::new(one_week())).await.unwrap_err();
        assert!(matches!(err, DbError::Mapping { ref role, .. } if role == "name"));
    }

    #[tokio::test]
    async fn names_filter_is_normalized_and_bound_as_array() {
        let executor = reporting_executor();
        let db = scripted_database(executor.clone());

        let mut filter = AggregateFilter::new(one_week());
        filter.names = vec![" Order Sync ".to_string(), "   ".to_string()];
        filter.search = Some("  sync ".to_string());
        Reporting::new(&db).aggregate(&filter).await.unwrap();

        let stmt = executor.last_matching(AGGREGATE_SQL).unwrap();
        assert!(stmt.sql.contains("(\"run_date\"::timestamptz) >= $1"));
        assert!(stmt.sql.contains("(\"run_date\"::timestamptz) < $2"));
        assert!(stmt.sql.contains("CAST(\"Use_Case_Name\" AS TEXT) ILIKE $3"));
        assert!(stmt.sql.contains("LOWER(TRIM(CAST(\"Use_Case_Name\" AS TEXT))) = ANY($4::text[])"));
        assert_eq!(
            stmt.params,
            vec![
                Param::Timestamp(day(2024, 1, 1)),
                Param::Timestamp(day(2024, 1, 8)),
                Param::Text("%sync%".to_string()),
                Param::TextArray(vec!["order sync".to_string()]),
            ]
        );
    }

    #[tokio::test]
    async fn reversed_window_queries_the_same_bounds() {
        let executor = reporting_executor();
        let db = scripted_database(executor.clone());
        let reporting = Reporting::new(&db);

        let forward = TimeRange::resolve(Some(day(2024, 1, 1)), Some(day(2024, 1, 7)), DEFAULT_AGGREGATE_SPAN, day(2024, 2, 1));
        let reversed = TimeRange::resolve(Some(day(2024, 1, 7)), Some(day(2024, 1, 1)), DEFAULT_AGGREGATE_SPAN, day(2024, 2, 1));
        reporting.aggregate(&AggregateFilter::new(forward)).await.unwrap();
        reporting.aggregate(&AggregateFilter::new(reversed)).await.unwrap();

        let statements: Vec<_> = executor
            .statements()
            .into_iter()
            .filter(|s| s.sql.contains(AGGREGATE_SQL))
            .collect();
        assert_eq!(statements.len(), 2);
        assert_eq!(statements[0], statements[1]);
    }

    #[tokio::test]
    async fn missing_date_column_drops_time_filter() {
        let executor = Arc::new(ScriptedExecutor::new());
        executor
            .table("reporting", true)
            .columns("reporting", &[("usecase", "text"), ("passed", "bigint")]);
        let db = scripted_database(executor.clone());

        Reporting::new(&db).aggregate(&AggregateFilter::new(one_week())).await.unwrap();

        let stmt = executor.last_matching(AGGREGATE_SQL).unwrap();
        assert!(!stmt.sql.contains("timestamptz"));
        assert!(stmt.sql.contains("SUM(COALESCE(\"passed\", 0))::bigint AS success"));
        assert!(stmt.sql.contains("0::bigint AS partial"));
        assert!(stmt.params.is_empty());
    }

    #[tokio::test]
    async fn column_overrides_win() {
        let executor = reporting_executor();
        let settings = ReportingConfig {
            columns: ReportingColumns {
                name: Some("Label".to_string()),
                ..Default::default()
            },
            ..Default::default()
        };
        let db = scripted_database_with(executor.clone(), settings);

        Reporting::new(&db).aggregate(&AggregateFilter::new(one_week())).await.unwrap();
        let stmt = executor.last_matching(AGGREGATE_SQL).unwrap();
        assert!(stmt.sql.contains("CAST(\"Label\" AS TEXT) AS use_case_name"));
    }

    #[tokio::test]
    async fn daily_requires_a_date_column() {
        let executor = Arc::new(ScriptedExecutor::new());
        executor
            .table("reporting", true)
            .columns("reporting", &[("use_case_name", "text"), ("success", "integer")]);
        let db = scripted_database(executor);

        let err = Reporting::new(&db)
            .aggregate_daily(&DailyFilter::new(one_week()))
            .await
            .unwrap_err();
        assert!(matches!(err, DbError::Mapping { ref role, .. } if role == "date"));
    }

    #[tokio::test]
    async fn daily_keeps_most_recent_days() {
        let d = |n| NaiveDate::from_ymd_opt(2024, 1, n).unwrap();
        let executor = reporting_executor();
        executor.on(
            DAILY_SQL,
            vec![
                daily_row(d(5), "Invoice Bot", 3),
                daily_row(d(5), "Order Sync", 1),
                daily_row(d(4), "Invoice Bot", 2),
                daily_row(d(2), "Invoice Bot", 9),
            ],
        );
        let db = scripted_database(executor.clone());

        let mut filter = DailyFilter::new(one_week());
        filter.limit_days = Some(2);
        let rows = Reporting::new(&db).aggregate_daily(&filter).await.unwrap();

        let days: Vec<_> = rows.iter().map(|r| (r.day, r.use_case_name.as_str())).collect();
        assert_eq!(days, vec![(d(5), "Invoice Bot"), (d(5), "Order Sync"), (d(4), "Invoice Bot")]);
        assert_eq!(rows[0].total, 4);

        let stmt = executor.last_matching(DAILY_SQL).unwrap();
        assert!(stmt.sql.contains("GROUP BY 1, 2 ORDER BY 1 DESC, 2 ASC"));
    }

    #[test]
    fn limit_days_is_clamped() {
        let mut filter = DailyFilter::new(one_week());
        assert_eq!(filter.limit_days(), 7);
        filter.limit_days = Some(0);
        assert_eq!(filter.limit_days(), 1);
        filter.limit_days = Some(90);
        assert_eq!(filter.limit_days(), 31);
    }

    #[test]
    fn aggregate_invariants_hold() {
        let savings = SavingsMap::from_configs([SavingsConfig {
            savings_type: Some("Per Execution".to_string()),
            fixed_minutes_per_run: 0.5,
            variable_minutes_per_success: 2.0,
            variable_minutes_per_partial: 1.5,
            ..SavingsConfig::zero(" Order Sync ")
        }]);
        let row = aggregate_row("ORDER SYNC", 6, 3, 2, 4);

        let agg = compute_aggregate(&row, &savings, 3);
        assert_eq!(agg.executions, agg.success + agg.failure + agg.invalid + agg.partial);
        assert_eq!(agg.minutes.variable_success_total, 12.0);
        assert_eq!(agg.minutes.variable_partial_total, 6.0);
        assert_eq!(agg.minutes.fixed_total, 7.5);
        assert_eq!(
            agg.minutes.total,
            agg.minutes.fixed_total + agg.minutes.variable_success_total + agg.minutes.variable_partial_total
        );
    }
}
