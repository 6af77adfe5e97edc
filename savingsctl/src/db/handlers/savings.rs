//! Database repository for the savings configuration table.
//!
//! The table has a fixed layout: `use_case_name`, `savings_type`, `fixed_savings_per_run`,
//! `savings_per_run` and `partial_savings_per_run`. It is optional; every read reports an absent
//! table as [`MaybeTable::Missing`].

use tracing::{debug, instrument};

use crate::db::{
    Database,
    errors::{MaybeTable, OrMissing, Result},
    executor::Row,
    models::savings::{SavingsConfig, SavingsMap, normalize_name},
    sql::{SqlBuilder, contains_pattern},
};

/// Default page size when listing savings rows
pub const DEFAULT_LIMIT: i64 = 100;
/// Largest page size when listing savings rows
pub const MAX_LIMIT: i64 = 1000;

const SELECT_CONFIG: &str = "SELECT md5(CAST(use_case_name AS TEXT)) AS id, \
     CAST(use_case_name AS TEXT) AS use_case_name, \
     CAST(savings_type AS TEXT) AS savings_type, \
     COALESCE(fixed_savings_per_run, 0)::float8 AS fixed_savings_per_run, \
     COALESCE(savings_per_run, 0)::float8 AS savings_per_run, \
     COALESCE(partial_savings_per_run, 0)::float8 AS partial_savings_per_run \
     FROM ";

/// Stable order for duplicate resolution: first row per normalized name wins
const DUPLICATE_ORDER: &str = " ORDER BY LOWER(TRIM(CAST(use_case_name AS TEXT))) ASC, CAST(use_case_name AS TEXT) ASC, \
     CAST(savings_type AS TEXT) ASC NULLS LAST, fixed_savings_per_run DESC NULLS LAST";

/// Filter for listing savings rows
#[derive(Debug, Clone, Default)]
pub struct SavingsFilter {
    /// Case-insensitive substring match on the use case name
    pub search: Option<String>,
    /// Exact savings type
    pub savings_type: Option<String>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

impl SavingsFilter {
    pub fn limit(&self) -> i64 {
        self.limit.unwrap_or(DEFAULT_LIMIT).clamp(1, MAX_LIMIT)
    }

    pub fn offset(&self) -> i64 {
        self.offset.unwrap_or(0).max(0)
    }
}

pub struct Savings<'a> {
    db: &'a Database,
}

impl<'a> Savings<'a> {
    pub fn new(db: &'a Database) -> Self {
        Self { db }
    }

    fn table(&self) -> &str {
        &self.db.settings().savings_table
    }

    /// Every configuration row, keyed by normalized name
    #[instrument(skip(self), err)]
    pub async fn load_all(&self) -> Result<MaybeTable<SavingsMap>> {
        if !self.db.prober().table_exists(self.table()).await? {
            debug!(table = self.table(), "Savings table absent, savings default to zero");
            return Ok(MaybeTable::Missing);
        }

        let mut query = SqlBuilder::new(SELECT_CONFIG);
        query
            .push(self.db.table_ref(self.table()))
            .push(" WHERE use_case_name IS NOT NULL")
            .push(DUPLICATE_ORDER);

        let rows = self.db.executor().fetch_all(&query.build()).await.or_missing()?;
        Ok(rows.map(|rows| SavingsMap::from_configs(rows.iter().map(config_from_row))))
    }

    /// The authoritative configuration for one use case, matched case- and whitespace-insensitively
    #[instrument(skip(self), err)]
    pub async fn find_by_name(&self, name: &str) -> Result<MaybeTable<Option<SavingsConfig>>> {
        if !self.db.prober().table_exists(self.table()).await? {
            return Ok(MaybeTable::Missing);
        }

        let mut query = SqlBuilder::new(SELECT_CONFIG);
        query
            .push(self.db.table_ref(self.table()))
            .push(" WHERE LOWER(TRIM(CAST(use_case_name AS TEXT))) = ")
            .push_bind(normalize_name(name))
            .push(DUPLICATE_ORDER)
            .push(" LIMIT 1");

        let rows = self.db.executor().fetch_all(&query.build()).await.or_missing()?;
        Ok(rows.map(|rows| rows.first().map(config_from_row)))
    }

    /// Distinct non-null savings types, sorted
    #[instrument(skip(self), err)]
    pub async fn list_distinct_types(&self) -> Result<MaybeTable<Vec<String>>> {
        if !self.db.prober().table_exists(self.table()).await? {
            return Ok(MaybeTable::Missing);
        }

        let mut query = SqlBuilder::new("SELECT DISTINCT CAST(savings_type AS TEXT) AS savings_type FROM ");
        query
            .push(self.db.table_ref(self.table()))
            .push(" WHERE savings_type IS NOT NULL ORDER BY 1");

        let rows = self.db.executor().fetch_all(&query.build()).await.or_missing()?;
        Ok(rows.map(|rows| {
            rows.iter()
                .filter_map(|row| row.text("savings_type"))
                .filter(|t| !t.is_empty())
                .collect()
        }))
    }

    /// A page of configuration rows ordered by use case name
    #[instrument(skip(self), err)]
    pub async fn list(&self, filter: &SavingsFilter) -> Result<MaybeTable<Vec<SavingsConfig>>> {
        if !self.db.prober().table_exists(self.table()).await? {
            return Ok(MaybeTable::Missing);
        }

        let mut query = SqlBuilder::new(SELECT_CONFIG);
        query.push(self.db.table_ref(self.table())).push(" WHERE 1=1");

        if let Some(pattern) = contains_pattern(filter.search.as_deref()) {
            query.push(" AND use_case_name ILIKE ").push_bind(pattern);
        }

        if let Some(savings_type) = filter.savings_type.as_deref().map(str::trim).filter(|t| !t.is_empty()) {
            query.push(" AND savings_type = ").push_bind(savings_type);
        }

        query
            .push(" ORDER BY use_case_name ASC LIMIT ")
            .push_bind(filter.limit())
            .push(" OFFSET ")
            .push_bind(filter.offset());

        let rows = self.db.executor().fetch_all(&query.build()).await.or_missing()?;
        Ok(rows.map(|rows| rows.iter().map(config_from_row).collect()))
    }
}

fn config_from_row(row: &Row) -> SavingsConfig {
    SavingsConfig {
        id: row.text("id").unwrap_or_default(),
        use_case_name: row.text("use_case_name").unwrap_or_default(),
        savings_type: row.text("savings_type"),
        fixed_minutes_per_run: row.float("fixed_savings_per_run"),
        variable_minutes_per_success: row.float("savings_per_run"),
        variable_minutes_per_partial: row.float("partial_savings_per_run"),
    }
}
