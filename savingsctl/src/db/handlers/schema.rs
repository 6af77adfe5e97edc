//! Table existence and column metadata lookups against `information_schema`.

use moka::future::Cache;
use std::{sync::Arc, time::Duration};
use tracing::{debug, instrument};

use crate::db::{
    errors::{DbError, Result},
    executor::QueryExecutor,
    sql::SqlBuilder,
};

/// Upper bound on distinct table names remembered by the existence cache
const EXISTENCE_CACHE_CAPACITY: u64 = 1_024;

/// Column metadata as reported by `information_schema.columns`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnInfo {
    pub name: String,
    pub data_type: String,
}

/// Probes the configured schema for tables and their columns.
///
/// Existence answers are cached per table name. Without a TTL they live for the process lifetime,
/// so a table created after the first probe stays invisible until [`SchemaProber::invalidate`] is
/// called or the process restarts. Column metadata is never cached.
#[derive(Clone)]
pub struct SchemaProber {
    executor: Arc<dyn QueryExecutor>,
    schema: Option<String>,
    existence: Cache<String, bool>,
}

impl SchemaProber {
    pub fn new(executor: Arc<dyn QueryExecutor>, schema: Option<String>, ttl: Option<Duration>) -> Self {
        let mut builder = Cache::builder().max_capacity(EXISTENCE_CACHE_CAPACITY);
        if let Some(ttl) = ttl {
            builder = builder.time_to_live(ttl);
        }

        Self {
            executor,
            schema: schema.filter(|s| !s.trim().is_empty()),
            existence: builder.build(),
        }
    }

    pub fn schema(&self) -> Option<&str> {
        self.schema.as_deref()
    }

    /// Whether `table` exists in the configured schema (or `current_schema()`)
    #[instrument(skip(self), err)]
    pub async fn table_exists(&self, table: &str) -> Result<bool> {
        if let Some(exists) = self.existence.get(table).await {
            return Ok(exists);
        }

        let mut query = SqlBuilder::new(
            "SELECT EXISTS (SELECT 1 FROM information_schema.tables WHERE table_schema = COALESCE(NULLIF(",
        );
        query
            .push_bind(self.schema.clone())
            .push(", ''), current_schema()) AND table_name = ")
            .push_bind(table)
            .push(") AS exists");

        let rows = self
            .executor
            .fetch_all(&query.build())
            .await
            .map_err(|e| schema_error(table, e))?;
        let exists = rows.first().is_some_and(|row| row.bool("exists"));

        debug!(table, exists, "Probed table existence");
        self.existence.insert(table.to_string(), exists).await;
        Ok(exists)
    }

    /// Column names and data types of `table`, in ordinal order. Empty when the table is absent.
    #[instrument(skip(self), err)]
    pub async fn columns(&self, table: &str) -> Result<Vec<ColumnInfo>> {
        let mut query = SqlBuilder::new(
            "SELECT column_name::text AS column_name, data_type::text AS data_type \
             FROM information_schema.columns WHERE table_schema = COALESCE(NULLIF(",
        );
        query
            .push_bind(self.schema.clone())
            .push(", ''), current_schema()) AND table_name = ")
            .push_bind(table)
            .push(" ORDER BY ordinal_position");

        let rows = self
            .executor
            .fetch_all(&query.build())
            .await
            .map_err(|e| schema_error(table, e))?;

        Ok(rows
            .iter()
            .filter_map(|row| {
                Some(ColumnInfo {
                    name: row.text("column_name")?,
                    data_type: row.text("data_type").unwrap_or_default().to_lowercase(),
                })
            })
            .collect())
    }

    /// Forget the cached existence answer for one table
    pub async fn invalidate(&self, table: &str) {
        self.existence.invalidate(table).await;
    }

    /// Forget every cached existence answer
    pub fn invalidate_all(&self) {
        self.existence.invalidate_all();
    }
}

fn schema_error(table: &str, source: DbError) -> DbError {
    DbError::Schema {
        table: table.to_string(),
        source: Box::new(source),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::executor::Row;
    use crate::db::sql::Param;
    use crate::test_utils::ScriptedExecutor;

    #[tokio::test]
    async fn existence_is_cached_until_invalidated() {
        let executor = Arc::new(ScriptedExecutor::new());
        executor.on("information_schema.tables", vec![Row::new().with("exists", true)]);
        let prober = SchemaProber::new(executor.clone(), None, None);

        assert!(prober.table_exists("reporting").await.unwrap());
        assert!(prober.table_exists("reporting").await.unwrap());
        assert_eq!(executor.count_matching("information_schema.tables"), 1);

        prober.invalidate("reporting").await;
        assert!(prober.table_exists("reporting").await.unwrap());
        assert_eq!(executor.count_matching("information_schema.tables"), 2);
    }

    #[tokio::test]
    async fn absent_table_is_false_not_error() {
        let executor = Arc::new(ScriptedExecutor::new());
        executor.on("information_schema.tables", vec![Row::new().with("exists", false)]);
        let prober = SchemaProber::new(executor.clone(), None, None);

        assert!(!prober.table_exists("reporting").await.unwrap());
    }

    #[tokio::test]
    async fn expired_entries_are_reprobed() {
        let executor = Arc::new(ScriptedExecutor::new());
        executor.on("information_schema.tables", vec![Row::new().with("exists", true)]);
        let prober = SchemaProber::new(executor.clone(), None, Some(Duration::from_millis(50)));

        assert!(prober.table_exists("reporting").await.unwrap());
        tokio::time::sleep(Duration::from_millis(120)).await;
        assert!(prober.table_exists("reporting").await.unwrap());
        assert_eq!(executor.count_matching("information_schema.tables"), 2);
    }

    #[tokio::test]
    async fn probes_are_scoped_to_configured_schema() {
        let executor = Arc::new(ScriptedExecutor::new());
        executor.on("information_schema.columns", vec![]);
        let prober = SchemaProber::new(executor.clone(), Some("analytics".to_string()), None);

        assert!(prober.columns("reporting").await.unwrap().is_empty());

        let stmt = executor.last_matching("information_schema.columns").unwrap();
        assert_eq!(
            stmt.params,
            vec![Param::OptText(Some("analytics".to_string())), Param::Text("reporting".to_string())]
        );
    }

    #[tokio::test]
    async fn columns_are_lower_cased_types() {
        let executor = Arc::new(ScriptedExecutor::new());
        executor.on(
            "information_schema.columns",
            vec![
                Row::new().with("column_name", "Use_Case_Name").with("data_type", "text"),
                Row::new().with("column_name", "Day").with("data_type", "DATE"),
            ],
        );
        let prober = SchemaProber::new(executor, None, None);

        let columns = prober.columns("reporting").await.unwrap();
        assert_eq!(
            columns,
            vec![
                ColumnInfo {
                    name: "Use_Case_Name".to_string(),
                    data_type: "text".to_string()
                },
                ColumnInfo {
                    name: "Day".to_string(),
                    data_type: "date".to_string()
                },
            ]
        );
    }

    #[tokio::test]
    async fn probe_failures_are_schema_errors() {
        let executor = Arc::new(ScriptedExecutor::new());
        executor.fail("information_schema.tables", "connection reset");
        let prober = SchemaProber::new(executor, None, None);

        let err = prober.table_exists("reporting").await.unwrap_err();
        assert!(matches!(err, DbError::Schema { ref table, .. } if table == "reporting"));
    }
}
