//! Database layer for reporting data access.
//!
//! Everything here is read-only. The tables queried are owned by other systems and their column
//! layout is discovered at request time rather than assumed.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐
//! │  Handlers   │  (API request handlers)
//! └──────┬──────┘
//!        │
//!        ↓
//! ┌─────────────┐
//! │ Repositories│  (db::handlers - Reporting, Savings, UseCases, Runs)
//! └──────┬──────┘
//!        │  SchemaProber + ColumnMapping + SqlBuilder
//!        ↓
//! ┌─────────────┐
//! │QueryExecutor│  (db::executor - PgExecutor in production)
//! └──────┬──────┘
//!        │
//!        ↓
//! ┌─────────────┐
//! │  PostgreSQL │
//! └─────────────┘
//! ```
//!
//! # Modules
//!
//! - [`handlers`]: Repositories and the schema prober
//! - [`models`]: Records returned by the repositories
//! - [`mapping`]: Heuristic column detection
//! - [`sql`]: Statement building and identifier quoting
//! - [`executor`]: The query execution seam
//! - [`errors`]: Database-specific error types
//!
//! ## Example Usage
//!
//! ```ignore
//! use savingsctl::db::{Database, handlers::Reporting};
//!
//! let db = Database::from_pool(pool, config.reporting.clone());
//! let aggregates = Reporting::new(&db).aggregate(&filter).await?;
//! ```

pub mod errors;
pub mod executor;
pub mod handlers;
pub mod mapping;
pub mod models;
pub mod sql;

use sqlx::PgPool;
use std::sync::Arc;

use crate::config::ReportingConfig;
use executor::{PgExecutor, QueryExecutor};
use handlers::schema::SchemaProber;

/// Shared handle the repositories are built from: an executor, a schema prober that shares it,
/// and the reporting settings that name the tables.
#[derive(Clone)]
pub struct Database {
    executor: Arc<dyn QueryExecutor>,
    prober: SchemaProber,
    settings: Arc<ReportingConfig>,
}

impl Database {
    pub fn new(executor: Arc<dyn QueryExecutor>, settings: ReportingConfig) -> Self {
        let prober = SchemaProber::new(executor.clone(), settings.schema.clone(), settings.schema_cache_ttl);
        Self {
            executor,
            prober,
            settings: Arc::new(settings),
        }
    }

    pub fn from_pool(pool: PgPool, settings: ReportingConfig) -> Self {
        Self::new(Arc::new(PgExecutor::new(pool)), settings)
    }

    pub fn executor(&self) -> &dyn QueryExecutor {
        self.executor.as_ref()
    }

    pub fn prober(&self) -> &SchemaProber {
        &self.prober
    }

    pub fn settings(&self) -> &ReportingConfig {
        &self.settings
    }

    /// Quoted, schema-qualified reference to `table`
    pub fn table_ref(&self, table: &str) -> String {
        sql::qualified(self.settings.schema.as_deref(), table)
    }
}
