//! # savingsctl: Automation Savings Reporting
//!
//! `savingsctl` serves a read-only JSON API over PostgreSQL tables that record automation runs and
//! the minutes each automation saves. It reports run counts and minutes saved per use case, over
//! a time window or per day, along with a use case directory and per use case overviews.
//!
//! ## Overview
//!
//! The tables it reads are owned by other systems and their layout varies between deployments.
//! Nothing about them is assumed up front: at request time the service checks which tables exist
//! and which columns they have, works out which physical column plays which role (use case name,
//! run date, success/failure/invalid/partial counts), and builds parameterized SQL from that
//! mapping. Operators can pin any role to a named column when detection picks the wrong one.
//!
//! A missing table is an expected state, not a failure. A missing reporting table yields no
//! aggregates, a missing savings table yields zero minutes saved, and the use case directory falls
//! back from the savings table to a canonical `automation_use_cases` table.
//!
//! ## Architecture
//!
//! Built on [Axum](https://github.com/tokio-rs/axum) over a lazily connected SQLx pool.
//!
//! - The **API layer** ([`api`]) extracts query parameters, calls a repository and converts the
//!   result into camelCase JSON.
//! - The **database layer** ([`db`]) holds the repositories, the schema prober with its
//!   existence cache, the column mapper and the statement builder. Repositories run statements
//!   through a [`db::executor::QueryExecutor`], so they can be exercised without a database.
//! - **Configuration** ([`config`]) comes from YAML and environment variables, including the
//!   conventional `DATABASE_URL`, `PG*` and `REPORTING_*` names.
//!
//! ## Quick Start
//!
//! ```no_run
//! use clap::Parser;
//! use savingsctl::{Application, Config};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let args = savingsctl::config::Args::parse();
//!     let config = Config::load(&args)?;
//!
//!     savingsctl::telemetry::init_telemetry(config.enable_otel_export)?;
//!
//!     let app = Application::new(config).await?;
//!     app.serve(async {
//!         tokio::signal::ctrl_c().await.expect("Failed to listen for Ctrl+C");
//!     })
//!     .await?;
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Database Setup
//!
//! The service never writes to the reporting tables. For a fresh database, `--init-db` creates the
//! canonical use case and run tables and seeds sample use cases:
//!
//! ```no_run
//! # use sqlx::PgPool;
//! # async fn example(pool: PgPool) -> anyhow::Result<()> {
//! let seeded = savingsctl::init_database(&pool).await?;
//! # Ok(())
//! # }
//! ```
pub mod api;
pub mod config;
pub mod db;
pub mod errors;
mod openapi;
pub mod telemetry;
pub mod types;

#[cfg(test)]
pub mod test_utils;

use crate::{
    config::CorsOrigin,
    db::{
        Database,
        errors::{DbError, OrMissing},
        sql::{SqlBuilder, quote_ident},
    },
    openapi::ApiDoc,
    types::UseCaseStatus,
};
use axum::{Json, Router, http::HeaderValue, routing::get};
use bon::Builder;
use chrono::{DateTime, Utc};
pub use config::Config;
use sqlx::PgPool;
use tokio::net::TcpListener;
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::{Level, debug, info, instrument, warn};
use utoipa::OpenApi;
use utoipa_scalar::{Scalar, Servable};

/// Table created and seeded by [`init_database`]
const SEED_TABLE: &str = "automation_use_cases";

/// Application state shared across all request handlers.
///
/// # Example
///
/// ```ignore
/// let state = AppState::builder()
///     .db(Database::from_pool(pool, config.reporting.clone()))
///     .config(config)
///     .build();
/// ```
#[derive(Clone, Builder)]
pub struct AppState {
    pub db: Database,
    pub config: Config,
    #[builder(default = Utc::now())]
    pub started_at: DateTime<Utc>,
}

/// Get the savingsctl database migrator
pub fn migrator() -> sqlx::migrate::Migrator {
    sqlx::migrate!("./migrations")
}

/// A use case inserted by [`init_database`] into an empty directory table
#[derive(Debug, Clone, PartialEq)]
pub struct SampleUseCase {
    pub id: String,
    pub name: String,
    pub description: String,
    pub owner: &'static str,
    pub status: UseCaseStatus,
}

/// The twelve sample use cases, owners and statuses rotating
pub fn sample_use_cases() -> Vec<SampleUseCase> {
    const OWNERS: [&str; 4] = ["QA", "Automation", "SDET Team", "Platform"];
    const STATUSES: [UseCaseStatus; 3] = [UseCaseStatus::Active, UseCaseStatus::Draft, UseCaseStatus::Deprecated];

    (1..=12)
        .map(|i| SampleUseCase {
            id: format!("uc_{i}"),
            name: format!("Use Case {i}"),
            description: format!("Sample use case {i} created by init script"),
            owner: OWNERS[i % OWNERS.len()],
            status: STATUSES[i % STATUSES.len()],
        })
        .collect()
}

/// Create the canonical tables and seed sample use cases when the directory table is empty.
///
/// Returns the number of use cases inserted; zero when the table already had rows.
#[instrument(skip_all, err)]
pub async fn init_database(pool: &PgPool) -> anyhow::Result<u64> {
    migrator().run(pool).await?;

    let mut tx = pool.begin().await?;

    let existing: i64 = sqlx::query_scalar(&format!("SELECT COUNT(*)::bigint FROM {}", quote_ident(SEED_TABLE)))
        .fetch_one(&mut *tx)
        .await?;
    if existing > 0 {
        info!(existing, "Use case table already populated, skipping seeding");
        tx.commit().await?;
        return Ok(0);
    }

    let mut inserted = 0;
    for use_case in sample_use_cases() {
        let result = sqlx::query(&format!(
            "INSERT INTO {} (id, name, description, owner, status) VALUES ($1, $2, $3, $4, $5) ON CONFLICT (id) DO NOTHING",
            quote_ident(SEED_TABLE)
        ))
        .bind(&use_case.id)
        .bind(&use_case.name)
        .bind(&use_case.description)
        .bind(use_case.owner)
        .bind(use_case.status.as_str())
        .execute(&mut *tx)
        .await?;
        inserted += result.rows_affected();
    }

    tx.commit().await?;
    info!(inserted, "Seeded sample use cases");
    Ok(inserted)
}

/// What `--check-db` found
#[derive(Debug, Clone, PartialEq)]
pub struct DatabaseReport {
    pub database: String,
    pub user: String,
    pub server_time: Option<DateTime<Utc>>,
    /// The table the use case directory reads first
    pub directory_table: String,
    pub directory_exists: bool,
    /// `None` when the table is absent or could not be counted
    pub directory_rows: Option<i64>,
}

/// Report on connectivity and the use case directory table
#[instrument(skip_all, err)]
pub async fn database_report(db: &Database) -> Result<DatabaseReport, DbError> {
    let settings = db.settings();

    let ping = SqlBuilder::new("SELECT current_database()::text AS database, current_user::text AS db_user, now() AS server_time")
        .build();
    let rows = db.executor().fetch_all(&ping).await?;
    let row = rows.first();

    let directory_table = settings
        .preferred_directory_table
        .as_deref()
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .unwrap_or(&settings.savings_table)
        .to_string();
    let directory_exists = db.prober().table_exists(&directory_table).await?;

    let directory_rows = if directory_exists {
        let mut count = SqlBuilder::new("SELECT COUNT(*)::bigint AS row_count FROM ");
        count.push(db.table_ref(&directory_table));
        match db.executor().fetch_all(&count.build()).await.or_missing() {
            Ok(rows) => rows.present().and_then(|rows| rows.first().map(|r| r.int("row_count"))),
            Err(e) => {
                warn!(table = %directory_table, error = %e, "Could not count rows");
                None
            }
        }
    } else {
        None
    };

    Ok(DatabaseReport {
        database: row.and_then(|r| r.text("database")).unwrap_or_default(),
        user: row.and_then(|r| r.text("db_user")).unwrap_or_default(),
        server_time: row.and_then(|r| r.timestamp("server_time")),
        directory_table,
        directory_exists,
        directory_rows,
    })
}

/// Connect eagerly and produce a [`DatabaseReport`]
pub async fn check_database(config: &Config) -> anyhow::Result<DatabaseReport> {
    let pool = config
        .database
        .pool
        .pool_options()
        .connect_with(config.database.connect_options()?)
        .await?;
    let db = Database::from_pool(pool.clone(), config.reporting.clone());
    let report = database_report(&db).await;
    pool.close().await;
    Ok(report?)
}

/// Create CORS layer from configuration
fn create_cors_layer(config: &Config) -> anyhow::Result<CorsLayer> {
    let mut origins = Vec::new();
    for origin in &config.cors.allowed_origins {
        let header_value = match origin {
            CorsOrigin::Wildcard => "*".parse::<HeaderValue>()?,
            CorsOrigin::Url(url) => url.as_str().trim_end_matches('/').parse::<HeaderValue>()?,
        };
        origins.push(header_value);
    }

    let mut cors = CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([axum::http::Method::GET, axum::http::Method::OPTIONS])
        .allow_credentials(config.cors.allow_credentials);

    if let Some(max_age) = config.cors.max_age {
        cors = cors.max_age(std::time::Duration::from_secs(max_age));
    }

    Ok(cors)
}

/// Build the application router: the reporting API under `/api/v1`, the health check, and the
/// OpenAPI document with its UI.
#[instrument(skip_all)]
pub fn build_router(state: &AppState) -> anyhow::Result<Router> {
    let api_routes = Router::new()
        // Reporting
        .route("/reporting/aggregates", get(api::handlers::reporting::get_aggregates))
        .route("/reporting/daily", get(api::handlers::reporting::get_daily_aggregates))
        // Use case directory
        .route("/use-cases", get(api::handlers::use_cases::list_use_cases))
        .route("/use-cases/overview", get(api::handlers::use_cases::get_use_case_overview))
        // Savings configuration
        .route("/savings", get(api::handlers::savings::list_savings))
        .route("/savings/types", get(api::handlers::savings::list_savings_types))
        // Runs
        .route("/runs/summary", get(api::handlers::runs::get_run_summary))
        .route("/runs/recent", get(api::handlers::runs::list_recent_runs))
        .with_state(state.clone());

    let router = Router::new()
        .route("/healthz", get(api::handlers::health::healthz))
        .route("/api-docs/openapi.json", get(|| async { Json(ApiDoc::openapi()) }))
        .with_state(state.clone())
        .nest("/api/v1", api_routes)
        .merge(Scalar::with_url("/docs", ApiDoc::openapi()));

    let cors_layer = create_cors_layer(&state.config)?;
    let router = router.layer(cors_layer);

    // Add tracing layer
    let router = router.layer(
        TraceLayer::new_for_http()
            .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
            .on_request(DefaultOnRequest::new().level(Level::INFO))
            .on_response(DefaultOnResponse::new().level(Level::INFO)),
    );

    Ok(router)
}

/// Main application struct that owns the router and the connection pool.
///
/// # Lifecycle
///
/// 1. **Create**: [`Application::new`] builds a lazily connected pool, the shared state and the
///    router. No connection is attempted until the first request.
/// 2. **Serve**: [`Application::serve`] binds to a TCP port and starts handling requests
/// 3. **Shutdown**: When the shutdown signal is received, closes the pool and flushes telemetry
pub struct Application {
    router: Router,
    config: Config,
    pool: PgPool,
}

impl Application {
    /// Create a new application instance
    pub async fn new(config: Config) -> anyhow::Result<Self> {
        debug!("Starting savingsctl with configuration: {:#?}", config);

        let pool = config
            .database
            .pool
            .pool_options()
            .connect_lazy_with(config.database.connect_options()?);

        let app_state = AppState::builder()
            .db(Database::from_pool(pool.clone(), config.reporting.clone()))
            .config(config.clone())
            .build();

        let router = build_router(&app_state)?;

        Ok(Self { router, config, pool })
    }

    /// Convert application into a test server (for tests)
    #[cfg(test)]
    pub fn into_test_server(self) -> axum_test::TestServer {
        axum_test::TestServer::new(self.router).expect("Failed to create test server")
    }

    /// Start serving the application
    pub async fn serve<F>(self, shutdown: F) -> anyhow::Result<()>
    where
        F: std::future::Future<Output = ()> + Send + 'static,
    {
        let bind_addr = self.config.bind_address();
        let listener = TcpListener::bind(&bind_addr).await?;
        info!(
            "savingsctl listening on http://{}, available at http://localhost:{}",
            bind_addr, self.config.port
        );

        // Run the server with graceful shutdown
        axum::serve(listener, self.router).with_graceful_shutdown(shutdown).await?;

        // Close database connections
        info!("Closing database connections...");
        self.pool.close().await;

        // Shutdown telemetry
        info!("Shutting down telemetry...");
        telemetry::shutdown_telemetry();

        Ok(())
    }
}
