//! Test utilities: a scripted query executor and helpers for building an app around it.

use async_trait::async_trait;
use axum_test::TestServer;
use parking_lot::Mutex;
use std::sync::Arc;

use crate::{
    AppState, build_router,
    config::{Config, ReportingConfig},
    db::{
        Database,
        errors::{DbError, Result},
        executor::{QueryExecutor, Row},
        sql::Statement,
    },
};

#[derive(Debug, Clone)]
enum Outcome {
    Rows(Vec<Row>),
    MissingRelation,
    Fail(String),
}

/// In-memory [`QueryExecutor`] answering statements from canned responses.
///
/// A response is selected by the first registered pattern that occurs in the statement's SQL.
/// Statements with no matching pattern return no rows. Every executed statement is recorded.
#[derive(Debug, Default)]
pub struct ScriptedExecutor {
    responses: Mutex<Vec<(String, Outcome)>>,
    executed: Mutex<Vec<Statement>>,
}

impl ScriptedExecutor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Answer statements containing `pattern` with `rows`
    pub fn on(&self, pattern: &str, rows: Vec<Row>) -> &Self {
        self.responses.lock().push((pattern.to_string(), Outcome::Rows(rows)));
        self
    }

    /// Fail statements containing `pattern` with SQLSTATE 42P01
    pub fn missing(&self, pattern: &str) -> &Self {
        self.responses.lock().push((pattern.to_string(), Outcome::MissingRelation));
        self
    }

    /// Fail statements containing `pattern` with a non-recoverable error
    pub fn fail(&self, pattern: &str, message: &str) -> &Self {
        self.responses.lock().push((pattern.to_string(), Outcome::Fail(message.to_string())));
        self
    }

    /// Answer `information_schema.tables` probes for `table`
    pub fn table(&self, table: &str, exists: bool) -> &Self {
        self.responses.lock().push((
            format!("information_schema.tables#{table}"),
            Outcome::Rows(vec![Row::new().with("exists", exists)]),
        ));
        self
    }

    /// Answer `information_schema.columns` probes for `table` with `(name, data_type)` pairs
    pub fn columns(&self, table: &str, columns: &[(&str, &str)]) -> &Self {
        let rows = columns
            .iter()
            .map(|(name, data_type)| Row::new().with("column_name", *name).with("data_type", *data_type))
            .collect();
        self.responses
            .lock()
            .push((format!("information_schema.columns#{table}"), Outcome::Rows(rows)));
        self
    }

    pub fn statements(&self) -> Vec<Statement> {
        self.executed.lock().clone()
    }

    pub fn count_matching(&self, pattern: &str) -> usize {
        self.executed.lock().iter().filter(|s| s.sql.contains(pattern)).count()
    }

    pub fn last_matching(&self, pattern: &str) -> Option<Statement> {
        self.executed.lock().iter().rev().find(|s| s.sql.contains(pattern)).cloned()
    }

    fn outcome_for(&self, statement: &Statement) -> Option<Outcome> {
        // Probe responses registered through `table`/`columns` are keyed on the bound table name
        let probed_table = statement.params.iter().rev().find_map(|p| match p {
            crate::db::sql::Param::Text(t) => Some(t.as_str()),
            _ => None,
        });

        self.responses
            .lock()
            .iter()
            .find(|(pattern, _)| match pattern.split_once('#') {
                Some((sql, table)) => statement.sql.contains(sql) && probed_table == Some(table),
                None => statement.sql.contains(pattern.as_str()),
            })
            .map(|(_, outcome)| outcome.clone())
    }
}

#[async_trait]
impl QueryExecutor for ScriptedExecutor {
    async fn fetch_all(&self, statement: &Statement) -> Result<Vec<Row>> {
        self.executed.lock().push(statement.clone());
        match self.outcome_for(statement) {
            Some(Outcome::Rows(rows)) => Ok(rows),
            Some(Outcome::MissingRelation) => Err(DbError::MissingRelation {
                message: format!("relation does not exist: {}", statement.sql),
            }),
            Some(Outcome::Fail(message)) => Err(DbError::Other(anyhow::anyhow!(message))),
            None => Ok(Vec::new()),
        }
    }
}

/// A [`Database`] over a scripted executor with default reporting settings
pub fn scripted_database(executor: Arc<ScriptedExecutor>) -> Database {
    scripted_database_with(executor, ReportingConfig::default())
}

pub fn scripted_database_with(executor: Arc<ScriptedExecutor>, settings: ReportingConfig) -> Database {
    Database::new(executor, settings)
}

pub fn create_test_config() -> Config {
    Config::default()
}

/// Build the full router over a scripted executor and wrap it in a test server
pub fn create_test_app(executor: Arc<ScriptedExecutor>) -> TestServer {
    let config = create_test_config();
    let state = AppState::builder()
        .db(Database::new(executor, config.reporting.clone()))
        .config(config)
        .build();
    let router = build_router(&state).expect("Failed to build router");
    TestServer::new(router).expect("Failed to create test server")
}
