//! The query execution seam.
//!
//! Repositories never touch a connection pool directly. They build a [`Statement`] and hand it to
//! a [`QueryExecutor`], which returns loosely-typed [`Row`]s. The Postgres implementation decodes
//! each column by the type the server reports, so statements against externally-owned tables
//! only need to cast their select list to one of the supported types.

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use sqlx::{Column, PgPool, Row as _, TypeInfo, postgres::PgRow};
use tracing::instrument;

use crate::db::{
    errors::Result,
    sql::{Param, Statement},
};

/// A single decoded column value
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(String),
    Date(NaiveDate),
    Timestamp(DateTime<Utc>),
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Bool(value)
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Value::Int(value)
    }
}

impl From<i32> for Value {
    fn from(value: i32) -> Self {
        Value::Int(value.into())
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Value::Float(value)
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::Text(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::Text(value.to_string())
    }
}

impl From<NaiveDate> for Value {
    fn from(value: NaiveDate) -> Self {
        Value::Date(value)
    }
}

impl From<DateTime<Utc>> for Value {
    fn from(value: DateTime<Utc>) -> Self {
        Value::Timestamp(value)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(value: Option<T>) -> Self {
        value.map(Into::into).unwrap_or(Value::Null)
    }
}

/// A result row keyed by output column name.
///
/// Accessors are lenient: numeric columns read as zero when NULL or absent, text columns read as
/// `None`. Aggregation code relies on this to coalesce missing counts.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Row {
    columns: Vec<(String, Value)>,
}

impl Row {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert, mainly for assembling rows in tests
    pub fn with(mut self, name: &str, value: impl Into<Value>) -> Self {
        self.insert(name, value);
        self
    }

    pub fn insert(&mut self, name: &str, value: impl Into<Value>) {
        let value = value.into();
        match self.columns.iter_mut().find(|(column, _)| column == name) {
            Some((_, existing)) => *existing = value,
            None => self.columns.push((name.to_string(), value)),
        }
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.columns.iter().find(|(column, _)| column == name).map(|(_, value)| value)
    }

    pub fn text(&self, name: &str) -> Option<String> {
        match self.get(name)? {
            Value::Null => None,
            Value::Bool(b) => Some(b.to_string()),
            Value::Int(i) => Some(i.to_string()),
            Value::Float(f) => Some(f.to_string()),
            Value::Text(s) => Some(s.clone()),
            Value::Date(d) => Some(d.format("%Y-%m-%d").to_string()),
            Value::Timestamp(t) => Some(t.to_rfc3339()),
        }
    }

    pub fn int(&self, name: &str) -> i64 {
        match self.get(name) {
            Some(Value::Int(i)) => *i,
            Some(Value::Float(f)) => f.round() as i64,
            Some(Value::Text(s)) => s.trim().parse().unwrap_or(0),
            Some(Value::Bool(b)) => i64::from(*b),
            _ => 0,
        }
    }

    pub fn float(&self, name: &str) -> f64 {
        match self.get(name) {
            Some(Value::Float(f)) => *f,
            Some(Value::Int(i)) => *i as f64,
            Some(Value::Text(s)) => s.trim().parse().unwrap_or(0.0),
            _ => 0.0,
        }
    }

    pub fn bool(&self, name: &str) -> bool {
        match self.get(name) {
            Some(Value::Bool(b)) => *b,
            Some(Value::Int(i)) => *i != 0,
            Some(Value::Text(s)) => matches!(s.trim().to_ascii_lowercase().as_str(), "t" | "true" | "1"),
            _ => false,
        }
    }

    pub fn date(&self, name: &str) -> Option<NaiveDate> {
        match self.get(name)? {
            Value::Date(d) => Some(*d),
            Value::Timestamp(t) => Some(t.date_naive()),
            Value::Text(s) => s.get(..10).and_then(|prefix| NaiveDate::parse_from_str(prefix, "%Y-%m-%d").ok()),
            _ => None,
        }
    }

    pub fn timestamp(&self, name: &str) -> Option<DateTime<Utc>> {
        match self.get(name)? {
            Value::Timestamp(t) => Some(*t),
            Value::Date(d) => d.and_hms_opt(0, 0, 0).map(|dt| dt.and_utc()),
            Value::Text(s) => DateTime::parse_from_rfc3339(s).ok().map(|t| t.with_timezone(&Utc)),
            _ => None,
        }
    }
}

/// Runs a parameterized statement and returns every row
#[async_trait]
pub trait QueryExecutor: Send + Sync {
    async fn fetch_all(&self, statement: &Statement) -> Result<Vec<Row>>;
}

/// [`QueryExecutor`] backed by a SQLx Postgres pool
#[derive(Debug, Clone)]
pub struct PgExecutor {
    pool: PgPool,
}

impl PgExecutor {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

#[async_trait]
impl QueryExecutor for PgExecutor {
    #[instrument(skip_all, fields(params = statement.params.len()), err)]
    async fn fetch_all(&self, statement: &Statement) -> Result<Vec<Row>> {
        let mut query = sqlx::query(&statement.sql);
        for param in &statement.params {
            query = match param {
                Param::Text(value) => query.bind(value.clone()),
                Param::OptText(value) => query.bind(value.clone()),
                Param::TextArray(values) => query.bind(values.clone()),
                Param::Timestamp(value) => query.bind(*value),
                Param::BigInt(value) => query.bind(*value),
            };
        }

        let rows = query.fetch_all(&self.pool).await?;
        rows.iter().map(decode_row).collect()
    }
}

fn decode_row(row: &PgRow) -> Result<Row> {
    let mut out = Row::new();
    for column in row.columns() {
        let idx = column.ordinal();
        let value: Value = match column.type_info().name() {
            "BOOL" => row.try_get::<Option<bool>, _>(idx)?.into(),
            "INT2" => row.try_get::<Option<i16>, _>(idx)?.map(i64::from).into(),
            "INT4" => row.try_get::<Option<i32>, _>(idx)?.map(i64::from).into(),
            "INT8" => row.try_get::<Option<i64>, _>(idx)?.into(),
            "FLOAT4" => row.try_get::<Option<f32>, _>(idx)?.map(f64::from).into(),
            "FLOAT8" => row.try_get::<Option<f64>, _>(idx)?.into(),
            "DATE" => row.try_get::<Option<NaiveDate>, _>(idx)?.into(),
            "TIMESTAMPTZ" => row.try_get::<Option<DateTime<Utc>>, _>(idx)?.into(),
            "TIMESTAMP" => row.try_get::<Option<NaiveDateTime>, _>(idx)?.map(|t| t.and_utc()).into(),
            _ => row.try_get::<Option<String>, _>(idx)?.into(),
        };
        out.insert(column.name(), value);
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numeric_accessors_coalesce_null_and_absent() {
        let row = Row::new().with("success", 10_i64).with("failure", Value::Null).with("ratio", 1.5);
        assert_eq!(row.int("success"), 10);
        assert_eq!(row.int("failure"), 0);
        assert_eq!(row.int("missing"), 0);
        assert_eq!(row.float("ratio"), 1.5);
        assert_eq!(row.float("success"), 10.0);
    }

    #[test]
    fn text_accessor_renders_temporal_values() {
        let day = NaiveDate::from_ymd_opt(2024, 3, 9).unwrap();
        let row = Row::new()
            .with("day", day)
            .with("name", "Invoice Bot")
            .with("owner", Option::<String>::None);
        assert_eq!(row.text("day").as_deref(), Some("2024-03-09"));
        assert_eq!(row.text("name").as_deref(), Some("Invoice Bot"));
        assert_eq!(row.text("owner"), None);
        assert_eq!(row.date("day"), Some(day));
    }

    #[test]
    fn date_accessor_parses_text_prefix() {
        let row = Row::new().with("day", "2024-03-09 00:00:00+00");
        assert_eq!(row.date("day"), NaiveDate::from_ymd_opt(2024, 3, 9));
    }

    #[test]
    fn insert_replaces_existing_column() {
        let row = Row::new().with("exists", false).with("exists", true);
        assert!(row.bool("exists"));
    }
}
