//! Parameterized SQL construction.
//!
//! Column and table names discovered at runtime cannot be bound as parameters, so every
//! identifier goes through [`quote_ident`] and every value goes through [`SqlBuilder::push_bind`].
//! Nothing else is ever interpolated into statement text.

use chrono::{DateTime, Utc};
use std::fmt::Write;

/// A bound statement parameter
#[derive(Debug, Clone, PartialEq)]
pub enum Param {
    Text(String),
    OptText(Option<String>),
    TextArray(Vec<String>),
    Timestamp(DateTime<Utc>),
    BigInt(i64),
}

impl From<String> for Param {
    fn from(value: String) -> Self {
        Param::Text(value)
    }
}

impl From<&str> for Param {
    fn from(value: &str) -> Self {
        Param::Text(value.to_string())
    }
}

impl From<Option<String>> for Param {
    fn from(value: Option<String>) -> Self {
        Param::OptText(value)
    }
}

impl From<Vec<String>> for Param {
    fn from(value: Vec<String>) -> Self {
        Param::TextArray(value)
    }
}

impl From<DateTime<Utc>> for Param {
    fn from(value: DateTime<Utc>) -> Self {
        Param::Timestamp(value)
    }
}

impl From<i64> for Param {
    fn from(value: i64) -> Self {
        Param::BigInt(value)
    }
}

/// SQL text with positional `$n` placeholders and the values bound to them
#[derive(Debug, Clone, PartialEq)]
pub struct Statement {
    pub sql: String,
    pub params: Vec<Param>,
}

impl Statement {
    pub fn new(sql: impl Into<String>) -> Self {
        Self {
            sql: sql.into(),
            params: Vec::new(),
        }
    }
}

/// Incremental statement builder, numbering placeholders in bind order.
///
/// Mirrors the `push` / `push_bind` shape of `sqlx::QueryBuilder`, but produces an owned
/// [`Statement`] so queries can be asserted on without a database connection.
#[derive(Debug, Default)]
pub struct SqlBuilder {
    sql: String,
    params: Vec<Param>,
}

impl SqlBuilder {
    pub fn new(init: impl Into<String>) -> Self {
        Self {
            sql: init.into(),
            params: Vec::new(),
        }
    }

    pub fn push(&mut self, fragment: impl AsRef<str>) -> &mut Self {
        self.sql.push_str(fragment.as_ref());
        self
    }

    pub fn push_bind(&mut self, param: impl Into<Param>) -> &mut Self {
        self.params.push(param.into());
        // Writing to a String cannot fail
        let _ = write!(self.sql, "${}", self.params.len());
        self
    }

    pub fn build(self) -> Statement {
        Statement {
            sql: self.sql,
            params: self.params,
        }
    }
}

/// Quote an identifier, doubling any embedded double quotes
pub fn quote_ident(ident: &str) -> String {
    format!("\"{}\"", ident.replace('"', "\"\""))
}

/// Quote a table reference, qualifying it with the schema when one is configured
pub fn qualified(schema: Option<&str>, table: &str) -> String {
    match schema.map(str::trim).filter(|s| !s.is_empty()) {
        Some(schema) => format!("{}.{}", quote_ident(schema), quote_ident(table)),
        None => quote_ident(table),
    }
}

/// `LIKE` pattern matching the trimmed needle anywhere, or `None` for blank input
pub fn contains_pattern(needle: Option<&str>) -> Option<String> {
    needle.map(str::trim).filter(|s| !s.is_empty()).map(|s| format!("%{s}%"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quote_ident_doubles_embedded_quotes() {
        assert_eq!(quote_ident("use_case_name"), "\"use_case_name\"");
        assert_eq!(quote_ident("we\"ird"), "\"we\"\"ird\"");
        assert_eq!(quote_ident("x\"; DROP TABLE reporting; --"), "\"x\"\"; DROP TABLE reporting; --\"");
    }

    #[test]
    fn qualified_skips_blank_schema() {
        assert_eq!(qualified(None, "reporting"), "\"reporting\"");
        assert_eq!(qualified(Some("  "), "reporting"), "\"reporting\"");
        assert_eq!(qualified(Some("analytics"), "reporting"), "\"analytics\".\"reporting\"");
    }

    #[test]
    fn builder_numbers_placeholders_in_bind_order() {
        let mut builder = SqlBuilder::new("SELECT 1 FROM t WHERE 1=1");
        builder.push(" AND a = ").push_bind("x");
        builder.push(" AND b < ").push_bind(10_i64);
        builder.push(" AND c = ANY(").push_bind(vec!["p".to_string()]).push("::text[])");
        let stmt = builder.build();

        assert_eq!(stmt.sql, "SELECT 1 FROM t WHERE 1=1 AND a = $1 AND b < $2 AND c = ANY($3::text[])");
        assert_eq!(
            stmt.params,
            vec![
                Param::Text("x".to_string()),
                Param::BigInt(10),
                Param::TextArray(vec!["p".to_string()])
            ]
        );
    }

    #[test]
    fn contains_pattern_trims_and_drops_blank() {
        assert_eq!(contains_pattern(Some("  bot ")), Some("%bot%".to_string()));
        assert_eq!(contains_pattern(Some("   ")), None);
        assert_eq!(contains_pattern(None), None);
    }
}
