//! Heuristic column detection for externally-owned tables.
//!
//! Reporting tables are owned by whatever pipeline writes automation results, so their column
//! names drift. Each semantic role has an ordered list of likely physical names; the first one
//! present wins, unless configuration pins the role to a specific column.

use std::{collections::HashMap, fmt};

use crate::{
    config::ReportingColumns,
    db::{
        errors::{DbError, Result},
        handlers::schema::ColumnInfo,
    },
};

/// Data types accepted as a date column when no name candidate matches, in priority order
const DATE_TYPES: [&str; 3] = ["date", "timestamp without time zone", "timestamp with time zone"];

/// Physical column names keyed by their lower-cased form
pub type ColumnIndex = HashMap<String, String>;

/// Return the physical spelling of the first candidate present in `available`
pub fn pick_first(available: &ColumnIndex, candidates: &[&str]) -> Option<String> {
    candidates.iter().find_map(|c| available.get(*c).cloned())
}

/// Index columns for case-insensitive lookup. Quoted identifiers are case-sensitive, so the
/// index keeps the spelling the catalog reports; an exact lower-case column beats a mixed-case one.
pub fn column_index<'a>(columns: impl IntoIterator<Item = &'a ColumnInfo>) -> ColumnIndex {
    let mut index = ColumnIndex::new();
    for column in columns {
        let key = column.name.to_lowercase();
        if key == column.name || !index.contains_key(&key) {
            index.insert(key, column.name.clone());
        }
    }
    index
}

/// Semantic roles in a reporting table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ColumnRole {
    Name,
    Date,
    Success,
    Failure,
    Invalid,
    Partial,
}

impl ColumnRole {
    pub const ALL: [ColumnRole; 6] = [
        ColumnRole::Name,
        ColumnRole::Date,
        ColumnRole::Success,
        ColumnRole::Failure,
        ColumnRole::Invalid,
        ColumnRole::Partial,
    ];

    /// Candidate physical names, most specific first
    pub fn candidates(self) -> &'static [&'static str] {
        match self {
            ColumnRole::Name => &["use_case_name", "usecase_name", "usecase", "use_case", "name"],
            ColumnRole::Date => &[
                "date",
                "day",
                "run_date",
                "executed_at",
                "created_at",
                "ts",
                "timestamp",
                "reported_at",
            ],
            ColumnRole::Success => &["success", "success_count", "passed", "pass"],
            ColumnRole::Failure => &["failure", "fail", "failed", "failure_count"],
            ColumnRole::Invalid => &["invalid", "invalid_count", "skip", "skipped"],
            ColumnRole::Partial => &["partial", "partial_count", "partially_successful"],
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ColumnRole::Name => "name",
            ColumnRole::Date => "date",
            ColumnRole::Success => "success",
            ColumnRole::Failure => "failure",
            ColumnRole::Invalid => "invalid",
            ColumnRole::Partial => "partial",
        }
    }
}

impl fmt::Display for ColumnRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl ReportingColumns {
    /// The configured override for a role, trimmed; blank values count as unset
    pub fn override_for(&self, role: ColumnRole) -> Option<String> {
        let value = match role {
            ColumnRole::Name => &self.name,
            ColumnRole::Date => &self.date,
            ColumnRole::Success => &self.success,
            ColumnRole::Failure => &self.failure,
            ColumnRole::Invalid => &self.invalid,
            ColumnRole::Partial => &self.partial,
        };
        value.as_deref().map(str::trim).filter(|v| !v.is_empty()).map(str::to_string)
    }
}

/// Resolved physical column per semantic role for one table access
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ColumnMapping {
    pub name: Option<String>,
    pub date: Option<String>,
    pub success: Option<String>,
    pub failure: Option<String>,
    pub invalid: Option<String>,
    pub partial: Option<String>,
}

impl ColumnMapping {
    /// Resolve every role against a table's column metadata. Overrides always win; one naming a
    /// known column takes that column's spelling, otherwise it is used as configured.
    pub fn resolve(columns: &[ColumnInfo], overrides: &ReportingColumns) -> Self {
        let available = column_index(columns);
        let mut mapping = ColumnMapping::default();

        for role in ColumnRole::ALL {
            let resolved = overrides
                .override_for(role)
                .map(|o| available.get(&o.to_lowercase()).cloned().unwrap_or(o))
                .or_else(|| pick_first(&available, role.candidates()))
                .or_else(|| match role {
                    ColumnRole::Date => first_date_typed(columns),
                    _ => None,
                });
            *mapping.slot(role) = resolved;
        }

        mapping
    }

    pub fn get(&self, role: ColumnRole) -> Option<&str> {
        match role {
            ColumnRole::Name => self.name.as_deref(),
            ColumnRole::Date => self.date.as_deref(),
            ColumnRole::Success => self.success.as_deref(),
            ColumnRole::Failure => self.failure.as_deref(),
            ColumnRole::Invalid => self.invalid.as_deref(),
            ColumnRole::Partial => self.partial.as_deref(),
        }
    }

    /// The physical column for a role that the query cannot do without
    pub fn require(&self, role: ColumnRole, table: &str) -> Result<&str> {
        self.get(role).ok_or_else(|| DbError::Mapping {
            table: table.to_string(),
            role: role.to_string(),
        })
    }

    fn slot(&mut self, role: ColumnRole) -> &mut Option<String> {
        match role {
            ColumnRole::Name => &mut self.name,
            ColumnRole::Date => &mut self.date,
            ColumnRole::Success => &mut self.success,
            ColumnRole::Failure => &mut self.failure,
            ColumnRole::Invalid => &mut self.invalid,
            ColumnRole::Partial => &mut self.partial,
        }
    }
}

fn first_date_typed(columns: &[ColumnInfo]) -> Option<String> {
    DATE_TYPES.iter().find_map(|data_type| {
        columns
            .iter()
            .find(|c| c.data_type.eq_ignore_ascii_case(data_type))
            .map(|c| c.name.clone())
    })
}
