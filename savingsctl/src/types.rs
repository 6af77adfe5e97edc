//! Shared domain enums used across the database, API and configuration layers.

use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};
use utoipa::ToSchema;

/// The unit over which a "fixed" savings amount is counted once.
///
/// Accepts `per_day`/`day`/`daily`, `per_week`/`week`/`weekly`, `per_month`/`month`/`monthly`
/// and `per_range`/`range`/`total`, case-insensitively.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ToSchema)]
#[serde(try_from = "String", rename_all = "snake_case")]
pub enum FixedPeriod {
    PerDay,
    #[default]
    PerWeek,
    PerMonth,
    PerRange,
}

impl FixedPeriod {
    pub fn as_str(self) -> &'static str {
        match self {
            FixedPeriod::PerDay => "per_day",
            FixedPeriod::PerWeek => "per_week",
            FixedPeriod::PerMonth => "per_month",
            FixedPeriod::PerRange => "per_range",
        }
    }
}

impl FromStr for FixedPeriod {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "per_day" | "day" | "daily" => Ok(FixedPeriod::PerDay),
            "per_week" | "week" | "weekly" => Ok(FixedPeriod::PerWeek),
            "per_month" | "month" | "monthly" => Ok(FixedPeriod::PerMonth),
            "per_range" | "range" | "total" => Ok(FixedPeriod::PerRange),
            other => Err(format!("unknown fixed savings period '{other}'")),
        }
    }
}

impl TryFrom<String> for FixedPeriod {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl fmt::Display for FixedPeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Lifecycle status of a use case in the directory
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "UPPERCASE")]
pub enum UseCaseStatus {
    Active,
    Draft,
    Deprecated,
}

impl UseCaseStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            UseCaseStatus::Active => "ACTIVE",
            UseCaseStatus::Draft => "DRAFT",
            UseCaseStatus::Deprecated => "DEPRECATED",
        }
    }

    /// Parse a stored status, treating anything unrecognised as active
    pub fn from_db(value: Option<&str>) -> Self {
        match value.map(|v| v.trim().to_ascii_uppercase()).as_deref() {
            Some("DRAFT") => UseCaseStatus::Draft,
            Some("DEPRECATED") => UseCaseStatus::Deprecated,
            _ => UseCaseStatus::Active,
        }
    }
}

impl FromStr for UseCaseStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "ACTIVE" => Ok(UseCaseStatus::Active),
            "DRAFT" => Ok(UseCaseStatus::Draft),
            "DEPRECATED" => Ok(UseCaseStatus::Deprecated),
            other => Err(format!("unknown use case status '{other}'")),
        }
    }
}

/// Outcome of a single automation run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "UPPERCASE")]
pub enum RunStatus {
    Pass,
    Fail,
    Skip,
    Running,
}

impl FromStr for RunStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "PASS" => Ok(RunStatus::Pass),
            "FAIL" => Ok(RunStatus::Fail),
            "SKIP" => Ok(RunStatus::Skip),
            "RUNNING" => Ok(RunStatus::Running),
            other => Err(format!("unknown run status '{other}'")),
        }
    }
}
