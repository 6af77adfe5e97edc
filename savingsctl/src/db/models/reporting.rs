//! Reporting aggregates and the time windows they are computed over.

use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime, TimeDelta, Utc};

use crate::types::FixedPeriod;

const MILLIS_PER_DAY: f64 = 86_400_000.0;

/// Accepted calendar years for request bounds
const MIN_YEAR: i32 = 1;
const MAX_YEAR: i32 = 9999;

/// Parse a request timestamp.
///
/// A bare `YYYY-MM-DD` is midnight UTC of that day. RFC 3339 timestamps keep their offset;
/// naive `YYYY-MM-DDTHH:MM:SS[.f]` timestamps are taken as UTC. Years outside 1..=9999 are
/// rejected.
pub fn parse_instant(value: &str) -> Option<DateTime<Utc>> {
    parse_any(value.trim()).filter(|t| (MIN_YEAR..=MAX_YEAR).contains(&t.year()))
}

fn parse_any(value: &str) -> Option<DateTime<Utc>> {
    if let Ok(day) = NaiveDate::parse_from_str(value, "%Y-%m-%d") {
        return day.and_hms_opt(0, 0, 0).map(|t| t.and_utc());
    }
    if let Ok(t) = DateTime::parse_from_rfc3339(value) {
        return Some(t.with_timezone(&Utc));
    }
    ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"]
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(value, format).ok())
        .map(|t| t.and_utc())
}

/// A reporting window. `to` names the last included day; the exclusive upper bound is one day
/// past it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeRange {
    pub from: DateTime<Utc>,
    pub to: DateTime<Utc>,
}

impl TimeRange {
    /// Fill in defaults (`to = now`, `from = now - default_span`) and normalise a reversed range
    pub fn resolve(from: Option<DateTime<Utc>>, to: Option<DateTime<Utc>>, default_span: TimeDelta, now: DateTime<Utc>) -> Self {
        let from = from.unwrap_or(now - default_span);
        let to = to.unwrap_or(now);
        if from > to { Self { from: to, to: from } } else { Self { from, to } }
    }

    pub fn to_exclusive(&self) -> DateTime<Utc> {
        self.to.checked_add_signed(TimeDelta::days(1)).unwrap_or(DateTime::<Utc>::MAX_UTC)
    }

    /// How many times a fixed savings amount is counted within this window
    pub fn fixed_periods(&self, period: FixedPeriod) -> i64 {
        let end = self.to_exclusive();
        let millis = (end - self.from).num_milliseconds() as f64;

        let periods = match period {
            FixedPeriod::PerRange => 1,
            FixedPeriod::PerDay => (millis / MILLIS_PER_DAY).ceil() as i64,
            FixedPeriod::PerWeek => (millis / (7.0 * MILLIS_PER_DAY)).ceil() as i64,
            FixedPeriod::PerMonth => {
                // Calendar months touched by the window, up to its last included instant. Counting
                // through the month of the exclusive end instead would make Jan 1..=Jan 31 two months.
                let last = end - TimeDelta::milliseconds(1);
                let months = (last.year() - self.from.year()) * 12 + last.month() as i32 - self.from.month() as i32;
                i64::from(months) + 1
            }
        };

        periods.max(1)
    }
}

/// Minutes saved for one use case, split by source
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct MinutesBreakdown {
    pub fixed_total: f64,
    pub variable_success_total: f64,
    pub variable_partial_total: f64,
    pub total: f64,
}

/// Run counts and savings for one use case over a window
#[derive(Debug, Clone, PartialEq)]
pub struct ReportingAggregate {
    pub use_case_name: String,
    pub success: i64,
    pub failure: i64,
    pub invalid: i64,
    pub partial: i64,
    pub executions: i64,
    pub minutes: MinutesBreakdown,
}

/// Run counts for one use case on one calendar day
#[derive(Debug, Clone, PartialEq)]
pub struct DailyAggregate {
    pub day: NaiveDate,
    pub use_case_name: String,
    pub success: i64,
    pub failure: i64,
    pub invalid: i64,
    pub partial: i64,
    pub total: i64,
}
