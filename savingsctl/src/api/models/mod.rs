//! API request and response data models.
//!
//! These define the public API contract and are kept separate from the records in
//! [`crate::db::models`], with `From` conversions between the two. Response bodies use camelCase
//! field names; query parameters are snake_case, with camelCase aliases where older clients send
//! them (`fixedPeriod`, `limitDays`).
//!
//! - [`health`]: Liveness response
//! - [`pagination`]: Offset pagination shared by list endpoints
//! - [`reporting`]: Windowed and daily aggregates
//! - [`use_cases`]: Directory entries and the per use case overview
//! - [`savings`]: Savings configuration rows
//! - [`runs`]: Run summary and recent runs

pub mod health;
pub mod pagination;
pub mod reporting;
pub mod runs;
pub mod savings;
pub mod use_cases;
