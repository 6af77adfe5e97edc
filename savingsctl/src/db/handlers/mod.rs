//! Repository implementations for database access.
//!
//! Repositories borrow a [`crate::db::Database`] and build their statements through
//! [`crate::db::sql::SqlBuilder`]. None of them write: every table read here is owned by another
//! system, so each read decides explicitly what an absent table means.
//!
//! # Available Repositories
//!
//! - [`Reporting`]: Windowed and daily aggregates over the reporting table
//! - [`Savings`]: Savings configuration rows and lookups
//! - [`UseCases`]: Use case directory and per use case overview
//! - [`Runs`]: Summary statistics and recent runs
//! - [`schema`]: Table existence and column metadata ([`SchemaProber`](schema::SchemaProber))
//!
//! # Common Pattern
//!
//! ```ignore
//! use savingsctl::db::handlers::{Reporting, reporting::AggregateFilter};
//!
//! let aggregates = Reporting::new(&state.db).aggregate(&AggregateFilter::new(range)).await?;
//! ```

pub mod reporting;
pub mod runs;
pub mod savings;
pub mod schema;
pub mod use_cases;

pub use reporting::Reporting;
pub use runs::Runs;
pub use savings::Savings;
pub use use_cases::UseCases;
