//! Records returned by the repositories in [`crate::db::handlers`].
//!
//! These are distinct from the API models in [`crate::api::models`] so the wire format can
//! evolve independently of query shapes.
//!
//! - [`reporting`]: Aggregates, daily aggregates and the time window they cover
//! - [`savings`]: Savings configuration and the name-keyed lookup
//! - [`use_cases`]: Directory entries and overviews
//! - [`runs`]: Automation run summaries

pub mod reporting;
pub mod runs;
pub mod savings;
pub mod use_cases;
