//! HTTP request handlers for all API endpoints.
//!
//! Handlers extract query parameters, build a repository filter, call into
//! [`crate::db::handlers`] and convert the records into API models. They are read-only.
//!
//! - [`reporting`]: `/api/v1/reporting/aggregates`, `/api/v1/reporting/daily`
//! - [`use_cases`]: `/api/v1/use-cases`, `/api/v1/use-cases/overview`
//! - [`savings`]: `/api/v1/savings`, `/api/v1/savings/types`
//! - [`runs`]: `/api/v1/runs/summary`, `/api/v1/runs/recent`
//! - [`health`]: `/healthz`
//!
//! Errors are returned as [`crate::errors::Error`], which logs and maps them to a status code.

pub mod health;
pub mod reporting;
pub mod runs;
pub mod savings;
pub mod use_cases;
