//! API layer for HTTP request handling and data models.
//!
//! - **[`handlers`]**: Axum route handlers
//! - **[`models`]**: Request/response data structures
//!
//! # API Structure
//!
//! - **Reporting** (`/api/v1/reporting/*`): Windowed and daily aggregates with minutes saved
//! - **Use cases** (`/api/v1/use-cases/*`): Directory listing and per use case overview
//! - **Savings** (`/api/v1/savings/*`): Savings configuration and types
//! - **Runs** (`/api/v1/runs/*`): Run totals and recent runs
//! - **Health** (`/healthz`)
//!
//! # OpenAPI Documentation
//!
//! All endpoints are documented with `utoipa`. The document is served at
//! `/api-docs/openapi.json` and rendered at `/docs`.

pub mod handlers;
pub mod models;
