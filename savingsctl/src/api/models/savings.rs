//! API request/response models for savings configuration.

use super::pagination::Pagination;
use crate::db::models::savings::SavingsConfig;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

/// Query parameters for listing savings rows
#[derive(Debug, Default, Deserialize, IntoParams, ToSchema)]
pub struct ListSavingsQuery {
    /// Pagination parameters (default limit: 100, max: 1000)
    #[serde(flatten)]
    #[param(inline)]
    pub pagination: Pagination,

    /// Case-insensitive substring match on the use case name
    pub search: Option<String>,

    /// Exact savings type
    #[serde(rename = "type")]
    pub savings_type: Option<String>,
}

/// Savings configured for one use case
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SavingsResponse {
    /// Stable identifier derived from the use case name
    pub id: String,
    #[schema(example = "Invoice Bot")]
    pub use_case_name: String,
    #[schema(example = "Fixed Weekly")]
    pub savings_type: Option<String>,
    /// Minutes saved per fixed period (fixed types) or per execution
    pub fixed_savings_per_run: f64,
    /// Minutes saved per successful run
    pub savings_per_run: f64,
    /// Minutes saved per partially successful run
    pub partial_savings_per_run: f64,
}

impl From<SavingsConfig> for SavingsResponse {
    fn from(c: SavingsConfig) -> Self {
        Self {
            id: c.id,
            use_case_name: c.use_case_name,
            savings_type: c.savings_type,
            fixed_savings_per_run: c.fixed_minutes_per_run,
            savings_per_run: c.variable_minutes_per_success,
            partial_savings_per_run: c.variable_minutes_per_partial,
        }
    }
}
