//! Use case directory records.

use crate::types::UseCaseStatus;

/// A use case as listed in the directory. Read-only projection of whichever table backs it.
#[derive(Debug, Clone, PartialEq)]
pub struct UseCaseRef {
    /// Physical id, or md5 of the name when the source table has no id column
    pub id: String,
    pub name: String,
    pub description: Option<String>,
    pub owner: Option<String>,
    pub status: UseCaseStatus,
    pub created_at: String,
    pub updated_at: Option<String>,
}

/// Descriptive details for a single use case
#[derive(Debug, Clone, PartialEq)]
pub struct UseCaseOverview {
    pub name: String,
    pub stakeholder: Option<String>,
    pub description: Option<String>,
    pub hld_url: Option<String>,
}
