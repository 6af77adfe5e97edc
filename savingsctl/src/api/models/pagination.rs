//! Shared pagination parameters for list endpoints.
//!
//! List endpoints use offset-based pagination with `offset` and `limit`. Each repository owns its
//! own default and maximum page size, so the values here are passed through unclamped and the
//! filters they feed do the clamping.

use serde::Deserialize;
use serde_with::{DisplayFromStr, serde_as};
use utoipa::{IntoParams, ToSchema};

/// Offset pagination. Both values are read as strings so the struct can be flattened into other
/// query structs.
#[serde_as]
#[derive(Debug, Default, Clone, Copy, Deserialize, IntoParams, ToSchema)]
pub struct Pagination {
    /// Number of items to skip (default: 0)
    #[param(default = 0, minimum = 0)]
    #[serde_as(as = "Option<DisplayFromStr>")]
    pub offset: Option<i64>,

    /// Maximum number of items to return
    #[param(minimum = 1)]
    #[serde_as(as = "Option<DisplayFromStr>")]
    pub limit: Option<i64>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{extract::Query, http::Uri};

    #[derive(Debug, Deserialize)]
    struct Wrapped {
        #[serde(flatten)]
        pagination: Pagination,
        search: Option<String>,
    }

    fn parse(query: &str) -> Option<Wrapped> {
        let uri: Uri = format!("/?{query}").parse().unwrap();
        Query::<Wrapped>::try_from_uri(&uri).ok().map(|Query(q)| q)
    }

    #[test]
    fn flattened_values_parse_from_strings() {
        let parsed = parse("offset=24&limit=12&search=bot").unwrap();
        assert_eq!(parsed.pagination.offset, Some(24));
        assert_eq!(parsed.pagination.limit, Some(12));
        assert_eq!(parsed.search.as_deref(), Some("bot"));
    }

    #[test]
    fn absent_values_stay_unset() {
        let parsed = parse("search=bot").unwrap();
        assert_eq!(parsed.pagination.offset, None);
        assert_eq!(parsed.pagination.limit, None);
    }

    #[test]
    fn non_numeric_limit_is_rejected() {
        assert!(parse("limit=many").is_none());
    }
}
