//! Savings configuration endpoints.

use crate::{
    AppState,
    api::models::savings::{ListSavingsQuery, SavingsResponse},
    db::{
        errors::MaybeTable,
        handlers::{Savings, savings::SavingsFilter},
    },
    errors::{Error, Result},
};
use axum::{
    Json,
    extract::{Query, State},
};

/// A missing savings table is a 404 for the listing, not an empty list
fn require_table<T>(state: &AppState, result: MaybeTable<T>) -> Result<T> {
    match result {
        MaybeTable::Present(value) => Ok(value),
        MaybeTable::Missing => Err(Error::NotFound {
            resource: "Table".to_string(),
            id: state.db.settings().savings_table.clone(),
        }),
    }
}

#[utoipa::path(
    get,
    path = "/savings",
    tag = "savings",
    summary = "List savings configuration",
    params(ListSavingsQuery),
    responses(
        (status = 200, description = "Savings rows ordered by use case name", body = Vec<SavingsResponse>),
        (status = 404, description = "Savings table does not exist"),
        (status = 500, description = "Internal server error")
    )
)]
#[tracing::instrument(skip_all)]
pub async fn list_savings(
    State(state): State<AppState>,
    Query(query): Query<ListSavingsQuery>,
) -> Result<Json<Vec<SavingsResponse>>> {
    let filter = SavingsFilter {
        search: query.search,
        savings_type: query.savings_type,
        limit: query.pagination.limit,
        offset: query.pagination.offset,
    };

    let rows = require_table(&state, Savings::new(&state.db).list(&filter).await?)?;
    Ok(Json(rows.into_iter().map(Into::into).collect()))
}

#[utoipa::path(
    get,
    path = "/savings/types",
    tag = "savings",
    summary = "List savings types",
    responses(
        (status = 200, description = "Distinct non-blank savings types, sorted; empty when the savings table does not exist", body = Vec<String>),
        (status = 500, description = "Internal server error")
    )
)]
#[tracing::instrument(skip_all)]
pub async fn list_savings_types(State(state): State<AppState>) -> Result<Json<Vec<String>>> {
    let types = Savings::new(&state.db).list_distinct_types().await?;
    Ok(Json(types.unwrap_or_default()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        db::{executor::Row, sql::Param},
        test_utils::{ScriptedExecutor, create_test_app},
    };
    use axum::http::StatusCode;
    use std::sync::Arc;

    #[test_log::test(tokio::test)]
    async fn list_filters_by_type_and_search() {
        let executor = Arc::new(ScriptedExecutor::new());
        executor.table("usecase_savings_ref", true).on(
            "fixed_savings_per_run",
            vec![
                Row::new()
                    .with("id", "5f2b")
                    .with("use_case_name", "Invoice Bot")
                    .with("savings_type", "Fixed Weekly")
                    .with("fixed_savings_per_run", 5.0)
                    .with("savings_per_run", 3.0)
                    .with("partial_savings_per_run", 2.0),
            ],
        );
        let server = create_test_app(executor.clone());

        let response = server.get("/api/v1/savings?search=invoice&type=Fixed%20Weekly&limit=5000").await;
        response.assert_status_ok();

        let body: serde_json::Value = response.json();
        assert_eq!(body[0]["useCaseName"], "Invoice Bot");
        assert_eq!(body[0]["fixedSavingsPerRun"], 5.0);
        assert_eq!(body[0]["partialSavingsPerRun"], 2.0);

        let statement = executor.last_matching("fixed_savings_per_run").unwrap();
        assert_eq!(
            statement.params,
            vec![
                Param::Text("%invoice%".to_string()),
                Param::Text("Fixed Weekly".to_string()),
                Param::BigInt(1000),
                Param::BigInt(0),
            ]
        );
    }

    #[test_log::test(tokio::test)]
    async fn missing_savings_table_is_not_found() {
        let executor = Arc::new(ScriptedExecutor::new());
        executor.table("usecase_savings_ref", false);
        let server = create_test_app(executor);

        let response = server.get("/api/v1/savings").await;
        response.assert_status(StatusCode::NOT_FOUND);
        assert_eq!(response.text(), "Table usecase_savings_ref not found");
    }

    #[test_log::test(tokio::test)]
    async fn missing_savings_table_has_no_types() {
        let executor = Arc::new(ScriptedExecutor::new());
        executor.table("usecase_savings_ref", false);
        let server = create_test_app(executor.clone());

        let response = server.get("/api/v1/savings/types").await;
        response.assert_status_ok();
        let types: Vec<String> = response.json();
        assert!(types.is_empty());
        assert_eq!(executor.count_matching("SELECT DISTINCT"), 0);
    }

    #[test_log::test(tokio::test)]
    async fn types_are_listed() {
        let executor = Arc::new(ScriptedExecutor::new());
        executor.table("usecase_savings_ref", true).on(
            "SELECT DISTINCT",
            vec![
                Row::new().with("savings_type", "Fixed Weekly"),
                Row::new().with("savings_type", "Per Execution"),
            ],
        );
        let server = create_test_app(executor);

        let response = server.get("/api/v1/savings/types").await;
        response.assert_status_ok();
        let types: Vec<String> = response.json();
        assert_eq!(types, vec!["Fixed Weekly", "Per Execution"]);
    }
}
