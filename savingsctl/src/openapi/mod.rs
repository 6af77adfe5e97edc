//! OpenAPI documentation for the reporting API at `/api/v1/*`.

use utoipa::OpenApi;

use crate::{api, types};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "savingsctl",
        description = "Automation runs and the minutes they save, aggregated over whatever reporting tables exist."
    ),
    servers(
        (url = "/api/v1", description = "Reporting API server")
    ),
    paths(
        api::handlers::reporting::get_aggregates,
        api::handlers::reporting::get_daily_aggregates,
        api::handlers::use_cases::list_use_cases,
        api::handlers::use_cases::get_use_case_overview,
        api::handlers::savings::list_savings,
        api::handlers::savings::list_savings_types,
        api::handlers::runs::get_run_summary,
        api::handlers::runs::list_recent_runs,
    ),
    components(
        schemas(
            api::models::pagination::Pagination,
            api::models::reporting::AggregatesQuery,
            api::models::reporting::DailyQuery,
            api::models::reporting::MinutesResponse,
            api::models::reporting::ReportingAggregateResponse,
            api::models::reporting::DailyAggregateResponse,
            api::models::use_cases::ListUseCasesQuery,
            api::models::use_cases::UseCaseResponse,
            api::models::use_cases::OverviewQuery,
            api::models::use_cases::UseCaseOverviewResponse,
            api::models::use_cases::OverviewReportingResponse,
            api::models::use_cases::RangeResponse,
            api::models::use_cases::UseCaseDetailResponse,
            api::models::savings::ListSavingsQuery,
            api::models::savings::SavingsResponse,
            api::models::runs::RecentRunsQuery,
            api::models::runs::RunSummaryResponse,
            api::models::runs::RecentRunResponse,
            types::FixedPeriod,
            types::UseCaseStatus,
            types::RunStatus,
        )
    ),
    tags(
        (name = "reporting", description = "Run counts and minutes saved per use case.

Columns of the reporting table are detected at runtime. A missing reporting table yields an empty list; a missing savings table yields zero minutes."),
        (name = "use-cases", description = "The use case directory and a combined overview per use case."),
        (name = "savings", description = "Savings configured per use case."),
        (name = "runs", description = "Automation run totals and recent runs."),
    )
)]
pub struct ApiDoc;
