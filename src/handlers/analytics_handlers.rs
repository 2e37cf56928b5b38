use axum::{
    extract::{Extension, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use std::sync::Arc;

use crate::handlers::ErrorResponse;
use crate::middleware::auth_middleware::AuthenticatedUser;
use crate::models::analytics::{
    BudgetReport, DashboardSummary, ExpenseIncomeRatio, GrowthReport, LabelTotal, MonthlySummary,
};
use crate::models::transaction::TransactionKind;
use crate::services::analytics_service::{AnalyticsError, AnalyticsService};

/// Convert AnalyticsError to HTTP response
impl IntoResponse for AnalyticsError {
    fn into_response(self) -> Response {
        let (status, error_type, message) = match self {
            AnalyticsError::UserNotFound => {
                (StatusCode::NOT_FOUND, "user_not_found", "User not found")
            }
            AnalyticsError::DatabaseError(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "analytics_error",
                "Could not compute analytics",
            ),
        };

        let error_response = ErrorResponse::new(error_type, message);
        (status, Json(error_response)).into_response()
    }
}

/// Handler for the consolidated dashboard
///
/// Assembles totals, breakdowns, trends, recent windows and the merged
/// activity feed in one response.
#[utoipa::path(
    get,
    path = "/api/dashboard",
    responses(
        (status = 200, description = "Dashboard summary", body = DashboardSummary),
        (status = 500, description = "Could not compute analytics", body = ErrorResponse)
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "analytics"
)]
pub async fn dashboard_handler(
    State(analytics_service): State<Arc<dyn AnalyticsService>>,
    Extension(auth_user): Extension<AuthenticatedUser>,
) -> Result<Json<DashboardSummary>, Response> {
    match analytics_service.dashboard_summary(auth_user.user_id).await {
        Ok(summary) => Ok(Json(summary)),
        Err(e) => Err(e.into_response()),
    }
}

/// Handler for the month-by-month income rollup
#[utoipa::path(
    get,
    path = "/api/income/summary",
    responses(
        (status = 200, description = "Monthly income summary, newest bucket first", body = MonthlySummary),
        (status = 500, description = "Could not compute analytics", body = ErrorResponse)
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "analytics"
)]
pub async fn income_summary_handler(
    State(analytics_service): State<Arc<dyn AnalyticsService>>,
    Extension(auth_user): Extension<AuthenticatedUser>,
) -> Result<Json<MonthlySummary>, Response> {
    match analytics_service
        .monthly_summary(auth_user.user_id, TransactionKind::Income)
        .await
    {
        Ok(summary) => Ok(Json(summary)),
        Err(e) => Err(e.into_response()),
    }
}

/// Handler for the month-by-month expense rollup
#[utoipa::path(
    get,
    path = "/api/expense/summary",
    responses(
        (status = 200, description = "Monthly expense summary, newest bucket first", body = MonthlySummary),
        (status = 500, description = "Could not compute analytics", body = ErrorResponse)
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "analytics"
)]
pub async fn expense_summary_handler(
    State(analytics_service): State<Arc<dyn AnalyticsService>>,
    Extension(auth_user): Extension<AuthenticatedUser>,
) -> Result<Json<MonthlySummary>, Response> {
    match analytics_service
        .monthly_summary(auth_user.user_id, TransactionKind::Expense)
        .await
    {
        Ok(summary) => Ok(Json(summary)),
        Err(e) => Err(e.into_response()),
    }
}

/// Handler for the top income sources
#[utoipa::path(
    get,
    path = "/api/income/top-sources",
    responses(
        (status = 200, description = "Top 3 income sources by total", body = Vec<LabelTotal>),
        (status = 500, description = "Could not compute analytics", body = ErrorResponse)
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "analytics"
)]
pub async fn top_sources_handler(
    State(analytics_service): State<Arc<dyn AnalyticsService>>,
    Extension(auth_user): Extension<AuthenticatedUser>,
) -> Result<Json<Vec<LabelTotal>>, Response> {
    match analytics_service
        .top_labels(auth_user.user_id, TransactionKind::Income)
        .await
    {
        Ok(totals) => Ok(Json(totals)),
        Err(e) => Err(e.into_response()),
    }
}

/// Handler for the top expense categories
#[utoipa::path(
    get,
    path = "/api/expense/top-categories",
    responses(
        (status = 200, description = "Top 10 expense categories by total", body = Vec<LabelTotal>),
        (status = 500, description = "Could not compute analytics", body = ErrorResponse)
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "analytics"
)]
pub async fn top_categories_handler(
    State(analytics_service): State<Arc<dyn AnalyticsService>>,
    Extension(auth_user): Extension<AuthenticatedUser>,
) -> Result<Json<Vec<LabelTotal>>, Response> {
    match analytics_service
        .top_labels(auth_user.user_id, TransactionKind::Expense)
        .await
    {
        Ok(totals) => Ok(Json(totals)),
        Err(e) => Err(e.into_response()),
    }
}

/// Handler for month-over-month income growth
#[utoipa::path(
    get,
    path = "/api/income/growth",
    responses(
        (status = 200, description = "Current vs. previous month income", body = GrowthReport),
        (status = 500, description = "Could not compute analytics", body = ErrorResponse)
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "analytics"
)]
pub async fn income_growth_handler(
    State(analytics_service): State<Arc<dyn AnalyticsService>>,
    Extension(auth_user): Extension<AuthenticatedUser>,
) -> Result<Json<GrowthReport>, Response> {
    match analytics_service
        .growth(auth_user.user_id, TransactionKind::Income)
        .await
    {
        Ok(report) => Ok(Json(report)),
        Err(e) => Err(e.into_response()),
    }
}

/// Handler for month-over-month expense growth
#[utoipa::path(
    get,
    path = "/api/expense/growth",
    responses(
        (status = 200, description = "Current vs. previous month expense", body = GrowthReport),
        (status = 500, description = "Could not compute analytics", body = ErrorResponse)
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "analytics"
)]
pub async fn expense_growth_handler(
    State(analytics_service): State<Arc<dyn AnalyticsService>>,
    Extension(auth_user): Extension<AuthenticatedUser>,
) -> Result<Json<GrowthReport>, Response> {
    match analytics_service
        .growth(auth_user.user_id, TransactionKind::Expense)
        .await
    {
        Ok(report) => Ok(Json(report)),
        Err(e) => Err(e.into_response()),
    }
}

/// Handler for the current-month budget status
#[utoipa::path(
    get,
    path = "/api/expense/budget-status",
    responses(
        (status = 200, description = "Current-month spending vs. budget ceiling", body = BudgetReport),
        (status = 404, description = "User not found", body = ErrorResponse),
        (status = 500, description = "Could not compute analytics", body = ErrorResponse)
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "analytics"
)]
pub async fn budget_status_handler(
    State(analytics_service): State<Arc<dyn AnalyticsService>>,
    Extension(auth_user): Extension<AuthenticatedUser>,
) -> Result<Json<BudgetReport>, Response> {
    match analytics_service.budget_status(auth_user.user_id).await {
        Ok(report) => Ok(Json(report)),
        Err(e) => Err(e.into_response()),
    }
}

/// Handler for the current-month expense-income ratio
#[utoipa::path(
    get,
    path = "/api/expense/ratio",
    responses(
        (status = 200, description = "Current-month income vs. expense with saving rate", body = ExpenseIncomeRatio),
        (status = 500, description = "Could not compute analytics", body = ErrorResponse)
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "analytics"
)]
pub async fn expense_income_ratio_handler(
    State(analytics_service): State<Arc<dyn AnalyticsService>>,
    Extension(auth_user): Extension<AuthenticatedUser>,
) -> Result<Json<ExpenseIncomeRatio>, Response> {
    match analytics_service
        .expense_income_ratio(auth_user.user_id)
        .await
    {
        Ok(ratio) => Ok(Json(ratio)),
        Err(e) => Err(e.into_response()),
    }
}
