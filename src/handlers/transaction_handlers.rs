use axum::{
    extract::{Extension, Path, Query, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use chrono::NaiveDate;
use serde::Deserialize;
use std::sync::Arc;
use utoipa::IntoParams;
use uuid::Uuid;
use validator::Validate;

use crate::handlers::{validation_error_response, ErrorResponse};
use crate::middleware::auth_middleware::AuthenticatedUser;
use crate::models::filters::{DateRange, TransactionFilter};
use crate::models::transaction::{
    CreateExpenseRequest, CreateIncomeRequest, Transaction, TransactionKind,
};
use crate::services::transaction_service::{TransactionError, TransactionService};

/// Convert TransactionError to HTTP response
impl IntoResponse for TransactionError {
    fn into_response(self) -> Response {
        let (status, error_type, message) = match self {
            TransactionError::InvalidAmount => (
                StatusCode::BAD_REQUEST,
                "invalid_amount",
                "Amount must be positive",
            ),
            TransactionError::MissingLabel => (
                StatusCode::BAD_REQUEST,
                "missing_label",
                "Source or category is required",
            ),
            TransactionError::NotFound => (
                StatusCode::NOT_FOUND,
                "transaction_not_found",
                "Transaction not found",
            ),
            TransactionError::Unauthorized => (
                StatusCode::FORBIDDEN,
                "unauthorized",
                "Unauthorized to access this record",
            ),
            TransactionError::ExportFailed(ref msg) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "export_failed",
                msg.as_str(),
            ),
            TransactionError::DatabaseError(ref msg) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "database_error",
                msg.as_str(),
            ),
        };

        let error_response = ErrorResponse::new(error_type, message);
        (status, Json(error_response)).into_response()
    }
}

/// Query parameters for filtered listings
#[derive(Debug, Deserialize, IntoParams)]
pub struct FilterQuery {
    /// Inclusive range start; only applied together with `end_date`
    pub start_date: Option<NaiveDate>,
    /// Inclusive range end; only applied together with `start_date`
    pub end_date: Option<NaiveDate>,
    /// Exact label (source or category) match
    pub label: Option<String>,
    /// Case-insensitive label substring search
    pub search: Option<String>,
}

impl From<FilterQuery> for TransactionFilter {
    fn from(query: FilterQuery) -> Self {
        let date_range = match (query.start_date, query.end_date) {
            (Some(start), Some(end)) => Some(DateRange::new(start, end)),
            _ => None,
        };

        TransactionFilter {
            date_range,
            label: query.label,
            search: query.search,
        }
    }
}

fn csv_response(kind: TransactionKind, csv: String) -> Response {
    let filename = match kind {
        TransactionKind::Income => "income.csv",
        TransactionKind::Expense => "expense.csv",
    };

    (
        [
            (header::CONTENT_TYPE, "text/csv".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{}\"", filename),
            ),
        ],
        csv,
    )
        .into_response()
}

/// Handler for recording an income
#[utoipa::path(
    post,
    path = "/api/income",
    request_body = CreateIncomeRequest,
    responses(
        (status = 201, description = "Income successfully recorded", body = Transaction),
        (status = 400, description = "Validation error (non-positive amount, blank source)", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "income"
)]
pub async fn add_income_handler(
    State(transaction_service): State<Arc<dyn TransactionService>>,
    Extension(auth_user): Extension<AuthenticatedUser>,
    Json(request): Json<CreateIncomeRequest>,
) -> Result<(StatusCode, Json<Transaction>), Response> {
    if let Err(validation_errors) = request.validate() {
        return Err(validation_error_response(validation_errors));
    }

    match transaction_service
        .add_income(auth_user.user_id, request)
        .await
    {
        Ok(tx) => Ok((StatusCode::CREATED, Json(tx))),
        Err(e) => Err(e.into_response()),
    }
}

/// Handler for listing incomes
///
/// Retrieves all incomes for the authenticated user, newest first.
#[utoipa::path(
    get,
    path = "/api/income",
    responses(
        (status = 200, description = "List of incomes", body = Vec<Transaction>),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "income"
)]
pub async fn list_income_handler(
    State(transaction_service): State<Arc<dyn TransactionService>>,
    Extension(auth_user): Extension<AuthenticatedUser>,
) -> Result<Json<Vec<Transaction>>, Response> {
    match transaction_service
        .list(auth_user.user_id, TransactionKind::Income)
        .await
    {
        Ok(entries) => Ok(Json(entries)),
        Err(e) => Err(e.into_response()),
    }
}

/// Handler for filtering incomes by date range, source or search term
#[utoipa::path(
    get,
    path = "/api/income/filter",
    params(FilterQuery),
    responses(
        (status = 200, description = "Matching incomes", body = Vec<Transaction>),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "income"
)]
pub async fn filter_income_handler(
    State(transaction_service): State<Arc<dyn TransactionService>>,
    Extension(auth_user): Extension<AuthenticatedUser>,
    Query(query): Query<FilterQuery>,
) -> Result<Json<Vec<Transaction>>, Response> {
    match transaction_service
        .filter(auth_user.user_id, TransactionKind::Income, query.into())
        .await
    {
        Ok(entries) => Ok(Json(entries)),
        Err(e) => Err(e.into_response()),
    }
}

/// Handler for deleting an income
#[utoipa::path(
    delete,
    path = "/api/income/{id}",
    params(
        ("id" = Uuid, Path, description = "Income ID")
    ),
    responses(
        (status = 204, description = "Income successfully deleted"),
        (status = 403, description = "User doesn't own the record", body = ErrorResponse),
        (status = 404, description = "Income not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "income"
)]
pub async fn delete_income_handler(
    State(transaction_service): State<Arc<dyn TransactionService>>,
    Extension(auth_user): Extension<AuthenticatedUser>,
    Path(transaction_id): Path<Uuid>,
) -> Result<StatusCode, Response> {
    match transaction_service
        .delete(auth_user.user_id, transaction_id)
        .await
    {
        Ok(()) => Ok(StatusCode::NO_CONTENT),
        Err(e) => Err(e.into_response()),
    }
}

/// Handler for exporting incomes as CSV
#[utoipa::path(
    get,
    path = "/api/income/export",
    responses(
        (status = 200, description = "CSV attachment with all incomes"),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "income"
)]
pub async fn export_income_handler(
    State(transaction_service): State<Arc<dyn TransactionService>>,
    Extension(auth_user): Extension<AuthenticatedUser>,
) -> Result<Response, Response> {
    match transaction_service
        .export_csv(auth_user.user_id, TransactionKind::Income)
        .await
    {
        Ok(csv) => Ok(csv_response(TransactionKind::Income, csv)),
        Err(e) => Err(e.into_response()),
    }
}

/// Handler for recording an expense
#[utoipa::path(
    post,
    path = "/api/expense",
    request_body = CreateExpenseRequest,
    responses(
        (status = 201, description = "Expense successfully recorded", body = Transaction),
        (status = 400, description = "Validation error (non-positive amount, blank category)", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "expense"
)]
pub async fn add_expense_handler(
    State(transaction_service): State<Arc<dyn TransactionService>>,
    Extension(auth_user): Extension<AuthenticatedUser>,
    Json(request): Json<CreateExpenseRequest>,
) -> Result<(StatusCode, Json<Transaction>), Response> {
    if let Err(validation_errors) = request.validate() {
        return Err(validation_error_response(validation_errors));
    }

    match transaction_service
        .add_expense(auth_user.user_id, request)
        .await
    {
        Ok(tx) => Ok((StatusCode::CREATED, Json(tx))),
        Err(e) => Err(e.into_response()),
    }
}

/// Handler for listing expenses
///
/// Retrieves all expenses for the authenticated user, newest first.
#[utoipa::path(
    get,
    path = "/api/expense",
    responses(
        (status = 200, description = "List of expenses", body = Vec<Transaction>),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "expense"
)]
pub async fn list_expense_handler(
    State(transaction_service): State<Arc<dyn TransactionService>>,
    Extension(auth_user): Extension<AuthenticatedUser>,
) -> Result<Json<Vec<Transaction>>, Response> {
    match transaction_service
        .list(auth_user.user_id, TransactionKind::Expense)
        .await
    {
        Ok(entries) => Ok(Json(entries)),
        Err(e) => Err(e.into_response()),
    }
}

/// Handler for filtering expenses by date range, category or search term
#[utoipa::path(
    get,
    path = "/api/expense/filter",
    params(FilterQuery),
    responses(
        (status = 200, description = "Matching expenses", body = Vec<Transaction>),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "expense"
)]
pub async fn filter_expense_handler(
    State(transaction_service): State<Arc<dyn TransactionService>>,
    Extension(auth_user): Extension<AuthenticatedUser>,
    Query(query): Query<FilterQuery>,
) -> Result<Json<Vec<Transaction>>, Response> {
    match transaction_service
        .filter(auth_user.user_id, TransactionKind::Expense, query.into())
        .await
    {
        Ok(entries) => Ok(Json(entries)),
        Err(e) => Err(e.into_response()),
    }
}

/// Handler for deleting an expense
#[utoipa::path(
    delete,
    path = "/api/expense/{id}",
    params(
        ("id" = Uuid, Path, description = "Expense ID")
    ),
    responses(
        (status = 204, description = "Expense successfully deleted"),
        (status = 403, description = "User doesn't own the record", body = ErrorResponse),
        (status = 404, description = "Expense not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "expense"
)]
pub async fn delete_expense_handler(
    State(transaction_service): State<Arc<dyn TransactionService>>,
    Extension(auth_user): Extension<AuthenticatedUser>,
    Path(transaction_id): Path<Uuid>,
) -> Result<StatusCode, Response> {
    match transaction_service
        .delete(auth_user.user_id, transaction_id)
        .await
    {
        Ok(()) => Ok(StatusCode::NO_CONTENT),
        Err(e) => Err(e.into_response()),
    }
}

/// Handler for exporting expenses as CSV
#[utoipa::path(
    get,
    path = "/api/expense/export",
    responses(
        (status = 200, description = "CSV attachment with all expenses"),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "expense"
)]
pub async fn export_expense_handler(
    State(transaction_service): State<Arc<dyn TransactionService>>,
    Extension(auth_user): Extension<AuthenticatedUser>,
) -> Result<Response, Response> {
    match transaction_service
        .export_csv(auth_user.user_id, TransactionKind::Expense)
        .await
    {
        Ok(csv) => Ok(csv_response(TransactionKind::Expense, csv)),
        Err(e) => Err(e.into_response()),
    }
}
