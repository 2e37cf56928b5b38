pub mod aggregation;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod repositories;
pub mod services;
pub mod validation;

use axum::{
    Router,
    extract::FromRef,
    middleware::from_fn_with_state,
    routing::{delete, get, post, put},
};
use std::sync::Arc;

use crate::handlers::analytics_handlers::{
    budget_status_handler, dashboard_handler, expense_growth_handler,
    expense_income_ratio_handler, expense_summary_handler, income_growth_handler,
    income_summary_handler, top_categories_handler, top_sources_handler,
};
use crate::handlers::auth_handlers::{
    login_handler, me_handler, register_handler, update_budget_handler,
};
use crate::handlers::transaction_handlers::{
    add_expense_handler, add_income_handler, delete_expense_handler, delete_income_handler,
    export_expense_handler, export_income_handler, filter_expense_handler, filter_income_handler,
    list_expense_handler, list_income_handler,
};
use crate::middleware::auth_middleware::auth_middleware;
use crate::services::analytics_service::AnalyticsService;
use crate::services::auth_service::AuthService;
use crate::services::transaction_service::TransactionService;

/// Shared application state; each handler extracts the service it needs
#[derive(Clone, FromRef)]
pub struct AppState {
    pub auth_service: Arc<dyn AuthService>,
    pub transaction_service: Arc<dyn TransactionService>,
    pub analytics_service: Arc<dyn AnalyticsService>,
}

/// Builds the full application router. Everything except registration,
/// login and the health check sits behind the bearer-token middleware.
pub fn build_router(state: AppState) -> Router {
    let protected = Router::new()
        .route("/api/auth/me", get(me_handler))
        .route("/api/user/budget", put(update_budget_handler))
        .route(
            "/api/income",
            post(add_income_handler).get(list_income_handler),
        )
        .route("/api/income/filter", get(filter_income_handler))
        .route("/api/income/summary", get(income_summary_handler))
        .route("/api/income/top-sources", get(top_sources_handler))
        .route("/api/income/growth", get(income_growth_handler))
        .route("/api/income/export", get(export_income_handler))
        .route("/api/income/{id}", delete(delete_income_handler))
        .route(
            "/api/expense",
            post(add_expense_handler).get(list_expense_handler),
        )
        .route("/api/expense/filter", get(filter_expense_handler))
        .route("/api/expense/summary", get(expense_summary_handler))
        .route("/api/expense/top-categories", get(top_categories_handler))
        .route("/api/expense/growth", get(expense_growth_handler))
        .route("/api/expense/budget-status", get(budget_status_handler))
        .route("/api/expense/ratio", get(expense_income_ratio_handler))
        .route("/api/expense/export", get(export_expense_handler))
        .route("/api/expense/{id}", delete(delete_expense_handler))
        .route("/api/dashboard", get(dashboard_handler))
        .layer(from_fn_with_state(
            state.auth_service.clone(),
            auth_middleware,
        ));

    Router::new()
        .route("/health", get(health_check))
        .route("/api/auth/register", post(register_handler))
        .route("/api/auth/login", post(login_handler))
        .merge(protected)
        .with_state(state)
}

/// Health check endpoint
async fn health_check() -> &'static str {
    "OK"
}
