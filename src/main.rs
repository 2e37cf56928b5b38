use sqlx::postgres::PgPoolOptions;
use std::env;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use fintrack::handlers::ErrorResponse;
use fintrack::models::analytics::{
    BudgetReport, BudgetState, DashboardSummary, ExpenseIncomeRatio, GrowthReport, LabelTotal,
    MonthlySummary, MonthlyTotal,
};
use fintrack::models::auth::{AuthToken, LoginRequest};
use fintrack::models::transaction::{
    CreateExpenseRequest, CreateIncomeRequest, Transaction, TransactionKind,
};
use fintrack::models::user::{CreateUserRequest, UpdateBudgetRequest, User};
use fintrack::repositories::transaction_repository::PostgresTransactionStore;
use fintrack::repositories::user_repository::PostgresUserRepository;
use fintrack::services::analytics_service::{AnalyticsService, AnalyticsServiceImpl};
use fintrack::services::auth_service::{AuthService, AuthServiceImpl};
use fintrack::services::transaction_service::{TransactionService, TransactionServiceImpl};
use fintrack::{AppState, build_router};

/// OpenAPI documentation structure
#[derive(OpenApi)]
#[openapi(
    paths(
        fintrack::handlers::auth_handlers::register_handler,
        fintrack::handlers::auth_handlers::login_handler,
        fintrack::handlers::auth_handlers::me_handler,
        fintrack::handlers::auth_handlers::update_budget_handler,
        fintrack::handlers::transaction_handlers::add_income_handler,
        fintrack::handlers::transaction_handlers::list_income_handler,
        fintrack::handlers::transaction_handlers::filter_income_handler,
        fintrack::handlers::transaction_handlers::delete_income_handler,
        fintrack::handlers::transaction_handlers::export_income_handler,
        fintrack::handlers::transaction_handlers::add_expense_handler,
        fintrack::handlers::transaction_handlers::list_expense_handler,
        fintrack::handlers::transaction_handlers::filter_expense_handler,
        fintrack::handlers::transaction_handlers::delete_expense_handler,
        fintrack::handlers::transaction_handlers::export_expense_handler,
        fintrack::handlers::analytics_handlers::dashboard_handler,
        fintrack::handlers::analytics_handlers::income_summary_handler,
        fintrack::handlers::analytics_handlers::expense_summary_handler,
        fintrack::handlers::analytics_handlers::top_sources_handler,
        fintrack::handlers::analytics_handlers::top_categories_handler,
        fintrack::handlers::analytics_handlers::income_growth_handler,
        fintrack::handlers::analytics_handlers::expense_growth_handler,
        fintrack::handlers::analytics_handlers::budget_status_handler,
        fintrack::handlers::analytics_handlers::expense_income_ratio_handler,
    ),
    components(
        schemas(
            User,
            CreateUserRequest,
            UpdateBudgetRequest,
            LoginRequest,
            AuthToken,
            Transaction,
            TransactionKind,
            CreateIncomeRequest,
            CreateExpenseRequest,
            LabelTotal,
            MonthlyTotal,
            DashboardSummary,
            MonthlySummary,
            GrowthReport,
            BudgetState,
            BudgetReport,
            ExpenseIncomeRatio,
            ErrorResponse
        )
    ),
    tags(
        (name = "auth", description = "Authentication and account endpoints"),
        (name = "income", description = "Income record endpoints"),
        (name = "expense", description = "Expense record endpoints"),
        (name = "analytics", description = "Derived statistics endpoints")
    ),
    info(
        title = "Finance Tracker API",
        version = "0.1.0",
        description = "REST API for tracking personal income, expenses and derived analytics",
    )
)]
struct ApiDoc;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load environment variables from .env file
    dotenv::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    // Get configuration from environment
    let database_url = env::var("DATABASE_URL").expect("DATABASE_URL must be set");
    let jwt_secret = env::var("JWT_SECRET").expect("JWT_SECRET must be set");
    let host = env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
    let port = env::var("PORT").unwrap_or_else(|_| "8080".to_string());

    // Create database connection pool
    let pool = PgPoolOptions::new()
        .max_connections(5)
        .connect(&database_url)
        .await?;

    tracing::info!("connected to database");

    // Run migrations
    sqlx::migrate!("./migrations").run(&pool).await?;
    tracing::info!("migrations completed");

    // Initialize repositories
    let user_repository = Arc::new(PostgresUserRepository::new(pool.clone()));
    let transaction_store = Arc::new(PostgresTransactionStore::new(pool.clone()));

    // Initialize services
    let auth_service: Arc<dyn AuthService> = Arc::new(AuthServiceImpl::new(
        user_repository.clone(),
        jwt_secret,
    ));
    let transaction_service: Arc<dyn TransactionService> =
        Arc::new(TransactionServiceImpl::new(transaction_store.clone()));
    let analytics_service: Arc<dyn AnalyticsService> = Arc::new(AnalyticsServiceImpl::new(
        transaction_store,
        user_repository,
    ));

    let state = AppState {
        auth_service,
        transaction_service,
        analytics_service,
    };

    // Build router with Swagger UI and CORS
    let app = build_router(state)
        .merge(SwaggerUi::new("/api/docs").url("/api/docs/openapi.json", ApiDoc::openapi()))
        .layer(CorsLayer::permissive());

    // Start server
    let addr = format!("{}:{}", host, port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    tracing::info!(%addr, "server running");
    tracing::info!("API docs at http://{}/api/docs", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
