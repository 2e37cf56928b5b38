pub mod analytics;
pub mod auth;
pub mod filters;
pub mod transaction;
pub mod user;

pub use analytics::{
    BudgetReport, BudgetState, DashboardSummary, ExpenseIncomeRatio, GrowthReport, LabelTotal,
    MonthlySummary, MonthlyTotal,
};
pub use auth::{AuthToken, LoginRequest};
pub use filters::{DateRange, SortOrder, TransactionFilter};
pub use transaction::{CreateExpenseRequest, CreateIncomeRequest, Transaction, TransactionKind};
pub use user::{CreateUserRequest, UpdateBudgetRequest, User};
