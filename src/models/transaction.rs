use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::validation::validate_positive_amount;

/// Kind of transaction record
#[derive(Debug, Clone, Copy, Serialize, Deserialize, ToSchema, PartialEq, Eq, sqlx::Type)]
#[sqlx(type_name = "varchar", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum TransactionKind {
    Income,
    Expense,
}

impl TransactionKind {
    /// Human-readable name of the grouping key for this kind
    pub fn label_name(&self) -> &'static str {
        match self {
            TransactionKind::Income => "Source",
            TransactionKind::Expense => "Category",
        }
    }
}

/// A dated, user-owned, amount-bearing record: an income or an expense.
///
/// `label` is the grouping key: the income source or the expense category.
/// Records are immutable after creation; the only lifecycle operation
/// besides add is deletion.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, sqlx::FromRow)]
pub struct Transaction {
    pub id: Uuid,
    pub user_id: Uuid,
    pub kind: TransactionKind,
    pub amount: Decimal,
    pub date: NaiveDate,
    pub label: String,
    pub icon: Option<String>,
    pub notes: Option<String>,
    pub payment_mode: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Request payload for recording an income
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
#[schema(example = json!({
    "source": "salary",
    "amount": 5000.00,
    "date": "2024-01-15",
    "icon": "briefcase"
}))]
pub struct CreateIncomeRequest {
    #[validate(length(min = 1, max = 100, message = "Source is required"))]
    pub source: String,

    #[validate(custom(function = "validate_positive_amount"))]
    #[schema(minimum = 0.01, example = 5000.00)]
    pub amount: Decimal,

    #[schema(format = "date", example = "2024-01-15")]
    pub date: NaiveDate,

    pub icon: Option<String>,

    pub notes: Option<String>,
}

/// Request payload for recording an expense
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
#[schema(example = json!({
    "category": "groceries",
    "amount": 42.50,
    "date": "2024-01-15",
    "payment_mode": "card"
}))]
pub struct CreateExpenseRequest {
    #[validate(length(min = 1, max = 100, message = "Category is required"))]
    pub category: String,

    #[validate(custom(function = "validate_positive_amount"))]
    #[schema(minimum = 0.01, example = 42.50)]
    pub amount: Decimal,

    #[schema(format = "date", example = "2024-01-15")]
    pub date: NaiveDate,

    pub icon: Option<String>,

    pub notes: Option<String>,

    pub payment_mode: Option<String>,
}
