use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::models::transaction::Transaction;

/// Total amount for one label (expense category or income source)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct LabelTotal {
    pub label: String,
    pub total: Decimal,
}

/// Total amount for one (year, month) bucket
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct MonthlyTotal {
    pub year: i32,
    pub month: u32,
    pub total: Decimal,
}

/// Consolidated dashboard response combining all derived statistics
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct DashboardSummary {
    pub total_balance: Decimal,
    pub total_income: Decimal,
    pub total_expense: Decimal,
    /// All-time savings rate as a bare percentage
    pub total_savings_rate: Decimal,
    /// Full expense breakdown, descending by total
    pub expense_by_category: Vec<LabelTotal>,
    /// Truncated top-5 view of the expense breakdown
    pub top_expense_categories: Vec<LabelTotal>,
    /// Full income breakdown, descending by total
    pub income_by_source: Vec<LabelTotal>,
    /// 6-month income trend, ascending chronological order
    pub monthly_income_trend: Vec<MonthlyTotal>,
    /// 6-month expense trend, ascending chronological order
    pub monthly_expense_trend: Vec<MonthlyTotal>,
    /// Income transactions from the last 60 days, newest first
    pub last_60_days_income: Vec<Transaction>,
    /// Expense transactions from the last 30 days, newest first
    pub last_30_days_expenses: Vec<Transaction>,
    pub total_expense_last_30_days: Decimal,
    /// 30-day expense total divided by 30; zero when no transactions
    pub daily_expense_avg: Decimal,
    /// Merged recent-activity feed, at most 5 kind-tagged entries
    pub recent_transactions: Vec<Transaction>,
}

/// Month-by-month rollup for one transaction kind, newest bucket first
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct MonthlySummary {
    pub total: Decimal,
    /// Human-readable month labels, e.g. "Sep 2025"
    pub months: Vec<String>,
    /// Bucket totals parallel to `months`
    pub values: Vec<Decimal>,
}

/// Month-over-month growth for one transaction kind
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct GrowthReport {
    pub current: Decimal,
    pub previous: Decimal,
    /// Growth percentage formatted to two decimals, e.g. "100.00"
    pub growth: String,
}

/// Budget evaluation outcome
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum BudgetState {
    NoBudget,
    Under,
    Warning,
    Over,
}

/// Current-month spending measured against the configured budget ceiling
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct BudgetReport {
    pub budget: Decimal,
    pub spent: Decimal,
    pub remaining: Decimal,
    pub status: BudgetState,
}

/// Current-month income vs. expense with the derived saving rate
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ExpenseIncomeRatio {
    /// Human-readable month, e.g. "September 2025"
    pub month: String,
    pub income: Decimal,
    pub expense: Decimal,
    pub savings: Decimal,
    /// Percent string with two decimals, e.g. "60.00%"
    pub saving_rate: String,
}
