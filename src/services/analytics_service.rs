use async_trait::async_trait;
use chrono::{Datelike, Duration, Utc};
use rust_decimal::Decimal;
use std::sync::Arc;
use uuid::Uuid;

use crate::aggregation;
use crate::models::analytics::{
    BudgetReport, DashboardSummary, ExpenseIncomeRatio, GrowthReport, LabelTotal, MonthlySummary,
};
use crate::models::filters::{DateRange, SortOrder, TransactionFilter};
use crate::models::transaction::TransactionKind;
use crate::repositories::transaction_repository::{StoreError, TransactionStore};
use crate::repositories::user_repository::{RepositoryError, UserRepository};

const RECENT_FEED_LIMIT: usize = 5;
const TREND_MONTHS: u32 = 6;
const TOP_SOURCES_LIMIT: usize = 3;
const TOP_CATEGORIES_LIMIT: usize = 10;

/// Analytics service errors
#[derive(Debug, thiserror::Error)]
pub enum AnalyticsError {
    #[error("User not found")]
    UserNotFound,

    #[error("Database error: {0}")]
    DatabaseError(String),
}

// Store reads never report NotFound (empty results are Ok); any store
// failure surfacing here is a computation failure, not a missing user
impl From<StoreError> for AnalyticsError {
    fn from(e: StoreError) -> Self {
        AnalyticsError::DatabaseError(e.to_string())
    }
}

impl From<RepositoryError> for AnalyticsError {
    fn from(e: RepositoryError) -> Self {
        match e {
            RepositoryError::NotFound => AnalyticsError::UserNotFound,
            RepositoryError::DatabaseError(msg) => AnalyticsError::DatabaseError(msg),
            RepositoryError::ConstraintViolation(msg) => AnalyticsError::DatabaseError(msg),
        }
    }
}

/// Derived statistics over a user's transaction history. All figures are
/// computed on demand; nothing is cached or denormalized.
#[async_trait]
pub trait AnalyticsService: Send + Sync {
    /// Consolidated dashboard: balances, breakdowns, trends and the
    /// recent-activity feed, assembled from concurrent sub-queries
    async fn dashboard_summary(&self, user_id: Uuid) -> Result<DashboardSummary, AnalyticsError>;

    /// All-time month-by-month rollup for one kind, newest bucket first
    async fn monthly_summary(
        &self,
        user_id: Uuid,
        kind: TransactionKind,
    ) -> Result<MonthlySummary, AnalyticsError>;

    /// Highest-total labels for one kind (top 3 income sources, top 10
    /// expense categories)
    async fn top_labels(
        &self,
        user_id: Uuid,
        kind: TransactionKind,
    ) -> Result<Vec<LabelTotal>, AnalyticsError>;

    /// Current calendar month measured against the previous one
    async fn growth(
        &self,
        user_id: Uuid,
        kind: TransactionKind,
    ) -> Result<GrowthReport, AnalyticsError>;

    /// Current-month spending against the user's budget ceiling
    async fn budget_status(&self, user_id: Uuid) -> Result<BudgetReport, AnalyticsError>;

    /// Current-month income vs. expense with the derived saving rate
    async fn expense_income_ratio(
        &self,
        user_id: Uuid,
    ) -> Result<ExpenseIncomeRatio, AnalyticsError>;
}

/// Implementation of AnalyticsService
pub struct AnalyticsServiceImpl {
    store: Arc<dyn TransactionStore>,
    users: Arc<dyn UserRepository>,
}

impl AnalyticsServiceImpl {
    pub fn new(store: Arc<dyn TransactionStore>, users: Arc<dyn UserRepository>) -> Self {
        Self { store, users }
    }

    fn range_filter(range: DateRange) -> TransactionFilter {
        TransactionFilter {
            date_range: Some(range),
            ..Default::default()
        }
    }
}

#[async_trait]
impl AnalyticsService for AnalyticsServiceImpl {
    async fn dashboard_summary(&self, user_id: Uuid) -> Result<DashboardSummary, AnalyticsError> {
        let today = Utc::now().date_naive();
        // Windows run through the end of the current month, not just today:
        // a record dated later this month counts in the all-time totals and
        // must show up in the trends and recent windows too
        let month_end = aggregation::month_range(today.year(), today.month()).end;
        let trend_range = DateRange::new(
            aggregation::trailing_months_start(today, TREND_MONTHS),
            month_end,
        );
        let last_60_days = DateRange::new(today - Duration::days(60), month_end);
        let last_30_days = DateRange::new(today - Duration::days(30), month_end);

        // One failed sub-query fails the whole summary
        let (
            total_income,
            total_expense,
            expense_by_category,
            income_by_source,
            monthly_income_trend,
            monthly_expense_trend,
            last_60_days_income,
            last_30_days_expenses,
            recent_incomes,
            recent_expenses,
        ) = tokio::try_join!(
            self.store.sum_by_user(user_id, TransactionKind::Income, None),
            self.store.sum_by_user(user_id, TransactionKind::Expense, None),
            self.store.sum_grouped_by_label(user_id, TransactionKind::Expense),
            self.store.sum_grouped_by_label(user_id, TransactionKind::Income),
            self.store.sum_grouped_by_month(
                user_id,
                TransactionKind::Income,
                Some(trend_range),
                SortOrder::Ascending,
            ),
            self.store.sum_grouped_by_month(
                user_id,
                TransactionKind::Expense,
                Some(trend_range),
                SortOrder::Ascending,
            ),
            self.store.find_by_user(
                user_id,
                TransactionKind::Income,
                Self::range_filter(last_60_days),
            ),
            self.store.find_by_user(
                user_id,
                TransactionKind::Expense,
                Self::range_filter(last_30_days),
            ),
            self.store
                .find_recent(user_id, TransactionKind::Income, RECENT_FEED_LIMIT as i64),
            self.store
                .find_recent(user_id, TransactionKind::Expense, RECENT_FEED_LIMIT as i64),
        )?;

        let total_expense_last_30_days = aggregation::sum_amounts(&last_30_days_expenses);

        Ok(DashboardSummary {
            total_balance: total_income - total_expense,
            total_income,
            total_expense,
            total_savings_rate: aggregation::savings_rate(total_income, total_expense),
            top_expense_categories: expense_by_category.iter().take(5).cloned().collect(),
            expense_by_category,
            income_by_source,
            monthly_income_trend,
            monthly_expense_trend,
            last_60_days_income,
            total_expense_last_30_days,
            daily_expense_avg: aggregation::daily_average(
                total_expense_last_30_days,
                30,
                !last_30_days_expenses.is_empty(),
            ),
            last_30_days_expenses,
            recent_transactions: aggregation::merge_recent(
                recent_incomes,
                recent_expenses,
                RECENT_FEED_LIMIT,
            ),
        })
    }

    async fn monthly_summary(
        &self,
        user_id: Uuid,
        kind: TransactionKind,
    ) -> Result<MonthlySummary, AnalyticsError> {
        let buckets = self
            .store
            .sum_grouped_by_month(user_id, kind, None, SortOrder::Descending)
            .await?;

        Ok(MonthlySummary {
            total: buckets.iter().map(|b| b.total).sum(),
            months: buckets
                .iter()
                .map(|b| aggregation::month_label_short(b.year, b.month))
                .collect(),
            values: buckets.iter().map(|b| b.total).collect(),
        })
    }

    async fn top_labels(
        &self,
        user_id: Uuid,
        kind: TransactionKind,
    ) -> Result<Vec<LabelTotal>, AnalyticsError> {
        let limit = match kind {
            TransactionKind::Income => TOP_SOURCES_LIMIT,
            TransactionKind::Expense => TOP_CATEGORIES_LIMIT,
        };

        let mut totals = self.store.sum_grouped_by_label(user_id, kind).await?;
        totals.truncate(limit);
        Ok(totals)
    }

    async fn growth(
        &self,
        user_id: Uuid,
        kind: TransactionKind,
    ) -> Result<GrowthReport, AnalyticsError> {
        let today = Utc::now().date_naive();
        let (prev_year, prev_month) = aggregation::previous_month(today.year(), today.month());

        let (current, previous) = tokio::try_join!(
            self.store.sum_by_user(
                user_id,
                kind,
                Some(aggregation::month_range(today.year(), today.month())),
            ),
            self.store
                .sum_by_user(user_id, kind, Some(aggregation::month_range(prev_year, prev_month))),
        )?;

        Ok(GrowthReport {
            current,
            previous,
            growth: format!("{:.2}", aggregation::growth_rate(current, previous)),
        })
    }

    async fn budget_status(&self, user_id: Uuid) -> Result<BudgetReport, AnalyticsError> {
        let user = self
            .users
            .find_by_id(user_id)
            .await?
            .ok_or(AnalyticsError::UserNotFound)?;

        // No ceiling configured: skip the spending query entirely
        if user.monthly_budget.unwrap_or(Decimal::ZERO) <= Decimal::ZERO {
            return Ok(aggregation::evaluate_budget(None, Decimal::ZERO));
        }

        let today = Utc::now().date_naive();
        let spent = self
            .store
            .sum_by_user(
                user_id,
                TransactionKind::Expense,
                Some(aggregation::month_range(today.year(), today.month())),
            )
            .await?;

        Ok(aggregation::evaluate_budget(user.monthly_budget, spent))
    }

    async fn expense_income_ratio(
        &self,
        user_id: Uuid,
    ) -> Result<ExpenseIncomeRatio, AnalyticsError> {
        let today = Utc::now().date_naive();
        let range = aggregation::month_range(today.year(), today.month());

        let (income, expense) = tokio::try_join!(
            self.store
                .sum_by_user(user_id, TransactionKind::Income, Some(range)),
            self.store
                .sum_by_user(user_id, TransactionKind::Expense, Some(range)),
        )?;

        Ok(ExpenseIncomeRatio {
            month: aggregation::month_label_long(today.year(), today.month()),
            income,
            expense,
            savings: income - expense,
            saving_rate: aggregation::percent_string(aggregation::savings_rate(income, expense)),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::analytics::{BudgetState, MonthlyTotal};
    use crate::models::transaction::Transaction;
    use crate::models::user::{CreateUserRequest, User};
    use chrono::NaiveDate;
    use std::collections::HashMap;
    use std::str::FromStr;
    use std::sync::Mutex;

    struct MockTransactionStore {
        transactions: Mutex<HashMap<Uuid, Transaction>>,
    }

    impl MockTransactionStore {
        fn new() -> Self {
            Self {
                transactions: Mutex::new(HashMap::new()),
            }
        }

        fn seed(&self, user_id: Uuid, kind: TransactionKind, amount: &str, date: NaiveDate, label: &str) {
            let tx = Transaction {
                id: Uuid::new_v4(),
                user_id,
                kind,
                amount: Decimal::from_str(amount).unwrap(),
                date,
                label: label.to_string(),
                icon: None,
                notes: None,
                payment_mode: None,
                created_at: Utc::now(),
            };
            self.transactions.lock().unwrap().insert(tx.id, tx);
        }

        fn matching(
            &self,
            user_id: Uuid,
            kind: TransactionKind,
            range: Option<DateRange>,
        ) -> Vec<Transaction> {
            let transactions = self.transactions.lock().unwrap();
            let mut matches: Vec<Transaction> = transactions
                .values()
                .filter(|t| t.user_id == user_id && t.kind == kind)
                .filter(|t| range.map_or(true, |r| r.contains(t.date)))
                .cloned()
                .collect();
            matches.sort_by(|a, b| b.date.cmp(&a.date));
            matches
        }
    }

    #[async_trait]
    impl TransactionStore for MockTransactionStore {
        async fn create(&self, tx: Transaction) -> Result<Transaction, StoreError> {
            self.transactions.lock().unwrap().insert(tx.id, tx.clone());
            Ok(tx)
        }

        async fn find_by_id(&self, id: Uuid) -> Result<Option<Transaction>, StoreError> {
            Ok(self.transactions.lock().unwrap().get(&id).cloned())
        }

        async fn find_by_user(
            &self,
            user_id: Uuid,
            kind: TransactionKind,
            filter: TransactionFilter,
        ) -> Result<Vec<Transaction>, StoreError> {
            Ok(self.matching(user_id, kind, filter.date_range))
        }

        async fn find_recent(
            &self,
            user_id: Uuid,
            kind: TransactionKind,
            limit: i64,
        ) -> Result<Vec<Transaction>, StoreError> {
            let mut matches = self.matching(user_id, kind, None);
            matches.truncate(limit as usize);
            Ok(matches)
        }

        async fn sum_by_user(
            &self,
            user_id: Uuid,
            kind: TransactionKind,
            range: Option<DateRange>,
        ) -> Result<Decimal, StoreError> {
            Ok(aggregation::sum_amounts(&self.matching(user_id, kind, range)))
        }

        async fn sum_grouped_by_label(
            &self,
            user_id: Uuid,
            kind: TransactionKind,
        ) -> Result<Vec<LabelTotal>, StoreError> {
            Ok(aggregation::group_by_label(&self.matching(user_id, kind, None)))
        }

        async fn sum_grouped_by_month(
            &self,
            user_id: Uuid,
            kind: TransactionKind,
            range: Option<DateRange>,
            order: SortOrder,
        ) -> Result<Vec<MonthlyTotal>, StoreError> {
            Ok(aggregation::group_by_month(
                &self.matching(user_id, kind, range),
                order,
            ))
        }

        async fn delete(&self, id: Uuid) -> Result<(), StoreError> {
            self.transactions
                .lock()
                .unwrap()
                .remove(&id)
                .map(|_| ())
                .ok_or(StoreError::NotFound)
        }
    }

    struct MockUserRepository {
        users: Mutex<HashMap<Uuid, User>>,
    }

    impl MockUserRepository {
        fn new() -> Self {
            Self {
                users: Mutex::new(HashMap::new()),
            }
        }

        fn seed(&self, monthly_budget: Option<Decimal>) -> Uuid {
            let user = User {
                id: Uuid::new_v4(),
                name: "Test User".to_string(),
                email: "test@example.com".to_string(),
                password_hash: "hash".to_string(),
                monthly_budget,
                created_at: Utc::now(),
            };
            let id = user.id;
            self.users.lock().unwrap().insert(id, user);
            id
        }
    }

    #[async_trait]
    impl UserRepository for MockUserRepository {
        async fn create(
            &self,
            user: CreateUserRequest,
            password_hash: String,
        ) -> Result<User, RepositoryError> {
            let user = User {
                id: Uuid::new_v4(),
                name: user.name,
                email: user.email,
                password_hash,
                monthly_budget: None,
                created_at: Utc::now(),
            };
            self.users.lock().unwrap().insert(user.id, user.clone());
            Ok(user)
        }

        async fn find_by_email(&self, email: &str) -> Result<Option<User>, RepositoryError> {
            Ok(self
                .users
                .lock()
                .unwrap()
                .values()
                .find(|u| u.email == email)
                .cloned())
        }

        async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, RepositoryError> {
            Ok(self.users.lock().unwrap().get(&id).cloned())
        }

        async fn update_budget(&self, id: Uuid, budget: Decimal) -> Result<User, RepositoryError> {
            let mut users = self.users.lock().unwrap();
            let user = users.get_mut(&id).ok_or(RepositoryError::NotFound)?;
            user.monthly_budget = if budget.is_zero() { None } else { Some(budget) };
            Ok(user.clone())
        }
    }

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn service() -> (Arc<MockTransactionStore>, Arc<MockUserRepository>, AnalyticsServiceImpl) {
        let store = Arc::new(MockTransactionStore::new());
        let users = Arc::new(MockUserRepository::new());
        let service = AnalyticsServiceImpl::new(store.clone(), users.clone());
        (store, users, service)
    }

    #[tokio::test]
    async fn test_dashboard_summary_totals_and_rates() {
        let (store, _, service) = service();
        let user_id = Uuid::new_v4();
        let today = Utc::now().date_naive();

        store.seed(user_id, TransactionKind::Income, "5000.00", today, "salary");
        store.seed(user_id, TransactionKind::Expense, "1500.00", today, "rent");
        store.seed(user_id, TransactionKind::Expense, "500.00", today, "groceries");

        let summary = service.dashboard_summary(user_id).await.unwrap();
        assert_eq!(summary.total_income, dec("5000.00"));
        assert_eq!(summary.total_expense, dec("2000.00"));
        assert_eq!(summary.total_balance, dec("3000.00"));
        assert_eq!(summary.total_savings_rate, dec("60.00"));
        assert_eq!(summary.expense_by_category[0].label, "rent");
        assert_eq!(summary.income_by_source[0].total, dec("5000.00"));
    }

    #[tokio::test]
    async fn test_dashboard_summary_empty_history() {
        let (_, _, service) = service();

        let summary = service.dashboard_summary(Uuid::new_v4()).await.unwrap();
        assert_eq!(summary.total_balance, Decimal::ZERO);
        assert_eq!(summary.total_savings_rate, Decimal::ZERO);
        assert_eq!(summary.daily_expense_avg, Decimal::ZERO);
        assert!(summary.expense_by_category.is_empty());
        assert!(summary.recent_transactions.is_empty());
    }

    #[tokio::test]
    async fn test_dashboard_summary_recent_feed_merges_both_kinds() {
        let (store, _, service) = service();
        let user_id = Uuid::new_v4();
        let today = Utc::now().date_naive();

        for offset in 0..4 {
            store.seed(
                user_id,
                TransactionKind::Income,
                "100.00",
                today - Duration::days(offset),
                "salary",
            );
            store.seed(
                user_id,
                TransactionKind::Expense,
                "50.00",
                today - Duration::days(offset + 10),
                "groceries",
            );
        }

        let summary = service.dashboard_summary(user_id).await.unwrap();
        assert_eq!(summary.recent_transactions.len(), 5);
        // Incomes are all newer than the expenses, then one expense fills
        // the fifth slot
        assert_eq!(summary.recent_transactions[0].kind, TransactionKind::Income);
        assert_eq!(summary.recent_transactions[4].kind, TransactionKind::Expense);
    }

    #[tokio::test]
    async fn test_dashboard_summary_30_day_window() {
        let (store, _, service) = service();
        let user_id = Uuid::new_v4();
        let today = Utc::now().date_naive();

        store.seed(user_id, TransactionKind::Expense, "300.00", today, "rent");
        store.seed(
            user_id,
            TransactionKind::Expense,
            "999.00",
            today - Duration::days(45),
            "old",
        );

        let summary = service.dashboard_summary(user_id).await.unwrap();
        assert_eq!(summary.total_expense_last_30_days, dec("300.00"));
        assert_eq!(summary.last_30_days_expenses.len(), 1);
        assert_eq!(summary.daily_expense_avg, dec("10.00"));
        // All-time total still includes the older record
        assert_eq!(summary.total_expense, dec("1299.00"));
    }

    #[tokio::test]
    async fn test_dashboard_summary_includes_future_dated_current_month_record() {
        let (store, _, service) = service();
        let user_id = Uuid::new_v4();
        let today = Utc::now().date_naive();
        // Last day of the current month; on or after today by construction
        let month_end = aggregation::month_range(today.year(), today.month()).end;

        store.seed(user_id, TransactionKind::Expense, "800.00", month_end, "rent");

        let summary = service.dashboard_summary(user_id).await.unwrap();
        assert_eq!(summary.total_expense, dec("800.00"));
        // The same record must appear in every window, not just the totals
        assert_eq!(summary.monthly_expense_trend.len(), 1);
        assert_eq!(summary.monthly_expense_trend[0].total, dec("800.00"));
        assert_eq!(summary.total_expense_last_30_days, dec("800.00"));
        assert_eq!(summary.last_30_days_expenses.len(), 1);
        assert!(summary.daily_expense_avg > Decimal::ZERO);
    }

    #[tokio::test]
    async fn test_store_failure_is_not_a_missing_user() {
        let error: AnalyticsError = StoreError::NotFound.into();
        assert!(matches!(error, AnalyticsError::DatabaseError(_)));

        let error: AnalyticsError = StoreError::DatabaseError("boom".to_string()).into();
        assert!(matches!(error, AnalyticsError::DatabaseError(_)));
    }

    #[tokio::test]
    async fn test_monthly_summary_newest_first_with_labels() {
        let (store, _, service) = service();
        let user_id = Uuid::new_v4();

        store.seed(
            user_id,
            TransactionKind::Income,
            "100.00",
            NaiveDate::from_ymd_opt(2024, 1, 15).unwrap(),
            "salary",
        );
        store.seed(
            user_id,
            TransactionKind::Income,
            "250.00",
            NaiveDate::from_ymd_opt(2024, 3, 10).unwrap(),
            "salary",
        );

        let summary = service
            .monthly_summary(user_id, TransactionKind::Income)
            .await
            .unwrap();
        assert_eq!(summary.total, dec("350.00"));
        assert_eq!(summary.months, vec!["Mar 2024", "Jan 2024"]);
        assert_eq!(summary.values, vec![dec("250.00"), dec("100.00")]);
    }

    #[tokio::test]
    async fn test_top_labels_limits_differ_by_kind() {
        let (store, _, service) = service();
        let user_id = Uuid::new_v4();
        let date = NaiveDate::from_ymd_opt(2024, 1, 15).unwrap();

        for i in 0..12 {
            store.seed(
                user_id,
                TransactionKind::Expense,
                &format!("{}.00", 100 - i),
                date,
                &format!("category-{}", i),
            );
            store.seed(
                user_id,
                TransactionKind::Income,
                &format!("{}.00", 100 - i),
                date,
                &format!("source-{}", i),
            );
        }

        let categories = service
            .top_labels(user_id, TransactionKind::Expense)
            .await
            .unwrap();
        assert_eq!(categories.len(), 10);
        assert_eq!(categories[0].label, "category-0");

        let sources = service
            .top_labels(user_id, TransactionKind::Income)
            .await
            .unwrap();
        assert_eq!(sources.len(), 3);
        assert_eq!(sources[0].label, "source-0");
    }

    #[tokio::test]
    async fn test_growth_against_previous_month() {
        let (store, _, service) = service();
        let user_id = Uuid::new_v4();
        let today = Utc::now().date_naive();
        let (prev_year, prev_month) = aggregation::previous_month(today.year(), today.month());

        store.seed(user_id, TransactionKind::Expense, "150.00", today, "rent");
        store.seed(
            user_id,
            TransactionKind::Expense,
            "100.00",
            NaiveDate::from_ymd_opt(prev_year, prev_month, 15).unwrap(),
            "rent",
        );

        let report = service.growth(user_id, TransactionKind::Expense).await.unwrap();
        assert_eq!(report.current, dec("150.00"));
        assert_eq!(report.previous, dec("100.00"));
        assert_eq!(report.growth, "50.00");
    }

    #[tokio::test]
    async fn test_growth_with_no_previous_activity() {
        let (store, _, service) = service();
        let user_id = Uuid::new_v4();
        let today = Utc::now().date_naive();

        store.seed(user_id, TransactionKind::Income, "300.00", today, "salary");

        let report = service.growth(user_id, TransactionKind::Income).await.unwrap();
        assert_eq!(report.growth, "100.00");

        let idle = service.growth(Uuid::new_v4(), TransactionKind::Income).await.unwrap();
        assert_eq!(idle.growth, "0.00");
    }

    #[tokio::test]
    async fn test_budget_status_transitions() {
        let (store, users, service) = service();
        let user_id = users.seed(Some(dec("1000.00")));
        let today = Utc::now().date_naive();

        store.seed(user_id, TransactionKind::Expense, "500.00", today, "rent");
        let report = service.budget_status(user_id).await.unwrap();
        assert_eq!(report.status, BudgetState::Under);
        assert_eq!(report.remaining, dec("500.00"));

        store.seed(user_id, TransactionKind::Expense, "450.00", today, "travel");
        let report = service.budget_status(user_id).await.unwrap();
        assert_eq!(report.status, BudgetState::Warning);

        store.seed(user_id, TransactionKind::Expense, "100.00", today, "dining");
        let report = service.budget_status(user_id).await.unwrap();
        assert_eq!(report.status, BudgetState::Over);
        assert_eq!(report.remaining, dec("-50.00"));
    }

    #[tokio::test]
    async fn test_budget_status_without_budget() {
        let (store, users, service) = service();
        let user_id = users.seed(None);
        let today = Utc::now().date_naive();

        store.seed(user_id, TransactionKind::Expense, "500.00", today, "rent");

        let report = service.budget_status(user_id).await.unwrap();
        assert_eq!(report.status, BudgetState::NoBudget);
        assert_eq!(report.spent, Decimal::ZERO);
    }

    #[tokio::test]
    async fn test_budget_status_unknown_user() {
        let (_, _, service) = service();
        let result = service.budget_status(Uuid::new_v4()).await;
        assert!(matches!(result, Err(AnalyticsError::UserNotFound)));
    }

    #[tokio::test]
    async fn test_expense_income_ratio() {
        let (store, _, service) = service();
        let user_id = Uuid::new_v4();
        let today = Utc::now().date_naive();

        store.seed(user_id, TransactionKind::Income, "5000.00", today, "salary");
        store.seed(user_id, TransactionKind::Expense, "2000.00", today, "rent");
        // Outside the current month, must not count
        store.seed(
            user_id,
            TransactionKind::Expense,
            "900.00",
            aggregation::month_range(today.year(), today.month())
                .start
                .pred_opt()
                .unwrap(),
            "old",
        );

        let ratio = service.expense_income_ratio(user_id).await.unwrap();
        assert_eq!(ratio.income, dec("5000.00"));
        assert_eq!(ratio.expense, dec("2000.00"));
        assert_eq!(ratio.savings, dec("3000.00"));
        assert_eq!(ratio.saving_rate, "60.00%");
        assert_eq!(
            ratio.month,
            aggregation::month_label_long(today.year(), today.month())
        );
    }

    #[tokio::test]
    async fn test_expense_income_ratio_no_income() {
        let (store, _, service) = service();
        let user_id = Uuid::new_v4();
        let today = Utc::now().date_naive();

        store.seed(user_id, TransactionKind::Expense, "2000.00", today, "rent");

        let ratio = service.expense_income_ratio(user_id).await.unwrap();
        assert_eq!(ratio.saving_rate, "0.00%");
        assert_eq!(ratio.savings, dec("-2000.00"));
    }
}
