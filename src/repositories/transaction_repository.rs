use async_trait::async_trait;
use rust_decimal::Decimal;
use sqlx::PgPool;
use uuid::Uuid;

use crate::aggregation;
use crate::models::analytics::{LabelTotal, MonthlyTotal};
use crate::models::filters::{DateRange, SortOrder, TransactionFilter};
use crate::models::transaction::{Transaction, TransactionKind};

/// Transaction store errors
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Resource not found")]
    NotFound,

    #[error("Database error: {0}")]
    DatabaseError(String),
}

/// Abstract transaction store consumed by the aggregation engine and the
/// transaction service. Any backing store satisfying this contract
/// suffices; the engine never issues storage-specific queries itself.
#[async_trait]
pub trait TransactionStore: Send + Sync {
    /// Persist a new transaction
    async fn create(&self, tx: Transaction) -> Result<Transaction, StoreError>;

    /// Find a transaction by ID
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Transaction>, StoreError>;

    /// All matching transactions for a user, sorted by date descending
    async fn find_by_user(
        &self,
        user_id: Uuid,
        kind: TransactionKind,
        filter: TransactionFilter,
    ) -> Result<Vec<Transaction>, StoreError>;

    /// The `limit` most recent transactions, newest first
    async fn find_recent(
        &self,
        user_id: Uuid,
        kind: TransactionKind,
        limit: i64,
    ) -> Result<Vec<Transaction>, StoreError>;

    /// Plain numeric total; zero when nothing matches
    async fn sum_by_user(
        &self,
        user_id: Uuid,
        kind: TransactionKind,
        range: Option<DateRange>,
    ) -> Result<Decimal, StoreError>;

    /// Label totals sorted descending; labels with no records are absent
    async fn sum_grouped_by_label(
        &self,
        user_id: Uuid,
        kind: TransactionKind,
    ) -> Result<Vec<LabelTotal>, StoreError>;

    /// (year, month) bucket totals in the requested order; empty months
    /// are absent
    async fn sum_grouped_by_month(
        &self,
        user_id: Uuid,
        kind: TransactionKind,
        range: Option<DateRange>,
        order: SortOrder,
    ) -> Result<Vec<MonthlyTotal>, StoreError>;

    /// Delete a transaction by ID
    async fn delete(&self, id: Uuid) -> Result<(), StoreError>;
}

const SELECT_COLUMNS: &str =
    "id, user_id, kind, amount, date, label, icon, notes, payment_mode, created_at";

/// PostgreSQL implementation of TransactionStore
pub struct PostgresTransactionStore {
    pool: PgPool,
}

impl PostgresTransactionStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Fetches rows for in-process aggregation, in insertion order so the
    /// grouping primitives see labels in first-seen order.
    async fn fetch_for_aggregation(
        &self,
        user_id: Uuid,
        kind: TransactionKind,
        range: Option<DateRange>,
    ) -> Result<Vec<Transaction>, StoreError> {
        let mut query = format!(
            "SELECT {SELECT_COLUMNS} FROM transactions WHERE user_id = $1 AND kind = $2"
        );
        if range.is_some() {
            query.push_str(" AND date BETWEEN $3 AND $4");
        }
        query.push_str(" ORDER BY created_at ASC");

        let mut sqlx_query = sqlx::query_as::<_, Transaction>(&query)
            .bind(user_id)
            .bind(kind);
        if let Some(range) = range {
            sqlx_query = sqlx_query.bind(range.start).bind(range.end);
        }

        sqlx_query
            .fetch_all(&self.pool)
            .await
            .map_err(|e| StoreError::DatabaseError(e.to_string()))
    }
}

#[async_trait]
impl TransactionStore for PostgresTransactionStore {
    async fn create(&self, tx: Transaction) -> Result<Transaction, StoreError> {
        sqlx::query_as::<_, Transaction>(&format!(
            r#"
            INSERT INTO transactions
                (id, user_id, kind, amount, date, label, icon, notes, payment_mode, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            RETURNING {SELECT_COLUMNS}
            "#
        ))
        .bind(tx.id)
        .bind(tx.user_id)
        .bind(tx.kind)
        .bind(tx.amount)
        .bind(tx.date)
        .bind(&tx.label)
        .bind(&tx.icon)
        .bind(&tx.notes)
        .bind(&tx.payment_mode)
        .bind(tx.created_at)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| StoreError::DatabaseError(e.to_string()))
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Transaction>, StoreError> {
        sqlx::query_as::<_, Transaction>(&format!(
            "SELECT {SELECT_COLUMNS} FROM transactions WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| StoreError::DatabaseError(e.to_string()))
    }

    async fn find_by_user(
        &self,
        user_id: Uuid,
        kind: TransactionKind,
        filter: TransactionFilter,
    ) -> Result<Vec<Transaction>, StoreError> {
        // Build dynamic SQL based on provided filters, binding positionally
        let mut query = format!(
            "SELECT {SELECT_COLUMNS} FROM transactions WHERE user_id = $1 AND kind = $2"
        );
        let mut param_count = 2;

        if filter.date_range.is_some() {
            query.push_str(&format!(
                " AND date BETWEEN ${} AND ${}",
                param_count + 1,
                param_count + 2
            ));
            param_count += 2;
        }

        if filter.label.is_some() {
            param_count += 1;
            query.push_str(&format!(" AND label = ${}", param_count));
        }

        if filter.search.is_some() {
            param_count += 1;
            query.push_str(&format!(" AND label ILIKE ${}", param_count));
        }

        query.push_str(" ORDER BY date DESC, created_at DESC");

        let mut sqlx_query = sqlx::query_as::<_, Transaction>(&query)
            .bind(user_id)
            .bind(kind);

        if let Some(range) = filter.date_range {
            sqlx_query = sqlx_query.bind(range.start).bind(range.end);
        }
        if let Some(label) = &filter.label {
            sqlx_query = sqlx_query.bind(label.clone());
        }
        if let Some(search) = &filter.search {
            sqlx_query = sqlx_query.bind(format!("%{}%", search));
        }

        sqlx_query
            .fetch_all(&self.pool)
            .await
            .map_err(|e| StoreError::DatabaseError(e.to_string()))
    }

    async fn find_recent(
        &self,
        user_id: Uuid,
        kind: TransactionKind,
        limit: i64,
    ) -> Result<Vec<Transaction>, StoreError> {
        sqlx::query_as::<_, Transaction>(&format!(
            r#"
            SELECT {SELECT_COLUMNS} FROM transactions
            WHERE user_id = $1 AND kind = $2
            ORDER BY date DESC, created_at DESC
            LIMIT $3
            "#
        ))
        .bind(user_id)
        .bind(kind)
        .bind(limit)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| StoreError::DatabaseError(e.to_string()))
    }

    async fn sum_by_user(
        &self,
        user_id: Uuid,
        kind: TransactionKind,
        range: Option<DateRange>,
    ) -> Result<Decimal, StoreError> {
        let mut query =
            String::from("SELECT SUM(amount) FROM transactions WHERE user_id = $1 AND kind = $2");
        if range.is_some() {
            query.push_str(" AND date BETWEEN $3 AND $4");
        }

        let mut sqlx_query = sqlx::query_scalar::<_, Option<Decimal>>(&query)
            .bind(user_id)
            .bind(kind);
        if let Some(range) = range {
            sqlx_query = sqlx_query.bind(range.start).bind(range.end);
        }

        let total = sqlx_query
            .fetch_one(&self.pool)
            .await
            .map_err(|e| StoreError::DatabaseError(e.to_string()))?;

        Ok(total.unwrap_or(Decimal::ZERO))
    }

    async fn sum_grouped_by_label(
        &self,
        user_id: Uuid,
        kind: TransactionKind,
    ) -> Result<Vec<LabelTotal>, StoreError> {
        let rows = self.fetch_for_aggregation(user_id, kind, None).await?;
        Ok(aggregation::group_by_label(&rows))
    }

    async fn sum_grouped_by_month(
        &self,
        user_id: Uuid,
        kind: TransactionKind,
        range: Option<DateRange>,
        order: SortOrder,
    ) -> Result<Vec<MonthlyTotal>, StoreError> {
        let rows = self.fetch_for_aggregation(user_id, kind, range).await?;
        Ok(aggregation::group_by_month(&rows, order))
    }

    async fn delete(&self, id: Uuid) -> Result<(), StoreError> {
        let result = sqlx::query("DELETE FROM transactions WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| StoreError::DatabaseError(e.to_string()))?;

        if result.rows_affected() == 0 {
            Err(StoreError::NotFound)
        } else {
            Ok(())
        }
    }
}
