use async_trait::async_trait;
use chrono::Utc;
use rust_decimal::Decimal;
use std::sync::Arc;
use uuid::Uuid;

use crate::models::filters::TransactionFilter;
use crate::models::transaction::{
    CreateExpenseRequest, CreateIncomeRequest, Transaction, TransactionKind,
};
use crate::repositories::transaction_repository::{StoreError, TransactionStore};

/// Transaction service errors
#[derive(Debug, thiserror::Error)]
pub enum TransactionError {
    #[error("Invalid amount: amount must be positive")]
    InvalidAmount,

    #[error("Label is required")]
    MissingLabel,

    #[error("Transaction not found")]
    NotFound,

    #[error("Unauthorized to access this record")]
    Unauthorized,

    #[error("Export failed: {0}")]
    ExportFailed(String),

    #[error("Database error: {0}")]
    DatabaseError(String),
}

impl From<StoreError> for TransactionError {
    fn from(e: StoreError) -> Self {
        match e {
            StoreError::NotFound => TransactionError::NotFound,
            StoreError::DatabaseError(msg) => TransactionError::DatabaseError(msg),
        }
    }
}

/// Trait defining income/expense record operations
#[async_trait]
pub trait TransactionService: Send + Sync {
    /// Record a new income
    async fn add_income(
        &self,
        user_id: Uuid,
        request: CreateIncomeRequest,
    ) -> Result<Transaction, TransactionError>;

    /// Record a new expense
    async fn add_expense(
        &self,
        user_id: Uuid,
        request: CreateExpenseRequest,
    ) -> Result<Transaction, TransactionError>;

    /// All records of one kind for a user, newest first
    async fn list(
        &self,
        user_id: Uuid,
        kind: TransactionKind,
    ) -> Result<Vec<Transaction>, TransactionError>;

    /// Filtered records of one kind for a user, newest first
    async fn filter(
        &self,
        user_id: Uuid,
        kind: TransactionKind,
        filter: TransactionFilter,
    ) -> Result<Vec<Transaction>, TransactionError>;

    /// Delete a record, verifying the requester owns it
    async fn delete(&self, user_id: Uuid, transaction_id: Uuid) -> Result<(), TransactionError>;

    /// Export all records of one kind as CSV, newest first
    async fn export_csv(
        &self,
        user_id: Uuid,
        kind: TransactionKind,
    ) -> Result<String, TransactionError>;
}

/// Implementation of TransactionService
pub struct TransactionServiceImpl {
    store: Arc<dyn TransactionStore>,
}

impl TransactionServiceImpl {
    pub fn new(store: Arc<dyn TransactionStore>) -> Self {
        Self { store }
    }

    async fn add(
        &self,
        user_id: Uuid,
        kind: TransactionKind,
        amount: Decimal,
        date: chrono::NaiveDate,
        label: String,
        icon: Option<String>,
        notes: Option<String>,
        payment_mode: Option<String>,
    ) -> Result<Transaction, TransactionError> {
        if amount <= Decimal::ZERO {
            return Err(TransactionError::InvalidAmount);
        }
        if label.trim().is_empty() {
            return Err(TransactionError::MissingLabel);
        }

        let tx = Transaction {
            id: Uuid::new_v4(),
            user_id,
            kind,
            amount,
            date,
            label,
            icon,
            notes,
            payment_mode,
            created_at: Utc::now(),
        };

        Ok(self.store.create(tx).await?)
    }
}

#[async_trait]
impl TransactionService for TransactionServiceImpl {
    async fn add_income(
        &self,
        user_id: Uuid,
        request: CreateIncomeRequest,
    ) -> Result<Transaction, TransactionError> {
        self.add(
            user_id,
            TransactionKind::Income,
            request.amount,
            request.date,
            request.source,
            request.icon,
            request.notes,
            None,
        )
        .await
    }

    async fn add_expense(
        &self,
        user_id: Uuid,
        request: CreateExpenseRequest,
    ) -> Result<Transaction, TransactionError> {
        self.add(
            user_id,
            TransactionKind::Expense,
            request.amount,
            request.date,
            request.category,
            request.icon,
            request.notes,
            request.payment_mode,
        )
        .await
    }

    async fn list(
        &self,
        user_id: Uuid,
        kind: TransactionKind,
    ) -> Result<Vec<Transaction>, TransactionError> {
        Ok(self
            .store
            .find_by_user(user_id, kind, TransactionFilter::default())
            .await?)
    }

    async fn filter(
        &self,
        user_id: Uuid,
        kind: TransactionKind,
        filter: TransactionFilter,
    ) -> Result<Vec<Transaction>, TransactionError> {
        Ok(self.store.find_by_user(user_id, kind, filter).await?)
    }

    async fn delete(&self, user_id: Uuid, transaction_id: Uuid) -> Result<(), TransactionError> {
        // Fetch first so the delete is scoped to the owning user
        let existing = self
            .store
            .find_by_id(transaction_id)
            .await?
            .ok_or(TransactionError::NotFound)?;

        if existing.user_id != user_id {
            return Err(TransactionError::Unauthorized);
        }

        Ok(self.store.delete(transaction_id).await?)
    }

    async fn export_csv(
        &self,
        user_id: Uuid,
        kind: TransactionKind,
    ) -> Result<String, TransactionError> {
        let transactions = self
            .store
            .find_by_user(user_id, kind, TransactionFilter::default())
            .await?;

        let mut writer = csv::Writer::from_writer(Vec::new());
        writer
            .write_record([kind.label_name(), "Amount", "Date"])
            .map_err(|e| TransactionError::ExportFailed(e.to_string()))?;

        for tx in &transactions {
            writer
                .write_record([
                    tx.label.as_str(),
                    &tx.amount.to_string(),
                    &tx.date.format("%Y-%m-%d").to_string(),
                ])
                .map_err(|e| TransactionError::ExportFailed(e.to_string()))?;
        }

        let bytes = writer
            .into_inner()
            .map_err(|e| TransactionError::ExportFailed(e.to_string()))?;
        String::from_utf8(bytes).map_err(|e| TransactionError::ExportFailed(e.to_string()))
    }
}
