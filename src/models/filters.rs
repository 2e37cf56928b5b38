use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Inclusive date range used to scope queries and aggregations
#[derive(Debug, Clone, Copy, Serialize, Deserialize, ToSchema)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        Self { start, end }
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.start && date <= self.end
    }
}

/// Chronological ordering for month buckets
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    Ascending,
    Descending,
}

/// Optional filters for transaction listings
#[derive(Debug, Clone, Default)]
pub struct TransactionFilter {
    /// Inclusive date range
    pub date_range: Option<DateRange>,
    /// Exact label match
    pub label: Option<String>,
    /// Case-insensitive label substring search
    pub search: Option<String>,
}
