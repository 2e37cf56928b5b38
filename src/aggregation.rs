//! Pure aggregation primitives for the analytics engine.
//!
//! Every function here is total: grouping and bucketing over
//! already-fetched transaction slices, growth and savings-rate math,
//! budget evaluation, and the recent-activity merge. Degenerate inputs
//! (no records, zero denominators) resolve to defined defaults, never
//! errors. All date bucketing is calendar-based in UTC.

use std::collections::BTreeMap;

use chrono::{Datelike, NaiveDate};
use rust_decimal::{Decimal, RoundingStrategy};

use crate::models::analytics::{BudgetReport, BudgetState, LabelTotal, MonthlyTotal};
use crate::models::filters::{DateRange, SortOrder};
use crate::models::transaction::Transaction;

const MONTHS_SHORT: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

const MONTHS_LONG: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

/// Rounds to two decimal places, half away from zero.
pub fn round2(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// Plain numeric total of a transaction slice.
pub fn sum_amounts(transactions: &[Transaction]) -> Decimal {
    transactions.iter().map(|t| t.amount).sum()
}

/// Sums amounts per label, sorted descending by total.
///
/// Ties keep first-seen order: the accumulator preserves encounter order
/// and the sort is stable. Labels with no transactions never appear.
pub fn group_by_label(transactions: &[Transaction]) -> Vec<LabelTotal> {
    let mut totals: Vec<LabelTotal> = Vec::new();
    for tx in transactions {
        match totals.iter_mut().find(|t| t.label == tx.label) {
            Some(entry) => entry.total += tx.amount,
            None => totals.push(LabelTotal {
                label: tx.label.clone(),
                total: tx.amount,
            }),
        }
    }
    totals.sort_by(|a, b| b.total.cmp(&a.total));
    totals
}

/// Sums amounts per (year, month) bucket in the requested chronological
/// order. Months with no transactions are never emitted; consumers must
/// not assume contiguous buckets.
pub fn group_by_month(transactions: &[Transaction], order: SortOrder) -> Vec<MonthlyTotal> {
    let mut buckets: BTreeMap<(i32, u32), Decimal> = BTreeMap::new();
    for tx in transactions {
        *buckets
            .entry((tx.date.year(), tx.date.month()))
            .or_insert(Decimal::ZERO) += tx.amount;
    }

    let mut totals: Vec<MonthlyTotal> = buckets
        .into_iter()
        .map(|((year, month), total)| MonthlyTotal { year, month, total })
        .collect();

    if order == SortOrder::Descending {
        totals.reverse();
    }
    totals
}

/// Month-over-month growth percentage, rounded to two decimals.
///
/// A zero previous month is not an error: growth is 100.00 when the
/// current month has activity ("new activity") and 0.00 when it does not
/// ("no activity").
pub fn growth_rate(current: Decimal, previous: Decimal) -> Decimal {
    if previous.is_zero() {
        if current > Decimal::ZERO {
            Decimal::new(10000, 2)
        } else {
            Decimal::new(0, 2)
        }
    } else {
        round2((current - previous) / previous * Decimal::ONE_HUNDRED)
    }
}

/// Percentage of income retained after expenses, rounded to two
/// decimals; zero when there is no income, regardless of expense.
pub fn savings_rate(income: Decimal, expense: Decimal) -> Decimal {
    if income.is_zero() {
        Decimal::ZERO
    } else {
        round2((income - expense) / income * Decimal::ONE_HUNDRED)
    }
}

/// Formats a rate as a percent string with two decimals, e.g. "60.00%".
pub fn percent_string(rate: Decimal) -> String {
    format!("{:.2}%", rate)
}

/// Average amount per day over a fixed window, rounded to two decimals.
/// Zero when the window holds no transactions.
pub fn daily_average(total: Decimal, days: i64, has_transactions: bool) -> Decimal {
    if !has_transactions || days == 0 {
        Decimal::ZERO
    } else {
        round2(total / Decimal::from(days))
    }
}

/// Evaluates the monthly budget ceiling against the amount spent so far
/// this month. Pure function of (budget, spent); an unset or zero budget
/// reports `no_budget` with all figures zeroed.
pub fn evaluate_budget(budget: Option<Decimal>, spent: Decimal) -> BudgetReport {
    let budget = budget.unwrap_or(Decimal::ZERO);
    if budget <= Decimal::ZERO {
        return BudgetReport {
            budget: Decimal::ZERO,
            spent: Decimal::ZERO,
            remaining: Decimal::ZERO,
            status: BudgetState::NoBudget,
        };
    }

    let remaining = budget - spent;
    let status = if remaining <= Decimal::ZERO {
        BudgetState::Over
    } else if remaining <= budget * Decimal::new(1, 1) {
        BudgetState::Warning
    } else {
        BudgetState::Under
    };

    BudgetReport {
        budget,
        spent,
        remaining,
        status,
    }
}

/// Merges recent incomes and expenses into one feed, newest first,
/// truncated to `limit` entries. Each entry keeps its kind tag.
pub fn merge_recent(
    incomes: Vec<Transaction>,
    expenses: Vec<Transaction>,
    limit: usize,
) -> Vec<Transaction> {
    let mut merged: Vec<Transaction> = incomes.into_iter().chain(expenses).collect();
    merged.sort_by(|a, b| {
        b.date
            .cmp(&a.date)
            .then_with(|| b.created_at.cmp(&a.created_at))
    });
    merged.truncate(limit);
    merged
}

/// First and last day of the given calendar month.
pub fn month_range(year: i32, month: u32) -> DateRange {
    let start = NaiveDate::from_ymd_opt(year, month, 1).expect("month in 1..=12");
    let (next_year, next_month) = if month == 12 {
        (year + 1, 1)
    } else {
        (year, month + 1)
    };
    let end = NaiveDate::from_ymd_opt(next_year, next_month, 1)
        .expect("month in 1..=12")
        .pred_opt()
        .expect("date above NaiveDate::MIN");
    DateRange::new(start, end)
}

/// Previous calendar month with year rollover (January -> December of
/// the prior year).
pub fn previous_month(year: i32, month: u32) -> (i32, u32) {
    if month == 1 {
        (year - 1, 12)
    } else {
        (year, month - 1)
    }
}

/// Start of the trailing window covering the current partial month plus
/// the `months - 1` whole calendar months before it.
pub fn trailing_months_start(today: NaiveDate, months: u32) -> NaiveDate {
    let mut year = today.year();
    let mut month = today.month();
    for _ in 1..months {
        let (y, m) = previous_month(year, month);
        year = y;
        month = m;
    }
    NaiveDate::from_ymd_opt(year, month, 1).expect("month in 1..=12")
}

/// Short month label for summary listings, e.g. "Sep 2025".
pub fn month_label_short(year: i32, month: u32) -> String {
    format!("{} {}", MONTHS_SHORT[(month - 1) as usize], year)
}

/// Long month label for the ratio endpoint, e.g. "September 2025".
pub fn month_label_long(year: i32, month: u32) -> String {
    format!("{} {}", MONTHS_LONG[(month - 1) as usize], year)
}
