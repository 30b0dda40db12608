// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Pure aggregation over already-fetched records. No I/O here; the
//! store fetches, these functions shape the result for display.

use std::collections::BTreeMap;

use chrono::{Months, NaiveDate};
use rust_decimal::Decimal;
use serde::Serialize;

use crate::models::{Budget, Credit, Currency, EntryKind, Goal, PlannedExpense, Transaction};

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct CurrencyTotal {
    pub currency: Currency,
    pub income: Decimal,
    pub expense: Decimal,
}

impl CurrencyTotal {
    pub fn net(&self) -> Decimal {
        self.income - self.expense
    }
}

/// Per-currency income/expense sums, ordered by currency code.
pub fn currency_totals(transactions: &[Transaction]) -> Vec<CurrencyTotal> {
    let mut map: BTreeMap<Currency, (Decimal, Decimal)> = BTreeMap::new();
    for tx in transactions {
        let entry = map.entry(tx.currency).or_insert((Decimal::ZERO, Decimal::ZERO));
        match tx.kind {
            EntryKind::Income => entry.0 += tx.amount,
            EntryKind::Expense => entry.1 += tx.amount,
        }
    }
    map.into_iter()
        .map(|(currency, (income, expense))| CurrencyTotal {
            currency,
            income,
            expense,
        })
        .collect()
}

/// Per-currency budget balance sums, ordered by currency code.
pub fn budget_totals(budgets: &[Budget]) -> Vec<(Currency, Decimal)> {
    let mut map: BTreeMap<Currency, Decimal> = BTreeMap::new();
    for b in budgets {
        *map.entry(b.currency).or_insert(Decimal::ZERO) += b.amount;
    }
    map.into_iter().collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SegmentMode {
    Count,
    Sum,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct CategorySegment {
    pub label: String,
    pub value: Decimal,
    pub percentage: Decimal,
}

/// Per-category buckets for one entry kind, sorted by descending value.
/// `Count` buckets count matching transactions, `Sum` buckets sum their
/// amounts; percentages are of the bucket-value total, 0 when it is 0.
pub fn category_segments(
    transactions: &[Transaction],
    kind: EntryKind,
    mode: SegmentMode,
) -> Vec<CategorySegment> {
    let mut map: BTreeMap<&str, Decimal> = BTreeMap::new();
    for tx in transactions.iter().filter(|t| t.kind == kind) {
        let value = match mode {
            SegmentMode::Count => Decimal::ONE,
            SegmentMode::Sum => tx.amount,
        };
        *map.entry(tx.category.as_str()).or_insert(Decimal::ZERO) += value;
    }
    let total: Decimal = map.values().copied().sum();
    let mut segments: Vec<CategorySegment> = map
        .into_iter()
        .map(|(label, value)| {
            let percentage = if total > Decimal::ZERO {
                value / total * Decimal::ONE_HUNDRED
            } else {
                Decimal::ZERO
            };
            CategorySegment {
                label: label.to_string(),
                value,
                percentage,
            }
        })
        .collect();
    segments.sort_by(|a, b| b.value.cmp(&a.value).then_with(|| a.label.cmp(&b.label)));
    segments
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Period {
    OneMonth,
    ThreeMonths,
    SixMonths,
    OneYear,
    AllTime,
    Custom { start: NaiveDate, end: NaiveDate },
}

impl Period {
    /// Inclusive date bounds, or `None` for all time.
    pub fn bounds(&self, today: NaiveDate) -> Option<(NaiveDate, NaiveDate)> {
        let months_back = |n: u32| {
            today
                .checked_sub_months(Months::new(n))
                .unwrap_or(NaiveDate::MIN)
        };
        match *self {
            Period::OneMonth => Some((months_back(1), today)),
            Period::ThreeMonths => Some((months_back(3), today)),
            Period::SixMonths => Some((months_back(6), today)),
            Period::OneYear => Some((months_back(12), today)),
            Period::AllTime => None,
            Period::Custom { start, end } => Some((start, end)),
        }
    }
}

pub trait Dated {
    fn date(&self) -> NaiveDate;
}

impl Dated for Transaction {
    fn date(&self) -> NaiveDate {
        self.date
    }
}

impl Dated for Budget {
    fn date(&self) -> NaiveDate {
        self.date
    }
}

impl Dated for Credit {
    fn date(&self) -> NaiveDate {
        self.date_created
    }
}

impl Dated for Goal {
    fn date(&self) -> NaiveDate {
        self.date_created
    }
}

impl Dated for PlannedExpense {
    fn date(&self) -> NaiveDate {
        self.reminder_date
    }
}

/// Keeps records whose date falls inside the period, relative to `today`.
pub fn filter_period<T: Dated + Clone>(records: &[T], period: Period, today: NaiveDate) -> Vec<T> {
    match period.bounds(today) {
        None => records.to_vec(),
        Some((start, end)) => records
            .iter()
            .filter(|r| {
                let d = r.date();
                d >= start && d <= end
            })
            .cloned()
            .collect(),
    }
}

/// Clamped completion ratio in `[0, 1]`; 0 whenever the total is not positive.
pub fn progress_ratio(current: Decimal, total: Decimal) -> Decimal {
    if total <= Decimal::ZERO {
        return Decimal::ZERO;
    }
    current.clamp(Decimal::ZERO, total) / total
}
