// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ParseModelError {
    #[error("unknown currency '{0}', expected USD, UZS, EUR or RUB")]
    Currency(String),
    #[error("unknown entry kind '{0}', expected income or expense")]
    EntryKind(String),
    #[error("unknown credit kind '{0}', expected credit or loan")]
    CreditKind(String),
}

// Variants stay in code order; reports rely on the derived ordering.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "UPPERCASE")]
pub enum Currency {
    Eur,
    Rub,
    Usd,
    Uzs,
}

impl Currency {
    pub const ALL: [Currency; 4] = [Currency::Eur, Currency::Rub, Currency::Usd, Currency::Uzs];

    pub fn code(&self) -> &'static str {
        match self {
            Currency::Eur => "EUR",
            Currency::Rub => "RUB",
            Currency::Usd => "USD",
            Currency::Uzs => "UZS",
        }
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Currency {
    type Err = ParseModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "EUR" => Ok(Currency::Eur),
            "RUB" => Ok(Currency::Rub),
            "USD" => Ok(Currency::Usd),
            "UZS" => Ok(Currency::Uzs),
            _ => Err(ParseModelError::Currency(s.to_string())),
        }
    }
}

/// Direction of a transaction, and of budget/credit/goal adjustments
/// (income adds, expense subtracts).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryKind {
    Income,
    Expense,
}

impl EntryKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            EntryKind::Income => "income",
            EntryKind::Expense => "expense",
        }
    }
}

impl fmt::Display for EntryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EntryKind {
    type Err = ParseModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "income" => Ok(EntryKind::Income),
            "expense" => Ok(EntryKind::Expense),
            _ => Err(ParseModelError::EntryKind(s.to_string())),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CreditKind {
    Credit,
    Loan,
}

impl CreditKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            CreditKind::Credit => "credit",
            CreditKind::Loan => "loan",
        }
    }
}

impl fmt::Display for CreditKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CreditKind {
    type Err = ParseModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "credit" => Ok(CreditKind::Credit),
            "loan" => Ok(CreditKind::Loan),
            _ => Err(ParseModelError::CreditKind(s.to_string())),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Transaction {
    pub id: i64,
    pub title: String,
    pub amount: Decimal,
    pub date: NaiveDate,
    pub category: String,
    pub kind: EntryKind,
    pub currency: Currency,
    pub user_id: String,
    pub comment: Option<String>,
}

/// A named balance bucket (deposit, account, cash), not a spending limit.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Budget {
    pub id: i64,
    pub category_title: String,
    pub kind: EntryKind,
    pub amount: Decimal,
    pub currency: Currency,
    pub date: NaiveDate,
    pub user_id: String,
}

/// Append-only ledger of `budget apply` adjustments.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BudgetHistory {
    pub id: i64,
    pub budget_id: i64,
    pub date: NaiveDate,
    pub kind: EntryKind,
    pub amount: Decimal,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Credit {
    pub id: i64,
    pub title: String,
    pub category_title: String,
    pub total_amount: Decimal,
    pub paid_amount: Decimal,
    pub date_created: NaiveDate,
    pub user_id: String,
    pub currency: Option<Currency>,
    pub comment: Option<String>,
    pub kind: CreditKind,
}

impl Credit {
    /// Overpayment is allowed, so paid may exceed total.
    pub fn is_completed(&self) -> bool {
        self.total_amount > Decimal::ZERO && self.paid_amount >= self.total_amount
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Goal {
    pub id: i64,
    pub title: String,
    pub category_title: String,
    pub target_amount: Decimal,
    pub current_amount: Decimal,
    pub date_created: NaiveDate,
    pub user_id: String,
    pub currency: Option<Currency>,
    pub comment: Option<String>,
}

/// A recurring reminder with an amount, not an actual transaction.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlannedExpense {
    pub id: i64,
    pub title: String,
    pub category_title: String,
    pub amount: Decimal,
    pub reminder_date: NaiveDate,
    pub user_id: String,
    pub date_created: NaiveDate,
    pub currency: Currency,
    pub comment: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserProfile {
    pub id: i64,
    pub user_id: String,
    pub username: String,
    pub email: String,
    pub created_at: NaiveDate,
}
