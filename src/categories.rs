// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Static display metadata for the five fixed category taxonomies.
//! Titles are free text on the records themselves; the registry only
//! decorates known titles with an icon and a color.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown taxonomy '{0}', expected income, expense, goal, credit or account")]
pub struct ParseTaxonomyError(String);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CategoryItem {
    pub title: &'static str,
    pub icon: &'static str,
    pub color: &'static str,
}

const fn item(title: &'static str, icon: &'static str) -> CategoryItem {
    CategoryItem {
        title,
        icon,
        color: "blue",
    }
}

pub const UNKNOWN: CategoryItem = CategoryItem {
    title: "?",
    icon: "questionmark.circle",
    color: "gray",
};

/// Custom titles are recorded under this category name.
pub const OTHER: &str = "Другое";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Taxonomy {
    Income,
    Expense,
    Goal,
    Credit,
    BudgetAccount,
}

impl fmt::Display for Taxonomy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Taxonomy::Income => "income",
            Taxonomy::Expense => "expense",
            Taxonomy::Goal => "goal",
            Taxonomy::Credit => "credit",
            Taxonomy::BudgetAccount => "account",
        };
        f.write_str(s)
    }
}

impl FromStr for Taxonomy {
    type Err = ParseTaxonomyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "income" => Ok(Taxonomy::Income),
            "expense" => Ok(Taxonomy::Expense),
            "goal" => Ok(Taxonomy::Goal),
            "credit" => Ok(Taxonomy::Credit),
            "account" => Ok(Taxonomy::BudgetAccount),
            other => Err(ParseTaxonomyError(other.to_string())),
        }
    }
}

static INCOME: &[CategoryItem] = &[
    item("Работа", "briefcase.fill"),
    item("Фриланс", "laptopcomputer"),
    item("Депозит", "banknote.fill"),
    item("Другое", "square.and.pencil"),
];

static EXPENSE: &[CategoryItem] = &[
    item("Транспорт", "car.fill"),
    item("Здоровье", "heart.fill"),
    item("Дом", "house.fill"),
    item("Ремонт", "wrench.and.screwdriver.fill"),
    item("Еда", "fork.knife"),
    item("Другое", "ellipsis.circle"),
];

static GOAL: &[CategoryItem] = &[
    item("Путешествие", "airplane"),
    item("Покупка авто", "car.fill"),
    item("Образование", "book.fill"),
    item("Недвижимость", "house.fill"),
    item("Инвестиции", "chart.bar.fill"),
    item("Другое", "ellipsis.circle"),
];

static CREDIT: &[CategoryItem] = &[
    item("Банк", "building.columns.fill"),
    item("Частное лицо", "person.fill"),
    item("МФО", "bag.fill.badge.plus"),
    item("Другое", "ellipsis.circle"),
];

static BUDGET_ACCOUNT: &[CategoryItem] = &[
    item("Депозит", "banknote.fill"),
    item("Счет", "creditcard.fill"),
    item("Наличка", "banknote"),
];

pub fn all(taxonomy: Taxonomy) -> &'static [CategoryItem] {
    match taxonomy {
        Taxonomy::Income => INCOME,
        Taxonomy::Expense => EXPENSE,
        Taxonomy::Goal => GOAL,
        Taxonomy::Credit => CREDIT,
        Taxonomy::BudgetAccount => BUDGET_ACCOUNT,
    }
}

/// Linear scan by title; unmatched titles get the neutral fallback.
pub fn lookup(taxonomy: Taxonomy, title: &str) -> CategoryItem {
    all(taxonomy)
        .iter()
        .find(|c| c.title == title)
        .copied()
        .unwrap_or(UNKNOWN)
}
