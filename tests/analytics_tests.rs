// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::NaiveDate;
use rust_decimal::Decimal;

use moneta::analytics::{
    Period, SegmentMode, category_segments, currency_totals, filter_period, progress_ratio,
};
use moneta::models::{Currency, EntryKind, Transaction};

fn date(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
}

fn dec(s: &str) -> Decimal {
    s.parse().unwrap()
}

fn tx(amount: &str, kind: EntryKind, currency: Currency, category: &str, day: &str) -> Transaction {
    Transaction {
        id: 0,
        title: category.to_string(),
        amount: dec(amount),
        date: date(day),
        category: category.to_string(),
        kind,
        currency,
        user_id: "u1".to_string(),
        comment: None,
    }
}

#[test]
fn currency_totals_groups_income_and_expense() {
    let txs = vec![
        tx("100", EntryKind::Income, Currency::Usd, "Работа", "2026-08-01"),
        tx("40", EntryKind::Expense, Currency::Usd, "Еда", "2026-08-02"),
        tx("20", EntryKind::Income, Currency::Eur, "Фриланс", "2026-08-03"),
    ];
    let totals = currency_totals(&txs);
    assert_eq!(totals.len(), 2);
    // Ordered by currency code ascending: EUR before USD.
    assert_eq!(totals[0].currency, Currency::Eur);
    assert_eq!(totals[0].income, dec("20"));
    assert_eq!(totals[0].expense, dec("0"));
    assert_eq!(totals[1].currency, Currency::Usd);
    assert_eq!(totals[1].income, dec("100"));
    assert_eq!(totals[1].expense, dec("40"));
    assert_eq!(totals[1].net(), dec("60"));
}

#[test]
fn currency_totals_preserve_the_full_sum() {
    let txs = vec![
        tx("10.50", EntryKind::Income, Currency::Uzs, "Работа", "2026-01-01"),
        tx("2.25", EntryKind::Expense, Currency::Uzs, "Еда", "2026-01-02"),
        tx("7", EntryKind::Expense, Currency::Uzs, "Дом", "2026-01-03"),
    ];
    let totals = currency_totals(&txs);
    let bucket_sum: Decimal = totals.iter().map(|t| t.income + t.expense).sum();
    let raw_sum: Decimal = txs.iter().map(|t| t.amount).sum();
    assert_eq!(bucket_sum, raw_sum);
}

#[test]
fn segments_count_mode_percentages_sum_to_hundred() {
    let txs = vec![
        tx("5", EntryKind::Expense, Currency::Usd, "Еда", "2026-03-01"),
        tx("6", EntryKind::Expense, Currency::Usd, "Еда", "2026-03-02"),
        tx("7", EntryKind::Expense, Currency::Usd, "Дом", "2026-03-03"),
        tx("9", EntryKind::Income, Currency::Usd, "Работа", "2026-03-04"),
    ];
    let segments = category_segments(&txs, EntryKind::Expense, SegmentMode::Count);
    assert_eq!(segments.len(), 2);
    // Sorted by descending value.
    assert_eq!(segments[0].label, "Еда");
    assert_eq!(segments[0].value, dec("2"));
    assert_eq!(segments[1].label, "Дом");
    assert_eq!(segments[1].value, dec("1"));
    let total_pct: Decimal = segments.iter().map(|s| s.percentage).sum();
    assert_eq!(total_pct.round_dp(6), dec("100"));
}

#[test]
fn segments_sum_mode_uses_amounts() {
    let txs = vec![
        tx("30", EntryKind::Expense, Currency::Usd, "Еда", "2026-03-01"),
        tx("10", EntryKind::Expense, Currency::Usd, "Еда", "2026-03-02"),
        tx("60", EntryKind::Expense, Currency::Usd, "Дом", "2026-03-03"),
    ];
    let segments = category_segments(&txs, EntryKind::Expense, SegmentMode::Sum);
    assert_eq!(segments[0].label, "Дом");
    assert_eq!(segments[0].value, dec("60"));
    assert_eq!(segments[0].percentage, dec("60"));
    assert_eq!(segments[1].value, dec("40"));
    assert_eq!(segments[1].percentage, dec("40"));
}

#[test]
fn segments_empty_input_yields_no_buckets() {
    let segments = category_segments(&[], EntryKind::Income, SegmentMode::Count);
    assert!(segments.is_empty());
}

#[test]
fn period_filter_keeps_recent_drops_old() {
    let today = date("2026-08-06");
    let txs = vec![
        tx("1", EntryKind::Income, Currency::Usd, "Работа", "2026-08-01"),
        tx("2", EntryKind::Income, Currency::Usd, "Работа", "2026-04-01"),
        tx("3", EntryKind::Income, Currency::Usd, "Работа", "2024-01-01"),
    ];
    let one_month = filter_period(&txs, Period::OneMonth, today);
    assert_eq!(one_month.len(), 1);
    let six_months = filter_period(&txs, Period::SixMonths, today);
    assert_eq!(six_months.len(), 2);
    let all = filter_period(&txs, Period::AllTime, today);
    assert_eq!(all.len(), 3);
}

#[test]
fn period_filter_is_idempotent_under_widening() {
    let today = date("2026-08-06");
    let txs = vec![
        tx("1", EntryKind::Income, Currency::Usd, "Работа", "2026-07-20"),
        tx("2", EntryKind::Income, Currency::Usd, "Работа", "2026-02-01"),
        tx("3", EntryKind::Income, Currency::Usd, "Работа", "2023-06-01"),
    ];
    let narrow = filter_period(&txs, Period::OneMonth, today);
    let widened = filter_period(&narrow, Period::OneYear, today);
    assert_eq!(narrow.len(), widened.len());
    for (a, b) in narrow.iter().zip(widened.iter()) {
        assert_eq!(a.date, b.date);
    }
}

#[test]
fn period_filter_custom_range_is_inclusive() {
    let today = date("2026-08-06");
    let txs = vec![
        tx("1", EntryKind::Income, Currency::Usd, "Работа", "2026-05-01"),
        tx("2", EntryKind::Income, Currency::Usd, "Работа", "2026-05-15"),
        tx("3", EntryKind::Income, Currency::Usd, "Работа", "2026-06-01"),
    ];
    let period = Period::Custom {
        start: date("2026-05-01"),
        end: date("2026-05-15"),
    };
    let filtered = filter_period(&txs, period, today);
    assert_eq!(filtered.len(), 2);
}

#[test]
fn progress_ratio_stays_in_unit_interval() {
    assert_eq!(progress_ratio(dec("250"), dec("1000")), dec("0.25"));
    assert_eq!(progress_ratio(dec("0"), dec("1000")), dec("0"));
    // Overpayment clamps to 1.
    assert_eq!(progress_ratio(dec("1500"), dec("1000")), dec("1"));
    // Negative current clamps to 0.
    assert_eq!(progress_ratio(dec("-5"), dec("1000")), dec("0"));
    // Non-positive totals never divide.
    assert_eq!(progress_ratio(dec("10"), dec("0")), dec("0"));
    assert_eq!(progress_ratio(dec("10"), dec("-1")), dec("0"));
}
