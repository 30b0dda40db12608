// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::collections::BTreeMap;

use anyhow::{Result, bail};
use chrono::Local;
use rusqlite::Connection;
use rust_decimal::Decimal;
use serde::Serialize;

use crate::analytics::{
    self, SegmentMode, budget_totals, category_segments, currency_totals, filter_period,
    progress_ratio,
};
use crate::categories::{self, Taxonomy};
use crate::models::{Currency, EntryKind};
use crate::store::{self, TransactionQuery};
use crate::utils::{maybe_print_json, parse_period, pretty_table};
use crate::session;

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("totals", sub)) => totals(conn, sub),
        Some(("categories", sub)) => by_category(conn, sub),
        Some(("progress", sub)) => progress(conn, sub),
        _ => Ok(()),
    }
}

fn period_from_args(sub: &clap::ArgMatches) -> Result<analytics::Period> {
    parse_period(
        sub.get_one::<String>("period").map(|s| s.as_str()),
        sub.get_one::<String>("from").map(|s| s.as_str()),
        sub.get_one::<String>("to").map(|s| s.as_str()),
    )
}

#[derive(Serialize)]
struct TotalsRow {
    currency: Currency,
    income: Decimal,
    expense: Decimal,
    net: Decimal,
    budget: Decimal,
}

fn totals(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let user = session::require(conn)?;
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let period = period_from_args(sub)?;
    let today = Local::now().date_naive();

    let txs = store::transactions(conn, &user, &TransactionQuery::default())?;
    let txs = filter_period(&txs, period, today);
    let budgets = store::budgets(conn, &user)?;
    let budgets = filter_period(&budgets, period, today);

    let mut merged: BTreeMap<Currency, TotalsRow> = BTreeMap::new();
    for t in currency_totals(&txs) {
        merged.insert(
            t.currency,
            TotalsRow {
                currency: t.currency,
                income: t.income,
                expense: t.expense,
                net: t.net(),
                budget: Decimal::ZERO,
            },
        );
    }
    for (currency, amount) in budget_totals(&budgets) {
        merged
            .entry(currency)
            .or_insert(TotalsRow {
                currency,
                income: Decimal::ZERO,
                expense: Decimal::ZERO,
                net: Decimal::ZERO,
                budget: Decimal::ZERO,
            })
            .budget = amount;
    }
    let data: Vec<TotalsRow> = merged.into_values().collect();

    if !maybe_print_json(json_flag, jsonl_flag, &data)? {
        let rows: Vec<Vec<String>> = data
            .iter()
            .map(|r| {
                vec![
                    r.currency.to_string(),
                    format!("{:.2}", r.income),
                    format!("{:.2}", r.expense),
                    format!("{:.2}", r.net),
                    format!("{:.2}", r.budget),
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(&["CCY", "Income", "Expense", "Net", "Budget"], rows)
        );
    }
    Ok(())
}

fn by_category(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let user = session::require(conn)?;
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let kind: EntryKind = sub.get_one::<String>("kind").unwrap().parse()?;
    let mode = match sub.get_one::<String>("mode").unwrap().as_str() {
        "count" => SegmentMode::Count,
        "sum" => SegmentMode::Sum,
        other => bail!("Invalid mode '{}', expected count or sum", other),
    };
    let period = period_from_args(sub)?;
    let today = Local::now().date_naive();

    let txs = store::transactions(conn, &user, &TransactionQuery::default())?;
    let txs = filter_period(&txs, period, today);
    let segments = category_segments(&txs, kind, mode);

    if !maybe_print_json(json_flag, jsonl_flag, &segments)? {
        let taxonomy = match kind {
            EntryKind::Income => Taxonomy::Income,
            EntryKind::Expense => Taxonomy::Expense,
        };
        let rows: Vec<Vec<String>> = segments
            .iter()
            .map(|s| {
                let item = categories::lookup(taxonomy, &s.label);
                vec![
                    s.label.clone(),
                    item.icon.to_string(),
                    format!("{:.2}", s.value),
                    format!("{:.1}%", s.percentage),
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(&["Category", "Icon", "Value", "Share"], rows)
        );
    }
    Ok(())
}

#[derive(Serialize)]
struct ProgressRow {
    record: &'static str,
    id: i64,
    title: String,
    current: Decimal,
    total: Decimal,
    progress: Decimal,
    completed: bool,
}

fn progress(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let user = session::require(conn)?;
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");

    let mut data = Vec::new();
    for g in store::goals(conn, &user)? {
        data.push(ProgressRow {
            record: "goal",
            id: g.id,
            title: g.title,
            current: g.current_amount,
            total: g.target_amount,
            progress: progress_ratio(g.current_amount, g.target_amount),
            completed: g.target_amount > Decimal::ZERO && g.current_amount >= g.target_amount,
        });
    }
    for c in store::credits(conn, &user)? {
        let completed = c.is_completed();
        data.push(ProgressRow {
            record: "credit",
            id: c.id,
            title: c.title,
            current: c.paid_amount,
            total: c.total_amount,
            progress: progress_ratio(c.paid_amount, c.total_amount),
            completed,
        });
    }

    if !maybe_print_json(json_flag, jsonl_flag, &data)? {
        let rows: Vec<Vec<String>> = data
            .iter()
            .map(|r| {
                vec![
                    r.record.to_string(),
                    r.id.to_string(),
                    r.title.clone(),
                    format!("{:.2}", r.current),
                    format!("{:.2}", r.total),
                    format!("{:.1}%", r.progress * Decimal::ONE_HUNDRED),
                    if r.completed { "yes" } else { "no" }.to_string(),
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(
                &["Record", "ID", "Title", "Current", "Total", "Progress", "Completed"],
                rows,
            )
        );
    }
    Ok(())
}
