// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Result, bail};
use chrono::Local;
use rusqlite::Connection;

use crate::models::{Budget, Currency, EntryKind};
use crate::store;
use crate::utils::{maybe_print_json, parse_amount, parse_op, pretty_table, require_title};
use crate::{session, utils};

pub fn handle(conn: &mut Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => add(conn, sub),
        Some(("list", sub)) => list(conn, sub),
        Some(("apply", sub)) => apply(conn, sub),
        Some(("history", sub)) => history(conn, sub),
        Some(("rm", sub)) => rm(conn, sub),
        _ => Ok(()),
    }
}

fn add(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let user = session::require(conn)?;
    let category_title = require_title(sub.get_one::<String>("category").unwrap())?;
    let amount = parse_amount(sub.get_one::<String>("amount").unwrap())?;
    let kind: EntryKind = sub.get_one::<String>("kind").unwrap().parse()?;
    let currency = match sub.get_one::<String>("currency") {
        Some(code) => code.parse::<Currency>()?,
        None => session::default_currency(conn)?,
    };

    let budget = Budget {
        id: 0,
        category_title: category_title.clone(),
        kind,
        amount,
        currency,
        date: Local::now().date_naive(),
        user_id: user.user_id.clone(),
    };
    let id = store::insert_budget(conn, &user, &budget)?;
    println!(
        "Added budget '{}' with {} (id: {})",
        category_title,
        utils::fmt_money(&amount, currency.code()),
        id
    );
    Ok(())
}

fn list(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let user = session::require(conn)?;
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let data = store::budgets(conn, &user)?;
    if !maybe_print_json(json_flag, jsonl_flag, &data)? {
        let rows: Vec<Vec<String>> = data
            .iter()
            .map(|b| {
                vec![
                    b.id.to_string(),
                    b.category_title.clone(),
                    format!("{:.2}", b.amount),
                    b.currency.to_string(),
                    b.date.to_string(),
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(&["ID", "Account", "Amount", "CCY", "Updated"], rows)
        );
    }
    Ok(())
}

fn apply(conn: &mut Connection, sub: &clap::ArgMatches) -> Result<()> {
    let user = session::require(conn)?;
    let id = *sub.get_one::<i64>("id").unwrap();
    let kind = parse_op(sub.get_one::<String>("op").unwrap())?;
    let delta = parse_amount(sub.get_one::<String>("amount").unwrap())?;
    let today = Local::now().date_naive();

    let updated = store::apply_budget_change(conn, &user, id, kind, delta, today)?;
    println!(
        "Budget {} is now {}",
        id,
        utils::fmt_money(&updated.amount, updated.currency.code())
    );
    Ok(())
}

fn history(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let user = session::require(conn)?;
    let id = *sub.get_one::<i64>("id").unwrap();
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    // Resolves the budget first so an unknown id errors instead of
    // printing an empty ledger.
    let budget = store::budget(conn, &user, id)?;
    let data = store::budget_history(conn, &user, id)?;
    if !maybe_print_json(json_flag, jsonl_flag, &data)? {
        let rows: Vec<Vec<String>> = data
            .iter()
            .map(|h| {
                let sign = match h.kind {
                    EntryKind::Income => "+",
                    EntryKind::Expense => "-",
                };
                vec![
                    h.date.to_string(),
                    sign.to_string(),
                    format!("{:.2}", h.amount),
                ]
            })
            .collect();
        println!("Budget '{}' adjustments:", budget.category_title);
        println!("{}", pretty_table(&["Date", "", "Amount"], rows));
    }
    Ok(())
}

fn rm(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let user = session::require(conn)?;
    let id = *sub.get_one::<i64>("id").unwrap();
    if !store::delete_budget(conn, &user, id)? {
        bail!("Budget {} not found", id);
    }
    println!("Removed budget {}", id);
    Ok(())
}
