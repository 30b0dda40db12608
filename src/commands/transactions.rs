// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Context, Result, bail};
use chrono::Local;
use rusqlite::Connection;

use crate::models::{Currency, EntryKind, Transaction};
use crate::qr;
use crate::store::{self, TransactionQuery};
use crate::utils::{
    maybe_print_json, parse_amount, parse_date, parse_period, pretty_table, require_title,
};
use crate::{categories, session};

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => add(conn, sub),
        Some(("list", sub)) => list(conn, sub),
        Some(("rm", sub)) => rm(conn, sub),
        Some(("scan", sub)) => scan(conn, sub),
        _ => Ok(()),
    }
}

fn add(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let user = session::require(conn)?;
    let amount = parse_amount(sub.get_one::<String>("amount").unwrap())?;
    let category = require_title(sub.get_one::<String>("category").unwrap())?;
    let kind: EntryKind = sub.get_one::<String>("kind").unwrap().parse()?;
    let currency = match sub.get_one::<String>("currency") {
        Some(code) => code.parse::<Currency>()?,
        None => session::default_currency(conn)?,
    };
    let date = match sub.get_one::<String>("date") {
        Some(raw) => parse_date(raw)?,
        None => Local::now().date_naive(),
    };
    let title = match sub.get_one::<String>("title") {
        Some(raw) => require_title(raw)?,
        None => category.clone(),
    };
    let comment = sub.get_one::<String>("comment").map(|s| s.to_string());

    let tx = Transaction {
        id: 0,
        title,
        amount,
        date,
        category: category.clone(),
        kind,
        currency,
        user_id: user.user_id.clone(),
        comment,
    };
    let id = store::insert_transaction(conn, &user, &tx)?;
    println!(
        "Recorded {} {} {} in '{}' on {} (id: {})",
        kind, amount, currency, category, date, id
    );
    Ok(())
}

pub fn query_from_args(sub: &clap::ArgMatches) -> Result<TransactionQuery> {
    let mut query = TransactionQuery::default();
    if let Some(kind) = sub.get_one::<String>("kind") {
        query.kind = Some(kind.parse()?);
    }
    if let Some(currency) = sub.get_one::<String>("currency") {
        query.currency = Some(currency.parse()?);
    }
    let period = parse_period(
        sub.get_one::<String>("period").map(|s| s.as_str()),
        sub.get_one::<String>("from").map(|s| s.as_str()),
        sub.get_one::<String>("to").map(|s| s.as_str()),
    )?;
    if let Some((from, to)) = period.bounds(Local::now().date_naive()) {
        query.from = Some(from);
        query.to = Some(to);
    }
    query.limit = sub.get_one::<usize>("limit").copied();
    Ok(query)
}

fn list(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let user = session::require(conn)?;
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let query = query_from_args(sub)?;
    let data = store::transactions(conn, &user, &query)?;
    if !maybe_print_json(json_flag, jsonl_flag, &data)? {
        let rows: Vec<Vec<String>> = data
            .iter()
            .map(|t| {
                vec![
                    t.id.to_string(),
                    t.date.to_string(),
                    t.title.clone(),
                    t.category.clone(),
                    t.kind.to_string(),
                    format!("{:.2}", t.amount),
                    t.currency.to_string(),
                    t.comment.clone().unwrap_or_default(),
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(
                &["ID", "Date", "Title", "Category", "Kind", "Amount", "CCY", "Comment"],
                rows,
            )
        );
    }
    Ok(())
}

fn rm(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let user = session::require(conn)?;
    let id = *sub.get_one::<i64>("id").unwrap();
    if !store::delete_transaction(conn, &user, id)? {
        bail!("Transaction {} not found", id);
    }
    println!("Removed transaction {}", id);
    Ok(())
}

/// Scanned QR payloads always land as a USD expense under "Другое".
fn scan(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let user = session::require(conn)?;
    let text = match sub.get_one::<String>("file") {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("Read QR payload from {}", path))?,
        None => sub
            .get_one::<String>("payload")
            .context("Provide a payload argument or --file")?
            .to_string(),
    };

    let payload = qr::parse_payload(&text).context("Discarded QR payload")?;
    let tx = Transaction {
        id: 0,
        title: "QR".to_string(),
        amount: payload.amount,
        date: Local::now().date_naive(),
        category: categories::OTHER.to_string(),
        kind: EntryKind::Expense,
        currency: Currency::Usd,
        user_id: user.user_id.clone(),
        comment: payload.comment,
    };
    let id = store::insert_transaction(conn, &user, &tx)?;
    println!("Recorded QR expense {} USD (id: {})", payload.amount, id);
    Ok(())
}
