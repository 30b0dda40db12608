// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Result, bail};
use chrono::Local;
use rusqlite::Connection;
use rust_decimal::Decimal;

use crate::analytics::progress_ratio;
use crate::models::{Credit, CreditKind, Currency};
use crate::store;
use crate::utils::{
    maybe_print_json, parse_amount, parse_decimal, parse_op, pretty_table, require_title,
};
use crate::session;

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => add(conn, sub),
        Some(("list", sub)) => list(conn, sub),
        Some(("apply", sub)) => apply(conn, sub),
        Some(("rm", sub)) => rm(conn, sub),
        _ => Ok(()),
    }
}

fn add(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let user = session::require(conn)?;
    let title = require_title(sub.get_one::<String>("title").unwrap())?;
    let category_title = require_title(sub.get_one::<String>("category").unwrap())?;
    let total_amount = parse_amount(sub.get_one::<String>("total").unwrap())?;
    let paid_amount = match sub.get_one::<String>("paid") {
        Some(raw) => {
            let paid = parse_decimal(raw)?;
            if paid < Decimal::ZERO {
                bail!("Paid amount must not be negative, got '{}'", raw);
            }
            paid
        }
        None => Decimal::ZERO,
    };
    let kind: CreditKind = sub.get_one::<String>("kind").unwrap().parse()?;
    let currency = sub
        .get_one::<String>("currency")
        .map(|c| c.parse::<Currency>())
        .transpose()?;
    let comment = sub.get_one::<String>("comment").map(|s| s.to_string());

    let credit = Credit {
        id: 0,
        title: title.clone(),
        category_title,
        total_amount,
        paid_amount,
        date_created: Local::now().date_naive(),
        user_id: user.user_id.clone(),
        currency,
        comment,
        kind,
    };
    let id = store::insert_credit(conn, &user, &credit)?;
    println!("Added {} '{}' for {} (id: {})", kind, title, total_amount, id);
    Ok(())
}

fn list(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let user = session::require(conn)?;
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let filter = sub.get_one::<String>("filter").unwrap().to_lowercase();

    let all = store::credits(conn, &user)?;
    // Open credits/loans hide once fully paid; they move to 'completed'.
    let data: Vec<Credit> = match filter.as_str() {
        "all" => all,
        "credits" => all
            .into_iter()
            .filter(|c| c.kind == CreditKind::Credit && c.paid_amount < c.total_amount)
            .collect(),
        "loans" => all
            .into_iter()
            .filter(|c| c.kind == CreditKind::Loan && c.paid_amount < c.total_amount)
            .collect(),
        "completed" => all.into_iter().filter(Credit::is_completed).collect(),
        other => bail!(
            "Invalid filter '{}', expected all, credits, loans or completed",
            other
        ),
    };

    if !maybe_print_json(json_flag, jsonl_flag, &data)? {
        let rows: Vec<Vec<String>> = data
            .iter()
            .map(|c| {
                let progress = progress_ratio(c.paid_amount, c.total_amount) * Decimal::ONE_HUNDRED;
                vec![
                    c.id.to_string(),
                    c.title.clone(),
                    c.category_title.clone(),
                    c.kind.to_string(),
                    format!("{:.2}", c.paid_amount),
                    format!("{:.2}", c.total_amount),
                    c.currency.map(|c| c.to_string()).unwrap_or_default(),
                    format!("{:.1}%", progress),
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(
                &["ID", "Title", "Category", "Kind", "Paid", "Total", "CCY", "Progress"],
                rows,
            )
        );
    }
    Ok(())
}

fn apply(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let user = session::require(conn)?;
    let id = *sub.get_one::<i64>("id").unwrap();
    let kind = parse_op(sub.get_one::<String>("op").unwrap())?;
    let delta = parse_amount(sub.get_one::<String>("amount").unwrap())?;

    let updated = store::apply_credit_change(conn, &user, id, kind, delta)?;
    println!(
        "Credit {}: paid {:.2} / {:.2}{}",
        id,
        updated.paid_amount,
        updated.total_amount,
        if updated.is_completed() { " (completed)" } else { "" }
    );
    Ok(())
}

fn rm(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let user = session::require(conn)?;
    let id = *sub.get_one::<i64>("id").unwrap();
    if !store::delete_credit(conn, &user, id)? {
        bail!("Credit {} not found", id);
    }
    println!("Removed credit {}", id);
    Ok(())
}
