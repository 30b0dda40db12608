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
use crate::models::{Currency, Goal};
use crate::session;
use crate::store;
use crate::utils::{
    maybe_print_json, parse_amount, parse_decimal, parse_op, pretty_table, require_title,
};

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
    let target_amount = parse_amount(sub.get_one::<String>("target").unwrap())?;
    let current_amount = match sub.get_one::<String>("current") {
        Some(raw) => {
            let current = parse_decimal(raw)?;
            if current < Decimal::ZERO {
                bail!("Saved amount must not be negative, got '{}'", raw);
            }
            current
        }
        None => Decimal::ZERO,
    };
    let currency = sub
        .get_one::<String>("currency")
        .map(|c| c.parse::<Currency>())
        .transpose()?;
    let comment = sub.get_one::<String>("comment").map(|s| s.to_string());

    let goal = Goal {
        id: 0,
        title: title.clone(),
        category_title,
        target_amount,
        current_amount,
        date_created: Local::now().date_naive(),
        user_id: user.user_id.clone(),
        currency,
        comment,
    };
    let id = store::insert_goal(conn, &user, &goal)?;
    println!("Added goal '{}' targeting {} (id: {})", title, target_amount, id);
    Ok(())
}

fn list(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let user = session::require(conn)?;
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let data = store::goals(conn, &user)?;
    if !maybe_print_json(json_flag, jsonl_flag, &data)? {
        let rows: Vec<Vec<String>> = data
            .iter()
            .map(|g| {
                let progress =
                    progress_ratio(g.current_amount, g.target_amount) * Decimal::ONE_HUNDRED;
                vec![
                    g.id.to_string(),
                    g.title.clone(),
                    g.category_title.clone(),
                    format!("{:.2}", g.current_amount),
                    format!("{:.2}", g.target_amount),
                    g.currency.map(|c| c.to_string()).unwrap_or_default(),
                    format!("{:.1}%", progress),
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(
                &["ID", "Title", "Category", "Saved", "Target", "CCY", "Progress"],
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

    let updated = store::apply_goal_change(conn, &user, id, kind, delta)?;
    println!(
        "Goal {}: saved {:.2} / {:.2}",
        id, updated.current_amount, updated.target_amount
    );
    Ok(())
}

fn rm(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let user = session::require(conn)?;
    let id = *sub.get_one::<i64>("id").unwrap();
    if !store::delete_goal(conn, &user, id)? {
        bail!("Goal {} not found", id);
    }
    println!("Removed goal {}", id);
    Ok(())
}
