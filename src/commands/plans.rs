// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Result, bail};
use chrono::{Datelike, Local};
use rusqlite::Connection;

use crate::models::{Currency, PlannedExpense};
use crate::store;
use crate::utils::{maybe_print_json, parse_amount, parse_date, pretty_table, require_title};
use crate::{notify, session};

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => add(conn, sub),
        Some(("list", sub)) => list(conn, sub),
        Some(("rm", sub)) => rm(conn, sub),
        Some(("due", sub)) => due(conn, sub),
        _ => Ok(()),
    }
}

fn add(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let user = session::require(conn)?;
    let title = require_title(sub.get_one::<String>("title").unwrap())?;
    let category_title = require_title(sub.get_one::<String>("category").unwrap())?;
    let amount = parse_amount(sub.get_one::<String>("amount").unwrap())?;
    let reminder_date = parse_date(sub.get_one::<String>("date").unwrap())?;
    let currency = match sub.get_one::<String>("currency") {
        Some(code) => code.parse::<Currency>()?,
        None => session::default_currency(conn)?,
    };
    let comment = sub.get_one::<String>("comment").map(|s| s.to_string());

    let mut plan = PlannedExpense {
        id: 0,
        title: title.clone(),
        category_title,
        amount,
        reminder_date,
        user_id: user.user_id.clone(),
        date_created: Local::now().date_naive(),
        currency,
        comment,
    };
    plan.id = store::insert_plan(conn, &user, &plan)?;
    notify::schedule_monthly(conn, &plan);
    println!(
        "Planned '{}' for {} {}, reminding monthly on day {} (id: {})",
        title,
        amount,
        currency,
        reminder_date.day(),
        plan.id
    );
    Ok(())
}

fn list(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let user = session::require(conn)?;
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let data = store::plans(conn, &user)?;
    if !maybe_print_json(json_flag, jsonl_flag, &data)? {
        let rows: Vec<Vec<String>> = data
            .iter()
            .map(|p| {
                vec![
                    p.id.to_string(),
                    p.title.clone(),
                    p.category_title.clone(),
                    format!("{:.2}", p.amount),
                    p.currency.to_string(),
                    p.reminder_date.to_string(),
                    p.comment.clone().unwrap_or_default(),
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(
                &["ID", "Title", "Category", "Amount", "CCY", "Reminder", "Comment"],
                rows,
            )
        );
    }
    Ok(())
}

fn rm(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let user = session::require(conn)?;
    let id = *sub.get_one::<i64>("id").unwrap();
    notify::remove(conn, id);
    if !store::delete_plan(conn, &user, id)? {
        bail!("Planned expense {} not found", id);
    }
    println!("Removed planned expense {}", id);
    Ok(())
}

fn due(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let day = sub
        .get_one::<u32>("day")
        .copied()
        .unwrap_or_else(|| Local::now().day());
    let data = notify::due_on_day(conn, day)?;
    if data.is_empty() {
        println!("No reminders on day {}", day);
        return Ok(());
    }
    let rows: Vec<Vec<String>> = data
        .iter()
        .map(|r| {
            vec![
                r.plan_id.to_string(),
                format!("{:02}:{:02}", r.hour, r.minute),
                r.body.clone(),
            ]
        })
        .collect();
    println!("{}", pretty_table(&["Plan", "Time", "Reminder"], rows));
    Ok(())
}
