// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Context, Result, bail};
use chrono::NaiveDate;
use comfy_table::{Cell, Table, presets::UTF8_FULL};
use rust_decimal::Decimal;

use crate::analytics::Period;
use crate::models::EntryKind;

pub fn parse_date(s: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .with_context(|| format!("Invalid date '{}', expected YYYY-MM-DD", s))
}

pub fn parse_decimal(s: &str) -> Result<Decimal> {
    // Forms show amounts with a space grouping separator; accept it back.
    s.replace(' ', "")
        .parse::<Decimal>()
        .with_context(|| format!("Invalid decimal '{}'", s))
}

/// User-entered amounts must be strictly positive.
pub fn parse_amount(s: &str) -> Result<Decimal> {
    let amount = parse_decimal(s)?;
    if amount <= Decimal::ZERO {
        bail!("Amount must be greater than zero, got '{}'", s);
    }
    Ok(amount)
}

pub fn require_title(s: &str) -> Result<String> {
    let trimmed = s.trim();
    if trimmed.is_empty() {
        bail!("Title must not be empty");
    }
    Ok(trimmed.to_string())
}

/// An explicit `--from`/`--to` pair wins over a named period; no flags
/// at all means all time.
pub fn parse_period(
    period: Option<&str>,
    from: Option<&str>,
    to: Option<&str>,
) -> Result<Period> {
    if let (Some(from), Some(to)) = (from, to) {
        let start = parse_date(from)?;
        let end = parse_date(to)?;
        if end < start {
            bail!("Invalid range: {} is after {}", from, to);
        }
        return Ok(Period::Custom { start, end });
    }
    match period.unwrap_or("all") {
        "1m" => Ok(Period::OneMonth),
        "3m" => Ok(Period::ThreeMonths),
        "6m" => Ok(Period::SixMonths),
        "1y" => Ok(Period::OneYear),
        "all" => Ok(Period::AllTime),
        other => bail!("Invalid period '{}', expected 1m, 3m, 6m, 1y or all", other),
    }
}

/// Maps the `--op` flag of the apply commands onto the ledger kind:
/// add records as income, subtract as expense.
pub fn parse_op(s: &str) -> Result<EntryKind> {
    match s.trim().to_lowercase().as_str() {
        "add" => Ok(EntryKind::Income),
        "subtract" | "sub" => Ok(EntryKind::Expense),
        other => bail!("Invalid op '{}', expected add or subtract", other),
    }
}

pub fn fmt_money(d: &Decimal, ccy: &str) -> String {
    format!("{} {}", d.round_dp(2), ccy)
}

pub fn pretty_table(headers: &[&str], rows: Vec<Vec<String>>) -> Table {
    let mut t = Table::new();
    t.load_preset(UTF8_FULL);
    t.set_header(headers.iter().map(|h| Cell::new(*h)));
    for r in rows {
        t.add_row(r.into_iter().map(Cell::new));
    }
    t
}

pub fn maybe_print_json<T: serde::Serialize>(
    json_flag: bool,
    jsonl_flag: bool,
    v: &T,
) -> Result<bool> {
    if json_flag {
        println!("{}", serde_json::to_string_pretty(v)?);
        return Ok(true);
    }
    if jsonl_flag {
        // If v is an array, stream each element; else stream single line
        let val = serde_json::to_value(v)?;
        if let Some(arr) = val.as_array() {
            for item in arr {
                println!("{}", serde_json::to_string(item)?);
            }
        } else {
            println!("{}", serde_json::to_string(&val)?);
        }
        return Ok(true);
    }
    Ok(false)
}
