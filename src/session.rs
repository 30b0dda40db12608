// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Result, anyhow};
use rusqlite::{Connection, OptionalExtension, params};

use crate::models::Currency;

/// The signed-in user. Every store call takes one explicitly; nothing
/// reads the user id from ambient state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub user_id: String,
}

impl Session {
    pub fn new(user_id: impl Into<String>) -> Self {
        Session {
            user_id: user_id.into(),
        }
    }
}

pub const THEMES: [&str; 3] = ["system", "light", "dark"];

pub fn get_setting(conn: &Connection, key: &str) -> Result<Option<String>> {
    let v: Option<String> = conn
        .query_row("SELECT value FROM settings WHERE key=?1", params![key], |r| {
            r.get(0)
        })
        .optional()?;
    Ok(v)
}

pub fn set_setting(conn: &Connection, key: &str, value: &str) -> Result<()> {
    conn.execute(
        "INSERT INTO settings(key, value) VALUES(?1, ?2)
         ON CONFLICT(key) DO UPDATE SET value=excluded.value",
        params![key, value],
    )?;
    Ok(())
}

pub fn current(conn: &Connection) -> Result<Option<Session>> {
    Ok(get_setting(conn, "user_id")?.map(Session::new))
}

pub fn require(conn: &Connection) -> Result<Session> {
    current(conn)?.ok_or_else(|| {
        anyhow!("No user is signed in. Run 'moneta profile signin <user>' first.")
    })
}

pub fn sign_in(conn: &Connection, user_id: &str) -> Result<Session> {
    set_setting(conn, "user_id", user_id)?;
    Ok(Session::new(user_id))
}

pub fn sign_out(conn: &Connection) -> Result<()> {
    conn.execute("DELETE FROM settings WHERE key='user_id'", [])?;
    Ok(())
}

pub fn default_currency(conn: &Connection) -> Result<Currency> {
    match get_setting(conn, "default_currency")? {
        Some(code) => Ok(code.parse()?),
        None => Ok(Currency::Usd),
    }
}

pub fn set_default_currency(conn: &Connection, currency: Currency) -> Result<()> {
    set_setting(conn, "default_currency", currency.code())
}

pub fn theme(conn: &Connection) -> Result<String> {
    Ok(get_setting(conn, "selected_theme")?.unwrap_or_else(|| "system".to_string()))
}

pub fn set_theme(conn: &Connection, value: &str) -> Result<()> {
    if !THEMES.contains(&value) {
        return Err(anyhow!(
            "Unknown theme '{}', expected one of: {}",
            value,
            THEMES.join(", ")
        ));
    }
    set_setting(conn, "selected_theme", value)
}
