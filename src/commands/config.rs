// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;
use rusqlite::Connection;

use crate::models::Currency;
use crate::session;

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("theme", sub)) => theme(conn, sub),
        Some(("currency", sub)) => currency(conn, sub),
        _ => Ok(()),
    }
}

fn theme(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    match sub.get_one::<String>("value") {
        Some(value) => {
            session::set_theme(conn, value)?;
            println!("Theme set to {}", value);
        }
        None => println!("{}", session::theme(conn)?),
    }
    Ok(())
}

fn currency(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    match sub.get_one::<String>("code") {
        Some(code) => {
            let parsed: Currency = code.parse()?;
            session::set_default_currency(conn, parsed)?;
            println!("Default currency set to {}", parsed);
        }
        None => println!("{}", session::default_currency(conn)?),
    }
    Ok(())
}
