// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;
use chrono::Local;
use rusqlite::Connection;

use crate::models::UserProfile;
use crate::utils::require_title;
use crate::{session, store};

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("signup", sub)) => signup(conn, sub),
        Some(("signin", sub)) => signin(conn, sub),
        Some(("signout", _)) => signout(conn),
        Some(("show", _)) => show(conn),
        _ => Ok(()),
    }
}

fn signup(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let user_id = require_title(sub.get_one::<String>("user").unwrap())?;
    let email = require_title(sub.get_one::<String>("email").unwrap())?;
    let username = match sub.get_one::<String>("name") {
        Some(name) => require_title(name)?,
        None => user_id.clone(),
    };

    let profile = UserProfile {
        id: 0,
        user_id: user_id.clone(),
        username,
        email,
        created_at: Local::now().date_naive(),
    };
    store::upsert_profile(conn, &profile)?;
    session::sign_in(conn, &user_id)?;
    println!("Created profile and signed in as '{}'", user_id);
    Ok(())
}

fn signin(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let user_id = require_title(sub.get_one::<String>("user").unwrap())?;
    session::sign_in(conn, &user_id)?;
    match store::profile(conn, &user_id)? {
        Some(profile) => println!("Signed in as '{}' ({})", profile.user_id, profile.email),
        None => println!("Signed in as '{}' (no profile on record)", user_id),
    }
    Ok(())
}

fn signout(conn: &Connection) -> Result<()> {
    session::sign_out(conn)?;
    println!("Signed out");
    Ok(())
}

fn show(conn: &Connection) -> Result<()> {
    let Some(user) = session::current(conn)? else {
        println!("No user signed in");
        return Ok(());
    };
    match store::profile(conn, &user.user_id)? {
        Some(p) => {
            println!("User:    {}", p.user_id);
            println!("Name:    {}", p.username);
            println!("Email:   {}", p.email);
            println!("Since:   {}", p.created_at);
        }
        None => println!("Signed in as '{}' (no profile on record)", user.user_id),
    }
    Ok(())
}
