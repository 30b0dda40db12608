// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::NaiveDate;
use rusqlite::Connection;

use moneta::models::{Currency, UserProfile};
use moneta::{db, session, store};

fn setup() -> Connection {
    let mut conn = Connection::open_in_memory().unwrap();
    db::init_schema(&mut conn).unwrap();
    conn
}

#[test]
fn require_fails_until_signed_in() {
    let conn = setup();
    let err = session::require(&conn).unwrap_err();
    assert!(err.to_string().contains("signin"));

    session::sign_in(&conn, "u1").unwrap();
    assert_eq!(session::require(&conn).unwrap().user_id, "u1");

    session::sign_out(&conn).unwrap();
    assert!(session::require(&conn).is_err());
}

#[test]
fn default_currency_falls_back_to_usd() {
    let conn = setup();
    assert_eq!(session::default_currency(&conn).unwrap(), Currency::Usd);
    session::set_default_currency(&conn, Currency::Uzs).unwrap();
    assert_eq!(session::default_currency(&conn).unwrap(), Currency::Uzs);
}

#[test]
fn theme_accepts_only_known_values() {
    let conn = setup();
    assert_eq!(session::theme(&conn).unwrap(), "system");
    session::set_theme(&conn, "dark").unwrap();
    assert_eq!(session::theme(&conn).unwrap(), "dark");
    assert!(session::set_theme(&conn, "sepia").is_err());
}

#[test]
fn profile_roundtrip_and_update() {
    let conn = setup();
    let profile = UserProfile {
        id: 0,
        user_id: "u1".to_string(),
        username: "User One".to_string(),
        email: "one@example.com".to_string(),
        created_at: NaiveDate::from_ymd_opt(2026, 8, 1).unwrap(),
    };
    store::upsert_profile(&conn, &profile).unwrap();
    let fetched = store::profile(&conn, "u1").unwrap().unwrap();
    assert_eq!(fetched.email, "one@example.com");

    let mut changed = profile.clone();
    changed.email = "new@example.com".to_string();
    store::upsert_profile(&conn, &changed).unwrap();
    let fetched = store::profile(&conn, "u1").unwrap().unwrap();
    assert_eq!(fetched.email, "new@example.com");

    assert!(store::profile(&conn, "nobody").unwrap().is_none());
}

#[test]
fn schema_initializes_on_a_fresh_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("moneta.sqlite");
    let mut conn = Connection::open(&path).unwrap();
    db::init_schema(&mut conn).unwrap();
    // Twice is fine; everything is IF NOT EXISTS.
    db::init_schema(&mut conn).unwrap();
    session::sign_in(&conn, "u1").unwrap();
    assert!(path.exists());
}
