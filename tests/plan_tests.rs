// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::NaiveDate;
use rusqlite::Connection;
use rust_decimal::Decimal;

use moneta::models::{Currency, PlannedExpense};
use moneta::session::Session;
use moneta::{db, notify, session, store};

fn setup() -> (Connection, Session) {
    let mut conn = Connection::open_in_memory().unwrap();
    db::init_schema(&mut conn).unwrap();
    let user = session::sign_in(&conn, "u1").unwrap();
    (conn, user)
}

fn plan(user: &Session, day: &str) -> PlannedExpense {
    PlannedExpense {
        id: 0,
        title: "Аренда".to_string(),
        category_title: "Дом".to_string(),
        amount: Decimal::from(800),
        reminder_date: NaiveDate::parse_from_str(day, "%Y-%m-%d").unwrap(),
        user_id: user.user_id.clone(),
        date_created: NaiveDate::from_ymd_opt(2026, 8, 1).unwrap(),
        currency: Currency::Usd,
        comment: None,
    }
}

#[test]
fn schedule_uses_the_reminder_day_of_month() {
    let (conn, user) = setup();
    let mut p = plan(&user, "2026-09-15");
    p.id = store::insert_plan(&conn, &user, &p).unwrap();
    notify::schedule_monthly(&conn, &p);

    let due = notify::due_on_day(&conn, 15).unwrap();
    assert_eq!(due.len(), 1);
    assert_eq!(due[0].plan_id, p.id);
    assert_eq!(due[0].hour, 9);
    assert_eq!(due[0].minute, 0);
    assert!(due[0].body.contains("Аренда"));
    assert!(notify::due_on_day(&conn, 16).unwrap().is_empty());
}

#[test]
fn rescheduling_replaces_the_prior_reminder() {
    let (conn, user) = setup();
    let mut p = plan(&user, "2026-09-15");
    p.id = store::insert_plan(&conn, &user, &p).unwrap();
    notify::schedule_monthly(&conn, &p);

    p.reminder_date = NaiveDate::parse_from_str("2026-10-03", "%Y-%m-%d").unwrap();
    notify::schedule_monthly(&conn, &p);

    assert!(notify::due_on_day(&conn, 15).unwrap().is_empty());
    let due = notify::due_on_day(&conn, 3).unwrap();
    assert_eq!(due.len(), 1);

    let count: i64 = conn
        .query_row("SELECT COUNT(*) FROM reminders", [], |r| r.get(0))
        .unwrap();
    assert_eq!(count, 1);
}

#[test]
fn removing_a_plan_clears_its_reminder() {
    let (conn, user) = setup();
    let mut p = plan(&user, "2026-09-15");
    p.id = store::insert_plan(&conn, &user, &p).unwrap();
    notify::schedule_monthly(&conn, &p);

    notify::remove(&conn, p.id);
    assert!(store::delete_plan(&conn, &user, p.id).unwrap());
    assert!(notify::due_on_day(&conn, 15).unwrap().is_empty());
    assert!(store::plans(&conn, &user).unwrap().is_empty());
}

#[test]
fn plans_list_orders_by_reminder_date() {
    let (conn, user) = setup();
    for day in ["2026-09-20", "2026-09-05", "2026-09-12"] {
        let p = plan(&user, day);
        store::insert_plan(&conn, &user, &p).unwrap();
    }
    let plans = store::plans(&conn, &user).unwrap();
    let days: Vec<String> = plans.iter().map(|p| p.reminder_date.to_string()).collect();
    assert_eq!(days, ["2026-09-05", "2026-09-12", "2026-09-20"]);
}
