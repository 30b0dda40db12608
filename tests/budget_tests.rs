// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::NaiveDate;
use rusqlite::Connection;
use rust_decimal::Decimal;

use moneta::models::{Budget, Currency, EntryKind};
use moneta::session::Session;
use moneta::store;
use moneta::{db, session};

fn setup() -> (Connection, Session) {
    let mut conn = Connection::open_in_memory().unwrap();
    db::init_schema(&mut conn).unwrap();
    let user = session::sign_in(&conn, "u1").unwrap();
    (conn, user)
}

fn date(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
}

fn add_budget(conn: &Connection, user: &Session, amount: &str) -> i64 {
    let budget = Budget {
        id: 0,
        category_title: "Наличка".to_string(),
        kind: EntryKind::Income,
        amount: amount.parse().unwrap(),
        currency: Currency::Uzs,
        date: date("2026-08-01"),
        user_id: user.user_id.clone(),
    };
    store::insert_budget(conn, user, &budget).unwrap()
}

#[test]
fn apply_adds_and_appends_history() {
    let (mut conn, user) = setup();
    let id = add_budget(&conn, &user, "100");

    let updated = store::apply_budget_change(
        &mut conn,
        &user,
        id,
        EntryKind::Income,
        Decimal::from(40),
        date("2026-08-05"),
    )
    .unwrap();
    assert_eq!(updated.amount, Decimal::from(140));
    assert_eq!(updated.date, date("2026-08-05"));

    let history = store::budget_history(&conn, &user, id).unwrap();
    assert_eq!(history.len(), 1);
    assert_eq!(history[0].kind, EntryKind::Income);
    assert_eq!(history[0].amount, Decimal::from(40));
}

#[test]
fn subtract_clamps_the_balance_at_zero() {
    let (mut conn, user) = setup();
    let id = add_budget(&conn, &user, "30");

    let updated = store::apply_budget_change(
        &mut conn,
        &user,
        id,
        EntryKind::Expense,
        Decimal::from(50),
        date("2026-08-05"),
    )
    .unwrap();
    assert_eq!(updated.amount, Decimal::ZERO);

    // The ledger keeps the requested delta, not the clamped result.
    let history = store::budget_history(&conn, &user, id).unwrap();
    assert_eq!(history[0].amount, Decimal::from(50));
    assert_eq!(history[0].kind, EntryKind::Expense);
}

#[test]
fn history_is_newest_first() {
    let (mut conn, user) = setup();
    let id = add_budget(&conn, &user, "10");
    for (day, delta) in [("2026-08-02", 1), ("2026-08-04", 2), ("2026-08-03", 3)] {
        store::apply_budget_change(
            &mut conn,
            &user,
            id,
            EntryKind::Income,
            Decimal::from(delta),
            date(day),
        )
        .unwrap();
    }
    let history = store::budget_history(&conn, &user, id).unwrap();
    let days: Vec<String> = history.iter().map(|h| h.date.to_string()).collect();
    assert_eq!(days, ["2026-08-04", "2026-08-03", "2026-08-02"]);
}

#[test]
fn apply_rejects_unknown_or_foreign_budgets() {
    let (mut conn, user) = setup();
    let id = add_budget(&conn, &user, "10");

    let err = store::apply_budget_change(
        &mut conn,
        &user,
        id + 1,
        EntryKind::Income,
        Decimal::ONE,
        date("2026-08-05"),
    )
    .unwrap_err();
    assert!(err.to_string().contains("not found"));

    let stranger = Session::new("u2");
    assert!(
        store::apply_budget_change(
            &mut conn,
            &stranger,
            id,
            EntryKind::Income,
            Decimal::ONE,
            date("2026-08-05"),
        )
        .is_err()
    );
    // And the real owner's balance is untouched.
    assert_eq!(
        store::budget(&conn, &user, id).unwrap().amount,
        Decimal::from(10)
    );
}
