// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::NaiveDate;
use rusqlite::Connection;
use rust_decimal::Decimal;

use moneta::analytics::progress_ratio;
use moneta::models::{Credit, CreditKind, EntryKind, Goal};
use moneta::session::Session;
use moneta::store;
use moneta::{db, session};

fn setup() -> (Connection, Session) {
    let mut conn = Connection::open_in_memory().unwrap();
    db::init_schema(&mut conn).unwrap();
    let user = session::sign_in(&conn, "u1").unwrap();
    (conn, user)
}

fn add_credit(conn: &Connection, user: &Session, total: &str, paid: &str) -> i64 {
    let credit = Credit {
        id: 0,
        title: "Ипотека".to_string(),
        category_title: "Банк".to_string(),
        total_amount: total.parse().unwrap(),
        paid_amount: paid.parse().unwrap(),
        date_created: NaiveDate::from_ymd_opt(2026, 8, 1).unwrap(),
        user_id: user.user_id.clone(),
        currency: None,
        comment: None,
        kind: CreditKind::Credit,
    };
    store::insert_credit(conn, user, &credit).unwrap()
}

fn add_goal(conn: &Connection, user: &Session, target: &str, current: &str) -> i64 {
    let goal = Goal {
        id: 0,
        title: "Отпуск".to_string(),
        category_title: "Путешествие".to_string(),
        target_amount: target.parse().unwrap(),
        current_amount: current.parse().unwrap(),
        date_created: NaiveDate::from_ymd_opt(2026, 8, 1).unwrap(),
        user_id: user.user_id.clone(),
        currency: None,
        comment: None,
    };
    store::insert_goal(conn, user, &goal).unwrap()
}

#[test]
fn credit_completion_boundary_is_exact() {
    let (conn, user) = setup();
    let done = add_credit(&conn, &user, "500", "500");
    let almost = add_credit(&conn, &user, "500", "499.99");

    let credits = store::credits(&conn, &user).unwrap();
    let completed: Vec<i64> = credits
        .iter()
        .filter(|c| c.is_completed())
        .map(|c| c.id)
        .collect();
    assert_eq!(completed, vec![done]);
    assert!(!credits.iter().find(|c| c.id == almost).unwrap().is_completed());
}

#[test]
fn zero_total_credit_never_completes() {
    let credit = Credit {
        id: 0,
        title: "X".to_string(),
        category_title: "Банк".to_string(),
        total_amount: Decimal::ZERO,
        paid_amount: Decimal::ZERO,
        date_created: NaiveDate::from_ymd_opt(2026, 8, 1).unwrap(),
        user_id: "u1".to_string(),
        currency: None,
        comment: None,
        kind: CreditKind::Loan,
    };
    assert!(!credit.is_completed());
}

#[test]
fn credit_can_be_overpaid_but_not_negative() {
    let (conn, user) = setup();
    let id = add_credit(&conn, &user, "100", "90");

    // No upper clamp: overpayment sticks.
    let updated =
        store::apply_credit_change(&conn, &user, id, EntryKind::Income, Decimal::from(30)).unwrap();
    assert_eq!(updated.paid_amount, Decimal::from(120));
    assert!(updated.is_completed());

    // Lower clamp at zero.
    let updated =
        store::apply_credit_change(&conn, &user, id, EntryKind::Expense, Decimal::from(500))
            .unwrap();
    assert_eq!(updated.paid_amount, Decimal::ZERO);
}

#[test]
fn goal_progress_clamps_after_large_subtraction() {
    let (conn, user) = setup();
    let id = add_goal(&conn, &user, "1000", "250");

    let goal = store::goal(&conn, &user, id).unwrap();
    assert_eq!(
        progress_ratio(goal.current_amount, goal.target_amount),
        "0.25".parse::<Decimal>().unwrap()
    );

    let updated =
        store::apply_goal_change(&conn, &user, id, EntryKind::Expense, Decimal::from(300)).unwrap();
    assert_eq!(updated.current_amount, Decimal::ZERO);
    assert_eq!(
        progress_ratio(updated.current_amount, updated.target_amount),
        Decimal::ZERO
    );
}

#[test]
fn goal_keeps_savings_above_target() {
    let (conn, user) = setup();
    let id = add_goal(&conn, &user, "1000", "900");
    let updated =
        store::apply_goal_change(&conn, &user, id, EntryKind::Income, Decimal::from(200)).unwrap();
    assert_eq!(updated.current_amount, Decimal::from(1100));
    // Display still caps at 100%.
    assert_eq!(
        progress_ratio(updated.current_amount, updated.target_amount),
        Decimal::ONE
    );
}

#[test]
fn deletes_are_user_scoped() {
    let (conn, user) = setup();
    let credit_id = add_credit(&conn, &user, "100", "0");
    let goal_id = add_goal(&conn, &user, "100", "0");

    let stranger = Session::new("u2");
    assert!(!store::delete_credit(&conn, &stranger, credit_id).unwrap());
    assert!(!store::delete_goal(&conn, &stranger, goal_id).unwrap());
    assert!(store::delete_credit(&conn, &user, credit_id).unwrap());
    assert!(store::delete_goal(&conn, &user, goal_id).unwrap());
}
