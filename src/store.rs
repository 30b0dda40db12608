// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Typed repository over SQLite. Every fetch and mutation takes the
//! session explicitly and only ever sees that user's rows.

use anyhow::{Context, Result};
use chrono::NaiveDate;
use rusqlite::{Connection, OptionalExtension, params};
use rust_decimal::Decimal;

use crate::models::{
    Budget, BudgetHistory, Credit, CreditKind, Currency, EntryKind, Goal, PlannedExpense,
    Transaction, UserProfile,
};
use crate::session::Session;

fn parse_stored_decimal(raw: &str, table: &str) -> Result<Decimal> {
    raw.parse::<Decimal>()
        .with_context(|| format!("Invalid amount '{}' in {}", raw, table))
}

fn parse_stored_currency(raw: &str, table: &str) -> Result<Currency> {
    raw.parse::<Currency>()
        .with_context(|| format!("Invalid currency '{}' in {}", raw, table))
}

fn parse_stored_kind(raw: &str, table: &str) -> Result<EntryKind> {
    raw.parse::<EntryKind>()
        .with_context(|| format!("Invalid kind '{}' in {}", raw, table))
}

// ---------------------------------------------------------------- transactions

/// Explicit query parameters instead of ad-hoc predicates.
#[derive(Debug, Default, Clone)]
pub struct TransactionQuery {
    pub kind: Option<EntryKind>,
    pub currency: Option<Currency>,
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
    pub limit: Option<usize>,
}

pub fn insert_transaction(conn: &Connection, session: &Session, tx: &Transaction) -> Result<i64> {
    conn.execute(
        "INSERT INTO transactions(title, amount, date, category, kind, currency, user_id, comment)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
        params![
            tx.title,
            tx.amount.to_string(),
            tx.date,
            tx.category,
            tx.kind.as_str(),
            tx.currency.code(),
            session.user_id,
            tx.comment
        ],
    )?;
    Ok(conn.last_insert_rowid())
}

pub fn transactions(
    conn: &Connection,
    session: &Session,
    query: &TransactionQuery,
) -> Result<Vec<Transaction>> {
    let mut sql = String::from(
        "SELECT id, title, amount, date, category, kind, currency, user_id, comment
         FROM transactions WHERE user_id=?",
    );
    let mut args: Vec<String> = vec![session.user_id.clone()];

    if let Some(kind) = query.kind {
        sql.push_str(" AND kind=?");
        args.push(kind.as_str().to_string());
    }
    if let Some(currency) = query.currency {
        sql.push_str(" AND currency=?");
        args.push(currency.code().to_string());
    }
    if let Some(from) = query.from {
        sql.push_str(" AND date>=?");
        args.push(from.to_string());
    }
    if let Some(to) = query.to {
        sql.push_str(" AND date<=?");
        args.push(to.to_string());
    }
    sql.push_str(" ORDER BY date DESC, id DESC");
    if let Some(limit) = query.limit {
        sql.push_str(" LIMIT ?");
        args.push(limit.to_string());
    }

    let mut stmt = conn.prepare(&sql)?;
    let mut rows = stmt.query(rusqlite::params_from_iter(args.iter()))?;
    let mut data = Vec::new();
    while let Some(r) = rows.next()? {
        let amount: String = r.get(2)?;
        let kind: String = r.get(5)?;
        let currency: String = r.get(6)?;
        data.push(Transaction {
            id: r.get(0)?,
            title: r.get(1)?,
            amount: parse_stored_decimal(&amount, "transactions")?,
            date: r.get(3)?,
            category: r.get(4)?,
            kind: parse_stored_kind(&kind, "transactions")?,
            currency: parse_stored_currency(&currency, "transactions")?,
            user_id: r.get(7)?,
            comment: r.get(8)?,
        });
    }
    Ok(data)
}

pub fn delete_transaction(conn: &Connection, session: &Session, id: i64) -> Result<bool> {
    let n = conn.execute(
        "DELETE FROM transactions WHERE id=?1 AND user_id=?2",
        params![id, session.user_id],
    )?;
    Ok(n > 0)
}

// --------------------------------------------------------------------- budgets

pub fn insert_budget(conn: &Connection, session: &Session, budget: &Budget) -> Result<i64> {
    conn.execute(
        "INSERT INTO budgets(category_title, kind, amount, currency, date, user_id)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
        params![
            budget.category_title,
            budget.kind.as_str(),
            budget.amount.to_string(),
            budget.currency.code(),
            budget.date,
            session.user_id
        ],
    )?;
    Ok(conn.last_insert_rowid())
}

fn budget_from_row(r: &rusqlite::Row<'_>) -> Result<Budget> {
    let amount: String = r.get(2)?;
    let kind: String = r.get(1)?;
    let currency: String = r.get(3)?;
    Ok(Budget {
        id: r.get(0)?,
        kind: parse_stored_kind(&kind, "budgets")?,
        amount: parse_stored_decimal(&amount, "budgets")?,
        currency: parse_stored_currency(&currency, "budgets")?,
        date: r.get(4)?,
        category_title: r.get(5)?,
        user_id: r.get(6)?,
    })
}

const BUDGET_COLS: &str = "id, kind, amount, currency, date, category_title, user_id";

pub fn budgets(conn: &Connection, session: &Session) -> Result<Vec<Budget>> {
    let sql = format!(
        "SELECT {BUDGET_COLS} FROM budgets WHERE user_id=?1 ORDER BY date DESC, id DESC"
    );
    let mut stmt = conn.prepare(&sql)?;
    let mut rows = stmt.query(params![session.user_id])?;
    let mut data = Vec::new();
    while let Some(r) = rows.next()? {
        data.push(budget_from_row(r)?);
    }
    Ok(data)
}

pub fn budget(conn: &Connection, session: &Session, id: i64) -> Result<Budget> {
    let sql = format!("SELECT {BUDGET_COLS} FROM budgets WHERE id=?1 AND user_id=?2");
    let mut stmt = conn.prepare(&sql)?;
    let found = stmt
        .query_row(params![id, session.user_id], |r| {
            Ok(budget_from_row(r))
        })
        .optional()?;
    found.with_context(|| format!("Budget {} not found", id))?
}

/// Applies an add/subtract delta and appends the matching history row
/// in one SQLite transaction. Subtracting clamps the balance at zero.
pub fn apply_budget_change(
    conn: &mut Connection,
    session: &Session,
    budget_id: i64,
    kind: EntryKind,
    delta: Decimal,
    date: NaiveDate,
) -> Result<Budget> {
    let db_tx = conn.transaction()?;
    let mut updated = {
        let sql = format!("SELECT {BUDGET_COLS} FROM budgets WHERE id=?1 AND user_id=?2");
        let mut stmt = db_tx.prepare(&sql)?;
        let found = stmt
            .query_row(params![budget_id, session.user_id], |r| {
                Ok(budget_from_row(r))
            })
            .optional()?;
        found.with_context(|| format!("Budget {} not found", budget_id))??
    };

    updated.amount = match kind {
        EntryKind::Income => updated.amount + delta,
        EntryKind::Expense => (updated.amount - delta).max(Decimal::ZERO),
    };
    updated.date = date;

    db_tx.execute(
        "UPDATE budgets SET amount=?1, date=?2 WHERE id=?3 AND user_id=?4",
        params![
            updated.amount.to_string(),
            updated.date,
            budget_id,
            session.user_id
        ],
    )?;
    db_tx.execute(
        "INSERT INTO budget_history(budget_id, date, kind, amount) VALUES (?1, ?2, ?3, ?4)",
        params![budget_id, date, kind.as_str(), delta.to_string()],
    )?;
    db_tx.commit()?;
    Ok(updated)
}

pub fn budget_history(
    conn: &Connection,
    session: &Session,
    budget_id: i64,
) -> Result<Vec<BudgetHistory>> {
    let mut stmt = conn.prepare(
        "SELECT h.id, h.budget_id, h.date, h.kind, h.amount
         FROM budget_history h JOIN budgets b ON h.budget_id=b.id
         WHERE h.budget_id=?1 AND b.user_id=?2
         ORDER BY h.date DESC, h.id DESC",
    )?;
    let mut rows = stmt.query(params![budget_id, session.user_id])?;
    let mut data = Vec::new();
    while let Some(r) = rows.next()? {
        let kind: String = r.get(3)?;
        let amount: String = r.get(4)?;
        data.push(BudgetHistory {
            id: r.get(0)?,
            budget_id: r.get(1)?,
            date: r.get(2)?,
            kind: parse_stored_kind(&kind, "budget_history")?,
            amount: parse_stored_decimal(&amount, "budget_history")?,
        });
    }
    Ok(data)
}

pub fn delete_budget(conn: &Connection, session: &Session, id: i64) -> Result<bool> {
    let n = conn.execute(
        "DELETE FROM budgets WHERE id=?1 AND user_id=?2",
        params![id, session.user_id],
    )?;
    Ok(n > 0)
}

// --------------------------------------------------------------------- credits

const CREDIT_COLS: &str =
    "id, title, category_title, total_amount, paid_amount, date_created, user_id, currency, comment, kind";

fn credit_from_row(r: &rusqlite::Row<'_>) -> Result<Credit> {
    let total: String = r.get(3)?;
    let paid: String = r.get(4)?;
    let currency: Option<String> = r.get(7)?;
    let kind: String = r.get(9)?;
    Ok(Credit {
        id: r.get(0)?,
        title: r.get(1)?,
        category_title: r.get(2)?,
        total_amount: parse_stored_decimal(&total, "credits")?,
        paid_amount: parse_stored_decimal(&paid, "credits")?,
        date_created: r.get(5)?,
        user_id: r.get(6)?,
        currency: currency
            .map(|c| parse_stored_currency(&c, "credits"))
            .transpose()?,
        comment: r.get(8)?,
        kind: kind
            .parse::<CreditKind>()
            .with_context(|| format!("Invalid kind '{}' in credits", kind))?,
    })
}

pub fn insert_credit(conn: &Connection, session: &Session, credit: &Credit) -> Result<i64> {
    conn.execute(
        "INSERT INTO credits(title, category_title, total_amount, paid_amount, date_created,
                             user_id, currency, comment, kind)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
        params![
            credit.title,
            credit.category_title,
            credit.total_amount.to_string(),
            credit.paid_amount.to_string(),
            credit.date_created,
            session.user_id,
            credit.currency.map(|c| c.code()),
            credit.comment,
            credit.kind.as_str()
        ],
    )?;
    Ok(conn.last_insert_rowid())
}

pub fn credits(conn: &Connection, session: &Session) -> Result<Vec<Credit>> {
    let sql = format!(
        "SELECT {CREDIT_COLS} FROM credits WHERE user_id=?1 ORDER BY date_created DESC, id DESC"
    );
    let mut stmt = conn.prepare(&sql)?;
    let mut rows = stmt.query(params![session.user_id])?;
    let mut data = Vec::new();
    while let Some(r) = rows.next()? {
        data.push(credit_from_row(r)?);
    }
    Ok(data)
}

pub fn credit(conn: &Connection, session: &Session, id: i64) -> Result<Credit> {
    let sql = format!("SELECT {CREDIT_COLS} FROM credits WHERE id=?1 AND user_id=?2");
    let mut stmt = conn.prepare(&sql)?;
    let found = stmt
        .query_row(params![id, session.user_id], |r| Ok(credit_from_row(r)))
        .optional()?;
    found.with_context(|| format!("Credit {} not found", id))?
}

/// Adjusts the paid amount; clamped at zero, never capped at the total.
pub fn apply_credit_change(
    conn: &Connection,
    session: &Session,
    id: i64,
    kind: EntryKind,
    delta: Decimal,
) -> Result<Credit> {
    let mut updated = credit(conn, session, id)?;
    updated.paid_amount = match kind {
        EntryKind::Income => updated.paid_amount + delta,
        EntryKind::Expense => (updated.paid_amount - delta).max(Decimal::ZERO),
    };
    conn.execute(
        "UPDATE credits SET paid_amount=?1 WHERE id=?2 AND user_id=?3",
        params![updated.paid_amount.to_string(), id, session.user_id],
    )?;
    Ok(updated)
}

pub fn delete_credit(conn: &Connection, session: &Session, id: i64) -> Result<bool> {
    let n = conn.execute(
        "DELETE FROM credits WHERE id=?1 AND user_id=?2",
        params![id, session.user_id],
    )?;
    Ok(n > 0)
}

// ----------------------------------------------------------------------- goals

const GOAL_COLS: &str =
    "id, title, category_title, target_amount, current_amount, date_created, user_id, currency, comment";

fn goal_from_row(r: &rusqlite::Row<'_>) -> Result<Goal> {
    let target: String = r.get(3)?;
    let current: String = r.get(4)?;
    let currency: Option<String> = r.get(7)?;
    Ok(Goal {
        id: r.get(0)?,
        title: r.get(1)?,
        category_title: r.get(2)?,
        target_amount: parse_stored_decimal(&target, "goals")?,
        current_amount: parse_stored_decimal(&current, "goals")?,
        date_created: r.get(5)?,
        user_id: r.get(6)?,
        currency: currency
            .map(|c| parse_stored_currency(&c, "goals"))
            .transpose()?,
        comment: r.get(8)?,
    })
}

pub fn insert_goal(conn: &Connection, session: &Session, goal: &Goal) -> Result<i64> {
    conn.execute(
        "INSERT INTO goals(title, category_title, target_amount, current_amount, date_created,
                           user_id, currency, comment)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
        params![
            goal.title,
            goal.category_title,
            goal.target_amount.to_string(),
            goal.current_amount.to_string(),
            goal.date_created,
            session.user_id,
            goal.currency.map(|c| c.code()),
            goal.comment
        ],
    )?;
    Ok(conn.last_insert_rowid())
}

pub fn goals(conn: &Connection, session: &Session) -> Result<Vec<Goal>> {
    let sql = format!(
        "SELECT {GOAL_COLS} FROM goals WHERE user_id=?1 ORDER BY date_created DESC, id DESC"
    );
    let mut stmt = conn.prepare(&sql)?;
    let mut rows = stmt.query(params![session.user_id])?;
    let mut data = Vec::new();
    while let Some(r) = rows.next()? {
        data.push(goal_from_row(r)?);
    }
    Ok(data)
}

pub fn goal(conn: &Connection, session: &Session, id: i64) -> Result<Goal> {
    let sql = format!("SELECT {GOAL_COLS} FROM goals WHERE id=?1 AND user_id=?2");
    let mut stmt = conn.prepare(&sql)?;
    let found = stmt
        .query_row(params![id, session.user_id], |r| Ok(goal_from_row(r)))
        .optional()?;
    found.with_context(|| format!("Goal {} not found", id))?
}

/// Adjusts the saved amount; clamped at zero, never capped at the target.
pub fn apply_goal_change(
    conn: &Connection,
    session: &Session,
    id: i64,
    kind: EntryKind,
    delta: Decimal,
) -> Result<Goal> {
    let mut updated = goal(conn, session, id)?;
    updated.current_amount = match kind {
        EntryKind::Income => updated.current_amount + delta,
        EntryKind::Expense => (updated.current_amount - delta).max(Decimal::ZERO),
    };
    conn.execute(
        "UPDATE goals SET current_amount=?1 WHERE id=?2 AND user_id=?3",
        params![updated.current_amount.to_string(), id, session.user_id],
    )?;
    Ok(updated)
}

pub fn delete_goal(conn: &Connection, session: &Session, id: i64) -> Result<bool> {
    let n = conn.execute(
        "DELETE FROM goals WHERE id=?1 AND user_id=?2",
        params![id, session.user_id],
    )?;
    Ok(n > 0)
}

// ----------------------------------------------------------------------- plans

const PLAN_COLS: &str =
    "id, title, category_title, amount, reminder_date, user_id, date_created, currency, comment";

fn plan_from_row(r: &rusqlite::Row<'_>) -> Result<PlannedExpense> {
    let amount: String = r.get(3)?;
    let currency: String = r.get(7)?;
    Ok(PlannedExpense {
        id: r.get(0)?,
        title: r.get(1)?,
        category_title: r.get(2)?,
        amount: parse_stored_decimal(&amount, "planned_expenses")?,
        reminder_date: r.get(4)?,
        user_id: r.get(5)?,
        date_created: r.get(6)?,
        currency: parse_stored_currency(&currency, "planned_expenses")?,
        comment: r.get(8)?,
    })
}

pub fn insert_plan(conn: &Connection, session: &Session, plan: &PlannedExpense) -> Result<i64> {
    conn.execute(
        "INSERT INTO planned_expenses(title, category_title, amount, reminder_date, user_id,
                                      date_created, currency, comment)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
        params![
            plan.title,
            plan.category_title,
            plan.amount.to_string(),
            plan.reminder_date,
            session.user_id,
            plan.date_created,
            plan.currency.code(),
            plan.comment
        ],
    )?;
    Ok(conn.last_insert_rowid())
}

pub fn plans(conn: &Connection, session: &Session) -> Result<Vec<PlannedExpense>> {
    let sql = format!(
        "SELECT {PLAN_COLS} FROM planned_expenses WHERE user_id=?1 ORDER BY reminder_date ASC, id ASC"
    );
    let mut stmt = conn.prepare(&sql)?;
    let mut rows = stmt.query(params![session.user_id])?;
    let mut data = Vec::new();
    while let Some(r) = rows.next()? {
        data.push(plan_from_row(r)?);
    }
    Ok(data)
}

pub fn plan(conn: &Connection, session: &Session, id: i64) -> Result<PlannedExpense> {
    let sql = format!("SELECT {PLAN_COLS} FROM planned_expenses WHERE id=?1 AND user_id=?2");
    let mut stmt = conn.prepare(&sql)?;
    let found = stmt
        .query_row(params![id, session.user_id], |r| Ok(plan_from_row(r)))
        .optional()?;
    found.with_context(|| format!("Planned expense {} not found", id))?
}

pub fn delete_plan(conn: &Connection, session: &Session, id: i64) -> Result<bool> {
    let n = conn.execute(
        "DELETE FROM planned_expenses WHERE id=?1 AND user_id=?2",
        params![id, session.user_id],
    )?;
    Ok(n > 0)
}

// -------------------------------------------------------------------- profiles

pub fn upsert_profile(conn: &Connection, profile: &UserProfile) -> Result<()> {
    conn.execute(
        "INSERT INTO user_profiles(user_id, username, email, created_at) VALUES (?1, ?2, ?3, ?4)
         ON CONFLICT(user_id) DO UPDATE SET username=excluded.username, email=excluded.email",
        params![
            profile.user_id,
            profile.username,
            profile.email,
            profile.created_at
        ],
    )?;
    Ok(())
}

pub fn profile(conn: &Connection, user_id: &str) -> Result<Option<UserProfile>> {
    let mut stmt = conn.prepare(
        "SELECT id, user_id, username, email, created_at FROM user_profiles WHERE user_id=?1",
    )?;
    let found = stmt
        .query_row(params![user_id], |r| {
            Ok(UserProfile {
                id: r.get(0)?,
                user_id: r.get(1)?,
                username: r.get(2)?,
                email: r.get(3)?,
                created_at: r.get(4)?,
            })
        })
        .optional()?;
    Ok(found)
}
