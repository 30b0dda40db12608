// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Monthly reminder scheduling for planned expenses. The schedule is a
//! row per plan; delivery belongs to whatever host integration reads
//! the table. Scheduling is fire-and-forget: failures are logged and
//! never fail the calling command.

use anyhow::Result;
use chrono::{Datelike, Local};
use rusqlite::{Connection, params};
use serde::Serialize;

use crate::models::PlannedExpense;

const REMINDER_HOUR: u32 = 9;
const REMINDER_MINUTE: u32 = 0;

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Reminder {
    pub plan_id: i64,
    pub day_of_month: u32,
    pub hour: u32,
    pub minute: u32,
    pub body: String,
}

/// Replaces any prior schedule for the same plan. The trigger day is
/// the day-of-month of the plan's reminder date, at 09:00.
pub fn schedule_monthly(conn: &Connection, plan: &PlannedExpense) {
    let day = plan.reminder_date.day();
    let body = format!(
        "Пора оплатить: {}. Сумма: {}",
        plan.title,
        plan.amount.round_dp(0)
    );
    let result = conn.execute(
        "INSERT INTO reminders(plan_id, day_of_month, hour, minute, body, scheduled_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6)
         ON CONFLICT(plan_id) DO UPDATE SET
             day_of_month=excluded.day_of_month,
             hour=excluded.hour,
             minute=excluded.minute,
             body=excluded.body,
             scheduled_at=excluded.scheduled_at",
        params![
            plan.id,
            day,
            REMINDER_HOUR,
            REMINDER_MINUTE,
            body,
            Local::now().naive_local().to_string()
        ],
    );
    match result {
        Ok(_) => tracing::info!(plan_id = plan.id, day, "monthly reminder scheduled"),
        Err(err) => tracing::warn!(plan_id = plan.id, %err, "failed to schedule reminder"),
    }
}

pub fn remove(conn: &Connection, plan_id: i64) {
    match conn.execute("DELETE FROM reminders WHERE plan_id=?1", params![plan_id]) {
        Ok(_) => tracing::info!(plan_id, "reminder removed"),
        Err(err) => tracing::warn!(plan_id, %err, "failed to remove reminder"),
    }
}

pub fn due_on_day(conn: &Connection, day: u32) -> Result<Vec<Reminder>> {
    let mut stmt = conn.prepare(
        "SELECT plan_id, day_of_month, hour, minute, body FROM reminders
         WHERE day_of_month=?1 ORDER BY plan_id",
    )?;
    let mut rows = stmt.query(params![day])?;
    let mut data = Vec::new();
    while let Some(r) = rows.next()? {
        data.push(Reminder {
            plan_id: r.get(0)?,
            day_of_month: r.get(1)?,
            hour: r.get(2)?,
            minute: r.get(3)?,
            body: r.get(4)?,
        });
    }
    Ok(data)
}
