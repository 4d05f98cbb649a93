use crate::db::log::ttlog;
use crate::db::worklog::{
    find_log, find_log_by_day, find_log_since, find_status, insert_log, insert_status,
    logs_for_employee, set_log_end, set_log_start, update_status_ended, update_status_started,
};
use crate::errors::{AppError, AppResult};
use crate::models::work_log::WorkLog;
use crate::models::work_status::{StatusTag, WorkStatus};
use crate::utils::time::{format_timestamp, now_utc, utc_midnight, worked_hours};
use chrono::NaiveDateTime;
use rusqlite::{Connection, Transaction, TransactionBehavior};
use std::fmt;

/// Result of a clock-in request.
#[derive(Debug, Clone, PartialEq)]
pub enum StartOutcome {
    Started { at: NaiveDateTime },
    AlreadyStarted,
}

/// Result of a clock-out request.
#[derive(Debug, Clone, PartialEq)]
pub enum EndOutcome {
    Ended { worked_hours: f64 },
    NotStarted,
    AlreadyEnded,
}

impl fmt::Display for StartOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StartOutcome::Started { at } => {
                write!(f, "Workday start recorded at {} UTC.", at.format("%H:%M:%S"))
            }
            StartOutcome::AlreadyStarted => write!(f, "Workday already started."),
        }
    }
}

impl fmt::Display for EndOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EndOutcome::Ended { worked_hours } => {
                write!(f, "Workday end recorded. Hours worked: {worked_hours:.2}")
            }
            EndOutcome::NotStarted => write!(f, "Cannot end the workday: it has not been started."),
            EndOutcome::AlreadyEnded => write!(f, "Workday already ended."),
        }
    }
}

/// Daily clock-in / clock-out state machine.
///
/// The day boundary is UTC midnight. A log left open on a previous day is
/// never closed here: the next clock-in opens a new log for the new day.
pub struct WorkTimeLogic;

impl WorkTimeLogic {
    pub fn start_workday(conn: &mut Connection, employee_id: i64) -> AppResult<StartOutcome> {
        Self::start_workday_at(conn, employee_id, now_utc())
    }

    pub fn end_workday(conn: &mut Connection, employee_id: i64) -> AppResult<EndOutcome> {
        Self::end_workday_at(conn, employee_id, now_utc())
    }

    /// Clock in at `now` (naive UTC).
    pub fn start_workday_at(
        conn: &mut Connection,
        employee_id: i64,
        now: NaiveDateTime,
    ) -> AppResult<StartOutcome> {
        let tx = conn.transaction_with_behavior(TransactionBehavior::Immediate)?;
        ensure_employee(&tx, employee_id)?;

        let log = today_log(&tx, employee_id, now)?;
        if log.start_time.is_some() {
            return Ok(StartOutcome::AlreadyStarted);
        }

        set_log_start(&tx, log.id, now)?;

        match find_status(&tx, employee_id)? {
            None => {
                insert_status(&tx, employee_id, StatusTag::Working, Some(now.time()), None, 0.0)?;
            }
            Some(_) => update_status_started(&tx, employee_id, now.time())?,
        }

        ttlog(
            &tx,
            "start_day",
            &format!("employee {employee_id}"),
            &format!("Workday started at {}", format_timestamp(&now)),
        )?;

        tx.commit()?;
        Ok(StartOutcome::Started { at: now })
    }

    /// Clock out at `now` (naive UTC).
    pub fn end_workday_at(
        conn: &mut Connection,
        employee_id: i64,
        now: NaiveDateTime,
    ) -> AppResult<EndOutcome> {
        let tx = conn.transaction_with_behavior(TransactionBehavior::Immediate)?;
        ensure_employee(&tx, employee_id)?;

        let log = today_log(&tx, employee_id, now)?;
        // early returns drop `tx`, rolling back the lazily created log
        let Some(start) = log.start_time else {
            return Ok(EndOutcome::NotStarted);
        };
        if log.end_time.is_some() {
            return Ok(EndOutcome::AlreadyEnded);
        }

        let hours = worked_hours(start, now);
        set_log_end(&tx, log.id, now, hours)?;

        match find_status(&tx, employee_id)? {
            Some(_) => update_status_ended(&tx, employee_id, now.time(), hours)?,
            None => {
                insert_status(
                    &tx,
                    employee_id,
                    StatusTag::Off,
                    Some(start.time()),
                    Some(now.time()),
                    hours,
                )?;
            }
        }

        ttlog(
            &tx,
            "end_day",
            &format!("employee {employee_id}"),
            &format!("Workday ended at {} ({hours:.2} h)", format_timestamp(&now)),
        )?;

        tx.commit()?;
        Ok(EndOutcome::Ended {
            worked_hours: hours,
        })
    }

    /// Current status snapshot, if the employee ever clocked in.
    pub fn workday_status(conn: &Connection, employee_id: i64) -> AppResult<Option<WorkStatus>> {
        Ok(find_status(conn, employee_id)?)
    }

    /// Full attendance history of the employee, oldest first.
    pub fn work_logs_for(conn: &Connection, employee_id: i64) -> AppResult<Vec<WorkLog>> {
        Ok(logs_for_employee(conn, employee_id)?)
    }
}

fn ensure_employee(tx: &Transaction<'_>, employee_id: i64) -> AppResult<()> {
    let exists: bool = tx.query_row(
        "SELECT EXISTS(SELECT 1 FROM employees WHERE id = ?1)",
        [employee_id],
        |row| row.get(0),
    )?;
    if exists {
        Ok(())
    } else {
        Err(AppError::NotFound(format!("employee {employee_id}")))
    }
}

/// Most recent log on or after today's UTC midnight, created when missing.
fn today_log(tx: &Transaction<'_>, employee_id: i64, now: NaiveDateTime) -> AppResult<WorkLog> {
    if let Some(log) = find_log_since(tx, employee_id, utc_midnight(now))? {
        return Ok(log);
    }

    let log = match insert_log(tx, employee_id, now)? {
        Some(id) => find_log(tx, id)?,
        None => find_log_by_day(tx, employee_id, now.date())?,
    };

    log.ok_or_else(|| AppError::Other(format!("work log for employee {employee_id} vanished")))
}
