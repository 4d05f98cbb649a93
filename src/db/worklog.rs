//! Work logs and the work status cache.

use crate::errors::AppError;
use crate::models::work_log::WorkLog;
use crate::models::work_status::{StatusTag, WorkStatus};
use crate::utils::time::{
    format_day, format_time, format_timestamp, parse_day, parse_time, parse_timestamp,
};
use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use rusqlite::{Connection, OptionalExtension, Result, Row, params};

const LOG_COLUMNS: &str = "id, employee_id, date, day, start_time, end_time, worked_hours";
const STATUS_COLUMNS: &str =
    "id, employee_id, current_status, workday_start, workday_end, breaks_taken, current_hours";

fn conversion_error(idx: usize, e: AppError) -> rusqlite::Error {
    rusqlite::Error::FromSqlConversionFailure(idx, rusqlite::types::Type::Text, Box::new(e))
}

fn get_timestamp(row: &Row, idx: usize) -> Result<NaiveDateTime> {
    let raw: String = row.get(idx)?;
    parse_timestamp(&raw).map_err(|e| conversion_error(idx, e))
}

fn get_opt_timestamp(row: &Row, idx: usize) -> Result<Option<NaiveDateTime>> {
    match row.get::<_, Option<String>>(idx)? {
        Some(raw) => parse_timestamp(&raw)
            .map(Some)
            .map_err(|e| conversion_error(idx, e)),
        None => Ok(None),
    }
}

fn get_opt_time(row: &Row, idx: usize) -> Result<Option<NaiveTime>> {
    match row.get::<_, Option<String>>(idx)? {
        Some(raw) => parse_time(&raw).map(Some).map_err(|e| conversion_error(idx, e)),
        None => Ok(None),
    }
}

pub fn map_work_log(row: &Row) -> Result<WorkLog> {
    let day_raw: String = row.get(3)?;
    // deduplicated legacy rows carry a `#<id>` suffix
    let day_key = day_raw.get(..10).unwrap_or(&day_raw);
    let day = parse_day(day_key).map_err(|e| conversion_error(3, e))?;

    Ok(WorkLog {
        id: row.get(0)?,
        employee_id: row.get(1)?,
        date: get_timestamp(row, 2)?,
        day,
        start_time: get_opt_timestamp(row, 4)?,
        end_time: get_opt_timestamp(row, 5)?,
        worked_hours: row.get(6)?,
    })
}

pub fn map_work_status(row: &Row) -> Result<WorkStatus> {
    let status_raw: String = row.get(2)?;
    let current_status = StatusTag::from_db_str(&status_raw).ok_or_else(|| {
        conversion_error(2, AppError::Other(format!("Invalid work status: {status_raw}")))
    })?;

    Ok(WorkStatus {
        id: row.get(0)?,
        employee_id: row.get(1)?,
        current_status,
        workday_start: get_opt_time(row, 3)?,
        workday_end: get_opt_time(row, 4)?,
        breaks_taken: row.get(5)?,
        current_hours: row.get(6)?,
    })
}

// ---------------------------
// Work logs
// ---------------------------

/// Most recent log of the employee whose `date` is at or after `since`.
pub fn find_log_since(
    conn: &Connection,
    employee_id: i64,
    since: NaiveDateTime,
) -> Result<Option<WorkLog>> {
    let sql = format!(
        "SELECT {LOG_COLUMNS} FROM work_logs
         WHERE employee_id = ?1 AND date >= ?2
         ORDER BY date DESC, id DESC
         LIMIT 1"
    );
    conn.query_row(
        &sql,
        params![employee_id, format_timestamp(&since)],
        map_work_log,
    )
    .optional()
}

/// Insert an empty log for the UTC day of `now`.
/// Returns `None` when that day already has a log for the employee.
pub fn insert_log(conn: &Connection, employee_id: i64, now: NaiveDateTime) -> Result<Option<i64>> {
    let inserted = conn.execute(
        "INSERT INTO work_logs (employee_id, date, day) VALUES (?1, ?2, ?3)
         ON CONFLICT(employee_id, day) DO NOTHING",
        params![
            employee_id,
            format_timestamp(&now),
            format_day(&now.date())
        ],
    )?;
    if inserted == 0 {
        Ok(None)
    } else {
        Ok(Some(conn.last_insert_rowid()))
    }
}

/// Log of the employee keyed by UTC calendar day.
pub fn find_log_by_day(conn: &Connection, employee_id: i64, day: NaiveDate) -> Result<Option<WorkLog>> {
    let sql = format!("SELECT {LOG_COLUMNS} FROM work_logs WHERE employee_id = ?1 AND day = ?2");
    conn.query_row(&sql, params![employee_id, format_day(&day)], map_work_log)
        .optional()
}

pub fn find_log(conn: &Connection, id: i64) -> Result<Option<WorkLog>> {
    let sql = format!("SELECT {LOG_COLUMNS} FROM work_logs WHERE id = ?1");
    conn.query_row(&sql, [id], map_work_log).optional()
}

pub fn set_log_start(conn: &Connection, id: i64, start: NaiveDateTime) -> Result<()> {
    conn.execute(
        "UPDATE work_logs SET start_time = ?1 WHERE id = ?2 AND start_time IS NULL",
        params![format_timestamp(&start), id],
    )?;
    Ok(())
}

pub fn set_log_end(conn: &Connection, id: i64, end: NaiveDateTime, hours: f64) -> Result<()> {
    conn.execute(
        "UPDATE work_logs SET end_time = ?1, worked_hours = ?2
         WHERE id = ?3 AND end_time IS NULL",
        params![format_timestamp(&end), hours, id],
    )?;
    Ok(())
}

/// All logs of an employee in insertion (chronological) order.
pub fn logs_for_employee(conn: &Connection, employee_id: i64) -> Result<Vec<WorkLog>> {
    let sql = format!(
        "SELECT {LOG_COLUMNS} FROM work_logs WHERE employee_id = ?1 ORDER BY id ASC"
    );
    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt.query_map([employee_id], map_work_log)?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

// ---------------------------
// Work status
// ---------------------------

pub fn find_status(conn: &Connection, employee_id: i64) -> Result<Option<WorkStatus>> {
    let sql = format!("SELECT {STATUS_COLUMNS} FROM work_statuses WHERE employee_id = ?1");
    conn.query_row(&sql, [employee_id], map_work_status)
        .optional()
}

pub fn insert_status(
    conn: &Connection,
    employee_id: i64,
    status: StatusTag,
    workday_start: Option<NaiveTime>,
    workday_end: Option<NaiveTime>,
    current_hours: f64,
) -> Result<i64> {
    conn.execute(
        "INSERT INTO work_statuses (employee_id, current_status, workday_start, workday_end, current_hours)
         VALUES (?1, ?2, ?3, ?4, ?5)",
        params![
            employee_id,
            status.to_db_str(),
            workday_start.as_ref().map(format_time),
            workday_end.as_ref().map(format_time),
            current_hours,
        ],
    )?;
    Ok(conn.last_insert_rowid())
}

/// Mark the employee as working since `start`.
pub fn update_status_started(conn: &Connection, employee_id: i64, start: NaiveTime) -> Result<()> {
    conn.execute(
        "UPDATE work_statuses SET current_status = ?1, workday_start = ?2
         WHERE employee_id = ?3",
        params![StatusTag::Working.to_db_str(), format_time(&start), employee_id],
    )?;
    Ok(())
}

/// Mark the employee as off since `end`, with the hours of the closed day.
pub fn update_status_ended(
    conn: &Connection,
    employee_id: i64,
    end: NaiveTime,
    hours: f64,
) -> Result<()> {
    conn.execute(
        "UPDATE work_statuses SET current_status = ?1, workday_end = ?2, current_hours = ?3
         WHERE employee_id = ?4",
        params![StatusTag::Off.to_db_str(), format_time(&end), hours, employee_id],
    )?;
    Ok(())
}
