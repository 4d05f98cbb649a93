//! Time utilities: UTC day boundaries, storage formats, worked-hours rounding.

use crate::errors::{AppError, AppResult};
use chrono::{NaiveDate, NaiveDateTime, NaiveTime, Utc};

/// Storage format for instants (naive UTC).
pub const TIMESTAMP_FMT: &str = "%Y-%m-%dT%H:%M:%S%.6f";
/// Storage format for times of day.
pub const TIME_FMT: &str = "%H:%M:%S";
/// Storage format for calendar days.
pub const DAY_FMT: &str = "%Y-%m-%d";
/// Timestamp embedded in artifact file names.
pub const ARTIFACT_TS_FMT: &str = "%Y%m%d_%H%M%S";

pub fn now_utc() -> NaiveDateTime {
    Utc::now().naive_utc()
}

/// Midnight UTC of the day `now` falls on.
pub fn utc_midnight(now: NaiveDateTime) -> NaiveDateTime {
    now.date().and_time(NaiveTime::MIN)
}

pub fn format_timestamp(dt: &NaiveDateTime) -> String {
    dt.format(TIMESTAMP_FMT).to_string()
}

pub fn parse_timestamp(s: &str) -> AppResult<NaiveDateTime> {
    NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S%.f")
        .map_err(|_| AppError::Other(format!("Invalid timestamp: {s}")))
}

pub fn format_time(t: &NaiveTime) -> String {
    t.format(TIME_FMT).to_string()
}

pub fn parse_time(s: &str) -> AppResult<NaiveTime> {
    NaiveTime::parse_from_str(s, "%H:%M:%S%.f")
        .map_err(|_| AppError::Other(format!("Invalid time of day: {s}")))
}

pub fn format_day(d: &NaiveDate) -> String {
    d.format(DAY_FMT).to_string()
}

pub fn parse_day(s: &str) -> AppResult<NaiveDate> {
    NaiveDate::parse_from_str(s, DAY_FMT)
        .map_err(|_| AppError::Other(format!("Invalid day: {s}")))
}

/// Hours between two instants, rounded half away from zero to 2 decimals.
///
/// Works on whole hundredths of an hour (36 s each) so that e.g.
/// 8h30m is exactly `8.5`.
pub fn worked_hours(start: NaiveDateTime, end: NaiveDateTime) -> f64 {
    let millis = (end - start).num_milliseconds();
    let hundredths = (millis as f64 / 36_000.0).round();
    hundredths / 100.0
}

/// `8.5` → `08:30`
pub fn format_hours(hours: f64) -> String {
    let total_minutes = (hours * 60.0).round() as i64;
    let sign = if total_minutes < 0 { "-" } else { "" };
    let m = total_minutes.abs();
    format!("{}{:02}:{:02}", sign, m / 60, m % 60)
}
