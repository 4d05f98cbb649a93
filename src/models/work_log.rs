use chrono::{NaiveDate, NaiveDateTime};
use serde::Serialize;

/// One workday attendance record (`work_logs`). All instants are naive UTC.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct WorkLog {
    pub id: i64,
    pub employee_id: i64,
    pub date: NaiveDateTime,
    pub day: NaiveDate,
    pub start_time: Option<NaiveDateTime>,
    pub end_time: Option<NaiveDateTime>,
    pub worked_hours: Option<f64>,
}

impl WorkLog {
    /// Started and not yet ended.
    pub fn is_open(&self) -> bool {
        self.start_time.is_some() && self.end_time.is_none()
    }

    /// Once the end is recorded the log never changes again.
    pub fn is_closed(&self) -> bool {
        self.end_time.is_some()
    }
}
