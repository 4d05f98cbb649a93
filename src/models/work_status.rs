use chrono::NaiveTime;
use serde::Serialize;

/// `work_statuses.current_status` tag.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
pub enum StatusTag {
    Working,
    Off,
}

impl StatusTag {
    pub fn to_db_str(&self) -> &'static str {
        match self {
            StatusTag::Working => "working",
            StatusTag::Off => "off",
        }
    }

    pub fn from_db_str(s: &str) -> Option<Self> {
        match s {
            "working" => Some(StatusTag::Working),
            "off" => Some(StatusTag::Off),
            _ => None,
        }
    }
}

/// Denormalized snapshot of the latest clock action of one employee.
/// Written only together with the matching `WorkLog` update.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct WorkStatus {
    pub id: i64,
    pub employee_id: i64,
    pub current_status: StatusTag,
    pub workday_start: Option<NaiveTime>,
    pub workday_end: Option<NaiveTime>,
    pub breaks_taken: i64,
    pub current_hours: f64,
}
