use serde::Serialize;

/// Application role stored in `users.role`.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
pub enum AppRole {
    Admin,
    Hr,
    Manager,
    Viewer,
    Employee,
    GeneralDirector,
}

impl AppRole {
    /// Convert enum → DB string
    pub fn to_db_str(&self) -> &'static str {
        match self {
            AppRole::Admin => "admin",
            AppRole::Hr => "hr",
            AppRole::Manager => "manager",
            AppRole::Viewer => "viewer",
            AppRole::Employee => "employee",
            AppRole::GeneralDirector => "general_director",
        }
    }

    /// Convert DB string → enum
    pub fn from_db_str(s: &str) -> Option<Self> {
        match s {
            "admin" => Some(AppRole::Admin),
            "hr" => Some(AppRole::Hr),
            "manager" => Some(AppRole::Manager),
            "viewer" => Some(AppRole::Viewer),
            "employee" => Some(AppRole::Employee),
            "general_director" => Some(AppRole::GeneralDirector),
            _ => None,
        }
    }

    /// Helper: accept CLI input in any case, with `-` or `_`.
    pub fn from_code(code: &str) -> Option<Self> {
        AppRole::from_db_str(&code.trim().to_lowercase().replace('-', "_"))
    }
}
