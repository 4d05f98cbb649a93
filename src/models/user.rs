use super::{employee::Employee, role::AppRole};
use serde::Serialize;

/// Row of `users`.
///
/// `role` is `None` when the stored code is not a known [`AppRole`]; such a
/// user has no capabilities and sees nothing.
#[derive(Debug, Clone, Serialize)]
pub struct User {
    pub id: i64,
    pub username: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub role: Option<AppRole>,
    pub employee_id: Option<i64>,
}

/// Authenticated user together with the employee record it is linked to.
#[derive(Debug, Clone)]
pub struct CurrentUser {
    pub user: User,
    pub employee: Option<Employee>,
}

impl CurrentUser {
    pub fn role(&self) -> Option<AppRole> {
        self.user.role
    }

    pub fn role_label(&self) -> &'static str {
        self.user.role.map(|r| r.to_db_str()).unwrap_or("unknown")
    }
}
