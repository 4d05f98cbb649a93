//! Role-based visibility and capability checks. Nothing here writes.

use crate::db::queries::{list_employees, managers_with_departments};
use crate::errors::{AppError, AppResult};
use crate::models::employee::{Department, DepartmentManager, Employee};
use crate::models::role::AppRole;
use crate::models::user::CurrentUser;
use rusqlite::Connection;

/// Operation groups a role may reach.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Capability {
    /// Own employee record and clock-in/clock-out.
    OwnRecord,
    /// Staff of the user's own department.
    DepartmentStaff,
    /// Department managers and the departments they head.
    ManagersOverview,
    /// Backups and exports of the whole record set.
    Backups,
}

impl Capability {
    pub fn label(&self) -> &'static str {
        match self {
            Capability::OwnRecord => "own record",
            Capability::DepartmentStaff => "department staff",
            Capability::ManagersOverview => "managers overview",
            Capability::Backups => "backups and exports",
        }
    }
}

pub fn has_capability(role: Option<AppRole>, cap: Capability) -> bool {
    let Some(role) = role else {
        return false;
    };

    match cap {
        Capability::OwnRecord => true,
        Capability::DepartmentStaff => role == AppRole::Manager,
        Capability::ManagersOverview => role == AppRole::GeneralDirector,
        Capability::Backups => matches!(role, AppRole::Admin | AppRole::Hr),
    }
}

pub fn require_capability(current: &CurrentUser, cap: Capability) -> AppResult<()> {
    if has_capability(current.role(), cap) {
        Ok(())
    } else {
        Err(AppError::Forbidden(format!(
            "role '{}' has no access to {}",
            current.role_label(),
            cap.label()
        )))
    }
}

/// Whether `current` may see the record of `target`.
pub fn can_view_employee(current: &CurrentUser, target: &Employee) -> bool {
    let is_self = current.user.employee_id == Some(target.id);

    match current.role() {
        Some(AppRole::Admin | AppRole::Hr | AppRole::GeneralDirector) => true,
        Some(AppRole::Employee) => is_self,
        Some(AppRole::Manager) => {
            if is_self {
                return true;
            }
            match current.employee.as_ref().and_then(|e| e.department_id) {
                Some(dept) => target.department_id == Some(dept),
                None => false,
            }
        }
        Some(AppRole::Viewer) | None => false,
    }
}

/// Every employee `current` may see, in id order.
pub fn visible_employees(conn: &Connection, current: &CurrentUser) -> AppResult<Vec<Employee>> {
    Ok(list_employees(conn)?
        .into_iter()
        .filter(|e| can_view_employee(current, e))
        .collect())
}

pub fn get_managers_and_departments(
    conn: &Connection,
) -> AppResult<Vec<(DepartmentManager, Department)>> {
    managers_with_departments(conn)
}
