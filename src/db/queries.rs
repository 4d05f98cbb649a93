//! Organization records: employees, departments, managers, users.

use crate::errors::{AppError, AppResult};
use crate::models::employee::{Department, DepartmentManager, Employee};
use crate::models::role::AppRole;
use crate::models::user::User;
use rusqlite::{Connection, OptionalExtension, Result, Row, params};

pub fn map_employee(row: &Row) -> Result<Employee> {
    Ok(Employee {
        id: row.get("id")?,
        full_name: row.get("full_name")?,
        position: row.get("position")?,
        department_id: row.get("department_id")?,
        access_level_id: row.get("access_level_id")?,
    })
}

pub fn map_department(row: &Row) -> Result<Department> {
    Ok(Department {
        id: row.get("id")?,
        name: row.get("name")?,
        efficiency: row.get("efficiency")?,
        manager_id: row.get("manager_id")?,
    })
}

pub fn map_user(row: &Row) -> Result<User> {
    let role: String = row.get("role")?;
    Ok(User {
        id: row.get("id")?,
        username: row.get("username")?,
        password_hash: row.get("password_hash")?,
        role: AppRole::from_db_str(&role),
        employee_id: row.get("employee_id")?,
    })
}

// ---------------------------
// Employees
// ---------------------------

pub fn insert_employee(
    conn: &Connection,
    full_name: &str,
    position: Option<&str>,
    department_id: Option<i64>,
) -> AppResult<i64> {
    conn.execute(
        "INSERT INTO employees (full_name, position, department_id) VALUES (?1, ?2, ?3)",
        params![full_name, position, department_id],
    )?;
    Ok(conn.last_insert_rowid())
}

pub fn find_employee(conn: &Connection, id: i64) -> AppResult<Option<Employee>> {
    let emp = conn
        .query_row(
            "SELECT id, full_name, position, department_id, access_level_id
             FROM employees WHERE id = ?1",
            [id],
            map_employee,
        )
        .optional()?;
    Ok(emp)
}

pub fn get_employee(conn: &Connection, id: i64) -> AppResult<Employee> {
    find_employee(conn, id)?.ok_or_else(|| AppError::NotFound(format!("employee {id}")))
}

pub fn list_employees(conn: &Connection) -> AppResult<Vec<Employee>> {
    let mut stmt = conn.prepare(
        "SELECT id, full_name, position, department_id, access_level_id
         FROM employees ORDER BY id ASC",
    )?;
    let rows = stmt.query_map([], map_employee)?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

// ---------------------------
// Departments and managers
// ---------------------------

pub fn insert_department(conn: &Connection, name: &str, manager_id: Option<i64>) -> AppResult<i64> {
    conn.execute(
        "INSERT INTO departments (name, manager_id) VALUES (?1, ?2)",
        params![name, manager_id],
    )?;
    Ok(conn.last_insert_rowid())
}

pub fn insert_department_manager(conn: &Connection, full_name: &str) -> AppResult<i64> {
    conn.execute(
        "INSERT INTO department_managers (full_name) VALUES (?1)",
        [full_name],
    )?;
    Ok(conn.last_insert_rowid())
}

/// Department managers joined to the departments they head.
/// Managers heading no department are left out.
pub fn managers_with_departments(
    conn: &Connection,
) -> AppResult<Vec<(DepartmentManager, Department)>> {
    let mut stmt = conn.prepare(
        "SELECT m.id AS m_id, m.full_name AS m_full_name, m.access_level_id AS m_access_level_id,
                d.id, d.name, d.efficiency, d.manager_id
         FROM department_managers m
         JOIN departments d ON d.manager_id = m.id
         ORDER BY m.id ASC, d.id ASC",
    )?;

    let rows = stmt.query_map([], |row| {
        let manager = DepartmentManager {
            id: row.get("m_id")?,
            full_name: row.get("m_full_name")?,
            access_level_id: row.get("m_access_level_id")?,
        };
        Ok((manager, map_department(row)?))
    })?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

// ---------------------------
// Users
// ---------------------------

pub fn insert_user(
    conn: &Connection,
    username: &str,
    password_hash: &str,
    role: AppRole,
    employee_id: Option<i64>,
) -> AppResult<i64> {
    conn.execute(
        "INSERT INTO users (username, password_hash, role, employee_id)
         VALUES (?1, ?2, ?3, ?4)",
        params![username, password_hash, role.to_db_str(), employee_id],
    )?;
    Ok(conn.last_insert_rowid())
}

pub fn find_user_by_username(conn: &Connection, username: &str) -> AppResult<Option<User>> {
    let user = conn
        .query_row(
            "SELECT id, username, password_hash, role, employee_id
             FROM users WHERE username = ?1",
            [username],
            map_user,
        )
        .optional()?;
    Ok(user)
}

pub fn set_user_password(conn: &Connection, id: i64, password_hash: &str) -> AppResult<()> {
    conn.execute(
        "UPDATE users SET password_hash = ?1 WHERE id = ?2",
        params![password_hash, id],
    )?;
    Ok(())
}
