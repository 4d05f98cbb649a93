#![allow(dead_code)]
use assert_cmd::{Command, cargo_bin_cmd};
use hrtrack::core::auth::hash_password_with_cost;
use hrtrack::db::initialize::init_db;
use hrtrack::db::pool::DbPool;
use hrtrack::db::queries::{
    insert_department, insert_department_manager, insert_employee, insert_user,
};
use hrtrack::models::role::AppRole;
use std::env;
use std::fs;
use std::path::PathBuf;

pub const PASSWORD: &str = "s3cret";

pub fn hrt() -> Command {
    cargo_bin_cmd!("hrtrack")
}

/// Create a unique test DB path inside the system temp dir and remove any existing file
pub fn setup_test_db(name: &str) -> String {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("{}_hrtrack.sqlite", name));
    let db_path = path.to_string_lossy().to_string();
    fs::remove_file(&db_path).ok();
    db_path
}

/// Fresh in-memory store with the full schema.
pub fn memory_pool() -> DbPool {
    let pool = DbPool::in_memory().expect("open in-memory db");
    init_db(&pool.conn).expect("init db");
    pool
}

/// Ids of the small organization created by [`seed_org`].
#[derive(Debug, Clone, Copy)]
pub struct Org {
    pub sales: i64,
    pub support: i64,
    pub alice: i64,
    pub bob: i64,
    pub carol: i64,
    pub dave: i64,
}

/// Two departments with one manager each and four employees:
/// alice and bob in Sales, carol in Support, dave without department.
pub fn seed_org(conn: &rusqlite::Connection) -> Org {
    let m_sales = insert_department_manager(conn, "Maria Rossi").expect("manager");
    let m_support = insert_department_manager(conn, "Luca Bianchi").expect("manager");
    let sales = insert_department(conn, "Sales", Some(m_sales)).expect("dept");
    let support = insert_department(conn, "Support", Some(m_support)).expect("dept");

    Org {
        sales,
        support,
        alice: insert_employee(conn, "Alice", Some("Account manager"), Some(sales))
            .expect("employee"),
        bob: insert_employee(conn, "Bob", Some("Sales rep"), Some(sales)).expect("employee"),
        carol: insert_employee(conn, "Carol", Some("Support engineer"), Some(support))
            .expect("employee"),
        dave: insert_employee(conn, "Dave", None, None).expect("employee"),
    }
}

/// User `username` with role `role` and the shared test password.
pub fn add_user(
    conn: &rusqlite::Connection,
    username: &str,
    role: AppRole,
    employee_id: Option<i64>,
) -> i64 {
    insert_user(conn, username, &password_hash(), role, employee_id).expect("insert user")
}

/// Cheap bcrypt hash of the shared test password.
pub fn password_hash() -> String {
    hash_password_with_cost(PASSWORD, 4 /* bcrypt minimum cost */).expect("hash password")
}

/// Initialize a database file through the CLI (`--test init`).
pub fn init_cli_db(db_path: &str) {
    hrt()
        .args(["--db", db_path, "--test", "init"])
        .env("HRTRACK_ADMIN_LOGIN", "root")
        .env("HRTRACK_ADMIN_PASSWORD", PASSWORD)
        .assert()
        .success();
}
