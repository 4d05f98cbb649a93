mod common;

use common::{PASSWORD, add_user, hrt, init_cli_db, seed_org, setup_test_db};
use hrtrack::db::pool::DbPool;
use hrtrack::db::tables::count_rows;
use hrtrack::models::role::AppRole;
use predicates::prelude::*;
use predicates::str::contains;
use std::fs;
use tempfile::tempdir;

/// Initialized database with the sample organization and one user per role.
fn prepare(name: &str) -> String {
    let db_path = setup_test_db(name);
    init_cli_db(&db_path);

    let pool = DbPool::new(&db_path).expect("open db");
    let org = seed_org(&pool.conn);
    add_user(&pool.conn, "alice", AppRole::Manager, Some(org.alice));
    add_user(&pool.conn, "bob", AppRole::Employee, Some(org.bob));
    add_user(&pool.conn, "hr", AppRole::Hr, None);
    add_user(&pool.conn, "boss", AppRole::GeneralDirector, None);
    db_path
}

#[test]
fn init_creates_schema_and_admin() {
    let db_path = setup_test_db("cli_init");

    hrt()
        .args(["--db", db_path.as_str(), "--test", "init"])
        .env("HRTRACK_ADMIN_LOGIN", "root")
        .env("HRTRACK_ADMIN_PASSWORD", PASSWORD)
        .assert()
        .success()
        .stdout(contains("Administrator 'root' created"))
        .stdout(contains("initialization completed"));

    let pool = DbPool::new(&db_path).unwrap();
    assert_eq!(count_rows(&pool.conn, "users").unwrap(), 1);
    assert_eq!(count_rows(&pool.conn, "employees").unwrap(), 0);

    // running init again keeps the existing admin
    hrt()
        .args(["--db", db_path.as_str(), "--test", "init"])
        .env("HRTRACK_ADMIN_LOGIN", "root")
        .env("HRTRACK_ADMIN_PASSWORD", PASSWORD)
        .assert()
        .success()
        .stdout(contains("Administrator").not());
    assert_eq!(count_rows(&pool.conn, "users").unwrap(), 1);
}

#[test]
fn clock_in_and_out_through_cli() {
    let db_path = prepare("cli_clock");
    let login = ["--db", db_path.as_str(), "--test", "--user", "bob", "--password", PASSWORD];

    hrt()
        .args(login)
        .arg("end")
        .assert()
        .success()
        .stderr(contains("has not been started"));

    hrt()
        .args(login)
        .arg("start")
        .assert()
        .success()
        .stdout(contains("Workday start recorded"));

    hrt()
        .args(login)
        .arg("start")
        .assert()
        .success()
        .stderr(contains("already started"));

    hrt()
        .args(login)
        .arg("status")
        .assert()
        .success()
        .stdout(contains("working"))
        .stdout(contains("Work logs (UTC)"));

    hrt()
        .args(login)
        .arg("end")
        .assert()
        .success()
        .stdout(contains("Workday end recorded"));

    hrt()
        .args(login)
        .arg("status")
        .assert()
        .success()
        .stdout(contains("off"));

    let pool = DbPool::new(&db_path).unwrap();
    assert_eq!(count_rows(&pool.conn, "work_logs").unwrap(), 1);
}

#[test]
fn credentials_are_checked() {
    let db_path = prepare("cli_auth");

    hrt()
        .args(["--db", db_path.as_str(), "--test", "--user", "bob", "--password", "nope", "status"])
        .assert()
        .failure()
        .stderr(contains("Authentication failed"));

    hrt()
        .args(["--db", db_path.as_str(), "--test", "status"])
        .env_remove("HRTRACK_USER")
        .assert()
        .failure()
        .stderr(contains("missing --user"));

    // credentials from the environment
    hrt()
        .args(["--db", db_path.as_str(), "--test", "status"])
        .env("HRTRACK_USER", "bob")
        .env("HRTRACK_PASSWORD", PASSWORD)
        .assert()
        .success()
        .stdout(contains("Bob"));
}

#[test]
fn admin_without_employee_cannot_clock_in() {
    let db_path = prepare("cli_admin_clock");

    hrt()
        .args(["--db", db_path.as_str(), "--test", "--user", "root", "--password", PASSWORD, "start"])
        .assert()
        .failure()
        .stderr(contains("no employee record linked"));
}

#[test]
fn employee_list_follows_role() {
    let db_path = prepare("cli_employees");
    let as_user = |user: &str| {
        let mut cmd = hrt();
        cmd.args(["--db", db_path.as_str(), "--test", "--user", user, "--password", PASSWORD, "employees"]);
        cmd
    };

    as_user("bob")
        .assert()
        .success()
        .stdout(contains("Bob"))
        .stdout(contains("Alice").not());

    as_user("alice")
        .assert()
        .success()
        .stdout(contains("Alice"))
        .stdout(contains("Bob"))
        .stdout(contains("Carol").not());

    as_user("hr")
        .assert()
        .success()
        .stdout(contains("Carol"))
        .stdout(contains("Dave"));
}

#[test]
fn managers_overview_is_for_the_general_director() {
    let db_path = prepare("cli_managers");

    hrt()
        .args(["--db", db_path.as_str(), "--test", "--user", "boss", "--password", PASSWORD, "managers"])
        .assert()
        .success()
        .stdout(contains("Maria Rossi"))
        .stdout(contains("Support"));

    hrt()
        .args(["--db", db_path.as_str(), "--test", "--user", "hr", "--password", PASSWORD, "managers"])
        .assert()
        .failure()
        .stderr(contains("Access denied"));
}

#[test]
fn backup_and_export_need_admin_or_hr() {
    let db_path = prepare("cli_backup");
    let out = tempdir().unwrap();
    let backups = out.path().join("backups");

    hrt()
        .args(["--db", db_path.as_str(), "--test", "--user", "hr", "--password", PASSWORD, "backup"])
        .env("HRTRACK_BACKUP_DIR", &backups)
        .assert()
        .success()
        .stdout(contains("Backup created"));

    let created: Vec<_> = fs::read_dir(&backups).unwrap().collect();
    assert_eq!(created.len(), 1);

    hrt()
        .args(["--db", db_path.as_str(), "--test", "--user", "bob", "--password", PASSWORD, "backup"])
        .env("HRTRACK_BACKUP_DIR", &backups)
        .assert()
        .failure()
        .stderr(contains("Access denied"));

    let csv_dir = out.path().join("csv");
    hrt()
        .args(["--db", db_path.as_str(), "--test", "--user", "root", "--password", PASSWORD, "export", "--csv"])
        .arg(&csv_dir)
        .assert()
        .success();
    assert!(csv_dir.join("employees.csv").is_file());
    assert!(csv_dir.join("work_logs.csv").is_file());

    let json = out.path().join("snapshot.json");
    hrt()
        .args(["--db", db_path.as_str(), "--test", "--user", "root", "--password", PASSWORD, "export", "--json"])
        .arg(&json)
        .assert()
        .success()
        .stdout(contains("JSON export completed"));
    assert!(json.is_file());
}

#[test]
fn export_requires_a_target() {
    let db_path = prepare("cli_export_args");

    hrt()
        .args(["--db", db_path.as_str(), "--test", "--user", "root", "--password", PASSWORD, "export"])
        .assert()
        .failure();
}

#[test]
fn full_backup_fails_cleanly_when_dump_is_missing() {
    let db_path = prepare("cli_full_backup");
    let out = tempdir().unwrap();

    hrt()
        .args(["--db", db_path.as_str(), "--test", "full-backup"])
        .env("HRTRACK_BACKUP_DIR", out.path())
        .env("HRTRACK_DUMP_PROGRAM", out.path().join("no-such-dump-tool"))
        .assert()
        .failure()
        .stderr(contains("Error:"));

    let leftovers: Vec<_> = fs::read_dir(out.path()).unwrap().collect();
    assert!(leftovers.is_empty());
}

#[test]
fn config_print_masks_secrets() {
    hrt()
        .args(["--test", "config", "--print"])
        .env("HRTRACK_ADMIN_PASSWORD", "very-secret")
        .env("HRTRACK_CLOUD_TOKEN", "tok-abc")
        .assert()
        .success()
        .stdout(contains("very-secret").not())
        .stdout(contains("tok-abc").not())
        .stdout(contains("********"));
}

#[test]
fn malformed_port_in_environment_is_rejected() {
    hrt()
        .args(["--test", "config", "--print"])
        .env("HRTRACK_SFTP_PORT", "abc")
        .assert()
        .failure()
        .stderr(contains("HRTRACK_SFTP_PORT: invalid port 'abc'"));

    hrt()
        .args(["--test", "config", "--print"])
        .env("HRTRACK_DUMP_PORT", "70000")
        .assert()
        .failure()
        .stderr(contains("HRTRACK_DUMP_PORT: invalid port '70000'"));

    hrt()
        .args(["--test", "config", "--print"])
        .env("HRTRACK_SFTP_PORT", "2222")
        .assert()
        .success()
        .stdout(contains("2222"));
}
