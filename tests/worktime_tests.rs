mod common;

use chrono::{NaiveDate, NaiveDateTime};
use common::{memory_pool, seed_org};
use hrtrack::core::worktime::{EndOutcome, StartOutcome, WorkTimeLogic};
use hrtrack::db::initialize::init_db;
use hrtrack::db::log::load_log;
use hrtrack::db::pool::DbPool;
use hrtrack::db::tables::count_rows;
use hrtrack::errors::AppError;
use hrtrack::models::work_status::StatusTag;

fn at(day: u32, h: u32, m: u32, s: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2025, 10, day)
        .unwrap()
        .and_hms_opt(h, m, s)
        .unwrap()
}

#[test]
fn start_creates_one_log_and_working_status() {
    let mut pool = memory_pool();
    let org = seed_org(&pool.conn);

    let outcome = WorkTimeLogic::start_workday_at(&mut pool.conn, org.alice, at(6, 9, 0, 0))
        .expect("start");
    assert_eq!(outcome, StartOutcome::Started { at: at(6, 9, 0, 0) });

    let logs = WorkTimeLogic::work_logs_for(&pool.conn, org.alice).unwrap();
    assert_eq!(logs.len(), 1);
    assert_eq!(logs[0].start_time, Some(at(6, 9, 0, 0)));
    assert!(logs[0].is_open());
    assert_eq!(logs[0].day, NaiveDate::from_ymd_opt(2025, 10, 6).unwrap());

    let status = WorkTimeLogic::workday_status(&pool.conn, org.alice)
        .unwrap()
        .expect("status row");
    assert_eq!(status.current_status, StatusTag::Working);
    assert_eq!(status.workday_start, Some(at(6, 9, 0, 0).time()));

    let ops: Vec<String> = load_log(&pool.conn)
        .unwrap()
        .into_iter()
        .map(|e| e.operation)
        .collect();
    assert!(ops.iter().any(|op| op == "start_day"));
}

#[test]
fn second_start_same_day_keeps_first_start() {
    let mut pool = memory_pool();
    let org = seed_org(&pool.conn);

    WorkTimeLogic::start_workday_at(&mut pool.conn, org.alice, at(6, 9, 0, 0)).unwrap();
    let again =
        WorkTimeLogic::start_workday_at(&mut pool.conn, org.alice, at(6, 10, 15, 0)).unwrap();

    assert_eq!(again, StartOutcome::AlreadyStarted);
    let logs = WorkTimeLogic::work_logs_for(&pool.conn, org.alice).unwrap();
    assert_eq!(logs.len(), 1);
    assert_eq!(logs[0].start_time, Some(at(6, 9, 0, 0)));
}

#[test]
fn end_without_start_changes_nothing() {
    let mut pool = memory_pool();
    let org = seed_org(&pool.conn);

    let outcome = WorkTimeLogic::end_workday_at(&mut pool.conn, org.bob, at(6, 17, 0, 0)).unwrap();

    assert_eq!(outcome, EndOutcome::NotStarted);
    assert_eq!(count_rows(&pool.conn, "work_logs").unwrap(), 0);
    assert!(
        WorkTimeLogic::workday_status(&pool.conn, org.bob)
            .unwrap()
            .is_none()
    );
}

#[test]
fn full_day_records_rounded_hours() {
    let mut pool = memory_pool();
    let org = seed_org(&pool.conn);

    WorkTimeLogic::start_workday_at(&mut pool.conn, org.carol, at(6, 9, 0, 0)).unwrap();
    let outcome =
        WorkTimeLogic::end_workday_at(&mut pool.conn, org.carol, at(6, 17, 30, 0)).unwrap();

    assert_eq!(outcome, EndOutcome::Ended { worked_hours: 8.5 });

    let logs = WorkTimeLogic::work_logs_for(&pool.conn, org.carol).unwrap();
    assert_eq!(logs.len(), 1);
    assert!(logs[0].is_closed());
    assert_eq!(logs[0].worked_hours, Some(8.5));
    assert_eq!(logs[0].end_time, Some(at(6, 17, 30, 0)));

    let status = WorkTimeLogic::workday_status(&pool.conn, org.carol)
        .unwrap()
        .unwrap();
    assert_eq!(status.current_status, StatusTag::Off);
    assert_eq!(status.workday_end, Some(at(6, 17, 30, 0).time()));
    assert_eq!(status.current_hours, 8.5);
}

#[test]
fn hours_round_to_two_decimals() {
    let mut pool = memory_pool();
    let org = seed_org(&pool.conn);

    // 1h 20m = 1.3333... h
    WorkTimeLogic::start_workday_at(&mut pool.conn, org.bob, at(7, 8, 0, 0)).unwrap();
    let outcome = WorkTimeLogic::end_workday_at(&mut pool.conn, org.bob, at(7, 9, 20, 0)).unwrap();

    assert_eq!(outcome, EndOutcome::Ended { worked_hours: 1.33 });
}

#[test]
fn ended_day_stays_ended() {
    let mut pool = memory_pool();
    let org = seed_org(&pool.conn);

    WorkTimeLogic::start_workday_at(&mut pool.conn, org.alice, at(8, 9, 0, 0)).unwrap();
    WorkTimeLogic::end_workday_at(&mut pool.conn, org.alice, at(8, 17, 0, 0)).unwrap();

    let end_again =
        WorkTimeLogic::end_workday_at(&mut pool.conn, org.alice, at(8, 18, 0, 0)).unwrap();
    assert_eq!(end_again, EndOutcome::AlreadyEnded);

    let start_again =
        WorkTimeLogic::start_workday_at(&mut pool.conn, org.alice, at(8, 19, 0, 0)).unwrap();
    assert_eq!(start_again, StartOutcome::AlreadyStarted);

    let logs = WorkTimeLogic::work_logs_for(&pool.conn, org.alice).unwrap();
    assert_eq!(logs.len(), 1);
    assert_eq!(logs[0].end_time, Some(at(8, 17, 0, 0)));
    assert_eq!(logs[0].worked_hours, Some(8.0));
}

// The day boundary is UTC midnight: an end just after midnight belongs to
// the new day, which has not been started.
#[test]
fn end_after_utc_midnight_is_a_new_day() {
    let mut pool = memory_pool();
    let org = seed_org(&pool.conn);

    WorkTimeLogic::start_workday_at(&mut pool.conn, org.alice, at(9, 23, 59, 59)).unwrap();
    let outcome =
        WorkTimeLogic::end_workday_at(&mut pool.conn, org.alice, at(10, 0, 0, 1)).unwrap();

    assert_eq!(outcome, EndOutcome::NotStarted);
    let logs = WorkTimeLogic::work_logs_for(&pool.conn, org.alice).unwrap();
    assert_eq!(logs.len(), 1);
    assert!(logs[0].is_open());
}

#[test]
fn stale_open_log_is_left_alone_by_next_day_start() {
    let mut pool = memory_pool();
    let org = seed_org(&pool.conn);

    WorkTimeLogic::start_workday_at(&mut pool.conn, org.bob, at(13, 9, 0, 0)).unwrap();
    let next = WorkTimeLogic::start_workday_at(&mut pool.conn, org.bob, at(14, 8, 30, 0)).unwrap();
    assert_eq!(next, StartOutcome::Started { at: at(14, 8, 30, 0) });

    let logs = WorkTimeLogic::work_logs_for(&pool.conn, org.bob).unwrap();
    assert_eq!(logs.len(), 2);
    assert!(logs[0].is_open());
    assert_eq!(logs[0].end_time, None);
    assert_eq!(logs[1].start_time, Some(at(14, 8, 30, 0)));
}

#[test]
fn employees_are_tracked_independently() {
    let mut pool = memory_pool();
    let org = seed_org(&pool.conn);

    WorkTimeLogic::start_workday_at(&mut pool.conn, org.alice, at(15, 9, 0, 0)).unwrap();
    let bob_end =
        WorkTimeLogic::end_workday_at(&mut pool.conn, org.bob, at(15, 17, 0, 0)).unwrap();

    assert_eq!(bob_end, EndOutcome::NotStarted);
    assert_eq!(
        WorkTimeLogic::work_logs_for(&pool.conn, org.alice)
            .unwrap()
            .len(),
        1
    );
    assert!(
        WorkTimeLogic::work_logs_for(&pool.conn, org.bob)
            .unwrap()
            .is_empty()
    );
}

#[test]
fn unknown_employee_is_not_found() {
    let mut pool = memory_pool();
    seed_org(&pool.conn);

    let err = WorkTimeLogic::start_workday_at(&mut pool.conn, 9999, at(6, 9, 0, 0)).unwrap_err();
    assert!(matches!(err, AppError::NotFound(_)), "got {err:?}");

    let err = WorkTimeLogic::end_workday_at(&mut pool.conn, 9999, at(6, 9, 0, 0)).unwrap_err();
    assert!(matches!(err, AppError::NotFound(_)), "got {err:?}");
    assert_eq!(count_rows(&pool.conn, "work_logs").unwrap(), 0);
}

#[test]
fn database_without_day_key_is_migrated_and_keeps_latest_log() {
    let mut pool = DbPool::in_memory().unwrap();
    pool.conn
        .execute_batch(
            r#"
            CREATE TABLE employees (
                id              INTEGER PRIMARY KEY AUTOINCREMENT,
                full_name       TEXT NOT NULL,
                position        TEXT,
                department_id   INTEGER,
                access_level_id INTEGER
            );
            CREATE TABLE work_logs (
                id           INTEGER PRIMARY KEY AUTOINCREMENT,
                employee_id  INTEGER NOT NULL REFERENCES employees(id),
                date         TEXT NOT NULL,
                start_time   TEXT,
                end_time     TEXT,
                worked_hours REAL
            );
            INSERT INTO employees (id, full_name) VALUES (1, 'Alice');
            INSERT INTO work_logs (employee_id, date, start_time) VALUES
                (1, '2025-10-14T07:00:00.000000', '2025-10-14T07:00:00.000000'),
                (1, '2025-10-14T09:00:00.000000', '2025-10-14T09:00:00.000000');
            "#,
        )
        .unwrap();

    init_db(&pool.conn).expect("migrate legacy db");

    let days: Vec<String> = pool
        .conn
        .prepare("SELECT day FROM work_logs ORDER BY id")
        .unwrap()
        .query_map([], |r| r.get(0))
        .unwrap()
        .map(Result::unwrap)
        .collect();
    assert_eq!(days, vec!["2025-10-14#1", "2025-10-14"]);

    let indexed: i64 = pool
        .conn
        .query_row(
            "SELECT COUNT(*) FROM sqlite_master
             WHERE type = 'index' AND name = 'idx_work_logs_employee_day'",
            [],
            |r| r.get(0),
        )
        .unwrap();
    assert_eq!(indexed, 1);

    let outcome = WorkTimeLogic::start_workday_at(&mut pool.conn, 1, at(14, 10, 0, 0)).unwrap();
    assert_eq!(outcome, StartOutcome::AlreadyStarted);

    let outcome = WorkTimeLogic::end_workday_at(&mut pool.conn, 1, at(14, 17, 0, 0)).unwrap();
    assert_eq!(outcome, EndOutcome::Ended { worked_hours: 8.0 });

    let logs = WorkTimeLogic::work_logs_for(&pool.conn, 1).unwrap();
    assert_eq!(logs.len(), 2);
    let closed: Vec<i64> = logs.iter().filter(|l| !l.is_open()).map(|l| l.id).collect();
    assert_eq!(closed, vec![2]);
    assert!(logs.iter().all(|l| l.day == NaiveDate::from_ymd_opt(2025, 10, 14).unwrap()));

    // a second run finds both migrations applied
    init_db(&pool.conn).unwrap();
    assert_eq!(count_rows(&pool.conn, "work_logs").unwrap(), 2);
}
