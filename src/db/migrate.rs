use crate::ui::messages::success;
use rusqlite::{Connection, OptionalExtension, Result};

/// Ensure that the `log` table exists. It also records applied migrations.
fn ensure_log_table(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS log (
            id        INTEGER PRIMARY KEY AUTOINCREMENT,
            date      TEXT NOT NULL,
            operation TEXT NOT NULL,
            target    TEXT DEFAULT '',
            message   TEXT NOT NULL
        );
        "#,
    )?;
    Ok(())
}

fn is_applied(conn: &Connection, version: &str) -> Result<bool> {
    let mut chk = conn.prepare(
        "SELECT 1 FROM log
         WHERE operation = 'migration_applied' AND target = ?1
         LIMIT 1",
    )?;
    Ok(chk.query_row([version], |_| Ok(())).optional()?.is_some())
}

fn mark_applied(conn: &Connection, version: &str, message: &str) -> Result<()> {
    conn.execute(
        "INSERT INTO log (date, operation, target, message)
         VALUES (datetime('now'), 'migration_applied', ?1, ?2)",
        [version, message],
    )?;
    Ok(())
}

/// Check if a table has the given column.
fn has_column(conn: &Connection, table: &str, column: &str) -> Result<bool> {
    let mut stmt = conn.prepare(&format!("PRAGMA table_info('{table}')"))?;
    let cols = stmt.query_map([], |row| row.get::<_, String>(1))?;

    for c in cols {
        if c? == column {
            return Ok(true);
        }
    }
    Ok(false)
}

/// The organization tables, created in dependency order.
fn create_hr_schema(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS access_levels (
            id          INTEGER PRIMARY KEY AUTOINCREMENT,
            name        TEXT UNIQUE,
            description TEXT
        );

        CREATE TABLE IF NOT EXISTS owners (
            id              INTEGER PRIMARY KEY AUTOINCREMENT,
            name            TEXT NOT NULL,
            owner_type      TEXT,
            access_level_id INTEGER REFERENCES access_levels(id)
        );

        CREATE TABLE IF NOT EXISTS general_directors (
            id              INTEGER PRIMARY KEY AUTOINCREMENT,
            full_name       TEXT NOT NULL,
            access_level_id INTEGER REFERENCES access_levels(id),
            owner_id        INTEGER REFERENCES owners(id)
        );

        CREATE TABLE IF NOT EXISTS department_managers (
            id              INTEGER PRIMARY KEY AUTOINCREMENT,
            full_name       TEXT NOT NULL,
            access_level_id INTEGER REFERENCES access_levels(id)
        );

        CREATE TABLE IF NOT EXISTS departments (
            id         INTEGER PRIMARY KEY AUTOINCREMENT,
            name       TEXT NOT NULL UNIQUE,
            efficiency REAL,
            manager_id INTEGER REFERENCES department_managers(id)
        );

        CREATE TABLE IF NOT EXISTS employees (
            id              INTEGER PRIMARY KEY AUTOINCREMENT,
            full_name       TEXT NOT NULL,
            position        TEXT,
            department_id   INTEGER REFERENCES departments(id),
            access_level_id INTEGER REFERENCES access_levels(id)
        );

        CREATE TABLE IF NOT EXISTS users (
            id            INTEGER PRIMARY KEY AUTOINCREMENT,
            username      TEXT NOT NULL UNIQUE,
            password_hash TEXT NOT NULL,
            role          TEXT NOT NULL DEFAULT 'viewer',
            employee_id   INTEGER REFERENCES employees(id)
        );

        CREATE TABLE IF NOT EXISTS profiles (
            id              INTEGER PRIMARY KEY AUTOINCREMENT,
            employee_id     INTEGER NOT NULL UNIQUE REFERENCES employees(id),
            warnings_count  INTEGER NOT NULL DEFAULT 0,
            access_level_id INTEGER REFERENCES access_levels(id)
        );

        CREATE TABLE IF NOT EXISTS contact_infos (
            id         INTEGER PRIMARY KEY AUTOINCREMENT,
            profile_id INTEGER NOT NULL UNIQUE REFERENCES profiles(id),
            phone      TEXT,
            email      TEXT,
            address    TEXT
        );

        CREATE TABLE IF NOT EXISTS employment_contracts (
            id              INTEGER PRIMARY KEY AUTOINCREMENT,
            employee_id     INTEGER NOT NULL UNIQUE REFERENCES employees(id),
            access_level_id INTEGER REFERENCES access_levels(id),
            content         TEXT,
            salary          REAL NOT NULL DEFAULT 0,
            status          TEXT NOT NULL DEFAULT 'active'
                            CHECK(status IN ('active','terminated','on_hold'))
        );

        CREATE TABLE IF NOT EXISTS work_statuses (
            id             INTEGER PRIMARY KEY AUTOINCREMENT,
            employee_id    INTEGER NOT NULL UNIQUE REFERENCES employees(id),
            current_status TEXT NOT NULL,
            workday_start  TEXT,
            workday_end    TEXT,
            breaks_taken   INTEGER NOT NULL DEFAULT 0,
            current_hours  REAL NOT NULL DEFAULT 0
        );

        CREATE TABLE IF NOT EXISTS work_logs (
            id           INTEGER PRIMARY KEY AUTOINCREMENT,
            employee_id  INTEGER NOT NULL REFERENCES employees(id),
            date         TEXT NOT NULL,
            start_time   TEXT,
            end_time     TEXT,
            worked_hours REAL
        );

        CREATE INDEX IF NOT EXISTS idx_work_logs_employee_date ON work_logs(employee_id, date);

        CREATE TABLE IF NOT EXISTS dismissal_reasons (
            id          INTEGER PRIMARY KEY AUTOINCREMENT,
            title       TEXT UNIQUE,
            description TEXT
        );

        CREATE TABLE IF NOT EXISTS dismissals (
            id          INTEGER PRIMARY KEY AUTOINCREMENT,
            employee_id INTEGER NOT NULL REFERENCES employees(id),
            reason_id   INTEGER NOT NULL REFERENCES dismissal_reasons(id),
            date        TEXT NOT NULL,
            comment     TEXT
        );
        "#,
    )?;
    Ok(())
}

/// Add the UTC calendar day to work logs and make it unique per employee.
fn add_work_log_day(conn: &Connection) -> Result<()> {
    if !has_column(conn, "work_logs", "day")? {
        conn.execute_batch(
            r#"
            ALTER TABLE work_logs ADD COLUMN day TEXT NOT NULL DEFAULT '';
            UPDATE work_logs SET day = substr(date, 1, 10);
            "#,
        )?;
    }

    // Older databases may hold several logs for one day: keep the most
    // recent as the day's log and leave the others without a day key.
    conn.execute_batch(
        r#"
        UPDATE work_logs SET day = day || '#' || id
        WHERE id NOT IN (
            SELECT MAX(id) FROM work_logs GROUP BY employee_id, day
        );

        CREATE UNIQUE INDEX IF NOT EXISTS idx_work_logs_employee_day
            ON work_logs(employee_id, day);
        "#,
    )?;
    Ok(())
}

type Migration = (&'static str, &'static str, fn(&Connection) -> Result<()>);

const MIGRATIONS: &[Migration] = &[
    (
        "20251001_0001_create_hr_schema",
        "Created organization tables",
        create_hr_schema,
    ),
    (
        "20251014_0002_work_logs_day_unique",
        "Added UTC day key and unique (employee_id, day) index to work_logs",
        add_work_log_day,
    ),
];

/// Public entry point: run all pending migrations.
///
/// Called by `db::init_db()`.
pub fn run_pending_migrations(conn: &Connection) -> Result<()> {
    ensure_log_table(conn)?;

    for (version, message, apply) in MIGRATIONS {
        if is_applied(conn, version)? {
            continue;
        }

        conn.execute_batch("BEGIN;")?;
        let outcome = apply(conn).and_then(|_| mark_applied(conn, version, message));
        match outcome {
            Ok(()) => conn.execute_batch("COMMIT;")?,
            Err(e) => {
                let _ = conn.execute_batch("ROLLBACK;");
                return Err(e);
            }
        }

        success(format!("Migration applied: {version} → {message}"));
    }

    Ok(())
}
