//! Generic access to the tracked tables, used by the export pipeline.

use rusqlite::types::Value;
use rusqlite::{Connection, Result};

/// Every organization table, in export order.
pub const TRACKED_TABLES: &[&str] = &[
    "users",
    "access_levels",
    "owners",
    "general_directors",
    "departments",
    "department_managers",
    "employees",
    "profiles",
    "contact_infos",
    "employment_contracts",
    "work_statuses",
    "work_logs",
    "dismissal_reasons",
    "dismissals",
];

/// All rows of one table with its column names.
///
/// Column names come from the prepared statement, so they are known even
/// when the table is empty.
#[derive(Debug, Clone)]
pub struct TableDump {
    pub name: &'static str,
    pub columns: Vec<String>,
    pub rows: Vec<Vec<Value>>,
}

pub fn dump_table(conn: &Connection, name: &'static str) -> Result<TableDump> {
    let mut stmt = conn.prepare(&format!("SELECT * FROM {name} ORDER BY id ASC"))?;
    let columns: Vec<String> = stmt.column_names().iter().map(|c| c.to_string()).collect();
    let width = columns.len();

    let rows = stmt.query_map([], |row| {
        let mut values = Vec::with_capacity(width);
        for i in 0..width {
            values.push(row.get::<_, Value>(i)?);
        }
        Ok(values)
    })?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }

    Ok(TableDump {
        name,
        columns,
        rows: out,
    })
}

/// Dump every tracked table, in export order.
pub fn dump_all(conn: &Connection) -> Result<Vec<TableDump>> {
    TRACKED_TABLES
        .iter()
        .map(|name| dump_table(conn, *name))
        .collect()
}

pub fn count_rows(conn: &Connection, name: &str) -> Result<i64> {
    conn.query_row(&format!("SELECT COUNT(*) FROM {name}"), [], |row| row.get(0))
}
