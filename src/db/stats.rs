use crate::db::pool::DbPool;
use crate::db::tables::{TRACKED_TABLES, count_rows};
use crate::utils::colors::{CYAN, GREEN, GREY, RESET, YELLOW};
use rusqlite::OptionalExtension;
use std::fs;

pub fn print_db_info(pool: &mut DbPool, db_path: &str) -> rusqlite::Result<()> {
    println!();

    //
    // 1) FILE SIZE
    //
    let file_size = fs::metadata(db_path).map(|m| m.len()).unwrap_or(0);
    let file_mb = (file_size as f64) / (1024.0 * 1024.0);

    println!("{}• File:{} {}{}{}", CYAN, RESET, YELLOW, db_path, RESET);
    println!("{}• Size:{} {:.2} MB", CYAN, RESET, file_mb);

    //
    // 2) ROWS PER TABLE
    //
    println!("{}• Rows:{}", CYAN, RESET);
    let width = TRACKED_TABLES.iter().map(|t| t.len()).max().unwrap_or(0);
    for table in TRACKED_TABLES {
        let count = count_rows(&pool.conn, table)?;
        let color = if count > 0 { GREEN } else { GREY };
        println!("    {:<width$}  {}{}{}", table, color, count, RESET);
    }

    //
    // 3) WORK LOG RANGE
    //
    let first_day: Option<String> = pool
        .conn
        .query_row(
            "SELECT substr(date, 1, 10) FROM work_logs ORDER BY date ASC LIMIT 1",
            [],
            |row| row.get(0),
        )
        .optional()?;

    let last_day: Option<String> = pool
        .conn
        .query_row(
            "SELECT substr(date, 1, 10) FROM work_logs ORDER BY date DESC LIMIT 1",
            [],
            |row| row.get(0),
        )
        .optional()?;

    let fmt_first = first_day.unwrap_or_else(|| format!("{GREY}--{RESET}"));
    let fmt_last = last_day.unwrap_or_else(|| format!("{GREY}--{RESET}"));

    println!("{}• Work logs (UTC):{}", CYAN, RESET);
    println!("    from: {}", fmt_first);
    println!("    to:   {}", fmt_last);
    println!();

    Ok(())
}
