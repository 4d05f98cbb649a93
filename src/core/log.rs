use crate::db::log::load_log;
use crate::db::pool::DbPool;
use crate::errors::AppResult;
use ansi_term::Colour;

const MAX_OP_WIDTH: usize = 60;

/// Colour of the operation word in the log listing.
fn color_for_operation(op: &str) -> Colour {
    match op {
        "start_day" => Colour::Green,
        "end_day" => Colour::Yellow,
        "backup" | "full_backup" => Colour::Blue,
        "upload" => Colour::Cyan,
        "export_json" | "export_csv" => Colour::RGB(255, 153, 51),
        "migration_applied" => Colour::Purple,
        "init" => Colour::Red,
        _ => Colour::White,
    }
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        return s.to_string();
    }
    let mut out: String = s.chars().take(max - 3).collect();
    out.push_str("...");
    out
}

pub struct LogLogic;

impl LogLogic {
    pub fn print_log(pool: &mut DbPool) -> AppResult<()> {
        let entries = load_log(&pool.conn)?;

        if entries.is_empty() {
            println!("📜 Internal log is empty.");
            return Ok(());
        }

        let rows: Vec<(i64, String, String, String, String)> = entries
            .into_iter()
            .map(|e| {
                let date = chrono::DateTime::parse_from_rfc3339(&e.date)
                    .map(|dt| dt.format("%FT%T%:z").to_string())
                    .unwrap_or(e.date);
                let op_target = if e.target.is_empty() {
                    e.operation.clone()
                } else {
                    truncate(&format!("{} ({})", e.operation, e.target), MAX_OP_WIDTH)
                };
                (e.id, date, e.operation, op_target, e.message)
            })
            .collect();

        let id_w = rows.iter().map(|r| r.0.to_string().len()).max().unwrap_or(1);
        let date_w = rows.iter().map(|r| r.1.chars().count()).max().unwrap_or(10);
        let op_w = rows.iter().map(|r| r.3.chars().count()).max().unwrap_or(10);

        println!("📜 Internal log:\n");

        for (id, date, operation, op_target, message) in rows {
            let color = color_for_operation(&operation);
            let padding = " ".repeat(op_w.saturating_sub(op_target.chars().count()));

            // only the operation word is coloured
            let shown = match op_target.split_once(' ') {
                Some((word, rest)) => format!("{} {}", color.paint(word), rest),
                None => color.paint(op_target.as_str()).to_string(),
            };

            println!(
                "{:>id_w$}: {:<date_w$} | {}{} => {}",
                id, date, shown, padding, message
            );
        }

        Ok(())
    }
}
