// src/export/logic.rs

use crate::db::log::ttlog_quiet;
use crate::db::tables::dump_all;
use crate::errors::AppResult;
use crate::export::csv::write_csv;
use crate::export::json::write_json;
use crate::export::notify_export_success;
use crate::ui::messages::info;
use rusqlite::Connection;
use std::fs;
use std::path::{Path, PathBuf};

/// Rows written per table, in export order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportReport {
    pub files: Vec<PathBuf>,
    pub row_counts: Vec<(&'static str, usize)>,
}

impl ExportReport {
    pub fn total_rows(&self) -> usize {
        self.row_counts.iter().map(|(_, n)| n).sum()
    }
}

/// Export of the whole record set.
pub struct ExportLogic;

impl ExportLogic {
    /// One JSON document with every tracked table.
    /// Parent directories of `path` are created.
    pub fn export_all_to_json(conn: &Connection, path: &Path) -> AppResult<ExportReport> {
        info(format!("Exporting to JSON: {}", path.display()));

        let tables = dump_all(conn)?;
        write_json(path, &tables)?;

        let report = ExportReport {
            files: vec![path.to_path_buf()],
            row_counts: tables.iter().map(|t| (t.name, t.rows.len())).collect(),
        };

        ttlog_quiet(
            conn,
            "export_json",
            &path.to_string_lossy(),
            &format!("Exported {} rows", report.total_rows()),
        );
        notify_export_success("JSON", path);
        Ok(report)
    }

    /// One `<table>.csv` per tracked table inside `dir` (created if missing).
    pub fn export_tables_to_csv(conn: &Connection, dir: &Path) -> AppResult<ExportReport> {
        info(format!("Exporting CSV files to: {}", dir.display()));
        fs::create_dir_all(dir)?;

        let tables = dump_all(conn)?;
        let mut files = Vec::with_capacity(tables.len());

        for table in &tables {
            let file = dir.join(format!("{}.csv", table.name));
            write_csv(&file, table)?;
            files.push(file);
        }

        let report = ExportReport {
            files,
            row_counts: tables.iter().map(|t| (t.name, t.rows.len())).collect(),
        };

        ttlog_quiet(
            conn,
            "export_csv",
            &dir.to_string_lossy(),
            &format!(
                "Exported {} tables ({} rows)",
                report.files.len(),
                report.total_rows()
            ),
        );
        notify_export_success("CSV", dir);
        Ok(report)
    }
}
