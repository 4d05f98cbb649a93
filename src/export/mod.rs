// src/export/mod.rs

mod csv;
mod fs_utils;
mod json;
pub mod logic;
mod value;

pub use logic::{ExportLogic, ExportReport};

use crate::ui::messages::success;
use std::path::Path;

/// Completion message shared by the exporters.
pub(crate) fn notify_export_success(label: &str, path: &Path) {
    success(format!("{label} export completed: {}", path.display()));
}
