use crate::db::tables::TableDump;
use crate::errors::AppResult;
use crate::export::fs_utils::{ensure_parent_dir, write_atomically};
use crate::export::value::to_json;
use serde_json::{Map, Value};
use std::path::Path;

/// `{table: [{column: value, ...}, ...], ...}` keeping table and column order.
pub(crate) fn snapshot_document(tables: &[TableDump]) -> Value {
    let mut doc = Map::new();
    for table in tables {
        let rows = table
            .rows
            .iter()
            .map(|row| {
                let obj: Map<String, Value> = table
                    .columns
                    .iter()
                    .zip(row)
                    .map(|(col, v)| (col.clone(), to_json(v)))
                    .collect();
                Value::Object(obj)
            })
            .collect();
        doc.insert(table.name.to_string(), Value::Array(rows));
    }
    Value::Object(doc)
}

/// Write the snapshot as UTF-8 JSON with 2-space indentation.
pub(crate) fn write_json(path: &Path, tables: &[TableDump]) -> AppResult<()> {
    ensure_parent_dir(path)?;
    let doc = snapshot_document(tables);
    write_atomically(path, |out| {
        serde_json::to_writer_pretty(out, &doc)?;
        Ok(())
    })
}
