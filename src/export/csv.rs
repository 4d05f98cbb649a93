use crate::db::tables::TableDump;
use crate::errors::AppResult;
use crate::export::fs_utils::write_atomically;
use crate::export::value::to_text;
use csv::{QuoteStyle, WriterBuilder};
use std::path::Path;

/// Write one table as `;`-separated CSV. The header row is always written,
/// so an empty table gives a header-only file.
pub(crate) fn write_csv(path: &Path, table: &TableDump) -> AppResult<()> {
    write_atomically(path, |out| {
        let mut wtr = WriterBuilder::new()
            .delimiter(b';')
            .quote_style(QuoteStyle::Necessary)
            .from_writer(out);

        wtr.write_record(&table.columns)?;
        for row in &table.rows {
            wtr.write_record(row.iter().map(to_text))?;
        }

        wtr.flush()?;
        Ok(())
    })
}
