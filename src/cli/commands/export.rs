use crate::cli::parser::{Cli, Commands};
use crate::cli::{login, open_pool};
use crate::config::Config;
use crate::core::access::{Capability, require_capability};
use crate::errors::AppResult;
use crate::export::ExportLogic;
use std::path::Path;

pub fn handle(cli: &Cli, cfg: &Config) -> AppResult<()> {
    if let Commands::Export { json, csv } = &cli.command {
        let pool = open_pool(cfg)?;
        let current = login(cli, &pool)?;
        require_capability(&current, Capability::Backups)?;

        if let Some(file) = json {
            ExportLogic::export_all_to_json(&pool.conn, Path::new(file))?;
        }
        if let Some(dir) = csv {
            ExportLogic::export_tables_to_csv(&pool.conn, Path::new(dir))?;
        }
    }
    Ok(())
}
