//! hrtrack library root.
//! Exposes the CLI parser, the high-level run() function and the modules
//! behind it: record store, work-time tracker, access policy and the
//! backup/export pipeline.

pub mod cli;
pub mod config;
pub mod core;
pub mod db;
pub mod errors;
pub mod export;
pub mod models;
pub mod remote;
pub mod ui;
pub mod utils;

use clap::Parser;
use cli::parser::{Cli, Commands};
use config::Config;
use errors::AppResult;

/// Central command dispatcher
pub fn dispatch(cli: &Cli, cfg: &Config) -> AppResult<()> {
    match &cli.command {
        Commands::Init => cli::commands::init::handle(cli),
        Commands::Config { .. } => cli::commands::config::handle(&cli.command, cfg),
        Commands::Db { .. } => cli::commands::db::handle(&cli.command, cfg),
        Commands::Log { .. } => cli::commands::log::handle(&cli.command, cfg),
        Commands::Start | Commands::End | Commands::Status => {
            cli::commands::clock::handle(cli, cfg)
        }
        Commands::Employees | Commands::Managers => cli::commands::people::handle(cli, cfg),
        Commands::Backup { .. } | Commands::FullBackup => cli::commands::backup::handle(cli, cfg),
        Commands::Export { .. } => cli::commands::export::handle(cli, cfg),
    }
}

/// Entry point used by main.rs
pub fn run() -> AppResult<()> {
    let cli = Cli::parse();

    // configuration is resolved once, at process start
    let mut cfg = if cli.test {
        let mut c = Config::default();
        c.apply_env()?;
        c
    } else {
        Config::load()?
    };

    if let Some(custom_db) = &cli.db {
        cfg.database = custom_db.clone();
    }

    dispatch(&cli, &cfg)
}
