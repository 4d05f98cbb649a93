use crate::cli::parser::{Cli, Commands};
use crate::cli::{login, open_pool};
use crate::config::Config;
use crate::core::access::{Capability, require_capability};
use crate::core::backup::BackupLogic;
use crate::errors::AppResult;
use crate::ui::messages::{detail, header};

/// Handle `backup` (interactive, admin/hr) and `full-backup` (unattended).
pub fn handle(cli: &Cli, cfg: &Config) -> AppResult<()> {
    match cli.command {
        Commands::Backup { sftp, compress } => {
            let mut pool = open_pool(cfg)?;
            let current = login(cli, &pool)?;
            require_capability(&current, Capability::Backups)?;

            let outcome = BackupLogic::create_backup(&mut pool, cfg, sftp, compress)?;

            header("Backup");
            detail("Local", outcome.local_path.display());
            detail("Remote", outcome.remote_path.as_deref().unwrap_or("--"));
        }
        Commands::FullBackup => {
            let outcome = BackupLogic::daily_full_backup(cfg)?;

            header("Full backup");
            detail("Local", outcome.local_path.display());
            detail("Remote", outcome.remote_path.as_deref().unwrap_or("--"));
        }
        _ => {}
    }

    Ok(())
}

