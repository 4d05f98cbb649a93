use crate::cli::open_pool;
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::db::initialize::init_db;
use crate::db::pool::DbPool;
use crate::db::stats;
use crate::errors::AppResult;
use crate::ui::messages::{error, info, success};

/// Handle `db --migrate | --info | --check | --vacuum`, in that order.
pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    let Commands::Db {
        migrate,
        check,
        vacuum,
        info: show_info,
    } = cmd
    else {
        return Ok(());
    };

    if !(*migrate || *check || *vacuum || *show_info) {
        info("Nothing to do: pass --migrate, --info, --check or --vacuum.");
        return Ok(());
    }

    let mut pool = open_pool(cfg)?;

    if *migrate {
        info("Running migrations…");
        init_db(&pool.conn)?;
        success("Migration completed.");
    }

    if *show_info {
        stats::print_db_info(&mut pool, &cfg.database)?;
    }

    if *check {
        integrity_check(&pool)?;
    }

    if *vacuum {
        info("Running VACUUM…");
        pool.conn.execute_batch("VACUUM;")?;
        success("Vacuum completed.");
    }

    Ok(())
}

fn integrity_check(pool: &DbPool) -> AppResult<()> {
    info("Running integrity check…");

    let integrity: String = pool
        .conn
        .query_row("PRAGMA integrity_check;", [], |row| row.get(0))?;

    if integrity == "ok" {
        success("Integrity check passed.");
    } else {
        error(format!("Integrity check failed: {integrity}"));
    }
    Ok(())
}
