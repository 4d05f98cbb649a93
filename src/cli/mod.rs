pub mod commands;
pub mod parser;

use crate::config::Config;
use crate::core::auth::authenticate;
use crate::db::pool::DbPool;
use crate::errors::{AppError, AppResult};
use crate::models::user::CurrentUser;
use parser::Cli;

/// Authenticate the user given with `--user` / `--password`.
pub(crate) fn login(cli: &Cli, pool: &DbPool) -> AppResult<CurrentUser> {
    let username = cli
        .user
        .as_deref()
        .ok_or_else(|| AppError::Auth("missing --user (or HRTRACK_USER)".to_string()))?;
    let password = cli.password.as_deref().unwrap_or_default();
    authenticate(&pool.conn, username, password)
}

/// Open the configured database.
pub(crate) fn open_pool(cfg: &Config) -> AppResult<DbPool> {
    Ok(DbPool::new(&cfg.database)?)
}
