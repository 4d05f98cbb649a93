use crate::config::Config;
use crate::db::log::{ttlog, ttlog_quiet};
use crate::db::queries::{find_employee, find_user_by_username, insert_user, set_user_password};
use crate::errors::{AppError, AppResult};
use crate::models::role::AppRole;
use crate::models::user::CurrentUser;
use sha2::{Digest, Sha256};
use subtle::ConstantTimeEq;

/// bcrypt work factor used for new hashes.
pub const HASH_COST: u32 = bcrypt::DEFAULT_COST;

/// Prefix of the salted SHA-256 hashes written by earlier releases.
const LEGACY_SCHEME: &str = "sha256$";

/// bcrypt hash (`$2b$...`), compatible with hashes made by passlib.
pub fn hash_password(password: &str) -> AppResult<String> {
    hash_password_with_cost(password, HASH_COST)
}

pub fn hash_password_with_cost(password: &str, cost: u32) -> AppResult<String> {
    Ok(bcrypt::hash(password, cost)?)
}

/// Check `password` against a bcrypt hash or a legacy `sha256$salt$digest`
/// hash. Malformed hashes never match.
pub fn verify_password(password: &str, hashed: &str) -> bool {
    if is_legacy_hash(hashed) {
        return verify_legacy(password, hashed);
    }
    bcrypt::verify(password, hashed).unwrap_or(false)
}

pub fn is_legacy_hash(hashed: &str) -> bool {
    hashed.starts_with(LEGACY_SCHEME)
}

fn verify_legacy(password: &str, hashed: &str) -> bool {
    let Some((salt_hex, expected)) = hashed[LEGACY_SCHEME.len()..].split_once('$') else {
        return false;
    };

    let mut hasher = Sha256::new();
    hasher.update(salt_hex.as_bytes());
    hasher.update(password.as_bytes());
    let actual = hex::encode(hasher.finalize());

    bool::from(actual.as_bytes().ct_eq(expected.as_bytes()))
}

/// Create the configured administrator when no user has that login.
/// Returns `true` when a user was created.
pub fn ensure_admin_exists(conn: &rusqlite::Connection, cfg: &Config) -> AppResult<bool> {
    if find_user_by_username(conn, &cfg.admin.login)?.is_some() {
        return Ok(false);
    }

    insert_user(
        conn,
        &cfg.admin.login,
        &hash_password(&cfg.admin.password)?,
        AppRole::Admin,
        None,
    )?;
    ttlog(conn, "init", &cfg.admin.login, "Administrator account created")?;
    Ok(true)
}

/// Check login and password and load the linked employee.
/// A legacy hash is replaced by a bcrypt one after a successful login.
pub fn authenticate(
    conn: &rusqlite::Connection,
    username: &str,
    password: &str,
) -> AppResult<CurrentUser> {
    let rejected = || AppError::Auth("invalid login or password".to_string());

    let mut user = find_user_by_username(conn, username.trim())?.ok_or_else(rejected)?;
    if !verify_password(password, &user.password_hash) {
        return Err(rejected());
    }

    if is_legacy_hash(&user.password_hash) {
        let upgraded = hash_password(password)?;
        set_user_password(conn, user.id, &upgraded)?;
        ttlog_quiet(conn, "rehash", &user.username, "Password hash upgraded to bcrypt");
        user.password_hash = upgraded;
    }

    let employee = match user.employee_id {
        Some(id) => find_employee(conn, id)?,
        None => None,
    };

    Ok(CurrentUser { user, employee })
}
