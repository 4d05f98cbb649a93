pub mod access;
pub mod auth;
pub mod backup;
pub mod log;
pub mod worktime;
