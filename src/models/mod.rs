pub mod employee;
pub mod role;
pub mod user;
pub mod work_log;
pub mod work_status;
