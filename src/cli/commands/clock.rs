use crate::cli::parser::{Cli, Commands};
use crate::cli::{login, open_pool};
use crate::config::Config;
use crate::core::access::{Capability, require_capability};
use crate::core::worktime::{EndOutcome, StartOutcome, WorkTimeLogic};
use crate::errors::{AppError, AppResult};
use crate::models::user::CurrentUser;
use crate::models::work_status::StatusTag;
use crate::ui::messages::{detail, header, info, success, warning};
use crate::utils::colors::{RESET, color_for_optional_field, color_for_status};
use crate::utils::time::{format_hours, format_time};

fn own_employee_id(current: &CurrentUser) -> AppResult<i64> {
    require_capability(current, Capability::OwnRecord)?;
    current.employee.as_ref().map(|e| e.id).ok_or_else(|| {
        AppError::NotFound(format!(
            "no employee record linked to user '{}'",
            current.user.username
        ))
    })
}

/// Handle `start`, `end` and `status`.
pub fn handle(cli: &Cli, cfg: &Config) -> AppResult<()> {
    let mut pool = open_pool(cfg)?;
    let current = login(cli, &pool)?;
    let employee_id = own_employee_id(&current)?;

    match cli.command {
        Commands::Start => match WorkTimeLogic::start_workday(&mut pool.conn, employee_id)? {
            outcome @ StartOutcome::Started { .. } => success(outcome),
            outcome => warning(outcome),
        },
        Commands::End => match WorkTimeLogic::end_workday(&mut pool.conn, employee_id)? {
            outcome @ EndOutcome::Ended { .. } => success(outcome),
            outcome => warning(outcome),
        },
        Commands::Status => print_status(&pool.conn, &current, employee_id)?,
        _ => {}
    }

    Ok(())
}

fn print_status(
    conn: &rusqlite::Connection,
    current: &CurrentUser,
    employee_id: i64,
) -> AppResult<()> {
    if let Some(emp) = &current.employee {
        header(format!("{} (#{})", emp.full_name, emp.id));
        detail("Position", emp.position.as_deref().unwrap_or("--"));
    }

    match WorkTimeLogic::workday_status(conn, employee_id)? {
        Some(st) => {
            let working = st.current_status == StatusTag::Working;
            detail(
                "Status",
                format!(
                    "{}{}{}",
                    color_for_status(working),
                    st.current_status.to_db_str(),
                    RESET
                ),
            );
            detail(
                "Day start",
                st.workday_start.map(|t| format_time(&t)).unwrap_or_else(|| "--".into()),
            );
            detail(
                "Day end",
                st.workday_end.map(|t| format_time(&t)).unwrap_or_else(|| "--".into()),
            );
            detail("Hours", format!("{:.2}", st.current_hours));
        }
        None => info("No workday recorded yet."),
    }

    let logs = WorkTimeLogic::work_logs_for(conn, employee_id)?;
    if logs.is_empty() {
        return Ok(());
    }

    header("Work logs (UTC)");
    println!("  {:<10}  {:<8}  {:<8}  {:>6}", "Date", "Start", "End", "Hours");
    for log in logs {
        let start = log.start_time.map(|t| t.format("%H:%M:%S").to_string());
        let end = log.end_time.map(|t| t.format("%H:%M:%S").to_string());
        let hours = log.worked_hours.map(format_hours);
        println!(
            "  {:<10}  {}{:<8}{}  {}{:<8}{}  {:>6}",
            log.day.to_string(),
            color_for_optional_field(start.as_deref()),
            start.as_deref().unwrap_or("--"),
            RESET,
            color_for_optional_field(end.as_deref()),
            end.as_deref().unwrap_or("--"),
            RESET,
            hours.as_deref().unwrap_or("--"),
        );
    }

    Ok(())
}
