use crate::cli::parser::{Cli, Commands};
use crate::cli::{login, open_pool};
use crate::config::Config;
use crate::core::access::{
    Capability, get_managers_and_departments, require_capability, visible_employees,
};
use crate::errors::AppResult;
use crate::ui::messages::{header, info};
use crate::utils::colors::{GREY, RESET};

/// Handle `employees` and `managers`.
pub fn handle(cli: &Cli, cfg: &Config) -> AppResult<()> {
    let pool = open_pool(cfg)?;
    let current = login(cli, &pool)?;

    match cli.command {
        Commands::Employees => {
            let employees = visible_employees(&pool.conn, &current)?;
            header(format!(
                "Employees visible to {} ({})",
                current.user.username,
                current.role_label()
            ));
            if employees.is_empty() {
                info("No employee records visible.");
            }
            for e in employees {
                let dept = e
                    .department_id
                    .map(|d| format!("dept #{d}"))
                    .unwrap_or_else(|| format!("{GREY}no dept{RESET}"));
                println!(
                    "  {:>4}  {:<30}  {:<20}  {}",
                    e.id,
                    e.full_name,
                    e.position.as_deref().unwrap_or("--"),
                    dept
                );
            }
        }
        Commands::Managers => {
            require_capability(&current, Capability::ManagersOverview)?;
            let rows = get_managers_and_departments(&pool.conn)?;
            header("Managers and departments");
            if rows.is_empty() {
                info("No department has a manager.");
            }
            for (manager, dept) in rows {
                let efficiency = dept
                    .efficiency
                    .map(|v| format!("{v:.2}"))
                    .unwrap_or_else(|| "--".to_string());
                println!(
                    "  {:<30}  {:<25}  efficiency {}",
                    manager.full_name, dept.name, efficiency
                );
            }
        }
        _ => {}
    }

    Ok(())
}
