use crate::cli::parser::Commands;
use crate::config::Config;
use crate::db::employees::{add_employee, disable_employee, list_employees, reset_employee_pin};
use crate::db::pool::DbPool;
use crate::errors::{AppError, AppResult};
use crate::ui::messages::{info, success};

/// Employee administration. These flows write to the credential store and
/// the audit log only; they never touch punches.
pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Employee {
        add,
        name,
        pin,
        rate,
        disable,
        reset_pin,
        list,
    } = cmd
    {
        let pool = DbPool::new(&cfg.database)?;

        if *add {
            let name = name
                .as_deref()
                .ok_or_else(|| AppError::Config("--add requires --name".to_string()))?;
            let pin = pin
                .as_deref()
                .ok_or_else(|| AppError::Config("--add requires --pin".to_string()))?;
            let emp_id = add_employee(&pool.conn, name, rate.unwrap_or(0.0), pin)?;
            success(format!("Employee added: id={emp_id}, name={name}"));
            return Ok(());
        }

        if let Some(emp_id) = disable {
            disable_employee(&pool.conn, *emp_id)?;
            success(format!("Employee disabled: id={emp_id}"));
            return Ok(());
        }

        if let Some(emp_id) = reset_pin {
            let pin = pin
                .as_deref()
                .ok_or_else(|| AppError::Config("--reset-pin requires --pin".to_string()))?;
            reset_employee_pin(&pool.conn, *emp_id, pin)?;
            success(format!("Employee PIN reset: id={emp_id}"));
            return Ok(());
        }

        if *list {
            let employees = list_employees(&pool.conn, false)?;
            for emp in &employees {
                let state = if emp.active { "active" } else { "disabled" };
                info(format!(
                    "#{:<4} {:<24} {:<8} created {}",
                    emp.id, emp.name, state, emp.created_at
                ));
            }
            if employees.is_empty() {
                info("No employees.");
            }
            return Ok(());
        }

        return Err(AppError::Config(
            "employee: nothing to do (use --add, --disable, --reset-pin or --list)".to_string(),
        ));
    }

    Ok(())
}
