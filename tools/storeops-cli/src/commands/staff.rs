//! Manage the employee directory.

use anyhow::Result;
use storeops_core::ids::EmployeeId;
use storeops_core::staff::{Employee, EmployeeUpdate};

use super::{parse_date, today, StaffArgs, StaffCommand};
use crate::context::Context;

/// Run the staff command.
pub fn run(args: StaffArgs, ctx: &Context) -> Result<()> {
    let mut dataset = ctx.load_dataset()?;

    match args.command {
        StaffCommand::Hire { id, name, role, on } => {
            let hired_on = match on {
                Some(text) => parse_date(&text)?,
                None => today(),
            };
            let id = EmployeeId::new(id);
            dataset
                .staff
                .hire(Employee::new(id.clone(), name, role, hired_on))?;
            ctx.save_dataset(&dataset)?;
            ctx.output.success(&format!("Hired employee {}", id));
        }

        StaffCommand::Terminate { id, on } => {
            let date = match on {
                Some(text) => parse_date(&text)?,
                None => today(),
            };
            let id = EmployeeId::new(id);
            dataset.staff.terminate(&id, date)?;
            ctx.save_dataset(&dataset)?;
            ctx.output.success(&format!("Terminated employee {}", id));
        }

        StaffCommand::Update { id, name, role } => {
            let mut updates = Vec::new();
            if let Some(name) = name {
                updates.push(EmployeeUpdate::Name(name));
            }
            if let Some(role) = role {
                updates.push(EmployeeUpdate::Role(role));
            }
            if updates.is_empty() {
                ctx.output.warn("Nothing to update");
                return Ok(());
            }

            let id = EmployeeId::new(id);
            dataset.staff.update(&id, updates)?;
            ctx.save_dataset(&dataset)?;
            ctx.output.success(&format!("Updated employee {}", id));
        }

        StaffCommand::Show { id } => {
            let employee = dataset.staff.get(&EmployeeId::new(id))?;
            if ctx.output.is_json() {
                ctx.output.json(employee);
                return Ok(());
            }
            print_employee(ctx, employee);
        }

        StaffCommand::Search { text, all } => {
            let hits = dataset.staff.search_by_name(&text, all);
            if ctx.output.is_json() {
                ctx.output.json(&hits);
                return Ok(());
            }
            ctx.output.header(&format!("{} match(es)", hits.len()));
            for employee in hits {
                ctx.output.list_item(&employee.to_string());
            }
        }

        StaffCommand::List { all } => {
            let employees = dataset.staff.list(all);
            if ctx.output.is_json() {
                ctx.output.json(&employees);
                return Ok(());
            }
            ctx.output
                .header(&format!("{} employee(s)", employees.len()));
            for employee in employees {
                ctx.output.list_item(&employee.to_string());
            }
        }
    }

    Ok(())
}

fn print_employee(ctx: &Context, employee: &Employee) {
    ctx.output.header(&employee.name);
    ctx.output.kv("id", employee.id.as_str());
    ctx.output.kv("role", &employee.role);
    ctx.output
        .kv("hired", &employee.hired_on.format("%Y/%m/%d").to_string());
    match employee.terminated_on {
        Some(date) => ctx
            .output
            .kv("terminated", &date.format("%Y/%m/%d").to_string()),
        None => ctx.output.kv("status", "active"),
    }
}
