//! Manage store units and reports.

use anyhow::Result;
use dialoguer::Confirm;
use storeops_core::ids::UnitCode;
use storeops_core::unit::{unit_report, Location, ReportPeriod, StoreUnit, UnitUpdate};

use super::{parse_date, today, UnitArgs, UnitCommand, DATE_FORMAT};
use crate::context::Context;
use crate::output::active_badge;

/// Run the unit command.
pub fn run(args: UnitArgs, ctx: &Context) -> Result<()> {
    let mut dataset = ctx.load_dataset()?;

    match args.command {
        UnitCommand::Add {
            code,
            name,
            lat,
            lon,
        } => {
            let code = UnitCode::new(code);
            dataset.units.add(StoreUnit::new(
                code.clone(),
                name,
                Location {
                    latitude: lat,
                    longitude: lon,
                },
            ))?;
            ctx.save_dataset(&dataset)?;
            ctx.output.success(&format!("Added unit {}", code));
        }

        UnitCommand::Update {
            code,
            name,
            lat,
            lon,
        } => {
            let mut updates = Vec::new();
            if let Some(name) = name {
                updates.push(UnitUpdate::Name(name));
            }
            if let (Some(lat), Some(lon)) = (lat, lon) {
                updates.push(UnitUpdate::Location(Location {
                    latitude: lat,
                    longitude: lon,
                }));
            }
            if updates.is_empty() {
                ctx.output.warn("Nothing to update");
                return Ok(());
            }

            let code = UnitCode::new(code);
            dataset.units.update(&code, updates)?;
            ctx.save_dataset(&dataset)?;
            ctx.output.success(&format!("Updated unit {}", code));
        }

        UnitCommand::Show { code } => {
            let unit = dataset.units.get(&UnitCode::new(code))?;
            if ctx.output.is_json() {
                ctx.output.json(&storeops_data::UnitRecord::from_unit(unit));
                return Ok(());
            }
            ctx.output.header(&unit.name);
            ctx.output.kv("code", unit.code.as_str());
            ctx.output.kv(
                "location",
                &format!("{:.4}, {:.4}", unit.location.latitude, unit.location.longitude),
            );
            ctx.output.kv("status", &active_badge(unit.active));
            ctx.output
                .kv("products", &unit.inventory.len().to_string());
            ctx.output.kv("staff", &unit.staff.len().to_string());
            ctx.output.kv("sales", &unit.sales.len().to_string());
        }

        UnitCommand::List { all } => {
            let units = dataset.units.list(all);
            if ctx.output.is_json() {
                let records: Vec<storeops_data::UnitRecord> = units
                    .iter()
                    .map(|unit| storeops_data::UnitRecord::from_unit(unit))
                    .collect();
                ctx.output.json(&records);
                return Ok(());
            }
            ctx.output.header(&format!("{} unit(s)", units.len()));
            for unit in units {
                ctx.output
                    .list_item(&format!("{} [{}]", unit, active_badge(unit.active)));
            }
        }

        UnitCommand::Deactivate { code, yes } => {
            let code = UnitCode::new(code);
            if !yes {
                let confirmed = Confirm::new()
                    .with_prompt(format!("Deactivate unit {}?", code))
                    .default(false)
                    .interact()?;
                if !confirmed {
                    ctx.output.warn("Deactivation cancelled");
                    return Ok(());
                }
            }

            dataset.units.deactivate(&code)?;
            ctx.save_dataset(&dataset)?;
            ctx.output.success(&format!(
                "Deactivated unit {} (history is kept)",
                code
            ));
        }

        UnitCommand::Report { code, from, to } => {
            let code = UnitCode::new(code);
            let period = ReportPeriod::new(parse_date(&from)?, parse_date(&to)?, today())?;
            let unit = dataset.units.get(&code)?;

            let report = unit_report(unit, &dataset.staff, period)?;
            if ctx.output.is_json() {
                ctx.output.json(&report);
                return Ok(());
            }

            ctx.output.header(&format!(
                "{} from {} to {}",
                code,
                period.from.format(DATE_FORMAT),
                period.to.format(DATE_FORMAT)
            ));
            if report.is_empty() {
                ctx.output.info("No activity in this period");
                return Ok(());
            }

            ctx.output.kv("sales", &report.sales.len().to_string());
            ctx.output.kv("revenue", &report.revenue.display());
            for sale in &report.sales {
                let cashier = sale
                    .cashier
                    .as_ref()
                    .map(|id| id.as_str())
                    .unwrap_or("-");
                ctx.output.list_item(&format!(
                    "{} {} x{} {} (cashier {})",
                    sale.date.format(DATE_FORMAT),
                    sale.id,
                    sale.items,
                    sale.total,
                    cashier
                ));
            }
            for event in &report.staff_events {
                let kind = match event.kind {
                    storeops_core::unit::StaffEventKind::Hired => "hired",
                    storeops_core::unit::StaffEventKind::Terminated => "terminated",
                };
                ctx.output.list_item(&format!(
                    "{} {} {} ({})",
                    event.date.format(DATE_FORMAT),
                    kind,
                    event.name,
                    event.employee
                ));
            }
        }
    }

    Ok(())
}
