//! Manage a unit's stock and exposure pools.

use anyhow::Result;
use dialoguer::Confirm;
use storeops_core::ids::ProductCode;
use storeops_core::inventory::{Capacity, MissingScope, Pool};

use super::{resolve_unit, InventoryArgs, InventoryCommand};
use crate::context::Context;

/// Run the inventory command.
pub fn run(args: InventoryArgs, ctx: &Context) -> Result<()> {
    let mut dataset = ctx.load_dataset()?;
    let unit_code = resolve_unit(ctx, args.unit.as_deref())?;

    match args.command {
        InventoryCommand::Register {
            code,
            stock_limit,
            exposure_limit,
        } => {
            let code = ProductCode::new(code);
            // Only cataloged products can be carried.
            dataset.catalog.get(&code)?;

            let unit = dataset.units.get_mut(&unit_code)?;
            unit.inventory
                .register(code.clone(), Capacity::new(stock_limit, exposure_limit))?;
            ctx.save_dataset(&dataset)?;
            ctx.output.success(&format!(
                "Registered {} at {} (stock ≤ {}, exposure ≤ {})",
                code, unit_code, stock_limit, exposure_limit
            ));
        }

        InventoryCommand::Capacity {
            code,
            stock_limit,
            exposure_limit,
        } => {
            let code = ProductCode::new(code);
            let unit = dataset.units.get_mut(&unit_code)?;
            unit.inventory
                .update_capacity(&code, stock_limit, exposure_limit)?;
            ctx.save_dataset(&dataset)?;
            ctx.output
                .success(&format!("Updated capacity of {} at {}", code, unit_code));
        }

        InventoryCommand::Add { code, quantity, to } => {
            let code = ProductCode::new(code);
            let pool: Pool = to.parse()?;
            let unit = dataset.units.get_mut(&unit_code)?;
            unit.inventory.add(&code, quantity, pool)?;
            let levels = unit.inventory.levels(&code)?;
            ctx.save_dataset(&dataset)?;
            ctx.output.success(&format!(
                "Added {} x{} to {} (now {}/{})",
                code,
                quantity,
                pool,
                levels.stock,
                levels.exposure
            ));
        }

        InventoryCommand::Move { code, quantity } => {
            let code = ProductCode::new(code);
            let unit = dataset.units.get_mut(&unit_code)?;
            unit.inventory.move_to_exposure(&code, quantity)?;
            let levels = unit.inventory.levels(&code)?;
            ctx.save_dataset(&dataset)?;
            ctx.output.success(&format!(
                "Moved {} x{} to exposure (stock {}, exposure {})",
                code, quantity, levels.stock, levels.exposure
            ));
        }

        InventoryCommand::Remove { code, yes } => {
            let code = ProductCode::new(code);
            if !yes {
                let confirmed = Confirm::new()
                    .with_prompt(format!("Remove {} from {}?", code, unit_code))
                    .default(false)
                    .interact()?;
                if !confirmed {
                    ctx.output.warn("Removal cancelled");
                    return Ok(());
                }
            }

            let unit = dataset.units.get_mut(&unit_code)?;
            unit.inventory.remove(&code)?;
            ctx.save_dataset(&dataset)?;
            ctx.output
                .success(&format!("Removed {} from {}", code, unit_code));
        }

        InventoryCommand::Status { code } => {
            let code = ProductCode::new(code);
            let unit = dataset.units.get(&unit_code)?;
            let levels = unit.inventory.levels(&code)?;
            if ctx.output.is_json() {
                ctx.output.json(&levels);
                return Ok(());
            }
            ctx.output.header(&format!("{} at {}", code, unit_code));
            ctx.output
                .kv("stock", &format!("{}/{}", levels.stock, levels.stock_limit));
            ctx.output.kv(
                "exposure",
                &format!("{}/{}", levels.exposure, levels.exposure_limit),
            );
        }

        InventoryCommand::Missing { scope } => {
            let scope: MissingScope = scope.parse()?;
            let unit = dataset.units.get(&unit_code)?;
            let missing = unit.inventory.missing(scope);
            if ctx.output.is_json() {
                ctx.output.json(&missing);
                return Ok(());
            }
            if missing.is_empty() {
                ctx.output.success("Nothing missing");
                return Ok(());
            }
            ctx.output
                .header(&format!("{} product(s) at zero", missing.len()));
            for code in missing {
                ctx.output.list_item(code.as_str());
            }
        }

        InventoryCommand::Occupancy { code } => {
            let code = ProductCode::new(code);
            let unit = dataset.units.get(&unit_code)?;
            let occupancy = unit.inventory.occupancy(&code)?;
            if ctx.output.is_json() {
                ctx.output.json(&occupancy);
                return Ok(());
            }
            ctx.output.header(&format!("{} at {}", code, unit_code));
            ctx.output
                .kv("stock", &format!("{:.2}%", occupancy.stock_pct));
            ctx.output
                .kv("exposure", &format!("{:.2}%", occupancy.exposure_pct));
        }

        InventoryCommand::Audit => {
            let unit = dataset.units.get(&unit_code)?;
            let report = unit.inventory.check_consistency();
            if ctx.output.is_json() {
                ctx.output.json(&report);
                return Ok(());
            }
            if report.is_consistent() {
                ctx.output
                    .success(&format!("Inventory at {} is consistent", unit_code));
                return Ok(());
            }
            ctx.output.warn(&format!(
                "{} product(s) with problems at {}",
                report.findings.len(),
                unit_code
            ));
            for finding in &report.findings {
                ctx.output
                    .list_item(&format!("{}: {}", finding.code, finding.problems.join("; ")));
            }
        }

        InventoryCommand::Summary => {
            let unit = dataset.units.get(&unit_code)?;
            if ctx.output.is_json() {
                ctx.output.json(&unit.inventory.to_snapshot());
                return Ok(());
            }
            println!("{}", unit.inventory);
        }
    }

    Ok(())
}
