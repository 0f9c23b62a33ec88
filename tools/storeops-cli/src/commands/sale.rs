//! Ring up sales.

use anyhow::{bail, Context as _, Result};
use storeops_core::cart::Cart;
use storeops_core::ids::{EmployeeId, ProductCode, SaleId};

use super::{resolve_unit, today, SaleArgs, SaleCommand};
use crate::context::Context;
use storeops_data::Dataset;

/// Run the sale command.
pub fn run(args: SaleArgs, ctx: &Context) -> Result<()> {
    match args.command {
        SaleCommand::Checkout {
            unit,
            items,
            cashier,
            id,
        } => checkout(ctx, unit.as_deref(), &items, cashier.as_deref(), id),
    }
}

fn checkout(
    ctx: &Context,
    unit: Option<&str>,
    items: &[String],
    cashier: Option<&str>,
    id: Option<String>,
) -> Result<()> {
    let mut dataset = ctx.load_dataset()?;
    let unit_code = resolve_unit(ctx, unit)?;
    let cashier = cashier.map(EmployeeId::new);

    let lines = parse_items(items)?;

    // When a cashier is named they must exist and still be on staff;
    // no cashier means a self-checkout sale.
    if let Some(cashier) = &cashier {
        dataset.staff.get_active(cashier)?;
    }

    let sale_id = match id {
        Some(id) => SaleId::new(id),
        None => next_sale_id(&dataset),
    };

    let mut cart = Cart::new(sale_id.clone());
    for (code, quantity) in &lines {
        cart.add_line(code.clone(), *quantity)?;
    }
    let total = cart.compute_total(&dataset.catalog)?;
    ctx.output.debug(&format!(
        "sale {} totals {} across {} item(s)",
        sale_id,
        total,
        cart.item_count()
    ));

    // Exposure is deducted line by line; a failing line aborts the sale
    // but leaves earlier deductions in place, so the dataset is saved
    // either way.
    let unit_ref = dataset.units.get_mut(&unit_code)?;
    if !unit_ref.active {
        bail!("Unit {} is deactivated", unit_code);
    }
    let sell_result = unit_ref
        .inventory
        .sell(cart.lines.iter().map(|line| (&line.code, line.quantity)));

    match sell_result {
        Ok(()) => {
            let total = cart.finalize(&dataset.catalog, today(), cashier)?;
            let unit_ref = dataset.units.get_mut(&unit_code)?;
            unit_ref.record_sale(cart)?;
            ctx.save_dataset(&dataset)?;
            ctx.output.success(&format!(
                "Sale {} at {}: {}",
                sale_id, unit_code, total
            ));
        }
        Err(e) => {
            ctx.save_dataset(&dataset)?;
            return Err(e.into());
        }
    }

    Ok(())
}

/// Parse repeated `--item CODE:QTY` flags.
fn parse_items(items: &[String]) -> Result<Vec<(ProductCode, u32)>> {
    let mut lines = Vec::with_capacity(items.len());
    for item in items {
        let (code, quantity) = item
            .split_once(':')
            .with_context(|| format!("Invalid item '{}', expected CODE:QTY", item))?;
        let quantity: u32 = quantity
            .parse()
            .with_context(|| format!("Invalid quantity in '{}'", item))?;
        lines.push((ProductCode::new(code), quantity));
    }
    Ok(lines)
}

/// Next free sequential sale id across every unit's history.
fn next_sale_id(dataset: &Dataset) -> SaleId {
    let max = dataset
        .units
        .iter()
        .flat_map(|unit| unit.sales.iter())
        .filter_map(|sale| sale.id.as_str().trim_start_matches('S').parse::<u64>().ok())
        .max()
        .unwrap_or(0);
    SaleId::new(format!("S{}", max + 1))
}
