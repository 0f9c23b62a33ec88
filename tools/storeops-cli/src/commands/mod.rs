//! CLI command implementations.

pub mod inventory;
pub mod product;
pub mod sale;
pub mod staff;
pub mod unit;

use anyhow::{bail, Context as _, Result};
use chrono::NaiveDate;
use clap::{Args, Subcommand};
use storeops_core::ids::UnitCode;

use crate::context::Context;

/// Date format used across the CLI and the data files.
pub(crate) const DATE_FORMAT: &str = "%Y/%m/%d";

pub(crate) fn parse_date(text: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(text, DATE_FORMAT)
        .with_context(|| format!("Invalid date '{}', expected YYYY/MM/DD", text))
}

pub(crate) fn today() -> NaiveDate {
    chrono::Local::now().date_naive()
}

/// Pick the unit to operate on: the flag wins, then the config default.
pub(crate) fn resolve_unit(ctx: &Context, flag: Option<&str>) -> Result<UnitCode> {
    match flag.or(ctx.config.display.default_unit.as_deref()) {
        Some(code) => Ok(UnitCode::new(code)),
        None => bail!(
            "No store unit specified: pass --unit or set display.default_unit in storeops.toml"
        ),
    }
}

/// Arguments for the product command.
#[derive(Args)]
pub struct ProductArgs {
    #[command(subcommand)]
    pub command: ProductCommand,
}

#[derive(Subcommand)]
pub enum ProductCommand {
    /// Add a product to the catalog.
    Add {
        /// EAN-13 barcode.
        code: String,
        /// Product name.
        name: String,
        /// Brand.
        #[arg(short, long)]
        brand: String,
        /// Category.
        #[arg(long)]
        category: String,
        /// Unit weight in kilograms.
        #[arg(short, long)]
        weight_kg: f64,
        /// Unit price, decimal (e.g. 5.99).
        #[arg(short, long)]
        price: f64,
        /// Price per kilogram for weight-priced products.
        #[arg(long)]
        price_per_kg: Option<f64>,
    },
    /// Update catalog fields of a product.
    Update {
        /// EAN-13 barcode.
        code: String,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        brand: Option<String>,
        #[arg(long)]
        category: Option<String>,
        #[arg(long)]
        weight_kg: Option<f64>,
        #[arg(long)]
        price: Option<f64>,
        #[arg(long)]
        price_per_kg: Option<f64>,
    },
    /// Show one product.
    Show {
        /// EAN-13 barcode.
        code: String,
    },
    /// Search products by text.
    Search {
        /// Text matched against name, brand and category.
        text: String,
        /// Restrict matches to a brand.
        #[arg(long)]
        brand: Option<String>,
        /// Restrict matches to a category.
        #[arg(long)]
        category: Option<String>,
    },
    /// List the whole catalog.
    List,
}

/// Arguments for the inventory command.
#[derive(Args)]
pub struct InventoryArgs {
    /// Store unit to operate on.
    #[arg(short, long, global = true)]
    pub unit: Option<String>,

    #[command(subcommand)]
    pub command: InventoryCommand,
}

#[derive(Subcommand)]
pub enum InventoryCommand {
    /// Register a product with capacity limits.
    Register {
        /// EAN-13 barcode.
        code: String,
        /// Maximum units in stock.
        #[arg(long)]
        stock_limit: u32,
        /// Maximum units in exposure.
        #[arg(long)]
        exposure_limit: u32,
    },
    /// Update capacity limits of a registered product.
    Capacity {
        /// EAN-13 barcode.
        code: String,
        #[arg(long)]
        stock_limit: Option<u32>,
        #[arg(long)]
        exposure_limit: Option<u32>,
    },
    /// Add units to a pool.
    Add {
        /// EAN-13 barcode.
        code: String,
        /// Units to add.
        quantity: u32,
        /// Destination pool: stock or exposure.
        #[arg(long, default_value = "stock")]
        to: String,
    },
    /// Move units from stock to exposure.
    Move {
        /// EAN-13 barcode.
        code: String,
        /// Units to move.
        quantity: u32,
    },
    /// Remove a product from the inventory (must be at zero).
    Remove {
        /// EAN-13 barcode.
        code: String,
        /// Skip confirmation prompt.
        #[arg(short, long)]
        yes: bool,
    },
    /// Show quantities and limits for a product.
    Status {
        /// EAN-13 barcode.
        code: String,
    },
    /// List products at zero quantity.
    Missing {
        /// Scope: stock, exposure or both.
        #[arg(long, default_value = "both")]
        scope: String,
    },
    /// Show pool occupancy percentages for a product.
    Occupancy {
        /// EAN-13 barcode.
        code: String,
    },
    /// Run the consistency audit.
    Audit,
    /// Print the inventory summary.
    Summary,
}

/// Arguments for the staff command.
#[derive(Args)]
pub struct StaffArgs {
    #[command(subcommand)]
    pub command: StaffCommand,
}

#[derive(Subcommand)]
pub enum StaffCommand {
    /// Hire an employee.
    Hire {
        /// Employee id.
        id: String,
        /// Full name.
        name: String,
        /// Role.
        #[arg(short, long)]
        role: String,
        /// Hire date (YYYY/MM/DD, default today).
        #[arg(long)]
        on: Option<String>,
    },
    /// Terminate an employee.
    Terminate {
        /// Employee id.
        id: String,
        /// Termination date (YYYY/MM/DD, default today).
        #[arg(long)]
        on: Option<String>,
    },
    /// Update employee fields.
    Update {
        /// Employee id.
        id: String,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        role: Option<String>,
    },
    /// Show one employee.
    Show {
        /// Employee id.
        id: String,
    },
    /// Search employees by name.
    Search {
        /// Text matched against names.
        text: String,
        /// Include terminated employees.
        #[arg(short, long)]
        all: bool,
    },
    /// List employees.
    List {
        /// Include terminated employees.
        #[arg(short, long)]
        all: bool,
    },
}

/// Arguments for the sale command.
#[derive(Args)]
pub struct SaleArgs {
    #[command(subcommand)]
    pub command: SaleCommand,
}

#[derive(Subcommand)]
pub enum SaleCommand {
    /// Ring up a sale at a unit.
    Checkout {
        /// Store unit.
        #[arg(short, long)]
        unit: Option<String>,
        /// Sale line as CODE:QTY; repeatable.
        #[arg(short, long = "item", required = true)]
        items: Vec<String>,
        /// Cashier employee id; omit for a self-checkout sale.
        #[arg(long)]
        cashier: Option<String>,
        /// Sale id (default: next sequential).
        #[arg(long)]
        id: Option<String>,
    },
}

/// Arguments for the unit command.
#[derive(Args)]
pub struct UnitArgs {
    #[command(subcommand)]
    pub command: UnitCommand,
}

#[derive(Subcommand)]
pub enum UnitCommand {
    /// Add a store unit.
    Add {
        /// Unit code.
        code: String,
        /// Unit name.
        name: String,
        /// Latitude.
        #[arg(long)]
        lat: f64,
        /// Longitude.
        #[arg(long)]
        lon: f64,
    },
    /// Update unit fields.
    Update {
        /// Unit code.
        code: String,
        #[arg(long)]
        name: Option<String>,
        /// Latitude; must be paired with --lon.
        #[arg(long, requires = "lon")]
        lat: Option<f64>,
        /// Longitude; must be paired with --lat.
        #[arg(long, requires = "lat")]
        lon: Option<f64>,
    },
    /// Show one unit.
    Show {
        /// Unit code.
        code: String,
    },
    /// List units.
    List {
        /// Include deactivated units.
        #[arg(short, long)]
        all: bool,
    },
    /// Deactivate a unit (history is kept).
    Deactivate {
        /// Unit code.
        code: String,
        /// Skip confirmation prompt.
        #[arg(short, long)]
        yes: bool,
    },
    /// Report sales and staff movement for a period.
    Report {
        /// Unit code.
        code: String,
        /// Period start (YYYY/MM/DD).
        #[arg(long)]
        from: String,
        /// Period end (YYYY/MM/DD).
        #[arg(long)]
        to: String,
    },
}
