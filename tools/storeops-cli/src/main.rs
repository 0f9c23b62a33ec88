//! StoreOps CLI - operator tool for the multi-unit retail system.
//!
//! Commands:
//! - `storeops product` - Manage the product catalog
//! - `storeops inventory` - Manage a unit's stock and exposure pools
//! - `storeops staff` - Manage the employee directory
//! - `storeops sale` - Ring up sales
//! - `storeops unit` - Manage store units and reports

mod commands;
mod config;
mod context;
mod output;

use anyhow::Result;
use clap::{Parser, Subcommand};

use commands::{InventoryArgs, ProductArgs, SaleArgs, StaffArgs, UnitArgs};

/// StoreOps CLI - manage catalog, inventory, staff, sales and store units
#[derive(Parser)]
#[command(name = "storeops")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Use JSON output format
    #[arg(long, global = true)]
    json: bool,

    /// Dataset directory (default: from config, then ./data)
    #[arg(short, long, global = true)]
    data_dir: Option<String>,

    /// Config file path
    #[arg(short, long, global = true)]
    config: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Manage the product catalog
    Product(ProductArgs),

    /// Manage a unit's inventory pools
    Inventory(InventoryArgs),

    /// Manage the employee directory
    Staff(StaffArgs),

    /// Ring up sales
    Sale(SaleArgs),

    /// Manage store units and reports
    Unit(UnitArgs),
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let output = output::Output::new(cli.verbose, cli.json);

    let ctx = context::Context::load(cli.config.as_deref(), cli.data_dir.as_deref(), output)?;

    let result = match cli.command {
        Commands::Product(args) => commands::product::run(args, &ctx),
        Commands::Inventory(args) => commands::inventory::run(args, &ctx),
        Commands::Staff(args) => commands::staff::run(args, &ctx),
        Commands::Sale(args) => commands::sale::run(args, &ctx),
        Commands::Unit(args) => commands::unit::run(args, &ctx),
    };

    if let Err(e) = result {
        ctx.output.error(&format!("{:#}", e));
        std::process::exit(1);
    }

    Ok(())
}
