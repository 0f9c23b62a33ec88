//! Manage the product catalog.

use anyhow::Result;
use storeops_core::catalog::{Product, ProductFilter, ProductUpdate};
use storeops_core::ids::ProductCode;
use storeops_core::money::{Currency, Money};

use super::{ProductArgs, ProductCommand};
use crate::context::Context;

/// Run the product command.
pub fn run(args: ProductArgs, ctx: &Context) -> Result<()> {
    let mut dataset = ctx.load_dataset()?;

    match args.command {
        ProductCommand::Add {
            code,
            name,
            brand,
            category,
            weight_kg,
            price,
            price_per_kg,
        } => {
            let mut product = Product::new(
                ProductCode::new(code),
                name,
                brand,
                category,
                weight_kg,
                Money::from_decimal(price, Currency::default()),
            );
            if let Some(per_kg) = price_per_kg {
                product = product.with_price_per_kg(Money::from_decimal(per_kg, Currency::default()));
            }
            let code = product.code.clone();
            dataset.catalog.register(product)?;
            ctx.save_dataset(&dataset)?;
            ctx.output.success(&format!("Cataloged product {}", code));
        }

        ProductCommand::Update {
            code,
            name,
            brand,
            category,
            weight_kg,
            price,
            price_per_kg,
        } => {
            let mut updates = Vec::new();
            if let Some(name) = name {
                updates.push(ProductUpdate::Name(name));
            }
            if let Some(brand) = brand {
                updates.push(ProductUpdate::Brand(brand));
            }
            if let Some(category) = category {
                updates.push(ProductUpdate::Category(category));
            }
            if let Some(weight_kg) = weight_kg {
                updates.push(ProductUpdate::WeightKg(weight_kg));
            }
            if let Some(price) = price {
                updates.push(ProductUpdate::Price(Money::from_decimal(
                    price,
                    Currency::default(),
                )));
            }
            if let Some(per_kg) = price_per_kg {
                updates.push(ProductUpdate::PricePerKg(Some(Money::from_decimal(
                    per_kg,
                    Currency::default(),
                ))));
            }
            if updates.is_empty() {
                ctx.output.warn("Nothing to update");
                return Ok(());
            }

            let code = ProductCode::new(code);
            dataset.catalog.update(&code, updates)?;
            ctx.save_dataset(&dataset)?;
            ctx.output.success(&format!("Updated product {}", code));
        }

        ProductCommand::Show { code } => {
            let product = dataset.catalog.get(&ProductCode::new(code))?;
            if ctx.output.is_json() {
                ctx.output.json(product);
                return Ok(());
            }
            print_product(ctx, product);
        }

        ProductCommand::Search {
            text,
            brand,
            category,
        } => {
            let mut filters = Vec::new();
            if let Some(brand) = brand {
                filters.push(ProductFilter::Brand(brand));
            }
            if let Some(category) = category {
                filters.push(ProductFilter::Category(category));
            }

            let hits = dataset.catalog.search(&text, &filters);
            if ctx.output.is_json() {
                ctx.output.json(&hits);
                return Ok(());
            }
            ctx.output.header(&format!("{} match(es)", hits.len()));
            for product in hits {
                ctx.output.list_item(&product.to_string());
            }
        }

        ProductCommand::List => {
            let products: Vec<&Product> = dataset.catalog.iter().collect();
            if ctx.output.is_json() {
                ctx.output.json(&products);
                return Ok(());
            }
            ctx.output
                .header(&format!("Catalog ({} products)", products.len()));
            for product in products {
                ctx.output.list_item(&product.to_string());
            }
        }
    }

    Ok(())
}

fn print_product(ctx: &Context, product: &Product) {
    ctx.output.header(&product.name);
    ctx.output.kv("code", product.code.as_str());
    ctx.output.kv("brand", &product.brand);
    ctx.output.kv("category", &product.category);
    ctx.output.kv("weight", &format!("{} kg", product.weight_kg));
    ctx.output.kv("price", &product.price.display());
    if let Some(per_kg) = &product.price_per_kg {
        ctx.output.kv("price/kg", &per_kg.display());
    }
}
