//! Product command handler.

use std::collections::BTreeMap;

use anyhow::Result;
use techsphere_core::{DocumentFilter, Product, ProductDraft, format_price};

use crate::bootstrap::CliContext;
use crate::commands::{ProductAddArgs, ProductCommand, ProductEditArgs};
use crate::handlers::assets::resolve_sources;
use crate::presentation::{print_separator, truncate_string};

/// Execute a product command.
pub async fn execute(ctx: &CliContext, command: ProductCommand) -> Result<()> {
    match command {
        ProductCommand::Add(args) => add(ctx, args).await,
        ProductCommand::Edit(args) => edit(ctx, args).await,
        ProductCommand::Delete { id } => {
            ctx.cms().delete::<Product>(&id).await?;
            println!("✓ Deleted product {id}");
            Ok(())
        }
        ProductCommand::List { category } => list(ctx, category).await,
        ProductCommand::Show { id } => {
            let product: Product = ctx.cms().get(&id).await?;
            print_product(ctx, &product);
            Ok(())
        }
    }
}

async fn add(ctx: &CliContext, args: ProductAddArgs) -> Result<()> {
    let draft = ProductDraft {
        name: args.name,
        description: args.description,
        price: args.price,
        brand: args.brand,
        category: args.category,
        specs: specs_override(args.specs),
        images: resolve_sources(&args.images).await?,
    };

    let product = ctx.cms().submit(draft, None).await?;
    println!("✓ Created product {}", product.id);
    print_product(ctx, &product);
    Ok(())
}

async fn edit(ctx: &CliContext, args: ProductEditArgs) -> Result<()> {
    let existing: Product = ctx.cms().get(&args.id).await?;

    let draft = ProductDraft {
        name: args.name.unwrap_or_else(|| existing.name.clone()),
        description: args
            .description
            .unwrap_or_else(|| existing.description.clone()),
        price: args.price.unwrap_or(existing.price),
        brand: args.brand.unwrap_or_else(|| existing.brand.clone()),
        category: args.category,
        specs: specs_override(args.specs),
        images: resolve_sources(&args.images).await?,
    };

    let product = ctx.cms().submit(draft, Some(&existing)).await?;
    println!("✓ Updated product {}", product.id);
    print_product(ctx, &product);
    Ok(())
}

async fn list(ctx: &CliContext, category: Option<String>) -> Result<()> {
    let products: Vec<Product> = match category {
        Some(category) => {
            ctx.cms()
                .list_where(DocumentFilter::field_equals("category", category))
                .await?
        }
        None => ctx.cms().list().await?,
    };

    if products.is_empty() {
        println!("No products found.");
        return Ok(());
    }

    let currency = ctx.settings().effective_currency();
    println!(
        "{:<38} {:<28} {:<14} {:<12} {:>14}",
        "ID", "Name", "Brand", "Category", "Price"
    );
    print_separator(110);
    for product in &products {
        println!(
            "{:<38} {:<28} {:<14} {:<12} {:>14}",
            product.id,
            truncate_string(&product.name, 28),
            truncate_string(&product.brand, 14),
            truncate_string(&product.category, 12),
            format_price(product.price, currency),
        );
    }
    println!("{} product(s)", products.len());
    Ok(())
}

/// `None` keeps the current specs on edit.
fn specs_override(specs: Vec<(String, String)>) -> Option<BTreeMap<String, String>> {
    if specs.is_empty() {
        None
    } else {
        Some(specs.into_iter().collect())
    }
}

fn print_product(ctx: &CliContext, product: &Product) {
    let currency = ctx.settings().effective_currency();
    println!("  id:          {}", product.id);
    println!("  name:        {}", product.name);
    println!("  brand:       {}", product.brand);
    println!("  category:    {}", product.category);
    println!("  price:       {}", format_price(product.price, currency));
    println!("  description: {}", product.description);
    for (i, url) in product.images.iter().enumerate() {
        println!("  image[{i}]:    {url}");
    }
    for (key, value) in &product.specs {
        println!("  spec:        {key} = {value}");
    }
}
