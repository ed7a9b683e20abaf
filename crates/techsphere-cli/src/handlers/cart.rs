//! Cart command handler.

use anyhow::Result;
use techsphere_core::{Cart, CoreError, Currency, Product, ProductId, format_price};

use crate::bootstrap::CliContext;
use crate::commands::CartCommand;
use crate::presentation::{print_separator, truncate_string};

/// Execute a cart command, then print the resulting cart.
///
/// The session write is flushed before returning so the next invocation
/// sees the change.
pub async fn execute(ctx: &CliContext, command: CartCommand) -> Result<()> {
    let cart = ctx.cart();
    match command {
        CartCommand::Add {
            product_id,
            quantity,
        } => {
            let product: Product = ctx.cms().get(&product_id).await?;
            let name = product.name.clone();
            cart.add(product, quantity).map_err(CoreError::from)?;
            println!("✓ Added {quantity} × {name}");
        }
        CartCommand::Remove { product_id } => {
            let id = ProductId::new(product_id);
            if cart.snapshot().get(&id).is_none() {
                println!("'{id}' is not in the cart.");
            }
            cart.remove(&id);
        }
        CartCommand::Set {
            product_id,
            quantity,
        } => {
            let id = ProductId::new(product_id);
            if cart.snapshot().get(&id).is_none() {
                println!("'{id}' is not in the cart.");
            }
            cart.set_quantity(&id, quantity);
        }
        CartCommand::Clear => {
            cart.clear();
            println!("✓ Cart cleared.");
        }
        CartCommand::Show => {}
    }

    cart.flush().await;
    print_cart(&cart.snapshot(), ctx.settings().effective_currency());
    Ok(())
}

/// Print cart lines and totals.
pub fn print_cart(cart: &Cart, currency: Currency) {
    if cart.is_empty() {
        println!("Your cart is empty.");
        return;
    }

    println!(
        "{:<16} {:<30} {:>5} {:>14} {:>14}",
        "ID", "Product", "Qty", "Unit", "Line total"
    );
    print_separator(83);
    for item in cart.items() {
        println!(
            "{:<16} {:<30} {:>5} {:>14} {:>14}",
            truncate_string(item.product.id.as_str(), 16),
            truncate_string(&item.product.name, 30),
            item.quantity,
            format_price(item.product.price, currency),
            format_price(item.line_total(), currency),
        );
    }
    print_separator(83);
    println!(
        "{} item(s), total {}",
        cart.item_count(),
        format_price(cart.total(), currency)
    );
}
