//! Checkout summary handler.

use anyhow::Result;
use techsphere_core::format_price;

use crate::bootstrap::CliContext;
use crate::handlers::cart::print_cart;

/// Print the cart followed by shipping, tax and the order total.
pub fn execute(ctx: &CliContext) -> Result<()> {
    let settings = ctx.settings();
    let currency = settings.effective_currency();
    let cart = ctx.cart().snapshot();

    print_cart(&cart, currency);
    if cart.is_empty() {
        return Ok(());
    }

    let summary = ctx.cart().order_summary(&settings.checkout_policy());
    println!();
    println!("  Subtotal: {:>14}", format_price(summary.subtotal, currency));
    println!("  Shipping: {:>14}", format_price(summary.shipping, currency));
    println!("  Tax:      {:>14}", format_price(summary.tax, currency));
    println!("  Total:    {:>14}", format_price(summary.total, currency));
    Ok(())
}
