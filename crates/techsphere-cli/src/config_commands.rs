//! Configuration management subcommands.

use clap::Subcommand;
use rust_decimal::Decimal;
use techsphere_core::Currency;

/// Settings command variants.
#[derive(Subcommand)]
pub enum ConfigCommand {
    /// Show all current storefront settings
    Show,
    /// Update storefront settings
    Set {
        /// Session key the cart is stored under
        #[arg(long)]
        session_key: Option<String>,
        /// Flat shipping fee for non-empty orders
        #[arg(long)]
        flat_shipping: Option<Decimal>,
        /// Tax rate as a fraction (0.08 = 8%)
        #[arg(long)]
        tax_rate: Option<Decimal>,
        /// Maximum simultaneous uploads per batch (1-16)
        #[arg(long)]
        max_concurrent_uploads: Option<u32>,
        /// Minimum interval between progress updates in ms (>= 10)
        #[arg(long)]
        progress_interval_ms: Option<u64>,
        /// Base URL uploaded files are served from
        #[arg(long)]
        public_base_url: Option<String>,
        /// Serve uploads from the local uploads directory again
        #[arg(long, conflicts_with = "public_base_url")]
        clear_public_base_url: bool,
        /// Display currency (USD or IDR)
        #[arg(long, value_parser = parse_currency)]
        currency: Option<Currency>,
    },
    /// Reset all settings to defaults
    Reset {
        /// Skip confirmation
        #[arg(short, long)]
        force: bool,
    },
}

fn parse_currency(raw: &str) -> Result<Currency, String> {
    Currency::parse(raw).ok_or_else(|| format!("unsupported currency '{raw}' (use USD or IDR)"))
}
