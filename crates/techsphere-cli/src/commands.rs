//! Top-level subcommands and their argument groups.

use chrono::{DateTime, Utc};
use clap::{Args, Subcommand};
use rust_decimal::Decimal;

use crate::config_commands::ConfigCommand;

/// Available CLI commands.
#[derive(Subcommand)]
pub enum Commands {
    /// Manage the session cart
    Cart {
        #[command(subcommand)]
        command: CartCommand,
    },
    /// Show the order summary for the current cart
    Checkout,
    /// Manage catalog products
    Product {
        #[command(subcommand)]
        command: ProductCommand,
    },
    /// Manage homepage banners
    Banner {
        #[command(subcommand)]
        command: BannerCommand,
    },
    /// View or change storefront settings
    Config {
        #[command(subcommand)]
        command: ConfigCommand,
    },
    /// Show resolved data paths
    Paths,
}

/// Cart command variants.
#[derive(Subcommand)]
pub enum CartCommand {
    /// Add a catalog product to the cart
    Add {
        /// Product ID
        product_id: String,
        /// Units to add
        #[arg(short, long, default_value_t = 1)]
        quantity: u32,
    },
    /// Remove a product from the cart
    Remove {
        /// Product ID
        product_id: String,
    },
    /// Replace a product's quantity (zero or less removes it)
    Set {
        /// Product ID
        product_id: String,
        /// New quantity
        #[arg(allow_negative_numbers = true)]
        quantity: i64,
    },
    /// Empty the cart
    Clear,
    /// List cart contents
    Show,
}

/// Product command variants.
#[derive(Subcommand)]
pub enum ProductCommand {
    /// Create a product
    Add(ProductAddArgs),
    /// Edit an existing product
    Edit(ProductEditArgs),
    /// Delete a product
    Delete {
        /// Product ID
        id: String,
    },
    /// List products
    List {
        /// Only show this category
        #[arg(long)]
        category: Option<String>,
    },
    /// Show one product
    Show {
        /// Product ID
        id: String,
    },
}

/// Arguments for `product add`.
#[derive(Args, Debug)]
pub struct ProductAddArgs {
    #[arg(long)]
    pub name: String,
    #[arg(long)]
    pub description: String,
    /// Price in the store currency
    #[arg(long)]
    pub price: Decimal,
    #[arg(long)]
    pub brand: String,
    /// Defaults to "Audio"
    #[arg(long)]
    pub category: Option<String>,
    /// Specification entry as KEY=VALUE (repeatable)
    #[arg(long = "spec", value_parser = parse_key_value)]
    pub specs: Vec<(String, String)>,
    /// Image file path or URL (repeatable, at least one)
    #[arg(long = "image", required = true)]
    pub images: Vec<String>,
}

/// Arguments for `product edit`. Omitted fields keep their current value.
#[derive(Args, Debug)]
pub struct ProductEditArgs {
    /// Product ID
    pub id: String,
    #[arg(long)]
    pub name: Option<String>,
    #[arg(long)]
    pub description: Option<String>,
    #[arg(long)]
    pub price: Option<Decimal>,
    #[arg(long)]
    pub brand: Option<String>,
    #[arg(long)]
    pub category: Option<String>,
    /// Replace all specs with these KEY=VALUE entries
    #[arg(long = "spec", value_parser = parse_key_value)]
    pub specs: Vec<(String, String)>,
    /// Replace all images (file paths or URLs)
    #[arg(long = "image")]
    pub images: Vec<String>,
}

/// Banner command variants.
#[derive(Subcommand)]
pub enum BannerCommand {
    /// Create a banner
    Add(BannerAddArgs),
    /// Edit an existing banner
    Edit(BannerEditArgs),
    /// Delete a banner
    Delete {
        /// Banner ID
        id: String,
    },
    /// List banners
    List {
        /// Only show banners active right now
        #[arg(long)]
        active: bool,
    },
}

/// Arguments for `banner add`.
#[derive(Args, Debug)]
pub struct BannerAddArgs {
    /// Alt text
    #[arg(long)]
    pub alt: String,
    /// Click-through link
    #[arg(long)]
    pub link: String,
    /// Image file path or URL
    #[arg(long)]
    pub image: String,
    /// Display priority (higher first)
    #[arg(long)]
    pub priority: Option<i32>,
    /// Start of the display window (RFC 3339), defaults to now
    #[arg(long)]
    pub start: Option<DateTime<Utc>>,
    /// End of the display window (RFC 3339), defaults to start + 12 months
    #[arg(long)]
    pub end: Option<DateTime<Utc>>,
}

/// Arguments for `banner edit`. Omitted fields keep their current value.
#[derive(Args, Debug)]
pub struct BannerEditArgs {
    /// Banner ID
    pub id: String,
    #[arg(long)]
    pub alt: Option<String>,
    #[arg(long)]
    pub link: Option<String>,
    /// Replacement image file path or URL
    #[arg(long)]
    pub image: Option<String>,
    #[arg(long)]
    pub priority: Option<i32>,
    #[arg(long)]
    pub start: Option<DateTime<Utc>>,
    #[arg(long)]
    pub end: Option<DateTime<Utc>>,
}

/// Parse a `KEY=VALUE` pair.
fn parse_key_value(raw: &str) -> Result<(String, String), String> {
    let (key, value) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected KEY=VALUE, got '{raw}'"))?;
    let key = key.trim();
    if key.is_empty() {
        return Err(format!("empty key in '{raw}'"));
    }
    Ok((key.to_string(), value.trim().to_string()))
}
