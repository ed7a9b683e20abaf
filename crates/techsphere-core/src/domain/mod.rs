//! Core domain types.
//!
//! Pure data types with no infrastructure dependencies.
//!
//! # Structure
//!
//! - `cart` - Session cart state machine (`Cart`, `CartItem`)
//! - `product` / `banner` - Catalog entities and their admin drafts
//! - `catalog` - Traits shared by every CMS-managed entity
//! - `asset` - Asset sources (resolved URL or pending upload)
//! - `checkout` - Order summary and price formatting

mod asset;
mod banner;
mod cart;
mod catalog;
mod checkout;
mod product;

pub use asset::{AssetSource, PendingAsset};
pub use banner::{Banner, BannerDraft};
pub use cart::{Cart, CartError, CartItem};
pub use catalog::{CatalogEntity, EntityDraft};
pub use checkout::{CheckoutPolicy, Currency, OrderSummary, format_price};
pub use product::{DEFAULT_PRODUCT_CATEGORY, Product, ProductDraft, ProductId};
