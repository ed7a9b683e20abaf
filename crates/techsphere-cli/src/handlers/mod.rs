//! Command handlers.
//!
//! Handlers follow one pattern:
//! - Signature: `pub async fn execute(ctx: &CliContext, ...) -> Result<()>`
//! - Thin wrappers that:
//!   1. Parse/validate CLI-specific input
//!   2. Call core services from the context
//!   3. Format output for the terminal
//!
//! Handlers never touch repositories or the database directly.

pub mod assets;
pub mod banner;
pub mod cart;
pub mod checkout;
pub mod config;
pub mod paths;
pub mod product;
