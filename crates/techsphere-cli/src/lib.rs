//! Command-line adapter for the TechSphere storefront.
//!
//! `main.rs` is the composition root; everything it needs lives here so the
//! parser and handlers can be tested without a binary.
#![deny(unsafe_code)]
#![deny(unused_crate_dependencies)]

// Used by the binary only
use dotenvy as _;
use tracing_subscriber as _;

pub mod bootstrap;
pub mod commands;
pub mod config_commands;
pub mod error;
pub mod handlers;
pub mod parser;
pub mod presentation;

// Re-export primary types for convenient access
pub use bootstrap::{CliConfig, CliContext, bootstrap};
pub use commands::{BannerCommand, CartCommand, Commands, ProductCommand};
pub use config_commands::ConfigCommand;
pub use error::CliError;
pub use parser::Cli;
