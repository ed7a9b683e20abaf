//! Main CLI parser and top-level argument handling.
//!
//! This module defines the root CLI structure with global options.

use clap::Parser;

use crate::commands::Commands;

/// Command-line interface for the TechSphere storefront.
///
/// Storefront data lives under the directory named by
/// `TECHSPHERE_DATA_DIR` (a `.env` file is honoured), or the platform data
/// directory otherwise.
#[derive(Parser)]
#[command(name = "techsphere")]
#[command(about = "Manage the TechSphere cart, catalog and banners")]
#[command(version)]
pub struct Cli {
    /// Enable verbose/debug output
    #[arg(short = 'v', long = "verbose", global = true)]
    pub verbose: bool,

    /// Disable upload progress bars
    #[arg(long = "no-progress", global = true)]
    pub no_progress: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}
