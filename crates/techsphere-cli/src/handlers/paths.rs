//! Paths command handler.
//!
//! Displays all resolved paths for diagnostics.

use anyhow::Result;
use techsphere_core::paths::{DATA_DIR_ENV, default_public_base_url};
use techsphere_core::{data_root, database_path, uploads_dir};

/// Print resolved paths in `key = value` format.
pub fn execute() -> Result<()> {
    println!("data_root       = {}", data_root()?.display());
    println!("database        = {}", database_path()?.display());
    println!("uploads         = {}", uploads_dir()?.display());
    println!("uploads_url     = {}", default_public_base_url()?);
    println!("override_env    = {DATA_DIR_ENV}");
    Ok(())
}
