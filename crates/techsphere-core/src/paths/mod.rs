//! Path utilities for TechSphere data directories.
//!
//! - Data root (honours `TECHSPHERE_DATA_DIR`)
//! - Database location
//! - Local uploads directory served by the filesystem upload backend
//!
//! # Design
//!
//! - Returns `PathBuf` and `PathError` for clear error handling
//! - No interactive/terminal I/O - adapters handle user prompts separately

mod database;
mod error;
mod platform;
mod uploads;

#[cfg(test)]
mod test_utils;

pub use database::database_path;
pub use error::PathError;
pub use platform::{DATA_DIR_ENV, data_root};
pub use uploads::{default_public_base_url, uploads_dir};
