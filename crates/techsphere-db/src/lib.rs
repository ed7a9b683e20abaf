//! `SQLite` adapters for the TechSphere storefront.
//!
//! - `documents` holds catalog entities (products, banners) as JSON
//! - `session_kv` backs the durable session store (cart)
//! - `settings_kv` holds storefront settings
#![deny(unsafe_code)]

pub mod factory;
pub mod repositories;
pub mod setup;

pub use factory::CoreFactory;

#[cfg(any(test, feature = "test-utils"))]
pub use factory::TestDb;

pub use repositories::{SqliteDocumentStore, SqliteSessionStore, SqliteSettingsRepository};

pub use setup::setup_database;
#[cfg(any(test, feature = "test-utils"))]
pub use setup::setup_test_database;

// Linked for the bundled SQLite build only.
use libsqlite3_sys as _;
