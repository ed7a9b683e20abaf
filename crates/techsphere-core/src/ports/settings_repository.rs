//! Persistence for the single storefront settings record.

use async_trait::async_trait;

use super::RepositoryError;
use crate::settings::Settings;

/// Loads and stores [`Settings`] as one record.
///
/// A store that has never been written yields [`Settings::with_defaults`].
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SettingsRepository: Send + Sync {
    async fn load(&self) -> Result<Settings, RepositoryError>;

    /// Replace the stored record.
    async fn save(&self, settings: &Settings) -> Result<(), RepositoryError>;
}
