//! Storefront settings: read, patch, reset.

use std::sync::Arc;

use tracing::debug;

use crate::ports::{CoreError, SettingsRepository};
use crate::settings::{Settings, SettingsUpdate, validate_settings};

/// Validating front for the settings record.
pub struct SettingsService {
    repo: Arc<dyn SettingsRepository>,
}

impl SettingsService {
    pub fn new(repo: Arc<dyn SettingsRepository>) -> Self {
        Self { repo }
    }

    pub async fn get(&self) -> Result<Settings, CoreError> {
        Ok(self.repo.load().await?)
    }

    /// Apply a partial update. Nothing is written if the merged record is invalid.
    pub async fn update(&self, update: SettingsUpdate) -> Result<Settings, CoreError> {
        let mut merged = self.repo.load().await?;
        merged.merge(&update);
        validate_settings(&merged)?;
        self.repo.save(&merged).await?;
        debug!(target: "techsphere.settings", ?update, "Settings updated");
        Ok(merged)
    }

    /// Overwrite the record with defaults and return them.
    pub async fn reset(&self) -> Result<Settings, CoreError> {
        let defaults = Settings::with_defaults();
        self.repo.save(&defaults).await?;
        debug!(target: "techsphere.settings", "Settings reset");
        Ok(defaults)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::RepositoryError;
    use crate::ports::settings_repository::MockSettingsRepository;
    use rust_decimal::Decimal;

    fn service(repo: MockSettingsRepository) -> SettingsService {
        SettingsService::new(Arc::new(repo))
    }

    #[tokio::test]
    async fn test_update_merges_and_saves() {
        let mut repo = MockSettingsRepository::new();
        repo.expect_load()
            .returning(|| Ok(Settings::with_defaults()));
        repo.expect_save()
            .withf(|s| s.flat_shipping == Some(Decimal::new(1500, 2)) && s.tax_rate.is_some())
            .times(1)
            .returning(|_| Ok(()));

        let update = SettingsUpdate {
            flat_shipping: Some(Some(Decimal::new(1500, 2))),
            ..Default::default()
        };
        let merged = service(repo).update(update).await.unwrap();
        assert_eq!(merged.flat_shipping, Some(Decimal::new(1500, 2)));
        assert_eq!(merged.max_concurrent_uploads, Some(4));
    }

    #[tokio::test]
    async fn test_invalid_update_is_not_saved() {
        let mut repo = MockSettingsRepository::new();
        repo.expect_load()
            .returning(|| Ok(Settings::with_defaults()));
        repo.expect_save().never();

        let update = SettingsUpdate {
            max_concurrent_uploads: Some(Some(0)),
            ..Default::default()
        };
        assert!(matches!(
            service(repo).update(update).await,
            Err(CoreError::Settings(_))
        ));
    }

    #[tokio::test]
    async fn test_reset_writes_defaults() {
        let mut repo = MockSettingsRepository::new();
        repo.expect_save()
            .withf(|s| *s == Settings::with_defaults())
            .times(1)
            .returning(|_| Ok(()));

        let settings = service(repo).reset().await.unwrap();
        assert_eq!(settings.session_key.as_deref(), Some("techsphere_cart"));
    }

    #[tokio::test]
    async fn test_storage_failure_surfaces() {
        let mut repo = MockSettingsRepository::new();
        repo.expect_load()
            .returning(|| Err(RepositoryError::Storage("disk full".to_string())));

        assert!(matches!(
            service(repo).get().await,
            Err(CoreError::Repository(RepositoryError::Storage(_)))
        ));
    }
}
