//! CLI bootstrap - the composition root.
//!
//! This module is the ONLY place where infrastructure is wired together
//! for the CLI adapter:
//! - Database pool and repositories (via techsphere-db)
//! - Filesystem upload backend and coordinator (via techsphere-upload)
//! - Cart manager, CMS workflow and settings service (via techsphere-core)

use std::sync::Arc;

use anyhow::Result;
use techsphere_core::paths::default_public_base_url;
use techsphere_core::{
    CartManager, CmsWorkflow, Settings, SettingsService, database_path, uploads_dir,
};
use techsphere_db::{CoreFactory, setup_database};
use techsphere_upload::{
    FsBlobStore, UploadCoordinatorConfig, UploadCoordinatorDeps, build_upload_coordinator,
};
use tracing::debug;

use crate::presentation::ProgressBarEmitter;

/// Bootstrap configuration for the CLI.
#[derive(Debug, Clone, Copy)]
pub struct CliConfig {
    /// Draw upload progress bars.
    pub show_progress: bool,
}

impl CliConfig {
    /// Progress bars only when stderr is a terminal.
    pub fn with_defaults() -> Self {
        use std::io::IsTerminal;
        Self {
            show_progress: std::io::stderr().is_terminal(),
        }
    }
}

/// Fully composed application context for CLI commands.
pub struct CliContext {
    /// Settings as loaded at startup.
    pub settings: Settings,
    /// Settings persistence.
    pub settings_service: SettingsService,
    /// The session cart.
    pub cart: CartManager,
    /// Product and banner editing.
    pub cms: CmsWorkflow,
}

impl CliContext {
    /// Access the startup settings.
    pub const fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Access the settings service.
    pub const fn settings_service(&self) -> &SettingsService {
        &self.settings_service
    }

    /// Access the cart manager.
    pub const fn cart(&self) -> &CartManager {
        &self.cart
    }

    /// Access the CMS workflow.
    pub const fn cms(&self) -> &CmsWorkflow {
        &self.cms
    }
}

/// Bootstrap the CLI application.
///
/// 1. Creates the database pool and repositories
/// 2. Loads settings
/// 3. Builds the upload coordinator over the local uploads directory
/// 4. Assembles the CMS workflow and loads the session cart
pub async fn bootstrap(config: CliConfig) -> Result<CliContext> {
    // 1. Database and repositories
    let db_path = database_path()?;
    let pool = setup_database(&db_path).await?;
    let repos = CoreFactory::build_repos(pool);

    // 2. Settings
    let settings_service = SettingsService::new(Arc::clone(&repos.settings));
    let settings = settings_service.get().await?;

    // 3. Uploads
    let public_base_url = match settings.public_base_url.clone() {
        Some(url) => url,
        None => default_public_base_url()?,
    };
    let backend = FsBlobStore::new(uploads_dir()?, public_base_url);
    let coordinator = build_upload_coordinator(UploadCoordinatorDeps {
        backend: Arc::new(backend),
        event_emitter: Arc::new(ProgressBarEmitter::new(config.show_progress)),
        config: UploadCoordinatorConfig::from_settings(&settings),
    });

    // 4. Services
    let cms = CmsWorkflow::new(Arc::clone(&repos.documents), Arc::new(coordinator));
    let cart = CartManager::load(
        Arc::clone(&repos.sessions),
        settings.effective_session_key(),
    )
    .await;

    debug!(target: "techsphere.cli", db = %db_path.display(), "CLI context ready");

    Ok(CliContext {
        settings,
        settings_service,
        cart,
        cms,
    })
}
