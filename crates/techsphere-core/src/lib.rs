//! Core of the TechSphere storefront: domain types, ports and services.
//!
//! The crate holds no storage or transport code. Adapters (`techsphere-db`,
//! `techsphere-upload`, `techsphere-cli`) implement the ports defined here.
#![deny(unused_crate_dependencies)]

pub mod domain;
pub mod paths;
pub mod ports;
pub mod services;
pub mod settings;
pub mod upload;

// Re-export commonly used types for convenience
pub use domain::{
    AssetSource, Banner, BannerDraft, Cart, CartError, CartItem, CatalogEntity, CheckoutPolicy,
    Currency, DEFAULT_PRODUCT_CATEGORY, EntityDraft, OrderSummary, PendingAsset, Product,
    ProductDraft, ProductId, format_price,
};
pub use ports::{
    BlobUploadPort, CoreError, Document, DocumentFilter, DocumentStorePort, NoopUploadEmitter,
    ProgressCallback, Repos, RepositoryError, SessionStorePort, SettingsRepository,
    UploadCoordinatorPort, UploadEventEmitterPort,
};
pub use services::{CartManager, CmsWorkflow, SessionWriteQueue, SettingsService};
pub use settings::{
    DEFAULT_MAX_CONCURRENT_UPLOADS, DEFAULT_PROGRESS_INTERVAL_MS, DEFAULT_SESSION_KEY, Settings,
    SettingsError, SettingsUpdate, validate_settings,
};
pub use upload::{
    BatchFailure, BatchId, BatchProgress, UploadBatch, UploadBatchRequest, UploadError,
    UploadEvent, UploadFile, UploadStatus,
};

pub use paths::{PathError, data_root, database_path, uploads_dir};
