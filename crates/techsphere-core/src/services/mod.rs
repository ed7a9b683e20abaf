//! Core services - the storefront's business logic layer.
//!
//! Services orchestrate between ports (trait interfaces) and domain logic.
//! They don't know about concrete implementations.

mod cart;
mod cms;
mod settings_service;

pub use cart::{CartManager, SessionWriteQueue};
pub use cms::CmsWorkflow;
pub use settings_service::SettingsService;
