//! Traits shared by every entity managed through the CMS workflow.

use serde::Serialize;
use serde::de::DeserializeOwned;

use super::asset::AssetSource;
use crate::ports::CoreError;

/// A record owned by the document store and edited through the admin panel.
pub trait CatalogEntity: Serialize + DeserializeOwned + Clone + Send + Sync + 'static {
    /// Document store collection name.
    const COLLECTION: &'static str;

    /// Document id.
    fn id(&self) -> &str;
}

/// Admin form values that turn into a [`CatalogEntity`] once assets resolve.
///
/// The workflow calls the methods in a fixed order: `validate`, then
/// `take_assets`, then (after every upload succeeded) `build`.
pub trait EntityDraft: Send {
    /// The entity this draft produces.
    type Entity: CatalogEntity;

    /// Check scalar fields. Runs before any I/O.
    fn validate(&self) -> Result<(), CoreError>;

    /// Move the asset sources out of the draft, in display order.
    fn take_assets(&mut self) -> Vec<AssetSource>;

    /// Assemble the entity.
    ///
    /// `assets` is `None` when the draft carried no asset; implementations
    /// then keep the asset fields of `previous` unchanged.
    fn build(
        self,
        id: String,
        assets: Option<Vec<String>>,
        previous: Option<&Self::Entity>,
    ) -> Self::Entity;
}
