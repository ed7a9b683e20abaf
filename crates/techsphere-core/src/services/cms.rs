//! CMS entity workflow - create, update and delete catalog entities.
//!
//! Submission order is fixed:
//!
//! 1. validate draft scalars (no I/O)
//! 2. require an asset on create
//! 3. on update, confirm the entity still exists
//! 4. upload new binaries and wait for every URL
//! 5. write the full document once
//!
//! Any failure before step 5 leaves the store untouched.

use std::sync::Arc;

use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::domain::{AssetSource, CatalogEntity, EntityDraft};
use crate::ports::{
    CoreError, DocumentFilter, DocumentStorePort, RepositoryError, UploadCoordinatorPort,
};
use crate::upload::{UploadBatchRequest, UploadFile, destination_key};

/// Orchestrates admin edits of products and banners.
pub struct CmsWorkflow {
    store: Arc<dyn DocumentStorePort>,
    uploads: Arc<dyn UploadCoordinatorPort>,
}

impl CmsWorkflow {
    /// Create a workflow over a document store and an upload coordinator.
    pub fn new(store: Arc<dyn DocumentStorePort>, uploads: Arc<dyn UploadCoordinatorPort>) -> Self {
        Self { store, uploads }
    }

    /// Create (`existing = None`) or update an entity.
    ///
    /// On update, a draft without assets keeps the asset fields of `existing`.
    pub async fn submit<D: EntityDraft>(
        &self,
        mut draft: D,
        existing: Option<&D::Entity>,
    ) -> Result<D::Entity, CoreError> {
        let collection = D::Entity::COLLECTION;
        draft.validate()?;

        let assets = draft.take_assets();
        if existing.is_none() && assets.is_empty() {
            return Err(CoreError::Validation(
                "At least one image is required".to_string(),
            ));
        }

        let id = match existing {
            Some(entity) => {
                self.ensure_exists(collection, entity.id()).await?;
                entity.id().to_string()
            }
            None => Uuid::new_v4().to_string(),
        };

        let urls = if assets.is_empty() {
            None
        } else {
            Some(self.resolve_assets(collection, assets).await?)
        };

        let entity = draft.build(id, urls, existing);
        let document = serde_json::to_value(&entity)
            .map_err(|e| CoreError::Internal(format!("Failed to encode {collection}: {e}")))?;
        self.store.put(collection, entity.id(), &document).await?;

        info!(
            target: "techsphere.cms",
            collection,
            id = entity.id(),
            created = existing.is_none(),
            "Entity saved"
        );
        Ok(entity)
    }

    /// Delete an entity by id.
    pub async fn delete<E: CatalogEntity>(&self, id: &str) -> Result<(), CoreError> {
        self.store
            .delete(E::COLLECTION, id)
            .await
            .map_err(|e| not_found_or(e, E::COLLECTION, id))?;
        info!(target: "techsphere.cms", collection = E::COLLECTION, id, "Entity deleted");
        Ok(())
    }

    /// Every entity of a collection. Undecodable documents are skipped.
    pub async fn list<E: CatalogEntity>(&self) -> Result<Vec<E>, CoreError> {
        self.query(None).await
    }

    /// Entities whose documents match `filter`.
    pub async fn list_where<E: CatalogEntity>(
        &self,
        filter: DocumentFilter,
    ) -> Result<Vec<E>, CoreError> {
        self.query(Some(filter)).await
    }

    async fn query<E: CatalogEntity>(
        &self,
        filter: Option<DocumentFilter>,
    ) -> Result<Vec<E>, CoreError> {
        let documents = self.store.list(E::COLLECTION, filter).await?;
        let entities = documents
            .into_iter()
            .filter_map(|doc| match serde_json::from_value::<E>(doc.data) {
                Ok(entity) => Some(entity),
                Err(e) => {
                    warn!(
                        target: "techsphere.cms",
                        collection = E::COLLECTION,
                        id = %doc.id,
                        error = %e,
                        "Skipping malformed document"
                    );
                    None
                }
            })
            .collect();
        Ok(entities)
    }

    /// Fetch one entity.
    pub async fn get<E: CatalogEntity>(&self, id: &str) -> Result<E, CoreError> {
        let data = self
            .store
            .get(E::COLLECTION, id)
            .await?
            .ok_or_else(|| CoreError::NotFound(format!("{}/{id}", E::COLLECTION)))?;
        serde_json::from_value(data).map_err(|e| {
            CoreError::Repository(RepositoryError::Serialization(format!(
                "{}/{id}: {e}",
                E::COLLECTION
            )))
        })
    }

    async fn ensure_exists(&self, collection: &str, id: &str) -> Result<(), CoreError> {
        match self.store.get(collection, id).await? {
            Some(_) => Ok(()),
            None => Err(CoreError::NotFound(format!("{collection}/{id}"))),
        }
    }

    /// Resolve every source to a URL, keeping the original order.
    ///
    /// Each upload gets its own key even when file names repeat.
    async fn resolve_assets(
        &self,
        collection: &str,
        assets: Vec<AssetSource>,
    ) -> Result<Vec<String>, CoreError> {
        let now_ms = chrono::Utc::now().timestamp_millis();
        let mut resolved: Vec<Option<String>> = Vec::with_capacity(assets.len());
        let mut slots = Vec::new();
        let mut labels = Vec::new();
        let mut files = Vec::new();

        for asset in assets {
            match asset {
                AssetSource::Url(url) => resolved.push(Some(url.trim().to_string())),
                AssetSource::Upload(pending) => {
                    slots.push(resolved.len());
                    resolved.push(None);
                    files.push(UploadFile::new(
                        destination_key(collection, &pending.file_name, now_ms, &upload_tag()),
                        pending.bytes,
                    ));
                    labels.push(pending.file_name);
                }
            }
        }

        if !files.is_empty() {
            debug!(target: "techsphere.cms", collection, uploads = files.len(), "Uploading assets");
            let batch = self
                .uploads
                .upload_batch(UploadBatchRequest::new(files))
                .await
                .map_err(|source| CoreError::Transfer {
                    asset: labels.join(", "),
                    source,
                })?;

            let urls = batch.wait().await.map_err(|failure| {
                let asset = labels
                    .get(failure.index)
                    .cloned()
                    .unwrap_or(failure.destination_key);
                warn!(
                    target: "techsphere.cms",
                    collection,
                    asset = %asset,
                    error = %failure.error,
                    "Asset upload failed; nothing written"
                );
                CoreError::Transfer {
                    asset,
                    source: failure.error,
                }
            })?;

            for (slot, url) in slots.into_iter().zip(urls) {
                resolved[slot] = Some(url);
            }
        }

        resolved
            .into_iter()
            .map(|url| url.ok_or_else(|| CoreError::Internal("Unresolved asset".to_string())))
            .collect()
    }
}

/// Eight hex digits of a fresh v4 uuid.
fn upload_tag() -> String {
    let mut tag = Uuid::new_v4().simple().to_string();
    tag.truncate(8);
    tag
}

fn not_found_or(err: RepositoryError, collection: &str, id: &str) -> CoreError {
    match err {
        RepositoryError::NotFound(_) => CoreError::NotFound(format!("{collection}/{id}")),
        other => CoreError::Repository(other),
    }
}
