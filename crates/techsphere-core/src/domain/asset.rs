//! Asset references attached to catalog entities.

use std::fmt;

use crate::ports::CoreError;

/// A local binary waiting to be uploaded.
#[derive(Clone, PartialEq, Eq)]
pub struct PendingAsset {
    /// Original file name (used to build the destination key).
    pub file_name: String,
    /// Raw bytes.
    pub bytes: Vec<u8>,
}

impl PendingAsset {
    /// Create a pending asset from a file name and its contents.
    pub fn new(file_name: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            file_name: file_name.into(),
            bytes,
        }
    }

    /// Size in bytes.
    pub fn len(&self) -> u64 {
        self.bytes.len() as u64
    }

    /// Whether the asset has no content.
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

// Bytes are elided so logs stay readable.
impl fmt::Debug for PendingAsset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PendingAsset")
            .field("file_name", &self.file_name)
            .field("len", &self.bytes.len())
            .finish()
    }
}

/// Where an entity's asset comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AssetSource {
    /// Already resolved to a fetchable URL.
    Url(String),
    /// Local binary that must be uploaded before the entity is written.
    Upload(PendingAsset),
}

impl AssetSource {
    /// Shorthand for [`AssetSource::Url`].
    pub fn url(url: impl Into<String>) -> Self {
        Self::Url(url.into())
    }

    /// Shorthand for [`AssetSource::Upload`].
    pub fn upload(file_name: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self::Upload(PendingAsset::new(file_name, bytes))
    }

    /// Human-readable label used in error messages.
    pub fn label(&self) -> &str {
        match self {
            Self::Url(url) => url,
            Self::Upload(asset) => &asset.file_name,
        }
    }

    /// Reject sources that can never resolve to a usable URL.
    pub fn validate(&self) -> Result<(), CoreError> {
        match self {
            Self::Url(url) => {
                let url = url.trim();
                if url.is_empty() {
                    return Err(CoreError::Validation("Image URL cannot be empty".to_string()));
                }
                if !(url.starts_with("http://")
                    || url.starts_with("https://")
                    || url.starts_with("file://"))
                {
                    return Err(CoreError::Validation(format!(
                        "'{url}' is not a valid image URL"
                    )));
                }
                Ok(())
            }
            Self::Upload(asset) => {
                if asset.file_name.trim().is_empty() {
                    return Err(CoreError::Validation("Upload has no file name".to_string()));
                }
                if asset.is_empty() {
                    return Err(CoreError::Validation(format!(
                        "'{}' is empty",
                        asset.file_name
                    )));
                }
                Ok(())
            }
        }
    }
}
