//! Filesystem-backed binary upload service.
//!
//! Objects are written under a root directory in fixed-size chunks, with a
//! progress report after each chunk. Data lands in a `.part` file that is
//! renamed into place only once fully written, so readers never see a
//! partial object.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::fs;
use tokio::io::AsyncWriteExt;
use tracing::debug;

use techsphere_core::ports::{BlobUploadPort, ProgressCallback};
use techsphere_core::upload::UploadError;

use super::key::validate_key;

/// Default write chunk size (64 KiB).
pub const DEFAULT_CHUNK_SIZE: usize = 64 * 1024;

/// Stores objects as files below `root` and serves them from `public_base_url`.
#[derive(Debug, Clone)]
pub struct FsBlobStore {
    root: PathBuf,
    public_base_url: String,
    chunk_size: usize,
}

impl FsBlobStore {
    /// Create a store rooted at `root`.
    pub fn new(root: impl Into<PathBuf>, public_base_url: impl Into<String>) -> Self {
        Self {
            root: root.into(),
            public_base_url: public_base_url.into().trim_end_matches('/').to_string(),
            chunk_size: DEFAULT_CHUNK_SIZE,
        }
    }

    /// Override the write chunk size (at least one byte).
    #[must_use]
    pub fn with_chunk_size(mut self, chunk_size: usize) -> Self {
        self.chunk_size = chunk_size.max(1);
        self
    }

    /// Root directory objects are written under.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Public URL for a stored key.
    pub fn public_url(&self, key: &str) -> String {
        format!("{}/{key}", self.public_base_url)
    }

    fn resolve(&self, key: &str) -> Result<PathBuf, UploadError> {
        validate_key(key).map_err(|e| e.into_upload_error(key))?;
        Ok(key.split('/').fold(self.root.clone(), |path, segment| path.join(segment)))
    }

    async fn write_chunks(
        &self,
        tmp: &Path,
        bytes: &[u8],
        on_progress: &ProgressCallback,
    ) -> std::io::Result<()> {
        let total = bytes.len() as u64;
        let mut file = fs::File::create(tmp).await?;
        on_progress(0, total);

        let mut written = 0u64;
        for chunk in bytes.chunks(self.chunk_size) {
            file.write_all(chunk).await?;
            written += chunk.len() as u64;
            on_progress(written, total);
        }

        file.flush().await?;
        file.sync_all().await?;
        Ok(())
    }
}

#[async_trait]
impl BlobUploadPort for FsBlobStore {
    async fn upload(
        &self,
        destination_key: &str,
        bytes: Vec<u8>,
        on_progress: &ProgressCallback,
    ) -> Result<String, UploadError> {
        let path = self.resolve(destination_key)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .await
                .map_err(|e| UploadError::from_io_error(&e))?;
        }

        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .ok_or_else(|| UploadError::invalid_key(destination_key))?;
        let tmp = path.with_file_name(format!("{file_name}.part"));

        if let Err(e) = self.write_chunks(&tmp, &bytes, on_progress).await {
            let _ = fs::remove_file(&tmp).await;
            return Err(UploadError::from_io_error(&e));
        }
        if let Err(e) = fs::rename(&tmp, &path).await {
            let _ = fs::remove_file(&tmp).await;
            return Err(UploadError::from_io_error(&e));
        }

        debug!(
            target: "techsphere.upload",
            key = destination_key,
            bytes = bytes.len(),
            path = %path.display(),
            "Object stored"
        );
        Ok(self.public_url(destination_key))
    }
}
