//! Local uploads directory.

use std::path::PathBuf;

use super::error::PathError;
use super::platform::{data_root, ensure_dir};

/// Directory the filesystem upload backend stores objects in.
pub fn uploads_dir() -> Result<PathBuf, PathError> {
    let dir = data_root()?.join("uploads");
    ensure_dir(&dir)?;
    Ok(dir)
}

/// `file://` URL of the uploads directory, used when no public base URL is set.
pub fn default_public_base_url() -> Result<String, PathError> {
    let dir = uploads_dir()?;
    let display = dir.to_string_lossy().replace('\\', "/");
    let trimmed = display.trim_end_matches('/');
    if trimmed.starts_with('/') {
        Ok(format!("file://{trimmed}"))
    } else {
        Ok(format!("file:///{trimmed}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::paths::test_utils::DataDirOverride;

    #[test]
    fn test_uploads_dir_is_created() {
        let dir = tempfile::tempdir().unwrap();
        let _env = DataDirOverride::set(dir.path());

        let uploads = uploads_dir().unwrap();
        assert!(uploads.is_dir());
        assert!(default_public_base_url().unwrap().starts_with("file://"));
        assert!(default_public_base_url().unwrap().ends_with("uploads"));
    }
}
