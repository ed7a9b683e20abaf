//! Data root resolution.

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use super::error::PathError;

/// Environment variable overriding the data root.
pub const DATA_DIR_ENV: &str = "TECHSPHERE_DATA_DIR";

/// Get the root directory for application data (database, uploads).
///
/// Resolution order:
/// 1. `TECHSPHERE_DATA_DIR` environment variable
/// 2. System data directory (e.g., `~/.local/share/techsphere`)
///
/// The directory is created if it does not exist.
pub fn data_root() -> Result<PathBuf, PathError> {
    let root = match env::var(DATA_DIR_ENV) {
        Ok(path) if path.trim().is_empty() => {
            return Err(PathError::BlankOverride(DATA_DIR_ENV));
        }
        Ok(path) => PathBuf::from(path),
        Err(_) => dirs::data_local_dir()
            .ok_or(PathError::NoDataDir(DATA_DIR_ENV))?
            .join("techsphere"),
    };

    ensure_dir(&root)?;
    Ok(root)
}

/// Create `path` (and parents) unless it already is a directory.
pub(super) fn ensure_dir(path: &Path) -> Result<(), PathError> {
    if path.exists() {
        if !path.is_dir() {
            return Err(PathError::NotADirectory(path.to_path_buf()));
        }
        return Ok(());
    }

    fs::create_dir_all(path).map_err(|source| PathError::Create {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::paths::test_utils::DataDirOverride;

    #[test]
    fn test_env_override_wins() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("nested");
        let _env = DataDirOverride::set(&target);

        assert_eq!(data_root().unwrap(), target);
        assert!(target.is_dir());
    }

    #[test]
    fn test_file_in_place_of_root_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("plain");
        fs::write(&file, b"x").unwrap();
        let _env = DataDirOverride::set(&file);

        assert!(matches!(data_root(), Err(PathError::NotADirectory(_))));
    }

    #[test]
    fn test_blank_override_is_rejected() {
        let _env = DataDirOverride::set("  ");

        let err = data_root().unwrap_err();
        assert!(matches!(err, PathError::BlankOverride(DATA_DIR_ENV)));
        assert!(err.to_string().contains(DATA_DIR_ENV));
    }
}
