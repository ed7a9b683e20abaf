//! Data directory failures.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Why the storefront data directories could not be prepared.
#[derive(Debug, Error)]
pub enum PathError {
    /// Neither an override nor a platform data directory is available.
    #[error("no data directory available; set {0}")]
    NoDataDir(&'static str),

    /// The override variable is set but blank.
    #[error("{0} is set but empty")]
    BlankOverride(&'static str),

    #[error("{} exists and is not a directory", .0.display())]
    NotADirectory(PathBuf),

    #[error("cannot create {}: {source}", path.display())]
    Create {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}
