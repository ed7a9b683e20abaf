//! Upload error types.
//!
//! These errors are designed to be serializable and not depend on external
//! error types like `std::io::Error`. For I/O errors, we capture the kind
//! and message as strings.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error type for a single binary transfer.
#[derive(Clone, Debug, Error, Serialize, Deserialize, PartialEq, Eq)]
pub enum UploadError {
    /// I/O error while reading or writing bytes.
    #[error("I/O error ({kind}): {message}")]
    Io {
        /// The kind of I/O error (e.g., "NotFound", "PermissionDenied").
        kind: String,
        /// Detailed error message.
        message: String,
    },

    /// Network or storage-service error during the transfer.
    #[error("Transport error: {message}")]
    Transport {
        /// Detailed error message.
        message: String,
        /// HTTP status code if available.
        #[serde(skip_serializing_if = "Option::is_none")]
        status_code: Option<u16>,
    },

    /// The destination key cannot be stored.
    #[error("Invalid destination key: {key}")]
    InvalidKey {
        /// The offending key.
        key: String,
    },

    /// The storage service refused the object (permission, quota).
    #[error("Upload rejected: {message}")]
    Rejected {
        /// Reason given by the service.
        message: String,
    },

    /// The transfer task ended without reporting a result.
    #[error("Upload aborted")]
    Aborted,

    /// General/uncategorized error.
    #[error("{message}")]
    Other {
        /// Error message.
        message: String,
    },
}

impl UploadError {
    /// Create an I/O error from a `std::io::Error`.
    #[must_use]
    pub fn from_io_error(err: &std::io::Error) -> Self {
        let kind = err.kind();
        Self::Io {
            kind: format!("{kind:?}"),
            message: err.to_string(),
        }
    }

    /// Create a transport error.
    pub fn transport(message: impl Into<String>) -> Self {
        Self::Transport {
            message: message.into(),
            status_code: None,
        }
    }

    /// Create a transport error with HTTP status code.
    pub fn transport_with_status(message: impl Into<String>, status_code: u16) -> Self {
        Self::Transport {
            message: message.into(),
            status_code: Some(status_code),
        }
    }

    /// Create an invalid key error.
    pub fn invalid_key(key: impl Into<String>) -> Self {
        Self::InvalidKey { key: key.into() }
    }

    /// Create a rejected error.
    pub fn rejected(message: impl Into<String>) -> Self {
        Self::Rejected {
            message: message.into(),
        }
    }

    /// Create a generic error.
    pub fn other(message: impl Into<String>) -> Self {
        Self::Other {
            message: message.into(),
        }
    }

    /// Check if a retry could succeed.
    #[must_use]
    pub const fn is_recoverable(&self) -> bool {
        matches!(self, Self::Transport { .. } | Self::Io { .. } | Self::Aborted)
    }

    /// Convert to a user-friendly message.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::Io { message, .. } => format!("File operation failed: {message}"),
            Self::Transport {
                message,
                status_code: Some(code),
            } => format!("Upload failed (HTTP {code}): {message}"),
            Self::Transport { message, .. } => format!("Upload failed: {message}"),
            Self::InvalidKey { key } => format!("'{key}' is not a valid storage path."),
            Self::Rejected { .. } => {
                "Permission denied. Please check your storage rules.".to_string()
            }
            Self::Aborted => "Upload was canceled.".to_string(),
            Self::Other { message } => message.clone(),
        }
    }
}

/// Convenience result type for upload operations.
pub type UploadResult<T> = Result<T, UploadError>;
