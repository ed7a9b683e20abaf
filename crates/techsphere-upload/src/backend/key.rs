//! Destination key validation.

use thiserror::Error;

use techsphere_core::upload::UploadError;

/// Why a destination key cannot be stored.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum KeyError {
    #[error("key is empty")]
    Empty,

    #[error("key must be relative")]
    Absolute,

    #[error("key contains an empty segment")]
    EmptySegment,

    #[error("key segment '{0}' is not allowed")]
    ReservedSegment(String),

    #[error("key contains a backslash")]
    Backslash,
}

impl KeyError {
    /// Convert into the transfer error reported for `key`.
    pub fn into_upload_error(self, key: &str) -> UploadError {
        UploadError::InvalidKey {
            key: format!("{key} ({self})"),
        }
    }
}

/// Check that `key` is a relative, `/`-separated path with no traversal.
pub fn validate_key(key: &str) -> Result<(), KeyError> {
    if key.is_empty() {
        return Err(KeyError::Empty);
    }
    if key.starts_with('/') {
        return Err(KeyError::Absolute);
    }
    if key.contains('\\') {
        return Err(KeyError::Backslash);
    }
    for segment in key.split('/') {
        match segment {
            "" => return Err(KeyError::EmptySegment),
            "." | ".." => return Err(KeyError::ReservedSegment(segment.to_string())),
            _ => {}
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_keys() {
        assert_eq!(validate_key("products/1700000000000_a.png"), Ok(()));
        assert_eq!(validate_key("a"), Ok(()));
        assert_eq!(validate_key("banners/1_.._a_b.png"), Ok(()));
    }

    #[test]
    fn test_invalid_keys() {
        assert_eq!(validate_key(""), Err(KeyError::Empty));
        assert_eq!(validate_key("/etc/passwd"), Err(KeyError::Absolute));
        assert_eq!(validate_key("a//b"), Err(KeyError::EmptySegment));
        assert_eq!(validate_key("a/"), Err(KeyError::EmptySegment));
        assert_eq!(
            validate_key("a/../b"),
            Err(KeyError::ReservedSegment("..".to_string()))
        );
        assert_eq!(validate_key("a\\b"), Err(KeyError::Backslash));
    }

    #[test]
    fn test_into_upload_error() {
        let err = KeyError::Absolute.into_upload_error("/x");
        assert!(matches!(err, UploadError::InvalidKey { ref key } if key.contains("/x")));
        assert!(!err.is_recoverable());
    }
}
