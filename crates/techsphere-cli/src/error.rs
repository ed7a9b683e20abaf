//! CLI-specific error types and mappings.
//!
//! Maps `CoreError` to exit codes and user-facing messages.

use techsphere_core::CoreError;
use thiserror::Error;

/// CLI-specific error type.
#[derive(Debug, Error)]
pub enum CliError {
    /// Core domain error.
    #[error("{0}")]
    Core(String),

    /// Argument or input validation error.
    #[error("Invalid arguments: {0}")]
    Arguments(String),

    /// The requested product or banner does not exist.
    #[error("{0}")]
    NotFound(String),

    /// IO error (file not found, permission denied, etc.).
    #[error("IO error: {0}")]
    Io(String),

    /// An asset upload failed.
    #[error("Upload failed: {0}")]
    Upload(String),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Database error.
    #[error("Database error: {0}")]
    Database(String),
}

impl CliError {
    /// Map error to appropriate exit code.
    ///
    /// Exit codes follow Unix conventions:
    /// - 0: Success
    /// - 1: General error
    /// - 2: Misuse of shell command (invalid arguments)
    /// - 64-78: Reserved for specific error categories (see sysexits.h)
    pub const fn exit_code(&self) -> i32 {
        match self {
            Self::Core(_) => 1,
            Self::Arguments(_) => 2, // EX_USAGE
            Self::NotFound(_) => 66, // EX_NOINPUT
            Self::Io(_) => 74,       // EX_IOERR
            Self::Upload(_) => 75,   // EX_TEMPFAIL
            Self::Config(_) => 78,   // EX_CONFIG
            Self::Database(_) => 73, // EX_CANTCREAT (closest fit)
        }
    }

    /// Categorize a core error without consuming it.
    pub fn from_core(err: &CoreError) -> Self {
        match err {
            CoreError::Repository(repo_err) => Self::Database(repo_err.to_string()),
            CoreError::Settings(settings_err) => Self::Config(settings_err.to_string()),
            CoreError::Cart(cart_err) => Self::Arguments(cart_err.to_string()),
            CoreError::Validation(msg) => Self::Arguments(msg.clone()),
            CoreError::NotFound(what) => Self::NotFound(format!("Not found: {what}")),
            CoreError::Transfer { asset, source } => {
                Self::Upload(format!("{asset}: {}", source.user_message()))
            }
            CoreError::Configuration(msg) => Self::Config(msg.clone()),
            CoreError::Internal(msg) => Self::Core(msg.clone()),
        }
    }

    /// Exit code for any error reaching `main`.
    pub fn exit_code_for(err: &anyhow::Error) -> i32 {
        if let Some(cli) = err.downcast_ref::<Self>() {
            return cli.exit_code();
        }
        if let Some(core) = err.downcast_ref::<CoreError>() {
            return Self::from_core(core).exit_code();
        }
        if err.downcast_ref::<std::io::Error>().is_some() {
            return Self::Io(String::new()).exit_code();
        }
        1
    }
}

impl From<CoreError> for CliError {
    fn from(err: CoreError) -> Self {
        Self::from_core(&err)
    }
}

impl From<std::io::Error> for CliError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use techsphere_core::{CartError, UploadError};

    #[test]
    fn test_core_error_exit_codes() {
        assert_eq!(
            CliError::from(CoreError::Validation("x".into())).exit_code(),
            2
        );
        assert_eq!(
            CliError::from(CoreError::Cart(CartError::InvalidQuantity(0))).exit_code(),
            2
        );
        assert_eq!(CliError::from(CoreError::NotFound("p".into())).exit_code(), 66);
        assert_eq!(
            CliError::from(CoreError::Transfer {
                asset: "a.png".into(),
                source: UploadError::transport("reset"),
            })
            .exit_code(),
            75
        );
    }

    #[test]
    fn test_exit_code_through_anyhow() {
        let err = anyhow::Error::new(CoreError::NotFound("products/p1".into()));
        assert_eq!(CliError::exit_code_for(&err), 66);

        let err = anyhow::anyhow!("something else");
        assert_eq!(CliError::exit_code_for(&err), 1);
    }
}
