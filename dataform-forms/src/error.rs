//! Error types for the form runtime

use std::path::PathBuf;
use thiserror::Error;

/// Result type for form runtime operations
pub type Result<T> = std::result::Result<T, FormsError>;

/// Errors raised outside of user validation.
///
/// Problems with submitted values are never reported through this type; they
/// are collected into [`crate::ValidationErrors`] and redisplayed.
#[derive(Debug, Error)]
pub enum FormsError {
    /// Configuration file does not exist
    #[error("config file not found: {path}")]
    ConfigNotFound { path: PathBuf },

    /// Configuration file extension is not toml, yaml, yml or json
    #[error("unsupported config format: {path}")]
    UnsupportedConfigFormat { path: PathBuf },

    /// Configuration could not be extracted
    #[error("config error: {0}")]
    Config(#[from] Box<figment::Error>),
}

impl From<figment::Error> for FormsError {
    fn from(err: figment::Error) -> Self {
        FormsError::Config(Box::new(err))
    }
}
