//! Error types for field settings

use thiserror::Error;

/// Result type for field settings operations
pub type Result<T> = std::result::Result<T, FieldsError>;

/// Errors raised while encoding, decoding or applying field settings.
///
/// Submission problems are not errors; they are reported as
/// [`dataform_forms::ValidationErrors`].
#[derive(Debug, Error)]
pub enum FieldsError {
    /// Stored default content is not valid base64
    #[error("default content is not valid base64: {0}")]
    Base64(#[from] base64::DecodeError),

    /// Stored default content does not decode to a name-to-value map
    #[error("default content is not a valid map: {0}")]
    Json(#[from] serde_json::Error),

    /// A select value outside the allowed options
    #[error("invalid value for '{field}': {value}")]
    InvalidOption { field: String, value: String },

    /// A required setting is missing from the submission
    #[error("missing setting: {field}")]
    MissingSetting { field: String },
}
