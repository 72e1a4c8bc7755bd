//! Error types for the schema registry

use thiserror::Error;

/// Result type for registry operations
pub type Result<T> = std::result::Result<T, RegistryError>;

/// Schema registry errors
///
/// The first three variants are caller errors and never leave partial state
/// behind; `LockTimeout` and `StorageUnavailable` are infrastructure errors
/// surfaced so callers can tell "fix your request" from "retry later".
#[derive(Error, Debug)]
pub enum RegistryError {
    #[error("Subject name must be non-empty")]
    InvalidSubject,

    #[error("Invalid schema: {0}")]
    InvalidSchema(String),

    #[error("Subject not found: {0}")]
    SubjectNotFound(String),

    #[error("Timed out waiting for the registration lock on subject {subject}")]
    LockTimeout { subject: String },

    #[error("Storage unavailable: {0}")]
    StorageUnavailable(String),
}
