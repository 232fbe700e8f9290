//! Repository error types

use std::io;

/// Result type for repository operations
pub type Result<T> = std::result::Result<T, RepositoryError>;

/// Errors that can occur during repository operations
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    /// No revision of `filename` carries `identifier`
    #[error("Revision with identifier '{identifier}' for file '{filename}' not found")]
    NotFound { filename: String, identifier: String },

    /// Tracked file could not be read and the read policy is strict
    #[error("Failed to read '{filename}': {source}")]
    ReadFailure { filename: String, source: io::Error },

    /// Restored content could not be written back
    #[error("Failed to write '{filename}': {source}")]
    WriteFailure { filename: String, source: io::Error },

    #[error("Filename must not be empty")]
    InvalidFilename,
}

impl RepositoryError {
    /// Create a not found error.
    pub fn not_found(filename: impl Into<String>, identifier: impl Into<String>) -> Self {
        Self::NotFound {
            filename: filename.into(),
            identifier: identifier.into(),
        }
    }

    /// Whether this is the `NotFound` condition
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}
