//! Error types for the documentation crate.
//!
//! Building a document never fails: malformed annotations are skipped and
//! logged. These errors cover serializing the finished document.

use thiserror::Error;

/// Errors that can occur while producing documentation output.
#[derive(Debug, Error)]
pub enum DocsError {
    /// Failed to serialize the Swagger document to JSON.
    #[error("Failed to serialize Swagger document: {0}")]
    SerializationError(#[from] serde_json::Error),
}

/// Result type for documentation operations.
pub type DocsResult<T> = Result<T, DocsError>;
