//! Server error types.

use thiserror::Error;

/// Errors that can occur while starting or running the server.
#[derive(Debug, Error)]
pub enum ServerError {
    /// The configured address is invalid or cannot be bound.
    #[error("Bind error: {0}")]
    BindError(String),

    /// I/O error during server operation.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The document could not be prepared for serving.
    #[error(transparent)]
    Docs(#[from] pinax_docs::DocsError),
}
