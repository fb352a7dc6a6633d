//! Error types for the HTTP server.

use std::path::PathBuf;

use axum::http::{StatusCode, header};
use axum::response::{IntoResponse, Response};

/// Per-request error.
///
/// Converted into an HTTP response; never terminates the server.
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    /// Nothing to serve at the requested path.
    #[error("File not found: {0}")]
    NotFound(String),

    /// Only GET and HEAD are supported.
    #[error("Method not allowed")]
    MethodNotAllowed,

    /// I/O error while reading content.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        match self {
            Self::NotFound(path) => {
                tracing::debug!(path = %path, "File not found");
                (StatusCode::NOT_FOUND, "Not Found").into_response()
            }
            Self::MethodNotAllowed => (
                StatusCode::METHOD_NOT_ALLOWED,
                [(header::ALLOW, "GET, HEAD")],
                "Method Not Allowed",
            )
                .into_response(),
            Self::Io(e) => {
                tracing::error!(error = %e, "Failed to read file");
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error").into_response()
            }
        }
    }
}

/// Error that stops the server.
#[derive(Debug, thiserror::Error)]
pub enum RunError {
    /// The served directory is missing or not a directory.
    #[error("Root directory not found: {}", .0.display())]
    RootNotFound(PathBuf),

    /// The file watcher could not be set up.
    #[error("Failed to watch root directory: {0}")]
    Watch(#[from] notify::Error),

    /// The configured host and port do not resolve to a socket address.
    #[error("Invalid address {addr}: {source}")]
    InvalidAddress {
        /// Address that was requested.
        addr: String,
        /// Underlying error.
        source: std::io::Error,
    },

    /// The listener could not be bound.
    #[error("Failed to bind {addr}: {source}")]
    Bind {
        /// Address that was requested.
        addr: String,
        /// Underlying error.
        source: std::io::Error,
    },

    /// The file watcher ended while the server was still running.
    #[error("File watcher stopped unexpectedly: {0}")]
    WatcherStopped(String),

    /// I/O error from the accept loop.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
