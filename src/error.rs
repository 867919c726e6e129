//! Error types for the memefinder service.

/// Top-level error type for the service shell.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// Configuration file could not be parsed or serialized.
    #[error("config error: {0}")]
    Config(String),

    /// Search setup failed (invalid sources, missing resources).
    #[error(transparent)]
    Search(#[from] meme_search::SearchError),

    /// HTTP server error.
    #[error("server error: {0}")]
    Server(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience result type.
pub type Result<T> = std::result::Result<T, AppError>;
