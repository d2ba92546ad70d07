//! Error types for the howdoi command.

use howdoi_search::SearchError;

/// Top-level error type for a howdoi run.
#[derive(Debug, thiserror::Error)]
pub enum HowdoiError {
    /// Search, fetch or extraction failure that is not reported as a
    /// printed message.
    #[error(transparent)]
    Search(#[from] SearchError),

    /// Writing the output failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience result type.
pub type Result<T> = std::result::Result<T, HowdoiError>;
