//! Error types for the howdoi-search crate.
//!
//! All errors use stable string messages suitable for display to users
//! and programmatic handling. Transport failures are split into
//! connection and TLS variants so the command line can tell the user
//! which setting to change.

/// Errors that can occur while searching for and extracting answers.
#[derive(Debug, thiserror::Error)]
pub enum SearchError {
    /// The remote host could not be reached.
    #[error("connection failed: {0}")]
    Connection(String),

    /// The TLS handshake or certificate verification failed.
    #[error("TLS error: {0}")]
    Tls(String),

    /// Any other HTTP failure (body read, redirect loop, client setup).
    #[error("HTTP error: {0}")]
    Http(String),

    /// Failed to parse search engine or question page HTML.
    #[error("parse error: {0}")]
    Parse(String),

    /// Invalid search configuration.
    #[error("config error: {0}")]
    Config(String),

    /// A response cache entry could not be encoded or decoded.
    #[error("cache error: {0}")]
    Cache(String),

    /// I/O error from the response cache directory.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl SearchError {
    /// Whether this error means the network could not be used at all.
    ///
    /// These are the failures the command line reports as a lost
    /// connection rather than as an unexpected error.
    pub fn is_network(&self) -> bool {
        matches!(self, Self::Connection(_) | Self::Tls(_))
    }
}

/// Convenience type alias for howdoi-search results.
pub type Result<T> = std::result::Result<T, SearchError>;
