//! Trait definition for page fetching backends.
//!
//! The lookup pipeline never talks to the network directly: it asks a
//! [`PageFetcher`] for the body at a URL. [`crate::http::HttpFetcher`] is
//! the real implementation; tests drive the pipeline with in-memory
//! fetchers serving fixture pages.

use crate::error::SearchError;

/// A source of page bodies keyed by URL.
///
/// Implementations decide how a URL is resolved (HTTP, disk cache, a
/// fixture map). Non-success HTTP statuses are not errors: their body is
/// returned and simply parses to "no results".
pub trait PageFetcher: Send + Sync {
    /// Fetch the body of the page at `url`.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::Connection`] or [`SearchError::Tls`] when the
    /// host cannot be reached, or [`SearchError::Http`] for any other
    /// transport failure.
    fn fetch(
        &self,
        url: &str,
    ) -> impl std::future::Future<Output = Result<String, SearchError>> + Send;
}
