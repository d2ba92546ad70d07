//! Search configuration with sensible defaults.
//!
//! [`SearchConfig`] controls which engine is queried, which Q&A site the
//! search is scoped to, transport security and the response cache.

use std::path::PathBuf;

use crate::error::SearchError;
use crate::types::SearchEngine;

/// Q&A site searched when no override is configured.
pub const DEFAULT_SITE: &str = "stackoverflow.com";

/// Cached responses older than this are refetched (7 days).
pub const DEFAULT_CACHE_TTL_SECONDS: u64 = 7 * 24 * 60 * 60;

/// Outbound proxies, one per request scheme.
///
/// Build one from environment-style pairs with
/// [`crate::http::proxy_settings`], which also adds a missing scheme.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProxySettings {
    /// Proxy for `http://` requests.
    pub http: Option<String>,
    /// Proxy for `https://` requests.
    pub https: Option<String>,
}

impl ProxySettings {
    /// Whether no proxy is configured.
    pub fn is_empty(&self) -> bool {
        self.http.is_none() && self.https.is_none()
    }
}

/// Configuration for one lookup.
///
/// Use [`Default::default()`] for sensible defaults, or construct with
/// field overrides for custom behaviour.
#[derive(Debug, Clone)]
pub struct SearchConfig {
    /// Which search engine produces the result links.
    pub engine: SearchEngine,
    /// Host name of the Q&A site, e.g. `stackoverflow.com`.
    pub site: String,
    /// Use plain HTTP and skip certificate verification.
    pub disable_tls: bool,
    /// Custom User-Agent string. If `None`, rotates through a built-in list
    /// of realistic browser User-Agents.
    pub user_agent: Option<String>,
    /// Per-request timeout in seconds. `None` keeps the HTTP client default.
    pub timeout_seconds: Option<u64>,
    /// Outbound proxies. Empty means direct connections.
    pub proxy: ProxySettings,
    /// Whether responses are read from and written to the disk cache.
    pub cache_enabled: bool,
    /// Directory holding cached responses.
    pub cache_dir: PathBuf,
    /// How long cached responses stay valid in seconds. 0 keeps them forever.
    pub cache_ttl_seconds: u64,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            engine: SearchEngine::Google,
            site: DEFAULT_SITE.to_owned(),
            disable_tls: false,
            user_agent: None,
            timeout_seconds: None,
            proxy: ProxySettings::default(),
            cache_enabled: true,
            cache_dir: default_cache_dir(),
            cache_ttl_seconds: DEFAULT_CACHE_TTL_SECONDS,
        }
    }
}

impl SearchConfig {
    /// URL scheme prefix for every request.
    pub fn scheme(&self) -> &'static str {
        if self.disable_tls {
            "http://"
        } else {
            "https://"
        }
    }

    /// The results-page URL for `query` on the configured engine and site.
    pub fn search_url(&self, query: &str) -> String {
        self.engine.search_url(self.scheme(), &self.site, query)
    }

    /// Validates this configuration, returning an error if any field is invalid.
    ///
    /// Checks:
    /// - `site` must be a bare host name (non-empty, no scheme, no path)
    /// - `timeout_seconds`, when set, must be greater than 0
    pub fn validate(&self) -> Result<(), SearchError> {
        let site = self.site.trim();
        if site.is_empty() {
            return Err(SearchError::Config("site must not be empty".into()));
        }
        if site.contains("://") || site.contains('/') || site.contains(char::is_whitespace) {
            return Err(SearchError::Config(format!(
                "site must be a bare host name, got {site:?}"
            )));
        }
        if self.timeout_seconds == Some(0) {
            return Err(SearchError::Config(
                "timeout_seconds must be greater than 0".into(),
            ));
        }
        Ok(())
    }
}

/// Platform cache directory for howdoi (`~/.cache/howdoi` on Linux).
pub fn default_cache_dir() -> PathBuf {
    dirs::cache_dir()
        .map(|d| d.join("howdoi"))
        .unwrap_or_else(|| std::env::temp_dir().join("howdoi-cache"))
}
