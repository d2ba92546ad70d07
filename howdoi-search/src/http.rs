//! HTTP page fetching with User-Agent rotation and response caching.
//!
//! Provides a configured [`reqwest::Client`] with cookie support, optional
//! proxies and certificate verification toggled by configuration, and the
//! [`HttpFetcher`] that puts the disk cache in front of it.

use crate::cache::DiskCache;
use crate::config::{ProxySettings, SearchConfig};
use crate::error::SearchError;
use crate::fetch::PageFetcher;
use rand::seq::SliceRandom;
use std::error::Error as StdError;
use std::time::Duration;

/// Browser User-Agent strings, one picked at random per request.
const USER_AGENTS: &[&str] = &[
    "Mozilla/5.0 (Macintosh; Intel Mac OS X 10.7; rv:11.0) Gecko/20100101 Firefox/11.0",
    "Mozilla/5.0 (X11; Ubuntu; Linux x86_64; rv:22.0) Gecko/20100101 Firefox/22.0",
    "Mozilla/5.0 (Windows NT 6.1; rv:11.0) Gecko/20100101 Firefox/11.0",
    "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_7_4) AppleWebKit/536.5 (KHTML, like Gecko) Chrome/19.0.1084.46 Safari/536.5",
    "Mozilla/5.0 (Windows; Windows NT 6.1) AppleWebKit/536.5 (KHTML, like Gecko) Chrome/19.0.1084.46 Safari/536.5",
];

/// Build a [`reqwest::Client`] for fetching search and question pages.
///
/// The client has:
/// - Cookie store enabled (for consent redirects)
/// - Timeout from config, when one is set
/// - Certificate verification disabled when `disable_tls` is set
/// - Only the proxies named in `config.proxy`
///
/// The User-Agent is not fixed here; [`HttpFetcher`] sets one per request.
///
/// # Errors
///
/// Returns [`SearchError::Http`] if a proxy URL is invalid or the client
/// cannot be constructed.
pub fn build_client(config: &SearchConfig) -> Result<reqwest::Client, SearchError> {
    let mut builder = reqwest::Client::builder()
        .cookie_store(true)
        .redirect(reqwest::redirect::Policy::limited(10))
        .danger_accept_invalid_certs(config.disable_tls)
        .no_proxy();

    if let Some(secs) = config.timeout_seconds {
        builder = builder.timeout(Duration::from_secs(secs));
    }
    if let Some(ref proxy) = config.proxy.http {
        let proxy = reqwest::Proxy::http(proxy)
            .map_err(|e| SearchError::Http(format!("invalid http proxy {proxy:?}: {e}")))?;
        builder = builder.proxy(proxy);
    }
    if let Some(ref proxy) = config.proxy.https {
        let proxy = reqwest::Proxy::https(proxy)
            .map_err(|e| SearchError::Http(format!("invalid https proxy {proxy:?}: {e}")))?;
        builder = builder.proxy(proxy);
    }

    builder
        .build()
        .map_err(|e| SearchError::Http(format!("failed to build HTTP client: {e}")))
}

/// Select a random User-Agent string from the rotation list.
pub fn random_user_agent() -> &'static str {
    let mut rng = rand::thread_rng();
    USER_AGENTS
        .choose(&mut rng)
        .copied()
        .unwrap_or(USER_AGENTS[0])
}

/// Prefix `http://` to a proxy address that carries no scheme.
pub fn normalize_proxy(value: &str) -> String {
    if value.starts_with("http") {
        value.to_owned()
    } else {
        format!("http://{value}")
    }
}

/// Collect proxies from `(scheme, address)` pairs such as those found in
/// `http_proxy`-style environment variables.
///
/// Only the `http` and `https` schemes are kept (case-insensitive). Empty
/// addresses are skipped and the rest are passed through
/// [`normalize_proxy`].
pub fn proxy_settings<K, V>(pairs: impl IntoIterator<Item = (K, V)>) -> ProxySettings
where
    K: AsRef<str>,
    V: AsRef<str>,
{
    let mut settings = ProxySettings::default();
    for (scheme, value) in pairs {
        let value = value.as_ref().trim();
        if value.is_empty() {
            continue;
        }
        match scheme.as_ref().to_ascii_lowercase().as_str() {
            "http" => settings.http = Some(normalize_proxy(value)),
            "https" => settings.https = Some(normalize_proxy(value)),
            other => tracing::debug!(scheme = other, "ignoring non-http proxy"),
        }
    }
    settings
}

/// Fetches pages over HTTP, answering from the disk cache when it can.
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: reqwest::Client,
    user_agent: Option<String>,
    cache: Option<DiskCache>,
}

impl HttpFetcher {
    /// Create a fetcher for `config`.
    ///
    /// A cache directory that cannot be opened is logged and the fetcher
    /// continues without caching.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::Http`] if the HTTP client cannot be built.
    pub fn new(config: &SearchConfig) -> Result<Self, SearchError> {
        let client = build_client(config)?;
        let cache = if config.cache_enabled {
            match DiskCache::open(&config.cache_dir, config.cache_ttl_seconds) {
                Ok(cache) => Some(cache),
                Err(e) => {
                    tracing::warn!(
                        dir = %config.cache_dir.display(),
                        error = %e,
                        "response cache unavailable, continuing without it"
                    );
                    None
                }
            }
        } else {
            None
        };

        Ok(Self {
            client,
            user_agent: config.user_agent.clone(),
            cache,
        })
    }

    /// The response cache in use, if any.
    pub fn cache(&self) -> Option<&DiskCache> {
        self.cache.as_ref()
    }
}

impl PageFetcher for HttpFetcher {
    async fn fetch(&self, url: &str) -> Result<String, SearchError> {
        if let Some(body) = self.cache.as_ref().and_then(|cache| cache.get(url)) {
            return Ok(body);
        }

        let user_agent = match self.user_agent {
            Some(ref custom) => custom.clone(),
            None => random_user_agent().to_owned(),
        };

        tracing::debug!(url, "fetching page");
        let response = self
            .client
            .get(url)
            .header(reqwest::header::USER_AGENT, user_agent)
            .send()
            .await
            .map_err(classify_error)?;

        let status = response.status();
        let body = response.text().await.map_err(classify_error)?;

        if !status.is_success() {
            tracing::debug!(url, %status, "non-success response, not cached");
            return Ok(body);
        }
        if let Some(ref cache) = self.cache {
            if let Err(e) = cache.insert(url, &body) {
                tracing::warn!(url, error = %e, "failed to cache response");
            }
        }
        Ok(body)
    }
}

/// Map a transport error onto the error kinds the command line reports.
fn classify_error(err: reqwest::Error) -> SearchError {
    let err = err.without_url();
    if is_tls_failure(&err) {
        SearchError::Tls(describe(&err))
    } else if err.is_connect() {
        SearchError::Connection(describe(&err))
    } else {
        SearchError::Http(describe(&err))
    }
}

fn is_tls_failure(err: &(dyn StdError + 'static)) -> bool {
    let mut current = Some(err);
    while let Some(e) = current {
        let message = e.to_string().to_ascii_lowercase();
        if message.contains("certificate") || message.contains("tls") || message.contains("ssl") {
            return true;
        }
        current = e.source();
    }
    false
}

/// The error message followed by its sources.
fn describe(err: &(dyn StdError + 'static)) -> String {
    let mut text = err.to_string();
    let mut current = err.source();
    while let Some(e) = current {
        text.push_str(": ");
        text.push_str(&e.to_string());
        current = e.source();
    }
    text
}
