//! Settings read from environment variables.
//!
//! | Variable | Effect |
//! |----------|--------|
//! | `HOWDOI_DISABLE_SSL` | plain `http://` and no certificate verification |
//! | `HOWDOI_URL` | Q&A site host (default `stackoverflow.com`) |
//! | `HOWDOI_SEARCH_ENGINE` | `google` (default) or `bing` |
//! | `HOWDOI_DISABLE_CACHE` | skip the response cache |
//! | `HOWDOI_COLORIZE` | highlight code even without `--color` |
//! | `XDG_CACHE_HOME` | cache root; the cache lives in `<root>/howdoi` |
//! | `http_proxy`, `https_proxy` | outbound proxies |
//!
//! A variable counts as set when it is present and non-empty.

use std::path::PathBuf;

use howdoi_search::config::{DEFAULT_CACHE_TTL_SECONDS, DEFAULT_SITE, default_cache_dir};
use howdoi_search::{SearchConfig, SearchEngine};

/// Name of the application directory under the cache root.
const APP_DIR: &str = "howdoi";

/// Everything the environment can change about a run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub disable_tls: bool,
    pub site: String,
    pub engine: SearchEngine,
    pub cache_enabled: bool,
    pub cache_dir: PathBuf,
    pub colorize: bool,
    /// `(scheme, address)` pairs from the proxy variables.
    pub proxies: Vec<(String, String)>,
}

impl Settings {
    /// Read settings from the process environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read settings through `lookup`, which returns a variable's value or
    /// `None` when it is absent.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|value| !value.is_empty());
        let is_set = |key: &str| get(key).is_some();

        let cache_dir = match get("XDG_CACHE_HOME") {
            Some(root) => PathBuf::from(root).join(APP_DIR),
            None => default_cache_dir(),
        };

        let proxies = ["http", "https"]
            .into_iter()
            .filter_map(|scheme| {
                get(&format!("{scheme}_proxy"))
                    .or_else(|| get(&format!("{}_PROXY", scheme.to_ascii_uppercase())))
                    .map(|value| (scheme.to_owned(), value))
            })
            .collect();

        Self {
            disable_tls: is_set("HOWDOI_DISABLE_SSL"),
            site: get("HOWDOI_URL").unwrap_or_else(|| DEFAULT_SITE.to_owned()),
            engine: get("HOWDOI_SEARCH_ENGINE")
                .map(|name| SearchEngine::from_name(&name))
                .unwrap_or_default(),
            cache_enabled: !is_set("HOWDOI_DISABLE_CACHE"),
            cache_dir,
            colorize: is_set("HOWDOI_COLORIZE"),
            proxies,
        }
    }

    /// The search configuration these settings describe.
    pub fn search_config(&self) -> SearchConfig {
        SearchConfig {
            engine: self.engine,
            site: self.site.clone(),
            disable_tls: self.disable_tls,
            proxy: howdoi_search::http::proxy_settings(self.proxies.iter().cloned()),
            cache_enabled: self.cache_enabled,
            cache_dir: self.cache_dir.clone(),
            cache_ttl_seconds: DEFAULT_CACHE_TTL_SECONDS,
            ..SearchConfig::default()
        }
    }
}
