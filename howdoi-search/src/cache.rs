//! On-disk HTTP response cache.
//!
//! Each successful response body is stored as one JSON file named after
//! the BLAKE3 hash of its request URL, so repeated questions skip the
//! network entirely. Entries older than the configured TTL are ignored;
//! a TTL of zero keeps entries forever.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{Result, SearchError};

/// File name prefix shared by every cache entry. Clearing the cache
/// removes all files that start with it.
pub const CACHE_FILE_PREFIX: &str = "cache";

/// A single cached response.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct CacheEntry {
    url: String,
    body: String,
    fetched_at: DateTime<Utc>,
}

/// Directory-backed response cache keyed by request URL.
#[derive(Debug, Clone)]
pub struct DiskCache {
    dir: PathBuf,
    ttl_seconds: u64,
}

impl DiskCache {
    /// Open (creating if needed) the cache directory `dir`.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::Io`] if the directory cannot be created.
    pub fn open(dir: impl Into<PathBuf>, ttl_seconds: u64) -> Result<Self> {
        let dir = dir.into();
        fs::create_dir_all(&dir)?;
        Ok(Self { dir, ttl_seconds })
    }

    /// The directory entries are stored in.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Look up the cached body for `url`.
    ///
    /// Returns `None` on a miss, an expired entry, or an unreadable entry.
    pub fn get(&self, url: &str) -> Option<String> {
        let path = self.entry_path(url);
        let raw = match fs::read_to_string(&path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == ErrorKind::NotFound => return None,
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "unreadable cache entry");
                return None;
            }
        };

        let entry: CacheEntry = match serde_json::from_str(&raw) {
            Ok(entry) => entry,
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "corrupt cache entry");
                return None;
            }
        };

        if entry.url != url {
            return None;
        }
        if self.is_expired(entry.fetched_at) {
            tracing::debug!(url, "cache entry expired");
            return None;
        }

        tracing::debug!(url, "cache hit");
        Some(entry.body)
    }

    /// Store `body` as the response for `url`.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::Cache`] if the entry cannot be encoded, or
    /// [`SearchError::Io`] if it cannot be written.
    pub fn insert(&self, url: &str, body: &str) -> Result<()> {
        let entry = CacheEntry {
            url: url.to_owned(),
            body: body.to_owned(),
            fetched_at: Utc::now(),
        };
        let encoded = serde_json::to_string(&entry)
            .map_err(|e| SearchError::Cache(format!("failed to encode entry: {e}")))?;
        fs::write(self.entry_path(url), encoded)?;
        Ok(())
    }

    /// Delete every cache file in `dir`, returning how many were removed.
    ///
    /// A missing directory counts as an empty cache.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::Io`] if the directory cannot be listed or a
    /// file cannot be removed.
    pub fn clear(dir: &Path) -> Result<usize> {
        let entries = match fs::read_dir(dir) {
            Ok(entries) => entries,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(0),
            Err(e) => return Err(e.into()),
        };

        let mut removed = 0;
        for entry in entries {
            let entry = entry?;
            let is_cache_file = entry.file_type()?.is_file()
                && entry
                    .file_name()
                    .to_string_lossy()
                    .starts_with(CACHE_FILE_PREFIX);
            if is_cache_file {
                fs::remove_file(entry.path())?;
                removed += 1;
            }
        }

        tracing::debug!(dir = %dir.display(), removed, "cache cleared");
        Ok(removed)
    }

    fn entry_path(&self, url: &str) -> PathBuf {
        let hash = blake3::hash(url.as_bytes());
        self.dir
            .join(format!("{CACHE_FILE_PREFIX}-{}.json", hash.to_hex()))
    }

    fn is_expired(&self, fetched_at: DateTime<Utc>) -> bool {
        if self.ttl_seconds == 0 {
            return false;
        }
        let ttl = i64::try_from(self.ttl_seconds).unwrap_or(i64::MAX);
        Utc::now().signed_duration_since(fetched_at).num_seconds() > ttl
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn temp_cache(ttl_seconds: u64) -> (tempfile::TempDir, DiskCache) {
        let tmp = tempfile::tempdir().expect("tempdir");
        let cache = DiskCache::open(tmp.path().join("howdoi"), ttl_seconds).expect("open cache");
        (tmp, cache)
    }

    #[test]
    fn open_creates_directory() {
        let (_tmp, cache) = temp_cache(0);
        assert!(cache.dir().is_dir());
    }

    #[test]
    fn miss_returns_none() {
        let (_tmp, cache) = temp_cache(0);
        assert!(cache.get("https://stackoverflow.com/questions/1/x").is_none());
    }

    #[test]
    fn insert_and_retrieve() {
        let (_tmp, cache) = temp_cache(0);
        let url = "https://www.google.com/search?q=site:stackoverflow.com%20tar";
        cache.insert(url, "<html>results</html>").expect("insert");
        assert_eq!(cache.get(url).as_deref(), Some("<html>results</html>"));
    }

    #[test]
    fn entries_are_keyed_by_url() {
        let (_tmp, cache) = temp_cache(0);
        cache.insert("https://a.example/", "a").expect("insert a");
        cache.insert("https://b.example/", "b").expect("insert b");
        assert_eq!(cache.get("https://a.example/").as_deref(), Some("a"));
        assert_eq!(cache.get("https://b.example/").as_deref(), Some("b"));
    }

    #[test]
    fn overwrite_same_url_updates_body() {
        let (_tmp, cache) = temp_cache(0);
        cache.insert("https://a.example/", "old").expect("insert old");
        cache.insert("https://a.example/", "new").expect("insert new");
        assert_eq!(cache.get("https://a.example/").as_deref(), Some("new"));
    }

    #[test]
    fn expired_entries_are_ignored() {
        let (_tmp, cache) = temp_cache(60);
        let url = "https://a.example/";
        let stale = CacheEntry {
            url: url.into(),
            body: "stale".into(),
            fetched_at: Utc::now() - Duration::seconds(120),
        };
        fs::write(
            cache.entry_path(url),
            serde_json::to_string(&stale).expect("encode"),
        )
        .expect("write");
        assert!(cache.get(url).is_none());
    }

    #[test]
    fn zero_ttl_never_expires() {
        let (_tmp, cache) = temp_cache(0);
        assert!(!cache.is_expired(Utc::now() - Duration::days(3650)));
    }

    #[test]
    fn corrupt_entry_is_a_miss() {
        let (_tmp, cache) = temp_cache(0);
        let url = "https://a.example/";
        fs::write(cache.entry_path(url), "{not json").expect("write");
        assert!(cache.get(url).is_none());
    }

    #[test]
    fn entry_file_names_use_prefix() {
        let (_tmp, cache) = temp_cache(0);
        let path = cache.entry_path("https://a.example/");
        let name = path.file_name().expect("file name").to_string_lossy().into_owned();
        assert!(name.starts_with("cache-"));
        assert!(name.ends_with(".json"));
    }

    #[test]
    fn clear_removes_only_cache_files() {
        let (_tmp, cache) = temp_cache(0);
        cache.insert("https://a.example/", "a").expect("insert a");
        cache.insert("https://b.example/", "b").expect("insert b");
        fs::write(cache.dir().join("notes.txt"), "keep me").expect("write");

        let removed = DiskCache::clear(cache.dir()).expect("clear");
        assert_eq!(removed, 2);
        assert!(cache.get("https://a.example/").is_none());
        assert!(cache.dir().join("notes.txt").exists());
    }

    #[test]
    fn clear_missing_directory_is_empty() {
        let tmp = tempfile::tempdir().expect("tempdir");
        let removed = DiskCache::clear(&tmp.path().join("absent")).expect("clear");
        assert_eq!(removed, 0);
    }
}
