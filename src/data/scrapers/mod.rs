//! Page fetching and vlr.gg parsing adapters

pub mod vlr;

use crate::{Result, ScrapeError};
use std::path::{Path, PathBuf};

/// Narrow fetch seam between the pipeline and the network.
///
/// Everything upstream of HTML parsing goes through this trait, so tests
/// can inject canned pages and a markup change on vlr.gg never touches the
/// orchestration code.
pub trait Fetch {
    /// GET a URL and return the response body. Transport failures and
    /// non-2xx statuses are errors; no retries.
    fn get(&self, url: &str) -> Result<String>;
}

/// Blocking HTTP fetcher with an optional on-disk page cache.
pub struct HttpFetcher {
    client: reqwest::blocking::Client,
    /// Optional cache directory for offline HTML files
    cache_dir: Option<PathBuf>,
    /// If true, only use cache (no network requests)
    offline_only: bool,
}

impl Default for HttpFetcher {
    fn default() -> Self {
        Self::new()
    }
}

impl HttpFetcher {
    pub fn new() -> Self {
        let client = reqwest::blocking::Client::builder()
            .user_agent("valpicks/0.1")
            .timeout(std::time::Duration::from_secs(30))
            .build()
            .expect("Failed to create HTTP client");

        HttpFetcher {
            client,
            cache_dir: None,
            offline_only: false,
        }
    }

    /// Create fetcher with a cache directory
    pub fn with_cache<P: AsRef<Path>>(mut self, cache_dir: P) -> Self {
        self.cache_dir = Some(cache_dir.as_ref().to_path_buf());
        self
    }

    /// Set offline-only mode (no network requests, cache must exist)
    pub fn offline_only(mut self, offline: bool) -> Self {
        self.offline_only = offline;
        self
    }

    /// Get the cache file path for a URL
    fn cache_path(&self, url: &str) -> Option<PathBuf> {
        self.cache_dir.as_ref().map(|dir| {
            // Create a safe filename from the URL
            let filename = url
                .replace("https://", "")
                .replace("http://", "")
                .replace('/', "_")
                .replace('?', "_")
                + ".html";
            dir.join(filename)
        })
    }

    /// Load HTML from cache if available
    fn load_from_cache(&self, url: &str) -> Option<String> {
        let path = self.cache_path(url)?;
        if path.exists() {
            log::debug!("Loading from cache: {}", path.display());
            std::fs::read_to_string(&path).ok()
        } else {
            None
        }
    }

    /// Save HTML to cache
    fn save_to_cache(&self, url: &str, html: &str) -> Result<()> {
        if let Some(path) = self.cache_path(url) {
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent)?;
            }
            std::fs::write(&path, html)?;
            log::debug!("Saved to cache: {}", path.display());
        }
        Ok(())
    }
}

impl Fetch for HttpFetcher {
    fn get(&self, url: &str) -> Result<String> {
        if let Some(html) = self.load_from_cache(url) {
            return Ok(html);
        }

        if self.offline_only {
            return Err(ScrapeError::Offline {
                url: url.to_string(),
            });
        }

        log::debug!("Fetching {}", url);

        let response = self.client.get(url).send()?;

        if !response.status().is_success() {
            return Err(ScrapeError::Status {
                url: url.to_string(),
                status: response.status().as_u16(),
            });
        }

        let html = response.text()?;

        if let Err(e) = self.save_to_cache(url, &html) {
            log::warn!("Failed to cache {}: {}", url, e);
        }

        Ok(html)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cache_path_derivation() {
        let fetcher = HttpFetcher::new().with_cache("cache");
        let path = fetcher
            .cache_path("https://www.vlr.gg/event/matches/1657/champs/?series_id=all")
            .unwrap();
        assert_eq!(
            path,
            PathBuf::from("cache/www.vlr.gg_event_matches_1657_champs__series_id=all.html")
        );
    }

    #[test]
    fn test_no_cache_dir_means_no_cache_path() {
        let fetcher = HttpFetcher::new();
        assert!(fetcher.cache_path("https://www.vlr.gg/123456").is_none());
    }

    #[test]
    fn test_offline_without_cached_page_is_an_error() {
        let dir = std::env::temp_dir().join(format!("valpicks_empty_cache_{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let fetcher = HttpFetcher::new().with_cache(&dir).offline_only(true);

        let result = fetcher.get("https://www.vlr.gg/123456");
        std::fs::remove_dir_all(&dir).unwrap();

        assert!(matches!(result, Err(ScrapeError::Offline { .. })));
    }

    #[test]
    fn test_offline_serves_cached_page() {
        let dir = std::env::temp_dir().join(format!("valpicks_cache_{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        std::fs::write(dir.join("www.vlr.gg_123456.html"), "<html></html>").unwrap();

        let fetcher = HttpFetcher::new().with_cache(&dir).offline_only(true);
        let html = fetcher.get("https://www.vlr.gg/123456").unwrap();
        std::fs::remove_dir_all(&dir).unwrap();

        assert_eq!(html, "<html></html>");
    }
}
