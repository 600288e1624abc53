//! Byte sources for background and element images.
//!
//! Every fetch is bounded: the HTTP client carries the configured timeout, and a timeout is
//! reported as an ordinary [`StoryError::Fetch`] so callers can fall back or skip.

use std::collections::HashMap;
use std::path::PathBuf;
use std::time::Duration;

use crate::foundation::error::{StoryError, StoryResult};

/// Something that can turn a URL into bytes.
pub trait Fetch: Send + Sync {
    /// Fetch the full body for `url`.
    fn fetch(&self, url: &str) -> StoryResult<Vec<u8>>;
}

/// Blocking HTTP(S) fetcher with a per-request timeout. Also reads `file://` URLs.
#[derive(Clone, Debug)]
pub struct HttpFetcher {
    client: reqwest::blocking::Client,
    timeout: Duration,
}

impl HttpFetcher {
    /// Build a fetcher whose requests give up after `timeout`.
    pub fn new(timeout: Duration) -> StoryResult<Self> {
        if timeout.is_zero() {
            return Err(StoryError::validation("fetch timeout must be > 0"));
        }
        let client = reqwest::blocking::Client::builder()
            .timeout(timeout)
            .connect_timeout(timeout)
            .user_agent(concat!("storyslide/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| StoryError::fetch(format!("build http client: {e}")))?;
        Ok(Self { client, timeout })
    }

    /// Configured timeout.
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    fn fetch_http(&self, url: &str) -> StoryResult<Vec<u8>> {
        let res = self.client.get(url).send().map_err(|e| {
            if e.is_timeout() {
                StoryError::fetch(format!("'{url}' timed out after {:?}", self.timeout))
            } else {
                StoryError::fetch(format!("'{url}': {e}"))
            }
        })?;
        let status = res.status();
        if !status.is_success() {
            return Err(StoryError::fetch(format!("'{url}' returned HTTP {status}")));
        }
        let body = res
            .bytes()
            .map_err(|e| StoryError::fetch(format!("read body of '{url}': {e}")))?;
        Ok(body.to_vec())
    }
}

impl Fetch for HttpFetcher {
    #[tracing::instrument(level = "debug", skip(self))]
    fn fetch(&self, url: &str) -> StoryResult<Vec<u8>> {
        let url = url.trim();
        if let Some(path) = url.strip_prefix("file://") {
            let path = PathBuf::from(path);
            return std::fs::read(&path)
                .map_err(|e| StoryError::fetch(format!("read '{}': {e}", path.display())));
        }
        if url.starts_with("http://") || url.starts_with("https://") {
            return self.fetch_http(url);
        }
        Err(StoryError::fetch(format!("unsupported url scheme: '{url}'")))
    }
}

/// Fixed map of URL to bytes. Unknown URLs fail like an unreachable host.
#[derive(Clone, Debug, Default)]
pub struct MemoryFetcher {
    entries: HashMap<String, Vec<u8>>,
}

impl MemoryFetcher {
    /// Create an empty fetcher.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `bytes` under `url`.
    pub fn with(mut self, url: impl Into<String>, bytes: Vec<u8>) -> Self {
        self.entries.insert(url.into(), bytes);
        self
    }
}

impl Fetch for MemoryFetcher {
    fn fetch(&self, url: &str) -> StoryResult<Vec<u8>> {
        self.entries
            .get(url)
            .cloned()
            .ok_or_else(|| StoryError::fetch(format!("no entry for '{url}'")))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/assets/fetch.rs"]
mod tests;
