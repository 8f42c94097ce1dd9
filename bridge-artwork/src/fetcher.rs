//! Deadline-guarded artwork fetching with cache memoization

use std::sync::Arc;
use std::time::Duration;

use base64::Engine;
use blob_cache::BlobCache;

use crate::source::{ImageKey, ImageRequest, ImageSource};

/// Maximum number of resident data-URLs
pub const CACHE_CAPACITY: usize = 100;

/// Age past which a cached data-URL is treated as absent
pub const CACHE_TTL: Duration = Duration::from_secs(60 * 60);

/// Deadline for a single image request
pub const FETCH_TIMEOUT: Duration = Duration::from_secs(10);

/// Content type assumed when the collaborator reports none
const DEFAULT_CONTENT_TYPE: &str = "image/jpeg";

/// Resolves image keys to data-URLs, one outstanding request per call
///
/// Each cache miss issues exactly one request to the installed
/// [`ImageSource`] and races it against [`FETCH_TIMEOUT`]. When the
/// deadline wins, the pending request future is dropped: a late response
/// from the collaborator has nothing left to settle and cannot mutate the
/// cache. Concurrent fetches for the same key are not deduplicated - each
/// call races its own deadline.
pub struct ArtworkFetcher {
    cache: BlobCache<ImageKey, String>,
    source: Option<Arc<dyn ImageSource>>,
    request: ImageRequest,
    timeout: Duration,
}

impl ArtworkFetcher {
    pub fn new() -> Self {
        Self {
            cache: BlobCache::new(CACHE_CAPACITY, CACHE_TTL),
            source: None,
            request: ImageRequest::thumbnail(),
            timeout: FETCH_TIMEOUT,
        }
    }

    /// Override the request deadline (primarily for tests)
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Override the cache bounds
    pub fn with_cache_bounds(mut self, capacity: usize, ttl: Duration) -> Self {
        self.cache = BlobCache::new(capacity, ttl);
        self
    }

    /// Install the session-scoped image capability
    pub fn set_source(&mut self, source: Arc<dyn ImageSource>) {
        self.source = Some(source);
    }

    /// Remove the image capability; subsequent fetches resolve to absent
    pub fn clear_source(&mut self) {
        self.source = None;
    }

    /// Drop all cached data-URLs (image keys die with the pairing session)
    pub fn clear_cache(&mut self) {
        self.cache.clear();
    }

    /// Number of resident cache entries
    pub fn cached_entries(&self) -> usize {
        self.cache.len()
    }

    /// Resolve an image key to a data-URL, or absent
    ///
    /// Absent/empty keys resolve immediately without contacting the
    /// collaborator. Collaborator errors and timeouts are logged and
    /// resolve to absent; only a successful response is cached.
    pub async fn fetch(&mut self, key: Option<&ImageKey>) -> Option<String> {
        let key = match key {
            Some(key) if !key.is_empty() => key,
            _ => return None,
        };

        if let Some(hit) = self.cache.get(key) {
            tracing::debug!("artwork cache hit for {key}");
            return Some(hit);
        }

        let source = match &self.source {
            Some(source) => Arc::clone(source),
            None => {
                tracing::debug!("no image source installed, skipping fetch for {key}");
                return None;
            }
        };

        match tokio::time::timeout(self.timeout, source.fetch_image(key, &self.request)).await {
            Ok(Ok(response)) => {
                let content_type = response
                    .content_type
                    .as_deref()
                    .unwrap_or(DEFAULT_CONTENT_TYPE);
                let encoded = base64::engine::general_purpose::STANDARD.encode(&response.data);
                let url = format!("data:{content_type};base64,{encoded}");
                self.cache.set(key.clone(), url.clone());
                Some(url)
            }
            Ok(Err(err)) => {
                tracing::warn!("artwork fetch for {key} failed: {err}");
                None
            }
            Err(_) => {
                tracing::warn!(
                    "artwork fetch for {key} timed out after {:?}",
                    self.timeout
                );
                None
            }
        }
    }
}

impl Default for ArtworkFetcher {
    fn default() -> Self {
        Self::new()
    }
}
