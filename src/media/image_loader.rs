// SPDX-License-Identifier: MPL-2.0
//! Network image loader with bounded concurrency and caching.
//!
//! # Design
//!
//! - **Bounded**: at most `max_concurrent` downloads run at once, across every
//!   caller sharing the loader (3 by default)
//! - **LRU memory cache**: decoded images keyed by URL, entry-count bounded
//! - **Optional disk cache**: raw bytes under the cache directory
//! - **Silent failures**: any failure is logged and reported as `None`
//!
//! # Usage
//!
//! ```ignore
//! let loader = ImageLoader::new(ImageLoaderConfig::default())?;
//! if let Some(image) = loader.load(&url).await {
//!     page.set_image(index, image);
//! }
//! ```

use super::disk_cache::DiskCache;
use super::ImageData;
use crate::api::ImageSource;
use crate::config::{
    Config, DEFAULT_IMAGE_CACHE_ENTRIES, DEFAULT_MAX_CONCURRENT_IMAGE_LOADS,
    DEFAULT_REQUEST_TIMEOUT_SECS,
};
use crate::error::{Error, Result};
use lru::LruCache;
use reqwest::Url;
use std::num::NonZeroUsize;
use std::path::PathBuf;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::sync::Semaphore;

/// Configuration for the image loader.
#[derive(Debug, Clone)]
pub struct ImageLoaderConfig {
    /// Maximum simultaneous downloads.
    pub max_concurrent: usize,

    /// Images kept in memory; zero disables the memory cache.
    pub cache_entries: usize,

    /// Directory of the disk cache, if enabled.
    pub disk_cache_dir: Option<PathBuf>,

    /// Per-request timeout.
    pub timeout: Duration,
}

impl Default for ImageLoaderConfig {
    fn default() -> Self {
        Self {
            max_concurrent: DEFAULT_MAX_CONCURRENT_IMAGE_LOADS,
            cache_entries: DEFAULT_IMAGE_CACHE_ENTRIES,
            disk_cache_dir: None,
            timeout: Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS),
        }
    }
}

impl ImageLoaderConfig {
    /// Derives the loader settings from user configuration.
    #[must_use]
    pub fn from_config(config: &Config) -> Self {
        let disk_cache_dir = if config.disk_cache() {
            crate::app::paths::get_image_cache_dir()
        } else {
            None
        };
        Self {
            max_concurrent: config.max_concurrent_image_loads(),
            cache_entries: config.image_cache_entries(),
            disk_cache_dir,
            timeout: config.request_timeout(),
        }
    }
}

/// Counters describing loader activity.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LoaderStats {
    /// Served from the memory cache.
    pub memory_hits: u64,
    /// Served from the disk cache.
    pub disk_hits: u64,
    /// Downloaded and decoded successfully.
    pub downloads: u64,
    /// Requests that ended without an image.
    pub failures: u64,
}

#[derive(Debug, Default)]
struct Counters {
    memory_hits: AtomicU64,
    disk_hits: AtomicU64,
    downloads: AtomicU64,
    failures: AtomicU64,
}

pub struct ImageLoader {
    client: reqwest::Client,
    permits: Arc<Semaphore>,
    max_concurrent: usize,
    memory: Option<Mutex<LruCache<Url, ImageData>>>,
    disk: Option<DiskCache>,
    counters: Counters,
}

impl ImageLoader {
    pub fn new(config: ImageLoaderConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .redirect(reqwest::redirect::Policy::limited(10))
            .user_agent(crate::api::client::USER_AGENT)
            .timeout(config.timeout)
            .build()
            .map_err(|e| Error::Config(format!("failed to build HTTP client: {e}")))?;

        let max_concurrent = config.max_concurrent.max(1);
        Ok(Self {
            client,
            permits: Arc::new(Semaphore::new(max_concurrent)),
            max_concurrent,
            memory: NonZeroUsize::new(config.cache_entries).map(|n| Mutex::new(LruCache::new(n))),
            disk: config.disk_cache_dir.map(DiskCache::new),
            counters: Counters::default(),
        })
    }

    #[must_use]
    pub fn max_concurrent(&self) -> usize {
        self.max_concurrent
    }

    #[must_use]
    pub fn stats(&self) -> LoaderStats {
        LoaderStats {
            memory_hits: self.counters.memory_hits.load(Ordering::Relaxed),
            disk_hits: self.counters.disk_hits.load(Ordering::Relaxed),
            downloads: self.counters.downloads.load(Ordering::Relaxed),
            failures: self.counters.failures.load(Ordering::Relaxed),
        }
    }

    /// Number of images currently held in memory.
    #[must_use]
    pub fn cached_len(&self) -> usize {
        self.memory
            .as_ref()
            .and_then(|m| m.lock().ok().map(|cache| cache.len()))
            .unwrap_or(0)
    }

    fn memory_get(&self, url: &Url) -> Option<ImageData> {
        let mut cache = self.memory.as_ref()?.lock().ok()?;
        cache.get(url).cloned()
    }

    fn memory_put(&self, url: &Url, image: &ImageData) {
        if let Some(mut cache) = self.memory.as_ref().and_then(|m| m.lock().ok()) {
            cache.put(url.clone(), image.clone());
        }
    }

    async fn read_disk(&self, url: &Url) -> Option<ImageData> {
        let disk = self.disk.clone()?;
        let key = url.to_string();
        let result = tokio::task::spawn_blocking(move || {
            let bytes = match disk.read(&key) {
                Ok(Some(bytes)) => bytes,
                Ok(None) => return None,
                Err(e) => {
                    tracing::warn!(url = %key, "failed to read disk cache entry: {e}");
                    return None;
                }
            };
            match ImageData::decode(&bytes) {
                Ok(image) => Some(image),
                Err(e) => {
                    tracing::warn!(url = %key, "discarding corrupt disk cache entry: {e}");
                    if let Err(e) = disk.remove(&key) {
                        tracing::warn!(url = %key, "failed to remove disk cache entry: {e}");
                    }
                    None
                }
            }
        })
        .await;
        result.ok().flatten()
    }

    async fn write_disk(&self, url: &Url, image: &ImageData) {
        let Some(disk) = self.disk.clone() else {
            return;
        };
        let key = url.to_string();
        let bytes = image.encoded_bytes().to_vec();
        let result = tokio::task::spawn_blocking(move || disk.write(&key, &bytes)).await;
        if let Ok(Err(e)) = result {
            tracing::warn!(%url, "failed to write image to disk cache: {e}");
        }
    }

    async fn download(&self, url: &Url) -> Option<ImageData> {
        let response = match self.client.get(url.clone()).send().await {
            Ok(response) => response,
            Err(e) => {
                tracing::warn!(%url, "image request failed: {e}");
                return None;
            }
        };

        let status = response.status();
        if !status.is_success() {
            tracing::warn!(%url, %status, "image request returned an error status");
            return None;
        }

        let bytes = match response.bytes().await {
            Ok(bytes) => bytes,
            Err(e) => {
                tracing::warn!(%url, "failed to read image body: {e}");
                return None;
            }
        };

        match tokio::task::spawn_blocking(move || ImageData::decode(&bytes)).await {
            Ok(Ok(image)) => Some(image),
            Ok(Err(e)) => {
                tracing::warn!(%url, "downloaded bytes are not an image: {e}");
                None
            }
            Err(e) => {
                tracing::warn!(%url, "image decode task failed: {e}");
                None
            }
        }
    }

    /// Loads the image at `url`, from cache when possible.
    pub async fn load(&self, url: &Url) -> Option<ImageData> {
        if let Some(image) = self.memory_get(url) {
            self.counters.memory_hits.fetch_add(1, Ordering::Relaxed);
            tracing::debug!(%url, "image memory cache hit");
            return Some(image);
        }

        if let Some(image) = self.read_disk(url).await {
            self.counters.disk_hits.fetch_add(1, Ordering::Relaxed);
            tracing::debug!(%url, "image disk cache hit");
            self.memory_put(url, &image);
            return Some(image);
        }

        let downloaded = {
            // Only network downloads take a slot. The semaphore is never closed.
            let _permit = self.permits.acquire().await.ok()?;
            self.download(url).await
        };

        match downloaded {
            Some(image) => {
                self.counters.downloads.fetch_add(1, Ordering::Relaxed);
                self.write_disk(url, &image).await;
                self.memory_put(url, &image);
                Some(image)
            }
            None => {
                self.counters.failures.fetch_add(1, Ordering::Relaxed);
                None
            }
        }
    }
}

impl ImageSource for ImageLoader {
    async fn load(&self, url: &Url) -> Option<ImageData> {
        ImageLoader::load(self, url).await
    }
}

impl std::fmt::Debug for ImageLoader {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ImageLoader")
            .field("max_concurrent", &self.max_concurrent)
            .field("cached", &self.cached_len())
            .field("disk_cache", &self.disk.as_ref().map(DiskCache::dir))
            .field("stats", &self.stats())
            .finish()
    }
}
