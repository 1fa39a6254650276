// SPDX-License-Identifier: MPL-2.0
//! Centralized default values for all configuration constants.
//!
//! # Categories
//!
//! - **API**: Base URL and request timeout
//! - **Image Loading**: Concurrency and cache bounds
//! - **Logging**: Default filter directive

// ==========================================================================
// API Defaults
// ==========================================================================

/// Base URL of the Dog CEO API. Endpoint paths are joined onto it.
pub const DEFAULT_BASE_URL: &str = "https://dog.ceo/api/";

/// Default per-request timeout (in seconds).
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 5;

/// Minimum request timeout (in seconds).
pub const MIN_REQUEST_TIMEOUT_SECS: u64 = 1;

/// Maximum request timeout (in seconds).
pub const MAX_REQUEST_TIMEOUT_SECS: u64 = 60;

// ==========================================================================
// Image Loading Defaults
// ==========================================================================

/// Default number of images downloaded at the same time.
pub const DEFAULT_MAX_CONCURRENT_IMAGE_LOADS: usize = 3;

/// Minimum concurrent image downloads.
pub const MIN_CONCURRENT_IMAGE_LOADS: usize = 1;

/// Maximum concurrent image downloads.
pub const MAX_CONCURRENT_IMAGE_LOADS: usize = 16;

/// Default number of decoded images kept in memory (three full pages).
pub const DEFAULT_IMAGE_CACHE_ENTRIES: usize = 30;

/// Maximum number of images kept in memory. Zero disables the memory cache.
pub const MAX_IMAGE_CACHE_ENTRIES: usize = 256;

// ==========================================================================
// Logging Defaults
// ==========================================================================

/// Default `tracing` filter when neither `RUST_LOG` nor the config sets one.
pub const DEFAULT_LOG_FILTER: &str = "info";
