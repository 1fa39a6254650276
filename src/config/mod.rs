// SPDX-License-Identifier: MPL-2.0
//! This module handles the application's configuration, including loading and saving
//! user preferences to a `settings.toml` file.
//!
//! Every field is optional; accessors fall back to [`defaults`] and clamp
//! out-of-range values.
//!
//! # Examples
//!
//! ```no_run
//! use tikdog::config::{self, Config};
//!
//! let mut config = config::load().unwrap_or_default();
//! config.max_concurrent_image_loads = Some(4);
//! config::save(&config).expect("Failed to save config");
//! ```

pub mod defaults;

pub use defaults::*;

use crate::app::paths;
use crate::error::{Error, Result};
use reqwest::Url;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

const CONFIG_FILE: &str = "settings.toml";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub base_url: Option<String>,
    #[serde(default)]
    pub request_timeout_secs: Option<u64>,
    #[serde(default)]
    pub max_concurrent_image_loads: Option<usize>,
    #[serde(default)]
    pub image_cache_entries: Option<usize>,
    #[serde(default)]
    pub disk_cache: Option<bool>,
    #[serde(default)]
    pub log_filter: Option<String>,
}

impl Config {
    /// API base URL, always ending with `/` so endpoint paths join under it.
    pub fn base_url(&self) -> Result<Url> {
        let raw = self.base_url.as_deref().unwrap_or(DEFAULT_BASE_URL);
        let mut url =
            Url::parse(raw).map_err(|e| Error::Config(format!("invalid base_url {raw:?}: {e}")))?;
        if !url.path().ends_with('/') {
            let path = format!("{}/", url.path());
            url.set_path(&path);
        }
        Ok(url)
    }

    #[must_use]
    pub fn request_timeout(&self) -> Duration {
        let secs = self
            .request_timeout_secs
            .unwrap_or(DEFAULT_REQUEST_TIMEOUT_SECS)
            .clamp(MIN_REQUEST_TIMEOUT_SECS, MAX_REQUEST_TIMEOUT_SECS);
        Duration::from_secs(secs)
    }

    #[must_use]
    pub fn max_concurrent_image_loads(&self) -> usize {
        self.max_concurrent_image_loads
            .unwrap_or(DEFAULT_MAX_CONCURRENT_IMAGE_LOADS)
            .clamp(MIN_CONCURRENT_IMAGE_LOADS, MAX_CONCURRENT_IMAGE_LOADS)
    }

    #[must_use]
    pub fn image_cache_entries(&self) -> usize {
        self.image_cache_entries
            .unwrap_or(DEFAULT_IMAGE_CACHE_ENTRIES)
            .min(MAX_IMAGE_CACHE_ENTRIES)
    }

    #[must_use]
    pub fn disk_cache(&self) -> bool {
        self.disk_cache.unwrap_or(false)
    }

    #[must_use]
    pub fn log_filter(&self) -> &str {
        self.log_filter.as_deref().unwrap_or(DEFAULT_LOG_FILTER)
    }
}

fn get_default_config_path() -> Option<PathBuf> {
    paths::get_app_config_dir().map(|mut path| {
        path.push(CONFIG_FILE);
        path
    })
}

pub fn load() -> Result<Config> {
    if let Some(path) = get_default_config_path() {
        if path.exists() {
            return load_from_path(&path);
        }
    }
    Ok(Config::default())
}

/// Loads the settings file, falling back to defaults when it is unusable.
///
/// The error that caused the fallback is returned alongside so the caller
/// can report it once logging is set up.
pub fn load_or_default() -> (Config, Option<Error>) {
    fallback(load())
}

/// [`load_or_default`] for an explicit `path`.
pub fn load_or_default_from_path(path: &Path) -> (Config, Option<Error>) {
    fallback(load_from_path(path))
}

fn fallback(result: Result<Config>) -> (Config, Option<Error>) {
    match result {
        Ok(config) => (config, None),
        Err(err) => (Config::default(), Some(err)),
    }
}

pub fn save(config: &Config) -> Result<()> {
    if let Some(path) = get_default_config_path() {
        return save_to_path(config, &path);
    }
    Ok(())
}

/// Reads `path`. Unreadable files are I/O errors, invalid TOML is a config error.
pub fn load_from_path(path: &Path) -> Result<Config> {
    let content = fs::read_to_string(path)?;
    toml::from_str(&content)
        .map_err(|err| Error::Config(format!("invalid settings file {}: {err}", path.display())))
}

pub fn save_to_path(config: &Config, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let content = toml::to_string_pretty(config)?;
    fs::write(path, content)?;
    Ok(())
}
