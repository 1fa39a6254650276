// SPDX-License-Identifier: MPL-2.0
//! Centralized path management for application directories.
//!
//! # Path Resolution Order
//!
//! 1. **Explicit override** - parameter to `_with_override()` functions (for tests)
//! 2. **CLI arguments** (`--config-dir`, `--cache-dir`) - set via [`init_cli_overrides`]
//! 3. **Environment variables** (`TIKDOG_CONFIG_DIR`, `TIKDOG_CACHE_DIR`)
//! 4. **Platform default** - via `dirs` crate, with the app name appended

use std::path::PathBuf;
use std::sync::OnceLock;

/// Application name used for directory naming.
pub const APP_NAME: &str = "TikDog";

/// Environment variable to override the config directory.
pub const ENV_CONFIG_DIR: &str = "TIKDOG_CONFIG_DIR";

/// Environment variable to override the image cache directory.
pub const ENV_CACHE_DIR: &str = "TIKDOG_CACHE_DIR";

static CLI_CONFIG_DIR: OnceLock<Option<PathBuf>> = OnceLock::new();
static CLI_CACHE_DIR: OnceLock<Option<PathBuf>> = OnceLock::new();

/// Records the `--config-dir` / `--cache-dir` CLI arguments.
///
/// Only the first call has an effect; later calls are ignored.
pub fn init_cli_overrides(config_dir: Option<String>, cache_dir: Option<String>) {
    let _ = CLI_CONFIG_DIR.set(config_dir.map(PathBuf::from));
    let _ = CLI_CACHE_DIR.set(cache_dir.map(PathBuf::from));
}

fn resolve(
    override_path: Option<PathBuf>,
    cli: &OnceLock<Option<PathBuf>>,
    env_var: &str,
    platform_dir: Option<PathBuf>,
) -> Option<PathBuf> {
    if let Some(path) = override_path {
        return Some(path);
    }

    if let Some(path) = cli.get().and_then(Clone::clone) {
        return Some(path);
    }

    if let Ok(env_path) = std::env::var(env_var) {
        if !env_path.is_empty() {
            return Some(PathBuf::from(env_path));
        }
    }

    platform_dir.map(|mut path| {
        path.push(APP_NAME);
        path
    })
}

/// Directory holding `settings.toml`.
///
/// Returns `None` if the platform has no config directory (rare).
pub fn get_app_config_dir() -> Option<PathBuf> {
    get_app_config_dir_with_override(None)
}

pub fn get_app_config_dir_with_override(override_path: Option<PathBuf>) -> Option<PathBuf> {
    resolve(override_path, &CLI_CONFIG_DIR, ENV_CONFIG_DIR, dirs::config_dir())
}

/// Directory for downloaded images when the disk cache is enabled.
///
/// - Linux: `~/.cache/TikDog/`
/// - macOS: `~/Library/Caches/TikDog/`
/// - Windows: `C:\Users\<User>\AppData\Local\TikDog\`
pub fn get_image_cache_dir() -> Option<PathBuf> {
    get_image_cache_dir_with_override(None)
}

pub fn get_image_cache_dir_with_override(override_path: Option<PathBuf>) -> Option<PathBuf> {
    resolve(override_path, &CLI_CACHE_DIR, ENV_CACHE_DIR, dirs::cache_dir())
        .map(|path| path.join("images"))
}
