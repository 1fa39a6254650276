// SPDX-License-Identifier: MPL-2.0
//! `tracing` subscriber setup for the binary.
//!
//! `RUST_LOG` takes priority over the config's `log_filter`. Output goes to
//! stderr so stdout stays reserved for the command's result.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Builds the filter from `RUST_LOG`, falling back to `config_filter`.
///
/// An unparsable `config_filter` falls back to `info`.
#[must_use]
pub fn build_filter(config_filter: &str) -> EnvFilter {
    EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config_filter))
        .unwrap_or_else(|_| EnvFilter::new(crate::config::DEFAULT_LOG_FILTER))
}

/// Installs the global subscriber. Later calls are no-ops.
pub fn init(config_filter: &str) {
    let _ = tracing_subscriber::registry()
        .with(build_filter(config_filter))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .try_init();
}
