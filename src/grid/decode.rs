// SPDX-License-Identifier: MPL-2.0
//! Decoding a photo list payload into a [`GridPage`].
//!
//! The photos endpoint answers `{"message": ["<url>", ...], "status": "success"}`.
//! URLs are opaque: anything [`Url::parse`] accepts is kept.

use super::GridPage;
use crate::error::DecodeError;
use reqwest::Url;
use serde::Deserialize;

#[derive(Debug, Deserialize)]
struct PhotoListResponse {
    #[serde(default)]
    message: Option<Vec<String>>,
}

/// Parses the URL list out of a photos payload.
///
/// Fails with [`DecodeError::NoUrls`] when `message` is missing, `null` or
/// empty, and with [`DecodeError::InvalidUrl`] on the first unparsable URL.
pub fn parse_photo_urls(json: &[u8]) -> Result<Vec<Url>, DecodeError> {
    let response: PhotoListResponse = serde_json::from_slice(json)?;
    let raw = response.message.unwrap_or_default();
    if raw.is_empty() {
        return Err(DecodeError::NoUrls);
    }

    raw.into_iter()
        .map(|s| {
            Url::parse(&s).map_err(|e| DecodeError::InvalidUrl {
                url: s.clone(),
                reason: e.to_string(),
            })
        })
        .collect()
}

impl GridPage {
    /// Decodes a photos payload and lays it out.
    pub fn from_json(json: &[u8]) -> Result<Self, DecodeError> {
        let urls = parse_photo_urls(json)?;
        Ok(GridPage::build(urls)?)
    }
}
