// SPDX-License-Identifier: MPL-2.0
//! HTTP client for the Dog CEO API.
//!
//! Status handling:
//! - `200`: the body is decoded as the endpoint's payload
//! - `400..=599`: the body is decoded as the API's error JSON; if that fails
//!   the generic message is reported with the status code
//! - anything else: generic message with the status code
//! - no response at all (timeout, DNS, TLS...): generic message, code 0

use super::{decode_breed_list, DogService, Endpoint};
use crate::config::Config;
use crate::domain::Breed;
use crate::error::{Error, FetchError, Result};
use crate::grid::decode::parse_photo_urls;
use reqwest::{StatusCode, Url};
use std::time::Duration;

/// User agent sent with every request.
pub const USER_AGENT: &str = concat!("TikDog/", env!("CARGO_PKG_VERSION"));

#[derive(Debug, Clone)]
pub struct DogApiClient {
    client: reqwest::Client,
    base_url: Url,
}

impl DogApiClient {
    /// Creates a client for `base_url` (which should end with `/`).
    pub fn new(base_url: Url, timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .redirect(reqwest::redirect::Policy::limited(10))
            .user_agent(USER_AGENT)
            .timeout(timeout)
            .build()
            .map_err(|e| Error::Config(format!("failed to build HTTP client: {e}")))?;

        Ok(Self { client, base_url })
    }

    pub fn from_config(config: &Config) -> Result<Self> {
        Self::new(config.base_url()?, config.request_timeout())
    }

    #[must_use]
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Fetches `endpoint` and returns the body of a successful response.
    async fn get(&self, endpoint: &Endpoint) -> std::result::Result<Vec<u8>, FetchError> {
        let url = endpoint.url(&self.base_url)?;
        tracing::debug!(%url, "GET");

        let response = self.client.get(url.clone()).send().await.map_err(|e| {
            tracing::warn!(%url, "request failed: {e}");
            FetchError::generic()
        })?;

        let status = response.status();
        let body = response.bytes().await.map_err(|e| {
            tracing::warn!(%url, %status, "failed to read response body: {e}");
            FetchError::generic()
        })?;

        match status {
            StatusCode::OK => Ok(body.to_vec()),
            s if s.is_client_error() || s.is_server_error() => {
                let err = serde_json::from_slice::<FetchError>(&body)
                    .unwrap_or_else(|_| FetchError::with_status(s.as_u16()));
                tracing::info!(%url, status = s.as_u16(), message = %err.message, "API error");
                Err(err)
            }
            s => {
                tracing::info!(%url, status = s.as_u16(), "unexpected status");
                Err(FetchError::with_status(s.as_u16()))
            }
        }
    }
}

impl DogService for DogApiClient {
    async fn fetch_breed_list(&self) -> std::result::Result<Vec<Breed>, FetchError> {
        let body = self.get(&Endpoint::BreedList).await?;
        let breeds = decode_breed_list(&body)?;
        tracing::info!(count = breeds.len(), "fetched breed list");
        Ok(breeds)
    }

    async fn fetch_photos(&self, breed_identifier: &str) -> std::result::Result<Vec<Url>, FetchError> {
        let endpoint = Endpoint::BreedPhotos {
            breed_identifier: breed_identifier.to_string(),
        };
        let body = self.get(&endpoint).await?;
        let urls = parse_photo_urls(&body)?;
        tracing::info!(breed = breed_identifier, count = urls.len(), "fetched photo list");
        Ok(urls)
    }
}
