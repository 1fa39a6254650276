// SPDX-License-Identifier: MPL-2.0
//! Dog CEO API access.
//!
//! # Ports
//!
//! - [`DogService`]: breed list and breed photo URLs
//! - [`ImageSource`]: image bytes for one photo URL
//!
//! [`DogApiClient`] is the HTTP implementation of [`DogService`];
//! [`crate::media::ImageLoader`] implements [`ImageSource`]. Tests and
//! headless tools can supply their own implementations.

pub mod client;
pub mod wire;

use crate::domain::Breed;
use crate::error::{DecodeError, FetchError};
use crate::grid::PAGE_CAPACITY;
use crate::media::ImageData;
use reqwest::Url;
use std::future::Future;

pub use client::DogApiClient;
pub use wire::decode_breed_list;

/// The two API endpoints the client uses.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Endpoint {
    BreedList,
    BreedPhotos { breed_identifier: String },
}

impl Endpoint {
    /// Path relative to the API base URL.
    #[must_use]
    pub fn path(&self) -> String {
        match self {
            Endpoint::BreedList => "breeds/list/all".to_string(),
            Endpoint::BreedPhotos { breed_identifier } => {
                format!("breed/{breed_identifier}/images/random/{PAGE_CAPACITY}")
            }
        }
    }

    /// Resolves the endpoint against `base`, which must end with `/`.
    pub fn url(&self, base: &Url) -> Result<Url, DecodeError> {
        let path = self.path();
        base.join(&path).map_err(|e| DecodeError::InvalidUrl {
            url: path,
            reason: e.to_string(),
        })
    }
}

/// Source of breeds and breed photo URLs.
pub trait DogService: Send + Sync {
    fn fetch_breed_list(&self) -> impl Future<Output = Result<Vec<Breed>, FetchError>> + Send;

    fn fetch_photos(
        &self,
        breed_identifier: &str,
    ) -> impl Future<Output = Result<Vec<Url>, FetchError>> + Send;
}

/// Source of images. Failures are reported as `None`, never as errors.
pub trait ImageSource: Send + Sync {
    fn load(&self, url: &Url) -> impl Future<Output = Option<ImageData>> + Send;
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base() -> Url {
        Url::parse("https://dog.ceo/api/").expect("static URL")
    }

    #[test]
    fn breed_list_url() {
        let url = Endpoint::BreedList.url(&base()).expect("joinable");
        assert_eq!(url.as_str(), "https://dog.ceo/api/breeds/list/all");
    }

    #[test]
    fn sub_breed_photos_url_keeps_path_separator() {
        let endpoint = Endpoint::BreedPhotos {
            breed_identifier: "hound/afghan".to_string(),
        };
        let url = endpoint.url(&base()).expect("joinable");
        assert_eq!(
            url.as_str(),
            "https://dog.ceo/api/breed/hound/afghan/images/random/10"
        );
    }
}
