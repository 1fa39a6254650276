// SPDX-License-Identifier: MPL-2.0
//! Photo descriptors placed into the grid.

use crate::media::ImageData;
use reqwest::Url;

/// One photo of a breed page: where to fetch it and, once resolved, the image.
///
/// Inside a page a descriptor is identified by its flat index, never by URL,
/// because the API may return the same URL twice.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PhotoDescriptor {
    pub url: Url,
    pub image: Option<ImageData>,
}

impl PhotoDescriptor {
    #[must_use]
    pub fn new(url: Url) -> Self {
        Self { url, image: None }
    }

    #[must_use]
    pub fn is_resolved(&self) -> bool {
        self.image.is_some()
    }
}
