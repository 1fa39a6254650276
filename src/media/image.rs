// SPDX-License-Identifier: MPL-2.0
//! Downloaded image payloads.
//!
//! Only bytes that decode as a supported format (JPEG, PNG, GIF, WebP) become
//! an [`ImageData`]; anything else is treated as "no image" by the loader.

use image_rs::{GenericImageView, ImageError};
use std::sync::Arc;

#[derive(Debug, Clone)]
pub struct ImageData {
    pub width: u32,
    pub height: u32,
    /// Encoded bytes as received, shared so clones stay cheap.
    encoded: Arc<[u8]>,
}

impl ImageData {
    /// Decodes `bytes` to validate them and learn the pixel dimensions.
    ///
    /// The decoded pixels are dropped; a renderer decodes again from
    /// [`ImageData::encoded_bytes`] at whatever size it needs.
    pub fn decode(bytes: &[u8]) -> Result<Self, ImageError> {
        let img = image_rs::load_from_memory(bytes)?;
        let (width, height) = img.dimensions();
        Ok(Self {
            width,
            height,
            encoded: Arc::from(bytes),
        })
    }

    /// Wraps already-validated bytes without decoding them again.
    #[must_use]
    pub fn from_encoded(encoded: Vec<u8>, width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            encoded: Arc::from(encoded),
        }
    }

    /// Returns the encoded image bytes.
    pub fn encoded_bytes(&self) -> &[u8] {
        &self.encoded
    }

    /// Size of the encoded payload in bytes.
    #[must_use]
    pub fn size_bytes(&self) -> usize {
        self.encoded.len()
    }
}

impl PartialEq for ImageData {
    fn eq(&self, other: &Self) -> bool {
        self.width == other.width
            && self.height == other.height
            && (Arc::ptr_eq(&self.encoded, &other.encoded) || self.encoded == other.encoded)
    }
}

impl Eq for ImageData {}

#[cfg(test)]
pub(crate) fn png_bytes(width: u32, height: u32) -> Vec<u8> {
    use image_rs::{ImageFormat, RgbaImage};
    use std::io::Cursor;

    let img = RgbaImage::from_pixel(width, height, image_rs::Rgba([200, 120, 40, 255]));
    let mut out = Cursor::new(Vec::new());
    img.write_to(&mut out, ImageFormat::Png)
        .expect("encoding a small PNG should succeed");
    out.into_inner()
}
