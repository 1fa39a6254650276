// SPDX-License-Identifier: MPL-2.0
//! Photo images: decoded data, on-disk cache and the network loader.

pub mod disk_cache;
pub mod image;
pub mod image_loader;

pub use disk_cache::DiskCache;
pub use image::ImageData;
pub use image_loader::{ImageLoader, ImageLoaderConfig, LoaderStats};
