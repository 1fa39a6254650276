// SPDX-License-Identifier: MPL-2.0
//! Fixed-pattern photo grid.
//!
//! A breed page shows up to ten photos in three sections:
//!
//! - **Hero**: one large tile (flat index 0)
//! - **Middle**: a 3×2 block of medium tiles (flat indices 1..7)
//! - **Bottom**: a large tile next to a column of two (flat indices 7..10)
//!
//! [`GridPage`] stores the photos as one flat list and derives the sections
//! from the flat index, so a short list simply leaves the tail sections
//! partially filled or empty. Photos past the tenth are dropped.
//!
//! # Example
//!
//! ```
//! use tikdog::grid::{GridPage, Section};
//! use reqwest::Url;
//!
//! let urls: Vec<Url> = (0..8)
//!     .map(|i| Url::parse(&format!("https://images.dog.ceo/breeds/akita/{i}.jpg")).unwrap())
//!     .collect();
//! let page = GridPage::build(urls).unwrap();
//!
//! assert_eq!(page.item_count(Section::Hero), 1);
//! assert_eq!(page.item_count(Section::Middle), 6);
//! assert_eq!(page.item_count(Section::Bottom), 1);
//! assert!(page.get(Section::Bottom, 1).is_none());
//! ```

pub mod decode;
pub mod layout;
pub mod rows;

use crate::domain::PhotoDescriptor;
use crate::error::EmptyInputError;
use crate::media::ImageData;
use reqwest::Url;

pub use layout::{LayoutNode, SectionLayout, TileFrame};
pub use rows::{IdGenerator, PlaceholderId, RandomIds, Row, SequentialIds};

/// Number of photos one page can hold (1 + 6 + 3).
pub const PAGE_CAPACITY: usize = 10;

/// The three fixed zones of a page, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Section {
    Hero,
    Middle,
    Bottom,
}

impl Section {
    pub const ALL: [Section; 3] = [Section::Hero, Section::Middle, Section::Bottom];

    /// Position of the section in display order.
    #[must_use]
    pub const fn index(self) -> usize {
        match self {
            Section::Hero => 0,
            Section::Middle => 1,
            Section::Bottom => 2,
        }
    }

    #[must_use]
    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    /// Fixed number of tiles in the section template.
    #[must_use]
    pub const fn capacity(self) -> usize {
        match self {
            Section::Hero => 1,
            Section::Middle => 6,
            Section::Bottom => 3,
        }
    }

    /// Flat index of the section's first tile.
    #[must_use]
    pub const fn offset(self) -> usize {
        match self {
            Section::Hero => 0,
            Section::Middle => 1,
            Section::Bottom => 7,
        }
    }

    /// Maps a row of this section to its flat index.
    ///
    /// # Panics
    ///
    /// Panics if `row` is not below [`Section::capacity`]. Asking for such a
    /// row means the caller's item counts disagree with the template.
    #[must_use]
    pub fn flat_index(self, row: usize) -> usize {
        assert!(
            row < self.capacity(),
            "Index out of range: row {row} in {self:?} section (capacity {})",
            self.capacity()
        );
        self.offset() + row
    }

    /// Maps a flat index back to its `(section, row)`; `None` past the page.
    #[must_use]
    pub fn position(flat_index: usize) -> Option<(Section, usize)> {
        Self::ALL.into_iter().find_map(|section| {
            let row = flat_index.checked_sub(section.offset())?;
            (row < section.capacity()).then_some((section, row))
        })
    }
}

/// The photos of one breed page laid out over the three sections.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GridPage {
    photos: Vec<PhotoDescriptor>,
}

impl GridPage {
    /// Lays out `urls` in order, keeping at most [`PAGE_CAPACITY`] of them.
    ///
    /// Returns [`EmptyInputError`] when `urls` yields nothing: a page always
    /// has a hero photo.
    pub fn build(urls: impl IntoIterator<Item = Url>) -> Result<Self, EmptyInputError> {
        let photos: Vec<PhotoDescriptor> = urls
            .into_iter()
            .take(PAGE_CAPACITY)
            .map(PhotoDescriptor::new)
            .collect();

        if photos.is_empty() {
            return Err(EmptyInputError);
        }

        Ok(Self { photos })
    }

    /// Number of photos placed on the page (`min(N, 10)`).
    #[must_use]
    pub fn photo_count(&self) -> usize {
        self.photos.len()
    }

    /// Number of filled rows in `section`.
    ///
    /// UI code must size its sections with this rather than the template's
    /// 1/6/3 so it never requests a row that does not exist.
    #[must_use]
    pub fn item_count(&self, section: Section) -> usize {
        self.photos
            .len()
            .saturating_sub(section.offset())
            .min(section.capacity())
    }

    /// The descriptor at `(section, row)`, or `None` when that template slot
    /// was left empty by a short photo list.
    ///
    /// # Panics
    ///
    /// Panics if `row` is outside the section template (see
    /// [`Section::flat_index`]).
    #[must_use]
    pub fn get(&self, section: Section, row: usize) -> Option<&PhotoDescriptor> {
        self.photos.get(section.flat_index(row))
    }

    /// The descriptor at a flat index.
    #[must_use]
    pub fn get_flat(&self, index: usize) -> Option<&PhotoDescriptor> {
        self.photos.get(index)
    }

    #[must_use]
    pub fn hero(&self) -> &PhotoDescriptor {
        &self.photos[0]
    }

    /// The filled rows of `section`, in order.
    #[must_use]
    pub fn section(&self, section: Section) -> &[PhotoDescriptor] {
        let start = section.offset().min(self.photos.len());
        let end = start + self.item_count(section);
        &self.photos[start..end]
    }

    #[must_use]
    pub fn middle(&self) -> &[PhotoDescriptor] {
        self.section(Section::Middle)
    }

    #[must_use]
    pub fn bottom(&self) -> &[PhotoDescriptor] {
        self.section(Section::Bottom)
    }

    /// All placed photos in flat order.
    #[must_use]
    pub fn photos(&self) -> &[PhotoDescriptor] {
        &self.photos
    }

    /// Flat indices and URLs of the photos that have no image yet.
    pub fn unresolved(&self) -> impl Iterator<Item = (usize, &Url)> + '_ {
        self.photos
            .iter()
            .enumerate()
            .filter(|(_, photo)| !photo.is_resolved())
            .map(|(index, photo)| (index, &photo.url))
    }

    /// Attaches `image` to the photo at `index`.
    ///
    /// Returns `false` if no photo sits at that index. Attaching the same
    /// image again leaves the page unchanged.
    pub fn set_image(&mut self, index: usize, image: ImageData) -> bool {
        match self.photos.get_mut(index) {
            Some(photo) => {
                photo.image = Some(image);
                true
            }
            None => false,
        }
    }

    /// Attaches `image` to the photo at `(section, row)`.
    ///
    /// # Panics
    ///
    /// Panics if `row` is outside the section template.
    pub fn set_image_at(&mut self, section: Section, row: usize, image: ImageData) -> bool {
        self.set_image(section.flat_index(row), image)
    }

    /// Attaches `image` to the first photo whose URL is `url`.
    ///
    /// Linear scan, for call sites that only kept the URL. If a page holds
    /// the same URL twice only the first copy is updated; prefer
    /// [`GridPage::set_image`].
    pub fn set_image_by_url(&mut self, url: &Url, image: ImageData) -> Option<usize> {
        let index = self.photos.iter().position(|photo| &photo.url == url)?;
        self.photos[index].image = Some(image);
        Some(index)
    }
}

#[cfg(test)]
pub(crate) fn sample_urls(n: usize) -> Vec<Url> {
    (0..n)
        .map(|i| {
            Url::parse(&format!(
                "https://images.dog.ceo/breeds/hound-afghan/n02088094_{i}.jpg"
            ))
            .expect("static test URL")
        })
        .collect()
}
