// SPDX-License-Identifier: MPL-2.0
//! Per-section row lists for a UI to diff and render.
//!
//! While a page loads every template slot shows a shimmering placeholder;
//! placeholders need stable, distinct identities so a diffing renderer can
//! tell them apart. The identity source is passed in rather than global, so
//! tests can use [`SequentialIds`] and get predictable rows.

use super::{GridPage, Section};
use crate::domain::Loadable;
use reqwest::Url;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PlaceholderId(pub Uuid);

/// Source of placeholder identities.
pub trait IdGenerator {
    fn next_id(&mut self) -> PlaceholderId;
}

/// Random v4 identities, for production use.
#[derive(Debug, Default, Clone, Copy)]
pub struct RandomIds;

impl IdGenerator for RandomIds {
    fn next_id(&mut self) -> PlaceholderId {
        PlaceholderId(Uuid::new_v4())
    }
}

/// Deterministic identities counting up from a seed.
#[derive(Debug, Default, Clone)]
pub struct SequentialIds {
    next: u128,
}

impl SequentialIds {
    #[must_use]
    pub fn starting_at(next: u128) -> Self {
        Self { next }
    }
}

impl IdGenerator for SequentialIds {
    fn next_id(&mut self) -> PlaceholderId {
        let id = PlaceholderId(Uuid::from_u128(self.next));
        self.next += 1;
        id
    }
}

/// One renderable row.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Row {
    Placeholder(PlaceholderId),
    /// A placed photo, identified by its flat index.
    Item {
        index: usize,
        url: Url,
        resolved: bool,
    },
    /// The fetch failed; carries the message to display next to a retry action.
    Error(String),
}

/// Number of sections the screen shows in `state`.
///
/// A failed fetch collapses the grid into a single section holding the error.
#[must_use]
pub fn section_count(state: &Loadable<GridPage>) -> usize {
    match state {
        Loadable::Loading | Loadable::Loaded(_) => Section::ALL.len(),
        Loadable::Failed(_) => 1,
    }
}

/// Rows of `section` for the current screen state.
pub fn rows_for(
    state: &Loadable<GridPage>,
    section: Section,
    ids: &mut impl IdGenerator,
) -> Vec<Row> {
    match state {
        Loadable::Loading => (0..section.capacity())
            .map(|_| Row::Placeholder(ids.next_id()))
            .collect(),
        Loadable::Loaded(page) => {
            let start = section.offset();
            page.section(section)
                .iter()
                .enumerate()
                .map(|(row, photo)| Row::Item {
                    index: start + row,
                    url: photo.url.clone(),
                    resolved: photo.is_resolved(),
                })
                .collect()
        }
        Loadable::Failed(err) => match section {
            Section::Hero => vec![Row::Error(err.message.clone())],
            Section::Middle | Section::Bottom => Vec::new(),
        },
    }
}
