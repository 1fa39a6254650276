// SPDX-License-Identifier: MPL-2.0
//! Photo screen session.
//!
//! A [`PhotoSession`] is the single owner of a breed's [`GridPage`]. Fetches
//! and image loads run concurrently, but their results are applied by the
//! task that owns the session, one at a time.
//!
//! Every fetch gets a [`FetchTicket`] carrying the session's generation. A
//! new fetch or a [`PhotoSession::cancel`] bumps the generation, so results
//! that arrive for an older ticket are discarded instead of overwriting a
//! newer page. [`BreedListSession`] applies the same guard to the breed list.

pub mod breeds;

use crate::api::{DogService, ImageSource};
use crate::domain::Loadable;
use crate::error::{DecodeError, FetchError};
use crate::grid::rows::{rows_for, section_count};
use crate::grid::{GridPage, IdGenerator, Row, Section};
use crate::media::ImageData;
use futures_util::stream::{self, StreamExt};
use reqwest::Url;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

pub use breeds::{BreedListSession, BreedRow, BREED_PLACEHOLDER_ROWS};

/// Shared flag that stops a session's in-flight work from being applied.
pub type CancellationToken = Arc<AtomicBool>;

/// Identifies the fetch a result belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchTicket {
    generation: u64,
}

impl FetchTicket {
    #[must_use]
    pub fn generation(self) -> u64 {
        self.generation
    }
}

#[derive(Debug, Default)]
pub struct PhotoSession {
    state: Loadable<GridPage>,
    generation: u64,
    cancel_token: CancellationToken,
}

impl PhotoSession {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn state(&self) -> &Loadable<GridPage> {
        &self.state
    }

    #[must_use]
    pub fn page(&self) -> Option<&GridPage> {
        self.state.loaded()
    }

    #[must_use]
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Token of the current fetch. Setting it has the same effect on
    /// in-flight work as [`PhotoSession::cancel`].
    #[must_use]
    pub fn cancel_token(&self) -> CancellationToken {
        Arc::clone(&self.cancel_token)
    }

    /// Whether results for `ticket` may still be applied.
    #[must_use]
    pub fn is_current(&self, ticket: FetchTicket) -> bool {
        ticket.generation == self.generation && !self.cancel_token.load(Ordering::SeqCst)
    }

    /// Starts a new fetch, invalidating every earlier ticket.
    pub fn begin_fetch(&mut self) -> FetchTicket {
        self.cancel_token.store(true, Ordering::SeqCst);
        self.cancel_token = Arc::new(AtomicBool::new(false));
        self.generation += 1;
        self.state = Loadable::Loading;
        tracing::debug!(generation = self.generation, "photo fetch started");
        FetchTicket {
            generation: self.generation,
        }
    }

    /// Applies the photo list fetched for `ticket`.
    ///
    /// An empty list becomes a failed state. Returns `false` and leaves the
    /// session untouched if the ticket is stale.
    pub fn finish_fetch(&mut self, ticket: FetchTicket, result: Result<Vec<Url>, FetchError>) -> bool {
        if !self.is_current(ticket) {
            tracing::warn!(
                ticket = ticket.generation,
                current = self.generation,
                "discarding stale photo list"
            );
            return false;
        }

        let result = result.and_then(|urls| {
            GridPage::build(urls).map_err(|e| FetchError::from(DecodeError::from(e)))
        });
        match &result {
            Ok(page) => tracing::info!(photos = page.photo_count(), "photo page ready"),
            Err(err) => tracing::info!(code = ?err.code, message = %err.message, "photo fetch failed"),
        }
        self.state = Loadable::from(result);
        true
    }

    /// Abandons the current fetch and any image loads still running for it.
    pub fn cancel(&mut self) {
        self.cancel_token.store(true, Ordering::SeqCst);
        self.generation += 1;
        tracing::debug!(generation = self.generation, "photo session cancelled");
    }

    /// Attaches `image` to the photo at flat `index`.
    ///
    /// Returns `false` for a stale ticket, a page that is not loaded, or an
    /// index with no photo.
    pub fn attach_image(&mut self, ticket: FetchTicket, index: usize, image: ImageData) -> bool {
        if !self.is_current(ticket) {
            tracing::debug!(index, "dropping image for stale fetch");
            return false;
        }
        self.state
            .loaded_mut()
            .is_some_and(|page| page.set_image(index, image))
    }

    /// Number of sections to display.
    #[must_use]
    pub fn section_count(&self) -> usize {
        section_count(&self.state)
    }

    /// Rows of `section` for display.
    pub fn rows(&self, section: Section, ids: &mut impl IdGenerator) -> Vec<Row> {
        rows_for(&self.state, section, ids)
    }

    /// Fetches the photo list for `breed_identifier` and applies it.
    ///
    /// Calling it again is how a failed screen retries.
    pub async fn refresh(&mut self, service: &impl DogService, breed_identifier: &str) -> bool {
        let ticket = self.begin_fetch();
        let result = service.fetch_photos(breed_identifier).await;
        self.finish_fetch(ticket, result)
    }

    /// Loads every photo that has no image yet, at most `concurrency` at a
    /// time, and attaches the results as they arrive.
    ///
    /// Stops early once the session is cancelled. Returns the number of
    /// images attached.
    pub async fn load_images(&mut self, source: &impl ImageSource, concurrency: usize) -> usize {
        let Some(page) = self.state.loaded() else {
            return 0;
        };
        let ticket = FetchTicket {
            generation: self.generation,
        };
        let jobs: Vec<(usize, Url)> = page
            .unresolved()
            .map(|(index, url)| (index, url.clone()))
            .collect();
        if jobs.is_empty() {
            return 0;
        }
        tracing::debug!(count = jobs.len(), concurrency, "loading photo images");

        let token = self.cancel_token();
        let mut results = stream::iter(jobs)
            .map(|(index, url)| {
                let token = Arc::clone(&token);
                async move {
                    if token.load(Ordering::SeqCst) {
                        return (index, None);
                    }
                    (index, source.load(&url).await)
                }
            })
            .buffer_unordered(concurrency.max(1));

        let mut attached = 0;
        while let Some((index, image)) = results.next().await {
            if !self.is_current(ticket) {
                tracing::debug!("image loading cancelled");
                break;
            }
            if let Some(image) = image {
                if self.attach_image(ticket, index, image) {
                    attached += 1;
                }
            }
        }
        attached
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::{sample_urls, SequentialIds, PAGE_CAPACITY};

    fn image() -> ImageData {
        ImageData::from_encoded(vec![0xFF], 4, 3)
    }

    #[test]
    fn new_session_is_loading() {
        let session = PhotoSession::new();
        assert!(session.state().is_loading());
        assert_eq!(session.section_count(), 3);
    }

    #[test]
    fn finish_fetch_builds_page() {
        let mut session = PhotoSession::new();
        let ticket = session.begin_fetch();
        assert!(session.finish_fetch(ticket, Ok(sample_urls(12))));
        assert_eq!(session.page().map(GridPage::photo_count), Some(PAGE_CAPACITY));
    }

    #[test]
    fn empty_photo_list_fails() {
        let mut session = PhotoSession::new();
        let ticket = session.begin_fetch();
        assert!(session.finish_fetch(ticket, Ok(Vec::new())));
        let err = session.state().error().expect("failed state");
        assert_eq!(err.code, Some(0));
        assert_eq!(session.section_count(), 1);
    }

    #[test]
    fn fetch_error_is_kept() {
        let mut session = PhotoSession::new();
        let ticket = session.begin_fetch();
        let err = FetchError::new("Breed not found (master breed does not exist)", Some(404));
        session.finish_fetch(ticket, Err(err.clone()));
        assert_eq!(session.state().error(), Some(&err));

        let mut ids = SequentialIds::default();
        assert_eq!(
            session.rows(Section::Hero, &mut ids),
            vec![Row::Error(err.message)]
        );
    }

    #[test]
    fn stale_fetch_result_is_discarded() {
        let mut session = PhotoSession::new();
        let old = session.begin_fetch();
        let new = session.begin_fetch();

        assert!(session.finish_fetch(new, Ok(sample_urls(3))));
        assert!(!session.finish_fetch(old, Ok(sample_urls(10))));
        assert_eq!(session.page().map(GridPage::photo_count), Some(3));
    }

    #[test]
    fn cancel_discards_pending_fetch() {
        let mut session = PhotoSession::new();
        let ticket = session.begin_fetch();
        session.cancel();
        assert!(!session.finish_fetch(ticket, Ok(sample_urls(5))));
        assert!(session.state().is_loading());
    }

    #[test]
    fn begin_fetch_trips_previous_token() {
        let mut session = PhotoSession::new();
        session.begin_fetch();
        let token = session.cancel_token();
        session.begin_fetch();
        assert!(token.load(Ordering::SeqCst));
        assert!(!session.cancel_token().load(Ordering::SeqCst));
    }

    #[test]
    fn attach_image_is_idempotent() {
        let mut session = PhotoSession::new();
        let ticket = session.begin_fetch();
        session.finish_fetch(ticket, Ok(sample_urls(4)));

        assert!(session.attach_image(ticket, 2, image()));
        let once = session.state().clone();
        assert!(session.attach_image(ticket, 2, image()));
        assert_eq!(session.state(), &once);
    }

    #[test]
    fn attach_image_rejects_stale_ticket_and_bad_index() {
        let mut session = PhotoSession::new();
        let old = session.begin_fetch();
        session.finish_fetch(old, Ok(sample_urls(4)));
        assert!(!session.attach_image(old, 7, image()));

        let new = session.begin_fetch();
        session.finish_fetch(new, Ok(sample_urls(4)));
        assert!(!session.attach_image(old, 0, image()));
        assert_eq!(session.page().map(|p| p.unresolved().count()), Some(4));
    }

    #[test]
    fn attach_image_before_load_is_rejected() {
        let mut session = PhotoSession::new();
        let ticket = session.begin_fetch();
        assert!(!session.attach_image(ticket, 0, image()));
    }
}
