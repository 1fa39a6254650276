// SPDX-License-Identifier: MPL-2.0
//! Breed list screen session.
//!
//! Same contract as [`super::PhotoSession`]: one owner, a generation per
//! fetch, and stale results dropped. The screen is a single list that shows
//! a fixed run of placeholders while loading, one error row with a retry
//! action on failure, and one row per breed once loaded.

use super::FetchTicket;
use crate::api::DogService;
use crate::domain::{Breed, Loadable};
use crate::error::FetchError;
use crate::grid::{IdGenerator, PlaceholderId};

/// Placeholder rows shown while the breed list loads.
pub const BREED_PLACEHOLDER_ROWS: usize = 10;

/// One renderable row of the breed list.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum BreedRow {
    Placeholder(PlaceholderId),
    Item(Breed),
    /// The fetch failed; carries the message shown next to the retry action.
    Error(String),
}

#[derive(Debug, Default)]
pub struct BreedListSession {
    state: Loadable<Vec<Breed>>,
    generation: u64,
}

impl BreedListSession {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn state(&self) -> &Loadable<Vec<Breed>> {
        &self.state
    }

    #[must_use]
    pub fn is_current(&self, ticket: FetchTicket) -> bool {
        ticket.generation == self.generation
    }

    /// Resets the list to loading and invalidates earlier tickets.
    pub fn begin_fetch(&mut self) -> FetchTicket {
        self.generation += 1;
        self.state = Loadable::Loading;
        FetchTicket {
            generation: self.generation,
        }
    }

    /// Applies the breed list fetched for `ticket`; stale results return `false`.
    pub fn finish_fetch(&mut self, ticket: FetchTicket, result: Result<Vec<Breed>, FetchError>) -> bool {
        if !self.is_current(ticket) {
            tracing::warn!(
                ticket = ticket.generation,
                current = self.generation,
                "discarding stale breed list"
            );
            return false;
        }
        self.state = Loadable::from(result);
        true
    }

    /// Abandons the fetch in flight.
    pub fn cancel(&mut self) {
        self.generation += 1;
    }

    #[must_use]
    pub fn row_count(&self) -> usize {
        match &self.state {
            Loadable::Loading => BREED_PLACEHOLDER_ROWS,
            Loadable::Loaded(breeds) => breeds.len(),
            Loadable::Failed(_) => 1,
        }
    }

    pub fn rows(&self, ids: &mut impl IdGenerator) -> Vec<BreedRow> {
        match &self.state {
            Loadable::Loading => (0..BREED_PLACEHOLDER_ROWS)
                .map(|_| BreedRow::Placeholder(ids.next_id()))
                .collect(),
            Loadable::Loaded(breeds) => breeds.iter().cloned().map(BreedRow::Item).collect(),
            Loadable::Failed(err) => vec![BreedRow::Error(err.message.clone())],
        }
    }

    /// The breed behind `row`, only once the list is loaded.
    #[must_use]
    pub fn breed_at(&self, row: usize) -> Option<&Breed> {
        self.state.loaded()?.get(row)
    }

    /// Rows can be selected only when they are breeds.
    #[must_use]
    pub fn allows_selection(&self) -> bool {
        matches!(self.state, Loadable::Loaded(_))
    }

    /// Fetches the breed list and applies it. Also serves as the retry action.
    pub async fn refresh(&mut self, service: &impl DogService) -> bool {
        let ticket = self.begin_fetch();
        let result = service.fetch_breed_list().await;
        self.finish_fetch(ticket, result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::SequentialIds;
    use reqwest::Url;
    use uuid::Uuid;

    struct StaticBreeds(Result<Vec<Breed>, FetchError>);

    impl DogService for StaticBreeds {
        async fn fetch_breed_list(&self) -> Result<Vec<Breed>, FetchError> {
            self.0.clone()
        }

        async fn fetch_photos(&self, _breed_identifier: &str) -> Result<Vec<Url>, FetchError> {
            Err(FetchError::generic())
        }
    }

    fn breeds() -> Vec<Breed> {
        vec![Breed::main("akita"), Breed::sub("bulldog", "french")]
    }

    #[test]
    fn loading_shows_ten_placeholders() {
        let session = BreedListSession::new();
        let rows = session.rows(&mut SequentialIds::default());

        assert_eq!(session.row_count(), BREED_PLACEHOLDER_ROWS);
        assert_eq!(rows.len(), BREED_PLACEHOLDER_ROWS);
        assert_eq!(rows[0], BreedRow::Placeholder(PlaceholderId(Uuid::from_u128(0))));
        assert_eq!(rows[9], BreedRow::Placeholder(PlaceholderId(Uuid::from_u128(9))));
        assert!(!session.allows_selection());
        assert!(session.breed_at(0).is_none());
    }

    #[test]
    fn loaded_shows_one_row_per_breed() {
        let mut session = BreedListSession::new();
        let ticket = session.begin_fetch();
        assert!(session.finish_fetch(ticket, Ok(breeds())));

        let rows = session.rows(&mut SequentialIds::default());
        assert_eq!(rows, breeds().into_iter().map(BreedRow::Item).collect::<Vec<_>>());
        assert!(session.allows_selection());
        assert_eq!(session.breed_at(1).map(|b| b.name.as_str()), Some("French Bulldog"));
        assert!(session.breed_at(2).is_none());
    }

    #[test]
    fn failure_shows_single_error_row() {
        let mut session = BreedListSession::new();
        let ticket = session.begin_fetch();
        session.finish_fetch(ticket, Err(FetchError::generic()));

        assert_eq!(session.row_count(), 1);
        assert_eq!(
            session.rows(&mut SequentialIds::default()),
            vec![BreedRow::Error(FetchError::generic().message)]
        );
        assert!(!session.allows_selection());
    }

    #[test]
    fn stale_breed_list_is_discarded() {
        let mut session = BreedListSession::new();
        let old = session.begin_fetch();
        let new = session.begin_fetch();

        assert!(session.finish_fetch(new, Err(FetchError::generic())));
        assert!(!session.finish_fetch(old, Ok(breeds())));
        assert!(session.state().error().is_some());
    }

    #[test]
    fn cancel_discards_pending_fetch() {
        let mut session = BreedListSession::new();
        let ticket = session.begin_fetch();
        session.cancel();
        assert!(!session.finish_fetch(ticket, Ok(breeds())));
        assert!(session.state().is_loading());
    }

    #[tokio::test]
    async fn retry_after_failure_loads_breeds() {
        let mut session = BreedListSession::new();
        session.refresh(&StaticBreeds(Err(FetchError::generic()))).await;
        assert_eq!(session.row_count(), 1);

        assert!(session.refresh(&StaticBreeds(Ok(breeds()))).await);
        assert_eq!(session.state().loaded(), Some(&breeds()));
    }
}
