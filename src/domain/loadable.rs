// SPDX-License-Identifier: MPL-2.0
//! Exclusive loading states of a screen's content.

use crate::error::FetchError;

#[derive(Debug, Clone, PartialEq, Default)]
pub enum Loadable<T> {
    #[default]
    Loading,
    Loaded(T),
    Failed(FetchError),
}

impl<T> Loadable<T> {
    #[must_use]
    pub fn is_loading(&self) -> bool {
        matches!(self, Loadable::Loading)
    }

    pub fn loaded(&self) -> Option<&T> {
        match self {
            Loadable::Loaded(content) => Some(content),
            _ => None,
        }
    }

    pub fn loaded_mut(&mut self) -> Option<&mut T> {
        match self {
            Loadable::Loaded(content) => Some(content),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&FetchError> {
        match self {
            Loadable::Failed(err) => Some(err),
            _ => None,
        }
    }
}

impl<T> From<Result<T, FetchError>> for Loadable<T> {
    fn from(result: Result<T, FetchError>) -> Self {
        match result {
            Ok(content) => Loadable::Loaded(content),
            Err(err) => Loadable::Failed(err),
        }
    }
}
