// SPDX-License-Identifier: MPL-2.0
//! Domain types shared by the grid, the API client and the session.
//!
//! # Modules
//!
//! - [`breed`]: [`Breed`] descriptors and name derivation
//! - [`loadable`]: [`Loadable`], the exclusive loading/loaded/failed states
//! - [`photo`]: [`PhotoDescriptor`], a URL plus its resolved image

pub mod breed;
pub mod loadable;
pub mod photo;

pub use breed::Breed;
pub use loadable::Loadable;
pub use photo::PhotoDescriptor;
