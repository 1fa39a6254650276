// SPDX-License-Identifier: MPL-2.0
//! `tikdog` fetches dog breed photos from the Dog CEO API and arranges them
//! in a fixed ten-tile grid.
//!
//! The grid engine ([`grid`]) is pure and synchronous. Network access sits
//! behind the [`api::DogService`] and [`api::ImageSource`] traits, and a
//! [`session::PhotoSession`] ties the two together with a stale-result guard.

#![doc(html_root_url = "https://docs.rs/tikdog/0.1.0")]

pub mod api;
pub mod app;
pub mod config;
pub mod domain;
pub mod error;
pub mod grid;
pub mod media;
pub mod session;
