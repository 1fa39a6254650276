// SPDX-License-Identifier: MPL-2.0
//! Breed list payload decoding.
//!
//! `breeds/list/all` answers `{"message": {"<breed>": ["<sub>", ...]}}`. A
//! breed without sub-breeds becomes one entry; a breed with sub-breeds becomes
//! one entry per sub-breed and no entry for itself.

use crate::domain::Breed;
use crate::error::DecodeError;
use serde::Deserialize;
use std::collections::BTreeMap;

#[derive(Debug, Deserialize)]
struct BreedListResponse {
    message: BTreeMap<String, Vec<String>>,
}

/// Decodes the breed list, sorted ascending by identifier.
pub fn decode_breed_list(json: &[u8]) -> Result<Vec<Breed>, DecodeError> {
    let response: BreedListResponse = serde_json::from_slice(json)?;

    let mut breeds: Vec<Breed> = response
        .message
        .iter()
        .flat_map(|(main, subs)| {
            if subs.is_empty() {
                vec![Breed::main(main)]
            } else {
                subs.iter().map(|sub| Breed::sub(main, sub)).collect()
            }
        })
        .collect();

    breeds.sort_by(|a, b| a.identifier.cmp(&b.identifier));
    Ok(breeds)
}
