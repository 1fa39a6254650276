// SPDX-License-Identifier: MPL-2.0
//! Breed descriptors.

/// A breed (or sub-breed) as shown in the breed list.
///
/// `identifier` is the API path segment: `"akita"` for a main breed,
/// `"australian/shepherd"` for a sub-breed. `name` is derived from it.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Breed {
    pub identifier: String,
    pub name: String,
}

impl Breed {
    /// A main breed with no sub-breeds.
    ///
    /// ```
    /// use tikdog::domain::Breed;
    ///
    /// let breed = Breed::main("akita");
    /// assert_eq!(breed.name, "Akita");
    /// ```
    #[must_use]
    pub fn main(identifier: &str) -> Self {
        Self {
            identifier: identifier.to_string(),
            name: capitalize_words(identifier),
        }
    }

    /// A sub-breed of `main`, named `"<Sub> <Main>"`.
    ///
    /// ```
    /// use tikdog::domain::Breed;
    ///
    /// let breed = Breed::sub("australian", "shepherd");
    /// assert_eq!(breed.identifier, "australian/shepherd");
    /// assert_eq!(breed.name, "Shepherd Australian");
    /// ```
    #[must_use]
    pub fn sub(main: &str, sub: &str) -> Self {
        Self {
            identifier: format!("{main}/{sub}"),
            name: format!("{} {}", capitalize_words(sub), capitalize_words(main)),
        }
    }
}

/// Upper-cases the first letter of every whitespace-separated word and
/// lower-cases the rest.
pub fn capitalize_words(s: &str) -> String {
    s.split_whitespace()
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first
                    .to_uppercase()
                    .chain(chars.flat_map(char::to_lowercase))
                    .collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<String>>()
        .join(" ")
}
