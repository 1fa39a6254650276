// SPDX-License-Identifier: MPL-2.0
//! Error taxonomy for the crate.
//!
//! - [`DecodeError`]: a payload had the wrong shape (recoverable).
//! - [`EmptyInputError`]: a grid was built from an empty URL list.
//! - [`FetchError`]: network or API failure carrying a user-displayable message.
//!
//! Contract violations such as asking a grid section for a row beyond its
//! capacity are not represented here: they panic.

use serde::Deserialize;

/// Message shown for any failure that has no better description.
pub const GENERIC_FETCH_MESSAGE: &str = "Something went wrong. Try again.";

#[derive(Debug, Clone, thiserror::Error)]
pub enum Error {
    #[error("I/O Error: {0}")]
    Io(String),
    #[error("Config Error: {0}")]
    Config(String),
    #[error("Decode Error: {0}")]
    Decode(#[from] DecodeError),
    #[error("Fetch Error: {0}")]
    Fetch(#[from] FetchError),
}

/// A payload could not be turned into domain values.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DecodeError {
    /// The photo list was missing or contained no URLs.
    #[error("expected at least one URL")]
    NoUrls,
    /// A URL string did not parse.
    #[error("invalid URL {url:?}: {reason}")]
    InvalidUrl { url: String, reason: String },
    /// The JSON itself was malformed or had an unexpected shape.
    #[error("malformed payload: {0}")]
    Malformed(String),
}

impl From<serde_json::Error> for DecodeError {
    fn from(err: serde_json::Error) -> Self {
        DecodeError::Malformed(err.to_string())
    }
}

/// A grid page cannot be laid out from zero photos.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("cannot build a photo page from an empty URL list")]
pub struct EmptyInputError;

impl From<EmptyInputError> for DecodeError {
    fn from(_: EmptyInputError) -> Self {
        DecodeError::NoUrls
    }
}

/// Failure reported by the breed/photo API or the transport below it.
///
/// The shape matches the API's own error body (`{"message": ..., "code": ...}`)
/// so 4xx/5xx responses deserialize straight into it.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, thiserror::Error)]
#[error("{message}")]
pub struct FetchError {
    pub message: String,
    #[serde(default)]
    pub code: Option<i64>,
}

impl FetchError {
    pub fn new(message: impl Into<String>, code: Option<i64>) -> Self {
        Self {
            message: message.into(),
            code,
        }
    }

    /// The error used when no response (or no usable response) arrived.
    #[must_use]
    pub fn generic() -> Self {
        Self::new(GENERIC_FETCH_MESSAGE, Some(0))
    }

    /// Generic message, but keeping the HTTP status that caused it.
    #[must_use]
    pub fn with_status(status: u16) -> Self {
        Self::new(GENERIC_FETCH_MESSAGE, Some(i64::from(status)))
    }
}

impl From<DecodeError> for FetchError {
    fn from(err: DecodeError) -> Self {
        FetchError::new(err.to_string(), Some(0))
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Io(err.to_string())
    }
}

impl From<toml::de::Error> for Error {
    fn from(err: toml::de::Error) -> Self {
        Error::Config(err.to_string())
    }
}

impl From<toml::ser::Error> for Error {
    fn from(err: toml::ser::Error) -> Self {
        Error::Config(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_formats_io_error() {
        let err = Error::Io("disk failure".to_string());
        assert_eq!(format!("{}", err), "I/O Error: disk failure");
    }

    #[test]
    fn from_io_error_produces_io_variant() {
        let io_error = std::io::Error::other("boom");
        let err: Error = io_error.into();
        match err {
            Error::Io(message) => assert!(message.contains("boom")),
            _ => panic!("expected Io variant"),
        }
    }

    #[test]
    fn no_urls_message_matches_api_contract() {
        assert_eq!(DecodeError::NoUrls.to_string(), "expected at least one URL");
    }

    #[test]
    fn empty_input_converts_to_no_urls() {
        let err: DecodeError = EmptyInputError.into();
        assert_eq!(err, DecodeError::NoUrls);
    }

    #[test]
    fn fetch_error_deserializes_api_body() {
        let body = r#"{"status":"error","message":"Breed not found (master breed does not exist)","code":404}"#;
        let err: FetchError = serde_json::from_str(body).expect("valid error body");
        assert_eq!(err.code, Some(404));
        assert!(err.message.starts_with("Breed not found"));
    }

    #[test]
    fn fetch_error_code_is_optional() {
        let err: FetchError = serde_json::from_str(r#"{"message":"nope"}"#).expect("valid body");
        assert_eq!(err.code, None);
        assert_eq!(err.to_string(), "nope");
    }

    #[test]
    fn generic_fetch_error_has_code_zero() {
        let err = FetchError::generic();
        assert_eq!(err.message, GENERIC_FETCH_MESSAGE);
        assert_eq!(err.code, Some(0));
    }
}
