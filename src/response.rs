//! Bridge response envelopes.
//!
//! Most bridge endpoints answer with a JSON array even when a single result is
//! expected. Every element is either `{"success": ...}` or `{"error": ...}`.

use serde::Deserialize;
use serde::de::DeserializeOwned;

use crate::errors::{ApiError, Error};

type Result<T> = std::result::Result<T, Error>;

/// A single element of a bridge response array.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "lowercase")]
pub(crate) enum ApiResponse<T> {
    Success(T),
    Error(ApiError),
}

/// Decode `body` as a response array holding exactly `expected` elements.
///
/// The first embedded error object is returned as [`Error::Api`].
pub(crate) fn decode_envelope<T>(body: &str, expected: usize) -> Result<Vec<T>>
where
    T: DeserializeOwned,
{
    let items: Vec<ApiResponse<T>> = serde_json::from_str(body)?;
    if items.len() != expected {
        return Err(Error::shape(expected, items.len()));
    }

    items
        .into_iter()
        .map(|item| match item {
            ApiResponse::Success(value) => Ok(value),
            ApiResponse::Error(err) => Err(Error::Api(err)),
        })
        .collect()
}

/// Decode `body` as a response array holding exactly one element.
pub(crate) fn decode_single<T>(body: &str) -> Result<T>
where
    T: DeserializeOwned,
{
    let mut items = decode_envelope(body, 1)?;
    items.pop().ok_or_else(|| Error::shape(1, 0))
}

/// Look for a bridge error array in a body that was expected to be an object.
///
/// Endpoints such as `/lights` answer with an object on success but fall back
/// to the error array when the token is not authorized.
pub(crate) fn embedded_error(body: &str) -> Option<ApiError> {
    let items: Vec<ApiResponse<serde_json::Value>> = serde_json::from_str(body).ok()?;
    items.into_iter().find_map(|item| match item {
        ApiResponse::Error(err) => Some(err),
        ApiResponse::Success(_) => None,
    })
}
