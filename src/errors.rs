use std::fmt;

use serde::{Deserialize, Serialize};

/// Boxed error produced by a [`crate::ServiceBrowser`] implementation.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// All error types that can occur when talking to a Hue bridge.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The HTTP request could not be completed.
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The response body did not match the expected JSON shape.
    #[error("failed to decode response: {0}")]
    Decode(#[from] serde_json::Error),

    /// The bridge wrapped its answer in an array of unexpected length.
    #[error("unexpected response shape; expected {expected} element(s), got {actual}")]
    UnexpectedResponseShape { expected: usize, actual: usize },

    /// The bridge refused to hand out a token (usually the link button was not pressed).
    #[error("pairing rejected by bridge: {0}")]
    PairingRejected(ApiError),

    /// The bridge reported an error for a request.
    #[error("bridge returned an error: {0}")]
    Api(ApiError),

    /// The mDNS subsystem could not start a browse session.
    #[error("failed to start mdns browse: {0}")]
    DiscoveryBrowse(#[source] BoxError),

    /// The discovery listener task did not complete.
    #[error("discovery listener failed: {0}")]
    DiscoveryListener(#[from] tokio::task::JoinError),

    /// The local hostname could not be determined.
    #[error("failed to look up local hostname: {0}")]
    Hostname(std::io::Error),

    /// A value is outside the range the bridge accepts.
    #[error("{kind} out of range: {value}")]
    OutOfRange { kind: &'static str, value: String },

    /// Attempted to send a [`crate::StateUpdate`] with no fields set.
    #[error("invalid state update; no fields set")]
    EmptyUpdate,
}

impl Error {
    /// Create a new browse error from any underlying failure
    pub fn browse<E>(err: E) -> Self
    where
        E: Into<BoxError>,
    {
        Error::DiscoveryBrowse(err.into())
    }

    /// Create a new range error for a value of type `kind`
    pub fn out_of_range(kind: &'static str, value: impl fmt::Display) -> Self {
        Error::OutOfRange {
            kind,
            value: value.to_string(),
        }
    }

    /// Create a new response shape error
    pub fn shape(expected: usize, actual: usize) -> Self {
        Error::UnexpectedResponseShape { expected, actual }
    }
}

/// Error object embedded in a bridge response.
///
/// The bridge reports failures as `{"error": {"type": 101, "address": "", "description": "link button not pressed"}}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiError {
    #[serde(rename = "type")]
    pub kind: u16,
    pub address: String,
    pub description: String,
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "type `{}`, address `{}`, description `{}`",
            self.kind, self.address, self.description
        )
    }
}

/// Hacky implementation of PartialEq for testing
#[cfg(test)]
impl PartialEq for Error {
    fn eq(&self, other: &Self) -> bool {
        self.to_string() == other.to_string()
    }
}
