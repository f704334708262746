//! Pairing with a bridge to obtain an API token.

use log::debug;
use serde::{Deserialize, Serialize};

use crate::bridge::{BridgeAddress, PairingToken};
use crate::config::Config;
use crate::errors::Error;
use crate::response::decode_single;

type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Serialize)]
struct PairingRequest<'a> {
    devicetype: &'a str,
}

#[derive(Debug, Deserialize)]
struct PairingSuccess {
    username: String,
}

/// Performs the link-button pairing handshake.
///
/// The bridge only hands out a token within 30 seconds of its link button
/// being pressed. Otherwise it answers with error type 101, surfaced as
/// [`Error::PairingRejected`].
///
/// # Example
///
/// ```ignore
/// use std::net::Ipv4Addr;
/// use hue_bridge_rs::{BridgePairer, Config};
///
/// let pairer = BridgePairer::new(&Config::default())?;
/// let token = pairer.connect(Ipv4Addr::new(192, 168, 1, 2)).await?;
/// println!("{}", token.as_str());
/// ```
#[derive(Debug, Clone)]
pub struct BridgePairer {
    http: reqwest::Client,
    device_type: String,
}

impl BridgePairer {
    /// Create a pairer from a configuration.
    ///
    /// Resolves the device type up front, so a failing hostname lookup is
    /// reported here.
    pub fn new(config: &Config) -> Result<Self> {
        Ok(BridgePairer {
            http: config.http_client()?,
            device_type: config.device_type()?,
        })
    }

    /// Create a pairer sharing an existing HTTP client.
    pub fn with_client(http: reqwest::Client, device_type: &str) -> Self {
        BridgePairer {
            http,
            device_type: String::from(device_type),
        }
    }

    /// The `<app>#<device>` string sent to the bridge.
    pub fn device_type(&self) -> &str {
        &self.device_type
    }

    /// Ask the bridge at `address` for a new token.
    ///
    /// Every successful call creates a new whitelist entry on the bridge.
    pub async fn connect(&self, address: impl Into<BridgeAddress>) -> Result<PairingToken> {
        let url = address.into().url("/api");
        debug!("Pairing with {} as {}", url, self.device_type);

        let body = self
            .http
            .post(&url)
            .json(&PairingRequest {
                devicetype: &self.device_type,
            })
            .send()
            .await?
            .text()
            .await?;

        // The body carries the token; never log it.
        match decode_single::<PairingSuccess>(&body) {
            Ok(success) => {
                debug!("Paired with {}", url);
                Ok(PairingToken::from(success.username))
            }
            Err(Error::Api(err)) => Err(Error::PairingRejected(err)),
            Err(e) => Err(e),
        }
    }
}
