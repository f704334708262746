//! Bridge discovery through the Hue N-UPnP endpoint.

use std::net::IpAddr;

use log::{debug, warn};
use serde::Deserialize;

use crate::bridge::Bridge;
use crate::config::Config;
use crate::errors::Error;

type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Deserialize)]
struct CloudBridge {
    id: String,
    #[serde(rename = "internalipaddress")]
    ip: IpAddr,
}

/// Looks up bridges registered from the caller's public IP.
///
/// Useful where multicast is blocked. The endpoint only knows bridges that
/// recently phoned home, and never reports a model id.
#[derive(Debug, Clone)]
pub struct CloudDiscoverer {
    http: reqwest::Client,
    endpoint: String,
}

impl CloudDiscoverer {
    pub const ENDPOINT: &'static str = "https://discovery.meethue.com/";

    pub fn new(config: &Config) -> Result<Self> {
        Ok(CloudDiscoverer {
            http: config.http_client()?,
            endpoint: String::from(Self::ENDPOINT),
        })
    }

    /// Query another endpoint with the same response format.
    pub fn with_endpoint(mut self, endpoint: &str) -> Self {
        self.endpoint = String::from(endpoint);
        self
    }

    pub async fn discover(&self) -> Result<Vec<Bridge>> {
        debug!("GET {}", self.endpoint);
        let body = self
            .http
            .get(&self.endpoint)
            .send()
            .await?
            .error_for_status()?
            .text()
            .await?;

        let entries: Vec<CloudBridge> = serde_json::from_str(&body)?;
        Ok(entries
            .into_iter()
            .filter_map(|entry| match entry.ip {
                IpAddr::V4(ip) => Some(Bridge::new(&entry.id, "", ip)),
                IpAddr::V6(ip) => {
                    warn!("Ignoring bridge {} with IPv6 address {}", entry.id, ip);
                    None
                }
            })
            .collect())
    }
}
