//! Client configuration.

use std::time::Duration;

use crate::errors::Error;

type Result<T> = std::result::Result<T, Error>;

/// Settings shared by the discovery, pairing and light clients.
///
/// # Example
///
/// ```
/// use std::time::Duration;
/// use hue_bridge_rs::Config;
///
/// let config = Config::default()
///     .with_http_timeout(Duration::from_secs(3))
///     .with_device_name("kitchen-pi");
/// assert_eq!(config.device_type().unwrap(), "hue-bridge-rs#kitchen-pi");
/// ```
#[derive(Debug, Clone)]
pub struct Config {
    /// Timeout applied to every HTTP request
    pub http_timeout: Duration,
    /// How long an mDNS browse session runs
    pub discovery_timeout: Duration,
    /// Application part of the pairing device type
    pub app_name: String,
    /// Device part of the pairing device type; the local hostname when unset
    pub device_name: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            http_timeout: Self::HTTP_TIMEOUT,
            discovery_timeout: Self::DISCOVERY_TIMEOUT,
            app_name: String::from(Self::APP_NAME),
            device_name: None,
        }
    }
}

impl Config {
    const HTTP_TIMEOUT: Duration = Duration::from_secs(10);
    const DISCOVERY_TIMEOUT: Duration = Duration::from_secs(5);
    const APP_NAME: &'static str = "hue-bridge-rs";

    // Field limits enforced by the bridge on `devicetype`.
    const APP_NAME_MAX: usize = 20;
    const DEVICE_NAME_MAX: usize = 19;

    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_http_timeout(mut self, timeout: Duration) -> Self {
        self.http_timeout = timeout;
        self
    }

    pub fn with_discovery_timeout(mut self, timeout: Duration) -> Self {
        self.discovery_timeout = timeout;
        self
    }

    pub fn with_app_name(mut self, name: &str) -> Self {
        self.app_name = String::from(name);
        self
    }

    pub fn with_device_name(mut self, name: &str) -> Self {
        self.device_name = Some(String::from(name));
        self
    }

    /// Build the `<app>#<device>` string sent when pairing.
    ///
    /// Falls back to the local hostname when no device name is configured.
    pub fn device_type(&self) -> Result<String> {
        let device = match &self.device_name {
            Some(name) => name.clone(),
            None => hostname::get()
                .map_err(Error::Hostname)?
                .to_string_lossy()
                .into_owned(),
        };

        Ok(format!(
            "{}#{}",
            truncate(&self.app_name, Self::APP_NAME_MAX),
            truncate(&device, Self::DEVICE_NAME_MAX)
        ))
    }

    /// Build an HTTP client honouring [`Config::http_timeout`].
    pub fn http_client(&self) -> Result<reqwest::Client> {
        let client = reqwest::Client::builder()
            .timeout(self.http_timeout)
            .build()?;
        Ok(client)
    }
}

fn truncate(s: &str, max_chars: usize) -> &str {
    match s.char_indices().nth(max_chars) {
        Some((idx, _)) => &s[..idx],
        None => s,
    }
}
