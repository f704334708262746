//! Bridge discovery via multicast DNS.

use std::collections::HashMap;
use std::future::Future;
use std::net::Ipv4Addr;
use std::time::Duration;

use log::{debug, info, warn};
use tokio::sync::mpsc;
use tokio::time::{self, Instant};

use crate::bridge::Bridge;
use crate::errors::Error;
use crate::mdns::MdnsBrowser;

type Result<T> = std::result::Result<T, Error>;

/// Service type advertised by Hue bridges.
pub const SERVICE_TYPE: &str = "_hue._tcp";
/// Domain browsed for [`SERVICE_TYPE`].
pub const SERVICE_DOMAIN: &str = "local";

/// A resolved service announcement.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ServiceEntry {
    /// Full instance name, e.g. `Philips Hue - 100491._hue._tcp.local.`
    pub instance: String,
    /// Raw TXT records
    pub text: Vec<String>,
    /// Advertised IPv4 addresses
    pub addr_ipv4: Vec<Ipv4Addr>,
}

/// Source of mDNS service announcements.
///
/// [`MdnsBrowser`] is the production implementation. Tests substitute their own.
pub trait ServiceBrowser: Send + Sync {
    /// Browse for `service` in `domain`, sending every resolved entry to `entries`.
    ///
    /// Must return an error only when the session cannot be started, and stop
    /// producing entries once `deadline` has passed.
    fn browse(
        &self,
        service: &str,
        domain: &str,
        deadline: Instant,
        entries: mpsc::Sender<ServiceEntry>,
    ) -> impl Future<Output = Result<()>> + Send;
}

/// Parse TXT records into key/value pairs.
///
/// Records are normally one `key=value` pair each. Some bridge firmware sends
/// the whole set as one bracketed blob (`[bridgeid=x modelid=y]`), which is
/// split on whitespace. Records without `=` are ignored.
///
/// # Examples
///
/// ```
/// use hue_bridge_rs::parse_service_text;
///
/// let data = parse_service_text(&["[bridgeid=001788fffe100491 modelid=BSB002]".to_string()]);
/// assert_eq!(data["bridgeid"], "001788fffe100491");
/// assert_eq!(data["modelid"], "BSB002");
/// ```
pub fn parse_service_text(text: &[String]) -> HashMap<String, String> {
    text.iter()
        .flat_map(|record| {
            let record = record.trim();
            let record = record
                .strip_prefix('[')
                .and_then(|r| r.strip_suffix(']'))
                .unwrap_or(record);
            record.split_whitespace()
        })
        .filter_map(|pair| pair.split_once('='))
        .map(|(key, value)| (key.to_string(), value.to_string()))
        .collect()
}

impl Bridge {
    /// Build a bridge from a service entry.
    ///
    /// The first advertised IPv4 address is used. Returns `None` if the entry
    /// has no IPv4 address.
    pub fn from_service_entry(entry: &ServiceEntry) -> Option<Self> {
        let ip = *entry.addr_ipv4.first()?;
        let mut data = parse_service_text(&entry.text);
        let id = data.remove("bridgeid").unwrap_or_default();
        let model = data.remove("modelid").unwrap_or_default();
        Some(Bridge::new(&id, &model, ip))
    }
}

/// Runs timed mDNS browse sessions and collects the bridges found.
pub struct BridgeDiscoverer<B> {
    browser: B,
}

impl<B: ServiceBrowser> BridgeDiscoverer<B> {
    // Announcements buffered between the browser and the listener.
    const QUEUE_DEPTH: usize = 32;

    pub fn new(browser: B) -> Self {
        BridgeDiscoverer { browser }
    }

    pub fn browser(&self) -> &B {
        &self.browser
    }

    /// Browse for bridges until `timeout` elapses.
    ///
    /// Bridges are returned in the order their announcements arrived. Repeated
    /// announcements of the same bridge are all kept. Finding nothing is not an
    /// error; only a failure to start browsing is.
    pub async fn discover(&self, timeout: Duration) -> Result<Vec<Bridge>> {
        info!("Scanning network for Hue bridges...");

        let deadline = Instant::now() + timeout;
        let (tx, rx) = mpsc::channel(Self::QUEUE_DEPTH);
        let listener = tokio::spawn(collect_bridges(rx, deadline));

        if let Err(e) = self
            .browser
            .browse(SERVICE_TYPE, SERVICE_DOMAIN, deadline, tx)
            .await
        {
            listener.abort();
            return Err(e);
        }

        let bridges = listener.await?;
        debug!("Discovery finished with {} bridge(s)", bridges.len());
        Ok(bridges)
    }
}

/// Drain `entries` until `deadline`, keeping arrival order.
async fn collect_bridges(mut entries: mpsc::Receiver<ServiceEntry>, deadline: Instant) -> Vec<Bridge> {
    let mut bridges = Vec::new();
    let expired = time::sleep_until(deadline);
    tokio::pin!(expired);

    loop {
        tokio::select! {
            _ = &mut expired => {
                // Entries already queued arrived before the deadline.
                while let Ok(entry) = entries.try_recv() {
                    accept_entry(&mut bridges, &entry);
                }
                break;
            }
            entry = entries.recv() => match entry {
                Some(entry) => accept_entry(&mut bridges, &entry),
                // Browser is done early; the deadline still bounds the session.
                None => {
                    expired.as_mut().await;
                    break;
                }
            },
        }
    }

    bridges
}

fn accept_entry(bridges: &mut Vec<Bridge>, entry: &ServiceEntry) {
    match Bridge::from_service_entry(entry) {
        Some(bridge) => {
            info!("Found Hue bridge at {}", bridge);
            bridges.push(bridge);
        }
        None => warn!("Ignoring {:?}: no IPv4 address advertised", entry.instance),
    }
}

/// Discover Hue bridges on the local network using mDNS.
///
/// # Examples
///
/// ```ignore
/// use std::time::Duration;
/// use hue_bridge_rs::discover_bridges;
///
/// let bridges = discover_bridges(Duration::from_secs(5)).await?;
/// for bridge in bridges {
///     println!("  {}", bridge);
/// }
/// ```
pub async fn discover_bridges(timeout: Duration) -> Result<Vec<Bridge>> {
    let browser = MdnsBrowser::new()?;
    BridgeDiscoverer::new(browser).discover(timeout).await
}
