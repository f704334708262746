//! mDNS browsing backed by the `mdns-sd` daemon.

use std::net::IpAddr;

use log::debug;
use mdns_sd::{ServiceDaemon, ServiceEvent, ServiceInfo};
use tokio::sync::mpsc;
use tokio::time::{self, Instant};

use crate::discovery::{ServiceBrowser, ServiceEntry};
use crate::errors::Error;

type Result<T> = std::result::Result<T, Error>;

/// [`ServiceBrowser`] running on an `mdns-sd` service daemon.
///
/// The daemon thread is shut down when the browser is dropped.
pub struct MdnsBrowser {
    daemon: ServiceDaemon,
}

impl MdnsBrowser {
    /// Start a new mDNS daemon.
    pub fn new() -> Result<Self> {
        let daemon = ServiceDaemon::new().map_err(Error::browse)?;
        Ok(MdnsBrowser { daemon })
    }
}

impl ServiceBrowser for MdnsBrowser {
    async fn browse(
        &self,
        service: &str,
        domain: &str,
        deadline: Instant,
        entries: mpsc::Sender<ServiceEntry>,
    ) -> Result<()> {
        let service_type = format!("{}.{}.", service, domain);
        let events = self.daemon.browse(&service_type).map_err(Error::browse)?;
        debug!("Browsing for {}", service_type);

        while let Ok(Ok(event)) = time::timeout_at(deadline, events.recv_async()).await {
            match event {
                ServiceEvent::ServiceResolved(info) => {
                    if entries.send(ServiceEntry::from(&info)).await.is_err() {
                        break;
                    }
                }
                other => debug!("mdns event: {:?}", other),
            }
        }

        if let Err(e) = self.daemon.stop_browse(&service_type) {
            debug!("Failed to stop browsing {}: {}", service_type, e);
        }
        Ok(())
    }
}

impl Drop for MdnsBrowser {
    fn drop(&mut self) {
        if let Err(e) = self.daemon.shutdown() {
            debug!("Failed to shut down mdns daemon: {}", e);
        }
    }
}

impl From<&ServiceInfo> for ServiceEntry {
    fn from(info: &ServiceInfo) -> Self {
        ServiceEntry {
            instance: info.get_fullname().to_string(),
            text: info
                .get_properties()
                .iter()
                .map(|prop| format!("{}={}", prop.key(), prop.val_str()))
                .collect(),
            addr_ipv4: info
                .get_addresses()
                .iter()
                .filter_map(|addr| match addr {
                    IpAddr::V4(v4) => Some(*v4),
                    IpAddr::V6(_) => None,
                })
                .collect(),
        }
    }
}
