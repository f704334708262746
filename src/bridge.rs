//! Bridge descriptors, addresses and tokens.

use std::fmt;
use std::net::{Ipv4Addr, SocketAddrV4};

use serde::{Deserialize, Serialize};

/// A Hue bridge found on the local network.
///
/// Bridges are produced by discovery and never change afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bridge {
    id: String,
    #[serde(default)]
    model: String,
    #[serde(rename = "internalipaddress")]
    ip: Ipv4Addr,
}

impl Bridge {
    pub fn new(id: &str, model: &str, ip: Ipv4Addr) -> Self {
        Bridge {
            id: String::from(id),
            model: String::from(model),
            ip,
        }
    }

    /// Bridge identifier, as advertised in the `bridgeid` TXT record.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Model identifier, empty when the discovery source does not report it.
    pub fn model(&self) -> &str {
        &self.model
    }

    pub fn ip(&self) -> Ipv4Addr {
        self.ip
    }

    /// Address of the bridge's HTTP API.
    pub fn address(&self) -> BridgeAddress {
        BridgeAddress::from(self.ip)
    }
}

impl fmt::Display for Bridge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (ID: `{}` Model: `{}`)", self.ip, self.id, self.model)
    }
}

/// Socket address of a bridge's HTTP API.
///
/// Bridges listen on port 80; other ports are only useful against test servers.
///
/// # Examples
///
/// ```
/// use std::net::Ipv4Addr;
/// use hue_bridge_rs::BridgeAddress;
///
/// let addr = BridgeAddress::from(Ipv4Addr::new(192, 168, 1, 2));
/// assert_eq!(addr.to_string(), "192.168.1.2");
/// assert_eq!(addr.url("/api"), "http://192.168.1.2/api");
///
/// let addr: BridgeAddress = "127.0.0.1:8080".parse().unwrap();
/// assert_eq!(addr.url("/api"), "http://127.0.0.1:8080/api");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BridgeAddress(SocketAddrV4);

impl BridgeAddress {
    const HTTP_PORT: u16 = 80;

    pub fn new(ip: Ipv4Addr, port: u16) -> Self {
        BridgeAddress(SocketAddrV4::new(ip, port))
    }

    pub fn ip(&self) -> Ipv4Addr {
        *self.0.ip()
    }

    pub fn port(&self) -> u16 {
        self.0.port()
    }

    /// Build an `http://` URL for `path` on this bridge.
    pub fn url(&self, path: &str) -> String {
        format!("http://{}{}", self, path)
    }
}

impl fmt::Display for BridgeAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.port() == Self::HTTP_PORT {
            write!(f, "{}", self.ip())
        } else {
            write!(f, "{}", self.0)
        }
    }
}

impl From<Ipv4Addr> for BridgeAddress {
    fn from(ip: Ipv4Addr) -> Self {
        BridgeAddress::new(ip, Self::HTTP_PORT)
    }
}

impl From<SocketAddrV4> for BridgeAddress {
    fn from(addr: SocketAddrV4) -> Self {
        BridgeAddress(addr)
    }
}

impl From<&Bridge> for BridgeAddress {
    fn from(bridge: &Bridge) -> Self {
        bridge.address()
    }
}

impl std::str::FromStr for BridgeAddress {
    type Err = std::net::AddrParseError;

    /// Parse either `a.b.c.d` or `a.b.c.d:port`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.parse::<SocketAddrV4>() {
            Ok(addr) => Ok(BridgeAddress(addr)),
            Err(_) => s.parse::<Ipv4Addr>().map(BridgeAddress::from),
        }
    }
}

/// Credential handed out by a bridge after a successful pairing.
///
/// The value never shows up in `Debug` output.
#[derive(Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PairingToken(String);

impl PairingToken {
    pub fn new(token: &str) -> Self {
        PairingToken(String::from(token))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for PairingToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("PairingToken(..)")
    }
}

impl From<String> for PairingToken {
    fn from(token: String) -> Self {
        PairingToken(token)
    }
}

/// Non-owning route back to the bridge a light was fetched from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct BridgeLink {
    pub(crate) address: BridgeAddress,
    pub(crate) token: PairingToken,
}

impl BridgeLink {
    pub(crate) fn url(&self, path: &str) -> String {
        self.address
            .url(&format!("/api/{}{}", self.token.as_str(), path))
    }

    /// Same as [`BridgeLink::url`] with the token masked, for logging.
    pub(crate) fn redacted_url(&self, path: &str) -> String {
        self.address.url(&format!("/api/..{}", path))
    }
}
