//! # hue_bridge_rs
//!
//! An async Rust library for discovering and controlling Philips Hue bridges.
//!
//! The crate covers the three steps needed to talk to a bridge on the local
//! network: finding it, pairing with it, and reading or changing the state of
//! its lights.
//!
//! ## Quick Start
//!
//! ```ignore
//! use std::time::Duration;
//! use hue_bridge_rs::{BridgePairer, Config, LightRepository, discover_bridges};
//!
//! async fn lights_off() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::default();
//!
//!     // Find bridges announcing `_hue._tcp` over mDNS
//!     let bridges = discover_bridges(config.discovery_timeout).await?;
//!     let bridge = bridges.first().ok_or("no bridge found")?;
//!
//!     // Press the link button on the bridge first!
//!     let token = BridgePairer::new(&config)?.connect(bridge).await?;
//!
//!     let repo = LightRepository::new(&config)?;
//!     for mut light in repo.fetch_all(bridge, &token).await? {
//!         repo.set_on(&mut light, false).await?;
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Features
//!
//! - **Discovery**: Find bridges with [`BridgeDiscoverer`] over mDNS, or with
//!   [`CloudDiscoverer`] where multicast is blocked
//! - **Pairing**: Obtain a [`PairingToken`] with [`BridgePairer`]
//! - **Lights**: List lights and push state with [`LightRepository`]
//! - **Validated values**: [`Brightness`], [`Hue`], [`Saturation`], [`Mired`]
//!   and [`CieCoord`] reject values the bridge would refuse
//!
//! ## Testing
//!
//! [`BridgeDiscoverer`] is generic over [`ServiceBrowser`], so discovery can be
//! driven by a fake browser. The HTTP clients accept any [`BridgeAddress`],
//! including a local mock server's `host:port`.
//!
//! ## Limitations
//!
//! Nothing is retried. Duplicate mDNS announcements of one bridge are
//! reported as separate entries, and only the first IPv4 address of an
//! announcement is used.

mod bridge;
mod cloud;
mod config;
mod discovery;
mod errors;
mod light;
mod mdns;
mod pairing;
mod repository;
mod response;
mod state;
mod types;
mod update;

// Re-export public API
pub use bridge::{Bridge, BridgeAddress, PairingToken};
pub use cloud::CloudDiscoverer;
pub use config::Config;
pub use discovery::{
    BridgeDiscoverer, SERVICE_DOMAIN, SERVICE_TYPE, ServiceBrowser, ServiceEntry,
    discover_bridges, parse_service_text,
};
pub use errors::{ApiError, BoxError, Error};
pub use light::{
    Capabilities, ControlCapabilities, Light, LightConfig, StreamingCapabilities, SwUpdate,
    TemperatureRange,
};
pub use mdns::MdnsBrowser;
pub use pairing::BridgePairer;
pub use repository::LightRepository;
pub use state::LightState;
pub use types::{
    Alert, Brightness, CieCoord, ColorMode, Effect, Hue, Mired, Saturation, TransitionTime,
};
pub use update::StateUpdate;
