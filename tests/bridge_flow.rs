//! Discover, pair and switch a light against a fake network.

use std::net::{Ipv4Addr, SocketAddrV4};
use std::time::Duration;

use hue_bridge_rs::{
    BridgeAddress, BridgeDiscoverer, BridgePairer, Error, LightRepository, ServiceBrowser,
    ServiceEntry,
};
use mockito::{Matcher, Server};
use serde_json::json;
use tokio::sync::mpsc;
use tokio::time::Instant;

struct OneBridge;

impl ServiceBrowser for OneBridge {
    async fn browse(
        &self,
        _service: &str,
        _domain: &str,
        _deadline: Instant,
        entries: mpsc::Sender<ServiceEntry>,
    ) -> Result<(), Error> {
        entries
            .send(ServiceEntry {
                instance: String::from("Philips Hue - 100491._hue._tcp.local."),
                text: vec![
                    String::from("bridgeid=001788fffe100491"),
                    String::from("modelid=BSB002"),
                ],
                addr_ipv4: vec![Ipv4Addr::LOCALHOST],
            })
            .await
            .map_err(Error::browse)
    }
}

#[tokio::test]
async fn test_discover_pair_and_switch() {
    let bridges = BridgeDiscoverer::new(OneBridge)
        .discover(Duration::from_millis(200))
        .await
        .unwrap();
    assert_eq!(bridges.len(), 1);
    let bridge = &bridges[0];
    assert_eq!(bridge.id(), "001788fffe100491");
    assert_eq!(bridge.model(), "BSB002");

    let mut server = Server::new_async().await;
    let port = server
        .host_with_port()
        .parse::<SocketAddrV4>()
        .unwrap()
        .port();
    let address = BridgeAddress::new(bridge.ip(), port);

    server
        .mock("POST", "/api")
        .match_body(Matcher::PartialJson(json!({"devicetype": "hue-bridge-rs#flow"})))
        .with_body(r#"[{"success": {"username": "83b7780291a6ceffbe0bd049104df"}}]"#)
        .create_async()
        .await;
    server
        .mock("GET", "/api/83b7780291a6ceffbe0bd049104df/lights")
        .with_body(r#"{"3": {"state": {"on": false, "bri": 100, "reachable": true}, "name": "Desk", "type": "Dimmable light"}}"#)
        .create_async()
        .await;
    let put = server
        .mock("PUT", "/api/83b7780291a6ceffbe0bd049104df/lights/3/state")
        .match_body(Matcher::Json(json!({"on": true})))
        .with_body(r#"[{"success": {"/lights/3/state/on": true}}]"#)
        .create_async()
        .await;

    let http = reqwest::Client::new();
    let token = BridgePairer::with_client(http.clone(), "hue-bridge-rs#flow")
        .connect(address)
        .await
        .unwrap();

    let repo = LightRepository::with_client(http);
    let mut lights = repo.fetch_all(address, &token).await.unwrap();
    assert_eq!(lights.len(), 1);
    assert_eq!(lights[0].name(), "Desk");

    repo.set_on(&mut lights[0], true).await.unwrap();
    assert!(lights[0].state().on);
    put.assert_async().await;
}
