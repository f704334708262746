//! Fetching and controlling lights.

use std::collections::HashMap;

use log::debug;
use serde_json::Value;

use crate::bridge::{BridgeAddress, BridgeLink, PairingToken};
use crate::config::Config;
use crate::errors::Error;
use crate::light::{Light, LightPayload};
use crate::response::{decode_envelope, embedded_error};
use crate::types::{Alert, Brightness, CieCoord, Effect, Hue, Mired, Saturation};
use crate::update::StateUpdate;

type Result<T> = std::result::Result<T, Error>;

/// Reads the light inventory of a bridge and pushes state changes.
///
/// Every call is a single HTTP request; nothing is retried.
///
/// # Example
///
/// ```ignore
/// use hue_bridge_rs::{Config, LightRepository, PairingToken};
///
/// let repo = LightRepository::new(&Config::default())?;
/// let token = PairingToken::new("my-token");
/// for mut light in repo.fetch_all(bridge.address(), &token).await? {
///     repo.set_on(&mut light, false).await?;
/// }
/// ```
#[derive(Debug, Clone)]
pub struct LightRepository {
    http: reqwest::Client,
}

impl LightRepository {
    pub fn new(config: &Config) -> Result<Self> {
        Ok(LightRepository {
            http: config.http_client()?,
        })
    }

    /// Create a repository sharing an existing HTTP client.
    pub fn with_client(http: reqwest::Client) -> Self {
        LightRepository { http }
    }

    /// Fetch every light known to the bridge, ordered by id.
    pub async fn fetch_all(
        &self,
        address: impl Into<BridgeAddress>,
        token: &PairingToken,
    ) -> Result<Vec<Light>> {
        let link = BridgeLink {
            address: address.into(),
            token: token.clone(),
        };
        let body = self.get(&link, "/lights").await?;

        let payloads: HashMap<String, LightPayload> = decode_object(&body)?;
        let mut lights: Vec<Light> = payloads
            .into_iter()
            .map(|(id, payload)| Light::new(id, payload, link.clone()))
            .collect();
        lights.sort_by(|a, b| compare_ids(a.id(), b.id()));
        Ok(lights)
    }

    /// Fetch a single light by id.
    pub async fn fetch(
        &self,
        address: impl Into<BridgeAddress>,
        token: &PairingToken,
        id: &str,
    ) -> Result<Light> {
        let link = BridgeLink {
            address: address.into(),
            token: token.clone(),
        };
        let body = self.get(&link, &format!("/lights/{}", id)).await?;
        let payload: LightPayload = decode_object(&body)?;
        Ok(Light::new(String::from(id), payload, link))
    }

    /// Re-read the state of `light` from its bridge.
    pub async fn refresh(&self, light: &mut Light) -> Result<()> {
        let fresh = self
            .fetch(light.link().address, &light.link().token, light.id())
            .await?;
        *light = fresh;
        Ok(())
    }

    /// Switch a light on or off.
    pub async fn set_on(&self, light: &mut Light, on: bool) -> Result<()> {
        self.apply(light, &StateUpdate::from(on)).await
    }

    pub async fn set_brightness(&self, light: &mut Light, brightness: Brightness) -> Result<()> {
        self.apply(light, &StateUpdate::from(brightness)).await
    }

    pub async fn set_hue(&self, light: &mut Light, hue: Hue) -> Result<()> {
        self.apply(light, &StateUpdate::from(hue)).await
    }

    pub async fn set_saturation(&self, light: &mut Light, saturation: Saturation) -> Result<()> {
        self.apply(light, &StateUpdate::from(saturation)).await
    }

    pub async fn set_xy(&self, light: &mut Light, coords: CieCoord) -> Result<()> {
        self.apply(light, &StateUpdate::from(coords)).await
    }

    pub async fn set_color_temperature(&self, light: &mut Light, temperature: Mired) -> Result<()> {
        self.apply(light, &StateUpdate::from(temperature)).await
    }

    pub async fn set_alert(&self, light: &mut Light, alert: Alert) -> Result<()> {
        self.apply(light, &StateUpdate::from(alert)).await
    }

    pub async fn set_effect(&self, light: &mut Light, effect: Effect) -> Result<()> {
        self.apply(light, &StateUpdate::from(effect)).await
    }

    /// Push `update` to the light and, once the bridge accepts it, write it
    /// into the local snapshot.
    ///
    /// The bridge must acknowledge each field with exactly one response entry.
    pub async fn apply(&self, light: &mut Light, update: &StateUpdate) -> Result<()> {
        if !update.is_valid() {
            return Err(Error::EmptyUpdate);
        }

        let path = format!("/lights/{}/state", light.id());
        let url = light.link().url(&path);
        debug!("PUT {} {:?}", light.link().redacted_url(&path), update);

        let body = self
            .http
            .put(&url)
            .json(update)
            .send()
            .await?
            .text()
            .await?;
        debug!("State response: {}", body);

        decode_envelope::<Value>(&body, update.len())?;
        light.state_mut().apply(update);
        Ok(())
    }

    async fn get(&self, link: &BridgeLink, path: &str) -> Result<String> {
        debug!("GET {}", link.redacted_url(path));
        let body = self.http.get(link.url(path)).send().await?.text().await?;
        Ok(body)
    }
}

/// Decode an object-shaped response, surfacing a bridge error array if present.
fn decode_object<T>(body: &str) -> Result<T>
where
    T: serde::de::DeserializeOwned,
{
    if let Some(err) = embedded_error(body) {
        return Err(Error::Api(err));
    }
    Ok(serde_json::from_str(body)?)
}

/// Numeric ids sort numerically, anything else after them lexically.
fn compare_ids(a: &str, b: &str) -> std::cmp::Ordering {
    match (a.parse::<u64>(), b.parse::<u64>()) {
        (Ok(x), Ok(y)) => x.cmp(&y),
        (Ok(_), Err(_)) => std::cmp::Ordering::Less,
        (Err(_), Ok(_)) => std::cmp::Ordering::Greater,
        (Err(_), Err(_)) => a.cmp(b),
    }
}

#[cfg(test)]
mod tests {
    use mockito::{Matcher, Server, ServerGuard};
    use serde_json::json;

    use super::*;
    use crate::errors::ApiError;
    use crate::types::ColorMode;

    const SAMPLE: &str = r#"{
        "1": {
            "state": {
                "on": false,
                "bri": 1,
                "hue": 33761,
                "sat": 254,
                "effect": "none",
                "xy": [0.3171, 0.3366],
                "ct": 159,
                "alert": "none",
                "colormode": "xy",
                "mode": "homeautomation",
                "reachable": true
            },
            "swupdate": {"state": "noupdates", "lastinstall": "2018-01-02T19:24:20"},
            "type": "Extended color light",
            "name": "Hue color lamp 7",
            "modelid": "LCT007",
            "manufacturername": "Philips",
            "productname": "Hue color lamp",
            "capabilities": {
                "certified": true,
                "control": {
                    "mindimlevel": 5000,
                    "maxlumen": 600,
                    "colorgamuttype": "B",
                    "colorgamut": [[0.675, 0.322], [0.409, 0.518], [0.167, 0.04]],
                    "ct": {"min": 153, "max": 500}
                },
                "streaming": {"renderer": true, "proxy": false}
            },
            "config": {"archetype": "sultanbulb", "function": "mixed", "direction": "omnidirectional"},
            "uniqueid": "00:17:88:01:00:bd:c7:b9-0b",
            "swversion": "5.105.0.21169"
        }
    }"#;

    fn repo() -> LightRepository {
        LightRepository::with_client(reqwest::Client::new())
    }

    fn address(server: &ServerGuard) -> BridgeAddress {
        server.host_with_port().parse().unwrap()
    }

    async fn fetch_sample(server: &mut ServerGuard, token: &PairingToken) -> Light {
        server
            .mock("GET", "/api/testUser/lights")
            .with_body(SAMPLE)
            .create_async()
            .await;
        let mut lights = repo().fetch_all(address(server), token).await.unwrap();
        assert_eq!(lights.len(), 1);
        lights.remove(0)
    }

    #[tokio::test]
    async fn test_no_lights() {
        let mut server = Server::new_async().await;
        server
            .mock("GET", "/api/testUser/lights")
            .with_body("{}")
            .create_async()
            .await;

        let lights = repo()
            .fetch_all(address(&server), &PairingToken::new("testUser"))
            .await
            .unwrap();
        assert!(lights.is_empty());
    }

    #[tokio::test]
    async fn test_light_is_found() {
        let mut server = Server::new_async().await;
        let token = PairingToken::new("testUser");
        let light = fetch_sample(&mut server, &token).await;

        assert_eq!(light.id(), "1");
        assert_eq!(light.name(), "Hue color lamp 7");
        assert_eq!(light.light_type(), "Extended color light");
        assert_eq!(light.model_id(), "LCT007");
        assert_eq!(light.manufacturer(), "Philips");
        assert_eq!(light.product(), "Hue color lamp");
        assert_eq!(light.unique_id(), "00:17:88:01:00:bd:c7:b9-0b");
        assert_eq!(light.sw_version(), "5.105.0.21169");
        assert_eq!(light.sw_update().state, "noupdates");

        let state = light.state();
        assert!(!state.on);
        assert_eq!(state.brightness, 1);
        assert_eq!(state.hue, 33761);
        assert_eq!(state.saturation, 254);
        assert_eq!(state.cie_coords, CieCoord::create(0.3171, 0.3366).unwrap());
        assert_eq!(state.temperature, 159);
        assert_eq!(state.known_alert(), Some(Alert::None));
        assert_eq!(state.known_effect(), Some(Effect::None));
        assert_eq!(state.known_color_mode(), Some(ColorMode::Xy));
        assert!(state.reachable);

        let control = &light.capabilities().control;
        assert_eq!(control.min_dim_level, Some(5000));
        assert_eq!(control.color_gamut_type.as_deref(), Some("B"));
        assert_eq!(control.color_gamut.unwrap()[2], CieCoord(0.167, 0.04));
        assert_eq!(control.temperature_range.unwrap().max, 500);
        assert!(light.capabilities().streaming.renderer);
        assert_eq!(light.config().archetype, "sultanbulb");

        assert_eq!(light.link().address, address(&server));
        assert_eq!(light.link().token, token);
    }

    #[tokio::test]
    async fn test_lights_sorted_by_id() {
        let mut server = Server::new_async().await;
        server
            .mock("GET", "/api/testUser/lights")
            .with_body(r#"{"10": {"name": "ten"}, "2": {"name": "two"}, "1": {"name": "one"}}"#)
            .create_async()
            .await;

        let lights = repo()
            .fetch_all(address(&server), &PairingToken::new("testUser"))
            .await
            .unwrap();
        let ids: Vec<&str> = lights.iter().map(|l| l.id()).collect();
        assert_eq!(ids, vec!["1", "2", "10"]);
    }

    #[tokio::test]
    async fn test_unfamiliar_alert_keeps_inventory() {
        let mut server = Server::new_async().await;
        server
            .mock("GET", "/api/testUser/lights")
            .with_body(
                r#"{"1": {"name": "hall", "state": {"on": true, "alert": "breathe"}},
                    "2": {"name": "desk", "state": {"on": false, "alert": "none"}}}"#,
            )
            .create_async()
            .await;

        let lights = repo()
            .fetch_all(address(&server), &PairingToken::new("testUser"))
            .await
            .unwrap();
        assert_eq!(lights.len(), 2);
        assert_eq!(lights[0].state().alert, "breathe");
        assert!(lights[0].state().known_alert().is_none());
        assert_eq!(lights[1].state().known_alert(), Some(Alert::None));
    }

    #[tokio::test]
    async fn test_unauthorized_user() {
        let mut server = Server::new_async().await;
        server
            .mock("GET", "/api/bogus/lights")
            .with_body(r#"[{"error": {"type": 1, "address": "/lights", "description": "unauthorized user"}}]"#)
            .create_async()
            .await;

        let err = repo()
            .fetch_all(address(&server), &PairingToken::new("bogus"))
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Api(ApiError { kind: 1, .. })));
    }

    #[tokio::test]
    async fn test_malformed_inventory() {
        let mut server = Server::new_async().await;
        server
            .mock("GET", "/api/testUser/lights")
            .with_body(r#"{"1": {"state": {"bri": "bright"}}}"#)
            .create_async()
            .await;

        let err = repo()
            .fetch_all(address(&server), &PairingToken::new("testUser"))
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Decode(_)));
    }

    #[tokio::test]
    async fn test_set_on() {
        let mut server = Server::new_async().await;
        let token = PairingToken::new("testUser");
        let mut light = fetch_sample(&mut server, &token).await;

        let mock = server
            .mock("PUT", "/api/testUser/lights/1/state")
            .match_body(Matcher::Json(json!({"on": true})))
            .with_body(r#"[{"success": {"/lights/1/state/on": true}}]"#)
            .create_async()
            .await;

        repo().set_on(&mut light, true).await.unwrap();

        mock.assert_async().await;
        assert!(light.state().on);
    }

    #[tokio::test]
    async fn test_set_brightness_rejected() {
        let mut server = Server::new_async().await;
        let token = PairingToken::new("testUser");
        let mut light = fetch_sample(&mut server, &token).await;

        server
            .mock("PUT", "/api/testUser/lights/1/state")
            .with_body(r#"[{"error": {"type": 201, "address": "/lights/1/state/bri", "description": "parameter, bri, is not modifiable. Device is set to off."}}]"#)
            .create_async()
            .await;

        let err = repo()
            .set_brightness(&mut light, Brightness::create(200).unwrap())
            .await
            .unwrap_err();

        assert!(matches!(err, Error::Api(ApiError { kind: 201, .. })));
        assert_eq!(light.state().brightness, 1);
    }

    #[tokio::test]
    async fn test_mutation_response_shape() {
        for body in [
            "[]",
            r#"[{"success": {"/lights/1/state/on": true}}, {"success": {"/lights/1/state/on": true}}]"#,
        ] {
            let mut server = Server::new_async().await;
            let token = PairingToken::new("testUser");
            let mut light = fetch_sample(&mut server, &token).await;

            server
                .mock("PUT", "/api/testUser/lights/1/state")
                .with_body(body)
                .create_async()
                .await;

            let err = repo().set_on(&mut light, true).await.unwrap_err();
            assert!(
                matches!(err, Error::UnexpectedResponseShape { expected: 1, .. }),
                "{body}: {err}"
            );
            assert!(!light.state().on);
        }
    }

    #[tokio::test]
    async fn test_apply_multiple_fields() {
        let mut server = Server::new_async().await;
        let token = PairingToken::new("testUser");
        let mut light = fetch_sample(&mut server, &token).await;

        let mock = server
            .mock("PUT", "/api/testUser/lights/1/state")
            .match_body(Matcher::Json(json!({"on": true, "ct": 366})))
            .with_body(
                r#"[{"success": {"/lights/1/state/on": true}}, {"success": {"/lights/1/state/ct": 366}}]"#,
            )
            .create_async()
            .await;

        let mut update = StateUpdate::new();
        update.on(true).temperature(Mired::create(366).unwrap());
        repo().apply(&mut light, &update).await.unwrap();

        mock.assert_async().await;
        assert!(light.state().on);
        assert_eq!(light.state().temperature, 366);
        assert_eq!(light.state().known_color_mode(), Some(ColorMode::Ct));
    }

    #[tokio::test]
    async fn test_empty_update_sends_nothing() {
        let mut server = Server::new_async().await;
        let token = PairingToken::new("testUser");
        let mut light = fetch_sample(&mut server, &token).await;

        let mock = server
            .mock("PUT", Matcher::Any)
            .expect(0)
            .create_async()
            .await;

        let err = repo().apply(&mut light, &StateUpdate::new()).await.unwrap_err();
        assert_eq!(err, Error::EmptyUpdate);
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_refresh() {
        let mut server = Server::new_async().await;
        let token = PairingToken::new("testUser");
        let mut light = fetch_sample(&mut server, &token).await;

        server
            .mock("GET", "/api/testUser/lights/1")
            .with_body(r#"{"state": {"on": true, "bri": 254, "reachable": true}, "name": "Renamed"}"#)
            .create_async()
            .await;

        repo().refresh(&mut light).await.unwrap();
        assert_eq!(light.id(), "1");
        assert_eq!(light.name(), "Renamed");
        assert!(light.state().on);
        assert_eq!(light.state().brightness, 254);
    }

    #[test]
    fn test_compare_ids() {
        let mut ids = vec!["b", "10", "a", "9"];
        ids.sort_by(|a, b| compare_ids(a, b));
        assert_eq!(ids, vec!["9", "10", "a", "b"]);
    }
}
