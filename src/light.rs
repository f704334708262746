//! Lights as described by the bridge.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::bridge::BridgeLink;
use crate::state::LightState;
use crate::types::CieCoord;

/// Software update status of a light.
#[serde_with::skip_serializing_none]
#[derive(Debug, Default, Serialize, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct SwUpdate {
    pub state: String,
    /// Time of the last firmware install, in bridge local time
    #[serde(rename = "lastinstall", with = "bridge_time")]
    pub last_install: Option<NaiveDateTime>,
}

/// Supported color temperature range, in mired.
#[derive(Debug, Default, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
pub struct TemperatureRange {
    pub min: u16,
    pub max: u16,
}

/// How a light can be controlled.
#[serde_with::skip_serializing_none]
#[derive(Debug, Default, Serialize, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct ControlCapabilities {
    #[serde(rename = "mindimlevel")]
    pub min_dim_level: Option<u32>,
    #[serde(rename = "maxlumen")]
    pub max_lumen: Option<u32>,
    #[serde(rename = "colorgamuttype")]
    pub color_gamut_type: Option<String>,
    /// Red, green and blue corners of the gamut triangle
    #[serde(rename = "colorgamut")]
    pub color_gamut: Option<[CieCoord; 3]>,
    #[serde(rename = "ct")]
    pub temperature_range: Option<TemperatureRange>,
}

/// Entertainment streaming support.
#[derive(Debug, Default, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(default)]
pub struct StreamingCapabilities {
    pub renderer: bool,
    pub proxy: bool,
}

/// What a light is capable of.
#[derive(Debug, Default, Serialize, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct Capabilities {
    pub certified: bool,
    pub control: ControlCapabilities,
    pub streaming: StreamingCapabilities,
}

/// Fixture configuration.
#[derive(Debug, Default, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct LightConfig {
    pub archetype: String,
    pub function: String,
    pub direction: String,
}

/// One entry of the bridge's `/lights` object, before it gets an id.
#[derive(Debug, Default, Serialize, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub(crate) struct LightPayload {
    pub state: LightState,
    #[serde(rename = "swupdate")]
    pub sw_update: SwUpdate,
    #[serde(rename = "type")]
    pub light_type: String,
    pub name: String,
    #[serde(rename = "modelid")]
    pub model_id: String,
    #[serde(rename = "manufacturername")]
    pub manufacturer: String,
    #[serde(rename = "productname")]
    pub product: String,
    pub capabilities: Capabilities,
    pub config: LightConfig,
    #[serde(rename = "uniqueid")]
    pub unique_id: String,
    #[serde(rename = "swversion")]
    pub sw_version: String,
}

/// A snapshot of one light on a bridge.
///
/// Lights are created by [`crate::LightRepository::fetch_all`]. Changing the
/// snapshot does not change the physical light; push changes through the
/// repository instead.
#[derive(Debug, Clone, PartialEq)]
pub struct Light {
    id: String,
    payload: LightPayload,
    link: BridgeLink,
}

impl Light {
    pub(crate) fn new(id: String, payload: LightPayload, link: BridgeLink) -> Self {
        Light { id, payload, link }
    }

    /// Identifier of the light on its bridge (the key of the `/lights` object).
    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.payload.name
    }

    /// Light type, e.g. `Extended color light`.
    pub fn light_type(&self) -> &str {
        &self.payload.light_type
    }

    pub fn model_id(&self) -> &str {
        &self.payload.model_id
    }

    pub fn manufacturer(&self) -> &str {
        &self.payload.manufacturer
    }

    pub fn product(&self) -> &str {
        &self.payload.product
    }

    pub fn unique_id(&self) -> &str {
        &self.payload.unique_id
    }

    pub fn sw_version(&self) -> &str {
        &self.payload.sw_version
    }

    pub fn sw_update(&self) -> &SwUpdate {
        &self.payload.sw_update
    }

    pub fn capabilities(&self) -> &Capabilities {
        &self.payload.capabilities
    }

    pub fn config(&self) -> &LightConfig {
        &self.payload.config
    }

    pub fn state(&self) -> &LightState {
        &self.payload.state
    }

    /// Mutable access to the local snapshot only.
    pub fn state_mut(&mut self) -> &mut LightState {
        &mut self.payload.state
    }

    pub(crate) fn link(&self) -> &BridgeLink {
        &self.link
    }
}

/// Serde helpers for the bridge's `YYYY-MM-DDTHH:MM:SS` timestamps.
///
/// `null` and the literal `"none"` (sent for lights never updated) map to `None`.
mod bridge_time {
    use chrono::NaiveDateTime;
    use serde::{Deserialize, Deserializer, Serializer, de::Error};

    const FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

    pub fn serialize<S>(value: &Option<NaiveDateTime>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match value {
            Some(time) => serializer.serialize_str(&time.format(FORMAT).to_string()),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<NaiveDateTime>, D::Error>
    where
        D: Deserializer<'de>,
    {
        match Option::<String>::deserialize(deserializer)? {
            None => Ok(None),
            Some(s) if s == "none" => Ok(None),
            Some(s) => NaiveDateTime::parse_from_str(&s, FORMAT)
                .map(Some)
                .map_err(D::Error::custom),
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;

    #[test]
    fn test_sw_update_timestamp() {
        let update: SwUpdate =
            serde_json::from_str(r#"{"state": "noupdates", "lastinstall": "2018-01-02T19:24:20"}"#)
                .unwrap();
        let expected = NaiveDate::from_ymd_opt(2018, 1, 2)
            .unwrap()
            .and_hms_opt(19, 24, 20)
            .unwrap();
        assert_eq!(update.last_install, Some(expected));
        assert_eq!(
            serde_json::to_value(&update).unwrap()["lastinstall"],
            "2018-01-02T19:24:20"
        );
    }

    #[test]
    fn test_sw_update_null_timestamp() {
        let update: SwUpdate =
            serde_json::from_str(r#"{"state": "readytoinstall", "lastinstall": null}"#).unwrap();
        assert!(update.last_install.is_none());

        let update: SwUpdate = serde_json::from_str(r#"{"state": "noupdates"}"#).unwrap();
        assert!(update.last_install.is_none());
    }

    #[test]
    fn test_sw_update_bad_timestamp() {
        assert!(
            serde_json::from_str::<SwUpdate>(r#"{"lastinstall": "02/01/2018 19:24"}"#).is_err()
        );
    }

    #[test]
    fn test_white_light_capabilities() {
        let caps: Capabilities = serde_json::from_str(
            r#"{"certified": true, "control": {"mindimlevel": 5000, "maxlumen": 840}, "streaming": {"renderer": false, "proxy": false}}"#,
        )
        .unwrap();
        assert!(caps.certified);
        assert_eq!(caps.control.max_lumen, Some(840));
        assert!(caps.control.color_gamut.is_none());
        assert!(caps.control.temperature_range.is_none());
    }
}
