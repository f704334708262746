//! Partial state body for light mutation requests.

use serde::{Deserialize, Serialize};

use crate::types::{
    Alert, Brightness, CieCoord, Effect, Hue, Mired, Saturation, TransitionTime,
};

/// A set of state changes to push to a light.
///
/// Only fields that were set are serialized, so the bridge receives a partial
/// body such as `{"on": true}`.
///
/// # Creating Updates
///
/// 1. **From a single attribute** using the [`From`] trait:
///    ```
///    use hue_bridge_rs::{Alert, StateUpdate};
///    let update = StateUpdate::from(Alert::Select);
///    assert_eq!(update.len(), 1);
///    ```
///
/// 2. **Builder pattern** for combining multiple attributes:
///    ```
///    use hue_bridge_rs::{Brightness, Mired, StateUpdate};
///    let mut update = StateUpdate::new();
///    update
///        .brightness(Brightness::create(80).unwrap())
///        .temperature(Mired::from_kelvin(2700).unwrap());
///    assert_eq!(update.len(), 2);
///    ```
#[serde_with::skip_serializing_none]
#[derive(Default, Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct StateUpdate {
    pub(crate) on: Option<bool>,
    #[serde(rename = "bri")]
    pub(crate) brightness: Option<Brightness>,
    pub(crate) hue: Option<Hue>,
    #[serde(rename = "sat")]
    pub(crate) saturation: Option<Saturation>,
    #[serde(rename = "xy")]
    pub(crate) cie_coords: Option<CieCoord>,
    #[serde(rename = "ct")]
    pub(crate) temperature: Option<Mired>,
    pub(crate) alert: Option<Alert>,
    pub(crate) effect: Option<Effect>,
    #[serde(rename = "transitiontime")]
    pub(crate) transition_time: Option<TransitionTime>,
}

impl StateUpdate {
    /// Create a new empty update.
    ///
    /// At least one field must be set before it can be sent.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of fields the bridge will acknowledge.
    ///
    /// The bridge answers with one success entry per field, transition time
    /// included.
    pub fn len(&self) -> usize {
        [
            self.on.is_some(),
            self.brightness.is_some(),
            self.hue.is_some(),
            self.saturation.is_some(),
            self.cie_coords.is_some(),
            self.temperature.is_some(),
            self.alert.is_some(),
            self.effect.is_some(),
            self.transition_time.is_some(),
        ]
        .into_iter()
        .filter(|set| *set)
        .count()
    }

    /// Check if this update changes anything.
    ///
    /// A transition time alone is not a change.
    ///
    /// # Examples
    ///
    /// ```
    /// use hue_bridge_rs::{StateUpdate, TransitionTime};
    ///
    /// let mut update = StateUpdate::new();
    /// update.transition_time(TransitionTime::new(10));
    /// assert!(!update.is_valid());
    ///
    /// update.on(false);
    /// assert!(update.is_valid());
    /// ```
    pub fn is_valid(&self) -> bool {
        self.len() > usize::from(self.transition_time.is_some())
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn on(&mut self, on: bool) -> &mut Self {
        self.on = Some(on);
        self
    }

    pub fn brightness(&mut self, brightness: Brightness) -> &mut Self {
        self.brightness = Some(brightness);
        self
    }

    pub fn hue(&mut self, hue: Hue) -> &mut Self {
        self.hue = Some(hue);
        self
    }

    pub fn saturation(&mut self, saturation: Saturation) -> &mut Self {
        self.saturation = Some(saturation);
        self
    }

    /// Set the color as CIE coordinates.
    pub fn cie_coords(&mut self, coords: CieCoord) -> &mut Self {
        self.cie_coords = Some(coords);
        self
    }

    /// Set the color temperature.
    pub fn temperature(&mut self, temperature: Mired) -> &mut Self {
        self.temperature = Some(temperature);
        self
    }

    pub fn alert(&mut self, alert: Alert) -> &mut Self {
        self.alert = Some(alert);
        self
    }

    pub fn effect(&mut self, effect: Effect) -> &mut Self {
        self.effect = Some(effect);
        self
    }

    /// Set how long the bridge takes to move to the new state.
    pub fn transition_time(&mut self, time: TransitionTime) -> &mut Self {
        self.transition_time = Some(time);
        self
    }
}

impl From<bool> for StateUpdate {
    fn from(on: bool) -> Self {
        let mut u = StateUpdate::new();
        u.on(on);
        u
    }
}

impl From<Brightness> for StateUpdate {
    fn from(brightness: Brightness) -> Self {
        let mut u = StateUpdate::new();
        u.brightness(brightness);
        u
    }
}

impl From<Hue> for StateUpdate {
    fn from(hue: Hue) -> Self {
        let mut u = StateUpdate::new();
        u.hue(hue);
        u
    }
}

impl From<Saturation> for StateUpdate {
    fn from(saturation: Saturation) -> Self {
        let mut u = StateUpdate::new();
        u.saturation(saturation);
        u
    }
}

impl From<CieCoord> for StateUpdate {
    fn from(coords: CieCoord) -> Self {
        let mut u = StateUpdate::new();
        u.cie_coords(coords);
        u
    }
}

impl From<Mired> for StateUpdate {
    fn from(temperature: Mired) -> Self {
        let mut u = StateUpdate::new();
        u.temperature(temperature);
        u
    }
}

impl From<Alert> for StateUpdate {
    fn from(alert: Alert) -> Self {
        let mut u = StateUpdate::new();
        u.alert(alert);
        u
    }
}

impl From<Effect> for StateUpdate {
    fn from(effect: Effect) -> Self {
        let mut u = StateUpdate::new();
        u.effect(effect);
        u
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_partial_body() {
        let body = serde_json::to_value(StateUpdate::from(true)).unwrap();
        assert_eq!(body, json!({"on": true}));
    }

    #[test]
    fn test_full_body() {
        let mut update = StateUpdate::new();
        update
            .on(true)
            .brightness(Brightness::create(128).unwrap())
            .cie_coords(CieCoord::create(0.5, 0.4).unwrap())
            .effect(Effect::ColorLoop)
            .transition_time(TransitionTime::new(0));

        assert_eq!(update.len(), 5);
        assert_eq!(
            serde_json::to_value(&update).unwrap(),
            json!({
                "on": true,
                "bri": 128,
                "xy": [0.5, 0.4],
                "effect": "colorloop",
                "transitiontime": 0,
            })
        );
    }

    #[test]
    fn test_decode_rejects_out_of_range_values() {
        for body in [r#"{"bri": 0}"#, r#"{"sat": 255}"#, r#"{"xy": [7.0, -3.0]}"#, r#"{"ct": 501}"#] {
            assert!(serde_json::from_str::<StateUpdate>(body).is_err(), "{body}");
        }

        let update: StateUpdate = serde_json::from_str(r#"{"bri": 1, "ct": 153}"#).unwrap();
        assert_eq!(update.len(), 2);
    }

    #[test]
    fn test_empty() {
        let update = StateUpdate::new();
        assert!(update.is_empty());
        assert!(!update.is_valid());
        assert_eq!(serde_json::to_value(&update).unwrap(), json!({}));
    }
}
