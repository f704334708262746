//! Light state as reported by the bridge.

use serde::{Deserialize, Serialize};

use crate::types::{Alert, CieCoord, ColorMode, Effect};
use crate::update::StateUpdate;

/// Current state of a light.
///
/// Values are kept exactly as the bridge reports them. Fields a light does not
/// support (e.g. `hue` on a white-only bulb) are left at their defaults.
///
/// Alert, effect and color mode names are defined by the bridge firmware, so
/// they are kept as strings. Use [`LightState::known_alert`] and friends for
/// the values this crate can also send.
#[serde_with::skip_serializing_none]
#[derive(Debug, Default, Serialize, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct LightState {
    pub on: bool,
    /// Brightness (1-254)
    #[serde(rename = "bri")]
    pub brightness: u8,
    pub hue: u16,
    #[serde(rename = "sat")]
    pub saturation: u8,
    #[serde(rename = "xy")]
    pub cie_coords: CieCoord,
    /// Color temperature in mired (153-500)
    #[serde(rename = "ct")]
    pub temperature: u16,
    pub alert: String,
    pub effect: String,
    pub mode: Option<String>,
    #[serde(rename = "colormode")]
    pub color_mode: Option<String>,
    pub reachable: bool,
}

impl LightState {
    /// The current alert, if it is one of [`Alert`]'s variants.
    pub fn known_alert(&self) -> Option<Alert> {
        self.alert.parse().ok()
    }

    /// The current effect, if it is one of [`Effect`]'s variants.
    pub fn known_effect(&self) -> Option<Effect> {
        self.effect.parse().ok()
    }

    pub fn known_color_mode(&self) -> Option<ColorMode> {
        self.color_mode.as_deref()?.parse().ok()
    }

    /// Write the fields of an accepted update into this snapshot.
    ///
    /// # Examples
    ///
    /// ```
    /// use hue_bridge_rs::{Brightness, LightState, StateUpdate};
    ///
    /// let mut state = LightState::default();
    /// let mut update = StateUpdate::new();
    /// update.on(true).brightness(Brightness::create(200).unwrap());
    ///
    /// state.apply(&update);
    /// assert!(state.on);
    /// assert_eq!(state.brightness, 200);
    /// ```
    pub fn apply(&mut self, update: &StateUpdate) {
        if let Some(on) = update.on {
            self.on = on;
        }
        if let Some(bri) = update.brightness {
            self.brightness = bri.value();
        }
        if let Some(hue) = update.hue {
            self.hue = hue.value();
            self.color_mode = Some(ColorMode::Hs.to_string());
        }
        if let Some(sat) = update.saturation {
            self.saturation = sat.value();
            self.color_mode = Some(ColorMode::Hs.to_string());
        }
        if let Some(xy) = update.cie_coords {
            self.cie_coords = xy;
            self.color_mode = Some(ColorMode::Xy.to_string());
        }
        if let Some(ct) = update.temperature {
            self.temperature = ct.value();
            self.color_mode = Some(ColorMode::Ct.to_string());
        }
        if let Some(alert) = update.alert {
            self.alert = alert.to_string();
        }
        if let Some(effect) = update.effect {
            self.effect = effect.to_string();
        }
    }
}
