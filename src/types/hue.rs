//! Hue angle on the bridge's color wheel.

use serde::{Deserialize, Serialize};

/// Hue as a wrapping value between 0 and 65535.
///
/// Both 0 and 65535 are red, 25500 is green and 46920 is blue.
#[derive(Default, Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(transparent)]
pub struct Hue {
    pub(crate) value: u16,
}

impl Hue {
    pub fn new(value: u16) -> Self {
        Hue { value }
    }

    pub fn value(&self) -> u16 {
        self.value
    }

    /// Convert an angle in degrees (wrapping at 360) to a bridge hue.
    ///
    /// # Examples
    ///
    /// ```
    /// use hue_bridge_rs::Hue;
    ///
    /// assert_eq!(Hue::from_degrees(0.0).value(), 0);
    /// assert_eq!(Hue::from_degrees(180.0).value(), 32768);
    /// assert_eq!(Hue::from_degrees(360.0).value(), 0);
    /// ```
    pub fn from_degrees(degrees: f32) -> Self {
        let normalized = degrees.rem_euclid(360.0) / 360.0;
        Hue {
            value: (normalized * 65536.0).round().min(65535.0) as u16,
        }
    }
}
