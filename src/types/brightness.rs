//! Brightness control for Hue lights.

use serde::{Deserialize, Serialize};

use crate::errors::Error;

/// Brightness level from 1 (minimum the light can do) to 254 (maximum).
///
/// A brightness of 1 does not switch the light off; use the `on` field for that.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(try_from = "u8", into = "u8")]
pub struct Brightness {
    pub(crate) value: u8,
}

impl Default for Brightness {
    fn default() -> Self {
        Self::new()
    }
}

impl Brightness {
    const MIN: u8 = 1;
    const MAX: u8 = 254;

    pub fn new() -> Self {
        Brightness { value: Self::MAX }
    }

    pub fn value(&self) -> u8 {
        self.value
    }

    /// Returns None if value is outside valid range (1-254).
    ///
    /// # Examples
    ///
    /// ```
    /// use hue_bridge_rs::Brightness;
    ///
    /// assert!(Brightness::create(0).is_none());
    /// assert!(Brightness::create(1).is_some());
    /// assert!(Brightness::create(254).is_some());
    /// assert!(Brightness::create(255).is_none());
    /// ```
    pub fn create(value: u8) -> Option<Self> {
        if Self::is_valid(value) {
            Some(Brightness { value })
        } else {
            None
        }
    }

    /// Create from a percentage (0-100), clamped to the valid range.
    ///
    /// # Examples
    ///
    /// ```
    /// use hue_bridge_rs::Brightness;
    ///
    /// assert_eq!(Brightness::from_percent(100).value(), 254);
    /// assert_eq!(Brightness::from_percent(0).value(), 1);
    /// assert_eq!(Brightness::from_percent(50).value(), 127);
    /// ```
    pub fn from_percent(percent: u8) -> Self {
        let percent = u16::from(percent.min(100));
        let value = (percent * u16::from(Self::MAX) / 100) as u8;
        Brightness {
            value: value.max(Self::MIN),
        }
    }

    fn is_valid(value: u8) -> bool {
        (Self::MIN..=Self::MAX).contains(&value)
    }
}

impl TryFrom<u8> for Brightness {
    type Error = Error;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::create(value).ok_or_else(|| Error::out_of_range("brightness", value))
    }
}

impl From<Brightness> for u8 {
    fn from(brightness: Brightness) -> Self {
        brightness.value
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_checks_range() {
        assert_eq!(serde_json::from_str::<Brightness>("200").unwrap().value(), 200);
        assert!(serde_json::from_str::<Brightness>("0").is_err());
        assert!(serde_json::from_str::<Brightness>("255").is_err());
        assert_eq!(serde_json::to_string(&Brightness::new()).unwrap(), "254");
    }
}
