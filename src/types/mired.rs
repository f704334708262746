//! Color temperature control.

use serde::{Deserialize, Serialize};

use crate::errors::Error;

/// Color temperature in mired, with valid values from 153 (6500K) to 500 (2000K).
///
/// Lower values produce cooler light, higher values warmer light.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(try_from = "u16", into = "u16")]
pub struct Mired {
    pub(crate) value: u16,
}

impl Mired {
    const MIN: u16 = 153;
    const MAX: u16 = 500;

    pub fn value(&self) -> u16 {
        self.value
    }

    /// Returns `None` if value is outside the valid range (153-500).
    ///
    /// # Examples
    ///
    /// ```
    /// use hue_bridge_rs::Mired;
    ///
    /// assert!(Mired::create(152).is_none());
    /// assert!(Mired::create(153).is_some());
    /// assert!(Mired::create(500).is_some());
    /// assert!(Mired::create(501).is_none());
    /// ```
    pub fn create(value: u16) -> Option<Self> {
        if (Self::MIN..=Self::MAX).contains(&value) {
            Some(Mired { value })
        } else {
            None
        }
    }

    /// Create from a Kelvin temperature.
    ///
    /// # Examples
    ///
    /// ```
    /// use hue_bridge_rs::Mired;
    ///
    /// assert_eq!(Mired::from_kelvin(6500).unwrap().value(), 153);
    /// assert_eq!(Mired::from_kelvin(2000).unwrap().value(), 500);
    /// assert!(Mired::from_kelvin(10000).is_none());
    /// ```
    pub fn from_kelvin(kelvin: u32) -> Option<Self> {
        if kelvin == 0 {
            return None;
        }
        let mired = 1_000_000 / kelvin;
        u16::try_from(mired).ok().and_then(Self::create)
    }

    pub fn kelvin(&self) -> u32 {
        1_000_000 / u32::from(self.value)
    }
}

impl TryFrom<u16> for Mired {
    type Error = Error;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        Self::create(value).ok_or_else(|| Error::out_of_range("color temperature", value))
    }
}

impl From<Mired> for u16 {
    fn from(mired: Mired) -> Self {
        mired.value
    }
}
