//! Color saturation.

use serde::{Deserialize, Serialize};

use crate::errors::Error;

/// Saturation from 0 (white) to 254 (most colored).
#[derive(Default, Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(try_from = "u8", into = "u8")]
pub struct Saturation {
    pub(crate) value: u8,
}

impl Saturation {
    const MAX: u8 = 254;

    pub fn value(&self) -> u8 {
        self.value
    }

    /// Returns None if value is above 254.
    pub fn create(value: u8) -> Option<Self> {
        (value <= Self::MAX).then_some(Saturation { value })
    }
}

impl TryFrom<u8> for Saturation {
    type Error = Error;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::create(value).ok_or_else(|| Error::out_of_range("saturation", value))
    }
}

impl From<Saturation> for u8 {
    fn from(saturation: Saturation) -> Self {
        saturation.value
    }
}
