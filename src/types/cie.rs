//! CIE 1931 color space coordinates.

use serde::{Deserialize, Serialize};

use crate::errors::Error;

/// A point in the CIE color space, encoded on the wire as `[x, y]`.
///
/// Both coordinates lie between 0 and 1, whether built through
/// [`CieCoord::create`] or decoded.
///
/// # Examples
///
/// ```
/// use hue_bridge_rs::CieCoord;
///
/// let coord = CieCoord::create(0.3171, 0.3366).unwrap();
/// assert_eq!(serde_json::to_string(&coord).unwrap(), "[0.3171,0.3366]");
/// assert!(CieCoord::create(1.2, 0.3).is_none());
/// ```
#[derive(Default, Debug, Serialize, Deserialize, Clone, Copy, PartialEq)]
#[serde(try_from = "[f64; 2]", into = "[f64; 2]")]
pub struct CieCoord(pub(crate) f64, pub(crate) f64);

impl CieCoord {
    /// Returns None if either coordinate is outside 0.0-1.0.
    pub fn create(x: f64, y: f64) -> Option<Self> {
        let valid = |v: f64| (0.0..=1.0).contains(&v);
        (valid(x) && valid(y)).then_some(CieCoord(x, y))
    }

    pub fn x(&self) -> f64 {
        self.0
    }

    pub fn y(&self) -> f64 {
        self.1
    }
}

impl TryFrom<[f64; 2]> for CieCoord {
    type Error = Error;

    fn try_from([x, y]: [f64; 2]) -> Result<Self, Self::Error> {
        Self::create(x, y).ok_or_else(|| Error::out_of_range("CIE coordinate", format!("[{x}, {y}]")))
    }
}

impl From<CieCoord> for [f64; 2] {
    fn from(coord: CieCoord) -> Self {
        [coord.0, coord.1]
    }
}
