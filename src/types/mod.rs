//! Value types for light state parameters.

mod brightness;
mod cie;
mod hue;
mod mired;
mod modes;
mod saturation;
mod transition;

pub use brightness::Brightness;
pub use cie::CieCoord;
pub use hue::Hue;
pub use mired::Mired;
pub use modes::{Alert, ColorMode, Effect};
pub use saturation::Saturation;
pub use transition::TransitionTime;
