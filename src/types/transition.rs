use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Duration of a state transition, in multiples of 100ms.
///
/// The bridge default is 4 (400ms).
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(transparent)]
pub struct TransitionTime {
    pub(crate) deciseconds: u16,
}

impl Default for TransitionTime {
    fn default() -> Self {
        TransitionTime { deciseconds: 4 }
    }
}

impl TransitionTime {
    pub fn new(deciseconds: u16) -> Self {
        TransitionTime { deciseconds }
    }

    pub fn deciseconds(&self) -> u16 {
        self.deciseconds
    }

    pub fn duration(&self) -> Duration {
        Duration::from_millis(u64::from(self.deciseconds) * 100)
    }
}

impl From<Duration> for TransitionTime {
    fn from(duration: Duration) -> Self {
        let deciseconds = (duration.as_millis() / 100).min(u128::from(u16::MAX)) as u16;
        TransitionTime { deciseconds }
    }
}
