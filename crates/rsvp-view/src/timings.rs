//! Transition timing configuration

use serde::{Deserialize, Serialize};
use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransitionTimings {
    /// Delay between marking content as leaving and replacing it
    pub fade_out_ms: u64,
    /// Delay between inserting new content and clearing the marker
    pub fade_in_ms: u64,
    /// Delay before the loading indicator is hidden
    pub loader_hide_ms: u64,
}

impl TransitionTimings {
    /// All delays zero. Useful for headless drivers and tests.
    pub fn instant() -> Self {
        Self {
            fade_out_ms: 0,
            fade_in_ms: 0,
            loader_hide_ms: 0,
        }
    }

    pub fn fade_out(&self) -> Duration {
        Duration::from_millis(self.fade_out_ms)
    }

    pub fn fade_in(&self) -> Duration {
        Duration::from_millis(self.fade_in_ms)
    }

    pub fn loader_hide(&self) -> Duration {
        Duration::from_millis(self.loader_hide_ms)
    }
}

impl Default for TransitionTimings {
    fn default() -> Self {
        Self {
            fade_out_ms: 200,
            fade_in_ms: 300,
            loader_hide_ms: 300,
        }
    }
}
