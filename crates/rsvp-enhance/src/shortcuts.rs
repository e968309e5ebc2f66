//! Keyboard shortcuts

use serde::{Deserialize, Serialize};

/// Element id of the guest search input.
pub const SEARCH_INPUT_ID: &str = "guestSearch";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyChord {
    pub key: String,
    pub ctrl: bool,
    pub meta: bool,
}

impl KeyChord {
    /// Ctrl+K, or Cmd+K on macOS.
    pub fn is_search_shortcut(&self) -> bool {
        (self.ctrl || self.meta) && self.key == "k"
    }
}
