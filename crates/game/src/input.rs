//! Held-key tracking.
//!
//! Converts key-down/key-up events into the set of held movement keys the
//! locomotion controller reads each frame, with a gate that disables
//! walking while another interaction mode is active.

use museum_physics::{HeldKeys, MoveKey};
use serde::{Deserialize, Serialize};

/// Held movement keys plus the suspension gate.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct InputTracker {
    held: HeldKeys,
    suspended: bool,
}

impl InputTracker {
    /// Create a tracker with nothing held and locomotion enabled.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a key press.
    ///
    /// Ignored while suspended, so a key pressed during inspection is not
    /// replayed as held once walking resumes.
    pub fn on_key_down(&mut self, key: MoveKey) {
        if self.suspended {
            return;
        }
        self.held.press(key);
    }

    /// Record a key release. Always applied, even while suspended.
    pub fn on_key_up(&mut self, key: MoveKey) {
        self.held.release(key);
    }

    /// Handle a physical key event by its code (`"KeyW"`, `"ArrowUp"`, ...).
    ///
    /// Returns whether the code maps to a movement key.
    pub fn handle_key_code(&mut self, code: &str, pressed: bool) -> bool {
        let Some(key) = MoveKey::from_code(code) else {
            return false;
        };

        if pressed {
            self.on_key_down(key);
        } else {
            self.on_key_up(key);
        }
        true
    }

    /// Enable or disable locomotion input.
    ///
    /// Entering suspension drops every held key.
    pub fn set_suspended(&mut self, suspended: bool) {
        if suspended && !self.suspended {
            log::debug!("input suspended, releasing {:?}", self.held);
        }
        if suspended {
            self.held.clear();
        }
        self.suspended = suspended;
    }

    /// Check if locomotion input is suspended.
    #[inline]
    pub fn is_suspended(&self) -> bool {
        self.suspended
    }

    /// Keys currently held.
    #[inline]
    pub fn held_keys(&self) -> HeldKeys {
        self.held
    }
}
