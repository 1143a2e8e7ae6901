//! Movement state and input structures.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use super::probe::ProbeResult;

/// A logical movement direction, independent of keyboard layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MoveKey {
    Forward,
    Back,
    Left,
    Right,
}

impl MoveKey {
    /// Every movement key.
    pub const ALL: [MoveKey; 4] = [MoveKey::Forward, MoveKey::Back, MoveKey::Left, MoveKey::Right];

    /// Map a physical key code (DOM `KeyboardEvent.code` naming) to a
    /// movement key. Returns `None` for keys that do not move the viewpoint.
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "KeyW" | "ArrowUp" => Some(Self::Forward),
            "KeyS" | "ArrowDown" => Some(Self::Back),
            "KeyA" | "ArrowLeft" => Some(Self::Left),
            "KeyD" | "ArrowRight" => Some(Self::Right),
            _ => None,
        }
    }

    #[inline]
    const fn bit(self) -> u8 {
        match self {
            Self::Forward => 1 << 0,
            Self::Back => 1 << 1,
            Self::Left => 1 << 2,
            Self::Right => 1 << 3,
        }
    }
}

/// Set of currently held movement keys.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct HeldKeys(u8);

impl HeldKeys {
    /// No keys held.
    pub const NONE: Self = Self(0);

    /// Build a set from a list of keys.
    pub fn from_keys(keys: &[MoveKey]) -> Self {
        let mut held = Self::NONE;
        for &key in keys {
            held.press(key);
        }
        held
    }

    /// Check if a key is held.
    #[inline]
    pub fn is_held(self, key: MoveKey) -> bool {
        (self.0 & key.bit()) != 0
    }

    /// Mark a key as held.
    #[inline]
    pub fn press(&mut self, key: MoveKey) {
        self.0 |= key.bit();
    }

    /// Mark a key as released.
    #[inline]
    pub fn release(&mut self, key: MoveKey) {
        self.0 &= !key.bit();
    }

    /// Release every key.
    #[inline]
    pub fn clear(&mut self) {
        self.0 = 0;
    }

    /// Check if no key is held.
    #[inline]
    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Iterate over the held keys.
    pub fn iter(self) -> impl Iterator<Item = MoveKey> {
        MoveKey::ALL.into_iter().filter(move |key| self.is_held(*key))
    }
}

/// Where the viewpoint is in its start/stop cycle.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum MotionPhase {
    /// At rest with no movement requested.
    #[default]
    Idle,
    /// Input asks for movement; velocity approaches the target.
    Accelerating,
    /// No movement requested; velocity decays toward rest.
    Decelerating,
}

impl MotionPhase {
    /// Classify a frame from its target and actual velocity.
    pub fn classify(target_velocity: Vec3, velocity: Vec3) -> Self {
        if target_velocity != Vec3::ZERO {
            Self::Accelerating
        } else if velocity != Vec3::ZERO {
            Self::Decelerating
        } else {
            Self::Idle
        }
    }
}

/// The inputs a target velocity was computed from.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct TargetInputs {
    pub held: HeldKeys,
    pub yaw: f32,
    pub suspended: bool,
    pub move_speed: f32,
}

/// Per-session motion state.
///
/// Persists across frames and is owned by whoever drives the locomotion
/// loop.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MotionState {
    /// Current velocity in world space (units/second).
    pub velocity: Vec3,

    /// Velocity the current input asks for, before smoothing.
    pub target_velocity: Vec3,

    /// Phase after the last update.
    pub phase: MotionPhase,

    /// Probe result of the last committed move, if any.
    pub last_probe: Option<ProbeResult>,

    /// Inputs `target_velocity` was last computed from.
    #[serde(skip)]
    pub(crate) target_inputs: Option<TargetInputs>,
}

impl MotionState {
    /// Create a state at rest.
    pub fn new() -> Self {
        Self::default()
    }

    /// Current speed.
    #[inline]
    pub fn speed(&self) -> f32 {
        self.velocity.length()
    }

    /// Check if moving faster than `rest_speed`.
    ///
    /// Pass the configured `rest_speed` so this agrees with the controller
    /// snapping to Idle.
    pub fn is_moving(&self, rest_speed: f32) -> bool {
        self.velocity.length_squared() > rest_speed * rest_speed
    }

    /// Whether the last committed move was blocked by a collider.
    pub fn blocked(&self) -> bool {
        self.last_probe.map_or(false, |probe| probe.collided)
    }
}
