//! Movement configuration constants.
//!
//! All locomotion parameters are grouped here for easy tuning.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A movement configuration value that cannot be used.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum InvalidConfig {
    #[error("{field} must be a positive finite number, got {value}")]
    NotPositive { field: &'static str, value: f32 },

    #[error("wall_slide_force must be in (0, 1], got {0}")]
    WallSlideOutOfRange(f32),

    #[error("collision_distance ({distance}) must exceed surface_epsilon ({epsilon})")]
    CollisionDistanceTooSmall { distance: f32, epsilon: f32 },
}

/// Configuration for first-person locomotion.
///
/// All values use scene units (meters) and seconds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MovementConfig {
    // ========================================================================
    // Speed
    // ========================================================================
    /// Top walking speed (units/second).
    pub move_speed: f32,

    /// Rate of the exponential approach toward the target velocity (1/second).
    pub acceleration: f32,

    /// Rate of the exponential decay toward rest (1/second).
    pub deceleration: f32,

    /// Speed below which the viewpoint is considered at rest (units/second).
    pub rest_speed: f32,

    // ========================================================================
    // Collision
    // ========================================================================
    /// Probe rays closer than this to a surface count as a collision (units).
    pub collision_distance: f32,

    /// Tangential velocity multiplier while sliding along a wall.
    pub wall_slide_force: f32,

    /// Gap kept below `collision_distance` when pushing out of a surface (units).
    pub surface_epsilon: f32,

    // ========================================================================
    // Timing
    // ========================================================================
    /// Longest frame step that is integrated in one go (seconds).
    pub max_delta_time: f32,
}

impl Default for MovementConfig {
    fn default() -> Self {
        Self {
            move_speed: 2.8,
            acceleration: 15.0,
            deceleration: 8.0,
            rest_speed: 0.001,

            collision_distance: 0.5,
            wall_slide_force: 0.98,
            surface_epsilon: 0.01,

            // Tab switches and breakpoints produce huge gaps
            max_delta_time: 0.1,
        }
    }
}

impl MovementConfig {
    /// A slow, heavily damped walk for visitors who prefer a gentle pace.
    pub fn leisurely() -> Self {
        Self {
            move_speed: 1.8,
            acceleration: 8.0,
            deceleration: 6.0,
            ..Default::default()
        }
    }

    /// A quick walk with snappy starts and stops.
    pub fn brisk() -> Self {
        Self {
            move_speed: 4.2,
            acceleration: 20.0,
            deceleration: 12.0,
            ..Default::default()
        }
    }

    /// Check that every value is usable by the integrator and prober.
    pub fn validate(&self) -> Result<(), InvalidConfig> {
        let positive = [
            ("move_speed", self.move_speed),
            ("acceleration", self.acceleration),
            ("deceleration", self.deceleration),
            ("rest_speed", self.rest_speed),
            ("collision_distance", self.collision_distance),
            ("surface_epsilon", self.surface_epsilon),
            ("max_delta_time", self.max_delta_time),
        ];
        for (field, value) in positive {
            if !(value.is_finite() && value > 0.0) {
                return Err(InvalidConfig::NotPositive { field, value });
            }
        }

        if !(self.wall_slide_force > 0.0 && self.wall_slide_force <= 1.0) {
            return Err(InvalidConfig::WallSlideOutOfRange(self.wall_slide_force));
        }

        if self.collision_distance <= self.surface_epsilon {
            return Err(InvalidConfig::CollisionDistanceTooSmall {
                distance: self.collision_distance,
                epsilon: self.surface_epsilon,
            });
        }

        Ok(())
    }

    /// Distance from a surface at which a pushed-out viewpoint comes to rest.
    #[inline]
    pub fn rest_distance(&self) -> f32 {
        self.collision_distance - self.surface_epsilon
    }
}
