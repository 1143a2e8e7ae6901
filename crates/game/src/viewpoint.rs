//! First-person viewpoint.

use glam::{Mat4, Vec3};
use museum_physics::movement::{forward_vector, right_vector};
use museum_physics::Viewpoint;
use serde::{Deserialize, Serialize};

/// Pitch stops just short of straight up or down.
const PITCH_LIMIT: f32 = std::f32::consts::FRAC_PI_2 - 0.01;

/// First-person camera state.
///
/// `position` is the eye position. Yaw 0 looks down `-Z`, positive pitch
/// looks up.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FirstPersonView {
    /// Eye position in world space.
    pub position: Vec3,

    /// Heading in radians.
    pub yaw: f32,

    /// Elevation in radians.
    pub pitch: f32,
}

impl Default for FirstPersonView {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            yaw: 0.0,
            pitch: 0.0,
        }
    }
}

impl FirstPersonView {
    /// Create a view at the given eye position looking along `yaw`.
    pub fn new(position: Vec3, yaw: f32) -> Self {
        Self {
            position,
            yaw,
            pitch: 0.0,
        }
    }

    /// Apply a look delta in radians.
    ///
    /// Pitch is clamped to avoid flipping over the vertical; yaw is wrapped
    /// to `-PI..PI`.
    pub fn apply_look(&mut self, yaw_delta: f32, pitch_delta: f32) {
        if !yaw_delta.is_finite() || !pitch_delta.is_finite() {
            return;
        }

        self.pitch = (self.pitch + pitch_delta).clamp(-PITCH_LIMIT, PITCH_LIMIT);

        let mut yaw = self.yaw + yaw_delta;
        while yaw > std::f32::consts::PI {
            yaw -= std::f32::consts::TAU;
        }
        while yaw < -std::f32::consts::PI {
            yaw += std::f32::consts::TAU;
        }
        self.yaw = yaw;
    }

    /// Apply a mouse movement in pixels.
    ///
    /// Moving the mouse right turns right; moving it up looks up.
    pub fn apply_mouse(&mut self, delta: (f32, f32), sensitivity: f32) {
        let radians = sensitivity * 0.001;
        self.apply_look(-delta.0 * radians, -delta.1 * radians);
    }

    /// Full look direction including pitch.
    pub fn look_direction(&self) -> Vec3 {
        let (sin_pitch, cos_pitch) = self.pitch.sin_cos();
        let flat = forward_vector(self.yaw);
        Vec3::new(flat.x * cos_pitch, sin_pitch, flat.z * cos_pitch)
    }

    /// Horizontal forward direction.
    #[inline]
    pub fn forward(&self) -> Vec3 {
        forward_vector(self.yaw)
    }

    /// Horizontal right direction.
    #[inline]
    pub fn right(&self) -> Vec3 {
        right_vector(self.yaw)
    }

    /// View matrix for an external renderer.
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_to_rh(self.position, self.look_direction(), Vec3::Y)
    }
}

impl Viewpoint for FirstPersonView {
    fn position(&self) -> Vec3 {
        self.position
    }

    fn set_position(&mut self, position: Vec3) {
        self.position = position;
    }

    fn yaw(&self) -> f32 {
        self.yaw
    }
}
