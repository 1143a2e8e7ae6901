//! Locomotion controller.
//!
//! This is the per-frame entry point for walking. It takes the held keys and
//! the viewpoint orientation and moves the viewpoint through the collider
//! set.

use glam::Vec3;

use crate::collision::SceneQuery;

use super::config::MovementConfig;
use super::integrator::{clamp_delta_time, compute_target_velocity, integrate};
use super::probe::{probe, push_out, resolve_velocity, ProbeResult};
use super::state::{HeldKeys, MotionPhase, MotionState, TargetInputs};

/// Read/write access to the camera the controller moves.
///
/// The viewpoint is owned outside the physics crate. The controller only
/// reads its yaw and writes its position in the commit step.
pub trait Viewpoint {
    /// Current position.
    fn position(&self) -> Vec3;

    /// Move to a new position.
    fn set_position(&mut self, position: Vec3);

    /// Heading around the vertical axis in radians (0 looks down `-Z`).
    fn yaw(&self) -> f32;
}

/// What happened during one update.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameOutcome {
    /// Viewpoint position after the update.
    pub position: Vec3,

    /// Whether this frame's probe touched a collider.
    pub blocked: bool,

    /// Whether the viewpoint position was written this frame.
    pub committed: bool,

    /// Motion phase after the update.
    pub phase: MotionPhase,
}

/// First-person locomotion controller.
///
/// # Example
///
/// ```ignore
/// let controller = LocomotionController::new(MovementConfig::default());
/// let mut motion = MotionState::new();
///
/// // Each frame:
/// let outcome = controller.update(&mut motion, held, suspended, &registry, &mut view, dt);
/// ```
#[derive(Debug, Clone)]
pub struct LocomotionController {
    /// Movement configuration.
    pub config: MovementConfig,
}

impl LocomotionController {
    /// Create a new controller with the given configuration.
    pub fn new(config: MovementConfig) -> Self {
        Self { config }
    }

    /// Create a controller with default configuration.
    pub fn with_default_config() -> Self {
        Self::new(MovementConfig::default())
    }

    /// Advance locomotion by one frame.
    ///
    /// Order within the frame is fixed: target velocity, integration, probe
    /// at the proposed position, velocity resolution, commit. While
    /// `suspended` the target is zero and nothing is committed, but the
    /// velocity keeps decaying so resuming is smooth.
    ///
    /// # Arguments
    ///
    /// * `state` - Motion state carried between frames
    /// * `held` - Movement keys held this frame
    /// * `suspended` - Whether locomotion is disabled (inspection, orbit camera)
    /// * `query` - Static scene geometry
    /// * `viewpoint` - Camera to read yaw from and move
    /// * `delta_time` - Frame step in seconds
    pub fn update<Q, V>(
        &self,
        state: &mut MotionState,
        held: HeldKeys,
        suspended: bool,
        query: &Q,
        viewpoint: &mut V,
        delta_time: f32,
    ) -> FrameOutcome
    where
        Q: SceneQuery + ?Sized,
        V: Viewpoint + ?Sized,
    {
        let config = &self.config;
        let delta_time = clamp_delta_time(delta_time, config.max_delta_time);

        // Target velocity
        self.refresh_target(state, held, viewpoint.yaw(), suspended);

        // Integration
        state.velocity = integrate(
            state.velocity,
            state.target_velocity,
            delta_time,
            config.acceleration,
            config.deceleration,
        )
        .clamp_length_max(config.move_speed);

        let rest_speed_sq = config.rest_speed * config.rest_speed;
        if state.target_velocity == Vec3::ZERO && state.velocity.length_squared() <= rest_speed_sq {
            state.velocity = Vec3::ZERO;
        }

        let mut blocked = false;
        let mut committed = false;

        if suspended {
            state.last_probe = None;
        } else if delta_time > 0.0 && state.velocity.length_squared() > rest_speed_sq {
            // Probe the proposed position, never the old one
            let proposed = viewpoint.position() + state.velocity * delta_time;
            let result = probe(query, proposed, config.collision_distance);

            let position = if result.collided {
                state.velocity =
                    resolve_velocity(state.velocity, result.normal, config.wall_slide_force);
                push_out(proposed, &result, config.surface_epsilon)
            } else {
                proposed
            };

            viewpoint.set_position(position);
            state.last_probe = Some(result);
            blocked = result.collided;
            committed = true;
        }

        self.update_phase(state);

        FrameOutcome {
            position: viewpoint.position(),
            blocked,
            committed,
            phase: state.phase,
        }
    }

    /// Run a probe at an arbitrary position with this controller's settings.
    pub fn probe_at<Q: SceneQuery + ?Sized>(&self, query: &Q, position: Vec3) -> ProbeResult {
        probe(query, position, self.config.collision_distance)
    }

    // ========================================================================
    // Target Velocity
    // ========================================================================

    fn refresh_target(&self, state: &mut MotionState, held: HeldKeys, yaw: f32, suspended: bool) {
        let inputs = TargetInputs {
            held,
            yaw,
            suspended,
            move_speed: self.config.move_speed,
        };

        if state.target_inputs == Some(inputs) {
            return;
        }

        state.target_velocity = if suspended {
            Vec3::ZERO
        } else {
            compute_target_velocity(held, yaw, self.config.move_speed)
        };
        state.target_inputs = Some(inputs);
    }

    // ========================================================================
    // Phase Tracking
    // ========================================================================

    fn update_phase(&self, state: &mut MotionState) {
        let phase = MotionPhase::classify(state.target_velocity, state.velocity);
        if phase != state.phase {
            log::debug!(
                "locomotion {:?} -> {:?} (speed={:.3})",
                state.phase,
                phase,
                state.velocity.length()
            );
            state.phase = phase;
        }
    }
}

impl Default for LocomotionController {
    fn default() -> Self {
        Self::with_default_config()
    }
}

// ============================================================================
// Tests
// ============================================================================
