//! First-person locomotion.
//!
//! This module implements smooth walking with collision avoidance:
//!
//! - Held keys become a target velocity on the horizontal plane
//! - Exponential acceleration and deceleration toward that target
//! - An eight-ray probe around the proposed position
//! - Wall sliding by projecting velocity off the contact normal
//!
//! # Design
//!
//! Movement is driven by the [`LocomotionController`], which takes the held
//! keys each frame and updates a [`MotionState`] and a [`Viewpoint`] through
//! any [`SceneQuery`](crate::collision::SceneQuery).
//!
//! There is no gravity, jumping or rigid-body response: the viewpoint keeps
//! its height and only slides horizontally.

mod config;
mod controller;
mod integrator;
mod probe;
mod state;

pub use config::{InvalidConfig, MovementConfig};
pub use controller::{FrameOutcome, LocomotionController, Viewpoint};
pub use integrator::{
    clamp_delta_time, compute_target_velocity, forward_vector, integrate, right_vector,
};
pub use probe::{
    probe, push_out, resolve_velocity, Contact, ProbeResult, PROBE_COUNT, PROBE_DIRECTIONS,
};
pub use state::{HeldKeys, MotionPhase, MotionState, MoveKey};
