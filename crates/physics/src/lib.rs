//! Museum Walk Physics
//!
//! Collision avoidance and smoothed first-person movement for walking
//! through a static scene, without a full physics engine.
//!
//! # Architecture
//!
//! The crate is split into two systems:
//!
//! - **Collision**: A registry of static boxes that answers ray queries
//! - **Movement**: Uses those ray queries to probe around the viewpoint and
//!   slide it along whatever it touches
//!
//! # Design Principles
//!
//! 1. **Frame-rate independence**: Smoothing uses exponential curves
//! 2. **Graceful degradation**: Degenerate input means "no movement", never a panic
//! 3. **Fixed order**: target, integrate, probe, resolve, commit
//! 4. **Bounded work**: Eight rays times the collider count per frame

pub mod collision;
pub mod movement;

// Re-export commonly used types
pub use collision::{
    ColliderBox, ColliderHandle, ColliderKind, ColliderRegistry, RayHit, SceneQuery,
};
pub use movement::{
    FrameOutcome, HeldKeys, LocomotionController, MotionPhase, MotionState, MoveKey,
    MovementConfig, ProbeResult, Viewpoint,
};
