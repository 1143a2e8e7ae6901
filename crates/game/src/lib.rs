//! Museum Walk Session
//!
//! This crate puts the locomotion controller to work inside a museum:
//!
//! - Held-key tracking with a suspension gate
//! - Museum scenes with walls, display stands and exhibits
//! - Exhibit picking and inspection mode
//! - The per-frame walk session and its frame clock
//! - RON configuration files
//!
//! # Architecture
//!
//! Each rendered frame the host calls [`Session::tick`]. The session feeds
//! the held keys and the suspension flag to the controller, which moves the
//! viewpoint through the scene's collider registry.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                        Walk Session                          │
//! │  ┌─────────┐    ┌──────────────┐    ┌─────────────────────┐ │
//! │  │ Input   │───►│ Locomotion   │───►│ Viewpoint           │ │
//! │  │ Tracker │    │ (integrate,  │    │ (eye position, yaw, │ │
//! │  └─────────┘    │  probe,      │    │  pitch)             │ │
//! │       ▲         │  resolve)    │    └─────────────────────┘ │
//! │       │         └──────┬───────┘                            │
//! │  inspection /          │ rays                               │
//! │  orbit camera   ┌──────▼───────┐                            │
//! │                 │ Museum Scene │                            │
//! │                 │ (colliders)  │                            │
//! │                 └──────────────┘                            │
//! └─────────────────────────────────────────────────────────────┘
//! ```

pub mod config;
pub mod input;
pub mod inspect;
pub mod museum;
pub mod session;
pub mod viewpoint;

// Re-export main types
pub use config::{ConfigError, SessionConfig};
pub use input::InputTracker;
pub use inspect::pick_exhibit;
pub use museum::{Exhibit, ExhibitId, MuseumScene, SpawnPoint};
pub use session::{FrameClock, FrameReport, Session};
pub use viewpoint::FirstPersonView;

// Re-export physics types for convenience
pub use museum_physics::{
    ColliderRegistry, LocomotionController, MotionPhase, MotionState, MoveKey, MovementConfig,
};
