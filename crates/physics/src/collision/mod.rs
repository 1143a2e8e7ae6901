//! Static collision geometry for first-person walking.
//!
//! Walls and display stands are registered once as axis-aligned boxes and
//! queried with rays every frame.
//!
//! # Key Types
//!
//! - [`ColliderRegistry`]: Owns every collider box in the scene
//! - [`SceneQuery`]: Ray intersection capability consumed by the prober
//! - [`RayHit`]: Nearest intersection returned by a ray query

mod query;
mod registry;

pub use query::{RayHit, SceneQuery};
pub use registry::{ColliderBox, ColliderHandle, ColliderKind, ColliderRegistry};
