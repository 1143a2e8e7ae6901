//! Ray queries against static scene geometry.

use glam::Vec3;

use super::registry::ColliderHandle;

/// Nearest intersection of a ray with the scene.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RayHit {
    /// Distance from the ray origin to the hit point.
    ///
    /// Zero when the ray starts inside a collider.
    pub distance: f32,

    /// Hit point in world space.
    pub point: Vec3,

    /// Outward surface normal at the hit point.
    ///
    /// Zero when the ray starts inside a collider, since there is no
    /// meaningful face to report.
    pub normal: Vec3,

    /// The collider that was hit.
    pub collider: ColliderHandle,
}

/// Capability to intersect rays with the static scene.
///
/// This is the only read the locomotion core performs on external geometry.
/// [`ColliderRegistry`](super::ColliderRegistry) is the stock implementation.
pub trait SceneQuery {
    /// Cast a ray and return the nearest hit within `max_distance`.
    ///
    /// `direction` does not need to be normalized. A zero-length direction
    /// never hits anything.
    fn cast_ray(&self, origin: Vec3, direction: Vec3, max_distance: f32) -> Option<RayHit>;
}

impl<T: SceneQuery + ?Sized> SceneQuery for &T {
    fn cast_ray(&self, origin: Vec3, direction: Vec3, max_distance: f32) -> Option<RayHit> {
        (**self).cast_ray(origin, direction, max_distance)
    }
}
