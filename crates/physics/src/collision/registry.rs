//! Registry of static collider boxes.
//!
//! The registry stores every wall and display stand the viewpoint must not
//! pass through, and answers ray queries against them.

use glam::Vec3;
use parry3d::math::{Isometry, Point, Real, Vector};
use parry3d::query::{Ray, RayCast};
use parry3d::shape::Cuboid;
use serde::{Deserialize, Serialize};

use super::query::{RayHit, SceneQuery};

/// Stable handle to a registered collider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ColliderHandle(u32);

impl ColliderHandle {
    /// Index of this collider in registration order.
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// What a collider represents in the scene.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ColliderKind {
    /// Architecture: outer walls, partitions, pillars.
    #[default]
    Wall,
    /// A display stand or plinth that carries an exhibit.
    Stand,
}

/// An axis-aligned box that blocks movement.
///
/// Colliders are never rendered and never change after registration.
#[derive(Debug, Clone)]
pub struct ColliderBox {
    /// Center of the box in world space.
    pub center: Vec3,
    /// Half-size along each axis.
    pub half_extents: Vec3,
    /// What this box stands in for.
    pub kind: ColliderKind,
    shape: Cuboid,
    transform: Isometry<Real>,
}

impl ColliderBox {
    fn new(center: Vec3, half_extents: Vec3, kind: ColliderKind) -> Self {
        let half_extents = half_extents.abs();
        Self {
            center,
            half_extents,
            kind,
            shape: Cuboid::new(Vector::new(half_extents.x, half_extents.y, half_extents.z)),
            transform: Isometry::translation(center.x, center.y, center.z),
        }
    }

    /// Minimum corner.
    #[inline]
    pub fn min(&self) -> Vec3 {
        self.center - self.half_extents
    }

    /// Maximum corner.
    #[inline]
    pub fn max(&self) -> Vec3 {
        self.center + self.half_extents
    }

    /// Check if a point lies inside or on the box.
    pub fn contains_point(&self, point: Vec3) -> bool {
        let min = self.min();
        let max = self.max();
        point.cmpge(min).all() && point.cmple(max).all()
    }

    /// Distance along a normalized ray to this box, if it is hit within
    /// `max_distance`. Rays starting inside report zero.
    fn ray_distance(&self, ray: &Ray, max_distance: f32) -> Option<f32> {
        self.shape.cast_ray(&self.transform, ray, max_distance, true)
    }

    fn ray_normal(&self, ray: &Ray, distance: f32) -> Vec3 {
        self.shape
            .cast_ray_and_get_normal(&self.transform, ray, distance + 0.01, true)
            .map(|hit| Vec3::new(hit.normal.x, hit.normal.y, hit.normal.z))
            .unwrap_or(Vec3::ZERO)
    }
}

/// The static set of colliders for one scene.
///
/// Colliders are appended while the scene is being built and are fixed
/// afterwards: there is no update or removal. The registry can be read
/// every frame through a shared reference.
#[derive(Debug, Default, Clone)]
pub struct ColliderRegistry {
    colliders: Vec<ColliderBox>,
}

impl ColliderRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self {
            colliders: Vec::new(),
        }
    }

    /// Register a wall collider.
    ///
    /// # Arguments
    ///
    /// * `center` - Center of the box in world space
    /// * `half_extents` - Half-size along each axis
    pub fn register(&mut self, center: Vec3, half_extents: Vec3) -> ColliderHandle {
        self.register_kind(center, half_extents, ColliderKind::Wall)
    }

    /// Register a collider of the given kind.
    pub fn register_kind(
        &mut self,
        center: Vec3,
        half_extents: Vec3,
        kind: ColliderKind,
    ) -> ColliderHandle {
        let handle = ColliderHandle(self.colliders.len() as u32);
        self.colliders.push(ColliderBox::new(center, half_extents, kind));
        handle
    }

    /// All registered colliders, in registration order.
    #[inline]
    pub fn all(&self) -> &[ColliderBox] {
        &self.colliders
    }

    /// Look up a collider by handle.
    pub fn get(&self, handle: ColliderHandle) -> Option<&ColliderBox> {
        self.colliders.get(handle.index())
    }

    /// Number of registered colliders.
    #[inline]
    pub fn len(&self) -> usize {
        self.colliders.len()
    }

    /// Whether no colliders have been registered.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.colliders.is_empty()
    }

    /// Check if a point is inside any collider.
    pub fn contains_point(&self, point: Vec3) -> bool {
        self.colliders.iter().any(|c| c.contains_point(point))
    }
}

impl SceneQuery for ColliderRegistry {
    fn cast_ray(&self, origin: Vec3, direction: Vec3, max_distance: f32) -> Option<RayHit> {
        let dir = direction.normalize_or_zero();
        if dir == Vec3::ZERO || !(max_distance > 0.0) {
            return None;
        }

        let ray = Ray::new(
            Point::new(origin.x, origin.y, origin.z),
            Vector::new(dir.x, dir.y, dir.z),
        );

        let mut closest: Option<(f32, usize)> = None;
        for (index, collider) in self.colliders.iter().enumerate() {
            if let Some(distance) = collider.ray_distance(&ray, max_distance) {
                if closest.map_or(true, |(best, _)| distance < best) {
                    closest = Some((distance, index));
                }
            }
        }

        closest.map(|(distance, index)| RayHit {
            distance,
            point: origin + dir * distance,
            normal: self.colliders[index].ray_normal(&ray, distance),
            collider: ColliderHandle(index as u32),
        })
    }
}

// ============================================================================
// Tests
// ============================================================================
