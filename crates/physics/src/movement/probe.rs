//! Multi-ray collision probe and wall-slide response.
//!
//! Instead of sweeping a shape through the world, the prober casts a fixed
//! bundle of eight horizontal rays from the proposed next position. Any ray
//! that finds a surface closer than the collision distance contributes a
//! push direction away from that surface. The velocity is then clipped
//! against the aggregate normal so the viewpoint slides along walls instead
//! of stopping dead.
//!
//! # Known limitation
//!
//! Eight rays sample the surroundings; they do not cover them. An obstacle
//! thin enough to fit between two rays, or one crossed entirely within a
//! single frame, is not detected (tunneling). With the default speed and
//! frame-step clamp a frame moves at most 0.28 units, well inside the 0.5
//! unit probe range, so walls and stands of ordinary size are always seen.

use std::f32::consts::FRAC_1_SQRT_2;

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::collision::SceneQuery;

/// Number of rays in one probe.
pub const PROBE_COUNT: usize = 8;

/// Horizontal probe directions: the four axes, then the four diagonals.
pub const PROBE_DIRECTIONS: [Vec3; PROBE_COUNT] = [
    Vec3::new(1.0, 0.0, 0.0),
    Vec3::new(-1.0, 0.0, 0.0),
    Vec3::new(0.0, 0.0, 1.0),
    Vec3::new(0.0, 0.0, -1.0),
    Vec3::new(FRAC_1_SQRT_2, 0.0, FRAC_1_SQRT_2),
    Vec3::new(FRAC_1_SQRT_2, 0.0, -FRAC_1_SQRT_2),
    Vec3::new(-FRAC_1_SQRT_2, 0.0, FRAC_1_SQRT_2),
    Vec3::new(-FRAC_1_SQRT_2, 0.0, -FRAC_1_SQRT_2),
];

/// Floor on how well a contact lines up with the push normal.
///
/// A surface nearly edge-on to the normal would otherwise ask for an
/// unbounded push.
const MIN_ALIGNMENT: f32 = 0.25;

/// One ray's contact with a surface.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Contact {
    /// Outward normal of the surface that was hit.
    pub normal: Vec3,

    /// How far inside the collision distance the surface is, measured
    /// perpendicular to it.
    pub depth: f32,
}

impl Contact {
    const NONE: Self = Self {
        normal: Vec3::ZERO,
        depth: 0.0,
    };
}

/// Outcome of one frame's probe.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ProbeResult {
    /// Whether any ray found a surface within the collision distance.
    pub collided: bool,

    /// Aggregate unit normal pointing away from the touched surfaces.
    ///
    /// Zero when nothing was hit, or when the pushes cancelled out.
    pub normal: Vec3,

    /// How far inside the collision distance the nearest surface is.
    pub push_distance: f32,

    /// Number of rays that hit within range.
    pub hit_count: usize,

    /// Per-ray contacts; the first `hit_count` entries are filled.
    pub contacts: [Contact; PROBE_COUNT],
}

impl ProbeResult {
    /// A probe that touched nothing.
    pub const CLEAR: Self = Self {
        collided: false,
        normal: Vec3::ZERO,
        push_distance: 0.0,
        hit_count: 0,
        contacts: [Contact::NONE; PROBE_COUNT],
    };

    /// Contacts found by the probe.
    pub fn contacts(&self) -> &[Contact] {
        &self.contacts[..self.hit_count]
    }
}

/// Cast the probe bundle from `proposed` and aggregate the hits.
///
/// # Arguments
///
/// * `query` - Scene geometry to probe
/// * `proposed` - Position the viewpoint would move to this frame
/// * `collision_distance` - Surfaces closer than this count as contact
pub fn probe<Q: SceneQuery + ?Sized>(
    query: &Q,
    proposed: Vec3,
    collision_distance: f32,
) -> ProbeResult {
    let mut push = Vec3::ZERO;
    let mut deepest = 0.0f32;
    let mut contacts = [Contact::NONE; PROBE_COUNT];
    let mut hit_count = 0;

    for direction in PROBE_DIRECTIONS {
        let Some(hit) = query.cast_ray(proposed, direction, collision_distance) else {
            continue;
        };
        if hit.distance >= collision_distance {
            continue;
        }

        // Diagonal rays reach a flat face further away than it really is
        let gap = hit.distance * direction.dot(hit.normal).abs();
        let depth = (collision_distance - gap).max(0.0);

        contacts[hit_count] = Contact {
            normal: hit.normal,
            depth,
        };
        hit_count += 1;
        deepest = deepest.max(depth);

        // A ray starting inside a collider hits at the origin; it has no
        // direction to contribute.
        push += (proposed - hit.point).normalize_or_zero();
    }

    if hit_count == 0 {
        return ProbeResult::CLEAR;
    }

    ProbeResult {
        collided: true,
        normal: push.normalize_or_zero(),
        push_distance: deepest,
        hit_count,
        contacts,
    }
}

/// Clip a velocity against a contact normal and damp the slide.
///
/// Only velocity heading into the surface is touched: the inward component
/// is removed, any residual inward drift is projected away, and what is
/// left is scaled by `wall_slide_force` so repeated grazing contacts cannot
/// gain energy.
pub fn resolve_velocity(velocity: Vec3, normal: Vec3, wall_slide_force: f32) -> Vec3 {
    let into = velocity.dot(normal);
    if into >= 0.0 {
        return velocity;
    }

    let mut clipped = velocity - normal * into;

    // Floating-point leftovers
    let residual = clipped.dot(normal);
    if residual < 0.0 {
        clipped -= normal * residual;
    }

    clipped * wall_slide_force
}

/// Move a proposed position out of contact along the probe normal.
///
/// Every touched surface ends up at least `surface_epsilon` short of the
/// collision distance, so the next frame's probe does not flicker on the
/// exact threshold. In a corner the normal is oblique to each wall, so the
/// push is scaled up until the worst contact is cleared.
pub fn push_out(proposed: Vec3, result: &ProbeResult, surface_epsilon: f32) -> Vec3 {
    if !result.collided {
        return proposed;
    }

    let mut distance = 0.0f32;
    for contact in result.contacts() {
        let alignment = result.normal.dot(contact.normal);
        if alignment <= 0.0 {
            // Moving along the normal cannot clear this surface
            continue;
        }
        let needed = (contact.depth - surface_epsilon) / alignment.max(MIN_ALIGNMENT);
        distance = distance.max(needed);
    }

    proposed + result.normal * distance
}
