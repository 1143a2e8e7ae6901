//! Exhibit picking.
//!
//! Finds the exhibit the visitor is looking at by casting a ray along the
//! full look direction and mapping the hit collider back to the exhibit that
//! owns it.

use glam::Vec3;
use museum_physics::SceneQuery;

use crate::museum::{ExhibitId, MuseumScene};

/// Pick the exhibit along a ray.
///
/// Only the nearest collider counts: a wall in front of a stand hides the
/// exhibit behind it.
pub fn pick_exhibit(
    scene: &MuseumScene,
    origin: Vec3,
    direction: Vec3,
    max_distance: f32,
) -> Option<ExhibitId> {
    let hit = scene.colliders.cast_ray(origin, direction, max_distance)?;
    let exhibit = scene.exhibit_for_collider(hit.collider)?;

    log::debug!(
        "picked exhibit {} '{}' at distance {:.2}",
        exhibit.id,
        exhibit.name,
        hit.distance
    );

    Some(exhibit.id)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scene() -> (MuseumScene, ExhibitId) {
        let mut scene = MuseumScene::new("test", "Test Hall");
        let id = scene.add_exhibit("Vase", Vec3::new(0.0, 0.0, -3.0), (0.3, 0.3), 1.0, 2.0);
        (scene, id)
    }

    #[test]
    fn test_pick_in_front() {
        let (scene, id) = scene();
        let picked = pick_exhibit(&scene, Vec3::new(0.0, 1.7, 0.0), Vec3::NEG_Z, 4.0);
        assert_eq!(picked, Some(id));
    }

    #[test]
    fn test_pick_out_of_range() {
        let (scene, _) = scene();
        assert_eq!(pick_exhibit(&scene, Vec3::new(0.0, 1.7, 0.0), Vec3::NEG_Z, 2.0), None);
    }

    #[test]
    fn test_wall_blocks_pick() {
        let (mut scene, _) = scene();
        scene.add_wall(Vec3::new(0.0, 2.5, -1.5), Vec3::new(2.0, 2.5, 0.1));
        assert_eq!(pick_exhibit(&scene, Vec3::new(0.0, 1.7, 0.0), Vec3::NEG_Z, 4.0), None);
    }

    #[test]
    fn test_looking_away_picks_nothing() {
        let (scene, _) = scene();
        assert_eq!(pick_exhibit(&scene, Vec3::new(0.0, 1.7, 0.0), Vec3::Z, 4.0), None);
        assert_eq!(pick_exhibit(&scene, Vec3::new(0.0, 1.7, 0.0), Vec3::ZERO, 4.0), None);
    }
}
