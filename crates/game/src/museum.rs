//! Museum scene: collider layout, exhibits and the spawn point.

use glam::Vec3;
use museum_physics::{ColliderHandle, ColliderKind, ColliderRegistry};
use serde::{Deserialize, Serialize};

/// Identifier of an exhibit within its scene.
pub type ExhibitId = u32;

/// An inspectable object on a display stand.
///
/// Each exhibit owns the handle of the collider that blocks walking into
/// its stand. The pairing is fixed when the exhibit is created.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Exhibit {
    /// Unique exhibit ID.
    pub id: ExhibitId,

    /// Display name.
    pub name: String,

    /// Where the object sits, on top of its stand.
    pub position: Vec3,

    /// Collider of the stand carrying this exhibit.
    pub collider: ColliderHandle,
}

/// Where and how the visitor enters the scene.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpawnPoint {
    /// Eye position in world space.
    pub position: Vec3,

    /// Initial heading (yaw in radians).
    pub facing: f32,
}

/// A walkable museum scene.
#[derive(Debug)]
pub struct MuseumScene {
    /// Scene identifier.
    pub id: String,

    /// Display name.
    pub name: String,

    /// Walls and stands.
    pub colliders: ColliderRegistry,

    /// Inspectable objects.
    pub exhibits: Vec<Exhibit>,

    /// Visitor entry point.
    pub spawn: SpawnPoint,

    next_exhibit_id: ExhibitId,
}

impl MuseumScene {
    /// Create an empty scene with a spawn at the origin.
    pub fn new(id: &str, name: &str) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            colliders: ColliderRegistry::new(),
            exhibits: Vec::new(),
            spawn: SpawnPoint {
                position: Vec3::ZERO,
                facing: 0.0,
            },
            next_exhibit_id: 1,
        }
    }

    /// Add a wall collider.
    pub fn add_wall(&mut self, center: Vec3, half_extents: Vec3) -> ColliderHandle {
        self.colliders.register(center, half_extents)
    }

    /// Add a display stand with an exhibit on top.
    ///
    /// The stand collider reaches `collider_height` above the floor, which
    /// should clear eye height: probe rays are cast at the eye, so a stand
    /// collider lower than that would not be seen.
    ///
    /// # Arguments
    ///
    /// * `name` - Exhibit display name
    /// * `base` - Floor-level center of the stand
    /// * `footprint` - Half-size of the stand in X and Z
    /// * `stand_height` - Height of the visible stand top
    /// * `collider_height` - Height of the blocking column
    pub fn add_exhibit(
        &mut self,
        name: &str,
        base: Vec3,
        footprint: (f32, f32),
        stand_height: f32,
        collider_height: f32,
    ) -> ExhibitId {
        let half_height = collider_height.max(stand_height) / 2.0;
        let collider = self.colliders.register_kind(
            base + Vec3::new(0.0, half_height, 0.0),
            Vec3::new(footprint.0, half_height, footprint.1),
            ColliderKind::Stand,
        );

        let id = self.next_exhibit_id;
        self.next_exhibit_id += 1;

        self.exhibits.push(Exhibit {
            id,
            name: name.to_string(),
            position: base + Vec3::new(0.0, stand_height, 0.0),
            collider,
        });

        id
    }

    /// Get an exhibit by ID.
    pub fn exhibit(&self, id: ExhibitId) -> Option<&Exhibit> {
        self.exhibits.iter().find(|e| e.id == id)
    }

    /// Find the exhibit that owns a collider, if any.
    pub fn exhibit_for_collider(&self, handle: ColliderHandle) -> Option<&Exhibit> {
        self.exhibits.iter().find(|e| e.collider == handle)
    }

    /// The demo gallery.
    ///
    /// A 20 x 24 room with a partition wall across its far end, a pillar,
    /// and five display stands. The visitor starts at `(0, 1.7, 6)` looking
    /// toward the partition.
    pub fn gallery() -> Self {
        let mut scene = Self::new("gallery", "Main Gallery");

        let wall_height = 5.0;
        let half_height = wall_height / 2.0;
        let thickness = 0.1;

        // Outer walls
        scene.add_wall(
            Vec3::new(0.0, half_height, -12.0),
            Vec3::new(10.0, half_height, thickness),
        );
        scene.add_wall(
            Vec3::new(0.0, half_height, 12.0),
            Vec3::new(10.0, half_height, thickness),
        );
        scene.add_wall(
            Vec3::new(-10.0, half_height, 0.0),
            Vec3::new(thickness, half_height, 12.0),
        );
        scene.add_wall(
            Vec3::new(10.0, half_height, 0.0),
            Vec3::new(thickness, half_height, 12.0),
        );

        // Partition in front of the back room
        scene.add_wall(
            Vec3::new(0.0, half_height, -10.0),
            Vec3::new(5.0, half_height, thickness),
        );

        // Pillar
        scene.add_wall(Vec3::new(-6.0, half_height, 0.0), Vec3::new(0.4, half_height, 0.4));

        // Stands
        let collider_height = 2.2;
        scene.add_exhibit("Bronze Horse", Vec3::new(-3.0, 0.0, -4.0), (0.4, 0.4), 1.0, collider_height);
        scene.add_exhibit("Amphora", Vec3::new(3.0, 0.0, -4.0), (0.4, 0.4), 1.0, collider_height);
        scene.add_exhibit("Marble Bust", Vec3::new(6.0, 0.0, 3.0), (0.35, 0.35), 1.2, collider_height);
        scene.add_exhibit("Astrolabe", Vec3::new(-7.5, 0.0, -8.0), (0.3, 0.3), 1.1, collider_height);
        scene.add_exhibit("Meteorite", Vec3::new(0.0, 0.0, -11.0), (0.5, 0.5), 0.8, collider_height);

        scene.spawn = SpawnPoint {
            position: Vec3::new(0.0, 1.7, 6.0),
            facing: 0.0,
        };

        log::debug!(
            "built scene '{}': {} colliders, {} exhibits",
            scene.id,
            scene.colliders.len(),
            scene.exhibits.len()
        );

        scene
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use museum_physics::SceneQuery;

    #[test]
    fn test_scene_creation() {
        let scene = MuseumScene::new("test", "Test Hall");
        assert_eq!(scene.id, "test");
        assert!(scene.colliders.is_empty());
        assert!(scene.exhibits.is_empty());
    }

    #[test]
    fn test_exhibit_owns_its_collider() {
        let mut scene = MuseumScene::new("test", "Test Hall");
        scene.add_wall(Vec3::new(0.0, 2.5, -5.0), Vec3::new(5.0, 2.5, 0.1));
        let id = scene.add_exhibit("Vase", Vec3::new(1.0, 0.0, 0.0), (0.3, 0.3), 1.0, 2.0);

        let exhibit = scene.exhibit(id).unwrap();
        assert_eq!(exhibit.name, "Vase");
        assert_eq!(exhibit.position, Vec3::new(1.0, 1.0, 0.0));

        let collider = scene.colliders.get(exhibit.collider).unwrap();
        assert_eq!(collider.kind, ColliderKind::Stand);
        assert_eq!(collider.min().y, 0.0);
        assert_eq!(collider.max().y, 2.0);

        assert_eq!(scene.exhibit_for_collider(exhibit.collider).unwrap().id, id);
    }

    #[test]
    fn test_walls_have_no_exhibit() {
        let mut scene = MuseumScene::new("test", "Test Hall");
        let wall = scene.add_wall(Vec3::ZERO, Vec3::ONE);
        assert!(scene.exhibit_for_collider(wall).is_none());
    }

    #[test]
    fn test_gallery() {
        let scene = MuseumScene::gallery();
        assert_eq!(scene.exhibits.len(), 5);
        assert_eq!(scene.spawn.position, Vec3::new(0.0, 1.7, 6.0));
        assert!(!scene.colliders.contains_point(scene.spawn.position));

        // Straight ahead from the spawn is the partition face at z = -9.9
        let hit = scene
            .colliders
            .cast_ray(scene.spawn.position, Vec3::NEG_Z, 100.0)
            .unwrap();
        assert!((hit.point.z + 9.9).abs() < 0.01);
        assert!(scene.exhibit_for_collider(hit.collider).is_none());

        // Every stand clears eye height
        for exhibit in &scene.exhibits {
            let collider = scene.colliders.get(exhibit.collider).unwrap();
            assert!(collider.max().y > scene.spawn.position.y);
        }
    }
}
