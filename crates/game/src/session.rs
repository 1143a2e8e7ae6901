//! Walk session - the per-frame driver.
//!
//! A session owns the scene, the input tracker, the viewpoint and the motion
//! state, and advances them once per rendered frame. Whatever schedules
//! frames in the host environment calls [`Session::tick`] or
//! [`Session::tick_at`]; the session itself never blocks or spawns work.

use glam::Vec3;
use museum_physics::{FrameOutcome, LocomotionController, MotionPhase, MotionState, MoveKey};

use crate::config::SessionConfig;
use crate::input::InputTracker;
use crate::inspect::pick_exhibit;
use crate::museum::{ExhibitId, MuseumScene};
use crate::viewpoint::FirstPersonView;

/// Turns monotonic timestamps into frame steps.
#[derive(Debug, Clone, Default)]
pub struct FrameClock {
    last_ms: Option<f64>,
}

impl FrameClock {
    /// Create a clock that has not seen a frame yet.
    pub fn new() -> Self {
        Self::default()
    }

    /// Step in seconds since the latest timestamp seen.
    ///
    /// The first frame, and any timestamp that goes backwards or is not
    /// finite, yields zero. A backwards timestamp is not remembered, so the
    /// frame after it is measured from the latest good one.
    pub fn advance(&mut self, now_ms: f64) -> f32 {
        if !now_ms.is_finite() {
            return 0.0;
        }

        match self.last_ms {
            Some(last) if now_ms > last => {
                self.last_ms = Some(now_ms);
                ((now_ms - last) / 1000.0) as f32
            }
            Some(_) => 0.0,
            None => {
                self.last_ms = Some(now_ms);
                0.0
            }
        }
    }

    /// Forget the last timestamp, so the next frame starts fresh.
    pub fn reset(&mut self) {
        self.last_ms = None;
    }
}

/// Summary of one session frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameReport {
    /// Frame number, starting at 0 for the first tick after `new`.
    pub frame: u64,

    /// Eye position after the frame.
    pub position: Vec3,

    /// Whether the collision probe touched something this frame.
    pub blocked: bool,

    /// Motion phase after the frame.
    pub phase: MotionPhase,
}

/// A visitor walking through a museum scene.
#[derive(Debug)]
pub struct Session {
    /// Frames ticked so far.
    pub frame: u64,

    /// Session configuration.
    pub config: SessionConfig,

    /// The scene being walked.
    pub scene: MuseumScene,

    /// Camera the visitor sees through.
    pub view: FirstPersonView,

    /// Held keys and suspension gate.
    pub input: InputTracker,

    /// Velocity state carried between frames.
    pub motion: MotionState,

    controller: LocomotionController,
    clock: FrameClock,
    running: bool,
    inspecting: Option<ExhibitId>,
    orbit_camera: bool,
}

impl Session {
    /// Create a stopped session at the scene's spawn point.
    pub fn new(config: SessionConfig, scene: MuseumScene) -> Self {
        let controller = LocomotionController::new(config.movement.clone());
        let view = FirstPersonView::new(scene.spawn.position, scene.spawn.facing);

        Self {
            frame: 0,
            config,
            scene,
            view,
            input: InputTracker::new(),
            motion: MotionState::new(),
            controller,
            clock: FrameClock::new(),
            running: false,
            inspecting: None,
            orbit_camera: false,
        }
    }

    /// Create a session with default configuration in the demo gallery.
    pub fn gallery() -> Self {
        Self::new(SessionConfig::default(), MuseumScene::gallery())
    }

    // ========================================================================
    // Start / Stop
    // ========================================================================

    /// Start accepting frames.
    pub fn start(&mut self) {
        if self.running {
            return;
        }
        self.running = true;
        self.clock.reset();
        log::info!(
            "session started in '{}' at {:?}",
            self.scene.name,
            self.view.position
        );
    }

    /// Stop accepting frames. Motion is halted and held keys are dropped.
    pub fn stop(&mut self) {
        if !self.running {
            return;
        }
        self.running = false;
        self.motion = MotionState::new();
        self.input = InputTracker::new();
        self.input.set_suspended(self.is_suspended());
        log::info!("session stopped after {} frames", self.frame);
    }

    /// Whether the session is accepting frames.
    #[inline]
    pub fn is_running(&self) -> bool {
        self.running
    }

    // ========================================================================
    // Frames
    // ========================================================================

    /// Advance one frame by `delta_time` seconds.
    ///
    /// Returns `None` when the session is stopped.
    pub fn tick(&mut self, delta_time: f32) -> Option<FrameReport> {
        if !self.running {
            return None;
        }

        let FrameOutcome {
            position,
            blocked,
            phase,
            ..
        } = self.controller.update(
            &mut self.motion,
            self.input.held_keys(),
            self.input.is_suspended(),
            &self.scene.colliders,
            &mut self.view,
            delta_time,
        );

        let report = FrameReport {
            frame: self.frame,
            position,
            blocked,
            phase,
        };
        self.frame += 1;
        Some(report)
    }

    /// Advance one frame using a monotonic timestamp in milliseconds.
    pub fn tick_at(&mut self, now_ms: f64) -> Option<FrameReport> {
        if !self.running {
            return None;
        }
        let delta_time = self.clock.advance(now_ms);
        self.tick(delta_time)
    }

    // ========================================================================
    // Input
    // ========================================================================

    /// Forward a key press.
    pub fn key_down(&mut self, key: MoveKey) {
        self.input.on_key_down(key);
    }

    /// Forward a key release.
    pub fn key_up(&mut self, key: MoveKey) {
        self.input.on_key_up(key);
    }

    /// Forward a physical key event. Returns whether the key moves the view.
    pub fn key_code(&mut self, code: &str, pressed: bool) -> bool {
        self.input.handle_key_code(code, pressed)
    }

    /// Forward a mouse movement in pixels. Ignored while suspended.
    pub fn mouse_move(&mut self, delta: (f32, f32)) {
        if self.is_suspended() {
            return;
        }
        self.view.apply_mouse(delta, self.config.mouse_sensitivity);
    }

    // ========================================================================
    // Suspension
    // ========================================================================

    /// Whether walking is suspended by inspection or the orbit camera.
    #[inline]
    pub fn is_suspended(&self) -> bool {
        self.inspecting.is_some() || self.orbit_camera
    }

    /// The exhibit being inspected, if any.
    #[inline]
    pub fn inspecting(&self) -> Option<ExhibitId> {
        self.inspecting
    }

    /// Switch the orbit camera on or off.
    pub fn set_orbit_camera(&mut self, enabled: bool) {
        self.orbit_camera = enabled;
        self.sync_suspension();
    }

    /// Inspect the exhibit in the middle of the view, if one is in range.
    pub fn inspect_focused(&mut self) -> Option<ExhibitId> {
        let id = pick_exhibit(
            &self.scene,
            self.view.position,
            self.view.look_direction(),
            self.config.inspect_range,
        )?;
        self.inspect(id).then_some(id)
    }

    /// Start inspecting an exhibit. Returns `false` for unknown IDs.
    pub fn inspect(&mut self, id: ExhibitId) -> bool {
        let Some(exhibit) = self.scene.exhibit(id) else {
            return false;
        };
        log::info!("inspecting exhibit {} '{}'", exhibit.id, exhibit.name);

        self.inspecting = Some(id);
        self.sync_suspension();
        true
    }

    /// Leave inspection mode.
    pub fn end_inspection(&mut self) {
        if let Some(id) = self.inspecting.take() {
            log::info!("finished inspecting exhibit {id}");
        }
        self.sync_suspension();
    }

    fn sync_suspension(&mut self) {
        self.input.set_suspended(self.is_suspended());
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use museum_physics::MovementConfig;

    const DT: f32 = 1.0 / 60.0;

    fn running() -> Session {
        let mut session = Session::gallery();
        session.start();
        session
    }

    #[test]
    fn test_session_creation() {
        let session = Session::gallery();
        assert_eq!(session.frame, 0);
        assert!(!session.is_running());
        assert_eq!(session.view.position, Vec3::new(0.0, 1.7, 6.0));
    }

    #[test]
    fn test_stopped_session_ignores_ticks() {
        let mut session = Session::gallery();
        session.key_down(MoveKey::Forward);
        assert!(session.tick(DT).is_none());
        assert!(session.tick_at(16.0).is_none());
        assert_eq!(session.frame, 0);
        assert_eq!(session.view.position, Vec3::new(0.0, 1.7, 6.0));
    }

    #[test]
    fn test_tick_advances_frame() {
        let mut session = running();
        let report = session.tick(DT).unwrap();
        assert_eq!(report.frame, 0);
        assert_eq!(report.phase, MotionPhase::Idle);
        assert_eq!(session.tick(DT).unwrap().frame, 1);
        assert_eq!(session.frame, 2);
    }

    #[test]
    fn test_wall_scenario() {
        let mut session = running();
        session.key_down(MoveKey::Forward);

        let mut blocked_frames = 0;
        for _ in 0..600 {
            let report = session.tick(DT).unwrap();
            assert!(report.position.z > -9.42, "walked through the partition: {report:?}");
            if report.blocked {
                blocked_frames += 1;
            }
        }

        assert!(blocked_frames > 0);
        assert!((session.view.position.z + 9.41).abs() < 0.02);
        assert_eq!(session.view.position.y, 1.7);
    }

    #[test]
    fn test_stop_halts_motion() {
        let mut session = running();
        session.key_down(MoveKey::Forward);
        for _ in 0..30 {
            session.tick(DT);
        }
        let rest_speed = session.config.movement.rest_speed;
        assert!(session.motion.is_moving(rest_speed));

        session.stop();
        assert!(!session.motion.is_moving(rest_speed));
        assert!(session.input.held_keys().is_empty());

        session.start();
        let position = session.view.position;
        session.tick(DT);
        assert_eq!(session.view.position, position);
    }

    #[test]
    fn test_tick_at_uses_clock() {
        let mut session = running();
        session.key_down(MoveKey::Forward);

        // First frame has no step
        let report = session.tick_at(1000.0).unwrap();
        assert_eq!(report.position, Vec3::new(0.0, 1.7, 6.0));

        let report = session.tick_at(1016.0).unwrap();
        assert!(report.position.z < 6.0);

        // Clock going backwards does not move anything
        let before = session.view.position;
        session.tick_at(900.0);
        assert_eq!(session.view.position, before);
    }

    #[test]
    fn test_inspection_suspends_and_decays() {
        let mut session = running();
        session.key_down(MoveKey::Forward);
        for _ in 0..60 {
            session.tick(DT);
        }
        let speed = session.motion.speed();

        assert!(session.inspect(1));
        assert!(session.is_suspended());
        assert!(session.input.held_keys().is_empty());

        let position = session.view.position;
        let report = session.tick(DT).unwrap();
        assert_eq!(report.position, position);
        assert_eq!(session.motion.target_velocity, Vec3::ZERO);
        assert!(session.motion.speed() > 0.0);
        assert!(session.motion.speed() < speed);

        // Presses during inspection are dropped
        session.key_down(MoveKey::Forward);
        session.end_inspection();
        assert!(!session.is_suspended());
        assert!(session.input.held_keys().is_empty());
    }

    #[test]
    fn test_orbit_camera_is_equivalent_trigger() {
        let mut session = running();
        session.key_down(MoveKey::Left);
        session.set_orbit_camera(true);
        assert!(session.is_suspended());
        assert!(session.input.held_keys().is_empty());

        // Leaving inspection while orbiting keeps walking suspended
        assert!(session.inspect(2));
        session.end_inspection();
        assert!(session.is_suspended());

        session.set_orbit_camera(false);
        assert!(!session.is_suspended());
    }

    #[test]
    fn test_inspect_focused() {
        let mut session = running();
        // Stand 2 m in front of the Amphora stand at (3, 0, -4)
        session.view.position = Vec3::new(3.0, 1.7, -2.0);
        session.view.yaw = 0.0;

        let id = session.inspect_focused().expect("amphora should be in view");
        assert_eq!(session.scene.exhibit(id).unwrap().name, "Amphora");
        assert_eq!(session.inspecting(), Some(id));

        session.end_inspection();
        session.view.yaw = std::f32::consts::PI;
        assert!(session.inspect_focused().is_none());
        assert!(!session.is_suspended());
    }

    #[test]
    fn test_unknown_exhibit() {
        let mut session = running();
        assert!(!session.inspect(99));
        assert!(!session.is_suspended());
    }

    #[test]
    fn test_mouse_ignored_while_suspended() {
        let mut session = running();
        session.mouse_move((100.0, 0.0));
        let yaw = session.view.yaw;
        assert!(yaw != 0.0);

        session.set_orbit_camera(true);
        session.mouse_move((100.0, 0.0));
        assert_eq!(session.view.yaw, yaw);
    }

    #[test]
    fn test_custom_movement_config() {
        let config = SessionConfig {
            movement: MovementConfig::leisurely(),
            ..Default::default()
        };
        let mut session = Session::new(config, MuseumScene::gallery());
        session.start();
        session.key_down(MoveKey::Forward);
        for _ in 0..300 {
            session.tick(DT);
        }
        assert!(session.motion.speed() <= 1.8 + 1e-5);
    }

    #[test]
    fn test_frame_clock() {
        let mut clock = FrameClock::new();
        assert_eq!(clock.advance(500.0), 0.0);
        assert!((clock.advance(516.0) - 0.016).abs() < 1e-6);
        assert_eq!(clock.advance(f64::NAN), 0.0);
        assert!((clock.advance(532.0) - 0.016).abs() < 1e-6);

        clock.reset();
        assert_eq!(clock.advance(10_000.0), 0.0);
    }

    #[test]
    fn test_frame_clock_glitch_costs_one_frame() {
        let mut clock = FrameClock::new();
        clock.advance(1000.0);
        assert!((clock.advance(1016.0) - 0.016).abs() < 1e-6);

        // Clock jumps back, then resumes at its old pace
        assert_eq!(clock.advance(200.0), 0.0);
        assert_eq!(clock.advance(216.0), 0.0);
        assert!((clock.advance(1032.0) - 0.016).abs() < 1e-6);
    }

    #[test]
    fn test_corner_keeps_rest_distance() {
        let mut session = running();
        // Near the gallery's north-west corner: west face x = -9.9, north face z = -11.9
        session.view.position = Vec3::new(-8.0, 1.7, -11.0);
        session.view.yaw = 0.0;
        session.key_down(MoveKey::Forward);
        session.key_down(MoveKey::Left);
        let rest = session.config.movement.rest_distance();

        for _ in 0..600 {
            let report = session.tick(DT).unwrap();
            assert!(report.position.x + 9.9 >= rest - 1e-4, "{report:?}");
            assert!(report.position.z + 11.9 >= rest - 1e-4, "{report:?}");
        }

        assert!(session.view.position.x + 9.9 < 0.6);
        assert!(session.view.position.z + 11.9 < 0.6);
    }
}
