//! Target velocity from held keys, and exponential smoothing toward it.
//!
//! Both curves are frame-rate independent: integrating one step of `dt`
//! gives the same velocity as `n` steps of `dt / n`.

use glam::Vec3;

use super::state::{HeldKeys, MoveKey};

/// Horizontal forward direction for a yaw angle.
///
/// Yaw 0 looks down `-Z`; positive yaw turns left (counter-clockwise seen
/// from above).
#[inline]
pub fn forward_vector(yaw: f32) -> Vec3 {
    let (sin_yaw, cos_yaw) = yaw.sin_cos();
    Vec3::new(-sin_yaw, 0.0, -cos_yaw)
}

/// Horizontal right direction for a yaw angle (`forward × up`).
#[inline]
pub fn right_vector(yaw: f32) -> Vec3 {
    let (sin_yaw, cos_yaw) = yaw.sin_cos();
    Vec3::new(cos_yaw, 0.0, -sin_yaw)
}

/// Convert held keys into the velocity the viewpoint should reach.
///
/// Only yaw is used, so movement stays on the horizontal plane whatever the
/// pitch. The result never exceeds `move_speed`, so diagonals are no faster
/// than straight lines.
pub fn compute_target_velocity(held: HeldKeys, yaw: f32, move_speed: f32) -> Vec3 {
    if !yaw.is_finite() || !(move_speed > 0.0) {
        return Vec3::ZERO;
    }

    let forward = forward_vector(yaw) * move_speed;
    let right = right_vector(yaw) * move_speed;

    let mut target = Vec3::ZERO;
    for key in held.iter() {
        match key {
            MoveKey::Forward => target += forward,
            MoveKey::Back => target -= forward,
            MoveKey::Right => target += right,
            MoveKey::Left => target -= right,
        }
    }

    // Opposing keys cancel to float noise; treat it as no input
    if target.length_squared() < 1e-10 {
        return Vec3::ZERO;
    }

    if target.length_squared() > move_speed * move_speed {
        target = target.normalize() * move_speed;
    }

    target
}

/// Clamp a frame step into `[0, max_delta_time]`.
///
/// Negative or non-finite steps (clock anomalies) become zero.
#[inline]
pub fn clamp_delta_time(delta_time: f32, max_delta_time: f32) -> f32 {
    if delta_time.is_finite() && delta_time > 0.0 {
        delta_time.min(max_delta_time)
    } else {
        0.0
    }
}

/// Advance `velocity` toward `target_velocity` by one step.
///
/// With a non-zero target the velocity closes `1 - e^(-acceleration * dt)`
/// of the remaining gap. With a zero target it decays by
/// `e^(-deceleration * dt)` and never stops instantly.
///
/// `delta_time` should already be clamped with [`clamp_delta_time`]; a zero
/// or negative step leaves the velocity unchanged.
pub fn integrate(
    velocity: Vec3,
    target_velocity: Vec3,
    delta_time: f32,
    acceleration: f32,
    deceleration: f32,
) -> Vec3 {
    let velocity = if velocity.is_finite() { velocity } else { Vec3::ZERO };
    let target = if target_velocity.is_finite() {
        target_velocity
    } else {
        Vec3::ZERO
    };

    if !(delta_time > 0.0) || !delta_time.is_finite() {
        return velocity;
    }

    if target != Vec3::ZERO {
        let blend = 1.0 - (-acceleration * delta_time).exp();
        velocity + (target - velocity) * blend
    } else {
        velocity * (-deceleration * delta_time).exp()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::{FRAC_PI_2, PI, TAU};

    const SPEED: f32 = 2.8;

    fn held(keys: &[MoveKey]) -> HeldKeys {
        HeldKeys::from_keys(keys)
    }

    #[test]
    fn test_basis_vectors() {
        assert!((forward_vector(0.0) - Vec3::NEG_Z).length() < 1e-6);
        assert!((right_vector(0.0) - Vec3::X).length() < 1e-6);

        // Quarter turn left: forward becomes -X
        assert!((forward_vector(FRAC_PI_2) - Vec3::NEG_X).length() < 1e-6);
        assert!((right_vector(FRAC_PI_2) - Vec3::NEG_Z).length() < 1e-6);

        for i in 0..16 {
            let yaw = i as f32 * TAU / 16.0;
            let cross = forward_vector(yaw).cross(Vec3::Y);
            assert!((cross - right_vector(yaw)).length() < 1e-5);
        }
    }

    #[test]
    fn test_single_key_directions() {
        let v = compute_target_velocity(held(&[MoveKey::Forward]), 0.0, SPEED);
        assert!((v - Vec3::new(0.0, 0.0, -SPEED)).length() < 1e-5);

        let v = compute_target_velocity(held(&[MoveKey::Back]), 0.0, SPEED);
        assert!((v - Vec3::new(0.0, 0.0, SPEED)).length() < 1e-5);

        let v = compute_target_velocity(held(&[MoveKey::Right]), 0.0, SPEED);
        assert!((v - Vec3::new(SPEED, 0.0, 0.0)).length() < 1e-5);

        let v = compute_target_velocity(held(&[MoveKey::Left]), 0.0, SPEED);
        assert!((v - Vec3::new(-SPEED, 0.0, 0.0)).length() < 1e-5);
    }

    #[test]
    fn test_opposing_keys_cancel() {
        for i in 0..32 {
            let yaw = i as f32 * TAU / 32.0 - PI;
            for keys in [
                vec![MoveKey::Forward, MoveKey::Back],
                vec![MoveKey::Left, MoveKey::Right],
                vec![MoveKey::Forward, MoveKey::Back, MoveKey::Left, MoveKey::Right],
            ] {
                let v = compute_target_velocity(held(&keys), yaw, SPEED);
                assert_eq!(v.x, 0.0, "yaw={yaw} keys={keys:?}");
                assert_eq!(v.z, 0.0, "yaw={yaw} keys={keys:?}");
            }
        }
    }

    #[test]
    fn test_diagonal_not_faster() {
        for i in 0..64 {
            let yaw = i as f32 * TAU / 64.0;
            for keys in [
                [MoveKey::Forward, MoveKey::Left],
                [MoveKey::Forward, MoveKey::Right],
                [MoveKey::Back, MoveKey::Left],
                [MoveKey::Back, MoveKey::Right],
            ] {
                let v = compute_target_velocity(held(&keys), yaw, SPEED);
                assert!(v.length() <= SPEED + 1e-4, "yaw={yaw} speed={}", v.length());
                assert!(v.length() >= SPEED - 1e-4);
                assert_eq!(v.y, 0.0);
            }
        }
    }

    #[test]
    fn test_degenerate_inputs_give_zero() {
        let keys = held(&[MoveKey::Forward]);
        assert_eq!(compute_target_velocity(keys, f32::NAN, SPEED), Vec3::ZERO);
        assert_eq!(compute_target_velocity(keys, 0.0, 0.0), Vec3::ZERO);
        assert_eq!(compute_target_velocity(HeldKeys::NONE, 0.0, SPEED), Vec3::ZERO);
    }

    #[test]
    fn test_clamp_delta_time() {
        assert_eq!(clamp_delta_time(0.016, 0.1), 0.016);
        assert_eq!(clamp_delta_time(2.5, 0.1), 0.1);
        assert_eq!(clamp_delta_time(-0.5, 0.1), 0.0);
        assert_eq!(clamp_delta_time(f32::INFINITY, 0.1), 0.0);
        assert_eq!(clamp_delta_time(f32::NAN, 0.1), 0.0);
    }

    #[test]
    fn test_frame_rate_independence() {
        let target = Vec3::new(0.0, 0.0, -SPEED);
        let start = Vec3::new(1.0, 0.0, 0.5);

        let one_step = integrate(start, target, 0.1, 15.0, 8.0);

        let mut ten_steps = start;
        for _ in 0..10 {
            ten_steps = integrate(ten_steps, target, 0.01, 15.0, 8.0);
        }

        assert!(
            (one_step - ten_steps).length() < 1e-4,
            "{one_step:?} vs {ten_steps:?}"
        );

        // Same for decay
        let one_step = integrate(start, Vec3::ZERO, 0.1, 15.0, 8.0);
        let mut ten_steps = start;
        for _ in 0..10 {
            ten_steps = integrate(ten_steps, Vec3::ZERO, 0.01, 15.0, 8.0);
        }
        assert!((one_step - ten_steps).length() < 1e-4);
    }

    #[test]
    fn test_acceleration_approaches_target() {
        let target = Vec3::new(SPEED, 0.0, 0.0);
        let mut v = Vec3::ZERO;
        let mut last_gap = (target - v).length();

        for _ in 0..60 {
            v = integrate(v, target, 1.0 / 60.0, 15.0, 8.0);
            let gap = (target - v).length();
            assert!(gap < last_gap);
            assert!(v.length() <= SPEED + 1e-5);
            last_gap = gap;
        }
        assert!(last_gap < 0.01);
    }

    #[test]
    fn test_decay_is_monotonic_and_bounded() {
        let mut v = Vec3::new(0.0, 0.0, -SPEED);
        let mut last_speed = v.length();
        let mut frames = 0;

        while v.length() > 0.001 {
            v = integrate(v, Vec3::ZERO, 1.0 / 60.0, 15.0, 8.0);
            assert!(v.length() < last_speed);
            last_speed = v.length();
            frames += 1;
            assert!(frames < 200, "decay did not reach rest");
        }

        // Never an instant stop
        assert!(frames > 1);
    }

    #[test]
    fn test_zero_or_negative_step_is_noop() {
        let v = Vec3::new(1.0, 0.0, 0.0);
        assert_eq!(integrate(v, Vec3::ZERO, 0.0, 15.0, 8.0), v);
        assert_eq!(integrate(v, Vec3::Z, -1.0, 15.0, 8.0), v);
        assert_eq!(integrate(Vec3::NAN, Vec3::Z, 0.0, 15.0, 8.0), Vec3::ZERO);
    }
}
