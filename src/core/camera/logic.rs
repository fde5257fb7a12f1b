use bevy::math::{Vec2, Vec3};
use std::f32::consts::PI;

pub const MIN_DISTANCE: f32 = 1.0;
pub const MAX_DISTANCE: f32 = 300.0;
pub const MIN_POLAR_ANGLE: f32 = PI * 0.05;
pub const MAX_POLAR_ANGLE: f32 = PI * 0.95;

const ROTATE_SENSITIVITY: f32 = 0.005;
const ZOOM_STEP: f32 = 2.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrbitState {
    pub yaw: f32,
    pub pitch: f32,
    pub distance: f32,
}

/// Apply one frame of pointer input to the orbit. Pitch stays off the
/// poles and the zoom distance stays inside its clamp range; yaw is
/// unbounded.
pub fn apply_orbit_input(state: OrbitState, drag_delta: Vec2, scroll: f32) -> OrbitState {
    OrbitState {
        yaw: state.yaw - drag_delta.x * ROTATE_SENSITIVITY,
        pitch: (state.pitch + drag_delta.y * ROTATE_SENSITIVITY)
            .clamp(MIN_POLAR_ANGLE, MAX_POLAR_ANGLE),
        distance: (state.distance - scroll * ZOOM_STEP).clamp(MIN_DISTANCE, MAX_DISTANCE),
    }
}

/// Camera position for an orbit state, looking at `target`.
pub fn orbit_position(state: OrbitState, target: Vec3) -> Vec3 {
    let offset = Vec3::new(
        state.pitch.sin() * state.yaw.sin(),
        state.pitch.cos(),
        state.pitch.sin() * state.yaw.cos(),
    ) * state.distance;
    target + offset
}

/// Recover the orbit angles that place the camera at `position` around
/// `target`. Used once at spawn so the controller starts where the
/// transform does.
pub fn orbit_from_position(position: Vec3, target: Vec3) -> OrbitState {
    let offset = position - target;
    let distance = offset.length().clamp(MIN_DISTANCE, MAX_DISTANCE);
    OrbitState {
        yaw: offset.x.atan2(offset.z),
        pitch: (offset.y / distance).clamp(-1.0, 1.0).acos(),
        distance,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn level_state() -> OrbitState {
        OrbitState {
            yaw: 0.0,
            pitch: PI / 2.0,
            distance: 30.0,
        }
    }

    #[test]
    fn no_input_no_change() {
        let state = level_state();
        let next = apply_orbit_input(state, Vec2::ZERO, 0.0);
        assert_eq!(next, state);
    }

    #[rstest]
    #[case(5.0, 20.0)] // zoom in: 30 - 5*2
    #[case(-10.0, 50.0)] // zoom out: 30 + 10*2
    #[case(100.0, MIN_DISTANCE)] // clamps at the near limit
    #[case(-500.0, MAX_DISTANCE)] // clamps at the far limit
    fn scroll_zooms_with_clamps(#[case] scroll: f32, #[case] expected: f32) {
        let next = apply_orbit_input(level_state(), Vec2::ZERO, scroll);
        assert!((next.distance - expected).abs() < 1e-4);
    }

    #[rstest]
    #[case(Vec2::new(0.0, 10_000.0), MAX_POLAR_ANGLE)]
    #[case(Vec2::new(0.0, -10_000.0), MIN_POLAR_ANGLE)]
    fn pitch_never_reaches_the_poles(#[case] drag: Vec2, #[case] expected: f32) {
        let next = apply_orbit_input(level_state(), drag, 0.0);
        assert!((next.pitch - expected).abs() < 1e-4);
    }

    #[test]
    fn yaw_is_unbounded() {
        let next = apply_orbit_input(level_state(), Vec2::new(10_000.0, 0.0), 0.0);
        assert!(next.yaw < -2.0 * PI);
    }

    #[test]
    fn position_sits_at_the_orbit_distance() {
        let state = level_state();
        let target = Vec3::new(1.0, 2.0, 3.0);
        let position = orbit_position(state, target);
        assert!(((position - target).length() - state.distance).abs() < 1e-3);
    }

    #[test]
    fn position_round_trips_through_angle_recovery() {
        let state = OrbitState {
            yaw: 1.2,
            pitch: 1.0,
            distance: 42.0,
        };
        let position = orbit_position(state, Vec3::ZERO);
        let recovered = orbit_from_position(position, Vec3::ZERO);
        assert!((recovered.yaw - state.yaw).abs() < 1e-3);
        assert!((recovered.pitch - state.pitch).abs() < 1e-3);
        assert!((recovered.distance - state.distance).abs() < 1e-3);
    }
}
