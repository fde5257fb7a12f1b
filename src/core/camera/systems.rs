use crate::climate::resources::PointerState;
use crate::core::camera::components::{MainCamera, OrbitController};
use crate::core::camera::logic::{OrbitState, apply_orbit_input, orbit_from_position, orbit_position};
use bevy::input::ButtonInput;
use bevy::input::mouse::{MouseMotion, MouseWheel};
use bevy::prelude::*;

const INITIAL_POSITION: Vec3 = Vec3::new(0.0, 15.0, 30.0);

pub fn spawn_camera(mut commands: Commands) {
    let start = orbit_from_position(INITIAL_POSITION, Vec3::ZERO);
    commands.spawn((
        Camera3d::default(),
        Transform::from_translation(INITIAL_POSITION).looking_at(Vec3::ZERO, Vec3::Y),
        MainCamera,
        OrbitController {
            yaw: start.yaw,
            pitch: start.pitch,
            distance: start.distance,
        },
    ));

    info!("Camera spawned");
}

/// Left-drag orbits the scene, wheel zooms. Disabled while the pointer is
/// over the control panel or mid-drag on the earth, so those interactions
/// do not also swing the camera.
pub fn camera_control(
    mouse_input: Res<ButtonInput<MouseButton>>,
    mut mouse_motion: MessageReader<MouseMotion>,
    mut mouse_wheel: MessageReader<MouseWheel>,
    pointer: Res<PointerState>,
    windows: Query<&Window>,
    mut camera_q: Query<(&mut Transform, &mut OrbitController), With<MainCamera>>,
) {
    let Ok((mut transform, mut controller)) = camera_q.single_mut() else {
        return;
    };
    let Ok(window) = windows.single() else {
        return;
    };

    // The control panel occupies the right quarter of the window
    let is_over_ui = window
        .cursor_position()
        .is_some_and(|cursor| cursor.x > window.width() * 0.75);

    let mut drag_delta = Vec2::ZERO;
    if mouse_input.pressed(MouseButton::Left) && !pointer.dragging_earth && !is_over_ui {
        for motion in mouse_motion.read() {
            drag_delta += motion.delta;
        }
    } else {
        mouse_motion.clear();
    }

    let mut scroll = 0.0;
    if !is_over_ui {
        for wheel in mouse_wheel.read() {
            scroll += wheel.y;
        }
    } else {
        mouse_wheel.clear();
    }

    if drag_delta == Vec2::ZERO && scroll == 0.0 {
        return;
    }

    let next = apply_orbit_input(
        OrbitState {
            yaw: controller.yaw,
            pitch: controller.pitch,
            distance: controller.distance,
        },
        drag_delta,
        scroll,
    );
    controller.yaw = next.yaw;
    controller.pitch = next.pitch;
    controller.distance = next.distance;

    transform.translation = orbit_position(next, Vec3::ZERO);
    transform.look_at(Vec3::ZERO, Vec3::Y);
}
