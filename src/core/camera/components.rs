use bevy::prelude::*;

#[derive(Component, Reflect, Default)]
#[reflect(Component)]
pub struct MainCamera;

/// Spherical orbit around the scene origin.
#[derive(Component)]
pub struct OrbitController {
    pub yaw: f32,
    /// Polar angle from the +Y axis, kept off the poles.
    pub pitch: f32,
    pub distance: f32,
}
