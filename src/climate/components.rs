use bevy::prelude::*;
use climatesim::rays::RayAppearance;

#[derive(Component)]
pub struct SunEntity;

#[derive(Component)]
pub struct CoronaShell;

#[derive(Component)]
pub struct EarthEntity;

/// Per-earth interaction state.
#[derive(Component)]
pub struct EarthControls {
    pub spin_enabled: bool,
}

#[derive(Component)]
pub struct AtmosphereShell;

#[derive(Component)]
pub struct HeatGlowShell;

#[derive(Component)]
pub struct InfraredRay {
    pub index: usize,
}

/// Last classification applied to this ray, restored when a click flash
/// wears off.
#[derive(Component)]
pub struct RayState(pub RayAppearance);

/// Short highlight after the user clicks a ray.
#[derive(Component)]
pub struct RayFlash {
    pub timer: Timer,
}

#[derive(Component)]
pub struct StarField;
