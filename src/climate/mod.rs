pub mod components;
pub mod events;
pub mod materials;
pub mod resources;
pub mod systems;
pub mod ui;
mod logic;

use crate::climate::events::*;
use crate::climate::materials::{AtmosphereMaterial, CoronaMaterial, HeatGlowMaterial};
use crate::climate::resources::*;
use crate::climate::systems::*;
use bevy::prelude::*;
use bevy_egui::EguiPrimaryContextPass;

pub struct ClimatePlugin;

impl Plugin for ClimatePlugin {
    fn build(&self, app: &mut App) {
        app.add_plugins((
            MaterialPlugin::<CoronaMaterial>::default(),
            MaterialPlugin::<AtmosphereMaterial>::default(),
            MaterialPlugin::<HeatGlowMaterial>::default(),
        ))
        .add_message::<SimulationChanged>()
        .add_message::<AccelerateTime>()
        .init_resource::<SimConfig>()
        .init_resource::<Simulation>()
        .init_resource::<RayRng>()
        .init_resource::<WarningBanners>()
        .init_resource::<PointerState>()
        .init_resource::<CoronaClock>()
        .init_resource::<RayCallout>()
        .init_resource::<ui::ControlPanelState>()
        .add_systems(Startup, (setup_scene, initial_update).chain())
        .add_systems(
            Update,
            (
                poll_earth_texture,
                (earth_drag, ray_click).chain(),
                expire_ray_flashes,
                (handle_accelerate, apply_simulation_update).chain(),
                update_ray_geometry,
                animate_scene,
            ),
        )
        .add_systems(
            EguiPrimaryContextPass,
            (ui::control_panel, ui::warning_overlays, ui::ray_callout),
        );
    }
}
