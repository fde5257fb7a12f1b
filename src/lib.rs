mod climate;
mod core;
mod helpers;

use crate::climate::ClimatePlugin;
use crate::core::camera::CameraPlugin;
use bevy::app::App;
#[cfg(debug_assertions)]
use bevy::diagnostic::LogDiagnosticsPlugin;
use bevy::prelude::*;
use bevy_egui::EguiPlugin;

pub struct GreenhousePlugin;

impl Plugin for GreenhousePlugin {
    fn build(&self, app: &mut App) {
        app.add_plugins((EguiPlugin::default(), CameraPlugin, ClimatePlugin));

        #[cfg(debug_assertions)]
        {
            app.add_plugins(LogDiagnosticsPlugin::default());
        }
    }
}
