use crate::constants::PREINDUSTRIAL_CO2_PPM;
use crate::state::SimulationState;
use glam::Vec3;

/// Everything the presentation layer needs to redraw the scene, derived
/// from the simulation state in one place.
#[derive(Debug, Clone, PartialEq)]
pub struct VisualState {
    pub earth_color: Vec3,
    pub atmosphere_opacity: f32,
    pub atmosphere_color: Vec3,
    pub heat_glow_intensity: f32,
    pub co2_ratio: f32,
}

impl VisualState {
    pub fn derive(state: &SimulationState) -> Self {
        Self {
            earth_color: earth_color(state.temperature()),
            atmosphere_opacity: atmosphere_opacity(state.co2_ppm()),
            atmosphere_color: atmosphere_color(state.co2_ppm()),
            heat_glow_intensity: heat_glow_intensity(state.co2_ppm(), state.heat_intensity()),
            co2_ratio: co2_ratio(state.co2_ppm()),
        }
    }
}

/// Surface tint keyed on temperature bands.
///
/// RGB values in 0.0-1.0, piecewise-linear within each band.
pub fn earth_color(temperature: f32) -> Vec3 {
    if temperature < -30.0 {
        // Extreme cold: deep blue with white ice
        let factor = ((temperature + 50.0) / 20.0).min(1.0);
        Vec3::new(
            0.1 + factor * 0.1,
            0.3 + factor * 0.3,
            0.8 + factor * 0.1,
        )
    } else if temperature < -10.0 {
        // Very cold: blue with some ice
        let factor = (temperature + 30.0) / 20.0;
        Vec3::new(
            0.2 + factor * 0.2,
            0.4 + factor * 0.2,
            0.9 - factor * 0.2,
        )
    } else if temperature < 20.0 {
        // Normal range: blue-green
        let factor = (temperature + 10.0) / 30.0;
        Vec3::new(
            0.13 + factor * 0.3,
            0.35 + factor * 0.3,
            0.6 - factor * 0.1,
        )
    } else if temperature < 40.0 {
        // Warming: greenish brown
        let factor = (temperature - 20.0) / 20.0;
        Vec3::new(
            0.43 + factor * 0.2,
            0.65 - factor * 0.2,
            0.5 - factor * 0.2,
        )
    } else if temperature < 60.0 {
        // Hot: brown to orange
        let factor = (temperature - 40.0) / 20.0;
        Vec3::new(
            0.63 + factor * 0.2,
            0.45 - factor * 0.2,
            0.3 - factor * 0.2,
        )
    } else if temperature < 80.0 {
        // Very hot: orange to red
        let factor = (temperature - 60.0) / 20.0;
        Vec3::new(
            0.83 + factor * 0.15,
            0.25 - factor * 0.15,
            0.1 - factor * 0.05,
        )
    } else {
        // Extremely hot: bright red
        Vec3::new(1.0, 0.1, 0.05)
    }
}

/// Atmosphere shell opacity grows with CO2 and saturates at 1.2 (the
/// shader treats values above 1.0 as full coverage plus extra rim glow).
pub fn atmosphere_opacity(co2_ppm: f32) -> f32 {
    (0.3 + (co2_ppm - PREINDUSTRIAL_CO2_PPM) / 400.0).min(1.2)
}

/// Fraction of the CO2 slider range above pre-industrial, in [0, 1].
pub fn co2_ratio(co2_ppm: f32) -> f32 {
    ((co2_ppm - PREINDUSTRIAL_CO2_PPM) / 1720.0).clamp(0.0, 1.0)
}

/// Atmosphere tint blends from teal toward a smoggy orange-red as CO2
/// rises.
pub fn atmosphere_color(co2_ppm: f32) -> Vec3 {
    let ratio = co2_ratio(co2_ppm);
    Vec3::new(0.3, 1.0, 0.5).lerp(Vec3::new(1.0, 0.2, 0.1), ratio)
}

/// Intensity of the trapped-heat glow around the planet, in [0, 2].
pub fn heat_glow_intensity(co2_ppm: f32, heat_intensity: f32) -> f32 {
    ((co2_ppm - PREINDUSTRIAL_CO2_PPM) / 400.0 * heat_intensity * 4.0).clamp(0.0, 2.0)
}
