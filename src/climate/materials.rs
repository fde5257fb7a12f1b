use bevy::prelude::*;
use bevy::render::render_resource::AsBindGroup;
use bevy::shader::ShaderRef;

/// Pulsing shell around the sun. `params` packs (time, shell radius).
#[derive(Asset, TypePath, AsBindGroup, Debug, Clone)]
pub struct CoronaMaterial {
    #[uniform(0)]
    pub color: LinearRgba,
    #[uniform(1)]
    pub params: Vec4,
}

impl Material for CoronaMaterial {
    fn fragment_shader() -> ShaderRef {
        "shaders/corona.wgsl".into()
    }

    fn alpha_mode(&self) -> AlphaMode {
        AlphaMode::Blend
    }
}

impl Default for CoronaMaterial {
    fn default() -> Self {
        Self {
            color: LinearRgba::new(1.0, 0.8, 0.2, 0.5),
            params: Vec4::new(0.0, 8.8, 0.0, 0.0),
        }
    }
}

/// Atmosphere shell. Tint shifts from `color_clean` toward the fixed
/// smog color over time; `params` packs (opacity, time).
#[derive(Asset, TypePath, AsBindGroup, Debug, Clone)]
pub struct AtmosphereMaterial {
    #[uniform(0)]
    pub color_clean: LinearRgba,
    #[uniform(1)]
    pub color_polluted: LinearRgba,
    #[uniform(2)]
    pub params: Vec4,
}

impl Material for AtmosphereMaterial {
    fn fragment_shader() -> ShaderRef {
        "shaders/atmosphere.wgsl".into()
    }

    fn alpha_mode(&self) -> AlphaMode {
        AlphaMode::Add
    }
}

impl Default for AtmosphereMaterial {
    fn default() -> Self {
        Self {
            color_clean: LinearRgba::new(0.3, 1.0, 0.5, 1.0),
            color_polluted: LinearRgba::new(1.0, 0.533, 0.0, 1.0),
            params: Vec4::new(0.3, 0.0, 0.0, 0.0),
        }
    }
}

/// Trapped-heat glow around the earth. `params` packs (intensity, time).
#[derive(Asset, TypePath, AsBindGroup, Debug, Clone)]
pub struct HeatGlowMaterial {
    #[uniform(0)]
    pub color: LinearRgba,
    #[uniform(1)]
    pub params: Vec4,
}

impl Material for HeatGlowMaterial {
    fn fragment_shader() -> ShaderRef {
        "shaders/heat_glow.wgsl".into()
    }

    fn alpha_mode(&self) -> AlphaMode {
        AlphaMode::Add
    }
}

impl Default for HeatGlowMaterial {
    fn default() -> Self {
        Self {
            color: LinearRgba::new(1.0, 0.2, 0.1, 1.0),
            params: Vec4::ZERO,
        }
    }
}
