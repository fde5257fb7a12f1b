use serde::{Deserialize, Serialize};
use std::sync::{Mutex, OnceLock};
use thiserror::Error;

static CONFIG: OnceLock<Mutex<ClimateSimConfig>> = OnceLock::new();

const CONFIG_PATH: &str = "climatesim_config.toml";

/// Get a copy of the current configuration, loading from file if not
/// already loaded. A missing or invalid file falls back to the compiled
/// defaults with a logged warning; tunables are optional resources, never
/// fatal.
pub fn get_config() -> ClimateSimConfig {
    let config_mutex = CONFIG.get_or_init(|| {
        let config = ClimateSimConfig::load_from_file(CONFIG_PATH).unwrap_or_else(|e| {
            log::warn!("falling back to default config: {}", e);
            ClimateSimConfig::default()
        });
        Mutex::new(config)
    });
    config_mutex.lock().unwrap().clone()
}

pub fn reload_config() {
    match ClimateSimConfig::load_from_file(CONFIG_PATH) {
        Ok(new_config) => {
            let config_mutex = CONFIG.get_or_init(|| Mutex::new(new_config.clone()));
            *config_mutex.lock().unwrap() = new_config;
        }
        Err(e) => log::warn!("config reload failed, keeping current values: {}", e),
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClimateSimConfig {
    pub simulation: SimulationConfig,
    pub scene: SceneConfig,
    pub rays: RayConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimulationConfig {
    pub default_co2_ppm: f32,
    pub default_heat_intensity: f32,
    pub co2_slider_min_ppm: f32,
    pub co2_slider_max_ppm: f32,
    pub heat_slider_min_percent: f32,
    pub heat_slider_max_percent: f32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SceneConfig {
    pub sun_position: [f32; 3],
    pub sun_radius: f32,
    pub corona_radius: f32,
    pub earth_position: [f32; 3],
    pub earth_radius: f32,
    pub atmosphere_radius: f32,
    pub heat_glow_radius: f32,
    pub star_count: usize,
    pub big_star_count: usize,
    pub star_field_extent: f32,
    pub big_star_field_extent: f32,
    pub earth_drag_bound_x: f32,
    pub earth_drag_bound_y: f32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RayConfig {
    pub count: usize,
    pub segments: usize,
    pub arc_height: f32,
    pub wobble: f32,
}

impl Default for ClimateSimConfig {
    fn default() -> Self {
        Self {
            simulation: SimulationConfig {
                default_co2_ppm: 350.0,
                default_heat_intensity: 0.5,
                co2_slider_min_ppm: 280.0,
                co2_slider_max_ppm: 2000.0,
                heat_slider_min_percent: 1.0,
                heat_slider_max_percent: 500.0,
            },
            scene: SceneConfig {
                sun_position: [25.0, 5.0, -20.0],
                sun_radius: 8.0,
                corona_radius: 8.8,
                earth_position: [-25.0, -15.0, 0.0],
                earth_radius: 5.0,
                atmosphere_radius: 5.3,
                heat_glow_radius: 5.6,
                star_count: 3000,
                big_star_count: 200,
                star_field_extent: 2000.0,
                big_star_field_extent: 1500.0,
                earth_drag_bound_x: 60.0,
                earth_drag_bound_y: 30.0,
            },
            rays: RayConfig {
                count: 25,
                segments: 20,
                arc_height: 6.0,
                wobble: 0.8,
            },
        }
    }
}

impl ClimateSimConfig {
    pub fn load_from_file(path: &str) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let config: ClimateSimConfig = toml::from_str(&content)?;
        Ok(config)
    }

    pub fn save_to_file(&self, path: &str) -> Result<(), ConfigError> {
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_round_trips_through_toml() {
        let config = ClimateSimConfig::default();
        let serialized = toml::to_string_pretty(&config).unwrap();
        let parsed: ClimateSimConfig = toml::from_str(&serialized).unwrap();
        assert_eq!(parsed.rays.count, config.rays.count);
        assert_eq!(parsed.scene.sun_position, config.scene.sun_position);
        assert_eq!(
            parsed.simulation.default_co2_ppm,
            config.simulation.default_co2_ppm
        );
    }

    #[test]
    fn load_from_missing_file_is_an_io_error() {
        let err = ClimateSimConfig::load_from_file("definitely_not_here.toml").unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }
}
