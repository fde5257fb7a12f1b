pub mod config;
pub mod constants;
pub mod rays;
pub mod state;
pub mod thresholds;
pub mod visual;

pub use config::{get_config, reload_config};
