use bevy::prelude::*;
use climatesim::config::ClimateSimConfig;
use climatesim::state::SimulationState;
use climatesim::thresholds::Banner;
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::collections::BTreeMap;

/// Snapshot of the tunables file, loaded once at startup.
#[derive(Resource)]
pub struct SimConfig(pub ClimateSimConfig);

impl Default for SimConfig {
    fn default() -> Self {
        Self(climatesim::get_config())
    }
}

/// The simulation state, owned by the ECS for the lifetime of the app.
#[derive(Resource)]
pub struct Simulation(pub SimulationState);

impl Default for Simulation {
    fn default() -> Self {
        let config = climatesim::get_config();
        Self(SimulationState::new(
            config.simulation.default_co2_ppm,
            config.simulation.default_heat_intensity,
        ))
    }
}

/// Handle for the optional earth surface texture; the solid base color
/// stays in place if the asset never resolves.
#[derive(Resource)]
pub struct EarthTexture {
    pub handle: Handle<Image>,
    pub resolved: bool,
}

/// Random source for the stochastic ray-trapping draws. A dedicated
/// seedable generator rather than the thread-local one, so a fixed seed
/// reproduces a session's flicker pattern.
#[derive(Resource)]
pub struct RayRng(pub StdRng);

impl Default for RayRng {
    fn default() -> Self {
        Self(StdRng::from_os_rng())
    }
}

/// Warning banner state. Tickers are replaced on every classification
/// run; named banners latch on until dismissed.
#[derive(Resource, Default)]
pub struct WarningBanners {
    pub cold_ticker: Option<&'static str>,
    pub hot_ticker: Option<&'static str>,
    pub named: BTreeMap<Banner, bool>,
}

impl WarningBanners {
    pub fn apply(&mut self, report: &climatesim::thresholds::ThresholdReport) {
        self.cold_ticker = report.cold_message;
        self.hot_ticker = report.hot_message;
        for banner in &report.banners {
            self.named.insert(*banner, true);
        }
    }

    pub fn dismiss(&mut self, banner: Banner) {
        self.named.insert(banner, false);
    }

    pub fn visible(&self) -> impl Iterator<Item = Banner> {
        self.named
            .iter()
            .filter(|(_, shown)| **shown)
            .map(|(banner, _)| *banner)
    }
}

/// Pointer interaction state shared between the drag systems and the
/// camera, which must stand down while the earth is being dragged.
#[derive(Resource, Default)]
pub struct PointerState {
    pub dragging_earth: bool,
    pub last_cursor: Vec2,
    pub last_press_seconds: f64,
}

/// Clock for the corona shader uniform. Runs on its own repeating timer,
/// independent of the simulation.
#[derive(Resource)]
pub struct CoronaClock {
    pub timer: Timer,
    pub phase: f32,
}

impl Default for CoronaClock {
    fn default() -> Self {
        Self {
            timer: Timer::from_seconds(0.1, TimerMode::Repeating),
            phase: 0.0,
        }
    }
}

/// Transient "SUN RAYS" callout shown where the user clicked a ray.
#[derive(Resource, Default)]
pub struct RayCallout {
    pub position: Vec2,
    pub shown_until_seconds: f64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use climatesim::thresholds::classify;

    #[test]
    fn banners_latch_until_dismissed() {
        let mut banners = WarningBanners::default();
        banners.apply(&classify(45.0));
        assert_eq!(banners.visible().collect::<Vec<_>>(), vec![Banner::Hot40]);
        assert!(banners.hot_ticker.is_some());

        // Cooling back down clears the ticker but the named banner stays
        banners.apply(&classify(15.0));
        assert_eq!(banners.hot_ticker, None);
        assert_eq!(banners.visible().collect::<Vec<_>>(), vec![Banner::Hot40]);

        banners.dismiss(Banner::Hot40);
        assert!(banners.visible().next().is_none());
    }

    #[test]
    fn dismissed_banner_returns_on_a_matching_run() {
        let mut banners = WarningBanners::default();
        banners.apply(&classify(55.0));
        banners.dismiss(Banner::Hot50);
        banners.apply(&classify(55.0));
        assert_eq!(banners.visible().collect::<Vec<_>>(), vec![Banner::Hot50]);
    }
}
