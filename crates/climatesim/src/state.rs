use crate::constants::*;
use thiserror::Error;

/// The one mutable piece of simulation state. Temperature is derived from
/// the other three fields and is recomputed on every mutation; fields are
/// private so it can never drift out of sync.
#[derive(Debug, Clone, PartialEq)]
pub struct SimulationState {
    co2_ppm: f32,
    heat_intensity: f32,
    elapsed_years: u32,
    temperature: f32,
}

impl Default for SimulationState {
    fn default() -> Self {
        Self::new(350.0, 0.5)
    }
}

impl SimulationState {
    pub fn new(co2_ppm: f32, heat_intensity: f32) -> Self {
        let mut state = Self {
            co2_ppm: co2_ppm.clamp(CO2_MIN_PPM, CO2_MAX_PPM),
            heat_intensity: heat_intensity.clamp(HEAT_INTENSITY_MIN, HEAT_INTENSITY_MAX),
            elapsed_years: 0,
            temperature: 0.0,
        };
        state.recompute();
        state
    }

    pub fn co2_ppm(&self) -> f32 {
        self.co2_ppm
    }

    pub fn heat_intensity(&self) -> f32 {
        self.heat_intensity
    }

    pub fn elapsed_years(&self) -> u32 {
        self.elapsed_years
    }

    pub fn temperature(&self) -> f32 {
        self.temperature
    }

    pub fn set_co2_ppm(&mut self, co2_ppm: f32) {
        self.co2_ppm = co2_ppm.clamp(CO2_MIN_PPM, CO2_MAX_PPM);
        self.recompute();
    }

    pub fn set_heat_intensity(&mut self, heat_intensity: f32) {
        self.heat_intensity = heat_intensity.clamp(HEAT_INTENSITY_MIN, HEAT_INTENSITY_MAX);
        self.recompute();
    }

    /// Fast-forward the simulation. `years` must already be validated with
    /// [`validate_years`]. Besides accumulating elapsed time this also
    /// drifts the controllable parameters upward, so the sliders follow
    /// the accelerated timeline.
    pub fn accelerate(&mut self, years: u32) {
        self.elapsed_years += years;
        self.co2_ppm = (self.co2_ppm + years as f32 * CO2_PPM_PER_YEAR).min(CO2_MAX_PPM);
        self.heat_intensity =
            (self.heat_intensity + years as f32 * HEAT_INTENSITY_PER_YEAR).min(HEAT_INTENSITY_MAX);
        self.recompute();
    }

    fn recompute(&mut self) {
        self.temperature =
            compute_temperature(self.co2_ppm, self.heat_intensity, self.elapsed_years);
    }
}

/// Global mean temperature as a pure function of the simulation parameters.
///
/// The heat term is an ad hoc linear rescaling of the slider range
/// (1% maps to -50°C of effect, ~56% to zero, 500% to ~+40°C); it is kept
/// exactly as the displayed behavior defines it.
pub fn compute_temperature(co2_ppm: f32, heat_intensity: f32, elapsed_years: u32) -> f32 {
    let co2_effect = (co2_ppm - PREINDUSTRIAL_CO2_PPM) * CO2_WARMING_C_PER_PPM;
    let heat_effect = (heat_intensity - 0.01) * (90.0 / 0.99) - 50.0;
    let time_effect = elapsed_years as f32 * WARMING_C_PER_YEAR;

    (BASE_TEMPERATURE_C + co2_effect + heat_effect + time_effect)
        .clamp(TEMPERATURE_MIN_C, TEMPERATURE_MAX_C)
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum YearsError {
    #[error("Please enter a number between 10 and 1000.")]
    NotANumber,
    #[error("Please enter a number between 10 and 1000.")]
    OutOfRange,
}

/// Parse and range-check a time-acceleration request.
pub fn validate_years(input: &str) -> Result<u32, YearsError> {
    let years: u32 = input.trim().parse().map_err(|_| YearsError::NotANumber)?;
    if !(ACCELERATE_YEARS_MIN..=ACCELERATE_YEARS_MAX).contains(&years) {
        return Err(YearsError::OutOfRange);
    }
    Ok(years)
}
