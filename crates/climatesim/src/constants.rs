/// Pre-industrial atmospheric CO2 concentration, the zero point of the
/// CO2 warming term.
pub const PREINDUSTRIAL_CO2_PPM: f32 = 280.0;

/// Global mean surface temperature with every effect at its zero point.
pub const BASE_TEMPERATURE_C: f32 = 15.0;

/// CO2 is accepted on [0, 2000] ppm even though the slider bottoms out at
/// 280; out-of-range values are clamped, never rejected.
pub const CO2_MIN_PPM: f32 = 0.0;
pub const CO2_MAX_PPM: f32 = 2000.0;

/// Heat-retention intensity, the slider percentage divided by 100.
pub const HEAT_INTENSITY_MIN: f32 = 0.01;
pub const HEAT_INTENSITY_MAX: f32 = 5.0;

/// Derived temperature is capped to this range.
pub const TEMPERATURE_MIN_C: f32 = -50.0;
pub const TEMPERATURE_MAX_C: f32 = 120.0;

/// Warming per ppm of CO2 above pre-industrial.
pub const CO2_WARMING_C_PER_PPM: f32 = 0.08;

/// Per-year drift applied by time acceleration.
pub const WARMING_C_PER_YEAR: f32 = 0.025;
pub const CO2_PPM_PER_YEAR: f32 = 2.5;
pub const HEAT_INTENSITY_PER_YEAR: f32 = 0.002;

/// Accepted range for a single time-acceleration request.
pub const ACCELERATE_YEARS_MIN: u32 = 10;
pub const ACCELERATE_YEARS_MAX: u32 = 1000;

/// At or above this temperature the terminal warning always fires.
pub const UNINHABITABLE_TEMP_C: f32 = 100.0;
