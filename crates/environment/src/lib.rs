//! Ambient atmosphere model: density and wind from engagement-site conditions.
//!
//! A total function over its inputs; every condition set maps to a usable
//! atmosphere sample, so there is no error type here.

use armor_core::constants::{
    R_DRY_AIR, SEA_LEVEL_AIR_DENSITY, STANDARD_PRESSURE_PA, STANDARD_TEMPERATURE_C,
};
use armor_core::units::deg_to_rad;

/// Ambient conditions at the engagement site.
///
/// Defaults are the standard atmosphere: 15 °C, dry air, sea level, calm.
/// Under defaults `LocalAtmosphere::density_ratio` is exactly 1.0.
#[derive(Debug, Clone, Copy)]
pub struct EnvironmentalConditions {
    /// Ambient air temperature (°C).
    pub temperature_c: f64,
    /// Wind speed (m/s).
    pub wind_speed_ms: f64,
    /// Wind heading relative to the firing azimuth (deg); 0° blows against the shot.
    pub wind_heading_deg: f64,
    /// Relative humidity (%).
    pub humidity_percent: f64,
    /// Altitude above sea level (m).
    pub altitude_m: f64,
}

impl Default for EnvironmentalConditions {
    fn default() -> Self {
        Self {
            temperature_c: STANDARD_TEMPERATURE_C,
            wind_speed_ms: 0.0,
            wind_heading_deg: 0.0,
            humidity_percent: 0.0,
            altitude_m: 0.0,
        }
    }
}

/// Wind decomposed against the firing direction (azimuth 0°).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WindComponents {
    /// Component along the line of fire (m/s); positive opposes the projectile.
    pub headwind_ms: f64,
    /// Component across the line of fire (m/s); positive deflects laterally.
    pub crosswind_ms: f64,
}

/// Atmosphere sample produced from [`EnvironmentalConditions`].
#[derive(Debug, Clone, Copy)]
pub struct LocalAtmosphere {
    /// Air density (kg/m³).
    pub air_density_kg_m3: f64,
    /// Density relative to standard sea-level conditions; 1.0 at standard.
    pub density_ratio: f64,
    /// Wind decomposition against the firing azimuth.
    pub wind: WindComponents,
}

/// Evaluate the atmosphere at the engagement site.
///
/// Temperature enters through the ideal-gas law relative to the 15 °C
/// standard, altitude through a barometric pressure falloff, and humidity as
/// a small density reduction (moist air is lighter than dry air).
pub fn sample_atmosphere(conditions: &EnvironmentalConditions) -> LocalAtmosphere {
    let temp_k = conditions.temperature_c + 273.15;

    let mut pressure_pa = STANDARD_PRESSURE_PA;
    if conditions.altitude_m > 0.0 {
        pressure_pa *= (1.0 - 2.25577e-5 * conditions.altitude_m).powf(5.25588);
    }

    let humidity = conditions.humidity_percent.clamp(0.0, 100.0);
    let humidity_factor = 1.0 - 0.378 * (humidity / 100.0) * 0.01;

    let air_density = (pressure_pa * humidity_factor) / (R_DRY_AIR * temp_k);

    LocalAtmosphere {
        air_density_kg_m3: air_density,
        density_ratio: air_density / SEA_LEVEL_AIR_DENSITY,
        wind: decompose_wind(conditions.wind_speed_ms, conditions.wind_heading_deg),
    }
}

/// Split a wind vector into headwind and crosswind against azimuth 0°.
pub fn decompose_wind(speed_ms: f64, heading_deg: f64) -> WindComponents {
    let heading_rad = deg_to_rad(heading_deg);
    WindComponents {
        headwind_ms: speed_ms * heading_rad.cos(),
        crosswind_ms: speed_ms * heading_rad.sin(),
    }
}
