//! Fixed-step flight integrator with drag, gravity, and wind deflection.
//!
//! The integrator is a pure function of its inputs: the same request always
//! yields the same ordered point sequence, and nothing in the ammunition or
//! armor state is touched. Divergence surfaces as an error instead of
//! partial output.

use armor_core::constants::{G0, SPEED_OF_SOUND};
use armor_core::units::{deg_to_rad, frontal_area_m2};
use armor_environment::{sample_atmosphere, EnvironmentalConditions};
use armor_munitions::Ammunition;
use thiserror::Error;

/// Height of the gun muzzle above ground level (m).
pub const MUZZLE_HEIGHT_M: f64 = 2.4;
/// Air-relative speed below which the projectile is treated as spent (m/s).
const STALL_SPEED_MS: f64 = 0.1;

/// Request to simulate a single shot.
#[derive(Debug, Clone)]
pub struct FlightRequest {
    /// Horizontal range at which the target stands (m).
    pub target_range_m: f64,
    /// Launch elevation above the horizontal (deg).
    pub launch_angle_deg: f64,
    /// Ambient conditions at the engagement site.
    pub conditions: EnvironmentalConditions,
}

/// Integration tuning knobs.
#[derive(Debug, Clone)]
pub struct FlightConfig {
    /// Integration step (s).
    pub time_step_s: f64,
    /// Hard cap on simulated flight time (s).
    pub max_flight_time_s: f64,
}

impl Default for FlightConfig {
    fn default() -> Self {
        Self {
            time_step_s: 1.0e-3,
            max_flight_time_s: 120.0,
        }
    }
}

/// One sample along the flight path. Produced in strictly increasing time
/// order; x is downrange, y lateral, z height above ground.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrajectoryPoint {
    pub x_m: f64,
    pub y_m: f64,
    pub z_m: f64,
    pub vx_ms: f64,
    pub vy_ms: f64,
    pub vz_ms: f64,
    pub time_s: f64,
    pub air_density_kg_m3: f64,
}

impl TrajectoryPoint {
    /// Speed over ground (m/s).
    pub fn speed_ms(&self) -> f64 {
        (self.vx_ms * self.vx_ms + self.vy_ms * self.vy_ms + self.vz_ms * self.vz_ms).sqrt()
    }

    /// Vertical drop below the muzzle line (m); positive once falling.
    pub fn drop_m(&self) -> f64 {
        MUZZLE_HEIGHT_M - self.z_m
    }
}

#[derive(Debug, Error)]
pub enum TrajectoryError {
    #[error("target range must be positive (got {0} m)")]
    InvalidRange(f64),
    #[error("launch angle must lie in [0°, 90°) (got {0}°)")]
    InvalidLaunchAngle(f64),
    #[error("integration step must be positive (got {0} s)")]
    InvalidTimeStep(f64),
    #[error("integration diverged to a non-finite state at t = {time_s} s")]
    NonFinite { time_s: f64 },
}

/// Why the integration stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlightTermination {
    /// Projectile crossed the requested target range.
    ReachedTargetRange,
    /// Projectile fell back to ground level.
    GroundImpact,
    /// Configured maximum flight time elapsed.
    TimeExpired,
    /// Air-relative speed dropped below the stall threshold.
    Stalled,
}

/// Output of the flight integrator.
#[derive(Debug, Clone)]
pub struct FlightPath {
    pub points: Vec<TrajectoryPoint>,
    pub termination: FlightTermination,
}

impl FlightPath {
    /// Final sample of the flight; the integrator always emits at least the
    /// launch state, so this is total.
    pub fn impact(&self) -> &TrajectoryPoint {
        self.points
            .last()
            .expect("flight path holds at least the launch point")
    }
}

/// Simulate one shot with explicit fixed-step integration.
///
/// Forces per step: constant gravity, quadratic aerodynamic drag with a
/// Mach-dependent coefficient scaled by local air density, and wind acting
/// through the air-relative velocity (headwind adds drag, crosswind bends
/// the path sideways). Terminates on ground impact, target range, or the
/// configured time cap.
pub fn simulate_flight(
    ammunition: &Ammunition,
    request: &FlightRequest,
    config: &FlightConfig,
) -> Result<FlightPath, TrajectoryError> {
    if !(request.target_range_m > 0.0) || !request.target_range_m.is_finite() {
        return Err(TrajectoryError::InvalidRange(request.target_range_m));
    }
    if !request.launch_angle_deg.is_finite()
        || request.launch_angle_deg < 0.0
        || request.launch_angle_deg >= 90.0
    {
        return Err(TrajectoryError::InvalidLaunchAngle(request.launch_angle_deg));
    }
    if !(config.time_step_s > 0.0) {
        return Err(TrajectoryError::InvalidTimeStep(config.time_step_s));
    }

    let atmosphere = sample_atmosphere(&request.conditions);
    let air_density = atmosphere.air_density_kg_m3;

    // Wind velocity in world frame: headwind blows against the shot.
    let wind_vx = -atmosphere.wind.headwind_ms;
    let wind_vy = atmosphere.wind.crosswind_ms;

    let dt = config.time_step_s;
    let angle_rad = deg_to_rad(request.launch_angle_deg);
    let v0 = ammunition.muzzle_velocity_ms();

    let mut vx = v0 * angle_rad.cos();
    let mut vy = 0.0_f64;
    let mut vz = v0 * angle_rad.sin();
    let mut x = 0.0_f64;
    let mut y = 0.0_f64;
    let mut z = MUZZLE_HEIGHT_M;
    let mut t = 0.0_f64;

    let mass = ammunition.mass_kg();
    let area = frontal_area_m2(ammunition.caliber_mm());
    let base_cd = ammunition.base_drag_cd();

    let mut points = Vec::with_capacity(
        ((config.max_flight_time_s / dt) as usize).min(4_096),
    );

    let termination = loop {
        points.push(TrajectoryPoint {
            x_m: x,
            y_m: y,
            z_m: z,
            vx_ms: vx,
            vy_ms: vy,
            vz_ms: vz,
            time_s: t,
            air_density_kg_m3: air_density,
        });

        if x >= request.target_range_m {
            break FlightTermination::ReachedTargetRange;
        }
        if z <= 0.0 {
            break FlightTermination::GroundImpact;
        }
        if t >= config.max_flight_time_s {
            break FlightTermination::TimeExpired;
        }

        let v_rel_x = vx - wind_vx;
        let v_rel_y = vy - wind_vy;
        let v_rel_z = vz;
        let v_rel = (v_rel_x * v_rel_x + v_rel_y * v_rel_y + v_rel_z * v_rel_z).sqrt();
        if v_rel < STALL_SPEED_MS {
            break FlightTermination::Stalled;
        }

        let cd = base_cd * mach_drag_modifier(v_rel / SPEED_OF_SOUND);
        let drag_force = 0.5 * air_density * v_rel * v_rel * cd * area;
        let drag_scale = drag_force / (mass * v_rel);

        let ax = -drag_scale * v_rel_x;
        let ay = -drag_scale * v_rel_y;
        let az = -drag_scale * v_rel_z - G0;

        vx += ax * dt;
        vy += ay * dt;
        vz += az * dt;
        x += vx * dt;
        y += vy * dt;
        z += vz * dt;
        t += dt;

        if !(x.is_finite()
            && y.is_finite()
            && z.is_finite()
            && vx.is_finite()
            && vy.is_finite()
            && vz.is_finite())
        {
            return Err(TrajectoryError::NonFinite { time_s: t });
        }
    };

    Ok(FlightPath {
        points,
        termination,
    })
}

/// Drag-coefficient multiplier over the nominal low-Mach value.
///
/// Subsonic flight keeps the base coefficient, the transonic band spikes,
/// wave drag relaxes through the supersonic band, and hypersonic flight
/// settles on a raised plateau.
fn mach_drag_modifier(mach: f64) -> f64 {
    if mach < 0.8 {
        1.0
    } else if mach < 1.2 {
        1.0 + 2.0 * (mach - 0.8)
    } else if mach < 3.0 {
        1.8 - 0.2 * (mach - 1.2)
    } else {
        1.4
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use armor_munitions::AmmunitionNature;

    fn test_round() -> Ammunition {
        Ammunition::new(
            "test round",
            120.0,
            4.6,
            1_680.0,
            AmmunitionNature::LongRod {
                penetrator_diameter_mm: 22.0,
                penetrator_length_mm: 570.0,
            },
        )
        .unwrap()
    }

    #[test]
    fn rejects_bad_inputs() {
        let ammo = test_round();
        let config = FlightConfig::default();
        let bad_range = FlightRequest {
            target_range_m: 0.0,
            launch_angle_deg: 0.0,
            conditions: EnvironmentalConditions::default(),
        };
        assert!(simulate_flight(&ammo, &bad_range, &config).is_err());

        let bad_angle = FlightRequest {
            target_range_m: 1_000.0,
            launch_angle_deg: 90.0,
            conditions: EnvironmentalConditions::default(),
        };
        assert!(simulate_flight(&ammo, &bad_angle, &config).is_err());
    }

    #[test]
    fn time_is_strictly_increasing() {
        let ammo = test_round();
        let request = FlightRequest {
            target_range_m: 500.0,
            launch_angle_deg: 0.0,
            conditions: EnvironmentalConditions::default(),
        };
        let path = simulate_flight(&ammo, &request, &FlightConfig::default()).unwrap();
        assert_eq!(path.termination, FlightTermination::ReachedTargetRange);
        for pair in path.points.windows(2) {
            assert!(pair[1].time_s > pair[0].time_s);
        }
    }

    #[test]
    fn flat_fire_drop_matches_ballistic_approximation() {
        let ammo = test_round();
        let request = FlightRequest {
            target_range_m: 300.0,
            launch_angle_deg: 0.0,
            conditions: EnvironmentalConditions::default(),
        };
        let path = simulate_flight(&ammo, &request, &FlightConfig::default()).unwrap();
        let impact = path.impact();
        let expected_drop = 0.5 * G0 * impact.time_s * impact.time_s;
        // Drag shifts the true drop slightly; the short-range figure should
        // still sit within a few percent of the vacuum solution.
        assert!(
            (impact.drop_m() - expected_drop).abs() < expected_drop * 0.05 + 1e-3,
            "drop {} vs closed form {}",
            impact.drop_m(),
            expected_drop
        );
    }

    #[test]
    fn crosswind_bends_the_path() {
        let ammo = test_round();
        let calm = FlightRequest {
            target_range_m: 2_000.0,
            launch_angle_deg: 0.0,
            conditions: EnvironmentalConditions::default(),
        };
        let windy = FlightRequest {
            conditions: EnvironmentalConditions {
                wind_speed_ms: 10.0,
                wind_heading_deg: 90.0,
                ..Default::default()
            },
            ..calm.clone()
        };
        let straight = simulate_flight(&ammo, &calm, &FlightConfig::default()).unwrap();
        let bent = simulate_flight(&ammo, &windy, &FlightConfig::default()).unwrap();
        assert!(straight.impact().y_m.abs() < 1e-6);
        assert!(bent.impact().y_m.abs() > straight.impact().y_m.abs());
    }

    #[test]
    fn headwind_slows_arrival() {
        let ammo = test_round();
        let calm = FlightRequest {
            target_range_m: 2_000.0,
            launch_angle_deg: 0.0,
            conditions: EnvironmentalConditions::default(),
        };
        let headwind = FlightRequest {
            conditions: EnvironmentalConditions {
                wind_speed_ms: 15.0,
                wind_heading_deg: 0.0,
                ..Default::default()
            },
            ..calm.clone()
        };
        let fast = simulate_flight(&ammo, &calm, &FlightConfig::default()).unwrap();
        let slow = simulate_flight(&ammo, &headwind, &FlightConfig::default()).unwrap();
        assert!(slow.impact().speed_ms() < fast.impact().speed_ms());
    }

    #[test]
    fn same_request_reproduces_the_same_path() {
        let ammo = test_round();
        let request = FlightRequest {
            target_range_m: 1_200.0,
            launch_angle_deg: 2.5,
            conditions: EnvironmentalConditions::default(),
        };
        let first = simulate_flight(&ammo, &request, &FlightConfig::default()).unwrap();
        let second = simulate_flight(&ammo, &request, &FlightConfig::default()).unwrap();
        assert_eq!(first.points.len(), second.points.len());
        assert_eq!(first.points.last(), second.points.last());
    }
}
