use armor_penetration_calculator::constants::G0;
use armor_penetration_calculator::environment::EnvironmentalConditions;
use armor_penetration_calculator::munitions::{Ammunition, AmmunitionNature};
use armor_penetration_calculator::trajectory::{
    simulate_flight, FlightConfig, FlightRequest, FlightTermination, TrajectoryError,
};

fn apfsds() -> Ammunition {
    Ammunition::new(
        "M829A4 APFSDS",
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

fn flat_shot(range_m: f64) -> FlightRequest {
    FlightRequest {
        target_range_m: range_m,
        launch_angle_deg: 0.0,
        conditions: EnvironmentalConditions::default(),
    }
}

#[test]
fn short_flat_fire_matches_ballistic_drop() {
    let path = simulate_flight(&apfsds(), &flat_shot(300.0), &FlightConfig::default()).unwrap();
    assert_eq!(path.termination, FlightTermination::ReachedTargetRange);

    let impact = path.impact();
    let closed_form = 0.5 * G0 * impact.time_s * impact.time_s;
    assert!(
        (impact.drop_m() - closed_form).abs() < closed_form * 0.05 + 1e-3,
        "drop {} vs closed form {}",
        impact.drop_m(),
        closed_form
    );
}

#[test]
fn points_arrive_in_strict_time_order() {
    let path = simulate_flight(&apfsds(), &flat_shot(1_500.0), &FlightConfig::default()).unwrap();
    assert!(path.points.len() > 2);
    for pair in path.points.windows(2) {
        assert!(pair[1].time_s > pair[0].time_s);
    }
}

#[test]
fn the_integrator_is_restartable() {
    let request = FlightRequest {
        target_range_m: 2_000.0,
        launch_angle_deg: 5.0,
        conditions: EnvironmentalConditions {
            wind_speed_ms: 8.0,
            wind_heading_deg: 45.0,
            ..Default::default()
        },
    };
    let first = simulate_flight(&apfsds(), &request, &FlightConfig::default()).unwrap();
    let second = simulate_flight(&apfsds(), &request, &FlightConfig::default()).unwrap();
    assert_eq!(first.points.len(), second.points.len());
    assert_eq!(first.points.first(), second.points.first());
    assert_eq!(first.points.last(), second.points.last());
}

#[test]
fn unreachable_range_ends_in_ground_impact() {
    let path = simulate_flight(
        &apfsds(),
        &FlightRequest {
            target_range_m: 40_000.0,
            launch_angle_deg: 10.0,
            conditions: EnvironmentalConditions::default(),
        },
        &FlightConfig::default(),
    )
    .unwrap();
    assert_eq!(path.termination, FlightTermination::GroundImpact);
    assert!(path.impact().z_m <= 0.0);
    assert!(path.impact().x_m < 40_000.0);
}

#[test]
fn time_cap_halts_the_integration() {
    let config = FlightConfig {
        max_flight_time_s: 0.05,
        ..Default::default()
    };
    let path = simulate_flight(&apfsds(), &flat_shot(30_000.0), &config).unwrap();
    assert_eq!(path.termination, FlightTermination::TimeExpired);
    assert!(path.impact().time_s >= 0.049);
}

#[test]
fn divergent_state_is_an_error_not_garbage() {
    // A microscopic mass makes the drag acceleration blow up within a few
    // steps; the integrator must refuse to emit non-finite points.
    let featherweight = Ammunition::new(
        "featherweight",
        120.0,
        1.0e-300,
        1_680.0,
        AmmunitionNature::SolidShot,
    )
    .unwrap();
    let result = simulate_flight(&featherweight, &flat_shot(1_000.0), &FlightConfig::default());
    assert!(matches!(result, Err(TrajectoryError::NonFinite { .. })));
}

#[test]
fn invalid_requests_are_rejected_before_integration() {
    let config = FlightConfig::default();
    assert!(matches!(
        simulate_flight(&apfsds(), &flat_shot(-5.0), &config),
        Err(TrajectoryError::InvalidRange(_))
    ));
    let vertical = FlightRequest {
        target_range_m: 100.0,
        launch_angle_deg: 90.0,
        conditions: EnvironmentalConditions::default(),
    };
    assert!(matches!(
        simulate_flight(&apfsds(), &vertical, &config),
        Err(TrajectoryError::InvalidLaunchAngle(_))
    ));
}
