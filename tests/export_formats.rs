use armor_penetration_calculator::engagement::{
    resolve_engagement, run_sweep, ResolverConfig, ShotParameters, SweepRequest,
};
use armor_penetration_calculator::environment::EnvironmentalConditions;
use armor_penetration_calculator::export::replay::{write_replay, ReplayRecord, ShotMeta};
use armor_penetration_calculator::export::sweep as sweep_csv;
use armor_penetration_calculator::munitions::{Ammunition, AmmunitionNature};
use armor_penetration_calculator::protection::{Armor, ArmorClass};
use armor_penetration_calculator::trajectory::{simulate_flight, FlightConfig, FlightRequest};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

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

fn rha_200() -> Armor {
    Armor::new(
        "RHA 200mm",
        ArmorClass::Steel {
            thickness_mm: 200.0,
            hardness: 1.0,
            quality: 1.0,
        },
    )
    .unwrap()
}

#[test]
fn replay_record_field_names_are_stable() {
    let ammo = apfsds();
    let armor = rha_200();
    let conditions = EnvironmentalConditions::default();
    let shot = ShotParameters {
        range_m: 2_000.0,
        impact_angle_deg: 30.0,
        conditions,
    };

    let mut rng = ChaCha8Rng::seed_from_u64(8);
    let result = resolve_engagement(
        &ammo,
        &armor,
        &shot,
        None,
        &ResolverConfig::default(),
        &mut rng,
    )
    .unwrap();
    let flight = simulate_flight(
        &ammo,
        &FlightRequest {
            target_range_m: 2_000.0,
            launch_angle_deg: 0.0,
            conditions,
        },
        &FlightConfig::default(),
    )
    .unwrap();

    let record = ReplayRecord::from_parts(
        &ammo,
        &armor,
        &conditions,
        ShotMeta {
            range_m: 2_000.0,
            impact_angle_deg: 30.0,
            launch_angle_deg: 0.0,
        },
        &result,
        &flight.points,
    );

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("replays/shot.json");
    write_replay(&path, &record).unwrap();

    let raw = std::fs::read_to_string(&path).unwrap();
    let value: serde_json::Value = serde_json::from_str(&raw).unwrap();

    // External tooling reads these exact names; breaking them is a format
    // revision, not a refactor.
    assert_eq!(value["version"], "1.0");
    assert_eq!(value["type"], "engagement_replay");
    assert_eq!(value["ammunition"]["mechanism"], "kinetic");
    assert_eq!(value["armor"]["class"], "steel");
    assert!(value["environment"]["temperature_c"].is_number());
    assert_eq!(value["impact_analysis"]["penetrates"], true);
    assert!(value["impact_analysis"]["penetration_mm"].is_number());
    assert!(value["impact_analysis"]["effective_thickness_mm"].is_number());
    assert!(value["impact_analysis"]["ricochet_outcome"].is_null());

    let first_point = &value["trajectory"][0];
    for field in [
        "x_m",
        "y_m",
        "z_m",
        "vx_ms",
        "vy_ms",
        "vz_ms",
        "time_s",
        "air_density_kg_m3",
    ] {
        assert!(first_point[field].is_number(), "missing field {field}");
    }
}

#[test]
fn sweep_rows_match_the_header_shape() {
    let ammunition = vec![apfsds()];
    let armor = vec![rha_200()];
    let ranges = [2_000.0];
    let angles = [0.0, 30.0];

    let cells = run_sweep(&SweepRequest {
        ammunition: &ammunition,
        armor: &armor,
        ranges_m: &ranges,
        angles_deg: &angles,
        conditions: EnvironmentalConditions::default(),
        resolver: ResolverConfig::default(),
        base_seed: 5,
    });

    let mut buffer: Vec<u8> = Vec::new();
    sweep_csv::write_header(&mut buffer).unwrap();
    for cell in &cells {
        let record = sweep_csv::Record::from_cell(cell).expect("evaluated cell");
        record.write_to(&mut buffer).unwrap();
    }

    let text = String::from_utf8(buffer).unwrap();
    let lines: Vec<&str> = text.trim_end().lines().collect();
    assert_eq!(lines.len(), 1 + cells.len());

    let columns = lines[0].split(',').count();
    for line in &lines[1..] {
        assert_eq!(line.split(',').count(), columns, "ragged row: {line}");
    }
    assert!(lines[1].starts_with("M829A4 APFSDS,RHA 200mm,2000.0,"));
}
