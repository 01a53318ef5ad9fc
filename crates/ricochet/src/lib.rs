//! Impact outcome model: ricochet, shatter, and embedding classification.
//!
//! The random draw is injected by the caller, either as a generator or as a
//! raw uniform sample, so identical inputs and samples always reproduce the
//! same outcome.

use armor_core::mechanism::Mechanism;
use armor_core::units::deg_to_rad;
use rand::Rng;
use thiserror::Error;

/// Base critical angles by mechanism (deg from the surface normal).
const KINETIC_CRITICAL_BASE_DEG: f64 = 65.0;
const JET_CRITICAL_BASE_DEG: f64 = 45.0;
const SPALL_CRITICAL_BASE_DEG: f64 = 55.0;

/// Long rods past this L/D deflect progressively less.
const LD_CRITICAL_REFERENCE: f64 = 20.0;
const LD_CRITICAL_SLOPE_DEG: f64 = 0.5;
/// Critical-angle shift per unit of velocity ratio around 1000 m/s.
const VELOCITY_CRITICAL_SLOPE_DEG: f64 = 10.0;
/// Critical-angle shift per unit of projectile/armor hardness ratio around parity.
const HARDNESS_CRITICAL_SLOPE_DEG: f64 = 5.0;
/// Clamp band for the adjusted critical angle (deg).
const CRITICAL_ANGLE_MIN_DEG: f64 = 30.0;
const CRITICAL_ANGLE_MAX_DEG: f64 = 80.0;

/// Width of the logistic probability ramp around the critical angle (deg).
const PROBABILITY_RAMP_WIDTH_DEG: f64 = 4.0;

/// Below this residual velocity a deflected round lodges in the plate (m/s).
const EMBED_VELOCITY_MS: f64 = 400.0;
/// Impact energy beyond which a soft projectile breaks up on a harder plate (J).
const SHATTER_ENERGY_J: f64 = 2.0e6;
/// Hardness ratio below which the projectile is brittle relative to the plate.
const SHATTER_HARDNESS_RATIO: f64 = 0.8;
/// Fraction of the tangential velocity component surviving a ricochet.
const RICOCHET_EXIT_FACTOR: f64 = 0.85;

/// Impact-side inputs to the outcome model.
#[derive(Debug, Clone)]
pub struct ImpactConditions {
    /// Impact angle from the surface normal (deg).
    pub impact_angle_deg: f64,
    /// Impact velocity (m/s).
    pub impact_velocity_ms: f64,
    /// Projectile mass (kg).
    pub projectile_mass_kg: f64,
    /// Projectile hardness on the 0–1 scale.
    pub projectile_hardness: f64,
    /// Armor surface hardness on the 0–1 scale.
    pub armor_hardness: f64,
    /// Penetration mechanism of the round.
    pub mechanism: Mechanism,
    /// Length-to-diameter ratio for long rods.
    pub ld_ratio: Option<f64>,
}

#[derive(Debug, Error)]
pub enum RicochetError {
    #[error("impact angle must lie in [0°, 90°) (got {0}°)")]
    AngleOutOfRange(f64),
    #[error("impact velocity must be positive (got {0} m/s)")]
    InvalidVelocity(f64),
    #[error("projectile mass must be positive (got {0} kg)")]
    InvalidMass(f64),
    #[error("hardness values must be positive")]
    InvalidHardness,
    #[error("probability sample must lie in [0, 1] (got {0})")]
    SampleOutOfRange(f64),
}

/// Deflection outcome tags, stable for exported artifacts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeflectionKind {
    Ricochet,
    Shattering,
    Embedding,
}

impl DeflectionKind {
    pub fn as_str(self) -> &'static str {
        match self {
            DeflectionKind::Ricochet => "ricochet",
            DeflectionKind::Shattering => "shattering",
            DeflectionKind::Embedding => "embedding",
        }
    }
}

/// A deflection event. Shattered and embedded rounds carry no outbound path.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Deflection {
    pub kind: DeflectionKind,
    /// Change of travel direction for a ricochet (deg); 0 for shatter/embed.
    pub deflection_angle_deg: f64,
    /// Outbound speed (m/s); 0 for shatter/embed.
    pub exit_velocity_ms: f64,
    /// Fraction of impact energy retained by the outbound round.
    pub energy_retained: f64,
}

/// Full assessment of an impact.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ImpactAssessment {
    /// Critical angle of this projectile/armor pairing (deg).
    pub critical_angle_deg: f64,
    /// Probability that the round deflects instead of biting.
    pub ricochet_probability: f64,
    /// The deflection event, if the drawn sample selected one.
    pub deflection: Option<Deflection>,
}

/// Critical angle of the pairing: harder armor and blunter, slower rounds
/// deflect earlier; long rods and hot hardness ratios bite further out.
pub fn critical_angle_deg(conditions: &ImpactConditions) -> Result<f64, RicochetError> {
    validate(conditions)?;
    let mut critical = match conditions.mechanism {
        Mechanism::Kinetic => KINETIC_CRITICAL_BASE_DEG,
        Mechanism::ChemicalJet => JET_CRITICAL_BASE_DEG,
        Mechanism::ChemicalSpall => SPALL_CRITICAL_BASE_DEG,
    };
    if let Some(ld) = conditions.ld_ratio {
        critical += (ld - LD_CRITICAL_REFERENCE) * LD_CRITICAL_SLOPE_DEG;
    }
    critical += (conditions.impact_velocity_ms / 1_000.0 - 1.0) * VELOCITY_CRITICAL_SLOPE_DEG;
    let hardness_ratio = conditions.projectile_hardness / conditions.armor_hardness;
    critical += (hardness_ratio - 1.0) * HARDNESS_CRITICAL_SLOPE_DEG;
    Ok(critical.clamp(CRITICAL_ANGLE_MIN_DEG, CRITICAL_ANGLE_MAX_DEG))
}

/// Ricochet probability as a bounded monotonic ramp in
/// `impact_angle − critical_angle`: near zero a comfortable margin below the
/// critical angle, near one well past it.
pub fn ricochet_probability(impact_angle_deg: f64, critical_angle_deg: f64) -> f64 {
    let excess = impact_angle_deg - critical_angle_deg;
    1.0 / (1.0 + (-excess / PROBABILITY_RAMP_WIDTH_DEG).exp())
}

/// Assess an impact, drawing the outcome sample from the supplied generator.
pub fn assess_impact<R: Rng>(
    conditions: &ImpactConditions,
    rng: &mut R,
) -> Result<ImpactAssessment, RicochetError> {
    let sample = rng.r#gen::<f64>();
    assess_impact_with_sample(conditions, sample)
}

/// Assess an impact against an explicit uniform sample in [0, 1].
///
/// Deterministic: the same conditions and sample always yield the same
/// assessment. `sample >= probability` means the round bites and follows the
/// normal penetration path.
pub fn assess_impact_with_sample(
    conditions: &ImpactConditions,
    sample: f64,
) -> Result<ImpactAssessment, RicochetError> {
    if !(0.0..=1.0).contains(&sample) {
        return Err(RicochetError::SampleOutOfRange(sample));
    }
    let critical = critical_angle_deg(conditions)?;
    let probability = ricochet_probability(conditions.impact_angle_deg, critical);

    let deflection = if sample < probability {
        Some(classify_deflection(conditions))
    } else {
        None
    };

    Ok(ImpactAssessment {
        critical_angle_deg: critical,
        ricochet_probability: probability,
        deflection,
    })
}

fn classify_deflection(conditions: &ImpactConditions) -> Deflection {
    let velocity = conditions.impact_velocity_ms;
    if velocity < EMBED_VELOCITY_MS {
        return Deflection {
            kind: DeflectionKind::Embedding,
            deflection_angle_deg: 0.0,
            exit_velocity_ms: 0.0,
            energy_retained: 0.0,
        };
    }

    let impact_energy = 0.5 * conditions.projectile_mass_kg * velocity * velocity;
    let hardness_ratio = conditions.projectile_hardness / conditions.armor_hardness;
    if impact_energy > SHATTER_ENERGY_J && hardness_ratio < SHATTER_HARDNESS_RATIO {
        return Deflection {
            kind: DeflectionKind::Shattering,
            deflection_angle_deg: 0.0,
            exit_velocity_ms: 0.0,
            energy_retained: 0.0,
        };
    }

    // Angle-of-reflection bounce: the normal component is absorbed by the
    // plate, a fraction of the tangential component carries on.
    let angle_rad = deg_to_rad(conditions.impact_angle_deg);
    let exit_velocity = velocity * angle_rad.sin() * RICOCHET_EXIT_FACTOR;
    let energy_retained = (exit_velocity / velocity).powi(2);
    Deflection {
        kind: DeflectionKind::Ricochet,
        deflection_angle_deg: 180.0 - 2.0 * conditions.impact_angle_deg,
        exit_velocity_ms: exit_velocity,
        energy_retained,
    }
}

fn validate(conditions: &ImpactConditions) -> Result<(), RicochetError> {
    let angle = conditions.impact_angle_deg;
    if !angle.is_finite() || angle < 0.0 || angle >= 90.0 {
        return Err(RicochetError::AngleOutOfRange(angle));
    }
    if !(conditions.impact_velocity_ms > 0.0) {
        return Err(RicochetError::InvalidVelocity(conditions.impact_velocity_ms));
    }
    if !(conditions.projectile_mass_kg > 0.0) {
        return Err(RicochetError::InvalidMass(conditions.projectile_mass_kg));
    }
    if !(conditions.projectile_hardness > 0.0) || !(conditions.armor_hardness > 0.0) {
        return Err(RicochetError::InvalidHardness);
    }
    Ok(())
}

/// Grid sweep of ricochet probability over velocity × angle, plain data for
/// external plotting tools.
#[derive(Debug, Clone)]
pub struct EnvelopeRequest {
    pub velocity_range_ms: (f64, f64),
    pub angle_range_deg: (f64, f64),
    pub samples_per_axis: usize,
}

/// Probability mesh produced by [`ricochet_envelope`]; `probabilities[i][j]`
/// pairs `angles_deg[i]` with `velocities_ms[j]`.
#[derive(Debug, Clone)]
pub struct RicochetEnvelope {
    pub velocities_ms: Vec<f64>,
    pub angles_deg: Vec<f64>,
    pub probabilities: Vec<Vec<f64>>,
}

pub fn ricochet_envelope(
    base: &ImpactConditions,
    request: &EnvelopeRequest,
) -> Result<RicochetEnvelope, RicochetError> {
    let n = request.samples_per_axis.max(2);
    let (v_lo, v_hi) = request.velocity_range_ms;
    let (a_lo, a_hi) = request.angle_range_deg;

    let velocities: Vec<f64> = (0..n)
        .map(|i| v_lo + (v_hi - v_lo) * i as f64 / (n - 1) as f64)
        .collect();
    let angles: Vec<f64> = (0..n)
        .map(|i| a_lo + (a_hi - a_lo) * i as f64 / (n - 1) as f64)
        .collect();

    let mut probabilities = Vec::with_capacity(n);
    for &angle in &angles {
        let mut row = Vec::with_capacity(n);
        for &velocity in &velocities {
            let cell = ImpactConditions {
                impact_angle_deg: angle,
                impact_velocity_ms: velocity,
                ..base.clone()
            };
            let critical = critical_angle_deg(&cell)?;
            row.push(ricochet_probability(angle, critical));
        }
        probabilities.push(row);
    }

    Ok(RicochetEnvelope {
        velocities_ms: velocities,
        angles_deg: angles,
        probabilities,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn long_rod_impact(angle_deg: f64, velocity_ms: f64) -> ImpactConditions {
        ImpactConditions {
            impact_angle_deg: angle_deg,
            impact_velocity_ms: velocity_ms,
            projectile_mass_kg: 4.6,
            projectile_hardness: 0.9,
            armor_hardness: 0.85,
            mechanism: Mechanism::Kinetic,
            ld_ratio: Some(25.9),
        }
    }

    #[test]
    fn probability_is_monotonic_in_angle() {
        let mut previous = -1.0;
        for angle in [0.0, 20.0, 40.0, 55.0, 65.0, 75.0, 85.0] {
            let p = ricochet_probability(angle, 65.0);
            assert!(p > previous);
            assert!((0.0..=1.0).contains(&p));
            previous = p;
        }
        assert!(ricochet_probability(40.0, 65.0) < 0.01);
        assert!(ricochet_probability(89.0, 65.0) > 0.99);
    }

    #[test]
    fn harder_armor_lowers_the_critical_angle() {
        let soft = ImpactConditions {
            armor_hardness: 0.7,
            ..long_rod_impact(45.0, 1_400.0)
        };
        let hard = ImpactConditions {
            armor_hardness: 1.0,
            ..long_rod_impact(45.0, 1_400.0)
        };
        assert!(critical_angle_deg(&hard).unwrap() < critical_angle_deg(&soft).unwrap());
    }

    #[test]
    fn fixed_sample_is_deterministic() {
        let conditions = long_rod_impact(78.0, 1_300.0);
        let first = assess_impact_with_sample(&conditions, 0.05).unwrap();
        let second = assess_impact_with_sample(&conditions, 0.05).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn seeded_generator_is_reproducible() {
        let conditions = long_rod_impact(75.0, 1_200.0);
        let mut a = ChaCha8Rng::seed_from_u64(11);
        let mut b = ChaCha8Rng::seed_from_u64(11);
        let first = assess_impact(&conditions, &mut a).unwrap();
        let second = assess_impact(&conditions, &mut b).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn slow_rounds_embed_rather_than_bounce() {
        let conditions = long_rod_impact(80.0, 250.0);
        let assessment = assess_impact_with_sample(&conditions, 0.0).unwrap();
        let deflection = assessment.deflection.unwrap();
        assert_eq!(deflection.kind, DeflectionKind::Embedding);
        assert_eq!(deflection.exit_velocity_ms, 0.0);
    }

    #[test]
    fn soft_fast_rounds_shatter_on_hard_plate() {
        let conditions = ImpactConditions {
            projectile_hardness: 0.4,
            armor_hardness: 0.85,
            projectile_mass_kg: 18.6,
            mechanism: Mechanism::ChemicalJet,
            ld_ratio: None,
            impact_angle_deg: 80.0,
            impact_velocity_ms: 750.0,
        };
        let assessment = assess_impact_with_sample(&conditions, 0.0).unwrap();
        assert_eq!(
            assessment.deflection.unwrap().kind,
            DeflectionKind::Shattering
        );
    }

    #[test]
    fn ricochet_reflects_and_keeps_partial_energy() {
        let conditions = long_rod_impact(80.0, 1_300.0);
        let assessment = assess_impact_with_sample(&conditions, 0.0).unwrap();
        let deflection = assessment.deflection.unwrap();
        assert_eq!(deflection.kind, DeflectionKind::Ricochet);
        assert!((deflection.deflection_angle_deg - 20.0).abs() < 1e-9);
        assert!(deflection.exit_velocity_ms > 0.0);
        assert!(deflection.exit_velocity_ms < conditions.impact_velocity_ms);
        assert!((0.0..1.0).contains(&deflection.energy_retained));
    }

    #[test]
    fn sample_at_or_above_probability_means_the_round_bites() {
        let conditions = long_rod_impact(85.0, 1_300.0);
        let assessment = assess_impact_with_sample(&conditions, 1.0).unwrap();
        assert!(assessment.ricochet_probability > 0.9);
        assert!(assessment.deflection.is_none());
    }

    #[test]
    fn envelope_mesh_is_rectangular_and_bounded() {
        let base = long_rod_impact(45.0, 1_000.0);
        let envelope = ricochet_envelope(
            &base,
            &EnvelopeRequest {
                velocity_range_ms: (400.0, 1_800.0),
                angle_range_deg: (0.0, 85.0),
                samples_per_axis: 12,
            },
        )
        .unwrap();
        assert_eq!(envelope.angles_deg.len(), 12);
        assert_eq!(envelope.probabilities.len(), 12);
        for row in &envelope.probabilities {
            assert_eq!(row.len(), 12);
            for p in row {
                assert!((0.0..=1.0).contains(p));
            }
        }
    }
}
