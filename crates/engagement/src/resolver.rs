//! Core engagement resolution: one shot against one armor array.

use armor_environment::{sample_atmosphere, EnvironmentalConditions};
use armor_munitions::{Ammunition, MunitionsError};
use armor_protection::{Armor, ArmorIntegrity, ProtectionError};
use armor_ricochet::{
    assess_impact, critical_angle_deg, ImpactAssessment, ImpactConditions, RicochetError,
};
use rand::Rng;
use thiserror::Error;

use crate::behind_armor::{estimate_behind_armor, BehindArmorEffect};

/// Caller-side parameters of one shot.
#[derive(Debug, Clone)]
pub struct ShotParameters {
    /// Range to the target (m); must be positive.
    pub range_m: f64,
    /// Impact angle from the armor surface normal (deg, [0°, 90°)).
    pub impact_angle_deg: f64,
    /// Ambient conditions at the engagement site.
    pub conditions: EnvironmentalConditions,
}

/// Resolver tuning knobs.
#[derive(Debug, Clone)]
pub struct ResolverConfig {
    /// Ricochet is evaluated only when the impact angle exceeds this fraction
    /// of the pairing's critical angle; below it the round always bites.
    pub ricochet_threshold_fraction: f64,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            ricochet_threshold_fraction: 0.6,
        }
    }
}

/// Top-level engagement resolution error.
#[derive(Debug, Error)]
pub enum EngagementError {
    #[error("range must be positive (got {0} m)")]
    InvalidRange(f64),
    #[error("ammunition capability failed: {0}")]
    Munitions(#[from] MunitionsError),
    #[error("armor capability failed: {0}")]
    Protection(#[from] ProtectionError),
    #[error("ricochet assessment failed: {0}")]
    Ricochet(#[from] RicochetError),
}

/// Complete verdict for one shot.
#[derive(Debug, Clone, PartialEq)]
pub struct EngagementResult {
    /// Penetration capability at impact (mm RHA-equivalent).
    pub penetration_mm: f64,
    /// Effective protection of the armor against this round (mm RHA-equivalent).
    pub effective_thickness_mm: f64,
    /// Remaining velocity at impact (m/s).
    pub impact_velocity_ms: f64,
    /// Whether the round defeats the armor. Ties favor the armor, and a
    /// deflected round never penetrates.
    pub penetrates: bool,
    /// Signed margin: positive overmatch means penetration (mm RHA-equivalent).
    pub overmatch_mm: f64,
    /// Ricochet assessment; `None` when the impact angle stayed below the
    /// evaluation threshold.
    pub ricochet: Option<ImpactAssessment>,
    /// Behind-armor effect estimate; zeroed when the armor holds.
    pub behind_armor: BehindArmorEffect,
    /// Updated degradation state when integrity tracking is engaged.
    pub integrity: Option<ArmorIntegrity>,
}

/// Resolve one engagement.
///
/// Deterministic apart from the ricochet sample drawn from `rng`; pass a
/// seeded generator to reproduce outcomes. When `integrity` is supplied the
/// hit is recorded against a copy and the updated state returned; the
/// caller's value is never mutated in place.
pub fn resolve_engagement<R: Rng>(
    ammunition: &Ammunition,
    armor: &Armor,
    shot: &ShotParameters,
    integrity: Option<ArmorIntegrity>,
    config: &ResolverConfig,
    rng: &mut R,
) -> Result<EngagementResult, EngagementError> {
    if !(shot.range_m > 0.0) || !shot.range_m.is_finite() {
        return Err(EngagementError::InvalidRange(shot.range_m));
    }

    let atmosphere = sample_atmosphere(&shot.conditions);
    let mechanism = ammunition.mechanism();

    let impact_velocity = ammunition.velocity_at_range(shot.range_m, &atmosphere)?;
    let penetration =
        ammunition.penetration_mm(shot.range_m, shot.impact_angle_deg, &atmosphere)?;
    let effective = armor.effective_thickness_mm(
        mechanism,
        shot.impact_angle_deg,
        integrity.as_ref(),
    )?;

    let impact = ImpactConditions {
        impact_angle_deg: shot.impact_angle_deg,
        impact_velocity_ms: impact_velocity,
        projectile_mass_kg: ammunition.mass_kg(),
        projectile_hardness: ammunition.projectile_hardness(),
        armor_hardness: armor.surface_hardness(),
        mechanism,
        ld_ratio: ammunition.ld_ratio(),
    };
    let critical = critical_angle_deg(&impact)?;

    let ricochet = if shot.impact_angle_deg > config.ricochet_threshold_fraction * critical {
        Some(assess_impact(&impact, rng)?)
    } else {
        None
    };
    let deflected = ricochet
        .as_ref()
        .is_some_and(|assessment| assessment.deflection.is_some());

    let armor_holds = effective >= penetration;
    let penetrates = !armor_holds && !deflected;
    let overmatch = penetration - effective;

    let behind_armor = estimate_behind_armor(
        mechanism,
        ammunition.caliber_mm(),
        armor.nominal_thickness_mm(),
        if penetrates { overmatch } else { 0.0 },
        effective,
    );

    let updated_integrity = integrity.map(|mut state| {
        state.record_hit(penetration, effective);
        state
    });

    tracing::debug!(
        ammunition = ammunition.name(),
        armor = armor.name(),
        range_m = shot.range_m,
        angle_deg = shot.impact_angle_deg,
        penetration_mm = penetration,
        effective_mm = effective,
        penetrates,
        deflected,
        "engagement resolved"
    );

    Ok(EngagementResult {
        penetration_mm: penetration,
        effective_thickness_mm: effective,
        impact_velocity_ms: impact_velocity,
        penetrates,
        overmatch_mm: overmatch,
        ricochet,
        behind_armor,
        integrity: updated_integrity,
    })
}
