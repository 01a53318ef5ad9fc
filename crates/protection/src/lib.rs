//! Armor models: effective protection thickness, mechanism-specific
//! multipliers, and multi-hit degradation state.

pub mod constants;

use armor_core::mechanism::Mechanism;
use armor_core::units::deg_to_rad;
use thiserror::Error;

use crate::constants::*;

/// Material-class parameters of an armor array.
#[derive(Debug, Clone, PartialEq)]
pub enum ArmorClass {
    /// Homogeneous steel; rolled homogeneous armor is the 1.0 baseline.
    Steel { thickness_mm: f64, hardness: f64, quality: f64 },
    /// Layered steel/ceramic composite array.
    Composite {
        total_thickness_mm: f64,
        steel_layers_mm: f64,
        ceramic_layers_mm: f64,
        other_layers_mm: f64,
    },
    /// Explosive reactive tiles over a base plate.
    Reactive {
        base_thickness_mm: f64,
        era_thickness_mm: f64,
        explosive_mass_kg: f64,
    },
    /// Two plates separated by an air gap.
    Spaced {
        front_plate_mm: f64,
        rear_plate_mm: f64,
        gap_mm: f64,
    },
}

/// Errors surfaced by armor construction and protection queries.
#[derive(Debug, Error)]
pub enum ProtectionError {
    #[error("{0} must be positive")]
    InvalidThickness(&'static str),
    #[error("explosive mass must be positive (got {0} kg)")]
    InvalidExplosiveMass(f64),
    #[error("impact angle must lie in [0°, 90°) (got {0}°)")]
    AngleOutOfRange(f64),
}

/// An immutable armor definition with its protection formulas attached.
#[derive(Debug, Clone, PartialEq)]
pub struct Armor {
    name: String,
    class: ArmorClass,
    nominal_thickness_mm: f64,
    density_kg_m3: f64,
    hardness: f64,
}

impl Armor {
    /// Build a validated armor array. The nominal thickness and average
    /// density are derived from the class parameters.
    pub fn new(name: impl Into<String>, class: ArmorClass) -> Result<Self, ProtectionError> {
        let (nominal_thickness_mm, density_kg_m3, hardness) = match &class {
            ArmorClass::Steel {
                thickness_mm,
                hardness,
                ..
            } => {
                if !(*thickness_mm > 0.0) {
                    return Err(ProtectionError::InvalidThickness("steel thickness"));
                }
                (*thickness_mm, STEEL_DENSITY, *hardness)
            }
            ArmorClass::Composite {
                total_thickness_mm,
                steel_layers_mm,
                ceramic_layers_mm,
                other_layers_mm,
            } => {
                if !(*total_thickness_mm > 0.0) {
                    return Err(ProtectionError::InvalidThickness("composite thickness"));
                }
                let weighted = (steel_layers_mm * STEEL_DENSITY
                    + ceramic_layers_mm * CERAMIC_DENSITY
                    + other_layers_mm * FILLER_DENSITY)
                    / total_thickness_mm;
                (*total_thickness_mm, weighted, 1.0)
            }
            ArmorClass::Reactive {
                base_thickness_mm,
                era_thickness_mm,
                explosive_mass_kg,
            } => {
                if !(*base_thickness_mm > 0.0) || !(*era_thickness_mm > 0.0) {
                    return Err(ProtectionError::InvalidThickness("reactive plate thickness"));
                }
                if !(*explosive_mass_kg > 0.0) {
                    return Err(ProtectionError::InvalidExplosiveMass(*explosive_mass_kg));
                }
                (
                    base_thickness_mm + era_thickness_mm,
                    REACTIVE_AVG_DENSITY,
                    1.0,
                )
            }
            ArmorClass::Spaced {
                front_plate_mm,
                rear_plate_mm,
                gap_mm,
            } => {
                if !(*front_plate_mm > 0.0) || !(*rear_plate_mm > 0.0) {
                    return Err(ProtectionError::InvalidThickness("spaced plate thickness"));
                }
                if !(*gap_mm > 0.0) {
                    return Err(ProtectionError::InvalidThickness("plate gap"));
                }
                (front_plate_mm + rear_plate_mm, SPACED_AVG_DENSITY, 1.0)
            }
        };

        Ok(Self {
            name: name.into(),
            class,
            nominal_thickness_mm,
            density_kg_m3,
            hardness,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn class(&self) -> &ArmorClass {
        &self.class
    }

    /// Stable identifier of the material class, used in exported artifacts.
    pub fn class_tag(&self) -> &'static str {
        match self.class {
            ArmorClass::Steel { .. } => "steel",
            ArmorClass::Composite { .. } => "composite",
            ArmorClass::Reactive { .. } => "reactive",
            ArmorClass::Spaced { .. } => "spaced",
        }
    }

    pub fn nominal_thickness_mm(&self) -> f64 {
        self.nominal_thickness_mm
    }

    pub fn density_kg_m3(&self) -> f64 {
        self.density_kg_m3
    }

    pub fn hardness(&self) -> f64 {
        self.hardness
    }

    /// Areal mass of the array (kg/m²).
    pub fn mass_per_area_kg_m2(&self) -> f64 {
        self.nominal_thickness_mm * self.density_kg_m3 / 1_000.0
    }

    /// Surface hardness on the ricochet model's 0–1 scale.
    pub fn surface_hardness(&self) -> f64 {
        match self.class {
            ArmorClass::Steel { .. } => (STEEL_SURFACE_HARDNESS * self.hardness).min(1.0),
            ArmorClass::Composite { .. } => COMPOSITE_SURFACE_HARDNESS,
            ArmorClass::Reactive { .. } => REACTIVE_SURFACE_HARDNESS,
            ArmorClass::Spaced { .. } => SPACED_SURFACE_HARDNESS,
        }
    }

    /// Protection multiplier of this class against the given mechanism,
    /// relative to the same thickness of rolled homogeneous steel.
    pub fn protection_factor(&self, mechanism: Mechanism) -> f64 {
        match &self.class {
            ArmorClass::Steel { quality, .. } => *quality,
            ArmorClass::Composite {
                total_thickness_mm,
                steel_layers_mm,
                ceramic_layers_mm,
                ..
            } => {
                let steel_ratio = steel_layers_mm / total_thickness_mm;
                let ceramic_ratio = ceramic_layers_mm / total_thickness_mm;
                let factor = match mechanism {
                    Mechanism::Kinetic => 1.0 + ceramic_ratio * COMPOSITE_KINETIC_CERAMIC_BONUS,
                    Mechanism::ChemicalJet => {
                        COMPOSITE_JET_BASE
                            + ceramic_ratio * COMPOSITE_JET_CERAMIC_BONUS
                            + steel_ratio * COMPOSITE_JET_STEEL_BONUS
                    }
                    Mechanism::ChemicalSpall => {
                        COMPOSITE_SPALL_BASE
                            + ceramic_ratio * COMPOSITE_SPALL_CERAMIC_BONUS
                            + steel_ratio * COMPOSITE_SPALL_STEEL_BONUS
                    }
                };
                factor.min(COMPOSITE_FACTOR_CAP)
            }
            ArmorClass::Reactive {
                explosive_mass_kg, ..
            } => match mechanism {
                Mechanism::Kinetic => REACTIVE_KINETIC_FACTOR,
                Mechanism::ChemicalJet => {
                    (REACTIVE_JET_BASE + explosive_mass_kg * REACTIVE_JET_EXPLOSIVE_SCALE)
                        .min(REACTIVE_JET_CAP)
                }
                Mechanism::ChemicalSpall => REACTIVE_SPALL_FACTOR,
            },
            ArmorClass::Spaced { gap_mm, .. } => match mechanism {
                Mechanism::Kinetic => SPACED_KINETIC_FACTOR,
                Mechanism::ChemicalJet => (1.0 + gap_mm / 100.0).min(SPACED_JET_CAP),
                Mechanism::ChemicalSpall => SPACED_SPALL_FACTOR,
            },
        }
    }

    /// Effective protection in mm RHA-equivalent: line-of-sight thickness
    /// scaled by the mechanism multiplier and hardness. When integrity
    /// tracking is engaged the multiplier is further scaled by the remaining
    /// protection fraction.
    pub fn effective_thickness_mm(
        &self,
        mechanism: Mechanism,
        impact_angle_deg: f64,
        integrity: Option<&ArmorIntegrity>,
    ) -> Result<f64, ProtectionError> {
        if !impact_angle_deg.is_finite() || impact_angle_deg < 0.0 || impact_angle_deg >= 90.0 {
            return Err(ProtectionError::AngleOutOfRange(impact_angle_deg));
        }
        let line_of_sight = self.nominal_thickness_mm / deg_to_rad(impact_angle_deg).cos();
        let mut factor = self.protection_factor(mechanism);
        if let Some(state) = integrity {
            factor *= state.remaining();
        }
        Ok(line_of_sight * factor * self.hardness)
    }

    /// Whether the armor holds against the given penetration capability.
    /// Equality favors the armor: a round exactly matching the effective
    /// thickness does not penetrate.
    pub fn can_defeat(
        &self,
        penetration_mm: f64,
        mechanism: Mechanism,
        impact_angle_deg: f64,
        integrity: Option<&ArmorIntegrity>,
    ) -> Result<bool, ProtectionError> {
        let effective = self.effective_thickness_mm(mechanism, impact_angle_deg, integrity)?;
        Ok(effective >= penetration_mm)
    }
}

/// Coarse serviceability classification derived from remaining integrity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IntegrityStatus {
    Excellent,
    Good,
    Degraded,
    HeavilyDamaged,
    CriticalFailure,
}

/// Accumulated damage state of one physical armor instance.
///
/// A plain value owned by whichever caller tracks a persistent engagement;
/// the resolver reads it and returns an updated copy rather than mutating
/// shared state.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ArmorIntegrity {
    remaining: f64,
    hits: u32,
}

impl Default for ArmorIntegrity {
    fn default() -> Self {
        Self::new()
    }
}

impl ArmorIntegrity {
    /// Pristine armor: full protection, no hits recorded.
    pub fn new() -> Self {
        Self {
            remaining: 1.0,
            hits: 0,
        }
    }

    /// Remaining protection fraction in [0, 1].
    pub fn remaining(&self) -> f64 {
        self.remaining
    }

    /// Number of hits recorded against this instance.
    pub fn hits(&self) -> u32 {
        self.hits
    }

    /// Record one hit. Degradation is proportional to the attacker's
    /// penetration capability over the armor's effective thickness, so a
    /// heavy overmatch wears the plate faster; `remaining` never drops
    /// below zero.
    pub fn record_hit(&mut self, penetration_mm: f64, effective_thickness_mm: f64) {
        self.hits = self.hits.saturating_add(1);
        if effective_thickness_mm <= 0.0 {
            self.remaining = 0.0;
            return;
        }
        let severity = (penetration_mm.max(0.0) / effective_thickness_mm).min(HIT_SEVERITY_CAP);
        self.remaining = (self.remaining - DEGRADATION_RATE * severity).max(0.0);
    }

    /// Serviceability classification for reporting.
    pub fn status(&self) -> IntegrityStatus {
        match self.remaining {
            r if r > 0.8 => IntegrityStatus::Excellent,
            r if r > 0.6 => IntegrityStatus::Good,
            r if r > 0.4 => IntegrityStatus::Degraded,
            r if r > 0.2 => IntegrityStatus::HeavilyDamaged,
            _ => IntegrityStatus::CriticalFailure,
        }
    }
}
