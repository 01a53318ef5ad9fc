//! Ammunition models: penetration capability and downrange velocity decay.
//!
//! Every round is a closed [`AmmunitionNature`] variant dispatched through
//! [`Ammunition`]; the per-nature formulas are simplified engineering
//! approximations whose constants live in [`constants`] and are calibrated
//! against the workspace reference scenarios.

pub mod constants;

use armor_core::mechanism::Mechanism;
use armor_core::units::deg_to_rad;
use armor_environment::LocalAtmosphere;
use thiserror::Error;

use crate::constants::*;

/// Nature-specific parameters of a round.
#[derive(Debug, Clone, PartialEq)]
pub enum AmmunitionNature {
    /// Fin-stabilized long-rod penetrator (APFSDS-class).
    LongRod {
        penetrator_diameter_mm: f64,
        penetrator_length_mm: f64,
    },
    /// Full-caliber armor-piercing solid shot.
    SolidShot,
    /// Sub-caliber hard-core round (APCR-class).
    SubCaliber {
        core_diameter_mm: f64,
        core_mass_kg: f64,
    },
    /// Shaped-charge warhead (HEAT-class).
    ShapedCharge {
        explosive_mass_kg: f64,
        standoff_mm: f64,
    },
    /// Plastic-explosive squash head (HESH-class).
    SquashHead { explosive_mass_kg: f64 },
}

impl AmmunitionNature {
    /// Penetration mechanism implied by the nature.
    pub fn mechanism(&self) -> Mechanism {
        match self {
            AmmunitionNature::LongRod { .. }
            | AmmunitionNature::SolidShot
            | AmmunitionNature::SubCaliber { .. } => Mechanism::Kinetic,
            AmmunitionNature::ShapedCharge { .. } => Mechanism::ChemicalJet,
            AmmunitionNature::SquashHead { .. } => Mechanism::ChemicalSpall,
        }
    }
}

/// Errors surfaced by ammunition construction and capability queries.
#[derive(Debug, Error)]
pub enum MunitionsError {
    #[error("caliber must be positive (got {0} mm)")]
    InvalidCaliber(f64),
    #[error("projectile mass must be positive (got {0} kg)")]
    InvalidMass(f64),
    #[error("muzzle velocity must be positive (got {0} m/s)")]
    InvalidMuzzleVelocity(f64),
    #[error("{0} must be positive")]
    InvalidNatureParameter(&'static str),
    #[error("impact angle must lie in [0°, 90°) (got {0}°)")]
    AngleOutOfRange(f64),
    #[error("range must be finite and non-negative (got {0} m)")]
    InvalidRange(f64),
}

/// An immutable round definition with its capability formulas attached.
#[derive(Debug, Clone, PartialEq)]
pub struct Ammunition {
    name: String,
    caliber_mm: f64,
    mass_kg: f64,
    muzzle_velocity_ms: f64,
    nature: AmmunitionNature,
}

impl Ammunition {
    /// Build a validated round. Non-positive caliber, mass, muzzle velocity,
    /// or nature-specific dimensions are rejected, never clamped.
    pub fn new(
        name: impl Into<String>,
        caliber_mm: f64,
        mass_kg: f64,
        muzzle_velocity_ms: f64,
        nature: AmmunitionNature,
    ) -> Result<Self, MunitionsError> {
        if !(caliber_mm > 0.0) {
            return Err(MunitionsError::InvalidCaliber(caliber_mm));
        }
        if !(mass_kg > 0.0) {
            return Err(MunitionsError::InvalidMass(mass_kg));
        }
        if !(muzzle_velocity_ms > 0.0) {
            return Err(MunitionsError::InvalidMuzzleVelocity(muzzle_velocity_ms));
        }
        match &nature {
            AmmunitionNature::LongRod {
                penetrator_diameter_mm,
                penetrator_length_mm,
            } => {
                if !(*penetrator_diameter_mm > 0.0) {
                    return Err(MunitionsError::InvalidNatureParameter("penetrator diameter"));
                }
                if !(*penetrator_length_mm > 0.0) {
                    return Err(MunitionsError::InvalidNatureParameter("penetrator length"));
                }
            }
            AmmunitionNature::SubCaliber {
                core_diameter_mm,
                core_mass_kg,
            } => {
                if !(*core_diameter_mm > 0.0) {
                    return Err(MunitionsError::InvalidNatureParameter("core diameter"));
                }
                if !(*core_mass_kg > 0.0) {
                    return Err(MunitionsError::InvalidNatureParameter("core mass"));
                }
            }
            AmmunitionNature::ShapedCharge {
                explosive_mass_kg, ..
            }
            | AmmunitionNature::SquashHead { explosive_mass_kg } => {
                if !(*explosive_mass_kg > 0.0) {
                    return Err(MunitionsError::InvalidNatureParameter("explosive mass"));
                }
            }
            AmmunitionNature::SolidShot => {}
        }
        Ok(Self {
            name: name.into(),
            caliber_mm,
            mass_kg,
            muzzle_velocity_ms,
            nature,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn caliber_mm(&self) -> f64 {
        self.caliber_mm
    }

    pub fn mass_kg(&self) -> f64 {
        self.mass_kg
    }

    pub fn muzzle_velocity_ms(&self) -> f64 {
        self.muzzle_velocity_ms
    }

    pub fn nature(&self) -> &AmmunitionNature {
        &self.nature
    }

    pub fn mechanism(&self) -> Mechanism {
        self.nature.mechanism()
    }

    /// Kinetic energy at the muzzle (J).
    pub fn muzzle_energy_j(&self) -> f64 {
        0.5 * self.mass_kg * self.muzzle_velocity_ms * self.muzzle_velocity_ms
    }

    /// Length-to-diameter ratio for long-rod penetrators, `None` otherwise.
    pub fn ld_ratio(&self) -> Option<f64> {
        match &self.nature {
            AmmunitionNature::LongRod {
                penetrator_diameter_mm,
                penetrator_length_mm,
            } => Some(penetrator_length_mm / penetrator_diameter_mm),
            _ => None,
        }
    }

    /// Relative projectile hardness on the ricochet model's 0–1 scale.
    pub fn projectile_hardness(&self) -> f64 {
        match self.mechanism() {
            Mechanism::Kinetic => KINETIC_PROJECTILE_HARDNESS,
            Mechanism::ChemicalJet => JET_PROJECTILE_HARDNESS,
            Mechanism::ChemicalSpall => SPALL_PROJECTILE_HARDNESS,
        }
    }

    /// Exponential decay coefficient of this nature (per metre at unit density ratio).
    pub fn drag_decay_coefficient(&self) -> f64 {
        match &self.nature {
            AmmunitionNature::LongRod { .. } => LONG_ROD_DRAG_COEFF,
            AmmunitionNature::SolidShot => SOLID_SHOT_DRAG_COEFF,
            AmmunitionNature::SubCaliber { .. } => SUB_CALIBER_DRAG_COEFF,
            AmmunitionNature::ShapedCharge { .. } => SHAPED_CHARGE_DRAG_COEFF,
            AmmunitionNature::SquashHead { .. } => SQUASH_HEAD_DRAG_COEFF,
        }
    }

    /// Base (low-Mach) drag coefficient used by the trajectory integrator.
    pub fn base_drag_cd(&self) -> f64 {
        match self.mechanism() {
            Mechanism::Kinetic => KINETIC_BASE_CD,
            Mechanism::ChemicalJet => JET_BASE_CD,
            Mechanism::ChemicalSpall => SPALL_BASE_CD,
        }
    }

    /// Remaining velocity at `range_m` under exponential drag decay.
    ///
    /// Never drops below 10 % of muzzle velocity; the floor models residual
    /// energy retention of the simplified decay law.
    pub fn velocity_at_range(
        &self,
        range_m: f64,
        atmosphere: &LocalAtmosphere,
    ) -> Result<f64, MunitionsError> {
        if !range_m.is_finite() || range_m < 0.0 {
            return Err(MunitionsError::InvalidRange(range_m));
        }
        let decay = self.drag_decay_coefficient() * range_m * atmosphere.density_ratio;
        let velocity = self.muzzle_velocity_ms * (-decay).exp();
        Ok(velocity.max(VELOCITY_FLOOR_FRACTION * self.muzzle_velocity_ms))
    }

    /// Penetration capability in mm RHA-equivalent at the given range and
    /// impact angle (degrees from the surface normal, 0° = perpendicular).
    pub fn penetration_mm(
        &self,
        range_m: f64,
        impact_angle_deg: f64,
        atmosphere: &LocalAtmosphere,
    ) -> Result<f64, MunitionsError> {
        validate_impact_angle(impact_angle_deg)?;
        let velocity = self.velocity_at_range(range_m, atmosphere)?;
        let angle_rad = deg_to_rad(impact_angle_deg);
        let cos_angle = angle_rad.cos();

        let penetration = match &self.nature {
            AmmunitionNature::LongRod {
                penetrator_diameter_mm,
                penetrator_length_mm,
            } => {
                let ld_ratio = penetrator_length_mm / penetrator_diameter_mm;
                let ld_factor =
                    (1.0 + (ld_ratio - LD_REFERENCE) * LD_SLOPE).min(LD_FACTOR_CAP);
                (velocity / 1_000.0).powf(LONG_ROD_VELOCITY_EXP)
                    * penetrator_diameter_mm
                    * K_LONG_ROD
                    * ld_factor
                    * cos_angle.powf(LONG_ROD_ANGLE_EXP)
            }
            AmmunitionNature::SolidShot => {
                let sectional_density = self.mass_kg / (self.caliber_mm * self.caliber_mm);
                K_SOLID_SHOT
                    * sectional_density
                    * (velocity / 1_000.0).powf(SOLID_SHOT_VELOCITY_EXP)
                    * cos_angle
                    * self.caliber_mm
                    * C_SOLID_SHOT
            }
            AmmunitionNature::SubCaliber {
                core_diameter_mm,
                core_mass_kg,
            } => {
                let sectional_density = core_mass_kg / (core_diameter_mm * core_diameter_mm);
                K_SUB_CALIBER
                    * sectional_density
                    * (velocity / 1_000.0).powf(SUB_CALIBER_VELOCITY_EXP)
                    * cos_angle.powf(SUB_CALIBER_ANGLE_EXP)
                    * core_diameter_mm
                    * C_SUB_CALIBER
            }
            AmmunitionNature::ShapedCharge {
                explosive_mass_kg,
                standoff_mm,
            } => {
                // Monroe-effect jet: velocity-independent, severely angle-sensitive.
                let explosive_factor =
                    (explosive_mass_kg / (self.caliber_mm / 1_000.0)).powf(JET_EXPLOSIVE_EXP);
                let standoff_factor = if *standoff_mm > 0.0 {
                    (1.0 + standoff_mm / (self.caliber_mm * 3.0)).min(JET_STANDOFF_CAP)
                } else {
                    JET_CONTACT_FACTOR
                };
                self.caliber_mm
                    * JET_DIAMETER_MULTIPLIER
                    * cos_angle
                    * cos_angle
                    * explosive_factor
                    * standoff_factor
            }
            AmmunitionNature::SquashHead { explosive_mass_kg } => {
                // Spalling effectiveness, not a direct perforation depth.
                let angle_factor = deg_to_rad(impact_angle_deg * SPALL_ANGLE_TOLERANCE).cos();
                let velocity_factor = (velocity / SPALL_VELOCITY_REF).min(SPALL_VELOCITY_CAP);
                explosive_mass_kg * SPALL_EFFECT_SCALE * angle_factor * velocity_factor
            }
        };

        Ok(penetration.max(0.0))
    }

    /// Muzzle-velocity multiplier for propellant conditioned away from 15 °C.
    ///
    /// Linear around the standard temperature; identity at 15 °C. Exposed as
    /// an explicit adjustment for callers that model ammunition temperature,
    /// never applied implicitly by the capability formulas.
    pub fn propellant_velocity_modifier(propellant_temperature_c: f64) -> f64 {
        let delta = propellant_temperature_c - armor_core::constants::STANDARD_TEMPERATURE_C;
        1.0 + delta * PROPELLANT_VELOCITY_COEFF_PER_C
    }
}

fn validate_impact_angle(angle_deg: f64) -> Result<(), MunitionsError> {
    if !angle_deg.is_finite() || angle_deg < 0.0 || angle_deg >= 90.0 {
        return Err(MunitionsError::AngleOutOfRange(angle_deg));
    }
    Ok(())
}
