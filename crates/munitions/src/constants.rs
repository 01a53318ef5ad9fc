//! Empirical tuning constants for the ammunition formulas.
//!
//! These are engineering-approximation values calibrated against the
//! workspace reference scenarios, not physically derived quantities.

/// Velocity exponent of the long-rod penetration law.
pub const LONG_ROD_VELOCITY_EXP: f64 = 1.43;
/// Scale constant of the long-rod penetration law (per mm of penetrator diameter).
pub const K_LONG_ROD: f64 = 19.0;
/// Angle exponent of the long-rod cosine factor; long rods tolerate obliquity well.
pub const LONG_ROD_ANGLE_EXP: f64 = 0.68;
/// L/D ratio at which the length bonus starts.
pub const LD_REFERENCE: f64 = 15.0;
/// Length bonus per unit of L/D above the reference.
pub const LD_SLOPE: f64 = 0.02;
/// Upper bound of the L/D bonus factor.
pub const LD_FACTOR_CAP: f64 = 1.4;

/// DeMarre-style constant for full-caliber solid shot.
pub const K_SOLID_SHOT: f64 = 0.5;
/// Dimensional scale of the solid-shot law.
pub const C_SOLID_SHOT: f64 = 100.0;
/// Velocity exponent for solid shot.
pub const SOLID_SHOT_VELOCITY_EXP: f64 = 1.4;

/// DeMarre-style constant for sub-caliber cores.
pub const K_SUB_CALIBER: f64 = 0.6;
/// Dimensional scale of the sub-caliber law.
pub const C_SUB_CALIBER: f64 = 100.0;
/// Velocity exponent for sub-caliber cores; harder cores reward velocity more.
pub const SUB_CALIBER_VELOCITY_EXP: f64 = 1.5;
/// Angle exponent for sub-caliber cores.
pub const SUB_CALIBER_ANGLE_EXP: f64 = 0.8;

/// Jet penetration per mm of warhead diameter at zero obliquity.
pub const JET_DIAMETER_MULTIPLIER: f64 = 6.0;
/// Exponent of the explosive-charge factor (charge mass over caliber in metres).
pub const JET_EXPLOSIVE_EXP: f64 = 0.3;
/// Upper bound of the standoff improvement factor.
pub const JET_STANDOFF_CAP: f64 = 1.2;
/// Factor applied when the charge detonates on contact (no standoff probe).
pub const JET_CONTACT_FACTOR: f64 = 0.9;

/// Spalling effectiveness per kg of plastic explosive.
pub const SPALL_EFFECT_SCALE: f64 = 200.0;
/// Obliquity tolerance of squash heads: the cosine sees only this fraction of the angle.
pub const SPALL_ANGLE_TOLERANCE: f64 = 0.7;
/// Reference impact velocity for the squash-head velocity factor (m/s).
pub const SPALL_VELOCITY_REF: f64 = 600.0;
/// Upper bound of the squash-head velocity factor.
pub const SPALL_VELOCITY_CAP: f64 = 1.2;

/// Exponential decay coefficients per metre at unit density ratio.
pub const LONG_ROD_DRAG_COEFF: f64 = 1.0e-4;
pub const SOLID_SHOT_DRAG_COEFF: f64 = 1.5e-4;
pub const SUB_CALIBER_DRAG_COEFF: f64 = 1.2e-4;
pub const SHAPED_CHARGE_DRAG_COEFF: f64 = 2.5e-4;
pub const SQUASH_HEAD_DRAG_COEFF: f64 = 3.0e-4;

/// Remaining velocity never drops below this fraction of muzzle velocity.
pub const VELOCITY_FLOOR_FRACTION: f64 = 0.10;

/// Relative hardness of penetrator materials on the ricochet model's 0–1 scale.
pub const KINETIC_PROJECTILE_HARDNESS: f64 = 0.9;
pub const JET_PROJECTILE_HARDNESS: f64 = 0.4;
pub const SPALL_PROJECTILE_HARDNESS: f64 = 0.5;

/// Base (low-Mach) drag coefficients by projectile shape class.
pub const KINETIC_BASE_CD: f64 = 0.15;
pub const JET_BASE_CD: f64 = 0.25;
pub const SPALL_BASE_CD: f64 = 0.30;

/// Muzzle-velocity change per °C of propellant temperature away from 15 °C.
pub const PROPELLANT_VELOCITY_COEFF_PER_C: f64 = 0.008;
