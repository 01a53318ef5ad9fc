//! Empirical tuning constants for the armor protection formulas.

/// Densities used to derive areal mass per class (kg/m³).
pub const STEEL_DENSITY: f64 = 7_850.0;
pub const CERAMIC_DENSITY: f64 = 3_900.0;
pub const FILLER_DENSITY: f64 = 2_000.0;
pub const REACTIVE_AVG_DENSITY: f64 = 6_000.0;
pub const SPACED_AVG_DENSITY: f64 = 4_000.0;

/// Composite multiplier shape: bonuses per layer-thickness ratio.
pub const COMPOSITE_KINETIC_CERAMIC_BONUS: f64 = 0.3;
pub const COMPOSITE_JET_BASE: f64 = 1.2;
pub const COMPOSITE_JET_CERAMIC_BONUS: f64 = 0.8;
pub const COMPOSITE_JET_STEEL_BONUS: f64 = 0.2;
pub const COMPOSITE_SPALL_BASE: f64 = 1.1;
pub const COMPOSITE_SPALL_CERAMIC_BONUS: f64 = 0.4;
pub const COMPOSITE_SPALL_STEEL_BONUS: f64 = 0.1;
/// Upper bound on any composite multiplier.
pub const COMPOSITE_FACTOR_CAP: f64 = 2.5;

/// Reactive tiles destabilize long rods only slightly.
pub const REACTIVE_KINETIC_FACTOR: f64 = 1.2;
/// Jet disruption grows with tile charge from this base...
pub const REACTIVE_JET_BASE: f64 = 2.5;
/// ...at this rate per kg of explosive...
pub const REACTIVE_JET_EXPLOSIVE_SCALE: f64 = 10.0;
/// ...up to this cap.
pub const REACTIVE_JET_CAP: f64 = 6.0;
pub const REACTIVE_SPALL_FACTOR: f64 = 1.5;

/// An air gap offers kinetic rounds slightly less than solid plate.
pub const SPACED_KINETIC_FACTOR: f64 = 0.95;
/// Gap-dependent jet disruption caps here.
pub const SPACED_JET_CAP: f64 = 2.0;
/// Air gap defeats shock transfer from squash heads.
pub const SPACED_SPALL_FACTOR: f64 = 1.8;

/// Surface hardness per class on the ricochet model's 0–1 scale.
pub const STEEL_SURFACE_HARDNESS: f64 = 0.85;
pub const COMPOSITE_SURFACE_HARDNESS: f64 = 0.7;
pub const REACTIVE_SURFACE_HARDNESS: f64 = 0.85;
pub const SPACED_SURFACE_HARDNESS: f64 = 0.8;

/// Integrity lost per hit per unit of penetration-to-protection ratio.
pub const DEGRADATION_RATE: f64 = 0.1;
/// Severity ratio beyond which extra overmatch wears the plate no faster.
pub const HIT_SEVERITY_CAP: f64 = 5.0;
