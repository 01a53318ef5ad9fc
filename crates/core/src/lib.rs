//! Core units, constants, and shared primitives for the Armor Penetration Calculator workspace.

/// Physical constants expressed in SI units (unless stated otherwise).
pub mod constants {
    /// Standard gravity at Earth's surface (m/s²).
    pub const G0: f64 = 9.80665;
    /// Air density at sea level, 15 °C, dry air (kg/m³).
    pub const SEA_LEVEL_AIR_DENSITY: f64 = 1.225;
    /// Specific gas constant for dry air (J/(kg·K)).
    pub const R_DRY_AIR: f64 = 287.058;
    /// Reference ambient temperature for standard conditions (°C).
    pub const STANDARD_TEMPERATURE_C: f64 = 15.0;
    /// Standard sea-level pressure (Pa).
    pub const STANDARD_PRESSURE_PA: f64 = 101_325.0;
    /// Nominal speed of sound used for Mach-number classification (m/s).
    pub const SPEED_OF_SOUND: f64 = 343.0;
}

/// Shared vocabulary for how a projectile defeats armor.
pub mod mechanism {
    use std::fmt;

    /// Penetration mechanism of a projectile, as seen by armor and ricochet models.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub enum Mechanism {
        /// Kinetic-energy penetration (long rods, solid shot, sub-caliber cores).
        Kinetic,
        /// Shaped-charge jet formed by the Monroe effect.
        ChemicalJet,
        /// Plastic-explosive spalling of the armor's rear face.
        ChemicalSpall,
    }

    impl Mechanism {
        /// Stable identifier used in exported artifacts.
        pub fn as_str(self) -> &'static str {
            match self {
                Mechanism::Kinetic => "kinetic",
                Mechanism::ChemicalJet => "chemical-jet",
                Mechanism::ChemicalSpall => "chemical-spall",
            }
        }
    }

    impl fmt::Display for Mechanism {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str(self.as_str())
        }
    }
}

/// Basic unit conversion helpers.
pub mod units {
    /// Convert millimetres to metres.
    #[inline]
    pub fn mm_to_m(v: f64) -> f64 {
        v / 1_000.0
    }

    /// Convert metres to millimetres.
    #[inline]
    pub fn m_to_mm(v: f64) -> f64 {
        v * 1_000.0
    }

    /// Convert degrees to radians.
    #[inline]
    pub fn deg_to_rad(v: f64) -> f64 {
        v.to_radians()
    }

    /// Convert radians to degrees.
    #[inline]
    pub fn rad_to_deg(v: f64) -> f64 {
        v.to_degrees()
    }

    /// Frontal area of a circular cross-section given its diameter in millimetres (m²).
    #[inline]
    pub fn frontal_area_m2(diameter_mm: f64) -> f64 {
        let radius_m = mm_to_m(diameter_mm) / 2.0;
        std::f64::consts::PI * radius_m * radius_m
    }
}

/// Minimal vector helpers to avoid ad-hoc `[f64; 3]` math everywhere.
pub mod vector {
    /// Alias for a 3D vector; components are metres or m/s depending on context.
    pub type Vector3 = [f64; 3];

    /// Euclidean norm of a vector.
    #[inline]
    pub fn norm(v: &Vector3) -> f64 {
        dot(v, v).sqrt()
    }

    /// Dot product of two vectors.
    #[inline]
    pub fn dot(a: &Vector3, b: &Vector3) -> f64 {
        a[0] * b[0] + a[1] * b[1] + a[2] * b[2]
    }

    /// Vector subtraction.
    #[inline]
    pub fn sub(a: &Vector3, b: &Vector3) -> Vector3 {
        [a[0] - b[0], a[1] - b[1], a[2] - b[2]]
    }

    /// Scale a vector by a scalar.
    #[inline]
    pub fn scale(v: &Vector3, s: f64) -> Vector3 {
        [v[0] * s, v[1] * s, v[2] * s]
    }
}
