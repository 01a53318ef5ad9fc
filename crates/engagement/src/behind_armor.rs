//! Behind-armor effect estimation after a successful penetration.

use armor_core::mechanism::Mechanism;

/// Coarse severity rating derived from the overmatch-to-protection ratio.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum BehindArmorSeverity {
    /// Armor held; no interior effect.
    None,
    Light,
    Moderate,
    Severe,
    Catastrophic,
}

impl BehindArmorSeverity {
    /// Stable identifier used in exported artifacts.
    pub fn as_str(self) -> &'static str {
        match self {
            BehindArmorSeverity::None => "none",
            BehindArmorSeverity::Light => "light",
            BehindArmorSeverity::Moderate => "moderate",
            BehindArmorSeverity::Severe => "severe",
            BehindArmorSeverity::Catastrophic => "catastrophic",
        }
    }
}

/// Estimated interior effect of a penetrating hit.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BehindArmorEffect {
    /// Mass of armor material ejected into the interior (kg).
    pub spall_mass_kg: f64,
    /// Representative fragment velocity (m/s).
    pub fragment_velocity_ms: f64,
    /// Opening angle of the interior damage cone (deg).
    pub cone_angle_deg: f64,
    pub severity: BehindArmorSeverity,
}

impl BehindArmorEffect {
    /// No interior effect; used when the armor defeats the round.
    pub fn none() -> Self {
        Self {
            spall_mass_kg: 0.0,
            fragment_velocity_ms: 0.0,
            cone_angle_deg: 0.0,
            severity: BehindArmorSeverity::None,
        }
    }
}

/// Estimate the behind-armor effect of a hit.
///
/// `overmatch_mm` must already be zeroed by the caller when the armor held
/// or the round deflected. Kinetic and spalling mechanisms grow their damage
/// cone with overmatch; the shaped-charge cone is fixed but its fragment
/// velocity tracks the jet's residual energy.
pub fn estimate_behind_armor(
    mechanism: Mechanism,
    caliber_mm: f64,
    armor_thickness_mm: f64,
    overmatch_mm: f64,
    effective_thickness_mm: f64,
) -> BehindArmorEffect {
    if overmatch_mm <= 0.0 {
        return BehindArmorEffect::none();
    }

    let caliber_m_scale = caliber_mm * 0.001;
    let (spall_mass, fragment_velocity, cone_angle) = match mechanism {
        Mechanism::Kinetic => {
            let residual_velocity =
                (2.0 * overmatch_mm / armor_thickness_mm).sqrt() * 100.0;
            (
                armor_thickness_mm * 0.01 * caliber_m_scale,
                residual_velocity * 0.6,
                (15.0 + overmatch_mm / 10.0).min(30.0),
            )
        }
        Mechanism::ChemicalJet => (
            armor_thickness_mm * 0.005 * caliber_m_scale,
            800.0 + overmatch_mm * 2.0,
            45.0,
        ),
        Mechanism::ChemicalSpall => (
            armor_thickness_mm * 0.02 * caliber_m_scale,
            300.0 + overmatch_mm,
            60.0,
        ),
    };

    let severity = severity_rating(overmatch_mm, effective_thickness_mm);

    BehindArmorEffect {
        spall_mass_kg: spall_mass,
        fragment_velocity_ms: fragment_velocity,
        cone_angle_deg: cone_angle,
        severity,
    }
}

fn severity_rating(overmatch_mm: f64, effective_thickness_mm: f64) -> BehindArmorSeverity {
    if effective_thickness_mm <= 0.0 {
        return BehindArmorSeverity::Catastrophic;
    }
    match overmatch_mm / effective_thickness_mm {
        r if r < 0.25 => BehindArmorSeverity::Light,
        r if r < 1.0 => BehindArmorSeverity::Moderate,
        r if r < 3.0 => BehindArmorSeverity::Severe,
        _ => BehindArmorSeverity::Catastrophic,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defeated_round_leaves_no_interior_effect() {
        let effect = estimate_behind_armor(Mechanism::Kinetic, 120.0, 200.0, 0.0, 230.0);
        assert_eq!(effect, BehindArmorEffect::none());
    }

    #[test]
    fn kinetic_cone_grows_with_overmatch_up_to_cap() {
        let light = estimate_behind_armor(Mechanism::Kinetic, 120.0, 200.0, 50.0, 230.0);
        let heavy = estimate_behind_armor(Mechanism::Kinetic, 120.0, 200.0, 400.0, 230.0);
        assert!(light.cone_angle_deg < heavy.cone_angle_deg);
        assert!(heavy.cone_angle_deg <= 30.0);
        assert!(heavy.severity >= light.severity);
    }

    #[test]
    fn spall_mechanism_throws_the_widest_cone() {
        let kinetic = estimate_behind_armor(Mechanism::Kinetic, 120.0, 200.0, 100.0, 230.0);
        let jet = estimate_behind_armor(Mechanism::ChemicalJet, 120.0, 200.0, 100.0, 230.0);
        let spall = estimate_behind_armor(Mechanism::ChemicalSpall, 120.0, 200.0, 100.0, 230.0);
        assert!(spall.cone_angle_deg > jet.cone_angle_deg);
        assert!(jet.cone_angle_deg > kinetic.cone_angle_deg);
        assert!(spall.spall_mass_kg > kinetic.spall_mass_kg);
    }
}
