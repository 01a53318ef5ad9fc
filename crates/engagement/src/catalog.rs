//! Conversion of plain catalog records into runtime ammunition and armor.

use armor_config::{
    AmmunitionNatureRecord, AmmunitionRecord, ArmorClassRecord, ArmorRecord,
};
use armor_munitions::{Ammunition, AmmunitionNature, MunitionsError};
use armor_protection::{Armor, ArmorClass, ProtectionError};
use thiserror::Error;

/// Errors surfaced when converting or selecting catalog records.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("ammunition '{0}' carries an unrecognized mechanism tag")]
    UnsupportedMechanism(String),
    #[error("armor '{0}' carries an unrecognized material-class tag")]
    UnsupportedArmorClass(String),
    #[error("invalid ammunition record: {0}")]
    Munitions(#[from] MunitionsError),
    #[error("invalid armor record: {0}")]
    Protection(#[from] ProtectionError),
    #[error("'{0}' not found in catalog")]
    NotFound(String),
    #[error("catalog is empty")]
    EmptyCatalog,
}

/// Convert an [`AmmunitionRecord`] into a validated runtime [`Ammunition`].
///
/// An unrecognized mechanism tag is rejected here; defaulting it would
/// misstate protection downstream.
pub fn ammunition_from_record(record: &AmmunitionRecord) -> Result<Ammunition, CatalogError> {
    let nature = match &record.nature {
        AmmunitionNatureRecord::LongRod {
            penetrator_diameter_mm,
            penetrator_length_mm,
        } => AmmunitionNature::LongRod {
            penetrator_diameter_mm: *penetrator_diameter_mm,
            penetrator_length_mm: *penetrator_length_mm,
        },
        AmmunitionNatureRecord::SolidShot => AmmunitionNature::SolidShot,
        AmmunitionNatureRecord::SubCaliber {
            core_diameter_mm,
            core_mass_kg,
        } => AmmunitionNature::SubCaliber {
            core_diameter_mm: *core_diameter_mm,
            core_mass_kg: *core_mass_kg,
        },
        AmmunitionNatureRecord::ShapedCharge {
            explosive_mass_kg,
            standoff_mm,
        } => AmmunitionNature::ShapedCharge {
            explosive_mass_kg: *explosive_mass_kg,
            standoff_mm: *standoff_mm,
        },
        AmmunitionNatureRecord::SquashHead { explosive_mass_kg } => {
            AmmunitionNature::SquashHead {
                explosive_mass_kg: *explosive_mass_kg,
            }
        }
        AmmunitionNatureRecord::Unsupported => {
            return Err(CatalogError::UnsupportedMechanism(record.name.clone()));
        }
    };

    Ok(Ammunition::new(
        record.name.clone(),
        record.caliber_mm,
        record.mass_kg,
        record.muzzle_velocity_ms,
        nature,
    )?)
}

/// Convert an [`ArmorRecord`] into a validated runtime [`Armor`].
pub fn armor_from_record(record: &ArmorRecord) -> Result<Armor, CatalogError> {
    let class = match &record.protection {
        ArmorClassRecord::Steel {
            thickness_mm,
            hardness,
            quality,
        } => ArmorClass::Steel {
            thickness_mm: *thickness_mm,
            hardness: *hardness,
            quality: *quality,
        },
        ArmorClassRecord::Composite {
            total_thickness_mm,
            steel_layers_mm,
            ceramic_layers_mm,
            other_layers_mm,
        } => ArmorClass::Composite {
            total_thickness_mm: *total_thickness_mm,
            steel_layers_mm: *steel_layers_mm,
            ceramic_layers_mm: *ceramic_layers_mm,
            other_layers_mm: *other_layers_mm,
        },
        ArmorClassRecord::Reactive {
            base_thickness_mm,
            era_thickness_mm,
            explosive_mass_kg,
        } => ArmorClass::Reactive {
            base_thickness_mm: *base_thickness_mm,
            era_thickness_mm: *era_thickness_mm,
            explosive_mass_kg: *explosive_mass_kg,
        },
        ArmorClassRecord::Spaced {
            front_plate_mm,
            rear_plate_mm,
            gap_mm,
        } => ArmorClass::Spaced {
            front_plate_mm: *front_plate_mm,
            rear_plate_mm: *rear_plate_mm,
            gap_mm: *gap_mm,
        },
        ArmorClassRecord::Unsupported => {
            return Err(CatalogError::UnsupportedArmorClass(record.name.clone()));
        }
    };

    Ok(Armor::new(record.name.clone(), class)?)
}

/// Select and convert an ammunition record by name (case-insensitive),
/// defaulting to the first entry.
pub fn select_ammunition(
    records: &[AmmunitionRecord],
    requested: Option<&str>,
) -> Result<Ammunition, CatalogError> {
    if records.is_empty() {
        return Err(CatalogError::EmptyCatalog);
    }
    let chosen = match requested {
        Some(name) => {
            let upper = name.to_uppercase();
            records
                .iter()
                .find(|record| record.name.to_uppercase() == upper)
                .ok_or_else(|| CatalogError::NotFound(name.to_string()))?
        }
        None => &records[0],
    };
    ammunition_from_record(chosen)
}

/// Select and convert an armor record by name (case-insensitive), defaulting
/// to the first entry.
pub fn select_armor(
    records: &[ArmorRecord],
    requested: Option<&str>,
) -> Result<Armor, CatalogError> {
    if records.is_empty() {
        return Err(CatalogError::EmptyCatalog);
    }
    let chosen = match requested {
        Some(name) => {
            let upper = name.to_uppercase();
            records
                .iter()
                .find(|record| record.name.to_uppercase() == upper)
                .ok_or_else(|| CatalogError::NotFound(name.to_string()))?
        }
        None => &records[0],
    };
    armor_from_record(chosen)
}
