//! Catalog record types and loaders for the Armor Penetration Calculator.
//!
//! Records are plain data with no behavior attached; the engagement crate
//! converts them into runtime ammunition and armor values. Catalogs load
//! from a YAML file or from a directory of per-record TOML files.

use std::fs::File;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

/// Ammunition catalog entry.
#[derive(Debug, Deserialize, Clone)]
pub struct AmmunitionRecord {
    pub name: String,
    pub caliber_mm: f64,
    pub mass_kg: f64,
    pub muzzle_velocity_ms: f64,
    pub nature: AmmunitionNatureRecord,
}

/// Nature-specific parameters in catalog manifests. Unknown tags are kept as
/// `Unsupported` so conversion can reject them explicitly instead of
/// silently defaulting.
#[derive(Debug, Deserialize, Clone)]
#[serde(tag = "type")]
pub enum AmmunitionNatureRecord {
    #[serde(rename = "long-rod")]
    LongRod {
        penetrator_diameter_mm: f64,
        penetrator_length_mm: f64,
    },
    #[serde(rename = "solid-shot")]
    SolidShot,
    #[serde(rename = "sub-caliber")]
    SubCaliber {
        core_diameter_mm: f64,
        core_mass_kg: f64,
    },
    #[serde(rename = "shaped-charge")]
    ShapedCharge {
        explosive_mass_kg: f64,
        #[serde(default)]
        standoff_mm: f64,
    },
    #[serde(rename = "squash-head")]
    SquashHead { explosive_mass_kg: f64 },
    #[serde(other)]
    Unsupported,
}

/// Armor catalog entry.
#[derive(Debug, Deserialize, Clone)]
pub struct ArmorRecord {
    pub name: String,
    pub protection: ArmorClassRecord,
}

/// Material-class parameters in catalog manifests.
#[derive(Debug, Deserialize, Clone)]
#[serde(tag = "type")]
pub enum ArmorClassRecord {
    #[serde(rename = "steel")]
    Steel {
        thickness_mm: f64,
        #[serde(default = "default_factor")]
        hardness: f64,
        #[serde(default = "default_factor")]
        quality: f64,
    },
    #[serde(rename = "composite")]
    Composite {
        total_thickness_mm: f64,
        steel_layers_mm: f64,
        #[serde(default)]
        ceramic_layers_mm: f64,
        #[serde(default)]
        other_layers_mm: f64,
    },
    #[serde(rename = "reactive")]
    Reactive {
        base_thickness_mm: f64,
        era_thickness_mm: f64,
        explosive_mass_kg: f64,
    },
    #[serde(rename = "spaced")]
    Spaced {
        front_plate_mm: f64,
        rear_plate_mm: f64,
        gap_mm: f64,
    },
    #[serde(other)]
    Unsupported,
}

fn default_factor() -> f64 {
    1.0
}

/// Errors that can occur while loading catalog files.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read catalog: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse YAML: {0}")]
    Parse(#[from] serde_yaml::Error),
    #[error("failed to parse TOML: {0}")]
    Toml(#[from] toml::de::Error),
}

/// Load ammunition records from a YAML file or TOML directory.
pub fn load_ammunition_records<P: AsRef<Path>>(
    path: P,
) -> Result<Vec<AmmunitionRecord>, ConfigError> {
    load_records(path)
}

/// Load armor records from a YAML file or TOML directory.
pub fn load_armor_records<P: AsRef<Path>>(path: P) -> Result<Vec<ArmorRecord>, ConfigError> {
    load_records(path)
}

fn load_records<T, P>(path: P) -> Result<Vec<T>, ConfigError>
where
    T: for<'de> Deserialize<'de>,
    P: AsRef<Path>,
{
    let path = path.as_ref();
    if path.is_dir() {
        read_dir_records(path)
    } else if path.extension().map(|ext| ext == "toml").unwrap_or(false) {
        let contents = std::fs::read_to_string(path)?;
        let record: T = toml::from_str(&contents)?;
        Ok(vec![record])
    } else {
        let reader = File::open(path)?;
        Ok(serde_yaml::from_reader(reader)?)
    }
}

fn read_dir_records<T>(dir: &Path) -> Result<Vec<T>, ConfigError>
where
    T: for<'de> Deserialize<'de>,
{
    let mut records = Vec::new();
    let mut entries: Vec<PathBuf> = std::fs::read_dir(dir)?
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|path| path.extension().map(|ext| ext == "toml").unwrap_or(false))
        .collect();
    entries.sort();
    for path in entries {
        let contents = std::fs::read_to_string(&path)?;
        let record: T = toml::from_str(&contents)?;
        records.push(record);
    }
    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn parses_toml_record() {
        let manifest = r#"
name = "M829A4 APFSDS"
caliber_mm = 120.0
mass_kg = 4.6
muzzle_velocity_ms = 1680.0

[nature]
type = "long-rod"
penetrator_diameter_mm = 22.0
penetrator_length_mm = 570.0
"#;
        let record: AmmunitionRecord = toml::from_str(manifest).unwrap();
        assert_eq!(record.name, "M829A4 APFSDS");
        assert!(matches!(
            record.nature,
            AmmunitionNatureRecord::LongRod { .. }
        ));
    }

    #[test]
    fn unknown_nature_tag_becomes_unsupported() {
        let manifest = r#"
name = "mystery round"
caliber_mm = 120.0
mass_kg = 10.0
muzzle_velocity_ms = 900.0

[nature]
type = "plasma-lance"
"#;
        let record: AmmunitionRecord = toml::from_str(manifest).unwrap();
        assert!(matches!(record.nature, AmmunitionNatureRecord::Unsupported));
    }

    #[test]
    fn loads_directory_of_toml_records() {
        let dir = tempfile::tempdir().unwrap();
        for (stem, thickness) in [("a_plate", 100.0), ("b_plate", 200.0)] {
            let mut file = std::fs::File::create(dir.path().join(format!("{stem}.toml"))).unwrap();
            writeln!(
                file,
                "name = \"RHA {thickness}mm\"\n[protection]\ntype = \"steel\"\nthickness_mm = {thickness}"
            )
            .unwrap();
        }
        let records = load_armor_records(dir.path()).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].name, "RHA 100mm");
    }

    #[test]
    fn steel_defaults_apply() {
        let manifest = r#"
name = "RHA 200mm"
[protection]
type = "steel"
thickness_mm = 200.0
"#;
        let record: ArmorRecord = toml::from_str(manifest).unwrap();
        match record.protection {
            ArmorClassRecord::Steel {
                thickness_mm,
                hardness,
                quality,
            } => {
                assert_eq!(thickness_mm, 200.0);
                assert_eq!(hardness, 1.0);
                assert_eq!(quality, 1.0);
            }
            other => panic!("unexpected class: {other:?}"),
        }
    }
}
