//! Export helpers for CSV and JSON engagement artifacts.

pub mod replay {
    use serde::Serialize;
    use serde_json::to_writer_pretty;
    use std::fs::{self, File};
    use std::io;
    use std::path::Path;

    use armor_engagement::EngagementResult;
    use armor_environment::EnvironmentalConditions;
    use armor_munitions::Ammunition;
    use armor_protection::Armor;
    use armor_trajectory::TrajectoryPoint;

    /// Format revision of the replay record.
    pub const REPLAY_VERSION: &str = "1.0";

    /// Ammunition metadata block.
    #[derive(Debug, Clone, Serialize)]
    pub struct AmmunitionMeta {
        pub name: String,
        pub mechanism: String,
        pub caliber_mm: f64,
        pub mass_kg: f64,
        pub muzzle_velocity_ms: f64,
    }

    /// Armor metadata block.
    #[derive(Debug, Clone, Serialize)]
    pub struct ArmorMeta {
        pub name: String,
        pub class: String,
        pub thickness_mm: f64,
        pub density_kg_m3: f64,
        pub hardness: f64,
    }

    /// Environment metadata block.
    #[derive(Debug, Clone, Serialize)]
    pub struct EnvironmentMeta {
        pub temperature_c: f64,
        pub wind_speed_ms: f64,
        pub wind_heading_deg: f64,
        pub humidity_percent: f64,
        pub altitude_m: f64,
    }

    /// Shot parameters block.
    #[derive(Debug, Clone, Serialize)]
    pub struct ShotMeta {
        pub range_m: f64,
        pub impact_angle_deg: f64,
        pub launch_angle_deg: f64,
    }

    /// Impact verdict block.
    #[derive(Debug, Clone, Serialize)]
    pub struct ImpactAnalysis {
        pub penetrates: bool,
        pub penetration_mm: f64,
        pub effective_thickness_mm: f64,
        pub overmatch_mm: f64,
        pub impact_velocity_ms: f64,
        /// `"ricochet" | "shattering" | "embedding"`, or `null` when the
        /// round bit or ricochet was not evaluated.
        pub ricochet_outcome: Option<String>,
        pub ricochet_probability: Option<f64>,
        pub critical_angle_deg: Option<f64>,
        pub deflection_angle_deg: Option<f64>,
        pub exit_velocity_ms: Option<f64>,
        pub energy_retained: Option<f64>,
        pub behind_armor_severity: String,
        pub spall_mass_kg: f64,
        pub fragment_velocity_ms: f64,
        pub cone_angle_deg: f64,
    }

    /// One exported trajectory sample.
    #[derive(Debug, Clone, Serialize)]
    pub struct TrajectorySample {
        pub x_m: f64,
        pub y_m: f64,
        pub z_m: f64,
        pub vx_ms: f64,
        pub vy_ms: f64,
        pub vz_ms: f64,
        pub time_s: f64,
        pub air_density_kg_m3: f64,
    }

    /// Complete replay record consumed by external viewers.
    #[derive(Debug, Clone, Serialize)]
    pub struct ReplayRecord {
        pub version: &'static str,
        pub r#type: &'static str,
        pub ammunition: AmmunitionMeta,
        pub armor: ArmorMeta,
        pub environment: EnvironmentMeta,
        pub parameters: ShotMeta,
        pub impact_analysis: ImpactAnalysis,
        pub trajectory: Vec<TrajectorySample>,
    }

    impl ReplayRecord {
        /// Assemble a replay record from resolved engagement artifacts.
        pub fn from_parts(
            ammunition: &Ammunition,
            armor: &Armor,
            conditions: &EnvironmentalConditions,
            parameters: ShotMeta,
            result: &EngagementResult,
            trajectory: &[TrajectoryPoint],
        ) -> Self {
            let deflection = result
                .ricochet
                .as_ref()
                .and_then(|assessment| assessment.deflection);
            Self {
                version: REPLAY_VERSION,
                r#type: "engagement_replay",
                ammunition: AmmunitionMeta {
                    name: ammunition.name().to_string(),
                    mechanism: ammunition.mechanism().as_str().to_string(),
                    caliber_mm: ammunition.caliber_mm(),
                    mass_kg: ammunition.mass_kg(),
                    muzzle_velocity_ms: ammunition.muzzle_velocity_ms(),
                },
                armor: ArmorMeta {
                    name: armor.name().to_string(),
                    class: armor.class_tag().to_string(),
                    thickness_mm: armor.nominal_thickness_mm(),
                    density_kg_m3: armor.density_kg_m3(),
                    hardness: armor.hardness(),
                },
                environment: EnvironmentMeta {
                    temperature_c: conditions.temperature_c,
                    wind_speed_ms: conditions.wind_speed_ms,
                    wind_heading_deg: conditions.wind_heading_deg,
                    humidity_percent: conditions.humidity_percent,
                    altitude_m: conditions.altitude_m,
                },
                parameters,
                impact_analysis: ImpactAnalysis {
                    penetrates: result.penetrates,
                    penetration_mm: result.penetration_mm,
                    effective_thickness_mm: result.effective_thickness_mm,
                    overmatch_mm: result.overmatch_mm,
                    impact_velocity_ms: result.impact_velocity_ms,
                    ricochet_outcome: deflection.map(|d| d.kind.as_str().to_string()),
                    ricochet_probability: result
                        .ricochet
                        .as_ref()
                        .map(|assessment| assessment.ricochet_probability),
                    critical_angle_deg: result
                        .ricochet
                        .as_ref()
                        .map(|assessment| assessment.critical_angle_deg),
                    deflection_angle_deg: deflection.map(|d| d.deflection_angle_deg),
                    exit_velocity_ms: deflection.map(|d| d.exit_velocity_ms),
                    energy_retained: deflection.map(|d| d.energy_retained),
                    behind_armor_severity: result.behind_armor.severity.as_str().to_string(),
                    spall_mass_kg: result.behind_armor.spall_mass_kg,
                    fragment_velocity_ms: result.behind_armor.fragment_velocity_ms,
                    cone_angle_deg: result.behind_armor.cone_angle_deg,
                },
                trajectory: trajectory
                    .iter()
                    .map(|point| TrajectorySample {
                        x_m: point.x_m,
                        y_m: point.y_m,
                        z_m: point.z_m,
                        vx_ms: point.vx_ms,
                        vy_ms: point.vy_ms,
                        vz_ms: point.vz_ms,
                        time_s: point.time_s,
                        air_density_kg_m3: point.air_density_kg_m3,
                    })
                    .collect(),
            }
        }
    }

    /// Write a replay record as pretty-printed JSON, creating parent
    /// directories as needed.
    pub fn write_replay(output: &Path, record: &ReplayRecord) -> io::Result<()> {
        if let Some(parent) = output.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        to_writer_pretty(File::create(output)?, record)?;
        Ok(())
    }
}

pub mod sweep {
    use std::fs::{self, File};
    use std::io::{self, BufWriter, Write};
    use std::path::Path;

    use armor_engagement::SweepCell;

    const HEADER: &str = "ammunition,armor,range_m,angle_deg,impact_velocity_ms,penetration_mm,effective_thickness_mm,penetrates,overmatch_mm,ricochet_outcome,behind_armor_severity";

    /// Create a writer for the target path, handling stdout (`-`) by convention.
    pub fn writer_for_path(path: &Path) -> io::Result<Box<dyn Write>> {
        if path == Path::new("-") {
            return Ok(Box::new(BufWriter::new(io::stdout())));
        }
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        let file = File::create(path)?;
        Ok(Box::new(BufWriter::new(file)))
    }

    /// Write the standard sweep CSV header.
    pub fn write_header(writer: &mut dyn Write) -> io::Result<()> {
        writeln!(writer, "{}", HEADER)
    }

    /// CSV row emitted by the sweep exporter.
    #[derive(Debug, Clone)]
    pub struct Record<'a> {
        pub ammunition: &'a str,
        pub armor: &'a str,
        pub range_m: f64,
        pub angle_deg: f64,
        pub impact_velocity_ms: f64,
        pub penetration_mm: f64,
        pub effective_thickness_mm: f64,
        pub penetrates: bool,
        pub overmatch_mm: f64,
        pub ricochet_outcome: &'a str,
        pub behind_armor_severity: &'a str,
    }

    impl<'a> Record<'a> {
        /// Build a row from a successfully evaluated sweep cell; `None` when
        /// the cell carried an error (the caller decides how to report it).
        pub fn from_cell(cell: &'a SweepCell) -> Option<Self> {
            let result = cell.outcome.as_ref().ok()?;
            let ricochet_outcome = result
                .ricochet
                .as_ref()
                .and_then(|assessment| assessment.deflection)
                .map(|deflection| deflection.kind.as_str())
                .unwrap_or("none");
            Some(Self {
                ammunition: &cell.ammunition_name,
                armor: &cell.armor_name,
                range_m: cell.range_m,
                angle_deg: cell.angle_deg,
                impact_velocity_ms: result.impact_velocity_ms,
                penetration_mm: result.penetration_mm,
                effective_thickness_mm: result.effective_thickness_mm,
                penetrates: result.penetrates,
                overmatch_mm: result.overmatch_mm,
                ricochet_outcome,
                behind_armor_severity: result.behind_armor.severity.as_str(),
            })
        }

        /// Serialize the record to CSV, matching the standard header ordering.
        pub fn write_to(&self, writer: &mut dyn Write) -> io::Result<()> {
            writeln!(
                writer,
                "{},{},{:.1},{:.1},{:.1},{:.1},{:.1},{},{:.1},{},{}",
                self.ammunition,
                self.armor,
                self.range_m,
                self.angle_deg,
                self.impact_velocity_ms,
                self.penetration_mm,
                self.effective_thickness_mm,
                if self.penetrates { "true" } else { "false" },
                self.overmatch_mm,
                self.ricochet_outcome,
                self.behind_armor_severity,
            )
        }
    }
}
