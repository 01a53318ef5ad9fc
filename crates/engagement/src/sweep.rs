//! Parallel comparison sweeps over ammunition × armor × range × angle grids.
//!
//! Cells are independent engagements, so they fan out across worker threads;
//! each cell derives its own generator from the base seed, which keeps the
//! whole sweep reproducible regardless of scheduling order.

use armor_environment::EnvironmentalConditions;
use armor_munitions::Ammunition;
use armor_protection::Armor;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use rayon::prelude::*;

use crate::resolver::{
    resolve_engagement, EngagementError, EngagementResult, ResolverConfig, ShotParameters,
};

/// A comparison sweep across every combination of the supplied axes.
#[derive(Debug, Clone)]
pub struct SweepRequest<'a> {
    pub ammunition: &'a [Ammunition],
    pub armor: &'a [Armor],
    pub ranges_m: &'a [f64],
    pub angles_deg: &'a [f64],
    pub conditions: EnvironmentalConditions,
    pub resolver: ResolverConfig,
    /// Base seed for the per-cell ricochet generators.
    pub base_seed: u64,
}

/// One evaluated grid cell. Failed cells carry their error so the caller can
/// decide whether to skip, log, or abort.
#[derive(Debug)]
pub struct SweepCell {
    pub ammunition_name: String,
    pub armor_name: String,
    pub range_m: f64,
    pub angle_deg: f64,
    pub outcome: Result<EngagementResult, EngagementError>,
}

/// Evaluate the full cross product in parallel.
///
/// Every cell starts from pristine armor; integrity tracking across
/// sequential hits is inherently serial and stays with [`resolve_engagement`].
pub fn run_sweep(request: &SweepRequest<'_>) -> Vec<SweepCell> {
    let mut cells = Vec::new();
    for ammunition in request.ammunition {
        for armor in request.armor {
            for &range_m in request.ranges_m {
                for &angle_deg in request.angles_deg {
                    cells.push((ammunition, armor, range_m, angle_deg));
                }
            }
        }
    }

    let results: Vec<SweepCell> = cells
        .par_iter()
        .enumerate()
        .map(|(index, (ammunition, armor, range_m, angle_deg))| {
            let mut rng = ChaCha8Rng::seed_from_u64(request.base_seed ^ index as u64);
            let shot = ShotParameters {
                range_m: *range_m,
                impact_angle_deg: *angle_deg,
                conditions: request.conditions,
            };
            let outcome = resolve_engagement(
                ammunition,
                armor,
                &shot,
                None,
                &request.resolver,
                &mut rng,
            );
            SweepCell {
                ammunition_name: ammunition.name().to_string(),
                armor_name: armor.name().to_string(),
                range_m: *range_m,
                angle_deg: *angle_deg,
                outcome,
            }
        })
        .collect();

    tracing::info!(cells = results.len(), "comparison sweep complete");
    results
}
