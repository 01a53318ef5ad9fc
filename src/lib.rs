//! Core physics and resolver logic for armor penetration analysis.
//!
//! The root crate is a thin facade over the workspace: front-ends consume
//! the engagement resolver, trajectory integrator, and catalog loaders
//! through the stable module names re-exported here.

pub use armor_config as config;
pub use armor_engagement as engagement;
pub use armor_environment as environment;
pub use armor_export as export;
pub use armor_munitions as munitions;
pub use armor_protection as protection;
pub use armor_ricochet as ricochet;
pub use armor_trajectory as trajectory;

pub use armor_core::{constants, mechanism, units, vector};

/// Returns the version of the library for smoke tests while scaffolding.
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
