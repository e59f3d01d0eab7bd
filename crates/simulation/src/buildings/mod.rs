//! Zone building lifecycle: spawn, construction, growth and consolidation,
//! abandonment and clearing.
//!
//! Everything here operates on a `GridWriter` for one tick and only ever
//! changes a building at its origin; footprints are re-stamped wholesale.

mod abandonment;
mod construction;
mod footprint;
mod growth;
mod spawning;
pub mod types;

pub use abandonment::{abandonment_chance, clear_chance, ABANDON_MIN_AGE};
pub use construction::{
    advance_construction, can_construct, construction_rate, expected_occupancy,
    update_occupancy, utility_efficiency, OCCUPANCY_FACTOR,
};
pub use footprint::{footprint_conflicts, footprint_fits, CellConflict};
pub use growth::{evolve_building, target_level, GROWTH_CHANCE, GROWTH_MIN_AGE, MERGE_CHANCE};
pub use spawning::{spawn_chance, try_spawn, SPAWN_BASE_CHANCE};
pub use types::{zone_tier, Building, BuildingStats, BuildingType};

use crate::services::ServiceCoverage;
use crate::zones::ZoneDemand;

/// Read-only inputs shared by every building update in a tick.
#[derive(Debug, Clone, Copy)]
pub struct GrowthContext<'a> {
    pub services: &'a ServiceCoverage,
    /// Demand from the previous tick's stats.
    pub demand: ZoneDemand,
}
