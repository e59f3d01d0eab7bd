use bevy::prelude::*;
use rand::Rng;

use crate::grid::{GridWriter, TileView};
use crate::road_access::{has_road_access, RoadAccessScratch};

use super::footprint::footprint_fits;
use super::types::{zone_tier, Building};
use super::GrowthContext;

/// Spawn probability at full demand.
pub const SPAWN_BASE_CHANCE: f32 = 0.05;

/// `0.05 * clamp01((demand + 30) / 80)`: some growth even at mildly negative
/// demand, saturating at +50.
pub fn spawn_chance(demand: f32) -> f32 {
    SPAWN_BASE_CHANCE * ((demand + 30.0) / 80.0).clamp(0.0, 1.0)
}

/// Try to start the zone's tier-1 building on the zoned grass tile `(x, y)`.
/// Returns true if a building was placed.
pub fn try_spawn<R: Rng + ?Sized>(
    writer: &mut GridWriter,
    x: usize,
    y: usize,
    ctx: &GrowthContext,
    rng: &mut R,
    scratch: &mut RoadAccessScratch,
) -> bool {
    let tile = writer.tile(x, y);
    let zone = tile.zone;
    if !tile.is_vacant() {
        return false;
    }
    let Some(tier1) = zone_tier(zone, 1) else {
        return false;
    };

    let powered = ctx.services.powered_at(x, y);
    let watered = ctx.services.watered_at(x, y);
    if !(powered && watered) && !tier1.is_starter() {
        return false;
    }
    if !has_road_access(writer, x, y, scratch) {
        return false;
    }
    if rng.gen::<f32>() >= spawn_chance(ctx.demand.for_zone(zone)) {
        return false;
    }
    if !footprint_fits(writer, x, y, tier1, zone) {
        return false;
    }

    let mut building = Building::with_level(tier1, 1);
    building.powered = powered;
    building.watered = watered;
    writer.stamp_footprint(x, y, zone, building);
    trace!("spawned {tier1:?} at ({x}, {y})");
    true
}
