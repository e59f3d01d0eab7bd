use bevy::prelude::*;
use rand::Rng;

use crate::grid::{GridPos, GridWriter, Tile, TileView, ZoneType};
use crate::services::ServiceCoverage;

use super::abandonment::{abandonment_chance, clear_chance, ABANDON_MIN_AGE};
use super::types::{zone_tier, Building, BuildingType};
use super::GrowthContext;

/// Minimum age before a building considers levelling up.
pub const GROWTH_MIN_AGE: u32 = 20;
/// Per-tick chance to act on a higher target level.
pub const GROWTH_CHANCE: f32 = 0.04;
/// Chance a small building that outgrows its footprint attempts a merge.
pub const MERGE_CHANCE: f32 = 0.6;
/// Above this demand, completed small neighbours may be absorbed.
const HIGH_DEMAND_MERGE: f32 = 50.0;
const MERGE_AREA_PENALTY: f32 = 0.25;
const MAX_LEVEL: u8 = 5;

/// Level the tile's conditions support, in `1..=5`.
pub fn target_level(tile: &Tile, services: &ServiceCoverage, demand: f32) -> u8 {
    let land = tile.land_value / 24.0;
    let coverage = services.average_at(tile.x, tile.y) / 28.0;
    let age = tile.building.age as f32 / 60.0;
    let boost = (demand / 40.0).clamp(-1.0, 1.5);
    (land + coverage + age + boost).floor().clamp(1.0, f32::from(MAX_LEVEL)) as u8
}

/// One tick of the zone-building state machine for the origin at `(x, y)`:
/// ageing, clearing of abandoned buildings, abandonment and growth.
pub fn evolve_building<R: Rng + ?Sized>(
    writer: &mut GridWriter,
    x: usize,
    y: usize,
    ctx: &GrowthContext,
    rng: &mut R,
) {
    let tile = writer.tile(x, y);
    let Some(zone) = tile.building_type().zone() else {
        return;
    };
    let demand = ctx.demand.for_zone(zone);

    let building = &mut writer.tile_mut(x, y).building;
    building.age = building.age.saturating_add(1);

    if building.abandoned {
        let chance = clear_chance(demand);
        if chance > 0.0 && rng.gen::<f32>() < chance {
            debug!("clearing abandoned {:?} at ({x}, {y})", building.building_type);
            writer.clear_footprint(x, y);
        }
        return;
    }
    if !building.is_complete() || building.on_fire {
        return;
    }

    if building.age > ABANDON_MIN_AGE {
        let chance = abandonment_chance(building, demand);
        if chance > 0.0 && rng.gen::<f32>() < chance {
            building.abandoned = true;
            building.population = 0;
            building.jobs = 0;
            return;
        }
    }

    if building.age >= GROWTH_MIN_AGE && building.powered && building.watered {
        try_grow(writer, x, y, zone, ctx, rng);
    }
}

fn try_grow<R: Rng + ?Sized>(
    writer: &mut GridWriter,
    x: usize,
    y: usize,
    zone: ZoneType,
    ctx: &GrowthContext,
    rng: &mut R,
) {
    let demand = ctx.demand.for_zone(zone);
    let tile = writer.tile(x, y);
    let current = tile.building.clone();
    if current.level >= MAX_LEVEL || target_level(tile, ctx.services, demand) <= current.level {
        return;
    }
    if rng.gen::<f32>() >= GROWTH_CHANCE {
        return;
    }

    let next_level = current.level + 1;
    let Some(next) = zone_tier(zone, next_level) else {
        return;
    };

    if next == current.building_type {
        writer.tile_mut(x, y).building.level = next_level;
        return;
    }

    if next.footprint() == current.building_type.footprint() {
        writer.stamp_footprint(x, y, zone, successor(&current, next, next_level));
        return;
    }

    if current.building_type.is_small() && next.area() > current.building_type.area() {
        if rng.gen::<f32>() >= MERGE_CHANCE {
            return;
        }
        if let Some((ox, oy)) = find_merge_site(writer, (x, y), next, zone, demand) {
            debug!("consolidating {:?} at ({x}, {y}) into {next:?} at ({ox}, {oy})", current.building_type);
            writer.stamp_footprint(ox, oy, zone, successor(&current, next, next_level));
            return;
        }
    }

    // No room to change shape: densify in place.
    writer.tile_mut(x, y).building.level = next_level;
}

/// Fresh building replacing `current`; construction and age restart.
fn successor(current: &Building, next: BuildingType, level: u8) -> Building {
    let mut building = Building::with_level(next, level);
    building.powered = current.powered;
    building.watered = current.watered;
    building.flipped = current.flipped;
    building
}

/// Best origin for a `next` footprint containing `trigger`, if any.
fn find_merge_site<V: TileView + ?Sized>(
    view: &V,
    trigger: GridPos,
    next: BuildingType,
    zone: ZoneType,
    demand: f32,
) -> Option<GridPos> {
    let (w, h) = next.footprint();
    let (tx, ty) = trigger;
    let size = view.size();
    let penalty = MERGE_AREA_PENALTY * (w * h) as f32;

    let mut best: Option<(f32, GridPos)> = None;
    for oy in ty.saturating_sub(h - 1)..=ty {
        for ox in tx.saturating_sub(w - 1)..=tx {
            if ox + w > size || oy + h > size {
                continue;
            }
            let all_mergeable = (oy..oy + h)
                .all(|cy| (ox..ox + w).all(|cx| is_mergeable(view, (cx, cy), trigger, zone, demand)));
            if !all_mergeable {
                continue;
            }
            let score = adjacent_roads(view, ox, oy, w, h) as f32 - penalty;
            if best.map_or(true, |(s, _)| score > s) {
                best = Some((score, (ox, oy)));
            }
        }
    }
    best.map(|(_, origin)| origin)
}

fn is_mergeable<V: TileView + ?Sized>(
    view: &V,
    (cx, cy): GridPos,
    trigger: GridPos,
    zone: ZoneType,
    demand: f32,
) -> bool {
    let tile = view.tile(cx, cy);
    if tile.zone != zone {
        return false;
    }
    if (cx, cy) == trigger || tile.is_vacant() {
        return true;
    }
    let b = &tile.building;
    demand > HIGH_DEMAND_MERGE
        && b.building_type.is_small()
        && b.building_type.footprint() == (1, 1)
        && b.is_complete()
        && !b.abandoned
        && !b.on_fire
}

/// Road tiles 4-adjacent to the footprint's outer edge.
fn adjacent_roads<V: TileView + ?Sized>(view: &V, ox: usize, oy: usize, w: usize, h: usize) -> usize {
    let is_road = |x: Option<usize>, y: Option<usize>| match (x, y) {
        (Some(x), Some(y)) => view
            .try_tile(x, y)
            .is_some_and(|t| t.building_type() == BuildingType::Road),
        _ => false,
    };
    let mut count = 0;
    for x in ox..ox + w {
        count += usize::from(is_road(Some(x), oy.checked_sub(1)));
        count += usize::from(is_road(Some(x), Some(oy + h)));
    }
    for y in oy..oy + h {
        count += usize::from(is_road(ox.checked_sub(1), Some(y)));
        count += usize::from(is_road(Some(ox + w), Some(y)));
    }
    count
}
