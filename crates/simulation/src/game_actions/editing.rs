//! Pure editing actions.
//!
//! Every action comes in two forms: `try_*` returns the edited state or the
//! reason nothing happened, and the plain form maps any error back to an
//! unchanged clone of its input. Edits go through a `GridWriter`, so only the
//! rows they touch are copied.

use bevy::prelude::*;

use crate::budget::BudgetCategory;
use crate::buildings::{Building, BuildingType};
use crate::config::MAX_TAX_RATE;
use crate::game_state::GameState;
use crate::grid::{GridWriter, TileView, ZoneType};
use crate::services::compute_service_coverage;

use super::ActionError;

/// Price of one tile of subway tunnel.
pub const SUBWAY_TILE_COST: f64 = 50.0;

fn or_unchanged(
    state: &GameState,
    action: &str,
    result: Result<GameState, ActionError>,
) -> GameState {
    result.unwrap_or_else(|e| {
        debug!("{action} rejected: {e}");
        state.clone()
    })
}

fn check_bounds(state: &GameState, x: usize, y: usize) -> Result<(), ActionError> {
    if state.grid.in_bounds(x, y) {
        Ok(())
    } else {
        Err(ActionError::OutOfBounds)
    }
}

fn charge(state: &mut GameState, cost: f64) -> Result<(), ActionError> {
    if !state.mode.charges_for_construction() || cost <= 0.0 {
        return Ok(());
    }
    if state.stats.money < cost {
        return Err(ActionError::InsufficientFunds);
    }
    state.stats.money -= cost;
    Ok(())
}

/// Swap in an edited grid and refresh the coverage snapshot it implies.
fn commit(state: &GameState, writer: GridWriter) -> GameState {
    let mut next = state.clone();
    next.grid = writer.finish();
    next.services = compute_service_coverage(&next.grid);
    next
}

// ---------------------------------------------------------------------------
// Placement
// ---------------------------------------------------------------------------

pub fn try_place_building(
    state: &GameState,
    x: usize,
    y: usize,
    building_type: BuildingType,
) -> Result<GameState, ActionError> {
    check_bounds(state, x, y)?;
    if matches!(
        building_type,
        BuildingType::Grass | BuildingType::Water | BuildingType::Empty
    ) {
        return Err(ActionError::NotPlaceable);
    }

    let mut writer = state.grid.writer();
    match (building_type, writer.tile(x, y).building_type()) {
        // Road and rail share a tile as a road carrying a rail overlay.
        (BuildingType::Road, BuildingType::Rail) | (BuildingType::Rail, BuildingType::Road) => {
            if writer.tile(x, y).has_rail_overlay {
                return Err(ActionError::AlreadyExists);
            }
            let tile = writer.tile_mut(x, y);
            tile.building = Building::new(BuildingType::Road);
            tile.has_rail_overlay = true;
        }
        _ => {
            let (w, h) = building_type.footprint();
            for cy in y..y + h {
                for cx in x..x + w {
                    let Some(tile) = writer.try_tile(cx, cy) else {
                        return Err(ActionError::OutOfBounds);
                    };
                    match tile.building_type() {
                        BuildingType::Grass | BuildingType::Tree => {}
                        BuildingType::Water => return Err(ActionError::BlockedByWater),
                        t if t == building_type => return Err(ActionError::AlreadyExists),
                        _ => return Err(ActionError::BlockedByBuilding),
                    }
                }
            }
            let zone = building_type.zone().unwrap_or(ZoneType::None);
            writer.stamp_footprint(x, y, zone, Building::new(building_type));
        }
    }

    let mut next = commit(state, writer);
    charge(&mut next, building_type.build_cost())?;
    Ok(next)
}

/// Place `building_type` with its origin at `(x, y)`. No-op when any
/// footprint cell is out of bounds, water or built on, or funds are short.
pub fn place_building(
    state: &GameState,
    x: usize,
    y: usize,
    building_type: BuildingType,
) -> GameState {
    or_unchanged(
        state,
        "place_building",
        try_place_building(state, x, y, building_type),
    )
}

// ---------------------------------------------------------------------------
// Zoning
// ---------------------------------------------------------------------------

pub fn try_zone_tile(
    state: &GameState,
    x: usize,
    y: usize,
    zone: ZoneType,
) -> Result<GameState, ActionError> {
    check_bounds(state, x, y)?;
    let tile = state.grid.tile(x, y);
    match tile.building_type() {
        BuildingType::Grass | BuildingType::Tree => {}
        BuildingType::Water => return Err(ActionError::BlockedByWater),
        _ => return Err(ActionError::BlockedByBuilding),
    }
    if tile.zone == zone && (tile.is_vacant() || !zone.is_zoned()) {
        return Err(ActionError::AlreadyExists);
    }

    let mut writer = state.grid.writer();
    let tile = writer.tile_mut(x, y);
    tile.zone = zone;
    if zone.is_zoned() {
        // Trees are cleared so the lot can develop.
        tile.building = Building::new(BuildingType::Grass);
    }
    let mut next = state.clone();
    next.grid = writer.finish();
    Ok(next)
}

/// Zone (or with `ZoneType::None`, dezone) one undeveloped tile.
pub fn zone_tile(state: &GameState, x: usize, y: usize, zone: ZoneType) -> GameState {
    or_unchanged(state, "zone_tile", try_zone_tile(state, x, y, zone))
}

/// Zone every undeveloped tile in the inclusive rectangle; developed tiles
/// are skipped.
pub fn zone_rect(
    state: &GameState,
    min: (usize, usize),
    max: (usize, usize),
    zone: ZoneType,
) -> GameState {
    let mut next = state.clone();
    for y in min.1.min(max.1)..=min.1.max(max.1) {
        for x in min.0.min(max.0)..=min.0.max(max.0) {
            if let Ok(zoned) = try_zone_tile(&next, x, y, zone) {
                next = zoned;
            }
        }
    }
    next
}

// ---------------------------------------------------------------------------
// Bulldozing
// ---------------------------------------------------------------------------

pub fn try_bulldoze_tile(state: &GameState, x: usize, y: usize) -> Result<GameState, ActionError> {
    check_bounds(state, x, y)?;
    let tile = state.grid.tile(x, y);
    let mut writer = state.grid.writer();
    match tile.building_type() {
        BuildingType::Water => return Err(ActionError::BlockedByWater),
        BuildingType::Grass if !tile.zone.is_zoned() => {
            return Err(ActionError::NothingToBulldoze)
        }
        BuildingType::Grass | BuildingType::Tree => {
            let tile = writer.tile_mut(x, y);
            tile.building = Building::new(BuildingType::Grass);
            tile.zone = ZoneType::None;
        }
        _ => {
            // A stub releases its whole building; an orphaned stub just itself.
            let (ox, oy) = writer.resolve_origin(x, y).unwrap_or((x, y));
            writer.clear_footprint(ox, oy);
        }
    }
    Ok(commit(state, writer))
}

/// Clear the building covering `(x, y)` (its whole footprint) back to
/// unzoned grass. Water cannot be bulldozed.
pub fn bulldoze_tile(state: &GameState, x: usize, y: usize) -> GameState {
    or_unchanged(state, "bulldoze_tile", try_bulldoze_tile(state, x, y))
}

// ---------------------------------------------------------------------------
// Subway
// ---------------------------------------------------------------------------

pub fn try_place_subway(state: &GameState, x: usize, y: usize) -> Result<GameState, ActionError> {
    check_bounds(state, x, y)?;
    let tile = state.grid.tile(x, y);
    if tile.building_type() == BuildingType::Water {
        return Err(ActionError::BlockedByWater);
    }
    if tile.has_subway {
        return Err(ActionError::AlreadyExists);
    }
    let mut writer = state.grid.writer();
    writer.tile_mut(x, y).has_subway = true;
    let mut next = state.clone();
    next.grid = writer.finish();
    charge(&mut next, SUBWAY_TILE_COST)?;
    Ok(next)
}

pub fn place_subway(state: &GameState, x: usize, y: usize) -> GameState {
    or_unchanged(state, "place_subway", try_place_subway(state, x, y))
}

pub fn try_remove_subway(state: &GameState, x: usize, y: usize) -> Result<GameState, ActionError> {
    check_bounds(state, x, y)?;
    if !state.grid.tile(x, y).has_subway {
        return Err(ActionError::NoSubway);
    }
    let mut writer = state.grid.writer();
    writer.tile_mut(x, y).has_subway = false;
    let mut next = state.clone();
    next.grid = writer.finish();
    Ok(next)
}

pub fn remove_subway(state: &GameState, x: usize, y: usize) -> GameState {
    or_unchanged(state, "remove_subway", try_remove_subway(state, x, y))
}

// ---------------------------------------------------------------------------
// Policy knobs
// ---------------------------------------------------------------------------

pub fn try_set_tax_rate(state: &GameState, rate: f32) -> Result<GameState, ActionError> {
    if !rate.is_finite() {
        return Err(ActionError::InvalidParameter(format!("tax rate {rate}")));
    }
    let mut next = state.clone();
    next.tax_rate = rate.clamp(0.0, MAX_TAX_RATE);
    Ok(next)
}

/// Set the operator tax rate (percent, clamped). The applied rate phases in
/// over the following ticks.
pub fn set_tax_rate(state: &GameState, rate: f32) -> GameState {
    or_unchanged(state, "set_tax_rate", try_set_tax_rate(state, rate))
}

pub fn try_set_budget_funding(
    state: &GameState,
    category: BudgetCategory,
    funding: f32,
) -> Result<GameState, ActionError> {
    if !funding.is_finite() {
        return Err(ActionError::InvalidParameter(format!(
            "{} funding {funding}",
            category.name()
        )));
    }
    let mut next = state.clone();
    next.budget.set_funding(category, funding);
    Ok(next)
}

pub fn set_budget_funding(state: &GameState, category: BudgetCategory, funding: f32) -> GameState {
    or_unchanged(
        state,
        "set_budget_funding",
        try_set_budget_funding(state, category, funding),
    )
}
