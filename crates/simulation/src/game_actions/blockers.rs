//! Read-only diagnostics: why has this zoned lot not developed yet?

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::buildings::{footprint_conflicts, zone_tier, BuildingType, CellConflict};
use crate::game_state::GameState;
use crate::grid::{GridPos, TileView};
use crate::road_access::{has_road_access, RoadAccessScratch};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Blocker {
    InvalidTile,
    NotZoned,
    NoRoadAccess,
    NoPower,
    NoWater,
    FootprintBlocked { cells: Vec<(GridPos, CellConflict)> },
    /// Every precondition holds; the spawn roll simply has not hit yet.
    WaitingForDevelopment,
}

impl fmt::Display for Blocker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Blocker::InvalidTile => write!(f, "This tile cannot be developed"),
            Blocker::NotZoned => write!(f, "Tile is not zoned"),
            Blocker::NoRoadAccess => write!(f, "No road within reach"),
            Blocker::NoPower => write!(f, "No power"),
            Blocker::NoWater => write!(f, "No water"),
            Blocker::FootprintBlocked { cells } => {
                write!(f, "Footprint blocked:")?;
                for ((x, y), conflict) in cells {
                    write!(f, " ({x}, {y}) {conflict};")?;
                }
                Ok(())
            }
            Blocker::WaitingForDevelopment => write!(f, "Waiting for development"),
        }
    }
}

/// Everything currently keeping `(x, y)` from spawning a building. Empty for
/// tiles that are already developed.
pub fn get_development_blockers(state: &GameState, x: usize, y: usize) -> Vec<Blocker> {
    get_development_blockers_with(state, x, y, &mut RoadAccessScratch::new())
}

/// `get_development_blockers` reusing a caller-owned BFS scratch.
pub fn get_development_blockers_with(
    state: &GameState,
    x: usize,
    y: usize,
    scratch: &mut RoadAccessScratch,
) -> Vec<Blocker> {
    let Some(tile) = state.grid.try_tile(x, y) else {
        return vec![Blocker::InvalidTile];
    };
    match tile.building_type() {
        BuildingType::Water | BuildingType::Road | BuildingType::Rail => {
            return vec![Blocker::InvalidTile]
        }
        _ if !tile.zone.is_zoned() => return vec![Blocker::NotZoned],
        BuildingType::Grass => {}
        _ => return Vec::new(),
    }
    let Some(starter) = zone_tier(tile.zone, 1) else {
        return vec![Blocker::InvalidTile];
    };

    let mut blockers = Vec::new();
    if !has_road_access(&state.grid, x, y, scratch) {
        blockers.push(Blocker::NoRoadAccess);
    }
    // Starters may spawn without utilities but cannot grow past level 1.
    if !state.services.powered_at(x, y) {
        blockers.push(Blocker::NoPower);
    }
    if !state.services.watered_at(x, y) {
        blockers.push(Blocker::NoWater);
    }
    let cells = footprint_conflicts(&state.grid, x, y, starter, tile.zone);
    if !cells.is_empty() {
        blockers.push(Blocker::FootprintBlocked { cells });
    }
    if blockers.is_empty() {
        blockers.push(Blocker::WaitingForDevelopment);
    }
    blockers
}
