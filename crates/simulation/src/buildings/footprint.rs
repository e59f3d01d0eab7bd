use std::fmt;

use serde::{Deserialize, Serialize};

use crate::grid::{GridPos, TileView, ZoneType};

use super::types::BuildingType;

/// Why a footprint cell cannot take a new zone building.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CellConflict {
    OutOfBounds,
    DifferentZone(ZoneType),
    Water,
    Occupied(BuildingType),
}

impl fmt::Display for CellConflict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellConflict::OutOfBounds => write!(f, "outside the map"),
            CellConflict::DifferentZone(zone) => write!(f, "zoned {zone:?}"),
            CellConflict::Water => write!(f, "water"),
            CellConflict::Occupied(t) => write!(f, "occupied by {t:?}"),
        }
    }
}

/// Every cell of `building_type`'s footprint at origin `(x, y)` that is not
/// undeveloped ground in `zone`.
pub fn footprint_conflicts<V: TileView + ?Sized>(
    view: &V,
    x: usize,
    y: usize,
    building_type: BuildingType,
    zone: ZoneType,
) -> Vec<(GridPos, CellConflict)> {
    let (w, h) = building_type.footprint();
    let mut conflicts = Vec::new();
    for cy in y..y + h {
        for cx in x..x + w {
            let Some(tile) = view.try_tile(cx, cy) else {
                conflicts.push(((cx, cy), CellConflict::OutOfBounds));
                continue;
            };
            let conflict = match tile.building_type() {
                BuildingType::Water => Some(CellConflict::Water),
                BuildingType::Grass if tile.zone != zone => {
                    Some(CellConflict::DifferentZone(tile.zone))
                }
                BuildingType::Grass => None,
                other => Some(CellConflict::Occupied(other)),
            };
            if let Some(conflict) = conflict {
                conflicts.push(((cx, cy), conflict));
            }
        }
    }
    conflicts
}

pub fn footprint_fits<V: TileView + ?Sized>(
    view: &V,
    x: usize,
    y: usize,
    building_type: BuildingType,
    zone: ZoneType,
) -> bool {
    let (w, h) = building_type.footprint();
    (y..y + h).all(|cy| {
        (x..x + w).all(|cx| {
            view.try_tile(cx, cy)
                .is_some_and(|t| t.zone == zone && t.is_vacant())
        })
    })
}
