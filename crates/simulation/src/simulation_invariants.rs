//! Runtime invariant validation for the city grid.
//!
//! `check_grid_invariants` is a pure scan used by tests; the PostSim system
//! runs it after every tick and logs warnings when violations are found.
//!
//! Validated invariants:
//! 1. **Footprint exclusivity**: every non-origin cell of a building's
//!    footprint is an `Empty` stub pointing back at that origin.
//! 2. **Stub back-references**: every stub resolves to a live origin.
//! 3. **Utility gating**: unfinished or abandoned buildings house nobody, and
//!    only starters may be occupied without both power and water.

use std::fmt;

use bevy::prelude::*;

use crate::city::City;
use crate::grid::{Grid, GridPos, TileView};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InvariantViolation {
    FootprintOutOfBounds { origin: GridPos },
    FootprintCellMismatch { origin: GridPos, cell: GridPos },
    DanglingStub { cell: GridPos },
    OccupiedBeforeComplete { origin: GridPos },
    OccupiedWhileAbandoned { origin: GridPos },
    OccupiedWithoutUtilities { origin: GridPos },
}

impl fmt::Display for InvariantViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::FootprintOutOfBounds { origin } => {
                write!(f, "footprint of {origin:?} leaves the map")
            }
            Self::FootprintCellMismatch { origin, cell } => {
                write!(f, "cell {cell:?} is not a stub of {origin:?}")
            }
            Self::DanglingStub { cell } => write!(f, "stub {cell:?} has no live origin"),
            Self::OccupiedBeforeComplete { origin } => {
                write!(f, "{origin:?} is occupied before construction finished")
            }
            Self::OccupiedWhileAbandoned { origin } => {
                write!(f, "{origin:?} is abandoned but occupied")
            }
            Self::OccupiedWithoutUtilities { origin } => {
                write!(f, "{origin:?} is occupied without power and water")
            }
        }
    }
}

/// Every invariant violation in `grid`, in row-major order.
pub fn check_grid_invariants(grid: &Grid) -> Vec<InvariantViolation> {
    let mut violations = Vec::new();
    for tile in grid.tiles() {
        let pos = (tile.x, tile.y);
        let b = &tile.building;

        if b.is_stub() {
            if grid.resolve_origin(tile.x, tile.y).is_none() {
                violations.push(InvariantViolation::DanglingStub { cell: pos });
            }
            continue;
        }

        let (w, h) = b.building_type.footprint();
        if w > 1 || h > 1 {
            if !grid.in_bounds(tile.x + w - 1, tile.y + h - 1) {
                violations.push(InvariantViolation::FootprintOutOfBounds { origin: pos });
            } else {
                for cy in tile.y..tile.y + h {
                    for cx in tile.x..tile.x + w {
                        if (cx, cy) == pos {
                            continue;
                        }
                        let cell = &grid.tile(cx, cy).building;
                        if !cell.is_stub() || cell.origin != Some(pos) {
                            violations.push(InvariantViolation::FootprintCellMismatch {
                                origin: pos,
                                cell: (cx, cy),
                            });
                        }
                    }
                }
            }
        }

        let occupied = b.population > 0 || b.jobs > 0;
        if !occupied {
            continue;
        }
        if !b.is_complete() {
            violations.push(InvariantViolation::OccupiedBeforeComplete { origin: pos });
        } else if b.abandoned {
            violations.push(InvariantViolation::OccupiedWhileAbandoned { origin: pos });
        } else if !b.building_type.is_starter() && !(b.powered && b.watered) {
            violations.push(InvariantViolation::OccupiedWithoutUtilities { origin: pos });
        }
    }
    violations
}

// ---------------------------------------------------------------------------
// Violation counter
// ---------------------------------------------------------------------------

/// Number of violations found by the last validation pass.
#[derive(Resource, Default, Debug)]
pub struct InvariantViolations {
    pub last_tick: u64,
    pub count: usize,
}

pub fn validate_city_invariants(city: Res<City>, mut violations: ResMut<InvariantViolations>) {
    let found = check_grid_invariants(&city.0.grid);
    for violation in &found {
        warn!("Invariant violation at tick {}: {violation}", city.0.tick);
    }
    violations.last_tick = city.0.tick;
    violations.count = found.len();
}

pub struct SimulationInvariantsPlugin;

impl Plugin for SimulationInvariantsPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<InvariantViolations>().add_systems(
            FixedUpdate,
            validate_city_invariants.in_set(crate::SimulationSet::PostSim),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::buildings::{Building, BuildingType};
    use crate::grid::ZoneType;

    fn complete(t: BuildingType) -> Building {
        let mut b = Building::new(t);
        b.construction_progress = 100.0;
        b
    }

    #[test]
    fn test_clean_grid_has_no_violations() {
        let mut w = Grid::new(8).writer();
        w.stamp_footprint(1, 1, ZoneType::Commercial, complete(BuildingType::OfficeLow));
        w.stamp_footprint(4, 4, ZoneType::None, complete(BuildingType::Stadium));
        assert!(check_grid_invariants(&w.finish()).is_empty());
    }

    #[test]
    fn test_broken_footprint_and_dangling_stub() {
        let mut w = Grid::new(8).writer();
        w.stamp_footprint(1, 1, ZoneType::Commercial, complete(BuildingType::OfficeLow));
        w.set_building(2, 2, Building::new(BuildingType::Road));
        w.set_building(6, 6, Building::stub((5, 5)));
        let violations = check_grid_invariants(&w.finish());
        assert!(violations.contains(&InvariantViolation::FootprintCellMismatch {
            origin: (1, 1),
            cell: (2, 2)
        }));
        assert!(violations.contains(&InvariantViolation::DanglingStub { cell: (6, 6) }));
    }

    #[test]
    fn test_utility_gating() {
        let mut w = Grid::new(4).writer();
        let mut starter = complete(BuildingType::HouseSmall);
        starter.population = 3;
        w.set_building(0, 0, starter);

        let mut shop = complete(BuildingType::ShopMedium);
        shop.jobs = 4;
        shop.powered = true;
        w.set_building(1, 0, shop);

        let mut unfinished = Building::new(BuildingType::HouseMedium);
        unfinished.population = 1;
        w.set_building(2, 0, unfinished);

        let violations = check_grid_invariants(&w.finish());
        assert_eq!(
            violations,
            vec![
                InvariantViolation::OccupiedWithoutUtilities { origin: (1, 0) },
                InvariantViolation::OccupiedBeforeComplete { origin: (2, 0) },
            ]
        );
    }
}
