//! Bounded road reachability for zoned tiles.
//!
//! A zoned tile has road access if a road can be reached by walking at most
//! `max_distance` 4-neighbour steps through tiles of the same zone (never
//! through water). The search runs on a caller-owned `RoadAccessScratch` so
//! repeated queries during a tick do not allocate.

use bevy::prelude::*;

use crate::buildings::BuildingType;
use crate::config::DEFAULT_ROAD_SEARCH_DISTANCE;
use crate::grid::TileView;

/// Reusable BFS buffers.
///
/// `visited` is generation-stamped over the `(2d+1)^2` bounding box around
/// the query origin, so starting a new query is O(1) instead of a clear.
#[derive(Resource, Debug, Default)]
pub struct RoadAccessScratch {
    queue: Vec<(usize, usize, usize)>,
    head: usize,
    visited: Vec<u32>,
    generation: u32,
    side: usize,
}

impl RoadAccessScratch {
    pub fn new() -> Self {
        Self::with_max_distance(DEFAULT_ROAD_SEARCH_DISTANCE)
    }

    /// Preallocate for queries up to `max_distance`.
    pub fn with_max_distance(max_distance: usize) -> Self {
        let side = 2 * max_distance + 1;
        Self {
            queue: Vec::with_capacity(side * side),
            head: 0,
            visited: vec![0; side * side],
            generation: 0,
            side,
        }
    }

    fn begin(&mut self, max_distance: usize) {
        let side = 2 * max_distance + 1;
        if side != self.side {
            self.side = side;
            self.visited.clear();
            self.visited.resize(side * side, 0);
            self.generation = 0;
        }
        self.queue.clear();
        self.head = 0;
        self.generation = self.generation.wrapping_add(1);
        if self.generation == 0 {
            self.visited.fill(0);
            self.generation = 1;
        }
    }

    /// Marks the box-local cell; returns false if it was already visited.
    #[inline]
    fn visit(&mut self, lx: usize, ly: usize) -> bool {
        let slot = &mut self.visited[ly * self.side + lx];
        if *slot == self.generation {
            return false;
        }
        *slot = self.generation;
        true
    }

    #[inline]
    fn push(&mut self, x: usize, y: usize, depth: usize) {
        self.queue.push((x, y, depth));
    }

    #[inline]
    fn pop(&mut self) -> Option<(usize, usize, usize)> {
        let item = self.queue.get(self.head).copied();
        if item.is_some() {
            self.head += 1;
        }
        item
    }
}

/// `has_road_access_within` with the default search distance.
pub fn has_road_access<V: TileView + ?Sized>(
    view: &V,
    x: usize,
    y: usize,
    scratch: &mut RoadAccessScratch,
) -> bool {
    has_road_access_within(view, x, y, DEFAULT_ROAD_SEARCH_DISTANCE, scratch)
}

pub fn has_road_access_within<V: TileView + ?Sized>(
    view: &V,
    x: usize,
    y: usize,
    max_distance: usize,
    scratch: &mut RoadAccessScratch,
) -> bool {
    if !view.in_bounds(x, y) {
        return false;
    }
    let zone = view.tile(x, y).zone;
    if !zone.is_zoned() || max_distance == 0 {
        return false;
    }

    scratch.begin(max_distance);
    // Box-local coordinates: (x - max_distance, y - max_distance) maps to (0, 0).
    let to_local = |gx: usize, gy: usize| (gx + max_distance - x, gy + max_distance - y);

    let (lx, ly) = to_local(x, y);
    scratch.visit(lx, ly);
    scratch.push(x, y, 0);

    while let Some((cx, cy, depth)) = scratch.pop() {
        let (neighbors, count) = view.neighbors4(cx, cy);
        for &(nx, ny) in &neighbors[..count] {
            let tile = view.tile(nx, ny);
            match tile.building_type() {
                BuildingType::Road => return true,
                BuildingType::Water => continue,
                _ => {}
            }
            if tile.zone != zone || depth + 1 >= max_distance {
                continue;
            }
            let (lx, ly) = to_local(nx, ny);
            if scratch.visit(lx, ly) {
                scratch.push(nx, ny, depth + 1);
            }
        }
    }
    false
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::buildings::Building;
    use crate::grid::{Grid, GridPos, ZoneType};
    use pathfinding::prelude::bfs;
    use rand::{Rng, SeedableRng};
    use rand_chacha::ChaCha8Rng;

    fn zoned_strip(size: usize, zone: ZoneType, road_at: Option<GridPos>) -> Grid {
        let mut writer = Grid::new(size).writer();
        for x in 0..size {
            writer.tile_mut(x, 0).zone = zone;
        }
        if let Some((rx, ry)) = road_at {
            writer.tile_mut(rx, ry).zone = ZoneType::None;
            writer.set_building(rx, ry, Building::new(BuildingType::Road));
        }
        writer.finish()
    }

    #[test]
    fn test_unzoned_origin_has_no_access() {
        let mut writer = Grid::new(5).writer();
        writer.set_building(1, 0, Building::new(BuildingType::Road));
        let grid = writer.finish();
        let mut scratch = RoadAccessScratch::new();
        assert!(!has_road_access(&grid, 0, 0, &mut scratch));
    }

    #[test]
    fn test_adjacent_road() {
        let grid = zoned_strip(12, ZoneType::Residential, Some((1, 0)));
        let mut scratch = RoadAccessScratch::new();
        assert!(has_road_access(&grid, 0, 0, &mut scratch));
    }

    #[test]
    fn test_road_exactly_at_max_distance() {
        // Road at x = 8 is 8 steps from x = 0 through the zoned strip.
        let grid = zoned_strip(12, ZoneType::Residential, Some((8, 0)));
        let mut scratch = RoadAccessScratch::new();
        assert!(has_road_access(&grid, 0, 0, &mut scratch));
        assert!(!has_road_access_within(&grid, 0, 0, 7, &mut scratch));
    }

    #[test]
    fn test_road_beyond_max_distance() {
        let grid = zoned_strip(14, ZoneType::Industrial, Some((9, 0)));
        let mut scratch = RoadAccessScratch::new();
        assert!(!has_road_access(&grid, 0, 0, &mut scratch));
    }

    #[test]
    fn test_different_zone_blocks_tunnel() {
        let mut writer = zoned_strip(12, ZoneType::Residential, Some((4, 0))).writer();
        writer.tile_mut(2, 0).zone = ZoneType::Commercial;
        let grid = writer.finish();
        let mut scratch = RoadAccessScratch::new();
        assert!(!has_road_access(&grid, 0, 0, &mut scratch));
        assert!(has_road_access(&grid, 3, 0, &mut scratch));
    }

    #[test]
    fn test_water_blocks_tunnel() {
        let mut writer = zoned_strip(12, ZoneType::Residential, Some((4, 0))).writer();
        writer.set_building(2, 0, Building::new(BuildingType::Water));
        let grid = writer.finish();
        let mut scratch = RoadAccessScratch::new();
        assert!(!has_road_access(&grid, 0, 0, &mut scratch));
    }

    #[test]
    fn test_scratch_does_not_leak_between_queries() {
        let grid = zoned_strip(12, ZoneType::Residential, Some((3, 0)));
        let mut scratch = RoadAccessScratch::new();
        for _ in 0..5 {
            assert!(has_road_access(&grid, 0, 0, &mut scratch));
            assert!(!has_road_access(&grid, 11, 5, &mut scratch));
        }
        // A smaller bound then the default again must not reuse stale marks.
        assert!(!has_road_access_within(&grid, 0, 0, 2, &mut scratch));
        assert!(has_road_access(&grid, 0, 0, &mut scratch));
    }

    /// Shortest same-zone path from `start` to a tile adjacent to a road.
    fn brute_force_steps(grid: &Grid, start: GridPos) -> Option<usize> {
        let zone = grid.tile(start.0, start.1).zone;
        let path = bfs(
            &start,
            |&(x, y)| {
                let (n, c) = grid.neighbors4(x, y);
                n[..c]
                    .iter()
                    .copied()
                    .filter(|&(nx, ny)| {
                        let t = grid.tile(nx, ny);
                        t.zone == zone && t.building_type() != BuildingType::Water
                    })
                    .collect::<Vec<_>>()
            },
            |&(x, y)| {
                let (n, c) = grid.neighbors4(x, y);
                n[..c]
                    .iter()
                    .any(|&(nx, ny)| grid.tile(nx, ny).building_type() == BuildingType::Road)
            },
        )?;
        // The road sits one step past the last node of the path.
        Some(path.len())
    }

    #[test]
    fn test_matches_brute_force_on_random_grids() {
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        let mut scratch = RoadAccessScratch::new();
        for _ in 0..40 {
            let size = 14;
            let mut writer = Grid::new(size).writer();
            for y in 0..size {
                for x in 0..size {
                    let roll: f32 = rng.gen();
                    if roll < 0.04 {
                        writer.set_building(x, y, Building::new(BuildingType::Road));
                    } else if roll < 0.10 {
                        writer.set_building(x, y, Building::new(BuildingType::Water));
                    } else if roll < 0.75 {
                        writer.tile_mut(x, y).zone = ZoneType::Residential;
                    } else if roll < 0.90 {
                        writer.tile_mut(x, y).zone = ZoneType::Commercial;
                    }
                }
            }
            let grid = writer.finish();
            for y in 0..size {
                for x in 0..size {
                    let tile = grid.tile(x, y);
                    if !tile.zone.is_zoned() || tile.building_type() != BuildingType::Grass {
                        continue;
                    }
                    let expected = brute_force_steps(&grid, (x, y))
                        .is_some_and(|steps| steps <= DEFAULT_ROAD_SEARCH_DISTANCE);
                    assert_eq!(
                        has_road_access(&grid, x, y, &mut scratch),
                        expected,
                        "mismatch at ({x}, {y})"
                    );
                }
            }
        }
    }
}
