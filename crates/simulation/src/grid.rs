//! Tile grid with row-level copy-on-write.
//!
//! `Grid` is an immutable snapshot: a row-indirection table of `Arc`-shared
//! rows. All mutation goes through `GridWriter`, whose slots are either still
//! shared with the snapshot it was opened from or an owned copy. A row is
//! cloned the first time any tile in it is borrowed mutably; `finish` turns the
//! writer back into a snapshot whose untouched rows are pointer-equal to the
//! previous one.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::buildings::{Building, BuildingType};
use crate::config::BASE_LAND_VALUE;

/// `(x, y)` grid coordinate.
pub type GridPos = (usize, usize);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum ZoneType {
    #[default]
    None,
    Residential,
    Commercial,
    Industrial,
}

impl ZoneType {
    pub const ALL_ZONED: [ZoneType; 3] = [
        ZoneType::Residential,
        ZoneType::Commercial,
        ZoneType::Industrial,
    ];

    pub fn is_zoned(self) -> bool {
        self != ZoneType::None
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tile {
    pub x: usize,
    pub y: usize,
    pub zone: ZoneType,
    pub building: Building,
    pub land_value: f32,
    /// Decaying accumulator, 0..=100.
    pub pollution: f32,
    pub crime: f32,
    pub traffic: f32,
    pub has_subway: bool,
    /// Road tile that also carries rail.
    pub has_rail_overlay: bool,
}

impl Tile {
    pub fn new(x: usize, y: usize) -> Self {
        Self {
            x,
            y,
            zone: ZoneType::None,
            building: Building::new(BuildingType::Grass),
            land_value: BASE_LAND_VALUE,
            pollution: 0.0,
            crime: 0.0,
            traffic: 0.0,
            has_subway: false,
            has_rail_overlay: false,
        }
    }

    #[inline]
    pub fn building_type(&self) -> BuildingType {
        self.building.building_type
    }

    /// Origin of the building occupying this tile: the tile itself unless it
    /// is a stub carrying a back-reference.
    #[inline]
    pub fn origin(&self) -> GridPos {
        self.building.origin.unwrap_or((self.x, self.y))
    }

    /// Undeveloped ground: grass that is not a footprint stub.
    #[inline]
    pub fn is_vacant(&self) -> bool {
        self.building.building_type == BuildingType::Grass
    }
}

// ---------------------------------------------------------------------------
// Read access shared by snapshots and writers
// ---------------------------------------------------------------------------

/// Read-only view over a square tile grid.
pub trait TileView {
    fn size(&self) -> usize;

    fn tile(&self, x: usize, y: usize) -> &Tile;

    #[inline]
    fn in_bounds(&self, x: usize, y: usize) -> bool {
        x < self.size() && y < self.size()
    }

    fn try_tile(&self, x: usize, y: usize) -> Option<&Tile> {
        if self.in_bounds(x, y) {
            Some(self.tile(x, y))
        } else {
            None
        }
    }

    /// Returns up to 4 cardinal neighbors and the count of valid entries.
    /// Use `&result[..count]` to iterate over valid neighbors.
    fn neighbors4(&self, x: usize, y: usize) -> ([(usize, usize); 4], usize) {
        let size = self.size();
        let mut result = [(0, 0); 4];
        let mut count = 0;
        if x > 0 {
            result[count] = (x - 1, y);
            count += 1;
        }
        if x + 1 < size {
            result[count] = (x + 1, y);
            count += 1;
        }
        if y > 0 {
            result[count] = (x, y - 1);
            count += 1;
        }
        if y + 1 < size {
            result[count] = (x, y + 1);
            count += 1;
        }
        (result, count)
    }

    /// The origin tile of whatever occupies `(x, y)`, if the back-reference
    /// resolves to a real building whose footprint covers `(x, y)`.
    fn resolve_origin(&self, x: usize, y: usize) -> Option<GridPos> {
        let tile = self.tile(x, y);
        let Some((ox, oy)) = tile.building.origin else {
            return (tile.building_type() != BuildingType::Empty).then_some((x, y));
        };
        if !self.in_bounds(ox, oy) {
            return None;
        }
        let origin = self.tile(ox, oy);
        if origin.building.origin.is_some() || origin.building_type() == BuildingType::Empty {
            return None;
        }
        let (w, h) = origin.building_type().footprint();
        let covers = x >= ox && x < ox + w && y >= oy && y < oy + h;
        covers.then_some((ox, oy))
    }
}

// ---------------------------------------------------------------------------
// Immutable snapshot
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Grid {
    size: usize,
    rows: Vec<Arc<Vec<Tile>>>,
}

impl Grid {
    /// A `size x size` grid of unzoned grass.
    pub fn new(size: usize) -> Self {
        let rows = (0..size)
            .map(|y| Arc::new((0..size).map(|x| Tile::new(x, y)).collect()))
            .collect();
        Self { size, rows }
    }

    pub fn writer(&self) -> GridWriter {
        GridWriter::from_grid(self)
    }

    /// All tiles in row-major order.
    pub fn tiles(&self) -> impl Iterator<Item = &Tile> {
        self.rows.iter().flat_map(|row| row.iter())
    }

    /// True if row `y` is the same allocation in both snapshots.
    pub fn shares_row_with(&self, other: &Grid, y: usize) -> bool {
        match (self.rows.get(y), other.rows.get(y)) {
            (Some(a), Some(b)) => Arc::ptr_eq(a, b),
            _ => false,
        }
    }
}

impl TileView for Grid {
    #[inline]
    fn size(&self) -> usize {
        self.size
    }

    #[inline]
    fn tile(&self, x: usize, y: usize) -> &Tile {
        &self.rows[y][x]
    }
}

// ---------------------------------------------------------------------------
// Copy-on-write writer
// ---------------------------------------------------------------------------

#[derive(Debug)]
enum RowSlot {
    Shared(Arc<Vec<Tile>>),
    Owned(Vec<Tile>),
}

/// Mutable working copy of a `Grid`.
#[derive(Debug)]
pub struct GridWriter {
    size: usize,
    rows: Vec<RowSlot>,
}

impl GridWriter {
    pub fn from_grid(grid: &Grid) -> Self {
        Self {
            size: grid.size,
            rows: grid.rows.iter().cloned().map(RowSlot::Shared).collect(),
        }
    }

    /// Borrow a tile mutably, promoting its row to an owned copy first.
    pub fn tile_mut(&mut self, x: usize, y: usize) -> &mut Tile {
        &mut self.row_mut(y)[x]
    }

    fn row_mut(&mut self, y: usize) -> &mut Vec<Tile> {
        let slot = &mut self.rows[y];
        if let RowSlot::Shared(shared) = slot {
            let owned = shared.as_ref().clone();
            *slot = RowSlot::Owned(owned);
        }
        match slot {
            RowSlot::Owned(row) => row,
            RowSlot::Shared(_) => unreachable!("row promoted above"),
        }
    }

    pub fn is_row_owned(&self, y: usize) -> bool {
        matches!(self.rows.get(y), Some(RowSlot::Owned(_)))
    }

    pub fn owned_row_count(&self) -> usize {
        self.rows
            .iter()
            .filter(|slot| matches!(slot, RowSlot::Owned(_)))
            .count()
    }

    /// Replace the building on `(x, y)`, keeping the tile's other fields.
    pub fn set_building(&mut self, x: usize, y: usize, building: Building) {
        self.tile_mut(x, y).building = building;
    }

    /// Stamp `building` at origin `(x, y)` and point every other covered
    /// cell back at it. The caller guarantees the footprint is in bounds.
    pub fn stamp_footprint(&mut self, x: usize, y: usize, zone: ZoneType, building: Building) {
        let (w, h) = building.building_type.footprint();
        for dy in 0..h {
            for dx in 0..w {
                let tile = self.tile_mut(x + dx, y + dy);
                tile.zone = zone;
                tile.has_rail_overlay = false;
                tile.building = if dx == 0 && dy == 0 {
                    building.clone()
                } else {
                    Building::stub((x, y))
                };
            }
        }
    }

    /// Revert every cell of the building at origin `(x, y)` to unzoned grass.
    pub fn clear_footprint(&mut self, x: usize, y: usize) {
        let (w, h) = self.tile(x, y).building_type().footprint();
        for dy in 0..h {
            for dx in 0..w {
                let (cx, cy) = (x + dx, y + dy);
                if !self.in_bounds(cx, cy) {
                    continue;
                }
                let tile = self.tile_mut(cx, cy);
                tile.zone = ZoneType::None;
                tile.has_rail_overlay = false;
                tile.building = Building::new(BuildingType::Grass);
            }
        }
    }

    pub fn finish(self) -> Grid {
        let rows = self
            .rows
            .into_iter()
            .map(|slot| match slot {
                RowSlot::Shared(row) => row,
                RowSlot::Owned(row) => Arc::new(row),
            })
            .collect();
        Grid {
            size: self.size,
            rows,
        }
    }
}

impl TileView for GridWriter {
    #[inline]
    fn size(&self) -> usize {
        self.size
    }

    #[inline]
    fn tile(&self, x: usize, y: usize) -> &Tile {
        match &self.rows[y] {
            RowSlot::Shared(row) => &row[x],
            RowSlot::Owned(row) => &row[x],
        }
    }
}
