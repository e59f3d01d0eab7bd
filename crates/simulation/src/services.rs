//! Per-tile service coverage fields.
//!
//! Rebuilt from scratch every tick. Graduated services (police, fire, health,
//! education) accumulate a linear falloff from each building and are capped at
//! 100 per tile; utilities (power, water) are boolean reach fields.

use serde::{Deserialize, Serialize};

use crate::buildings::BuildingType;
use crate::grid::{Grid, TileView};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ServiceKind {
    Police,
    Fire,
    Health,
    Education,
    Power,
    Water,
}

impl ServiceKind {
    pub fn is_binary(self) -> bool {
        matches!(self, ServiceKind::Power | ServiceKind::Water)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ServiceSpec {
    pub kind: ServiceKind,
    /// Radius in tiles, measured from the building origin.
    pub range: f32,
}

/// Coverage kind and radius for service and utility buildings.
pub fn service_spec(building_type: BuildingType) -> Option<ServiceSpec> {
    let (kind, range) = match building_type {
        BuildingType::PoliceStation => (ServiceKind::Police, 13.0),
        BuildingType::FireStation => (ServiceKind::Fire, 18.0),
        BuildingType::Hospital => (ServiceKind::Health, 24.0),
        BuildingType::School => (ServiceKind::Education, 11.0),
        BuildingType::University => (ServiceKind::Education, 19.0),
        BuildingType::PowerPlant => (ServiceKind::Power, 15.0),
        BuildingType::WaterTower => (ServiceKind::Water, 12.0),
        _ => return None,
    };
    Some(ServiceSpec { kind, range })
}

pub const MAX_COVERAGE: f32 = 100.0;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServiceCoverage {
    pub size: usize,
    pub police: Vec<f32>,
    pub fire: Vec<f32>,
    pub health: Vec<f32>,
    pub education: Vec<f32>,
    pub power: Vec<bool>,
    pub water: Vec<bool>,
}

impl ServiceCoverage {
    pub fn new(size: usize) -> Self {
        let n = size * size;
        Self {
            size,
            police: vec![0.0; n],
            fire: vec![0.0; n],
            health: vec![0.0; n],
            education: vec![0.0; n],
            power: vec![false; n],
            water: vec![false; n],
        }
    }

    #[inline]
    pub fn index(&self, x: usize, y: usize) -> usize {
        y * self.size + x
    }

    #[inline]
    pub fn powered_at(&self, x: usize, y: usize) -> bool {
        self.power[self.index(x, y)]
    }

    #[inline]
    pub fn watered_at(&self, x: usize, y: usize) -> bool {
        self.water[self.index(x, y)]
    }

    #[inline]
    pub fn fire_at(&self, x: usize, y: usize) -> f32 {
        self.fire[self.index(x, y)]
    }

    /// Mean of the four graduated fields at `(x, y)`.
    pub fn average_at(&self, x: usize, y: usize) -> f32 {
        let i = self.index(x, y);
        (self.police[i] + self.fire[i] + self.health[i] + self.education[i]) / 4.0
    }

    fn field_mut(&mut self, kind: ServiceKind) -> Option<&mut Vec<f32>> {
        match kind {
            ServiceKind::Police => Some(&mut self.police),
            ServiceKind::Fire => Some(&mut self.fire),
            ServiceKind::Health => Some(&mut self.health),
            ServiceKind::Education => Some(&mut self.education),
            ServiceKind::Power | ServiceKind::Water => None,
        }
    }

    fn apply(&mut self, ox: usize, oy: usize, spec: ServiceSpec) {
        let size = self.size as i64;
        let reach = spec.range.floor() as i64;
        let range_sq = spec.range * spec.range;
        for dy in -reach..=reach {
            let y = oy as i64 + dy;
            if y < 0 || y >= size {
                continue;
            }
            for dx in -reach..=reach {
                let x = ox as i64 + dx;
                if x < 0 || x >= size {
                    continue;
                }
                let dist_sq = (dx * dx + dy * dy) as f32;
                if dist_sq > range_sq {
                    continue;
                }
                let idx = self.index(x as usize, y as usize);
                match spec.kind {
                    ServiceKind::Power => self.power[idx] = true,
                    ServiceKind::Water => self.water[idx] = true,
                    kind => {
                        let strength = ((1.0 - dist_sq.sqrt() / spec.range) * 100.0).max(0.0);
                        if let Some(field) = self.field_mut(kind) {
                            field[idx] = (field[idx] + strength).min(MAX_COVERAGE);
                        }
                    }
                }
            }
        }
    }
}

/// Build coverage from every completed, non-abandoned service building.
pub fn compute_service_coverage(grid: &Grid) -> ServiceCoverage {
    let mut coverage = ServiceCoverage::new(grid.size());
    for tile in grid.tiles() {
        let building = &tile.building;
        if building.abandoned || !building.is_complete() {
            continue;
        }
        if let Some(spec) = service_spec(building.building_type) {
            coverage.apply(tile.x, tile.y, spec);
        }
    }
    coverage
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::buildings::Building;
    use crate::grid::ZoneType;

    fn grid_with(size: usize, placed: &[(usize, usize, BuildingType)]) -> Grid {
        let mut writer = Grid::new(size).writer();
        for &(x, y, t) in placed {
            let mut b = Building::new(t);
            b.construction_progress = 100.0;
            writer.stamp_footprint(x, y, ZoneType::None, b);
        }
        writer.finish()
    }

    #[test]
    fn test_empty_grid_has_no_coverage() {
        let cov = compute_service_coverage(&Grid::new(10));
        assert!(cov.police.iter().all(|&v| v == 0.0));
        assert!(cov.power.iter().all(|&v| !v));
    }

    #[test]
    fn test_police_falloff_is_linear() {
        let grid = grid_with(40, &[(20, 20, BuildingType::PoliceStation)]);
        let cov = compute_service_coverage(&grid);
        assert_eq!(cov.police[cov.index(20, 20)], 100.0);
        let at_6 = cov.police[cov.index(26, 20)];
        assert!((at_6 - (1.0 - 6.0 / 13.0) * 100.0).abs() < 1e-3);
        assert_eq!(cov.police[cov.index(34, 20)], 0.0);
    }

    #[test]
    fn test_overlapping_stations_are_capped() {
        let grid = grid_with(
            30,
            &[
                (10, 10, BuildingType::PoliceStation),
                (11, 10, BuildingType::PoliceStation),
            ],
        );
        let cov = compute_service_coverage(&grid);
        assert_eq!(cov.police[cov.index(10, 10)], MAX_COVERAGE);
        assert!(cov.police.iter().all(|&v| v <= MAX_COVERAGE));
    }

    #[test]
    fn test_power_is_a_disc() {
        let grid = grid_with(40, &[(20, 20, BuildingType::PowerPlant)]);
        let cov = compute_service_coverage(&grid);
        assert!(cov.powered_at(20 + 15, 20));
        assert!(!cov.powered_at(20 + 11, 20 + 11));
        assert!(!cov.watered_at(20, 20));
    }

    #[test]
    fn test_incomplete_and_abandoned_do_not_contribute() {
        let mut writer = Grid::new(20).writer();
        writer.set_building(5, 5, Building::new(BuildingType::WaterTower));
        let mut abandoned = Building::new(BuildingType::FireStation);
        abandoned.construction_progress = 100.0;
        abandoned.abandoned = true;
        writer.set_building(10, 10, abandoned);
        let cov = compute_service_coverage(&writer.finish());
        assert!(!cov.watered_at(5, 5));
        assert_eq!(cov.fire_at(10, 10), 0.0);
    }

    #[test]
    fn test_coverage_is_idempotent() {
        let grid = grid_with(
            30,
            &[
                (3, 3, BuildingType::Hospital),
                (15, 15, BuildingType::University),
                (25, 5, BuildingType::WaterTower),
            ],
        );
        assert_eq!(
            compute_service_coverage(&grid),
            compute_service_coverage(&grid)
        );
    }
}
