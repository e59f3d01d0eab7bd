//! City-wide aggregation.
//!
//! `take_census` walks the grid once and collects the raw sums; `compute_stats`
//! turns a census into the per-tick `Stats` snapshot (quality scores, demand,
//! income). Money is carried in from the previous snapshot, never recomputed.

use serde::{Deserialize, Serialize};

use crate::buildings::BuildingType;
use crate::economy::monthly_income;
use crate::grid::{Grid, TileView, ZoneType};
use crate::services::ServiceCoverage;
use crate::zones::{compute_zone_demand, SpecialBuildings, ZoneDemand};

/// Commercial jobs multiplier on tiles with a subway line.
pub const SUBWAY_JOBS_BONUS: f32 = 1.15;
/// Pollution above which a tile counts as polluted for the environment score.
const POLLUTED_TILE_THRESHOLD: f32 = 10.0;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Stats {
    pub population: u32,
    pub jobs: u32,
    pub money: f64,
    /// Monthly tax income at the current effective rate.
    pub income: f64,
    /// Monthly budget expenses.
    pub expenses: f64,
    pub happiness: f32,
    pub health: f32,
    pub education: f32,
    pub safety: f32,
    pub environment: f32,
    pub demand: ZoneDemand,
}

impl Default for Stats {
    fn default() -> Self {
        Self {
            population: 0,
            jobs: 0,
            money: crate::config::STARTING_MONEY,
            income: 0.0,
            expenses: 0.0,
            happiness: 50.0,
            health: 50.0,
            education: 0.0,
            safety: 0.0,
            environment: 50.0,
            demand: ZoneDemand::default(),
        }
    }
}

/// Raw per-tick sums over the whole grid.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CityCensus {
    pub tile_count: usize,
    pub population: u32,
    pub jobs: u32,
    pub total_pollution: f32,
    pub polluted_tiles: usize,
    pub green_tiles: usize,
    pub zoned_tiles: usize,
    pub subway_tiles: usize,
    pub police: f32,
    pub fire: f32,
    pub health: f32,
    pub education: f32,
    /// Tiles the coverage sums above were taken over.
    pub coverage_tiles: usize,
    pub specials: SpecialBuildings,
}

pub fn take_census(grid: &Grid, services: &ServiceCoverage) -> CityCensus {
    let mut census = CityCensus {
        tile_count: grid.size() * grid.size(),
        ..Default::default()
    };
    let any_zoned = grid.tiles().any(|t| t.zone.is_zoned());

    for tile in grid.tiles() {
        let b = &tile.building;
        census.population += b.population;
        census.jobs += if tile.zone == ZoneType::Commercial && tile.has_subway {
            (b.jobs as f32 * SUBWAY_JOBS_BONUS).floor() as u32
        } else {
            b.jobs
        };

        census.total_pollution += tile.pollution;
        if tile.pollution > POLLUTED_TILE_THRESHOLD {
            census.polluted_tiles += 1;
        }
        if tile.has_subway {
            census.subway_tiles += 1;
        }

        let footprint_type = match b.origin {
            Some(_) => grid
                .resolve_origin(tile.x, tile.y)
                .map(|(ox, oy)| grid.tile(ox, oy).building_type()),
            None => Some(b.building_type),
        };
        if footprint_type.is_some_and(BuildingType::is_green) {
            census.green_tiles += 1;
        }

        match b.building_type {
            BuildingType::Airport => census.specials.airport = true,
            BuildingType::CityHall => census.specials.city_hall = true,
            BuildingType::SpaceProgram => census.specials.space_program = true,
            BuildingType::Stadium => census.specials.stadium = true,
            BuildingType::Museum => census.specials.museum = true,
            BuildingType::AmusementPark => census.specials.amusement_park = true,
            BuildingType::Rail | BuildingType::RailStation => census.specials.rail = true,
            _ => {}
        }
        if tile.has_rail_overlay {
            census.specials.rail = true;
        }

        if tile.zone.is_zoned() {
            census.zoned_tiles += 1;
        }
        if tile.zone.is_zoned() || !any_zoned {
            let i = services.index(tile.x, tile.y);
            census.police += services.police[i];
            census.fire += services.fire[i];
            census.health += services.health[i];
            census.education += services.education[i];
            census.coverage_tiles += 1;
        }
    }
    census
}

/// The five 0..=100 quality scores.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct QualityScores {
    pub safety: f32,
    pub health: f32,
    pub education: f32,
    pub environment: f32,
    pub happiness: f32,
}

pub fn quality_scores(census: &CityCensus, effective_tax_rate: f32) -> QualityScores {
    let n = census.coverage_tiles.max(1) as f32;
    let police = census.police / n;
    let fire = census.fire / n;
    let hospital = census.health / n;
    let education = (census.education / n).clamp(0.0, 100.0);

    let developed = census.zoned_tiles.max(1) as f32;
    let pollution_density = (census.total_pollution / developed).clamp(0.0, 100.0);
    let safety = (police * 0.7 + fire * 0.3).clamp(0.0, 100.0);
    let health = (hospital * 0.7 + (100.0 - pollution_density) * 0.3).clamp(0.0, 100.0);

    let tiles = census.tile_count.max(1) as f32;
    let green_ratio = census.green_tiles as f32 / tiles;
    let pollution_ratio = census.polluted_tiles as f32 / tiles;
    let environment = ((green_ratio * 2.0 - pollution_ratio * 3.0 + 0.5) * 100.0).clamp(0.0, 100.0);

    let job_satisfaction = if census.population == 0 {
        100.0
    } else {
        (census.jobs as f32 / (census.population as f32 * 0.7)).min(1.0) * 100.0
    };
    let tax_term = (100.0 - effective_tax_rate * 3.0).clamp(0.0, 100.0);

    let happiness = (safety * 0.2
        + health * 0.2
        + education * 0.15
        + environment * 0.15
        + job_satisfaction * 0.2
        + tax_term * 0.1)
        .clamp(0.0, 100.0);

    QualityScores {
        safety,
        health,
        education,
        environment,
        happiness,
    }
}

/// Build this tick's `Stats`. `money` is carried over from the previous tick.
pub fn compute_stats(
    grid: &Grid,
    services: &ServiceCoverage,
    money: f64,
    effective_tax_rate: f32,
    expenses: f64,
) -> Stats {
    let census = take_census(grid, services);
    let scores = quality_scores(&census, effective_tax_rate);
    Stats {
        population: census.population,
        jobs: census.jobs,
        money,
        income: monthly_income(census.population, census.jobs, effective_tax_rate),
        expenses,
        happiness: scores.happiness,
        health: scores.health,
        education: scores.education,
        safety: scores.safety,
        environment: scores.environment,
        demand: compute_zone_demand(&census, effective_tax_rate),
    }
}
