use serde::{Deserialize, Serialize};

use crate::config::DEFAULT_TAX_RATE;
use crate::grid::ZoneType;
use crate::stats::CityCensus;

/// Per-zone demand in `[-100, 100]`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ZoneDemand {
    pub residential: f32,
    pub commercial: f32,
    pub industrial: f32,
}

impl ZoneDemand {
    pub fn for_zone(&self, zone: ZoneType) -> f32 {
        match zone {
            ZoneType::Residential => self.residential,
            ZoneType::Commercial => self.commercial,
            ZoneType::Industrial => self.industrial,
            ZoneType::None => 0.0,
        }
    }
}

/// Presence of landmark buildings that shift demand.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpecialBuildings {
    pub airport: bool,
    pub city_hall: bool,
    pub space_program: bool,
    pub stadium: bool,
    pub museum: bool,
    pub amusement_park: bool,
    /// Any rail track or rail station.
    pub rail: bool,
}

/// Additive `(residential, commercial, industrial)` bonus from landmarks.
pub fn special_building_bonus(specials: &SpecialBuildings) -> (f32, f32, f32) {
    let table = [
        (specials.airport, (0.0, 10.0, 10.0)),
        (specials.city_hall, (5.0, 5.0, 0.0)),
        (specials.space_program, (5.0, 0.0, 15.0)),
        (specials.stadium, (0.0, 8.0, 0.0)),
        (specials.museum, (4.0, 4.0, 0.0)),
        (specials.amusement_park, (3.0, 10.0, 0.0)),
        (specials.rail, (0.0, 3.0, 6.0)),
    ];
    table
        .iter()
        .filter(|(present, _)| *present)
        .fold((0.0, 0.0, 0.0), |acc, (_, (r, c, i))| {
            (acc.0 + r, acc.1 + c, acc.2 + i)
        })
}

/// Subway coverage lifts commercial demand, up to +10.
pub fn subway_bonus(subway_tiles: usize) -> f32 {
    (subway_tiles as f32 * 0.25).min(10.0)
}

/// Demand scale from taxes: 1.0 at the neutral rate, 0 at 100%.
pub fn tax_multiplier(effective_tax_rate: f32) -> f32 {
    (1.0 - (effective_tax_rate - DEFAULT_TAX_RATE) / 91.0).max(0.0)
}

/// Flat demand shift from taxes: positive below the neutral rate.
pub fn tax_delta(effective_tax_rate: f32) -> f32 {
    (DEFAULT_TAX_RATE - effective_tax_rate) * 2.0
}

pub fn compute_zone_demand(census: &CityCensus, effective_tax_rate: f32) -> ZoneDemand {
    let pop = census.population as f32;
    let jobs = census.jobs as f32;

    let residential = (jobs - pop * 0.7) / 18.0;
    let commercial = (pop * 0.3 - jobs * 0.3) / 4.0 + subway_bonus(census.subway_tiles);
    let industrial = (pop * 0.35 - jobs * 0.3) / 2.0;

    let (bonus_r, bonus_c, bonus_i) = special_building_bonus(&census.specials);
    let multiplier = tax_multiplier(effective_tax_rate);
    let delta = tax_delta(effective_tax_rate);
    let finish = |base: f32| (base * multiplier + delta).clamp(-100.0, 100.0);

    ZoneDemand {
        residential: finish(residential + bonus_r),
        commercial: finish(commercial + bonus_c),
        industrial: finish(industrial + bonus_i),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn census(population: u32, jobs: u32) -> CityCensus {
        CityCensus {
            population,
            jobs,
            ..Default::default()
        }
    }

    #[test]
    fn test_empty_city_is_neutral() {
        let d = compute_zone_demand(&census(0, 0), DEFAULT_TAX_RATE);
        assert_eq!(d, ZoneDemand::default());
    }

    #[test]
    fn test_jobs_pull_residents() {
        let d = compute_zone_demand(&census(0, 180), DEFAULT_TAX_RATE);
        assert!((d.residential - 10.0).abs() < 1e-4);
        assert!(d.commercial < 0.0);
        assert!(d.industrial < 0.0);
    }

    #[test]
    fn test_residents_pull_jobs() {
        let d = compute_zone_demand(&census(100, 0), DEFAULT_TAX_RATE);
        assert!(d.residential < 0.0);
        assert!((d.commercial - 7.5).abs() < 1e-4);
        assert!((d.industrial - 17.5).abs() < 1e-4);
    }

    #[test]
    fn test_demand_is_clamped() {
        let d = compute_zone_demand(&census(100_000, 0), DEFAULT_TAX_RATE);
        assert_eq!(d.industrial, 100.0);
        assert_eq!(d.residential, -100.0);
    }

    #[test]
    fn test_high_tax_suppresses_demand() {
        let base = compute_zone_demand(&census(100, 0), DEFAULT_TAX_RATE);
        let taxed = compute_zone_demand(&census(100, 0), 20.0);
        assert!(taxed.industrial < base.industrial);
        assert!((tax_delta(20.0) + 22.0).abs() < 1e-4);
        assert_eq!(tax_multiplier(100.0), 0.0);
    }

    #[test]
    fn test_specials_and_subway_add_demand() {
        let mut c = census(0, 0);
        c.specials.airport = true;
        c.subway_tiles = 100;
        let d = compute_zone_demand(&c, DEFAULT_TAX_RATE);
        assert!((d.commercial - 20.0).abs() < 1e-4);
        assert!((d.industrial - 10.0).abs() < 1e-4);
        assert_eq!(subway_bonus(8), 2.0);
    }
}
