use bevy::prelude::*;
use rand::Rng;

use crate::grid::{GridWriter, TileView};
use crate::services::ServiceCoverage;

// =============================================================================
// Constants
// =============================================================================

/// Per-tick ignition chance for each flammable building.
pub const IGNITION_CHANCE: f32 = 0.00002;

/// Suppression chance with no fire coverage.
const BASE_SUPPRESSION: f32 = 0.15;

/// Extra suppression chance at full fire coverage.
const COVERAGE_SUPPRESSION: f32 = 0.7;

/// Damage added to `fire_progress` per tick the fire is not put out.
pub const FIRE_DAMAGE_PER_TICK: f32 = 4.0;

/// Chance per burning tick for the fire to jump to a neighbouring building.
pub const SPREAD_CHANCE: f32 = 0.01;

/// `fire_progress` at which the building is lost.
pub const DESTRUCTION_THRESHOLD: f32 = 100.0;

/// What happened to the building at a tile this tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FireOutcome {
    Quiet,
    Ignited,
    Extinguished,
    Burning,
    Destroyed,
}

pub fn suppression_chance(fire_coverage: f32) -> f32 {
    BASE_SUPPRESSION + COVERAGE_SUPPRESSION * (fire_coverage / 100.0).clamp(0.0, 1.0)
}

// =============================================================================
// Per-tile update
// =============================================================================

/// Ignite, fight, spread and resolve fire for the origin building at `(x, y)`.
/// With disasters off, burning buildings are put out and nothing ignites.
pub fn update_fire<R: Rng + ?Sized>(
    writer: &mut GridWriter,
    x: usize,
    y: usize,
    services: &ServiceCoverage,
    disasters_enabled: bool,
    rng: &mut R,
) -> FireOutcome {
    let building = &writer.tile(x, y).building;
    if building.is_stub() {
        return FireOutcome::Quiet;
    }
    let building_type = building.building_type;
    let on_fire = building.on_fire;
    let flammable = building_type.is_flammable() && building.is_complete();

    if !disasters_enabled {
        if on_fire {
            extinguish(writer, x, y);
            return FireOutcome::Extinguished;
        }
        return FireOutcome::Quiet;
    }

    if !on_fire {
        if flammable && rng.gen::<f32>() < IGNITION_CHANCE {
            writer.tile_mut(x, y).building.on_fire = true;
            debug!("fire broke out in {building_type:?} at ({x}, {y})");
            return FireOutcome::Ignited;
        }
        return FireOutcome::Quiet;
    }

    if rng.gen::<f32>() < suppression_chance(services.fire_at(x, y)) {
        extinguish(writer, x, y);
        return FireOutcome::Extinguished;
    }

    let progress = {
        let b = &mut writer.tile_mut(x, y).building;
        b.fire_progress = (b.fire_progress + FIRE_DAMAGE_PER_TICK).min(DESTRUCTION_THRESHOLD);
        b.fire_progress
    };

    if rng.gen::<f32>() < SPREAD_CHANCE {
        spread_fire(writer, x, y, rng);
    }

    if progress >= DESTRUCTION_THRESHOLD {
        debug!("building at ({x}, {y}) burned down");
        writer.clear_footprint(x, y);
        return FireOutcome::Destroyed;
    }
    FireOutcome::Burning
}

fn extinguish(writer: &mut GridWriter, x: usize, y: usize) {
    let b = &mut writer.tile_mut(x, y).building;
    b.on_fire = false;
    b.fire_progress = 0.0;
}

/// Set one random 4-neighbour's building alight, if it can burn.
fn spread_fire<R: Rng + ?Sized>(writer: &mut GridWriter, x: usize, y: usize, rng: &mut R) {
    let (neighbors, count) = writer.neighbors4(x, y);
    if count == 0 {
        return;
    }
    let (nx, ny) = neighbors[rng.gen_range(0..count)];
    let Some((ox, oy)) = writer.resolve_origin(nx, ny) else {
        return;
    };
    if (ox, oy) == (x, y) {
        return;
    }
    let target = &writer.tile(ox, oy).building;
    if target.on_fire || !target.is_complete() || !target.building_type.is_flammable() {
        return;
    }
    writer.tile_mut(ox, oy).building.on_fire = true;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::buildings::{Building, BuildingType};
    use crate::grid::{Grid, ZoneType};
    use rand::rngs::mock::StepRng;

    fn burning(t: BuildingType, progress: f32) -> Building {
        let mut b = Building::new(t);
        b.construction_progress = 100.0;
        b.on_fire = true;
        b.fire_progress = progress;
        b
    }

    /// Every `gen::<f32>()` draw returns just under 1.0, so no roll succeeds.
    fn unlucky() -> StepRng {
        StepRng::new(u64::MAX, 0)
    }

    /// Every draw returns 0.0, so every roll succeeds.
    fn lucky() -> StepRng {
        StepRng::new(0, 0)
    }

    #[test]
    fn test_suppression_scales_with_coverage() {
        assert!((suppression_chance(0.0) - 0.15).abs() < 1e-6);
        assert!((suppression_chance(100.0) - 0.85).abs() < 1e-6);
        assert!((suppression_chance(500.0) - 0.85).abs() < 1e-6);
    }

    #[test]
    fn test_unsuppressed_fire_destroys_whole_footprint() {
        let mut w = Grid::new(6).writer();
        w.stamp_footprint(1, 1, ZoneType::Residential, burning(BuildingType::ApartmentLow, 98.0));
        let services = ServiceCoverage::new(6);
        let outcome = update_fire(&mut w, 1, 1, &services, true, &mut unlucky());
        assert_eq!(outcome, FireOutcome::Destroyed);
        for (x, y) in [(1, 1), (2, 1), (1, 2), (2, 2)] {
            assert_eq!(w.tile(x, y).building_type(), BuildingType::Grass);
            assert_eq!(w.tile(x, y).zone, ZoneType::None);
        }
    }

    #[test]
    fn test_suppressed_fire_resets_progress() {
        let mut w = Grid::new(4).writer();
        w.set_building(1, 1, burning(BuildingType::ShopSmall, 40.0));
        let services = ServiceCoverage::new(4);
        let outcome = update_fire(&mut w, 1, 1, &services, true, &mut lucky());
        assert_eq!(outcome, FireOutcome::Extinguished);
        assert!(!w.tile(1, 1).building.on_fire);
        assert_eq!(w.tile(1, 1).building.fire_progress, 0.0);
    }

    #[test]
    fn test_disabled_disasters_put_fires_out() {
        let mut w = Grid::new(4).writer();
        w.set_building(0, 0, burning(BuildingType::FactorySmall, 50.0));
        let services = ServiceCoverage::new(4);
        let outcome = update_fire(&mut w, 0, 0, &services, false, &mut unlucky());
        assert_eq!(outcome, FireOutcome::Extinguished);
    }

    #[test]
    fn test_terrain_never_ignites() {
        let mut w = Grid::new(4).writer();
        w.set_building(0, 0, Building::new(BuildingType::Road));
        let services = ServiceCoverage::new(4);
        assert_eq!(
            update_fire(&mut w, 0, 0, &services, true, &mut lucky()),
            FireOutcome::Quiet
        );
        assert!(!w.tile(0, 0).building.on_fire);
    }

    #[test]
    fn test_spread_reaches_neighbour_origin() {
        let mut w = Grid::new(6).writer();
        w.set_building(0, 0, burning(BuildingType::HouseSmall, 0.0));
        let mut neighbour = Building::new(BuildingType::ShopSmall);
        neighbour.construction_progress = 100.0;
        // (0, 0) has two neighbours; StepRng(0, 0) picks the first, (1, 0).
        w.set_building(1, 0, neighbour);
        spread_fire(&mut w, 0, 0, &mut lucky());
        assert!(w.tile(1, 0).building.on_fire);
    }
}
