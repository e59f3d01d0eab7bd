//! The per-tick state transition.
//!
//! ```text
//! coverage -> per-tile pass (skip-listed) -> budget -> tax smoothing
//!          -> stats -> calendar + weekly revenue -> advisors -> history
//! ```
//!
//! `simulate_tick` never mutates its input. The grid is edited through a
//! `GridWriter`, so rows nobody touched are shared with the previous snapshot.
//! Growth reads the demand stored on the *previous* stats; the demand produced
//! by this tick's growth only takes effect next tick.

use rand::Rng;

use crate::advisors::generate_advisor_messages;
use crate::budget::compute_budget;
use crate::buildings::{
    advance_construction, evolve_building, expected_occupancy, try_spawn, update_occupancy,
    BuildingType, GrowthContext,
};
use crate::chart_data::record_history;
use crate::economy::{collect_weekly_revenue, smooth_tax_rate};
use crate::fire::update_fire;
use crate::game_state::GameState;
use crate::grid::{GridWriter, TileView};
use crate::land_value::{step_land_value, target_land_value};
use crate::pollution::{emission, equilibrium, step_pollution, QUIESCENT_POLLUTION};
use crate::road_access::RoadAccessScratch;
use crate::services::{compute_service_coverage, ServiceCoverage};
use crate::stats::compute_stats;
use crate::time_of_day::{is_week_boundary, Calendar};

/// Inputs fixed for the whole per-tile pass.
#[derive(Debug, Clone, Copy)]
pub struct TickContext<'a> {
    pub growth: GrowthContext<'a>,
    pub disasters_enabled: bool,
}

/// Advance `state` by one tick.
pub fn simulate_tick<R: Rng + ?Sized>(
    state: &GameState,
    rng: &mut R,
    scratch: &mut RoadAccessScratch,
) -> GameState {
    let services = compute_service_coverage(&state.grid);
    let ctx = TickContext {
        growth: GrowthContext {
            services: &services,
            demand: state.stats.demand,
        },
        disasters_enabled: state.disasters_enabled,
    };

    let mut writer = state.grid.writer();
    let size = writer.size();
    for y in 0..size {
        for x in 0..size {
            if needs_update(&writer, x, y, &ctx) {
                update_tile(&mut writer, x, y, &ctx, rng, scratch);
            }
        }
    }
    let grid = writer.finish();

    let budget = compute_budget(&grid, &state.budget);
    let effective_tax_rate = smooth_tax_rate(state.effective_tax_rate, state.tax_rate);
    let mut stats = compute_stats(
        &grid,
        &services,
        state.stats.money,
        effective_tax_rate,
        budget.total_expenses(),
    );

    let tick = state.tick + 1;
    let calendar = Calendar::from_tick(tick);
    if is_week_boundary(tick) {
        stats.money = collect_weekly_revenue(stats.money, stats.income, stats.expenses);
    }

    let advisor_messages = generate_advisor_messages(&stats, &grid);
    let mut history = state.history.clone();
    record_history(&mut history, tick, &calendar, &stats);

    GameState {
        grid,
        grid_size: state.grid_size,
        city_name: state.city_name.clone(),
        mode: state.mode,
        tick,
        calendar,
        stats,
        budget,
        services,
        advisor_messages,
        history,
        tax_rate: state.tax_rate,
        effective_tax_rate,
        disasters_enabled: state.disasters_enabled,
        water_bodies: state.water_bodies.clone(),
    }
}

// ---------------------------------------------------------------------------
// Skip-list
// ---------------------------------------------------------------------------

/// False for tiles that provably would not change this tick.
pub fn needs_update<V: TileView + ?Sized>(view: &V, x: usize, y: usize, ctx: &TickContext) -> bool {
    let tile = view.tile(x, y);
    let b = &tile.building;
    if b.on_fire {
        return true;
    }
    let clean = tile.pollution < QUIESCENT_POLLUTION;
    match b.building_type {
        BuildingType::Empty => view.resolve_origin(x, y).is_none() || !clean,
        BuildingType::Grass if tile.zone.is_zoned() => true,
        BuildingType::Grass
        | BuildingType::Water
        | BuildingType::Road
        | BuildingType::Rail
        | BuildingType::Tree => !clean,
        t if t.is_zone_building() => true,
        _ => !is_settled(view, x, y, ctx),
    }
}

/// A non-zone building with nothing left to do: built, flags current,
/// occupancy and pollution at equilibrium, and no fire risk.
fn is_settled<V: TileView + ?Sized>(view: &V, x: usize, y: usize, ctx: &TickContext) -> bool {
    let tile = view.tile(x, y);
    let b = &tile.building;
    let services = ctx.growth.services;
    !ctx.disasters_enabled
        && b.is_complete()
        && b.powered == services.powered_at(x, y)
        && b.watered == services.watered_at(x, y)
        && expected_occupancy(b) == (b.population, b.jobs)
        && (tile.pollution - equilibrium(emission(tile))).abs() < QUIESCENT_POLLUTION
}

// ---------------------------------------------------------------------------
// Per-tile update
// ---------------------------------------------------------------------------

fn update_tile<R: Rng + ?Sized>(
    writer: &mut GridWriter,
    x: usize,
    y: usize,
    ctx: &TickContext,
    rng: &mut R,
    scratch: &mut RoadAccessScratch,
) {
    revert_orphaned_stub(writer, x, y);
    refresh_utilities(writer, x, y, ctx.growth.services);

    {
        let b = &mut writer.tile_mut(x, y).building;
        if !b.building_type.is_terrain() {
            advance_construction(b);
        }
    }

    let tile = writer.tile(x, y);
    if tile.is_vacant() && tile.zone.is_zoned() {
        try_spawn(writer, x, y, &ctx.growth, rng, scratch);
    } else if tile.building_type().is_zone_building() {
        evolve_building(writer, x, y, &ctx.growth, rng);
    }

    {
        let b = &mut writer.tile_mut(x, y).building;
        if !b.building_type.is_terrain() {
            update_occupancy(b);
        }
    }

    update_environment(writer, x, y, ctx.growth.services);
    update_fire(writer, x, y, ctx.growth.services, ctx.disasters_enabled, rng);
}

/// A stub whose origin is gone reverts to grass; the zone survives.
fn revert_orphaned_stub(writer: &mut GridWriter, x: usize, y: usize) {
    if writer.tile(x, y).building.is_stub() && writer.resolve_origin(x, y).is_none() {
        writer.set_building(x, y, crate::buildings::Building::new(BuildingType::Grass));
    }
}

fn refresh_utilities(writer: &mut GridWriter, x: usize, y: usize, services: &ServiceCoverage) {
    let b = &writer.tile(x, y).building;
    if b.building_type.is_terrain() {
        return;
    }
    let (powered, watered) = (services.powered_at(x, y), services.watered_at(x, y));
    if b.powered != powered || b.watered != watered {
        let b = &mut writer.tile_mut(x, y).building;
        b.powered = powered;
        b.watered = watered;
    }
}

fn update_environment(writer: &mut GridWriter, x: usize, y: usize, services: &ServiceCoverage) {
    let tile = writer.tile(x, y);
    if tile.building_type() == BuildingType::Water {
        return;
    }
    let pollution = step_pollution(tile.pollution, emission(tile));
    let land_value = step_land_value(
        tile.land_value,
        target_land_value(services.average_at(x, y), pollution),
    );
    if pollution != tile.pollution || land_value != tile.land_value {
        let tile = writer.tile_mut(x, y);
        tile.pollution = pollution;
        tile.land_value = land_value;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::buildings::Building;
    use crate::grid::{Grid, ZoneType};
    use crate::sim_rng::SimRng;

    fn context(services: &ServiceCoverage) -> TickContext<'_> {
        TickContext {
            growth: GrowthContext {
                services,
                demand: Default::default(),
            },
            disasters_enabled: false,
        }
    }

    #[test]
    fn test_quiescent_terrain_is_skipped() {
        let mut w = Grid::new(6).writer();
        w.set_building(1, 0, Building::new(BuildingType::Road));
        w.set_building(2, 0, Building::new(BuildingType::Water));
        w.set_building(3, 0, Building::new(BuildingType::Tree));
        w.tile_mut(4, 0).zone = ZoneType::Residential;
        w.tile_mut(5, 0).pollution = 5.0;
        let grid = w.finish();
        let services = ServiceCoverage::new(6);
        let ctx = context(&services);
        for x in 0..4 {
            assert!(!needs_update(&grid, x, 0, &ctx), "tile {x}");
        }
        assert!(needs_update(&grid, 4, 0, &ctx));
        assert!(needs_update(&grid, 5, 0, &ctx));
    }

    #[test]
    fn test_valid_stub_is_skipped_orphan_is_not() {
        let mut w = Grid::new(6).writer();
        w.stamp_footprint(0, 0, ZoneType::Commercial, Building::new(BuildingType::OfficeLow));
        w.set_building(4, 4, Building::stub((3, 3)));
        let grid = w.finish();
        let services = ServiceCoverage::new(6);
        let ctx = context(&services);
        assert!(!needs_update(&grid, 1, 1, &ctx));
        assert!(needs_update(&grid, 4, 4, &ctx));
    }

    #[test]
    fn test_orphaned_stub_reverts_keeping_zone() {
        let mut w = Grid::new(6).writer();
        w.tile_mut(4, 4).zone = ZoneType::Industrial;
        w.set_building(4, 4, Building::stub((3, 3)));
        let state = GameState::from_grid(w.finish(), "Test", Default::default());
        let next = simulate_tick(&state, &mut SimRng::default(), &mut RoadAccessScratch::new());
        let tile = next.grid.tile(4, 4);
        assert_eq!(tile.building_type(), BuildingType::Grass);
        assert_eq!(tile.zone, ZoneType::Industrial);
    }

    #[test]
    fn test_settled_service_building_is_skipped() {
        let mut w = Grid::new(30).writer();
        let mut tower = Building::new(BuildingType::WaterTower);
        tower.construction_progress = 100.0;
        w.set_building(10, 10, tower);
        let mut state = GameState::from_grid(w.finish(), "Test", Default::default());
        let mut rng = SimRng::default();
        let mut scratch = RoadAccessScratch::new();
        state = simulate_tick(&state, &mut rng, &mut scratch);
        let ctx = context(&state.services);
        assert!(!needs_update(&state.grid, 10, 10, &ctx));
        assert!(state.grid.tile(10, 10).building.watered);
    }

    #[test]
    fn test_tick_does_not_mutate_input_and_shares_rows() {
        let mut state = GameState::blank(12);
        let mut w = state.grid.writer();
        w.tile_mut(3, 7).zone = ZoneType::Residential;
        state.grid = w.finish();
        let before = state.clone();
        let next = simulate_tick(&state, &mut SimRng::default(), &mut RoadAccessScratch::new());
        assert_eq!(state, before);
        assert_eq!(next.tick, 1);
        // Only the zoned row may have been copied.
        for y in (0..12).filter(|&y| y != 7) {
            assert!(next.grid.shares_row_with(&state.grid, y), "row {y}");
        }
    }
}
