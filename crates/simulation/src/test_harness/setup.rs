//! Builder methods that shape the city before ticking.

use crate::buildings::{Building, BuildingType};
use crate::city::City;
use crate::game_actions::{ActionQueue, ActionSource, GameAction};
use crate::game_state::GameState;
use crate::grid::{GridWriter, TileView, ZoneType};
use crate::services::compute_service_coverage;
use crate::sim_rng::SimRng;
use crate::zones::ZoneDemand;

use super::TestCity;

impl TestCity {
    fn edit_state(&mut self, f: impl FnOnce(&mut GameState)) {
        let mut city = self.app.world_mut().resource_mut::<City>();
        f(&mut city.0);
    }

    /// Edit the grid directly, bypassing costs and placement rules, then
    /// refresh service coverage.
    fn edit_grid(&mut self, f: impl FnOnce(&mut GridWriter)) {
        self.edit_state(|state| {
            let mut writer = state.grid.writer();
            f(&mut writer);
            state.grid = writer.finish();
            state.services = compute_service_coverage(&state.grid);
        });
    }

    // -----------------------------------------------------------------------
    // Economy and RNG
    // -----------------------------------------------------------------------

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.app.insert_resource(SimRng::from_seed_u64(seed));
        self
    }

    pub fn with_money(mut self, money: f64) -> Self {
        self.edit_state(|s| s.stats.money = money);
        self
    }

    /// Sets both the operator and the effective rate, skipping the phase-in.
    pub fn with_tax_rate(mut self, rate: f32) -> Self {
        self.edit_state(|s| {
            s.tax_rate = rate;
            s.effective_tax_rate = rate;
        });
        self
    }

    /// Demand seen by the first tick's growth pass.
    pub fn with_demand(mut self, demand: ZoneDemand) -> Self {
        self.edit_state(|s| s.stats.demand = demand);
        self
    }

    pub fn with_disasters(mut self, enabled: bool) -> Self {
        self.edit_state(|s| s.disasters_enabled = enabled);
        self
    }

    // -----------------------------------------------------------------------
    // Grid
    // -----------------------------------------------------------------------

    /// Lay road along an L from `(x0, y0)` to `(x1, y1)`, x first.
    pub fn with_road(mut self, x0: usize, y0: usize, x1: usize, y1: usize) -> Self {
        self.edit_grid(|w| {
            for x in x0.min(x1)..=x0.max(x1) {
                w.set_building(x, y0, Building::new(BuildingType::Road));
                w.tile_mut(x, y0).zone = ZoneType::None;
            }
            for y in y0.min(y1)..=y0.max(y1) {
                w.set_building(x1, y, Building::new(BuildingType::Road));
                w.tile_mut(x1, y).zone = ZoneType::None;
            }
        });
        self
    }

    pub fn with_zone(mut self, x: usize, y: usize, zone: ZoneType) -> Self {
        self.edit_grid(|w| w.tile_mut(x, y).zone = zone);
        self
    }

    /// Zone every grass tile in the inclusive rectangle.
    pub fn with_zone_rect(
        mut self,
        x0: usize,
        y0: usize,
        x1: usize,
        y1: usize,
        zone: ZoneType,
    ) -> Self {
        self.edit_grid(|w| {
            for y in y0..=y1 {
                for x in x0..=x1 {
                    if w.tile(x, y).is_vacant() {
                        w.tile_mut(x, y).zone = zone;
                    }
                }
            }
        });
        self
    }

    /// Stamp a finished building; zone buildings also zone their footprint.
    pub fn with_building(self, x: usize, y: usize, building_type: BuildingType) -> Self {
        let mut b = Building::new(building_type);
        b.construction_progress = 100.0;
        self.with_building_record(x, y, b)
    }

    /// Stamp an arbitrary building record at `(x, y)`.
    pub fn with_building_record(mut self, x: usize, y: usize, building: Building) -> Self {
        let zone = building.building_type.zone().unwrap_or(ZoneType::None);
        self.edit_grid(|w| w.stamp_footprint(x, y, zone, building));
        self
    }

    /// A power plant and a water tower side by side with their origin at
    /// `(x, y)`.
    pub fn with_utilities(self, x: usize, y: usize) -> Self {
        self.with_building(x, y, BuildingType::PowerPlant)
            .with_building(x + 2, y, BuildingType::WaterTower)
    }

    // -----------------------------------------------------------------------
    // Actions
    // -----------------------------------------------------------------------

    /// Queue an editing action for the next tick's PreSim phase.
    pub fn queue_action(&mut self, action: GameAction) {
        let tick = self.state().tick;
        self.app
            .world_mut()
            .resource_mut::<ActionQueue>()
            .push(tick, ActionSource::Script, action);
    }
}
