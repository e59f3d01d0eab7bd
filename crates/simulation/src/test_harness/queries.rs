//! Query and simulation-tick methods for `TestCity`.

use bevy::prelude::*;

use crate::buildings::BuildingType;
use crate::city::City;
use crate::game_state::GameState;
use crate::grid::{Tile, TileView};

use super::TestCity;

impl TestCity {
    // -----------------------------------------------------------------------
    // Simulation
    // -----------------------------------------------------------------------

    /// Run N fixed-update ticks by directly executing the `FixedUpdate`
    /// schedule. This bypasses Bevy's time system entirely.
    pub fn tick(&mut self, n: u32) {
        for _ in 0..n {
            self.app.world_mut().run_schedule(FixedUpdate);
        }
    }

    /// Tick until `done` holds or `max` ticks have run. Returns the number of
    /// ticks taken, or `None` if the condition never held.
    pub fn tick_until(
        &mut self,
        max: u32,
        mut done: impl FnMut(&GameState) -> bool,
    ) -> Option<u32> {
        for n in 0..max {
            if done(self.state()) {
                return Some(n);
            }
            self.tick(1);
        }
        done(self.state()).then_some(max)
    }

    // -----------------------------------------------------------------------
    // Queries
    // -----------------------------------------------------------------------

    pub fn world_mut(&mut self) -> &mut World {
        self.app.world_mut()
    }

    pub fn resource<T: Resource>(&self) -> &T {
        self.app.world().resource::<T>()
    }

    pub fn state(&self) -> &GameState {
        &self.resource::<City>().0
    }

    pub fn tile(&self, x: usize, y: usize) -> &Tile {
        self.state().grid.tile(x, y)
    }

    /// Count of building origins of the given type.
    pub fn count_type(&self, building_type: BuildingType) -> usize {
        self.state()
            .grid
            .tiles()
            .filter(|t| t.building_type() == building_type)
            .count()
    }

    /// Count of zone-building origins, any type.
    pub fn zone_building_count(&self) -> usize {
        self.state()
            .grid
            .tiles()
            .filter(|t| t.building_type().is_zone_building())
            .count()
    }
}
