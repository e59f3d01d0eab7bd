//! # TestCity: headless integration test harness
//!
//! Provides a fluent builder that wraps `bevy::app::App` + `SimulationPlugin`
//! for running integration tests without a window or renderer.

mod assertions;
mod queries;
mod setup;

use bevy::app::App;
use bevy::prelude::*;

use crate::city::City;
use crate::game_state::GameState;
use crate::sim_rng::{SimRng, DEFAULT_SEED};
use crate::SimulationPlugin;

/// A headless Bevy App wrapping `SimulationPlugin` for integration testing.
///
/// Use builder methods to set up city state, then call `tick()` to advance the
/// simulation and query/assert on the resulting `City`.
pub struct TestCity {
    app: App,
}

impl TestCity {
    // -----------------------------------------------------------------------
    // Constructors
    // -----------------------------------------------------------------------

    /// Create a new **empty** city: a `size`x`size` unzoned grass grid with
    /// default economy. No terrain is generated.
    pub fn new(size: usize) -> Self {
        Self::from_state(GameState::blank(size))
    }

    /// Host an existing snapshot.
    pub fn from_state(state: GameState) -> Self {
        let mut app = App::new();
        app.add_plugins(MinimalPlugins);

        // Inserted BEFORE SimulationPlugin so it does not generate a map.
        app.insert_resource(City(state));
        app.insert_resource(SimRng::from_seed_u64(DEFAULT_SEED));
        app.add_plugins(SimulationPlugin);

        Self { app }
    }

    /// Create a city on generated terrain, exactly as the plugin would.
    pub fn generated(config: crate::NewGameConfig) -> Self {
        let mut app = App::new();
        app.add_plugins(MinimalPlugins);
        app.insert_resource(config);
        app.add_plugins(SimulationPlugin);
        Self { app }
    }
}

impl Default for TestCity {
    fn default() -> Self {
        Self::new(crate::config::DEFAULT_GRID_SIZE)
    }
}
