//! Deterministic tile-grid city simulation.
//!
//! The engine is plain data plus functions: `simulate_tick` maps one
//! `GameState` snapshot to the next, and the editing actions in
//! `game_actions` do the same between ticks. `SimulationPlugin` hosts it in a
//! Bevy app, one tick per `FixedUpdate`.

use bevy::prelude::*;

pub mod advisors;
pub mod budget;
pub mod buildings;
pub mod chart_data;
pub mod city;
pub mod config;
pub mod economy;
pub mod fire;
pub mod game_actions;
pub mod game_state;
pub mod grid;
pub mod land_value;
pub mod pollution;
pub mod road_access;
pub mod services;
pub mod sim_rng;
pub mod simulation_invariants;
pub mod simulation_sets;
pub mod state_hash;
pub mod stats;
pub mod terrain_generation;
pub mod tick;
pub mod time_of_day;
pub mod world_init;
pub mod zones;

#[cfg(any(test, feature = "bench"))]
pub mod test_harness;

pub use city::{City, SimulationControl};
pub use game_state::{GameMode, GameState};
pub use simulation_sets::SimulationSet;
pub use tick::simulate_tick;
pub use world_init::{create_initial_game_state, NewGameConfig};

use road_access::RoadAccessScratch;
use sim_rng::SimRng;

/// Hosts one city. Reads `NewGameConfig` if the app inserted one before
/// adding the plugin; a pre-inserted `City` is kept as is.
pub struct SimulationPlugin;

impl Plugin for SimulationPlugin {
    fn build(&self, app: &mut App) {
        app.configure_sets(
            FixedUpdate,
            (
                SimulationSet::PreSim,
                SimulationSet::Simulation,
                SimulationSet::PostSim,
            )
                .chain(),
        );

        let config = app
            .world()
            .get_resource::<NewGameConfig>()
            .cloned()
            .unwrap_or_default();
        if !app.world().contains_resource::<City>() {
            let mut rng = SimRng::from_seed_u64(config.seed);
            let state = world_init::create_game_from_config(&config, &mut rng);
            app.insert_resource(City(state)).insert_resource(rng);
        }

        app.insert_resource(config)
            .init_resource::<SimRng>()
            .init_resource::<RoadAccessScratch>()
            .init_resource::<SimulationControl>()
            .add_systems(
                FixedUpdate,
                city::advance_city.in_set(SimulationSet::Simulation),
            )
            .add_systems(
                FixedUpdate,
                city::log_city_summary.in_set(SimulationSet::PostSim),
            );

        app.add_plugins((
            game_actions::GameActionsPlugin,
            state_hash::StateHashPlugin,
            simulation_invariants::SimulationInvariantsPlugin,
        ));
    }
}
