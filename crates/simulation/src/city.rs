//! ECS hosting for the pure engine: the `City` resource and the systems that
//! advance and report on it.

use bevy::prelude::*;

use crate::game_state::GameState;
use crate::road_access::RoadAccessScratch;
use crate::sim_rng::SimRng;
use crate::state_hash::compute_state_hash;
use crate::tick::simulate_tick;
use crate::time_of_day::is_quarter_boundary;

/// The live city snapshot.
#[derive(Resource, Debug, Clone, PartialEq)]
pub struct City(pub GameState);

/// Runner-level switches that are not part of the simulated state.
#[derive(Resource, Debug, Clone, Default)]
pub struct SimulationControl {
    pub paused: bool,
}

/// Replaces the city with the next tick's snapshot.
pub fn advance_city(
    control: Res<SimulationControl>,
    mut city: ResMut<City>,
    mut rng: ResMut<SimRng>,
    mut scratch: ResMut<RoadAccessScratch>,
) {
    if control.paused {
        return;
    }
    let next = simulate_tick(&city.0, &mut *rng, &mut scratch);
    city.0 = next;
}

/// Logs a one-line summary at each quarter boundary.
pub fn log_city_summary(city: Res<City>) {
    let state = &city.0;
    if state.tick == 0 || !is_quarter_boundary(state.tick) {
        return;
    }
    info!(
        "{} {}: pop {} jobs {} money {:.0} happiness {:.1} demand R{:.0}/C{:.0}/I{:.0} hash {:016x}",
        state.city_name,
        state.calendar.formatted(),
        state.stats.population,
        state.stats.jobs,
        state.stats.money,
        state.stats.happiness,
        state.stats.demand.residential,
        state.stats.demand.commercial,
        state.stats.demand.industrial,
        compute_state_hash(state),
    );
}
