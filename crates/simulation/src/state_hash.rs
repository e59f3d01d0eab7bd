//! Deterministic state hashing for replay verification.
//!
//! The hash is computed in a fixed order over:
//!
//! 1. Tick counter
//! 2. Money (f64 → bits)
//! 3. Population
//! 4. Calendar (year, month, day, hour)
//! 5. Tiles in row-major order (zone, building type, level)
//!
//! Float values are converted to their bit representation before hashing.

use std::hash::{Hash, Hasher};

use bevy::prelude::*;

use crate::city::City;
use crate::game_state::GameState;
use crate::SimulationSet;

/// Stores the hash of the city after the most recent tick.
#[derive(Resource, Default, Clone, Debug)]
pub struct StateHash {
    pub tick: u64,
    pub hash: u64,
}

// ---------------------------------------------------------------------------
// FNV-1a hasher (deterministic, no random seed)
// ---------------------------------------------------------------------------

/// Unlike `DefaultHasher`, this is not randomized per process.
struct Fnv1aHasher {
    state: u64,
}

impl Fnv1aHasher {
    const FNV_OFFSET_BASIS: u64 = 0xcbf29ce484222325;
    const FNV_PRIME: u64 = 0x00000100000001B3;

    fn new() -> Self {
        Self {
            state: Self::FNV_OFFSET_BASIS,
        }
    }
}

impl Hasher for Fnv1aHasher {
    fn finish(&self) -> u64 {
        self.state
    }

    fn write(&mut self, bytes: &[u8]) {
        for &byte in bytes {
            self.state ^= byte as u64;
            self.state = self.state.wrapping_mul(Self::FNV_PRIME);
        }
    }
}

// ---------------------------------------------------------------------------
// Public convenience function
// ---------------------------------------------------------------------------

/// Compute a deterministic hash of a city snapshot.
pub fn compute_state_hash(state: &GameState) -> u64 {
    let mut hasher = Fnv1aHasher::new();

    state.tick.hash(&mut hasher);
    state.stats.money.to_bits().hash(&mut hasher);
    state.stats.population.hash(&mut hasher);

    let cal = &state.calendar;
    (cal.year, cal.month, cal.day, cal.hour).hash(&mut hasher);

    for tile in state.grid.tiles() {
        tile.zone.hash(&mut hasher);
        tile.building.building_type.hash(&mut hasher);
        tile.building.level.hash(&mut hasher);
    }

    hasher.finish()
}

// ---------------------------------------------------------------------------
// ECS system
// ---------------------------------------------------------------------------

fn update_state_hash(city: Res<City>, mut state_hash: ResMut<StateHash>) {
    state_hash.tick = city.0.tick;
    state_hash.hash = compute_state_hash(&city.0);
}

pub struct StateHashPlugin;

impl Plugin for StateHashPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<StateHash>().add_systems(
            FixedUpdate,
            update_state_hash.in_set(SimulationSet::PostSim),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::buildings::{Building, BuildingType};
    use crate::grid::ZoneType;

    #[test]
    fn test_fnv1a_different_inputs_differ() {
        let mut h1 = Fnv1aHasher::new();
        let mut h2 = Fnv1aHasher::new();
        1u64.hash(&mut h1);
        2u64.hash(&mut h2);
        assert_ne!(h1.finish(), h2.finish());
    }

    #[test]
    fn test_compute_state_hash_deterministic() {
        let a = GameState::blank(8);
        let b = GameState::blank(8);
        assert_eq!(compute_state_hash(&a), compute_state_hash(&b));
    }

    #[test]
    fn test_compute_state_hash_differs_on_money_and_tiles() {
        let base = GameState::blank(8);
        let h = compute_state_hash(&base);

        let mut richer = base.clone();
        richer.stats.money += 1.0;
        assert_ne!(compute_state_hash(&richer), h);

        let mut zoned = base.clone();
        let mut w = zoned.grid.writer();
        w.tile_mut(3, 3).zone = ZoneType::Commercial;
        zoned.grid = w.finish();
        assert_ne!(compute_state_hash(&zoned), h);

        let mut built = base.clone();
        let mut w = built.grid.writer();
        w.set_building(3, 3, Building::new(BuildingType::Park));
        built.grid = w.finish();
        assert_ne!(compute_state_hash(&built), h);
    }
}
