// =============================================================================
// New-game creation: terrain, starting economy and the first history sample.
// =============================================================================

use bevy::prelude::*;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::chart_data::{push_sample, HistorySample};
use crate::config::{
    DEFAULT_GRID_SIZE, DEFAULT_TAX_RATE, LARGE_GRID_SIZE, MAX_GRID_SIZE, MIN_TERRAIN_GRID_SIZE,
    MOBILE_GRID_SIZE,
};
use crate::game_state::{GameMode, GameState};
use crate::sim_rng::DEFAULT_SEED;
use crate::terrain_generation::generate_terrain;

/// Device-class presets for the map edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum GridSizeClass {
    Mobile,
    #[default]
    Desktop,
    Large,
}

impl GridSizeClass {
    pub fn grid_size(self) -> usize {
        match self {
            GridSizeClass::Mobile => MOBILE_GRID_SIZE,
            GridSizeClass::Desktop => DEFAULT_GRID_SIZE,
            GridSizeClass::Large => LARGE_GRID_SIZE,
        }
    }
}

/// Options chosen when starting a new city.
#[derive(Resource, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NewGameConfig {
    pub size: usize,
    /// Player-chosen city name.
    pub city_name: String,
    pub mode: GameMode,
    /// Seed for terrain and every later simulation roll.
    pub seed: u64,
    pub tax_rate: f32,
    pub disasters_enabled: bool,
}

impl Default for NewGameConfig {
    fn default() -> Self {
        Self {
            size: GridSizeClass::default().grid_size(),
            city_name: "New City".to_string(),
            mode: GameMode::Classic,
            seed: DEFAULT_SEED,
            tax_rate: DEFAULT_TAX_RATE,
            disasters_enabled: false,
        }
    }
}

impl NewGameConfig {
    pub fn for_size_class(class: GridSizeClass) -> Self {
        Self {
            size: class.grid_size(),
            ..Self::default()
        }
    }
}

/// Build a fresh city on generated terrain. `size` is clamped to the
/// supported range.
pub fn create_initial_game_state<R: Rng + ?Sized>(
    size: usize,
    city_name: &str,
    mode: GameMode,
    rng: &mut R,
) -> GameState {
    let clamped = size.clamp(MIN_TERRAIN_GRID_SIZE, MAX_GRID_SIZE);
    if clamped != size {
        debug!("Requested grid size {size} clamped to {clamped}");
    }

    let (grid, water_bodies) = generate_terrain(clamped, rng);
    let mut state = GameState::from_grid(grid, city_name, mode);
    state.water_bodies = water_bodies;
    push_sample(
        &mut state.history,
        HistorySample::new(&state.calendar, &state.stats),
    );

    info!(
        "Created city '{}' ({}x{}, {:?}) with {} water bodies",
        state.city_name,
        clamped,
        clamped,
        mode,
        state.water_bodies.len()
    );
    state
}

/// Build a fresh city from a `NewGameConfig`. Callers normally seed `rng`
/// from `config.seed` and keep using it for the ticks that follow.
pub fn create_game_from_config<R: Rng + ?Sized>(
    config: &NewGameConfig,
    rng: &mut R,
) -> GameState {
    let mut state =
        create_initial_game_state(config.size, &config.city_name, config.mode, rng);
    state.tax_rate = config.tax_rate.clamp(0.0, crate::config::MAX_TAX_RATE);
    state.effective_tax_rate = state.tax_rate;
    state.disasters_enabled = config.disasters_enabled;
    state
}
