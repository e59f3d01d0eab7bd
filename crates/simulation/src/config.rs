/// Default map edge for desktop-class devices.
pub const DEFAULT_GRID_SIZE: usize = 64;
/// Map edge used on phones and other small screens.
pub const MOBILE_GRID_SIZE: usize = 50;
/// Map edge for the "large" option. Upper end of what a tick handles comfortably.
pub const LARGE_GRID_SIZE: usize = 70;
/// Terrain generation needs room for a margin plus two separated lake seeds.
pub const MIN_TERRAIN_GRID_SIZE: usize = 16;
/// Hard cap accepted by `create_initial_game_state`.
pub const MAX_GRID_SIZE: usize = 256;

/// Largest footprint edge in the catalog (airport, amusement park).
pub const MAX_FOOTPRINT: usize = 4;

/// Steps a zoned tile may tunnel through its own zone to find a road.
pub const DEFAULT_ROAD_SEARCH_DISTANCE: usize = 8;

pub const STARTING_MONEY: f64 = 100_000.0;
pub const SANDBOX_STARTING_MONEY: f64 = 10_000_000.0;

/// Operator tax rate (percent) for a fresh city. Demand is neutral at this rate.
pub const DEFAULT_TAX_RATE: f32 = 9.0;
pub const MAX_TAX_RATE: f32 = 100.0;

/// Budget funding slider bounds (percent).
pub const DEFAULT_FUNDING: f32 = 100.0;
pub const MAX_FUNDING: f32 = 150.0;

pub const START_YEAR: u32 = 2024;

/// Rolling window of quarterly history samples kept on the state.
pub const HISTORY_WINDOW: usize = 100;

/// Land value for freshly generated ground.
pub const BASE_LAND_VALUE: f32 = 40.0;
/// Land value stamped onto generated water.
pub const WATER_LAND_VALUE: f32 = 60.0;
/// Extra land value for ground 4-adjacent to water.
pub const COASTAL_LAND_BONUS: f32 = 10.0;
