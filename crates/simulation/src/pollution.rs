use crate::grid::Tile;

/// Share of the previous value kept each tick.
pub const POLLUTION_DECAY: f32 = 0.95;
pub const MAX_POLLUTION: f32 = 100.0;
/// Below this a terrain tile counts as clean and is skipped by the tick.
pub const QUIESCENT_POLLUTION: f32 = 0.01;

/// What the tile's own building emits this tick. Only completed, occupied
/// origins emit; stubs, construction sites and ruins do not.
pub fn emission(tile: &Tile) -> f32 {
    let b = &tile.building;
    if b.is_stub() || b.abandoned || !b.is_complete() {
        return 0.0;
    }
    b.building_type.stats().pollution
}

/// Value a tile with constant `emission` settles at.
pub fn equilibrium(emission: f32) -> f32 {
    emission.clamp(0.0, MAX_POLLUTION)
}

pub fn step_pollution(current: f32, emission: f32) -> f32 {
    (current * POLLUTION_DECAY + emission * (1.0 - POLLUTION_DECAY)).clamp(0.0, MAX_POLLUTION)
}
