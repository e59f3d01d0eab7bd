use super::types::Building;

/// Buildings younger than this never abandon.
pub const ABANDON_MIN_AGE: u32 = 30;

/// Demand below which a zone starts shedding buildings.
const LOW_DEMAND: f32 = -20.0;
/// Demand above which abandoned buildings start being cleared.
const CLEAR_MIN_DEMAND: f32 = 10.0;
const MAX_CLEAR_CHANCE: f32 = 0.12;

/// Per-tick abandonment probability for a completed, occupied building.
///
/// Low demand and a missing utility each add pressure; a level-1 building
/// is slightly more fragile, but only when some other pressure exists.
pub fn abandonment_chance(building: &Building, demand: f32) -> f32 {
    let mut chance = 0.0;
    let mut pressures = 0;

    if demand < LOW_DEMAND {
        chance += 0.002 + ((LOW_DEMAND - demand) / 80.0) * 0.01;
        pressures += 1;
    }
    if !(building.powered && building.watered) && !building.building_type.is_starter() {
        chance += 0.004;
        pressures += 1;
    }
    if pressures > 0 && building.level <= 1 {
        chance += 0.001;
    }
    chance
}

/// Per-tick chance that an abandoned building is demolished back to grass.
pub fn clear_chance(demand: f32) -> f32 {
    if demand <= CLEAR_MIN_DEMAND {
        return 0.0;
    }
    ((demand - CLEAR_MIN_DEMAND) / 600.0).min(MAX_CLEAR_CHANCE)
}
