use super::types::{Building, BuildingType};

/// Share of catalog capacity a fully served building actually fills.
pub const OCCUPANCY_FACTOR: f32 = 0.8;

/// Progress per tick. Larger footprints build more slowly.
pub fn construction_rate(building_type: BuildingType) -> f32 {
    10.0 / (building_type.area() as f32).sqrt()
}

/// Construction needs power and water unless the building is a utility
/// or a starter.
pub fn can_construct(building: &Building) -> bool {
    let t = building.building_type;
    (building.powered && building.watered) || t.is_utility() || t.is_starter()
}

/// Advance construction by one tick. Returns true on the tick it completes.
pub fn advance_construction(building: &mut Building) -> bool {
    if building.is_complete() || !can_construct(building) {
        return false;
    }
    building.construction_progress =
        (building.construction_progress + construction_rate(building.building_type)).min(100.0);
    building.is_complete()
}

/// 1.0 with both utilities, 0.5 for a starter missing one, 0.0 otherwise.
pub fn utility_efficiency(building: &Building) -> f32 {
    if building.powered && building.watered {
        1.0
    } else if building.building_type.is_starter() {
        0.5
    } else {
        0.0
    }
}

/// `(population, jobs)` the building should hold right now.
pub fn expected_occupancy(building: &Building) -> (u32, u32) {
    if building.is_stub() || building.abandoned || !building.is_complete() {
        return (0, 0);
    }
    let stats = building.building_type.stats();
    let scale = f32::from(building.level.max(1)) * utility_efficiency(building) * OCCUPANCY_FACTOR;
    (
        (stats.max_population as f32 * scale).floor() as u32,
        (stats.max_jobs as f32 * scale).floor() as u32,
    )
}

pub fn update_occupancy(building: &mut Building) {
    let (population, jobs) = expected_occupancy(building);
    building.population = population;
    building.jobs = jobs;
}
