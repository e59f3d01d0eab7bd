/// Land value with no services and no pollution.
pub const BASELINE_LAND_VALUE: f32 = 35.0;
/// Share of the gap to the target closed per tick.
pub const LAND_VALUE_DRIFT: f32 = 0.05;

/// Services raise value, pollution lowers it.
pub fn target_land_value(average_coverage: f32, pollution: f32) -> f32 {
    (BASELINE_LAND_VALUE + average_coverage * 0.4 - pollution * 0.4).clamp(0.0, 100.0)
}

pub fn step_land_value(current: f32, target: f32) -> f32 {
    (current + (target - current) * LAND_VALUE_DRIFT).clamp(0.0, 100.0)
}
