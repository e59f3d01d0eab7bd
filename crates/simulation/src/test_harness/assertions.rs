//! Assertion helpers for `TestCity` integration tests.

use crate::buildings::BuildingType;
use crate::grid::ZoneType;
use crate::simulation_invariants::check_grid_invariants;

use super::TestCity;

impl TestCity {
    // -----------------------------------------------------------------------
    // Assertions
    // -----------------------------------------------------------------------

    pub fn assert_building(&self, x: usize, y: usize, expected: BuildingType) {
        let actual = self.tile(x, y).building_type();
        assert_eq!(
            actual, expected,
            "Expected {expected:?} at ({x}, {y}), found {actual:?}"
        );
    }

    pub fn assert_zone(&self, x: usize, y: usize, expected: ZoneType) {
        let actual = self.tile(x, y).zone;
        assert_eq!(
            actual, expected,
            "Expected zone {expected:?} at ({x}, {y}), found {actual:?}"
        );
    }

    pub fn assert_money_above(&self, amount: f64) {
        let money = self.state().stats.money;
        assert!(money > amount, "Expected money > {amount}, got {money}");
    }

    /// Assert the grid currently satisfies every structural invariant.
    pub fn assert_invariants(&self) {
        let violations = check_grid_invariants(&self.state().grid);
        assert!(
            violations.is_empty(),
            "Invariant violations at tick {}: {violations:?}",
            self.state().tick
        );
    }
}
