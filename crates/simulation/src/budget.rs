use serde::{Deserialize, Serialize};

use crate::buildings::BuildingType;
use crate::config::{DEFAULT_FUNDING, MAX_FUNDING};
use crate::grid::Grid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BudgetCategory {
    Police,
    Fire,
    Health,
    Education,
    Transportation,
    Parks,
    Power,
    Water,
}

impl BudgetCategory {
    pub const ALL: [BudgetCategory; 8] = [
        BudgetCategory::Police,
        BudgetCategory::Fire,
        BudgetCategory::Health,
        BudgetCategory::Education,
        BudgetCategory::Transportation,
        BudgetCategory::Parks,
        BudgetCategory::Power,
        BudgetCategory::Water,
    ];

    pub fn name(self) -> &'static str {
        match self {
            BudgetCategory::Police => "Police",
            BudgetCategory::Fire => "Fire",
            BudgetCategory::Health => "Health",
            BudgetCategory::Education => "Education",
            BudgetCategory::Transportation => "Transportation",
            BudgetCategory::Parks => "Parks",
            BudgetCategory::Power => "Power",
            BudgetCategory::Water => "Water",
        }
    }
}

/// Monthly upkeep per building, and the category it is billed to.
pub fn upkeep(building_type: BuildingType) -> Option<(BudgetCategory, f64)> {
    use BuildingType::*;
    let entry = match building_type {
        PoliceStation => (BudgetCategory::Police, 50.0),
        FireStation => (BudgetCategory::Fire, 50.0),
        Hospital => (BudgetCategory::Health, 100.0),
        School => (BudgetCategory::Education, 30.0),
        University => (BudgetCategory::Education, 100.0),
        Road => (BudgetCategory::Transportation, 2.0),
        Rail => (BudgetCategory::Transportation, 3.0),
        SubwayStation | RailStation => (BudgetCategory::Transportation, 40.0),
        Park => (BudgetCategory::Parks, 10.0),
        ParkLarge => (BudgetCategory::Parks, 25.0),
        PowerPlant => (BudgetCategory::Power, 150.0),
        WaterTower => (BudgetCategory::Water, 75.0),
        _ => return None,
    };
    Some(entry)
}

/// Upkeep for a subway line under one tile.
pub const SUBWAY_TILE_UPKEEP: f64 = 4.0;
/// Upkeep for rail laid over a road.
pub const RAIL_OVERLAY_UPKEEP: f64 = 3.0;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BudgetEntry {
    /// Percent, `0..=MAX_FUNDING`.
    pub funding: f32,
    /// Monthly cost at 100% funding, recomputed every tick.
    pub cost: f64,
}

impl Default for BudgetEntry {
    fn default() -> Self {
        Self {
            funding: DEFAULT_FUNDING,
            cost: 0.0,
        }
    }
}

impl BudgetEntry {
    pub fn spending(&self) -> f64 {
        self.cost * f64::from(self.funding) / 100.0
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Budget {
    pub police: BudgetEntry,
    pub fire: BudgetEntry,
    pub health: BudgetEntry,
    pub education: BudgetEntry,
    pub transportation: BudgetEntry,
    pub parks: BudgetEntry,
    pub power: BudgetEntry,
    pub water: BudgetEntry,
}

impl Budget {
    pub fn get(&self, category: BudgetCategory) -> &BudgetEntry {
        match category {
            BudgetCategory::Police => &self.police,
            BudgetCategory::Fire => &self.fire,
            BudgetCategory::Health => &self.health,
            BudgetCategory::Education => &self.education,
            BudgetCategory::Transportation => &self.transportation,
            BudgetCategory::Parks => &self.parks,
            BudgetCategory::Power => &self.power,
            BudgetCategory::Water => &self.water,
        }
    }

    pub fn get_mut(&mut self, category: BudgetCategory) -> &mut BudgetEntry {
        match category {
            BudgetCategory::Police => &mut self.police,
            BudgetCategory::Fire => &mut self.fire,
            BudgetCategory::Health => &mut self.health,
            BudgetCategory::Education => &mut self.education,
            BudgetCategory::Transportation => &mut self.transportation,
            BudgetCategory::Parks => &mut self.parks,
            BudgetCategory::Power => &mut self.power,
            BudgetCategory::Water => &mut self.water,
        }
    }

    pub fn set_funding(&mut self, category: BudgetCategory, funding: f32) {
        self.get_mut(category).funding = funding.clamp(0.0, MAX_FUNDING);
    }

    /// Sum of `cost * funding / 100` over all categories.
    pub fn total_expenses(&self) -> f64 {
        BudgetCategory::ALL
            .iter()
            .map(|&c| self.get(c).spending())
            .sum()
    }
}

/// Recompute every category's cost from live building counts, keeping the
/// operator's funding levels from `previous`.
pub fn compute_budget(grid: &Grid, previous: &Budget) -> Budget {
    let mut budget = previous.clone();
    for category in BudgetCategory::ALL {
        budget.get_mut(category).cost = 0.0;
    }
    for tile in grid.tiles() {
        if let Some((category, cost)) = upkeep(tile.building_type()) {
            budget.get_mut(category).cost += cost;
        }
        if tile.has_subway {
            budget.transportation.cost += SUBWAY_TILE_UPKEEP;
        }
        if tile.has_rail_overlay {
            budget.transportation.cost += RAIL_OVERLAY_UPKEEP;
        }
    }
    budget
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::buildings::Building;
    use crate::grid::ZoneType;

    #[test]
    fn test_default_budget_is_fully_funded_and_free() {
        let budget = Budget::default();
        for c in BudgetCategory::ALL {
            assert_eq!(budget.get(c).funding, 100.0);
            assert_eq!(budget.get(c).cost, 0.0);
        }
        assert_eq!(budget.total_expenses(), 0.0);
    }

    #[test]
    fn test_costs_follow_building_counts() {
        let mut w = Grid::new(10).writer();
        w.stamp_footprint(0, 0, ZoneType::None, Building::new(BuildingType::PoliceStation));
        w.stamp_footprint(1, 0, ZoneType::None, Building::new(BuildingType::PoliceStation));
        w.stamp_footprint(4, 4, ZoneType::None, Building::new(BuildingType::Hospital));
        for x in 0..10 {
            w.set_building(x, 9, Building::new(BuildingType::Road));
        }
        w.tile_mut(5, 5).has_subway = true;
        let budget = compute_budget(&w.finish(), &Budget::default());
        assert_eq!(budget.police.cost, 100.0);
        // The 2x2 hospital is billed once, at its origin.
        assert_eq!(budget.health.cost, 100.0);
        assert_eq!(budget.transportation.cost, 10.0 * 2.0 + 4.0);
        assert_eq!(budget.total_expenses(), 224.0);
    }

    #[test]
    fn test_funding_scales_expenses_and_survives_recompute() {
        let mut w = Grid::new(4).writer();
        w.set_building(0, 0, Building::new(BuildingType::PowerPlant));
        let grid = w.finish();
        let mut previous = Budget::default();
        previous.set_funding(BudgetCategory::Power, 50.0);
        let budget = compute_budget(&grid, &previous);
        assert_eq!(budget.power.funding, 50.0);
        assert_eq!(budget.total_expenses(), 75.0);
    }

    #[test]
    fn test_funding_is_clamped() {
        let mut budget = Budget::default();
        budget.set_funding(BudgetCategory::Parks, 500.0);
        assert_eq!(budget.parks.funding, MAX_FUNDING);
        budget.set_funding(BudgetCategory::Parks, -5.0);
        assert_eq!(budget.parks.funding, 0.0);
    }
}
