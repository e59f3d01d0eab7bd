use serde::{Deserialize, Serialize};

use crate::budget::BudgetCategory;
use crate::buildings::BuildingType;
use crate::grid::ZoneType;

/// A serializable editing command, applied between ticks.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub enum GameAction {
    PlaceBuilding {
        pos: (usize, usize),
        building_type: BuildingType,
    },
    Zone {
        pos: (usize, usize),
        zone: ZoneType,
    },
    ZoneRect {
        min: (usize, usize),
        max: (usize, usize),
        zone: ZoneType,
    },
    Bulldoze {
        pos: (usize, usize),
    },
    PlaceSubway {
        pos: (usize, usize),
    },
    RemoveSubway {
        pos: (usize, usize),
    },
    SetTaxRate {
        rate: f32,
    },
    SetBudgetFunding {
        category: BudgetCategory,
        funding: f32,
    },
    SetDisasters {
        enabled: bool,
    },
    SetPaused {
        paused: bool,
    },
}
