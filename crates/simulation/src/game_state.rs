use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

use crate::advisors::AdvisorMessage;
use crate::budget::Budget;
use crate::chart_data::HistorySample;
use crate::config::{DEFAULT_TAX_RATE, SANDBOX_STARTING_MONEY, STARTING_MONEY};
use crate::grid::{Grid, TileView};
use crate::services::{compute_service_coverage, ServiceCoverage};
use crate::stats::Stats;
use crate::terrain_generation::WaterBody;
use crate::time_of_day::Calendar;

/// Game mode tag. Sandbox cities start rich and build for free.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum GameMode {
    #[default]
    Classic,
    Sandbox,
}

impl GameMode {
    pub fn starting_money(self) -> f64 {
        match self {
            GameMode::Classic => STARTING_MONEY,
            GameMode::Sandbox => SANDBOX_STARTING_MONEY,
        }
    }

    pub fn charges_for_construction(self) -> bool {
        self == GameMode::Classic
    }
}

/// The complete simulation snapshot. Every engine entry point takes one and
/// returns the next; nothing outside it persists between ticks.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameState {
    pub grid: Grid,
    pub grid_size: usize,
    pub city_name: String,
    pub mode: GameMode,
    pub tick: u64,
    pub calendar: Calendar,
    pub stats: Stats,
    pub budget: Budget,
    pub services: ServiceCoverage,
    pub advisor_messages: Vec<AdvisorMessage>,
    pub history: VecDeque<HistorySample>,
    /// Operator-set rate, percent.
    pub tax_rate: f32,
    /// Rate actually applied; trails `tax_rate`.
    pub effective_tax_rate: f32,
    pub disasters_enabled: bool,
    pub water_bodies: Vec<WaterBody>,
}

impl GameState {
    /// A state around an existing grid, at tick 0 with default economy.
    pub fn from_grid(grid: Grid, city_name: &str, mode: GameMode) -> Self {
        let grid_size = grid.size();
        let services = compute_service_coverage(&grid);
        Self {
            grid,
            grid_size,
            city_name: city_name.to_owned(),
            mode,
            tick: 0,
            calendar: Calendar::from_tick(0),
            stats: Stats {
                money: mode.starting_money(),
                ..Stats::default()
            },
            budget: Budget::default(),
            services,
            advisor_messages: Vec::new(),
            history: VecDeque::new(),
            tax_rate: DEFAULT_TAX_RATE,
            effective_tax_rate: DEFAULT_TAX_RATE,
            disasters_enabled: false,
            water_bodies: Vec::new(),
        }
    }

    /// Flat unzoned grass, no water bodies. Used by tests and scripted setups.
    pub fn blank(size: usize) -> Self {
        Self::from_grid(Grid::new(size), "New City", GameMode::Classic)
    }
}
