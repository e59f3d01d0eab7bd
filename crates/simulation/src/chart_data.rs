//! Quarterly city history for charts.
//!
//! One sample is taken on the first tick of every calendar quarter and kept in
//! a rolling window of `HISTORY_WINDOW` samples.

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

use crate::config::HISTORY_WINDOW;
use crate::stats::Stats;
use crate::time_of_day::{is_quarter_boundary, Calendar};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistorySample {
    pub year: u32,
    pub month: u32,
    pub population: u32,
    pub jobs: u32,
    pub money: f64,
    pub happiness: f32,
}

impl HistorySample {
    pub fn new(calendar: &Calendar, stats: &Stats) -> Self {
        Self {
            year: calendar.year,
            month: calendar.month,
            population: stats.population,
            jobs: stats.jobs,
            money: stats.money,
            happiness: stats.happiness,
        }
    }
}

/// Push a sample, dropping the oldest once the window is full.
pub fn push_sample(history: &mut VecDeque<HistorySample>, sample: HistorySample) {
    while history.len() >= HISTORY_WINDOW {
        history.pop_front();
    }
    history.push_back(sample);
}

/// Sample if `tick` opens a quarter. Returns true if a sample was recorded.
pub fn record_history(
    history: &mut VecDeque<HistorySample>,
    tick: u64,
    calendar: &Calendar,
    stats: &Stats,
) -> bool {
    if !is_quarter_boundary(tick) {
        return false;
    }
    push_sample(history, HistorySample::new(calendar, stats));
    true
}
