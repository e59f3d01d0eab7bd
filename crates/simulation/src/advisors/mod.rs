//! Advisor diagnostics -- derives structured problem signals from `Stats` and
//! one scan of the grid.
//!
//! Split into sub-modules:
//! - `types`: message, tip and severity types plus thresholds
//! - `advice`: the grid scan and the per-domain rules

mod advice;
mod types;

pub use types::{AdvisorMessage, AdvisorType, Severity, TipId};

use crate::grid::Grid;
use crate::stats::Stats;

use advice::{finance_advice, housing_advice, infrastructure_advice, quality_advice, scan_grid};
use types::MAX_MESSAGES;

/// Every triggered advisor message, most severe first.
pub fn generate_advisor_messages(stats: &Stats, grid: &Grid) -> Vec<AdvisorMessage> {
    let scan = scan_grid(grid);
    let mut messages = Vec::new();
    infrastructure_advice(&scan, &mut messages);
    finance_advice(stats, &mut messages);
    quality_advice(stats, &mut messages);
    housing_advice(stats, &scan, &mut messages);

    // Stable: equal severities keep rule order.
    messages.sort_by(|a, b| b.severity.cmp(&a.severity));
    messages.truncate(MAX_MESSAGES);
    messages
}
