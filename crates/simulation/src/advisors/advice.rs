//! Advisor rules, plus the single grid scan they share.

use crate::grid::{Grid, GridPos, TileView};
use crate::stats::Stats;

use super::types::{
    AdvisorMessage, Severity, TipId, LOW_SCORE_THRESHOLD, MIN_POPULATION_FOR_QUALITY,
};

/// Share of the workforce (70% of residents) without a job that triggers advice.
const UNEMPLOYMENT_THRESHOLD: f32 = 0.15;
/// Utility shortfall ratio that triggers advice.
const SHORTAGE_THRESHOLD: f32 = 0.1;
const ABANDONMENT_MIN_COUNT: usize = 3;
const ABANDONMENT_RATIO_THRESHOLD: f32 = 0.05;

// ---------------------------------------------------------------------------
// Grid scan
// ---------------------------------------------------------------------------

/// Counts over zone-building origins.
#[derive(Debug, Clone, Default, PartialEq)]
pub(crate) struct GridScan {
    pub buildings: usize,
    pub unpowered: usize,
    pub unwatered: usize,
    pub abandoned: usize,
    pub first_unpowered: Option<GridPos>,
    pub first_unwatered: Option<GridPos>,
    pub first_abandoned: Option<GridPos>,
}

pub(crate) fn scan_grid(grid: &Grid) -> GridScan {
    let mut scan = GridScan::default();
    for tile in grid.tiles() {
        let b = &tile.building;
        if !b.building_type.is_zone_building() {
            continue;
        }
        let pos = Some((tile.x, tile.y));
        scan.buildings += 1;
        if b.abandoned {
            scan.abandoned += 1;
            scan.first_abandoned = scan.first_abandoned.or(pos);
            continue;
        }
        if !b.powered {
            scan.unpowered += 1;
            scan.first_unpowered = scan.first_unpowered.or(pos);
        }
        if !b.watered {
            scan.unwatered += 1;
            scan.first_unwatered = scan.first_unwatered.or(pos);
        }
    }
    scan
}

// ---------------------------------------------------------------------------
// Severity tiers
// ---------------------------------------------------------------------------

/// Severity for a ratio where higher is worse.
fn ratio_severity(ratio: f32) -> Severity {
    match ratio {
        r if r > 0.75 => Severity::Critical,
        r if r > 0.5 => Severity::High,
        r if r > 0.25 => Severity::Medium,
        _ => Severity::Low,
    }
}

/// Severity for a 0..=100 score where lower is worse.
fn score_severity(score: f32) -> Severity {
    match score {
        s if s < 10.0 => Severity::Critical,
        s if s < 20.0 => Severity::High,
        s if s < 30.0 => Severity::Medium,
        _ => Severity::Low,
    }
}

// ---------------------------------------------------------------------------
// Rules
// ---------------------------------------------------------------------------

pub(crate) fn infrastructure_advice(scan: &GridScan, out: &mut Vec<AdvisorMessage>) {
    let occupied = scan.buildings - scan.abandoned;
    if occupied == 0 {
        return;
    }
    let shortages = [
        (TipId::PowerShortage, scan.unpowered, scan.first_unpowered),
        (TipId::WaterShortage, scan.unwatered, scan.first_unwatered),
    ];
    for (tip, missing, location) in shortages {
        let ratio = missing as f32 / occupied as f32;
        if ratio > SHORTAGE_THRESHOLD {
            out.push(
                AdvisorMessage::new(tip, ratio_severity(ratio))
                    .with_param("ratio", f64::from(ratio))
                    .with_param("buildings", missing as f64)
                    .at(location),
            );
        }
    }
}

pub(crate) fn finance_advice(stats: &Stats, out: &mut Vec<AdvisorMessage>) {
    if stats.expenses <= stats.income {
        return;
    }
    let deficit = stats.expenses - stats.income;
    let share = deficit / stats.expenses;
    let severity = if stats.money < 0.0 {
        Severity::Critical
    } else if share > 0.5 {
        Severity::High
    } else if share > 0.25 {
        Severity::Medium
    } else {
        Severity::Low
    };
    out.push(
        AdvisorMessage::new(TipId::BudgetDeficit, severity)
            .with_param("deficit", deficit)
            .with_param("money", stats.money),
    );
}

pub(crate) fn quality_advice(stats: &Stats, out: &mut Vec<AdvisorMessage>) {
    if stats.population < MIN_POPULATION_FOR_QUALITY {
        return;
    }
    let scores = [
        (TipId::LowSafety, stats.safety),
        (TipId::LowHealth, stats.health),
        (TipId::LowEducation, stats.education),
        (TipId::LowEnvironment, stats.environment),
    ];
    for (tip, score) in scores {
        if score < LOW_SCORE_THRESHOLD {
            out.push(
                AdvisorMessage::new(tip, score_severity(score))
                    .with_param("score", f64::from(score)),
            );
        }
    }
}

pub(crate) fn housing_advice(stats: &Stats, scan: &GridScan, out: &mut Vec<AdvisorMessage>) {
    if stats.population >= MIN_POPULATION_FOR_QUALITY {
        let workforce = stats.population as f32 * 0.7;
        let unemployment = ((workforce - stats.jobs as f32) / workforce).max(0.0);
        if unemployment > UNEMPLOYMENT_THRESHOLD {
            let severity = match unemployment {
                u if u > 0.5 => Severity::Critical,
                u if u > 0.35 => Severity::High,
                u if u > 0.25 => Severity::Medium,
                _ => Severity::Low,
            };
            out.push(
                AdvisorMessage::new(TipId::HighUnemployment, severity)
                    .with_param("rate", f64::from(unemployment)),
            );
        }
    }

    if scan.buildings > 0 && scan.abandoned >= ABANDONMENT_MIN_COUNT {
        let ratio = scan.abandoned as f32 / scan.buildings as f32;
        if ratio > ABANDONMENT_RATIO_THRESHOLD {
            out.push(
                AdvisorMessage::new(TipId::AbandonmentWave, ratio_severity(ratio * 2.0))
                    .with_param("abandoned", scan.abandoned as f64)
                    .with_param("ratio", f64::from(ratio))
                    .at(scan.first_abandoned),
            );
        }
    }
}
