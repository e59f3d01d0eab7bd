use serde::{Deserialize, Serialize};

use crate::config::START_YEAR;

pub const TICKS_PER_DAY: u64 = 30;
pub const DAYS_PER_MONTH: u64 = 30;
pub const MONTHS_PER_YEAR: u64 = 12;
pub const DAYS_PER_WEEK: u64 = 7;
pub const MONTHS_PER_QUARTER: u64 = 3;

pub const TICKS_PER_MONTH: u64 = TICKS_PER_DAY * DAYS_PER_MONTH;
pub const TICKS_PER_WEEK: u64 = TICKS_PER_DAY * DAYS_PER_WEEK;
pub const TICKS_PER_QUARTER: u64 = TICKS_PER_MONTH * MONTHS_PER_QUARTER;

/// In-game date derived from the total tick count.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Calendar {
    pub year: u32,
    /// 1..=12
    pub month: u32,
    /// 1..=30
    pub day: u32,
    /// 0..=23
    pub hour: u32,
}

impl Default for Calendar {
    fn default() -> Self {
        Self::from_tick(0)
    }
}

impl Calendar {
    pub fn from_tick(tick: u64) -> Self {
        let days = tick / TICKS_PER_DAY;
        let months = days / DAYS_PER_MONTH;
        Self {
            year: START_YEAR + (months / MONTHS_PER_YEAR) as u32,
            month: (months % MONTHS_PER_YEAR) as u32 + 1,
            day: (days % DAYS_PER_MONTH) as u32 + 1,
            hour: ((tick % TICKS_PER_DAY) * 24 / TICKS_PER_DAY) as u32,
        }
    }

    /// Quarter of the year, 1..=4.
    pub fn quarter(&self) -> u32 {
        (self.month - 1) / MONTHS_PER_QUARTER as u32 + 1
    }

    pub fn formatted(&self) -> String {
        format!(
            "{:04}-{:02}-{:02} {:02}:00",
            self.year, self.month, self.day, self.hour
        )
    }
}

/// Revenue is collected on the first tick of every in-game week.
pub fn is_week_boundary(tick: u64) -> bool {
    tick > 0 && tick % TICKS_PER_WEEK == 0
}

/// First tick of a calendar quarter (January, April, July, October 1st).
pub fn is_quarter_boundary(tick: u64) -> bool {
    tick % TICKS_PER_QUARTER == 0
}
