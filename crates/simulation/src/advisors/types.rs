use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::grid::GridPos;

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// Categories of city advisors, each monitoring a different domain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AdvisorType {
    Finance,
    Infrastructure,
    Health,
    Education,
    Safety,
    Environment,
    Housing,
}

impl AdvisorType {
    /// Display name for this advisor.
    pub fn name(self) -> &'static str {
        match self {
            AdvisorType::Finance => "Finance",
            AdvisorType::Infrastructure => "Infrastructure",
            AdvisorType::Health => "Health",
            AdvisorType::Education => "Education",
            AdvisorType::Safety => "Safety",
            AdvisorType::Environment => "Environment",
            AdvisorType::Housing => "Housing",
        }
    }
}

/// Unique identifier for each distinct advisor tip. Presentation layers map
/// it to localized text; the engine never formats strings for the player.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TipId {
    PowerShortage,
    WaterShortage,
    BudgetDeficit,
    LowSafety,
    LowHealth,
    LowEducation,
    LowEnvironment,
    HighUnemployment,
    AbandonmentWave,
}

impl TipId {
    /// Stable key for localization tables.
    pub fn key(self) -> &'static str {
        match self {
            TipId::PowerShortage => "advisor.power_shortage",
            TipId::WaterShortage => "advisor.water_shortage",
            TipId::BudgetDeficit => "advisor.budget_deficit",
            TipId::LowSafety => "advisor.low_safety",
            TipId::LowHealth => "advisor.low_health",
            TipId::LowEducation => "advisor.low_education",
            TipId::LowEnvironment => "advisor.low_environment",
            TipId::HighUnemployment => "advisor.high_unemployment",
            TipId::AbandonmentWave => "advisor.abandonment_wave",
        }
    }

    pub fn advisor(self) -> AdvisorType {
        match self {
            TipId::PowerShortage | TipId::WaterShortage => AdvisorType::Infrastructure,
            TipId::BudgetDeficit => AdvisorType::Finance,
            TipId::LowSafety => AdvisorType::Safety,
            TipId::LowHealth => AdvisorType::Health,
            TipId::LowEducation => AdvisorType::Education,
            TipId::LowEnvironment => AdvisorType::Environment,
            TipId::HighUnemployment | TipId::AbandonmentWave => AdvisorType::Housing,
        }
    }
}

/// How far past its threshold a metric is. Ordered, `Critical` highest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Severity {
    Low,
    Medium,
    High,
    Critical,
}

/// A structured advisor message: a tip key plus named numeric parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdvisorMessage {
    pub advisor_type: AdvisorType,
    pub tip_id: TipId,
    pub severity: Severity,
    pub params: BTreeMap<String, f64>,
    /// Representative tile for a "show location" action.
    pub location: Option<GridPos>,
}

impl AdvisorMessage {
    pub fn new(tip_id: TipId, severity: Severity) -> Self {
        Self {
            advisor_type: tip_id.advisor(),
            tip_id,
            severity,
            params: BTreeMap::new(),
            location: None,
        }
    }

    pub fn with_param(mut self, name: &str, value: f64) -> Self {
        self.params.insert(name.to_owned(), value);
        self
    }

    pub fn at(mut self, location: Option<GridPos>) -> Self {
        self.location = location;
        self
    }
}

/// Messages beyond this are dropped, lowest severity first.
pub(crate) const MAX_MESSAGES: usize = 10;

/// Quality scores below this trigger an advisor once the city is populated.
pub(crate) const LOW_SCORE_THRESHOLD: f32 = 40.0;

/// Quality advice is suppressed for hamlets.
pub(crate) const MIN_POPULATION_FOR_QUALITY: u32 = 100;
