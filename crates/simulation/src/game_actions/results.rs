use std::fmt;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub enum ActionResult {
    Success,
    Error(ActionError),
}

impl ActionResult {
    pub fn is_success(&self) -> bool {
        matches!(self, ActionResult::Success)
    }

    pub fn error(&self) -> Option<&ActionError> {
        match self {
            ActionResult::Error(e) => Some(e),
            ActionResult::Success => None,
        }
    }
}

impl<T> From<Result<T, ActionError>> for ActionResult {
    fn from(result: Result<T, ActionError>) -> Self {
        match result {
            Ok(_) => ActionResult::Success,
            Err(e) => ActionResult::Error(e),
        }
    }
}

/// Why an editing action left the state unchanged.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub enum ActionError {
    OutOfBounds,
    InsufficientFunds,
    BlockedByWater,
    BlockedByBuilding,
    /// Terrain types that only terrain generation or bulldozing produce.
    NotPlaceable,
    AlreadyExists,
    NothingToBulldoze,
    NoSubway,
    InvalidParameter(String),
}

impl fmt::Display for ActionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ActionError::OutOfBounds => write!(f, "coordinates outside the map"),
            ActionError::InsufficientFunds => write!(f, "not enough money"),
            ActionError::BlockedByWater => write!(f, "blocked by water"),
            ActionError::BlockedByBuilding => write!(f, "blocked by an existing building"),
            ActionError::NotPlaceable => write!(f, "building type cannot be placed"),
            ActionError::AlreadyExists => write!(f, "already present"),
            ActionError::NothingToBulldoze => write!(f, "nothing to bulldoze"),
            ActionError::NoSubway => write!(f, "no subway on this tile"),
            ActionError::InvalidParameter(p) => write!(f, "invalid parameter: {p}"),
        }
    }
}

impl std::error::Error for ActionError {}
