//! Action executor system: drains the [`ActionQueue`] each fixed-update tick
//! and applies every queued [`GameAction`] to the city, recording results in
//! the [`ActionResultLog`]. `GameActionsPlugin` registers all three.

use bevy::prelude::*;

use crate::city::{City, SimulationControl};
use crate::game_state::GameState;
use crate::SimulationSet;

use super::editing::{
    try_bulldoze_tile, try_place_building, try_place_subway, try_remove_subway,
    try_set_budget_funding, try_set_tax_rate, try_zone_tile, zone_rect,
};
use super::result_log::ActionResultLog;
use super::{ActionError, ActionQueue, ActionResult, GameAction};

// ---------------------------------------------------------------------------
// Plugin
// ---------------------------------------------------------------------------

/// Edits land in PreSim, so the tick that follows in the same schedule run
/// already sees them.
pub struct GameActionsPlugin;

impl Plugin for GameActionsPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<ActionQueue>()
            .init_resource::<ActionResultLog>()
            .add_systems(
                FixedUpdate,
                execute_queued_actions.in_set(SimulationSet::PreSim),
            );
    }
}

// ---------------------------------------------------------------------------
// System
// ---------------------------------------------------------------------------

/// Drains all pending actions from the queue and executes them in order.
pub fn execute_queued_actions(
    mut queue: ResMut<ActionQueue>,
    mut log: ResMut<ActionResultLog>,
    mut city: ResMut<City>,
    mut control: ResMut<SimulationControl>,
) {
    for queued in queue.drain() {
        let result = match queued.action {
            GameAction::SetPaused { paused } => {
                control.paused = paused;
                ActionResult::Success
            }
            ref action => match try_apply_action(&city.0, action) {
                Ok(next) => {
                    city.0 = next;
                    ActionResult::Success
                }
                Err(e) => {
                    debug!("{:?} from {:?} rejected: {e}", queued.action, queued.source);
                    ActionResult::Error(e)
                }
            },
        };
        log.push(queued.action, result);
    }
}

// ---------------------------------------------------------------------------
// Dispatcher
// ---------------------------------------------------------------------------

/// Apply one action to a snapshot. Control-only actions leave it unchanged.
pub fn try_apply_action(state: &GameState, action: &GameAction) -> Result<GameState, ActionError> {
    match *action {
        GameAction::PlaceBuilding {
            pos: (x, y),
            building_type,
        } => try_place_building(state, x, y, building_type),
        GameAction::Zone { pos: (x, y), zone } => try_zone_tile(state, x, y, zone),
        GameAction::ZoneRect { min, max, zone } => {
            let next = zone_rect(state, min, max, zone);
            if next.grid == state.grid {
                Err(ActionError::AlreadyExists)
            } else {
                Ok(next)
            }
        }
        GameAction::Bulldoze { pos: (x, y) } => try_bulldoze_tile(state, x, y),
        GameAction::PlaceSubway { pos: (x, y) } => try_place_subway(state, x, y),
        GameAction::RemoveSubway { pos: (x, y) } => try_remove_subway(state, x, y),
        GameAction::SetTaxRate { rate } => try_set_tax_rate(state, rate),
        GameAction::SetBudgetFunding { category, funding } => {
            try_set_budget_funding(state, category, funding)
        }
        GameAction::SetDisasters { enabled } => {
            let mut next = state.clone();
            next.disasters_enabled = enabled;
            Ok(next)
        }
        GameAction::SetPaused { .. } => Ok(state.clone()),
    }
}

/// Apply one action, returning the unchanged state when it is rejected.
pub fn apply_action(state: &GameState, action: &GameAction) -> GameState {
    try_apply_action(state, action).unwrap_or_else(|e| {
        debug!("{action:?} rejected: {e}");
        state.clone()
    })
}
