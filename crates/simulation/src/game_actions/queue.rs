use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use super::GameAction;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ActionSource {
    Player,
    Script,
    Replay,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QueuedAction {
    pub tick: u64,
    pub source: ActionSource,
    pub action: GameAction,
}

/// Actions waiting for the next `PreSim` phase, applied in FIFO order.
#[derive(Resource, Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ActionQueue {
    pending: Vec<QueuedAction>,
}

impl ActionQueue {
    pub fn push(&mut self, tick: u64, source: ActionSource, action: GameAction) {
        self.pending.push(QueuedAction {
            tick,
            source,
            action,
        });
    }

    pub fn drain(&mut self) -> Vec<QueuedAction> {
        self.pending.drain(..).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }
}
