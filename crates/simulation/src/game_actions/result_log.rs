//! Ring-buffer log of recently executed game actions and their results.

use std::collections::VecDeque;

use bevy::prelude::*;

use super::{ActionResult, GameAction};

/// Maximum number of entries retained in the ring buffer.
const MAX_ENTRIES: usize = 64;

#[derive(Resource, Debug, Clone, Default)]
pub struct ActionResultLog {
    entries: VecDeque<(GameAction, ActionResult)>,
}

impl ActionResultLog {
    /// Record a new action/result pair, evicting the oldest when full.
    pub fn push(&mut self, action: GameAction, result: ActionResult) {
        if self.entries.len() >= MAX_ENTRIES {
            self.entries.pop_front();
        }
        self.entries.push_back((action, result));
    }

    /// The last `n` entries (or fewer), oldest first.
    pub fn last_n(&self, n: usize) -> impl Iterator<Item = &(GameAction, ActionResult)> {
        self.entries.iter().skip(self.entries.len().saturating_sub(n))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game_actions::ActionError;

    #[test]
    fn push_and_last_n() {
        let mut log = ActionResultLog::default();
        log.push(GameAction::SetPaused { paused: true }, ActionResult::Success);
        log.push(
            GameAction::Bulldoze { pos: (0, 0) },
            ActionResult::Error(ActionError::NothingToBulldoze),
        );

        let last: Vec<_> = log.last_n(1).collect();
        assert_eq!(last.len(), 1);
        assert_eq!(last[0].0, GameAction::Bulldoze { pos: (0, 0) });
        assert_eq!(log.last_n(10).count(), 2);
    }

    #[test]
    fn evicts_oldest_when_full() {
        let mut log = ActionResultLog::default();
        for i in 0..70 {
            log.push(
                GameAction::SetTaxRate { rate: i as f32 },
                ActionResult::Success,
            );
        }
        assert_eq!(log.len(), MAX_ENTRIES);
        let first = log.last_n(MAX_ENTRIES).next().map(|e| e.0.clone());
        assert_eq!(first, Some(GameAction::SetTaxRate { rate: 6.0 }));
    }
}
