//! Player and script edits: pure `try_*` actions, the serializable
//! `GameAction` command set, and the queue that applies them between ticks.

pub mod actions;
pub mod blockers;
pub mod editing;
pub mod executor;
pub mod queue;
pub mod result_log;
pub mod results;

pub use actions::*;
pub use blockers::{get_development_blockers, get_development_blockers_with, Blocker};
pub use editing::*;
pub use executor::{apply_action, execute_queued_actions, try_apply_action, GameActionsPlugin};
pub use queue::*;
pub use result_log::ActionResultLog;
pub use results::*;
