//! Deterministic simulation ordering via `SystemSet` phases.
//!
//! ```text
//! PreSim  →  Simulation  →  PostSim
//! ```
//!
//! * **PreSim** – apply queued editing actions to the city.
//! * **Simulation** – advance the city by exactly one tick.
//! * **PostSim** – read-only reporting: state hash, invariant checks,
//!   quarterly summaries.

use bevy::prelude::*;

/// Ordered phases for systems running in the `FixedUpdate` schedule.
///
/// Configured as a chain: `PreSim` → `Simulation` → `PostSim`.
#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub enum SimulationSet {
    PreSim,
    Simulation,
    PostSim,
}
