//! Runner settings read from `TILECITY_*` environment variables.
//!
//! | Variable            | Meaning                                   | Default      |
//! |---------------------|-------------------------------------------|--------------|
//! | `TILECITY_SIZE`     | map edge in tiles                         | 64           |
//! | `TILECITY_SEED`     | terrain and simulation seed               | built-in     |
//! | `TILECITY_NAME`     | city name                                 | "New City"   |
//! | `TILECITY_SANDBOX`  | `1` for unlimited money                   | off          |
//! | `TILECITY_TICKS`    | ticks to run before exiting, `0` = forever| 1200         |
//! | `TILECITY_TICK_HZ`  | fixed-update rate                         | 200          |
//! | `TILECITY_DUMP`     | write the final snapshot as JSON here     | none         |

use std::env;
use std::path::PathBuf;
use std::str::FromStr;

use bevy::prelude::*;
use simulation::{GameMode, NewGameConfig};

const DEFAULT_TICKS: u64 = 1_200;
const DEFAULT_TICK_HZ: f64 = 200.0;

#[derive(Resource, Debug, Clone)]
pub struct RunnerSettings {
    /// Stop after this many ticks; `None` runs until killed.
    pub ticks: Option<u64>,
    pub tick_hz: f64,
    pub dump_path: Option<PathBuf>,
}

/// Parse `key`, falling back to `default` with a warning when the value is
/// present but malformed.
fn parse_var<T: FromStr>(key: &str, default: T) -> T {
    match env::var(key) {
        Ok(raw) => raw.trim().parse().unwrap_or_else(|_| {
            warn!("Ignoring {key}={raw:?}: not a valid value");
            default
        }),
        Err(_) => default,
    }
}

pub fn new_game_config_from_env() -> NewGameConfig {
    let defaults = NewGameConfig::default();
    let mode = if parse_var("TILECITY_SANDBOX", 0u8) == 1 {
        GameMode::Sandbox
    } else {
        GameMode::Classic
    };
    NewGameConfig {
        size: parse_var("TILECITY_SIZE", defaults.size),
        seed: parse_var("TILECITY_SEED", defaults.seed),
        city_name: env::var("TILECITY_NAME").unwrap_or(defaults.city_name),
        mode,
        ..defaults
    }
}

pub fn runner_settings_from_env() -> RunnerSettings {
    let ticks = parse_var("TILECITY_TICKS", DEFAULT_TICKS);
    let tick_hz = parse_var("TILECITY_TICK_HZ", DEFAULT_TICK_HZ);
    RunnerSettings {
        ticks: (ticks > 0).then_some(ticks),
        tick_hz: if tick_hz > 0.0 { tick_hz } else { DEFAULT_TICK_HZ },
        dump_path: env::var_os("TILECITY_DUMP").map(PathBuf::from),
    }
}
