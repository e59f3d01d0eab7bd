//! Headless city runner: generates a map, ticks it at a fixed rate and logs
//! quarterly summaries. See `settings` for the environment knobs.

mod settings;

use std::fs::File;
use std::io::BufWriter;
use std::time::Duration;

use bevy::app::ScheduleRunnerPlugin;
use bevy::log::LogPlugin;
use bevy::prelude::*;

use simulation::City;
use settings::{new_game_config_from_env, runner_settings_from_env, RunnerSettings};

fn main() -> AppExit {
    let mut app = App::new();
    app.add_plugins((
        MinimalPlugins.set(ScheduleRunnerPlugin::run_loop(Duration::ZERO)),
        LogPlugin::default(),
    ));

    // Read after LogPlugin so malformed values are reported.
    let config = new_game_config_from_env();
    let settings = runner_settings_from_env();

    app.insert_resource(Time::<Fixed>::from_hz(settings.tick_hz))
        .insert_resource(config)
        .insert_resource(settings)
        .add_plugins(simulation::SimulationPlugin)
        .add_systems(Update, stop_after_tick_limit);

    app.run()
}

/// Exits once the configured number of ticks has run, writing the final
/// snapshot first if a dump path was given.
fn stop_after_tick_limit(
    settings: Res<RunnerSettings>,
    city: Res<City>,
    mut exit: EventWriter<AppExit>,
) {
    let Some(limit) = settings.ticks else {
        return;
    };
    if city.0.tick < limit {
        return;
    }

    info!(
        "Stopping {} after {} ticks: pop {} money {:.0}",
        city.0.city_name, city.0.tick, city.0.stats.population, city.0.stats.money
    );
    if let Some(path) = &settings.dump_path {
        match write_snapshot(path, &city.0) {
            Ok(()) => info!("Wrote snapshot to {}", path.display()),
            Err(e) => error!("Failed to write snapshot to {}: {e}", path.display()),
        }
    }
    exit.send(AppExit::Success);
}

fn write_snapshot(
    path: &std::path::Path,
    state: &simulation::GameState,
) -> Result<(), Box<dyn std::error::Error>> {
    let writer = BufWriter::new(File::create(path)?);
    serde_json::to_writer_pretty(writer, state)?;
    Ok(())
}
