#![warn(clippy::all, clippy::pedantic)]

use std::thread::sleep;
use std::time::Duration;

use anyhow::Context;
use log::{error, info, warn};
use serde::Serialize;
use stackfall::config::{Config, DriverConfig};
use stackfall::{App, Clock, Command, Phase, SystemClock, Time};

/// Final report printed to stdout.
#[derive(Debug, Serialize)]
struct Summary {
    ticks: u64,
    simulated_secs: f32,
    score: u32,
    lines_cleared: u32,
    pieces_locked: u32,
    phase: Phase,
    locked_cells: usize,
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp(None)
        .format_module_path(false)
        .init();

    info!("Starting stackfall autopilot");

    // Fall back to defaults rather than refusing to run
    if Config::force_reload() {
        info!("Configuration loaded successfully");
    } else {
        error!("Failed to load configuration, using defaults");
        Config::install(Config::default());
    }
    let config = Config::current();
    config.validate().context("configuration rejected")?;

    let mut app = App::new();
    let summary = run_autopilot(&mut app, &config.driver);

    let report = toml::to_string_pretty(&summary).context("failed to render summary")?;
    println!("{report}");
    Ok(())
}

fn run_autopilot(app: &mut App, driver: &DriverConfig) -> Summary {
    let mut rng = match app.rules().seed {
        Some(seed) => fastrand::Rng::with_seed(seed.wrapping_add(1)),
        None => fastrand::Rng::new(),
    };
    let tick = Duration::from_millis(driver.tick_millis);
    let run_for = Duration::try_from_secs_f32(driver.duration_secs).unwrap_or(Duration::MAX);

    let clock = SystemClock::new();
    let mut time = Time::new(&clock);
    let mut simulated = Duration::ZERO;
    let mut ticks = 0u64;

    while simulated < run_for {
        let elapsed = if driver.realtime {
            sleep(tick);
            time.update(&clock);
            time.delta()
        } else {
            tick
        };

        let command = (rng.f32() < driver.command_chance)
            .then(|| Command::ALL[rng.usize(..Command::ALL.len())]);
        app.tick(command, elapsed);

        simulated += elapsed;
        ticks += 1;

        let state = app.state();
        if state.is_game_over() && !app.rules().restart_on_game_over {
            warn!(
                "Game over after {:.1}s with score {}",
                simulated.as_secs_f32(),
                state.score
            );
            break;
        }
    }

    let snapshot = app.snapshot();
    let state = app.state();
    info!(
        "Finished {ticks} ticks, score {}, {} lines",
        state.score, state.lines_cleared
    );
    if driver.realtime {
        info!("Wall clock time: {:.1}s", clock.elapsed().as_secs_f32());
    }

    Summary {
        ticks,
        simulated_secs: simulated.as_secs_f32(),
        score: state.score,
        lines_cleared: state.lines_cleared,
        pieces_locked: state.pieces_locked,
        phase: state.phase,
        locked_cells: snapshot.cells.len(),
    }
}
