//! Block Shooter entry point
//!
//! Runs the simulation headless at a fixed step, with the autopilot at the
//! controls unless `--idle` is given.

use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

use anyhow::{Context, Result};
use clap::Parser;

use block_shooter::Settings;
use block_shooter::autopilot::Autopilot;
use block_shooter::input::{Flow, apply};
use block_shooter::sim::{GameEvent, GameState, Snapshot, advance};
use block_shooter::view::ViewState;

/// Settings file picked up from the working directory when `--config` is absent
const DEFAULT_CONFIG: &str = "block-shooter.json";

#[derive(Parser, Debug)]
#[command(name = "block-shooter")]
#[command(about = "Shoot the black blocks, catch the red and green ones")]
struct Cli {
    /// JSON settings file
    #[arg(long)]
    config: Option<PathBuf>,
    /// RNG seed (overrides the settings file)
    #[arg(long)]
    seed: Option<u64>,
    /// Stop after this many ticks (overrides the settings file)
    #[arg(long)]
    max_ticks: Option<u64>,
    /// Run without the autopilot
    #[arg(long, default_value_t = false)]
    idle: bool,
    /// Print the final snapshot as JSON
    #[arg(long, default_value_t = false)]
    snapshot: bool,
}

fn load_settings(cli: &Cli) -> Result<Settings> {
    let mut settings = match &cli.config {
        Some(path) => Settings::try_load(path)
            .with_context(|| format!("loading --config {}", path.display()))?,
        None if Path::new(DEFAULT_CONFIG).exists() => Settings::load(DEFAULT_CONFIG),
        None => Settings::default(),
    };
    if cli.seed.is_some() {
        settings.seed = cli.seed;
    }
    if let Some(max_ticks) = cli.max_ticks {
        settings.max_ticks = max_ticks;
    }
    if cli.idle {
        settings.autoplay = false;
    }
    Ok(settings)
}

fn clock_seed() -> Result<u64> {
    let now = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .context("system clock is before the unix epoch")?;
    Ok(now.as_nanos() as u64)
}

fn log_event(event: &GameEvent) {
    match event {
        GameEvent::TargetShot {
            target_id,
            color,
            score_delta,
            ..
        } => log::info!("shot {} #{} ({:+})", color.as_str(), target_id, score_delta),
        GameEvent::TargetCaught {
            target_id,
            color,
            bucket,
            score_delta,
        } => log::info!(
            "{:?} bucket caught {} #{} ({:+})",
            bucket,
            color.as_str(),
            target_id,
            score_delta
        ),
        other => log::debug!("{other:?}"),
    }
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    let settings = load_settings(&cli)?;

    let seed = match settings.seed {
        Some(seed) => seed,
        None => clock_seed()?,
    };
    let mut state = GameState::with_tuning(seed, settings.tuning.clone());
    let mut view = ViewState::default();
    let mut autopilot = settings.autoplay.then(Autopilot::new);
    log::info!(
        "Block Shooter starting (seed {}, autoplay {}, max {} ticks)",
        seed,
        settings.autoplay,
        settings.max_ticks
    );

    while state.tick < settings.max_ticks {
        if let Some(pilot) = autopilot.as_mut() {
            for action in pilot.plan(&state) {
                if apply(action, &mut state, &mut view) == Flow::Quit {
                    log::info!("Quit at tick {}", state.tick);
                    return Ok(());
                }
            }
        }
        // advance() starts a fresh buffer, so pick up input events first
        for event in state.drain_events() {
            log_event(&event);
        }

        advance(&mut state);
        for event in state.drain_events() {
            log_event(&event);
        }

        if state.is_terminated() {
            println!("Game Over");
            println!("Total score:{}", state.score);
            break;
        }
    }

    if !state.is_terminated() {
        log::info!(
            "Tick limit reached at {} with score {}",
            state.tick,
            state.score
        );
    }

    if cli.snapshot {
        let json = serde_json::to_string_pretty(&Snapshot::capture(&state))
            .context("serializing final snapshot")?;
        println!("{json}");
    }

    Ok(())
}
