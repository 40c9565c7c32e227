//! Headless runner that plays a platform scenario and logs where everything
//! ends up.
use std::path::PathBuf;
use std::time::Duration;

use anyhow::{ensure, Context};
use bevy::prelude::*;
use clap::Parser;
use log::info;
use shuttle::{headless_app, init_logging, InvalidPlatform, Scenario, DEFAULT_TIME_STEP};

/// Runs a moving-platform scenario without a window
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Scenario file (JSON)
    #[arg(short, long)]
    scenario: PathBuf,
    /// Number of simulation steps to run, each advancing the clock by `--dt`
    #[arg(short, long, default_value_t = 120)]
    ticks: u32,
    /// Seconds per step
    #[arg(long, default_value_t = DEFAULT_TIME_STEP)]
    dt: f32,
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

fn position_of(app: &App, entity: Entity) -> Option<Vec2> {
    app.world()
        .get::<Transform>(entity)
        .map(|transform| transform.translation.truncate())
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    init_logging(args.verbose);
    ensure!(
        args.dt.is_finite() && args.dt > 0.0,
        "--dt must be a positive number of seconds, got {}",
        args.dt
    );

    let scenario = Scenario::load(&args.scenario)
        .with_context(|| format!("loading {}", args.scenario.display()))?;

    let step = Duration::try_from_secs_f32(args.dt).context("--dt is out of range")?;
    let mut app = headless_app(step);
    let spawned = scenario.spawn(app.world_mut());

    for tick in 1..=args.ticks {
        app.update();
        if let Some(invalid) = app.world().get::<InvalidPlatform>(spawned.platform) {
            anyhow::bail!("platform rejected: {}", invalid.reason);
        }
        if args.verbose {
            info!(
                "tick {tick}: platform at {:?}",
                position_of(&app, spawned.platform)
            );
        }
    }

    info!(
        "platform finished at {:?}",
        position_of(&app, spawned.platform)
    );
    for (index, passenger) in spawned.passengers.iter().enumerate() {
        info!(
            "passenger {index} finished at {:?}",
            position_of(&app, *passenger)
        );
    }
    Ok(())
}
