//! Headless battle runner.
//!
//! Composition root: loads configuration from `.env`, the environment and
//! the command line, builds a [`Simulation`] for the chosen scenario and
//! drives it with a fixed time step until the game ends or the frame limit
//! runs out. Events are reported on stdout; logs go to stderr.
//!
//! ```bash
//! # both factions AI-driven, reproducible
//! tactics --autoplay --seed 7
//!
//! # play the human faction from stdin
//! tactics --scenario demos/ambush.ron
//! ```

mod cli;
mod input;
mod logging;
mod report;
mod scenario;

use anyhow::Result;
use clap::Parser;

use runtime::Simulation;

use crate::cli::Cli;
use crate::input::StdinRelay;
use crate::report::Reporter;

fn main() -> Result<()> {
    // Load .env file if it exists (silently ignore if not found)
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();
    logging::setup_logging()?;

    let mut scenario = scenario::load(cli.scenario.as_deref())?;
    if cli.autoplay {
        scenario = scenario.all_computer();
    }
    let config = cli.runtime_config();

    tracing::info!(
        seed = ?config.seed,
        dt = cli.dt,
        max_frames = cli.max_frames,
        autoplay = cli.autoplay,
        "starting battle"
    );

    let mut sim = Simulation::from_scenario(&scenario, config)?;
    let mut reporter = Reporter::new(&sim);
    let mut relay = StdinRelay::new();
    sim.start();

    while sim.frame() < cli.max_frames && !sim.is_over() {
        reporter.flush(&sim);

        if sim.player().is_some() && sim.is_idle() && sim.arena().can_perform_action() {
            if !relay.prompt(&mut sim)? {
                tracing::info!("input closed; stopping");
                break;
            }
            continue;
        }
        sim.tick(cli.dt);
    }
    reporter.flush(&sim);

    reporter.summary(&sim);
    Ok(())
}
