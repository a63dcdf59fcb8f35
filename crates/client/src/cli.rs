use std::path::PathBuf;

use clap::Parser;

use runtime::RuntimeConfig;

/// Turn-based tactics battle runner
#[derive(Parser, Debug)]
#[command(name = "tactics")]
#[command(about = "Runs a tactics battle headlessly", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Seed for AI tie-breaks (overrides TACTICS_SEED)
    #[arg(long)]
    pub seed: Option<u64>,

    /// Seconds simulated per frame
    #[arg(long, default_value_t = 1.0 / 60.0)]
    pub dt: f32,

    /// Stop after this many frames even without a winner
    #[arg(long, default_value_t = 100_000)]
    pub max_frames: u64,

    /// RON scenario file (defaults to the built-in skirmish)
    #[arg(long)]
    pub scenario: Option<PathBuf>,

    /// Let the AI drive every faction
    #[arg(long)]
    pub autoplay: bool,
}

impl Cli {
    /// Environment configuration with command-line overrides applied.
    pub fn runtime_config(&self) -> RuntimeConfig {
        let config = RuntimeConfig::from_env();
        match self.seed {
            Some(seed) => config.with_seed(seed),
            None => config,
        }
    }
}
