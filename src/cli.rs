//! ffmedian CLI
//!
//! Commands:
//! - `ffmedian simulate` - Simulate median-win odds for one period
//! - `ffmedian config`   - Show or validate configuration

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use tracing::info;

use crate::config::AppConfig;
use crate::error::{MedianError, Result};
use crate::output::{self, OutputMode};
use crate::report::MedianReport;
use crate::source::SnapshotFile;

#[derive(Parser, Debug)]
#[command(name = "ffmedian")]
#[command(author, version, about = "Fantasy league median-win probability simulator", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Configuration directory
    #[arg(long, global = true, default_value = "config", env = "FFMEDIAN_CONFIG_DIR")]
    pub config_dir: PathBuf,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Simulate median-win probabilities from a league snapshot
    Simulate(SimulateArgs),

    /// Configuration management
    #[command(subcommand)]
    Config(ConfigCommands),
}

#[derive(Args, Debug, Clone)]
pub struct SimulateArgs {
    /// League snapshot JSON file
    #[arg(short, long)]
    pub snapshot: PathBuf,
    /// Period to analyze (default: the league's current period)
    #[arg(short, long)]
    pub period: Option<u32>,
    /// Monte Carlo trials per team
    #[arg(short, long)]
    pub trials: Option<usize>,
    /// Total the median-win percentages sum to (e.g., 600 for a 12-team league)
    #[arg(long)]
    pub target: Option<f64>,
    /// Projection noise as a share of uncertain points (e.g., 0.15 = 15%)
    #[arg(long)]
    pub noise_ratio: Option<f64>,
    /// RNG seed for a reproducible run
    #[arg(long)]
    pub seed: Option<u64>,
    /// Histogram bins for the simulated median distribution
    #[arg(long)]
    pub bins: Option<usize>,
    /// Skip the simulated median distribution
    #[arg(long)]
    pub no_distribution: bool,
    /// Print JSON instead of a table
    #[arg(long)]
    pub json: bool,
}

impl SimulateArgs {
    /// Command-line flags override configured values
    pub fn apply(&self, config: &mut AppConfig) {
        let sim = &mut config.simulation;
        if let Some(trials) = self.trials {
            sim.trials = trials;
        }
        if let Some(target) = self.target {
            sim.target_percent = Some(target);
        }
        if let Some(noise_ratio) = self.noise_ratio {
            sim.noise_ratio = noise_ratio;
        }
        if let Some(seed) = self.seed {
            sim.seed = Some(seed);
        }
        if let Some(bins) = self.bins {
            sim.histogram_bins = bins;
        }
    }
}

/// Configuration-related commands
#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Show the effective configuration as TOML
    Show,
    /// Validate configuration values
    Validate,
}

impl ConfigCommands {
    pub fn run(&self, config: &AppConfig) -> Result<()> {
        match self {
            Self::Show => {
                let rendered = toml::to_string_pretty(config)
                    .map_err(|e| MedianError::Other(e.into()))?;
                println!("{rendered}");
                Ok(())
            }
            Self::Validate => {
                validate(config)?;
                println!("Configuration OK");
                Ok(())
            }
        }
    }
}

fn validate(config: &AppConfig) -> Result<()> {
    config
        .validate()
        .map_err(|errors| MedianError::Validation(errors.join("; ")))
}

pub async fn run_simulate(args: &SimulateArgs, config: &AppConfig) -> Result<()> {
    validate(config)?;

    let seed = config.simulation.seed.unwrap_or_else(rand::random);
    info!(seed, trials = config.simulation.trials, "starting simulation");

    let source = SnapshotFile::new(&args.snapshot);
    let report = MedianReport::generate(
        &source,
        &config.league.estimator(),
        config.simulation.params(!args.no_distribution),
        args.period,
        seed,
    )
    .await?;

    output::print_report(
        &report,
        config.simulation.histogram_bins,
        OutputMode::from_json_flag(args.json),
    )?;
    Ok(())
}
