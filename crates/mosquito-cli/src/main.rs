//! Command-line host for the mosquito colony simulator.

mod telemetry;

use anyhow::{Context, Result};
use clap::Parser;
use mosquito_core::{Day, EnsembleConfig, PopulationCounts, SimulationConfig};
use mosquito_world::{DayReport, Ensemble, Population, PopulationSimulator};
use rand::Rng;
use serde::Serialize;
use std::path::PathBuf;
use tracing::{debug, info};

/// Simulates the day-by-day population of a mosquito colony
#[derive(Parser, Debug)]
#[command(name = "mosquito-sim")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Number of days to simulate (default: configured days)
    #[arg(short, long)]
    days: Option<Day>,

    /// Seed for sex assignment (default: configured seed, else random)
    #[arg(short, long)]
    seed: Option<u64>,

    /// Run this many independent seeded runs and report statistics.
    /// Run `i` uses seed `base + i`, where `base` is the seed if given, else random.
    #[arg(short, long)]
    runs: Option<usize>,

    /// JSON simulation config
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// JSON initial population (default: one fresh male and one fresh female)
    #[arg(short, long)]
    population: Option<PathBuf>,

    /// Include one report per simulated day in the output
    #[arg(long)]
    history: bool,

    /// Emit logs as JSON lines
    #[arg(long)]
    json_logs: bool,
}

#[derive(Serialize)]
struct RunOutput {
    days: Day,
    counts: PopulationCounts,
    population: Population,
    #[serde(skip_serializing_if = "Option::is_none")]
    history: Option<Vec<DayReport>>,
}

fn load_config(cli: &Cli) -> Result<SimulationConfig> {
    let mut config = match &cli.config {
        Some(path) => SimulationConfig::from_json_file(path)
            .with_context(|| format!("failed to load config from {}", path.display()))?,
        None => SimulationConfig::default(),
    };
    if let Some(days) = cli.days {
        config.days = days;
    }
    if cli.seed.is_some() {
        config.seed = cli.seed;
    }
    Ok(config)
}

fn load_population(cli: &Cli) -> Result<Population> {
    match &cli.population {
        Some(path) => Population::from_json_file(path)
            .with_context(|| format!("failed to load population from {}", path.display())),
        None => Ok(Population::pair()),
    }
}

fn ensemble_config(runs: usize, seed: Option<u64>) -> EnsembleConfig {
    let base_seed = seed.unwrap_or_else(|| {
        let drawn: u64 = rand::thread_rng().gen();
        info!(base_seed = drawn, "No seed configured, drew an ensemble base seed");
        drawn
    });
    EnsembleConfig { runs, base_seed }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    telemetry::init_telemetry(cli.json_logs)?;

    let config = load_config(&cli)?;
    let initial = load_population(&cli)?;
    let days = config.days;
    debug!(?config, "Loaded configuration");

    info!(
        "Starting simulation: {} males, {} females, {} days",
        initial.males.len(),
        initial.females.len(),
        days
    );

    let simulator = PopulationSimulator::new(config.clone())?;

    let output = if let Some(runs) = cli.runs {
        let ensemble = Ensemble::new(simulator, ensemble_config(runs, config.seed))?;
        serde_json::to_string_pretty(&ensemble.run(&initial, days))?
    } else if cli.history {
        let (population, history) = simulator.run_with_history(&initial, days);
        serde_json::to_string_pretty(&RunOutput {
            days,
            counts: population.counts(),
            population,
            history: Some(history),
        })?
    } else {
        let population = simulator.run_configured(&initial);
        serde_json::to_string_pretty(&RunOutput {
            days,
            counts: population.counts(),
            population,
            history: None,
        })?
    };

    println!("{}", output);
    Ok(())
}
