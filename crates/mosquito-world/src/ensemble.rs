//! Monte Carlo batches of independent runs.

use crate::population::Population;
use crate::sex::SeededSex;
use crate::simulation::PopulationSimulator;
use mosquito_core::{Day, EnsembleConfig, EnsembleStats, PopulationCounts, Result};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument};

/// Final counts of one run in a batch
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunSummary {
    pub run: usize,
    pub seed: u64,
    pub counts: PopulationCounts,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnsembleResult {
    pub days: Day,
    pub runs: Vec<RunSummary>,
    pub stats: EnsembleStats,
    /// Share of males among surviving adults, `None` if every run went extinct
    pub male_fraction: Option<f64>,
}

/// Runs the same initial population many times with different seeds
pub struct Ensemble {
    simulator: PopulationSimulator,
    config: EnsembleConfig,
}

impl Ensemble {
    pub fn new(simulator: PopulationSimulator, config: EnsembleConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { simulator, config })
    }

    /// Execute every run in parallel. Each run steps its own copy of `initial`.
    #[instrument(skip(self, initial), fields(runs = self.config.runs))]
    pub fn run(&self, initial: &Population, days: Day) -> EnsembleResult {
        info!("Starting ensemble of {} runs over {} days", self.config.runs, days);

        let runs: Vec<RunSummary> = (0..self.config.runs)
            .into_par_iter()
            .map(|run| {
                let seed = self.config.seed_for(run);
                let sex = SeededSex::from_lifecycle(seed, self.simulator.lifecycle());
                let mut sim_run = self.simulator.start(initial, sex).with_log_every(0);
                sim_run.run_for(days);
                let counts = sim_run.into_population().counts();
                debug!(run, seed, males = counts.males, females = counts.females, "Run complete");
                RunSummary { run, seed, counts }
            })
            .collect();

        let stats: EnsembleStats = runs.iter().map(|summary| &summary.counts).collect();
        let male_fraction = stats.male_fraction();

        info!(
            event = "ensemble_summary",
            runs = stats.runs,
            mean_total = stats.mean_total,
            min_total = stats.min_total,
            max_total = stats.max_total,
            extinct_runs = stats.extinct_runs,
            male_fraction = ?male_fraction,
            "Ensemble complete"
        );

        EnsembleResult {
            days,
            runs,
            stats,
            male_fraction,
        }
    }
}
