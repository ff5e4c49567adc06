//! Population counts and statistics aggregated across runs.

use serde::{Deserialize, Serialize};

/// Headcount summary of an adult population snapshot
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PopulationCounts {
    pub males: usize,
    pub females: usize,
    pub mated_males: usize,
    pub mated_females: usize,
}

impl PopulationCounts {
    pub fn total(&self) -> usize {
        self.males + self.females
    }

    pub fn is_extinct(&self) -> bool {
        self.total() == 0
    }
}

/// Statistics over the final populations of many independent runs
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EnsembleStats {
    pub runs: u32,
    pub mean_males: f64,
    pub mean_females: f64,
    pub mean_total: f64,
    pub min_total: usize,
    pub max_total: usize,
    /// Runs that ended with no adults at all
    pub extinct_runs: u32,
}

impl EnsembleStats {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold one run's final counts into the statistics
    pub fn update(&mut self, counts: &PopulationCounts) {
        let n = self.runs as f64;
        let new_n = n + 1.0;

        // Incremental mean
        self.mean_males = (self.mean_males * n + counts.males as f64) / new_n;
        self.mean_females = (self.mean_females * n + counts.females as f64) / new_n;
        self.mean_total = (self.mean_total * n + counts.total() as f64) / new_n;

        if self.runs == 0 {
            self.min_total = counts.total();
            self.max_total = counts.total();
        } else {
            self.min_total = self.min_total.min(counts.total());
            self.max_total = self.max_total.max(counts.total());
        }

        if counts.is_extinct() {
            self.extinct_runs += 1;
        }

        self.runs += 1;
    }

    /// Share of males across all runs, `None` when no adults were observed
    pub fn male_fraction(&self) -> Option<f64> {
        if self.mean_total > 0.0 {
            Some(self.mean_males / self.mean_total)
        } else {
            None
        }
    }
}

impl<'a> FromIterator<&'a PopulationCounts> for EnsembleStats {
    fn from_iter<I: IntoIterator<Item = &'a PopulationCounts>>(iter: I) -> Self {
        let mut stats = EnsembleStats::new();
        for counts in iter {
            stats.update(counts);
        }
        stats
    }
}
