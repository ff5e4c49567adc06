//! Simulation engine for advancing a colony day by day.

use crate::egg::EggQueue;
use crate::mosquito::{mate, FemaleMosquito, MaleMosquito, Mosquito};
use crate::population::Population;
use crate::sex::{SeededSex, SexSource};
use mosquito_core::{
    Day, Error, LifecycleConfig, PopulationCounts, Result, Sex, SimulationConfig,
};
use serde::{Deserialize, Serialize};
use std::ops::ControlFlow;
use std::time::{Duration, Instant};
use tracing::{debug, event, info, instrument, trace, warn, Level};

/// Horizon of the canonical sample run
pub const SAMPLE_DAYS: Day = 30;

/// What happened on one simulated day
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayReport {
    pub day: Day,
    pub mating_pairs: usize,
    pub laying_females: usize,
    pub eggs_laid: usize,
    pub hatched_males: usize,
    pub hatched_females: usize,
    pub male_deaths: usize,
    pub female_deaths: usize,
    /// Adults alive at the end of the day
    pub counts: PopulationCounts,
    /// Queue length at the end of the day, today's eggs included
    pub eggs_waiting: usize,
}

impl DayReport {
    pub fn hatched(&self) -> usize {
        self.hatched_males + self.hatched_females
    }

    pub fn deaths(&self) -> usize {
        self.male_deaths + self.female_deaths
    }
}

/// A run in progress: the working population, the egg queue and the next day.
pub struct SimulationRun<S> {
    lifecycle: LifecycleConfig,
    population: Population,
    eggs: EggQueue,
    sex: S,
    day: Day,
    log_every: Day,
    total_eggs_laid: u64,
    total_hatched: u64,
    total_deaths: u64,
}

impl<S: SexSource> SimulationRun<S> {
    pub fn new(lifecycle: LifecycleConfig, population: Population, sex: S) -> Self {
        Self {
            lifecycle,
            population,
            eggs: EggQueue::new(),
            sex,
            day: 0,
            log_every: 0,
            total_eggs_laid: 0,
            total_hatched: 0,
            total_deaths: 0,
        }
    }

    pub fn with_log_every(mut self, log_every: Day) -> Self {
        self.log_every = log_every;
        self
    }

    /// Index of the next day to simulate, which is also the number of days done
    pub fn day(&self) -> Day {
        self.day
    }

    pub fn population(&self) -> &Population {
        &self.population
    }

    pub fn eggs(&self) -> &EggQueue {
        &self.eggs
    }

    pub fn into_population(self) -> Population {
        self.population
    }

    /// Simulate `days` consecutive days
    pub fn run_for(&mut self, days: Day) {
        for _ in 0..days {
            self.step();
        }
    }

    /// Log the run summary and hand back the final population
    pub fn finish(self) -> Population {
        self.emit_run_summary();
        self.population
    }

    /// Simulate one day
    pub fn step(&mut self) -> DayReport {
        let day = self.day;
        let mut report = DayReport {
            day,
            ..Default::default()
        };

        // Laying eligibility is read before anyone mates today.
        let pregnant: Vec<usize> = self
            .population
            .females
            .iter()
            .enumerate()
            .filter(|(_, female)| female.is_pregnant(day, &self.lifecycle))
            .map(|(idx, _)| idx)
            .collect();

        report.mating_pairs = self.mate_available(day);

        report.laying_females = pregnant.len();
        report.eggs_laid = self.lay_eggs(day, &pregnant);

        let (hatched_males, hatched_females) = self.hatch_ready();
        report.hatched_males = hatched_males;
        report.hatched_females = hatched_females;

        let (male_deaths, female_deaths) = self.remove_dead();
        report.male_deaths = male_deaths;
        report.female_deaths = female_deaths;

        self.age();
        self.eggs.merge_staged();

        report.counts = self.population.counts();
        report.eggs_waiting = self.eggs.len();

        self.total_eggs_laid += report.eggs_laid as u64;
        self.total_hatched += report.hatched() as u64;
        self.total_deaths += report.deaths() as u64;

        self.emit_day_metrics(&report);
        self.day += 1;
        report
    }

    /// Pair unmated males and females in sequence order
    fn mate_available(&mut self, day: Day) -> usize {
        let population = &mut self.population;
        let available_females = population.females.iter_mut().filter(|f| !f.has_mated());

        let mut pairs = 0;
        for (male, female) in population
            .males
            .iter_mut()
            .filter(|m| !m.has_mated())
            .zip(available_females)
        {
            mate(male, female, day);
            pairs += 1;
        }

        if pairs > 0 {
            trace!(day, pairs, "Mosquitos mated");
        }
        pairs
    }

    fn lay_eggs(&mut self, day: Day, pregnant: &[usize]) -> usize {
        for &idx in pregnant {
            self.population.females[idx].lay(day);
            self.eggs.stage(self.lifecycle.eggs_per_laying);
        }
        pregnant.len() * self.lifecycle.eggs_per_laying as usize
    }

    fn hatch_ready(&mut self) -> (usize, usize) {
        let ready = self.eggs.hatch_ready(&self.lifecycle);
        let mut males = 0;
        for _ in 0..ready {
            match self.sex.next_sex() {
                Sex::Male => {
                    self.population.males.push(MaleMosquito::new());
                    males += 1;
                }
                Sex::Female => self.population.females.push(FemaleMosquito::new()),
            }
        }
        (males, ready - males)
    }

    fn remove_dead(&mut self) -> (usize, usize) {
        let lifecycle = &self.lifecycle;
        (
            retain_living(&mut self.population.males, lifecycle, self.day),
            retain_living(&mut self.population.females, lifecycle, self.day),
        )
    }

    fn age(&mut self) {
        self.population.males.iter_mut().for_each(Mosquito::age);
        self.population.females.iter_mut().for_each(Mosquito::age);
        self.eggs.age();
    }

    fn emit_day_metrics(&self, report: &DayReport) {
        debug!(
            day = report.day,
            males = report.counts.males,
            females = report.counts.females,
            eggs_waiting = report.eggs_waiting,
            mating_pairs = report.mating_pairs,
            eggs_laid = report.eggs_laid,
            hatched = report.hatched(),
            deaths = report.deaths(),
            "Day complete"
        );

        if report.hatched() > 0 {
            event!(
                Level::DEBUG,
                counter_name = "mosquitos_hatched",
                counter_value = report.hatched(),
                day = report.day,
                "Hatch metric"
            );
        }
        if report.deaths() > 0 {
            event!(
                Level::DEBUG,
                counter_name = "mosquito_deaths",
                counter_value = report.deaths(),
                male_deaths = report.male_deaths,
                female_deaths = report.female_deaths,
                day = report.day,
                "Death metric"
            );
        }

        if self.log_every > 0 && report.day % self.log_every == 0 {
            info!(
                "Day {}: {} males, {} females, {} eggs waiting",
                report.day, report.counts.males, report.counts.females, report.eggs_waiting
            );

            event!(
                Level::INFO,
                gauge_name = "population_total",
                gauge_value = report.counts.total(),
                day = report.day,
                "Population gauge"
            );

            event!(
                Level::INFO,
                gauge_name = "eggs_waiting",
                gauge_value = report.eggs_waiting,
                day = report.day,
                "Egg queue gauge"
            );
        }
    }

    fn emit_run_summary(&self) {
        let counts = self.population.counts();
        info!(
            event = "run_summary",
            days = self.day,
            males = counts.males,
            females = counts.females,
            mated_males = counts.mated_males,
            mated_females = counts.mated_females,
            eggs_waiting = self.eggs.len(),
            total_eggs_laid = self.total_eggs_laid,
            total_hatched = self.total_hatched,
            total_deaths = self.total_deaths,
            "Simulation complete"
        );

        if counts.is_extinct() {
            info!(
                event = "colony_extinct",
                days = self.day,
                eggs_waiting = self.eggs.len(),
                "No adult mosquitos remain"
            );
        }
    }
}

/// Drop dead mosquitos, returning how many were removed
fn retain_living<M: Mosquito>(mosquitos: &mut Vec<M>, lifecycle: &LifecycleConfig, day: Day) -> usize {
    let before = mosquitos.len();
    mosquitos.retain(|mosquito| {
        let dead = mosquito.is_dead(lifecycle);
        if dead {
            trace!(
                day,
                sex = %mosquito.sex(),
                days_lived = mosquito.days_lived(),
                day_mated = ?mosquito.day_mated(),
                "Mosquito died"
            );
        }
        !dead
    });
    before - mosquitos.len()
}

/// Runs colony simulations under one configuration.
///
/// The caller's initial population is never touched: every run works on its
/// own deep copy.
#[derive(Debug, Clone, Default)]
pub struct PopulationSimulator {
    config: SimulationConfig,
}

impl PopulationSimulator {
    pub fn new(config: SimulationConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn lifecycle(&self) -> &LifecycleConfig {
        &self.config.lifecycle
    }

    /// Sex source for one run, seeded from the config when a seed is set
    pub fn sex_source(&self) -> SeededSex {
        match self.config.seed {
            Some(seed) => SeededSex::from_lifecycle(seed, &self.config.lifecycle),
            None => {
                let source = SeededSex::from_entropy(self.config.lifecycle.male_ratio);
                debug!(seed = source.seed(), "No seed configured, drew one");
                source
            }
        }
    }

    /// Begin a run on a copy of `initial`
    pub fn start<S: SexSource>(&self, initial: &Population, sex: S) -> SimulationRun<S> {
        SimulationRun::new(self.config.lifecycle.clone(), initial.clone(), sex)
            .with_log_every(self.config.log_every)
    }

    /// Population remaining after `days` days
    #[instrument(skip(self, initial), fields(males = initial.males.len(), females = initial.females.len()))]
    pub fn run(&self, initial: &Population, days: Day) -> Population {
        self.run_with_sex(initial, days, self.sex_source())
    }

    /// Run for the configured number of days
    pub fn run_configured(&self, initial: &Population) -> Population {
        self.run(initial, self.config.days)
    }

    pub fn run_with_sex<S: SexSource>(&self, initial: &Population, days: Day, sex: S) -> Population {
        let mut run = self.start(initial, sex);
        run.run_for(days);
        run.finish()
    }

    /// Like [`run`](Self::run) for day counts from an untyped source.
    /// Negative counts are rejected.
    pub fn run_checked(&self, initial: &Population, days: i64) -> Result<Population> {
        let days = Day::try_from(days).map_err(|_| {
            Error::Validation(format!("days must be between 0 and {}, got {}", Day::MAX, days))
        })?;
        Ok(self.run(initial, days))
    }

    /// Final population plus one report per simulated day
    pub fn run_with_history(&self, initial: &Population, days: Day) -> (Population, Vec<DayReport>) {
        let mut run = self.start(initial, self.sex_source());
        let history: Vec<DayReport> = (0..days).map(|_| run.step()).collect();
        (run.finish(), history)
    }

    /// Run with a day-boundary checkpoint.
    ///
    /// `control` sees every day's report. Breaking before the last day stops
    /// the run with [`Error::Cancelled`] carrying the number of days completed.
    pub fn run_until<S, F>(
        &self,
        initial: &Population,
        days: Day,
        sex: S,
        mut control: F,
    ) -> Result<Population>
    where
        S: SexSource,
        F: FnMut(&DayReport) -> ControlFlow<()>,
    {
        let mut run = self.start(initial, sex);
        while run.day() < days {
            let report = run.step();
            if control(&report).is_break() && run.day() < days {
                warn!(day = run.day(), days, "Run cancelled");
                return Err(Error::Cancelled { day: run.day() });
            }
        }
        Ok(run.finish())
    }

    /// Run with a wall-clock budget, checked between days
    pub fn run_with_deadline(
        &self,
        initial: &Population,
        days: Day,
        budget: Duration,
    ) -> Result<Population> {
        let started = Instant::now();
        self.run_until(initial, days, self.sex_source(), |_| {
            if started.elapsed() > budget {
                ControlFlow::Break(())
            } else {
                ControlFlow::Continue(())
            }
        })
    }
}

/// Adult population after `days` days under the default lifecycle
pub fn get_mosquito_population(initial: &Population, days: Day) -> Population {
    PopulationSimulator::default().run(initial, days)
}

/// One fresh male and one fresh female, run for thirty days
pub fn sample_population() -> Population {
    get_mosquito_population(&Population::pair(), SAMPLE_DAYS)
}

/// The canonical thirty-day run with an explicit sex source
pub fn sample_population_with<S: SexSource>(sex: S) -> Population {
    PopulationSimulator::default().run_with_sex(&Population::pair(), SAMPLE_DAYS, sex)
}
