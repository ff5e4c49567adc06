//! Mosquito colony simulation engine.
//!
//! This crate implements the day-by-day lifecycle of a mosquito colony:
//! mating, egg laying, hatching, aging and death.

pub mod mosquito;
pub mod egg;
pub mod population;
pub mod sex;
pub mod simulation;
pub mod ensemble;

pub use mosquito::{mate, FemaleMosquito, MaleMosquito, Mosquito};
pub use egg::{Egg, EggQueue};
pub use population::Population;
pub use sex::{AlwaysSex, ScriptedSex, SeededSex, SexSource};
pub use simulation::{
    get_mosquito_population, sample_population, sample_population_with, DayReport,
    PopulationSimulator, SimulationRun, SAMPLE_DAYS,
};
pub use ensemble::{Ensemble, EnsembleResult, RunSummary};
