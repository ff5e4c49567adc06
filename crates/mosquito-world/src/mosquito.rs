//! Adult mosquito state and lifecycle rules.

use mosquito_core::{day_delta, Day, LifecycleConfig, Sex};
use serde::{Deserialize, Serialize};

/// State shared by adult mosquitos of either sex.
///
/// Mating state is a single `Option<Day>`, so a mosquito is mated exactly
/// when it has a mating day.
pub trait Mosquito {
    fn sex(&self) -> Sex;

    /// Day the mosquito mated, if it has
    fn day_mated(&self) -> Option<Day>;

    /// Age in days since hatching (or since the run started)
    fn days_lived(&self) -> Day;

    fn is_dead(&self, lifecycle: &LifecycleConfig) -> bool;

    /// Record a mating on `day`. Mosquitos mate only once; later calls are ignored.
    fn mate_on(&mut self, day: Day);

    /// Advance the age by one day
    fn age(&mut self);

    fn has_mated(&self) -> bool {
        self.day_mated().is_some()
    }
}

/// Pair a male and a female on `day`
pub fn mate(male: &mut MaleMosquito, female: &mut FemaleMosquito, day: Day) {
    male.mate_on(day);
    female.mate_on(day);
}

/// A male mosquito
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct MaleMosquito {
    pub day_mated: Option<Day>,
    pub days_lived: Day,
}

impl MaleMosquito {
    pub fn new() -> Self {
        Self::default()
    }

    /// A male that already mated on `day_mated` and has lived `days_lived` days
    pub fn mated(day_mated: Day, days_lived: Day) -> Self {
        Self {
            day_mated: Some(day_mated),
            days_lived,
        }
    }
}

impl Mosquito for MaleMosquito {
    fn sex(&self) -> Sex {
        Sex::Male
    }

    fn day_mated(&self) -> Option<Day> {
        self.day_mated
    }

    fn days_lived(&self) -> Day {
        self.days_lived
    }

    /// Males die once their age exceeds their mating day by more than the
    /// configured window. Age and mating day are compared as-is.
    fn is_dead(&self, lifecycle: &LifecycleConfig) -> bool {
        match self.day_mated {
            Some(mated) => {
                day_delta(self.days_lived, mated) > i64::from(lifecycle.male_days_after_mating)
            }
            None => false,
        }
    }

    fn mate_on(&mut self, day: Day) {
        debug_assert!(self.day_mated.is_none(), "male mated twice");
        if self.day_mated.is_none() {
            self.day_mated = Some(day);
        }
    }

    fn age(&mut self) {
        self.days_lived = self.days_lived.saturating_add(1);
    }
}

/// A female mosquito
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FemaleMosquito {
    pub day_mated: Option<Day>,
    pub days_lived: Day,
    pub times_layed: u32,
    pub last_day_layed: Option<Day>,
}

impl FemaleMosquito {
    pub fn new() -> Self {
        Self::default()
    }

    /// A female that already mated on `day_mated` and has lived `days_lived` days
    pub fn mated(day_mated: Day, days_lived: Day) -> Self {
        Self {
            day_mated: Some(day_mated),
            days_lived,
            ..Default::default()
        }
    }

    /// Whether she lays on `day`: exactly one interval after mating, or
    /// exactly one interval after her previous laying.
    pub fn is_pregnant(&self, day: Day, lifecycle: &LifecycleConfig) -> bool {
        let Some(mated) = self.day_mated else {
            return false;
        };
        let interval = i64::from(lifecycle.laying_interval_days);
        day_delta(day, mated) == interval
            || self
                .last_day_layed
                .is_some_and(|layed| day_delta(day, layed) == interval)
    }

    /// Record a laying event on `day`
    pub fn lay(&mut self, day: Day) {
        self.times_layed += 1;
        self.last_day_layed = Some(day);
    }
}

impl Mosquito for FemaleMosquito {
    fn sex(&self) -> Sex {
        Sex::Female
    }

    fn day_mated(&self) -> Option<Day> {
        self.day_mated
    }

    fn days_lived(&self) -> Day {
        self.days_lived
    }

    fn is_dead(&self, lifecycle: &LifecycleConfig) -> bool {
        self.times_layed >= lifecycle.max_layings
    }

    fn mate_on(&mut self, day: Day) {
        debug_assert!(self.day_mated.is_none(), "female mated twice");
        if self.day_mated.is_none() {
            self.day_mated = Some(day);
        }
    }

    fn age(&mut self) {
        self.days_lived = self.days_lived.saturating_add(1);
    }
}
