//! Core type definitions for the simulation.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Zero-based index of a simulated day. Also used for ages measured in days.
pub type Day = u32;

/// Sex of an adult mosquito
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sex {
    Male,
    Female,
}

impl fmt::Display for Sex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Sex::Male => write!(f, "male"),
            Sex::Female => write!(f, "female"),
        }
    }
}

/// Signed distance `later - earlier` between two day values.
///
/// Ages and day indices are compared directly by the lifecycle rules, and
/// the difference can be negative for mosquitos that hatched mid-run.
pub fn day_delta(later: Day, earlier: Day) -> i64 {
    i64::from(later) - i64::from(earlier)
}
