//! Eggs and the waiting queue.

use mosquito_core::{Day, LifecycleConfig};
use serde::{Deserialize, Serialize};

/// An egg waiting to hatch
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Egg {
    pub days_waiting: Day,
}

impl Egg {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_ready(&self, lifecycle: &LifecycleConfig) -> bool {
        self.days_waiting == lifecycle.incubation_days
    }
}

/// Eggs waiting to hatch, plus the eggs laid today.
///
/// Eggs laid on a day are staged and join the waiting queue only at the end
/// of that day, so they are neither hatched nor aged on the day they are laid.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EggQueue {
    waiting: Vec<Egg>,
    staged: Vec<Egg>,
}

impl EggQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stage `count` freshly laid eggs
    pub fn stage(&mut self, count: u32) {
        self.staged
            .extend(std::iter::repeat(Egg::new()).take(count as usize));
    }

    /// Remove every ready egg from the waiting queue, returning how many hatched
    pub fn hatch_ready(&mut self, lifecycle: &LifecycleConfig) -> usize {
        let before = self.waiting.len();
        self.waiting.retain(|egg| !egg.is_ready(lifecycle));
        before - self.waiting.len()
    }

    /// Add one day of waiting to every queued egg (staged eggs excluded)
    pub fn age(&mut self) {
        for egg in &mut self.waiting {
            egg.days_waiting += 1;
        }
    }

    /// Move today's staged eggs into the waiting queue
    pub fn merge_staged(&mut self) {
        self.waiting.append(&mut self.staged);
    }

    pub fn waiting(&self) -> &[Egg] {
        &self.waiting
    }

    pub fn len(&self) -> usize {
        self.waiting.len()
    }

    pub fn is_empty(&self) -> bool {
        self.waiting.is_empty()
    }

    pub fn staged_len(&self) -> usize {
        self.staged.len()
    }
}
