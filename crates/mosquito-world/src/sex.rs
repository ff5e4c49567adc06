//! Sources of sex assignment for hatching eggs.

use mosquito_core::{Error, LifecycleConfig, Result, Sex};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Decides the sex of each hatching egg
pub trait SexSource {
    fn next_sex(&mut self) -> Sex;
}

impl<S: SexSource + ?Sized> SexSource for &mut S {
    fn next_sex(&mut self) -> Sex {
        (**self).next_sex()
    }
}

/// Seeded random sex assignment
#[derive(Debug, Clone)]
pub struct SeededSex {
    rng: ChaCha8Rng,
    male_ratio: f64,
    seed: u64,
}

impl SeededSex {
    pub fn new(seed: u64, male_ratio: f64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
            male_ratio,
            seed,
        }
    }

    pub fn from_lifecycle(seed: u64, lifecycle: &LifecycleConfig) -> Self {
        Self::new(seed, lifecycle.male_ratio)
    }

    /// Seed drawn from the thread-local generator
    pub fn from_entropy(male_ratio: f64) -> Self {
        Self::new(rand::thread_rng().gen(), male_ratio)
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }
}

impl SexSource for SeededSex {
    fn next_sex(&mut self) -> Sex {
        if self.rng.gen::<f64>() < self.male_ratio {
            Sex::Male
        } else {
            Sex::Female
        }
    }
}

/// Cycles through a fixed sequence of sexes
#[derive(Debug, Clone)]
pub struct ScriptedSex {
    script: Vec<Sex>,
    next: usize,
}

impl ScriptedSex {
    pub fn new(script: Vec<Sex>) -> Result<Self> {
        if script.is_empty() {
            return Err(Error::Validation("sex script must not be empty".to_string()));
        }
        Ok(Self { script, next: 0 })
    }

    /// Male, female, male, female, ...
    pub fn alternating() -> Self {
        Self {
            script: vec![Sex::Male, Sex::Female],
            next: 0,
        }
    }
}

impl SexSource for ScriptedSex {
    fn next_sex(&mut self) -> Sex {
        let sex = self.script[self.next];
        self.next = (self.next + 1) % self.script.len();
        sex
    }
}

/// Every egg hatches as the same sex
#[derive(Debug, Clone, Copy)]
pub struct AlwaysSex(pub Sex);

impl SexSource for AlwaysSex {
    fn next_sex(&mut self) -> Sex {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seeded_is_reproducible() {
        let mut a = SeededSex::new(42, 0.5);
        let mut b = SeededSex::new(42, 0.5);
        let seq_a: Vec<Sex> = (0..64).map(|_| a.next_sex()).collect();
        let seq_b: Vec<Sex> = (0..64).map(|_| b.next_sex()).collect();
        assert_eq!(seq_a, seq_b);
    }

    #[test]
    fn test_seeded_ratio() {
        let mut source = SeededSex::new(7, 0.5);
        let males = (0..10_000)
            .filter(|_| source.next_sex() == Sex::Male)
            .count();
        assert!((4_500..5_500).contains(&males), "males = {}", males);

        let mut all_female = SeededSex::new(7, 0.0);
        assert!((0..100).all(|_| all_female.next_sex() == Sex::Female));
        let mut all_male = SeededSex::new(7, 1.0);
        assert!((0..100).all(|_| all_male.next_sex() == Sex::Male));
    }

    #[test]
    fn test_scripted_cycles() {
        let mut source = ScriptedSex::new(vec![Sex::Female, Sex::Female, Sex::Male]).unwrap();
        let seq: Vec<Sex> = (0..6).map(|_| source.next_sex()).collect();
        assert_eq!(
            seq,
            vec![Sex::Female, Sex::Female, Sex::Male, Sex::Female, Sex::Female, Sex::Male]
        );
    }

    #[test]
    fn test_scripted_rejects_empty_script() {
        let result = ScriptedSex::new(Vec::new());
        assert!(matches!(result, Err(Error::Validation(_))));
    }

    #[test]
    fn test_borrowed_source() {
        fn draw<S: SexSource>(mut source: S) -> Sex {
            source.next_sex()
        }

        let mut source = ScriptedSex::alternating();
        assert_eq!(draw(&mut source), Sex::Male);
        assert_eq!(source.next_sex(), Sex::Female);
        assert_eq!(AlwaysSex(Sex::Male).next_sex(), Sex::Male);
    }
}
