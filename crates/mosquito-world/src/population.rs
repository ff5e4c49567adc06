//! Adult population snapshot.

use crate::mosquito::{FemaleMosquito, MaleMosquito, Mosquito};
use mosquito_core::{PopulationCounts, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// The adult mosquitos present in a location.
///
/// Order is insertion order; it only matters for pairing during mating.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Population {
    pub males: Vec<MaleMosquito>,
    pub females: Vec<FemaleMosquito>,
}

impl Population {
    pub fn new(males: Vec<MaleMosquito>, females: Vec<FemaleMosquito>) -> Self {
        Self { males, females }
    }

    /// `males` fresh males and `females` fresh females
    pub fn fresh(males: usize, females: usize) -> Self {
        Self {
            males: vec![MaleMosquito::new(); males],
            females: vec![FemaleMosquito::new(); females],
        }
    }

    /// One fresh male and one fresh female
    pub fn pair() -> Self {
        Self::fresh(1, 1)
    }

    pub fn len(&self) -> usize {
        self.males.len() + self.females.len()
    }

    pub fn is_empty(&self) -> bool {
        self.males.is_empty() && self.females.is_empty()
    }

    pub fn counts(&self) -> PopulationCounts {
        PopulationCounts {
            males: self.males.len(),
            females: self.females.len(),
            mated_males: self.males.iter().filter(|m| m.has_mated()).count(),
            mated_females: self.females.iter().filter(|f| f.has_mated()).count(),
        }
    }

    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&contents)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pair() {
        let pop = Population::pair();
        assert_eq!(pop.len(), 2);
        assert_eq!(pop.counts().males, 1);
        assert_eq!(pop.counts().females, 1);
        assert_eq!(pop.counts().mated_males, 0);
    }

    #[test]
    fn test_counts_mated() {
        let pop = Population::new(
            vec![MaleMosquito::mated(0, 1), MaleMosquito::new()],
            vec![FemaleMosquito::mated(0, 1)],
        );
        let counts = pop.counts();
        assert_eq!(counts.mated_males, 1);
        assert_eq!(counts.mated_females, 1);
        assert_eq!(counts.total(), 3);
    }

    #[test]
    fn test_deserialize_with_missing_sex() {
        let pop: Population = serde_json::from_str(r#"{"males": [{}, {"day_mated": 2}]}"#).unwrap();
        assert_eq!(pop.males.len(), 2);
        assert!(pop.females.is_empty());
        assert!(pop.males[1].has_mated());
        assert!(Population::default().is_empty());
    }

    #[test]
    fn test_unknown_fields_are_rejected() {
        let camel = r#"{"males": [{"hasMated": true, "dayMated": 0}], "females": []}"#;
        assert!(serde_json::from_str::<Population>(camel).is_err());
        assert!(serde_json::from_str::<Population>(r#"{"eggs": []}"#).is_err());
        assert!(serde_json::from_str::<FemaleMosquito>(r#"{"timesLayed": 1}"#).is_err());

        let path = std::env::temp_dir().join(format!(
            "mosquito-population-{}.json",
            std::process::id()
        ));
        std::fs::write(&path, camel).unwrap();
        let loaded = Population::from_json_file(&path);
        std::fs::remove_file(&path).unwrap();
        assert!(matches!(loaded, Err(mosquito_core::Error::Serialization(_))));
    }
}
