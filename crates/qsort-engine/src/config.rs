//! Orchestrator configuration surface.

use serde::{Deserialize, Serialize};

use qsort_core::CoreError;

/// The only user-facing configuration contract of the core. `criteria` has
/// no sensible default and must be supplied by the caller.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SortConfig {
    pub criteria: String,
    #[serde(default = "default_elimination_count")]
    pub elimination_count: u32,
    #[serde(default = "default_comparison_rounds")]
    pub comparison_rounds: u32,
    #[serde(default = "default_max_concurrent_requests")]
    pub max_concurrent_requests: u32,
    #[serde(default)]
    pub seed: Option<u64>,
}

fn default_elimination_count() -> u32 {
    2
}

fn default_comparison_rounds() -> u32 {
    2
}

fn default_max_concurrent_requests() -> u32 {
    10
}

impl SortConfig {
    pub fn new(criteria: impl Into<String>) -> Self {
        Self {
            criteria: criteria.into(),
            elimination_count: default_elimination_count(),
            comparison_rounds: default_comparison_rounds(),
            max_concurrent_requests: default_max_concurrent_requests(),
            seed: None,
        }
    }

    /// Overlay `QSORT_*` environment variables onto the defaults.
    /// `criteria` still must be set by the caller; this only adjusts the
    /// numeric knobs and the seed.
    pub fn from_env(criteria: impl Into<String>) -> Self {
        let mut config = Self::new(criteria);

        if let Ok(value) = std::env::var("QSORT_ELIMINATION_COUNT") {
            if let Ok(parsed) = value.parse() {
                config.elimination_count = parsed;
            }
        }
        if let Ok(value) = std::env::var("QSORT_COMPARISON_ROUNDS") {
            if let Ok(parsed) = value.parse() {
                config.comparison_rounds = parsed;
            }
        }
        if let Ok(value) = std::env::var("QSORT_MAX_CONCURRENT_REQUESTS") {
            if let Ok(parsed) = value.parse() {
                config.max_concurrent_requests = parsed;
            }
        }
        if let Ok(value) = std::env::var("QSORT_SEED") {
            if let Ok(parsed) = value.parse() {
                config.seed = Some(parsed);
            }
        }

        config
    }

    pub fn validate(&self) -> Result<(), CoreError> {
        if self.criteria.trim().is_empty() {
            return Err(CoreError::EmptyCriteria);
        }
        if self.elimination_count < 1 {
            return Err(CoreError::InvalidEliminationCount(self.elimination_count));
        }
        if self.comparison_rounds < 1 {
            return Err(CoreError::InvalidComparisonRounds(self.comparison_rounds));
        }
        if self.max_concurrent_requests < 1 {
            return Err(CoreError::InvalidConcurrency(self.max_concurrent_requests));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_the_documented_configuration_surface() {
        let config = SortConfig::new("prose quality");
        assert_eq!(config.elimination_count, 2);
        assert_eq!(config.comparison_rounds, 2);
        assert_eq!(config.max_concurrent_requests, 10);
        assert_eq!(config.seed, None);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn rejects_empty_criteria() {
        let config = SortConfig::new("   ");
        assert_eq!(config.validate().unwrap_err(), CoreError::EmptyCriteria);
    }

    #[test]
    fn rejects_zero_comparison_rounds() {
        let mut config = SortConfig::new("max");
        config.comparison_rounds = 0;
        assert_eq!(
            config.validate().unwrap_err(),
            CoreError::InvalidComparisonRounds(0)
        );
    }
}
