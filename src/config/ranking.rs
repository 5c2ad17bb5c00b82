//! Ranking configuration module.
//!
//! This module defines how fuzzy queries measure closeness between terms.

use super::ConfigResult;
use super::Validate;
use crate::error::config::ConfigError;
use crate::sequence::distance::DistanceKind;
use serde::{Deserialize, Serialize};

/// Upper bound on the configurable edit distance.
const MAX_EDIT_DISTANCE: usize = 32;

/// Fuzzy ranking configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RankingConfig {
    /// Edit distance algorithm
    pub strategy: DistanceKind,

    /// Default maximum number of edits for fuzzy queries
    pub max_distance: usize,
}

impl Default for RankingConfig {
    fn default() -> Self {
        Self {
            strategy: DistanceKind::default(),
            max_distance: 2,
        }
    }
}

impl Validate for RankingConfig {
    fn validate(&self) -> ConfigResult<()> {
        if self.max_distance > MAX_EDIT_DISTANCE {
            return Err(ConfigError::ValidationError(format!(
                "max_distance must be at most {MAX_EDIT_DISTANCE}, got {}",
                self.max_distance
            )));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        let config = RankingConfig::default();
        assert_eq!(config.strategy, DistanceKind::Levenshtein);
        assert_eq!(config.max_distance, 2);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_max_distance_bound() {
        let config = RankingConfig {
            max_distance: 100,
            ..RankingConfig::default()
        };
        assert!(matches!(config.validate(), Err(ConfigError::ValidationError(_))));
    }
}
