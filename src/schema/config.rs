//! Walker configuration types.

use serde::{Deserialize, Serialize};

use super::Alphabet;

/// Top-level configuration shared by every search strategy.
///
/// Fixed at construction; a walker never changes its configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WalkerConfig {
    /// Name of the scoring model, copied onto every emitted record.
    pub model_name: String,
    /// Identifier of the target the oracle scores against (e.g. `"Her2"`).
    pub target: String,
    /// Minimum substitutions between parent and child.
    #[serde(default = "default_min_distance")]
    pub min_distance: usize,
    /// Maximum substitutions between parent and child.
    #[serde(default = "default_max_distance")]
    pub max_distance: usize,
    /// Random seed for reproducibility.
    #[serde(default)]
    pub random_seed: Option<u64>,
    /// Symbols used for substitutions.
    #[serde(default)]
    pub alphabet: Alphabet,
    /// Search strategy and its parameters.
    pub method: SearchMethod,
}

impl Default for WalkerConfig {
    fn default() -> Self {
        Self {
            model_name: "random".to_string(),
            target: "target".to_string(),
            min_distance: default_min_distance(),
            max_distance: default_max_distance(),
            random_seed: None,
            alphabet: Alphabet::default(),
            method: SearchMethod::default(),
        }
    }
}

fn default_min_distance() -> usize {
    1
}
fn default_max_distance() -> usize {
    4
}

/// Search strategy selection.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum SearchMethod {
    /// Greedy per-seed local sampling.
    Sampling(SamplingConfig),
    /// Joint-population genetic search without crossover.
    Genetic(GeneticConfig),
}

impl Default for SearchMethod {
    fn default() -> Self {
        Self::Sampling(SamplingConfig::default())
    }
}

/// Greedy sampling parameters.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SamplingConfig {
    /// Distinct mutants to sample per generation before picking the best.
    pub sampling_limit: usize,
    /// Attempts allowed to reach `sampling_limit` distinct mutants.
    pub max_trials: usize,
    /// Minimum number of top mutants carried into the next generation.
    #[serde(default = "default_sampling_parents")]
    pub n_parents: usize,
}

impl Default for SamplingConfig {
    fn default() -> Self {
        Self {
            sampling_limit: 1000,
            max_trials: 10_000,
            n_parents: default_sampling_parents(),
        }
    }
}

fn default_sampling_parents() -> usize {
    10
}

/// Genetic search parameters.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneticConfig {
    /// Size of the top-of-population pool parents are drawn from.
    pub n_possible_parents: usize,
    /// Parents drawn from the pool each generation; each has one child.
    pub n_parents: usize,
}

impl Default for GeneticConfig {
    fn default() -> Self {
        Self {
            n_possible_parents: 20,
            n_parents: 10,
        }
    }
}

impl WalkerConfig {
    /// Method tag copied onto emitted records.
    pub fn method_kind(&self) -> super::MethodKind {
        match self.method {
            SearchMethod::Sampling(_) => super::MethodKind::SimpleSampling,
            SearchMethod::Genetic(_) => super::MethodKind::GeneticAlgorithm,
        }
    }

    /// Validate configuration parameters.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.min_distance == 0 {
            return Err(ConfigError::ZeroMinDistance);
        }
        if self.min_distance > self.max_distance {
            return Err(ConfigError::InvalidDistanceRange {
                min: self.min_distance,
                max: self.max_distance,
            });
        }
        match &self.method {
            SearchMethod::Sampling(sampling) => {
                if sampling.sampling_limit == 0 {
                    return Err(ConfigError::ZeroSamplingLimit);
                }
                if sampling.n_parents == 0 {
                    return Err(ConfigError::ZeroParents);
                }
            }
            SearchMethod::Genetic(genetic) => {
                if genetic.n_parents == 0 {
                    return Err(ConfigError::ZeroParents);
                }
                if genetic.n_parents > genetic.n_possible_parents {
                    return Err(ConfigError::ParentPoolTooSmall {
                        n_parents: genetic.n_parents,
                        pool: genetic.n_possible_parents,
                    });
                }
            }
        }
        Ok(())
    }
}

/// Configuration validation errors.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Alphabet needs at least 2 symbols, got {0}")]
    AlphabetTooSmall(usize),
    #[error("Alphabet symbol {0:?} appears more than once")]
    DuplicateSymbol(char),
    #[error("Minimum mutation distance must be non-zero")]
    ZeroMinDistance,
    #[error("Minimum distance {min} exceeds maximum distance {max}")]
    InvalidDistanceRange { min: usize, max: usize },
    #[error("Sampling limit must be non-zero")]
    ZeroSamplingLimit,
    #[error("Number of parents must be non-zero")]
    ZeroParents,
    #[error("Cannot select {n_parents} parents from a pool of {pool}")]
    ParentPoolTooSmall { n_parents: usize, pool: usize },
    #[error("Generation counts must name at least one generation")]
    EmptyGenerationCounts,
    #[error("Configuration is for {found:?}, not {expected:?}")]
    MethodMismatch {
        expected: super::MethodKind,
        found: super::MethodKind,
    },
}
