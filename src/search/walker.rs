//! The walker interface and strategy selection.

use std::collections::BTreeMap;

use crate::schema::{ConfigError, SearchMethod, WalkerConfig};

use super::{
    ChoiceEmitter, Emitter, GeneticWalker, SamplingWalker, ScoringOracle, WalkerError,
};

/// Generation index mapped to the number of records to accept there.
pub type GenerationCounts = BTreeMap<usize, usize>;

/// A search strategy that walks from seeds to better-scoring mutants.
pub trait Walker {
    type Record;

    /// Run the search and return the accepted records of every generation.
    ///
    /// Generations `0..=max(generation_counts)` are run; generations missing
    /// from the map still run but accept nothing.
    fn generate_mutants(
        &mut self,
        seeds: &[String],
        generation_counts: &GenerationCounts,
    ) -> Result<Vec<Self::Record>, WalkerError>;
}

/// Last generation to run, or an error when nothing was requested.
pub(crate) fn last_generation(generation_counts: &GenerationCounts) -> Result<usize, WalkerError> {
    generation_counts
        .keys()
        .next_back()
        .copied()
        .ok_or(WalkerError::Configuration(ConfigError::EmptyGenerationCounts))
}

/// Walker whose strategy is picked from configuration.
pub enum SearchWalker<E: Emitter = ChoiceEmitter> {
    Sampling(SamplingWalker<E>),
    Genetic(GeneticWalker<E>),
}

impl SearchWalker {
    /// Build the walker named by `config.method`, emitting [`MutantRecord`]s.
    ///
    /// [`MutantRecord`]: crate::schema::MutantRecord
    pub fn from_config(config: WalkerConfig) -> Result<Self, WalkerError> {
        Self::with_emitter(config, ChoiceEmitter)
    }
}

impl<E: Emitter> SearchWalker<E> {
    /// Build the walker named by `config.method` with a custom emitter.
    pub fn with_emitter(config: WalkerConfig, emitter: E) -> Result<Self, WalkerError> {
        Ok(match config.method {
            SearchMethod::Sampling(_) => {
                Self::Sampling(SamplingWalker::with_emitter(config, emitter)?)
            }
            SearchMethod::Genetic(_) => {
                Self::Genetic(GeneticWalker::with_emitter(config, emitter)?)
            }
        })
    }

    /// Score with `oracle` instead of random scores.
    pub fn with_oracle(self, oracle: impl ScoringOracle + 'static) -> Self {
        match self {
            Self::Sampling(walker) => Self::Sampling(walker.with_oracle(oracle)),
            Self::Genetic(walker) => Self::Genetic(walker.with_oracle(oracle)),
        }
    }

    /// Configuration the walker was built with.
    pub fn config(&self) -> &WalkerConfig {
        match self {
            Self::Sampling(walker) => walker.config(),
            Self::Genetic(walker) => walker.config(),
        }
    }
}

impl<E: Emitter> Walker for SearchWalker<E> {
    type Record = E::Record;

    fn generate_mutants(
        &mut self,
        seeds: &[String],
        generation_counts: &GenerationCounts,
    ) -> Result<Vec<E::Record>, WalkerError> {
        match self {
            Self::Sampling(walker) => walker.generate_mutants(seeds, generation_counts),
            Self::Genetic(walker) => walker.generate_mutants(seeds, generation_counts),
        }
    }
}
