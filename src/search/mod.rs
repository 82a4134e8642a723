//! Mutation-based search for higher-scoring sequence variants.
//!
//! Starting from seed sequences, a walker repeatedly mutates promising
//! sequences, scores the mutants in batches with a [`ScoringOracle`], and keeps
//! the best ones. Accepted mutants are handed to an [`Emitter`] which turns
//! them into records.
//!
//! # Overview
//!
//! - **Mutation** (`mutation`): exact-distance substitutions from a seeded RNG
//! - **Candidates** (`candidate`): lineage tracking and score ordering
//! - **Oracles** (`oracle`): batch scoring, with a random-walk fallback
//! - **Emitters** (`emitter`): record construction for accepted mutants
//! - **Walkers** (`sampling`, `genetic`): the two search strategies
//!
//! # Example
//!
//! ```rust
//! use std::collections::BTreeMap;
//! use mutant_walker::schema::{SamplingConfig, SearchMethod, WalkerConfig};
//! use mutant_walker::search::{SearchWalker, Walker};
//!
//! let config = WalkerConfig {
//!     random_seed: Some(42),
//!     method: SearchMethod::Sampling(SamplingConfig {
//!         sampling_limit: 20,
//!         max_trials: 200,
//!         n_parents: 2,
//!     }),
//!     ..Default::default()
//! };
//!
//! // No oracle: mutants get uniform random scores.
//! let mut walker = SearchWalker::from_config(config).unwrap();
//! let counts = BTreeMap::from([(0, 3), (2, 1)]);
//! let records = walker
//!     .generate_mutants(&["ACGTACGTAC".to_string()], &counts)
//!     .unwrap();
//! assert_eq!(records.len(), 4);
//! ```
//!
//! # Strategies
//!
//! - `SamplingWalker`: greedy hill-climbing, each seed searched on its own
//! - `GeneticWalker`: one population across all seeds, fitness-weighted parents

mod candidate;
mod emitter;
mod genetic;
mod mutation;
mod oracle;
mod sampling;
mod walker;

pub use candidate::{Candidate, by_score_descending, sort_by_score};
pub use emitter::{ChoiceEmitter, Emitter, RecordDraft};
pub use genetic::{GeneticWalker, SELECTION_EPSILON, selection_weights};
pub use mutation::{MutationRng, hamming_distance};
pub use oracle::{LookupOracle, OracleError, ScoringOracle};
pub use sampling::SamplingWalker;
pub use walker::{GenerationCounts, SearchWalker, Walker};

use crate::schema::ConfigError;

/// Errors that abort a walk.
#[derive(Debug, thiserror::Error)]
pub enum WalkerError {
    #[error("Cannot make {distance} substitutions in a sequence of length {length}")]
    InvalidMutationDistance { distance: usize, length: usize },
    #[error("Oracle returned {scores} scores for {sequences} sequences")]
    ScoringMismatch { sequences: usize, scores: usize },
    #[error("Configuration error: {0}")]
    Configuration(#[from] ConfigError),
    #[error("Oracle failed: {0}")]
    Oracle(#[from] OracleError),
    #[error("Cannot select {requested} distinct parents from {available} candidates")]
    InsufficientParents { requested: usize, available: usize },
    #[error("Invalid selection weights: {0}")]
    Selection(#[from] rand::distributions::WeightedError),
}
