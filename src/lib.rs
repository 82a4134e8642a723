//! Mutant Walker - Mutation-based search for higher-scoring sequence variants.
//!
//! This crate explores the neighbourhood of seed sequences over a small
//! alphabet, scoring batches of substitution mutants with an external oracle
//! (typically a trained model) and keeping the best-scoring ones.
//!
//! # Architecture
//!
//! The crate is split into two main modules:
//!
//! - `schema`: Configuration, alphabet and record types
//! - `search`: Mutation, scoring and the two walker strategies
//!
//! # Example
//!
//! ```rust
//! use std::collections::BTreeMap;
//! use mutant_walker::{
//!     schema::{GeneticConfig, SearchMethod, WalkerConfig},
//!     search::{SearchWalker, Walker},
//! };
//!
//! let config = WalkerConfig {
//!     model_name: "gc_content".to_string(),
//!     random_seed: Some(7),
//!     method: SearchMethod::Genetic(GeneticConfig {
//!         n_possible_parents: 2,
//!         n_parents: 1,
//!     }),
//!     ..Default::default()
//! };
//!
//! // Score by GC content.
//! let gc = |seqs: &[String], _target: &str| -> Vec<f64> {
//!     seqs.iter()
//!         .map(|s| s.chars().filter(|c| matches!(c, 'G' | 'C')).count() as f64)
//!         .collect()
//! };
//!
//! let mut walker = SearchWalker::from_config(config).unwrap().with_oracle(gc);
//! let seeds = vec!["AAAATTTT".to_string(), "ACGTACGT".to_string()];
//! let records = walker
//!     .generate_mutants(&seeds, &BTreeMap::from([(5, 3)]))
//!     .unwrap();
//!
//! for record in &records {
//!     println!("{} <- {}: {:.1}", record.sequence, record.previous_sequence, record.model_score);
//! }
//! ```

pub mod schema;
pub mod search;

// Re-export commonly used types
pub use schema::{Alphabet, MutantRecord, WalkerConfig};
pub use search::{SearchWalker, Walker, WalkerError};
