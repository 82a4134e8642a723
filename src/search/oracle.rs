//! Batch scoring of candidate sequences.

use std::collections::HashMap;

use super::{Candidate, MutationRng, WalkerError};

/// Error reported by a scoring backend.
#[derive(Debug, Clone, thiserror::Error)]
#[error("{message}")]
pub struct OracleError {
    message: String,
}

impl OracleError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Assigns a fitness to each sequence of a batch.
///
/// Must return exactly one score per input sequence, in input order, and
/// must be deterministic within a session.
pub trait ScoringOracle: Send + Sync {
    fn score_batch(&self, sequences: &[String], target: &str) -> Result<Vec<f64>, OracleError>;
}

impl<F> ScoringOracle for F
where
    F: Fn(&[String], &str) -> Vec<f64> + Send + Sync,
{
    fn score_batch(&self, sequences: &[String], target: &str) -> Result<Vec<f64>, OracleError> {
        Ok(self(sequences, target))
    }
}

/// Oracle backed by a table of known scores.
///
/// Sequences missing from the table get `default_score`.
#[derive(Debug, Clone, Default)]
pub struct LookupOracle {
    scores: HashMap<String, f64>,
    default_score: f64,
}

impl LookupOracle {
    pub fn new(default_score: f64) -> Self {
        Self {
            scores: HashMap::new(),
            default_score,
        }
    }

    /// Add or replace the score of a sequence.
    pub fn with_score(mut self, sequence: impl Into<String>, score: f64) -> Self {
        self.scores.insert(sequence.into(), score);
        self
    }

    pub fn len(&self) -> usize {
        self.scores.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scores.is_empty()
    }
}

impl ScoringOracle for LookupOracle {
    fn score_batch(&self, sequences: &[String], _target: &str) -> Result<Vec<f64>, OracleError> {
        Ok(sequences
            .iter()
            .map(|s| self.scores.get(s).copied().unwrap_or(self.default_score))
            .collect())
    }
}

/// Score a batch, falling back to uniform random scores without an oracle.
pub(crate) fn score_sequences(
    oracle: Option<&dyn ScoringOracle>,
    sequences: &[String],
    target: &str,
    rng: &mut MutationRng,
) -> Result<Vec<f64>, WalkerError> {
    let scores = match oracle {
        Some(oracle) => oracle.score_batch(sequences, target)?,
        None => rng.uniform_scores(sequences.len()),
    };

    if scores.len() != sequences.len() {
        return Err(WalkerError::ScoringMismatch {
            sequences: sequences.len(),
            scores: scores.len(),
        });
    }
    Ok(scores)
}

/// Score every candidate in one batched call.
pub(crate) fn score_candidates(
    oracle: Option<&dyn ScoringOracle>,
    candidates: &mut [Candidate],
    target: &str,
    rng: &mut MutationRng,
) -> Result<(), WalkerError> {
    if candidates.is_empty() {
        return Ok(());
    }

    let sequences: Vec<String> = candidates.iter().map(|c| c.sequence.clone()).collect();
    let scores = score_sequences(oracle, &sequences, target, rng)?;
    for (candidate, score) in candidates.iter_mut().zip(scores) {
        candidate.set_score(score);
    }
    Ok(())
}
