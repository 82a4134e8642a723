//! Mutant candidates and their ordering.

use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};

/// A sequence together with its lineage and score.
///
/// Equality and hashing look only at `sequence`; two candidates reached
/// through different lineages are the same candidate.
#[derive(Debug, Clone)]
pub struct Candidate {
    /// The mutated sequence.
    pub sequence: String,
    /// Sequence this one was mutated from.
    pub parent: String,
    /// Seed that started the lineage.
    pub seed: String,
    /// Oracle score, `None` until scored.
    pub score: Option<f64>,
}

impl Candidate {
    /// An unscored candidate for a seed sequence, its own parent and seed.
    pub fn from_seed(seed: &str) -> Self {
        Self {
            sequence: seed.to_string(),
            parent: seed.to_string(),
            seed: seed.to_string(),
            score: None,
        }
    }

    /// An unscored child of `parent`, inheriting its seed.
    pub fn child_of(sequence: String, parent: &Candidate) -> Self {
        Self {
            sequence,
            parent: parent.sequence.clone(),
            seed: parent.seed.clone(),
            score: None,
        }
    }

    /// Record the oracle score. Scores are assigned once.
    pub(crate) fn set_score(&mut self, score: f64) {
        debug_assert!(self.score.is_none(), "candidate scored twice");
        self.score = Some(score);
    }
}

impl PartialEq for Candidate {
    fn eq(&self, other: &Self) -> bool {
        self.sequence == other.sequence
    }
}

impl Eq for Candidate {}

impl Hash for Candidate {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.sequence.hash(state);
    }
}

impl fmt::Display for Candidate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.score {
            Some(score) => write!(f, "{} (from {}): {:.3}", self.sequence, self.seed, score),
            None => write!(f, "{} (from {}): unscored", self.sequence, self.seed),
        }
    }
}

/// Compare two candidates so that higher scores come first.
///
/// Unscored candidates sort after every scored one.
pub fn by_score_descending(a: &Candidate, b: &Candidate) -> Ordering {
    match (a.score, b.score) {
        (Some(x), Some(y)) => y.total_cmp(&x),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

/// Sort candidates by score, descending. Stable, so ties keep their order.
pub fn sort_by_score(candidates: &mut [Candidate]) {
    candidates.sort_by(by_score_descending);
}
