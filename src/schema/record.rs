//! Records describing accepted mutants.

use serde::{Deserialize, Serialize};

/// Where a sequence came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SourceKind {
    /// Sequence was observed in experimental data.
    Observed,
    /// Sequence was produced by a search.
    Invented,
}

/// Whether a sequence is a control.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ControlKind {
    NotControl,
    PositiveControl,
    NegativeControl,
}

/// Search method that produced a sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MethodKind {
    SimpleSampling,
    GeneticAlgorithm,
}

/// An accepted mutant with its lineage and score.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MutantRecord {
    pub sequence: String,
    pub source: SourceKind,
    pub control: ControlKind,
    /// Generation index the mutant was accepted at.
    pub mutation_step: usize,
    /// Immediate parent sequence.
    pub previous_sequence: String,
    /// Seed sequence that started the lineage.
    pub seed_sequence: String,
    pub model_score: f64,
    pub model_name: String,
    pub mutation_type: MethodKind,
}
