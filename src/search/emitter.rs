//! Conversion of accepted candidates into downstream records.

use crate::schema::{ControlKind, MethodKind, MutantRecord, SourceKind};

use super::Candidate;

/// Everything an emitter needs to describe one accepted mutant.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RecordDraft<'a> {
    pub sequence: &'a str,
    pub source: SourceKind,
    pub control: ControlKind,
    pub generation: usize,
    pub parent: &'a str,
    pub seed: &'a str,
    pub score: f64,
    pub model_name: &'a str,
    pub method: MethodKind,
}

impl<'a> RecordDraft<'a> {
    /// Draft for a scored candidate invented by a search.
    pub fn accepted(
        candidate: &'a Candidate,
        generation: usize,
        model_name: &'a str,
        method: MethodKind,
    ) -> Self {
        Self {
            sequence: &candidate.sequence,
            source: SourceKind::Invented,
            control: ControlKind::NotControl,
            generation,
            parent: &candidate.parent,
            seed: &candidate.seed,
            // Only ranked candidates are accepted, and ranking happens after scoring.
            score: candidate.score.unwrap_or(f64::NAN),
            model_name,
            method,
        }
    }
}

/// Builds the records a walker returns.
pub trait Emitter: Send + Sync {
    type Record: Send;

    fn make_record(&self, draft: RecordDraft<'_>) -> Self::Record;
}

/// Emits [`MutantRecord`]s.
#[derive(Debug, Clone, Copy, Default)]
pub struct ChoiceEmitter;

impl Emitter for ChoiceEmitter {
    type Record = MutantRecord;

    fn make_record(&self, draft: RecordDraft<'_>) -> MutantRecord {
        MutantRecord {
            sequence: draft.sequence.to_string(),
            source: draft.source,
            control: draft.control,
            mutation_step: draft.generation,
            previous_sequence: draft.parent.to_string(),
            seed_sequence: draft.seed.to_string(),
            model_score: draft.score,
            model_name: draft.model_name.to_string(),
            mutation_type: draft.method,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_choice_emitter_copies_lineage() {
        let seed = Candidate::from_seed("AAAA");
        let mut child = Candidate::child_of("AAGA".into(), &seed);
        child.set_score(0.75);

        let draft = RecordDraft::accepted(&child, 1, "ff_v2", MethodKind::SimpleSampling);
        let record = ChoiceEmitter.make_record(draft);

        assert_eq!(record.sequence, "AAGA");
        assert_eq!(record.previous_sequence, "AAAA");
        assert_eq!(record.seed_sequence, "AAAA");
        assert_eq!(record.mutation_step, 1);
        assert_eq!(record.model_score, 0.75);
        assert_eq!(record.model_name, "ff_v2");
        assert_eq!(record.source, SourceKind::Invented);
        assert_eq!(record.control, ControlKind::NotControl);
    }

    #[test]
    fn test_custom_emitter() {
        struct SequenceOnly;
        impl Emitter for SequenceOnly {
            type Record = (String, usize);
            fn make_record(&self, draft: RecordDraft<'_>) -> Self::Record {
                (draft.sequence.to_string(), draft.generation)
            }
        }

        let mut seed = Candidate::from_seed("ACGT");
        seed.set_score(1.0);
        let draft = RecordDraft::accepted(&seed, 0, "m", MethodKind::GeneticAlgorithm);
        assert_eq!(SequenceOnly.make_record(draft), ("ACGT".to_string(), 0));
    }
}
