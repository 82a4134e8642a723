//! Greedy per-seed sampling walker.

use std::collections::HashSet;
use std::sync::Arc;

use log::{debug, info, warn};
use rayon::prelude::*;

use crate::schema::{ConfigError, MethodKind, SamplingConfig, SearchMethod, WalkerConfig};

use super::oracle::score_candidates;
use super::walker::last_generation;
use super::{
    Candidate, ChoiceEmitter, Emitter, GenerationCounts, MutationRng, RecordDraft,
    ScoringOracle, Walker, WalkerError, sort_by_score,
};

/// Hill-climbs from each seed independently.
///
/// Every generation samples many distinct mutants of the current parents,
/// scores them in one batch and keeps the best as the next parents. Sequences
/// already accepted for a seed are never sampled again for that seed.
pub struct SamplingWalker<E = ChoiceEmitter> {
    config: WalkerConfig,
    sampling: SamplingConfig,
    rng: MutationRng,
    oracle: Option<Arc<dyn ScoringOracle>>,
    emitter: E,
}

impl SamplingWalker {
    /// Create a walker that emits [`MutantRecord`]s.
    ///
    /// [`MutantRecord`]: crate::schema::MutantRecord
    pub fn new(config: WalkerConfig) -> Result<Self, WalkerError> {
        Self::with_emitter(config, ChoiceEmitter)
    }
}

impl<E: Emitter> SamplingWalker<E> {
    /// Create a walker with a custom emitter.
    pub fn with_emitter(config: WalkerConfig, emitter: E) -> Result<Self, WalkerError> {
        config.validate()?;
        let sampling = match &config.method {
            SearchMethod::Sampling(sampling) => sampling.clone(),
            SearchMethod::Genetic(_) => {
                return Err(ConfigError::MethodMismatch {
                    expected: MethodKind::SimpleSampling,
                    found: MethodKind::GeneticAlgorithm,
                }
                .into());
            }
        };
        let rng = MutationRng::from_seed(config.random_seed);

        Ok(Self {
            config,
            sampling,
            rng,
            oracle: None,
            emitter,
        })
    }

    /// Score with `oracle` instead of random scores.
    pub fn with_oracle(mut self, oracle: impl ScoringOracle + 'static) -> Self {
        self.oracle = Some(Arc::new(oracle));
        self
    }

    pub fn config(&self) -> &WalkerConfig {
        &self.config
    }

    /// Walk from a single seed through generations `0..=last`.
    fn walk_seed(
        &self,
        seed: &str,
        generation_counts: &GenerationCounts,
        last: usize,
        mut rng: MutationRng,
    ) -> Result<Vec<E::Record>, WalkerError> {
        let mut visited: HashSet<String> = HashSet::from([seed.to_string()]);
        let mut parents = vec![Candidate::from_seed(seed)];
        let mut records = Vec::new();

        for generation in 0..=last {
            let requested = generation_counts.get(&generation).copied().unwrap_or(0);
            let n_to_keep = requested.max(self.sampling.n_parents);

            let mut mutants = self.one_generation(&parents, &visited, &mut rng)?;
            if mutants.is_empty() {
                warn!(
                    "Seed {}: no new mutants at generation {}, ending walk",
                    seed, generation
                );
                break;
            }

            for mutant in mutants.iter().take(requested) {
                records.push(self.emitter.make_record(RecordDraft::accepted(
                    mutant,
                    generation + 1,
                    &self.config.model_name,
                    MethodKind::SimpleSampling,
                )));
                visited.insert(mutant.sequence.clone());
            }

            debug!(
                "Seed {}: generation {} best {:?}, accepted {}",
                seed,
                generation,
                mutants[0].score,
                requested.min(mutants.len())
            );

            mutants.truncate(n_to_keep);
            parents = mutants;
        }

        Ok(records)
    }

    /// Sample, score and rank one generation of mutants.
    ///
    /// Parents are cycled through as attempts accumulate. Running out of
    /// `max_trials` before reaching `sampling_limit` is not an error; the
    /// mutants found so far are used.
    fn one_generation(
        &self,
        parents: &[Candidate],
        visited: &HashSet<String>,
        rng: &mut MutationRng,
    ) -> Result<Vec<Candidate>, WalkerError> {
        let limit = self.sampling.sampling_limit;
        // At most one mutant per trial.
        let capacity = limit.min(self.sampling.max_trials);
        let mut seen: HashSet<String> = HashSet::with_capacity(capacity);
        let mut mutants: Vec<Candidate> = Vec::with_capacity(capacity);

        let mut attempts = 0;
        while mutants.len() < limit && attempts < self.sampling.max_trials {
            attempts += 1;
            let parent = &parents[attempts % parents.len()];
            let distance = rng.distance(self.config.min_distance, self.config.max_distance);
            let sequence = rng.mutate(&parent.sequence, distance, &self.config.alphabet)?;

            if !visited.contains(&sequence) && seen.insert(sequence.clone()) {
                mutants.push(Candidate::child_of(sequence, parent));
            }
        }

        if mutants.len() < limit {
            warn!(
                "Found {} of {} mutants after {} trials",
                mutants.len(),
                limit,
                attempts
            );
        }

        score_candidates(
            self.oracle.as_deref(),
            &mut mutants,
            &self.config.target,
            rng,
        )?;
        sort_by_score(&mut mutants);
        Ok(mutants)
    }
}

impl<E: Emitter> Walker for SamplingWalker<E> {
    type Record = E::Record;

    /// `generation_counts` applies to each seed separately.
    fn generate_mutants(
        &mut self,
        seeds: &[String],
        generation_counts: &GenerationCounts,
    ) -> Result<Vec<E::Record>, WalkerError> {
        let last = last_generation(generation_counts)?;

        // One stream per seed, drawn in seed order, so parallel walks
        // reproduce a sequential run.
        let seed_rngs: Vec<MutationRng> = seeds
            .iter()
            .map(|_| MutationRng::new(self.rng.next_seed()))
            .collect();

        let this = &*self;
        let per_seed: Vec<Vec<E::Record>> = seeds
            .par_iter()
            .zip(seed_rngs)
            .map(|(seed, rng)| this.walk_seed(seed, generation_counts, last, rng))
            .collect::<Result<_, _>>()?;

        let records: Vec<E::Record> = per_seed.into_iter().flatten().collect();
        info!(
            "Sampling walk over {} seeds, {} generations: {} records",
            seeds.len(),
            last + 1,
            records.len()
        );
        Ok(records)
    }
}
