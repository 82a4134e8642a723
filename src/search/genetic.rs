//! Joint-population genetic walker.

use std::sync::Arc;

use log::{debug, info};
use rand::distributions::WeightedIndex;

use crate::schema::{ConfigError, GeneticConfig, MethodKind, SearchMethod, WalkerConfig};

use super::oracle::score_candidates;
use super::walker::last_generation;
use super::{
    Candidate, ChoiceEmitter, Emitter, GenerationCounts, MutationRng, RecordDraft,
    ScoringOracle, Walker, WalkerError, sort_by_score,
};

/// Added to every shifted score so selection weights stay strictly positive.
pub const SELECTION_EPSILON: f64 = 1e-5;

/// Evolves one population shared by all seeds.
///
/// Each generation draws distinct parents from the top of the population,
/// weighted by score, and gives each exactly one mutated child. Children join
/// the population alongside their parents, so the population only grows.
/// There is no crossover and no deduplication: a sequence produced twice is
/// held twice.
pub struct GeneticWalker<E = ChoiceEmitter> {
    config: WalkerConfig,
    genetic: GeneticConfig,
    rng: MutationRng,
    oracle: Option<Arc<dyn ScoringOracle>>,
    emitter: E,
    population: Vec<Candidate>,
}

impl GeneticWalker {
    /// Create a walker that emits [`MutantRecord`]s.
    ///
    /// [`MutantRecord`]: crate::schema::MutantRecord
    pub fn new(config: WalkerConfig) -> Result<Self, WalkerError> {
        Self::with_emitter(config, ChoiceEmitter)
    }
}

impl<E: Emitter> GeneticWalker<E> {
    /// Create a walker with a custom emitter.
    pub fn with_emitter(config: WalkerConfig, emitter: E) -> Result<Self, WalkerError> {
        config.validate()?;
        let genetic = match &config.method {
            SearchMethod::Genetic(genetic) => genetic.clone(),
            SearchMethod::Sampling(_) => {
                return Err(ConfigError::MethodMismatch {
                    expected: MethodKind::GeneticAlgorithm,
                    found: MethodKind::SimpleSampling,
                }
                .into());
            }
        };
        let rng = MutationRng::from_seed(config.random_seed);

        Ok(Self {
            config,
            genetic,
            rng,
            oracle: None,
            emitter,
            population: Vec::new(),
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

    /// Population left by the last run, best first.
    pub fn population(&self) -> &[Candidate] {
        &self.population
    }

    /// Score the seeds and make them the starting population.
    fn initialize(&mut self, seeds: &[String]) -> Result<(), WalkerError> {
        let mut population: Vec<Candidate> =
            seeds.iter().map(|s| Candidate::from_seed(s)).collect();
        score_candidates(
            self.oracle.as_deref(),
            &mut population,
            &self.config.target,
            &mut self.rng,
        )?;
        sort_by_score(&mut population);
        self.population = population;
        Ok(())
    }

    /// Pick parents from the top of the population and make one child each.
    fn make_children(&mut self) -> Result<Vec<Candidate>, WalkerError> {
        let pool_size = self.genetic.n_possible_parents.min(self.population.len());
        let pool = &self.population[..pool_size];

        let picks = select_distinct(&mut self.rng, pool, self.genetic.n_parents)?;

        let mut children = Vec::with_capacity(picks.len());
        for index in picks {
            let parent = &pool[index];
            let distance = self
                .rng
                .distance(self.config.min_distance, self.config.max_distance);
            let sequence = self
                .rng
                .mutate(&parent.sequence, distance, &self.config.alphabet)?;
            children.push(Candidate::child_of(sequence, parent));
        }

        score_candidates(
            self.oracle.as_deref(),
            &mut children,
            &self.config.target,
            &mut self.rng,
        )?;
        Ok(children)
    }
}

/// Normalized selection weights for a pool of scored candidates.
///
/// Scores are shifted so the lowest becomes [`SELECTION_EPSILON`]; the result
/// is strictly positive and sums to 1, even when every score is equal.
pub fn selection_weights(pool: &[Candidate]) -> Vec<f64> {
    let raw: Vec<f64> = pool.iter().map(|c| c.score.unwrap_or(0.0)).collect();
    let min = raw.iter().copied().fold(f64::INFINITY, f64::min);
    let shifted: Vec<f64> = raw.iter().map(|s| s - min + SELECTION_EPSILON).collect();
    let total: f64 = shifted.iter().sum();
    shifted.into_iter().map(|w| w / total).collect()
}

/// Weighted sampling of `count` distinct pool indices.
///
/// Indices are drawn one at a time; a drawn index drops out and the
/// remaining weights are renormalized for the next draw.
fn select_distinct(
    rng: &mut MutationRng,
    pool: &[Candidate],
    count: usize,
) -> Result<Vec<usize>, WalkerError> {
    if count > pool.len() {
        return Err(WalkerError::InsufficientParents {
            requested: count,
            available: pool.len(),
        });
    }

    let mut weights = selection_weights(pool);
    let mut picks = Vec::with_capacity(count);
    for _ in 0..count {
        let distribution = WeightedIndex::new(&weights)?;
        let index = rng.sample_index(&distribution);
        picks.push(index);
        weights[index] = 0.0;
    }
    Ok(picks)
}

impl<E: Emitter> Walker for GeneticWalker<E> {
    type Record = E::Record;

    /// `generation_counts` applies to the whole population, not per seed.
    fn generate_mutants(
        &mut self,
        seeds: &[String],
        generation_counts: &GenerationCounts,
    ) -> Result<Vec<E::Record>, WalkerError> {
        let last = last_generation(generation_counts)?;
        self.initialize(seeds)?;

        let mut records = Vec::new();
        for generation in 0..=last {
            let children = self.make_children()?;
            self.population.extend(children);
            sort_by_score(&mut self.population);

            if let Some(&count) = generation_counts.get(&generation) {
                for candidate in self.population.iter().take(count) {
                    records.push(self.emitter.make_record(RecordDraft::accepted(
                        candidate,
                        generation,
                        &self.config.model_name,
                        MethodKind::GeneticAlgorithm,
                    )));
                }
            }

            debug!(
                "Generation {}: population {}, best {:?}",
                generation,
                self.population.len(),
                self.population.first().and_then(|c| c.score)
            );
        }

        info!(
            "Genetic walk from {} seeds, {} generations: {} records",
            seeds.len(),
            last + 1,
            records.len()
        );
        Ok(records)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::Alphabet;
    use crate::search::{LookupOracle, hamming_distance};

    fn config(n_possible_parents: usize, n_parents: usize) -> WalkerConfig {
        WalkerConfig {
            model_name: "test_model".into(),
            target: "target".into(),
            min_distance: 1,
            max_distance: 2,
            random_seed: Some(42),
            alphabet: Alphabet::dna(),
            method: SearchMethod::Genetic(GeneticConfig {
                n_possible_parents,
                n_parents,
            }),
        }
    }

    fn scored(sequence: &str, score: f64) -> Candidate {
        let mut candidate = Candidate::from_seed(sequence);
        candidate.set_score(score);
        candidate
    }

    #[test]
    fn test_two_seed_example() {
        let oracle = LookupOracle::new(0.5)
            .with_score("AAAA", 0.2)
            .with_score("CCCC", 0.9);
        let mut walker = GeneticWalker::new(config(2, 1)).unwrap().with_oracle(oracle);
        let seeds = vec!["AAAA".to_string(), "CCCC".to_string()];
        let counts = GenerationCounts::from([(0, 2)]);

        let records = walker.generate_mutants(&seeds, &counts).unwrap();

        assert_eq!(walker.population().len(), 3);
        assert_eq!(records.len(), 2);
        for (record, candidate) in records.iter().zip(walker.population()) {
            assert_eq!(record.sequence, candidate.sequence);
            assert_eq!(Some(record.model_score), candidate.score);
            assert_eq!(record.mutation_step, 0);
        }
        assert_eq!(records[0].sequence, "CCCC");
        assert_eq!(records[1].model_score, 0.5);
    }

    #[test]
    fn test_population_grows_by_n_parents() {
        let seeds: Vec<String> = ["ACGTACGT", "TTTTAAAA", "GGGGCCCC"]
            .iter()
            .map(|s| s.to_string())
            .collect();
        let mut walker = GeneticWalker::new(config(3, 2)).unwrap();

        for last in 0..5 {
            let counts = GenerationCounts::from([(last, 1)]);
            walker.generate_mutants(&seeds, &counts).unwrap();
            assert_eq!(walker.population().len(), seeds.len() + (last + 1) * 2);
        }
    }

    #[test]
    fn test_emits_top_of_population_per_generation() {
        let seeds = vec!["ACGTACGT".to_string(), "TTTTAAAA".to_string()];
        let counts = GenerationCounts::from([(0, 1), (2, 3)]);
        let mut walker = GeneticWalker::new(config(2, 2)).unwrap();
        let records = walker.generate_mutants(&seeds, &counts).unwrap();

        assert_eq!(records.len(), 4);
        assert_eq!(records[0].mutation_step, 0);
        assert!(records[1..].iter().all(|r| r.mutation_step == 2));
        let scores: Vec<f64> = records[1..].iter().map(|r| r.model_score).collect();
        assert!(scores.windows(2).all(|w| w[0] >= w[1]));
    }

    #[test]
    fn test_children_have_one_parent_within_distance() {
        let seeds = vec!["ACGTACGTAC".to_string(), "GGGGGGGGGG".to_string()];
        let counts = GenerationCounts::from([(3, 50)]);
        let mut walker = GeneticWalker::new(config(4, 2)).unwrap();
        let records = walker.generate_mutants(&seeds, &counts).unwrap();

        for record in records.iter().filter(|r| r.sequence != r.previous_sequence) {
            let d = hamming_distance(&record.previous_sequence, &record.sequence).unwrap();
            assert!((1..=2).contains(&d));
            assert!(seeds.contains(&record.seed_sequence));
        }
    }

    #[test]
    fn test_deterministic_with_seed() {
        let seeds = vec!["ACGTACGT".to_string(), "CCCCAAAA".to_string()];
        let counts = GenerationCounts::from([(0, 2), (4, 4)]);
        let a = GeneticWalker::new(config(2, 1))
            .unwrap()
            .generate_mutants(&seeds, &counts)
            .unwrap();
        let b = GeneticWalker::new(config(2, 1))
            .unwrap()
            .generate_mutants(&seeds, &counts)
            .unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_weights_with_equal_scores() {
        let pool = vec![scored("A", 0.7), scored("C", 0.7), scored("G", 0.7)];
        let weights = selection_weights(&pool);
        assert!(weights.iter().all(|&w| w > 0.0));
        assert!((weights.iter().sum::<f64>() - 1.0).abs() < 1e-12);
        assert!(weights.iter().all(|&w| (w - 1.0 / 3.0).abs() < 1e-12));
    }

    #[test]
    fn test_weights_favor_higher_scores() {
        let pool = vec![scored("A", 2.0), scored("C", -1.0), scored("G", 0.5)];
        let weights = selection_weights(&pool);
        assert!((weights.iter().sum::<f64>() - 1.0).abs() < 1e-12);
        assert!(weights.iter().all(|&w| w > 0.0));
        assert!(weights[0] > weights[2] && weights[2] > weights[1]);
    }

    #[test]
    fn test_select_distinct_indices() {
        let pool = vec![scored("A", 0.0), scored("C", 0.0), scored("G", 10.0)];
        let mut rng = MutationRng::new(3);
        for _ in 0..20 {
            let mut picks = select_distinct(&mut rng, &pool, 3).unwrap();
            picks.sort_unstable();
            assert_eq!(picks, vec![0, 1, 2]);
        }
    }

    #[test]
    fn test_too_few_seeds_for_parents() {
        let mut walker = GeneticWalker::new(config(4, 3)).unwrap();
        let err = walker
            .generate_mutants(
                &["ACGT".to_string(), "TTTT".to_string()],
                &GenerationCounts::from([(0, 1)]),
            )
            .unwrap_err();
        assert!(matches!(
            err,
            WalkerError::InsufficientParents {
                requested: 3,
                available: 2
            }
        ));
    }

    #[test]
    fn test_duplicates_are_kept() {
        // A single-position binary sequence has one possible child.
        let config = WalkerConfig {
            min_distance: 1,
            max_distance: 1,
            alphabet: Alphabet::new("01").unwrap(),
            ..config(1, 1)
        };
        let mut walker = GeneticWalker::new(config).unwrap();
        walker
            .generate_mutants(&["0".to_string()], &GenerationCounts::from([(3, 1)]))
            .unwrap();
        let population = walker.population();
        assert_eq!(population.len(), 5);
        let distinct: std::collections::HashSet<&Candidate> = population.iter().collect();
        assert!(distinct.len() <= 2);
    }
}
