//! Substitution mutation over a fixed alphabet.

use rand::distributions::{Distribution, WeightedIndex};
use rand::prelude::*;

use crate::schema::Alphabet;

use super::WalkerError;

/// Random number generator owned by a single walker.
///
/// Every random draw a walker makes goes through one of these; there is no
/// shared or global generator.
#[derive(Debug, Clone)]
pub struct MutationRng {
    rng: StdRng,
}

impl MutationRng {
    /// Create from seed.
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Create with random seed.
    pub fn random() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    /// Create from an optional seed, falling back to entropy.
    pub fn from_seed(seed: Option<u64>) -> Self {
        match seed {
            Some(seed) => Self::new(seed),
            None => Self::random(),
        }
    }

    /// Substitute `distance` distinct positions of `sequence`.
    ///
    /// Each chosen position receives a symbol drawn uniformly from the
    /// alphabet minus the symbol already there, so the result is exactly
    /// `distance` substitutions away from the input.
    pub fn mutate(
        &mut self,
        sequence: &str,
        distance: usize,
        alphabet: &Alphabet,
    ) -> Result<String, WalkerError> {
        let mut symbols: Vec<char> = sequence.chars().collect();
        if distance > symbols.len() {
            return Err(WalkerError::InvalidMutationDistance {
                distance,
                length: symbols.len(),
            });
        }

        let mut positions: Vec<usize> = (0..symbols.len()).collect();
        positions.shuffle(&mut self.rng);

        let mut substitutes = Vec::with_capacity(alphabet.len());
        for &position in &positions[..distance] {
            let current = symbols[position];
            substitutes.clear();
            substitutes.extend(alphabet.substitutes(current));
            if let Some(&symbol) = substitutes.choose(&mut self.rng) {
                symbols[position] = symbol;
            }
        }

        Ok(symbols.into_iter().collect())
    }

    /// Uniform mutation distance in `[min, max]`.
    pub fn distance(&mut self, min: usize, max: usize) -> usize {
        self.rng.gen_range(min..=max)
    }

    /// Independent uniform `[0, 1)` scores, one per sequence.
    pub fn uniform_scores(&mut self, count: usize) -> Vec<f64> {
        (0..count).map(|_| self.rng.r#gen::<f64>()).collect()
    }

    /// Draw an index from a weighted distribution.
    pub fn sample_index(&mut self, weights: &WeightedIndex<f64>) -> usize {
        weights.sample(&mut self.rng)
    }

    /// Generate next u64 for seeding child RNGs.
    pub fn next_seed(&mut self) -> u64 {
        self.rng.r#gen()
    }
}

/// Number of positions at which two sequences differ.
///
/// Returns `None` when the lengths differ.
pub fn hamming_distance(a: &str, b: &str) -> Option<usize> {
    if a.chars().count() != b.chars().count() {
        return None;
    }
    Some(a.chars().zip(b.chars()).filter(|(x, y)| x != y).count())
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_mutate_exact_distance() {
        let mut rng = MutationRng::new(42);
        let alphabet = Alphabet::dna();
        let seed = "ACGTACGTACGT";

        for distance in 0..=seed.len() {
            let mutant = rng.mutate(seed, distance, &alphabet).unwrap();
            assert_eq!(mutant.len(), seed.len());
            assert_eq!(hamming_distance(seed, &mutant), Some(distance));
        }
    }

    #[test]
    fn test_mutate_rejects_long_distance() {
        let mut rng = MutationRng::new(0);
        let err = rng.mutate("ACG", 4, &Alphabet::dna()).unwrap_err();
        assert!(matches!(
            err,
            WalkerError::InvalidMutationDistance {
                distance: 4,
                length: 3
            }
        ));
    }

    #[test]
    fn test_mutate_deterministic() {
        let alphabet = Alphabet::dna();
        let mut a = MutationRng::new(7);
        let mut b = MutationRng::new(7);
        for _ in 0..20 {
            assert_eq!(
                a.mutate("GGGGCCCCAAAA", 3, &alphabet).unwrap(),
                b.mutate("GGGGCCCCAAAA", 3, &alphabet).unwrap()
            );
        }
    }

    #[test]
    fn test_binary_alphabet_flips() {
        let mut rng = MutationRng::new(3);
        let alphabet = Alphabet::new("01").unwrap();
        assert_eq!(rng.mutate("0000", 4, &alphabet).unwrap(), "1111");
    }

    #[test]
    fn test_uniform_scores_range() {
        let mut rng = MutationRng::new(11);
        let scores = rng.uniform_scores(100);
        assert_eq!(scores.len(), 100);
        assert!(scores.iter().all(|s| (0.0..1.0).contains(s)));
    }

    #[test]
    fn test_hamming_distance() {
        assert_eq!(hamming_distance("AAAA", "AACA"), Some(1));
        assert_eq!(hamming_distance("AAAA", "AAAA"), Some(0));
        assert_eq!(hamming_distance("AAAA", "AAA"), None);
    }

    fn dna_sequence() -> impl Strategy<Value = String> {
        proptest::collection::vec(prop_oneof![Just('A'), Just('C'), Just('G'), Just('T')], 1..40)
            .prop_map(|chars| chars.into_iter().collect())
    }

    proptest! {
        #[test]
        fn prop_mutate_preserves_length_and_alphabet(
            sequence in dna_sequence(),
            fraction in 0.0f64..=1.0,
            seed in any::<u64>(),
        ) {
            let alphabet = Alphabet::dna();
            let distance = ((sequence.len() as f64) * fraction).round() as usize;
            let distance = distance.clamp(1, sequence.len());
            let mut rng = MutationRng::new(seed);

            let mutant = rng.mutate(&sequence, distance, &alphabet).unwrap();
            prop_assert_eq!(mutant.len(), sequence.len());
            prop_assert_eq!(hamming_distance(&sequence, &mutant), Some(distance));
            prop_assert!(alphabet.is_valid_sequence(&mutant));
        }

        #[test]
        fn prop_mutate_too_far_fails(sequence in dna_sequence(), extra in 1usize..5) {
            let mut rng = MutationRng::new(1);
            let result = rng.mutate(&sequence, sequence.len() + extra, &Alphabet::dna());
            let is_invalid_distance = matches!(result, Err(WalkerError::InvalidMutationDistance { .. }));
            prop_assert!(is_invalid_distance);
        }
    }
}
