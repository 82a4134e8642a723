//! Symbol sets that sequences are drawn from.

use serde::{Deserialize, Serialize};

use super::ConfigError;

/// The four DNA bases.
pub const DNA_BASES: &str = "ACGT";

/// A fixed, ordered set of distinct symbols.
///
/// Serialized as a plain string, e.g. `"ACGT"`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Alphabet {
    symbols: Vec<char>,
}

impl Alphabet {
    /// Build an alphabet from a string of symbols.
    ///
    /// Requires at least two symbols and no repeats, otherwise a substitution
    /// would have nothing to substitute with.
    pub fn new(symbols: &str) -> Result<Self, ConfigError> {
        let mut chars: Vec<char> = Vec::with_capacity(symbols.len());
        for c in symbols.chars() {
            if chars.contains(&c) {
                return Err(ConfigError::DuplicateSymbol(c));
            }
            chars.push(c);
        }
        if chars.len() < 2 {
            return Err(ConfigError::AlphabetTooSmall(chars.len()));
        }
        Ok(Self { symbols: chars })
    }

    /// The DNA alphabet `ACGT`.
    pub fn dna() -> Self {
        Self {
            symbols: DNA_BASES.chars().collect(),
        }
    }

    /// All symbols in order.
    #[inline]
    pub fn symbols(&self) -> &[char] {
        &self.symbols
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    #[inline]
    pub fn contains(&self, symbol: char) -> bool {
        self.symbols.contains(&symbol)
    }

    /// Symbols a position holding `current` may be substituted with.
    pub fn substitutes(&self, current: char) -> impl Iterator<Item = char> + '_ {
        self.symbols.iter().copied().filter(move |&s| s != current)
    }

    /// Whether every symbol of `sequence` belongs to this alphabet.
    pub fn is_valid_sequence(&self, sequence: &str) -> bool {
        sequence.chars().all(|c| self.contains(c))
    }
}

impl Default for Alphabet {
    fn default() -> Self {
        Self::dna()
    }
}

impl TryFrom<String> for Alphabet {
    type Error = ConfigError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(&value)
    }
}

impl From<Alphabet> for String {
    fn from(alphabet: Alphabet) -> Self {
        alphabet.symbols.into_iter().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dna_default() {
        let alphabet = Alphabet::default();
        assert_eq!(alphabet.symbols(), &['A', 'C', 'G', 'T']);
        assert!(alphabet.is_valid_sequence("GATTACA"));
        assert!(!alphabet.is_valid_sequence("GATTACU"));
    }

    #[test]
    fn test_substitutes_exclude_current() {
        let alphabet = Alphabet::dna();
        let subs: Vec<char> = alphabet.substitutes('G').collect();
        assert_eq!(subs, vec!['A', 'C', 'T']);
    }

    #[test]
    fn test_rejects_small_or_repeated() {
        assert!(matches!(
            Alphabet::new("A"),
            Err(ConfigError::AlphabetTooSmall(1))
        ));
        assert!(matches!(
            Alphabet::new("ACA"),
            Err(ConfigError::DuplicateSymbol('A'))
        ));
    }

    #[test]
    fn test_serde_as_string() {
        let alphabet = Alphabet::new("ACGU").unwrap();
        let json = serde_json::to_string(&alphabet).unwrap();
        assert_eq!(json, "\"ACGU\"");
        let parsed: Alphabet = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, alphabet);
        assert!(serde_json::from_str::<Alphabet>("\"AA\"").is_err());
    }
}
