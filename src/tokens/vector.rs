// Order-free views of a token sequence.
//
// A FrequencyVector treats a file as a sparse multiset (token -> count) for
// cosine comparison. A TokenSet keeps only the distinct tokens for Jaccard.
// Both are built once per file and shared across every pair it takes part in.

use std::collections::{HashMap, HashSet};

/// Token -> occurrence count.
///
/// Invariant: the counts sum to the length of the source sequence, and every
/// token of the sequence is a key.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FrequencyVector {
    counts: HashMap<String, u64>,
}

impl FrequencyVector {
    /// Count every token of a sequence.
    pub fn from_tokens(tokens: &[String]) -> Self {
        let mut counts = HashMap::new();
        for token in tokens {
            *counts.entry(token.clone()).or_insert(0) += 1;
        }
        Self { counts }
    }

    /// Occurrences of a token (0 when absent).
    pub fn get(&self, token: &str) -> u64 {
        self.counts.get(token).copied().unwrap_or(0)
    }

    /// Number of distinct tokens (non-zero dimensions).
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Sum of all counts, equal to the source sequence length.
    pub fn total(&self) -> u64 {
        self.counts.values().sum()
    }

    /// Squared Euclidean norm, kept integral so identical vectors divide
    /// exactly in the cosine computation.
    pub fn norm_squared(&self) -> u64 {
        self.counts.values().map(|c| c * c).sum()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, u64)> {
        self.counts.iter().map(|(t, c)| (t.as_str(), *c))
    }
}

/// The distinct tokens of a sequence.
///
/// Invariant: equals the key domain of the FrequencyVector of the same
/// sequence.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TokenSet {
    tokens: HashSet<String>,
}

impl TokenSet {
    pub fn from_tokens(tokens: &[String]) -> Self {
        Self {
            tokens: tokens.iter().cloned().collect(),
        }
    }

    pub fn contains(&self, token: &str) -> bool {
        self.tokens.contains(token)
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.tokens.iter().map(String::as_str)
    }
}

impl From<&FrequencyVector> for TokenSet {
    fn from(vector: &FrequencyVector) -> Self {
        Self {
            tokens: vector.counts.keys().cloned().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn toks(words: &[&str]) -> Vec<String> {
        words.iter().map(|w| w.to_string()).collect()
    }

    #[test]
    fn test_counts_sum_to_sequence_length() {
        let seq = toks(&["a", "b", "a", "c", "a"]);
        let vector = FrequencyVector::from_tokens(&seq);
        assert_eq!(vector.total(), seq.len() as u64);
        assert_eq!(vector.get("a"), 3);
        assert_eq!(vector.get("b"), 1);
        assert_eq!(vector.get("missing"), 0);
        assert_eq!(vector.len(), 3);
    }

    #[test]
    fn test_norm_squared() {
        let vector = FrequencyVector::from_tokens(&toks(&["x", "x", "y"]));
        // 2^2 + 1^2
        assert_eq!(vector.norm_squared(), 5);
    }

    #[test]
    fn test_set_matches_vector_keys() {
        let seq = toks(&["fn", "main", "(", ")", "{", "}", "fn"]);
        let vector = FrequencyVector::from_tokens(&seq);
        let from_seq = TokenSet::from_tokens(&seq);
        let from_vec = TokenSet::from(&vector);
        assert_eq!(from_seq, from_vec);
        assert_eq!(from_seq.len(), vector.len());
        for (token, _) in vector.iter() {
            assert!(from_seq.contains(token));
        }
    }

    #[test]
    fn test_empty_sequence() {
        let vector = FrequencyVector::from_tokens(&[]);
        assert!(vector.is_empty());
        assert_eq!(vector.total(), 0);
        assert_eq!(vector.norm_squared(), 0);
        assert!(TokenSet::from(&vector).is_empty());
    }
}
