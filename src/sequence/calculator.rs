//! A distance strategy paired with a normalization.

use std::fmt;
use std::sync::Arc;

use super::distance::{DistanceStrategy, Levenshtein};
use super::normalization::{Normalization, TermLengthNormalization};

/// Computes raw and normalized distances between terms.
///
/// Cloning is cheap; the strategy and normalizer are shared.
#[derive(Clone)]
pub struct DistanceCalculator {
    strategy: Arc<dyn DistanceStrategy>,
    normalizer: Arc<dyn Normalization>,
}

impl DistanceCalculator {
    /// Creates a calculator from a strategy and a normalizer.
    pub fn new<S, N>(strategy: S, normalizer: N) -> Self
    where
        S: DistanceStrategy + 'static,
        N: Normalization + 'static,
    {
        Self {
            strategy: Arc::new(strategy),
            normalizer: Arc::new(normalizer),
        }
    }

    /// Uses `strategy` with term-length normalization.
    pub fn with_strategy<S: DistanceStrategy + 'static>(strategy: S) -> Self {
        Self::new(strategy, TermLengthNormalization)
    }

    /// Uses Levenshtein distance with `normalizer`.
    pub fn with_normalizer<N: Normalization + 'static>(normalizer: N) -> Self {
        Self::new(Levenshtein, normalizer)
    }

    /// Number of edits turning `from` into `to`.
    pub fn edit_count(&self, from: &str, to: &str) -> usize {
        self.strategy.edit_count(from, to)
    }

    /// Raw distance between `from` and `to`.
    pub fn edit_distance(&self, from: &str, to: &str) -> f64 {
        self.strategy.edit_distance(from, to)
    }

    /// Similarity of `from` and `to` in `[0, 1]`.
    pub fn normalized_similarity(&self, from: &str, to: &str) -> f64 {
        let distance = self.strategy.edit_distance(from, to);
        self.normalizer.normalize(distance, from, to)
    }
}

impl Default for DistanceCalculator {
    fn default() -> Self {
        Self::new(Levenshtein, TermLengthNormalization)
    }
}

impl fmt::Debug for DistanceCalculator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DistanceCalculator")
            .field("strategy", &self.strategy)
            .field("normalizer", &self.normalizer)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sequence::distance::DamerauLevenshtein;

    #[test]
    fn test_default_calculator() {
        let calc = DistanceCalculator::default();
        assert_eq!(calc.edit_count("abcd", "acbd"), 2);
        assert_eq!(calc.edit_distance("abcd", "acbd"), 2.0);
        assert_eq!(calc.normalized_similarity("abcd", "acbd"), 0.5);
    }

    #[test]
    fn test_with_strategy() {
        let calc = DistanceCalculator::with_strategy(DamerauLevenshtein);
        assert_eq!(calc.edit_count("abcd", "acbd"), 1);
        assert_eq!(calc.normalized_similarity("abcd", "acbd"), 0.75);
    }

    #[derive(Debug)]
    struct Inverse;

    impl Normalization for Inverse {
        fn normalize(&self, distance: f64, _from: &str, _to: &str) -> f64 {
            1.0 / (1.0 + distance)
        }
    }

    #[test]
    fn test_with_normalizer() {
        let calc = DistanceCalculator::with_normalizer(Inverse);
        assert_eq!(calc.normalized_similarity("abc", "abd"), 0.5);
        assert_eq!(calc.normalized_similarity("abc", "abc"), 1.0);
    }
}
