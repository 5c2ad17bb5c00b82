//! Mapping raw edit distances to bounded similarity scores.

use std::fmt;

/// Turns a raw distance between two terms into a similarity in `[0, 1]`.
pub trait Normalization: fmt::Debug + Send + Sync {
    /// Similarity of `from` and `to` given their raw edit `distance`.
    fn normalize(&self, distance: f64, from: &str, to: &str) -> f64;
}

/// Scales the distance by the length of the longer term.
///
/// `similarity = (max_len - distance) / max_len`, so the same number of edits
/// costs a long term less than a short one. Two empty terms are identical.
#[derive(Debug, Clone, Copy, Default)]
pub struct TermLengthNormalization;

impl Normalization for TermLengthNormalization {
    fn normalize(&self, distance: f64, from: &str, to: &str) -> f64 {
        let max_len = from.chars().count().max(to.chars().count());
        if max_len == 0 {
            return 1.0;
        }
        let max_len = max_len as f64;
        ((max_len - distance) / max_len).clamp(0.0, 1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_term_length_normalization() {
        let norm = TermLengthNormalization;
        assert_eq!(norm.normalize(2.0, "abcd", "acbd"), 0.5);
        assert_eq!(norm.normalize(0.0, "same", "same"), 1.0);
        assert_eq!(norm.normalize(5.0, "abcde", ""), 0.0);
        assert_eq!(norm.normalize(0.0, "", ""), 1.0);
    }

    #[test]
    fn test_longer_terms_absorb_edits() {
        let norm = TermLengthNormalization;
        let short = norm.normalize(1.0, "cat", "bat");
        let long = norm.normalize(1.0, "category", "catigory");
        assert!(long > short);
    }

    #[test]
    fn test_clamped_to_unit_interval() {
        let norm = TermLengthNormalization;
        assert_eq!(norm.normalize(9.0, "ab", "cd"), 0.0);
        assert_eq!(norm.normalize(-1.0, "ab", "ab"), 1.0);
    }
}
