//! Sequence comparison kernels.
//!
//! Edit distance strategies, similarity normalization, longest common
//! subsequence recovery and the fuzzy ranker built on top of them.

pub mod calculator;
pub mod distance;
pub mod lcs;
pub mod normalization;
pub mod ranking;

pub use calculator::DistanceCalculator;
pub use distance::{DamerauLevenshtein, DistanceKind, DistanceStrategy, Levenshtein};
pub use lcs::longest_common_subsequence;
pub use normalization::{Normalization, TermLengthNormalization};
pub use ranking::{FuzzyRanker, RankedTerm};
