//! Edit distance strategies.
//!
//! Both strategies fill the classic `(|from| + 1) × (|to| + 1)` dynamic
//! programming matrix, keeping only the rows the recurrence still needs.
//! Distances are counted in `char`s.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Computes the number of edits turning one term into another.
pub trait DistanceStrategy: fmt::Debug + Send + Sync {
    /// Minimum number of edits from `from` to `to`.
    fn edit_count(&self, from: &str, to: &str) -> usize;

    /// Edit count as a floating point distance.
    fn edit_distance(&self, from: &str, to: &str) -> f64 {
        self.edit_count(from, to) as f64
    }
}

/// Insertions, deletions and substitutions, each costing one edit.
#[derive(Debug, Clone, Copy, Default)]
pub struct Levenshtein;

impl DistanceStrategy for Levenshtein {
    fn edit_count(&self, from: &str, to: &str) -> usize {
        edit_matrix(from, to, false)
    }
}

/// [`Levenshtein`] plus swaps of two adjacent characters as a single edit.
///
/// This is the restricted variant: a transposition only looks one step back,
/// and a transposed pair is never edited again.
#[derive(Debug, Clone, Copy, Default)]
pub struct DamerauLevenshtein;

impl DistanceStrategy for DamerauLevenshtein {
    fn edit_count(&self, from: &str, to: &str) -> usize {
        edit_matrix(from, to, true)
    }
}

/// Selects a distance strategy by name, for configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DistanceKind {
    /// [`Levenshtein`].
    #[default]
    Levenshtein,
    /// [`DamerauLevenshtein`].
    DamerauLevenshtein,
}

impl DistanceStrategy for DistanceKind {
    fn edit_count(&self, from: &str, to: &str) -> usize {
        match self {
            DistanceKind::Levenshtein => Levenshtein.edit_count(from, to),
            DistanceKind::DamerauLevenshtein => DamerauLevenshtein.edit_count(from, to),
        }
    }
}

fn edit_matrix(from: &str, to: &str, transpositions: bool) -> usize {
    let a: Vec<char> = from.chars().collect();
    let b: Vec<char> = to.chars().collect();

    if a.is_empty() {
        return b.len();
    }
    if b.is_empty() {
        return a.len();
    }

    let n = b.len();
    let mut two_ago = vec![0; n + 1];
    let mut prev_row: Vec<usize> = (0..=n).collect();
    let mut curr_row = vec![0; n + 1];

    for r in 1..=a.len() {
        curr_row[0] = r;
        for c in 1..=n {
            let cost = usize::from(a[r - 1] != b[c - 1]);
            curr_row[c] = if cost == 0 {
                prev_row[c - 1]
            } else {
                prev_row[c - 1].min(prev_row[c]).min(curr_row[c - 1]) + 1
            };

            if transpositions && r > 1 && c > 1 && a[r - 1] == b[c - 2] && a[r - 2] == b[c - 1] {
                curr_row[c] = curr_row[c].min(two_ago[c - 2] + cost);
            }
        }

        std::mem::swap(&mut two_ago, &mut prev_row);
        std::mem::swap(&mut prev_row, &mut curr_row);
    }

    prev_row[n]
}
