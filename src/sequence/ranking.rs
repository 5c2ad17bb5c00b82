//! Filtering and ordering a term collection by edit distance to a query.

use serde::Serialize;

use super::calculator::DistanceCalculator;
use crate::config::ranking::RankingConfig;

/// A candidate that survived ranking.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankedTerm {
    /// The candidate term.
    pub term: String,
    /// Raw number of edits between the query and the term.
    pub edit_count: usize,
    /// Normalized similarity between the query and the term.
    pub similarity: f64,
}

/// Ranks terms by edit distance from a query.
///
/// The ranker owns a default [`DistanceCalculator`] used by every call that
/// does not name one explicitly. Replacing it with
/// [`FuzzyRanker::set_calculator`] affects subsequent calls on this ranker
/// only.
#[derive(Debug, Clone, Default)]
pub struct FuzzyRanker {
    calculator: DistanceCalculator,
}

impl FuzzyRanker {
    /// Creates a ranker using Levenshtein distance and term-length
    /// normalization.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a ranker with `calculator` as its default.
    pub fn with_calculator(calculator: DistanceCalculator) -> Self {
        Self { calculator }
    }

    /// Creates a ranker using the configured distance strategy.
    pub fn from_config(config: &RankingConfig) -> Self {
        Self::with_calculator(DistanceCalculator::with_strategy(config.strategy))
    }

    /// The default calculator.
    pub fn calculator(&self) -> &DistanceCalculator {
        &self.calculator
    }

    /// Replaces the default calculator.
    pub fn set_calculator(&mut self, calculator: DistanceCalculator) {
        self.calculator = calculator;
    }

    /// Terms within `max_distance` edits of `query`, closest first.
    ///
    /// Terms at the same distance keep their relative input order.
    pub fn within_distance<I, S>(&self, terms: I, query: &str, max_distance: usize) -> Vec<String>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self::within_distance_using(terms, query, max_distance, &self.calculator)
    }

    /// Like [`FuzzyRanker::within_distance`] with an explicit calculator.
    pub fn within_distance_using<I, S>(
        terms: I,
        query: &str,
        max_distance: usize,
        calculator: &DistanceCalculator,
    ) -> Vec<String>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut scored: Vec<(usize, String)> = terms
            .into_iter()
            .filter_map(|term| {
                let term = term.as_ref();
                let count = calculator.edit_count(query, term);
                (count <= max_distance).then(|| (count, term.to_string()))
            })
            .collect();
        scored.sort_by_key(|(count, _)| *count);
        scored.into_iter().map(|(_, term)| term).collect()
    }

    /// Terms within `max_distance` edits of `query` with their scores,
    /// closest first.
    pub fn rank<I, S>(&self, terms: I, query: &str, max_distance: usize) -> Vec<RankedTerm>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self::rank_using(terms, query, max_distance, &self.calculator)
    }

    /// Like [`FuzzyRanker::rank`] with an explicit calculator.
    pub fn rank_using<I, S>(
        terms: I,
        query: &str,
        max_distance: usize,
        calculator: &DistanceCalculator,
    ) -> Vec<RankedTerm>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut ranked: Vec<RankedTerm> = terms
            .into_iter()
            .filter_map(|term| {
                let term = term.as_ref();
                let edit_count = calculator.edit_count(query, term);
                (edit_count <= max_distance).then(|| RankedTerm {
                    term: term.to_string(),
                    edit_count,
                    similarity: calculator.normalized_similarity(query, term),
                })
            })
            .collect();
        ranked.sort_by_key(|ranked| ranked.edit_count);
        ranked
    }
}
