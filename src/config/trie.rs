//! Trie configuration module.
//!
//! This module defines how the dictionary trie is built: the ordering policy
//! for children, the optional frequency table backing weighted ordering, the
//! pattern search algorithm and the input filters.

use super::ConfigResult;
use super::Validate;
use crate::data_structures::char_trie::{PatternSearchKind, DEFAULT_WILDCARD};
use crate::error::config::ConfigError;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Ordering policy for the children of each trie node.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum NodeOrdering {
    /// Ascending character value
    #[default]
    Lexical,
    /// Descending character transition frequency
    Weighted,
}

/// Trie configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrieConfig {
    /// Ordering policy for node children
    pub ordering: NodeOrdering,

    /// Character frequency CSV used by weighted ordering
    pub weight_table: Option<PathBuf>,

    /// Algorithm answering wildcard pattern queries
    pub pattern_search: PatternSearchKind,

    /// Character matching any single character in patterns
    pub wildcard: char,

    /// Keep only letters and spaces from inserted terms
    pub letters_only: bool,
}

impl Default for TrieConfig {
    fn default() -> Self {
        Self {
            ordering: NodeOrdering::default(),
            weight_table: None,
            pattern_search: PatternSearchKind::default(),
            wildcard: DEFAULT_WILDCARD,
            letters_only: false,
        }
    }
}

impl TrieConfig {
    /// Sets the ordering policy.
    pub fn with_ordering(mut self, ordering: NodeOrdering) -> Self {
        self.ordering = ordering;
        self
    }

    /// Sets the frequency table path and switches to weighted ordering.
    pub fn with_weight_table<P: Into<PathBuf>>(mut self, path: P) -> Self {
        self.ordering = NodeOrdering::Weighted;
        self.weight_table = Some(path.into());
        self
    }

    /// Sets the pattern search algorithm.
    pub fn with_pattern_search(mut self, pattern_search: PatternSearchKind) -> Self {
        self.pattern_search = pattern_search;
        self
    }

    /// Sets the wildcard character.
    pub fn with_wildcard(mut self, wildcard: char) -> Self {
        self.wildcard = wildcard;
        self
    }
}

impl Validate for TrieConfig {
    fn validate(&self) -> ConfigResult<()> {
        if self.ordering == NodeOrdering::Weighted && self.weight_table.is_none() {
            return Err(ConfigError::MissingValue(
                "trie.weight_table is required for weighted ordering".to_string(),
            ));
        }

        if self.wildcard.is_alphanumeric() || self.wildcard.is_whitespace() {
            return Err(ConfigError::ValidationError(format!(
                "wildcard {:?} would shadow dictionary characters",
                self.wildcard
            )));
        }

        Ok(())
    }
}
