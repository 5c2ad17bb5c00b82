//! Character Trie Implementation
//!
//! This module provides an ordered, sibling-linked character trie used as an
//! in-memory term dictionary. It answers exact membership, prefix
//! enumeration, length and wildcard pattern queries, and reports structural
//! changes to registered listeners.
//!
//! Terms are stored lower-cased. Before insertion each term passes through an
//! optional [`TermFilter`] and then, character by character, through an
//! optional [`CharFilter`]; either may skip its input. The order of each
//! node's children is decided by the trie's [`NodeFactory`].

mod error;
mod event;
mod factory;
mod filter;
mod node;
mod pattern;
mod weight_table;

#[cfg(test)]
mod tests;

use std::borrow::Cow;
use std::fmt;
use std::sync::Arc;

pub use error::{WeightTableError, WeightTableResult};
pub use event::{EventChannel, ListenerId, NodeEvent, NodeEventListeners, NodeListener};
pub use factory::{LexicalNodeFactory, NodeFactory, WeightedNodeFactory};
pub use filter::{CharFilter, LetterCharFilter, TermFilter};
pub use node::{Children, NodeArena, NodeId, Probe, Slot, TrieNode};
pub use pattern::{
    compile_pattern, NodeGraph, PatternSearchKind, PatternSearchStrategy, PatternToken,
    QueuePatternSearch, RecursivePatternSearch,
};
pub use weight_table::WeightTable;

use crate::config::trie::{NodeOrdering, TrieConfig};
use crate::error::config::ConfigError;
use crate::error::WordscopeResult;

/// Wildcard used by pattern queries unless configured otherwise.
pub const DEFAULT_WILDCARD: char = '~';

/// An ordered character trie holding a case-insensitive term dictionary.
///
/// Key features:
/// * Pluggable child ordering (lexical or frequency weighted)
/// * Term and character filtering on insertion
/// * Prefix, length-range and wildcard pattern queries
/// * Four-channel change notifications
///
/// Nodes are never removed; the trie only grows.
pub struct CharTrie {
    arena: NodeArena,
    word_count: usize,
    char_filter: Option<Box<dyn CharFilter>>,
    term_filter: Option<Box<dyn TermFilter>>,
    factory: Box<dyn NodeFactory>,
    pattern_search: Box<dyn PatternSearchStrategy>,
    wildcard: char,
    listeners: NodeEventListeners,
}

impl CharTrie {
    /// Creates an empty trie with lexical ordering and no filters.
    pub fn new() -> Self {
        Self::builder().build()
    }

    /// Starts configuring a trie.
    pub fn builder() -> CharTrieBuilder {
        CharTrieBuilder::default()
    }

    /// Builds an empty trie as described by `config`.
    ///
    /// # Arguments
    ///
    /// * `config` - Trie configuration.
    ///
    /// # Returns
    ///
    /// * `Ok(CharTrie)` - An empty trie.
    /// * `Err(WordscopeError)` - If weighted ordering was requested without a
    ///   weight table, or the weight table could not be loaded.
    pub fn from_config(config: &TrieConfig) -> WordscopeResult<Self> {
        let mut builder = Self::builder()
            .with_pattern_search(config.pattern_search)
            .with_wildcard(config.wildcard);

        if config.letters_only {
            builder = builder.with_char_filter(LetterCharFilter);
        }

        builder = match config.ordering {
            NodeOrdering::Lexical => builder.with_node_factory(LexicalNodeFactory),
            NodeOrdering::Weighted => {
                let path = config.weight_table.as_ref().ok_or_else(|| {
                    ConfigError::MissingValue(
                        "trie.weight_table is required for weighted ordering".to_string(),
                    )
                })?;
                let table = WeightTable::from_csv_path(path)?;
                builder.with_node_factory(WeightedNodeFactory::new(table))
            }
        };

        tracing::info!(
            ordering = ?config.ordering,
            pattern_search = ?config.pattern_search,
            wildcard = %config.wildcard,
            letters_only = config.letters_only,
            "Building trie from configuration"
        );
        Ok(builder.build())
    }

    /// Adds a term to the dictionary.
    ///
    /// The term is filtered and lower-cased first. Terms the filters reduce
    /// to nothing are ignored. Adding a term that is already present leaves
    /// the word count unchanged.
    ///
    /// # Arguments
    ///
    /// * `term` - The term to add.
    pub fn add_term(&mut self, term: &str) {
        let filtered = match &self.term_filter {
            Some(filter) => match filter.apply(term) {
                Some(filtered) => Cow::Owned(filtered),
                None => {
                    tracing::debug!(term, "Term skipped by term filter");
                    return;
                }
            },
            None => Cow::Borrowed(term),
        };

        let chars: Vec<char> = filtered
            .chars()
            .filter_map(|c| match &self.char_filter {
                Some(filter) => filter.apply(c),
                None => Some(c),
            })
            .flat_map(char::to_lowercase)
            .collect();
        if chars.is_empty() {
            tracing::debug!(term, "Term skipped, no characters left after filtering");
            return;
        }

        let last = chars.len() - 1;
        let mut current = self.arena.root();
        let mut position = 0;
        while position < chars.len() {
            let Some(child) = self.factory.get_child(&self.arena, current, chars[position]) else {
                break;
            };
            if position < last {
                self.listeners
                    .dispatch(EventChannel::CharacterAdded, &self.arena, child);
            }
            current = child;
            position += 1;
        }

        if position == chars.len() {
            if self.arena.node(current).is_terminus() {
                self.listeners
                    .dispatch(EventChannel::TerminusCharacterAdded, &self.arena, current);
            } else {
                self.factory.convert_to_terminus(&mut self.arena, current);
                self.listeners
                    .dispatch(EventChannel::TerminusNodeAdded, &self.arena, current);
                self.word_count += 1;
            }
            return;
        }

        for &value in &chars[position..last] {
            current = self.factory.add_child(&mut self.arena, current, value);
            self.listeners
                .dispatch(EventChannel::NodeAdded, &self.arena, current);
        }
        current = self
            .factory
            .add_child_terminus(&mut self.arena, current, chars[last]);
        self.listeners
            .dispatch(EventChannel::TerminusNodeAdded, &self.arena, current);
        self.word_count += 1;
    }

    /// Adds every term of `terms`.
    pub fn add_terms<I, S>(&mut self, terms: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for term in terms {
            self.add_term(term.as_ref());
        }
    }

    /// Returns `true` if `term` was added as a complete term.
    ///
    /// Matching is case-insensitive. A path that exists only as the prefix of
    /// longer terms does not count.
    pub fn contains(&self, term: &str) -> bool {
        match self.walk(self.arena.root(), &lowercase(term)) {
            Some(node) if !term.is_empty() => self.arena.node(node).is_terminus(),
            _ => false,
        }
    }

    /// Returns every term starting with `prefix`.
    ///
    /// The prefix is matched case-insensitively. If the prefix itself is a
    /// term it is included. An empty prefix returns every term.
    pub fn find_terms(&self, prefix: &str) -> Vec<String> {
        self.find_terms_from(self.arena.root(), prefix)
    }

    /// Returns every term below `start` whose path from `start` begins with
    /// `prefix`.
    ///
    /// Returned terms are the lower-cased prefix followed by the rest of the
    /// path; characters above `start` are not included. `start` itself is
    /// never returned.
    pub fn find_terms_from(&self, start: NodeId, prefix: &str) -> Vec<String> {
        let prefix_chars = lowercase(prefix);
        let Some(node) = self.walk(start, &prefix_chars) else {
            return Vec::new();
        };

        let mut terms = Vec::new();
        let mut buffer: String = prefix_chars.iter().collect();
        if !prefix_chars.is_empty() && self.arena.node(node).is_terminus() {
            terms.push(buffer.clone());
        }
        self.collect_terms(node, &mut buffer, prefix_chars.len(), usize::MAX, &mut terms);
        terms
    }

    /// Returns every term in the dictionary.
    pub fn get_all_terms(&self) -> Vec<String> {
        self.find_terms_in_length_range(0, usize::MAX)
    }

    /// Returns every term exactly `length` characters long.
    pub fn find_all_terms_of_length(&self, length: usize) -> Vec<String> {
        self.find_terms_in_length_range(length, length)
    }

    /// Returns every term whose length lies in `min..=max`.
    ///
    /// When `max` is less than `min` the range collapses to `min..=min`.
    pub fn find_all_terms_in_length_range(&self, min: usize, max: usize) -> Vec<String> {
        self.find_terms_in_length_range(min, max.max(min))
    }

    fn find_terms_in_length_range(&self, min: usize, max: usize) -> Vec<String> {
        let mut terms = Vec::new();
        let mut buffer = String::new();
        self.collect_terms(self.arena.root(), &mut buffer, 0, max, &mut terms);
        if min > 0 {
            terms.retain(|term| term.chars().count() >= min);
        }
        terms
    }

    /// Returns every term matching `pattern`.
    ///
    /// Each occurrence of the wildcard matches exactly one arbitrary
    /// character; all other characters match case-insensitively. An empty
    /// pattern matches nothing.
    pub fn find_pattern(&self, pattern: &str) -> Vec<String> {
        let graph = NodeGraph::new(&self.arena, self.factory.as_ref());
        self.pattern_search.find_pattern(graph, pattern, self.wildcard)
    }

    /// Number of distinct terms in the dictionary.
    pub fn word_count(&self) -> usize {
        self.word_count
    }

    /// Alias for [`CharTrie::word_count`].
    pub fn len(&self) -> usize {
        self.word_count
    }

    /// Returns `true` if no term has been added.
    pub fn is_empty(&self) -> bool {
        self.word_count == 0
    }

    /// Number of nodes, root included.
    pub fn node_count(&self) -> usize {
        self.arena.len()
    }

    /// Character matching any single character in patterns.
    pub fn wildcard(&self) -> char {
        self.wildcard
    }

    /// Changes the pattern wildcard.
    pub fn set_wildcard(&mut self, wildcard: char) {
        self.wildcard = wildcard;
    }

    /// Replaces the pattern search algorithm.
    pub fn set_pattern_search_strategy<S>(&mut self, strategy: S)
    where
        S: PatternSearchStrategy + 'static,
    {
        self.pattern_search = Box::new(strategy);
    }

    /// The active pattern search algorithm.
    pub fn pattern_search_strategy(&self) -> &dyn PatternSearchStrategy {
        self.pattern_search.as_ref()
    }

    /// The root node.
    pub fn root(&self) -> NodeId {
        self.arena.root()
    }

    /// Borrows a node, or `None` if `id` does not belong to this trie.
    pub fn node(&self, id: NodeId) -> Option<&TrieNode> {
        self.arena.get(id)
    }

    /// Reconstructs the path from the root to `id`.
    pub fn term_of(&self, id: NodeId) -> String {
        self.arena.term(id)
    }

    /// Children of `id` in sibling order.
    pub fn children(&self, id: NodeId) -> Children<'_> {
        self.arena.children(id)
    }

    /// Returns the nodes spelling `prefix` from the root, or an empty list
    /// if the trie has no such path.
    pub fn find_sequence(&self, prefix: &str) -> Vec<NodeId> {
        let mut nodes = Vec::new();
        let mut current = self.arena.root();
        for value in lowercase(prefix) {
            match self.factory.get_child(&self.arena, current, value) {
                Some(child) => {
                    nodes.push(child);
                    current = child;
                }
                None => return Vec::new(),
            }
        }
        nodes
    }

    /// Subscribes to walked interior characters, and to every other channel.
    pub fn add_character_added_listener(&mut self, listener: Arc<dyn NodeListener>) -> ListenerId {
        self.listeners.subscribe(EventChannel::CharacterAdded, listener)
    }

    /// Cancels a subscription made with
    /// [`CharTrie::add_character_added_listener`].
    pub fn remove_character_added_listener(&mut self, id: ListenerId) -> bool {
        self.listeners.unsubscribe(EventChannel::CharacterAdded, id)
    }

    /// Subscribes to re-added terms, and to new terminus nodes.
    pub fn add_terminus_character_added_listener(
        &mut self,
        listener: Arc<dyn NodeListener>,
    ) -> ListenerId {
        self.listeners
            .subscribe(EventChannel::TerminusCharacterAdded, listener)
    }

    /// Cancels a subscription made with
    /// [`CharTrie::add_terminus_character_added_listener`].
    pub fn remove_terminus_character_added_listener(&mut self, id: ListenerId) -> bool {
        self.listeners
            .unsubscribe(EventChannel::TerminusCharacterAdded, id)
    }

    /// Subscribes to new interior nodes, and to new terminus nodes.
    pub fn add_node_added_listener(&mut self, listener: Arc<dyn NodeListener>) -> ListenerId {
        self.listeners.subscribe(EventChannel::NodeAdded, listener)
    }

    /// Cancels a subscription made with [`CharTrie::add_node_added_listener`].
    pub fn remove_node_added_listener(&mut self, id: ListenerId) -> bool {
        self.listeners.unsubscribe(EventChannel::NodeAdded, id)
    }

    /// Subscribes to new terminus nodes only.
    pub fn add_terminus_node_added_listener(&mut self, listener: Arc<dyn NodeListener>) -> ListenerId {
        self.listeners
            .subscribe(EventChannel::TerminusNodeAdded, listener)
    }

    /// Cancels a subscription made with
    /// [`CharTrie::add_terminus_node_added_listener`].
    pub fn remove_terminus_node_added_listener(&mut self, id: ListenerId) -> bool {
        self.listeners
            .unsubscribe(EventChannel::TerminusNodeAdded, id)
    }

    fn walk(&self, start: NodeId, chars: &[char]) -> Option<NodeId> {
        chars.iter().try_fold(start, |node, &value| {
            self.factory.get_child(&self.arena, node, value)
        })
    }

    /// Depth-first collection of terminus descendants of `node`, each pushed
    /// as `buffer` extended by its path. Descendants deeper than `max_len`
    /// characters in total are not visited.
    fn collect_terms(
        &self,
        node: NodeId,
        buffer: &mut String,
        depth: usize,
        max_len: usize,
        terms: &mut Vec<String>,
    ) {
        if depth >= max_len {
            return;
        }
        for child in self.arena.children(node) {
            let child_node = self.arena.node(child);
            buffer.push(child_node.value());
            if child_node.is_terminus() {
                terms.push(buffer.clone());
            }
            self.collect_terms(child, buffer, depth + 1, max_len, terms);
            buffer.pop();
        }
    }
}

impl Default for CharTrie {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for CharTrie {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CharTrie")
            .field("word_count", &self.word_count)
            .field("nodes", &self.arena.len())
            .field("factory", &self.factory)
            .field("pattern_search", &self.pattern_search)
            .field("wildcard", &self.wildcard)
            .field("char_filter", &self.char_filter.is_some())
            .field("term_filter", &self.term_filter.is_some())
            .field("listeners", &self.listeners)
            .finish()
    }
}

impl<S: AsRef<str>> Extend<S> for CharTrie {
    fn extend<I: IntoIterator<Item = S>>(&mut self, iter: I) {
        self.add_terms(iter);
    }
}

/// Builder for [`CharTrie`].
///
/// The factory and filters are fixed once the trie is built; the pattern
/// search strategy and wildcard can still be changed afterwards.
pub struct CharTrieBuilder {
    char_filter: Option<Box<dyn CharFilter>>,
    term_filter: Option<Box<dyn TermFilter>>,
    factory: Box<dyn NodeFactory>,
    pattern_search: Box<dyn PatternSearchStrategy>,
    wildcard: char,
}

impl Default for CharTrieBuilder {
    fn default() -> Self {
        Self {
            char_filter: None,
            term_filter: None,
            factory: Box::new(LexicalNodeFactory),
            pattern_search: Box::new(RecursivePatternSearch),
            wildcard: DEFAULT_WILDCARD,
        }
    }
}

impl CharTrieBuilder {
    /// Filters every character of inserted terms.
    pub fn with_char_filter<F: CharFilter + 'static>(mut self, filter: F) -> Self {
        self.char_filter = Some(Box::new(filter));
        self
    }

    /// Filters every inserted term before its characters are filtered.
    pub fn with_term_filter<F: TermFilter + 'static>(mut self, filter: F) -> Self {
        self.term_filter = Some(Box::new(filter));
        self
    }

    /// Orders children with `factory`.
    pub fn with_node_factory<N: NodeFactory + 'static>(mut self, factory: N) -> Self {
        self.factory = Box::new(factory);
        self
    }

    /// Answers pattern queries with `strategy`.
    pub fn with_pattern_search<S: PatternSearchStrategy + 'static>(mut self, strategy: S) -> Self {
        self.pattern_search = Box::new(strategy);
        self
    }

    /// Uses `wildcard` in pattern queries.
    pub fn with_wildcard(mut self, wildcard: char) -> Self {
        self.wildcard = wildcard;
        self
    }

    /// Builds an empty trie.
    pub fn build(self) -> CharTrie {
        CharTrie {
            arena: NodeArena::new(),
            word_count: 0,
            char_filter: self.char_filter,
            term_filter: self.term_filter,
            factory: self.factory,
            pattern_search: self.pattern_search,
            wildcard: self.wildcard,
            listeners: NodeEventListeners::new(),
        }
    }
}

impl fmt::Debug for CharTrieBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CharTrieBuilder")
            .field("factory", &self.factory)
            .field("pattern_search", &self.pattern_search)
            .field("wildcard", &self.wildcard)
            .finish_non_exhaustive()
    }
}

fn lowercase(term: &str) -> Vec<char> {
    term.chars().flat_map(char::to_lowercase).collect()
}
