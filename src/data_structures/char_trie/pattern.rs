//! Wildcard pattern search over a trie's node graph.
//!
//! A pattern is a fixed-length sequence where every position either names
//! one character (matched case-insensitively) or holds the wildcard, which
//! matches any single character. Only complete terms of exactly the pattern's
//! length are returned. Both strategies return the same set of terms; they
//! differ only in traversal order and in how deep they recurse.

use std::collections::VecDeque;
use std::fmt;

use serde::{Deserialize, Serialize};

use super::factory::NodeFactory;
use super::node::{NodeArena, NodeId};

/// Read-only view of a trie handed to a search strategy.
#[derive(Clone, Copy)]
pub struct NodeGraph<'a> {
    arena: &'a NodeArena,
    factory: &'a dyn NodeFactory,
}

impl<'a> NodeGraph<'a> {
    /// Wraps the nodes of a trie together with the factory that ordered them.
    pub fn new(arena: &'a NodeArena, factory: &'a dyn NodeFactory) -> Self {
        Self { arena, factory }
    }

    /// Node the search starts from.
    pub fn root(&self) -> NodeId {
        self.arena.root()
    }

    fn is_terminus(&self, id: NodeId) -> bool {
        self.arena.node(id).is_terminus()
    }

    fn term(&self, id: NodeId) -> String {
        self.arena.term(id)
    }

    fn for_each_match<F>(&self, parent: NodeId, token: PatternToken, mut visit: F)
    where
        F: FnMut(NodeId),
    {
        match token {
            PatternToken::Any => self.arena.children(parent).for_each(visit),
            PatternToken::Exact(value) => {
                if let Some(child) = self.factory.get_child(self.arena, parent, value) {
                    visit(child);
                }
            }
        }
    }
}

impl fmt::Debug for NodeGraph<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NodeGraph")
            .field("nodes", &self.arena.len())
            .field("factory", &self.factory)
            .finish()
    }
}

/// One position of a compiled pattern.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PatternToken {
    /// Matches any single character.
    Any,
    /// Matches exactly this (lower-cased) character.
    Exact(char),
}

/// Compiles `pattern` into tokens.
///
/// Characters equal to `wildcard` become [`PatternToken::Any`]; the
/// comparison happens before lower-casing so an upper-case wildcard stays a
/// wildcard.
pub fn compile_pattern(pattern: &str, wildcard: char) -> Vec<PatternToken> {
    let mut tokens = Vec::with_capacity(pattern.len());
    for c in pattern.chars() {
        if c == wildcard {
            tokens.push(PatternToken::Any);
        } else {
            tokens.extend(c.to_lowercase().map(PatternToken::Exact));
        }
    }
    tokens
}

/// Algorithm used to answer pattern queries.
pub trait PatternSearchStrategy: fmt::Debug + Send + Sync {
    /// Returns every term in `graph` matching `pattern`.
    ///
    /// An empty pattern matches nothing.
    fn find_pattern(&self, graph: NodeGraph<'_>, pattern: &str, wildcard: char) -> Vec<String>;
}

/// Depth-first search. Recursion depth is bounded by the pattern length.
#[derive(Debug, Clone, Copy, Default)]
pub struct RecursivePatternSearch;

impl RecursivePatternSearch {
    fn descend(
        graph: &NodeGraph<'_>,
        tokens: &[PatternToken],
        node: NodeId,
        terms: &mut Vec<String>,
    ) {
        let Some((&token, rest)) = tokens.split_first() else {
            if graph.is_terminus(node) {
                terms.push(graph.term(node));
            }
            return;
        };
        graph.for_each_match(node, token, |child| Self::descend(graph, rest, child, terms));
    }
}

impl PatternSearchStrategy for RecursivePatternSearch {
    fn find_pattern(&self, graph: NodeGraph<'_>, pattern: &str, wildcard: char) -> Vec<String> {
        let tokens = compile_pattern(pattern, wildcard);
        let mut terms = Vec::new();
        if !tokens.is_empty() {
            Self::descend(&graph, &tokens, graph.root(), &mut terms);
        }
        terms
    }
}

/// Breadth-first search, one pattern position per level.
///
/// Candidates for a position are queued followed by a level marker; reaching
/// the marker advances the position. Terms are collected directly from the
/// children matched at the final position.
#[derive(Debug, Clone, Copy, Default)]
pub struct QueuePatternSearch;

#[derive(Debug, Clone, Copy)]
enum QueueEntry {
    Node(NodeId),
    LevelEnd,
}

impl PatternSearchStrategy for QueuePatternSearch {
    fn find_pattern(&self, graph: NodeGraph<'_>, pattern: &str, wildcard: char) -> Vec<String> {
        let tokens = compile_pattern(pattern, wildcard);
        let mut terms = Vec::new();
        let Some(last) = tokens.len().checked_sub(1) else {
            return terms;
        };

        let mut queue = VecDeque::from([QueueEntry::Node(graph.root()), QueueEntry::LevelEnd]);
        let mut position = 0;
        while let Some(entry) = queue.pop_front() {
            match entry {
                QueueEntry::LevelEnd => {
                    position += 1;
                    if position < tokens.len() {
                        queue.push_back(QueueEntry::LevelEnd);
                    }
                }
                QueueEntry::Node(node) => {
                    graph.for_each_match(node, tokens[position], |child| {
                        if position < last {
                            queue.push_back(QueueEntry::Node(child));
                        } else if graph.is_terminus(child) {
                            terms.push(graph.term(child));
                        }
                    });
                }
            }
        }
        terms
    }
}

/// Selects a pattern search strategy by name, for configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PatternSearchKind {
    /// [`RecursivePatternSearch`].
    #[default]
    Recursive,
    /// [`QueuePatternSearch`].
    Queue,
}

impl PatternSearchStrategy for PatternSearchKind {
    fn find_pattern(&self, graph: NodeGraph<'_>, pattern: &str, wildcard: char) -> Vec<String> {
        match self {
            PatternSearchKind::Recursive => RecursivePatternSearch.find_pattern(graph, pattern, wildcard),
            PatternSearchKind::Queue => QueuePatternSearch.find_pattern(graph, pattern, wildcard),
        }
    }
}
