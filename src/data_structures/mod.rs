//! Data structures for Wordscope.
//!
//! This module contains the dictionary structures behind Wordscope's term
//! queries. All implementations are safe Rust and single-writer: queries take
//! `&self`, mutation takes `&mut self`.

pub mod char_trie;

// Re-export common data structures
pub use char_trie::{CharTrie, CharTrieBuilder, WeightTable, WeightTableError};
