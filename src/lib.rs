//! Wordscope Library
//!
//! This library contains the core components of Wordscope: an in-memory,
//! case-insensitive term dictionary built on an ordered character trie, and
//! the sequence comparison kernels used to rank dictionary terms by edit
//! distance. The library is designed to be used by the `wordscope` binary,
//! but can also be used as a dependency by other projects.
//!
//! # Architecture
//!
//! - [`data_structures::char_trie`] stores terms and answers exact, prefix,
//!   length and wildcard pattern queries
//! - [`sequence`] provides edit distances, similarity normalization, longest
//!   common subsequence recovery and fuzzy ranking
//! - [`config`] and [`error`] carry the layered configuration and the error
//!   types shared by both

// Re-export public modules
pub mod config;
pub mod data_structures;
pub mod error;
pub mod sequence;

// Internal modules that are not part of the public API
#[cfg(test)]
pub(crate) mod tests;

pub use config::{load_config, WordscopeConfig};
pub use data_structures::char_trie::CharTrie;
pub use error::{WordscopeError, WordscopeResult};
pub use sequence::{DistanceCalculator, FuzzyRanker, RankedTerm};

/// Version information for Wordscope.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library initialization function.
///
/// Installs the tracing-backed error reporter. Returns `false` if a reporter
/// had already been installed.
pub fn init() -> bool {
    error::set_error_reporter(std::sync::Arc::new(error::TracingErrorReporter))
}
