//! Crate-level test modules for Wordscope.
//!
//! Component tests live next to their code; this module holds the suites
//! that exercise cross-cutting pieces:
//! - Configuration loading, layering and validation
//! - Error aggregation and reporting
//! - Shared fixtures and strategies

pub mod config_tests;

pub use test_utils::{create_test_dir, term_strategy, TestFixture};
