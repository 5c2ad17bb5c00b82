//! Tests for the configuration module.
//!
//! This module contains tests for configuration loading, validation, and for
//! building tries from configuration.

use crate::config::ranking::RankingConfig;
use crate::config::trie::{NodeOrdering, TrieConfig};
use crate::config::{ConfigLoader, LogConfig, Validate, WordscopeConfig};
use crate::data_structures::char_trie::{CharTrie, PatternSearchKind, WeightTableError};
use crate::error::config::ConfigError;
use crate::error::WordscopeError;
use crate::sequence::distance::DistanceKind;
use crate::tests::{term_strategy, TestFixture};
use proptest::prelude::*;

/// Test that default configuration can be created and is valid.
#[test]
fn test_default_config_is_valid() {
    let config = WordscopeConfig::default();
    assert!(config.validate().is_ok());
    assert_eq!(config.trie.pattern_search, PatternSearchKind::Recursive);
    assert_eq!(config.ranking.strategy, DistanceKind::Levenshtein);
}

/// Test that configuration validation catches invalid values.
#[test]
fn test_config_validation() {
    let mut config = WordscopeConfig::default();

    config.log.level = "loud".to_string();
    assert!(config.validate().is_err());

    config.log = LogConfig::default();
    config.trie.ordering = NodeOrdering::Weighted;
    assert!(config.validate().is_err());

    config.trie = TrieConfig::default();
    config.ranking = RankingConfig {
        max_distance: 1000,
        ..RankingConfig::default()
    };
    assert!(config.validate().is_err());
}

/// Test loading configuration from a file.
#[test]
fn test_load_config_from_file() {
    let fixture = TestFixture::new().unwrap();
    let config_path = fixture
        .create_file(
            "file_test.toml",
            r#"
    [trie]
    pattern_search = "queue"
    wildcard = "?"
    letters_only = true

    [ranking]
    strategy = "damerau_levenshtein"
    "#,
        )
        .unwrap();

    let loader = ConfigLoader::new(Some(&config_path), "TEST_FILE");
    let config = loader.load().unwrap();

    assert_eq!(config.trie.pattern_search, PatternSearchKind::Queue);
    assert_eq!(config.trie.wildcard, '?');
    assert!(config.trie.letters_only);
    assert_eq!(config.ranking.strategy, DistanceKind::DamerauLevenshtein);

    // Other values should be defaults
    assert_eq!(config.trie.ordering, NodeOrdering::Lexical);
    assert_eq!(config.ranking.max_distance, 2);
    assert_eq!(config.log.level, "warn");
}

/// Test loading configuration from a JSON file.
#[test]
fn test_load_config_from_json() {
    let fixture = TestFixture::new().unwrap();
    let config_path = fixture
        .create_file("json_test.json", r#"{ "ranking": { "max_distance": 4 } }"#)
        .unwrap();

    let config = ConfigLoader::new(Some(&config_path), "TEST_JSON").load().unwrap();
    assert_eq!(config.ranking.max_distance, 4);
}

/// Test loading configuration with environment variable overrides.
#[test]
fn test_env_var_override() {
    let mut fixture = TestFixture::new().unwrap();
    let config_path = fixture
        .create_file(
            "env_test.toml",
            r#"
    [ranking]
    max_distance = 1
    "#,
        )
        .unwrap();

    fixture.set_env("TEST_ENV__RANKING__MAX_DISTANCE", "3");
    fixture.set_env("TEST_ENV__LOG__LEVEL", "debug");

    let loader = ConfigLoader::new(Some(&config_path), "TEST_ENV");
    let config = loader.load().unwrap();

    // Environment variables take precedence over the file
    assert_eq!(config.ranking.max_distance, 3);
    assert_eq!(config.log.level, "debug");
}

/// Test that loading an invalid configuration file returns an error.
#[test]
fn test_load_invalid_config() {
    let fixture = TestFixture::new().unwrap();
    let config_path = fixture
        .create_file(
            "invalid.toml",
            r#"
    [trie
    wildcard = ?"
    "#,
        )
        .unwrap();

    let loader = ConfigLoader::new(Some(&config_path), "TEST_INVALID");
    assert!(matches!(loader.load(), Err(ConfigError::ParseError(_))));
}

/// Test that an explicit but missing file is reported as such.
#[test]
fn test_load_missing_file() {
    let fixture = TestFixture::new().unwrap();
    let missing = fixture.temp_dir.path().join("missing.toml");
    let loader = ConfigLoader::new(Some(&missing), "TEST_MISSING");
    assert!(matches!(loader.load(), Err(ConfigError::FileNotFound(path)) if path == missing));
}

/// Test that unsupported extensions are rejected.
#[test]
fn test_load_unsupported_extension() {
    let fixture = TestFixture::new().unwrap();
    let path = fixture.create_file("config.ini", "[trie]").unwrap();
    let loader = ConfigLoader::new(Some(&path), "TEST_EXT");
    assert!(matches!(loader.load(), Err(ConfigError::ParseError(_))));
}

/// Test that a generated configuration file loads back unchanged.
#[test]
fn test_generated_config_round_trip() {
    let fixture = TestFixture::new().unwrap();
    let generated = toml::to_string_pretty(&WordscopeConfig::default()).unwrap();
    let path = fixture.create_file("generated.toml", generated).unwrap();

    let config = ConfigLoader::new(Some(&path), "TEST_ROUND_TRIP").load().unwrap();
    assert_eq!(config.trie.wildcard, '~');
    assert_eq!(config.trie.weight_table, None);
    assert_eq!(config.ranking.max_distance, 2);
}

/// Test building a weighted trie from a configured frequency table.
#[test]
fn test_trie_from_weighted_config() {
    let fixture = TestFixture::new().unwrap();
    let table = fixture
        .create_file(
            "weights.csv",
            "CHAR,FIRST,a,b,LAST,TOTAL\nFIRST,0,1,3,0,4\na,0,0,1,0,1\nb,0,1,0,0,1\n",
        )
        .unwrap();

    let config = TrieConfig::default().with_weight_table(&table);
    let mut trie = CharTrie::from_config(&config).unwrap();
    trie.add_terms(["ab", "ba", "b"]);
    assert_eq!(trie.get_all_terms(), vec!["b", "ba", "ab"]);
}

/// Test that weighted configuration without a usable table fails to build.
#[test]
fn test_trie_from_config_errors() {
    let config = TrieConfig::default().with_ordering(NodeOrdering::Weighted);
    assert!(matches!(
        CharTrie::from_config(&config),
        Err(WordscopeError::Config(ConfigError::MissingValue(_)))
    ));

    let fixture = TestFixture::new().unwrap();
    let config = TrieConfig::default().with_weight_table(fixture.temp_dir.path().join("nope.csv"));
    assert!(matches!(
        CharTrie::from_config(&config),
        Err(WordscopeError::WeightTable(WeightTableError::Io(_)))
    ));

    let empty = fixture.create_file("empty.csv", "").unwrap();
    let config = TrieConfig::default().with_weight_table(empty);
    assert!(matches!(
        CharTrie::from_config(&config),
        Err(WordscopeError::WeightTable(WeightTableError::EmptySource))
    ));
}

proptest! {
    // Property: tries built from configuration honour the configured wildcard
    #[test]
    fn prop_configured_wildcard(term in term_strategy(8)) {
        let config = TrieConfig::default()
            .with_wildcard('*')
            .with_pattern_search(PatternSearchKind::Queue);
        let mut trie = CharTrie::from_config(&config).unwrap();
        trie.add_term(&term);

        let pattern: String = term.chars().map(|_| '*').collect();
        prop_assert_eq!(trie.find_pattern(&pattern), vec![term.clone()]);
        prop_assert!(trie.contains(&term.to_uppercase()));
    }
}
