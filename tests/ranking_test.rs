//! Integration tests for fuzzy ranking over a trie-backed dictionary.

use wordscope_lib::config::ranking::RankingConfig;
use wordscope_lib::sequence::{
    longest_common_subsequence, DamerauLevenshtein, DistanceCalculator, DistanceKind,
    TermLengthNormalization,
};
use wordscope_lib::{CharTrie, FuzzyRanker};

fn dictionary() -> CharTrie {
    let mut trie = CharTrie::new();
    trie.add_terms(["form", "from", "fork", "farm", "forum", "storm", "frame"]);
    trie
}

#[test]
fn test_rank_dictionary_terms() {
    let trie = dictionary();
    let ranker = FuzzyRanker::new();

    let ranked = ranker.rank(trie.get_all_terms(), "form", 1);
    let terms: Vec<&str> = ranked.iter().map(|r| r.term.as_str()).collect();
    // Lexical enumeration order is kept among equal distances.
    assert_eq!(terms, vec!["form", "farm", "fork", "forum"]);
    assert_eq!(ranked[0].edit_count, 0);
    assert_eq!(ranked[0].similarity, 1.0);
    assert!(ranked[1..].iter().all(|r| r.edit_count == 1));
}

#[test]
fn test_transpositions_depend_on_strategy() {
    let trie = dictionary();
    let terms = trie.get_all_terms();

    let levenshtein = FuzzyRanker::new();
    assert!(!levenshtein
        .within_distance(&terms, "form", 1)
        .contains(&"from".to_string()));

    let config = RankingConfig {
        strategy: DistanceKind::DamerauLevenshtein,
        ..RankingConfig::default()
    };
    let damerau = FuzzyRanker::from_config(&config);
    assert!(damerau
        .within_distance(&terms, "form", 1)
        .contains(&"from".to_string()));

    // A per-call calculator leaves the ranker's default untouched.
    let calculator = DistanceCalculator::new(DamerauLevenshtein, TermLengthNormalization);
    let explicit = FuzzyRanker::within_distance_using(&terms, "form", 1, &calculator);
    assert_eq!(explicit, damerau.within_distance(&terms, "form", 1));
    assert_eq!(levenshtein.calculator().edit_count("form", "from"), 2);
}

#[test]
fn test_lcs_of_dictionary_terms() {
    assert_eq!(longest_common_subsequence("storm", "forum"), "orm");
    assert_eq!(longest_common_subsequence("frame", ""), "");
}
