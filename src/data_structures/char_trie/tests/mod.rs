//! Behavioural and property-based tests for the character trie.
