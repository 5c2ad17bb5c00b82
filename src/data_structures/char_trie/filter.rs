//! Input filters applied to terms before they enter a trie.
//!
//! A filter either transforms its input or returns `None` to skip it. Skipping
//! is a normal outcome: a skipped character is dropped from the term, a
//! skipped term is not inserted at all.

/// Transforms or drops single characters of an incoming term.
pub trait CharFilter: Send + Sync {
    /// Returns the character to store, or `None` to drop it.
    fn apply(&self, value: char) -> Option<char>;
}

/// Transforms or rejects whole terms before character filtering.
pub trait TermFilter: Send + Sync {
    /// Returns the term to store, or `None` to skip it.
    fn apply(&self, term: &str) -> Option<String>;
}

impl<F> CharFilter for F
where
    F: Fn(char) -> Option<char> + Send + Sync,
{
    fn apply(&self, value: char) -> Option<char> {
        self(value)
    }
}

impl<F> TermFilter for F
where
    F: Fn(&str) -> Option<String> + Send + Sync,
{
    fn apply(&self, term: &str) -> Option<String> {
        self(term)
    }
}

/// Keeps letters and the space character, dropping everything else.
#[derive(Debug, Clone, Copy, Default)]
pub struct LetterCharFilter;

impl CharFilter for LetterCharFilter {
    fn apply(&self, value: char) -> Option<char> {
        if value.is_alphabetic() || value == ' ' {
            Some(value)
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filter_all(filter: &dyn CharFilter, input: &str) -> String {
        input.chars().filter_map(|c| filter.apply(c)).collect()
    }

    #[test]
    fn test_letter_filter() {
        assert_eq!(filter_all(&LetterCharFilter, "it's 4 o'clock"), "its  oclock");
        assert_eq!(filter_all(&LetterCharFilter, "Élan"), "Élan");
        assert_eq!(filter_all(&LetterCharFilter, "1234-_!"), "");
    }

    #[test]
    fn test_closure_filters() {
        let vowels_to_star = |c: char| if "aeiou".contains(c) { Some('*') } else { Some(c) };
        assert_eq!(filter_all(&vowels_to_star, "trie"), "tr**");

        let no_short_terms = |term: &str| (term.len() > 2).then(|| term.trim().to_string());
        assert_eq!(TermFilter::apply(&no_short_terms, "ab"), None);
        assert_eq!(TermFilter::apply(&no_short_terms, " abc "), Some("abc".to_string()));
    }
}
