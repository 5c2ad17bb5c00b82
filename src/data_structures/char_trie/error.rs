//! Error types for the character trie.
//!
//! Trie queries never fail; the only fallible path is building a
//! [`WeightTable`](super::WeightTable) from an external frequency source.

/// Errors that can occur while building a weight table.
#[derive(Debug, thiserror::Error)]
pub enum WeightTableError {
    /// The source held no header row.
    #[error("Weight table source is empty")]
    EmptySource,

    /// A row has too few columns to hold a key, follow-on data and a total.
    #[error("Line {line}: expected at least {expected} columns, found {found}")]
    MissingColumns {
        /// One-based line number.
        line: usize,
        /// Minimum column count.
        expected: usize,
        /// Columns actually present.
        found: usize,
    },

    /// A frequency cell could not be parsed as a number.
    #[error("Line {line}, column {column}: invalid number '{value}'")]
    InvalidNumber {
        /// One-based line number.
        line: usize,
        /// One-based column number.
        column: usize,
        /// The offending cell.
        value: String,
    },

    /// A weight fell outside `[0, 1]`.
    #[error("Weight {weight} for ({preceding:?}, {following:?}) is outside [0, 1]")]
    WeightOutOfRange {
        /// Preceding character of the pair.
        preceding: char,
        /// Following character of the pair.
        following: char,
        /// The rejected weight.
        weight: f32,
    },

    /// Reading the source failed.
    #[error("Failed to read weight table: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for weight table construction.
pub type WeightTableResult<T> = Result<T, WeightTableError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = WeightTableError::EmptySource;
        assert_eq!(err.to_string(), "Weight table source is empty");

        let err = WeightTableError::InvalidNumber {
            line: 3,
            column: 4,
            value: "x".to_string(),
        };
        assert_eq!(err.to_string(), "Line 3, column 4: invalid number 'x'");

        let err = WeightTableError::MissingColumns {
            line: 2,
            expected: 4,
            found: 1,
        };
        assert_eq!(err.to_string(), "Line 2: expected at least 4 columns, found 1");
    }
}
