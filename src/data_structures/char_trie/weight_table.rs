//! Character transition weights for frequency-ordered tries.
//!
//! A [`WeightTable`] maps a `(preceding, following)` character pair to the
//! expected probability that `following` comes directly after `preceding`.
//! Transitions out of the root use [`WeightTable::ROOT`] as the preceding
//! character. Pairs that were never observed weigh [`WeightTable::MIN_WEIGHT`].

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use fnv::FnvHashMap;

use super::error::{WeightTableError, WeightTableResult};

/// Header and row label naming the root transition in frequency sources.
const ROOT_LABEL: &str = "FIRST";

/// Read-only lookup of character transition weights.
#[derive(Debug, Clone, Default)]
pub struct WeightTable {
    weights: FnvHashMap<(char, char), f32>,
}

impl WeightTable {
    /// Preceding-character key used for transitions out of the root.
    pub const ROOT: char = '\0';

    /// Weight of any pair not present in the table.
    pub const MIN_WEIGHT: f32 = 0.0;

    /// Creates an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a table from `(preceding, following, weight)` triples.
    pub fn from_pairs<I>(pairs: I) -> WeightTableResult<Self>
    where
        I: IntoIterator<Item = (char, char, f32)>,
    {
        let mut table = Self::new();
        for (preceding, following, weight) in pairs {
            table.insert(preceding, following, weight)?;
        }
        Ok(table)
    }

    /// Records the weight of one transition, replacing any earlier value.
    pub fn insert(&mut self, preceding: char, following: char, weight: f32) -> WeightTableResult<()> {
        if !(Self::MIN_WEIGHT..=1.0).contains(&weight) {
            return Err(WeightTableError::WeightOutOfRange {
                preceding,
                following,
                weight,
            });
        }
        self.weights.insert((preceding, following), weight);
        Ok(())
    }

    /// Weight of `following` directly after `preceding`.
    pub fn weight(&self, preceding: char, following: char) -> f32 {
        self.weights
            .get(&(preceding, following))
            .copied()
            .unwrap_or(Self::MIN_WEIGHT)
    }

    /// Number of recorded transitions.
    pub fn len(&self) -> usize {
        self.weights.len()
    }

    /// Whether no transitions have been recorded.
    pub fn is_empty(&self) -> bool {
        self.weights.is_empty()
    }

    /// Loads a table from a character frequency CSV file.
    ///
    /// See [`WeightTable::from_csv_reader`] for the expected layout.
    pub fn from_csv_path<P: AsRef<Path>>(path: P) -> WeightTableResult<Self> {
        let file = File::open(path.as_ref())?;
        Self::from_csv_reader(BufReader::new(file))
    }

    /// Loads a table from character frequency counts in CSV form.
    ///
    /// The first line is a header. Its first two columns and its
    /// second-to-last column are bookkeeping; the columns in between name the
    /// following characters and the last column holds each row's total.
    /// Every following line starts with the preceding character (`FIRST`
    /// for the root) and carries one raw count per following character:
    ///
    /// ```text
    /// CHAR,FIRST,a,b,c,LAST,TOTAL
    /// FIRST,0,5,3,2,0,10
    /// a,5,0,1,3,0,4
    /// ```
    ///
    /// Each weight is `count / total`, or zero when the total is zero.
    pub fn from_csv_reader<R: BufRead>(reader: R) -> WeightTableResult<Self> {
        let mut lines = reader.lines().enumerate();

        let header: Vec<String> = loop {
            match lines.next() {
                None => return Err(WeightTableError::EmptySource),
                Some((_, line)) => {
                    let line = line?;
                    if !line.trim().is_empty() {
                        break line.split(',').map(|cell| cell.trim().to_string()).collect();
                    }
                }
            }
        };

        const MIN_COLUMNS: usize = 4;
        if header.len() < MIN_COLUMNS {
            return Err(WeightTableError::MissingColumns {
                line: 1,
                expected: MIN_COLUMNS,
                found: header.len(),
            });
        }

        let total_column = header.len() - 1;
        let following: Vec<Option<char>> = header[2..header.len() - 2]
            .iter()
            .map(|label| label.chars().next())
            .collect();

        let mut table = Self::new();
        for (index, line) in lines {
            let line = line?;
            if line.trim().is_empty() {
                continue;
            }
            let line_number = index + 1;
            let cells: Vec<&str> = line.split(',').map(str::trim).collect();
            if cells.len() < header.len() {
                return Err(WeightTableError::MissingColumns {
                    line: line_number,
                    expected: header.len(),
                    found: cells.len(),
                });
            }

            let preceding = match cells[0] {
                ROOT_LABEL => Self::ROOT,
                label => match label.chars().next() {
                    Some(c) => c,
                    None => continue,
                },
            };

            let total = parse_count(cells[total_column], line_number, total_column)?;
            for (offset, next) in following.iter().enumerate() {
                let Some(next) = *next else { continue };
                let column = offset + 2;
                let count = parse_count(cells[column], line_number, column)?;
                let weight = if total == 0.0 {
                    Self::MIN_WEIGHT
                } else {
                    count / total
                };
                table.insert(preceding, next, weight)?;
            }
        }

        tracing::debug!(entries = table.len(), "weight table loaded");
        Ok(table)
    }
}

fn parse_count(cell: &str, line: usize, column: usize) -> WeightTableResult<f32> {
    cell.parse::<f32>()
        .map_err(|_| WeightTableError::InvalidNumber {
            line,
            column: column + 1,
            value: cell.to_string(),
        })
}
