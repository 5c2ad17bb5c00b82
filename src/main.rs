//! Wordscope - Main entrypoint.
//!
//! This is the command-line caller for the Wordscope library. It loads
//! configuration, initializes the logging system, reads a newline separated
//! dictionary and runs a single query against it.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};
use std::process;

use clap::{Parser, Subcommand};
use serde::Serialize;
use serde_json::json;
use tracing::info;
use tracing_subscriber::EnvFilter;

use wordscope_lib::config::{load_config, LogConfig, WordscopeConfig};
use wordscope_lib::error::{report_error, ErrorContext, WordscopeError, WordscopeResult};
use wordscope_lib::sequence::longest_common_subsequence;
use wordscope_lib::{CharTrie, FuzzyRanker};

/// Command line arguments for Wordscope.
#[derive(Parser, Debug)]
#[clap(name = "wordscope", version, author, about)]
struct Args {
    /// Path to configuration file
    #[clap(short, long, value_parser)]
    config: Option<PathBuf>,

    /// Print results as JSON
    #[clap(long)]
    json: bool,

    /// Command to execute
    #[clap(subcommand)]
    command: Command,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
enum Command {
    /// Check whether a term is in the dictionary
    Contains {
        /// Newline separated dictionary file
        #[clap(short, long, value_parser)]
        dictionary: PathBuf,
        /// Term to look up
        term: String,
    },

    /// List dictionary terms starting with a prefix
    Prefix {
        /// Newline separated dictionary file
        #[clap(short, long, value_parser)]
        dictionary: PathBuf,
        /// Prefix to expand
        prefix: String,
    },

    /// List dictionary terms matching a wildcard pattern
    Pattern {
        /// Newline separated dictionary file
        #[clap(short, long, value_parser)]
        dictionary: PathBuf,
        /// Pattern, using the configured wildcard character
        pattern: String,
    },

    /// List dictionary terms within a length range
    Length {
        /// Newline separated dictionary file
        #[clap(short, long, value_parser)]
        dictionary: PathBuf,
        /// Minimum term length
        min: usize,
        /// Maximum term length, defaults to the minimum
        max: Option<usize>,
    },

    /// Rank dictionary terms by edit distance from a query
    Fuzzy {
        /// Newline separated dictionary file
        #[clap(short, long, value_parser)]
        dictionary: PathBuf,
        /// Query term
        query: String,
        /// Maximum number of edits, defaults to `ranking.max_distance`
        #[clap(short, long)]
        max_distance: Option<usize>,
    },

    /// Print the longest common subsequence of two strings
    Lcs {
        /// First string
        first: String,
        /// Second string
        second: String,
    },

    /// Print the edit distance and similarity of two strings
    Distance {
        /// First string
        first: String,
        /// Second string
        second: String,
    },

    /// Validate the configuration file
    Validate,

    /// Generate a default configuration file
    GenConfig {
        /// Path to output configuration file
        #[clap(short, long, value_parser)]
        output: PathBuf,
    },
}

/// Initialize the logging system.
///
/// `RUST_LOG` takes precedence over the configured level. Logs go to standard
/// error so query results on standard output stay machine readable.
fn init_logging(log: &LogConfig) -> WordscopeResult<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&log.level));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false);

    let result = if log.json {
        tracing::subscriber::set_global_default(builder.json().finish())
    } else {
        tracing::subscriber::set_global_default(builder.finish())
    };
    result.map_err(|e| {
        WordscopeError::Custom(format!("Failed to set global tracing subscriber: {e}"))
    })
}

/// Builds a trie from configuration and fills it from a dictionary file.
fn load_dictionary(config: &WordscopeConfig, path: &Path) -> WordscopeResult<CharTrie> {
    let mut trie = CharTrie::from_config(&config.trie)?;
    let reader = BufReader::new(File::open(path)?);
    for line in reader.lines() {
        trie.add_term(&line?);
    }
    info!(path = ?path, terms = trie.word_count(), "Dictionary loaded");
    Ok(trie)
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> WordscopeResult<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn print_terms(terms: &[String], as_json: bool) -> WordscopeResult<()> {
    if as_json {
        return print_json(terms);
    }
    for term in terms {
        println!("{term}");
    }
    Ok(())
}

fn run(args: Args, config: WordscopeConfig) -> WordscopeResult<()> {
    match args.command {
        Command::Contains { dictionary, term } => {
            let trie = load_dictionary(&config, &dictionary)?;
            let found = trie.contains(&term);
            if args.json {
                print_json(&json!({ "term": term, "contains": found }))
            } else {
                println!("{found}");
                Ok(())
            }
        }
        Command::Prefix { dictionary, prefix } => {
            let trie = load_dictionary(&config, &dictionary)?;
            print_terms(&trie.find_terms(&prefix), args.json)
        }
        Command::Pattern {
            dictionary,
            pattern,
        } => {
            let trie = load_dictionary(&config, &dictionary)?;
            print_terms(&trie.find_pattern(&pattern), args.json)
        }
        Command::Length {
            dictionary,
            min,
            max,
        } => {
            let trie = load_dictionary(&config, &dictionary)?;
            let terms = trie.find_all_terms_in_length_range(min, max.unwrap_or(min));
            print_terms(&terms, args.json)
        }
        Command::Fuzzy {
            dictionary,
            query,
            max_distance,
        } => {
            let trie = load_dictionary(&config, &dictionary)?;
            let ranker = FuzzyRanker::from_config(&config.ranking);
            let max_distance = max_distance.unwrap_or(config.ranking.max_distance);
            let ranked = ranker.rank(trie.get_all_terms(), &query, max_distance);
            if args.json {
                return print_json(&ranked);
            }
            for hit in &ranked {
                println!("{}\t{}\t{:.3}", hit.term, hit.edit_count, hit.similarity);
            }
            Ok(())
        }
        Command::Lcs { first, second } => {
            let lcs = longest_common_subsequence(&first, &second);
            if args.json {
                print_json(&json!({ "first": first, "second": second, "lcs": lcs }))
            } else {
                println!("{lcs}");
                Ok(())
            }
        }
        Command::Distance { first, second } => {
            let ranker = FuzzyRanker::from_config(&config.ranking);
            let calculator = ranker.calculator();
            let edit_count = calculator.edit_count(&first, &second);
            let similarity = calculator.normalized_similarity(&first, &second);
            if args.json {
                print_json(&json!({
                    "first": first,
                    "second": second,
                    "strategy": config.ranking.strategy,
                    "edit_count": edit_count,
                    "similarity": similarity,
                }))
            } else {
                println!("{edit_count}\t{similarity:.3}");
                Ok(())
            }
        }
        Command::Validate => {
            info!("Validating configuration");
            // Building the trie also checks that a configured weight table loads.
            CharTrie::from_config(&config.trie)?;
            println!("Configuration is valid");
            Ok(())
        }
        Command::GenConfig { output } => {
            info!("Generating default configuration");
            let default_config = WordscopeConfig::default();

            // Create parent directories if they don't exist
            if let Some(parent) = output.parent() {
                std::fs::create_dir_all(parent)?;
            }

            let toml = toml::to_string_pretty(&default_config)
                .map_err(|e| WordscopeError::Custom(format!("Failed to serialize config: {e}")))?;
            std::fs::write(&output, toml)?;

            info!("Default configuration written to {:?}", output);
            Ok(())
        }
    }
}

/// Main entry point for the application.
fn main() {
    let args = Args::parse();

    let config = match &args.command {
        // Generating a fresh file must not depend on an existing one.
        Command::GenConfig { .. } => WordscopeConfig::default(),
        _ => match load_config(args.config.as_deref()) {
            Ok(config) => config,
            Err(e) => {
                eprintln!("Configuration error: {e}");
                process::exit(1);
            }
        },
    };

    if let Err(e) = init_logging(&config.log) {
        eprintln!("{e}");
        process::exit(1);
    }
    wordscope_lib::init();

    if let Err(e) = run(args, config) {
        report_error(ErrorContext::new(e, "wordscope"));
        process::exit(1);
    }
}
