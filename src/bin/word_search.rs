//! Times word lookups in a plain list and in `OrderedTree`s of different shapes.
//!
//! The same sample of words is looked up in:
//! 1. the word list itself, scanned front to back,
//! 2. a tree built from the list in file order (a dictionary file is sorted, so this tree is
//!    one long spine),
//! 3. a tree built from the distinct words in random order,
//! 4. that same tree after rebalancing it, if it wasn't already balanced.

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use anyhow::{ensure, Context, Result};
use clap::Parser;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use tracing::level_filters::LevelFilter;
use tracing::{debug, info};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter, Layer};

use ordered_tree::OrderedTree;

/// Compare word search times in a list and in binary search trees
#[derive(Parser, Debug)]
#[command(name = "word_search")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Newline-delimited word list
    #[arg(value_name = "WORDS", default_value = "words.txt")]
    path: PathBuf,

    /// How many of the shuffled distinct words the sample is drawn from
    #[arg(short, long, default_value_t = 40_000)]
    limit: usize,

    /// Take every n-th of those words as a query
    #[arg(short, long, default_value_t = 4, value_parser = clap::value_parser!(u16).range(1..))]
    stride: u16,

    /// Seed for shuffling the distinct words
    #[arg(long, default_value_t = 0)]
    seed: u64,

    /// Debug output, repeat for more (-d, -dd, -ddd)
    #[arg(short, long, action = clap::ArgAction::Count)]
    debug: u8,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    setup_logging(cli.debug);
    run(&cli)
}

fn setup_logging(verbosity: u8) {
    let level = match verbosity {
        0 => LevelFilter::WARN,
        1 => LevelFilter::INFO,
        2 => LevelFilter::DEBUG,
        _ => LevelFilter::TRACE,
    };

    // RUST_LOG wins over the -d flags when it's set.
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::default().add_directive(level.into()));

    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_filter(filter);

    tracing_subscriber::registry().with(fmt_layer).init();
    debug!(?level, "logging initialized");
}

fn run(cli: &Cli) -> Result<()> {
    let words = read_words(&cli.path)?;
    ensure!(!words.is_empty(), "no words in {}", cli.path.display());
    info!(count = words.len(), path = %cli.path.display(), "loaded word list");

    let mut distinct: Vec<String> = words
        .iter()
        .collect::<HashSet<_>>()
        .into_iter()
        .cloned()
        .collect();
    distinct.sort();
    distinct.shuffle(&mut StdRng::seed_from_u64(cli.seed));

    let queries: Vec<_> = distinct
        .iter()
        .take(cli.limit)
        .step_by(usize::from(cli.stride))
        .cloned()
        .collect();
    info!(queries = queries.len(), "sampled query words");

    let elapsed = time_queries(&queries, |word| words.iter().any(|w| w == word));
    println!("1. {} lookups scanning the word list: {:?}", queries.len(), elapsed);

    let in_file_order: OrderedTree<_> = words.iter().cloned().collect();
    let elapsed = time_queries(&queries, |word| in_file_order.contains(word));
    report("2", "tree built in file order", &in_file_order, elapsed);
    drop(in_file_order);

    let mut shuffled: OrderedTree<_> = distinct.into_iter().collect();
    let elapsed = time_queries(&queries, |word| shuffled.contains(word));
    report("3", "tree built in random order", &shuffled, elapsed);

    if !shuffled.is_balanced() {
        shuffled.rebalance();
    }
    let elapsed = time_queries(&queries, |word| shuffled.contains(word));
    report("4", "rebalanced tree", &shuffled, elapsed);

    Ok(())
}

/// Reads one word per line, trimming whitespace and skipping blank lines.
fn read_words(path: &Path) -> Result<Vec<String>> {
    let contents = fs::read_to_string(path)
        .with_context(|| format!("failed to read word list {}", path.display()))?;

    Ok(contents
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(String::from)
        .collect())
}

/// Runs `lookup` for every query and returns how long that took. Every query comes from the
/// word list, so a miss means the container is broken.
fn time_queries(queries: &[String], mut lookup: impl FnMut(&String) -> bool) -> Duration {
    let start = Instant::now();
    let found = queries.iter().filter(|word| lookup(*word)).count();
    let elapsed = start.elapsed();

    debug_assert_eq!(found, queries.len());
    elapsed
}

fn report(step: &str, label: &str, tree: &OrderedTree<String>, elapsed: Duration) {
    println!(
        "{}. lookups in {} (height {}, balanced: {}): {:?}",
        step,
        label,
        tree.height(),
        tree.is_balanced(),
        elapsed
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn verify_cli() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parse_defaults() {
        let cli = Cli::parse_from(["word_search"]);

        assert_eq!(cli.path, PathBuf::from("words.txt"));
        assert_eq!(cli.limit, 40_000);
        assert_eq!(cli.stride, 4);
        assert_eq!(cli.debug, 0);
    }

    #[test]
    fn parse_flags() {
        let cli = Cli::parse_from(["word_search", "dict.txt", "-l", "100", "-s", "2", "-dd"]);

        assert_eq!(cli.path, PathBuf::from("dict.txt"));
        assert_eq!(cli.limit, 100);
        assert_eq!(cli.stride, 2);
        assert_eq!(cli.debug, 2);
    }

    #[test]
    fn zero_stride_is_rejected() {
        assert!(Cli::try_parse_from(["word_search", "-s", "0"]).is_err());
    }

    #[test]
    fn read_words_skips_blank_lines() {
        let path = std::env::temp_dir().join(format!("word_search_{}.txt", std::process::id()));
        fs::write(&path, "apple\n\n  banana \ncherry\n").unwrap();

        let words = read_words(&path).unwrap();
        fs::remove_file(&path).unwrap();

        assert_eq!(words, ["apple", "banana", "cherry"]);
    }

    #[test]
    fn read_words_reports_missing_file() {
        let err = read_words(Path::new("/definitely/not/here.txt")).unwrap_err();
        assert!(err.to_string().contains("failed to read word list"));
    }
}
