use anyhow::Result;
use chrono::TimeDelta;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;
use ulang::add::add;
use ulang::conversation::{converse, Scenario};
use ulang::init::init;
use ulang::journal::journal;
use ulang::lookup::lookup;
use ulang::progress::progress;
use ulang::review::review;
use ulang::sentence::sentence;
use ulang::SchedulerConfig;

#[derive(Subcommand)]
enum Command {
    /// Create a vocabulary file and add words to it
    Init {
        /// Path to vocabulary file (CSV)
        path: PathBuf,
    },
    /// Add words to an existing vocabulary file
    Add {
        /// Path to vocabulary file (CSV)
        path: PathBuf,
    },
    /// Review the words of a vocabulary file
    Review {
        /// Path to vocabulary file (CSV)
        path: PathBuf,
        /// Never schedule a review sooner than this many minutes ahead
        #[arg(long, value_name = "MINUTES")]
        min_interval_minutes: Option<u32>,
    },
    /// Look up a selected word in a vocabulary file
    Lookup {
        /// Path to vocabulary file (CSV)
        path: PathBuf,
        /// Word as selected, punctuation allowed
        word: String,
    },
    /// Get feedback on a journal entry
    Journal {
        /// Path to a text file with the entry
        path: PathBuf,
    },
    /// Build a sentence from the word bank and check its tense
    Sentence,
    /// Practice a short conversation
    Converse {
        #[arg(value_enum, default_value = "coffee")]
        scenario: Scenario,
    },
    /// Show earned badges
    Progress {
        /// Path to vocabulary file (CSV)
        path: PathBuf,
        /// Number of finished conversations
        #[arg(long, default_value = "0")]
        conversations: usize,
        /// Number of journal entries written
        #[arg(long, default_value = "0")]
        journal_entries: usize,
    },
}

/// Spaced-repetition vocabulary trainer.
#[derive(Parser)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("ulang=warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Cli::parse();

    match args.command {
        Command::Init { path } => init(&path),
        Command::Add { path } => add(&path),
        Command::Review {
            path,
            min_interval_minutes,
        } => {
            let config = SchedulerConfig {
                min_interval: min_interval_minutes.map(|m| TimeDelta::minutes(i64::from(m))),
            };
            review(&path, config)
        }
        Command::Lookup { path, word } => lookup(&path, &word),
        Command::Journal { path } => journal(&path),
        Command::Sentence => sentence(),
        Command::Converse { scenario } => converse(scenario),
        Command::Progress {
            path,
            conversations,
            journal_entries,
        } => progress(&path, conversations, journal_entries),
    }
}
