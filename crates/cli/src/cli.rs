use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Chunks retrieved per question are limited to this range at the prompt.
pub const K_RANGE: std::ops::RangeInclusive<i64> = 1..=10;

/// Ask questions about a folder of PDF manuals.
///
/// The manuals are indexed once on first use; every answer is generated
/// from the passages most similar to the question.
#[derive(Parser, Debug)]
#[command(name = "manualqa", about = "Question answering over PDF manuals")]
pub struct CliArgs {
    /// Directory containing the PDF manuals (overrides PDF_DIR)
    #[arg(long, global = true)]
    pub pdf_dir: Option<PathBuf>,

    /// Directory holding the vector index (overrides INDEX_DIR)
    #[arg(long, global = true)]
    pub index_dir: Option<PathBuf>,

    /// Environment profile; keys resolve as {PROFILE}_{KEY} first
    #[arg(long, global = true, env = "MANUALQA_PROFILE")]
    pub profile: Option<String>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Build the index if it does not exist yet
    Ingest,

    /// Answer a single question and exit
    Ask {
        /// Passages to retrieve (1-10, default DEFAULT_K)
        #[arg(short, long, value_parser = clap::value_parser!(u8).range(K_RANGE))]
        k: Option<u8>,

        /// The question; remaining words are joined with spaces
        #[arg(required = true, num_args = 1..)]
        question: Vec<String>,
    },

    /// Interactive session (default)
    Chat {
        /// Passages to retrieve (1-10, default DEFAULT_K)
        #[arg(short, long, value_parser = clap::value_parser!(u8).range(K_RANGE))]
        k: Option<u8>,
    },

    /// Show index metadata and whether the manuals changed since the build
    Status,
}

impl CliArgs {
    pub fn command(&self) -> Command {
        self.command.clone().unwrap_or(Command::Chat { k: None })
    }
}
