use clap::{Parser, Subcommand};
use dioxus_logger::tracing;
use std::{
    fs::File,
    io::{BufReader, BufWriter},
    path::{Path, PathBuf},
};

use crate::{error::AppError, service::corpus};

#[derive(Parser, Debug)]
#[command(
    name = "senile-rod",
    version,
    about = "Rod, the senile Discord bot",
    long_about = "Runs the Discord bot by default.\n\n\
                  Configuration is read from the environment (and a .env file):\n  \
                  DISCORD_BOT_TOKEN is required, everything else is optional."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug, PartialEq)]
pub enum Command {
    /// Connect to Discord and run the bot (default)
    Run,

    /// Filter a chat corpus, dropping mostly-Dutch and gibberish lines
    FilterCorpus {
        /// Corpus to read, one message per line
        input: PathBuf,

        /// File to write the kept lines to
        output: PathBuf,
    },
}

/// Runs the corpus filter from `input` into `output` and logs the counts.
pub fn filter_corpus(input: &Path, output: &Path) -> Result<corpus::FilterStats, AppError> {
    let reader = BufReader::new(File::open(input)?);
    let writer = BufWriter::new(File::create(output)?);

    let stats = corpus::filter_lines(reader, writer)?;

    tracing::info!(
        "Filtered messages written to {} ({} kept, {} dropped)",
        output.display(),
        stats.kept,
        stats.dropped
    );

    Ok(stats)
}
