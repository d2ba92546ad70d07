//! Command-line arguments.

use clap::{CommandFactory, Parser};

/// Instant coding answers via the command line.
#[derive(Debug, Clone, Parser)]
#[command(name = "howdoi", about, disable_version_flag = true)]
pub struct Cli {
    /// The question to answer.
    #[arg(value_name = "QUERY")]
    pub query: Vec<String>,

    /// Select the answer in the specified position.
    #[arg(short, long, default_value_t = 1, value_parser = clap::value_parser!(u32).range(1..))]
    pub pos: u32,

    /// Display the full text of the answer.
    #[arg(short, long)]
    pub all: bool,

    /// Display only the answer link.
    #[arg(short, long)]
    pub link: bool,

    /// Enable colorized output.
    #[arg(short, long)]
    pub color: bool,

    /// Number of answers to return.
    #[arg(short, long, default_value_t = 1, value_parser = clap::value_parser!(u32).range(1..))]
    pub num_answers: u32,

    /// Clear the cache.
    #[arg(short = 'C', long)]
    pub clear_cache: bool,

    /// Display the current version of howdoi.
    #[arg(short, long)]
    pub version: bool,
}

impl Cli {
    /// Full help text, printed when no query is given.
    pub fn help_text() -> String {
        Self::command().render_help().to_string()
    }
}
