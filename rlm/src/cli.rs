//! CLI argument parsing for rlmcontext

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "rlm")]
#[command(author, version, about = "In-memory context index: scan, peek, chunk", long_about = None)]
pub struct Cli {
    /// Path to config file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Log level (TRACE, DEBUG, INFO, WARN, ERROR)
    #[arg(short = 'l', long = "log-level", global = true)]
    pub log_level: Option<String>,

    /// Output format
    #[arg(short, long, global = true, default_value = "text")]
    pub format: OutputFormat,

    /// Directory to load before running the command
    #[arg(short, long, global = true, default_value = ".")]
    pub root: PathBuf,

    /// Glob pattern relative to the root (default from config: **/*)
    #[arg(short, long, global = true)]
    pub pattern: Option<String>,

    /// Only load files directly under the root
    #[arg(long, global = true)]
    pub no_recursive: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Load files and print a summary
    Scan,

    /// Search loaded files for a literal string
    Peek {
        /// Text to search for
        #[arg(required = true)]
        query: String,

        /// Characters of context on each side (default: 200)
        #[arg(short, long)]
        window: Option<usize>,

        /// Maximum results to return (default: 20)
        #[arg(short, long)]
        max_results: Option<usize>,
    },

    /// Split loaded files into fixed-size chunks
    Chunk {
        /// Only chunk paths containing this substring
        #[arg(long)]
        filter: Option<String>,

        /// Chunk size in characters (default: 5000)
        #[arg(short = 's', long)]
        chunk_size: Option<usize>,
    },

    /// Show file count and total size of the loaded index
    Stats,
}

/// Output format for command results
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}
