//! rlmcontext - in-memory text index for RLM-style context exploration
//!
//! Loads a directory tree's text files into memory once, then lets a caller
//! peek at literal matches with surrounding context or pull the content back
//! out in fixed-size chunks for batch processing.
//!
//! # Architecture
//!
//! ```text
//! Loader ──writes──► Index ◄──reads── Searcher
//!                      ▲
//!                      └──reads── Chunker
//! ```
//!
//! Everything lives inside one [`RlmContext`] value owned by the caller.
//! Nothing is persisted.
//!
//! # Example
//!
//! ```ignore
//! use rlmcontext::{ContextConfig, LoadOptions, RlmContext};
//!
//! let mut ctx = RlmContext::new(ContextConfig::default())?;
//! let report = ctx.load("docs", &LoadOptions::default())?;
//! println!("{}", report);
//! let hits = ctx.search("recursive")?;
//! let chunks = ctx.chunk(Some(".md"));
//! ```

pub mod chunker;
pub mod cli;
pub mod config;
mod context;
pub mod error;
pub mod index;
pub mod loader;
pub mod search;

pub use chunker::{Chunk, Chunker};
pub use context::{ContextConfig, RlmContext};
pub use error::RlmError;
pub use index::{Index, IndexStats};
pub use loader::{FileOutcome, LoadOptions, LoadReport, SkipReason};
pub use search::{SearchHit, SearchOptions};

/// Default chunk size (characters)
pub const DEFAULT_CHUNK_SIZE: usize = 5000;

/// Default context window on each side of a match (characters)
pub const DEFAULT_CONTEXT_WINDOW: usize = 200;

/// Default cap on search hits across the whole index
pub const DEFAULT_MAX_RESULTS: usize = 20;

/// Default file pattern, relative to the load root
pub const DEFAULT_PATTERN: &str = "**/*";

/// Path substrings that keep an entry out of the index
pub const DEFAULT_EXCLUDES: &[&str] = &[".git", "__pycache__", "node_modules", "dist", ".vercel", ".windsurf"];

/// Owned copy of [`DEFAULT_EXCLUDES`]
pub fn default_excludes() -> Vec<String> {
    DEFAULT_EXCLUDES.iter().map(|s| s.to_string()).collect()
}
