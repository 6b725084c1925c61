//! Core RlmContext implementation

use std::path::Path;

use tracing::debug;

use crate::chunker::{Chunk, Chunker};
use crate::error::RlmError;
use crate::index::{Index, IndexStats};
use crate::loader::{LoadOptions, LoadReport, Loader};
use crate::search::{self, SearchHit, SearchOptions};

/// Settings fixed for the lifetime of a context
#[derive(Debug, Clone)]
pub struct ContextConfig {
    /// Characters per chunk
    pub chunk_size: usize,
    /// Default characters of context on each side of a search hit
    pub context_window: usize,
    /// Default cap on search hits
    pub max_results: usize,
    /// Path substrings never loaded
    pub excludes: Vec<String>,
}

impl Default for ContextConfig {
    fn default() -> Self {
        Self {
            chunk_size: crate::DEFAULT_CHUNK_SIZE,
            context_window: crate::DEFAULT_CONTEXT_WINDOW,
            max_results: crate::DEFAULT_MAX_RESULTS,
            excludes: crate::default_excludes(),
        }
    }
}

/// Owns one index and the settings used to fill and read it
pub struct RlmContext {
    config: ContextConfig,
    chunker: Chunker,
    index: Index,
}

impl RlmContext {
    /// Create an empty context
    pub fn new(config: ContextConfig) -> Result<Self, RlmError> {
        let chunker = Chunker::new(config.chunk_size)?;
        debug!(?config, "Created context");
        Ok(Self {
            config,
            chunker,
            index: Index::new(),
        })
    }

    pub fn config(&self) -> &ContextConfig {
        &self.config
    }

    pub fn index(&self) -> &Index {
        &self.index
    }

    pub fn stats(&self) -> IndexStats {
        self.index.stats()
    }

    /// Load files under `root` into the index, overwriting paths seen before
    pub fn load(&mut self, root: impl AsRef<Path>, options: &LoadOptions) -> Result<LoadReport, RlmError> {
        Loader::new(&self.config.excludes).load(&mut self.index, root.as_ref(), options)
    }

    /// Search with the configured window and result cap
    pub fn search(&self, query: &str) -> Result<Vec<SearchHit>, RlmError> {
        self.search_with(
            query,
            SearchOptions {
                window: self.config.context_window,
                max_results: self.config.max_results,
            },
        )
    }

    /// Search with explicit options
    pub fn search_with(&self, query: &str, options: SearchOptions) -> Result<Vec<SearchHit>, RlmError> {
        if query.is_empty() {
            return Err(RlmError::EmptyQuery);
        }
        Ok(search::search(&self.index, query, &options))
    }

    /// Chunk indexed files whose path contains `filter`
    pub fn chunk(&self, filter: Option<&str>) -> Vec<Chunk> {
        self.chunker.chunk(&self.index, filter)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_load_search_and_chunk() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("test.txt"), "Hello world, this is a test of the RLM context.").unwrap();

        let mut ctx = RlmContext::new(ContextConfig::default()).unwrap();
        let report = ctx.load(temp.path(), &LoadOptions::default()).unwrap();
        assert_eq!(report.loaded_count(), 1);

        let hits = ctx.search("RLM").unwrap();
        assert_eq!(hits.len(), 1);
        assert!(hits[0].snippet.contains("RLM"));

        let chunks = ctx.chunk(None);
        assert_eq!(chunks.len(), 1);
        assert_eq!(chunks[0].content, "Hello world, this is a test of the RLM context.");
    }

    #[test]
    fn test_empty_query_rejected() {
        let ctx = RlmContext::new(ContextConfig::default()).unwrap();
        assert!(matches!(ctx.search(""), Err(RlmError::EmptyQuery)));
    }

    #[test]
    fn test_zero_chunk_size_rejected() {
        let config = ContextConfig {
            chunk_size: 0,
            ..Default::default()
        };
        assert!(matches!(
            RlmContext::new(config),
            Err(RlmError::InvalidChunkSize { size: 0 })
        ));
    }

    #[test]
    fn test_configured_search_defaults_apply() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("many.txt"), "ab ".repeat(10)).unwrap();

        let config = ContextConfig {
            context_window: 1,
            max_results: 3,
            ..Default::default()
        };
        let mut ctx = RlmContext::new(config).unwrap();
        ctx.load(temp.path(), &LoadOptions::default()).unwrap();

        let hits = ctx.search("ab").unwrap();
        assert_eq!(hits.len(), 3);
        assert_eq!(hits[0].snippet, "ab ");
        assert_eq!(hits[1].snippet, " ab ");
    }

    #[test]
    fn test_custom_excludes() {
        let temp = TempDir::new().unwrap();
        fs::create_dir(temp.path().join("target")).unwrap();
        fs::write(temp.path().join("target/out.txt"), "built").unwrap();
        fs::write(temp.path().join("src.txt"), "source").unwrap();

        let config = ContextConfig {
            excludes: vec!["target".to_string()],
            ..Default::default()
        };
        let mut ctx = RlmContext::new(config).unwrap();
        ctx.load(temp.path(), &LoadOptions::default()).unwrap();

        assert_eq!(ctx.stats().file_count, 1);
        assert!(ctx.index().paths().all(|p| p.ends_with("src.txt")));
    }
}
