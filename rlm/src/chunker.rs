//! Chunker - fixed-size sequential slices of indexed content
//!
//! Sizes are counted in characters, so a chunk boundary never splits a
//! multi-byte sequence. Chunks do not overlap; concatenating a file's chunks
//! in `chunk_id` order gives back its content exactly.

use serde::Serialize;
use tracing::debug;

use crate::error::RlmError;
use crate::index::Index;

/// One slice of a source file
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Chunk {
    /// Indexed path the slice came from
    pub source: String,
    /// Zero-based position within the source
    pub chunk_id: usize,
    pub content: String,
}

/// Splits index contents into chunks of a fixed character count
#[derive(Debug, Clone, Copy)]
pub struct Chunker {
    chunk_size: usize,
}

impl Chunker {
    pub fn new(chunk_size: usize) -> Result<Self, RlmError> {
        if chunk_size == 0 {
            return Err(RlmError::InvalidChunkSize { size: chunk_size });
        }
        Ok(Self { chunk_size })
    }

    pub fn chunk_size(&self) -> usize {
        self.chunk_size
    }

    /// Chunk every path containing `filter` (all paths when `None`)
    ///
    /// Output is grouped by path in index order, ascending `chunk_id` within
    /// a path. Empty files produce nothing.
    pub fn chunk(&self, index: &Index, filter: Option<&str>) -> Vec<Chunk> {
        let chunks: Vec<Chunk> = index
            .iter()
            .filter(|(path, _)| filter.is_none_or(|f| path.contains(f)))
            .flat_map(|(path, content)| {
                self.split(content)
                    .into_iter()
                    .enumerate()
                    .map(move |(chunk_id, content)| Chunk {
                        source: path.to_string(),
                        chunk_id,
                        content: content.to_string(),
                    })
            })
            .collect();

        debug!(?filter, chunk_count = chunks.len(), "Chunker::chunk: complete");
        chunks
    }

    /// Slice `content` at every `chunk_size`-th character
    pub fn split<'c>(&self, content: &'c str) -> Vec<&'c str> {
        let mut pieces = Vec::new();
        let mut start = 0;

        for (n, (byte, _)) in content.char_indices().enumerate() {
            if n > 0 && n % self.chunk_size == 0 {
                pieces.push(&content[start..byte]);
                start = byte;
            }
        }
        if start < content.len() {
            pieces.push(&content[start..]);
        }
        pieces
    }
}

impl Default for Chunker {
    fn default() -> Self {
        Self {
            chunk_size: crate::DEFAULT_CHUNK_SIZE,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_twelve_thousand_chars() {
        let mut index = Index::new();
        index.insert("b.txt", "z".repeat(12000));

        let chunks = Chunker::new(5000).unwrap().chunk(&index, None);

        assert_eq!(chunks.len(), 3);
        let ids: Vec<usize> = chunks.iter().map(|c| c.chunk_id).collect();
        let lens: Vec<usize> = chunks.iter().map(|c| c.content.chars().count()).collect();
        assert_eq!(ids, vec![0, 1, 2]);
        assert_eq!(lens, vec![5000, 5000, 2000]);
        assert!(chunks.iter().all(|c| c.source == "b.txt"));
    }

    #[test]
    fn test_exact_multiple_has_no_trailing_chunk() {
        let chunker = Chunker::new(4).unwrap();
        assert_eq!(chunker.split("abcdefgh"), vec!["abcd", "efgh"]);
    }

    #[test]
    fn test_empty_content_has_no_chunks() {
        let mut index = Index::new();
        index.insert("empty.txt", "");
        index.insert("full.txt", "abc");

        let chunks = Chunker::new(2).unwrap().chunk(&index, None);
        assert!(chunks.iter().all(|c| c.source == "full.txt"));
        assert_eq!(chunks.len(), 2);
    }

    #[test]
    fn test_filter_is_substring_match() {
        let mut index = Index::new();
        index.insert("src/lib.rs", "lib");
        index.insert("docs/readme.md", "readme");
        index.insert("src/main.rs", "main");

        let chunks = Chunker::default().chunk(&index, Some(".rs"));
        let sources: Vec<&str> = chunks.iter().map(|c| c.source.as_str()).collect();
        assert_eq!(sources, vec!["src/lib.rs", "src/main.rs"]);

        assert!(Chunker::default().chunk(&index, Some("nomatch")).is_empty());
    }

    #[test]
    fn test_multibyte_boundaries() {
        let chunker = Chunker::new(3).unwrap();
        assert_eq!(chunker.split("héllo🌍wörld"), vec!["hél", "lo🌍", "wör", "ld"]);
    }

    #[test]
    fn test_zero_chunk_size_rejected() {
        assert!(matches!(Chunker::new(0), Err(RlmError::InvalidChunkSize { size: 0 })));
    }

    proptest! {
        #[test]
        fn prop_chunks_reassemble_source(content in "\\PC{0,300}", size in 1usize..64) {
            let mut index = Index::new();
            index.insert("f.txt", content.clone());

            let chunks = Chunker::new(size).unwrap().chunk(&index, None);
            let joined: String = chunks.iter().map(|c| c.content.as_str()).collect();
            prop_assert_eq!(joined, content.clone());

            for (i, chunk) in chunks.iter().enumerate() {
                prop_assert_eq!(chunk.chunk_id, i);
                prop_assert!(chunk.content.chars().count() <= size);
            }
            let expected = content.chars().count().div_ceil(size);
            prop_assert_eq!(chunks.len(), expected);
        }
    }
}
