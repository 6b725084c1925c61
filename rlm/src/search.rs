//! Searcher - literal substring search with context windows

use std::fmt;

use serde::Serialize;
use tracing::debug;

use crate::index::Index;

/// Options for searching
#[derive(Debug, Clone)]
pub struct SearchOptions {
    /// Characters of context on each side of a match
    pub window: usize,
    /// Maximum number of hits across the whole index
    pub max_results: usize,
}

impl Default for SearchOptions {
    fn default() -> Self {
        Self {
            window: crate::DEFAULT_CONTEXT_WINDOW,
            max_results: crate::DEFAULT_MAX_RESULTS,
        }
    }
}

/// One occurrence of the query
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SearchHit {
    /// File containing the match
    pub path: String,
    /// Character offset of the match within the file
    pub offset: usize,
    /// Match plus surrounding context, clamped to the file bounds
    pub snippet: String,
}

impl fmt::Display for SearchHit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}]: ...{}...", self.path, self.snippet)
    }
}

/// Find every occurrence of `query` across `index`
///
/// Paths are visited in index order and occurrences left to right. The next
/// search starts one character after the previous match start, so
/// overlapping occurrences are all reported. Stops once `max_results` hits
/// are collected.
///
/// An empty `query` is not rejected here; it matches at every character
/// boundary. [`crate::RlmContext::search`] refuses it before calling in.
pub fn search(index: &Index, query: &str, options: &SearchOptions) -> Vec<SearchHit> {
    let mut hits = Vec::new();
    if options.max_results == 0 {
        return hits;
    }

    for (path, content) in index.iter() {
        let mut from = 0;
        while let Some(found) = content[from..].find(query) {
            let start = from + found;
            let end = start + query.len();

            let (snippet_start, offset) = back_chars(content, start, options.window);
            let snippet_end = forward_chars(content, end, options.window);
            hits.push(SearchHit {
                path: path.to_string(),
                offset,
                snippet: content[snippet_start..snippet_end].to_string(),
            });

            if hits.len() >= options.max_results {
                debug!(%query, hits = hits.len(), "search: result cap reached");
                return hits;
            }

            match content[start..].chars().next() {
                Some(c) => from = start + c.len_utf8(),
                None => break,
            }
        }
    }

    debug!(%query, hits = hits.len(), "search: complete");
    hits
}

/// Byte index `n` characters before `at`, clamped to 0, plus the character
/// offset of `at`
fn back_chars(content: &str, at: usize, n: usize) -> (usize, usize) {
    let before = &content[..at];
    let offset = before.chars().count();
    let start = if n == 0 {
        at
    } else {
        before.char_indices().rev().take(n).last().map(|(i, _)| i).unwrap_or(at)
    };
    (start, offset)
}

/// Byte index `n` characters after `at`, clamped to the content length
fn forward_chars(content: &str, at: usize, n: usize) -> usize {
    let after = &content[at..];
    after.char_indices().nth(n).map(|(i, _)| at + i).unwrap_or(content.len())
}
