//! In-memory path -> content index

use std::collections::BTreeMap;

/// Summary numbers for an [`Index`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct IndexStats {
    /// Number of indexed files
    pub file_count: usize,
    /// Sum of character counts over all contents
    pub total_chars: usize,
}

/// Mapping from file path to its full text
///
/// Iterates in ascending path order. Inserting an existing path replaces its
/// content; nothing is ever removed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Index {
    files: BTreeMap<String, String>,
}

impl Index {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or overwrite a path, returning the previous content if any
    pub fn insert(&mut self, path: impl Into<String>, content: impl Into<String>) -> Option<String> {
        self.files.insert(path.into(), content.into())
    }

    pub fn get(&self, path: &str) -> Option<&str> {
        self.files.get(path).map(String::as_str)
    }

    pub fn contains(&self, path: &str) -> bool {
        self.files.contains_key(path)
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    /// Paths in iteration order
    pub fn paths(&self) -> impl Iterator<Item = &str> {
        self.files.keys().map(String::as_str)
    }

    /// `(path, content)` pairs in iteration order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.files.iter().map(|(p, c)| (p.as_str(), c.as_str()))
    }

    /// Total characters across every indexed file
    pub fn total_chars(&self) -> usize {
        self.files.values().map(|c| c.chars().count()).sum()
    }

    pub fn stats(&self) -> IndexStats {
        IndexStats {
            file_count: self.len(),
            total_chars: self.total_chars(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_overwrites() {
        let mut index = Index::new();
        assert!(index.insert("a.txt", "one").is_none());
        assert_eq!(index.insert("a.txt", "two").as_deref(), Some("one"));

        assert_eq!(index.len(), 1);
        assert_eq!(index.get("a.txt"), Some("two"));
    }

    #[test]
    fn test_iteration_is_sorted_by_path() {
        let mut index = Index::new();
        index.insert("b.txt", "b");
        index.insert("a.txt", "a");
        index.insert("c/d.txt", "d");

        let paths: Vec<&str> = index.paths().collect();
        assert_eq!(paths, vec!["a.txt", "b.txt", "c/d.txt"]);
    }

    #[test]
    fn test_total_chars_counts_characters() {
        let mut index = Index::new();
        index.insert("ascii.txt", "abc");
        index.insert("multi.txt", "héllo 🌍");

        // 3 + 7, not byte lengths
        assert_eq!(index.total_chars(), 10);
        assert_eq!(
            index.stats(),
            IndexStats {
                file_count: 2,
                total_chars: 10
            }
        );
    }

    #[test]
    fn test_empty_index() {
        let index = Index::new();
        assert!(index.is_empty());
        assert!(!index.contains("anything"));
        assert_eq!(index.stats(), IndexStats::default());
    }
}
