//! Loader - populate an [`Index`] from a directory tree
//!
//! Candidates come from a glob expansion under the root. Each one is checked
//! against the exclusion substrings before anything touches the filesystem,
//! then read and decoded leniently. A file that cannot be read is recorded as
//! skipped and the scan moves on; one bad file never aborts a load.

use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use glob::{MatchOptions, Pattern};
use tracing::{debug, info, warn};

use crate::error::RlmError;
use crate::index::Index;

/// Options for a single load call
#[derive(Debug, Clone)]
pub struct LoadOptions {
    /// Glob pattern relative to the root
    pub pattern: String,
    /// Descend into subdirectories; when off, `**` components are ignored
    pub recursive: bool,
}

impl Default for LoadOptions {
    fn default() -> Self {
        Self {
            pattern: crate::DEFAULT_PATTERN.to_string(),
            recursive: true,
        }
    }
}

/// Why an entry did not make it into the index
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    /// Path contains one of the exclusion substrings
    Excluded { pattern: String },
    PermissionDenied,
    /// Any other read failure
    Io { message: String },
    /// The directory walk itself failed on this path
    Walk { message: String },
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Excluded { pattern } => write!(f, "excluded by '{}'", pattern),
            Self::PermissionDenied => write!(f, "permission denied"),
            Self::Io { message } => write!(f, "read failed: {}", message),
            Self::Walk { message } => write!(f, "walk failed: {}", message),
        }
    }
}

/// Result of handling one enumerated entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileOutcome {
    Loaded { path: String, chars: usize },
    Skipped { path: String, reason: SkipReason },
}

impl FileOutcome {
    pub fn path(&self) -> &str {
        match self {
            Self::Loaded { path, .. } | Self::Skipped { path, .. } => path,
        }
    }

    pub fn is_loaded(&self) -> bool {
        matches!(self, Self::Loaded { .. })
    }
}

/// Aggregated outcomes of one load call
#[derive(Debug, Clone, Default)]
pub struct LoadReport {
    /// Every file loaded or entry skipped, in enumeration order
    pub outcomes: Vec<FileOutcome>,
    /// Characters across the whole index after this load
    pub total_chars: usize,
}

impl LoadReport {
    /// Files loaded by this call
    pub fn loaded_count(&self) -> usize {
        self.outcomes.iter().filter(|o| o.is_loaded()).count()
    }

    pub fn skipped_count(&self) -> usize {
        self.outcomes.len() - self.loaded_count()
    }

    /// Skipped entries with their reasons
    pub fn skipped(&self) -> impl Iterator<Item = (&str, &SkipReason)> {
        self.outcomes.iter().filter_map(|o| match o {
            FileOutcome::Skipped { path, reason } => Some((path.as_str(), reason)),
            FileOutcome::Loaded { .. } => None,
        })
    }
}

impl fmt::Display for LoadReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Loaded {} files into context. Total size: {} chars.",
            self.loaded_count(),
            self.total_chars
        )
    }
}

/// Walks a root directory and fills an index
pub struct Loader<'a> {
    excludes: &'a [String],
}

impl<'a> Loader<'a> {
    pub fn new(excludes: &'a [String]) -> Self {
        Self { excludes }
    }

    /// First exclusion substring found anywhere in `path`
    pub fn excluded_by(&self, path: &str) -> Option<&'a str> {
        self.excludes
            .iter()
            .find(|pattern| path.contains(pattern.as_str()))
            .map(String::as_str)
    }

    /// Load every matching file under `root` into `index`
    ///
    /// Only an invalid pattern fails the call; per-entry problems are
    /// reported in the returned [`LoadReport`].
    pub fn load(&self, index: &mut Index, root: &Path, options: &LoadOptions) -> Result<LoadReport, RlmError> {
        let pattern = full_pattern(root, options);
        debug!(%pattern, recursive = options.recursive, "Loader::load: expanding pattern");

        let match_options = MatchOptions {
            case_sensitive: true,
            require_literal_separator: true,
            require_literal_leading_dot: true,
        };
        let entries = glob::glob_with(&pattern, match_options).map_err(|source| RlmError::InvalidPattern {
            pattern: options.pattern.clone(),
            source,
        })?;

        let mut report = LoadReport::default();
        for entry in entries {
            let outcome = match entry {
                Ok(path) => match self.load_entry(index, &path) {
                    Some(outcome) => outcome,
                    None => continue,
                },
                Err(e) => {
                    let path = e.path().to_string_lossy().to_string();
                    let reason = match e.error().kind() {
                        io::ErrorKind::PermissionDenied => SkipReason::PermissionDenied,
                        _ => SkipReason::Walk {
                            message: e.error().to_string(),
                        },
                    };
                    warn!(%path, %reason, "Loader::load: skipping unreadable entry");
                    FileOutcome::Skipped { path, reason }
                }
            };
            report.outcomes.push(outcome);
        }

        report.total_chars = index.total_chars();
        info!(
            loaded = report.loaded_count(),
            skipped = report.skipped_count(),
            total_chars = report.total_chars,
            "Load complete"
        );
        Ok(report)
    }

    /// `None` for entries that are not regular files
    fn load_entry(&self, index: &mut Index, path: &Path) -> Option<FileOutcome> {
        let key = path.to_string_lossy().to_string();

        // Path-string check only, before any stat or read
        if let Some(pattern) = self.excluded_by(&key) {
            debug!(path = %key, %pattern, "Loader::load_entry: excluded");
            return Some(FileOutcome::Skipped {
                path: key,
                reason: SkipReason::Excluded {
                    pattern: pattern.to_string(),
                },
            });
        }

        if !path.is_file() {
            return None;
        }

        match read_lossy(path) {
            Ok(content) => {
                let chars = content.chars().count();
                debug!(path = %key, chars, "Loader::load_entry: loaded");
                index.insert(key.clone(), content);
                Some(FileOutcome::Loaded { path: key, chars })
            }
            Err(reason) => {
                warn!(path = %key, %reason, "Loader::load_entry: skipping file");
                Some(FileOutcome::Skipped { path: key, reason })
            }
        }
    }
}

/// Root (escaped) joined with the caller's pattern
fn full_pattern(root: &Path, options: &LoadOptions) -> String {
    let pattern = if options.recursive {
        options.pattern.clone()
    } else {
        collapse_recursive(&options.pattern)
    };
    let root = Pattern::escape(&root.to_string_lossy());
    PathBuf::from(root).join(pattern).to_string_lossy().to_string()
}

/// Drop `**/` components and fold any remaining `**` into `*`
fn collapse_recursive(pattern: &str) -> String {
    let mut out = pattern.replace("**/", "");
    while out.contains("**") {
        out = out.replace("**", "*");
    }
    out
}

/// Read a file, replacing invalid UTF-8 rather than failing
fn read_lossy(path: &Path) -> Result<String, SkipReason> {
    let bytes = fs::read(path).map_err(|e| match e.kind() {
        io::ErrorKind::PermissionDenied => SkipReason::PermissionDenied,
        _ => SkipReason::Io { message: e.to_string() },
    })?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}
