//! Configuration for rlmcontext

use eyre::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::context::ContextConfig;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Characters per chunk
    #[serde(default = "default_chunk_size")]
    pub chunk_size: usize,

    /// Characters of context around each search hit
    #[serde(default = "default_context_window")]
    pub context_window: usize,

    /// Maximum search hits returned
    #[serde(default = "default_max_results")]
    pub max_results: usize,

    /// Path substrings that are never loaded
    #[serde(default = "crate::default_excludes")]
    pub excludes: Vec<String>,

    /// Glob pattern used when none is given on the command line
    #[serde(default = "default_pattern")]
    pub pattern: String,

    /// Log level (TRACE, DEBUG, INFO, WARN, ERROR)
    #[serde(default)]
    pub log_level: Option<String>,
}

fn default_chunk_size() -> usize {
    crate::DEFAULT_CHUNK_SIZE
}

fn default_context_window() -> usize {
    crate::DEFAULT_CONTEXT_WINDOW
}

fn default_max_results() -> usize {
    crate::DEFAULT_MAX_RESULTS
}

fn default_pattern() -> String {
    crate::DEFAULT_PATTERN.to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            chunk_size: default_chunk_size(),
            context_window: default_context_window(),
            max_results: default_max_results(),
            excludes: crate::default_excludes(),
            pattern: default_pattern(),
            log_level: None,
        }
    }
}

impl Config {
    /// Load config from file, or use defaults
    pub fn load(path: Option<&PathBuf>) -> Result<Self> {
        if let Some(config_path) = path {
            debug!(?config_path, "Config::load: explicit path");
            return Self::load_from(config_path);
        }

        for path in Self::default_paths().iter() {
            if path.exists() {
                debug!(?path, "Config::load: found default config");
                return Self::load_from(path);
            }
        }

        debug!("Config::load: no config file, using defaults");
        Ok(Config::default())
    }

    fn load_from(path: &Path) -> Result<Self> {
        let content =
            std::fs::read_to_string(path).context(format!("Failed to read config: {}", path.display()))?;
        let config: Config =
            serde_yaml::from_str(&content).context(format!("Failed to parse config: {}", path.display()))?;
        Ok(config)
    }

    /// Candidate config locations, highest priority first
    pub fn default_paths() -> Vec<PathBuf> {
        [
            dirs::config_dir().map(|p| p.join("rlmcontext").join("config.yml")),
            Some(PathBuf::from("rlmcontext.yml")),
        ]
        .into_iter()
        .flatten()
        .collect()
    }

    /// Save config to file
    pub fn save(&self, path: &Path) -> Result<()> {
        let content = serde_yaml::to_string(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Settings handed to a new [`crate::RlmContext`]
    pub fn context_config(&self) -> ContextConfig {
        ContextConfig {
            chunk_size: self.chunk_size,
            context_window: self.context_window,
            max_results: self.max_results,
            excludes: self.excludes.clone(),
        }
    }
}
