//! Configuration
//!
//! Settings are resolved with the following priority (highest first):
//! 1. Environment variables (`WORKTREE_TUI_*`)
//! 2. TOML file at `$XDG_CONFIG_HOME/worktree-tui/config.toml`
//! 3. Built-in defaults
//!
//! # Example Configuration
//!
//! ```toml
//! worktree_dir = ".wt"
//! branch_types = ["feat", "fix", "chore"]
//! commit_limit = 10
//! pr_lookup = true
//! cd_file = "/tmp/.wt_cd_path"
//! log_file = "/tmp/worktree-tui.log"
//! ```

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Branch prefixes offered by the type picker
pub const DEFAULT_BRANCH_TYPES: &[&str] = &[
    "feat", "fix", "chore", "docs", "refactor", "test", "style", "ci", "perf", "release",
];

/// Application directory name under the user's config dir
pub const APP_DIR: &str = "worktree-tui";

// =============================================================================
// Error Types
// =============================================================================

/// Errors that can occur when loading configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to read config file
    #[error("Failed to read config file at {path}: {source}")]
    ReadError {
        /// The path that was attempted
        path: PathBuf,
        /// The underlying IO error
        source: std::io::Error,
    },

    /// Failed to parse TOML
    #[error("Failed to parse TOML config: {0}")]
    ParseError(#[from] toml::de::Error),

    /// Invalid configuration value
    #[error("Invalid configuration: {0}")]
    ValidationError(String),
}

// =============================================================================
// File Format
// =============================================================================

/// Contents of `config.toml`; every key is optional
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ConfigToml {
    /// Directory (relative to the repo root) that holds new worktrees
    pub worktree_dir: Option<String>,
    /// Branch prefixes for the type picker
    pub branch_types: Option<Vec<String>>,
    /// Commits listed per worktree
    pub commit_limit: Option<usize>,
    /// Whether to query `gh` for PR badges
    pub pr_lookup: Option<bool>,
    /// File the shell wrapper reads the cd target from
    pub cd_file: Option<PathBuf>,
    /// Where tracing output goes
    pub log_file: Option<PathBuf>,
}

// =============================================================================
// Resolved Configuration
// =============================================================================

/// Resolved settings
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Config {
    /// Directory (relative to the repo root) that holds new worktrees
    pub worktree_dir: String,
    /// Branch prefixes for the type picker, first is the default
    pub branch_types: Vec<String>,
    /// Commits listed per worktree
    pub commit_limit: usize,
    /// Whether to query `gh` for PR badges
    pub pr_lookup: bool,
    /// File the shell wrapper reads the cd target from
    pub cd_file: PathBuf,
    /// Where tracing output goes (discarded when unset)
    pub log_file: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            worktree_dir: ".wt".to_string(),
            branch_types: DEFAULT_BRANCH_TYPES.iter().map(|s| s.to_string()).collect(),
            commit_limit: 10,
            pr_lookup: true,
            cd_file: std::env::temp_dir().join(".wt_cd_path"),
            log_file: None,
        }
    }
}

impl Config {
    /// Load from the default file (if present) and the environment
    pub fn load() -> Result<Self, ConfigError> {
        let mut config = Self::default();
        if let Some(path) = default_config_path() {
            if path.exists() {
                config.apply_file(load_config_file(&path)?);
            }
        }
        config.apply_overrides(|key| std::env::var(key).ok());
        config.validate()?;
        Ok(config)
    }

    /// Overlay values present in a parsed file
    pub fn apply_file(&mut self, file: ConfigToml) {
        if let Some(dir) = file.worktree_dir {
            self.worktree_dir = dir;
        }
        if let Some(types) = file.branch_types {
            self.branch_types = types;
        }
        if let Some(limit) = file.commit_limit {
            self.commit_limit = limit;
        }
        if let Some(pr_lookup) = file.pr_lookup {
            self.pr_lookup = pr_lookup;
        }
        if let Some(cd_file) = file.cd_file {
            self.cd_file = cd_file;
        }
        if file.log_file.is_some() {
            self.log_file = file.log_file;
        }
    }

    /// Overlay environment variables, read through `lookup`
    pub fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(dir) = lookup("WORKTREE_TUI_WORKTREE_DIR") {
            self.worktree_dir = dir;
        }
        if let Some(limit) = lookup("WORKTREE_TUI_COMMIT_LIMIT").and_then(|v| v.parse().ok()) {
            self.commit_limit = limit;
        }
        if let Some(v) = lookup("WORKTREE_TUI_PR_LOOKUP") {
            self.pr_lookup = v == "1" || v.eq_ignore_ascii_case("true");
        }
        if let Some(path) = lookup("WORKTREE_TUI_CD_FILE") {
            self.cd_file = PathBuf::from(path);
        }
        if let Some(path) = lookup("WORKTREE_TUI_LOG") {
            self.log_file = Some(PathBuf::from(path));
        }
    }

    /// Reject settings the UI cannot work with
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.branch_types.is_empty() || self.branch_types.iter().any(|t| t.trim().is_empty()) {
            return Err(ConfigError::ValidationError(
                "branch_types must be a non-empty list of non-empty names".to_string(),
            ));
        }
        if self.commit_limit == 0 {
            return Err(ConfigError::ValidationError(
                "commit_limit must be at least 1".to_string(),
            ));
        }
        if self.worktree_dir.trim().is_empty() {
            return Err(ConfigError::ValidationError(
                "worktree_dir must not be empty".to_string(),
            ));
        }
        Ok(())
    }
}

/// `$XDG_CONFIG_HOME/worktree-tui/config.toml`
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join(APP_DIR).join("config.toml"))
}

/// Read and parse a config file
pub fn load_config_file(path: &Path) -> Result<ConfigToml, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|source| ConfigError::ReadError {
        path: path.to_path_buf(),
        source,
    })?;
    parse_config(&content)
}

/// Parse TOML text
pub fn parse_config(content: &str) -> Result<ConfigToml, ConfigError> {
    Ok(toml::from_str(content)?)
}
