//! Site configuration module.
//!
//! Handles loading and validating `config.toml` from the site root. All
//! options have stock defaults; a config file only needs to name the
//! values it overrides.
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! topics_dir = "topics"            # Block/article tree, relative to site root
//! references = "references.json"   # Bibliography table, relative to site root
//! output = "_site"                 # Build output directory
//!
//! [search]
//! command = "pagefind"             # Post-build indexer ("" disables indexing)
//! args = ["--site"]                # Indexer args; output dir is appended
//! ```
//!
//! Unknown keys are rejected to catch typos early.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Site configuration loaded from `config.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SiteConfig {
    /// Directory containing block directories, relative to the site root.
    pub topics_dir: String,
    /// Reference table path, relative to the site root.
    pub references: String,
    /// Build output directory, relative to the site root.
    pub output: String,
    /// Post-build search indexing.
    pub search: SearchConfig,
}

/// Search indexer invocation. The indexer runs as a blocking subprocess
/// against the output directory after every successful build.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SearchConfig {
    /// Indexer executable. Empty string disables indexing.
    pub command: String,
    /// Arguments placed before the output directory.
    pub args: Vec<String>,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            topics_dir: "topics".to_string(),
            references: "references.json".to_string(),
            output: "_site".to_string(),
            search: SearchConfig::default(),
        }
    }
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            command: "pagefind".to_string(),
            args: vec!["--site".to_string()],
        }
    }
}

impl SiteConfig {
    /// Validate config values.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.topics_dir.is_empty() {
            return Err(ConfigError::Validation("topics_dir must not be empty".into()));
        }
        if self.output.is_empty() {
            return Err(ConfigError::Validation("output must not be empty".into()));
        }
        Ok(())
    }
}

/// Load `config.toml` from the site root, falling back to stock defaults
/// when the file does not exist.
pub fn load_config(site_root: &Path) -> Result<SiteConfig, ConfigError> {
    let path = site_root.join("config.toml");
    let config = if path.exists() {
        let content = fs::read_to_string(&path)?;
        toml::from_str(&content)?
    } else {
        SiteConfig::default()
    };
    config.validate()?;
    Ok(config)
}

/// A fully documented stock `config.toml`, printed by `gen-config`.
pub fn stock_config_toml() -> &'static str {
    r#"# topical site configuration
# All options are optional - the values below are the defaults.

# Directory containing one subdirectory per block. A block directory holds
# a _block.json ({"title": ..., "order": ...}) and one subdirectory per
# article, each with an index.md.
topics_dir = "topics"

# Bibliography: a JSON map from citation key to
# {title, url, authors, venue, year}.
references = "references.json"

# Build output directory.
output = "_site"

[search]
# Post-build search indexer, run against the output directory.
# Set command = "" to disable indexing.
command = "pagefind"
args = ["--site"]
"#
}
