//! Bibliography loading and inline citation extraction.
//!
//! The reference table is a JSON map from citation key to bibliographic
//! fields:
//!
//! ```json
//! {
//!   "rosenblatt1958": {
//!     "title": "The Perceptron",
//!     "url": "https://example.org/perceptron",
//!     "authors": "Frank Rosenblatt",
//!     "venue": "Psychological Review",
//!     "year": 1958
//!   }
//! }
//! ```
//!
//! Article bodies cite entries with an inline directive carrying exactly
//! one quoted key: `{% cite "rosenblatt1958" %}`. Extraction is a regex
//! scan over raw body text, deliberately not a full document parse, so
//! the validator can check citations without rendering anything.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;
use std::sync::OnceLock;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ReferenceError {
    #[error("reference table not found: {0}")]
    Missing(std::path::PathBuf),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),
}

/// One bibliography entry. Fields are optional so that the validator, not
/// the deserializer, reports incomplete entries.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Reference {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub authors: Option<String>,
    #[serde(default)]
    pub venue: Option<String>,
    #[serde(default)]
    pub year: Option<u32>,
}

/// The whole bibliography, keyed by citation key. BTreeMap keeps iteration
/// (and therefore diagnostics) in a stable order.
pub type ReferenceTable = BTreeMap<String, Reference>;

/// Load the reference table from a JSON file.
pub fn load(path: &Path) -> Result<ReferenceTable, ReferenceError> {
    if !path.exists() {
        return Err(ReferenceError::Missing(path.to_path_buf()));
    }
    let content = std::fs::read_to_string(path)?;
    Ok(serde_json::from_str(&content)?)
}

fn cite_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r#"\{%[-\s]*cite\s+"([^"]+)"\s*[-\s]*%\}"#).unwrap())
}

/// Extract every citation key referenced in a body, in order of
/// appearance. Repeated keys are repeated in the output.
pub fn extract_citations(body: &str) -> Vec<&str> {
    cite_regex()
        .captures_iter(body)
        .map(|c| c.get(1).unwrap().as_str())
        .collect()
}
