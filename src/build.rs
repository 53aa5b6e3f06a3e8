//! Build orchestration.
//!
//! One build invocation is a single synchronous pass:
//!
//! ```text
//! 1. Scan       topics/        →  LearningPath graph
//! 2. Validate   graph + refs   →  abort on any diagnostic (skippable)
//! 3. Emit       graph          →  data/learning-path.json
//!                                 data/glossary.json
//!                                 topics/<slug>/index.html fragments
//! 4. Index      output dir     →  external indexer subprocess
//! ```
//!
//! Every piece of per-build state is constructed inside [`build`] and
//! dropped when it returns; page-level numbering lives in per-render
//! [`crate::render::PageContext`] values. Repeated builds in a
//! watch loop therefore cannot leak state into each other; there are no
//! counters to reset between runs.
//!
//! Validation is skippable for fast local iteration, either explicitly
//! via [`BuildOptions`] or through the `SKIP_VALIDATION` environment
//! variable at the CLI boundary. The indexer is a blocking subprocess
//! with inherited stdio; its non-zero exit fails the build with the
//! subprocess's own output already on screen.

use crate::config::SiteConfig;
use crate::glossary;
use crate::references::{self, ReferenceError};
use crate::render;
use crate::scan::{self, ScanError};
use crate::validate::{self, ValidationReport};
use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, ExitStatus};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum BuildError {
    #[error("Scan error: {0}")]
    Scan(#[from] ScanError),
    #[error("Reference error: {0}")]
    References(#[from] ReferenceError),
    #[error("{0}")]
    Validation(ValidationReport),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("failed to run indexer '{command}': {source}")]
    IndexerSpawn {
        command: String,
        source: std::io::Error,
    },
    #[error("indexer '{command}' failed with {status}")]
    IndexerFailed { command: String, status: ExitStatus },
}

/// Switches for one build invocation.
#[derive(Debug, Clone)]
pub struct BuildOptions {
    /// Run the validator and abort on diagnostics.
    pub validate: bool,
    /// Run the post-build search indexer.
    pub index: bool,
}

impl Default for BuildOptions {
    fn default() -> Self {
        Self {
            validate: true,
            index: true,
        }
    }
}

/// What a successful build produced.
#[derive(Debug)]
pub struct BuildSummary {
    pub blocks: usize,
    pub articles: usize,
    pub glossary_terms: usize,
    pub output: PathBuf,
    pub validated: bool,
    pub indexed: bool,
}

/// Whether the environment asks to skip validation. Read once per build
/// at the CLI boundary; the orchestrator itself only honors
/// [`BuildOptions::validate`].
pub fn skip_validation_requested() -> bool {
    std::env::var("SKIP_VALIDATION").is_ok_and(|v| !v.is_empty())
}

/// Run a full build of the site at `site_root`.
pub fn build(
    site_root: &Path,
    config: &SiteConfig,
    options: &BuildOptions,
) -> Result<BuildSummary, BuildError> {
    let topics_dir = site_root.join(&config.topics_dir);
    let output_dir = site_root.join(&config.output);

    let path = scan::scan(&topics_dir)?;
    let refs = references::load(&site_root.join(&config.references))?;

    if options.validate {
        let report = validate::validate(&path, &refs, &topics_dir);
        if !report.is_empty() {
            return Err(BuildError::Validation(report));
        }
    }

    let records = render::collection(&path, &refs);
    let entries = glossary::aggregate(&path);

    let data_dir = output_dir.join("data");
    fs::create_dir_all(&data_dir)?;
    fs::write(
        data_dir.join("learning-path.json"),
        serde_json::to_string_pretty(&records)?,
    )?;
    fs::write(
        data_dir.join("glossary.json"),
        serde_json::to_string_pretty(&entries)?,
    )?;

    for record in &records {
        let article_dir = output_dir.join("topics").join(&record.slug);
        fs::create_dir_all(&article_dir)?;
        fs::write(article_dir.join("index.html"), &record.body_html)?;
    }

    let run_indexer = options.index && !config.search.command.is_empty();
    if run_indexer {
        index_output(&config.search.command, &config.search.args, &output_dir)?;
    }

    Ok(BuildSummary {
        blocks: path.blocks.len(),
        articles: path.article_count(),
        glossary_terms: entries.len(),
        output: output_dir,
        validated: options.validate,
        indexed: run_indexer,
    })
}

/// Run the search indexer against the output directory, stdio inherited.
fn index_output(command: &str, args: &[String], output_dir: &Path) -> Result<(), BuildError> {
    let status = Command::new(command)
        .args(args)
        .arg(output_dir)
        .status()
        .map_err(|source| BuildError::IndexerSpawn {
            command: command.to_string(),
            source,
        })?;

    if !status.success() {
        return Err(BuildError::IndexerFailed {
            command: command.to_string(),
            status,
        });
    }
    Ok(())
}
