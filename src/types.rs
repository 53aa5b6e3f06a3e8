//! Shared types for the content graph.
//!
//! The graph is built once per invocation by [`crate::scan`] and passed by
//! reference to every downstream consumer (validator, glossary aggregator,
//! render collection). Nothing re-reads the filesystem to reconstruct it.

use serde::{Deserialize, Serialize};

/// The full content graph: blocks in learning-path order, each holding its
/// articles in order.
#[derive(Debug, Serialize)]
pub struct LearningPath {
    pub blocks: Vec<Block>,
}

impl LearningPath {
    /// Iterate all articles in learning-path order, paired with their block.
    pub fn articles(&self) -> impl Iterator<Item = (&Block, &Article)> {
        self.blocks
            .iter()
            .flat_map(|b| b.topics.iter().map(move |a| (b, a)))
    }

    pub fn article_count(&self) -> usize {
        self.blocks.iter().map(|b| b.topics.len()).sum()
    }
}

/// A top-level grouping of articles, read from a directory carrying a
/// `_block.json` metadata file.
///
/// `title` and `order` stay optional here: the scanner is tolerant and the
/// validator is the component that reports absent metadata. Sorting treats
/// an absent order as 0, which can never satisfy the contiguity check.
#[derive(Debug, Serialize)]
pub struct Block {
    /// Directory name.
    pub slug: String,
    pub title: Option<String>,
    pub order: Option<u32>,
    /// Articles sorted by their declared order.
    pub topics: Vec<Article>,
}

impl Block {
    /// Sort key for block ordering. Absent orders sort first.
    pub fn sort_order(&self) -> u32 {
        self.order.unwrap_or(0)
    }
}

/// A single content unit inside a block, read from `<article>/index.md`.
#[derive(Debug, Serialize)]
pub struct Article {
    /// Directory name.
    pub slug: String,
    /// Front-matter title, falling back to the slug.
    pub title: String,
    pub description: Option<String>,
    pub order: Option<u32>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub prerequisites: Vec<Prerequisite>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub glossary: Vec<GlossaryItem>,
    /// Markdown body after the front matter.
    #[serde(skip)]
    pub body: String,
    /// Source file relative to the topics root (for diagnostics and the
    /// validator's raw-file pass).
    pub source_path: String,
}

impl Article {
    /// Published URL for this article. Output is flat: nested block
    /// structure maps to `/topics/<article>/` regardless of block.
    pub fn url(&self) -> String {
        format!("/topics/{}/", self.slug)
    }

    pub fn sort_order(&self) -> u32 {
        self.order.unwrap_or(0)
    }
}

/// A prerequisite link declared in article front matter.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Prerequisite {
    pub url: String,
    pub label: String,
}

/// A glossary term defined in article front matter.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GlossaryItem {
    pub term: String,
    pub definition: String,
}
