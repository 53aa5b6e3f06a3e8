//! Filesystem scanning and content-graph construction.
//!
//! Stage 1 of the topical build pipeline. Scans the topics directory to
//! discover blocks and articles, producing the in-memory [`LearningPath`]
//! graph that every later stage consumes.
//!
//! ## Directory Structure
//!
//! ```text
//! topics/                          # Topics root
//! ├── foundations/                 # Block (has _block.json)
//! │   ├── _block.json              # {"title": "Foundations", "order": 1}
//! │   ├── _assets/                 # Underscore prefix = never an article
//! │   ├── what-is-a-neuron/        # Article (has index.md)
//! │   │   ├── index.md             # Front matter + markdown body
//! │   │   └── images/
//! │   └── gradient-descent/
//! │       └── index.md
//! ├── architectures/               # Another block
//! │   ├── _block.json
//! │   └── convnets/
//! │       └── index.md
//! └── drafts/                      # No _block.json = not a block
//! ```
//!
//! ## Discovery Rules
//!
//! - A subdirectory of the topics root is a **block** iff it contains
//!   `_block.json`. Anything else is silently ignored.
//! - A subdirectory of a block is an **article** iff its name does not
//!   start with `_` and it contains an `index.md` whose front matter
//!   parses. Malformed front matter excludes the article without aborting
//!   the scan; the order gap it leaves behind is what the validator
//!   reports.
//! - Articles sort by front-matter `order` ascending within their block;
//!   blocks sort by `_block.json` order ascending.
//!
//! The scan is a pure read. It never writes, and it tolerates incomplete
//! metadata; enforcement lives in [`crate::validate`].

use crate::frontmatter;
use crate::types::{Article, Block, LearningPath};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ScanError {
    #[error("topics directory not found: {0}")]
    MissingRoot(PathBuf),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("malformed block metadata {path}: {source}")]
    BlockMeta {
        path: PathBuf,
        source: serde_json::Error,
    },
}

/// Per-block metadata file contents. Both fields optional: the scanner
/// records what is there and the validator complains about what is not.
#[derive(Debug, Deserialize)]
struct BlockMeta {
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    order: Option<u32>,
}

const BLOCK_META_FILE: &str = "_block.json";
const ARTICLE_FILE: &str = "index.md";

pub fn scan(topics_dir: &Path) -> Result<LearningPath, ScanError> {
    if !topics_dir.is_dir() {
        return Err(ScanError::MissingRoot(topics_dir.to_path_buf()));
    }

    let mut blocks = Vec::new();
    for dir in subdirectories(topics_dir)? {
        let meta_path = dir.join(BLOCK_META_FILE);
        if !meta_path.exists() {
            continue;
        }

        let meta_content = fs::read_to_string(&meta_path)?;
        let meta: BlockMeta =
            serde_json::from_str(&meta_content).map_err(|source| ScanError::BlockMeta {
                path: meta_path,
                source,
            })?;

        blocks.push(scan_block(&dir, meta)?);
    }

    blocks.sort_by_key(Block::sort_order);
    Ok(LearningPath { blocks })
}

fn scan_block(block_dir: &Path, meta: BlockMeta) -> Result<Block, ScanError> {
    let slug = dir_name(block_dir);

    let mut topics = Vec::new();
    for dir in subdirectories(block_dir)? {
        if dir_name(&dir).starts_with('_') {
            continue;
        }
        let content_path = dir.join(ARTICLE_FILE);
        if !content_path.exists() {
            continue;
        }

        let content = fs::read_to_string(&content_path)?;
        let Ok((matter, body)) = frontmatter::parse(&content) else {
            // Unparseable metadata: exclude from the graph. The missing
            // order surfaces as a contiguity error in validation.
            continue;
        };

        let article_slug = dir_name(&dir);
        topics.push(Article {
            title: matter.title.unwrap_or_else(|| article_slug.clone()),
            description: matter.description,
            order: matter.order,
            prerequisites: matter.prerequisites,
            glossary: matter.glossary,
            body: body.to_string(),
            source_path: format!("{slug}/{article_slug}/{ARTICLE_FILE}"),
            slug: article_slug,
        });
    }

    topics.sort_by_key(Article::sort_order);

    Ok(Block {
        slug,
        title: meta.title,
        order: meta.order,
        topics,
    })
}

/// Immediate subdirectories of a path, sorted by name so the scan is
/// deterministic regardless of readdir order.
fn subdirectories(path: &Path) -> Result<Vec<PathBuf>, ScanError> {
    let mut dirs: Vec<PathBuf> = fs::read_dir(path)?
        .filter_map(|e| e.ok())
        .map(|e| e.path())
        .filter(|p| p.is_dir())
        .collect();
    dirs.sort();
    Ok(dirs)
}

fn dir_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::*;

    #[test]
    fn scan_finds_blocks_in_order() {
        let tmp = fixture_site();
        let path = scan(&tmp.path().join("topics")).unwrap();

        let slugs: Vec<&str> = path.blocks.iter().map(|b| b.slug.as_str()).collect();
        assert_eq!(slugs, vec!["foundations", "architectures"]);
    }

    #[test]
    fn articles_sorted_by_order_within_block() {
        let tmp = fixture_site();
        let path = scan(&tmp.path().join("topics")).unwrap();

        let block = find_block(&path, "foundations");
        let slugs: Vec<&str> = block.topics.iter().map(|t| t.slug.as_str()).collect();
        assert_eq!(slugs, vec!["what-is-a-neuron", "gradient-descent"]);
    }

    #[test]
    fn directory_without_block_meta_is_not_a_block() {
        let tmp = fixture_site();
        let drafts = tmp.path().join("topics/drafts/some-article");
        std::fs::create_dir_all(&drafts).unwrap();
        std::fs::write(drafts.join("index.md"), "---\ntitle: Draft\n---\n").unwrap();

        let path = scan(&tmp.path().join("topics")).unwrap();
        assert!(path.blocks.iter().all(|b| b.slug != "drafts"));
    }

    #[test]
    fn underscore_directories_are_not_articles() {
        let tmp = fixture_site();
        let assets = tmp.path().join("topics/foundations/_assets");
        std::fs::create_dir_all(&assets).unwrap();
        std::fs::write(assets.join("index.md"), "---\ntitle: Sneaky\n---\n").unwrap();

        let path = scan(&tmp.path().join("topics")).unwrap();
        let block = find_block(&path, "foundations");
        assert!(block.topics.iter().all(|t| t.slug != "_assets"));
    }

    #[test]
    fn directory_without_index_md_is_not_an_article() {
        let tmp = fixture_site();
        std::fs::create_dir_all(tmp.path().join("topics/foundations/images-only")).unwrap();

        let path = scan(&tmp.path().join("topics")).unwrap();
        let block = find_block(&path, "foundations");
        assert_eq!(block.topics.len(), 2);
    }

    #[test]
    fn malformed_front_matter_excludes_article_without_aborting() {
        let tmp = fixture_site();
        write_article(
            tmp.path(),
            "foundations",
            "broken",
            "---\ntitle: [unclosed\n---\nBody",
        );

        let path = scan(&tmp.path().join("topics")).unwrap();
        let block = find_block(&path, "foundations");
        assert!(block.topics.iter().all(|t| t.slug != "broken"));
        assert_eq!(block.topics.len(), 2);
    }

    #[test]
    fn missing_order_sorts_first_and_stays_absent() {
        let tmp = fixture_site();
        write_article(
            tmp.path(),
            "foundations",
            "unordered",
            "---\ntitle: No order here\n---\nBody",
        );

        let path = scan(&tmp.path().join("topics")).unwrap();
        let block = find_block(&path, "foundations");
        assert_eq!(block.topics[0].slug, "unordered");
        assert_eq!(block.topics[0].order, None);
    }

    #[test]
    fn title_falls_back_to_slug() {
        let tmp = fixture_site();
        write_article(
            tmp.path(),
            "foundations",
            "untitled-topic",
            "---\norder: 9\n---\nBody",
        );

        let path = scan(&tmp.path().join("topics")).unwrap();
        let article = find_article(find_block(&path, "foundations"), "untitled-topic");
        assert_eq!(article.title, "untitled-topic");
    }

    #[test]
    fn article_carries_body_and_source_path() {
        let tmp = fixture_site();
        let path = scan(&tmp.path().join("topics")).unwrap();

        let article = find_article(find_block(&path, "foundations"), "what-is-a-neuron");
        assert!(article.body.contains("mcculloch1943"));
        assert_eq!(
            article.source_path,
            "foundations/what-is-a-neuron/index.md"
        );
    }

    #[test]
    fn malformed_block_meta_is_fatal() {
        let tmp = fixture_site();
        std::fs::write(
            tmp.path().join("topics/foundations/_block.json"),
            "{not json",
        )
        .unwrap();

        let result = scan(&tmp.path().join("topics"));
        assert!(matches!(result, Err(ScanError::BlockMeta { .. })));
    }

    #[test]
    fn missing_root_is_fatal() {
        let tmp = tempfile::TempDir::new().unwrap();
        let result = scan(&tmp.path().join("no-such-dir"));
        assert!(matches!(result, Err(ScanError::MissingRoot(_))));
    }
}
