//! Shared test utilities for the topical test suite.
//!
//! Provides a programmatic fixture site plus lookup helpers over the
//! scanned graph. Tests get an isolated temp directory they can mutate
//! freely; the `write_*` helpers overwrite fixture files to produce the
//! specific broken shapes a test needs.
//!
//! The stock fixture is fully valid: two blocks with orders {1, 2}, two
//! articles each with orders {1, 2}, two reference keys both cited, one
//! glossary term per block, and one satisfied prerequisite chain.

use std::fs;
use std::path::Path;
use tempfile::TempDir;

use crate::types::{Article, Block, LearningPath};

/// Build the stock valid site in a temp directory.
///
/// Layout:
///
/// ```text
/// <tmp>/
/// ├── references.json
/// └── topics/
///     ├── foundations/            order 1
///     │   ├── _block.json
///     │   ├── what-is-a-neuron/   order 1, defines "activation", cites mcculloch1943
///     │   └── gradient-descent/   order 2, requires what-is-a-neuron
///     └── architectures/          order 2
///         ├── _block.json
///         ├── convnets/           order 1, defines "kernel", cites rosenblatt1958
///         └── transformers/       order 2, requires convnets
/// ```
pub fn fixture_site() -> TempDir {
    let tmp = TempDir::new().unwrap();

    write_block_meta(tmp.path(), "foundations", Some("Foundations"), Some(1));
    write_article(
        tmp.path(),
        "foundations",
        "what-is-a-neuron",
        "---\n\
         title: What is a neuron\n\
         description: The basic unit of neural computation.\n\
         order: 1\n\
         glossary:\n\
         \x20 - term: activation\n\
         \x20   definition: The output value of a neuron.\n\
         ---\n\n\
         A neuron computes a weighted sum of its inputs {% cite \"mcculloch1943\" %}.\n",
    );
    write_article(
        tmp.path(),
        "foundations",
        "gradient-descent",
        "---\n\
         title: Gradient descent\n\
         description: Iterative optimization.\n\
         order: 2\n\
         prerequisites:\n\
         \x20 - url: /topics/what-is-a-neuron/\n\
         \x20   label: What is a neuron\n\
         ---\n\n\
         Training minimizes the loss one step at a time.\n",
    );

    write_block_meta(tmp.path(), "architectures", Some("Architectures"), Some(2));
    write_article(
        tmp.path(),
        "architectures",
        "convnets",
        "---\n\
         title: Convnets\n\
         description: Convolutional networks.\n\
         order: 1\n\
         glossary:\n\
         \x20 - term: kernel\n\
         \x20   definition: A small learned filter.\n\
         ---\n\n\
         Convolutions reuse weights across positions {% cite \"rosenblatt1958\" %}.\n",
    );
    write_article(
        tmp.path(),
        "architectures",
        "transformers",
        "---\n\
         title: Transformers\n\
         description: Attention models.\n\
         order: 2\n\
         prerequisites:\n\
         \x20 - url: /topics/convnets/\n\
         \x20   label: Convnets\n\
         ---\n\n\
         Attention replaces recurrence entirely.\n",
    );

    write_references(
        tmp.path(),
        r#"{
            "mcculloch1943": {
                "title": "A Logical Calculus of the Ideas Immanent in Nervous Activity",
                "url": "https://example.org/logical-calculus",
                "authors": "Warren McCulloch and Walter Pitts",
                "venue": "Bulletin of Mathematical Biophysics",
                "year": 1943
            },
            "rosenblatt1958": {
                "title": "The Perceptron: A Probabilistic Model",
                "url": "https://example.org/perceptron",
                "authors": "Frank Rosenblatt",
                "venue": "Psychological Review",
                "year": 1958
            }
        }"#,
    );

    tmp
}

/// Write (or overwrite) a block's `_block.json`. `None` fields are omitted
/// from the JSON entirely, which is how authors actually break them.
pub fn write_block_meta(root: &Path, block: &str, title: Option<&str>, order: Option<u32>) {
    let dir = root.join("topics").join(block);
    fs::create_dir_all(&dir).unwrap();

    let mut meta = serde_json::Map::new();
    if let Some(title) = title {
        meta.insert("title".into(), title.into());
    }
    if let Some(order) = order {
        meta.insert("order".into(), order.into());
    }
    let json = serde_json::to_string_pretty(&serde_json::Value::Object(meta)).unwrap();
    fs::write(dir.join("_block.json"), json).unwrap();
}

/// Write (or overwrite) an article's `index.md` with raw content.
pub fn write_article(root: &Path, block: &str, slug: &str, content: &str) {
    let dir = root.join("topics").join(block).join(slug);
    fs::create_dir_all(&dir).unwrap();
    fs::write(dir.join("index.md"), content).unwrap();
}

/// Write (or overwrite) the reference table.
pub fn write_references(root: &Path, json: &str) {
    fs::write(root.join("references.json"), json).unwrap();
}

// =========================================================================
// Graph lookups: panic with a clear message on miss
// =========================================================================

/// Find a block by slug. Panics if not found.
pub fn find_block<'a>(path: &'a LearningPath, slug: &str) -> &'a Block {
    path.blocks.iter().find(|b| b.slug == slug).unwrap_or_else(|| {
        let slugs: Vec<&str> = path.blocks.iter().map(|b| b.slug.as_str()).collect();
        panic!("block '{slug}' not found. Available: {slugs:?}")
    })
}

/// Find an article by slug within a block. Panics if not found.
pub fn find_article<'a>(block: &'a Block, slug: &str) -> &'a Article {
    block.topics.iter().find(|t| t.slug == slug).unwrap_or_else(|| {
        let slugs: Vec<&str> = block.topics.iter().map(|t| t.slug.as_str()).collect();
        panic!(
            "article '{slug}' not found in block '{}'. Available: {slugs:?}",
            block.slug
        )
    })
}
