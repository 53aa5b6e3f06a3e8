//! # Topical
//!
//! A minimal content pipeline for learning-path course sites. Your
//! filesystem is the data source: directories become blocks and articles,
//! explicit `order` fields define the learning path, and front matter
//! carries the metadata the site is built from.
//!
//! # Architecture: One Pass, Four Stages
//!
//! Every invocation recomputes the whole content graph from disk and runs
//! it through four stages:
//!
//! ```text
//! 1. Scan      topics/   →  LearningPath       (filesystem → ordered graph)
//! 2. Validate  graph     →  aggregated report  (abort on any diagnostic)
//! 3. Emit      graph     →  _site/data/*.json  (render-layer collection + glossary)
//! 4. Index     _site/    →  search index       (external subprocess)
//! ```
//!
//! The graph is built once and passed by reference to every consumer.
//! No component re-scans the filesystem to answer a question the graph
//! already answers; the one deliberate exception is the validator's
//! required-field pass, which re-reads raw article files because the
//! graph applies fallbacks (title defaults to the slug) that would mask
//! exactly the authoring mistakes it exists to catch.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`scan`] | Stage 1: walks the topics tree, builds the ordered graph |
//! | [`frontmatter`] | YAML front-matter split and parse for article files |
//! | [`references`] | Bibliography table loading and citation-key extraction |
//! | [`validate`] | Stage 2: structural and referential checks, aggregated report |
//! | [`glossary`] | Term aggregation, first definition in path order wins |
//! | [`render`] | Render-layer contract: ordered collection, shortcodes, per-page counters |
//! | [`build`] | Stage 3+4: orchestration, artifact emission, indexer subprocess |
//! | [`config`] | `config.toml` loading, stock defaults, validation |
//! | [`output`] | CLI output formatting, tree display of pipeline results |
//! | [`types`] | Shared graph types (`LearningPath`, `Block`, `Article`) |
//!
//! # Design Decisions
//!
//! ## Tolerant Scan, Loud Validation
//!
//! Discovery is forgiving: a directory without `_block.json` is simply
//! not a block, an article directory without `index.md` is simply not an
//! article, and malformed front matter excludes one article rather than
//! killing the scan. Enforcement is the validator's job, and the
//! validator is strict: every required field, every ordering invariant,
//! every citation key, every prerequisite link. The two policies
//! cooperate: an article the scan dropped leaves an order gap the
//! validator names.
//!
//! ## All Errors At Once
//!
//! The validator never stops at the first failure. Every check runs and
//! the full diagnostic list comes back in one aggregated message, so an
//! author fixes everything in one pass instead of replaying
//! build-fail-fix cycles one error at a time.
//!
//! ## Ordering Is Explicit and Contiguous
//!
//! Blocks and articles are ordered by numeric `order` fields that must
//! form contiguous 1..N runs. Contiguity makes a dropped or duplicated
//! entry visible at build time instead of silently reshuffling the
//! learning path. An article without an `order` is a validation error,
//! never a silent zero.
//!
//! ## Per-Page Numbering State
//!
//! Citation and sidenote numbers restart on each page. The counters live
//! in a [`render::PageContext`] created per body render and dropped with
//! it, so watch-mode rebuilds cannot inherit stale numbering; there is
//! no global counter anywhere to forget to reset.
//!
//! ## Glossary: Merge On Render, Error On Validate
//!
//! When two articles define the same term, the aggregator keeps the
//! definition from the earlier article in path order and links both;
//! the published glossary always renders something sensible. The same
//! duplicate is still a build error, because competing definitions are
//! an authoring problem to fix, not to paper over.

pub mod build;
pub mod config;
pub mod frontmatter;
pub mod glossary;
pub mod output;
pub mod references;
pub mod render;
pub mod scan;
pub mod types;
pub mod validate;

#[cfg(test)]
pub(crate) mod test_helpers;
