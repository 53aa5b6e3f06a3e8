//! Content-graph validation.
//!
//! Checks structural invariants (required metadata, contiguous ordering)
//! and referential integrity (citations, prerequisites, glossary terms,
//! reference-table uniqueness) against the scanned graph.
//!
//! Every check runs and every failure is collected; nothing short-circuits.
//! An author gets the complete list in one build instead of iterating
//! build-fail cycles. The aggregated report either is empty (build
//! proceeds) or aborts the build when the orchestrator turns it into an
//! error.
//!
//! ## Checks, in report order
//!
//! 1. Reference table: no two keys share a title; no two keys share a URL.
//! 2. Block orders form a contiguous 1..N run; duplicates reported
//!    separately.
//! 3. Per block: `_block.json` declares title and order; article orders
//!    are contiguous 1..M and duplicate-free within the block.
//! 4. Per article, re-read from its raw content file: front matter
//!    declares title, description, and order; every `{% cite "key" %}` in
//!    the body resolves in the reference table. An absent `order` is a
//!    missing-field error here, never coerced to a sortable
//!    default and waved through.
//! 5. After the full article set is known: every prerequisite URL of the
//!    `/topics/<slug>/` shape resolves to a scanned article. Forward
//!    references are fine; URLs without that shape are not checked.
//! 6. A glossary term defined by more than one article is an error, even
//!    though the aggregator would merge it silently; duplicates are for
//!    authors to fix, not for the build to paper over.
//!
//! The article pass re-reads `index.md` from disk rather than trusting the
//! scanner's summary: the graph applies fallbacks (title defaults to the
//! slug) that would mask exactly the problems this pass exists to catch.

use crate::frontmatter;
use crate::references::{self, ReferenceTable};
use crate::types::{Block, LearningPath};
use regex::Regex;
use std::collections::{BTreeMap, HashSet};
use std::fmt;
use std::path::Path;
use std::sync::OnceLock;

/// Aggregated validation diagnostics, in check order.
#[derive(Debug, Default)]
pub struct ValidationReport {
    errors: Vec<String>,
}

impl ValidationReport {
    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn errors(&self) -> &[String] {
        &self.errors
    }

    fn push(&mut self, message: String) {
        self.errors.push(message);
    }
}

impl fmt::Display for ValidationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "=== Build validation failed ===")?;
        for error in &self.errors {
            writeln!(f, "  - {error}")?;
        }
        write!(f, "\nSet SKIP_VALIDATION=1 to bypass.")
    }
}

fn prereq_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"/topics/([^/]+)/").unwrap())
}

/// Run every check against the graph and reference table.
///
/// `topics_dir` is needed because the per-article pass re-reads raw
/// content files.
pub fn validate(
    path: &LearningPath,
    refs: &ReferenceTable,
    topics_dir: &Path,
) -> ValidationReport {
    let mut report = ValidationReport::default();

    check_reference_duplicates(refs, &mut report);
    check_block_orders(path, &mut report);

    // term -> defining article slugs, in learning-path order
    let mut glossary_terms: BTreeMap<String, Vec<String>> = BTreeMap::new();

    for block in &path.blocks {
        check_block_meta(block, &mut report);
        check_article_orders(block, &mut report);

        for article in &block.topics {
            check_article_file(
                &topics_dir.join(&article.source_path),
                &article.slug,
                refs,
                &mut glossary_terms,
                &mut report,
            );
        }
    }

    check_prerequisites(path, &mut report);

    for (term, slugs) in &glossary_terms {
        if slugs.len() > 1 {
            report.push(format!(
                "Glossary term \"{term}\" defined in multiple articles: {}",
                slugs.join(", ")
            ));
        }
    }

    report
}

/// Check 1: no two reference keys may share a title or a URL.
fn check_reference_duplicates(refs: &ReferenceTable, report: &mut ValidationReport) {
    let mut title_to_keys: BTreeMap<&str, Vec<&str>> = BTreeMap::new();
    let mut url_to_keys: BTreeMap<&str, Vec<&str>> = BTreeMap::new();

    for (key, entry) in refs {
        if let Some(title) = entry.title.as_deref() {
            title_to_keys.entry(title).or_default().push(key.as_str());
        }
        if let Some(url) = entry.url.as_deref() {
            url_to_keys.entry(url).or_default().push(key.as_str());
        }
    }

    for (title, keys) in &title_to_keys {
        if keys.len() > 1 {
            report.push(format!(
                "Duplicate reference title \"{title}\" in keys: {}",
                keys.join(", ")
            ));
        }
    }
    for (url, keys) in &url_to_keys {
        if keys.len() > 1 {
            report.push(format!(
                "Duplicate reference URL \"{url}\" in keys: {}",
                keys.join(", ")
            ));
        }
    }
}

/// Check 2: block orders must be a contiguous 1..N run, duplicate-free.
fn check_block_orders(path: &LearningPath, report: &mut ValidationReport) {
    let orders: Vec<u32> = path.blocks.iter().map(Block::sort_order).collect();
    let mut sorted = orders.clone();
    sorted.sort_unstable();

    if let Some((expected, actual)) = first_gap(&sorted) {
        let listing: Vec<String> = path
            .blocks
            .iter()
            .map(|b| format!("{}({})", b.slug, fmt_order(b.order)))
            .collect();
        report.push(format!(
            "Block order is not contiguous: expected {expected}, got {actual}. Blocks: {}",
            listing.join(", ")
        ));
    }

    if has_duplicates(&sorted) {
        let listing: Vec<String> = sorted.iter().map(u32::to_string).collect();
        report.push(format!(
            "Duplicate block orders found: {}",
            listing.join(", ")
        ));
    }
}

/// Check 3a: `_block.json` must declare both fields.
fn check_block_meta(block: &Block, report: &mut ValidationReport) {
    if block.title.is_none() {
        report.push(format!("Block {}: missing title in _block.json", block.slug));
    }
    if block.order.is_none() {
        report.push(format!("Block {}: missing order in _block.json", block.slug));
    }
}

/// Check 3b: article orders contiguous 1..M and duplicate-free, scoped to
/// one block.
fn check_article_orders(block: &Block, report: &mut ValidationReport) {
    let mut sorted: Vec<u32> = block.topics.iter().map(|t| t.sort_order()).collect();
    sorted.sort_unstable();

    if let Some((expected, actual)) = first_gap(&sorted) {
        let listing: Vec<String> = block
            .topics
            .iter()
            .map(|t| format!("{}({})", t.slug, fmt_order(t.order)))
            .collect();
        report.push(format!(
            "Block \"{}\": article order not contiguous. Expected {expected}, got {actual}. Articles: {}",
            block.slug,
            listing.join(", ")
        ));
    }

    if has_duplicates(&sorted) {
        let listing: Vec<String> = sorted.iter().map(u32::to_string).collect();
        report.push(format!(
            "Block \"{}\": duplicate article orders: {}",
            block.slug,
            listing.join(", ")
        ));
    }
}

/// Check 4: required front matter and citation resolution, from the raw
/// file. Also records glossary terms for the later duplicate check.
fn check_article_file(
    file: &Path,
    slug: &str,
    refs: &ReferenceTable,
    glossary_terms: &mut BTreeMap<String, Vec<String>>,
    report: &mut ValidationReport,
) {
    let Ok(raw) = std::fs::read_to_string(file) else {
        return;
    };
    let (matter, body) = match frontmatter::parse(&raw) {
        Ok(parsed) => parsed,
        Err(err) => {
            report.push(format!("{slug}: unparseable front matter ({err})"));
            return;
        }
    };

    if matter.title.is_none() {
        report.push(format!("{slug}: missing 'title' in front matter"));
    }
    if matter.description.is_none() {
        report.push(format!("{slug}: missing 'description' in front matter"));
    }
    if matter.order.is_none() {
        report.push(format!("{slug}: missing 'order' in front matter"));
    }

    for key in references::extract_citations(body) {
        if !refs.contains_key(key) {
            report.push(format!(
                "{slug}: cite key \"{key}\" not found in references"
            ));
        }
    }

    for item in &matter.glossary {
        glossary_terms
            .entry(item.term.clone())
            .or_default()
            .push(slug.to_string());
    }
}

/// Check 5: prerequisite links of the internal `/topics/<slug>/` shape
/// must resolve against the full article set.
fn check_prerequisites(path: &LearningPath, report: &mut ValidationReport) {
    let known: HashSet<&str> = path.articles().map(|(_, a)| a.slug.as_str()).collect();

    for (_, article) in path.articles() {
        for prereq in &article.prerequisites {
            let Some(captures) = prereq_regex().captures(&prereq.url) else {
                continue;
            };
            let target = captures.get(1).unwrap().as_str();
            if !known.contains(target) {
                report.push(format!(
                    "{}: prerequisite \"{}\" references non-existent article",
                    article.slug, prereq.url
                ));
            }
        }
    }
}

/// First position where a sorted order run deviates from 1..N.
/// Returns (expected, actual).
fn first_gap(sorted: &[u32]) -> Option<(u32, u32)> {
    sorted
        .iter()
        .enumerate()
        .find(|&(i, &order)| order != (i as u32) + 1)
        .map(|(i, &order)| ((i as u32) + 1, order))
}

fn has_duplicates(sorted: &[u32]) -> bool {
    sorted.windows(2).any(|pair| pair[0] == pair[1])
}

fn fmt_order(order: Option<u32>) -> String {
    match order {
        Some(value) => value.to_string(),
        None => "?".to_string(),
    }
}
