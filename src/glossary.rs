//! Glossary aggregation across the learning path.
//!
//! Collects every `glossary` entry declared in article front matter into a
//! single flat term list for the glossary page. When the same term is
//! defined in more than one article, the first definition in learning-path
//! order wins and every defining article is back-linked.
//!
//! The aggregator tolerates duplicates; the validator reports them. The
//! split is deliberate: a published glossary page must always render
//! something sensible, while duplicate definitions are an authoring error
//! to fix at build time.
//!
//! Output is sorted case-insensitively by term, so "ReLU" and "activation"
//! interleave the way a reader expects rather than by byte value.

use crate::types::LearningPath;
use serde::Serialize;
use std::collections::HashMap;

/// One aggregated glossary entry.
#[derive(Debug, Clone, Serialize)]
pub struct GlossaryEntry {
    pub term: String,
    /// Definition from the first defining article in learning-path order.
    pub definition: String,
    /// Every defining article, in learning-path order.
    pub links: Vec<GlossaryLink>,
}

/// Back-link from a glossary entry to a defining article.
#[derive(Debug, Clone, Serialize)]
pub struct GlossaryLink {
    /// Article URL.
    pub article: String,
    /// Article title.
    pub label: String,
}

/// Aggregate glossary terms over the graph.
///
/// Deterministic: traversal is exactly the learning-path order the scanner
/// produced, so re-running over the same graph yields identical output.
pub fn aggregate(path: &LearningPath) -> Vec<GlossaryEntry> {
    let mut entries: Vec<GlossaryEntry> = Vec::new();
    let mut index: HashMap<&str, usize> = HashMap::new();

    for (_, article) in path.articles() {
        for item in &article.glossary {
            let link = GlossaryLink {
                article: article.url(),
                label: article.title.clone(),
            };

            match index.get(item.term.as_str()).copied() {
                // Term already seen: keep the first definition, add this
                // article's link.
                Some(i) => entries[i].links.push(link),
                None => {
                    index.insert(&item.term, entries.len());
                    entries.push(GlossaryEntry {
                        term: item.term.clone(),
                        definition: item.definition.clone(),
                        links: vec![link],
                    });
                }
            }
        }
    }

    entries.sort_by(|a, b| {
        (a.term.to_lowercase(), &a.term).cmp(&(b.term.to_lowercase(), &b.term))
    });
    entries
}
