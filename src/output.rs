//! CLI output formatting.
//!
//! Output is information-centric, not file-centric: each entity leads
//! with its positional index and title, with source paths as indented
//! `Source:` context lines.
//!
//! ```text
//! Blocks
//! 001 Foundations (2 articles)
//!     Source: foundations/
//!     001 What is a neuron
//!         Source: what-is-a-neuron/index.md
//!         The basic unit of neural computation.
//!     002 Gradient descent
//!         Source: gradient-descent/index.md
//! ```
//!
//! Each stage has a `format_*` function (returns `Vec<String>`) for
//! testability and a `print_*` wrapper that writes to stdout. Format
//! functions are pure.

use crate::build::BuildSummary;
use crate::glossary::GlossaryEntry;
use crate::types::LearningPath;

/// Format a 1-based positional index as 3-digit zero-padded.
fn format_index(pos: usize) -> String {
    format!("{:0>3}", pos)
}

/// Return indentation string: 4 spaces per depth level.
fn indent(depth: usize) -> String {
    "    ".repeat(depth)
}

/// Truncate text to `max` characters, appending `...` if truncated.
fn truncate_desc(text: &str, max: usize) -> String {
    if text.len() <= max {
        text.to_string()
    } else {
        format!("{}...", &text[..max])
    }
}

/// Format the scanned structure as an indented tree.
pub fn format_scan_output(path: &LearningPath) -> Vec<String> {
    let mut lines = Vec::new();
    lines.push("Blocks".to_string());

    for (i, block) in path.blocks.iter().enumerate() {
        let title = block.title.as_deref().unwrap_or(&block.slug);
        lines.push(format!(
            "{} {} ({} articles)",
            format_index(i + 1),
            title,
            block.topics.len()
        ));
        lines.push(format!("{}Source: {}/", indent(1), block.slug));

        for (j, article) in block.topics.iter().enumerate() {
            lines.push(format!("{}{} {}", indent(1), format_index(j + 1), article.title));
            lines.push(format!("{}Source: {}/index.md", indent(2), article.slug));
            if let Some(ref desc) = article.description {
                let truncated = truncate_desc(desc.trim(), 60);
                if !truncated.is_empty() {
                    lines.push(format!("{}{}", indent(2), truncated));
                }
            }
        }
    }

    lines
}

/// Format the aggregated glossary as an indented list.
pub fn format_glossary_output(entries: &[GlossaryEntry]) -> Vec<String> {
    let mut lines = Vec::new();
    lines.push("Glossary".to_string());

    for (i, entry) in entries.iter().enumerate() {
        let count = entry.links.len();
        let suffix = if count == 1 { "article" } else { "articles" };
        lines.push(format!(
            "{} {} ({} {})",
            format_index(i + 1),
            entry.term,
            count,
            suffix
        ));
        lines.push(format!("{}{}", indent(1), truncate_desc(&entry.definition, 60)));
    }

    lines
}

/// Format the one-line build result.
pub fn format_build_summary(summary: &BuildSummary) -> Vec<String> {
    let mut lines = vec![format!(
        "Built {} blocks, {} articles, {} glossary terms -> {}",
        summary.blocks,
        summary.articles,
        summary.glossary_terms,
        summary.output.display()
    )];
    if !summary.validated {
        lines.push("Validation skipped".to_string());
    }
    if !summary.indexed {
        lines.push("Search indexing skipped".to_string());
    }
    lines
}

pub fn print_scan_output(path: &LearningPath) {
    for line in format_scan_output(path) {
        println!("{line}");
    }
}

pub fn print_glossary_output(entries: &[GlossaryEntry]) {
    for line in format_glossary_output(entries) {
        println!("{line}");
    }
}

pub fn print_build_summary(summary: &BuildSummary) {
    for line in format_build_summary(summary) {
        println!("{line}");
    }
}
