//! Render-layer data contract.
//!
//! The templating layer is a separate concern; this module produces what
//! it consumes:
//!
//! - [`collection`]: every article as an [`ArticleRecord`], in
//!   learning-path order, with the body already rendered to HTML.
//! - Shortcode expansion: the inline directives authors write in
//!   markdown bodies (`{% cite "key" %}`, `{% sidenote "text" %}`,
//!   `{% marginnote "text" %}`) become HTML before the markdown pass, so
//!   the markdown renderer only ever sees inline HTML it passes through.
//!
//! ## Per-page counters
//!
//! Citation and note numbering restarts on every page. The numbering
//! state lives in a [`PageContext`] created for one body render and
//! dropped with it; there is no process-wide counter to reset between
//! builds, which is what keeps repeated builds in watch mode from leaking
//! numbering across runs.
//!
//! Unknown citation keys render as a `[??]` error marker instead of
//! failing: rendering stays total, and the validator is the component
//! that refuses to ship a body with a bad key.

use crate::references::{Reference, ReferenceTable};
use crate::types::LearningPath;
use maud::{Markup, html};
use pulldown_cmark::{Parser, html as md_html};
use regex::{Captures, Regex};
use serde::Serialize;
use std::sync::OnceLock;

/// One article as exposed to the templating layer.
#[derive(Debug, Serialize)]
pub struct ArticleRecord {
    /// 1-based position across the whole learning path.
    pub position: usize,
    pub block: String,
    pub block_title: String,
    pub slug: String,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub url: String,
    /// Body rendered to HTML, shortcodes expanded. Written to the
    /// per-article fragment file, not the collection JSON.
    #[serde(skip)]
    pub body_html: String,
    /// Estimated reading time, e.g. "4 min read". Empty for empty bodies.
    pub reading_time: String,
}

/// Numbering state for a single page render.
#[derive(Debug, Default)]
pub struct PageContext {
    citations: u32,
    sidenotes: u32,
    margin_notes: u32,
}

impl PageContext {
    pub fn new() -> Self {
        Self::default()
    }
}

/// Flatten the graph into the ordered article collection.
pub fn collection(path: &LearningPath, refs: &ReferenceTable) -> Vec<ArticleRecord> {
    path.articles()
        .enumerate()
        .map(|(i, (block, article))| {
            let body_html = render_body(&article.body, refs);
            let reading_time = reading_time(&body_html);
            ArticleRecord {
                position: i + 1,
                block: block.slug.clone(),
                block_title: block.title.clone().unwrap_or_else(|| block.slug.clone()),
                slug: article.slug.clone(),
                title: article.title.clone(),
                description: article.description.clone(),
                url: article.url(),
                body_html,
                reading_time,
            }
        })
        .collect()
}

/// Render one article body: expand shortcodes against a fresh page
/// context, then run the markdown pass.
pub fn render_body(body: &str, refs: &ReferenceTable) -> String {
    let mut context = PageContext::new();
    let expanded = expand_shortcodes(body, refs, &mut context);

    let mut out = String::with_capacity(expanded.len() * 2);
    md_html::push_html(&mut out, Parser::new(&expanded));
    out
}

fn shortcode_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r#"\{%[-\s]*(cite|sidenote|marginnote)\s+"([^"]*)"\s*[-\s]*%\}"#).unwrap()
    })
}

/// Replace every inline directive with its HTML expansion, numbering
/// through `context`.
pub fn expand_shortcodes(body: &str, refs: &ReferenceTable, context: &mut PageContext) -> String {
    shortcode_regex()
        .replace_all(body, |caps: &Captures| {
            let argument = caps.get(2).unwrap().as_str();
            match caps.get(1).unwrap().as_str() {
                "cite" => {
                    context.citations += 1;
                    citation(refs.get(argument), context.citations).into_string()
                }
                "sidenote" => {
                    context.sidenotes += 1;
                    sidenote(argument, context.sidenotes).into_string()
                }
                _ => {
                    context.margin_notes += 1;
                    margin_note(argument, context.margin_notes).into_string()
                }
            }
        })
        .into_owned()
}

/// Numbered inline citation with a hover tooltip carrying the
/// bibliographic fields.
fn citation(entry: Option<&Reference>, number: u32) -> Markup {
    let Some(entry) = entry else {
        return html! { span class="citation-error" { "[??]" } };
    };

    let year = entry.year.map(|y| y.to_string()).unwrap_or_default();
    html! {
        span class="citation" tabindex="0" role="doc-noteref" {
            a href=(entry.url.as_deref().unwrap_or("#"))
                target="_blank" rel="noopener" class="citation-number" {
                "[" (number) "]"
            }
            span class="citation-tooltip" role="tooltip" {
                strong { (entry.title.as_deref().unwrap_or("")) }
                br;
                (entry.authors.as_deref().unwrap_or(""))
                br;
                em { (entry.venue.as_deref().unwrap_or("")) ", " (year) }
            }
        }
    }
}

/// Tufte-style numbered sidenote, toggled by a checkbox on small screens.
fn sidenote(content: &str, number: u32) -> Markup {
    let id = format!("sn-{number}");
    html! {
        span class="sidenote-wrapper" {
            label for=(id) class="sidenote-toggle sidenote-number" {}
            input type="checkbox" id=(id) class="sidenote-toggle-input";
            span class="sidenote" { (content) }
        }
    }
}

/// Unnumbered margin note. The counter only feeds the toggle id.
fn margin_note(content: &str, number: u32) -> Markup {
    let id = format!("mn-{number}");
    html! {
        span class="sidenote-wrapper" {
            label for=(id) class="sidenote-toggle marginnote-indicator" { "\u{2295}" }
            input type="checkbox" id=(id) class="sidenote-toggle-input";
            span class="marginnote" { (content) }
        }
    }
}

const WORDS_PER_MINUTE: usize = 230;

/// Reading-time estimate over the rendered HTML. Tags are stripped,
/// words counted, minutes rounded up. Empty content yields an empty
/// string rather than "0 min read".
pub fn reading_time(html: &str) -> String {
    let text = strip_html_tags(html);
    let words = text.split_whitespace().count();
    if words == 0 {
        return String::new();
    }
    let minutes = words.div_ceil(WORDS_PER_MINUTE);
    format!("{minutes} min read")
}

/// Strip HTML tags from a string (simple angle-bracket stripping).
fn strip_html_tags(html: &str) -> String {
    let mut result = String::with_capacity(html.len());
    let mut in_tag = false;
    for c in html.chars() {
        match c {
            '<' => in_tag = true,
            '>' => {
                in_tag = false;
                // Keep words separated where tags were.
                result.push(' ');
            }
            _ if !in_tag => result.push(c),
            _ => {}
        }
    }
    result
}
