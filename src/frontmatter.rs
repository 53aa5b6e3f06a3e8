//! Front-matter parsing for article content files.
//!
//! Articles carry structured metadata in a YAML block delimited by `---`
//! at the head of `index.md`:
//!
//! ```text
//! ---
//! title: What is a neuron
//! description: The basic unit of neural computation.
//! order: 1
//! prerequisites:
//!   - url: /topics/linear-models/
//!     label: Linear models
//! glossary:
//!   - term: activation
//!     definition: The output value of a neuron.
//! ---
//!
//! Body text with {% cite "rosenblatt1958" %} directives.
//! ```
//!
//! Parsing is two-stage on purpose: [`split`] separates the metadata head
//! from the body with plain string handling, then serde deserializes the
//! head. Body-level concerns (citation directives, shortcodes) operate on
//! the raw body string and never require this module.
//!
//! A file without a front-matter block parses as all-absent metadata plus
//! the full content as body. Required-field enforcement is the validator's
//! job, not the parser's.

use crate::types::{GlossaryItem, Prerequisite};
use serde::Deserialize;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum FrontMatterError {
    #[error("unterminated front-matter block")]
    Unterminated,
    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yaml_ng::Error),
}

/// Article metadata as declared. Every field is optional here; the
/// validator reports what is missing.
#[derive(Debug, Default, Deserialize)]
pub struct FrontMatter {
    pub title: Option<String>,
    pub description: Option<String>,
    pub order: Option<u32>,
    #[serde(default)]
    pub prerequisites: Vec<Prerequisite>,
    #[serde(default)]
    pub glossary: Vec<GlossaryItem>,
}

const DELIMITER: &str = "---";

/// Split content into the raw YAML head and the body.
///
/// Returns `None` when the content does not open with a `---` line; a
/// `---` that is never closed is an error rather than silently treating
/// the whole file as body.
pub fn split(content: &str) -> Result<Option<(&str, &str)>, FrontMatterError> {
    let rest = match content.strip_prefix(DELIMITER) {
        Some(rest) if rest.starts_with('\n') || rest.starts_with("\r\n") => rest,
        _ => return Ok(None),
    };

    let close = format!("\n{DELIMITER}");
    let end = rest.find(&close).ok_or(FrontMatterError::Unterminated)?;

    let head = &rest[..end];
    let body = rest[end + close.len()..].trim_start_matches(['\r', '\n']);
    Ok(Some((head, body)))
}

/// Parse a content file into front matter and body.
///
/// Missing front matter yields [`FrontMatter::default`] with the entire
/// content as body. Malformed YAML is an error, which the scanner maps to
/// "this article is excluded from the graph".
pub fn parse(content: &str) -> Result<(FrontMatter, &str), FrontMatterError> {
    match split(content)? {
        Some((head, body)) if head.trim().is_empty() => Ok((FrontMatter::default(), body)),
        Some((head, body)) => {
            let matter = serde_yaml_ng::from_str(head)?;
            Ok((matter, body))
        }
        None => Ok((FrontMatter::default(), content)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_all_fields() {
        let content = "---\n\
            title: Gradient descent\n\
            description: Iterative optimization.\n\
            order: 2\n\
            prerequisites:\n\
            \x20 - url: /topics/derivatives/\n\
            \x20   label: Derivatives\n\
            glossary:\n\
            \x20 - term: learning rate\n\
            \x20   definition: Step size per update.\n\
            ---\n\nBody text.";

        let (matter, body) = parse(content).unwrap();
        assert_eq!(matter.title.as_deref(), Some("Gradient descent"));
        assert_eq!(matter.description.as_deref(), Some("Iterative optimization."));
        assert_eq!(matter.order, Some(2));
        assert_eq!(matter.prerequisites.len(), 1);
        assert_eq!(matter.prerequisites[0].url, "/topics/derivatives/");
        assert_eq!(matter.glossary[0].term, "learning rate");
        assert_eq!(body, "Body text.");
    }

    #[test]
    fn missing_fields_stay_absent() {
        let (matter, _) = parse("---\ntitle: Only a title\n---\nBody").unwrap();
        assert_eq!(matter.title.as_deref(), Some("Only a title"));
        assert_eq!(matter.description, None);
        assert_eq!(matter.order, None);
        assert!(matter.prerequisites.is_empty());
        assert!(matter.glossary.is_empty());
    }

    #[test]
    fn explicit_zero_order_is_preserved() {
        let (matter, _) = parse("---\norder: 0\n---\n").unwrap();
        assert_eq!(matter.order, Some(0));
    }

    #[test]
    fn empty_front_matter_block_yields_defaults() {
        let (matter, body) = parse("---\n---\nBody").unwrap();
        assert_eq!(matter.title, None);
        assert_eq!(body, "Body");
    }

    #[test]
    fn no_front_matter_yields_defaults() {
        let (matter, body) = parse("Just a body, no metadata.").unwrap();
        assert_eq!(matter.title, None);
        assert_eq!(body, "Just a body, no metadata.");
    }

    #[test]
    fn dashes_inside_body_are_not_a_delimiter() {
        let content = "Intro paragraph.\n---\nMore body.";
        let (matter, body) = parse(content).unwrap();
        assert_eq!(matter.title, None);
        assert_eq!(body, content);
    }

    #[test]
    fn unterminated_block_is_an_error() {
        let result = parse("---\ntitle: Broken\nnever closed");
        assert!(matches!(result, Err(FrontMatterError::Unterminated)));
    }

    #[test]
    fn malformed_yaml_is_an_error() {
        let result = parse("---\ntitle: [unclosed\n---\nBody");
        assert!(matches!(result, Err(FrontMatterError::Yaml(_))));
    }

    #[test]
    fn crlf_delimiters_accepted() {
        let content = "---\r\ntitle: Windows file\r\n---\r\nBody";
        let (matter, body) = parse(content).unwrap();
        assert_eq!(matter.title.as_deref(), Some("Windows file"));
        assert_eq!(body, "Body");
    }
}
