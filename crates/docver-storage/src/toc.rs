//! Table of contents derivation from markdown.
//!
//! Heading anchors follow the GitHub slug rules used by the site renderer:
//! lowercase, punctuation removed, spaces replaced by dashes, and repeated
//! slugs suffixed with `-1`, `-2`, ... An explicit `{#id}` attribute wins.

use std::collections::HashMap;

use pulldown_cmark::{Event, HeadingLevel, Options, Parser, Tag, TagEnd};

use crate::TocEntry;
use crate::mdx::blank_jsx_lines;

/// Generates unique heading slugs for one document.
#[derive(Debug, Default)]
pub struct Slugger {
    occurrences: HashMap<String, usize>,
}

impl Slugger {
    /// Create a slugger with no slugs taken.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Slug for `text`, unique among slugs returned by this slugger.
    pub fn slug(&mut self, text: &str) -> String {
        let original = slugify(text);
        let mut result = original.clone();

        while self.occurrences.contains_key(&result) {
            let count = self.occurrences.entry(original.clone()).or_default();
            *count += 1;
            result = format!("{original}-{count}");
        }

        self.occurrences.insert(result.clone(), 0);
        result
    }
}

/// Convert heading text to a slug without uniqueness tracking.
fn slugify(text: &str) -> String {
    text.chars()
        .filter_map(|c| match c {
            ' ' => Some('-'),
            '-' | '_' => Some(c),
            c if c.is_alphanumeric() => Some(c),
            _ => None,
        })
        .flat_map(char::to_lowercase)
        .collect()
}

fn heading_level_to_num(level: HeadingLevel) -> u8 {
    match level {
        HeadingLevel::H1 => 1,
        HeadingLevel::H2 => 2,
        HeadingLevel::H3 => 3,
        HeadingLevel::H4 => 4,
        HeadingLevel::H5 => 5,
        HeadingLevel::H6 => 6,
    }
}

/// Heading being collected.
struct OpenHeading {
    depth: u8,
    id: Option<String>,
    text: String,
}

/// Extract table of contents entries from markdown.
///
/// Front matter is skipped. Headings with empty text are omitted. Headings
/// inside JSX wrappers count like any other.
#[must_use]
pub fn extract_toc(markdown: &str) -> Vec<TocEntry> {
    let options = Options::ENABLE_HEADING_ATTRIBUTES
        | Options::ENABLE_YAML_STYLE_METADATA_BLOCKS
        | Options::ENABLE_TABLES
        | Options::ENABLE_STRIKETHROUGH;

    let mut slugger = Slugger::new();
    let mut toc = Vec::new();
    let mut current: Option<OpenHeading> = None;

    let markdown = blank_jsx_lines(markdown);
    for event in Parser::new_ext(&markdown, options) {
        match event {
            Event::Start(Tag::Heading { level, id, .. }) => {
                current = Some(OpenHeading {
                    depth: heading_level_to_num(level),
                    id: id.map(|id| id.to_string()),
                    text: String::new(),
                });
            }
            Event::Text(text) | Event::Code(text) => {
                if let Some(heading) = current.as_mut() {
                    heading.text.push_str(&text);
                }
            }
            Event::End(TagEnd::Heading(_)) => {
                let Some(heading) = current.take() else {
                    continue;
                };
                let title = heading.text.trim().to_owned();
                if title.is_empty() && heading.id.is_none() {
                    continue;
                }
                let anchor = heading.id.unwrap_or_else(|| slugger.slug(&title));
                toc.push(TocEntry {
                    depth: heading.depth,
                    title,
                    url: format!("#{anchor}"),
                });
            }
            _ => {}
        }
    }

    toc
}
