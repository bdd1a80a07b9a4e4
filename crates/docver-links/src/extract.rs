//! Link discovery in raw page content.
//!
//! Markdown links and images come from the markdown parser, with tag-only
//! JSX lines blanked so wrapped content is parsed as markdown. Link-bearing
//! attributes of known components (`<Card href="/x">`) are matched in the raw
//! text, outside of code.

use std::collections::BTreeMap;
use std::ops::Range;
use std::sync::LazyLock;

use docver_storage::blank_jsx_lines;
use pulldown_cmark::{Event, LinkType, Options, Parser, Tag};
use regex::Regex;

static ATTRIBUTE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"([A-Za-z_:][-A-Za-z0-9_:.]*)\s*=\s*(?:"([^"]*)"|'([^']*)')"#).unwrap()
});

/// Link found in a page, with its 1-based source position.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LinkRef {
    /// Link target as authored.
    pub url: String,
    /// Line number (1-based).
    pub line: usize,
    /// Column in characters (1-based).
    pub column: usize,
}

/// Byte offset to line/column conversion.
struct LineIndex<'a> {
    text: &'a str,
    line_starts: Vec<usize>,
}

impl<'a> LineIndex<'a> {
    fn new(text: &'a str) -> Self {
        let line_starts = std::iter::once(0)
            .chain(text.match_indices('\n').map(|(i, _)| i + 1))
            .collect();
        Self { text, line_starts }
    }

    fn position(&self, offset: usize) -> (usize, usize) {
        let line = self.line_starts.partition_point(|&start| start <= offset);
        let start = self.line_starts[line - 1];
        let column = self.text[start..offset].chars().count() + 1;
        (line, column)
    }
}

/// Extracts link targets from markdown/MDX content.
#[derive(Clone, Debug, Default)]
pub struct LinkExtractor {
    /// Matches an opening tag of a configured component, capturing its name
    /// and attribute text.
    component_re: Option<Regex>,
    components: BTreeMap<String, Vec<String>>,
}

impl LinkExtractor {
    /// Create an extractor recognizing the given component attributes.
    ///
    /// `components` maps a component name to its link-bearing attributes.
    #[must_use]
    pub fn new(components: BTreeMap<String, Vec<String>>) -> Self {
        let component_re = if components.is_empty() {
            None
        } else {
            let names: Vec<_> = components.keys().map(|n| regex::escape(n)).collect();
            let pattern = format!(
                r#"<({})\b((?:"[^"]*"|'[^']*'|\{{[^}}]*\}}|[^>"'{{])*)>"#,
                names.join("|")
            );
            Regex::new(&pattern).ok()
        };
        Self {
            component_re,
            components,
        }
    }

    /// All links in `content`, in source order.
    #[must_use]
    pub fn extract(&self, content: &str) -> Vec<LinkRef> {
        let options = Options::ENABLE_YAML_STYLE_METADATA_BLOCKS
            | Options::ENABLE_TABLES
            | Options::ENABLE_FOOTNOTES
            | Options::ENABLE_STRIKETHROUGH
            | Options::ENABLE_HEADING_ATTRIBUTES;

        let mut found: Vec<(usize, String)> = Vec::new();
        let mut code: Vec<Range<usize>> = Vec::new();

        let parsed = blank_jsx_lines(content);
        for (event, range) in Parser::new_ext(&parsed, options).into_offset_iter() {
            match event {
                Event::Start(
                    Tag::Link {
                        link_type,
                        dest_url,
                        ..
                    }
                    | Tag::Image {
                        link_type,
                        dest_url,
                        ..
                    },
                ) if link_type != LinkType::Email => {
                    found.push((range.start, dest_url.into_string()));
                }
                Event::Start(Tag::CodeBlock(_) | Tag::MetadataBlock(_)) | Event::Code(_) => {
                    code.push(range);
                }
                _ => {}
            }
        }

        if let Some(component_re) = &self.component_re {
            for caps in component_re.captures_iter(content) {
                let (Some(tag), Some(name), Some(attrs)) = (caps.get(0), caps.get(1), caps.get(2))
                else {
                    continue;
                };
                if code.iter().any(|r| r.contains(&tag.start())) {
                    continue;
                }
                let Some(wanted) = self.components.get(name.as_str()) else {
                    continue;
                };
                for attr in ATTRIBUTE_RE.captures_iter(attrs.as_str()) {
                    if !wanted.iter().any(|w| w == &attr[1]) {
                        continue;
                    }
                    let Some(value) = attr.get(2).or_else(|| attr.get(3)) else {
                        continue;
                    };
                    let offset = attrs.start() + value.start();
                    found.push((offset, value.as_str().to_owned()));
                }
            }
        }

        found.sort_by_key(|(offset, _)| *offset);

        let lines = LineIndex::new(content);
        found
            .into_iter()
            .map(|(offset, url)| {
                let (line, column) = lines.position(offset);
                LinkRef { url, line, column }
            })
            .collect()
    }
}
