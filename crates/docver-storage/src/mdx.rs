//! MDX preparation for `CommonMark` parsing.
//!
//! A JSX wrapper such as `<Callout>` on its own line opens a raw HTML block
//! in `CommonMark`, which swallows the markdown below it up to the next blank
//! line. Blanking lines that hold only a tag makes the wrapped content parse
//! as markdown again.

use std::borrow::Cow;
use std::sync::LazyLock;

use regex::Regex;

/// A line consisting of one opening, closing or self-closing tag. Quoted and
/// braced attribute values may contain `>`.
static TAG_LINE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r#"(?m)^[ \t]*</?[A-Za-z][\w.:-]*(?:\s(?:"[^"]*"|'[^']*'|\{[^}]*\}|[^>"'{])*)?/?>[ \t\r]*$"#,
    )
    .unwrap()
});

/// Replace tag-only lines with spaces.
///
/// The result has the same byte length and line breaks as `content`, so
/// parser offsets map back to the original text unchanged.
#[must_use]
pub fn blank_jsx_lines(content: &str) -> Cow<'_, str> {
    if !TAG_LINE_RE.is_match(content) {
        return Cow::Borrowed(content);
    }

    let mut blanked = String::with_capacity(content.len());
    let mut last = 0;
    for tag in TAG_LINE_RE.find_iter(content) {
        blanked.push_str(&content[last..tag.start()]);
        blanked.extend(
            tag.as_str()
                .bytes()
                .map(|b| if b == b'\n' { '\n' } else { ' ' }),
        );
        last = tag.end();
    }
    blanked.push_str(&content[last..]);
    Cow::Owned(blanked)
}
