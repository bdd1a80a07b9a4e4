//! Loaded page records.

use std::collections::BTreeSet;
use std::path::PathBuf;

/// A published page with its content and anchors.
///
/// Produced once per page by [`PageLoader`](crate::PageLoader); immutable
/// afterward.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Page {
    /// Site URL (e.g., "/contracts/v5.x/erc20").
    pub url: String,
    /// URL segments.
    pub slugs: Vec<String>,
    /// Path of the source document.
    pub absolute_path: PathBuf,
    /// Raw authored text (after content replacements).
    pub raw_content: String,
    /// Heading anchors from the table of contents, in document order.
    pub headings: Vec<String>,
    /// Explicit in-body anchors.
    pub anchor_ids: BTreeSet<String>,
}

impl Page {
    /// All anchors of the page: headings followed by explicit anchors,
    /// without duplicates.
    #[must_use]
    pub fn anchors(&self) -> Vec<&str> {
        let mut seen = BTreeSet::new();
        self.headings
            .iter()
            .chain(&self.anchor_ids)
            .map(String::as_str)
            .filter(|anchor| seen.insert(*anchor))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_anchors_deduplicates() {
        let page = Page {
            url: "/a".to_owned(),
            slugs: vec!["a".to_owned()],
            absolute_path: PathBuf::from("a.mdx"),
            raw_content: String::new(),
            headings: vec!["intro".to_owned(), "usage".to_owned()],
            anchor_ids: ["usage".to_owned(), "transfer-address-uint256".to_owned()]
                .into_iter()
                .collect(),
        };

        assert_eq!(
            page.anchors(),
            vec!["intro", "usage", "transfer-address-uint256"]
        );
    }
}
