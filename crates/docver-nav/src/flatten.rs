//! Version-aware tree flattening.
//!
//! Libraries group each release line in a version folder (`v5.x`). The
//! rendered page tree never shows these folders:
//!
//! - browsing library L at version V: L's `V` folder is unwrapped in place and
//!   L's other version folders are removed
//! - every other library: all version folders are unwrapped, their contents
//!   merged in authored order
//!
//! The transform is pure. Each node maps to a keep, splice or drop result,
//! and the results of a child list are then flattened one level.

use docver_paths::CurrentVersion;
use regex::Regex;

use crate::NavError;
use crate::tree::{NavigationFolder, NavigationNode, NavigationTree};

/// Default pattern for version folder names (`v5.x`).
pub const DEFAULT_FOLDER_PATTERN: &str = r"^v\d+\.x$";

/// Result of transforming a single node.
enum Flattened {
    /// Node stays in place.
    Keep(NavigationNode),
    /// Node is replaced by these nodes.
    Splice(Vec<NavigationNode>),
    /// Node is removed.
    Drop,
}

impl Flattened {
    fn into_nodes(self) -> Vec<NavigationNode> {
        match self {
            Self::Keep(node) => vec![node],
            Self::Splice(nodes) => nodes,
            Self::Drop => Vec::new(),
        }
    }
}

/// Rewrites page trees for the current viewing context.
#[derive(Clone, Debug)]
pub struct VersionFlattener {
    folder_pattern: Regex,
}

impl VersionFlattener {
    /// Create a flattener recognizing version folders by `folder_pattern`.
    #[must_use]
    pub fn new(folder_pattern: Regex) -> Self {
        Self { folder_pattern }
    }

    /// Create a flattener, compiling the version folder pattern.
    ///
    /// # Errors
    ///
    /// Returns [`NavError::InvalidPattern`] if the pattern does not compile.
    pub fn from_pattern(pattern: &str) -> Result<Self, NavError> {
        let folder_pattern = Regex::new(pattern).map_err(|source| NavError::InvalidPattern {
            pattern: pattern.to_owned(),
            source,
        })?;
        Ok(Self::new(folder_pattern))
    }

    /// Whether a folder name denotes a version folder.
    #[must_use]
    pub fn is_version_folder(&self, name: &str) -> bool {
        self.folder_pattern.is_match(name)
    }

    /// Flatten version folders of `tree` for the visitor's current version.
    ///
    /// `current` is `None` when the visitor is not inside a versioned library.
    #[must_use]
    pub fn flatten(&self, tree: &NavigationTree, current: Option<&CurrentVersion>) -> NavigationTree {
        NavigationTree {
            name: tree.name.clone(),
            children: self.process_children(&tree.children, None, current),
        }
    }

    fn process_children(
        &self,
        children: &[NavigationNode],
        library: Option<&str>,
        current: Option<&CurrentVersion>,
    ) -> Vec<NavigationNode> {
        children
            .iter()
            .map(|child| self.process(child, library, current))
            .flat_map(Flattened::into_nodes)
            .collect()
    }

    fn process(
        &self,
        node: &NavigationNode,
        parent_library: Option<&str>,
        current: Option<&CurrentVersion>,
    ) -> Flattened {
        let folder = match node {
            NavigationNode::Folder(folder) => folder,
            NavigationNode::Page(_) | NavigationNode::Separator { .. } => {
                return Flattened::Keep(node.clone());
            }
        };

        let library = if folder.is_library_root() {
            folder.id.as_deref()
        } else {
            parent_library
        };

        if !self.is_version_folder(&folder.name) {
            return Flattened::Keep(NavigationNode::Folder(NavigationFolder {
                name: folder.name.clone(),
                id: folder.id.clone(),
                index: folder.index.clone(),
                children: self.process_children(&folder.children, library, current),
            }));
        }

        match current {
            Some(cur) if library == Some(cur.library.as_str()) => {
                if folder.name == cur.version {
                    Flattened::Splice(self.process_children(&folder.children, library, current))
                } else {
                    Flattened::Drop
                }
            }
            _ => Flattened::Splice(self.process_children(&folder.children, library, current)),
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::tree::NavigationPage;

    fn page(url: &str) -> NavigationNode {
        NavigationNode::Page(NavigationPage {
            name: url.rsplit('/').next().unwrap_or_default().to_owned(),
            url: url.to_owned(),
            external: false,
        })
    }

    fn folder(name: &str, id: Option<&str>, children: Vec<NavigationNode>) -> NavigationNode {
        NavigationNode::Folder(NavigationFolder {
            name: name.to_owned(),
            id: id.map(str::to_owned),
            index: None,
            children,
        })
    }

    fn current(library: &str, version: &str) -> CurrentVersion {
        CurrentVersion {
            library: library.to_owned(),
            version: version.to_owned(),
        }
    }

    fn flattener() -> VersionFlattener {
        VersionFlattener::from_pattern(DEFAULT_FOLDER_PATTERN).unwrap()
    }

    /// contracts: v5.x [a, b], v4.x [c]; stellar: v0.x [s]
    fn tree() -> NavigationTree {
        NavigationTree::new(
            "Test",
            vec![
                page("/home"),
                folder(
                    "Contracts",
                    Some("contracts"),
                    vec![
                        folder(
                            "v5.x",
                            Some("contracts/v5.x"),
                            vec![page("/contracts/v5.x/a"), page("/contracts/v5.x/b")],
                        ),
                        folder("v4.x", Some("contracts/v4.x"), vec![page("/contracts/v4.x/c")]),
                    ],
                ),
                folder(
                    "Stellar",
                    Some("stellar-contracts"),
                    vec![folder(
                        "v0.x",
                        Some("stellar-contracts/v0.x"),
                        vec![page("/stellar-contracts/v0.x/s")],
                    )],
                ),
            ],
        )
    }

    fn urls(nodes: &[NavigationNode]) -> Vec<String> {
        nodes
            .iter()
            .map(|n| match n {
                NavigationNode::Page(p) => p.url.clone(),
                NavigationNode::Folder(f) => format!("[{}]", f.name),
                NavigationNode::Separator { name } => format!("--{name}"),
            })
            .collect()
    }

    fn folder_children(tree: &NavigationTree, index: usize) -> &[NavigationNode] {
        match &tree.children[index] {
            NavigationNode::Folder(f) => &f.children,
            _ => panic!("expected folder"),
        }
    }

    #[test]
    fn test_viewing_library_unwraps_current_version_in_order() {
        let cur = current("contracts", "v5.x");
        let result = flattener().flatten(&tree(), Some(&cur));

        assert_eq!(
            urls(folder_children(&result, 1)),
            vec!["/contracts/v5.x/a", "/contracts/v5.x/b"]
        );
    }

    #[test]
    fn test_viewing_library_drops_other_versions() {
        let cur = current("contracts", "v4.x");
        let result = flattener().flatten(&tree(), Some(&cur));

        assert_eq!(urls(folder_children(&result, 1)), vec!["/contracts/v4.x/c"]);
    }

    #[test]
    fn test_other_libraries_are_merged() {
        let cur = current("stellar-contracts", "v0.x");
        let result = flattener().flatten(&tree(), Some(&cur));

        assert_eq!(
            urls(folder_children(&result, 1)),
            vec!["/contracts/v5.x/a", "/contracts/v5.x/b", "/contracts/v4.x/c"]
        );
        assert_eq!(
            urls(folder_children(&result, 2)),
            vec!["/stellar-contracts/v0.x/s"]
        );
    }

    #[test]
    fn test_outside_versioned_library_merges_everything() {
        let result = flattener().flatten(&tree(), None);

        assert_eq!(urls(&result.children), vec!["/home", "[Contracts]", "[Stellar]"]);
        assert_eq!(
            urls(folder_children(&result, 1)),
            vec!["/contracts/v5.x/a", "/contracts/v5.x/b", "/contracts/v4.x/c"]
        );
    }

    #[test]
    fn test_input_tree_is_not_modified() {
        let original = tree();
        let cur = current("contracts", "v5.x");
        let _ = flattener().flatten(&original, Some(&cur));

        assert_eq!(original, tree());
    }

    #[test]
    fn test_top_level_version_folder_without_library() {
        let tree = NavigationTree::new(
            "Test",
            vec![
                folder("v1.x", None, vec![page("/a")]),
                page("/b"),
                folder("v2.x", None, vec![page("/c")]),
            ],
        );
        let cur = current("contracts", "v1.x");
        let result = flattener().flatten(&tree, Some(&cur));

        assert_eq!(urls(&result.children), vec!["/a", "/b", "/c"]);
    }

    #[test]
    fn test_nested_folders_keep_structure() {
        let tree = NavigationTree::new(
            "Test",
            vec![folder(
                "Contracts",
                Some("contracts"),
                vec![folder(
                    "v5.x",
                    Some("contracts/v5.x"),
                    vec![
                        folder("Tokens", Some("contracts/v5.x/tokens"), vec![page("/t1")]),
                        NavigationNode::Separator {
                            name: "API".to_owned(),
                        },
                        page("/api"),
                    ],
                )],
            )],
        );
        let cur = current("contracts", "v5.x");
        let result = flattener().flatten(&tree, Some(&cur));

        assert_eq!(urls(folder_children(&result, 0)), vec!["[Tokens]", "--API", "/api"]);
    }

    #[test]
    fn test_non_version_folder_name_is_kept() {
        let tree = NavigationTree::new(
            "Test",
            vec![folder("5.x", Some("contracts"), vec![page("/a")])],
        );
        let result = flattener().flatten(&tree, None);
        assert_eq!(urls(&result.children), vec!["[5.x]"]);
    }

    #[test]
    fn test_invalid_pattern() {
        assert!(matches!(
            VersionFlattener::from_pattern("["),
            Err(NavError::InvalidPattern { .. })
        ));
    }
}
