//! Navigation tree model.
//!
//! Trees are authored as JSON arrays of nodes:
//!
//! ```json
//! [
//!   { "type": "page", "name": "Overview", "url": "/contracts" },
//!   {
//!     "type": "folder",
//!     "name": "Tokens",
//!     "index": { "name": "Tokens", "url": "/contracts/tokens" },
//!     "children": [
//!       { "type": "page", "name": "ERC-20", "url": "/contracts/erc20" },
//!       { "type": "page", "name": "GitHub", "url": "https://github.com/x", "external": true }
//!     ]
//!   }
//! ]
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::NavError;

/// A page entry.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct NavigationPage {
    /// Display name.
    #[serde(default)]
    pub name: String,
    /// Link target.
    pub url: String,
    /// Link points outside the site.
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub external: bool,
}

/// A folder entry with optional landing page.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct NavigationFolder {
    /// Display name. Version folders are named like `v5.x`.
    #[serde(default)]
    pub name: String,
    /// Identity token. Top-level library folders have a token without `/`.
    #[serde(rename = "$id", default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Landing page for the folder.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub index: Option<NavigationPage>,
    /// Child entries in display order.
    #[serde(default)]
    pub children: Vec<NavigationNode>,
}

impl NavigationFolder {
    /// Whether this folder is a top-level library folder.
    #[must_use]
    pub fn is_library_root(&self) -> bool {
        self.id.as_deref().is_some_and(|id| !id.contains('/'))
    }
}

/// Navigation tree entry.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum NavigationNode {
    /// Link to a page.
    Page(NavigationPage),
    /// Group of entries.
    Folder(NavigationFolder),
    /// Visual divider with optional label.
    Separator {
        /// Label text.
        #[serde(default)]
        name: String,
    },
}

/// Navigation tree for one product ecosystem.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct NavigationTree {
    /// Ecosystem name (e.g., "Ethereum & EVM").
    pub name: String,
    /// Top-level entries in display order.
    pub children: Vec<NavigationNode>,
}

impl NavigationTree {
    /// Create a tree from its entries.
    #[must_use]
    pub fn new(name: impl Into<String>, children: Vec<NavigationNode>) -> Self {
        Self {
            name: name.into(),
            children,
        }
    }

    /// Parse a tree from a JSON array of nodes.
    ///
    /// # Errors
    ///
    /// Returns the JSON error if the input is not a valid node array.
    pub fn from_json(name: impl Into<String>, json: &str) -> Result<Self, serde_json::Error> {
        let children = serde_json::from_str(json)?;
        Ok(Self::new(name, children))
    }

    /// Load a tree from a JSON file.
    ///
    /// # Errors
    ///
    /// Returns [`NavError::Io`] if the file cannot be read and
    /// [`NavError::Parse`] if it is not a valid node array.
    pub fn load(name: impl Into<String>, path: &Path) -> Result<Self, NavError> {
        let json = std::fs::read_to_string(path).map_err(|source| NavError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let tree = Self::from_json(name, &json).map_err(|source| NavError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        tracing::debug!(tree = %tree.name, path = %path.display(), "Loaded navigation tree");
        Ok(tree)
    }

    /// Internal URLs referenced by the tree, depth-first in display order.
    ///
    /// Includes non-external pages and non-external folder landing pages.
    #[must_use]
    pub fn internal_urls(&self) -> Vec<&str> {
        let mut urls = Vec::new();
        collect_internal_urls(&self.children, &mut urls);
        urls
    }
}

fn collect_internal_urls<'a>(nodes: &'a [NavigationNode], urls: &mut Vec<&'a str>) {
    for node in nodes {
        match node {
            NavigationNode::Page(page) => {
                if !page.external && !page.url.is_empty() {
                    urls.push(&page.url);
                }
            }
            NavigationNode::Folder(folder) => {
                if let Some(index) = &folder.index
                    && !index.external
                {
                    urls.push(&index.url);
                }
                collect_internal_urls(&folder.children, urls);
            }
            NavigationNode::Separator { .. } => {}
        }
    }
}
