//! Navigation trees for docver.
//!
//! Each product ecosystem ("Ethereum & EVM", "Starknet", ...) has its own
//! [`NavigationTree`], authored as static JSON. This crate provides:
//!
//! - [`NavigationNode`]: page, folder and separator entries
//! - [`NavigationTree::load`]: reading a tree from a JSON file
//! - [`VersionFlattener`]: rewriting a page tree for the library version
//!   the visitor is browsing
//!
//! Authored child order is preserved by every operation.

mod error;
mod flatten;
mod tree;

pub use error::NavError;
pub use flatten::{DEFAULT_FOLDER_PATTERN, VersionFlattener};
pub use tree::{NavigationFolder, NavigationNode, NavigationPage, NavigationTree};
