//! CLI command implementations.

pub(crate) mod check_links;
pub(crate) mod nav;
pub(crate) mod resolve;
pub(crate) mod tabs;

pub(crate) use check_links::CheckLinksArgs;
pub(crate) use nav::NavArgs;
pub(crate) use resolve::ResolveArgs;
pub(crate) use tabs::TabsArgs;
