//! Active navigation entry matching.
//!
//! A navigation entry stays highlighted while the visitor moves between
//! versions of the same logical page: `/relayer/1.3.x/quickstart` and
//! `/relayer/quickstart` are the same page in different release lines.

use serde::Serialize;

use crate::path::{ProductPaths, normalize};

/// Sidebar tab grouping one or more documentation roots.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct SidebarTab {
    /// Display title.
    pub title: String,
    /// Designated tab URL.
    pub url: String,
    /// URLs that activate this tab. When `None`, only `url` is used.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub urls: Option<Vec<String>>,
}

/// Decides whether a reference URL is active for the current path.
#[derive(Clone, Debug)]
pub struct ActiveMatcher {
    products: ProductPaths,
}

impl ActiveMatcher {
    /// Create a matcher over the given product registry.
    #[must_use]
    pub fn new(products: ProductPaths) -> Self {
        Self { products }
    }

    /// Product registry used for version-aware matching.
    #[must_use]
    pub fn products(&self) -> &ProductPaths {
        &self.products
    }

    /// Check whether `url` is active while viewing `pathname`.
    ///
    /// With `nested`, descendants of `url` also count as active. For
    /// versioned products, paths with the same subpath match regardless of
    /// version, and a product root matches any page of that product.
    #[must_use]
    pub fn is_active(&self, url: &str, pathname: &str, nested: bool) -> bool {
        let url = normalize(url);
        let pathname = normalize(pathname);

        if url == pathname || (nested && is_nested_under(pathname, url)) {
            return true;
        }

        let (Some(reference), Some(current)) = (self.products.parse(url), self.products.parse(pathname))
        else {
            return false;
        };

        if reference.base != current.base {
            return false;
        }

        if reference.subpath == current.subpath {
            return true;
        }

        nested && (is_nested_under(current.subpath, reference.subpath) || reference.is_root())
    }

    /// Check whether a sidebar tab is active while viewing `pathname`.
    ///
    /// Tabs with an explicit URL set are active when any member matches.
    #[must_use]
    pub fn is_tab_active(&self, tab: &SidebarTab, pathname: &str) -> bool {
        match &tab.urls {
            Some(urls) => {
                let pathname = normalize(pathname);
                urls.iter().any(|url| self.is_active(url, pathname, true))
            }
            None => self.is_active(&tab.url, pathname, true),
        }
    }

    /// First tab active for `pathname`, in tab order.
    #[must_use]
    pub fn active_tab<'t>(&self, tabs: &'t [SidebarTab], pathname: &str) -> Option<&'t SidebarTab> {
        tabs.iter().find(|tab| self.is_tab_active(tab, pathname))
    }
}

/// `path` starts with `parent` followed by a slash.
fn is_nested_under(path: &str, parent: &str) -> bool {
    path.strip_prefix(parent)
        .is_some_and(|rest| rest.starts_with('/'))
}
