//! Ecosystem sidebar tabs.
//!
//! Some products (relayer, monitor) are shared by several ecosystems. They
//! belong to the tab of the ecosystem the visitor came from, which the host
//! tracks as the "last ecosystem".

use serde::Deserialize;

use crate::active::SidebarTab;

/// Tab definition as written in configuration.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct TabConfig {
    /// Display title.
    pub title: String,
    /// Designated tab URL.
    pub url: String,
    /// URLs that always activate this tab.
    #[serde(default)]
    pub urls: Option<Vec<String>>,
    /// Ecosystem key this tab represents.
    #[serde(default)]
    pub ecosystem: Option<String>,
    /// URLs added to the tab while a shared product is viewed from this ecosystem.
    #[serde(default)]
    pub shared_urls: Vec<String>,
}

/// Configured tabs with shared-product rules.
#[derive(Clone, Debug, Default)]
pub struct TabSet {
    tabs: Vec<TabConfig>,
    shared_prefixes: Vec<String>,
    hide_under: Vec<String>,
}

impl TabSet {
    /// Create a tab set.
    ///
    /// * `shared_prefixes` - path prefixes of products shared between ecosystems
    /// * `hide_under` - path prefixes where no tabs are shown
    #[must_use]
    pub fn new(tabs: Vec<TabConfig>, shared_prefixes: Vec<String>, hide_under: Vec<String>) -> Self {
        Self {
            tabs,
            shared_prefixes,
            hide_under,
        }
    }

    /// Resolve tabs for the current path.
    ///
    /// Tab order follows configuration order.
    #[must_use]
    pub fn resolve(&self, pathname: &str, last_ecosystem: Option<&str>) -> Vec<SidebarTab> {
        if self.hide_under.iter().any(|p| pathname.starts_with(p.as_str())) {
            return Vec::new();
        }

        let on_shared_path = self
            .shared_prefixes
            .iter()
            .any(|p| pathname.starts_with(p.as_str()));

        self.tabs
            .iter()
            .map(|tab| {
                let from_here = on_shared_path
                    && !tab.shared_urls.is_empty()
                    && tab.ecosystem.is_some()
                    && tab.ecosystem.as_deref() == last_ecosystem;

                let urls = if from_here {
                    let mut urls = tab.urls.clone().unwrap_or_else(|| vec![tab.url.clone()]);
                    for url in &tab.shared_urls {
                        if !urls.contains(url) {
                            urls.push(url.clone());
                        }
                    }
                    Some(urls)
                } else {
                    tab.urls.clone()
                };

                SidebarTab {
                    title: tab.title.clone(),
                    url: tab.url.clone(),
                    urls,
                }
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn tab_set() -> TabSet {
        #[derive(Deserialize)]
        struct Tabs {
            tabs: Vec<TabConfig>,
        }

        let tabs: Tabs = toml::from_str(
            r#"
[[tabs]]
title = "Ethereum & EVM"
url = "/contracts"
urls = ["/contracts", "/relayer", "/monitor"]

[[tabs]]
title = "Stellar"
url = "/stellar-contracts"
ecosystem = "stellar"
shared_urls = ["/monitor", "/relayer"]

[[tabs]]
title = "Starknet"
url = "/contracts-cairo"
"#,
        )
        .unwrap();

        TabSet::new(
            tabs.tabs,
            vec!["/monitor".to_owned(), "/relayer".to_owned()],
            vec!["/impact".to_owned()],
        )
    }

    #[test]
    fn test_resolve_hidden_under_prefix() {
        assert!(tab_set().resolve("/impact/report", Some("stellar")).is_empty());
    }

    #[test]
    fn test_resolve_keeps_order() {
        let titles: Vec<_> = tab_set()
            .resolve("/contracts", None)
            .into_iter()
            .map(|t| t.title)
            .collect();
        assert_eq!(titles, vec!["Ethereum & EVM", "Stellar", "Starknet"]);
    }

    #[test]
    fn test_resolve_shared_path_from_ecosystem() {
        let tabs = tab_set().resolve("/relayer/quickstart", Some("stellar"));
        assert_eq!(
            tabs[1].urls,
            Some(vec![
                "/stellar-contracts".to_owned(),
                "/monitor".to_owned(),
                "/relayer".to_owned(),
            ])
        );
    }

    #[test]
    fn test_resolve_shared_path_from_other_ecosystem() {
        let tabs = tab_set().resolve("/relayer/quickstart", Some("polkadot"));
        assert_eq!(tabs[1].urls, None);
    }

    #[test]
    fn test_resolve_non_shared_path_ignores_last_ecosystem() {
        let tabs = tab_set().resolve("/stellar-contracts/tokens", Some("stellar"));
        assert_eq!(tabs[1].urls, None);
        assert_eq!(tabs[2].urls, None);
    }
}
