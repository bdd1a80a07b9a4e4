//! Site link validation.
//!
//! A run builds a [`SiteIndex`] from the loaded pages, then checks page
//! content and navigation trees against it. Both checks read the index only
//! and run concurrently; each keeps page or tree order in its results.

use std::collections::BTreeMap;

use docver_nav::NavigationTree;
use docver_storage::Page;
use rayon::prelude::*;

use crate::ValidateError;
use crate::extract::LinkExtractor;
use crate::index::{FallbackRoute, Lookup, SiteIndex};
use crate::report::{FileResult, IssueReason, LinkIssue, NavigationIssue, ValidationReport};
use crate::resolve::{RelativePaths, Target, is_internal, resolve};
use crate::scope::Scope;

/// Validation settings.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ValidateOptions {
    /// Report links to missing anchors.
    pub check_fragments: bool,
    /// Handling of relative link targets.
    pub relative_paths: RelativePaths,
    /// Component name -> link-bearing attribute names.
    pub components: BTreeMap<String, Vec<String>>,
    /// Dynamic route templates (`/api/[...path]`).
    pub fallback_routes: Vec<String>,
}

impl Default for ValidateOptions {
    fn default() -> Self {
        Self {
            check_fragments: true,
            relative_paths: RelativePaths::AsUrl,
            components: [("Card".to_owned(), vec!["href".to_owned()])]
                .into_iter()
                .collect(),
            fallback_routes: Vec::new(),
        }
    }
}

/// Checks page content and navigation trees against the published pages.
#[derive(Debug)]
pub struct Validator {
    check_fragments: bool,
    relative_paths: RelativePaths,
    extractor: LinkExtractor,
    fallbacks: Vec<FallbackRoute>,
}

impl Validator {
    /// Create a validator.
    ///
    /// # Errors
    ///
    /// Returns [`ValidateError::InvalidRoute`] if a fallback route template
    /// is malformed.
    pub fn new(options: ValidateOptions) -> Result<Self, ValidateError> {
        let fallbacks = options
            .fallback_routes
            .iter()
            .map(|route| FallbackRoute::parse(route))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            check_fragments: options.check_fragments,
            relative_paths: options.relative_paths,
            extractor: LinkExtractor::new(options.components),
            fallbacks,
        })
    }

    /// Validate content of in-scope pages and all navigation trees.
    #[must_use]
    pub fn validate(
        &self,
        pages: &[Page],
        trees: &[NavigationTree],
        scope: &Scope,
    ) -> ValidationReport {
        let index = SiteIndex::build(pages, self.fallbacks.clone());

        let (files, navigation) = rayon::join(
            || self.validate_content(&index, pages, scope),
            || self.validate_navigation(&index, trees),
        );

        let report = ValidationReport { files, navigation };
        tracing::info!(
            files = report.total_files(),
            issues = report.total_issues(),
            "Validation complete"
        );
        report
    }

    /// Check links in the content of every in-scope page.
    #[must_use]
    pub fn validate_content(
        &self,
        index: &SiteIndex,
        pages: &[Page],
        scope: &Scope,
    ) -> Vec<FileResult> {
        pages
            .par_iter()
            .filter(|page| scope.matches(&page.url, &page.absolute_path))
            .map(|page| self.validate_page(index, page))
            .collect()
    }

    fn validate_page(&self, index: &SiteIndex, page: &Page) -> FileResult {
        let file = page.absolute_path.display().to_string();

        let issues: Vec<_> = self
            .extractor
            .extract(&page.raw_content)
            .into_iter()
            .filter(|link| is_internal(&link.url, self.relative_paths))
            .filter_map(|link| {
                let reason = match resolve(&page.url, &link.url) {
                    Some(target) => self.check(index, &target)?,
                    None => IssueReason::NotFound,
                };
                Some(LinkIssue {
                    source_file: file.clone(),
                    url: link.url,
                    reason,
                    line: link.line,
                    column: link.column,
                })
            })
            .collect();

        if !issues.is_empty() {
            tracing::debug!(url = %page.url, issues = issues.len(), "Broken links");
        }

        FileResult {
            file,
            url: page.url.clone(),
            issues,
        }
    }

    /// Check every internal URL referenced by the navigation trees.
    #[must_use]
    pub fn validate_navigation(
        &self,
        index: &SiteIndex,
        trees: &[NavigationTree],
    ) -> Vec<NavigationIssue> {
        trees
            .par_iter()
            .flat_map_iter(|tree| {
                tree.internal_urls()
                    .into_iter()
                    .filter_map(|url| {
                        let target = Target::split(url);
                        let reason = match self.check(index, &target)? {
                            IssueReason::NotFound => "URL not found in site pages".to_owned(),
                            IssueReason::FragmentNotFound => format!(
                                "Fragment '#{}' not found on page",
                                target.fragment.as_deref().unwrap_or_default()
                            ),
                        };
                        Some(NavigationIssue {
                            tree: tree.name.clone(),
                            url: url.to_owned(),
                            reason,
                        })
                    })
                    .collect::<Vec<_>>()
            })
            .collect()
    }

    /// Reason a resolved target is invalid, if it is.
    fn check(&self, index: &SiteIndex, target: &Target) -> Option<IssueReason> {
        match index.lookup(&target.path) {
            Lookup::Missing => Some(IssueReason::NotFound),
            Lookup::Fallback => None,
            Lookup::Page(anchors) => match &target.fragment {
                Some(fragment) if self.check_fragments && !anchors.contains(fragment) => {
                    Some(IssueReason::FragmentNotFound)
                }
                _ => None,
            },
        }
    }
}
