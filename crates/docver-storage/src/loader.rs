//! Parallel page loading.
//!
//! Every page record depends only on its own content, so pages are read and
//! analyzed on the rayon pool. Results keep the source's listing order.

use std::sync::Arc;

use rayon::prelude::*;

use crate::anchors::{AnchorExtractor, RegexAnchorExtractor};
use crate::page::Page;
use crate::replace::Replacements;
use crate::source::{ContentSource, PageRef};
use crate::StorageError;

/// Pages that loaded and pages that failed, from a lenient load.
#[derive(Debug, Default)]
pub struct LoadOutcome {
    /// Successfully loaded pages, in listing order.
    pub pages: Vec<Page>,
    /// Pages whose content could not be read.
    pub failures: Vec<(PageRef, StorageError)>,
}

/// Loads [`Page`] records from a [`ContentSource`].
pub struct PageLoader {
    source: Arc<dyn ContentSource>,
    extractor: Box<dyn AnchorExtractor>,
    replacements: Replacements,
}

impl PageLoader {
    /// Create a loader with the default anchor extractor and no replacements.
    #[must_use]
    pub fn new(source: Arc<dyn ContentSource>) -> Self {
        Self {
            source,
            extractor: Box::new(RegexAnchorExtractor::default()),
            replacements: Replacements::default(),
        }
    }

    /// Use a custom anchor extractor.
    #[must_use]
    pub fn with_extractor(mut self, extractor: impl AnchorExtractor + 'static) -> Self {
        self.extractor = Box::new(extractor);
        self
    }

    /// Apply content replacements to raw text.
    #[must_use]
    pub fn with_replacements(mut self, replacements: Replacements) -> Self {
        self.replacements = replacements;
        self
    }

    /// Load every page listed by the source.
    ///
    /// # Errors
    ///
    /// Returns the first [`StorageError`] if the listing or any page fails.
    pub fn load_all(&self) -> Result<Vec<Page>, StorageError> {
        let refs = self.source.list_pages()?;
        tracing::info!(count = refs.len(), "Loading pages");

        refs.into_par_iter().map(|page| self.load(page)).collect()
    }

    /// Load every page, collecting unreadable pages instead of failing.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] only if the listing itself fails.
    pub fn load_lenient(&self) -> Result<LoadOutcome, StorageError> {
        let refs = self.source.list_pages()?;
        tracing::info!(count = refs.len(), "Loading pages");

        let results: Vec<_> = refs
            .into_par_iter()
            .map(|page| match self.load(page.clone()) {
                Ok(loaded) => Ok(loaded),
                Err(err) => Err((page, err)),
            })
            .collect();

        let mut outcome = LoadOutcome::default();
        for result in results {
            match result {
                Ok(page) => outcome.pages.push(page),
                Err((page, err)) => {
                    tracing::warn!(url = %page.url, error = %err, "Skipping unreadable page");
                    outcome.failures.push((page, err));
                }
            }
        }
        Ok(outcome)
    }

    /// Load a single page record.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] if the page's text or table of contents
    /// cannot be read.
    pub fn load(&self, page: PageRef) -> Result<Page, StorageError> {
        let raw = self.source.load_raw_text(&page)?;
        let raw_content = self.replacements.apply(&page.absolute_path, raw);
        let toc = self.source.load_toc(&page)?;

        let headings = toc.iter().map(|entry| entry.anchor().to_owned()).collect();
        let anchor_ids = self.extractor.extract(&raw_content).into_iter().collect();

        tracing::debug!(url = %page.url, "Loaded page");

        Ok(Page {
            url: page.url,
            slugs: page.slugs,
            absolute_path: page.absolute_path,
            raw_content,
            headings,
            anchor_ids,
        })
    }
}
