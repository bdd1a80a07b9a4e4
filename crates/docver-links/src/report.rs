//! Validation results and their renderings.

use std::fmt::Write as _;

use serde::Serialize;

/// Why a link target is invalid.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum IssueReason {
    /// No published page or dynamic route serves the path.
    NotFound,
    /// The page exists but has no such anchor.
    FragmentNotFound,
}

impl std::fmt::Display for IssueReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotFound => f.write_str("not found"),
            Self::FragmentNotFound => f.write_str("invalid fragment"),
        }
    }
}

/// Broken link in page content.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize)]
pub struct LinkIssue {
    /// Source document containing the link.
    pub source_file: String,
    /// Link target as authored.
    pub url: String,
    /// Why the target does not resolve.
    pub reason: IssueReason,
    /// 1-based line of the link.
    pub line: usize,
    /// 1-based column of the link.
    pub column: usize,
}

/// Broken reference in a navigation tree.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize)]
pub struct NavigationIssue {
    /// Tree name (e.g., "Ethereum & EVM").
    pub tree: String,
    /// Entry URL as written in the tree.
    pub url: String,
    /// Human-readable explanation.
    pub reason: String,
}

/// Issues found in one validated page.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct FileResult {
    /// Source document path.
    pub file: String,
    /// Page URL.
    pub url: String,
    /// Broken links in source order; empty for a clean page.
    pub issues: Vec<LinkIssue>,
}

/// Outcome of one validation run.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct ValidationReport {
    /// One entry per validated page, in page order.
    pub files: Vec<FileResult>,
    /// Navigation issues, in tree order.
    pub navigation: Vec<NavigationIssue>,
}

impl ValidationReport {
    /// Number of validated pages.
    #[must_use]
    pub fn total_files(&self) -> usize {
        self.files.len()
    }

    /// Number of pages with at least one issue.
    #[must_use]
    pub fn files_with_issues(&self) -> usize {
        self.files.iter().filter(|f| !f.issues.is_empty()).count()
    }

    /// Number of content issues.
    #[must_use]
    pub fn link_issues(&self) -> usize {
        self.files.iter().map(|f| f.issues.len()).sum()
    }

    /// Number of content and navigation issues.
    #[must_use]
    pub fn total_issues(&self) -> usize {
        self.link_issues() + self.navigation.len()
    }

    /// Whether any issue was found.
    #[must_use]
    pub fn has_issues(&self) -> bool {
        self.total_issues() > 0
    }

    /// Content issues across all pages, in page order.
    pub fn link_issues_iter(&self) -> impl Iterator<Item = &LinkIssue> {
        self.files.iter().flat_map(|f| &f.issues)
    }

    /// One-line summary.
    ///
    /// The error count includes navigation issues.
    #[must_use]
    pub fn summary(&self) -> String {
        let mut summary = format!(
            "Summary: {} errors found in {} files out of {} total files",
            self.total_issues(),
            self.files_with_issues(),
            self.total_files()
        );
        if !self.navigation.is_empty() {
            let _ = write!(summary, " + {} navigation errors", self.navigation.len());
        }
        summary
    }

    /// Render the report as plain text.
    #[must_use]
    pub fn to_text(&self) -> String {
        let mut out = String::new();

        for file in self.files.iter().filter(|f| !f.issues.is_empty()) {
            let _ = writeln!(out, "Invalid URLs in {}:", file.file);
            for issue in &file.issues {
                let _ = writeln!(
                    out,
                    "{}: {} at line {} column {}",
                    issue.url, issue.reason, issue.line, issue.column
                );
            }
            out.push_str("------\n");
        }

        if !self.navigation.is_empty() {
            out.push_str("\nInvalid URLs in Navigation Trees:\n");
            for issue in &self.navigation {
                let _ = writeln!(out, "{}: {} - {}", issue.tree, issue.url, issue.reason);
            }
            out.push_str("------\n");
        }

        let _ = writeln!(out, "\n{}", self.summary());
        out
    }

    /// Render the report as pretty-printed JSON.
    ///
    /// # Errors
    ///
    /// Returns the serialization error, which cannot occur for this type in
    /// practice.
    pub fn to_json(&self) -> serde_json::Result<String> {
        #[derive(Serialize)]
        struct Json<'a> {
            total_files: usize,
            files_with_issues: usize,
            total_issues: usize,
            files: Vec<&'a FileResult>,
            navigation: &'a [NavigationIssue],
        }

        serde_json::to_string_pretty(&Json {
            total_files: self.total_files(),
            files_with_issues: self.files_with_issues(),
            total_issues: self.total_issues(),
            files: self.files.iter().filter(|f| !f.issues.is_empty()).collect(),
            navigation: &self.navigation,
        })
    }
}
