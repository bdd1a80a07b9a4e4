//! End-to-end validation over pages loaded from a content source.

use std::collections::HashSet;
use std::sync::Arc;

use docver_links::{IssueReason, LinkIssue, Scope, ValidateOptions, ValidationReport, Validator};
use docver_nav::{NavigationNode, NavigationPage, NavigationTree};
use docver_storage::{MockContentSource, Page, PageLoader};
use pretty_assertions::assert_eq;

const PAGE_B: &str = "# ERC20\n\n## Usage\n\n<a id=\"ERC20-transfer\"></a>\n";

fn load(source: MockContentSource) -> Vec<Page> {
    PageLoader::new(Arc::new(source)).load_all().unwrap()
}

fn validate(pages: &[Page], trees: &[NavigationTree], scope: &Scope) -> ValidationReport {
    Validator::new(ValidateOptions::default())
        .unwrap()
        .validate(pages, trees, scope)
}

fn issues(report: &ValidationReport) -> Vec<LinkIssue> {
    report.link_issues_iter().cloned().collect()
}

fn nav_page(url: &str, external: bool) -> NavigationNode {
    NavigationNode::Page(NavigationPage {
        name: url.to_owned(),
        url: url.to_owned(),
        external,
    })
}

#[test]
fn test_link_to_existing_anchor_is_valid() {
    let pages = load(
        MockContentSource::new()
            .with_page("/a", "See [usage](/b#usage) and [transfer](/b#ERC20-transfer).\n")
            .with_page("/b", PAGE_B),
    );

    let report = validate(&pages, &[], &Scope::all());
    assert!(!report.has_issues());
    assert_eq!(report.total_files(), 2);
}

#[test]
fn test_link_to_missing_anchor() {
    let pages = load(
        MockContentSource::new()
            .with_page("/a", "See [usage](/b#installation).\n")
            .with_page("/b", PAGE_B),
    );

    let report = validate(&pages, &[], &Scope::all());
    assert_eq!(
        issues(&report),
        vec![LinkIssue {
            source_file: "content/a.mdx".to_owned(),
            url: "/b#installation".to_owned(),
            reason: IssueReason::FragmentNotFound,
            line: 1,
            column: 5,
        }]
    );
}

#[test]
fn test_link_to_missing_page() {
    let pages = load(MockContentSource::new().with_page("/a", "See [usage](/b#usage).\n"));

    let report = validate(&pages, &[], &Scope::all());
    let found = issues(&report);
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].reason, IssueReason::NotFound);
    assert_eq!(found[0].source_file, "content/a.mdx");
    assert_eq!(found[0].url, "/b#usage");
}

#[test]
fn test_navigation_missing_url() {
    let pages = load(MockContentSource::new().with_page("/a", ""));
    let tree = NavigationTree::new("Starknet", vec![nav_page("/a", false), nav_page("/gone", false)]);

    let report = validate(&pages, &[tree], &Scope::all());
    assert_eq!(report.navigation.len(), 1);
    assert_eq!(report.navigation[0].tree, "Starknet");
    assert_eq!(report.navigation[0].url, "/gone");
    assert_eq!(report.navigation[0].reason, "URL not found in site pages");
    assert!(report.has_issues());
}

#[test]
fn test_navigation_external_is_skipped() {
    let pages = load(MockContentSource::new().with_page("/a", ""));
    let tree = NavigationTree::new("Starknet", vec![nav_page("/gone", true)]);

    let report = validate(&pages, &[tree], &Scope::all());
    assert!(report.navigation.is_empty());
    assert!(!report.has_issues());
}

#[test]
fn test_validation_is_repeatable() {
    let pages = load(
        MockContentSource::new()
            .with_page("/a", "[x](/missing) [y](#nope)\n")
            .with_page("/b", "[z](/a#also-nope)\n"),
    );
    let trees = [NavigationTree::new("Zama FHEVM", vec![nav_page("/nowhere", false)])];

    let first = validate(&pages, &trees, &Scope::all());
    let second = validate(&pages, &trees, &Scope::all());

    let set = |r: &ValidationReport| issues(r).into_iter().collect::<HashSet<_>>();
    assert_eq!(set(&first), set(&second));
    assert_eq!(first.navigation, second.navigation);
    assert_eq!(first.total_issues(), 4);
}

#[test]
fn test_scope_excludes_out_of_scope_pages() {
    let pages = load(
        MockContentSource::new()
            .with_page("/contracts/erc20", "[ok](/contracts/erc721)\n")
            .with_page("/contracts/erc721", "")
            .with_page("/stellar/tokens", "[broken](/missing)\n"),
    );

    let everything = validate(&pages, &[], &Scope::all());
    assert_eq!(everything.total_issues(), 1);

    let scoped = validate(&pages, &[], &Scope::parse("/contracts/*").unwrap());
    assert_eq!(scoped.total_issues(), 0);
    assert_eq!(scoped.total_files(), 2);
}

#[test]
fn test_unreadable_page_aborts_loading() {
    let source = MockContentSource::new()
        .with_page("/a", "")
        .with_unreadable("/b");

    assert!(PageLoader::new(Arc::new(source)).load_all().is_err());
}

#[test]
fn test_unreadable_page_skipped_in_lenient_mode() {
    let source = MockContentSource::new()
        .with_page("/a", "[b](/b)\n")
        .with_unreadable("/b");
    let outcome = PageLoader::new(Arc::new(source)).load_lenient().unwrap();

    let report = validate(&outcome.pages, &[], &Scope::all());
    assert_eq!(outcome.failures.len(), 1);
    assert_eq!(issues(&report)[0].reason, IssueReason::NotFound);
}
