//! Site-wide link integrity validation for docver.
//!
//! Checks every internal link in page content, and every internal URL in the
//! navigation trees, against the set of published pages:
//!
//! - [`SiteIndex`]: published URLs with their anchors, plus [`FallbackRoute`]s
//!   for dynamically generated pages
//! - [`Scope`]: restricts content validation to matching pages
//! - [`LinkExtractor`]: finds markdown links and component link attributes
//! - [`Validator`]: runs content and navigation checks concurrently
//! - [`ValidationReport`]: per-file issues, navigation issues, text and JSON
//!   renderings
//!
//! # Example
//!
//! ```ignore
//! use docver_links::{Scope, ValidateOptions, Validator};
//!
//! let validator = Validator::new(ValidateOptions::default())?;
//! let report = validator.validate(&pages, &trees, &Scope::parse("/contracts/*")?);
//! if report.has_issues() {
//!     eprint!("{}", report.to_text());
//! }
//! ```

mod error;
mod extract;
mod index;
mod report;
mod resolve;
mod scope;
mod validator;

pub use error::ValidateError;
pub use extract::{LinkExtractor, LinkRef};
pub use index::{FallbackRoute, Lookup, SiteIndex};
pub use report::{FileResult, IssueReason, LinkIssue, NavigationIssue, ValidationReport};
pub use resolve::{RelativePaths, Target, is_internal, resolve};
pub use scope::Scope;
pub use validator::{ValidateOptions, Validator};
