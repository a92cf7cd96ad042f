//! Reports which ES2015+ syntax constructs a piece of JavaScript uses.
//!
//! Detection is a bounded sample, not an inventory: at most
//! [`Limits::result_limit`] findings are returned, each carrying the
//! construct, an optional qualifier, a short snippet and its offset.
//!
//! Only grammar-level constructs are recognized; use of newer built-ins such
//! as `Promise` or `Map` is not. Async detection is limited to named
//! `async function` declarations: async arrows and methods are only visible
//! through their other constructs.

use collect::Collector;
use parse::parse;
use tracing::debug;
use tracing::debug_span;
use traverse::walk;

pub use collect::Finding;
pub use error::DetectError;
pub use error::DetectResult;
pub use feature::FeatureType;
pub use options::DetectOptions;
pub use options::Limits;
pub use options::DEFAULT_RESULT_LIMIT;
pub use options::DEFAULT_SNIPPET_MAX_LENGTH;

pub mod catalog;
pub mod collect;
mod early;
pub mod error;
pub mod feature;
#[cfg(feature = "fuzzing")]
pub mod fuzz;
pub mod loc;
pub mod options;
pub mod parse;
pub mod traverse;

/// Detects modern syntax in UTF-8 JavaScript source.
///
/// Findings are in document order. The whole tree is always traversed, so
/// the cost does not depend on the result limit. Invalid source fails with
/// [`DetectError::Syntax`] and produces no findings.
///
/// # Examples
///
/// ```
/// use detect_js::{detect, DetectOptions, FeatureType};
///
/// let findings = detect("const x = 1; let y = 2; var z = 3;", &DetectOptions::new()).unwrap();
/// assert_eq!(findings.len(), 2);
/// assert_eq!(findings[0].feature, FeatureType::VarDecl);
/// assert_eq!(findings[0].qualifier, Some("const"));
/// assert_eq!(findings[1].qualifier, Some("let"));
/// ```
pub fn detect(source: &str, options: &DetectOptions) -> DetectResult<Vec<Finding>> {
  let limits = options.limits();
  let span = debug_span!(
    "detect",
    source_len = source.len(),
    result_limit = limits.result_limit
  );
  let _guard = span.enter();

  let tree = parse(source)?;
  let mut collector = Collector::new(source, limits);
  let stats = walk(&tree, &mut collector);
  let findings = collector.into_findings();
  debug!(
    visited = stats.visited,
    matched = stats.matched,
    retained = findings.len(),
    "detection complete"
  );
  Ok(findings)
}
