use crate::feature::FeatureType;
use crate::loc::CharOffsets;
use crate::loc::Loc;
use crate::options::Limits;
use serde::Serialize;
use serde::Serializer;
use std::fmt;
use std::fmt::Display;
use std::fmt::Formatter;
use tracing::trace;

/// One detected occurrence of a construct.
#[derive(Clone, PartialEq, Eq, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Finding {
  #[serde(rename = "type")]
  pub feature: FeatureType,
  pub display_name: &'static str,
  /// Refines the feature, e.g. `const` or `let` for declarations.
  #[serde(skip_serializing_if = "Option::is_none")]
  pub qualifier: Option<&'static str>,
  /// At most `snippet_max_length` characters from the start of the match.
  pub snippet: String,
  /// Character offset of the match; serialized as `-1` when unknown.
  #[serde(serialize_with = "serialize_offset")]
  pub source_offset: Option<usize>,
}

fn serialize_offset<S: Serializer>(offset: &Option<usize>, serializer: S) -> Result<S::Ok, S::Error> {
  match offset {
    Some(offset) => serializer.serialize_u64(*offset as u64),
    None => serializer.serialize_i64(-1),
  }
}

impl Display for Finding {
  fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
    write!(f, "{}", self.display_name)?;
    if let Some(qualifier) = self.qualifier {
      write!(f, " ({})", qualifier)?;
    }
    match self.source_offset {
      Some(offset) => write!(f, " at {}: {:?}", offset, self.snippet),
      None => write!(f, " at unknown offset"),
    }
  }
}

/// Accumulates findings for a single detection, in the order they are
/// offered, up to the result limit.
pub struct Collector<'s> {
  source: &'s str,
  limits: Limits,
  offsets: CharOffsets<'s>,
  findings: Vec<Finding>,
}

impl<'s> Collector<'s> {
  pub fn new(source: &'s str, limits: Limits) -> Collector<'s> {
    Collector {
      source,
      limits,
      offsets: CharOffsets::new(source),
      findings: Vec::with_capacity(limits.result_limit.min(16)),
    }
  }

  /// Records a match at `loc`, or does nothing once the limit is reached.
  ///
  /// A missing or unusable `loc` still yields a finding, with an empty
  /// snippet and unknown offset.
  pub fn offer(&mut self, feature: FeatureType, qualifier: Option<&'static str>, loc: Option<Loc>) {
    if self.findings.len() >= self.limits.result_limit {
      trace!(
        target: "detect_js::collect",
        feature = feature.as_str(),
        "match dropped at result limit"
      );
      return;
    }
    let (snippet, source_offset) = match loc.and_then(|loc| self.window(loc)) {
      Some((offset, snippet)) => (snippet.to_string(), Some(offset)),
      None => (String::new(), None),
    };
    trace!(
      target: "detect_js::collect",
      feature = feature.as_str(),
      offset = ?source_offset,
      "finding retained"
    );
    self.findings.push(Finding {
      feature,
      display_name: feature.label(),
      qualifier,
      snippet,
      source_offset,
    });
  }

  pub fn findings(&self) -> &[Finding] {
    &self.findings
  }

  pub fn into_findings(self) -> Vec<Finding> {
    self.findings
  }

  // Returns the character offset of `loc` and its text truncated to the
  // snippet length.
  fn window(&mut self, loc: Loc) -> Option<(usize, &'s str)> {
    let text = loc.text(self.source)?;
    let offset = self.offsets.get(loc.0)?;
    let snippet = match text.char_indices().nth(self.limits.snippet_max_length) {
      Some((cut, _)) => &text[..cut],
      None => text,
    };
    Some((offset, snippet))
  }
}
