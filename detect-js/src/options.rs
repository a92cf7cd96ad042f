use serde::Deserialize;

pub const DEFAULT_RESULT_LIMIT: usize = 2;
pub const DEFAULT_SNIPPET_MAX_LENGTH: usize = 100;

/// Per-call detection options.
///
/// Unset fields take their defaults. Values are signed so that callers can
/// pass through untrusted input: anything below zero behaves as zero.
///
/// Deserializes from camelCase keys, e.g. `{"resultLimit": 5}`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "camelCase", deny_unknown_fields)]
pub struct DetectOptions {
  pub result_limit: Option<i64>,
  pub snippet_max_length: Option<i64>,
}

impl DetectOptions {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn with_result_limit(mut self, result_limit: i64) -> Self {
    self.result_limit = Some(result_limit);
    self
  }

  pub fn with_snippet_max_length(mut self, snippet_max_length: i64) -> Self {
    self.snippet_max_length = Some(snippet_max_length);
    self
  }

  pub fn limits(&self) -> Limits {
    Limits {
      result_limit: normalize(self.result_limit, DEFAULT_RESULT_LIMIT),
      snippet_max_length: normalize(self.snippet_max_length, DEFAULT_SNIPPET_MAX_LENGTH),
    }
  }
}

/// Normalized [`DetectOptions`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Limits {
  /// Maximum number of findings retained; zero retains nothing.
  pub result_limit: usize,
  /// Maximum snippet length in characters.
  pub snippet_max_length: usize,
}

impl Default for Limits {
  fn default() -> Self {
    DetectOptions::default().limits()
  }
}

fn normalize(value: Option<i64>, default: usize) -> usize {
  match value {
    None => default,
    Some(v) => usize::try_from(v.max(0)).unwrap_or(usize::MAX),
  }
}
