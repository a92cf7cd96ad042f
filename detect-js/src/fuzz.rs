use crate::detect;
use crate::DetectOptions;

/// Fuzz entry point that runs detection on arbitrary bytes without panicking.
#[doc(hidden)]
pub fn fuzz_detect(data: &[u8]) {
  let source = String::from_utf8_lossy(data);
  // Small windows so snippet cuts land inside multibyte characters more often.
  let options = DetectOptions::new()
    .with_result_limit(8)
    .with_snippet_max_length(3);
  if let Ok(findings) = detect(&source, &options) {
    assert!(findings.len() <= 8);
    for finding in findings {
      assert!(finding.snippet.chars().count() <= 3);
    }
  }
}
