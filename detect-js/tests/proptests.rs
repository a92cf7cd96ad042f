use detect_js::detect;
use detect_js::DetectOptions;
use detect_js::FeatureType;
use proptest::prelude::*;

#[derive(Clone, Debug)]
struct Statement {
  source: String,
  features: Vec<FeatureType>,
}

fn ident() -> impl Strategy<Value = String> {
  const CHARS: &[u8] = b"abcdefghijklmnopqrstuvwxyz";
  // Prefixed so generated names can never be keywords.
  prop::collection::vec(prop::sample::select(CHARS.to_vec()), 1..6)
    .prop_map(|bytes| format!("v_{}", String::from_utf8(bytes).unwrap()))
}

fn render(kind: usize, name: &str) -> Statement {
  use FeatureType::*;
  let (source, features) = match kind {
    0 => (format!("const {name} = 1;"), vec![VarDecl]),
    1 => (format!("var {name} = 1;"), vec![]),
    2 => (format!("function {name}(a) {{ return a; }}"), vec![]),
    3 => (format!("{name}((x) => x);"), vec![ArrowFunc]),
    4 => (format!("for (const {name} of xs) {{}}"), vec![ForOf, VarDecl]),
    5 => (format!("f(...{name});"), vec![Spread]),
    6 => (format!("class {name} {{}}"), vec![ClassDecl]),
    _ => (format!("async function {name}(...r) {{ await r; }}"), vec![AsyncFunc, Rest, Await]),
  };
  Statement { source, features }
}

fn program() -> impl Strategy<Value = (String, Vec<FeatureType>)> {
  prop::collection::vec((0usize..8, ident()), 0..8).prop_map(|stmts| {
    // Suffixed with the position so top-level bindings never collide.
    let stmts: Vec<_> = stmts
      .into_iter()
      .enumerate()
      .map(|(i, (kind, name))| render(kind, &format!("{name}_{i}")))
      .collect();
    let source = stmts
      .iter()
      .map(|s| s.source.as_str())
      .collect::<Vec<_>>()
      .join("\n");
    let features = stmts.into_iter().flat_map(|s| s.features).collect();
    (source, features)
  })
}

proptest! {
  #[test]
  fn result_never_exceeds_limit((source, _) in program(), limit in -3i64..8) {
    let options = DetectOptions::new().with_result_limit(limit);
    let findings = detect(&source, &options).unwrap();
    prop_assert!(findings.len() as i64 <= limit.max(0));
  }

  #[test]
  fn all_occurrences_within_limit_in_order((source, expected) in program(), limit in 0i64..30) {
    let options = DetectOptions::new().with_result_limit(limit);
    let findings = detect(&source, &options).unwrap();
    let features: Vec<_> = findings.iter().map(|f| f.feature).collect();
    let retained = expected.len().min(limit as usize);
    prop_assert_eq!(features, expected[..retained].to_vec());

    let offsets: Vec<_> = findings.iter().map(|f| f.source_offset.unwrap()).collect();
    let mut sorted = offsets.clone();
    sorted.sort_unstable();
    prop_assert_eq!(offsets, sorted);
  }

  #[test]
  fn snippets_are_prefixes_of_full_span((source, _) in program(), max in 0i64..40) {
    let full = detect(&source, &DetectOptions::new().with_result_limit(100).with_snippet_max_length(10_000)).unwrap();
    let short = detect(&source, &DetectOptions::new().with_result_limit(100).with_snippet_max_length(max)).unwrap();
    prop_assert_eq!(full.len(), short.len());
    for (full, short) in full.iter().zip(short.iter()) {
      let span = full.snippet.chars().count();
      let expected: String = full.snippet.chars().take(max as usize).collect();
      prop_assert_eq!(short.snippet.chars().count(), span.min(max as usize));
      prop_assert_eq!(&short.snippet, &expected);
      prop_assert_eq!(short.source_offset, full.source_offset);
    }
  }

  #[test]
  fn detection_is_deterministic((source, _) in program(), limit in 0i64..10) {
    let options = DetectOptions::new().with_result_limit(limit);
    prop_assert_eq!(detect(&source, &options).unwrap(), detect(&source, &options).unwrap());
  }
}
