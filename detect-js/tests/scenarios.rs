use detect_js::detect;
use detect_js::DetectError;
use detect_js::DetectOptions;
use detect_js::FeatureType;

#[test]
fn var_declaration_is_not_among_first_two() {
  let findings = detect("const x = 1; let y = 2; var z = 3;", &DetectOptions::new()).unwrap();
  assert_eq!(findings.len(), 2);
  assert!(findings.iter().all(|f| f.feature == FeatureType::VarDecl));
  assert_eq!(findings[0].qualifier, Some("const"));
  assert_eq!(findings[0].snippet, "const x = 1;");
  assert_eq!(findings[0].source_offset, Some(0));
  assert_eq!(findings[1].qualifier, Some("let"));
  assert_eq!(findings[1].snippet, "let y = 2;");
  assert_eq!(findings[1].source_offset, Some(13));
}

#[test]
fn for_of_reports_loop_then_head_declaration() {
  let source = "for (const i of arr) { console.log(i); }";
  let findings = detect(source, &DetectOptions::new()).unwrap();
  assert_eq!(findings.len(), 2);
  assert_eq!(findings[0].feature, FeatureType::ForOf);
  assert_eq!(findings[0].qualifier, None);
  assert_eq!(findings[0].snippet, source);
  assert_eq!(findings[1].feature, FeatureType::VarDecl);
  assert_eq!(findings[1].qualifier, Some("const"));
  assert_eq!(findings[1].snippet, "const i");
  assert_eq!(findings[1].source_offset, Some(5));
}

#[test]
fn plain_function_has_no_findings() {
  let findings = detect("function foo() { return 1; }", &DetectOptions::new()).unwrap();
  assert!(findings.is_empty());
}

#[test]
fn single_arrow_function() {
  let options = DetectOptions::new().with_result_limit(5);
  let findings = detect("(a, b) => a + b;", &options).unwrap();
  assert_eq!(findings.len(), 1);
  assert_eq!(findings[0].feature, FeatureType::ArrowFunc);
  assert_eq!(findings[0].display_name, "Arrow function");
  assert_eq!(findings[0].qualifier, None);
  assert_eq!(findings[0].snippet, "(a, b) => a + b");
  assert_eq!(findings[0].source_offset, Some(0));
}

#[test]
fn invalid_source_fails() {
  let err = detect("function foo() { return 1;", &DetectOptions::new()).unwrap_err();
  assert!(matches!(err, DetectError::Syntax(_)));
}

#[test]
fn grammatical_but_invalid_source_fails() {
  let options = DetectOptions::new().with_result_limit(10);
  for source in [
    "let x = () => { yield 1; };",
    "function f() { yield 1 }",
    "const x;",
    "let a = 1; let a = 2;",
    "return 1;",
    "break;",
    "function f() { await g(); }",
  ] {
    match detect(source, &options) {
      Err(DetectError::Syntax(_)) => {}
      other => panic!("{source:?} gave {other:?}"),
    }
  }
}

#[test]
fn invalid_source_fails_even_with_zero_limit() {
  let options = DetectOptions::new().with_result_limit(0);
  assert!(detect("const = ;", &options).is_err());
}

#[test]
fn non_positive_limit_yields_nothing() {
  let source = "const a = () => [...b];";
  for limit in [0, -1, i64::MIN] {
    let options = DetectOptions::new().with_result_limit(limit);
    assert!(detect(source, &options).unwrap().is_empty());
  }
}

#[test]
fn repeated_detection_is_identical() {
  let source = "class A { m(...xs) { return `${xs}`; } }\nconst f = async () => await A;";
  let options = DetectOptions::new().with_result_limit(10).with_snippet_max_length(8);
  let first = detect(source, &options).unwrap();
  let second = detect(source, &options).unwrap();
  assert_eq!(first, second);
  assert_eq!(
    serde_json::to_string(&first).unwrap(),
    serde_json::to_string(&second).unwrap()
  );
}
