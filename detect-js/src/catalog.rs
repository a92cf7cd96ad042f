//! The static catalog of detectable constructs and the dispatch table that
//! maps JavaScript grammar node kinds onto them.
//!
//! Both tables are built once and never mutated, so they are shared freely
//! between concurrent detections.

use crate::feature::FeatureType;
use crate::loc::Loc;
use ahash::HashMap;
use ahash::HashMapExt;
use once_cell::sync::Lazy;
use tree_sitter::Node;

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct CatalogEntry {
  pub feature: FeatureType,
  pub label: &'static str,
}

/// One entry per [`FeatureType`], indexed by discriminant.
pub static CATALOG: [CatalogEntry; 10] = [
  CatalogEntry {
    feature: FeatureType::ArrowFunc,
    label: "Arrow function",
  },
  CatalogEntry {
    feature: FeatureType::VarDecl,
    label: "Block-scoped declaration",
  },
  CatalogEntry {
    feature: FeatureType::Await,
    label: "Await expression",
  },
  CatalogEntry {
    feature: FeatureType::Yield,
    label: "Yield expression",
  },
  CatalogEntry {
    feature: FeatureType::ClassDecl,
    label: "Class declaration",
  },
  CatalogEntry {
    feature: FeatureType::AsyncFunc,
    label: "Async function",
  },
  CatalogEntry {
    feature: FeatureType::TemplateElem,
    label: "Template literal",
  },
  CatalogEntry {
    feature: FeatureType::Spread,
    label: "Spread element",
  },
  CatalogEntry {
    feature: FeatureType::Rest,
    label: "Rest element",
  },
  CatalogEntry {
    feature: FeatureType::ForOf,
    label: "For-of loop",
  },
];

/// How a grammar node kind maps onto findings.
///
/// A node matches when `guard` holds; it then produces one finding per
/// location pushed by `extent`, all sharing the same qualifier.
#[derive(Clone, Copy)]
pub struct Rule {
  pub feature: FeatureType,
  pub guard: fn(Node<'_>) -> bool,
  pub qualifier: fn(Node<'_>) -> Option<&'static str>,
  pub extent: fn(Node<'_>, &mut Vec<Loc>),
}

impl Rule {
  fn always(feature: FeatureType) -> Rule {
    Rule {
      feature,
      guard: always,
      qualifier: no_qualifier,
      extent: whole_node,
    }
  }

  fn block_scoped_declaration(extent: fn(Node<'_>, &mut Vec<Loc>)) -> Rule {
    Rule {
      feature: FeatureType::VarDecl,
      guard: is_block_scoped,
      qualifier: block_scoped_keyword,
      extent,
    }
  }

  fn async_function_declaration() -> Rule {
    Rule {
      feature: FeatureType::AsyncFunc,
      guard: has_async_modifier,
      qualifier: no_qualifier,
      extent: whole_node,
    }
  }
}

static RULES: Lazy<HashMap<&'static str, Vec<Rule>>> = Lazy::new(|| {
  let table = [
    ("arrow_function", Rule::always(FeatureType::ArrowFunc)),
    ("lexical_declaration", Rule::block_scoped_declaration(whole_node)),
    ("variable_declaration", Rule::block_scoped_declaration(whole_node)),
    ("await_expression", Rule::always(FeatureType::Await)),
    ("yield_expression", Rule::always(FeatureType::Yield)),
    ("class_declaration", Rule::always(FeatureType::ClassDecl)),
    ("class", Rule {
      feature: FeatureType::ClassDecl,
      guard: is_default_export,
      qualifier: no_qualifier,
      extent: whole_node,
    }),
    ("function_declaration", Rule::async_function_declaration()),
    ("generator_function_declaration", Rule::async_function_declaration()),
    ("template_string", Rule {
      feature: FeatureType::TemplateElem,
      guard: always,
      qualifier: no_qualifier,
      extent: template_segments,
    }),
    ("spread_element", Rule::always(FeatureType::Spread)),
    ("rest_pattern", Rule::always(FeatureType::Rest)),
    // The loop is reported before the declaration in its head.
    ("for_in_statement", Rule {
      feature: FeatureType::ForOf,
      guard: is_for_of,
      qualifier: no_qualifier,
      extent: whole_node,
    }),
    ("for_in_statement", Rule::block_scoped_declaration(for_head_declaration)),
  ];
  let mut rules: HashMap<&'static str, Vec<Rule>> = HashMap::with_capacity(table.len());
  for (kind, rule) in table {
    rules.entry(kind).or_default().push(rule);
  }
  rules
});

/// Rules registered for a grammar node kind, in evaluation order.
pub fn rules_for(kind: &str) -> &'static [Rule] {
  RULES.get(kind).map(Vec::as_slice).unwrap_or(&[])
}

fn always(_node: Node<'_>) -> bool {
  true
}

fn no_qualifier(_node: Node<'_>) -> Option<&'static str> {
  None
}

fn whole_node(node: Node<'_>, out: &mut Vec<Loc>) {
  out.push(Loc::from(node));
}

fn is_block_scoped(node: Node<'_>) -> bool {
  block_scoped_keyword(node).is_some()
}

// `lexical_declaration` and loop heads carry the keyword in a `kind` field;
// `variable_declaration` starts with a bare `var` token.
fn block_scoped_keyword(node: Node<'_>) -> Option<&'static str> {
  let keyword = node
    .child_by_field_name("kind")
    .or_else(|| node.child(0))?;
  match keyword.kind() {
    kw @ ("const" | "let") => Some(kw),
    _ => None,
  }
}

// `export default class {}` is an anonymous class declaration, though the
// grammar parses it as an expression.
fn is_default_export(node: Node<'_>) -> bool {
  node
    .parent()
    .is_some_and(|parent| parent.kind() == "export_statement")
}

fn has_async_modifier(node: Node<'_>) -> bool {
  let mut cursor = node.walk();
  let found = node
    .children(&mut cursor)
    .take_while(|child| child.kind() != "function")
    .any(|child| child.kind() == "async");
  found
}

fn is_for_of(node: Node<'_>) -> bool {
  node
    .child_by_field_name("operator")
    .is_some_and(|op| op.kind() == "of")
}

// `for (const [k, v] of entries)` spans `const [k, v]`.
fn for_head_declaration(node: Node<'_>, out: &mut Vec<Loc>) {
  if let (Some(kind), Some(left)) = (
    node.child_by_field_name("kind"),
    node.child_by_field_name("left"),
  ) {
    out.push(Loc(kind.start_byte(), left.end_byte()));
  }
}

// Text between the backticks and substitutions, one location per segment,
// including empty ones: `a${b}${c}` has segments "a", "", "".
fn template_segments(node: Node<'_>, out: &mut Vec<Loc>) {
  let mut start = node.start_byte() + 1;
  let mut cursor = node.walk();
  for sub in node
    .named_children(&mut cursor)
    .filter(|child| child.kind() == "template_substitution")
  {
    out.push(Loc(start, sub.start_byte()));
    start = sub.end_byte();
  }
  out.push(Loc(start, node.end_byte().saturating_sub(1)));
}
