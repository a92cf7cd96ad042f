//! Early errors: programs the grammar accepts but the language rejects.
//!
//! The grammar is context-free, so it happily builds `yield` expressions
//! outside generators or a second `let` of the same name. Only the checks
//! below are performed; anything else the grammar accepts is treated as
//! valid.

use crate::error::SyntaxError;
use crate::error::SyntaxErrorType;
use crate::error::SyntaxResult;
use crate::loc::Loc;
use crate::parse::error_at;
use ahash::HashSet;
use ahash::HashSetExt;
use tree_sitter::Node;

const FUNCTION_KINDS: &[&str] = &[
  "arrow_function",
  "function_declaration",
  "function_expression",
  "generator_function",
  "generator_function_declaration",
  "method_definition",
];

const LOOP_KINDS: &[&str] = &[
  "do_statement",
  "for_in_statement",
  "for_statement",
  "while_statement",
];

#[derive(Clone, Copy)]
enum Boundary<'t> {
  Function(Node<'t>),
  StaticBlock,
  TopLevel,
}

/// Fails with the early error that starts first in document order.
pub fn check(root: Node<'_>, source: &str) -> SyntaxResult<()> {
  let mut first: Option<SyntaxError> = None;
  let mut cursor = root.walk();
  'walk: loop {
    let node = cursor.node();
    // Preorder starts never decrease, so nothing further can come earlier.
    if first.as_ref().is_some_and(|err| node.start_byte() > err.loc.0) {
      break;
    }
    if node.is_named() {
      if let Some(err) = early_error(node, source) {
        if first.as_ref().map_or(true, |prev| err.loc.0 < prev.loc.0) {
          first = Some(err);
        }
      }
    }

    if cursor.goto_first_child() {
      continue;
    }
    while !cursor.goto_next_sibling() {
      if !cursor.goto_parent() {
        break 'walk;
      }
    }
  }
  match first {
    Some(err) => Err(err),
    None => Ok(()),
  }
}

fn early_error(node: Node<'_>, source: &str) -> Option<SyntaxError> {
  let typ = match node.kind() {
    "yield_expression" if !in_generator(node) => SyntaxErrorType::YieldOutsideGenerator,
    "await_expression" if !await_allowed(node) => SyntaxErrorType::AwaitOutsideAsync,
    "return_statement" if !matches!(boundary(node), Boundary::Function(_)) => {
      SyntaxErrorType::ReturnOutsideFunction
    }
    "break_statement" if !has_jump_target(node, source, false) => {
      SyntaxErrorType::JumpWithoutTarget("break")
    }
    "continue_statement" if !has_jump_target(node, source, true) => {
      SyntaxErrorType::JumpWithoutTarget("continue")
    }
    "lexical_declaration" => return uninitialized_const(node),
    "program" | "statement_block" | "switch_body" => return duplicate_declaration(node, source),
    _ => return None,
  };
  Some(error_at(node, typ))
}

fn boundary(node: Node<'_>) -> Boundary<'_> {
  let mut current = node.parent();
  while let Some(ancestor) = current {
    if FUNCTION_KINDS.contains(&ancestor.kind()) {
      return Boundary::Function(ancestor);
    }
    if ancestor.kind() == "class_static_block" {
      return Boundary::StaticBlock;
    }
    current = ancestor.parent();
  }
  Boundary::TopLevel
}

fn has_token(node: Node<'_>, token: &str) -> bool {
  let mut cursor = node.walk();
  let found = node
    .children(&mut cursor)
    .any(|child| !child.is_named() && child.kind() == token);
  found
}

fn in_generator(node: Node<'_>) -> bool {
  match boundary(node) {
    Boundary::Function(func) => match func.kind() {
      "generator_function" | "generator_function_declaration" => true,
      "method_definition" => has_token(func, "*"),
      _ => false,
    },
    _ => false,
  }
}

// Top-level `await` is valid in modules, and modules cannot be told apart
// from scripts here.
fn await_allowed(node: Node<'_>) -> bool {
  match boundary(node) {
    Boundary::Function(func) => has_token(func, "async"),
    Boundary::StaticBlock => false,
    Boundary::TopLevel => true,
  }
}

fn label_text<'s>(node: Node<'_>, source: &'s str) -> Option<&'s str> {
  node
    .child_by_field_name("label")
    .and_then(|label| Loc::from(label).text(source))
}

fn has_jump_target(node: Node<'_>, source: &str, is_continue: bool) -> bool {
  let label = label_text(node, source);
  let mut current = node.parent();
  while let Some(ancestor) = current {
    let kind = ancestor.kind();
    if FUNCTION_KINDS.contains(&kind) || kind == "class_static_block" {
      return false;
    }
    let found = match label {
      Some(label) => kind == "labeled_statement" && label_text(ancestor, source) == Some(label),
      None => LOOP_KINDS.contains(&kind) || (!is_continue && kind == "switch_statement"),
    };
    if found {
      return true;
    }
    current = ancestor.parent();
  }
  false
}

// Loop heads like `for (const x of xs)` have no `lexical_declaration` node,
// so every declaration seen here needs an initializer.
fn uninitialized_const(node: Node<'_>) -> Option<SyntaxError> {
  if node.child_by_field_name("kind")?.kind() != "const" {
    return None;
  }
  let mut cursor = node.walk();
  let missing = node.named_children(&mut cursor).find(|declarator| {
    declarator.kind() == "variable_declarator" && declarator.child_by_field_name("value").is_none()
  });
  missing.map(|declarator| error_at(declarator, SyntaxErrorType::ConstWithoutInitializer))
}

fn duplicate_declaration(scope: Node<'_>, source: &str) -> Option<SyntaxError> {
  let mut seen = HashSet::new();
  let mut names = Vec::new();
  for statement in scope_statements(scope) {
    lexically_bound(statement, &mut names);
    for name in names.drain(..) {
      let Some(text) = Loc::from(name).text(source) else {
        continue;
      };
      if !seen.insert(text) {
        return Some(error_at(name, SyntaxErrorType::DuplicateLexicalDeclaration));
      }
    }
  }
  None
}

// All cases of a switch share one scope.
fn scope_statements(scope: Node<'_>) -> Vec<Node<'_>> {
  let mut cursor = scope.walk();
  let children: Vec<_> = scope.named_children(&mut cursor).collect();
  if scope.kind() != "switch_body" {
    return children;
  }
  children
    .into_iter()
    .flat_map(|case| {
      let mut cursor = case.walk();
      case.named_children(&mut cursor).collect::<Vec<_>>()
    })
    .collect()
}

fn lexically_bound<'t>(statement: Node<'t>, out: &mut Vec<Node<'t>>) {
  match statement.kind() {
    "export_statement" => {
      if let Some(declaration) = statement.child_by_field_name("declaration") {
        lexically_bound(declaration, out);
      }
    }
    "class_declaration" => out.extend(statement.child_by_field_name("name")),
    "lexical_declaration" => {
      let mut cursor = statement.walk();
      for declarator in statement.named_children(&mut cursor) {
        if let Some(name) = declarator.child_by_field_name("name") {
          bound_names(name, out);
        }
      }
    }
    _ => {}
  }
}

fn bound_names<'t>(pattern: Node<'t>, out: &mut Vec<Node<'t>>) {
  match pattern.kind() {
    "identifier" | "shorthand_property_identifier_pattern" => out.push(pattern),
    "pair_pattern" => {
      if let Some(value) = pattern.child_by_field_name("value") {
        bound_names(value, out);
      }
    }
    "assignment_pattern" | "object_assignment_pattern" => {
      if let Some(left) = pattern.child_by_field_name("left") {
        bound_names(left, out);
      }
    }
    "object_pattern" | "array_pattern" | "rest_pattern" => {
      let mut cursor = pattern.walk();
      for child in pattern.named_children(&mut cursor) {
        bound_names(child, out);
      }
    }
    _ => {}
  }
}
