use crate::early;
use crate::error::DetectError;
use crate::error::DetectResult;
use crate::error::SyntaxError;
use crate::error::SyntaxErrorType;
use crate::error::SyntaxResult;
use crate::loc::Loc;
use tracing::debug;
use tree_sitter::Node;
use tree_sitter::Parser;
use tree_sitter::Tree;

/// Parses JavaScript source text into a syntax tree.
///
/// The grammar recovers from malformed input by inserting `ERROR` and
/// `MISSING` nodes. Such a tree is never returned: any recovery is reported
/// as a [`SyntaxError`] at the first offending node in document order.
/// A tree without recovery nodes is then checked for early errors, such as
/// `yield` outside a generator or a repeated `let`.
pub fn parse(source: &str) -> DetectResult<Tree> {
  let mut parser = Parser::new();
  parser
    .set_language(&tree_sitter_javascript::LANGUAGE.into())
    .map_err(DetectError::Language)?;
  let tree = parser.parse(source, None).ok_or(DetectError::Aborted)?;
  if let Err(err) = validate(tree.root_node(), source) {
    debug!(
      code = err.typ.code(),
      line = err.line,
      column = err.column,
      "source failed to parse"
    );
    return Err(err.into());
  }
  Ok(tree)
}

fn validate(root: Node<'_>, source: &str) -> SyntaxResult<()> {
  if !root.has_error() {
    return early::check(root, source);
  }
  let node = first_error(root).unwrap_or(root);
  let typ = if node.is_missing() {
    SyntaxErrorType::MissingToken(node.kind())
  } else {
    SyntaxErrorType::UnexpectedSyntax
  };
  Err(error_at(node, typ))
}

pub(crate) fn error_at(node: Node<'_>, typ: SyntaxErrorType) -> SyntaxError {
  let point = node.start_position();
  Loc::from(node).error(typ, point.row, point.column)
}

// Only descends into subtrees that contain an error.
fn first_error(root: Node<'_>) -> Option<Node<'_>> {
  let mut cursor = root.walk();
  loop {
    let node = cursor.node();
    if node.is_error() || node.is_missing() {
      return Some(node);
    }
    if node.has_error() && cursor.goto_first_child() {
      continue;
    }
    while !cursor.goto_next_sibling() {
      if !cursor.goto_parent() {
        return None;
      }
    }
  }
}
