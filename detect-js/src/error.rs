use crate::loc::Loc;
use core::fmt;
use core::fmt::Debug;
use core::fmt::Formatter;
use std::error::Error;
use std::fmt::Display;
use tree_sitter::LanguageError;

/// A stable classification of syntax errors reported by the parser adapter.
///
/// Diagnostic codes (prefix `DJ`) are assigned per variant and are stable:
/// - `DJ0001`: [`SyntaxErrorType::UnexpectedSyntax`]
/// - `DJ0002`: [`SyntaxErrorType::MissingToken`]
/// - `DJ0003`: [`SyntaxErrorType::AwaitOutsideAsync`]
/// - `DJ0004`: [`SyntaxErrorType::ConstWithoutInitializer`]
/// - `DJ0005`: [`SyntaxErrorType::DuplicateLexicalDeclaration`]
/// - `DJ0006`: [`SyntaxErrorType::JumpWithoutTarget`]
/// - `DJ0007`: [`SyntaxErrorType::ReturnOutsideFunction`]
/// - `DJ0008`: [`SyntaxErrorType::YieldOutsideGenerator`]
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub enum SyntaxErrorType {
  UnexpectedSyntax,
  // Holds the token the parser expected, e.g. `}`.
  MissingToken(&'static str),
  AwaitOutsideAsync,
  ConstWithoutInitializer,
  DuplicateLexicalDeclaration,
  // Holds the keyword, `break` or `continue`.
  JumpWithoutTarget(&'static str),
  ReturnOutsideFunction,
  YieldOutsideGenerator,
}

impl SyntaxErrorType {
  /// Stable diagnostic code for this syntax error variant.
  pub fn code(&self) -> &'static str {
    match self {
      SyntaxErrorType::UnexpectedSyntax => "DJ0001",
      SyntaxErrorType::MissingToken(_) => "DJ0002",
      SyntaxErrorType::AwaitOutsideAsync => "DJ0003",
      SyntaxErrorType::ConstWithoutInitializer => "DJ0004",
      SyntaxErrorType::DuplicateLexicalDeclaration => "DJ0005",
      SyntaxErrorType::JumpWithoutTarget(_) => "DJ0006",
      SyntaxErrorType::ReturnOutsideFunction => "DJ0007",
      SyntaxErrorType::YieldOutsideGenerator => "DJ0008",
    }
  }

  /// Human-readable message describing this syntax error.
  pub fn message(&self) -> String {
    match self {
      SyntaxErrorType::UnexpectedSyntax => "unexpected syntax".into(),
      SyntaxErrorType::MissingToken(token) => format!("expected `{}`", token),
      SyntaxErrorType::AwaitOutsideAsync => "`await` is only valid in async functions".into(),
      SyntaxErrorType::ConstWithoutInitializer => "missing initializer in `const` declaration".into(),
      SyntaxErrorType::DuplicateLexicalDeclaration => "identifier has already been declared".into(),
      SyntaxErrorType::JumpWithoutTarget(keyword) => format!("`{}` has no enclosing target", keyword),
      SyntaxErrorType::ReturnOutsideFunction => "`return` outside of a function".into(),
      SyntaxErrorType::YieldOutsideGenerator => "`yield` is only valid in generators".into(),
    }
  }
}

#[derive(Clone)]
pub struct SyntaxError {
  pub typ: SyntaxErrorType,
  pub loc: Loc,
  // Zero-based; `column` counts bytes, as the parser does.
  pub line: usize,
  pub column: usize,
}

impl SyntaxError {
  pub fn new(typ: SyntaxErrorType, loc: Loc, line: usize, column: usize) -> SyntaxError {
    SyntaxError {
      typ,
      loc,
      line,
      column,
    }
  }
}

impl Debug for SyntaxError {
  fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
    write!(f, "{} around loc [{}:{}]", self, self.loc.0, self.loc.1)
  }
}

impl Display for SyntaxError {
  fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
    write!(
      f,
      "{} {} at {}:{}",
      self.typ.code(),
      self.typ.message(),
      self.line + 1,
      self.column + 1
    )
  }
}

impl Error for SyntaxError {}

impl PartialEq for SyntaxError {
  fn eq(&self, other: &Self) -> bool {
    self.typ == other.typ && self.loc == other.loc
  }
}

impl Eq for SyntaxError {}

pub type SyntaxResult<T> = Result<T, SyntaxError>;

#[derive(Debug)]
pub enum DetectError {
  Syntax(SyntaxError),
  /// The bundled JavaScript grammar is incompatible with the linked tree-sitter runtime.
  Language(LanguageError),
  /// The parser gave up without producing a tree.
  Aborted,
}

impl Display for DetectError {
  fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
    match self {
      DetectError::Syntax(err) => write!(f, "syntax error: {}", err),
      DetectError::Language(err) => write!(f, "failed to load JavaScript grammar: {}", err),
      DetectError::Aborted => write!(f, "parsing was aborted"),
    }
  }
}

impl Error for DetectError {
  fn source(&self) -> Option<&(dyn Error + 'static)> {
    match self {
      DetectError::Syntax(err) => Some(err),
      DetectError::Language(err) => Some(err),
      DetectError::Aborted => None,
    }
  }
}

impl From<SyntaxError> for DetectError {
  fn from(err: SyntaxError) -> Self {
    DetectError::Syntax(err)
  }
}

pub type DetectResult<T> = Result<T, DetectError>;

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn display_uses_one_based_position_and_code() {
    let err = Loc(26, 26).error(SyntaxErrorType::MissingToken("}"), 0, 26);
    assert_eq!(err.to_string(), "DJ0002 expected `}` at 1:27");
  }

  #[test]
  fn detect_error_exposes_syntax_source() {
    let err: DetectError = Loc(0, 1)
      .error(SyntaxErrorType::UnexpectedSyntax, 2, 4)
      .into();
    assert_eq!(err.to_string(), "syntax error: DJ0001 unexpected syntax at 3:5");
    assert!(err.source().is_some());
    assert!(DetectError::Aborted.source().is_none());
  }

  #[test]
  fn codes_are_distinct() {
    let mut codes: Vec<_> = [
      SyntaxErrorType::UnexpectedSyntax,
      SyntaxErrorType::MissingToken(";"),
      SyntaxErrorType::AwaitOutsideAsync,
      SyntaxErrorType::ConstWithoutInitializer,
      SyntaxErrorType::DuplicateLexicalDeclaration,
      SyntaxErrorType::JumpWithoutTarget("break"),
      SyntaxErrorType::ReturnOutsideFunction,
      SyntaxErrorType::YieldOutsideGenerator,
    ]
    .iter()
    .map(|typ| typ.code())
    .collect();
    codes.sort_unstable();
    codes.dedup();
    assert_eq!(codes.len(), 8);
  }
}
