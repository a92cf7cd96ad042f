use crate::catalog::CATALOG;
use serde::Serialize;
use serde::Serializer;
use std::fmt;
use std::fmt::Display;
use std::fmt::Formatter;

/// A syntax construct introduced in ES2015 or later.
///
/// The set is closed. Discriminants index into [`CATALOG`].
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum FeatureType {
  ArrowFunc,
  // `const` or `let`; `var` declarations are never reported.
  VarDecl,
  Await,
  Yield,
  ClassDecl,
  // Only named `async function` declarations.
  AsyncFunc,
  TemplateElem,
  Spread,
  Rest,
  ForOf,
}

impl FeatureType {
  pub const ALL: [FeatureType; 10] = [
    FeatureType::ArrowFunc,
    FeatureType::VarDecl,
    FeatureType::Await,
    FeatureType::Yield,
    FeatureType::ClassDecl,
    FeatureType::AsyncFunc,
    FeatureType::TemplateElem,
    FeatureType::Spread,
    FeatureType::Rest,
    FeatureType::ForOf,
  ];

  /// The ESTree-style tag used when serializing.
  pub fn as_str(self) -> &'static str {
    match self {
      FeatureType::ArrowFunc => "ArrowFunctionExpression",
      FeatureType::VarDecl => "VariableDeclaration",
      FeatureType::Await => "AwaitExpression",
      FeatureType::Yield => "YieldExpression",
      FeatureType::ClassDecl => "ClassDeclaration",
      FeatureType::AsyncFunc => "AsyncFunction",
      FeatureType::TemplateElem => "TemplateElement",
      FeatureType::Spread => "SpreadElement",
      FeatureType::Rest => "RestElement",
      FeatureType::ForOf => "ForOfStatement",
    }
  }

  pub fn label(self) -> &'static str {
    CATALOG[self as usize].label
  }
}

impl Display for FeatureType {
  fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
    f.write_str(self.label())
  }
}

impl Serialize for FeatureType {
  fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(self.as_str())
  }
}
