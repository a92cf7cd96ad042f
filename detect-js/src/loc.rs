use crate::error::SyntaxError;
use crate::error::SyntaxErrorType;
use tree_sitter::Node;

/// A location within the source text expressed as UTF-8 byte offsets.
///
/// Parser nodes always produce locations on character boundaries, but a
/// `Loc` can be constructed freely, so every accessor that slices the
/// source is checked.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct Loc(pub usize, pub usize);

impl Loc {
  /// The source text covered by this location, or `None` if the location
  /// is out of bounds, inverted, or does not fall on character boundaries.
  pub fn text<'s>(&self, source: &'s str) -> Option<&'s str> {
    source.get(self.0..self.1)
  }

  /// Number of characters preceding the start of this location.
  pub fn char_offset(&self, source: &str) -> Option<usize> {
    source.get(..self.0).map(|prefix| prefix.chars().count())
  }

  pub fn error(self, typ: SyntaxErrorType, line: usize, column: usize) -> SyntaxError {
    SyntaxError::new(typ, self, line, column)
  }
}

impl From<Node<'_>> for Loc {
  fn from(node: Node<'_>) -> Self {
    Loc(node.start_byte(), node.end_byte())
  }
}

/// Converts byte offsets into character offsets incrementally.
///
/// Each query counts only the characters between it and the previous one,
/// so a sequence of mostly increasing offsets costs one pass over the source.
pub struct CharOffsets<'s> {
  source: &'s str,
  byte: usize,
  chars: usize,
}

impl<'s> CharOffsets<'s> {
  pub fn new(source: &'s str) -> CharOffsets<'s> {
    CharOffsets {
      source,
      byte: 0,
      chars: 0,
    }
  }

  /// Same result as [`Loc::char_offset`] for a location starting at `byte`.
  pub fn get(&mut self, byte: usize) -> Option<usize> {
    let (lo, hi) = (self.byte.min(byte), self.byte.max(byte));
    let between = self.source.get(lo..hi)?.chars().count();
    if byte >= self.byte {
      self.chars += between;
    } else {
      self.chars -= between;
    }
    self.byte = byte;
    Some(self.chars)
  }
}
