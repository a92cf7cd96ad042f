use crate::catalog::rules_for;
use crate::collect::Collector;
use tree_sitter::Tree;

#[derive(Clone, Copy, Default, PartialEq, Eq, Debug)]
pub struct WalkStats {
  /// Every node in the tree, named or not.
  pub visited: usize,
  /// Matches offered to the collector, including those it dropped.
  pub matched: usize,
}

/// Visits every node of `tree` once, depth-first in document order, and
/// offers each rule match to `collector`.
///
/// The walk never stops early: a full collector only means further matches
/// are dropped.
pub fn walk(tree: &Tree, collector: &mut Collector<'_>) -> WalkStats {
  let mut stats = WalkStats::default();
  let mut locs = Vec::new();
  let mut cursor = tree.walk();
  loop {
    let node = cursor.node();
    stats.visited += 1;
    if node.is_named() {
      for rule in rules_for(node.kind()) {
        if !(rule.guard)(node) {
          continue;
        }
        let qualifier = (rule.qualifier)(node);
        (rule.extent)(node, &mut locs);
        for loc in locs.drain(..) {
          collector.offer(rule.feature, qualifier, Some(loc));
          stats.matched += 1;
        }
      }
    }

    if cursor.goto_first_child() {
      continue;
    }
    while !cursor.goto_next_sibling() {
      if !cursor.goto_parent() {
        return stats;
      }
    }
  }
}
