//! Statistics and introspection.
//!
//! A cheap structural probe over a [`RedBlackTree`]: node and color counts,
//! the black height, and the real height. Useful for checking balance in
//! tests and benchmarks, or for eyeballing a tree while debugging.

use crate::node::Color;
use crate::tree::RedBlackTree;

pub trait TreeStatsTrait {
    fn get_tree_stats(&self) -> TreeStats;
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct TreeStats {
    /// Live nodes in the tree (same as `len()`).
    pub num_nodes: usize,
    pub num_red: usize,
    pub num_black: usize,
    /// Black nodes on the all-left path from the root (inclusive) down to
    /// the sentinel. Equal on every path by the red-black invariants, and
    /// at least half the tree height.
    pub black_height: usize,
    /// Longest root-to-leaf path, in nodes. Bounded by twice the black
    /// height plus one.
    pub max_height: usize,
}

impl<K: Ord> TreeStatsTrait for RedBlackTree<K> {
    fn get_tree_stats(&self) -> TreeStats {
        let mut stats = TreeStats::default();

        let Some(root) = self.root() else {
            return stats;
        };

        // Color counts and height, with an explicit stack.
        let mut stack = vec![(root, 1usize)];
        while let Some((node, depth)) = stack.pop() {
            stats.num_nodes += 1;
            match self.color(node) {
                Color::Red => stats.num_red += 1,
                Color::Black => stats.num_black += 1,
            }
            stats.max_height = stats.max_height.max(depth);
            if let Some(left) = self.left(node) {
                stack.push((left, depth + 1));
            }
            if let Some(right) = self.right(node) {
                stack.push((right, depth + 1));
            }
        }

        // Any path works for the black height; take the all-left one.
        let mut cur = Some(root);
        while let Some(node) = cur {
            if self.color(node) == Color::Black {
                stats.black_height += 1;
            }
            cur = self.left(node);
        }

        stats
    }
}
