//! Human-readable tree dumps.
//!
//! A diagnostic pretty-printer layered on top of the public accessor
//! surface: one line per node, in-order, showing the node's level, key,
//! color, position relative to its parent, and the parent's key. Nothing
//! here touches tree internals.

use std::fmt::{Debug, Write};

use crate::node::NodeRef;
use crate::tree::RedBlackTree;

/// Render the whole tree, one line per node in in-order.
pub fn format_tree<K: Ord + Debug>(tree: &RedBlackTree<K>) -> String {
    let mut out = String::new();
    match tree.root() {
        Some(root) => format_subtree(tree, root, 0, "root", &mut out),
        None => out.push_str("the tree is empty\n"),
    }
    out
}

/// Print [`format_tree`] output to stdout.
pub fn print_tree<K: Ord + Debug>(tree: &RedBlackTree<K>) {
    print!("{}", format_tree(tree));
}

fn format_subtree<K: Ord + Debug>(
    tree: &RedBlackTree<K>,
    node: NodeRef,
    level: usize,
    position: &str,
    out: &mut String,
) {
    if let Some(left) = tree.left(node) {
        format_subtree(tree, left, level + 1, "left child", out);
    }

    let parent = match tree.parent(node) {
        Some(parent) => format!("{:?}", tree.key(parent)),
        None => "none".to_string(),
    };
    // Writing into a String cannot fail.
    let _ = writeln!(
        out,
        "node at level {}. key: {:?}. color: {:?}. position: {}. parent: {}",
        level,
        tree.key(node),
        tree.color(node),
        position,
        parent,
    );

    if let Some(right) = tree.right(node) {
        format_subtree(tree, right, level + 1, "right child", out);
    }
}
