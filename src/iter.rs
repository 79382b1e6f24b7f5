//! Traversal iterators.
//!
//! All three orders walk the arena with an explicit stack instead of
//! recursion, so iteration cost is O(n) with O(height) auxiliary space and
//! no recursion-depth concern. Iterators borrow the tree immutably; they are
//! restartable by simply creating a new one.

use crate::node::NodeRef;
use crate::tree::RedBlackTree;

/// In-order iterator: yields keys in sorted order (left, self, right).
pub struct Iter<'a, K> {
    tree: &'a RedBlackTree<K>,
    stack: Vec<NodeRef>,
    cur: NodeRef,
}

impl<'a, K: Ord> Iter<'a, K> {
    pub(crate) fn new(tree: &'a RedBlackTree<K>) -> Self {
        Self {
            tree,
            stack: Vec::new(),
            cur: tree.root,
        }
    }
}

impl<'a, K: Ord> Iterator for Iter<'a, K> {
    type Item = &'a K;

    fn next(&mut self) -> Option<Self::Item> {
        while !self.cur.is_nil() {
            self.stack.push(self.cur);
            self.cur = self.tree.node(self.cur).left;
        }
        let node = self.stack.pop()?;
        self.cur = self.tree.node(node).right;
        Some(self.tree.key_of(node))
    }
}

/// Pre-order iterator: self, left, right.
pub struct PreOrderIter<'a, K> {
    tree: &'a RedBlackTree<K>,
    stack: Vec<NodeRef>,
}

impl<'a, K: Ord> PreOrderIter<'a, K> {
    pub(crate) fn new(tree: &'a RedBlackTree<K>) -> Self {
        let mut stack = Vec::new();
        if !tree.root.is_nil() {
            stack.push(tree.root);
        }
        Self { tree, stack }
    }
}

impl<'a, K: Ord> Iterator for PreOrderIter<'a, K> {
    type Item = &'a K;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        // Right below left, so the left subtree pops first.
        let right = self.tree.node(node).right;
        if !right.is_nil() {
            self.stack.push(right);
        }
        let left = self.tree.node(node).left;
        if !left.is_nil() {
            self.stack.push(left);
        }
        Some(self.tree.key_of(node))
    }
}

/// Post-order iterator: left, right, self.
///
/// Each stack entry remembers whether its children were already expanded;
/// a node is yielded the second time it surfaces.
pub struct PostOrderIter<'a, K> {
    tree: &'a RedBlackTree<K>,
    stack: Vec<(NodeRef, bool)>,
}

impl<'a, K: Ord> PostOrderIter<'a, K> {
    pub(crate) fn new(tree: &'a RedBlackTree<K>) -> Self {
        let mut stack = Vec::new();
        if !tree.root.is_nil() {
            stack.push((tree.root, false));
        }
        Self { tree, stack }
    }
}

impl<'a, K: Ord> Iterator for PostOrderIter<'a, K> {
    type Item = &'a K;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let (node, expanded) = self.stack.pop()?;
            if expanded {
                return Some(self.tree.key_of(node));
            }
            self.stack.push((node, true));
            let right = self.tree.node(node).right;
            if !right.is_nil() {
                self.stack.push((right, false));
            }
            let left = self.tree.node(node).left;
            if !left.is_nil() {
                self.stack.push((left, false));
            }
        }
    }
}
