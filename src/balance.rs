//! The structural repair algorithms: rotations, transplant, and the insert
//! and delete fixup loops.
//!
//! Everything here is an O(1) relink or a bounded loop of relinks and
//! recolorings. The entry points are `insert_fixup` and `delete_fixup`,
//! invoked by [`RedBlackTree`] right after the raw BST mutation; each
//! restores all five red-black invariants before returning.

use crate::node::{Color, NodeRef};
use crate::tree::RedBlackTree;

impl<K: Ord> RedBlackTree<K> {
    /// Rotate `node` down to the left; its right child takes its place.
    /// Preserves BST order and the subtree's external links.
    pub(crate) fn rotate_left(&mut self, node: NodeRef) {
        let child = self.node(node).right;
        let inner = self.node(child).left;

        self.node_mut(node).right = inner;
        if !inner.is_nil() {
            self.node_mut(inner).parent = node;
        }

        let parent = self.node(node).parent;
        self.node_mut(child).parent = parent;
        if parent.is_nil() {
            self.root = child;
        } else if node == self.node(parent).left {
            self.node_mut(parent).left = child;
        } else {
            self.node_mut(parent).right = child;
        }

        self.node_mut(child).left = node;
        self.node_mut(node).parent = child;
    }

    /// Mirror image of [`Self::rotate_left`].
    pub(crate) fn rotate_right(&mut self, node: NodeRef) {
        let child = self.node(node).left;
        let inner = self.node(child).right;

        self.node_mut(node).left = inner;
        if !inner.is_nil() {
            self.node_mut(inner).parent = node;
        }

        let parent = self.node(node).parent;
        self.node_mut(child).parent = parent;
        if parent.is_nil() {
            self.root = child;
        } else if node == self.node(parent).left {
            self.node_mut(parent).left = child;
        } else {
            self.node_mut(parent).right = child;
        }

        self.node_mut(child).right = node;
        self.node_mut(node).parent = child;
    }

    /// Replace the subtree rooted at `old` with the one rooted at `new` in
    /// `old`'s parent slot. `new` may be the sentinel; its parent link is
    /// set either way, which the delete fixup relies on to climb back up.
    /// Children of `new` are left untouched; callers reattach them.
    pub(crate) fn transplant(&mut self, old: NodeRef, new: NodeRef) {
        let parent = self.node(old).parent;
        if parent.is_nil() {
            self.root = new;
        } else if old == self.node(parent).left {
            self.node_mut(parent).left = new;
        } else {
            self.node_mut(parent).right = new;
        }
        self.node_mut(new).parent = parent;
    }

    /// Restore the no-red-red invariant after inserting the red node `z`.
    ///
    /// The classic three cases, mirrored for a left- or right-side parent:
    /// a red uncle pushes the violation two levels up; a black uncle takes
    /// one or two rotations and terminates. At most two rotations total.
    pub(crate) fn insert_fixup(&mut self, mut z: NodeRef) {
        // Sentinel parents read as black, so the loop also terminates at
        // the root.
        while self.color_of(self.node(z).parent) == Color::Red {
            let parent = self.node(z).parent;
            // A red parent is never the root, so the grandparent is real.
            let grand = self.node(parent).parent;

            if parent == self.node(grand).left {
                let uncle = self.node(grand).right;
                if self.color_of(uncle) == Color::Red {
                    // Case 1: recolor and push the violation up.
                    self.node_mut(parent).color = Color::Black;
                    self.node_mut(uncle).color = Color::Black;
                    self.node_mut(grand).color = Color::Red;
                    z = grand;
                } else {
                    if z == self.node(parent).right {
                        // Case 2: inner grandchild, straighten into case 3.
                        z = parent;
                        self.rotate_left(z);
                    }
                    // Case 3: lift the (now outer) parent over the grandparent.
                    let p = self.node(z).parent;
                    let g = self.node(p).parent;
                    self.node_mut(p).color = Color::Black;
                    self.node_mut(g).color = Color::Red;
                    self.rotate_right(g);
                }
            } else {
                let uncle = self.node(grand).left;
                if self.color_of(uncle) == Color::Red {
                    self.node_mut(parent).color = Color::Black;
                    self.node_mut(uncle).color = Color::Black;
                    self.node_mut(grand).color = Color::Red;
                    z = grand;
                } else {
                    if z == self.node(parent).left {
                        z = parent;
                        self.rotate_right(z);
                    }
                    let p = self.node(z).parent;
                    let g = self.node(p).parent;
                    self.node_mut(p).color = Color::Black;
                    self.node_mut(g).color = Color::Red;
                    self.rotate_left(g);
                }
            }
        }

        // Case 1 may have run the recoloring all the way to the root.
        let root = self.root;
        self.node_mut(root).color = Color::Black;
    }

    /// Restore black-height balance after a black node was unlinked.
    ///
    /// `node` carries the "extra blackness": the slot that took over the
    /// removed node's position, possibly the sentinel (its scratch parent
    /// link was set by the caller). Four cases, mirrored per side, at most
    /// three rotations total.
    pub(crate) fn delete_fixup(&mut self, mut node: NodeRef) {
        while node != self.root && self.color_of(node) == Color::Black {
            let parent = self.node(node).parent;

            if node == self.node(parent).left {
                let mut sibling = self.node(parent).right;
                if self.color_of(sibling) == Color::Red {
                    // Case 1: rotate a red sibling up to expose black ones.
                    self.node_mut(sibling).color = Color::Black;
                    self.node_mut(parent).color = Color::Red;
                    self.rotate_left(parent);
                    sibling = self.node(parent).right;
                }

                let near = self.node(sibling).left;
                let far = self.node(sibling).right;
                if self.color_of(near) == Color::Black && self.color_of(far) == Color::Black {
                    // Case 2: strip a black off both sides, move up.
                    self.node_mut(sibling).color = Color::Red;
                    node = parent;
                } else {
                    if self.color_of(far) == Color::Black {
                        // Case 3: rotate the near red into the far slot.
                        self.node_mut(near).color = Color::Black;
                        self.node_mut(sibling).color = Color::Red;
                        self.rotate_right(sibling);
                        sibling = self.node(parent).right;
                    }
                    // Case 4: the far red absorbs the extra blackness.
                    let parent_color = self.node(parent).color;
                    self.node_mut(sibling).color = parent_color;
                    self.node_mut(parent).color = Color::Black;
                    let far = self.node(sibling).right;
                    self.node_mut(far).color = Color::Black;
                    self.rotate_left(parent);
                    node = self.root;
                }
            } else {
                let mut sibling = self.node(parent).left;
                if self.color_of(sibling) == Color::Red {
                    self.node_mut(sibling).color = Color::Black;
                    self.node_mut(parent).color = Color::Red;
                    self.rotate_right(parent);
                    sibling = self.node(parent).left;
                }

                let near = self.node(sibling).right;
                let far = self.node(sibling).left;
                if self.color_of(near) == Color::Black && self.color_of(far) == Color::Black {
                    self.node_mut(sibling).color = Color::Red;
                    node = parent;
                } else {
                    if self.color_of(far) == Color::Black {
                        self.node_mut(near).color = Color::Black;
                        self.node_mut(sibling).color = Color::Red;
                        self.rotate_left(sibling);
                        sibling = self.node(parent).left;
                    }
                    let parent_color = self.node(parent).color;
                    self.node_mut(sibling).color = parent_color;
                    self.node_mut(parent).color = Color::Black;
                    let far = self.node(sibling).left;
                    self.node_mut(far).color = Color::Black;
                    self.rotate_right(parent);
                    node = self.root;
                }
            }
        }

        // Absorb the extra blackness; a no-op when the cursor is the
        // sentinel or an already-black node.
        self.node_mut(node).color = Color::Black;
    }

    #[inline]
    fn color_of(&self, node: NodeRef) -> Color {
        self.node(node).color
    }
}
