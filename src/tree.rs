//! Red-black tree implementation.
//!
//! This module contains the main [`RedBlackTree`] ordered-map structure. The
//! balancing algorithms it drives (rotations, transplant, the insert and
//! delete fixup loops) live in `balance.rs`.

use crate::iter::{Iter, PostOrderIter, PreOrderIter};
use crate::node::{Color, Node, NodeRef};

/// A red-black tree: a self-balancing binary search tree with worst-case
/// O(log n) insert, delete and search.
///
/// Nodes are stored in a contiguous arena and linked by [`NodeRef`] handles,
/// so every structural change is an index reassignment. Slot 0 is a reserved
/// black sentinel that fills every "no child" and "no parent" link; it never
/// takes part in key comparisons.
///
/// ## Ordering
///
/// Keys only need `Ord`. Duplicate keys are permitted: an inserted key equal
/// to an existing one descends into the right subtree, so duplicates appear
/// after their equals in in-order traversal.
///
/// ## Concurrency
///
/// Mutation requires `&mut self`; there is no internal locking and no
/// interior mutability. Share the tree across threads the usual way, by
/// owning it on one thread or wrapping it in an external lock.
///
/// ## Examples
///
/// ```rust
/// use redblack::RedBlackTree;
///
/// let mut tree = RedBlackTree::new(10);
/// for key in [5, 12, -1, 67] {
///     tree.insert(key);
/// }
///
/// assert_eq!(tree.to_in_order_list(), vec![-1, 5, 10, 12, 67]);
/// assert_eq!(tree.key(tree.min_node().unwrap()), &-1);
///
/// let node = tree.search(&12).unwrap();
/// assert_eq!(tree.delete(node), 12);
/// assert_eq!(tree.search(&12), None);
/// ```
pub struct RedBlackTree<K> {
    pub(crate) slots: Vec<Node<K>>,
    pub(crate) root: NodeRef,
    free: Vec<NodeRef>,
    len: usize,
}

impl<K: Ord> RedBlackTree<K> {
    /// Create a tree holding a single black root with the given key.
    ///
    /// There is no empty constructor; a tree always starts with one real
    /// node. (Deleting every node is still allowed, and the tree accepts
    /// inserts again afterwards.)
    pub fn new(key: K) -> Self {
        let mut tree = Self {
            slots: vec![Node::sentinel()],
            root: NodeRef::NIL,
            free: Vec::new(),
            len: 0,
        };
        let root = tree.alloc(key);
        tree.node_mut(root).color = Color::Black;
        tree.root = root;
        tree.len = 1;
        tree
    }

    /// Number of live nodes in the tree. Duplicates count individually.
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// The root node, or `None` if every node has been deleted.
    #[inline]
    pub fn root(&self) -> Option<NodeRef> {
        if self.root.is_nil() {
            None
        } else {
            Some(self.root)
        }
    }

    /// Find a node holding `key`.
    ///
    /// Descends from the root using the ordering relation only; `None` when
    /// no node holds the key. If the key was inserted more than once this
    /// returns whichever duplicate the descent reaches first.
    pub fn search(&self, key: &K) -> Option<NodeRef> {
        let mut cur = self.root;
        while !cur.is_nil() {
            cur = match self.key_of(cur).cmp(key) {
                std::cmp::Ordering::Equal => return Some(cur),
                std::cmp::Ordering::Greater => self.node(cur).left,
                std::cmp::Ordering::Less => self.node(cur).right,
            };
        }
        None
    }

    /// The node with the smallest key, or `None` for an emptied tree.
    pub fn min_node(&self) -> Option<NodeRef> {
        self.root().map(|root| self.subtree_min(root))
    }

    /// The node with the largest key, or `None` for an emptied tree.
    pub fn max_node(&self) -> Option<NodeRef> {
        self.root().map(|root| self.subtree_max(root))
    }

    /// The minimum of the subtree rooted at `node`.
    ///
    /// # Panics
    ///
    /// Panics if `node` is not a live handle of this tree.
    pub fn min_from(&self, node: NodeRef) -> Option<NodeRef> {
        self.check_live(node, "min_from");
        Some(self.subtree_min(node))
    }

    /// The maximum of the subtree rooted at `node`.
    ///
    /// # Panics
    ///
    /// Panics if `node` is not a live handle of this tree.
    pub fn max_from(&self, node: NodeRef) -> Option<NodeRef> {
        self.check_live(node, "max_from");
        Some(self.subtree_max(node))
    }

    /// The node with the next larger position in key order, or `None` if
    /// `node` holds the maximum.
    ///
    /// # Panics
    ///
    /// Panics if `node` is not a live handle of this tree.
    pub fn successor(&self, node: NodeRef) -> Option<NodeRef> {
        self.check_live(node, "successor");
        let right = self.node(node).right;
        if !right.is_nil() {
            return Some(self.subtree_min(right));
        }
        // Walk up until we leave a left subtree behind.
        let mut cur = node;
        let mut up = self.node(cur).parent;
        while !up.is_nil() && cur == self.node(up).right {
            cur = up;
            up = self.node(up).parent;
        }
        if up.is_nil() {
            None
        } else {
            Some(up)
        }
    }

    /// The node with the next smaller position in key order, or `None` if
    /// `node` holds the minimum.
    ///
    /// # Panics
    ///
    /// Panics if `node` is not a live handle of this tree.
    pub fn predecessor(&self, node: NodeRef) -> Option<NodeRef> {
        self.check_live(node, "predecessor");
        let left = self.node(node).left;
        if !left.is_nil() {
            return Some(self.subtree_max(left));
        }
        let mut cur = node;
        let mut up = self.node(cur).parent;
        while !up.is_nil() && cur == self.node(up).left {
            cur = up;
            up = self.node(up).parent;
        }
        if up.is_nil() {
            None
        } else {
            Some(up)
        }
    }

    /// Insert `key` and return the handle of its new node.
    ///
    /// Duplicates are allowed; a key equal to an existing one descends into
    /// the right subtree. At most two rotations are performed to restore the
    /// red-black invariants.
    pub fn insert(&mut self, key: K) -> NodeRef {
        let z = self.alloc(key);

        // Plain BST descent, remembering the last real node visited.
        let mut y = NodeRef::NIL;
        let mut x = self.root;
        while !x.is_nil() {
            y = x;
            x = if self.key_of(z) >= self.key_of(x) {
                self.node(x).right
            } else {
                self.node(x).left
            };
        }

        self.node_mut(z).parent = y;
        if y.is_nil() {
            // Tree was emptied by deletes; the new node becomes the root.
            self.root = z;
        } else if self.key_of(y) > self.key_of(z) {
            self.node_mut(y).left = z;
        } else {
            self.node_mut(y).right = z;
        }

        self.len += 1;
        self.insert_fixup(z);
        z
    }

    /// Delete `node` from the tree and return its key. The slot is recycled
    /// for future inserts.
    ///
    /// # Panics
    ///
    /// Panics if `node` is not a live handle of this tree. A stale handle
    /// (already deleted) or an out-of-range one is always caught; a handle
    /// minted by a *different* tree that happens to index a live slot here
    /// cannot be detected and corrupts the tree it is used on.
    pub fn delete(&mut self, node: NodeRef) -> K {
        self.check_live(node, "delete");

        let mut removed_color = self.node(node).color;
        let left = self.node(node).left;
        let right = self.node(node).right;
        let x;

        if left.is_nil() {
            x = right;
            self.transplant(node, right);
        } else if right.is_nil() {
            x = left;
            self.transplant(node, left);
        } else {
            // Two real children: splice out the successor y (minimum of the
            // right subtree) and re-seat it in node's position with node's
            // color, so the removed color is y's original one.
            let y = self.subtree_min(right);
            removed_color = self.node(y).color;
            x = self.node(y).right;
            if self.node(y).parent == node {
                // Adjacent successor: x keeps y as parent even when x is the
                // sentinel, so the fixup can find its way back up.
                self.node_mut(x).parent = y;
            } else {
                self.transplant(y, x);
                self.node_mut(y).right = right;
                self.node_mut(right).parent = y;
            }
            self.transplant(node, y);
            self.node_mut(y).left = left;
            self.node_mut(left).parent = y;
            let color = self.node(node).color;
            self.node_mut(y).color = color;
        }

        // Unlinking a red node never disturbs black heights.
        if removed_color == Color::Black {
            self.delete_fixup(x);
        }

        self.len -= 1;
        self.release(node)
    }

    /// In-order iterator over the keys: the sorted sequence.
    pub fn iter(&self) -> Iter<'_, K> {
        Iter::new(self)
    }

    /// Pre-order iterator over the keys (self, left, right).
    pub fn iter_pre_order(&self) -> PreOrderIter<'_, K> {
        PreOrderIter::new(self)
    }

    /// Post-order iterator over the keys (left, right, self).
    pub fn iter_post_order(&self) -> PostOrderIter<'_, K> {
        PostOrderIter::new(self)
    }

    /// All keys in pre-order, cloned into a `Vec`.
    pub fn to_pre_order_list(&self) -> Vec<K>
    where
        K: Clone,
    {
        self.iter_pre_order().cloned().collect()
    }

    /// All keys in in-order, cloned into a `Vec`. Always sorted.
    pub fn to_in_order_list(&self) -> Vec<K>
    where
        K: Clone,
    {
        self.iter().cloned().collect()
    }

    /// All keys in post-order, cloned into a `Vec`.
    pub fn to_post_order_list(&self) -> Vec<K>
    where
        K: Clone,
    {
        self.iter_post_order().cloned().collect()
    }

    /// The key held by `node`.
    ///
    /// # Panics
    ///
    /// Panics if `node` is not a live handle of this tree.
    pub fn key(&self, node: NodeRef) -> &K {
        self.check_live(node, "key");
        self.key_of(node)
    }

    /// The color of `node`.
    ///
    /// # Panics
    ///
    /// Panics if `node` is not a live handle of this tree.
    pub fn color(&self, node: NodeRef) -> Color {
        self.check_live(node, "color");
        self.node(node).color
    }

    /// The left child of `node`, or `None` when that slot is the sentinel.
    ///
    /// # Panics
    ///
    /// Panics if `node` is not a live handle of this tree.
    pub fn left(&self, node: NodeRef) -> Option<NodeRef> {
        self.check_live(node, "left");
        let left = self.node(node).left;
        if left.is_nil() {
            None
        } else {
            Some(left)
        }
    }

    /// The right child of `node`, or `None` when that slot is the sentinel.
    ///
    /// # Panics
    ///
    /// Panics if `node` is not a live handle of this tree.
    pub fn right(&self, node: NodeRef) -> Option<NodeRef> {
        self.check_live(node, "right");
        let right = self.node(node).right;
        if right.is_nil() {
            None
        } else {
            Some(right)
        }
    }

    /// The parent of `node`, or `None` for the root.
    ///
    /// # Panics
    ///
    /// Panics if `node` is not a live handle of this tree.
    pub fn parent(&self, node: NodeRef) -> Option<NodeRef> {
        self.check_live(node, "parent");
        let parent = self.node(node).parent;
        if parent.is_nil() {
            None
        } else {
            Some(parent)
        }
    }
}

// Internals implementation
impl<K: Ord> RedBlackTree<K> {
    #[inline]
    pub(crate) fn node(&self, node: NodeRef) -> &Node<K> {
        &self.slots[node.index()]
    }

    #[inline]
    pub(crate) fn node_mut(&mut self, node: NodeRef) -> &mut Node<K> {
        &mut self.slots[node.index()]
    }

    /// Key of a node known to be real. The sentinel and vacated slots are
    /// never the target of a key comparison.
    #[inline]
    pub(crate) fn key_of(&self, node: NodeRef) -> &K {
        match self.node(node).key.as_ref() {
            Some(key) => key,
            None => unreachable!("key comparison against the sentinel"),
        }
    }

    /// All-left descent from a real node.
    pub(crate) fn subtree_min(&self, node: NodeRef) -> NodeRef {
        let mut cur = node;
        while !self.node(cur).left.is_nil() {
            cur = self.node(cur).left;
        }
        cur
    }

    /// All-right descent from a real node.
    pub(crate) fn subtree_max(&self, node: NodeRef) -> NodeRef {
        let mut cur = node;
        while !self.node(cur).right.is_nil() {
            cur = self.node(cur).right;
        }
        cur
    }

    /// Fail fast on handles this tree cannot have handed out: the sentinel,
    /// indices past the arena, and slots vacated by `delete`.
    fn check_live(&self, node: NodeRef, op: &str) {
        if node.is_nil() {
            panic!("{op}: the nil sentinel is not a valid node handle");
        }
        if node.index() >= self.slots.len() {
            panic!("{op}: handle {node:?} is out of range for this tree");
        }
        if self.node(node).is_vacant() {
            panic!("{op}: handle {node:?} refers to a deleted node");
        }
    }

    /// Take a slot off the free list, or grow the arena. The new node comes
    /// out red with sentinel links, ready for the insert descent.
    fn alloc(&mut self, key: K) -> NodeRef {
        if let Some(node) = self.free.pop() {
            self.slots[node.index()] = Node::new_red(key);
            return node;
        }
        let Ok(raw) = u32::try_from(self.slots.len()) else {
            panic!("arena capacity exceeded: more than u32::MAX nodes");
        };
        self.slots.push(Node::new_red(key));
        NodeRef(raw)
    }

    /// Vacate a slot after `delete` has unlinked it, returning its key.
    fn release(&mut self, node: NodeRef) -> K {
        let slot = &mut self.slots[node.index()];
        let Some(key) = slot.key.take() else {
            unreachable!("released a slot that was already vacant");
        };
        slot.color = Color::Black;
        slot.parent = NodeRef::NIL;
        slot.left = NodeRef::NIL;
        slot.right = NodeRef::NIL;
        self.free.push(node);
        key
    }
}

#[cfg(test)]
mod tests {
    use rand::prelude::SliceRandom;
    use rand::{thread_rng, Rng};

    use crate::node::Color;
    use crate::tree::RedBlackTree;

    /// The worked example the crate grew out of: root 10 plus a fixed batch
    /// of keys, with one duplicate.
    fn demo_tree() -> RedBlackTree<i32> {
        let mut tree = RedBlackTree::new(10);
        for key in [5, 12, -1, 67, 5, 4, 21, 45, 2, 3, 124, 300] {
            tree.insert(key);
        }
        tree
    }

    #[test]
    fn test_demo_scenario() {
        let mut tree = demo_tree();
        assert_eq!(tree.len(), 13);

        assert_eq!(tree.key(tree.min_node().unwrap()), &-1);
        assert_eq!(tree.key(tree.max_node().unwrap()), &300);
        assert!(tree.search(&-1).is_some());
        assert!(tree.search(&99).is_none());

        let n21 = tree.search(&21).unwrap();
        assert_eq!(tree.key(tree.successor(n21).unwrap()), &45);
        assert_eq!(tree.key(tree.predecessor(n21).unwrap()), &12);

        tree.delete(n21);
        let min = tree.min_node().unwrap();
        tree.delete(min);

        assert_eq!(
            tree.to_in_order_list(),
            vec![2, 3, 4, 5, 5, 10, 12, 45, 67, 124, 300]
        );
    }

    #[test]
    fn test_insert_search_roundtrip() {
        let mut tree = RedBlackTree::new(50);
        for key in 0..50 {
            let handle = tree.insert(key);
            assert_eq!(tree.key(handle), &key);
            let found = tree.search(&key).unwrap();
            assert_eq!(tree.key(found), &key);
        }
        assert_eq!(tree.len(), 51);
    }

    #[test]
    fn test_delete_then_search_not_found() {
        let mut tree = RedBlackTree::new(10);
        for key in [5, 15, 3, 7, 12, 20] {
            tree.insert(key);
        }
        let node = tree.search(&7).unwrap();
        assert_eq!(tree.delete(node), 7);
        assert_eq!(tree.search(&7), None);
        // The rest is still reachable.
        for key in [5, 15, 3, 12, 20, 10] {
            assert!(tree.search(&key).is_some(), "lost key {key}");
        }
    }

    #[test]
    fn test_duplicate_keys_are_distinct_nodes() {
        let mut tree = RedBlackTree::new(5);
        let a = tree.insert(5);
        let b = tree.insert(5);
        assert_ne!(a, b);
        assert_eq!(tree.len(), 3);
        assert_eq!(tree.to_in_order_list(), vec![5, 5, 5]);

        // search lands on whichever duplicate the descent reaches first;
        // it must be one of the three live handles.
        let found = tree.search(&5).unwrap();
        assert_eq!(tree.key(found), &5);

        // Deleting one copy keeps the other two.
        tree.delete(found);
        assert_eq!(tree.to_in_order_list(), vec![5, 5]);
    }

    #[test]
    fn test_successor_walks_sorted_order() {
        let tree = demo_tree();
        let mut keys = Vec::new();
        let mut cur = tree.min_node();
        while let Some(node) = cur {
            keys.push(*tree.key(node));
            cur = tree.successor(node);
        }
        assert_eq!(keys, tree.to_in_order_list());
    }

    #[test]
    fn test_predecessor_is_successor_inverse() {
        let tree = demo_tree();
        let mut cur = tree.min_node();
        while let Some(node) = cur {
            if let Some(next) = tree.successor(node) {
                assert_eq!(tree.predecessor(next), Some(node));
            }
            if let Some(prev) = tree.predecessor(node) {
                assert_eq!(tree.successor(prev), Some(node));
            }
            cur = tree.successor(node);
        }
        // Global boundaries.
        assert_eq!(tree.predecessor(tree.min_node().unwrap()), None);
        assert_eq!(tree.successor(tree.max_node().unwrap()), None);
    }

    #[test]
    fn test_min_max_from_subtree() {
        let tree = demo_tree();
        let root = tree.root().unwrap();
        assert_eq!(tree.min_from(root), tree.min_node());
        assert_eq!(tree.max_from(root), tree.max_node());

        // A leaf is its own subtree min and max.
        let leaf = tree.search(&300).unwrap();
        if tree.left(leaf).is_none() && tree.right(leaf).is_none() {
            assert_eq!(tree.min_from(leaf), Some(leaf));
            assert_eq!(tree.max_from(leaf), Some(leaf));
        }
    }

    #[test]
    fn test_traversals_idempotent() {
        let tree = demo_tree();
        assert_eq!(tree.to_pre_order_list(), tree.to_pre_order_list());
        assert_eq!(tree.to_in_order_list(), tree.to_in_order_list());
        assert_eq!(tree.to_post_order_list(), tree.to_post_order_list());
    }

    #[test]
    fn test_delete_sole_root_then_reinsert() {
        let mut tree = RedBlackTree::new(1);
        let root = tree.root().unwrap();
        assert_eq!(tree.delete(root), 1);

        assert!(tree.is_empty());
        assert_eq!(tree.root(), None);
        assert_eq!(tree.min_node(), None);
        assert_eq!(tree.max_node(), None);
        assert_eq!(tree.search(&1), None);
        assert_eq!(tree.to_in_order_list(), Vec::<i32>::new());

        // The emptied tree accepts inserts again, and the new root is black.
        tree.insert(2);
        tree.insert(1);
        tree.insert(3);
        assert_eq!(tree.color(tree.root().unwrap()), Color::Black);
        assert_eq!(tree.to_in_order_list(), vec![1, 2, 3]);
    }

    #[test]
    fn test_slots_are_recycled() {
        let mut tree = RedBlackTree::new(0u32);
        for key in 1..=8 {
            tree.insert(key);
        }
        let before = tree.slots.len();
        let node = tree.search(&4).unwrap();
        tree.delete(node);
        tree.insert(100);
        assert_eq!(tree.slots.len(), before);
    }

    #[test]
    #[should_panic(expected = "deleted node")]
    fn test_stale_handle_panics() {
        let mut tree = RedBlackTree::new(1);
        tree.insert(2);
        let node = tree.search(&2).unwrap();
        tree.delete(node);
        // Second use of the handle must fail loudly, not corrupt the tree.
        tree.delete(node);
    }

    #[test]
    #[should_panic(expected = "out of range")]
    fn test_out_of_range_handle_panics() {
        let tree = RedBlackTree::new(1);
        let mut other = RedBlackTree::new(1);
        for key in 2..50 {
            other.insert(key);
        }
        let foreign = other.search(&42).unwrap();
        let _ = tree.key(foreign);
    }

    #[test]
    fn test_root_is_always_black() {
        let mut tree = RedBlackTree::new(0);
        for key in 1..200 {
            tree.insert(key);
            assert_eq!(tree.color(tree.root().unwrap()), Color::Black);
        }
        for key in (0..200).rev() {
            let node = tree.search(&key).unwrap();
            tree.delete(node);
            if let Some(root) = tree.root() {
                assert_eq!(tree.color(root), Color::Black);
            }
        }
        assert!(tree.is_empty());
    }

    #[test]
    fn test_in_order_matches_sorted_oracle_random() {
        let mut rng = thread_rng();
        let mut tree = RedBlackTree::new(500i64);
        let mut oracle = vec![500i64];

        for _ in 0..2_000 {
            let key = rng.gen_range(0..1_000);
            tree.insert(key);
            oracle.push(key);
        }
        oracle.sort();
        assert_eq!(tree.to_in_order_list(), oracle);

        // Delete half of them, by key, in random order.
        let mut victims = oracle.clone();
        victims.shuffle(&mut rng);
        victims.truncate(oracle.len() / 2);
        for key in victims {
            let node = tree.search(&key).expect("oracle key missing from tree");
            assert_eq!(tree.delete(node), key);
            let pos = oracle.binary_search(&key).unwrap();
            oracle.remove(pos);
        }
        assert_eq!(tree.to_in_order_list(), oracle);
    }

    #[test]
    fn test_ascending_and_descending_fills() {
        // Both fills are rotation-heavy worst cases for a naive BST.
        let mut up = RedBlackTree::new(0);
        for key in 1..1_000 {
            up.insert(key);
        }
        assert_eq!(up.to_in_order_list(), (0..1_000).collect::<Vec<_>>());

        let mut down = RedBlackTree::new(999);
        for key in (0..999).rev() {
            down.insert(key);
        }
        assert_eq!(down.to_in_order_list(), (0..1_000).collect::<Vec<_>>());
    }

    #[test]
    fn test_string_keys() {
        let mut tree = RedBlackTree::new("melon".to_string());
        for key in ["apple", "banana", "cherry", "fig", "apricot"] {
            tree.insert(key.to_string());
        }
        assert_eq!(
            tree.to_in_order_list(),
            vec!["apple", "apricot", "banana", "cherry", "fig", "melon"]
        );
        assert_eq!(tree.key(tree.min_node().unwrap()), "apple");
        assert_eq!(tree.key(tree.max_node().unwrap()), "melon");
    }
}
