/// The two node colors of a red-black tree.
///
/// Every real node is either `Red` or `Black`; the shared sentinel slot is
/// permanently `Black`. The coloring, together with the black-height rule,
/// is what bounds the tree height to O(log n).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Color {
    Red,
    Black,
}

/// A handle to a node slot inside a [`RedBlackTree`](crate::RedBlackTree) arena.
///
/// Handles are plain `u32` indices into the tree's slot vector, so links
/// between nodes are index reassignments rather than pointer juggling.
/// Handle equality is *identity* equality: two nodes holding equal keys are
/// still distinct handles.
///
/// A handle is only meaningful for the tree that minted it. Passing a handle
/// to a different tree, or using one after the node was deleted, is a
/// contract violation; the tree panics on the cases it can detect.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct NodeRef(pub(crate) u32);

impl NodeRef {
    /// The reserved sentinel slot. Fills every "no child" / "no parent" link.
    pub(crate) const NIL: NodeRef = NodeRef(0);

    #[inline]
    pub(crate) fn is_nil(&self) -> bool {
        self.0 == 0
    }

    #[inline]
    pub(crate) fn index(&self) -> usize {
        self.0 as usize
    }
}

/// One arena slot. `key` is `None` only for the sentinel and for vacated
/// slots waiting on the free list; every live node holds `Some(key)`.
pub(crate) struct Node<K> {
    pub(crate) key: Option<K>,
    pub(crate) color: Color,
    pub(crate) parent: NodeRef,
    pub(crate) left: NodeRef,
    pub(crate) right: NodeRef,
}

impl<K> Node<K> {
    /// A freshly inserted node: red, with all links pointing at the sentinel.
    /// The caller wires it into place and then runs the insert fixup.
    #[inline]
    pub(crate) fn new_red(key: K) -> Self {
        Self {
            key: Some(key),
            color: Color::Red,
            parent: NodeRef::NIL,
            left: NodeRef::NIL,
            right: NodeRef::NIL,
        }
    }

    /// The sentinel slot: black forever, no key. Constructed exactly once
    /// per tree, at index 0.
    #[inline]
    pub(crate) fn sentinel() -> Self {
        Self {
            key: None,
            color: Color::Black,
            parent: NodeRef::NIL,
            left: NodeRef::NIL,
            right: NodeRef::NIL,
        }
    }

    #[inline]
    pub(crate) fn is_vacant(&self) -> bool {
        self.key.is_none()
    }
}
