//! An arena-indexed red-black tree: an ordered map with worst-case O(log n)
//! insert, delete and search.
//!
//! Nodes live in a contiguous arena and reference each other through
//! [`NodeRef`] handles (plain `u32` indices), so rotations and transplants
//! are index reassignments with no pointer juggling and no `unsafe`. A
//! reserved black sentinel slot stands in for every absent child and parent.
//!
//! ```rust
//! use redblack::RedBlackTree;
//!
//! let mut tree = RedBlackTree::new(10);
//! for key in [5, 12, -1, 67] {
//!     tree.insert(key);
//! }
//!
//! // In-order traversal is the sorted key sequence.
//! assert_eq!(tree.to_in_order_list(), vec![-1, 5, 10, 12, 67]);
//!
//! // Handles identify nodes; equal keys stay distinct nodes.
//! let node = tree.search(&12).unwrap();
//! assert_eq!(tree.key(tree.successor(node).unwrap()), &67);
//! assert_eq!(tree.delete(node), 12);
//! ```

mod balance;
pub mod iter;
mod node;
pub mod print;
pub mod stats;
pub mod tree;

pub use node::{Color, NodeRef};
pub use stats::{TreeStats, TreeStatsTrait};
pub use tree::RedBlackTree;
