//! AVL-balanced ordered map.
//!
//! [`OrderedTree`] stores unique keys with associated values and keeps the
//! heights of every node's two subtrees within one of each other. Insertion
//! and removal restore that bound with single or double rotations on the way
//! back up from the modified leaf.
//!
//! # Examples
//!
//! ```rust
//! use ordered_tree::tree::{OrderedTree, Traversal};
//!
//! let mut tree = OrderedTree::new();
//! for key in [10, 20, 30] {
//!     tree.insert(key, key.to_string());
//! }
//!
//! // Ascending inserts triggered a left rotation.
//! assert_eq!(tree.root_key(), Some(&20));
//!
//! let mut order = Vec::new();
//! tree.traverse(Traversal::PreOrder, |key, _| order.push(*key));
//! assert_eq!(order, vec![20, 10, 30]);
//! ```

mod insert;
mod iter;
mod node;
mod ordered_tree;
mod remove;
mod rotation;
mod validate;

pub use iter::{IntoIter, Iter, IterMut, Keys, PostOrder, PreOrder, Traversal, Values, ValuesMut};
pub use ordered_tree::OrderedTree;
