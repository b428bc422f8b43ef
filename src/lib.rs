//! # ordered-tree
//!
//! A self-balancing ordered map for Rust built on an AVL tree.
//!
//! ## Overview
//!
//! [`OrderedTree`] keeps unique keys in sorted order and guarantees that the
//! heights of any node's two subtrees differ by at most one. Every keyed
//! operation therefore runs in O(log N) even for adversarial insertion
//! orders such as already-sorted input.
//!
//! - **Mutation**: `insert`, `remove`, `replace`, `clear`
//! - **Queries**: `search`, `get`, `contains`, `get_min`, `get_max`,
//!   `get_root`, `successor`, `predecessor`
//! - **Traversal**: in-order, pre-order and post-order iterators, plus a
//!   visitor-style `traverse`
//! - **Bulk**: `from_sequence`, `to_sequence`, `FromIterator`, `Extend`
//!
//! ## Feature Flags
//!
//! - `serde`: `Serialize`/`Deserialize` as a map in key order
//! - `invariant-checks`: re-verify the whole tree after every mutation in
//!   debug builds
//! - `full`: Enable all features
//!
//! ## Example
//!
//! ```rust
//! use ordered_tree::prelude::*;
//!
//! let mut tree = OrderedTree::new();
//! for key in 1..=7 {
//!     tree.insert(key, key * key);
//! }
//!
//! assert_eq!(tree.root_key(), Some(&4));
//! assert_eq!(tree.height(), 3);
//! assert_eq!(tree.search(&6), Ok(&36));
//! assert_eq!(tree.search(&8), Err(TreeError::KeyNotFound));
//!
//! tree.remove(&4);
//! let keys: Vec<i32> = tree.keys().copied().collect();
//! assert_eq!(keys, vec![1, 2, 3, 5, 6, 7]);
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]

/// Prelude module for convenient imports.
///
/// # Usage
///
/// ```rust
/// use ordered_tree::prelude::*;
/// ```
pub mod prelude {
    pub use crate::error::TreeError;
    pub use crate::tree::{OrderedTree, Traversal};
}

pub mod error;
pub mod tree;

pub use error::TreeError;
pub use tree::{OrderedTree, Traversal};
