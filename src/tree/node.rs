//! Node storage and height bookkeeping.
//!
//! Every node owns its two children outright. The cached `height` follows the
//! convention that an absent link has height 0 and a leaf has height 1.

use std::cmp::Ordering;

/// An owned, possibly absent, child link.
pub(crate) type Link<K, V> = Option<Box<Node<K, V>>>;

/// Internal node structure for the AVL tree.
#[derive(Clone)]
pub(crate) struct Node<K, V> {
    pub(crate) key: K,
    pub(crate) value: V,
    pub(crate) height: usize,
    pub(crate) left: Link<K, V>,
    pub(crate) right: Link<K, V>,
}

impl<K, V> Node<K, V> {
    /// Creates a new leaf.
    pub(crate) const fn leaf(key: K, value: V) -> Self {
        Self {
            key,
            value,
            height: 1,
            left: None,
            right: None,
        }
    }
}

/// Which child of a node a descent went into.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub(crate) enum Side {
    Left,
    Right,
}

impl Side {
    /// Maps a `key.cmp(node.key)` result to the side to descend into.
    ///
    /// Returns `None` for `Equal`: the key lives in the node itself.
    pub(crate) const fn of(ordering: Ordering) -> Option<Self> {
        match ordering {
            Ordering::Less => Some(Self::Left),
            Ordering::Greater => Some(Self::Right),
            Ordering::Equal => None,
        }
    }
}

/// Height of a link; 0 when absent.
#[inline]
pub(crate) fn height_of<K, V>(link: &Link<K, V>) -> usize {
    link.as_ref().map_or(0, |node| node.height)
}

/// Recomputes the cached height of `node` from its children.
#[inline]
pub(crate) fn update_height<K, V>(node: &mut Node<K, V>) {
    node.height = 1 + height_of(&node.left).max(height_of(&node.right));
}

/// `height(left) - height(right)`, or 0 for an absent link.
#[inline]
pub(crate) fn balance_of<K, V>(link: &Link<K, V>) -> isize {
    link.as_deref().map_or(0, node_balance)
}

/// Balance factor of a present node.
#[inline]
#[allow(clippy::cast_possible_wrap)]
pub(crate) fn node_balance<K, V>(node: &Node<K, V>) -> isize {
    height_of(&node.left) as isize - height_of(&node.right) as isize
}
