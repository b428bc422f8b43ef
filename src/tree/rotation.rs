//! Rotation primitives and the two rebalancing rules built on them.
//!
//! Rotations only move owned child links around; they never compare keys.
//! Both rebalancing rules recompute the node's height first and then apply at
//! most one single or double rotation.

use super::node::{Node, Side, balance_of, node_balance, update_height};

/// Rotates the subtree rooted at `node` to the left and returns the new root.
///
/// The right child becomes the root and `node` becomes its left child. If
/// `node` has no right child there is nothing to rotate and it is returned
/// unchanged.
pub(crate) fn rotate_left<K, V>(mut node: Box<Node<K, V>>) -> Box<Node<K, V>> {
    let Some(mut pivot) = node.right.take() else {
        return node;
    };
    node.right = pivot.left.take();
    update_height(&mut node);
    pivot.left = Some(node);
    update_height(&mut pivot);
    pivot
}

/// Rotates the subtree rooted at `node` to the right and returns the new root.
///
/// Mirror image of [`rotate_left`].
pub(crate) fn rotate_right<K, V>(mut node: Box<Node<K, V>>) -> Box<Node<K, V>> {
    let Some(mut pivot) = node.left.take() else {
        return node;
    };
    node.left = pivot.right.take();
    update_height(&mut node);
    pivot.right = Some(node);
    update_height(&mut pivot);
    pivot
}

/// Restores balance at `node` after an insertion passed through it.
///
/// `grandchild_side` is the side the inserted key took below the child that
/// grew, which is exactly how the key compares with that child's key. It
/// picks between the single and double rotation:
///
/// - left heavy, key went left of the left child: right rotation (LL)
/// - left heavy, key went right of the left child: left-right (LR)
/// - right heavy, key went right of the right child: left rotation (RR)
/// - right heavy, key went left of the right child: right-left (RL)
pub(crate) fn rebalance_after_insert<K, V>(
    mut node: Box<Node<K, V>>,
    grandchild_side: Option<Side>,
) -> Box<Node<K, V>> {
    update_height(&mut node);
    let balance = node_balance(&node);

    if balance > 1 {
        if grandchild_side == Some(Side::Right) {
            node.left = node.left.take().map(rotate_left);
        }
        return rotate_right(node);
    }

    if balance < -1 {
        if grandchild_side == Some(Side::Left) {
            node.right = node.right.take().map(rotate_right);
        }
        return rotate_left(node);
    }

    node
}

/// Restores balance at `node` after a removal passed through it.
///
/// The removed key is gone, so the case is chosen from the balance of the
/// taller child instead. A child balance of 0 can only happen here and is
/// handled by the single rotation.
pub(crate) fn rebalance_after_remove<K, V>(mut node: Box<Node<K, V>>) -> Box<Node<K, V>> {
    update_height(&mut node);
    let balance = node_balance(&node);

    if balance > 1 {
        if balance_of(&node.left) < 0 {
            node.left = node.left.take().map(rotate_left);
        }
        return rotate_right(node);
    }

    if balance < -1 {
        if balance_of(&node.right) > 0 {
            node.right = node.right.take().map(rotate_right);
        }
        return rotate_left(node);
    }

    node
}
