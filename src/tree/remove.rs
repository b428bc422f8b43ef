//! Recursive removal by successor promotion.

use std::borrow::Borrow;
use std::cmp::Ordering;
use std::mem;

use super::node::{Link, Node};
use super::rotation::rebalance_after_remove;

/// Removes `key` from the subtree under `link`.
///
/// Returns the new subtree root together with the removed value. A missing
/// key is not an error: the subtree comes back unchanged with `None`.
///
/// A node with two children keeps its allocation: the in-order successor is
/// detached from the right subtree and its key and value are moved into the
/// node, whose old value is handed back to the caller.
pub(crate) fn remove_from<K, V, Q>(
    link: Link<K, V>,
    key: &Q,
    length: &mut usize,
) -> (Link<K, V>, Option<V>)
where
    K: Borrow<Q>,
    Q: Ord + ?Sized,
{
    let Some(mut node) = link else {
        return (None, None);
    };

    let removed = match key.cmp(node.key.borrow()) {
        Ordering::Less => {
            let (left, removed) = remove_from(node.left.take(), key, length);
            node.left = left;
            removed
        }
        Ordering::Greater => {
            let (right, removed) = remove_from(node.right.take(), key, length);
            node.right = right;
            removed
        }
        Ordering::Equal => {
            *length -= 1;
            match (node.left.take(), node.right.take()) {
                (None, None) => {
                    let node = *node;
                    return (None, Some(node.value));
                }
                (Some(child), None) | (None, Some(child)) => {
                    let node = *node;
                    return (Some(child), Some(node.value));
                }
                (Some(left), Some(right)) => {
                    let (right, successor) = detach_min(right);
                    let successor = *successor;
                    node.left = Some(left);
                    node.right = right;
                    node.key = successor.key;
                    Some(mem::replace(&mut node.value, successor.value))
                }
            }
        }
    };

    (Some(rebalance_after_remove(node)), removed)
}

/// Unlinks the leftmost node of the subtree rooted at `node`.
///
/// Returns the remaining subtree, rebalanced along the descent path, and the
/// detached node.
fn detach_min<K, V>(mut node: Box<Node<K, V>>) -> (Link<K, V>, Box<Node<K, V>>) {
    match node.left.take() {
        None => {
            let right = node.right.take();
            (right, node)
        }
        Some(left) => {
            let (left, minimum) = detach_min(left);
            node.left = left;
            (Some(rebalance_after_remove(node)), minimum)
        }
    }
}
