//! Recursive insertion with rebalancing on the way back up.

use super::node::{Link, Node, Side};
use super::rotation::rebalance_after_insert;

/// Inserts `key`/`value` below `link` and returns the new subtree root.
///
/// The second element is the side the key took at the returned root's level,
/// or `None` when the key landed in (or already occupied) that very node. The
/// parent reads it to tell an outer (LL/RR) from an inner (LR/RL) imbalance.
///
/// `length` is incremented only when a fresh leaf is created. An equal key
/// leaves the existing entry untouched and the offered value is dropped.
pub(crate) fn insert_into<K: Ord, V>(
    link: Link<K, V>,
    key: K,
    value: V,
    length: &mut usize,
) -> (Box<Node<K, V>>, Option<Side>) {
    let Some(mut node) = link else {
        *length += 1;
        return (Box::new(Node::leaf(key, value)), None);
    };

    let Some(side) = Side::of(key.cmp(&node.key)) else {
        return (node, None);
    };

    let grandchild_side = match side {
        Side::Left => {
            let (child, below) = insert_into(node.left.take(), key, value, length);
            node.left = Some(child);
            below
        }
        Side::Right => {
            let (child, below) = insert_into(node.right.take(), key, value, length);
            node.right = Some(child);
            below
        }
    };

    (rebalance_after_insert(node, grandchild_side), Some(side))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tree::node::height_of;
    use rstest::rstest;

    fn build(keys: &[i32]) -> (Link<i32, i32>, usize) {
        let mut root = None;
        let mut length = 0;
        for &key in keys {
            let (new_root, _) = insert_into(root.take(), key, key, &mut length);
            root = Some(new_root);
        }
        (root, length)
    }

    #[rstest]
    fn test_insert_into_empty_creates_leaf() {
        let mut length = 0;
        let (root, side) = insert_into(None, 5, "five", &mut length);

        assert_eq!(root.key, 5);
        assert_eq!(root.height, 1);
        assert_eq!(side, None);
        assert_eq!(length, 1);
    }

    #[rstest]
    fn test_insert_reports_descent_side() {
        let mut length = 0;
        let (root, _) = insert_into(None, 5, (), &mut length);
        let (root, side) = insert_into(Some(root), 3, (), &mut length);
        assert_eq!(side, Some(Side::Left));

        let (_, side) = insert_into(Some(root), 8, (), &mut length);
        assert_eq!(side, Some(Side::Right));
    }

    #[rstest]
    fn test_insert_duplicate_keeps_original_value() {
        let mut length = 0;
        let (root, _) = insert_into(None, 1, "first", &mut length);
        let (root, side) = insert_into(Some(root), 1, "second", &mut length);

        assert_eq!(root.value, "first");
        assert_eq!(side, None);
        assert_eq!(length, 1);
    }

    #[rstest]
    #[case(&[10, 20, 30], 20)]
    #[case(&[30, 20, 10], 20)]
    #[case(&[30, 10, 20], 20)]
    #[case(&[10, 30, 20], 20)]
    #[case(&[1, 2, 3, 4, 5, 6, 7], 4)]
    fn test_insert_rotates_to_expected_root(#[case] keys: &[i32], #[case] expected_root: i32) {
        let (root, length) = build(keys);
        assert_eq!(root.as_ref().map(|node| node.key), Some(expected_root));
        assert_eq!(length, keys.len());
    }

    #[rstest]
    fn test_insert_ascending_run_is_perfect() {
        let (root, _) = build(&[1, 2, 3, 4, 5, 6, 7]);
        assert_eq!(height_of(&root), 3);
    }
}
