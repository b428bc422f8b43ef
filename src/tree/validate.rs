//! Whole-tree consistency checker.
//!
//! A failed check always means a bug in the tree itself, never bad input, so
//! [`Violation`] stays crate-private. The public surface is
//! [`OrderedTree::is_valid`](super::OrderedTree::is_valid) plus the
//! `invariant-checks` feature, which runs [`check`] after every mutation in
//! debug builds.

use std::fmt;

use super::node::Link;

/// A broken structural invariant.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) enum Violation {
    /// A node's subtree heights differ by more than one.
    Unbalanced { balance: isize },
    /// A node's cached height disagrees with its children.
    StaleHeight { cached: usize, actual: usize },
    /// A key falls outside the range its ancestors allow.
    OutOfOrder,
    /// The recorded length disagrees with the number of nodes.
    LengthMismatch { recorded: usize, counted: usize },
}

impl fmt::Display for Violation {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unbalanced { balance } => {
                write!(formatter, "node has balance factor {balance}")
            }
            Self::StaleHeight { cached, actual } => {
                write!(formatter, "node caches height {cached} but has height {actual}")
            }
            Self::OutOfOrder => write!(formatter, "keys are not in strictly ascending order"),
            Self::LengthMismatch { recorded, counted } => {
                write!(formatter, "tree records {recorded} entries but holds {counted}")
            }
        }
    }
}

/// Verifies ordering, cached heights, balance factors and the entry count.
pub(crate) fn check<K: Ord, V>(root: &Link<K, V>, recorded: usize) -> Result<(), Violation> {
    let mut counted = 0;
    check_subtree(root, None, None, &mut counted)?;
    if counted == recorded {
        Ok(())
    } else {
        Err(Violation::LengthMismatch { recorded, counted })
    }
}

/// Checks the subtree under `link`, whose keys must lie strictly between
/// `lower` and `upper`. Returns the recomputed height.
#[allow(clippy::cast_possible_wrap)]
fn check_subtree<K: Ord, V>(
    link: &Link<K, V>,
    lower: Option<&K>,
    upper: Option<&K>,
    counted: &mut usize,
) -> Result<usize, Violation> {
    let Some(node) = link else {
        return Ok(0);
    };

    let below_lower = lower.is_some_and(|bound| node.key <= *bound);
    let above_upper = upper.is_some_and(|bound| node.key >= *bound);
    if below_lower || above_upper {
        return Err(Violation::OutOfOrder);
    }

    let left = check_subtree(&node.left, lower, Some(&node.key), counted)?;
    let right = check_subtree(&node.right, Some(&node.key), upper, counted)?;
    *counted += 1;

    let actual = 1 + left.max(right);
    if node.height != actual {
        return Err(Violation::StaleHeight {
            cached: node.height,
            actual,
        });
    }

    let balance = left as isize - right as isize;
    if balance.abs() > 1 {
        return Err(Violation::Unbalanced { balance });
    }

    Ok(actual)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tree::node::{Node, update_height};
    use rstest::rstest;

    fn leaf(key: i32) -> Box<Node<i32, ()>> {
        Box::new(Node::leaf(key, ()))
    }

    fn join(key: i32, left: Link<i32, ()>, right: Link<i32, ()>) -> Box<Node<i32, ()>> {
        let mut node = leaf(key);
        node.left = left;
        node.right = right;
        update_height(&mut node);
        node
    }

    #[rstest]
    fn test_empty_tree_is_valid() {
        assert_eq!(check::<i32, ()>(&None, 0), Ok(()));
    }

    #[rstest]
    fn test_balanced_tree_is_valid() {
        let root = Some(join(2, Some(leaf(1)), Some(leaf(3))));
        assert_eq!(check(&root, 3), Ok(()));
    }

    #[rstest]
    fn test_detects_unbalanced_chain() {
        let root = Some(join(1, None, Some(join(2, None, Some(leaf(3))))));
        assert_eq!(check(&root, 3), Err(Violation::Unbalanced { balance: -2 }));
    }

    #[rstest]
    fn test_detects_out_of_order_grandchild() {
        // 4 sits in the left subtree of 3.
        let root = Some(join(3, Some(join(1, None, Some(leaf(4)))), Some(leaf(5))));
        assert_eq!(check(&root, 4), Err(Violation::OutOfOrder));
    }

    #[rstest]
    fn test_detects_duplicate_key() {
        let root = Some(join(2, Some(leaf(2)), None));
        assert_eq!(check(&root, 2), Err(Violation::OutOfOrder));
    }

    #[rstest]
    fn test_detects_stale_height() {
        let mut root = join(2, Some(leaf(1)), Some(leaf(3)));
        root.height = 5;
        assert_eq!(
            check(&Some(root), 3),
            Err(Violation::StaleHeight {
                cached: 5,
                actual: 2
            })
        );
    }

    #[rstest]
    fn test_detects_length_mismatch() {
        let root = Some(join(2, Some(leaf(1)), None));
        assert_eq!(
            check(&root, 3),
            Err(Violation::LengthMismatch {
                recorded: 3,
                counted: 2
            })
        );
    }

    #[rstest]
    fn test_violation_display() {
        let violation = Violation::Unbalanced { balance: 2 };
        assert_eq!(format!("{violation}"), "node has balance factor 2");
        assert_eq!(
            format!("{}", Violation::OutOfOrder),
            "keys are not in strictly ascending order"
        );
    }
}
