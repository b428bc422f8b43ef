//! Error types for [`OrderedTree`](crate::tree::OrderedTree) lookups.
//!
//! Only queries that promise to hand back a value can fail. Mutators never
//! do: inserting a duplicate key and removing a missing key are both
//! defined as no-ops.

/// Represents errors returned by the value-producing queries of an
/// [`OrderedTree`](crate::tree::OrderedTree).
///
/// # Examples
///
/// ```rust
/// use ordered_tree::{OrderedTree, TreeError};
///
/// let tree: OrderedTree<i32, &str> = [(1, "one"), (3, "three")].into_iter().collect();
/// assert_eq!(tree.search(&2), Err(TreeError::KeyNotFound));
///
/// let empty: OrderedTree<i32, &str> = OrderedTree::new();
/// assert_eq!(empty.get_min(), Err(TreeError::EmptyTree));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TreeError {
    /// The requested key is not present in the tree.
    ///
    /// Returned by `search`, `search_mut` and `replace`.
    KeyNotFound,
    /// The tree holds no entries.
    ///
    /// Returned by `get_min`, `get_max` and `get_root`.
    EmptyTree,
}

impl std::fmt::Display for TreeError {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::KeyNotFound => write!(formatter, "key not found"),
            Self::EmptyTree => write!(formatter, "tree is empty"),
        }
    }
}

impl std::error::Error for TreeError {}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(TreeError::KeyNotFound, "key not found")]
    #[case(TreeError::EmptyTree, "tree is empty")]
    fn test_tree_error_display(#[case] error: TreeError, #[case] expected: &str) {
        assert_eq!(format!("{error}"), expected);
    }

    #[rstest]
    fn test_tree_error_equality() {
        assert_eq!(TreeError::KeyNotFound, TreeError::KeyNotFound);
        assert_ne!(TreeError::KeyNotFound, TreeError::EmptyTree);
    }

    #[rstest]
    fn test_tree_error_is_std_error() {
        fn assert_error<E: std::error::Error + Send + Sync + 'static>(_: &E) {}
        assert_error(&TreeError::EmptyTree);

        let boxed: Box<dyn std::error::Error> = Box::new(TreeError::KeyNotFound);
        assert_eq!(boxed.to_string(), "key not found");
    }

    #[rstest]
    fn test_tree_error_propagates_with_question_mark() {
        fn lookup(found: bool) -> Result<i32, TreeError> {
            let value: Result<i32, TreeError> = if found {
                Ok(7)
            } else {
                Err(TreeError::KeyNotFound)
            };
            Ok(value? * 2)
        }

        assert_eq!(lookup(true), Ok(14));
        assert_eq!(lookup(false), Err(TreeError::KeyNotFound));
    }
}
