//! The public [`OrderedTree`] type.

use std::borrow::Borrow;
use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::iter::FromIterator;
use std::mem;
use std::ops::Index;

use super::insert::insert_into;
use super::iter::{
    IntoIter, Iter, IterMut, Keys, PostOrder, PreOrder, Traversal, Values, ValuesMut, traverse,
};
use super::node::{Link, Node};
use super::remove::remove_from;
use super::validate;
use crate::error::TreeError;

// =============================================================================
// OrderedTree Definition
// =============================================================================

/// An ordered key-value map backed by an AVL tree.
///
/// After every public mutation the heights of the two subtrees of any node
/// differ by at most one, so the tree height stays below
/// `1.44 * log2(n + 2)` and every keyed operation is O(log N).
///
/// Keys are unique. Inserting a key that is already present leaves the
/// stored entry untouched; use [`replace`](Self::replace) or
/// [`get_mut`](Self::get_mut) to change a value in place.
///
/// # Time Complexity
///
/// | Operation                  | Complexity |
/// |----------------------------|------------|
/// | `insert`                   | O(log N)   |
/// | `remove`                   | O(log N)   |
/// | `search` / `get`           | O(log N)   |
/// | `get_min` / `get_max`      | O(log N)   |
/// | `successor` / `predecessor`| O(log N)   |
/// | `len` / `height`           | O(1)       |
/// | iterator step              | O(1) amortized |
///
/// # Examples
///
/// ```rust
/// use ordered_tree::OrderedTree;
///
/// let mut tree = OrderedTree::new();
/// for key in 1..=7 {
///     tree.insert(key, key * 10);
/// }
///
/// assert_eq!(tree.len(), 7);
/// assert_eq!(tree.height(), 3);
/// assert_eq!(tree.root_key(), Some(&4));
/// assert_eq!(tree.search(&5), Ok(&50));
/// ```
#[derive(Clone)]
pub struct OrderedTree<K, V> {
    /// Root node of the tree
    root: Link<K, V>,
    /// Number of entries
    length: usize,
}

impl<K, V> OrderedTree<K, V> {
    /// Creates a new empty tree.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use ordered_tree::OrderedTree;
    ///
    /// let tree: OrderedTree<i32, String> = OrderedTree::new();
    /// assert!(tree.is_empty());
    /// ```
    #[inline]
    #[must_use]
    pub const fn new() -> Self {
        Self {
            root: None,
            length: 0,
        }
    }

    /// Returns the number of entries in the tree.
    #[inline]
    #[must_use]
    pub const fn len(&self) -> usize {
        self.length
    }

    /// Returns `true` if the tree contains no entries.
    #[inline]
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.length == 0
    }

    /// Returns the height of the tree: 0 when empty, 1 for a single entry.
    ///
    /// Read from the root's cached height, so this is O(1).
    #[inline]
    #[must_use]
    pub fn height(&self) -> usize {
        super::node::height_of(&self.root)
    }

    /// Removes every entry.
    ///
    /// Nodes are released in post-order: both subtrees before their parent.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use ordered_tree::OrderedTree;
    ///
    /// let mut tree: OrderedTree<i32, i32> = (0..10).map(|key| (key, key)).collect();
    /// tree.clear();
    /// assert!(tree.is_empty());
    /// assert_eq!(tree.height(), 0);
    /// ```
    pub fn clear(&mut self) {
        release_post_order(self.root.take());
        self.length = 0;
    }

    /// Returns the value stored at the root node.
    ///
    /// # Errors
    ///
    /// Returns [`TreeError::EmptyTree`] if the tree has no entries.
    pub fn get_root(&self) -> Result<&V, TreeError> {
        self.root
            .as_deref()
            .map(|node| &node.value)
            .ok_or(TreeError::EmptyTree)
    }

    /// Returns the key stored at the root node, if any.
    ///
    /// The root changes as rotations happen, which makes this handy for
    /// observing how the tree rebalanced.
    #[must_use]
    pub fn root_key(&self) -> Option<&K> {
        self.root.as_deref().map(|node| &node.key)
    }

    /// Returns the entry with the smallest key.
    #[must_use]
    pub fn min(&self) -> Option<(&K, &V)> {
        let mut node = self.root.as_deref()?;
        while let Some(left) = node.left.as_deref() {
            node = left;
        }
        Some((&node.key, &node.value))
    }

    /// Returns the entry with the largest key.
    #[must_use]
    pub fn max(&self) -> Option<(&K, &V)> {
        let mut node = self.root.as_deref()?;
        while let Some(right) = node.right.as_deref() {
            node = right;
        }
        Some((&node.key, &node.value))
    }

    /// Returns the value stored under the smallest key.
    ///
    /// # Errors
    ///
    /// Returns [`TreeError::EmptyTree`] if the tree has no entries.
    pub fn get_min(&self) -> Result<&V, TreeError> {
        self.min().map(|(_, value)| value).ok_or(TreeError::EmptyTree)
    }

    /// Returns the value stored under the largest key.
    ///
    /// # Errors
    ///
    /// Returns [`TreeError::EmptyTree`] if the tree has no entries.
    pub fn get_max(&self) -> Result<&V, TreeError> {
        self.max().map(|(_, value)| value).ok_or(TreeError::EmptyTree)
    }

    /// Returns an iterator over entries in ascending key order.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use ordered_tree::OrderedTree;
    ///
    /// let tree: OrderedTree<i32, &str> =
    ///     [(3, "three"), (1, "one"), (2, "two")].into_iter().collect();
    ///
    /// let keys: Vec<&i32> = tree.iter().map(|(key, _)| key).collect();
    /// assert_eq!(keys, vec![&1, &2, &3]);
    /// ```
    #[must_use]
    pub fn iter(&self) -> Iter<'_, K, V> {
        Iter::new(&self.root, self.length)
    }

    /// Returns an iterator over entries in ascending key order with mutable
    /// access to the values.
    #[must_use]
    pub fn iter_mut(&mut self) -> IterMut<'_, K, V> {
        IterMut::new(&mut self.root, self.length)
    }

    /// Returns an in-order iterator: left subtree, node, right subtree.
    ///
    /// Keys come out strictly ascending. Same as [`iter`](Self::iter).
    #[inline]
    #[must_use]
    pub fn in_order(&self) -> Iter<'_, K, V> {
        self.iter()
    }

    /// Returns a pre-order iterator: node, left subtree, right subtree.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use ordered_tree::OrderedTree;
    ///
    /// let tree: OrderedTree<i32, ()> = [(1, ()), (2, ()), (3, ())].into_iter().collect();
    /// let keys: Vec<i32> = tree.pre_order().map(|(key, _)| *key).collect();
    /// assert_eq!(keys, vec![2, 1, 3]);
    /// ```
    #[must_use]
    pub fn pre_order(&self) -> PreOrder<'_, K, V> {
        PreOrder::new(&self.root, self.length)
    }

    /// Returns a post-order iterator: left subtree, right subtree, node.
    #[must_use]
    pub fn post_order(&self) -> PostOrder<'_, K, V> {
        PostOrder::new(&self.root, self.length)
    }

    /// Calls `visit` on every entry in the given traversal order.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use ordered_tree::{OrderedTree, Traversal};
    ///
    /// let tree: OrderedTree<i32, &str> =
    ///     [(2, "b"), (1, "a"), (3, "c")].into_iter().collect();
    ///
    /// let mut rendered = String::new();
    /// tree.traverse(Traversal::PostOrder, |key, value| {
    ///     rendered.push_str(&format!("({key},{value}) "));
    /// });
    /// assert_eq!(rendered, "(1,a) (3,c) (2,b) ");
    /// ```
    pub fn traverse<F>(&self, order: Traversal, mut visit: F)
    where
        F: FnMut(&K, &V),
    {
        traverse(&self.root, order, &mut visit);
    }

    /// Returns an iterator over keys in ascending order.
    #[must_use]
    pub fn keys(&self) -> Keys<'_, K, V> {
        Keys { inner: self.iter() }
    }

    /// Returns an iterator over values in key order.
    #[must_use]
    pub fn values(&self) -> Values<'_, K, V> {
        Values { inner: self.iter() }
    }

    /// Returns an iterator over mutable values in key order.
    #[must_use]
    pub fn values_mut(&mut self) -> ValuesMut<'_, K, V> {
        ValuesMut {
            inner: self.iter_mut(),
        }
    }

    /// Exports all entries in ascending key order.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use ordered_tree::OrderedTree;
    ///
    /// let tree: OrderedTree<i32, char> = [(2, 'b'), (1, 'a')].into_iter().collect();
    /// assert_eq!(tree.to_sequence(), vec![(1, 'a'), (2, 'b')]);
    /// ```
    #[must_use]
    pub fn to_sequence(&self) -> Vec<(K, V)>
    where
        K: Clone,
        V: Clone,
    {
        self.iter()
            .map(|(key, value)| (key.clone(), value.clone()))
            .collect()
    }
}

impl<K: Ord, V> OrderedTree<K, V> {
    /// Builds a tree by inserting every pair in order.
    ///
    /// Later duplicates of a key are ignored. The result is balanced but not
    /// necessarily the shallowest tree for these keys.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use ordered_tree::OrderedTree;
    ///
    /// let tree = OrderedTree::from_sequence(vec![(1, "one"), (1, "uno"), (2, "two")]);
    /// assert_eq!(tree.len(), 2);
    /// assert_eq!(tree.get(&1), Some(&"one"));
    /// ```
    pub fn from_sequence<I>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
    {
        entries.into_iter().collect()
    }

    /// Inserts a key-value pair.
    ///
    /// Returns `true` if the key was new. If the key is already present the
    /// tree is left unchanged (including the stored value) and `false` is
    /// returned.
    ///
    /// # Complexity
    ///
    /// O(log N)
    ///
    /// # Examples
    ///
    /// ```rust
    /// use ordered_tree::OrderedTree;
    ///
    /// let mut tree = OrderedTree::new();
    /// assert!(tree.insert(1, "one"));
    /// assert!(!tree.insert(1, "ONE"));
    /// assert_eq!(tree.get(&1), Some(&"one"));
    /// ```
    pub fn insert(&mut self, key: K, value: V) -> bool {
        let before = self.length;
        let (root, _) = insert_into(self.root.take(), key, value, &mut self.length);
        self.root = Some(root);
        self.assert_invariants();
        self.length != before
    }

    /// Removes a key and returns its value.
    ///
    /// Removing a key that is not present is a no-op and returns `None`.
    ///
    /// # Complexity
    ///
    /// O(log N)
    ///
    /// # Examples
    ///
    /// ```rust
    /// use ordered_tree::OrderedTree;
    ///
    /// let mut tree: OrderedTree<i32, &str> = [(1, "one"), (2, "two")].into_iter().collect();
    /// assert_eq!(tree.remove(&1), Some("one"));
    /// assert_eq!(tree.remove(&1), None);
    /// assert!(!tree.contains(&1));
    /// ```
    pub fn remove<Q>(&mut self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        let (root, removed) = remove_from(self.root.take(), key, &mut self.length);
        self.root = root;
        self.assert_invariants();
        removed
    }

    /// Returns the value stored under `key`.
    ///
    /// # Errors
    ///
    /// Returns [`TreeError::KeyNotFound`] if the key is not present.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use ordered_tree::{OrderedTree, TreeError};
    ///
    /// let tree: OrderedTree<i32, i32> = [(1, 10), (3, 30), (5, 50)].into_iter().collect();
    /// assert_eq!(tree.search(&3), Ok(&30));
    /// assert_eq!(tree.search(&99), Err(TreeError::KeyNotFound));
    /// ```
    pub fn search<Q>(&self, key: &Q) -> Result<&V, TreeError>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.get(key).ok_or(TreeError::KeyNotFound)
    }

    /// Returns a mutable reference to the value stored under `key`.
    ///
    /// # Errors
    ///
    /// Returns [`TreeError::KeyNotFound`] if the key is not present.
    pub fn search_mut<Q>(&mut self, key: &Q) -> Result<&mut V, TreeError>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.get_mut(key).ok_or(TreeError::KeyNotFound)
    }

    /// Returns a reference to the value stored under `key`, if any.
    ///
    /// The key may be any borrowed form of the tree's key type, but the
    /// ordering on the borrowed form must match the ordering on the key type.
    #[must_use]
    pub fn get<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.find_node(key).map(|node| &node.value)
    }

    /// Returns the stored key and value for `key`, if any.
    #[must_use]
    pub fn get_key_value<Q>(&self, key: &Q) -> Option<(&K, &V)>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.find_node(key).map(|node| (&node.key, &node.value))
    }

    /// Returns a mutable reference to the value stored under `key`, if any.
    pub fn get_mut<Q>(&mut self, key: &Q) -> Option<&mut V>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        let mut current = self.root.as_deref_mut();
        while let Some(node) = current {
            match key.cmp(node.key.borrow()) {
                Ordering::Less => current = node.left.as_deref_mut(),
                Ordering::Greater => current = node.right.as_deref_mut(),
                Ordering::Equal => return Some(&mut node.value),
            }
        }
        None
    }

    /// Returns `true` if the tree contains `key`.
    #[must_use]
    pub fn contains<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.find_node(key).is_some()
    }

    /// Overwrites the value of an existing key and returns the old value.
    ///
    /// # Errors
    ///
    /// Returns [`TreeError::KeyNotFound`] if the key is not present; the tree
    /// is left unchanged.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use ordered_tree::{OrderedTree, TreeError};
    ///
    /// let mut tree: OrderedTree<&str, i32> = [("a", 1)].into_iter().collect();
    /// assert_eq!(tree.replace("a", 100), Ok(1));
    /// assert_eq!(tree.get("a"), Some(&100));
    /// assert_eq!(tree.replace("b", 2), Err(TreeError::KeyNotFound));
    /// ```
    pub fn replace<Q>(&mut self, key: &Q, value: V) -> Result<V, TreeError>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.get_mut(key)
            .map(|slot| mem::replace(slot, value))
            .ok_or(TreeError::KeyNotFound)
    }

    /// Returns the entry with the smallest key strictly greater than `key`.
    ///
    /// `key` need not be present. The search re-descends from the root,
    /// remembering the last node where it turned left, so no parent links
    /// are needed.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use ordered_tree::OrderedTree;
    ///
    /// let tree: OrderedTree<i32, ()> = [10, 20, 30].into_iter().map(|key| (key, ())).collect();
    /// assert_eq!(tree.successor(&10).map(|(key, _)| *key), Some(20));
    /// assert_eq!(tree.successor(&15).map(|(key, _)| *key), Some(20));
    /// assert_eq!(tree.successor(&30), None);
    /// ```
    #[must_use]
    pub fn successor<Q>(&self, key: &Q) -> Option<(&K, &V)>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        let mut current = self.root.as_deref();
        let mut candidate = None;
        while let Some(node) = current {
            if key < node.key.borrow() {
                candidate = Some(node);
                current = node.left.as_deref();
            } else {
                current = node.right.as_deref();
            }
        }
        candidate.map(|node| (&node.key, &node.value))
    }

    /// Returns the entry with the largest key strictly less than `key`.
    ///
    /// Mirror image of [`successor`](Self::successor).
    #[must_use]
    pub fn predecessor<Q>(&self, key: &Q) -> Option<(&K, &V)>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        let mut current = self.root.as_deref();
        let mut candidate = None;
        while let Some(node) = current {
            if key > node.key.borrow() {
                candidate = Some(node);
                current = node.right.as_deref();
            } else {
                current = node.left.as_deref();
            }
        }
        candidate.map(|node| (&node.key, &node.value))
    }

    /// Returns `true` if every structural invariant holds: strict key
    /// ordering, correct cached heights, balance factors in `{-1, 0, 1}` and
    /// an entry count that matches the nodes.
    ///
    /// Always `true` unless the tree itself has a bug; meant for tests.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        validate::check(&self.root, self.length).is_ok()
    }

    fn find_node<Q>(&self, key: &Q) -> Option<&Node<K, V>>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        let mut current = self.root.as_deref();
        while let Some(node) = current {
            match key.cmp(node.key.borrow()) {
                Ordering::Less => current = node.left.as_deref(),
                Ordering::Greater => current = node.right.as_deref(),
                Ordering::Equal => return Some(node),
            }
        }
        None
    }

    #[inline]
    #[cfg_attr(
        not(all(feature = "invariant-checks", debug_assertions)),
        allow(clippy::unused_self)
    )]
    fn assert_invariants(&self) {
        #[cfg(all(feature = "invariant-checks", debug_assertions))]
        if let Err(violation) = validate::check(&self.root, self.length) {
            panic!("AVL invariant violated: {violation}");
        }
    }
}

/// Frees a subtree children-first.
fn release_post_order<K, V>(link: Link<K, V>) {
    if let Some(mut node) = link {
        release_post_order(node.left.take());
        release_post_order(node.right.take());
    }
}

// =============================================================================
// Standard Trait Implementations
// =============================================================================

impl<K, V> Default for OrderedTree<K, V> {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl<K: Ord, V> FromIterator<(K, V)> for OrderedTree<K, V> {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut tree = Self::new();
        tree.extend(iter);
        tree
    }
}

impl<K: Ord, V> Extend<(K, V)> for OrderedTree<K, V> {
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (key, value) in iter {
            self.insert(key, value);
        }
    }
}

impl<K, V> IntoIterator for OrderedTree<K, V> {
    type Item = (K, V);
    type IntoIter = IntoIter<K, V>;

    fn into_iter(mut self) -> Self::IntoIter {
        IntoIter::new(self.root.take(), mem::take(&mut self.length))
    }
}

impl<'a, K, V> IntoIterator for &'a OrderedTree<K, V> {
    type Item = (&'a K, &'a V);
    type IntoIter = Iter<'a, K, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<'a, K, V> IntoIterator for &'a mut OrderedTree<K, V> {
    type Item = (&'a K, &'a mut V);
    type IntoIter = IterMut<'a, K, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter_mut()
    }
}

/// Looks up a value by key.
///
/// # Panics
///
/// Panics if the key is not present. Use [`OrderedTree::search`] for a
/// fallible lookup.
impl<K, V, Q> Index<&Q> for OrderedTree<K, V>
where
    K: Ord + Borrow<Q>,
    Q: Ord + ?Sized,
{
    type Output = V;

    fn index(&self, key: &Q) -> &Self::Output {
        match self.get(key) {
            Some(value) => value,
            None => panic!("{}", TreeError::KeyNotFound),
        }
    }
}

impl<K: PartialEq, V: PartialEq> PartialEq for OrderedTree<K, V> {
    fn eq(&self, other: &Self) -> bool {
        self.length == other.length && self.iter().eq(other.iter())
    }
}

impl<K: Eq, V: Eq> Eq for OrderedTree<K, V> {}

/// Hashes the length followed by every entry in key order, so equal trees
/// hash equally whatever their shape.
impl<K: Hash, V: Hash> Hash for OrderedTree<K, V> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.length.hash(state);
        for (key, value) in self {
            key.hash(state);
            value.hash(state);
        }
    }
}

impl<K: fmt::Debug, V: fmt::Debug> fmt::Debug for OrderedTree<K, V> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.debug_map().entries(self.iter()).finish()
    }
}

impl<K: fmt::Display, V: fmt::Display> fmt::Display for OrderedTree<K, V> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(formatter, "{{")?;
        let mut first = true;
        for (key, value) in self {
            if first {
                first = false;
            } else {
                write!(formatter, ", ")?;
            }
            write!(formatter, "{key}: {value}")?;
        }
        write!(formatter, "}}")
    }
}

static_assertions::assert_impl_all!(OrderedTree<i32, String>: Send, Sync, Clone, Default);
static_assertions::assert_not_impl_any!(OrderedTree<std::rc::Rc<i32>, i32>: Send, Sync);

// =============================================================================
// Serde Support
// =============================================================================

#[cfg(feature = "serde")]
impl<K, V> serde::Serialize for OrderedTree<K, V>
where
    K: serde::Serialize,
    V: serde::Serialize,
{
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        use serde::ser::SerializeMap;
        let mut map = serializer.serialize_map(Some(self.len()))?;
        for (key, value) in self {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

#[cfg(feature = "serde")]
struct OrderedTreeVisitor<K, V> {
    marker: std::marker::PhantomData<fn() -> OrderedTree<K, V>>,
}

#[cfg(feature = "serde")]
impl<K, V> OrderedTreeVisitor<K, V> {
    const fn new() -> Self {
        Self {
            marker: std::marker::PhantomData,
        }
    }
}

#[cfg(feature = "serde")]
impl<'de, K, V> serde::de::Visitor<'de> for OrderedTreeVisitor<K, V>
where
    K: serde::Deserialize<'de> + Ord,
    V: serde::Deserialize<'de>,
{
    type Value = OrderedTree<K, V>;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("a map")
    }

    fn visit_map<A>(self, mut access: A) -> Result<Self::Value, A::Error>
    where
        A: serde::de::MapAccess<'de>,
    {
        // Repeated keys keep their first value, same as `insert`.
        let mut tree = OrderedTree::new();
        while let Some((key, value)) = access.next_entry()? {
            tree.insert(key, value);
        }
        Ok(tree)
    }
}

#[cfg(feature = "serde")]
impl<'de, K, V> serde::Deserialize<'de> for OrderedTree<K, V>
where
    K: serde::Deserialize<'de> + Ord,
    V: serde::Deserialize<'de>,
{
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        deserializer.deserialize_map(OrderedTreeVisitor::new())
    }
}

// =============================================================================
// Tests
// =============================================================================
