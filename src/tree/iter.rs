//! Traversals and iterators over an [`OrderedTree`](super::OrderedTree).
//!
//! Nodes carry no parent links, so every iterator keeps its own explicit
//! stack of pending nodes. The in-order iterators push the left spine of a
//! subtree, pop the next entry and then push the left spine of its right
//! child, which makes each step O(1) amortized and a full pass O(n).
//!
//! All iterators know how many entries remain and implement
//! [`ExactSizeIterator`].

use std::iter::FusedIterator;

use smallvec::SmallVec;

use super::node::{Link, Node};

/// Inline stack capacity. An AVL tree of height 24 holds tens of thousands
/// of entries; deeper trees spill the stack to the heap.
const STACK_INLINE: usize = 24;

/// Order in which [`OrderedTree::traverse`](super::OrderedTree::traverse)
/// visits entries.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash)]
pub enum Traversal {
    /// Left subtree, node, right subtree: ascending key order.
    InOrder,
    /// Node, left subtree, right subtree.
    PreOrder,
    /// Left subtree, right subtree, node.
    PostOrder,
}

/// Recursively visits every entry under `link` in the given order.
pub(crate) fn traverse<K, V, F>(link: &Link<K, V>, order: Traversal, visit: &mut F)
where
    F: FnMut(&K, &V),
{
    let Some(node) = link else {
        return;
    };
    match order {
        Traversal::InOrder => {
            traverse(&node.left, order, visit);
            visit(&node.key, &node.value);
            traverse(&node.right, order, visit);
        }
        Traversal::PreOrder => {
            visit(&node.key, &node.value);
            traverse(&node.left, order, visit);
            traverse(&node.right, order, visit);
        }
        Traversal::PostOrder => {
            traverse(&node.left, order, visit);
            traverse(&node.right, order, visit);
            visit(&node.key, &node.value);
        }
    }
}

// =============================================================================
// In-order Iterator
// =============================================================================

/// An iterator over the entries of an [`OrderedTree`](super::OrderedTree) in
/// ascending key order.
///
/// Created by [`OrderedTree::iter`](super::OrderedTree::iter) and
/// [`OrderedTree::in_order`](super::OrderedTree::in_order).
pub struct Iter<'a, K, V> {
    stack: SmallVec<[&'a Node<K, V>; STACK_INLINE]>,
    remaining: usize,
}

impl<'a, K, V> Iter<'a, K, V> {
    pub(crate) fn new(root: &'a Link<K, V>, length: usize) -> Self {
        let mut iterator = Self {
            stack: SmallVec::new(),
            remaining: length,
        };
        iterator.push_left_spine(root.as_deref());
        iterator
    }

    fn push_left_spine(&mut self, mut link: Option<&'a Node<K, V>>) {
        while let Some(node) = link {
            self.stack.push(node);
            link = node.left.as_deref();
        }
    }
}

impl<'a, K, V> Iterator for Iter<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        self.push_left_spine(node.right.as_deref());
        self.remaining -= 1;
        Some((&node.key, &node.value))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<K, V> ExactSizeIterator for Iter<'_, K, V> {
    fn len(&self) -> usize {
        self.remaining
    }
}

impl<K, V> FusedIterator for Iter<'_, K, V> {}

impl<K, V> Clone for Iter<'_, K, V> {
    fn clone(&self) -> Self {
        Self {
            stack: self.stack.clone(),
            remaining: self.remaining,
        }
    }
}

// =============================================================================
// Mutable In-order Iterator
// =============================================================================

type PendingMut<'a, K, V> = (&'a K, &'a mut V, Option<&'a mut Node<K, V>>);

/// A mutable iterator over the entries of an
/// [`OrderedTree`](super::OrderedTree) in ascending key order.
///
/// Keys stay immutable: changing them would break the ordering.
pub struct IterMut<'a, K, V> {
    stack: SmallVec<[PendingMut<'a, K, V>; STACK_INLINE]>,
    remaining: usize,
}

impl<'a, K, V> IterMut<'a, K, V> {
    pub(crate) fn new(root: &'a mut Link<K, V>, length: usize) -> Self {
        let mut iterator = Self {
            stack: SmallVec::new(),
            remaining: length,
        };
        iterator.push_left_spine(root.as_deref_mut());
        iterator
    }

    // Each node is split into its parts so the key/value borrows and the
    // pending right subtree can be held at the same time.
    fn push_left_spine(&mut self, mut link: Option<&'a mut Node<K, V>>) {
        while let Some(node) = link {
            let Node {
                key,
                value,
                left,
                right,
                ..
            } = node;
            self.stack.push((&*key, value, right.as_deref_mut()));
            link = left.as_deref_mut();
        }
    }
}

impl<'a, K, V> Iterator for IterMut<'a, K, V> {
    type Item = (&'a K, &'a mut V);

    fn next(&mut self) -> Option<Self::Item> {
        let (key, value, right) = self.stack.pop()?;
        self.push_left_spine(right);
        self.remaining -= 1;
        Some((key, value))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<K, V> ExactSizeIterator for IterMut<'_, K, V> {
    fn len(&self) -> usize {
        self.remaining
    }
}

impl<K, V> FusedIterator for IterMut<'_, K, V> {}

// =============================================================================
// Owning In-order Iterator
// =============================================================================

/// An owning iterator over the entries of an
/// [`OrderedTree`](super::OrderedTree) in ascending key order.
///
/// Nodes are released one at a time as the iterator advances.
pub struct IntoIter<K, V> {
    stack: SmallVec<[Box<Node<K, V>>; STACK_INLINE]>,
    remaining: usize,
}

impl<K, V> IntoIter<K, V> {
    pub(crate) fn new(root: Link<K, V>, length: usize) -> Self {
        let mut iterator = Self {
            stack: SmallVec::new(),
            remaining: length,
        };
        iterator.push_left_spine(root);
        iterator
    }

    fn push_left_spine(&mut self, mut link: Link<K, V>) {
        while let Some(mut node) = link {
            link = node.left.take();
            self.stack.push(node);
        }
    }
}

impl<K, V> Iterator for IntoIter<K, V> {
    type Item = (K, V);

    fn next(&mut self) -> Option<Self::Item> {
        let mut node = self.stack.pop()?;
        self.push_left_spine(node.right.take());
        self.remaining -= 1;
        let node = *node;
        Some((node.key, node.value))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<K, V> ExactSizeIterator for IntoIter<K, V> {
    fn len(&self) -> usize {
        self.remaining
    }
}

impl<K, V> FusedIterator for IntoIter<K, V> {}

// =============================================================================
// Pre-order and Post-order Iterators
// =============================================================================

/// An iterator visiting each node before its subtrees.
///
/// Created by [`OrderedTree::pre_order`](super::OrderedTree::pre_order).
pub struct PreOrder<'a, K, V> {
    stack: SmallVec<[&'a Node<K, V>; STACK_INLINE]>,
    remaining: usize,
}

impl<'a, K, V> PreOrder<'a, K, V> {
    pub(crate) fn new(root: &'a Link<K, V>, length: usize) -> Self {
        let mut stack = SmallVec::new();
        if let Some(node) = root.as_deref() {
            stack.push(node);
        }
        Self {
            stack,
            remaining: length,
        }
    }
}

impl<'a, K, V> Iterator for PreOrder<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        // Right first so the left subtree is popped next.
        if let Some(right) = node.right.as_deref() {
            self.stack.push(right);
        }
        if let Some(left) = node.left.as_deref() {
            self.stack.push(left);
        }
        self.remaining -= 1;
        Some((&node.key, &node.value))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<K, V> ExactSizeIterator for PreOrder<'_, K, V> {
    fn len(&self) -> usize {
        self.remaining
    }
}

impl<K, V> FusedIterator for PreOrder<'_, K, V> {}

/// An iterator visiting each node after both of its subtrees.
///
/// Created by [`OrderedTree::post_order`](super::OrderedTree::post_order).
pub struct PostOrder<'a, K, V> {
    /// Pending nodes, flagged once their children have been scheduled.
    stack: SmallVec<[(&'a Node<K, V>, bool); STACK_INLINE]>,
    remaining: usize,
}

impl<'a, K, V> PostOrder<'a, K, V> {
    pub(crate) fn new(root: &'a Link<K, V>, length: usize) -> Self {
        let mut stack = SmallVec::new();
        if let Some(node) = root.as_deref() {
            stack.push((node, false));
        }
        Self {
            stack,
            remaining: length,
        }
    }
}

impl<'a, K, V> Iterator for PostOrder<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let (node, expanded) = self.stack.pop()?;
            if expanded {
                self.remaining -= 1;
                return Some((&node.key, &node.value));
            }
            self.stack.push((node, true));
            if let Some(right) = node.right.as_deref() {
                self.stack.push((right, false));
            }
            if let Some(left) = node.left.as_deref() {
                self.stack.push((left, false));
            }
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<K, V> ExactSizeIterator for PostOrder<'_, K, V> {
    fn len(&self) -> usize {
        self.remaining
    }
}

impl<K, V> FusedIterator for PostOrder<'_, K, V> {}

// =============================================================================
// Key and Value Projections
// =============================================================================

/// An iterator over the keys of an [`OrderedTree`](super::OrderedTree) in
/// ascending order.
pub struct Keys<'a, K, V> {
    pub(crate) inner: Iter<'a, K, V>,
}

impl<'a, K, V> Iterator for Keys<'a, K, V> {
    type Item = &'a K;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(key, _)| key)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<K, V> ExactSizeIterator for Keys<'_, K, V> {
    fn len(&self) -> usize {
        self.inner.len()
    }
}

impl<K, V> FusedIterator for Keys<'_, K, V> {}

/// An iterator over the values of an [`OrderedTree`](super::OrderedTree) in
/// key order.
pub struct Values<'a, K, V> {
    pub(crate) inner: Iter<'a, K, V>,
}

impl<'a, K, V> Iterator for Values<'a, K, V> {
    type Item = &'a V;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(_, value)| value)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<K, V> ExactSizeIterator for Values<'_, K, V> {
    fn len(&self) -> usize {
        self.inner.len()
    }
}

impl<K, V> FusedIterator for Values<'_, K, V> {}

/// A mutable iterator over the values of an
/// [`OrderedTree`](super::OrderedTree) in key order.
pub struct ValuesMut<'a, K, V> {
    pub(crate) inner: IterMut<'a, K, V>,
}

impl<'a, K, V> Iterator for ValuesMut<'a, K, V> {
    type Item = &'a mut V;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(_, value)| value)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<K, V> ExactSizeIterator for ValuesMut<'_, K, V> {
    fn len(&self) -> usize {
        self.inner.len()
    }
}

impl<K, V> FusedIterator for ValuesMut<'_, K, V> {}
