//! Iterators over the items of an [`OrderedTree`][crate::OrderedTree].
//!
//! All of them keep their position in an explicit stack of nodes instead of recursing, so walking
//! a badly skewed tree costs heap memory rather than call stack.
//!
//! The borrowing iterators hold a shared borrow of the tree for as long as they live. Inserting,
//! removing, replacing, or rebalancing all need a mutable borrow, so modifying a tree while one
//! of its iterators is still in use is a compile error rather than something checked at runtime:
//!
//! ```compile_fail
//! use ordered_tree::OrderedTree;
//!
//! let mut tree: OrderedTree<_> = (1..=3).collect();
//! for item in tree.ascending() {
//!     tree.insert(*item * 10);
//! }
//! ```

use std::iter::FusedIterator;

use crate::node::{self, Link, Node};

/// The natural (preorder) iterator: each node, then its left subtree, then its right subtree.
///
/// Created by [`OrderedTree::iter`][crate::OrderedTree::iter].
pub struct Iter<'a, T> {
    stack: Vec<&'a Node<T>>,
    remaining: usize,
}

impl<'a, T> Iter<'a, T> {
    pub(crate) fn new(root: &'a Link<T>, len: usize) -> Self {
        Self {
            stack: root.as_deref().into_iter().collect(),
            remaining: len,
        }
    }
}

impl<T> Clone for Iter<'_, T> {
    fn clone(&self) -> Self {
        Self {
            stack: self.stack.clone(),
            remaining: self.remaining,
        }
    }
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        // Right goes on first so the left subtree comes off the stack first.
        self.stack.extend(node.right.as_deref());
        self.stack.extend(node.left.as_deref());
        self.remaining -= 1;
        Some(&node.value)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<T> ExactSizeIterator for Iter<'_, T> {}
impl<T> FusedIterator for Iter<'_, T> {}

/// An in-order iterator yielding items from smallest to largest.
///
/// Created by [`OrderedTree::ascending`][crate::OrderedTree::ascending].
pub struct Ascending<'a, T> {
    stack: Vec<&'a Node<T>>,
    remaining: usize,
}

impl<'a, T> Ascending<'a, T> {
    pub(crate) fn new(root: &'a Link<T>, len: usize) -> Self {
        let mut iter = Self {
            stack: Vec::new(),
            remaining: len,
        };
        iter.descend_left(root.as_deref());
        iter
    }

    /// Stacks `current` and its chain of left children. The top of the stack is then the
    /// smallest item not yet visited.
    fn descend_left(&mut self, mut current: Option<&'a Node<T>>) {
        while let Some(node) = current {
            self.stack.push(node);
            current = node.left.as_deref();
        }
    }
}

impl<T> Clone for Ascending<'_, T> {
    fn clone(&self) -> Self {
        Self {
            stack: self.stack.clone(),
            remaining: self.remaining,
        }
    }
}

impl<'a, T> Iterator for Ascending<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        self.descend_left(node.right.as_deref());
        self.remaining -= 1;
        Some(&node.value)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<T> ExactSizeIterator for Ascending<'_, T> {}
impl<T> FusedIterator for Ascending<'_, T> {}

/// An in-order iterator over the items `x` with `low <= x <= high`.
///
/// Subtrees that lie entirely below `low` are never visited and the walk stops at the first
/// item above `high`, so this costs `O(height + k)` for `k` matching items.
///
/// Created by [`OrderedTree::range`][crate::OrderedTree::range].
pub struct Range<'a, 'b, T> {
    stack: Vec<&'a Node<T>>,
    low: &'b T,
    high: &'b T,
}

impl<'a, 'b, T> Range<'a, 'b, T>
where
    T: Ord,
{
    pub(crate) fn new(root: &'a Link<T>, low: &'b T, high: &'b T) -> Self {
        let mut iter = Self {
            stack: Vec::new(),
            low,
            high,
        };
        iter.descend_left(root.as_deref());
        iter
    }

    /// Like [`Ascending`]'s version but skips every node below `low` along with its left
    /// subtree, which can only hold smaller items.
    fn descend_left(&mut self, mut current: Option<&'a Node<T>>) {
        while let Some(node) = current {
            if node.value < *self.low {
                current = node.right.as_deref();
            } else {
                self.stack.push(node);
                current = node.left.as_deref();
            }
        }
    }
}

impl<T> Clone for Range<'_, '_, T> {
    fn clone(&self) -> Self {
        Self {
            stack: self.stack.clone(),
            low: self.low,
            high: self.high,
        }
    }
}

impl<'a, T> Iterator for Range<'a, '_, T>
where
    T: Ord,
{
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        if node.value > *self.high {
            // Everything still on the stack is at least this large.
            self.stack.clear();
            return None;
        }

        self.descend_left(node.right.as_deref());
        Some(&node.value)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (0, None)
    }
}

impl<T> FusedIterator for Range<'_, '_, T> where T: Ord {}

/// An owning preorder iterator, the by-value counterpart of [`Iter`].
///
/// Created by `OrderedTree::into_iter`.
pub struct IntoIter<T> {
    stack: Vec<Box<Node<T>>>,
    remaining: usize,
}

impl<T> IntoIter<T> {
    pub(crate) fn new(root: Link<T>, len: usize) -> Self {
        Self {
            stack: root.into_iter().collect(),
            remaining: len,
        }
    }
}

impl<T> Iterator for IntoIter<T> {
    type Item = T;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        let Node { value, left, right } = *node;
        self.stack.extend(right);
        self.stack.extend(left);
        self.remaining -= 1;
        Some(value)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<T> ExactSizeIterator for IntoIter<T> {}
impl<T> FusedIterator for IntoIter<T> {}

impl<T> Drop for IntoIter<T> {
    fn drop(&mut self) {
        node::dismantle(self.stack.drain(..));
    }
}

/// An owning in-order iterator, the by-value counterpart of [`Ascending`].
///
/// Created by [`OrderedTree::into_ascending`][crate::OrderedTree::into_ascending].
pub struct IntoAscending<T> {
    stack: Vec<Box<Node<T>>>,
    remaining: usize,
}

impl<T> IntoAscending<T> {
    pub(crate) fn new(root: Link<T>, len: usize) -> Self {
        let mut iter = Self {
            stack: Vec::new(),
            remaining: len,
        };
        iter.descend_left(root);
        iter
    }

    fn descend_left(&mut self, mut current: Link<T>) {
        while let Some(mut node) = current {
            current = node.left.take();
            self.stack.push(node);
        }
    }
}

impl<T> Iterator for IntoAscending<T> {
    type Item = T;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        let Node { value, right, .. } = *node;
        self.descend_left(right);
        self.remaining -= 1;
        Some(value)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<T> ExactSizeIterator for IntoAscending<T> {}
impl<T> FusedIterator for IntoAscending<T> {}

impl<T> Drop for IntoAscending<T> {
    fn drop(&mut self) {
        node::dismantle(self.stack.drain(..));
    }
}
