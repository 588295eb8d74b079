//! A mutable BST that only balances itself when asked to. Insertions go wherever the search
//! order puts them, so feeding it sorted input produces a tree that is really a linked list.
//! [`OrderedTree::is_balanced`] tells you when that has happened and
//! [`OrderedTree::rebalance`] fixes it.
//!
//! # Examples
//!
//! ```
//! use ordered_tree::{OrderedTree, TreeError};
//!
//! let mut tree = OrderedTree::new();
//!
//! // Nothing in here yet.
//! assert_eq!(tree.find(&1), None);
//! assert_eq!(tree.height(), -1);
//!
//! // Sorted input makes a tall, skewed tree.
//! for item in 1..=7 {
//!     tree.insert(item);
//! }
//! assert_eq!(tree.height(), 6);
//! assert!(!tree.is_balanced());
//!
//! // Rebuilding it from its sorted contents fixes that.
//! tree.rebalance();
//! assert_eq!(tree.height(), 2);
//! assert!(tree.is_balanced());
//!
//! // Removing an item hands it back, removing a missing one is an error.
//! assert_eq!(tree.remove(&4), Ok(4));
//! assert_eq!(tree.remove(&4), Err(TreeError::NotFound));
//! ```

use std::fmt;
use std::mem;

use tracing::{debug, trace};

use crate::error::{TreeError, TreeResult};
use crate::iter::{Ascending, IntoAscending, IntoIter, Iter, Range};
use crate::node::{self, Link, Node};

/// An ordered collection stored in a binary search tree.
///
/// Every item in a node's left subtree is less than the node's item and every item in its right
/// subtree is greater than or equal to it, so equal items are all kept and inserting one puts it
/// to the right of the others.
///
/// [`rebalance`][Self::rebalance] always splits a run of items at its middle, so a run of equal
/// items may straddle a node afterwards. Searching only relies on the left subtree holding
/// nothing greater and the right subtree nothing smaller, which every operation preserves.
pub struct OrderedTree<T> {
    root: Link<T>,
    len: usize,
}

impl<T> Default for OrderedTree<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Drop for OrderedTree<T> {
    fn drop(&mut self) {
        node::dismantle(self.root.take());
    }
}

impl<T> OrderedTree<T> {
    /// Generates a new, empty `OrderedTree`.
    pub fn new() -> Self {
        Self { root: None, len: 0 }
    }

    /// Returns how many items are stored in the tree, counting duplicates.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` if the tree holds no items.
    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// Removes every item from the tree.
    pub fn clear(&mut self) {
        debug!(len = self.len, "clearing tree");
        node::dismantle(self.root.take());
        self.len = 0;
    }

    /// Gets the height of the tree: the number of links on the longest path from the root down
    /// to a leaf. A tree with a single item has a height of `0` and an empty tree has a height
    /// of `-1`.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordered_tree::OrderedTree;
    ///
    /// let mut tree = OrderedTree::new();
    /// assert_eq!(tree.height(), -1);
    ///
    /// tree.insert(2);
    /// assert_eq!(tree.height(), 0);
    ///
    /// tree.insert(1);
    /// tree.insert(3);
    /// assert_eq!(tree.height(), 1);
    /// ```
    pub fn height(&self) -> isize {
        let mut height = -1;
        let mut stack: Vec<(&Node<T>, isize)> = Vec::new();
        stack.extend(self.root.as_deref().map(|root| (root, 0)));

        while let Some((node, depth)) = stack.pop() {
            height = height.max(depth);
            stack.extend(node.left.as_deref().map(|left| (left, depth + 1)));
            stack.extend(node.right.as_deref().map(|right| (right, depth + 1)));
        }

        height
    }

    /// Checks whether the tree is roughly balanced, meaning its height is below
    /// `2 * log2(len + 1) - 1`.
    ///
    /// This is a loose bound meant for deciding whether [`rebalance`][Self::rebalance] is worth
    /// calling, not a strict AVL or red-black style check. Note that it never holds for an empty
    /// tree, whose height of `-1` equals the bound.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordered_tree::OrderedTree;
    ///
    /// let mut tree: OrderedTree<_> = (0..100).collect();
    /// assert!(!tree.is_balanced());
    ///
    /// tree.rebalance();
    /// assert!(tree.is_balanced());
    /// ```
    pub fn is_balanced(&self) -> bool {
        let bound = 2.0 * ((self.len + 1) as f64).log2() - 1.0;
        (self.height() as f64) < bound
    }

    /// Returns the smallest item in the tree.
    pub fn first(&self) -> Option<&T> {
        let mut node = self.root.as_deref()?;
        while let Some(left) = node.left.as_deref() {
            node = left;
        }
        Some(&node.value)
    }

    /// Returns the largest item in the tree.
    pub fn last(&self) -> Option<&T> {
        let mut node = self.root.as_deref()?;
        while let Some(right) = node.right.as_deref() {
            node = right;
        }
        Some(&node.value)
    }

    /// Iterates over the items in the tree's natural order, which is preorder: each item comes
    /// before the items of its left subtree, which come before those of its right subtree.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordered_tree::OrderedTree;
    ///
    /// let tree: OrderedTree<_> = vec![2, 1, 3].into_iter().collect();
    /// let items: Vec<_> = tree.iter().collect();
    ///
    /// assert_eq!(items, [&2, &1, &3]);
    /// ```
    pub fn iter(&self) -> Iter<'_, T> {
        Iter::new(&self.root, self.len)
    }

    /// Iterates over the items in the tree from smallest to largest. Each call starts a fresh
    /// walk from the beginning.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordered_tree::OrderedTree;
    ///
    /// let tree: OrderedTree<_> = vec![2, 3, 1, 2].into_iter().collect();
    /// let items: Vec<_> = tree.ascending().collect();
    ///
    /// assert_eq!(items, [&1, &2, &2, &3]);
    /// ```
    pub fn ascending(&self) -> Ascending<'_, T> {
        Ascending::new(&self.root, self.len)
    }

    /// Consumes the tree, yielding its items from smallest to largest.
    pub fn into_ascending(mut self) -> IntoAscending<T> {
        IntoAscending::new(self.root.take(), mem::take(&mut self.len))
    }

    /// Rebuilds the tree into a minimum-height tree holding the same items, bringing its height
    /// down to `ceil(log2(len + 1)) - 1`.
    ///
    /// The items are pulled out in ascending order and the middle one of each run becomes the
    /// root of that run's subtree. The nodes of the old tree are freed along the way.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordered_tree::OrderedTree;
    ///
    /// let mut tree: OrderedTree<_> = (1..=15).collect();
    /// assert_eq!(tree.height(), 14);
    ///
    /// tree.rebalance();
    ///
    /// assert_eq!(tree.height(), 3);
    /// assert_eq!(tree.iter().next(), Some(&8));
    /// ```
    pub fn rebalance(&mut self) {
        let height_before = self.height();

        let mut items = IntoAscending::new(self.root.take(), self.len);
        self.root = node::build_balanced(&mut items, self.len);

        debug!(
            len = self.len,
            height_before,
            height_after = self.height(),
            "rebalanced tree"
        );
    }
}

impl<T> OrderedTree<T>
where
    T: Ord,
{
    /// Checks whether an item equal to `item` is in the tree.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordered_tree::OrderedTree;
    ///
    /// let tree: OrderedTree<_> = vec!["b", "a", "c"].into_iter().collect();
    ///
    /// assert!(tree.contains(&"a"));
    /// assert!(!tree.contains(&"d"));
    /// ```
    pub fn contains(&self, item: &T) -> bool {
        self.find(item).is_some()
    }

    /// Potentially finds the stored item equal to `item`. If no such item exists, `None` is
    /// returned.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordered_tree::OrderedTree;
    ///
    /// let mut tree = OrderedTree::new();
    /// tree.insert(1);
    ///
    /// assert_eq!(tree.find(&1), Some(&1));
    /// assert_eq!(tree.find(&42), None);
    /// ```
    pub fn find(&self, item: &T) -> Option<&T> {
        node::search(&self.root, item).map(|node| &node.value)
    }

    /// Inserts `item` into the tree as a new leaf. Items equal to ones already stored are kept
    /// as well, to the right of the existing ones.
    ///
    /// The tree is never rebalanced here, see [`rebalance`][Self::rebalance].
    ///
    /// # Examples
    ///
    /// ```
    /// use ordered_tree::OrderedTree;
    ///
    /// let mut tree = OrderedTree::new();
    /// tree.insert(1);
    /// tree.insert(1);
    ///
    /// assert_eq!(tree.len(), 2);
    /// ```
    pub fn insert(&mut self, item: T) {
        let slot = node::vacant_slot(&mut self.root, &item);
        *slot = Some(Node::leaf(item));
        self.len += 1;
    }

    /// Removes one item equal to `item` from the tree and returns it. If the tree holds no such
    /// item, [`TreeError::NotFound`] is returned and the tree is left untouched.
    ///
    /// A node with at most one child is unlinked and replaced by that child. A node with two
    /// children stays where it is and takes the largest item of its left subtree instead, whose
    /// node is unlinked in turn. Either way the returned item is the one that was found, never
    /// the one moved up to replace it.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordered_tree::{OrderedTree, TreeError};
    ///
    /// let mut tree: OrderedTree<_> = vec![2, 1, 3].into_iter().collect();
    ///
    /// assert_eq!(tree.remove(&2), Ok(2));
    /// assert_eq!(tree.remove(&2), Err(TreeError::NotFound));
    /// assert_eq!(tree.len(), 2);
    /// ```
    pub fn remove(&mut self, item: &T) -> TreeResult<T> {
        let slot = node::occupied_slot(&mut self.root, item);
        let Some(mut found) = slot.take() else {
            trace!(len = self.len, "item to remove not in tree");
            return Err(TreeError::NotFound);
        };

        // Only a node with two children keeps its place, taking its left subtree's max.
        let donor = if found.right.is_some() {
            node::take_max(&mut found.left)
        } else {
            None
        };

        let removed = match donor {
            Some(donor) => {
                let removed = mem::replace(&mut found.value, donor);
                *slot = Some(found);
                removed
            }
            None => {
                let Node { value, left, right } = *found;
                *slot = left.or(right);
                value
            }
        };

        self.len -= 1;
        Ok(removed)
    }

    /// Overwrites the stored item equal to `item` with `new_item` and returns the item that was
    /// there, or `None` if nothing matched.
    ///
    /// The node isn't moved, so `new_item` must sort the same as `item`. Swapping in an item
    /// that sorts differently leaves the tree out of order and later searches may miss it; use
    /// [`remove`][Self::remove] and [`insert`][Self::insert] to change an item's position.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordered_tree::OrderedTree;
    ///
    /// let mut tree: OrderedTree<_> = vec![2, 1, 3].into_iter().collect();
    ///
    /// assert_eq!(tree.replace(&3, 3), Some(3));
    /// assert_eq!(tree.replace(&4, 4), None);
    /// ```
    pub fn replace(&mut self, item: &T, new_item: T) -> Option<T> {
        node::occupied_slot(&mut self.root, item)
            .as_mut()
            .map(|node| mem::replace(&mut node.value, new_item))
    }

    /// Iterates from smallest to largest over the items `x` with `low <= x <= high`.
    pub fn range<'b>(&self, low: &'b T, high: &'b T) -> Range<'_, 'b, T> {
        Range::new(&self.root, low, high)
    }

    /// Collects the items `x` with `low <= x <= high`, smallest first.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordered_tree::OrderedTree;
    ///
    /// let tree: OrderedTree<_> = (1..=10).collect();
    ///
    /// assert_eq!(tree.range_find(&3, &7), [&3, &4, &5, &6, &7]);
    /// assert!(tree.range_find(&11, &20).is_empty());
    /// ```
    pub fn range_find(&self, low: &T, high: &T) -> Vec<&T> {
        self.range(low, high).collect()
    }

    /// Returns the smallest item in the tree strictly greater than `item`, which doesn't need to
    /// be in the tree itself.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordered_tree::OrderedTree;
    ///
    /// let tree: OrderedTree<_> = (1..=10).chain(15..=20).collect();
    ///
    /// assert_eq!(tree.successor(&10), Some(&15));
    /// assert_eq!(tree.successor(&12), Some(&15));
    /// assert_eq!(tree.successor(&20), None);
    /// ```
    pub fn successor(&self, item: &T) -> Option<&T> {
        let mut best = None;
        let mut current = self.root.as_deref();
        while let Some(node) = current {
            current = if node.value > *item {
                best = Some(&node.value);
                node.left.as_deref()
            } else {
                node.right.as_deref()
            };
        }
        best
    }

    /// Returns the largest item in the tree strictly less than `item`, which doesn't need to be
    /// in the tree itself.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordered_tree::OrderedTree;
    ///
    /// let tree: OrderedTree<_> = (1..=10).chain(15..=20).collect();
    ///
    /// assert_eq!(tree.predecessor(&2), Some(&1));
    /// assert_eq!(tree.predecessor(&15), Some(&10));
    /// assert_eq!(tree.predecessor(&1), None);
    /// ```
    pub fn predecessor(&self, item: &T) -> Option<&T> {
        let mut best = None;
        let mut current = self.root.as_deref();
        while let Some(node) = current {
            current = if node.value < *item {
                best = Some(&node.value);
                node.right.as_deref()
            } else {
                node.left.as_deref()
            };
        }
        best
    }
}

/// Cloning copies the tree node for node, so the clone has exactly the original's shape.
impl<T> Clone for OrderedTree<T>
where
    T: Clone,
{
    fn clone(&self) -> Self {
        Self {
            root: node::duplicate(&self.root),
            len: self.len,
        }
    }
}

/// Two trees are equal when they hold the same items, whatever their shapes.
impl<T> PartialEq for OrderedTree<T>
where
    T: PartialEq,
{
    fn eq(&self, other: &Self) -> bool {
        self.len == other.len && self.ascending().eq(other.ascending())
    }
}

impl<T> Eq for OrderedTree<T> where T: Eq {}

impl<T> fmt::Debug for OrderedTree<T>
where
    T: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.ascending()).finish()
    }
}

/// Draws the tree rotated 90 degrees counter-clockwise: one item per line, right subtrees above
/// their parent, and each level indented by one `"| "`.
///
/// ```
/// use ordered_tree::OrderedTree;
///
/// let tree: OrderedTree<_> = vec![2, 1, 3].into_iter().collect();
///
/// assert_eq!(tree.to_string(), "| 3\n2\n| 1\n");
/// ```
impl<T> fmt::Display for OrderedTree<T>
where
    T: fmt::Display,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // A reversed in-order walk, carrying each node's depth along with it.
        let mut stack: Vec<(&Node<T>, usize)> = Vec::new();
        let mut current = self.root.as_deref();
        let mut level = 0;

        loop {
            while let Some(node) = current {
                stack.push((node, level));
                current = node.right.as_deref();
                level += 1;
            }

            let Some((node, node_level)) = stack.pop() else {
                return Ok(());
            };
            writeln!(f, "{}{}", "| ".repeat(node_level), node.value)?;

            current = node.left.as_deref();
            level = node_level + 1;
        }
    }
}

impl<T> FromIterator<T> for OrderedTree<T>
where
    T: Ord,
{
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut tree = Self::new();
        tree.extend(iter);
        tree
    }
}

impl<T> Extend<T> for OrderedTree<T>
where
    T: Ord,
{
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for item in iter {
            self.insert(item);
        }
    }
}

impl<T> IntoIterator for OrderedTree<T> {
    type Item = T;
    type IntoIter = IntoIter<T>;

    fn into_iter(mut self) -> Self::IntoIter {
        IntoIter::new(self.root.take(), mem::take(&mut self.len))
    }
}

impl<'a, T> IntoIterator for &'a OrderedTree<T> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
impl<T> OrderedTree<T>
where
    T: Ord,
{
    /// Checks every node against the bounds its ancestors impose, and that `len` matches the
    /// number of nodes.
    pub(crate) fn is_valid(&self) -> bool {
        // (node, lower bound, upper bound), both inclusive
        let mut stack: Vec<(&Node<T>, Option<&T>, Option<&T>)> = Vec::new();
        stack.extend(self.root.as_deref().map(|root| (root, None, None)));
        let mut count = 0;

        while let Some((node, low, high)) = stack.pop() {
            count += 1;
            let too_small = low.map_or(false, |low| node.value < *low);
            let too_large = high.map_or(false, |high| node.value > *high);
            if too_small || too_large {
                return false;
            }

            stack.extend(node.left.as_deref().map(|left| (left, low, Some(&node.value))));
            stack.extend(node.right.as_deref().map(|right| (right, Some(&node.value), high)));
        }

        count == self.len
    }

    /// Like [`is_valid`][Self::is_valid], but items equal to a node must sit to its right. Trees
    /// grown by inserts alone always pass; a rebalance or a removal that pulls up a donor may
    /// leave an equal item on the left.
    pub(crate) fn is_strict(&self) -> bool {
        // (node, inclusive lower bound, exclusive upper bound)
        let mut stack: Vec<(&Node<T>, Option<&T>, Option<&T>)> = Vec::new();
        stack.extend(self.root.as_deref().map(|root| (root, None, None)));
        let mut count = 0;

        while let Some((node, low, high)) = stack.pop() {
            count += 1;
            let too_small = low.map_or(false, |low| node.value < *low);
            let too_large = high.map_or(false, |high| node.value >= *high);
            if too_small || too_large {
                return false;
            }

            stack.extend(node.left.as_deref().map(|left| (left, low, Some(&node.value))));
            stack.extend(node.right.as_deref().map(|right| (right, Some(&node.value), high)));
        }

        count == self.len
    }
}
