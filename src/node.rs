//! Nodes and the link-level algorithms that [`OrderedTree`][crate::OrderedTree] is built from.
//!
//! Every routine here walks the tree with a loop or an explicit stack rather than recursing once
//! per level, so a completely skewed tree (e.g. one built from already sorted input) can't
//! overflow the call stack. The one exception is [`build_balanced`], which only recurses as deep
//! as the balanced tree it produces.

use std::cmp::Ordering;

/// An owning pointer to an optional subtree. A parent owns its children through these, and the
/// tree owns its root through one, so the root slot is just the root's parent link.
pub(crate) type Link<T> = Option<Box<Node<T>>>;

/// A single stored item and its two subtrees.
pub(crate) struct Node<T> {
    pub(crate) value: T,
    pub(crate) left: Link<T>,
    pub(crate) right: Link<T>,
}

impl<T> Node<T> {
    /// Construct a new `Node` with no children.
    pub(crate) fn leaf(value: T) -> Box<Self> {
        Box::new(Self {
            value,
            left: None,
            right: None,
        })
    }
}

/// Finds the node holding a value equal to `value`.
pub(crate) fn search<'a, T>(link: &'a Link<T>, value: &T) -> Option<&'a Node<T>>
where
    T: Ord,
{
    let mut current = link.as_deref();
    while let Some(node) = current {
        current = match value.cmp(&node.value) {
            Ordering::Equal => return Some(node),
            Ordering::Less => node.left.as_deref(),
            Ordering::Greater => node.right.as_deref(),
        };
    }
    None
}

/// Returns the empty link a new `value` should be hung from. Values equal to a node's value are
/// never "less" so they always continue to the right.
pub(crate) fn vacant_slot<'a, T>(mut link: &'a mut Link<T>, value: &T) -> &'a mut Link<T>
where
    T: Ord,
{
    while let Some(node) = link {
        link = if *value < node.value {
            &mut node.left
        } else {
            &mut node.right
        };
    }
    link
}

/// Returns the link that owns the node holding `value`, or the empty link where the search ran
/// out. Handing back the owning link (rather than the node) lets callers unlink the node the same
/// way whether it hangs off a parent or is the root.
pub(crate) fn occupied_slot<'a, T>(mut link: &'a mut Link<T>, value: &T) -> &'a mut Link<T>
where
    T: Ord,
{
    loop {
        let go_left = match link.as_deref().map(|node| value.cmp(&node.value)) {
            Some(Ordering::Less) => true,
            Some(Ordering::Greater) => false,
            Some(Ordering::Equal) | None => return link,
        };
        if let Some(node) = link {
            link = if go_left {
                &mut node.left
            } else {
                &mut node.right
            };
        }
    }
}

/// Unlinks the rightmost (largest) node of the subtree under `link` and returns its value. The
/// rightmost node has no right child, so its left child takes its place.
pub(crate) fn take_max<T>(mut link: &mut Link<T>) -> Option<T> {
    while link.as_ref().map_or(false, |node| node.right.is_some()) {
        if let Some(node) = link {
            link = &mut node.right;
        }
    }

    let node = link.take()?;
    let Node { value, left, .. } = *node;
    *link = left;
    Some(value)
}

/// Frees the given subtrees one node at a time. Letting `Box` drop a subtree recurses once per
/// level, which a skewed tree turns into a stack overflow.
pub(crate) fn dismantle<T>(subtrees: impl IntoIterator<Item = Box<Node<T>>>) {
    let mut stack: Vec<_> = subtrees.into_iter().collect();
    while let Some(mut node) = stack.pop() {
        stack.extend(node.left.take());
        stack.extend(node.right.take());
    }
}

/// Copies the subtree under `link` node for node, so the copy has exactly the same shape.
pub(crate) fn duplicate<T>(link: &Link<T>) -> Link<T>
where
    T: Clone,
{
    let mut root = None;
    {
        // (node to copy, empty link the copy goes into)
        let mut stack: Vec<(&Node<T>, &mut Link<T>)> = Vec::new();
        if let Some(node) = link.as_deref() {
            stack.push((node, &mut root));
        }

        while let Some((source, slot)) = stack.pop() {
            let copy = slot.insert(Node::leaf(source.value.clone()));
            let Node { left, right, .. } = &mut **copy;
            if let Some(node) = source.left.as_deref() {
                stack.push((node, left));
            }
            if let Some(node) = source.right.as_deref() {
                stack.push((node, right));
            }
        }
    }
    root
}

/// Builds a minimum-height subtree out of the next `len` items of an ascending iterator.
///
/// The subtree root is the item at index `len / 2`, so the left subtree holds the `len / 2`
/// smaller items and the right subtree whatever is left. Items are pulled in order, so the
/// iterator is consumed exactly once and nothing is copied.
pub(crate) fn build_balanced<T>(items: &mut impl Iterator<Item = T>, len: usize) -> Link<T> {
    if len == 0 {
        return None;
    }

    let left = build_balanced(items, len / 2);
    let value = items.next()?;
    let right = build_balanced(items, len - len / 2 - 1);

    Some(Box::new(Node { value, left, right }))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grow(values: &[i32]) -> Link<i32> {
        let mut root = None;
        for &value in values {
            *vacant_slot(&mut root, &value) = Some(Node::leaf(value));
        }
        root
    }

    #[test]
    fn equal_values_hang_right() {
        let root = grow(&[5, 5, 5]);

        let root = root.as_deref().unwrap();
        assert!(root.left.is_none());

        let right = root.right.as_deref().unwrap();
        assert_eq!(right.value, 5);
        assert!(right.left.is_none());
        assert_eq!(right.right.as_deref().unwrap().value, 5);
    }

    #[test]
    fn occupied_slot_of_root_is_root_link() {
        let mut root = grow(&[2, 1, 3]);

        let slot = occupied_slot(&mut root, &2);
        assert_eq!(slot.as_deref().map(|node| node.value), Some(2));

        let slot = occupied_slot(&mut root, &4);
        assert!(slot.is_none());
    }

    #[test]
    fn take_max_splices_in_left_child() {
        //     5
        //   3
        // 1   4
        //    3
        let mut root = grow(&[5, 3, 1, 4, 3]);
        let left = &mut root.as_mut().unwrap().left;

        assert_eq!(take_max(left), Some(4));

        let three = left.as_deref().unwrap();
        assert_eq!(three.value, 3);
        assert_eq!(three.right.as_deref().map(|node| node.value), Some(3));
    }

    #[test]
    fn take_max_of_nothing() {
        let mut root: Link<i32> = None;
        assert_eq!(take_max(&mut root), None);
    }

    #[test]
    fn duplicate_copies_every_link() {
        //     5
        //   3   8
        // 1   4
        //    3
        let root = grow(&[5, 3, 8, 1, 4, 3]);
        let copy = duplicate(&root);

        let five = copy.as_deref().unwrap();
        assert_eq!(five.value, 5);
        assert_eq!(five.right.as_deref().map(|node| node.value), Some(8));

        let three = five.left.as_deref().unwrap();
        assert_eq!(three.left.as_deref().map(|node| node.value), Some(1));

        let four = three.right.as_deref().unwrap();
        assert_eq!(four.value, 4);
        assert_eq!(four.left.as_deref().map(|node| node.value), Some(3));
        assert!(four.right.is_none());

        assert!(duplicate::<i32>(&None).is_none());
    }

    #[test]
    fn build_balanced_picks_middle_items() {
        let root = build_balanced(&mut (1..=4), 4);

        let root = root.as_deref().unwrap();
        assert_eq!(root.value, 3);

        let left = root.left.as_deref().unwrap();
        assert_eq!(left.value, 2);
        assert_eq!(left.left.as_deref().map(|node| node.value), Some(1));

        assert_eq!(root.right.as_deref().map(|node| node.value), Some(4));
    }

    #[test]
    fn dismantle_deep_tree() {
        let mut root = None;
        let mut slot = &mut root;
        for value in 0..200_000 {
            *slot = Some(Node::leaf(value));
            if let Some(node) = slot {
                slot = &mut node.right;
            }
        }

        dismantle(root);
    }
}
