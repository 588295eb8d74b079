//! This crate exposes an ordered, mutable collection backed by a Binary Search Tree (BST) that
//! is only balanced when explicitly asked to be.
//!
//! ## Binary Search Tree
//!
//! A Binary Search Tree is a data structure supporting operations to
//! insert, find, and delete stored records. BSTs are typically defined
//! recursively using the notion of a `Node`. A `Node` will typically store
//! some sort of value (the value that was inserted, for example) and will
//! sometimes have child `Node`s. The most important invariants of a BST are:
//!
//! 1. For every `Node` in a BST, all the `Node`s in its left subtree have a
//!    value less than its own value.
//! 2. For every `Node` in a BST, all the `Node`s in its right subtree have a
//!    value greater than or equal to its own value.
//!
//! > Note that some `Node`s have no children. These `Node`s are called "leaf nodes".
//!
//! Searching for values in the tree takes `O(height)`, where `height` is the longest path from
//! the root `Node` to a leaf `Node`. Nothing in [`OrderedTree`] keeps that height down on its
//! own: inserting already sorted values builds a tree as tall as it has items. Instead,
//! [`OrderedTree::is_balanced`] reports when the height has drifted too far from `O(lg N)` and
//! [`OrderedTree::rebalance`] rebuilds the tree at the minimum possible height.
//!
//! ## Example
//!
//! ```
//! use ordered_tree::OrderedTree;
//!
//! let mut tree: OrderedTree<_> = (1..=10).chain(15..=20).collect();
//!
//! assert_eq!(tree.predecessor(&2), Some(&1));
//! assert_eq!(tree.successor(&20), None);
//! assert_eq!(tree.range_find(&9, &16), [&9, &10, &15, &16]);
//!
//! if !tree.is_balanced() {
//!     tree.rebalance();
//! }
//! assert_eq!(tree.height(), 4);
//! ```

#![deny(missing_docs, clippy::clone_on_ref_ptr)]

pub mod error;
pub mod iter;
mod node;
mod tree;


pub use error::{TreeError, TreeResult};
pub use tree::OrderedTree;
