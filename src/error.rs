//! Errors returned by [`OrderedTree`][crate::OrderedTree] operations.
//!
//! Empty trees are not an error: they answer with sentinels instead (a height
//! of `-1`, empty iterators, `None`). Mutating a tree while one of its
//! iterators is alive can't happen either, since the borrow checker rejects
//! it, so the only failure left to report is asking for an item that isn't
//! there.

use thiserror::Error;

/// The ways a tree operation can fail.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum TreeError {
    /// The requested item is not stored in the tree. The tree was left
    /// unchanged.
    #[error("item not in tree")]
    NotFound,
}

/// Shorthand for results of tree operations.
pub type TreeResult<T> = Result<T, TreeError>;
