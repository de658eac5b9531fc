//! Command implementations, as methods on [`Repository`](crate::areas::repository::Repository)
//!
//! - `plumbing`: object-level building blocks (hash-object, cat-file, write-tree,
//!   read-tree, commit creation, merge-base)
//! - `porcelain`: user workflows composed from the plumbing (init, add, commit,
//!   log, checkout, merge, fetch, push, ...)
//!
//! Command output goes to the repository's writer; notices go to stderr.

pub mod plumbing;
pub mod porcelain;
