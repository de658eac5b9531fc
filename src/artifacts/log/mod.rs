//! Commit-graph traversal
//!
//! - `rev_list`: lazy ancestry walk over commits, first parent first
//! - `reachable`: every object reachable from a set of commits
//!
//! Both walks yield an id before they look inside it, so a consumer can make
//! the object available (e.g. copy it from another repository) between pulls.

pub mod reachable;
pub mod rev_list;
