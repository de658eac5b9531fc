//! Plumbing commands
//!
//! - `hash_object`: hash a file, optionally storing it as a blob
//! - `cat_file`: print an object's content
//! - `write_tree`: store the index as trees
//! - `read_tree`: replace the index (and optionally the working area) with a tree
//! - `write_commit`: store a commit and advance HEAD
//! - `merge_base`: print the merge base of two commits

pub mod cat_file;
pub mod hash_object;
pub mod merge_base;
pub mod read_tree;
pub mod write_commit;
pub mod write_tree;
