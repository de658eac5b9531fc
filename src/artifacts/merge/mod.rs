//! Three-way merge
//!
//! - `merge_base`: common ancestor lookup over the commit graph
//! - `text_merge`: per-file three-way merge engines (native and `diff3`)
//! - `tree_merge`: merges every path of three trees through a text engine

pub mod merge_base;
pub mod text_merge;
pub mod tree_merge;
