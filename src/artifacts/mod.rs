//! Data structures and algorithms
//!
//! - `branch`: ref names and revision lookup
//! - `core`: configuration and the error taxonomy
//! - `diff`: Myers diff, text diff engines and tree comparison
//! - `index`: on-disk index format
//! - `log`: commit ancestry and object reachability walks
//! - `merge`: merge base lookup and three-way merge
//! - `objects`: blob, tree and commit objects

pub mod branch;
pub mod core;
pub mod diff;
pub mod index;
pub mod log;
pub mod merge;
pub mod objects;
