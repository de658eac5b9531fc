//! Core repository components
//!
//! - `database`: content-addressed object store
//! - `index`: staging area mapping paths to blob ids
//! - `refs`: branches, tags, HEAD and MERGE_HEAD
//! - `repository`: the handle tying the other areas together
//! - `workspace`: the checked-out files

pub mod database;
pub mod index;
pub mod refs;
pub mod repository;
pub mod workspace;
