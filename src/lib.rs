//! A small content-addressed version-control engine
//!
//! - `areas`: the on-disk parts of a repository (object database, refs, index, working area)
//! - `artifacts`: the data types and algorithms those areas are built from
//! - `commands`: plumbing and porcelain operations composed on top of a [`Repository`]
//!
//! [`Repository`]: areas::repository::Repository

pub mod areas;
pub mod artifacts;
pub mod commands;
