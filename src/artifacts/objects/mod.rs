//! Object types and their canonical encodings
//!
//! Every piece of content is stored as an immutable object identified by the SHA-1 of
//! its type tag and payload. There are three kinds:
//!
//! - **Blob**: raw file content
//! - **Tree**: sorted listing of named blobs and subtrees
//! - **Commit**: a tree, its parent commits and a message
//!
//! On disk an object is `<type>\0<content>`, stored uncompressed.

pub mod blob;
pub mod commit;
pub mod object;
pub mod object_id;
pub mod object_type;
pub mod tree;
pub mod tree_builder;

/// Length of a SHA-1 hash in hexadecimal format
pub const OBJECT_ID_LENGTH: usize = 40;
