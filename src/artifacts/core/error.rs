//! Error taxonomy
//!
//! Every function in the crate returns `anyhow::Result`. Failures that callers may
//! want to tell apart are raised as a [`TwigError`] and can be recovered with
//! `error.downcast_ref::<TwigError>()`, even after context has been attached.
//!
//! A merge that leaves conflict markers in a file is not an error and never shows
//! up here.

use crate::artifacts::objects::object_id::ObjectId;
use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum TwigError {
    /// Type-tag mismatch or a malformed tree/commit encoding
    #[error("corrupt object: {0}")]
    CorruptObject(String),

    /// Name resolution exhausted every strategy
    #[error("unknown revision or ref name: {0}")]
    UnknownRef(String),

    /// Object store lookup miss
    #[error("object {0} not found")]
    MissingObject(ObjectId),

    /// Attempt to set a ref to an empty value
    #[error("invalid value for ref {name}: {reason}")]
    InvalidRefValue { name: String, reason: String },

    /// Ref file content is neither an object id nor a symbolic marker
    #[error("corrupt ref {name}: {reason}")]
    CorruptRef { name: String, reason: String },

    /// Symbolic chain loops back on itself or is too deep to follow
    #[error("symbolic ref {0} does not resolve (cycle or chain too long)")]
    RefCycle(String),

    #[error("corrupt index: {0}")]
    CorruptIndex(String),

    /// Path cannot be stored in a tree
    #[error("invalid path {path:?}: {reason}")]
    InvalidPath { path: PathBuf, reason: String },

    /// Diff/merge collaborator failed (conflicts are not failures)
    #[error("external tool {program} failed: {reason}")]
    ExternalToolFailure { program: String, reason: String },

    #[error("not a twig repository (or any parent up to mount point): {0:?}")]
    NotARepository(PathBuf),
}

impl TwigError {
    pub fn invalid_path(path: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
        TwigError::InvalidPath {
            path: path.into(),
            reason: reason.into(),
        }
    }

    pub fn tool_failure(program: impl Into<String>, reason: impl Into<String>) -> Self {
        TwigError::ExternalToolFailure {
            program: program.into(),
            reason: reason.into(),
        }
    }
}
