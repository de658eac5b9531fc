//! Ref names and revision lookup
//!
//! - `branch_name`: validated names for branches and tags, plus the ref namespaces
//! - `revision`: turning a user-supplied name into an object id

pub mod branch_name;
pub mod revision;

pub const INVALID_REF_NAME_REGEX: &str =
    r"^\.|\/\.|\.\.|^\/|\/$|\.lock$|@\{|[\x00-\x20\*:\?\[\\~\^\x7f]";

/// Shorthand accepted wherever a revision is expected
pub const HEAD_ALIAS: &str = "@";

pub const HEADS_PREFIX: &str = "refs/heads/";
pub const TAGS_PREFIX: &str = "refs/tags/";
pub const REMOTE_PREFIX: &str = "refs/remote/";
