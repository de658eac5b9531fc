use crate::areas::refs::{HEAD_REF_NAME, MERGE_HEAD_REF_NAME, Refs};
use crate::artifacts::branch::{HEAD_ALIAS, HEADS_PREFIX, TAGS_PREFIX};
use crate::artifacts::core::error::TwigError;
use crate::artifacts::objects::object_id::ObjectId;
use tracing::debug;

/// A user-supplied name for an object
///
/// Resolution tries, in order:
/// - `@` as an alias for HEAD
/// - the exact name when it is HEAD, MERGE_HEAD or already under `refs/`, then `refs/<name>`, `refs/tags/<name>`, `refs/heads/<name>`
/// - a literal 40-character hex object id
///
/// A ref that exists but has no value yet (such as the unborn default branch) does
/// not stop the search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Revision(String);

impl Revision {
    pub fn new(name: impl Into<String>) -> Self {
        Revision(name.into())
    }

    pub fn resolve(&self, refs: &Refs) -> anyhow::Result<ObjectId> {
        for candidate in self.candidates() {
            if let Some(oid) = refs.read_oid(&candidate)? {
                debug!(name = %self.0, %candidate, %oid, "resolved revision");
                return Ok(oid);
            }
        }

        if ObjectId::is_valid(&self.0) {
            return ObjectId::try_parse(self.0.as_str());
        }

        Err(TwigError::UnknownRef(self.0.clone()).into())
    }

    fn candidates(&self) -> Vec<String> {
        let name = match self.0.as_str() {
            HEAD_ALIAS => HEAD_REF_NAME,
            name => name,
        };

        if !Self::is_safe(name) {
            return Vec::new();
        }

        // other files in the metadata directory (index, objects) are never refs
        let mut candidates = Vec::with_capacity(4);
        if matches!(name, HEAD_REF_NAME | MERGE_HEAD_REF_NAME) || name.starts_with("refs/") {
            candidates.push(name.to_string());
        }
        candidates.extend([
            format!("refs/{name}"),
            format!("{TAGS_PREFIX}{name}"),
            format!("{HEADS_PREFIX}{name}"),
        ]);

        candidates
    }

    /// Names that could only reach outside the refs area are never looked up
    fn is_safe(name: &str) -> bool {
        !name.is_empty()
            && !name.starts_with('/')
            && name.split('/').all(|segment| !matches!(segment, "" | "." | ".."))
    }
}

impl AsRef<str> for Revision {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for Revision {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
