use crate::artifacts::branch::{HEADS_PREFIX, INVALID_REF_NAME_REGEX, REMOTE_PREFIX, TAGS_PREFIX};
use anyhow::Context;

/// A user-chosen branch or tag name, already checked against the ref name rules
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RefName(String);

impl RefName {
    pub fn try_parse(name: impl Into<String>) -> anyhow::Result<Self> {
        let name = name.into();
        if name.is_empty() {
            anyhow::bail!("ref name cannot be empty");
        }

        let re = regex::Regex::new(INVALID_REF_NAME_REGEX)
            .with_context(|| format!("invalid ref name regex: {INVALID_REF_NAME_REGEX}"))?;

        if re.is_match(&name) {
            anyhow::bail!("invalid ref name: {}", name);
        }

        Ok(Self(name))
    }

    /// Full name under `refs/heads/`
    pub fn branch_ref(&self) -> String {
        format!("{HEADS_PREFIX}{}", self.0)
    }

    /// Full name under `refs/tags/`
    pub fn tag_ref(&self) -> String {
        format!("{TAGS_PREFIX}{}", self.0)
    }

    /// Full name under `refs/remote/`
    pub fn remote_ref(&self) -> String {
        format!("{REMOTE_PREFIX}{}", self.0)
    }

    /// Short branch name for a full `refs/heads/...` name
    pub fn from_branch_ref(full_name: &str) -> Option<Self> {
        full_name
            .strip_prefix(HEADS_PREFIX)
            .and_then(|short| Self::try_parse(short).ok())
    }
}

impl AsRef<str> for RefName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for RefName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
