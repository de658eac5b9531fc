//! Commit object
//!
//! Commits record a snapshot (tree), the commits it was built on and a message.
//!
//! ## Format
//!
//! ```text
//! tree <tree-id>
//! parent <parent-id>      (zero or more, in order)
//!
//! <message, verbatim>
//! ```
//!
//! The header block ends at the first blank line; the rest of the payload is the
//! message byte-for-byte.

use crate::artifacts::core::error::TwigError;
use crate::artifacts::objects::object::{Object, Packable, Unpackable};
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::objects::object_type::ObjectType;
use bytes::Bytes;
use derive_new::new;

#[derive(Debug, Clone, Eq, PartialEq, new)]
pub struct Commit {
    /// Tree object ID representing the directory snapshot
    tree_oid: ObjectId,
    /// Parent commit IDs (empty for a root commit, several for a merge)
    parents: Vec<ObjectId>,
    #[new(into)]
    message: String,
}

impl Commit {
    /// First line of the message
    pub fn short_message(&self) -> &str {
        self.message.lines().next().unwrap_or("")
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn tree_oid(&self) -> &ObjectId {
        &self.tree_oid
    }

    pub fn parents(&self) -> &[ObjectId] {
        &self.parents
    }

    pub fn parent(&self) -> Option<&ObjectId> {
        self.parents.first()
    }

    pub fn into_parents(self) -> Vec<ObjectId> {
        self.parents
    }
}

impl Packable for Commit {
    fn serialize(&self) -> anyhow::Result<Bytes> {
        let mut content = format!("tree {}\n", self.tree_oid);
        for parent in &self.parents {
            content.push_str(&format!("parent {parent}\n"));
        }
        content.push('\n');
        content.push_str(&self.message);

        Ok(Bytes::from(content))
    }
}

impl Unpackable for Commit {
    fn deserialize(content: &[u8]) -> anyhow::Result<Self> {
        let content = std::str::from_utf8(content)
            .map_err(|_| TwigError::CorruptObject("commit is not valid UTF-8".to_string()))?;

        let (headers, message) = match content.split_once("\n\n") {
            Some(parts) => parts,
            // a commit with no message still ends its header block with a blank line,
            // but tolerate a bare header block that only lacks the separator
            None => (content.strip_suffix('\n').unwrap_or(content), ""),
        };

        let mut tree_oid = None;
        let mut parents = Vec::new();

        for line in headers.lines() {
            let (key, value) = line.split_once(' ').ok_or_else(|| {
                TwigError::CorruptObject(format!("malformed commit header {line:?}"))
            })?;
            let oid = ObjectId::try_parse(value).map_err(|_| {
                TwigError::CorruptObject(format!("bad object id in commit header {line:?}"))
            })?;

            match key {
                "tree" if tree_oid.is_none() => tree_oid = Some(oid),
                "parent" => parents.push(oid),
                _ => anyhow::bail!(TwigError::CorruptObject(format!(
                    "unexpected commit header {key:?}"
                ))),
            }
        }

        let tree_oid = tree_oid
            .ok_or_else(|| TwigError::CorruptObject("commit has no tree".to_string()))?;

        Ok(Self::new(tree_oid, parents, message))
    }
}

impl Object for Commit {
    fn object_type(&self) -> ObjectType {
        ObjectType::Commit
    }

    fn display(&self) -> String {
        let mut lines = vec![format!("tree {}", self.tree_oid)];
        for parent in &self.parents {
            lines.push(format!("parent {parent}"));
        }
        lines.push(String::new());
        lines.push(self.message.clone());

        lines.join("\n")
    }
}
