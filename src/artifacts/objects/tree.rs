//! Tree object
//!
//! Trees snapshot one directory level: each entry names a blob (file) or another
//! tree (subdirectory).
//!
//! ## Format
//!
//! One line per entry, sorted by name:
//!
//! ```text
//! <type> <object-id> <name>\n
//! ```
//!
//! Lines are split on the first two spaces only, so names may themselves contain
//! spaces. Names never contain `/` or a newline and are never `.` or `..`.

use crate::artifacts::core::error::TwigError;
use crate::artifacts::objects::object::{Object, Packable, Unpackable};
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::objects::object_type::ObjectType;
use bytes::Bytes;
use derive_new::new;
use std::collections::BTreeMap;
use std::path::PathBuf;

/// Flat view of a tree: repository-relative file path to blob id
pub type FlatTree = BTreeMap<PathBuf, ObjectId>;

/// One named child of a tree
#[derive(Debug, Clone, PartialEq, Eq, new)]
pub struct TreeEntry {
    pub oid: ObjectId,
    pub kind: ObjectType,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Tree {
    entries: BTreeMap<String, TreeEntry>,
}

impl Tree {
    /// Insert a child, rejecting names that cannot round-trip through a path
    pub fn insert(&mut self, name: impl Into<String>, entry: TreeEntry) -> anyhow::Result<()> {
        let name = name.into();
        Self::validate_name(&name)?;

        if entry.kind == ObjectType::Commit {
            anyhow::bail!(TwigError::CorruptObject(format!(
                "tree entry {name:?} cannot reference a commit"
            )));
        }

        self.entries.insert(name, entry);
        Ok(())
    }

    pub fn entries(&self) -> impl Iterator<Item = (&String, &TreeEntry)> {
        self.entries.iter()
    }

    pub fn into_entries(self) -> impl Iterator<Item = (String, TreeEntry)> {
        self.entries.into_iter()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn validate_name(name: &str) -> anyhow::Result<()> {
        let reason = if name.is_empty() {
            Some("empty name")
        } else if name == "." || name == ".." {
            Some("relative component")
        } else if name.contains('/') {
            Some("contains a path separator")
        } else if name.contains('\n') || name.contains('\0') {
            Some("contains a control character")
        } else {
            None
        };

        match reason {
            Some(reason) => Err(TwigError::CorruptObject(format!(
                "invalid tree entry name {name:?}: {reason}"
            ))
            .into()),
            None => Ok(()),
        }
    }
}

impl Packable for Tree {
    fn serialize(&self) -> anyhow::Result<Bytes> {
        let content = self
            .entries
            .iter()
            .map(|(name, entry)| format!("{} {} {}\n", entry.kind, entry.oid, name))
            .collect::<String>();

        Ok(Bytes::from(content))
    }
}

impl Unpackable for Tree {
    fn deserialize(content: &[u8]) -> anyhow::Result<Self> {
        let content = std::str::from_utf8(content)
            .map_err(|_| TwigError::CorruptObject("tree is not valid UTF-8".to_string()))?;

        let mut tree = Tree::default();
        for line in content.split_terminator('\n') {
            let mut fields = line.splitn(3, ' ');
            let (Some(kind), Some(oid), Some(name)) = (fields.next(), fields.next(), fields.next())
            else {
                anyhow::bail!(TwigError::CorruptObject(format!(
                    "malformed tree entry {line:?}"
                )));
            };

            let kind = ObjectType::try_from(kind)?;
            let oid = ObjectId::try_parse(oid).map_err(|_| {
                TwigError::CorruptObject(format!("bad object id in tree entry {line:?}"))
            })?;

            tree.insert(name, TreeEntry::new(oid, kind))?;
        }

        Ok(tree)
    }
}

impl Object for Tree {
    fn object_type(&self) -> ObjectType {
        ObjectType::Tree
    }

    fn display(&self) -> String {
        self.entries
            .iter()
            .map(|(name, entry)| format!("{} {}\t{}", entry.kind, entry.oid, name))
            .collect::<Vec<_>>()
            .join("\n")
    }
}
