//! Flat path map to hierarchical trees
//!
//! Paths are inserted into an arena of directory nodes keyed by path segment. Every
//! node is created after its parent, so walking the arena backwards visits children
//! before parents and each subtree id is known by the time its parent is encoded.
//! Neither building nor hashing recurses.

use crate::artifacts::core::error::TwigError;
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::objects::object_type::ObjectType;
use crate::artifacts::objects::tree::{Tree, TreeEntry};
use std::collections::BTreeMap;
use std::path::{Component, Path};

#[derive(Debug, Clone)]
enum Slot {
    Blob(ObjectId),
    Dir(usize),
}

#[derive(Debug, Default)]
struct Node {
    children: BTreeMap<String, Slot>,
}

#[derive(Debug)]
pub struct TreeBuilder {
    nodes: Vec<Node>,
}

impl Default for TreeBuilder {
    fn default() -> Self {
        Self {
            nodes: vec![Node::default()],
        }
    }
}

impl TreeBuilder {
    pub fn build<'e, P>(entries: impl IntoIterator<Item = (P, &'e ObjectId)>) -> anyhow::Result<Self>
    where
        P: AsRef<Path>,
    {
        let mut builder = Self::default();
        for (path, oid) in entries {
            builder.insert(path.as_ref(), oid.clone())?;
        }

        Ok(builder)
    }

    pub fn insert(&mut self, path: &Path, oid: ObjectId) -> anyhow::Result<()> {
        let segments = Self::segments(path)?;
        let Some((file_name, parents)) = segments.split_last() else {
            anyhow::bail!(TwigError::invalid_path(path, "empty path"));
        };

        let mut current = 0;
        for segment in parents {
            current = match self.nodes[current].children.get(*segment) {
                Some(Slot::Dir(child)) => *child,
                Some(Slot::Blob(_)) => anyhow::bail!(TwigError::invalid_path(
                    path,
                    format!("{segment:?} is both a file and a directory")
                )),
                None => {
                    let child = self.nodes.len();
                    self.nodes.push(Node::default());
                    self.nodes[current]
                        .children
                        .insert(segment.to_string(), Slot::Dir(child));
                    child
                }
            };
        }

        let children = &mut self.nodes[current].children;
        if let Some(Slot::Dir(_)) = children.get(*file_name) {
            anyhow::bail!(TwigError::invalid_path(
                path,
                "already used as a directory by another path"
            ));
        }
        children.insert(file_name.to_string(), Slot::Blob(oid));

        Ok(())
    }

    /// Encode every tree bottom-up, handing each to `store`, and return the root id
    ///
    /// `store` receives subtrees before the trees that reference them.
    pub fn write_with<F>(&self, mut store: F) -> anyhow::Result<ObjectId>
    where
        F: FnMut(&Tree) -> anyhow::Result<ObjectId>,
    {
        let mut ids: Vec<Option<ObjectId>> = vec![None; self.nodes.len()];

        for index in (0..self.nodes.len()).rev() {
            let mut tree = Tree::default();
            for (name, slot) in &self.nodes[index].children {
                let entry = match slot {
                    Slot::Blob(oid) => TreeEntry::new(oid.clone(), ObjectType::Blob),
                    Slot::Dir(child) => {
                        let oid = ids[*child].clone().ok_or_else(|| {
                            anyhow::anyhow!("subtree {name:?} was not written before its parent")
                        })?;
                        TreeEntry::new(oid, ObjectType::Tree)
                    }
                };
                tree.insert(name.clone(), entry)?;
            }

            ids[index] = Some(store(&tree)?);
        }

        ids.swap_remove(0)
            .ok_or_else(|| anyhow::anyhow!("root tree was not written"))
    }

    fn segments(path: &Path) -> anyhow::Result<Vec<&str>> {
        path.components()
            .map(|component| match component {
                Component::Normal(segment) => {
                    let segment = segment
                        .to_str()
                        .ok_or_else(|| TwigError::invalid_path(path, "not valid UTF-8"))?;
                    if segment.contains('\n') {
                        anyhow::bail!(TwigError::invalid_path(path, "contains a newline"));
                    }
                    Ok(segment)
                }
                _ => Err(TwigError::invalid_path(path, "not a plain relative path").into()),
            })
            .collect()
    }
}
