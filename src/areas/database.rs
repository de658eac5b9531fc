//! Object database
//!
//! Content-addressed storage of blobs, trees and commits. Each object lives in its
//! own file at `objects/<2 hex>/<38 hex>` holding `<type>\0<content>`. Objects are
//! written to a temporary sibling and renamed into place, and a write of an object
//! that already exists is a no-op.

use crate::artifacts::core::error::TwigError;
use crate::artifacts::log::rev_list::CommitLoader;
use crate::artifacts::objects::blob::Blob;
use crate::artifacts::objects::commit::Commit;
use crate::artifacts::objects::object::{Object, Unpackable, frame, hash_object};
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::objects::object_type::ObjectType;
use crate::artifacts::objects::tree::{FlatTree, Tree};
use crate::artifacts::objects::tree_builder::TreeBuilder;
use anyhow::Context;
use bytes::Bytes;
use fake::rand;
use std::path::{Path, PathBuf};
use tracing::debug;

#[derive(Debug)]
pub struct Database {
    path: Box<Path>,
}

impl Database {
    pub fn new(path: Box<Path>) -> Self {
        Database { path }
    }

    pub fn objects_path(&self) -> &Path {
        &self.path
    }

    /// Store `content` as an object of `object_type` and return its id
    pub fn put(&self, content: &[u8], object_type: ObjectType) -> anyhow::Result<ObjectId> {
        let object_id = hash_object(object_type, content);
        let object_path = self.object_path(&object_id);

        if !object_path.exists() {
            self.write_object(&object_path, &frame(object_type, content))?;
            debug!(oid = %object_id, %object_type, "stored object");
        }

        Ok(object_id)
    }

    pub fn store(&self, object: &impl Object) -> anyhow::Result<ObjectId> {
        self.put(&object.serialize()?, object.object_type())
    }

    /// Content of `object_id`, checked against `expected` when given
    pub fn get(
        &self,
        object_id: &ObjectId,
        expected: Option<ObjectType>,
    ) -> anyhow::Result<Bytes> {
        let (object_type, content) = self.read_object(object_id)?;

        if let Some(expected) = expected
            && expected != object_type
        {
            anyhow::bail!(TwigError::CorruptObject(format!(
                "expected {expected}, got {object_type} for {object_id}"
            )));
        }

        Ok(content)
    }

    pub fn exists(&self, object_id: &ObjectId) -> bool {
        self.object_path(object_id).is_file()
    }

    /// Type tag of a stored object
    pub fn object_type(&self, object_id: &ObjectId) -> anyhow::Result<ObjectType> {
        Ok(self.read_object(object_id)?.0)
    }

    /// Copy one object's stored bytes from `self` into `destination`
    pub fn transfer(&self, object_id: &ObjectId, destination: &Database) -> anyhow::Result<()> {
        if destination.exists(object_id) {
            return Ok(());
        }

        let raw = self.read_raw(object_id)?;
        destination.write_object(&destination.object_path(object_id), &raw)?;
        debug!(oid = %object_id, "transferred object");

        Ok(())
    }

    pub fn parse_blob(&self, object_id: &ObjectId) -> anyhow::Result<Blob> {
        Blob::deserialize(&self.get(object_id, Some(ObjectType::Blob))?)
    }

    pub fn parse_tree(&self, object_id: &ObjectId) -> anyhow::Result<Tree> {
        Tree::deserialize(&self.get(object_id, Some(ObjectType::Tree))?)
    }

    pub fn parse_commit(&self, object_id: &ObjectId) -> anyhow::Result<Commit> {
        Commit::deserialize(&self.get(object_id, Some(ObjectType::Commit))?)
    }

    /// Store every tree needed to represent `entries` and return the root tree id
    pub fn build_tree<'e, P>(
        &self,
        entries: impl IntoIterator<Item = (P, &'e ObjectId)>,
    ) -> anyhow::Result<ObjectId>
    where
        P: AsRef<Path>,
    {
        TreeBuilder::build(entries)?.write_with(|tree| self.store(tree))
    }

    /// Every file path under `tree_id` mapped to its blob id
    pub fn flatten_tree(&self, tree_id: &ObjectId) -> anyhow::Result<FlatTree> {
        let mut files = FlatTree::new();
        let mut pending = vec![(PathBuf::new(), tree_id.clone())];

        while let Some((prefix, tree_id)) = pending.pop() {
            for (name, entry) in self.parse_tree(&tree_id)?.into_entries() {
                let path = prefix.join(&name);
                match entry.kind {
                    ObjectType::Blob => {
                        files.insert(path, entry.oid);
                    }
                    ObjectType::Tree => pending.push((path, entry.oid)),
                    ObjectType::Commit => anyhow::bail!(TwigError::CorruptObject(format!(
                        "tree {tree_id} references commit {}",
                        entry.oid
                    ))),
                }
            }
        }

        Ok(files)
    }

    /// Flatten an optional tree, treating `None` as the empty tree
    pub fn flatten_optional_tree(&self, tree_id: Option<&ObjectId>) -> anyhow::Result<FlatTree> {
        match tree_id {
            Some(tree_id) => self.flatten_tree(tree_id),
            None => Ok(FlatTree::new()),
        }
    }

    /// Content of a blob, or nothing for an absent id
    pub fn blob_content(&self, object_id: Option<&ObjectId>) -> anyhow::Result<Bytes> {
        match object_id {
            Some(object_id) => Ok(self.parse_blob(object_id)?.into_content()),
            None => Ok(Bytes::new()),
        }
    }

    fn object_path(&self, object_id: &ObjectId) -> PathBuf {
        self.path.join(object_id.to_path())
    }

    fn read_raw(&self, object_id: &ObjectId) -> anyhow::Result<Bytes> {
        let object_path = self.object_path(object_id);

        match std::fs::read(&object_path) {
            Ok(raw) => Ok(raw.into()),
            Err(error) if error.kind() == std::io::ErrorKind::NotFound => {
                Err(TwigError::MissingObject(object_id.clone()).into())
            }
            Err(error) => Err(error).with_context(|| {
                format!("Unable to read object file {}", object_path.display())
            }),
        }
    }

    fn read_object(&self, object_id: &ObjectId) -> anyhow::Result<(ObjectType, Bytes)> {
        let raw = self.read_raw(object_id)?;
        let (object_type, content) = ObjectType::split_header(&raw)?;
        let content = raw.slice_ref(content);

        Ok((object_type, content))
    }

    fn write_object(&self, object_path: &Path, raw: &[u8]) -> anyhow::Result<()> {
        let object_dir = object_path
            .parent()
            .with_context(|| format!("Invalid object path {}", object_path.display()))?;
        std::fs::create_dir_all(object_dir).with_context(|| {
            format!("Unable to create object directory {}", object_dir.display())
        })?;

        let temp_object_path = object_dir.join(Self::generate_temp_name());
        std::fs::write(&temp_object_path, raw).with_context(|| {
            format!("Unable to write object file {}", temp_object_path.display())
        })?;

        // rename the temp file to the object file to make it atomic
        std::fs::rename(&temp_object_path, object_path).with_context(|| {
            format!("Unable to rename object file to {}", object_path.display())
        })?;

        Ok(())
    }

    fn generate_temp_name() -> String {
        format!("tmp-obj-{}", rand::random::<u32>())
    }
}

impl CommitLoader for Database {
    fn parents(&self, commit_id: &ObjectId) -> anyhow::Result<Vec<ObjectId>> {
        Ok(self.parse_commit(commit_id)?.into_parents())
    }
}
