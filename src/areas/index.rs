//! Staging index
//!
//! The index is the flat `path -> blob id` mapping that becomes the next commit's
//! tree. A command loads it once with [`Index::rehydrate`], mutates it in memory and
//! persists it with a single [`Index::write_updates`]. The file is rewritten through
//! a temporary sibling and renamed into place, so a failed command leaves the
//! previous index intact.
//!
//! ## Index File Format
//!
//! See [`crate::artifacts::index`].

use crate::artifacts::index::checksum::Checksum;
use crate::artifacts::index::index_entry::{ENTRY_PREFIX_SIZE, IndexEntry};
use crate::artifacts::index::index_header::IndexHeader;
use crate::artifacts::index::HEADER_SIZE;
use crate::artifacts::objects::object::{Packable, Unpackable};
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::objects::tree::FlatTree;
use anyhow::Context;
use byteorder::ByteOrder;
use std::io::{BufReader, BufWriter};
use std::path::{Path, PathBuf};
use tracing::debug;

#[derive(Debug, Clone)]
pub struct Index {
    /// Path to the index file (typically `.twig/index`)
    path: Box<Path>,
    /// Tracked files mapped by path
    entries: FlatTree,
    /// Flag indicating if the index has been modified since loading
    changed: bool,
}

impl Index {
    pub fn new(path: Box<Path>) -> Self {
        Index {
            path,
            entries: FlatTree::new(),
            changed: false,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the index from disk
    ///
    /// A missing or empty file is an empty index.
    pub fn rehydrate(&mut self) -> anyhow::Result<()> {
        self.entries.clear();
        self.changed = false;

        let index_file = match std::fs::File::open(self.path()) {
            Ok(file) => file,
            Err(error) if error.kind() == std::io::ErrorKind::NotFound => return Ok(()),
            Err(error) => {
                return Err(error)
                    .with_context(|| format!("Unable to open index {}", self.path.display()));
            }
        };

        if index_file.metadata()?.len() == 0 {
            return Ok(());
        }

        let mut reader = Checksum::new(BufReader::new(index_file));
        let header = IndexHeader::deserialize(&reader.read(HEADER_SIZE)?)?;
        header.validate()?;

        for _ in 0..header.entries_count {
            let entry = Self::parse_entry(&mut reader)?;
            self.entries.insert(entry.name, entry.oid);
        }

        reader.verify()?;
        debug!(entries = self.entries.len(), "loaded index");

        Ok(())
    }

    fn parse_entry<R: std::io::Read>(reader: &mut Checksum<R>) -> anyhow::Result<IndexEntry> {
        let prefix = reader.read(ENTRY_PREFIX_SIZE)?;
        let name_len = byteorder::NetworkEndian::read_u16(&prefix[20..22]) as usize;
        let rest = reader.read(IndexEntry::padded_size(name_len) - ENTRY_PREFIX_SIZE)?;

        IndexEntry::deserialize(&[prefix.as_ref(), rest.as_ref()].concat())
    }

    pub fn entries(&self) -> impl Iterator<Item = (&PathBuf, &ObjectId)> {
        self.entries.iter()
    }

    pub fn to_flat_tree(&self) -> FlatTree {
        self.entries.clone()
    }

    pub fn get(&self, path: &Path) -> Option<&ObjectId> {
        self.entries.get(path)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Whether `path` is a tracked file or a directory containing one
    pub fn is_tracked(&self, path: &Path) -> bool {
        self.entries.keys().any(|entry| entry.starts_with(path))
    }

    /// Stage `oid` at `path`, evicting entries that would make the path set
    /// unrepresentable as a tree (a file where a directory is needed or vice versa)
    pub fn add(&mut self, path: PathBuf, oid: ObjectId) {
        self.discard_conflicts(&path);
        self.entries.insert(path, oid);
        self.changed = true;
    }

    /// Untrack `path` and anything beneath it
    pub fn remove(&mut self, path: &Path) {
        let before = self.entries.len();
        self.entries.retain(|entry, _| !entry.starts_with(path));
        self.changed |= self.entries.len() != before;
    }

    /// Replace the whole mapping, as checkout and read-tree do
    pub fn replace(&mut self, entries: FlatTree) {
        self.entries = entries;
        self.changed = true;
    }

    fn discard_conflicts(&mut self, path: &Path) {
        for parent in path.ancestors().skip(1) {
            self.entries.remove(parent);
        }
        self.entries
            .retain(|entry, _| entry == path || !entry.starts_with(path));
    }

    /// Persist the in-memory mapping if it changed since it was loaded
    pub fn write_updates(&mut self) -> anyhow::Result<()> {
        if !self.changed {
            return Ok(());
        }

        let temp_path = self.path.with_extension("tmp");
        let temp_file = std::fs::File::create(&temp_path)
            .with_context(|| format!("Unable to create {}", temp_path.display()))?;
        let mut writer = Checksum::new(BufWriter::new(temp_file));

        let header = IndexHeader::for_entries(u32::try_from(self.entries.len())?);
        writer.write(&header.serialize()?)?;

        for (name, oid) in &self.entries {
            let entry = IndexEntry::new(name.clone(), oid.clone());
            writer.write(&entry.serialize()?)?;
        }
        writer.write_checksum()?;
        drop(writer);

        std::fs::rename(&temp_path, &self.path)
            .with_context(|| format!("Unable to replace index {}", self.path.display()))?;

        debug!(entries = self.entries.len(), "wrote index");
        self.changed = false;

        Ok(())
    }
}
