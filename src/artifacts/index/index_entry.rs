//! Index entry representation
//!
//! Each entry maps one tracked path to the blob staged for it. Entries are stored
//! with 8-byte alignment; the path length is recorded explicitly so no terminator
//! is needed.

use crate::artifacts::core::error::TwigError;
use crate::artifacts::objects::object::{Packable, Unpackable};
use crate::artifacts::objects::object_id::ObjectId;
use byteorder::{ByteOrder, WriteBytesExt};
use bytes::Bytes;
use derive_new::new;
use std::io::Write;
use std::path::{Component, PathBuf};

/// Block size for entry alignment (8 bytes)
pub const ENTRY_BLOCK: usize = 8;

/// Fixed-size prefix of every entry: 20 id bytes and the 2-byte path length
pub const ENTRY_PREFIX_SIZE: usize = 22;

#[derive(Debug, Clone, PartialEq, Eq, new)]
pub struct IndexEntry {
    /// File path relative to repository root
    pub name: PathBuf,
    pub oid: ObjectId,
}

impl IndexEntry {
    /// Stored size of an entry whose path is `path_len` bytes long, padding included
    pub fn padded_size(path_len: usize) -> usize {
        (ENTRY_PREFIX_SIZE + path_len).div_ceil(ENTRY_BLOCK) * ENTRY_BLOCK
    }

    /// `/`-joined form of the path, independent of the host separator
    fn encoded_name(&self) -> anyhow::Result<String> {
        let segments = self
            .name
            .components()
            .map(|component| match component {
                Component::Normal(segment) => segment.to_str().ok_or_else(|| {
                    TwigError::invalid_path(&self.name, "not valid UTF-8").into()
                }),
                _ => Err(anyhow::Error::from(TwigError::invalid_path(
                    &self.name,
                    "not a plain relative path",
                ))),
            })
            .collect::<anyhow::Result<Vec<_>>>()?;

        Ok(segments.join("/"))
    }
}

impl Packable for IndexEntry {
    fn serialize(&self) -> anyhow::Result<Bytes> {
        let entry_name = self.encoded_name()?;
        let name_len = u16::try_from(entry_name.len())
            .map_err(|_| TwigError::invalid_path(&self.name, "path too long for the index"))?;

        let mut entry_bytes = Vec::with_capacity(Self::padded_size(entry_name.len()));
        self.oid.write_h40_to(&mut entry_bytes)?;
        entry_bytes.write_u16::<byteorder::NetworkEndian>(name_len)?;
        entry_bytes.write_all(entry_name.as_bytes())?;

        while entry_bytes.len() % ENTRY_BLOCK != 0 {
            entry_bytes.push(0);
        }

        Ok(Bytes::from(entry_bytes))
    }
}

impl Unpackable for IndexEntry {
    /// Decode an entry from its fixed prefix followed by at least the path bytes
    fn deserialize(bytes: &[u8]) -> anyhow::Result<Self> {
        if bytes.len() < ENTRY_PREFIX_SIZE {
            anyhow::bail!(TwigError::CorruptIndex("truncated entry".to_string()));
        }

        let oid = ObjectId::read_h40_from(&mut &bytes[0..20])?;
        let name_len = byteorder::NetworkEndian::read_u16(&bytes[20..22]) as usize;

        let name_bytes = bytes
            .get(ENTRY_PREFIX_SIZE..ENTRY_PREFIX_SIZE + name_len)
            .ok_or_else(|| TwigError::CorruptIndex("truncated entry path".to_string()))?;
        let name = std::str::from_utf8(name_bytes)
            .map_err(|_| TwigError::CorruptIndex("entry path is not valid UTF-8".to_string()))?;

        if name.is_empty() {
            anyhow::bail!(TwigError::CorruptIndex("empty entry path".to_string()));
        }

        Ok(IndexEntry::new(PathBuf::from(name), oid))
    }
}
