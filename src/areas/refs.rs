//! References (branches, tags, HEAD, MERGE_HEAD)
//!
//! A reference is a named pointer stored as a small text file under the metadata
//! directory. Its value is either:
//! - Direct: a 40-character object id
//! - Symbolic: `ref: <other ref name>` (e.g., HEAD -> refs/heads/master)
//!
//! Symbolic chains are followed by a bounded loop that remembers every name it has
//! visited, so a cycle is reported instead of followed forever.
//!
//! ## Reference Types
//!
//! - HEAD: the current branch (symbolic) or a detached commit (direct)
//! - MERGE_HEAD: the other side of an in-progress merge
//! - Branches: refs/heads/*
//! - Tags: refs/tags/*
//! - Remote-tracking: refs/remote/*

use crate::artifacts::core::error::TwigError;
use crate::artifacts::objects::object_id::ObjectId;
use anyhow::Context;
use derive_new::new;
use std::collections::HashSet;
use std::ffi::OsStr;
use std::path::{Component, Path, PathBuf};
use tracing::debug;
use walkdir::WalkDir;

/// Regex pattern for parsing symbolic references
const SYMREF_REGEX: &str = r"^ref:\s*(.*)$";

/// Longest symbolic chain that will be followed
pub const MAX_SYMREF_DEPTH: usize = 16;

pub const HEAD_REF_NAME: &str = "HEAD";
pub const MERGE_HEAD_REF_NAME: &str = "MERGE_HEAD";

/// Value stored in a ref file
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RefValue {
    Direct(ObjectId),
    Symbolic(String),
}

impl RefValue {
    /// Parse the content of the ref file `name`
    pub fn parse(name: &str, raw: &str) -> anyhow::Result<Self> {
        let content = raw.trim();
        if content.is_empty() {
            anyhow::bail!(TwigError::InvalidRefValue {
                name: name.to_string(),
                reason: "empty value".to_string(),
            });
        }

        let symref_match = regex::Regex::new(SYMREF_REGEX)?.captures(content);
        if let Some(symref_match) = symref_match {
            let target = symref_match[1].trim();
            if target.is_empty() {
                anyhow::bail!(TwigError::InvalidRefValue {
                    name: name.to_string(),
                    reason: "symbolic ref with no target".to_string(),
                });
            }
            return Ok(RefValue::Symbolic(target.to_string()));
        }

        ObjectId::try_parse(content)
            .map(RefValue::Direct)
            .map_err(|_| {
                TwigError::CorruptRef {
                    name: name.to_string(),
                    reason: format!("{content:?} is neither an object id nor a symbolic ref"),
                }
                .into()
            })
    }

    fn encode(&self) -> String {
        match self {
            RefValue::Direct(oid) => oid.to_string(),
            RefValue::Symbolic(target) => format!("ref: {target}"),
        }
    }

    pub fn as_oid(&self) -> Option<&ObjectId> {
        match self {
            RefValue::Direct(oid) => Some(oid),
            RefValue::Symbolic(_) => None,
        }
    }
}

impl std::fmt::Display for RefValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.encode())
    }
}

/// Outcome of following a ref: the last name reached and its value, if any
#[derive(Debug, Clone, PartialEq, Eq, new)]
pub struct ResolvedRef {
    pub name: String,
    pub value: Option<RefValue>,
}

impl ResolvedRef {
    pub fn oid(&self) -> Option<&ObjectId> {
        self.value.as_ref().and_then(RefValue::as_oid)
    }
}

#[derive(Debug, new)]
pub struct Refs {
    /// Path to the metadata directory (typically `.twig`)
    path: Box<Path>,
}

impl Refs {
    pub fn refs_path(&self) -> PathBuf {
        self.path.join("refs")
    }

    /// Follow `name` to its terminal value
    ///
    /// With `dereference`, symbolic values are chased; otherwise the value stored at
    /// `name` itself is returned. A missing ref is not an error: its value is `None`.
    pub fn resolve(&self, name: &str, dereference: bool) -> anyhow::Result<ResolvedRef> {
        let mut current = name.to_string();
        let mut visited = HashSet::new();

        for _ in 0..=MAX_SYMREF_DEPTH {
            if !visited.insert(current.clone()) {
                break;
            }

            match self.read_value(&current)? {
                Some(RefValue::Symbolic(target)) if dereference => current = target,
                value => return Ok(ResolvedRef::new(current, value)),
            }
        }

        Err(TwigError::RefCycle(name.to_string()).into())
    }

    /// Store `value` at `name`, or at the end of its symbolic chain with `dereference`
    pub fn update_ref(&self, name: &str, value: RefValue, dereference: bool) -> anyhow::Result<()> {
        if let RefValue::Symbolic(target) = &value
            && target.trim().is_empty()
        {
            anyhow::bail!(TwigError::InvalidRefValue {
                name: name.to_string(),
                reason: "symbolic ref with no target".to_string(),
            });
        }

        let target = match dereference {
            true => self.resolve(name, true)?.name,
            false => name.to_string(),
        };

        let ref_path = self.ref_path(&target)?;
        let ref_dir = ref_path
            .parent()
            .with_context(|| format!("Invalid ref path {}", ref_path.display()))?;
        std::fs::create_dir_all(ref_dir)
            .with_context(|| format!("Unable to create ref directory {}", ref_dir.display()))?;

        let lock_path = Self::lock_path(&ref_path);
        std::fs::write(&lock_path, value.encode())
            .with_context(|| format!("Unable to write ref file {}", lock_path.display()))?;
        std::fs::rename(&lock_path, &ref_path)
            .with_context(|| format!("Unable to rename ref file to {}", ref_path.display()))?;

        debug!(name = %target, value = %value, "updated ref");
        Ok(())
    }

    /// Remove `name`, or the end of its symbolic chain with `dereference`
    ///
    /// Deleting a ref that does not exist is a no-op.
    pub fn delete_ref(&self, name: &str, dereference: bool) -> anyhow::Result<()> {
        let target = match dereference {
            true => self.resolve(name, true)?.name,
            false => name.to_string(),
        };
        let ref_path = self.ref_path(&target)?;

        match std::fs::remove_file(&ref_path) {
            Ok(()) => {
                debug!(name = %target, "deleted ref");
                Ok(())
            }
            Err(error) if error.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(error) => Err(error)
                .with_context(|| format!("Unable to delete ref file {}", ref_path.display())),
        }
    }

    /// Every ref whose name starts with `prefix` and that resolves to an object id
    ///
    /// HEAD and MERGE_HEAD come first, then everything under `refs/` in name order.
    pub fn list_refs(&self, prefix: &str) -> anyhow::Result<Vec<(String, ObjectId)>> {
        let mut names = vec![HEAD_REF_NAME.to_string(), MERGE_HEAD_REF_NAME.to_string()];
        names.extend(self.ref_names_under_refs()?);

        let mut refs = Vec::new();
        for name in names.into_iter().filter(|name| name.starts_with(prefix)) {
            if let Some(oid) = self.resolve(&name, true)?.oid() {
                refs.push((name, oid.clone()));
            }
        }

        Ok(refs)
    }

    /// Object id at the end of `name`'s chain, if it has one
    pub fn read_oid(&self, name: &str) -> anyhow::Result<Option<ObjectId>> {
        Ok(self.resolve(name, true)?.oid().cloned())
    }

    pub fn read_head(&self) -> anyhow::Result<Option<ObjectId>> {
        self.read_oid(HEAD_REF_NAME)
    }

    /// Name of the ref HEAD points at, or `None` when HEAD is detached
    pub fn head_target(&self) -> anyhow::Result<Option<String>> {
        match self.resolve(HEAD_REF_NAME, false)?.value {
            Some(RefValue::Symbolic(target)) => Ok(Some(target)),
            _ => Ok(None),
        }
    }

    pub fn exists(&self, name: &str) -> anyhow::Result<bool> {
        Ok(self.ref_path(name)?.is_file())
    }

    fn read_value(&self, name: &str) -> anyhow::Result<Option<RefValue>> {
        let ref_path = self.ref_path(name)?;

        match std::fs::read_to_string(&ref_path) {
            Ok(content) => RefValue::parse(name, &content).map(Some),
            Err(error)
                if matches!(
                    error.kind(),
                    std::io::ErrorKind::NotFound | std::io::ErrorKind::IsADirectory
                ) =>
            {
                Ok(None)
            }
            Err(error) => {
                Err(error).with_context(|| format!("Unable to read ref file {}", ref_path.display()))
            }
        }
    }

    fn ref_names_under_refs(&self) -> anyhow::Result<Vec<String>> {
        let refs_path = self.refs_path();
        let mut names = Vec::new();
        if !refs_path.is_dir() {
            return Ok(names);
        }

        for entry in WalkDir::new(&refs_path).sort_by_file_name() {
            let entry = entry.with_context(|| format!("Unable to list {}", refs_path.display()))?;
            if !entry.file_type().is_file() || entry.path().extension() == Some(OsStr::new("lock")) {
                continue;
            }

            let relative = entry
                .path()
                .strip_prefix(self.path.as_ref())
                .with_context(|| format!("Ref outside metadata dir {}", entry.path().display()))?;
            let segments = relative
                .components()
                .map(|component| component.as_os_str().to_string_lossy().into_owned())
                .collect::<Vec<_>>();
            names.push(segments.join("/"));
        }

        Ok(names)
    }

    /// File backing `name`, refusing names that would escape the metadata directory
    fn ref_path(&self, name: &str) -> anyhow::Result<PathBuf> {
        let relative = Path::new(name);
        let is_plain = !name.is_empty()
            && relative
                .components()
                .all(|component| matches!(component, Component::Normal(_)));

        if !is_plain {
            anyhow::bail!(TwigError::UnknownRef(name.to_string()));
        }

        Ok(self.path.join(relative))
    }

    fn lock_path(ref_path: &Path) -> PathBuf {
        let mut lock_name = ref_path.as_os_str().to_owned();
        lock_name.push(".lock");
        PathBuf::from(lock_name)
    }
}
