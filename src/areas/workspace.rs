//! Working area
//!
//! The checked-out files around the metadata directory. Every path handed to or
//! returned from a [`Workspace`] is relative to its root.

use crate::areas::repository::METADATA_DIR;
use anyhow::Context;
use bytes::Bytes;
use std::collections::BTreeSet;
use std::path::{Component, Path, PathBuf};
use tracing::debug;
use walkdir::WalkDir;

#[derive(Debug)]
pub struct Workspace {
    path: Box<Path>,
}

impl Workspace {
    pub fn new(path: Box<Path>) -> Self {
        Workspace { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Whether any component of `path` is the metadata directory
    pub fn is_ignored(path: &Path) -> bool {
        path.components()
            .any(|component| matches!(component, Component::Normal(name) if name == METADATA_DIR))
    }

    /// Every non-ignored file in the working area, in path order
    pub fn list_files(&self) -> anyhow::Result<Vec<PathBuf>> {
        self.list_files_under(Path::new(""))
    }

    /// Non-ignored files at or below `relative`; a missing path yields nothing
    pub fn list_files_under(&self, relative: &Path) -> anyhow::Result<Vec<PathBuf>> {
        let root = self.path.join(relative);
        if !root.exists() || Self::is_ignored(relative) {
            return Ok(Vec::new());
        }

        let mut files = Vec::new();
        let walker = WalkDir::new(&root)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|entry| entry.file_name() != METADATA_DIR);

        for entry in walker {
            let entry = entry.with_context(|| format!("Unable to list {}", root.display()))?;
            if !entry.file_type().is_file() {
                continue;
            }

            let relative = entry
                .path()
                .strip_prefix(self.path.as_ref())
                .with_context(|| format!("{} is outside the workspace", entry.path().display()))?;
            files.push(relative.to_path_buf());
        }

        Ok(files)
    }

    pub fn is_file(&self, relative: &Path) -> bool {
        self.path.join(relative).is_file()
    }

    pub fn read_file(&self, relative: &Path) -> anyhow::Result<Bytes> {
        let file_path = self.path.join(relative);
        let content = std::fs::read(&file_path)
            .with_context(|| format!("Unable to read {}", file_path.display()))?;

        Ok(content.into())
    }

    pub fn write_file(&self, relative: &Path, content: &[u8]) -> anyhow::Result<()> {
        let file_path = self.path.join(relative);
        if let Some(parent) = file_path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Unable to create directory {}", parent.display()))?;
        }

        std::fs::write(&file_path, content)
            .with_context(|| format!("Unable to write {}", file_path.display()))
    }

    /// Delete the given tracked files, then any of their directories left empty
    ///
    /// Ignored paths are never touched. A directory that still holds untracked
    /// content is left in place.
    pub fn clear<'p>(&self, tracked: impl IntoIterator<Item = &'p PathBuf>) -> anyhow::Result<()> {
        let mut directories = BTreeSet::new();

        for relative in tracked {
            if Self::is_ignored(relative) {
                continue;
            }

            let file_path = self.path.join(relative);
            match std::fs::remove_file(&file_path) {
                Ok(()) => {}
                Err(error) if error.kind() == std::io::ErrorKind::NotFound => {}
                Err(error) => {
                    return Err(error)
                        .with_context(|| format!("Unable to remove {}", file_path.display()));
                }
            }

            directories.extend(
                relative
                    .ancestors()
                    .skip(1)
                    .filter(|dir| !dir.as_os_str().is_empty())
                    .map(Path::to_path_buf),
            );
        }

        // deepest first, so children go before their parents
        let mut directories = directories.into_iter().collect::<Vec<_>>();
        directories.sort_by_key(|dir| std::cmp::Reverse(dir.components().count()));

        for dir in directories {
            if let Err(error) = std::fs::remove_dir(self.path.join(&dir)) {
                debug!(dir = %dir.display(), %error, "kept directory");
            }
        }

        Ok(())
    }

    /// Write every file in `files`, creating directories as needed
    pub fn materialize<I, P>(&self, files: I) -> anyhow::Result<()>
    where
        I: IntoIterator<Item = (P, Bytes)>,
        P: AsRef<Path>,
    {
        for (relative, content) in files {
            self.write_file(relative.as_ref(), &content)?;
        }

        Ok(())
    }
}
