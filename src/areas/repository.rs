use crate::areas::database::Database;
use crate::areas::index::Index;
use crate::areas::refs::Refs;
use crate::areas::workspace::Workspace;
use crate::artifacts::core::config::Config;
use crate::artifacts::core::error::TwigError;
use crate::artifacts::diff::text_diff::TextDiffer;
use crate::artifacts::merge::text_merge::ThreeWayMerger;
use anyhow::Context;
use std::cell::{RefCell, RefMut};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::sync::Mutex;

/// Name of the directory holding all repository state
pub const METADATA_DIR: &str = ".twig";

/// Explicit handle on one repository: every operation goes through one of these,
/// so two repositories (e.g. local and remote) can be used side by side
pub struct Repository {
    path: Box<Path>,
    writer: RefCell<Box<dyn std::io::Write>>,
    index: Arc<Mutex<Index>>,
    database: Database,
    workspace: Workspace,
    refs: Refs,
    config: Config,
}

impl Repository {
    /// Handle on the repository rooted at `path`, whether or not it was initialized
    pub fn new(
        path: &Path,
        writer: Box<dyn std::io::Write>,
        config: Config,
    ) -> anyhow::Result<Self> {
        if !path.exists() {
            std::fs::create_dir_all(path)
                .with_context(|| format!("Unable to create {}", path.display()))?;
        }
        let path = path
            .canonicalize()
            .with_context(|| format!("Unable to resolve {}", path.display()))?;
        let metadata_path = path.join(METADATA_DIR);

        Ok(Repository {
            index: Arc::new(Mutex::new(Index::new(
                metadata_path.join("index").into_boxed_path(),
            ))),
            database: Database::new(metadata_path.join("objects").into_boxed_path()),
            workspace: Workspace::new(path.clone().into_boxed_path()),
            refs: Refs::new(metadata_path.into_boxed_path()),
            path: path.into_boxed_path(),
            writer: RefCell::new(writer),
            config,
        })
    }

    /// Handle on an initialized repository at `path`
    pub fn open(
        path: &Path,
        writer: Box<dyn std::io::Write>,
        config: Config,
    ) -> anyhow::Result<Self> {
        if !path.join(METADATA_DIR).is_dir() {
            anyhow::bail!(TwigError::NotARepository(path.to_path_buf()));
        }

        Self::new(path, writer, config)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn metadata_path(&self) -> PathBuf {
        self.path.join(METADATA_DIR)
    }

    pub fn writer(&'_ self) -> RefMut<'_, Box<dyn std::io::Write>> {
        self.writer.borrow_mut()
    }

    pub fn index(&self) -> Arc<Mutex<Index>> {
        self.index.clone()
    }

    pub fn database(&self) -> &Database {
        &self.database
    }

    pub fn workspace(&self) -> &Workspace {
        &self.workspace
    }

    pub fn refs(&self) -> &Refs {
        &self.refs
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn differ(&self) -> Box<dyn TextDiffer> {
        self.config.differ()
    }

    pub fn merger(&self) -> Box<dyn ThreeWayMerger> {
        self.config.merger()
    }
}
