use crate::areas::repository::Repository;
use crate::artifacts::core::error::TwigError;
use crate::artifacts::objects::object_type::ObjectType;
use std::collections::BTreeSet;
use std::path::{Component, Path, PathBuf};
use tracing::debug;

impl Repository {
    /// Stage every file at or below each of `paths`
    ///
    /// Tracked files that are gone from the working area are unstaged. Nothing is
    /// written to the index unless every path could be processed.
    pub async fn add(&self, paths: &[PathBuf]) -> anyhow::Result<()> {
        let index = self.index();
        let mut index = index.lock().await;

        index.rehydrate()?;

        for path in paths {
            let relative = self.workspace_relative(path)?;
            let on_disk = self.workspace().path().join(&relative).exists();

            if !on_disk && !index.is_tracked(&relative) {
                anyhow::bail!(
                    "pathspec '{}' did not match any files",
                    path.display()
                );
            }

            let files = self.workspace().list_files_under(&relative)?;
            for file in &files {
                let content = self.workspace().read_file(file)?;
                let blob_id = self.database().put(&content, ObjectType::Blob)?;
                index.add(file.clone(), blob_id);
            }

            let present = files.into_iter().collect::<BTreeSet<_>>();
            let vanished = index
                .entries()
                .map(|(tracked, _)| tracked)
                .filter(|tracked| tracked.starts_with(&relative) && !present.contains(*tracked))
                .cloned()
                .collect::<Vec<_>>();
            for tracked in vanished {
                debug!(path = %tracked.display(), "unstaged deleted file");
                index.remove(&tracked);
            }
        }

        index.write_updates()?;

        Ok(())
    }

    /// `path` relative to the repository root, without `.` components
    fn workspace_relative(&self, path: &Path) -> anyhow::Result<PathBuf> {
        let relative = match path.is_absolute() {
            true => path
                .strip_prefix(self.path())
                .map_err(|_| TwigError::invalid_path(path, "outside the repository"))?,
            false => path,
        };

        let mut normalized = PathBuf::new();
        for component in relative.components() {
            match component {
                Component::CurDir => {}
                Component::Normal(name) => normalized.push(name),
                _ => anyhow::bail!(TwigError::invalid_path(path, "not inside the repository")),
            }
        }

        Ok(normalized)
    }
}
