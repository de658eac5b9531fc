use crate::areas::repository::Repository;
use crate::artifacts::branch::revision::Revision;
use crate::artifacts::diff::tree_diff::TreeDiff;
use crate::artifacts::objects::object::hash_object;
use crate::artifacts::objects::object_type::ObjectType;
use crate::artifacts::objects::tree::FlatTree;
use colored::Colorize;
use std::io::Write;

impl Repository {
    /// Without `cached`: `name` (or the index) against the working area.
    /// With `cached`: `name` (or HEAD) against the index.
    pub async fn diff(&self, cached: bool, name: Option<&str>) -> anyhow::Result<()> {
        let from = match (cached, name) {
            (_, Some(name)) => {
                let commit_id = Revision::new(name).resolve(self.refs())?;
                self.files_of(Some(&commit_id))?
            }
            (true, None) => self.files_of(self.refs().read_head()?.as_ref())?,
            (false, None) => self.index_files().await?,
        };

        let to = match cached {
            true => self.index_files().await?,
            false => self.working_files(true)?,
        };

        let differ = self.differ();
        let report = TreeDiff::new(self.database(), differ.as_ref()).report(&from, &to)?;

        self.print_report(&report)
    }

    pub(crate) async fn index_files(&self) -> anyhow::Result<FlatTree> {
        let index = self.index();
        let mut index = index.lock().await;

        index.rehydrate()?;

        Ok(index.to_flat_tree())
    }

    /// Working area files mapped to their blob ids, stored as blobs when `store` is set
    pub(crate) fn working_files(&self, store: bool) -> anyhow::Result<FlatTree> {
        let mut files = FlatTree::new();
        for path in self.workspace().list_files()? {
            let content = self.workspace().read_file(&path)?;
            let blob_id = match store {
                true => self.database().put(&content, ObjectType::Blob)?,
                false => hash_object(ObjectType::Blob, &content),
            };
            files.insert(path, blob_id);
        }

        Ok(files)
    }

    pub(crate) fn print_report(&self, report: &str) -> anyhow::Result<()> {
        let mut writer = self.writer();

        for line in report.lines() {
            if line.starts_with("diff --twig")
                || line.starts_with("--- ")
                || line.starts_with("+++ ")
                || line == "new file"
                || line == "deleted file"
            {
                writeln!(writer, "{}", line.bold())?;
            } else if line.starts_with("@@") {
                writeln!(writer, "{}", line.cyan())?;
            } else if line.starts_with('+') {
                writeln!(writer, "{}", line.green())?;
            } else if line.starts_with('-') {
                writeln!(writer, "{}", line.red())?;
            } else {
                writeln!(writer, "{line}")?;
            }
        }

        Ok(())
    }
}
