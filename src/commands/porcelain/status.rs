use crate::areas::refs::MERGE_HEAD_REF_NAME;
use crate::areas::repository::Repository;
use crate::artifacts::branch::branch_name::RefName;
use crate::artifacts::diff::tree_diff::{ChangeKind, changed_files};
use colored::{ColoredString, Colorize};
use std::io::Write;
use std::path::PathBuf;

impl Repository {
    pub async fn status(&self) -> anyhow::Result<()> {
        let head = self.refs().read_head()?;
        let head_files = self.files_of(head.as_ref())?;
        let index_files = self.index_files().await?;
        let working_files = self.working_files(false)?;

        let staged = changed_files(&head_files, &index_files);
        let unstaged = changed_files(&index_files, &working_files);

        let mut writer = self.writer();
        match self.refs().head_target()? {
            Some(target) => {
                let branch = RefName::from_branch_ref(&target)
                    .map(|branch| branch.to_string())
                    .unwrap_or(target);
                writeln!(writer, "On branch {branch}")?;
            }
            None => {
                if let Some(head) = &head {
                    writeln!(writer, "HEAD detached at {}", head.to_short_oid())?;
                }
            }
        }

        if let Some(merge_head) = self.refs().read_oid(MERGE_HEAD_REF_NAME)? {
            writeln!(writer, "Merging with {}", merge_head.to_short_oid())?;
        }

        if staged.is_empty() && unstaged.is_empty() {
            writeln!(writer, "\nnothing to commit, working tree clean")?;
            return Ok(());
        }

        let sections: [(&str, &[(PathBuf, ChangeKind)], fn(&str) -> ColoredString); 2] = [
            ("Changes to be committed:", &staged, |line| line.green()),
            ("Changes not staged for commit:", &unstaged, |line| line.red()),
        ];

        for (title, changes, paint) in sections {
            if changes.is_empty() {
                continue;
            }

            writeln!(writer, "\n{title}")?;
            for (path, kind) in changes {
                let line = format!("{kind}: {}", path.display());
                writeln!(writer, "{}", paint(&line))?;
            }
        }

        Ok(())
    }
}
