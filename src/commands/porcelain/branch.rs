use crate::areas::refs::RefValue;
use crate::areas::repository::Repository;
use crate::artifacts::branch::branch_name::RefName;
use crate::artifacts::branch::revision::Revision;
use crate::artifacts::branch::{HEAD_ALIAS, HEADS_PREFIX};
use colored::Colorize;
use std::io::Write;

impl Repository {
    /// List branches, or create `name` at `start` (default HEAD)
    pub async fn branch(&self, name: Option<&str>, start: Option<&str>) -> anyhow::Result<()> {
        match name {
            Some(name) => self.create_branch(name, start.unwrap_or(HEAD_ALIAS)),
            None => self.list_branches(),
        }
    }

    fn create_branch(&self, name: &str, start: &str) -> anyhow::Result<()> {
        let branch = RefName::try_parse(name)?;
        let branch_ref = branch.branch_ref();
        if self.refs().read_oid(&branch_ref)?.is_some() {
            anyhow::bail!("a branch named '{branch}' already exists");
        }

        let start_id = Revision::new(start).resolve(self.refs())?;
        self.database().parse_commit(&start_id)?;
        self.refs()
            .update_ref(&branch_ref, RefValue::Direct(start_id.clone()), true)?;

        writeln!(
            self.writer(),
            "Branch '{}' created at {}",
            branch,
            start_id.to_short_oid()
        )?;

        Ok(())
    }

    fn list_branches(&self) -> anyhow::Result<()> {
        let current = self.refs().head_target()?;
        let mut writer = self.writer();

        for (full_name, _) in self.refs().list_refs(HEADS_PREFIX)? {
            let Some(short_name) = full_name.strip_prefix(HEADS_PREFIX) else {
                continue;
            };

            match current.as_deref() == Some(full_name.as_str()) {
                true => writeln!(writer, "* {}", short_name.green())?,
                false => writeln!(writer, "  {short_name}")?,
            }
        }

        Ok(())
    }
}
