use crate::areas::refs::{HEAD_REF_NAME, RefValue};
use crate::areas::repository::Repository;
use crate::artifacts::branch::branch_name::RefName;
use crate::artifacts::branch::revision::Revision;

impl Repository {
    /// Switch the index and working area to `name`
    ///
    /// HEAD follows a branch symbolically; any other name detaches it.
    pub async fn checkout(&self, name: &str) -> anyhow::Result<()> {
        let commit_id = Revision::new(name).resolve(self.refs())?;
        let commit = self.database().parse_commit(&commit_id)?;

        self.load_tree(commit.tree_oid(), true).await?;

        match self.branch_ref_for(name)? {
            Some(branch_ref) => {
                self.refs()
                    .update_ref(HEAD_REF_NAME, RefValue::Symbolic(branch_ref), false)?;
                eprintln!("Switched to branch '{name}'");
            }
            None => {
                self.refs()
                    .update_ref(HEAD_REF_NAME, RefValue::Direct(commit_id.clone()), false)?;
                eprintln!(
                    "HEAD is now at {} {}",
                    commit_id.to_short_oid(),
                    commit.short_message()
                );
            }
        }

        Ok(())
    }

    /// `refs/heads/<name>` when `name` is an existing branch
    fn branch_ref_for(&self, name: &str) -> anyhow::Result<Option<String>> {
        let Ok(branch) = RefName::try_parse(name) else {
            return Ok(None);
        };

        let branch_ref = branch.branch_ref();
        match self.refs().exists(&branch_ref)? {
            true => Ok(Some(branch_ref)),
            false => Ok(None),
        }
    }
}
