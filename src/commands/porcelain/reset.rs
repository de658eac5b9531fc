use crate::areas::refs::{HEAD_REF_NAME, RefValue};
use crate::areas::repository::Repository;
use crate::artifacts::branch::revision::Revision;
use std::io::Write;

impl Repository {
    /// Point HEAD (through its branch) at `name`, leaving index and files alone
    pub async fn reset(&self, name: &str) -> anyhow::Result<()> {
        let commit_id = Revision::new(name).resolve(self.refs())?;
        self.database().parse_commit(&commit_id)?;

        self.refs()
            .update_ref(HEAD_REF_NAME, RefValue::Direct(commit_id.clone()), true)?;

        writeln!(self.writer(), "HEAD is now at {}", commit_id.to_short_oid())?;

        Ok(())
    }
}
