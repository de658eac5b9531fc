use crate::areas::refs::{HEAD_REF_NAME, MERGE_HEAD_REF_NAME, RefValue};
use crate::areas::repository::Repository;
use crate::artifacts::objects::commit::Commit;
use crate::artifacts::objects::object_id::ObjectId;
use tracing::info;

impl Repository {
    /// Store a commit of `tree_id` and move HEAD (through its branch) onto it
    ///
    /// A pending MERGE_HEAD becomes an extra parent and is cleared.
    pub fn write_commit(
        &self,
        tree_id: ObjectId,
        mut parents: Vec<ObjectId>,
        message: &str,
    ) -> anyhow::Result<ObjectId> {
        let merge_head = self.refs().read_oid(MERGE_HEAD_REF_NAME)?;
        if let Some(merge_head) = &merge_head {
            parents.push(merge_head.clone());
        }

        let commit = Commit::new(tree_id, parents, message);
        let commit_id = self.database().store(&commit)?;

        self.refs()
            .update_ref(HEAD_REF_NAME, RefValue::Direct(commit_id.clone()), true)?;
        if merge_head.is_some() {
            self.refs().delete_ref(MERGE_HEAD_REF_NAME, false)?;
        }

        info!(oid = %commit_id, parents = commit.parents().len(), "created commit");
        Ok(commit_id)
    }
}
