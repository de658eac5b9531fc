use crate::areas::refs::{HEAD_REF_NAME, MERGE_HEAD_REF_NAME, RefValue};
use crate::areas::repository::Repository;
use crate::artifacts::branch::revision::Revision;
use crate::artifacts::merge::merge_base::MergeBaseFinder;
use crate::artifacts::merge::tree_merge::three_way_merge_tree;
use crate::artifacts::objects::object_type::ObjectType;
use crate::artifacts::objects::tree::FlatTree;
use std::io::Write;
use tracing::info;

impl Repository {
    /// Merge `name` into HEAD
    ///
    /// Unrelated histories are refused. When HEAD already contains the other
    /// commit nothing happens; when HEAD is behind it, HEAD fast-forwards.
    /// Otherwise the merged files land in the index and working area and
    /// MERGE_HEAD records the other parent for the next commit.
    pub async fn merge(&self, name: &str) -> anyhow::Result<()> {
        let head_id = self
            .refs()
            .read_head()?
            .ok_or_else(|| anyhow::anyhow!("no commits on HEAD to merge into"))?;
        let other_id = Revision::new(name).resolve(self.refs())?;
        self.database().parse_commit(&other_id)?;

        let finder = MergeBaseFinder::new(self.database());
        let Some(base_id) = finder.find(&head_id, &other_id)? else {
            anyhow::bail!("refusing to merge unrelated histories");
        };
        info!(head = %head_id, other = %other_id, base = %base_id, "merging");

        if finder.is_ancestor(&head_id, &other_id)? {
            writeln!(self.writer(), "Already up to date.")?;
            return Ok(());
        }

        if base_id == head_id {
            let commit = self.database().parse_commit(&other_id)?;
            self.load_tree(commit.tree_oid(), true).await?;
            self.refs()
                .update_ref(HEAD_REF_NAME, RefValue::Direct(other_id.clone()), true)?;

            info!(oid = %other_id, "fast-forward");
            eprintln!("Fast-forward");
            return Ok(());
        }

        let merged = three_way_merge_tree(
            self.database(),
            self.merger().as_ref(),
            &self.files_of(Some(&base_id))?,
            &self.files_of(Some(&head_id))?,
            &self.files_of(Some(&other_id))?,
        )?;

        let mut files = FlatTree::new();
        for (path, content) in &merged.files {
            files.insert(path.clone(), self.database().put(content, ObjectType::Blob)?);
        }
        self.load_files(files, true).await?;
        self.refs()
            .update_ref(MERGE_HEAD_REF_NAME, RefValue::Direct(other_id), false)?;

        let mut writer = self.writer();
        for path in &merged.conflicts {
            writeln!(writer, "CONFLICT (content): Merge conflict in {}", path.display())?;
        }
        match merged.has_conflicts() {
            true => writeln!(
                writer,
                "Automatic merge failed; fix conflicts and then commit the result."
            )?,
            false => writeln!(writer, "Merged in working tree. Please commit")?,
        }

        Ok(())
    }
}
