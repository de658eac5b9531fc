use crate::areas::repository::Repository;
use crate::artifacts::branch::HEAD_ALIAS;
use crate::artifacts::branch::revision::Revision;
use crate::artifacts::diff::tree_diff::TreeDiff;

impl Repository {
    /// One log entry followed by its diff against the first parent
    pub async fn show(&self, name: Option<&str>) -> anyhow::Result<()> {
        let commit_id = Revision::new(name.unwrap_or(HEAD_ALIAS)).resolve(self.refs())?;
        let commit = self.database().parse_commit(&commit_id)?;

        self.print_commit(&commit_id, &commit, &self.decorations()?)?;

        let parent_files = self.files_of(commit.parent())?;
        let files = self.database().flatten_tree(commit.tree_oid())?;
        let differ = self.differ();
        let report = TreeDiff::new(self.database(), differ.as_ref()).report(&parent_files, &files)?;

        self.print_report(&report)
    }
}
