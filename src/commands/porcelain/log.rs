use crate::areas::repository::Repository;
use crate::artifacts::branch::HEAD_ALIAS;
use crate::artifacts::branch::revision::Revision;
use crate::artifacts::log::rev_list::ancestry;
use crate::artifacts::objects::commit::Commit;
use crate::artifacts::objects::object_id::ObjectId;
use colored::Colorize;
use std::collections::HashMap;
use std::io::Write;

/// Ref names pointing at each commit
pub(crate) type Decorations = HashMap<ObjectId, Vec<String>>;

impl Repository {
    pub async fn log(&self, name: Option<&str>) -> anyhow::Result<()> {
        let start = Revision::new(name.unwrap_or(HEAD_ALIAS)).resolve(self.refs())?;
        let decorations = self.decorations()?;

        for commit_id in ancestry(self.database(), [start]) {
            let commit_id = commit_id?;
            let commit = self.database().parse_commit(&commit_id)?;
            self.print_commit(&commit_id, &commit, &decorations)?;
        }

        Ok(())
    }

    pub(crate) fn decorations(&self) -> anyhow::Result<Decorations> {
        let mut decorations = Decorations::new();
        for (name, oid) in self.refs().list_refs("")? {
            decorations.entry(oid).or_default().push(name);
        }

        Ok(decorations)
    }

    pub(crate) fn print_commit(
        &self,
        commit_id: &ObjectId,
        commit: &Commit,
        decorations: &Decorations,
    ) -> anyhow::Result<()> {
        let names = decorations
            .get(commit_id)
            .filter(|names| !names.is_empty())
            .map(|names| format!(" ({})", names.join(", ")))
            .unwrap_or_default();

        let mut writer = self.writer();
        writeln!(
            writer,
            "{}{}",
            format!("commit {commit_id}").yellow(),
            names.cyan()
        )?;
        writeln!(writer)?;
        for line in commit.message().lines() {
            writeln!(writer, "    {line}")?;
        }
        writeln!(writer)?;

        Ok(())
    }
}
