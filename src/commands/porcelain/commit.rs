use crate::areas::repository::Repository;
use colored::Colorize;
use std::io::Write;

impl Repository {
    pub async fn commit(&self, message: &str) -> anyhow::Result<()> {
        let tree_id = self.write_tree().await?;
        let parents = self.refs().read_head()?.into_iter().collect::<Vec<_>>();
        let is_root = match parents.is_empty() {
            true => "(root-commit) ",
            false => "",
        };

        let commit_id = self.write_commit(tree_id, parents, message)?;
        let short_message = message.lines().next().unwrap_or_default();

        writeln!(
            self.writer(),
            "[{}{}] {}",
            is_root,
            commit_id.to_short_oid().yellow(),
            short_message
        )?;

        Ok(())
    }
}
