use crate::areas::refs::RefValue;
use crate::areas::repository::Repository;
use crate::artifacts::branch::branch_name::RefName;
use crate::artifacts::core::error::TwigError;
use crate::artifacts::log::reachable::ReachableObjects;
use crate::artifacts::merge::merge_base::is_ancestor;
use std::collections::HashSet;
use std::io::Write;
use std::path::Path;
use tracing::info;

impl Repository {
    /// Send `branch` and the objects the remote lacks
    ///
    /// The remote branch may only move forward: it must be missing or an
    /// ancestor of the local one.
    pub async fn push(&self, remote_path: &Path, branch: &str) -> anyhow::Result<()> {
        let branch = RefName::try_parse(branch)?;
        let branch_ref = branch.branch_ref();
        let local_id = self
            .refs()
            .read_oid(&branch_ref)?
            .ok_or_else(|| TwigError::UnknownRef(branch_ref.clone()))?;

        let remote = Repository::open(remote_path, Box::new(std::io::sink()), self.config().clone())?;
        let remote_id = remote.refs().read_oid(&branch_ref)?;

        if let Some(remote_id) = &remote_id
            && !is_ancestor(self.database(), &local_id, remote_id)?
        {
            anyhow::bail!(
                "refusing to push {branch}: remote {} is not an ancestor of {}",
                remote_id.to_short_oid(),
                local_id.to_short_oid()
            );
        }

        // what the remote already has, as far as this repository can tell
        let known_remote_tips = remote
            .refs()
            .list_refs("")?
            .into_iter()
            .map(|(_, oid)| oid)
            .filter(|oid| self.database().exists(oid))
            .collect::<HashSet<_>>();
        let remote_objects = ReachableObjects::new(self.database(), known_remote_tips)
            .collect::<anyhow::Result<HashSet<_>>>()?;

        let mut pushed = 0;
        for object_id in ReachableObjects::new(self.database(), [local_id.clone()]) {
            let object_id = object_id?;
            if remote_objects.contains(&object_id) {
                continue;
            }

            self.database().transfer(&object_id, remote.database())?;
            pushed += 1;
        }

        remote
            .refs()
            .update_ref(&branch_ref, RefValue::Direct(local_id.clone()), true)?;
        info!(remote = %remote_path.display(), %branch, pushed, "pushed");

        let old = remote_id
            .map(|oid| oid.to_short_oid())
            .unwrap_or_else(|| String::from("(new)"));
        let mut writer = self.writer();
        writeln!(writer, "To {}", remote_path.display())?;
        writeln!(
            writer,
            "   {}..{}  {} -> {}",
            old,
            local_id.to_short_oid(),
            branch,
            branch
        )?;

        Ok(())
    }
}
