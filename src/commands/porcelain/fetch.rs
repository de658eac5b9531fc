use crate::areas::repository::Repository;
use crate::artifacts::branch::HEADS_PREFIX;
use crate::artifacts::branch::branch_name::RefName;
use crate::areas::refs::RefValue;
use crate::artifacts::log::reachable::ReachableObjects;
use std::io::Write;
use std::path::Path;
use tracing::info;

impl Repository {
    /// Copy the remote's branches and everything they reach into this repository
    ///
    /// Each object is copied in as soon as the walk yields it, so the walk can
    /// read it locally when it expands it on the next step.
    pub async fn fetch(&self, remote_path: &Path) -> anyhow::Result<()> {
        let remote = Repository::open(remote_path, Box::new(std::io::sink()), self.config().clone())?;
        let branches = remote.refs().list_refs(HEADS_PREFIX)?;

        let mut copied = 0;
        let tips = branches.iter().map(|(_, oid)| oid.clone());
        for object_id in ReachableObjects::new(self.database(), tips) {
            let object_id = object_id?;
            if !self.database().exists(&object_id) {
                remote.database().transfer(&object_id, self.database())?;
                copied += 1;
            }
        }
        info!(remote = %remote_path.display(), copied, "fetched objects");

        let mut writer = self.writer();
        writeln!(writer, "From {}", remote_path.display())?;
        for (full_name, oid) in &branches {
            let Some(branch) = RefName::from_branch_ref(full_name) else {
                continue;
            };

            self.refs()
                .update_ref(&branch.remote_ref(), RefValue::Direct(oid.clone()), true)?;
            writeln!(writer, " * {} -> {}", branch, branch.remote_ref())?;
        }
        writeln!(writer, "Fetched {copied} objects")?;

        Ok(())
    }
}
