use crate::areas::refs::{HEAD_REF_NAME, RefValue};
use crate::areas::repository::Repository;
use crate::artifacts::branch::branch_name::RefName;
use anyhow::Context;
use std::fs;
use std::io::Write;

pub const DEFAULT_BRANCH: &str = "master";

impl Repository {
    pub async fn init(&self) -> anyhow::Result<()> {
        fs::create_dir_all(self.database().objects_path())
            .context("Failed to create objects directory")?;

        for namespace in ["heads", "tags", "remote"] {
            let dir = self.refs().refs_path().join(namespace);
            fs::create_dir_all(&dir)
                .with_context(|| format!("Failed to create {}", dir.display()))?;
        }

        // re-running init keeps whatever HEAD already points at
        if !self.refs().exists(HEAD_REF_NAME)? {
            let default_branch = RefName::try_parse(DEFAULT_BRANCH)?;
            self.refs()
                .update_ref(
                    HEAD_REF_NAME,
                    RefValue::Symbolic(default_branch.branch_ref()),
                    false,
                )
                .context("Failed to create initial HEAD reference")?;
        }

        writeln!(
            self.writer(),
            "Initialized empty twig repository in {}",
            self.metadata_path().display()
        )?;

        Ok(())
    }
}
