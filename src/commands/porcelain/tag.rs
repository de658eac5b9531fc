use crate::areas::refs::RefValue;
use crate::areas::repository::Repository;
use crate::artifacts::branch::HEAD_ALIAS;
use crate::artifacts::branch::branch_name::RefName;
use crate::artifacts::branch::revision::Revision;
use std::io::Write;

impl Repository {
    /// Create `refs/tags/<name>` at `target` (default HEAD)
    pub async fn tag(&self, name: &str, target: Option<&str>) -> anyhow::Result<()> {
        let tag = RefName::try_parse(name)?;
        let tag_ref = tag.tag_ref();
        if self.refs().read_oid(&tag_ref)?.is_some() {
            anyhow::bail!("tag '{tag}' already exists");
        }

        let target_id = Revision::new(target.unwrap_or(HEAD_ALIAS)).resolve(self.refs())?;
        self.refs()
            .update_ref(&tag_ref, RefValue::Direct(target_id.clone()), false)?;

        writeln!(self.writer(), "Tagged {} as '{}'", target_id.to_short_oid(), tag)?;

        Ok(())
    }
}
