use crate::areas::repository::Repository;
use crate::artifacts::branch::revision::Revision;
use crate::artifacts::merge::merge_base::merge_base;
use std::io::Write;

impl Repository {
    pub async fn merge_base(&self, a: &str, b: &str) -> anyhow::Result<()> {
        let a_oid = Revision::new(a).resolve(self.refs())?;
        let b_oid = Revision::new(b).resolve(self.refs())?;

        match merge_base(self.database(), &a_oid, &b_oid)? {
            Some(base) => writeln!(self.writer(), "{base}")?,
            None => anyhow::bail!("no merge base between {a} and {b}"),
        }

        Ok(())
    }
}
