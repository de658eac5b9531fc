use crate::areas::repository::Repository;
use crate::artifacts::objects::object::hash_object;
use crate::artifacts::objects::object_type::ObjectType;
use anyhow::Context;
use std::io::Write;
use std::path::Path;

impl Repository {
    pub async fn hash_object(&self, file: &Path, write: bool) -> anyhow::Result<()> {
        let content = std::fs::read(file)
            .with_context(|| format!("Unable to read {}", file.display()))?;

        let object_id = match write {
            true => self.database().put(&content, ObjectType::Blob)?,
            false => hash_object(ObjectType::Blob, &content),
        };

        writeln!(self.writer(), "{object_id}")?;

        Ok(())
    }
}
