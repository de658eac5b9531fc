use crate::areas::repository::Repository;
use crate::artifacts::branch::revision::Revision;
use crate::artifacts::objects::object_type::ObjectType;
use std::io::Write;

impl Repository {
    pub async fn cat_file(&self, object: &str, expected: Option<ObjectType>) -> anyhow::Result<()> {
        let object_id = Revision::new(object).resolve(self.refs())?;
        let content = self.database().get(&object_id, expected)?;

        let mut writer = self.writer();
        writer.write_all(&content)?;
        writer.flush()?;

        Ok(())
    }
}
