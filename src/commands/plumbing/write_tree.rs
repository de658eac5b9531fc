use crate::areas::repository::Repository;
use crate::artifacts::objects::object_id::ObjectId;

impl Repository {
    /// Store the index as a tree hierarchy and return the root tree id
    pub async fn write_tree(&self) -> anyhow::Result<ObjectId> {
        let index = self.index();
        let mut index = index.lock().await;

        index.rehydrate()?;

        self.database().build_tree(index.entries())
    }
}
