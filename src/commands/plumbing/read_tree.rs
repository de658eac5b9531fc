use crate::areas::repository::Repository;
use crate::artifacts::branch::revision::Revision;
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::objects::object_type::ObjectType;
use crate::artifacts::objects::tree::FlatTree;
use bytes::Bytes;
use std::path::PathBuf;
use tracing::info;

impl Repository {
    /// `read-tree <tree>`: load a tree (or a commit's tree) into the index
    pub async fn read_tree(&self, name: &str) -> anyhow::Result<()> {
        let object_id = Revision::new(name).resolve(self.refs())?;
        let tree_id = self.tree_of(&object_id)?;

        self.load_tree(&tree_id, false).await
    }

    /// Replace the index with the files of `tree_id`
    ///
    /// With `update_working`, the previously tracked files are cleared from the
    /// working area and the new ones written out. Every blob is read before
    /// anything on disk changes.
    pub async fn load_tree(&self, tree_id: &ObjectId, update_working: bool) -> anyhow::Result<()> {
        let files = self.database().flatten_tree(tree_id)?;
        self.load_files(files, update_working).await
    }

    pub(crate) async fn load_files(&self, files: FlatTree, update_working: bool) -> anyhow::Result<()> {
        let index = self.index();
        let mut index = index.lock().await;

        index.rehydrate()?;

        if update_working {
            let contents = files
                .iter()
                .map(|(path, oid)| -> anyhow::Result<(PathBuf, Bytes)> {
                    Ok((path.clone(), self.database().blob_content(Some(oid))?))
                })
                .collect::<anyhow::Result<Vec<_>>>()?;

            let previous = index.entries().map(|(path, _)| path.clone()).collect::<Vec<_>>();
            self.workspace().clear(&previous)?;
            self.workspace().materialize(contents)?;
        }

        info!(entries = files.len(), update_working, "loaded tree");
        index.replace(files);
        index.write_updates()?;

        Ok(())
    }

    /// Tree id of a commit, or the id itself when it already names a tree
    pub(crate) fn tree_of(&self, object_id: &ObjectId) -> anyhow::Result<ObjectId> {
        match self.database().object_type(object_id)? {
            ObjectType::Commit => Ok(self.database().parse_commit(object_id)?.tree_oid().clone()),
            _ => {
                self.database().parse_tree(object_id)?;
                Ok(object_id.clone())
            }
        }
    }

    /// Files of the commit or tree `object_id`; `None` is the empty tree
    pub(crate) fn files_of(&self, object_id: Option<&ObjectId>) -> anyhow::Result<FlatTree> {
        match object_id {
            Some(object_id) => self.database().flatten_tree(&self.tree_of(object_id)?),
            None => Ok(FlatTree::new()),
        }
    }
}
