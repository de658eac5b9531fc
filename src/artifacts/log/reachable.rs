use crate::areas::database::Database;
use crate::artifacts::log::rev_list::Ancestry;
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::objects::object_type::ObjectType;
use std::collections::HashSet;

/// Lazy walk over every object reachable from a set of commits
///
/// Each commit is followed by a depth-first walk of its tree, and every object
/// is yielded once. An object is only read from the database on the pull after
/// the one that yielded it.
pub struct ReachableObjects<'d> {
    database: &'d Database,
    commits: Ancestry<'d, Database>,
    visited: HashSet<ObjectId>,
    stack: Vec<(ObjectId, ObjectType)>,
    unexpanded: Option<(ObjectId, ObjectType)>,
    failed: bool,
}

impl<'d> ReachableObjects<'d> {
    pub fn new(database: &'d Database, starts: impl IntoIterator<Item = ObjectId>) -> Self {
        ReachableObjects {
            database,
            commits: Ancestry::new(database, starts),
            visited: HashSet::new(),
            stack: Vec::new(),
            unexpanded: None,
            failed: false,
        }
    }

    fn expand(&mut self, object_id: &ObjectId, object_type: ObjectType) -> anyhow::Result<()> {
        match object_type {
            ObjectType::Commit => {
                let commit = self.database.parse_commit(object_id)?;
                self.stack.push((commit.tree_oid().clone(), ObjectType::Tree));
            }
            ObjectType::Tree => {
                let tree = self.database.parse_tree(object_id)?;
                let children = tree
                    .into_entries()
                    .map(|(_, entry)| (entry.oid, entry.kind))
                    .collect::<Vec<_>>();
                // reversed so the first entry is popped first
                self.stack.extend(children.into_iter().rev());
            }
            ObjectType::Blob => {}
        }

        Ok(())
    }

    fn emit(&mut self, object_id: ObjectId, object_type: ObjectType) -> Option<ObjectId> {
        if !self.visited.insert(object_id.clone()) {
            return None;
        }

        self.unexpanded = Some((object_id.clone(), object_type));
        Some(object_id)
    }
}

impl Iterator for ReachableObjects<'_> {
    type Item = anyhow::Result<ObjectId>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed {
            return None;
        }

        if let Some((object_id, object_type)) = self.unexpanded.take()
            && let Err(error) = self.expand(&object_id, object_type)
        {
            self.failed = true;
            return Some(Err(error));
        }

        while let Some((object_id, object_type)) = self.stack.pop() {
            if let Some(object_id) = self.emit(object_id, object_type) {
                return Some(Ok(object_id));
            }
        }

        loop {
            match self.commits.next()? {
                Ok(commit_id) => {
                    if let Some(commit_id) = self.emit(commit_id, ObjectType::Commit) {
                        return Some(Ok(commit_id));
                    }
                }
                Err(error) => {
                    self.failed = true;
                    return Some(Err(error));
                }
            }
        }
    }
}
