use crate::artifacts::objects::object_id::ObjectId;
use std::collections::{HashSet, VecDeque};
use tracing::trace;

/// Source of commit parent links
pub trait CommitLoader {
    fn parents(&self, commit_id: &ObjectId) -> anyhow::Result<Vec<ObjectId>>;
}

impl<F> CommitLoader for F
where
    F: Fn(&ObjectId) -> anyhow::Result<Vec<ObjectId>>,
{
    fn parents(&self, commit_id: &ObjectId) -> anyhow::Result<Vec<ObjectId>> {
        self(commit_id)
    }
}

/// Lazy walk over the ancestors of a set of commits
///
/// Every commit is yielded once. After a commit is yielded its first parent is
/// queued at the front of the worklist and the remaining parents at the back,
/// so a first-parent line is followed before side branches are visited.
/// Parents are only loaded on the pull after the one that yielded the commit.
pub struct Ancestry<'l, L: CommitLoader + ?Sized> {
    loader: &'l L,
    pending: VecDeque<ObjectId>,
    visited: HashSet<ObjectId>,
    unexpanded: Option<ObjectId>,
    failed: bool,
}

impl<'l, L: CommitLoader + ?Sized> Ancestry<'l, L> {
    pub fn new(loader: &'l L, starts: impl IntoIterator<Item = ObjectId>) -> Self {
        Ancestry {
            loader,
            pending: starts.into_iter().collect(),
            visited: HashSet::new(),
            unexpanded: None,
            failed: false,
        }
    }

    fn expand(&mut self, commit_id: &ObjectId) -> anyhow::Result<()> {
        let mut parents = self.loader.parents(commit_id)?.into_iter();
        trace!(oid = %commit_id, "expanding commit");

        if let Some(first) = parents.next() {
            self.pending.push_front(first);
        }
        self.pending.extend(parents);

        Ok(())
    }
}

impl<L: CommitLoader + ?Sized> Iterator for Ancestry<'_, L> {
    type Item = anyhow::Result<ObjectId>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed {
            return None;
        }

        if let Some(commit_id) = self.unexpanded.take()
            && let Err(error) = self.expand(&commit_id)
        {
            self.failed = true;
            return Some(Err(error));
        }

        while let Some(commit_id) = self.pending.pop_front() {
            if !self.visited.insert(commit_id.clone()) {
                continue;
            }

            self.unexpanded = Some(commit_id.clone());
            return Some(Ok(commit_id));
        }

        None
    }
}

/// Ancestors of `starts`, each starting commit included
pub fn ancestry<L: CommitLoader + ?Sized>(
    loader: &L,
    starts: impl IntoIterator<Item = ObjectId>,
) -> Ancestry<'_, L> {
    Ancestry::new(loader, starts)
}
