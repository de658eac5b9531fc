//! Merge base lookup
//!
//! The base of `a` and `b` is found by collecting every ancestor of `a` and then
//! walking the ancestry of `b` in its usual first-parent-first order: the first
//! commit already seen from `a` wins.
//!
//! On criss-cross histories this is the first common ancestor met by the walk,
//! which is not always the best one in the graph sense.

use crate::artifacts::log::rev_list::{CommitLoader, ancestry};
use crate::artifacts::objects::object_id::ObjectId;
use std::collections::HashSet;
use tracing::debug;

pub struct MergeBaseFinder<'l, L: CommitLoader + ?Sized> {
    loader: &'l L,
}

impl<'l, L: CommitLoader + ?Sized> MergeBaseFinder<'l, L> {
    pub fn new(loader: &'l L) -> Self {
        MergeBaseFinder { loader }
    }

    /// First ancestor of `b` that is also an ancestor of `a`, if any
    pub fn find(&self, a: &ObjectId, b: &ObjectId) -> anyhow::Result<Option<ObjectId>> {
        let ancestors_of_a = ancestry(self.loader, [a.clone()])
            .collect::<anyhow::Result<HashSet<_>>>()?;

        for commit_id in ancestry(self.loader, [b.clone()]) {
            let commit_id = commit_id?;
            if ancestors_of_a.contains(&commit_id) {
                debug!(%a, %b, base = %commit_id, "found merge base");
                return Ok(Some(commit_id));
            }
        }

        debug!(%a, %b, "no merge base");
        Ok(None)
    }

    /// Whether `candidate` is `commit` or one of its ancestors
    pub fn is_ancestor(&self, commit: &ObjectId, candidate: &ObjectId) -> anyhow::Result<bool> {
        for commit_id in ancestry(self.loader, [commit.clone()]) {
            if &commit_id? == candidate {
                return Ok(true);
            }
        }

        Ok(false)
    }
}

pub fn merge_base<L: CommitLoader + ?Sized>(
    loader: &L,
    a: &ObjectId,
    b: &ObjectId,
) -> anyhow::Result<Option<ObjectId>> {
    MergeBaseFinder::new(loader).find(a, b)
}

pub fn is_ancestor<L: CommitLoader + ?Sized>(
    loader: &L,
    commit: &ObjectId,
    candidate: &ObjectId,
) -> anyhow::Result<bool> {
    MergeBaseFinder::new(loader).is_ancestor(commit, candidate)
}
