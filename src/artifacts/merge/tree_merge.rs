use crate::areas::database::Database;
use crate::artifacts::diff::text_diff::Labeled;
use crate::artifacts::diff::tree_diff::compare_trees;
use crate::artifacts::merge::text_merge::{MergeOutcome, ThreeWayMerger};
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::objects::tree::FlatTree;
use bytes::Bytes;
use std::collections::BTreeMap;
use std::path::PathBuf;
use tracing::debug;

pub const BASE_LABEL: &str = "BASE";
pub const HEAD_LABEL: &str = "HEAD";
pub const OTHER_LABEL: &str = "MERGE_HEAD";

/// Merged contents of every surviving path, plus the paths left with conflict markers
#[derive(Debug, Default, PartialEq, Eq)]
pub struct MergedTree {
    pub files: BTreeMap<PathBuf, Bytes>,
    pub conflicts: Vec<PathBuf>,
}

impl MergedTree {
    pub fn has_conflicts(&self) -> bool {
        !self.conflicts.is_empty()
    }
}

/// Merge one path; an absent id reads as empty content
pub fn three_way_merge_blob(
    database: &Database,
    merger: &dyn ThreeWayMerger,
    base: Option<&ObjectId>,
    head: Option<&ObjectId>,
    other: Option<&ObjectId>,
) -> anyhow::Result<MergeOutcome> {
    merger.merge(
        &Labeled::new(BASE_LABEL, database.blob_content(base)?),
        &Labeled::new(HEAD_LABEL, database.blob_content(head)?),
        &Labeled::new(OTHER_LABEL, database.blob_content(other)?),
    )
}

/// Merge every path of the three trees
///
/// A path deleted on one side and untouched or deleted on the other merges
/// cleanly to nothing and is dropped from the result.
pub fn three_way_merge_tree(
    database: &Database,
    merger: &dyn ThreeWayMerger,
    base: &FlatTree,
    head: &FlatTree,
    other: &FlatTree,
) -> anyhow::Result<MergedTree> {
    let mut merged = MergedTree::default();

    for (path, oids) in compare_trees(&[base, head, other]) {
        let (base_oid, head_oid, other_oid) = (oids[0], oids[1], oids[2]);
        let outcome = three_way_merge_blob(database, merger, base_oid, head_oid, other_oid)?;

        if is_deletion(&outcome, base_oid, head_oid, other_oid) {
            debug!(path = %path.display(), "dropped by merge");
            continue;
        }

        if outcome.is_conflicted() {
            debug!(path = %path.display(), "merge conflict");
            merged.conflicts.push(path.clone());
        }
        merged.files.insert(path.clone(), outcome.into_content());
    }

    Ok(merged)
}

fn is_deletion(
    outcome: &MergeOutcome,
    base: Option<&ObjectId>,
    head: Option<&ObjectId>,
    other: Option<&ObjectId>,
) -> bool {
    matches!(outcome, MergeOutcome::Clean(content) if content.is_empty())
        && base.is_some()
        && (head.is_none() || other.is_none())
}
