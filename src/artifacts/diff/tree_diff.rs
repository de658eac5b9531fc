use crate::areas::database::Database;
use crate::artifacts::diff::text_diff::{Labeled, TextDiffer};
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::objects::tree::FlatTree;
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ChangeKind {
    Added,
    Deleted,
    Modified,
}

impl std::fmt::Display for ChangeKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ChangeKind::Added => write!(f, "new file"),
            ChangeKind::Deleted => write!(f, "deleted"),
            ChangeKind::Modified => write!(f, "modified"),
        }
    }
}

/// How a path changed between two trees, `None` when it did not
pub fn classify_change(from: Option<&ObjectId>, to: Option<&ObjectId>) -> Option<ChangeKind> {
    match (from, to) {
        (None, Some(_)) => Some(ChangeKind::Added),
        (Some(_), None) => Some(ChangeKind::Deleted),
        (Some(from), Some(to)) if from != to => Some(ChangeKind::Modified),
        _ => None,
    }
}

/// Every path of any of `trees`, in order, with its id in each tree
pub fn compare_trees<'t>(
    trees: &'t [&'t FlatTree],
) -> impl Iterator<Item = (&'t PathBuf, Vec<Option<&'t ObjectId>>)> + 't {
    let paths = trees
        .iter()
        .flat_map(|tree| tree.keys())
        .collect::<BTreeSet<_>>();

    paths
        .into_iter()
        .map(move |path| (path, trees.iter().map(|tree| tree.get(path)).collect()))
}

/// Changed paths from `from` to `to`, in path order
pub fn changed_files(from: &FlatTree, to: &FlatTree) -> Vec<(PathBuf, ChangeKind)> {
    compare_trees(&[from, to])
        .filter_map(|(path, oids)| {
            classify_change(oids[0], oids[1]).map(|kind| (path.clone(), kind))
        })
        .collect()
}

/// Text report of every changed file from `from` to `to`
pub struct TreeDiff<'r> {
    database: &'r Database,
    differ: &'r dyn TextDiffer,
}

impl<'r> TreeDiff<'r> {
    pub fn new(database: &'r Database, differ: &'r dyn TextDiffer) -> Self {
        TreeDiff { database, differ }
    }

    pub fn report(&self, from: &FlatTree, to: &FlatTree) -> anyhow::Result<String> {
        let mut report = String::new();

        for (path, oids) in compare_trees(&[from, to]) {
            let (old_oid, new_oid) = (oids[0], oids[1]);
            let Some(kind) = classify_change(old_oid, new_oid) else {
                continue;
            };

            report.push_str(&Self::header(path, kind));
            report.push_str(&self.file_diff(path, old_oid, new_oid)?);
        }

        Ok(report)
    }

    fn header(path: &Path, kind: ChangeKind) -> String {
        let mut header = format!(
            "diff --twig a/{path} b/{path}\n",
            path = path.display()
        );
        match kind {
            ChangeKind::Added => header.push_str("new file\n"),
            ChangeKind::Deleted => header.push_str("deleted file\n"),
            ChangeKind::Modified => {}
        }

        header
    }

    fn file_diff(
        &self,
        path: &Path,
        old_oid: Option<&ObjectId>,
        new_oid: Option<&ObjectId>,
    ) -> anyhow::Result<String> {
        let old = Labeled::new(
            format!("a/{}", path.display()),
            self.database.blob_content(old_oid)?,
        );
        let new = Labeled::new(
            format!("b/{}", path.display()),
            self.database.blob_content(new_oid)?,
        );

        self.differ.diff(&old, &new)
    }
}
