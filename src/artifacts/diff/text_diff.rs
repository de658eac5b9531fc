//! Line-level diff engines
//!
//! [`LineDiffer`] renders a unified diff in process; [`ProcessDiffer`] hands the
//! two buffers to an external `diff` program.

use crate::artifacts::core::error::TwigError;
use crate::artifacts::diff::myers::{Edit, MyersDiff};
use bytes::Bytes;
use derive_new::new;
use std::io::Write;
use std::ops::Range;
use std::process::Command;
use tempfile::NamedTempFile;
use tracing::debug;

/// Lines of unchanged context around each hunk
pub const CONTEXT_LINES: usize = 3;

const NO_NEWLINE_MARKER: &str = "\\ No newline at end of file";

/// A buffer with the name it is shown under
#[derive(Debug, Clone, PartialEq, Eq, new)]
pub struct Labeled {
    #[new(into)]
    pub label: String,
    pub content: Bytes,
}

pub trait TextDiffer {
    /// Unified diff from `old` to `new`; empty when the contents are equal
    fn diff(&self, old: &Labeled, new: &Labeled) -> anyhow::Result<String>;
}

/// Split into lines, each keeping its trailing `\n` when it has one
pub fn split_lines(content: &[u8]) -> Vec<&[u8]> {
    content.split_inclusive(|byte| *byte == b'\n').collect()
}

#[derive(Debug, Clone, Copy, Default)]
pub struct LineDiffer;

impl LineDiffer {
    /// Ranges of the edit script to print, changes plus their context
    fn hunk_ranges<T>(edits: &[Edit<T>]) -> Vec<Range<usize>> {
        let changes = edits
            .iter()
            .enumerate()
            .filter(|(_, edit)| edit.is_change())
            .map(|(index, _)| index)
            .collect::<Vec<_>>();

        let mut ranges: Vec<Range<usize>> = Vec::new();
        for change in changes {
            let start = change.saturating_sub(CONTEXT_LINES);
            let end = (change + CONTEXT_LINES + 1).min(edits.len());

            match ranges.last_mut() {
                Some(last) if start <= last.end => last.end = end,
                _ => ranges.push(start..end),
            }
        }

        ranges
    }

    fn write_line(output: &mut String, prefix: char, line: &[u8]) {
        let text = line.strip_suffix(b"\n").unwrap_or(line);
        output.push(prefix);
        output.push_str(&String::from_utf8_lossy(text));
        output.push('\n');

        if !line.ends_with(b"\n") {
            output.push_str(NO_NEWLINE_MARKER);
            output.push('\n');
        }
    }
}

impl TextDiffer for LineDiffer {
    fn diff(&self, old: &Labeled, new: &Labeled) -> anyhow::Result<String> {
        if old.content == new.content {
            return Ok(String::new());
        }

        let (a, b) = (split_lines(&old.content), split_lines(&new.content));
        let edits = MyersDiff::new(&a, &b).diff();

        let mut output = format!("--- {}\n+++ {}\n", old.label, new.label);

        // (lines of a, lines of b) consumed before each edit
        let mut positions = Vec::with_capacity(edits.len());
        let (mut a_line, mut b_line) = (0, 0);
        for edit in &edits {
            positions.push((a_line, b_line));
            match edit {
                Edit::Delete { .. } => a_line += 1,
                Edit::Insert { .. } => b_line += 1,
                Edit::Equal { .. } => {
                    a_line += 1;
                    b_line += 1;
                }
            }
        }

        for range in Self::hunk_ranges(&edits) {
            let hunk = &edits[range.clone()];
            let (a_before, b_before) = positions[range.start];
            let a_size = hunk
                .iter()
                .filter(|edit| !matches!(edit, Edit::Insert { .. }))
                .count();
            let b_size = hunk
                .iter()
                .filter(|edit| !matches!(edit, Edit::Delete { .. }))
                .count();
            let a_start = if a_size == 0 { a_before } else { a_before + 1 };
            let b_start = if b_size == 0 { b_before } else { b_before + 1 };

            output.push_str(&format!("@@ -{a_start},{a_size} +{b_start},{b_size} @@\n"));
            for edit in hunk {
                Self::write_line(&mut output, edit.prefix(), edit.value());
            }
        }

        Ok(output)
    }
}

/// Runs `<program> --unified` on two temporary files
#[derive(Debug, Clone, new)]
pub struct ProcessDiffer {
    program: String,
}

pub(crate) fn temp_file_with(content: &[u8]) -> anyhow::Result<NamedTempFile> {
    let mut file = NamedTempFile::new()?;
    file.write_all(content)?;
    file.flush()?;

    Ok(file)
}

impl TextDiffer for ProcessDiffer {
    fn diff(&self, old: &Labeled, new: &Labeled) -> anyhow::Result<String> {
        let old_file = temp_file_with(&old.content)?;
        let new_file = temp_file_with(&new.content)?;

        let output = Command::new(&self.program)
            .arg("--unified")
            .arg("--show-c-function")
            .arg("--label")
            .arg(&old.label)
            .arg(old_file.path())
            .arg("--label")
            .arg(&new.label)
            .arg(new_file.path())
            .output()
            .map_err(|error| TwigError::tool_failure(&self.program, error.to_string()))?;

        debug!(program = %self.program, status = ?output.status.code(), "ran diff");

        match output.status.code() {
            Some(0) | Some(1) => Ok(String::from_utf8_lossy(&output.stdout).into_owned()),
            _ => Err(TwigError::tool_failure(
                &self.program,
                format!(
                    "{}: {}",
                    output.status,
                    String::from_utf8_lossy(&output.stderr).trim()
                ),
            )
            .into()),
        }
    }
}
