//! Three-way merge engines for file contents
//!
//! A merge that leaves conflict markers is still a result: only a failing
//! external tool is an error.

use crate::artifacts::core::error::TwigError;
use crate::artifacts::diff::myers::MyersDiff;
use crate::artifacts::diff::text_diff::{Labeled, split_lines, temp_file_with};
use bytes::{BufMut, Bytes, BytesMut};
use derive_new::new;
use std::collections::HashMap;
use std::process::Command;
use tracing::debug;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MergeOutcome {
    Clean(Bytes),
    Conflicted(Bytes),
}

impl MergeOutcome {
    pub fn is_conflicted(&self) -> bool {
        matches!(self, MergeOutcome::Conflicted(_))
    }

    pub fn into_content(self) -> Bytes {
        match self {
            MergeOutcome::Clean(content) | MergeOutcome::Conflicted(content) => content,
        }
    }
}

pub trait ThreeWayMerger {
    fn merge(&self, base: &Labeled, mine: &Labeled, theirs: &Labeled)
    -> anyhow::Result<MergeOutcome>;
}

#[derive(Debug, PartialEq, Eq)]
enum Chunk<'c> {
    Clean(&'c [&'c [u8]]),
    Conflict {
        mine: &'c [&'c [u8]],
        theirs: &'c [&'c [u8]],
    },
}

/// diff3 over the lines of the three buffers
///
/// Stable regions are lines every side kept from the base. Between them a
/// region changed on one side takes that side, identical changes are taken
/// once, and anything else becomes a conflict.
struct Diff3<'c> {
    base: &'c [&'c [u8]],
    mine: &'c [&'c [u8]],
    theirs: &'c [&'c [u8]],
    // 1-based base line -> 1-based line on each side
    match_mine: HashMap<usize, usize>,
    match_theirs: HashMap<usize, usize>,
    line_base: usize,
    line_mine: usize,
    line_theirs: usize,
    chunks: Vec<Chunk<'c>>,
}

impl<'c> Diff3<'c> {
    fn new(base: &'c [&'c [u8]], mine: &'c [&'c [u8]], theirs: &'c [&'c [u8]]) -> Self {
        let matching = |other: &'c [&'c [u8]]| {
            MyersDiff::new(base, other)
                .matches()
                .into_iter()
                .map(|(b, o)| (b + 1, o + 1))
                .collect::<HashMap<_, _>>()
        };

        Diff3 {
            base,
            mine,
            theirs,
            match_mine: matching(mine),
            match_theirs: matching(theirs),
            line_base: 0,
            line_mine: 0,
            line_theirs: 0,
            chunks: Vec::new(),
        }
    }

    fn merge(mut self) -> Vec<Chunk<'c>> {
        loop {
            match self.next_mismatch() {
                Some(1) => match self.next_match() {
                    (base, Some(mine), Some(theirs)) => self.emit_chunk(base, mine, theirs),
                    _ => {
                        self.emit_final_chunk();
                        return self.chunks;
                    }
                },
                Some(offset) => self.emit_chunk(
                    self.line_base + offset,
                    self.line_mine + offset,
                    self.line_theirs + offset,
                ),
                None => {
                    self.emit_final_chunk();
                    return self.chunks;
                }
            }
        }
    }

    fn in_bounds(&self, offset: usize) -> bool {
        self.line_base + offset <= self.base.len()
            || self.line_mine + offset <= self.mine.len()
            || self.line_theirs + offset <= self.theirs.len()
    }

    fn is_match(matches: &HashMap<usize, usize>, base: usize, side: usize) -> bool {
        matches.get(&base) == Some(&side)
    }

    /// Offset of the first line past the current position not stable on all sides
    fn next_mismatch(&self) -> Option<usize> {
        let mut offset = 1;
        while self.in_bounds(offset)
            && Self::is_match(
                &self.match_mine,
                self.line_base + offset,
                self.line_mine + offset,
            )
            && Self::is_match(
                &self.match_theirs,
                self.line_base + offset,
                self.line_theirs + offset,
            )
        {
            offset += 1;
        }

        self.in_bounds(offset).then_some(offset)
    }

    /// Next base line kept by both sides, with where each side kept it
    fn next_match(&self) -> (usize, Option<usize>, Option<usize>) {
        let mut base = self.line_base + 1;
        while base <= self.base.len()
            && !(self.match_mine.contains_key(&base) && self.match_theirs.contains_key(&base))
        {
            base += 1;
        }

        (
            base,
            self.match_mine.get(&base).copied(),
            self.match_theirs.get(&base).copied(),
        )
    }

    fn emit_chunk(&mut self, base: usize, mine: usize, theirs: usize) {
        let (base_lines, mine_lines, theirs_lines) = (self.base, self.mine, self.theirs);
        self.write_chunk(
            &base_lines[self.line_base..base - 1],
            &mine_lines[self.line_mine..mine - 1],
            &theirs_lines[self.line_theirs..theirs - 1],
        );
        (self.line_base, self.line_mine, self.line_theirs) = (base - 1, mine - 1, theirs - 1);
    }

    fn emit_final_chunk(&mut self) {
        let (base_lines, mine_lines, theirs_lines) = (self.base, self.mine, self.theirs);
        self.write_chunk(
            &base_lines[self.line_base..],
            &mine_lines[self.line_mine..],
            &theirs_lines[self.line_theirs..],
        );
    }

    fn write_chunk(&mut self, base: &'c [&'c [u8]], mine: &'c [&'c [u8]], theirs: &'c [&'c [u8]]) {
        let chunk = if mine == base || mine == theirs {
            Chunk::Clean(theirs)
        } else if theirs == base {
            Chunk::Clean(mine)
        } else {
            Chunk::Conflict { mine, theirs }
        };
        self.chunks.push(chunk);
    }
}

/// In-process diff3 merge writing `<<<<<<<`/`=======`/`>>>>>>>` markers
#[derive(Debug, Clone, Copy, Default)]
pub struct LineMerger;

impl LineMerger {
    fn put_lines(output: &mut BytesMut, lines: &[&[u8]], terminate: bool) {
        for line in lines {
            output.put_slice(line);
        }
        if terminate && lines.last().is_some_and(|line| !line.ends_with(b"\n")) {
            output.put_u8(b'\n');
        }
    }
}

impl ThreeWayMerger for LineMerger {
    fn merge(
        &self,
        base: &Labeled,
        mine: &Labeled,
        theirs: &Labeled,
    ) -> anyhow::Result<MergeOutcome> {
        let base_lines = split_lines(&base.content);
        let mine_lines = split_lines(&mine.content);
        let theirs_lines = split_lines(&theirs.content);

        let mut output = BytesMut::new();
        let mut conflicted = false;

        for chunk in Diff3::new(&base_lines, &mine_lines, &theirs_lines).merge() {
            match chunk {
                Chunk::Clean(lines) => Self::put_lines(&mut output, lines, false),
                Chunk::Conflict { mine: ours, theirs: other } => {
                    conflicted = true;
                    output.put_slice(format!("<<<<<<< {}\n", mine.label).as_bytes());
                    Self::put_lines(&mut output, ours, true);
                    output.put_slice(b"=======\n");
                    Self::put_lines(&mut output, other, true);
                    output.put_slice(format!(">>>>>>> {}\n", theirs.label).as_bytes());
                }
            }
        }

        let content = output.freeze();
        Ok(if conflicted {
            MergeOutcome::Conflicted(content)
        } else {
            MergeOutcome::Clean(content)
        })
    }
}

/// Runs `<program> -m` (a `diff3`) over three temporary files
#[derive(Debug, Clone, new)]
pub struct ProcessMerger {
    program: String,
}

impl ThreeWayMerger for ProcessMerger {
    fn merge(
        &self,
        base: &Labeled,
        mine: &Labeled,
        theirs: &Labeled,
    ) -> anyhow::Result<MergeOutcome> {
        let base_file = temp_file_with(&base.content)?;
        let mine_file = temp_file_with(&mine.content)?;
        let theirs_file = temp_file_with(&theirs.content)?;

        let output = Command::new(&self.program)
            .arg("-m")
            .args([
                "-L",
                mine.label.as_str(),
                "-L",
                base.label.as_str(),
                "-L",
                theirs.label.as_str(),
            ])
            .arg(mine_file.path())
            .arg(base_file.path())
            .arg(theirs_file.path())
            .output()
            .map_err(|error| TwigError::tool_failure(&self.program, error.to_string()))?;

        debug!(program = %self.program, status = ?output.status.code(), "ran merge");

        let content = Bytes::from(output.stdout);
        match output.status.code() {
            Some(0) => Ok(MergeOutcome::Clean(content)),
            Some(1) => Ok(MergeOutcome::Conflicted(content)),
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
