//! Diffing
//!
//! - `myers`: shortest edit script between two sequences
//! - `text_diff`: unified line diffs (native or an external `diff`)
//! - `tree_diff`: path-level comparison of flattened trees and diff reports

pub mod myers;
pub mod text_diff;
pub mod tree_diff;
