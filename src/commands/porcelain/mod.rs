//! Porcelain commands
//!
//! - `init`: create the metadata directory
//! - `add`: stage files
//! - `commit`: record the index as a commit
//! - `log` / `show`: walk and print history
//! - `checkout`, `reset`: move HEAD
//! - `branch`, `tag`: create or list refs
//! - `status`, `diff`: compare HEAD, the index and the working area
//! - `merge`: fast-forward or three-way merge another commit
//! - `fetch`, `push`: copy objects between two repositories on disk

pub mod add;
pub mod branch;
pub mod checkout;
pub mod commit;
pub mod diff;
pub mod fetch;
pub mod init;
pub mod log;
pub mod merge;
pub mod push;
pub mod reset;
pub mod show;
pub mod status;
pub mod tag;
