//! Core utilities and shared types
//!
//! - `config`: environment-driven settings for a repository handle
//! - `error`: the error taxonomy raised by the storage, graph and merge layers

pub mod config;
pub mod error;
