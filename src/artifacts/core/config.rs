//! Environment-driven settings
//!
//! | Variable             | Meaning                                    | Default  |
//! |----------------------|--------------------------------------------|----------|
//! | `TWIG_TEXT_ENGINE`   | `native` or `external` diff/merge engines  | `native` |
//! | `TWIG_DIFF_PROGRAM`  | program run by the external differ         | `diff`   |
//! | `TWIG_DIFF3_PROGRAM` | program run by the external merger         | `diff3`  |
//!
//! `TWIG_LOG` (a tracing filter) is read by the binary only.

use crate::artifacts::diff::text_diff::{LineDiffer, ProcessDiffer, TextDiffer};
use crate::artifacts::merge::text_merge::{LineMerger, ProcessMerger, ThreeWayMerger};

pub const TEXT_ENGINE_VAR: &str = "TWIG_TEXT_ENGINE";
pub const DIFF_PROGRAM_VAR: &str = "TWIG_DIFF_PROGRAM";
pub const DIFF3_PROGRAM_VAR: &str = "TWIG_DIFF3_PROGRAM";
pub const LOG_VAR: &str = "TWIG_LOG";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TextEngine {
    /// In-process Myers diff and diff3-style merge
    #[default]
    Native,
    /// Delegate to `diff` / `diff3` subprocesses
    External,
}

impl TryFrom<&str> for TextEngine {
    type Error = anyhow::Error;

    fn try_from(value: &str) -> anyhow::Result<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "native" => Ok(TextEngine::Native),
            "external" => Ok(TextEngine::External),
            other => anyhow::bail!(
                "invalid {TEXT_ENGINE_VAR} value {other:?}: expected \"native\" or \"external\""
            ),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub text_engine: TextEngine,
    pub diff_program: String,
    pub diff3_program: String,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            text_engine: TextEngine::Native,
            diff_program: String::from("diff"),
            diff3_program: String::from("diff3"),
        }
    }
}

impl Config {
    pub fn load_from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build a config from any key lookup; unset or blank keys keep their defaults
    pub fn from_lookup<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let lookup = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());
        let defaults = Config::default();

        let text_engine = match lookup(TEXT_ENGINE_VAR) {
            Some(value) => TextEngine::try_from(value.as_str())?,
            None => defaults.text_engine,
        };

        Ok(Config {
            text_engine,
            diff_program: lookup(DIFF_PROGRAM_VAR).unwrap_or(defaults.diff_program),
            diff3_program: lookup(DIFF3_PROGRAM_VAR).unwrap_or(defaults.diff3_program),
        })
    }

    pub fn differ(&self) -> Box<dyn TextDiffer> {
        match self.text_engine {
            TextEngine::Native => Box::new(LineDiffer),
            TextEngine::External => Box::new(ProcessDiffer::new(self.diff_program.clone())),
        }
    }

    pub fn merger(&self) -> Box<dyn ThreeWayMerger> {
        match self.text_engine {
            TextEngine::Native => Box::new(LineMerger),
            TextEngine::External => Box::new(ProcessMerger::new(self.diff3_program.clone())),
        }
    }
}
