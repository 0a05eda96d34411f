//! Filesystem rule loader with hot-reload via `notify` watcher.
//!
//! Reads risk trigger and exemption policy YAML files from a rules directory
//! into an in-memory document map, optionally keeps it current as files
//! change, and hands out immutable [`RuleSet`] snapshots for assessment.
//! The loader never writes rule files.

mod core;
mod error;
mod ruleset;
mod watcher;


pub use self::core::RuleLoader;
pub use self::error::{LoadResult, LoadStatus, Result, RuleError};
pub use self::ruleset::RuleSet;
