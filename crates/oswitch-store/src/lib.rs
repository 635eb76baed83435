//! File-backed host adapter for the opencode config files.
//!
//! Implements the core's [`HostClient`](oswitch_core::ports::HostClient)
//! port over `opencode.json`, `auth.json`, a `prompts.json` collection,
//! and the `AGENTS.md` active-prompt file.

#![deny(unused_crate_dependencies)]

mod files;
mod host;
mod paths;

pub use host::FileHost;
pub use paths::StorePaths;

// Silence the unused-dependency lint for test-only crates
#[cfg(test)]
use tempfile as _;
