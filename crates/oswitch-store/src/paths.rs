//! Locations of the opencode files this adapter manages.

use std::path::{Path, PathBuf};

use oswitch_core::ports::HostError;

/// Base directories the store reads and writes under.
///
/// Production uses the opencode defaults under the user's home; tests
/// point both roots into a temp directory.
#[derive(Debug, Clone)]
pub struct StorePaths {
    config_dir: PathBuf,
    data_dir: PathBuf,
}

impl StorePaths {
    /// The opencode defaults: `~/.config/opencode` for the aggregate config
    /// and the active-prompt file, `~/.local/share/opencode` for
    /// credentials and the prompt collection.
    pub fn from_home() -> Result<Self, HostError> {
        let home = dirs::home_dir()
            .ok_or_else(|| HostError::Storage("cannot determine home directory".to_string()))?;
        Ok(Self {
            config_dir: home.join(".config").join("opencode"),
            data_dir: home.join(".local").join("share").join("opencode"),
        })
    }

    /// Explicit roots, for tests and non-standard layouts.
    #[must_use]
    pub fn at(config_dir: impl Into<PathBuf>, data_dir: impl Into<PathBuf>) -> Self {
        Self {
            config_dir: config_dir.into(),
            data_dir: data_dir.into(),
        }
    }

    /// The aggregate config file (`opencode.json`).
    #[must_use]
    pub fn config_file(&self) -> PathBuf {
        self.config_dir.join("opencode.json")
    }

    /// The credential store (`auth.json`).
    #[must_use]
    pub fn auth_file(&self) -> PathBuf {
        self.data_dir.join("auth.json")
    }

    /// The prompt collection (`prompts.json`).
    #[must_use]
    pub fn prompts_file(&self) -> PathBuf {
        self.data_dir.join("prompts.json")
    }

    /// The active-prompt target file (`AGENTS.md`). The host tool reads
    /// this file directly; activating a prompt overwrites it.
    #[must_use]
    pub fn agents_file(&self) -> PathBuf {
        self.config_dir.join("AGENTS.md")
    }

    #[must_use]
    pub fn config_dir(&self) -> &Path {
        &self.config_dir
    }

    #[must_use]
    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }
}
