//! Configuration for the werewolf agent.
//!
//! Settings are layered: built-in defaults, then `werewolf.toml` (found in
//! the current directory or a parent up to the git root, or passed with
//! `--config`), then `MODEL_RUNNER_*` environment variables, then CLI flags.

mod loader;
mod paths;
mod resolve;
mod types;

pub use types::{CharacterConfig, Config, ContentConfig, ModelRunner, Overrides};

use anyhow::Result;
use std::path::{Path, PathBuf};

impl Config {
    /// The file [`Config::load`] reads: `path` if given, else the nearest
    /// `werewolf.toml` from the current directory up.
    pub fn source_path(path: Option<&Path>) -> Result<Option<PathBuf>> {
        match path {
            Some(p) => Ok(Some(p.to_path_buf())),
            None => Ok(Self::find_project_file(&std::env::current_dir()?)),
        }
    }

    /// Load config with precedence: flags > environment > file > defaults.
    ///
    /// An explicit `path` must exist; otherwise a project file is optional.
    pub fn load(path: Option<&Path>, overrides: &Overrides) -> Result<Self> {
        let file = Self::source_path(path)?;
        tracing::debug!(file = ?file, "loading configuration");

        let mut config = match file {
            Some(ref p) => Self::load_file(p)?,
            None => Self::default(),
        };

        let lookup = |var: &str| std::env::var(var).ok();
        config.resolve_substitutions(&lookup);
        config.apply_env(&lookup);
        config.apply_overrides(overrides);
        Ok(config)
    }
}
