//! File discovery and loading for werewolf configuration.

use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

use super::types::Config;

impl Config {
    /// Reads and parses a config file.
    pub(super) fn load_file(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config from {:?}", path))?;
        let config: Config = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config at {:?}", path))?;
        tracing::debug!(path = %path.display(), "loaded config file");
        Ok(config)
    }

    /// Look for werewolf.toml in `start`, then walk up to the git root.
    pub(super) fn find_project_file(start: &Path) -> Option<PathBuf> {
        let mut dir = start.to_path_buf();
        loop {
            let candidate = dir.join(crate::constants::PROJECT_CONFIG_FILENAME);
            if candidate.exists() {
                return Some(candidate);
            }
            // Stop at git root or filesystem root
            if dir.join(".git").exists() || !dir.pop() {
                return None;
            }
        }
    }
}
