//! XDG path resolution for werewolf cache data.

use anyhow::Result;
use std::path::PathBuf;

use super::types::Config;

impl Config {
    /// Returns the platform-specific cache directory.
    ///
    /// Returns `~/.cache/werewolf-agent/` on Linux (`XDG_CACHE_HOME/werewolf-agent`).
    /// Used for the readline input history.
    ///
    /// # Errors
    ///
    /// Returns an error if the platform's cache directory cannot be determined.
    pub fn cache_dir() -> Result<PathBuf> {
        let dir = dirs::cache_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not determine cache directory"))?
            .join(crate::constants::APP_NAME);
        Ok(dir)
    }
}
