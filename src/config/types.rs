//! Struct definitions and serde defaults for werewolf configuration.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::constants::{
    DEFAULT_AGILITY, DEFAULT_CHARACTER_EMOJI, DEFAULT_CHARACTER_NAME,
    DEFAULT_CHARACTER_SHEET_PATH, DEFAULT_HEALTH, DEFAULT_INSTRUCTIONS_PATH,
    DEFAULT_INTELLIGENCE, DEFAULT_STRENGTH,
};

/// Root configuration, deserialized from `werewolf.toml`.
///
/// Every table is optional so the agent can run from environment
/// variables alone when no config file exists.
#[derive(Debug, Serialize, Deserialize, Clone, Default)]
pub struct Config {
    /// Connection to the OpenAI-compatible model runner.
    #[serde(default)]
    pub model_runner: ModelRunnerConfig,
    /// Text files injected into the chat history at startup.
    #[serde(default)]
    pub content: ContentConfig,
    /// Name and starting attributes of the character.
    #[serde(default)]
    pub character: CharacterConfig,
}

/// Model runner settings. `base_url`, `chat_model` and `tools_model` are
/// required before the conversation can start.
#[derive(Debug, Serialize, Deserialize, Clone, Default)]
pub struct ModelRunnerConfig {
    /// Base URL of the OpenAI-compatible API, e.g. `http://localhost:12434/engines/v1`.
    pub base_url: Option<String>,
    /// Model used for the streamed narration phase.
    pub chat_model: Option<String>,
    /// Model used for tool detection.
    pub tools_model: Option<String>,
    /// Bearer token. Local model runners usually need none.
    pub api_key: Option<String>,
}

/// Paths of the system instructions and character sheet.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct ContentConfig {
    #[serde(default = "default_instructions")]
    pub instructions: PathBuf,
    #[serde(default = "default_character_sheet")]
    pub character_sheet: PathBuf,
}

fn default_instructions() -> PathBuf {
    PathBuf::from(DEFAULT_INSTRUCTIONS_PATH)
}

fn default_character_sheet() -> PathBuf {
    PathBuf::from(DEFAULT_CHARACTER_SHEET_PATH)
}

impl Default for ContentConfig {
    fn default() -> Self {
        Self {
            instructions: default_instructions(),
            character_sheet: default_character_sheet(),
        }
    }
}

/// The character under tool control.
#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct CharacterConfig {
    /// Display name used in tool descriptions and results.
    pub name: String,
    /// Emoji prefixed to tool results and the stats line.
    pub emoji: String,
    pub health: f64,
    pub strength: f64,
    pub agility: f64,
    pub intelligence: f64,
}

impl Default for CharacterConfig {
    fn default() -> Self {
        Self {
            name: DEFAULT_CHARACTER_NAME.to_string(),
            emoji: DEFAULT_CHARACTER_EMOJI.to_string(),
            health: DEFAULT_HEALTH,
            strength: DEFAULT_STRENGTH,
            agility: DEFAULT_AGILITY,
            intelligence: DEFAULT_INTELLIGENCE,
        }
    }
}

/// Validated model runner settings, produced by
/// [`Config::require_model_runner`](super::Config::require_model_runner).
#[derive(Debug, Clone, PartialEq)]
pub struct ModelRunner {
    pub base_url: String,
    pub chat_model: String,
    pub tools_model: String,
    pub api_key: Option<String>,
}

/// Values taken from command-line flags, applied last.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub base_url: Option<String>,
    pub chat_model: Option<String>,
    pub tools_model: Option<String>,
    pub instructions: Option<PathBuf>,
    pub character_sheet: Option<PathBuf>,
}

/// Fatal configuration problems detected at startup.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum ConfigError {
    #[error("missing required setting `{key}`: set {env} or add `{key}` under [model_runner] in werewolf.toml")]
    Missing {
        key: &'static str,
        env: &'static str,
    },
}
