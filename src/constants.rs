//! Centralized constants for the werewolf agent.
//!
//! Prompts, default strings, sampling settings and environment variable
//! names live here so they can be changed in one place.

/// Application name used in CLI output and directory paths.
pub const APP_NAME: &str = "werewolf-agent";

/// Per-project configuration filename.
pub const PROJECT_CONFIG_FILENAME: &str = "werewolf.toml";

/// Readline history filename.
pub const HISTORY_FILENAME: &str = "input_history.txt";

/// Input that ends the conversation.
pub const EXIT_COMMAND: &str = "/bye";

// --- Environment ---

/// Base URL of the OpenAI-compatible model runner.
pub const ENV_BASE_URL: &str = "MODEL_RUNNER_BASE_URL";

/// Model used for the narration phase.
pub const ENV_CHAT_MODEL: &str = "MODEL_RUNNER_CHAT_MODEL";

/// Model used for the tool-detection phase.
pub const ENV_TOOLS_MODEL: &str = "MODEL_RUNNER_TOOLS_MODEL";

/// Optional bearer token for the model runner.
pub const ENV_API_KEY: &str = "MODEL_RUNNER_API_KEY";

/// Filter directive variable for diagnostic logging.
pub const ENV_LOG: &str = "WEREWOLF_LOG";

/// Filter used when [`ENV_LOG`] is unset.
pub const DEFAULT_LOG_FILTER: &str = "warn";

// --- Content ---

/// Default path of the system instructions file.
pub const DEFAULT_INSTRUCTIONS_PATH: &str = "instructions.md";

/// Default path of the character sheet file.
pub const DEFAULT_CHARACTER_SHEET_PATH: &str = "character_sheet.md";

// --- Character defaults ---

pub const DEFAULT_CHARACTER_NAME: &str = "Werewolf";
pub const DEFAULT_CHARACTER_EMOJI: &str = "🐺";
pub const DEFAULT_HEALTH: f64 = 100.0;
pub const DEFAULT_STRENGTH: f64 = 80.0;
pub const DEFAULT_AGILITY: f64 = 70.0;
pub const DEFAULT_INTELLIGENCE: f64 = 60.0;

// --- Sampling ---

/// Tool selection must be deterministic.
pub const DETECTION_TEMPERATURE: f32 = 0.0;

/// Temperature of the streamed narration reply.
pub const NARRATION_TEMPERATURE: f32 = 0.5;

// --- Prompts ---

/// System prompt seeding the tool-detection history.
pub const TOOLS_SYSTEM_PROMPT: &str = "Your job is to understand the user prompt and decide \
if you need to use tools to run external commands.\n\
Ignore all things not related to the usage of a tool.";

/// Appended to the chat history on every turn, after the folded tool results.
pub const CHAT_TOOL_FRAMING: &str = "If you detect that the user prompt is related to a tool, \
ignore this part and focus on the other parts.";

/// Prefix of the character sheet entry in the chat history.
pub const CHARACTER_CONTEXT_PREFIX: &str = "CONTEXT:\n";

/// Header of the folded tool results injected into the narration phase.
pub const RESULTS_HEADER: &str = "RESULTS:\n";

/// In-band instruction addressed to the narration model.
pub const TELL_USER_PREFIX: &str = "TELL THIS TO THE USER:";

// --- Console ---

pub const BANNER_WIDTH: usize = 80;
pub const EXPLANATION_MESSAGE: &str =
    "Ask me anything about me. Type '/bye' to quit or Ctrl+C to interrupt responses.";
pub const GOODBYE_MESSAGE: &str = "Bye!";
