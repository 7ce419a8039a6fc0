//! Command-line interface definition and dispatch for the werewolf agent.
//!
//! Uses [`clap`] derive macros. Running without a subcommand starts the
//! interactive chat; the one-shot `ask` path lives in the [`ask`] submodule.

mod ask;

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use colored::Colorize;
use std::path::PathBuf;

use crate::chat;
use crate::config::{Config, Overrides};
use crate::persona::Persona;
use crate::tools::ToolRegistry;

/// Top-level CLI structure.
#[derive(Parser)]
#[command(
    name = "werewolf",
    version,
    about = "Chat with a werewolf whose attributes the model changes through tool calls"
)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalArgs,
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Flags accepted by every subcommand. They override `werewolf.toml` and
/// the environment.
#[derive(Args)]
pub struct GlobalArgs {
    /// Config file to use instead of the nearest werewolf.toml
    #[arg(long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,
    /// Base URL of the OpenAI-compatible model runner
    #[arg(long, global = true, value_name = "URL")]
    pub base_url: Option<String>,
    /// Model for the streamed narration
    #[arg(long, global = true, value_name = "MODEL")]
    pub chat_model: Option<String>,
    /// Model for tool detection
    #[arg(long, global = true, value_name = "MODEL")]
    pub tools_model: Option<String>,
    /// System instructions file
    #[arg(long, global = true, value_name = "FILE")]
    pub instructions: Option<PathBuf>,
    /// Character sheet file
    #[arg(long, global = true, value_name = "FILE")]
    pub character_sheet: Option<PathBuf>,
}

impl GlobalArgs {
    fn overrides(&self) -> Overrides {
        Overrides {
            base_url: self.base_url.clone(),
            chat_model: self.chat_model.clone(),
            tools_model: self.tools_model.clone(),
            instructions: self.instructions.clone(),
            character_sheet: self.character_sheet.clone(),
        }
    }
}

/// Available subcommands.
///
/// The `///` doc comments on variants double as `--help` text.
#[derive(Subcommand)]
pub enum Commands {
    /// Start an interactive conversation (default)
    Chat,
    /// Run a single turn and exit
    Ask {
        /// What to say to the character
        prompt: Vec<String>,
    },
    /// List the tools offered to the model
    Tools,
    /// Inspect configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

/// Subcommands for the `config` command.
#[derive(Subcommand)]
pub enum ConfigAction {
    /// Show the resolved configuration
    Show,
}

/// Parses command-line arguments into a [`Cli`] struct.
///
/// Delegates to [`clap::Parser::parse`], which exits the process on invalid input.
pub fn parse() -> Cli {
    Cli::parse()
}

/// Dispatches the parsed CLI command to its handler.
///
/// Configuration is resolved first so every subcommand sees the same
/// precedence. Missing model runner settings are fatal only for the
/// subcommands that talk to the model.
pub async fn run(cli: Cli) -> Result<()> {
    let config_path = cli.global.config.as_deref();
    let config = Config::load(config_path, &cli.global.overrides())?;

    match cli.command.unwrap_or(Commands::Chat) {
        Commands::Chat => {
            let runner = config.require_model_runner()?;
            let persona = Persona::load(&config.content)?;
            chat::run_chat(&config, &runner, &persona).await
        }
        Commands::Ask { prompt } => ask::run_ask(&config, &prompt.join(" ")).await,
        Commands::Tools => {
            let registry = ToolRegistry::for_subject(&config.character.name);
            println!("{} ({} tools)", "Tools:".bold(), registry.definitions().len());
            chat::print_tools(&registry);
            Ok(())
        }
        Commands::Config {
            action: ConfigAction::Show,
        } => {
            match Config::source_path(config_path)? {
                Some(path) => println!("{} {}", "Config file:".bold(), path.display()),
                None => println!("{} {}", "Config file:".bold(), "(none)".dimmed()),
            }
            println!();
            let mut shown = config.clone();
            if shown.model_runner.api_key.is_some() {
                shown.model_runner.api_key = Some("********".to_string());
            }
            println!("{}", toml::to_string_pretty(&shown)?);
            Ok(())
        }
    }
}
