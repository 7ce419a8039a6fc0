//! One-shot `werewolf ask`: a single turn against a fresh conversation.

use anyhow::{Context, Result};
use colored::Colorize;

use crate::agent::{Agent, TurnOutcome};
use crate::config::Config;
use crate::conversation::Conversation;
use crate::entity::EntityState;
use crate::output::StdoutRenderer;
use crate::persona::Persona;

/// Runs one turn and prints the resulting stats line.
///
/// Unlike the REPL, a failed model call makes the command fail so scripts
/// see a non-zero exit status.
pub(crate) async fn run_ask(config: &Config, prompt: &str) -> Result<()> {
    let prompt = prompt.trim();
    if prompt.is_empty() {
        anyhow::bail!("No prompt provided. Usage: werewolf ask \"your question here\"");
    }

    let runner = config.require_model_runner()?;
    let persona = Persona::load(&config.content)?;
    let character = &config.character;
    let agent = Agent::connect(&runner, character);
    let mut conversation = Conversation::new(EntityState::from(character), &persona);

    println!("{} {}", ">".green().bold(), prompt);
    println!();

    let mut renderer = StdoutRenderer::new();
    let outcome = agent
        .run_turn(&mut conversation, prompt, &mut renderer, async {
            let _ = tokio::signal::ctrl_c().await;
        })
        .await;

    match outcome {
        TurnOutcome::Completed(summary) => {
            println!("{}{}", character.emoji, conversation.entity);
            match summary.stream_error {
                Some(e) => Err(e).context("chat completion failed"),
                None => Ok(()),
            }
        }
        TurnOutcome::DetectionFailed(e) => Err(e).context("tools completion failed"),
        TurnOutcome::DetectionInterrupted => Ok(()),
    }
}
