//! Interactive chat REPL for the werewolf agent.
//!
//! Reads utterances with [`rustyline`] and runs one turn per utterance. The
//! [`Conversation`] is created once here and lives until the loop ends;
//! nothing in the loop edits or trims its histories.

mod commands;
mod input;

pub(crate) use commands::print_tools;
use input::{EditorReader, Input, LineReader, ReadOutcome};

use anyhow::Result;
use colored::Colorize;
use std::future::Future;

use crate::agent::Agent;
use crate::config::{CharacterConfig, Config, ModelRunner};
use crate::constants::{BANNER_WIDTH, EXPLANATION_MESSAGE, GOODBYE_MESSAGE, HISTORY_FILENAME};
use crate::conversation::Conversation;
use crate::entity::EntityState;
use crate::output::{Renderer, StdoutRenderer};
use crate::persona::Persona;
use crate::provider::CompletionTransport;

/// Runs the interactive chat REPL.
///
/// # Readline behavior
///
/// - **Ctrl+C** at the prompt discards the line; during a turn it
///   interrupts the pending model call
/// - **Ctrl+D** or `/bye` exits
/// - Input history is persisted to `~/.cache/werewolf-agent/input_history.txt`
pub async fn run_chat(config: &Config, runner: &ModelRunner, persona: &Persona) -> Result<()> {
    let character = &config.character;
    let agent = Agent::connect(runner, character);
    let mut conversation = Conversation::new(EntityState::from(character), persona);

    print_banner(character, runner);

    let history_path = match Config::cache_dir() {
        Ok(dir) => Some(dir.join(HISTORY_FILENAME)),
        Err(e) => {
            tracing::warn!(error = %e, "input history disabled");
            None
        }
    };
    let mut reader = EditorReader::new(history_path)?;
    let mut renderer = StdoutRenderer::new();

    let result = drive(
        &mut reader,
        &agent,
        &mut conversation,
        &mut renderer,
        &character.emoji,
        || async {
            let _ = tokio::signal::ctrl_c().await;
        },
    )
    .await;

    reader.save();
    result
}

fn print_banner(character: &CharacterConfig, runner: &ModelRunner) {
    println!(
        "{} {}",
        character.emoji,
        format!("I'm the {}", character.name).bold().cyan()
    );
    println!(
        "[url: {}] [chat: {}] [tools: {}]",
        runner.base_url.yellow(),
        runner.chat_model.yellow(),
        runner.tools_model.yellow(),
    );
    println!("{}", EXPLANATION_MESSAGE.dimmed());
    println!("{}", "=".repeat(BANNER_WIDTH).blue());
}

/// The conversation loop.
///
/// Reads until `/bye` or end of input. `interrupt` is called once per turn
/// to produce the signal raced against that turn's model calls.
pub async fn drive<T, F, Fut>(
    reader: &mut dyn LineReader,
    agent: &Agent<T>,
    conversation: &mut Conversation,
    renderer: &mut dyn Renderer,
    emoji: &str,
    mut interrupt: F,
) -> Result<()>
where
    T: CompletionTransport,
    F: FnMut() -> Fut,
    Fut: Future<Output = ()>,
{
    let prompt = format!("{} ", format!("{emoji}>").green().bold());

    loop {
        let line = match reader.read_line(&prompt)? {
            ReadOutcome::Line(line) => line,
            ReadOutcome::Interrupted => {
                println!("{}", "^C".dimmed());
                continue;
            }
            ReadOutcome::Eof => break,
        };

        match Input::classify(&line) {
            Input::Empty => continue,
            Input::Exit => break,
            Input::Command(command) => {
                commands::run(command, conversation, agent.registry(), emoji);
            }
            Input::Utterance(text) => {
                reader.add_history(text);
                agent
                    .run_turn(conversation, text, renderer, interrupt())
                    .await;
                commands::print_stats(conversation, emoji);
                println!();
            }
        }
    }

    println!("{} {}", emoji, GOODBYE_MESSAGE);
    Ok(())
}
