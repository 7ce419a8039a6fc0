//! Local slash commands for the chat REPL.
//!
//! `/help`, `/stats` and `/tools` are answered locally and never reach the
//! model or the histories.

use colored::Colorize;

use crate::constants::EXIT_COMMAND;
use crate::conversation::Conversation;
use crate::tools::ToolRegistry;

/// A command handled without the model.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LocalCommand {
    Help,
    Stats,
    Tools,
}

impl LocalCommand {
    pub(crate) fn parse(input: &str) -> Option<Self> {
        match input {
            "/help" => Some(LocalCommand::Help),
            "/stats" => Some(LocalCommand::Stats),
            "/tools" => Some(LocalCommand::Tools),
            _ => None,
        }
    }
}

/// Handle a local command.
pub(crate) fn run(
    command: LocalCommand,
    conversation: &Conversation,
    registry: &ToolRegistry,
    emoji: &str,
) {
    match command {
        LocalCommand::Help => {
            println!("{}", "Commands:".bold());
            println!("  {} - show the character's attributes", "/stats".cyan());
            println!("  {} - list the tools the model can call", "/tools".cyan());
            println!("  {} - show this help", "/help".cyan());
            println!("  {} - exit", EXIT_COMMAND.cyan());
            println!("  {} - continue on the next line", "\\ at end of line".cyan());
            println!("  {} - interrupt a response", "Ctrl+C".cyan());
        }
        LocalCommand::Stats => print_stats(conversation, emoji),
        LocalCommand::Tools => print_tools(registry),
    }
}

/// Prints the stats line, e.g. `🐺⛑️ 100 💪 80 🏃 70 🧠 60`.
pub(crate) fn print_stats(conversation: &Conversation, emoji: &str) {
    println!("{}{}", emoji, conversation.entity);
}

/// Lists every registered tool with its description.
pub(crate) fn print_tools(registry: &ToolRegistry) {
    for def in registry.definitions() {
        println!("  {} {}", def.name.yellow(), def.description.dimmed());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_known_commands_only() {
        assert_eq!(LocalCommand::parse("/stats"), Some(LocalCommand::Stats));
        assert_eq!(LocalCommand::parse("/tools"), Some(LocalCommand::Tools));
        assert_eq!(LocalCommand::parse("/help"), Some(LocalCommand::Help));
        assert_eq!(LocalCommand::parse("/stats please"), None);
        assert_eq!(LocalCommand::parse("/bye"), None);
        assert_eq!(LocalCommand::parse("stats"), None);
    }
}
