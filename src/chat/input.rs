//! Reading and classifying user input.
//!
//! [`LineReader`] abstracts the prompt so the conversation loop can be
//! driven from a script in tests. [`EditorReader`] is the interactive
//! implementation backed by [`rustyline`].

use anyhow::Result;
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;
use std::path::PathBuf;

use super::commands::LocalCommand;
use crate::constants::EXIT_COMMAND;

/// Result of asking the user for one utterance.
#[derive(Debug, Clone, PartialEq)]
pub enum ReadOutcome {
    Line(String),
    /// Ctrl+C at the prompt.
    Interrupted,
    /// Ctrl+D or end of input.
    Eof,
}

/// Source of user utterances.
pub trait LineReader {
    fn read_line(&mut self, prompt: &str) -> Result<ReadOutcome>;

    /// Remembers an utterance for recall. No-op by default.
    fn add_history(&mut self, _line: &str) {}
}

/// What the loop should do with a line.
#[derive(Debug, PartialEq)]
pub enum Input<'a> {
    Empty,
    Exit,
    Command(LocalCommand),
    Utterance(&'a str),
}

impl<'a> Input<'a> {
    /// Whitespace-only lines are empty; `/bye` exits; known local commands
    /// are handled without the model. Everything else is an utterance,
    /// including unrecognized slash-prefixed text.
    pub fn classify(line: &'a str) -> Self {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            return Input::Empty;
        }
        if trimmed == EXIT_COMMAND {
            return Input::Exit;
        }
        match LocalCommand::parse(trimmed) {
            Some(command) => Input::Command(command),
            None => Input::Utterance(trimmed),
        }
    }
}

/// Interactive reader with line editing and persistent recall history.
///
/// A line ending in `\` continues onto the next line; the pieces are joined
/// with newlines.
pub struct EditorReader {
    editor: DefaultEditor,
    history_path: Option<PathBuf>,
}

impl EditorReader {
    pub fn new(history_path: Option<PathBuf>) -> Result<Self> {
        let mut editor = DefaultEditor::new()?;
        if let Some(ref path) = history_path {
            if path.exists() {
                let _ = editor.load_history(path);
            }
        }
        Ok(Self {
            editor,
            history_path,
        })
    }

    /// Writes the recall history back to disk. Failures are logged, not fatal.
    pub fn save(&mut self) {
        let Some(ref path) = self.history_path else {
            return;
        };
        if let Some(parent) = path.parent() {
            if let Err(e) = std::fs::create_dir_all(parent) {
                tracing::warn!(path = %parent.display(), error = %e, "cannot create cache dir");
                return;
            }
        }
        if let Err(e) = self.editor.save_history(path) {
            tracing::warn!(path = %path.display(), error = %e, "cannot save input history");
        }
    }
}

impl LineReader for EditorReader {
    fn read_line(&mut self, prompt: &str) -> Result<ReadOutcome> {
        let mut buffer = String::new();
        let mut current_prompt = prompt.to_string();
        loop {
            match self.editor.readline(&current_prompt) {
                Ok(line) => match line.strip_suffix('\\') {
                    Some(head) => {
                        buffer.push_str(head);
                        buffer.push('\n');
                        current_prompt = "... ".to_string();
                    }
                    None => {
                        buffer.push_str(&line);
                        return Ok(ReadOutcome::Line(buffer));
                    }
                },
                Err(ReadlineError::Interrupted) => return Ok(ReadOutcome::Interrupted),
                Err(ReadlineError::Eof) => return Ok(ReadOutcome::Eof),
                Err(e) => return Err(e.into()),
            }
        }
    }

    fn add_history(&mut self, line: &str) {
        let _ = self.editor.add_history_entry(line);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_whitespace_is_empty() {
        assert_eq!(Input::classify(""), Input::Empty);
        assert_eq!(Input::classify("   \t "), Input::Empty);
        assert_eq!(Input::classify("\n"), Input::Empty);
    }

    #[test]
    fn test_bye_exits() {
        assert_eq!(Input::classify("/bye"), Input::Exit);
        assert_eq!(Input::classify("  /bye "), Input::Exit);
        assert_eq!(Input::classify("/bye now"), Input::Utterance("/bye now"));
        assert_eq!(Input::classify("/BYE"), Input::Utterance("/BYE"));
    }

    #[test]
    fn test_local_commands() {
        assert_eq!(Input::classify("/stats"), Input::Command(LocalCommand::Stats));
        assert_eq!(Input::classify("/tools"), Input::Command(LocalCommand::Tools));
        assert_eq!(Input::classify("/help"), Input::Command(LocalCommand::Help));
    }

    #[test]
    fn test_other_text_is_an_utterance() {
        assert_eq!(Input::classify("  howl! "), Input::Utterance("howl!"));
        assert_eq!(Input::classify("/howl"), Input::Utterance("/howl"));
    }
}
