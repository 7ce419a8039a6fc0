//! Output rendering abstraction.
//!
//! Defines the [`Renderer`] trait that decouples the turn orchestrator from
//! the display layer. [`StdoutRenderer`] prints streamed tokens directly to
//! the terminal as they arrive.

use colored::Colorize;
use std::io::{self, Write};

/// Trait for rendering a turn's progress and the streamed reply.
pub trait Renderer {
    /// Called once before the narration stream is opened.
    fn render_start(&mut self);

    /// Render a single streamed chunk as it arrives.
    fn render_token(&mut self, token: &str);

    /// Called when the narration stream ends, normally or not.
    fn render_done(&mut self);

    /// Reports a recoverable error on one line.
    fn render_error(&mut self, err: &str);

    /// A progress line such as "Running tools completion...".
    fn status(&mut self, message: &str);

    /// Called before a tool call is dispatched.
    fn tool_start(&mut self, name: &str, args: &str);
}

/// Renders streaming LLM output directly to stdout.
///
/// Each token is printed immediately with an explicit flush so the user
/// sees a "typing" effect. Progress and errors go to stderr so piping the
/// reply stays clean.
pub struct StdoutRenderer {
    token_count: usize,
}

impl StdoutRenderer {
    pub fn new() -> Self {
        Self { token_count: 0 }
    }
}

impl Renderer for StdoutRenderer {
    fn render_start(&mut self) {
        self.token_count = 0;
        println!("{}", "=".repeat(crate::constants::BANNER_WIDTH).blue());
    }

    fn render_token(&mut self, token: &str) {
        print!("{}", token);
        // Flush immediately so each token appears as it arrives
        io::stdout().flush().ok();
        self.token_count += 1;
    }

    fn render_done(&mut self) {
        if self.token_count > 0 {
            println!();
        }
        println!("{}", "=".repeat(crate::constants::BANNER_WIDTH).blue());
        self.token_count = 0;
    }

    fn render_error(&mut self, err: &str) {
        eprintln!("{} {}", "error:".red().bold(), err);
    }

    fn status(&mut self, message: &str) {
        eprintln!("{}", message.dimmed());
    }

    fn tool_start(&mut self, name: &str, args: &str) {
        eprintln!(
            "{} {} {}",
            "tool:".cyan().bold(),
            name.yellow(),
            args.dimmed()
        );
    }
}

/// Captures everything rendered, for tests.
#[cfg(test)]
#[derive(Debug, Default)]
pub struct RecordingRenderer {
    pub tokens: Vec<String>,
    pub errors: Vec<String>,
    pub statuses: Vec<String>,
    pub tools: Vec<String>,
    pub started: usize,
    pub done: usize,
}

#[cfg(test)]
impl RecordingRenderer {
    pub fn text(&self) -> String {
        self.tokens.concat()
    }
}

#[cfg(test)]
impl Renderer for RecordingRenderer {
    fn render_start(&mut self) {
        self.started += 1;
    }

    fn render_token(&mut self, token: &str) {
        self.tokens.push(token.to_string());
    }

    fn render_done(&mut self) {
        self.done += 1;
    }

    fn render_error(&mut self, err: &str) {
        self.errors.push(err.to_string());
    }

    fn status(&mut self, message: &str) {
        self.statuses.push(message.to_string());
    }

    fn tool_start(&mut self, name: &str, _args: &str) {
        self.tools.push(name.to_string());
    }
}
