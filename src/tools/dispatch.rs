//! Routes requested tool calls to their handlers.

use super::{ToolCallRequest, ToolCommand, ToolError};
use crate::entity::EntityState;

/// Executes tool calls against an [`EntityState`] passed in by the caller.
///
/// Holds only presentation data (the subject's name and emoji); the state
/// itself is borrowed mutably for each call.
#[derive(Debug, Clone)]
pub struct Dispatcher {
    subject: String,
    emoji: String,
}

impl Dispatcher {
    pub fn new(subject: impl Into<String>, emoji: impl Into<String>) -> Self {
        Self {
            subject: subject.into(),
            emoji: emoji.into(),
        }
    }

    /// Decodes and runs a single call.
    ///
    /// On error the state is untouched.
    pub fn dispatch(
        &self,
        state: &mut EntityState,
        call: &ToolCallRequest,
    ) -> Result<String, ToolError> {
        tracing::debug!(tool = %call.name, arguments = %call.arguments, "executing tool call");
        let command = ToolCommand::decode(&call.name, &call.arguments)?;
        let result = command.apply(state, &self.subject, &self.emoji);
        tracing::info!(tool = %call.name, %result, "tool call executed");
        Ok(result)
    }
}
