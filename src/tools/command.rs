//! Typed tool commands decoded from a name and a JSON argument string.

use serde::Deserialize;

use super::ToolError;
use crate::constants::TELL_USER_PREFIX;
use crate::entity::{Attribute, EntityState};

/// What a tool does to its attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Get,
    Set,
    Increase,
    Decrease,
}

impl Action {
    pub const ALL: [Action; 4] = [Action::Get, Action::Set, Action::Increase, Action::Decrease];

    pub fn verb(self) -> &'static str {
        match self {
            Action::Get => "get",
            Action::Set => "set",
            Action::Increase => "increase",
            Action::Decrease => "decrease",
        }
    }

    fn from_verb(verb: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|a| a.verb() == verb)
    }
}

/// A decoded, validated tool call.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ToolCommand {
    Get(Attribute),
    Set(Attribute, f64),
    Increase(Attribute, f64),
    Decrease(Attribute, f64),
}

#[derive(Deserialize)]
struct SetInput {
    value: f64,
}

#[derive(Deserialize)]
struct AmountInput {
    amount: f64,
}

impl ToolCommand {
    /// Decodes a tool call.
    ///
    /// `get_*` tools take no arguments and ignore whatever was sent. The
    /// other tools need a JSON object with a numeric `value` or `amount`;
    /// integers are accepted, strings are not.
    pub fn decode(name: &str, arguments: &str) -> Result<Self, ToolError> {
        let (action, attribute) = name
            .split_once('_')
            .and_then(|(verb, attr)| Some((Action::from_verb(verb)?, Attribute::from_name(attr)?)))
            .ok_or_else(|| ToolError::UnknownTool(name.to_string()))?;

        let invalid = |source| ToolError::InvalidArguments {
            tool: name.to_string(),
            source,
        };

        let command = match action {
            Action::Get => ToolCommand::Get(attribute),
            Action::Set => {
                let input: SetInput = serde_json::from_str(arguments).map_err(invalid)?;
                ToolCommand::Set(attribute, input.value)
            }
            Action::Increase => {
                let input: AmountInput = serde_json::from_str(arguments).map_err(invalid)?;
                ToolCommand::Increase(attribute, input.amount)
            }
            Action::Decrease => {
                let input: AmountInput = serde_json::from_str(arguments).map_err(invalid)?;
                ToolCommand::Decrease(attribute, input.amount)
            }
        };
        Ok(command)
    }

    pub fn attribute(&self) -> Attribute {
        match *self {
            ToolCommand::Get(a)
            | ToolCommand::Set(a, _)
            | ToolCommand::Increase(a, _)
            | ToolCommand::Decrease(a, _) => a,
        }
    }

    /// Reads or mutates exactly one attribute and returns the sentence the
    /// narration phase should relay to the user.
    pub fn apply(&self, state: &mut EntityState, subject: &str, emoji: &str) -> String {
        let attr = self.attribute();
        let slot = state.get_mut(attr);
        let report = match *self {
            ToolCommand::Get(_) => format!("The {subject}'s {attr} is {slot}."),
            ToolCommand::Set(_, value) => {
                *slot = value;
                format!("The {subject}'s {attr} has been set to {slot}.")
            }
            ToolCommand::Increase(_, amount) => {
                *slot += amount;
                format!(
                    "The {subject}'s {attr} has been increased by {amount}. New {attr} is {slot}."
                )
            }
            ToolCommand::Decrease(_, amount) => {
                *slot -= amount;
                format!(
                    "The {subject}'s {attr} has been decreased by {amount}. New {attr} is {slot}."
                )
            }
        };
        format!("{TELL_USER_PREFIX} {emoji} {report}")
    }
}
