//! Tool registry and dispatcher for the character's attributes.
//!
//! Every tool is an `(action, attribute)` pair such as `increase_health`.
//! The registry sent to the model and the dispatcher that executes calls are
//! both generated from the same product, so a name present in one is always
//! present in the other.

pub mod command;
pub mod dispatch;

use serde::Serialize;
use serde_json::{json, Value};

use crate::entity::Attribute;

pub use command::{Action, ToolCommand};
pub use dispatch::Dispatcher;

/// Definition sent to the LLM so it knows what tools are available.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ToolDefinition {
    pub name: String,
    pub description: String,
    /// JSON Schema of the arguments. `None` for zero-argument tools.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parameters: Option<Value>,
}

/// A tool invocation requested by the detection phase.
#[derive(Debug, Clone, PartialEq)]
pub struct ToolCallRequest {
    /// Name of the tool to invoke.
    pub name: String,
    /// JSON-encoded argument object, exactly as received.
    pub arguments: String,
}

impl ToolCallRequest {
    pub fn new(name: impl Into<String>, arguments: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            arguments: arguments.into(),
        }
    }
}

/// Per-call failures. None of these abort the turn.
#[derive(Debug, thiserror::Error)]
pub enum ToolError {
    #[error("unknown function call: {0}")]
    UnknownTool(String),
    #[error("invalid arguments for {tool}: {source}")]
    InvalidArguments {
        tool: String,
        #[source]
        source: serde_json::Error,
    },
}

/// The static catalog of tools offered to the detection model.
pub struct ToolRegistry {
    definitions: Vec<ToolDefinition>,
}

impl ToolRegistry {
    /// Builds the catalog for a character named `subject`.
    pub fn for_subject(subject: &str) -> Self {
        let definitions = Attribute::ALL
            .into_iter()
            .flat_map(|attribute| {
                Action::ALL
                    .into_iter()
                    .map(move |action| definition(action, attribute, subject))
            })
            .collect();
        Self { definitions }
    }

    /// Produce definitions for the LLM (sent in the API request).
    pub fn definitions(&self) -> &[ToolDefinition] {
        &self.definitions
    }
}

/// Stable tool name, e.g. `decrease_agility`.
pub fn tool_name(action: Action, attribute: Attribute) -> String {
    format!("{}_{}", action.verb(), attribute.name())
}

fn definition(action: Action, attribute: Attribute, subject: &str) -> ToolDefinition {
    let attr = attribute.name();
    let (description, parameters) = match action {
        Action::Get => (format!("Get the {attr} of the {subject}"), None),
        Action::Set => (
            format!("Set the {attr} of the {subject}"),
            Some(number_schema(
                "value",
                &format!("The new {attr} value for the {subject}."),
            )),
        ),
        Action::Increase => (
            format!("Increase the {attr} of the {subject}"),
            Some(number_schema(
                "amount",
                &format!("The amount to increase the {subject}'s {attr} by."),
            )),
        ),
        Action::Decrease => (
            format!("Decrease the {attr} of the {subject}"),
            Some(number_schema(
                "amount",
                &format!("The amount to decrease the {subject}'s {attr} by."),
            )),
        ),
    };

    ToolDefinition {
        name: tool_name(action, attribute),
        description,
        parameters,
    }
}

/// Object schema with a single required number property.
fn number_schema(property: &str, description: &str) -> Value {
    json!({
        "type": "object",
        "properties": {
            property: {
                "type": "number",
                "description": description
            }
        },
        "required": [property]
    })
}
