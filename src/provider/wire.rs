//! Streamed chunk payload.
//!
//! Local model runners are looser than the OpenAI schema: the closing chunk
//! often carries `"delta": null` next to its `finish_reason`, and errors can
//! arrive in-band as `{"error": ...}`. Chunks are decoded into this lenient
//! shape instead of the strict request/response types.

use serde::Deserialize;
use serde_json::Value;

use super::TransportError;

/// One `data:` payload of a streamed completion.
#[derive(Debug, Deserialize)]
pub(super) struct ChatChunk {
    #[serde(default)]
    choices: Vec<ChunkChoice>,
    #[serde(default)]
    error: Option<Value>,
}

#[derive(Debug, Deserialize)]
struct ChunkChoice {
    delta: Option<Delta>,
}

#[derive(Debug, Deserialize)]
struct Delta {
    content: Option<String>,
}

impl ChatChunk {
    /// Text carried by the chunk, if any.
    pub(super) fn into_content(self) -> Result<Option<String>, TransportError> {
        if let Some(error) = self.error {
            let message = error
                .get("message")
                .and_then(Value::as_str)
                .map(String::from)
                .unwrap_or_else(|| error.to_string());
            return Err(TransportError::Api(message));
        }
        Ok(self
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.delta)
            .and_then(|d| d.content)
            .filter(|c| !c.is_empty()))
    }
}
