//! Language-model transport.
//!
//! [`CompletionTransport`] is the only contract the turn orchestrator has
//! with the model: one non-streamed completion that may return tool calls,
//! and one streamed completion that yields text chunks. [`Provider`] speaks
//! the OpenAI-compatible chat-completions API through [`async_openai`].

mod client;
#[cfg(test)]
pub(crate) mod mock;
mod wire;

pub use client::Provider;

use std::pin::Pin;

use async_openai::error::OpenAIError;
use async_trait::async_trait;
use futures::Stream;

use crate::message::Message;
use crate::tools::{ToolCallRequest, ToolDefinition};

/// Incremental text chunks of a streamed completion.
pub type ChunkStream = Pin<Box<dyn Stream<Item = Result<String, TransportError>> + Send>>;

/// A chat-completion request, independent of the wire format.
#[derive(Debug, Clone, PartialEq)]
pub struct CompletionRequest {
    pub model: String,
    pub messages: Vec<Message>,
    /// Empty for the narration phase.
    pub tools: Vec<ToolDefinition>,
    pub parallel_tool_calls: bool,
    pub temperature: f32,
}

/// The tool calls of the first response choice.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Completion {
    pub tool_calls: Vec<ToolCallRequest>,
}

/// Failures talking to the model runner.
#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    /// Error reported by the model runner, either as a non-2xx response
    /// body or in-band inside a stream.
    #[error("model runner error: {0}")]
    Api(String),
    #[error("request failed: {0}")]
    Request(OpenAIError),
    #[error("response contained no choices")]
    EmptyResponse,
}

impl From<OpenAIError> for TransportError {
    fn from(err: OpenAIError) -> Self {
        match err {
            OpenAIError::ApiError(api) => TransportError::Api(api.message),
            other => TransportError::Request(other),
        }
    }
}

#[async_trait]
pub trait CompletionTransport: Send + Sync {
    /// Non-streamed completion; returns the first choice.
    async fn complete(&self, request: &CompletionRequest) -> Result<Completion, TransportError>;

    /// Streamed completion; yields text content in arrival order.
    async fn stream(&self, request: &CompletionRequest) -> Result<ChunkStream, TransportError>;
}
