//! OpenAI-compatible chat-completions client.
//!
//! Contains the [`Provider`] struct, which talks to any server exposing
//! `POST {base_url}/chat/completions` (Docker Model Runner, Ollama,
//! llama.cpp, OpenAI itself) through an [`async_openai::Client`].

use async_openai::config::OpenAIConfig;
use async_openai::error::OpenAIError;
use async_openai::types::chat::{
    ChatCompletionMessageToolCalls, ChatCompletionRequestAssistantMessageArgs,
    ChatCompletionRequestMessage, ChatCompletionRequestSystemMessageArgs,
    ChatCompletionRequestUserMessageArgs, ChatCompletionTool, ChatCompletionTools,
    CreateChatCompletionRequest, CreateChatCompletionRequestArgs, FunctionObjectArgs,
};
use async_openai::Client;
use async_trait::async_trait;
use futures::StreamExt;

use super::wire::ChatChunk;
use super::{ChunkStream, Completion, CompletionRequest, CompletionTransport, TransportError};
use crate::config::ModelRunner;
use crate::message::{Message, Role};
use crate::tools::{ToolCallRequest, ToolDefinition};

/// A configured model runner endpoint.
pub struct Provider {
    client: Client<OpenAIConfig>,
}

impl Provider {
    /// Creates a provider for the validated model runner settings.
    ///
    /// Local runners need no key; an empty bearer token is sent then.
    pub fn new(runner: &ModelRunner) -> Self {
        let config = OpenAIConfig::new()
            .with_api_base(runner.base_url.trim_end_matches('/'))
            .with_api_key(runner.api_key.clone().unwrap_or_default());
        Self {
            client: Client::with_config(config),
        }
    }
}

/// Converts a request into the OpenAI shape. `tools` and
/// `parallel_tool_calls` are only sent when there are tools to offer.
fn build_request(
    request: &CompletionRequest,
    stream: bool,
) -> Result<CreateChatCompletionRequest, OpenAIError> {
    let mut args = CreateChatCompletionRequestArgs::default();
    args.model(&request.model)
        .messages(to_messages(&request.messages)?)
        .temperature(request.temperature);
    if !request.tools.is_empty() {
        args.tools(to_tools(&request.tools)?)
            .parallel_tool_calls(request.parallel_tool_calls);
    }
    if stream {
        args.stream(true);
    }
    args.build()
}

fn to_messages(messages: &[Message]) -> Result<Vec<ChatCompletionRequestMessage>, OpenAIError> {
    messages
        .iter()
        .map(|m| {
            let content = m.content.clone();
            let message = match m.role {
                Role::System => ChatCompletionRequestMessage::System(
                    ChatCompletionRequestSystemMessageArgs::default()
                        .content(content)
                        .build()?,
                ),
                Role::User => ChatCompletionRequestMessage::User(
                    ChatCompletionRequestUserMessageArgs::default()
                        .content(content)
                        .build()?,
                ),
                Role::Assistant => ChatCompletionRequestMessage::Assistant(
                    ChatCompletionRequestAssistantMessageArgs::default()
                        .content(content)
                        .build()?,
                ),
            };
            Ok(message)
        })
        .collect()
}

fn to_tools(definitions: &[ToolDefinition]) -> Result<Vec<ChatCompletionTools>, OpenAIError> {
    definitions
        .iter()
        .map(|def| {
            let mut function = FunctionObjectArgs::default();
            function.name(&def.name).description(&def.description);
            if let Some(ref parameters) = def.parameters {
                function.parameters(parameters.clone());
            }
            Ok(ChatCompletionTools::Function(ChatCompletionTool {
                function: function.build()?,
            }))
        })
        .collect()
}

#[async_trait]
impl CompletionTransport for Provider {
    async fn complete(&self, request: &CompletionRequest) -> Result<Completion, TransportError> {
        tracing::debug!(
            model = %request.model,
            messages = request.messages.len(),
            tools = request.tools.len(),
            "sending completion request"
        );
        let response = self
            .client
            .chat()
            .create(build_request(request, false)?)
            .await?;

        let choice = response
            .choices
            .into_iter()
            .next()
            .ok_or(TransportError::EmptyResponse)?;
        let tool_calls = choice
            .message
            .tool_calls
            .unwrap_or_default()
            .into_iter()
            .filter_map(|call| match call {
                ChatCompletionMessageToolCalls::Function(call) => Some(ToolCallRequest::new(
                    call.function.name,
                    call.function.arguments,
                )),
                other => {
                    tracing::warn!(call = ?other, "ignoring non-function tool call");
                    None
                }
            })
            .collect();
        Ok(Completion { tool_calls })
    }

    async fn stream(&self, request: &CompletionRequest) -> Result<ChunkStream, TransportError> {
        tracing::debug!(
            model = %request.model,
            messages = request.messages.len(),
            "sending streaming request"
        );
        let chunks = self
            .client
            .chat()
            .create_stream_byot(build_request(request, true)?)
            .await?;

        Ok(Box::pin(chunks.filter_map(
            |item: Result<ChatChunk, OpenAIError>| async move {
                match item {
                    Ok(chunk) => chunk.into_content().transpose(),
                    Err(e) => Some(Err(e.into())),
                }
            },
        )))
    }
}
