//! The two-phase turn: tool detection, dispatch, then streamed narration.
//!
//! [`Agent::run_turn`] appends the utterance to the detection history and
//! asks the tools model which tools to call. Requested calls run in order
//! against the conversation's [`EntityState`](crate::entity::EntityState);
//! their results are folded under a `RESULTS:` header and handed to the chat
//! model together with the utterance. The narration reply is rendered chunk
//! by chunk as it streams in.
//!
//! Failures stay inside the turn. A failed detection request aborts the
//! turn before any tool runs; a failed tool call is skipped; a failed
//! stream is reported after whatever was already printed.

use std::future::Future;
use std::pin::Pin;

use futures::StreamExt;

use crate::config::{CharacterConfig, ModelRunner};
use crate::constants::{
    CHAT_TOOL_FRAMING, DETECTION_TEMPERATURE, NARRATION_TEMPERATURE, RESULTS_HEADER,
};
use crate::conversation::Conversation;
use crate::entity::EntityState;
use crate::message::Message;
use crate::output::Renderer;
use crate::provider::{CompletionRequest, CompletionTransport, Provider, TransportError};
use crate::tools::{Dispatcher, ToolCallRequest, ToolError, ToolRegistry};

/// How a turn ended.
#[derive(Debug)]
pub enum TurnOutcome {
    /// Narration ran (possibly cut short; see [`TurnSummary`]).
    Completed(TurnSummary),
    /// The detection request failed; no tool ran, chat history untouched.
    DetectionFailed(TransportError),
    /// Interrupted while waiting for tool detection; no tool ran.
    DetectionInterrupted,
}

/// What a completed turn did.
#[derive(Debug, Default)]
pub struct TurnSummary {
    /// Context injected into the narration phase; empty when no tool was requested.
    pub folded: String,
    /// Tool calls that ran successfully.
    pub executed: usize,
    /// Tool calls that were skipped.
    pub failures: Vec<ToolError>,
    /// Narration text emitted to the user.
    pub reply: String,
    pub stream_error: Option<TransportError>,
    /// The user interrupted the narration stream.
    pub interrupted: bool,
}

/// Drives turns against a completion transport.
pub struct Agent<T> {
    transport: T,
    registry: ToolRegistry,
    dispatcher: Dispatcher,
    tools_model: String,
    chat_model: String,
}

impl Agent<Provider> {
    /// Builds an agent talking to the configured model runner, with tools
    /// generated for `character`.
    pub fn connect(runner: &ModelRunner, character: &CharacterConfig) -> Self {
        Agent::new(
            Provider::new(runner),
            ToolRegistry::for_subject(&character.name),
            Dispatcher::new(&character.name, &character.emoji),
            &runner.tools_model,
            &runner.chat_model,
        )
    }
}

impl<T: CompletionTransport> Agent<T> {
    pub fn new(
        transport: T,
        registry: ToolRegistry,
        dispatcher: Dispatcher,
        tools_model: impl Into<String>,
        chat_model: impl Into<String>,
    ) -> Self {
        Self {
            transport,
            registry,
            dispatcher,
            tools_model: tools_model.into(),
            chat_model: chat_model.into(),
        }
    }

    pub fn registry(&self) -> &ToolRegistry {
        &self.registry
    }

    /// Runs one turn for a non-empty utterance.
    ///
    /// `interrupt` is raced against both model calls; when it resolves
    /// during detection the turn ends without running tools, and when it
    /// resolves during narration emission stops. History appended before
    /// the interruption is kept.
    pub async fn run_turn<I>(
        &self,
        conversation: &mut Conversation,
        input: &str,
        renderer: &mut dyn Renderer,
        interrupt: I,
    ) -> TurnOutcome
    where
        I: Future<Output = ()>,
    {
        tokio::pin!(interrupt);

        renderer.status("🚀 Starting tools detection...");
        conversation.push_detection(Message::user(input));
        let request = self.detection_request(conversation);

        renderer.status("⏳ Running tools completion...");
        let completion = tokio::select! {
            biased;
            _ = &mut interrupt => {
                renderer.status("✋ Tools detection interrupted");
                return TurnOutcome::DetectionInterrupted;
            }
            result = self.transport.complete(&request) => result,
        };
        let completion = match completion {
            Ok(completion) => completion,
            Err(e) => {
                tracing::warn!(error = %e, "tools completion failed");
                renderer.render_error(&format!("tools completion failed: {e}"));
                return TurnOutcome::DetectionFailed(e);
            }
        };
        renderer.status("🛠️ Tools completion received");

        let mut summary = TurnSummary::default();
        self.dispatch_all(
            &completion.tool_calls,
            &mut conversation.entity,
            renderer,
            &mut summary,
        );

        conversation.push_chat(Message::system(summary.folded.clone()));
        conversation.push_chat(Message::system(CHAT_TOOL_FRAMING));
        conversation.push_chat(Message::user(input));
        let request = self.narration_request(conversation);

        renderer.status("🤖 Starting chat completion...");
        self.narrate(&request, renderer, &mut summary, interrupt.as_mut())
            .await;

        if !summary.reply.is_empty() {
            conversation.push_chat(Message::assistant(summary.reply.clone()));
        }
        TurnOutcome::Completed(summary)
    }

    fn detection_request(&self, conversation: &Conversation) -> CompletionRequest {
        CompletionRequest {
            model: self.tools_model.clone(),
            messages: conversation.detection().messages().to_vec(),
            tools: self.registry.definitions().to_vec(),
            parallel_tool_calls: true,
            temperature: DETECTION_TEMPERATURE,
        }
    }

    fn narration_request(&self, conversation: &Conversation) -> CompletionRequest {
        CompletionRequest {
            model: self.chat_model.clone(),
            messages: conversation.chat().messages().to_vec(),
            tools: Vec::new(),
            parallel_tool_calls: false,
            temperature: NARRATION_TEMPERATURE,
        }
    }

    /// Executes calls in the order the model returned them and folds the
    /// successful results. No calls means an empty fold.
    fn dispatch_all(
        &self,
        calls: &[ToolCallRequest],
        state: &mut EntityState,
        renderer: &mut dyn Renderer,
        summary: &mut TurnSummary,
    ) {
        if calls.is_empty() {
            renderer.status("✋ No function call");
            return;
        }

        let mut folded = String::from(RESULTS_HEADER);
        for call in calls {
            renderer.tool_start(&call.name, &call.arguments);
            match self.dispatcher.dispatch(state, call) {
                Ok(result) => {
                    folded.push_str(&result);
                    folded.push('\n');
                    summary.executed += 1;
                }
                Err(e) => {
                    tracing::warn!(tool = %call.name, error = %e, "tool call skipped");
                    renderer.render_error(&e.to_string());
                    summary.failures.push(e);
                }
            }
        }
        renderer.status("🎉 Tools calls executed!");
        summary.folded = folded;
    }

    /// Streams the narration reply, rendering each chunk on arrival.
    async fn narrate<I>(
        &self,
        request: &CompletionRequest,
        renderer: &mut dyn Renderer,
        summary: &mut TurnSummary,
        mut interrupt: Pin<&mut I>,
    ) where
        I: Future<Output = ()>,
    {
        renderer.render_start();

        let opened = tokio::select! {
            biased;
            _ = interrupt.as_mut() => None,
            result = self.transport.stream(request) => Some(result),
        };

        match opened {
            None => summary.interrupted = true,
            Some(Err(e)) => summary.stream_error = Some(e),
            Some(Ok(mut stream)) => loop {
                let next = tokio::select! {
                    biased;
                    _ = interrupt.as_mut() => {
                        summary.interrupted = true;
                        break;
                    }
                    item = stream.next() => item,
                };
                match next {
                    Some(Ok(text)) => {
                        renderer.render_token(&text);
                        summary.reply.push_str(&text);
                    }
                    Some(Err(e)) => {
                        summary.stream_error = Some(e);
                        break;
                    }
                    None => break,
                }
            },
        }

        renderer.render_done();
        if let Some(ref e) = summary.stream_error {
            tracing::warn!(error = %e, "chat stream failed");
            renderer.render_error(&format!("stream error: {e}"));
        }
        if summary.interrupted {
            renderer.status("⚠️ Response was interrupted");
        }
    }
}
