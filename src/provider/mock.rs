//! Scripted transport for tests (no network).
//!
//! Each call pops the next scripted reply and records the request it was
//! given, so tests can assert on exactly what would have been sent.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use super::{ChunkStream, Completion, CompletionRequest, CompletionTransport, TransportError};
use crate::tools::ToolCallRequest;

/// Scripted result of a streamed request.
pub(crate) enum StreamReply {
    /// Chunks, then optionally an error mid-stream.
    Chunks(Vec<String>, Option<String>),
    /// The request itself fails.
    Refused(String),
    /// Yields the chunks, then never finishes.
    Hang(Vec<String>),
}

#[derive(Default)]
struct Script {
    completions: VecDeque<Result<Completion, String>>,
    streams: VecDeque<StreamReply>,
    requests: Vec<(Kind, CompletionRequest)>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) enum Kind {
    Complete,
    Stream,
}

/// Cloneable handle; clones share the same script and request log.
#[derive(Clone, Default)]
pub(crate) struct MockTransport {
    script: Arc<Mutex<Script>>,
}

impl MockTransport {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Queues a detection reply carrying these `(name, arguments)` calls.
    pub(crate) fn tool_calls(self, calls: &[(&str, &str)]) -> Self {
        let tool_calls = calls
            .iter()
            .map(|(name, args)| ToolCallRequest::new(*name, *args))
            .collect();
        self.script
            .lock()
            .unwrap()
            .completions
            .push_back(Ok(Completion { tool_calls }));
        self
    }

    /// Queues a failing detection request.
    pub(crate) fn complete_error(self, message: &str) -> Self {
        self.script
            .lock()
            .unwrap()
            .completions
            .push_back(Err(message.to_string()));
        self
    }

    /// Queues a successful narration stream.
    pub(crate) fn reply(self, chunks: &[&str]) -> Self {
        self.stream(StreamReply::Chunks(
            chunks.iter().map(|c| c.to_string()).collect(),
            None,
        ))
    }

    pub(crate) fn stream(self, reply: StreamReply) -> Self {
        self.script.lock().unwrap().streams.push_back(reply);
        self
    }

    /// Every request received so far, in order.
    pub(crate) fn requests(&self) -> Vec<(Kind, CompletionRequest)> {
        self.script.lock().unwrap().requests.clone()
    }
}

#[async_trait]
impl CompletionTransport for MockTransport {
    async fn complete(&self, request: &CompletionRequest) -> Result<Completion, TransportError> {
        let mut script = self.script.lock().unwrap();
        script.requests.push((Kind::Complete, request.clone()));
        match script.completions.pop_front() {
            Some(Ok(completion)) => Ok(completion),
            Some(Err(message)) => Err(TransportError::Api(message)),
            None => Ok(Completion::default()),
        }
    }

    async fn stream(&self, request: &CompletionRequest) -> Result<ChunkStream, TransportError> {
        let mut script = self.script.lock().unwrap();
        script.requests.push((Kind::Stream, request.clone()));
        let reply = script
            .streams
            .pop_front()
            .unwrap_or(StreamReply::Chunks(Vec::new(), None));
        match reply {
            StreamReply::Refused(message) => Err(TransportError::Api(message)),
            StreamReply::Chunks(chunks, error) => {
                let mut items: Vec<Result<String, TransportError>> =
                    chunks.into_iter().map(Ok).collect();
                if let Some(message) = error {
                    items.push(Err(TransportError::Api(message)));
                }
                Ok(Box::pin(futures::stream::iter(items)))
            }
            StreamReply::Hang(chunks) => {
                let head = futures::stream::iter(chunks.into_iter().map(Ok));
                Ok(Box::pin(futures::StreamExt::chain(
                    head,
                    futures::stream::pending(),
                )))
            }
        }
    }
}
