//! In-memory generator for tests.

use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;

use crate::error::GeneratorError;
use crate::llm::{ChatMessage, TextGenerator};

/// Replays queued results in order and records every request it receives.
/// Once the queue is empty every call fails with [`GeneratorError::EmptyResponse`].
#[derive(Default)]
pub struct ScriptedGenerator {
    responses: Mutex<VecDeque<Result<String, GeneratorError>>>,
    requests: Mutex<Vec<Vec<ChatMessage>>>,
}

impl ScriptedGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_ok(&self, text: impl Into<String>) -> &Self {
        self.responses.lock().unwrap().push_back(Ok(text.into()));
        self
    }

    pub fn push_err(&self, err: GeneratorError) -> &Self {
        self.responses.lock().unwrap().push_back(Err(err));
        self
    }

    pub fn call_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }

    /// The messages sent on the most recent call.
    pub fn last_request(&self) -> Option<Vec<ChatMessage>> {
        self.requests.lock().unwrap().last().cloned()
    }
}

#[async_trait]
impl TextGenerator for ScriptedGenerator {
    async fn complete(&self, messages: &[ChatMessage]) -> Result<String, GeneratorError> {
        self.requests.lock().unwrap().push(messages.to_vec());
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or(Err(GeneratorError::EmptyResponse))
    }
}
