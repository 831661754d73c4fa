//! Text generation backends.
//!
//! The game never talks to a model API directly; it goes through
//! [`TextGenerator`], which takes a full chat transcript and returns the next
//! assistant utterance. Prompt construction lives with the caller.

pub mod openai;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::GeneratorError;

/// Author of a chat message.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    Assistant,
    User,
}

/// One entry of a chat transcript.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct ChatMessage {
    pub role: Role,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: Role::System,
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }
}

/// A language model that continues a conversation.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    /// Returns the next assistant utterance for `messages`.
    ///
    /// Implementations return trimmed, non-empty text or an error; they never
    /// retry on their own.
    async fn complete(&self, messages: &[ChatMessage]) -> Result<String, GeneratorError>;
}
