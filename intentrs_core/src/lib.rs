#![deny(
    clippy::all,
    clippy::nursery,
    clippy::pedantic,
    clippy::style,
    clippy::complexity,
    clippy::perf,
    clippy::correctness,
    clippy::suspicious,
    clippy::unwrap_used,
    clippy::expect_used
)]
#![allow(
    clippy::similar_names,
    clippy::missing_safety_doc,
    clippy::missing_panics_doc,
    clippy::missing_errors_doc
)]

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

pub mod conversation;
pub mod error;
pub mod intent;

pub use conversation::{ConversationState, ConversationTurn, DEFAULT_CONTEXT_TURNS, Speaker};
pub use error::{ClassifierError, Result};
pub use intent::{
    Category, ClassificationResult, Confidence, ConversationalClassificationResult,
    IntentTransition,
};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
    System,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: Role,
    pub content: String,
}

impl ChatMessage {
    #[must_use]
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: Role::System,
            content: content.into(),
        }
    }

    #[must_use]
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }
}

/// JSON schema describing the shape a provider must answer with.
#[derive(Debug, Clone)]
pub struct OutputSchema {
    pub name: &'static str,
    pub description: &'static str,
    pub schema: serde_json::Value,
}

/// A single structured-output inference request.
#[derive(Debug, Clone)]
pub struct StructuredRequest {
    pub messages: Vec<ChatMessage>,
    pub model: String,
    pub max_tokens: usize,
    pub temperature: f32,
    pub output: OutputSchema,
}

/// Raw provider answer.
///
/// `value` is whatever the provider produced: usually an object, but callers
/// must not assume it conforms to the requested schema.
#[derive(Debug, Clone)]
pub struct LLMResponse {
    pub value: serde_json::Value,
    pub usage: Option<Usage>,
}

#[derive(Debug, Clone)]
pub struct Usage {
    pub prompt_tokens: u32,
    pub completion_tokens: u32,
    pub total_tokens: u32,
}

#[async_trait]
pub trait LLMProvider: Send + Sync {
    async fn complete(&self, request: &StructuredRequest) -> anyhow::Result<LLMResponse>;
    fn name(&self) -> &str;
}

#[async_trait]
impl<T: LLMProvider + ?Sized> LLMProvider for std::sync::Arc<T> {
    async fn complete(&self, request: &StructuredRequest) -> anyhow::Result<LLMResponse> {
        (**self).complete(request).await
    }

    fn name(&self) -> &str {
        (**self).name()
    }
}
