//! Classification orchestration.
//!
//! The `Classifier` is the main entry point: it builds the instruction for a
//! message, calls the provider, validates the answer and, on the
//! conversational path, folds the result back into the conversation.

use std::sync::Arc;

use intentrs_core::{
    Category, ChatMessage, ClassificationResult, ClassifierError, ConversationState,
    ConversationalClassificationResult, DEFAULT_CONTEXT_TURNS, LLMProvider, OutputSchema, Result,
    Speaker, StructuredRequest,
};
use tracing::{debug, info, warn};

use crate::history::ContextWindow;
use crate::normalize::{normalize_classification, normalize_conversational};
use crate::prompt::{build_conversational_messages, build_single_turn_messages};

/// Configuration for classification requests.
#[derive(Debug, Clone)]
pub struct ClassifierConfig {
    /// Model identifier passed to the provider
    pub model: String,
    /// Max tokens in response
    pub max_tokens: usize,
    /// Temperature for sampling
    pub temperature: f32,
    /// Turns of history shown on the conversational path
    pub context_turns: usize,
}

impl ClassifierConfig {
    #[must_use]
    pub fn new(model: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            max_tokens: 5000,
            temperature: 0.0,
            context_turns: DEFAULT_CONTEXT_TURNS,
        }
    }

    #[must_use]
    pub const fn with_max_tokens(mut self, max_tokens: usize) -> Self {
        self.max_tokens = max_tokens;
        self
    }

    #[must_use]
    pub const fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }

    #[must_use]
    pub const fn with_context_turns(mut self, turns: usize) -> Self {
        self.context_turns = turns;
        self
    }

    fn validate(&self) -> Result<()> {
        if self.model.trim().is_empty() {
            return Err(ClassifierError::configuration("model identifier is empty"));
        }
        if self.max_tokens == 0 {
            return Err(ClassifierError::configuration(
                "max_tokens must be greater than zero",
            ));
        }
        if self.context_turns == 0 {
            return Err(ClassifierError::configuration(
                "context_turns must be greater than zero",
            ));
        }
        if !(0.0..=2.0).contains(&self.temperature) {
            return Err(ClassifierError::configuration(format!(
                "temperature {} is outside 0.0..=2.0",
                self.temperature
            )));
        }
        Ok(())
    }
}

/// Stateless customer-support message classifier.
///
/// Holds no per-conversation data; one instance can serve any number of
/// conversations concurrently.
pub struct Classifier<P = Arc<dyn LLMProvider>>
where
    P: Send + Sync,
{
    provider: P,
    config: ClassifierConfig,
    window: ContextWindow,
}

impl<P> Classifier<P>
where
    P: LLMProvider + Send + Sync,
{
    /// Create a classifier, rejecting unusable configuration up front.
    pub fn new(provider: P, config: ClassifierConfig) -> Result<Self> {
        config.validate()?;

        info!(
            "Creating classifier: provider={}, model={}, context_turns={}",
            provider.name(),
            config.model,
            config.context_turns
        );

        Ok(Self {
            provider,
            window: ContextWindow::new(config.context_turns),
            config,
        })
    }

    #[must_use]
    pub const fn config(&self) -> &ClassifierConfig {
        &self.config
    }

    /// Classify a standalone message and return it as a JSON object with
    /// `message` and `category` fields.
    pub async fn classify(&self, message: &str) -> Result<String> {
        let result = self.classify_result(message).await?;
        Ok(serde_json::to_string(&result)?)
    }

    /// Classify a standalone message.
    pub async fn classify_result(&self, message: &str) -> Result<ClassificationResult> {
        ensure_not_empty(message)?;

        let request = self.request(
            build_single_turn_messages(message),
            ClassificationResult::output_schema(),
        );
        let value = self.invoke(&request).await?;

        let result = normalize_classification(value).inspect_err(|e| {
            warn!("Rejected single-turn response: {e}");
        })?;

        info!("Classified message as {}", result.category);
        Ok(result)
    }

    /// Classify a message within a conversation and record it.
    ///
    /// On success the message is appended to `state` as a user turn carrying
    /// the classified intent, then the transition is applied. On any error
    /// `state` is left exactly as it was.
    pub async fn classify_conversational(
        &self,
        message: &str,
        state: &mut ConversationState,
    ) -> Result<ConversationalClassificationResult> {
        ensure_not_empty(message)?;

        let transcript = self.window.render(state);
        debug!(
            "Conversation {}: {} turn(s) in context",
            state.id(),
            self.window.select(state).len()
        );

        let request = self.request(
            build_conversational_messages(state.current_intent(), &transcript, message),
            ConversationalClassificationResult::output_schema(),
        );
        let value = self.invoke(&request).await?;

        let result = normalize_conversational(value).inspect_err(|e| {
            warn!("Conversation {}: rejected response: {e}", state.id());
        })?;

        state.record_turn(message, Speaker::User, Some(result.intent));
        state.apply_transition(result.intent, result.intent_transition);

        info!(
            "Conversation {}: intent={} transition={} confidence={} active={}",
            state.id(),
            result.intent,
            result.intent_transition,
            result.confidence,
            state.current_intent().map_or("None", Category::as_str)
        );

        Ok(result)
    }

    fn request(
        &self,
        messages: Vec<ChatMessage>,
        output: OutputSchema,
    ) -> StructuredRequest {
        StructuredRequest {
            messages,
            model: self.config.model.clone(),
            max_tokens: self.config.max_tokens,
            temperature: self.config.temperature,
            output,
        }
    }

    async fn invoke(&self, request: &StructuredRequest) -> Result<serde_json::Value> {
        let response = self
            .provider
            .complete(request)
            .await
            .map_err(ClassifierError::Transport)?;

        if let Some(usage) = &response.usage {
            debug!(
                "Tokens: {} prompt + {} completion = {} total",
                usage.prompt_tokens, usage.completion_tokens, usage.total_tokens
            );
        }

        Ok(response.value)
    }
}

fn ensure_not_empty(message: &str) -> Result<()> {
    if message.trim().is_empty() {
        return Err(ClassifierError::EmptyMessage);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_defaults() {
        let config = ClassifierConfig::new("test-model");

        assert_eq!(config.max_tokens, 5000);
        assert_eq!(config.context_turns, DEFAULT_CONTEXT_TURNS);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_rejects_empty_model() {
        let config = ClassifierConfig::new("  ");

        assert!(matches!(
            config.validate(),
            Err(ClassifierError::Configuration(_))
        ));
    }

    #[test]
    fn test_config_rejects_zero_limits() {
        let config = ClassifierConfig::new("m").with_max_tokens(0);
        assert!(config.validate().is_err());

        let config = ClassifierConfig::new("m").with_context_turns(0);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_config_rejects_out_of_range_temperature() {
        let config = ClassifierConfig::new("m").with_temperature(3.5);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_blank_message_is_rejected() {
        assert!(matches!(
            ensure_not_empty(" \n\t"),
            Err(ClassifierError::EmptyMessage)
        ));
        assert!(ensure_not_empty("hi").is_ok());
    }
}
