//! Static strategy pattern for CLI commands.
//!
//! Each command is a separate strategy type with its own input, dispatched
//! statically from `main`.

use std::sync::Arc;

use intentrs_classifier::{Classifier, ClassifierConfig};
use intentrs_config::Settings;
use intentrs_core::{
    Category, ClassifierError, ConversationState, ConversationalClassificationResult, LLMProvider,
};
use intentrs_providers::{OPENAI_BASE_URL, OpenAiCompatibleProvider, ZHIPU_BASE_URL};
use tracing::info;

mod chat;
mod classify;
mod demo;
mod info;
mod init;
mod version;

pub use chat::{ChatInput, ChatStrategy};
pub use classify::{ClassifyInput, ClassifyStrategy};
pub use demo::DemoStrategy;
pub use info::InfoStrategy;
pub use init::InitStrategy;
pub use version::VersionStrategy;

/// Core trait defining the contract for all command strategies.
pub trait CommandStrategy: Send + Sync + 'static {
    /// The input type this strategy accepts.
    type Input;

    /// Execute the command with the given input.
    async fn execute(&self, input: Self::Input) -> anyhow::Result<()>;
}

/// Build `ClassifierConfig` from settings.
fn build_classifier_config(settings: &Settings) -> ClassifierConfig {
    ClassifierConfig::new(settings.model_id.clone())
        .with_max_tokens(settings.max_tokens)
        .with_temperature(settings.temperature)
        .with_context_turns(settings.context_turns)
}

fn build_provider(settings: &Settings) -> Result<Arc<dyn LLMProvider>, ClassifierError> {
    let default_base_url = match settings.provider.as_str() {
        "openai" => OPENAI_BASE_URL,
        "zhipu" => ZHIPU_BASE_URL,
        other => {
            return Err(ClassifierError::configuration(format!(
                "unknown provider '{other}'"
            )));
        }
    };
    let base_url = settings
        .base_url
        .clone()
        .unwrap_or_else(|| default_base_url.to_string());

    let provider = OpenAiCompatibleProvider::new(settings.require_api_key()?.to_string())
        .with_base_url(base_url)
        .with_name(settings.provider.clone());

    Ok(Arc::new(provider))
}

/// Load settings and construct a ready classifier.
fn init_classifier() -> anyhow::Result<Classifier> {
    let settings = Settings::load()?;
    settings.validate()?;

    info!(
        "Using provider {} in region {} (profile: {})",
        settings.provider,
        settings.cloud_region,
        settings.cloud_profile.as_deref().unwrap_or("default")
    );

    let provider = build_provider(&settings)?;
    Ok(Classifier::new(provider, build_classifier_config(&settings))?)
}

fn format_intent(intent: Option<Category>) -> &'static str {
    intent.map_or("None", Category::as_str)
}

fn format_resolved(state: &ConversationState) -> String {
    let labels: Vec<&str> = state
        .resolved_intents()
        .iter()
        .map(|c| c.as_str())
        .collect();
    format!("[{}]", labels.join(", "))
}

fn print_turn(result: &ConversationalClassificationResult, state: &ConversationState) {
    println!("Intent: {}", result.intent);
    println!("Transition: {}", result.intent_transition);
    println!("Confidence: {}", result.confidence);
    println!("Reasoning: {}", result.reasoning);
    println!("Current State Intent: {}", format_intent(state.current_intent()));
    println!("Resolved Intents: {}", format_resolved(state));
}
