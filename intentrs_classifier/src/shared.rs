//! A conversation shared between tasks.

use std::sync::Arc;

use intentrs_core::{ConversationState, ConversationalClassificationResult, LLMProvider, Result};
use tokio::sync::{Mutex, MutexGuard};

use crate::classifier::Classifier;

/// Handle to a conversation that several tasks may classify into.
///
/// The lock is held for the whole classification, so calls against the same
/// conversation are applied one at a time in lock-acquisition order.
#[derive(Debug, Clone, Default)]
pub struct SharedConversation {
    state: Arc<Mutex<ConversationState>>,
}

impl SharedConversation {
    #[must_use]
    pub fn new(state: ConversationState) -> Self {
        Self {
            state: Arc::new(Mutex::new(state)),
        }
    }

    /// Classify `message` into this conversation.
    pub async fn classify<P>(
        &self,
        classifier: &Classifier<P>,
        message: &str,
    ) -> Result<ConversationalClassificationResult>
    where
        P: LLMProvider + Send + Sync,
    {
        let mut state = self.state.lock().await;
        classifier.classify_conversational(message, &mut state).await
    }

    /// Lock the conversation for reading or manual turn recording.
    pub async fn lock(&self) -> MutexGuard<'_, ConversationState> {
        self.state.lock().await
    }

    /// Copy of the current state.
    pub async fn snapshot(&self) -> ConversationState {
        self.state.lock().await.clone()
    }
}
