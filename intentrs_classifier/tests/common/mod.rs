//! Scripted provider shared by the integration tests.

#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use intentrs_classifier::{Classifier, ClassifierConfig};
use intentrs_core::{ChatMessage, LLMProvider, LLMResponse, StructuredRequest, Usage};
use serde_json::{Value, json};

/// Answers requests from a queue and records what it was asked.
pub struct ScriptedProvider {
    responses: Mutex<VecDeque<anyhow::Result<Value>>>,
    requests: Mutex<Vec<StructuredRequest>>,
    delay: Option<Duration>,
}

impl ScriptedProvider {
    pub fn new(responses: Vec<anyhow::Result<Value>>) -> Self {
        Self {
            responses: Mutex::new(responses.into()),
            requests: Mutex::new(Vec::new()),
            delay: None,
        }
    }

    pub fn answering(values: Vec<Value>) -> Self {
        Self::new(values.into_iter().map(Ok).collect())
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    pub fn requests(&self) -> Vec<StructuredRequest> {
        self.requests
            .lock()
            .map(|r| r.clone())
            .unwrap_or_default()
    }

    pub fn last_user_prompt(&self) -> String {
        self.requests()
            .last()
            .and_then(|r| r.messages.last().map(|m: &ChatMessage| m.content.clone()))
            .unwrap_or_default()
    }
}

#[async_trait]
impl LLMProvider for ScriptedProvider {
    async fn complete(&self, request: &StructuredRequest) -> anyhow::Result<LLMResponse> {
        if let Ok(mut requests) = self.requests.lock() {
            requests.push(request.clone());
        }

        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }

        let next = self
            .responses
            .lock()
            .map_err(|_| anyhow::anyhow!("response queue poisoned"))?
            .pop_front()
            .unwrap_or_else(|| Err(anyhow::anyhow!("no scripted response left")));

        next.map(|value| LLMResponse {
            value,
            usage: Some(Usage {
                prompt_tokens: 10,
                completion_tokens: 5,
                total_tokens: 15,
            }),
        })
    }

    fn name(&self) -> &str {
        "scripted"
    }
}

pub fn conversational(intent: &str, transition: &str, message: &str) -> Value {
    json!({
        "message": message,
        "reasoning": "scripted",
        "intent_transition": transition,
        "intent": intent,
        "confidence": "HIGH"
    })
}

pub fn classifier(provider: &Arc<ScriptedProvider>) -> Classifier<Arc<ScriptedProvider>> {
    classifier_with(provider, ClassifierConfig::new("test-model"))
}

pub fn classifier_with(
    provider: &Arc<ScriptedProvider>,
    config: ClassifierConfig,
) -> Classifier<Arc<ScriptedProvider>> {
    match Classifier::new(Arc::clone(provider), config) {
        Ok(classifier) => classifier,
        Err(e) => panic!("test classifier config rejected: {e}"),
    }
}
