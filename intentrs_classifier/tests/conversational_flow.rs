//! Integration tests for conversational classification.
//!
//! These tests drive the classifier with a scripted provider and check how
//! each response is folded into the conversation state.

mod common;

use std::sync::Arc;

use common::{ScriptedProvider, classifier, classifier_with, conversational};
use intentrs_classifier::{ClassifierConfig, NO_PREVIOUS_CONVERSATION};
use intentrs_core::{
    Category, ClassifierError, Confidence, ConversationState, IntentTransition, Speaker,
};
use serde_json::json;

#[tokio::test]
async fn test_order_then_refund_scenario() {
    let provider = Arc::new(ScriptedProvider::answering(vec![
        conversational(
            "Order Tracking",
            "NEW",
            "Hi, I need help with my order",
        ),
        conversational(
            "Refund/Exchange",
            "NEW",
            "Actually I want a refund too",
        ),
    ]));
    let classifier = classifier(&provider);
    let mut state = ConversationState::new();

    let first = classifier
        .classify_conversational("Hi, I need help with my order", &mut state)
        .await;
    assert!(first.is_ok(), "first turn failed: {first:?}");
    assert_eq!(state.current_intent(), Some(Category::OrderTracking));
    assert!(state.resolved_intents().is_empty());
    assert_eq!(state.conversation_history().len(), 1);

    let second = classifier
        .classify_conversational("Actually I want a refund too", &mut state)
        .await;
    assert!(second.is_ok(), "second turn failed: {second:?}");
    assert_eq!(state.current_intent(), Some(Category::RefundExchange));
    assert_eq!(state.resolved_intents(), [Category::OrderTracking]);
    assert_eq!(state.conversation_history().len(), 2);
}

#[tokio::test]
async fn test_recorded_turn_carries_classified_intent() {
    let provider = Arc::new(ScriptedProvider::answering(vec![conversational(
        "Order Tracking",
        "NEW",
        "Where is my parcel?",
    )]));
    let classifier = classifier(&provider);
    let mut state = ConversationState::new();

    let result = classifier
        .classify_conversational("Where is my parcel?", &mut state)
        .await;

    match result {
        Ok(result) => {
            assert_eq!(result.intent_transition, IntentTransition::New);
            assert_eq!(result.confidence, Confidence::High);
        }
        Err(e) => panic!("classification failed: {e}"),
    }
    let turn = &state.conversation_history()[0];
    assert_eq!(turn.message(), "Where is my parcel?");
    assert_eq!(turn.speaker(), Speaker::User);
    assert_eq!(turn.intent(), Some(Category::OrderTracking));
}

#[tokio::test]
async fn test_continue_with_different_label_keeps_active_intent() {
    let provider = Arc::new(ScriptedProvider::answering(vec![
        conversational("Order Tracking", "NEW", "Where is my order?"),
        conversational("Refund/Exchange", "CONTINUE", "It is late"),
        conversational("Support, Feedback, Complaint", "CLARIFICATION", "Order #12345"),
    ]));
    let classifier = classifier(&provider);
    let mut state = ConversationState::new();

    for message in ["Where is my order?", "It is late", "Order #12345"] {
        let result = classifier.classify_conversational(message, &mut state).await;
        assert!(result.is_ok(), "turn {message:?} failed: {result:?}");
    }

    assert_eq!(state.current_intent(), Some(Category::OrderTracking));
    assert!(state.resolved_intents().is_empty());
    let intents: Vec<_> = state
        .conversation_history()
        .iter()
        .map(|t| t.intent())
        .collect();
    assert_eq!(
        intents,
        [
            Some(Category::OrderTracking),
            Some(Category::RefundExchange),
            Some(Category::SupportFeedbackComplaint)
        ]
    );
}

#[tokio::test]
async fn test_unknown_transition_leaves_state_unchanged() {
    let provider = Arc::new(ScriptedProvider::answering(vec![
        conversational("Order Tracking", "NEW", "Where is my order?"),
        conversational("Refund/Exchange", "MAYBE", "Maybe a refund"),
    ]));
    let classifier = classifier(&provider);
    let mut state = ConversationState::new();

    let first = classifier
        .classify_conversational("Where is my order?", &mut state)
        .await;
    assert!(first.is_ok());
    let before = state.clone();

    let second = classifier
        .classify_conversational("Maybe a refund", &mut state)
        .await;

    assert!(matches!(second, Err(ClassifierError::Validation(_))));
    assert_eq!(state.conversation_history(), before.conversation_history());
    assert_eq!(state.current_intent(), before.current_intent());
    assert_eq!(state.resolved_intents(), before.resolved_intents());
}

#[tokio::test]
async fn test_label_outside_category_set_is_rejected() {
    let provider = Arc::new(ScriptedProvider::answering(vec![conversational(
        "Billing", "NEW", "Invoice?",
    )]));
    let classifier = classifier(&provider);
    let mut state = ConversationState::new();

    let result = classifier.classify_conversational("Invoice?", &mut state).await;

    assert!(result.is_err_and(|e| e.is_validation()));
    assert!(state.is_empty());
    assert_eq!(state.current_intent(), None);
}

#[tokio::test]
async fn test_missing_fields_are_rejected() {
    let provider = Arc::new(ScriptedProvider::answering(vec![json!({
        "message": "Hello",
        "intent": "Order Tracking"
    })]));
    let classifier = classifier(&provider);
    let mut state = ConversationState::new();

    let result = classifier.classify_conversational("Hello", &mut state).await;

    assert!(matches!(result, Err(ClassifierError::Validation(_))));
    assert!(state.is_empty());
}

#[tokio::test]
async fn test_transport_error_propagates_and_leaves_state_unchanged() {
    let provider = Arc::new(ScriptedProvider::new(vec![Err(anyhow::anyhow!(
        "429 Too Many Requests"
    ))]));
    let classifier = classifier(&provider);
    let mut state = ConversationState::new();

    let result = classifier.classify_conversational("Hello", &mut state).await;

    match result {
        Err(ClassifierError::Transport(e)) => assert!(e.to_string().contains("429")),
        other => panic!("expected transport error, got {other:?}"),
    }
    assert!(state.is_empty());
}

#[tokio::test]
async fn test_blank_message_never_reaches_provider() {
    let provider = Arc::new(ScriptedProvider::answering(vec![]));
    let classifier = classifier(&provider);
    let mut state = ConversationState::new();

    let result = classifier.classify_conversational("   ", &mut state).await;

    assert!(matches!(result, Err(ClassifierError::EmptyMessage)));
    assert!(provider.requests().is_empty());
    assert!(state.is_empty());
}

#[tokio::test]
async fn test_first_prompt_uses_sentinels() {
    let provider = Arc::new(ScriptedProvider::answering(vec![conversational(
        "Order Tracking",
        "NEW",
        "Hi",
    )]));
    let classifier = classifier(&provider);
    let mut state = ConversationState::new();

    let result = classifier.classify_conversational("Hi", &mut state).await;
    assert!(result.is_ok());

    let prompt = provider.last_user_prompt();
    assert!(prompt.contains("Current Active Intent: None"));
    assert!(prompt.contains(NO_PREVIOUS_CONVERSATION));
    assert!(prompt.contains("<current_message>Hi</current_message>"));

    let requests = provider.requests();
    assert_eq!(requests[0].model, "test-model");
    assert_eq!(requests[0].output.name, "conversational_classifier_output");
}

#[tokio::test]
async fn test_prompt_shows_active_intent_and_bounded_transcript() {
    let messages = ["one", "two", "three", "four"];
    let mut responses: Vec<_> = messages
        .iter()
        .map(|m| conversational("Order Tracking", "CONTINUE", m))
        .collect();
    responses[0] = conversational("Order Tracking", "NEW", "one");
    let provider = Arc::new(ScriptedProvider::answering(responses));
    let classifier = classifier_with(
        &provider,
        ClassifierConfig::new("test-model").with_context_turns(2),
    );
    let mut state = ConversationState::new();

    for message in messages {
        let result = classifier.classify_conversational(message, &mut state).await;
        assert!(result.is_ok());
    }

    let prompt = provider.last_user_prompt();
    assert!(prompt.contains("Current Active Intent: Order Tracking"));
    assert!(prompt.contains("Recent Conversation:\nuser: two\nuser: three\n"));
    assert!(!prompt.contains("user: one"));
    assert_eq!(state.turn_count(), 4);
}
