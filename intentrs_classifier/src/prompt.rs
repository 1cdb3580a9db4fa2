//! Instruction text sent to the inference provider.

use intentrs_core::{Category, ChatMessage};

fn single_turn_instruction() -> String {
    format!(
        "You are a customer support message classifier. Classify the following message into one of the categories: {}.",
        Category::quoted_list()
    )
}

fn conversational_instruction() -> String {
    format!(
        "You are a conversational customer support intent classifier. Analyze the current message in the context of an ongoing conversation.

Available intents: {}

Determine:
1. Is this continuing the current active intent or introducing a new one?
2. What is the specific intent for this message?
3. How confident are you in this classification?

Intent Transitions:
- CONTINUE: Following up on the same intent
- NEW: Introducing a completely new intent
- CLARIFICATION: Asking for clarification or providing additional details",
        Category::quoted_list()
    )
}

/// Messages for classifying `message` on its own.
#[must_use]
pub fn build_single_turn_messages(message: &str) -> Vec<ChatMessage> {
    vec![
        ChatMessage::system(single_turn_instruction()),
        ChatMessage::user(format!("Message: '{message}'\nCategory:")),
    ]
}

/// Messages for classifying `message` against an active intent and transcript.
#[must_use]
pub fn build_conversational_messages(
    current_intent: Option<Category>,
    transcript: &str,
    message: &str,
) -> Vec<ChatMessage> {
    let current_intent = current_intent.map_or("None", Category::as_str);

    vec![
        ChatMessage::system(conversational_instruction()),
        ChatMessage::user(format!(
            "<conversation_context>
Current Active Intent: {current_intent}
Recent Conversation:
{transcript}
</conversation_context>

<current_message>{message}</current_message>

Provide your analysis in the following format:
- Reasoning for your classification
- Intent transition type (CONTINUE/NEW/CLARIFICATION)
- The specific intent category
- Your confidence level (HIGH/MEDIUM/LOW)"
        )),
    ]
}
