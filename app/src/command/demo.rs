use intentrs_core::ConversationState;
use tracing::warn;

use super::{init_classifier, print_turn};

const SAMPLE_CONVERSATION: [&str; 5] = [
    "Hi, I need help with my order",
    "I placed it last week but haven't received any tracking information",
    "The order number is #12345",
    "Actually, I also want to return another item I bought last month",
    "It doesn't fit properly",
];

const AMBIGUOUS_MESSAGE: &str = "Can you help me with the return process?";

const COMPARISON_CONTEXT: [&str; 2] = [
    "I received my order yesterday",
    "The quality is not what I expected",
];

/// Strategy for running the sample conversation.
///
/// Classifies the first sample message on its own, walks through a
/// five-turn support conversation, then compares single-turn and
/// conversational results for an ambiguous message.
#[derive(Debug, Clone, Copy)]
pub struct DemoStrategy;

impl super::CommandStrategy for DemoStrategy {
    type Input = ();

    async fn execute(&self, _input: Self::Input) -> anyhow::Result<()> {
        let classifier = init_classifier()?;

        println!("=== Single-turn Classification ===");
        let response = classifier.classify("Hello, how are you?").await?;
        println!("Classified Response: {response}");

        println!("\n=== Multi-turn Conversational Classification ===");
        let mut state = ConversationState::new();
        for (i, message) in SAMPLE_CONVERSATION.iter().enumerate() {
            println!("\nTurn {}: {message}", i + 1);
            match classifier.classify_conversational(message, &mut state).await {
                Ok(result) => print_turn(&result, &state),
                Err(e) => println!("Error processing turn {}: {e}", i + 1),
            }
            println!("{}", "-".repeat(50));
        }

        println!("\n=== Single-turn vs Conversational ===");
        println!("Test message: '{AMBIGUOUS_MESSAGE}'");
        match classifier.classify_result(AMBIGUOUS_MESSAGE).await {
            Ok(result) => println!("Single-turn category: {}", result.category),
            Err(e) => println!("Single-turn error: {e}"),
        }

        let mut state = ConversationState::new();
        for message in COMPARISON_CONTEXT {
            if let Err(e) = classifier.classify_conversational(message, &mut state).await {
                warn!("Context turn {message:?} failed: {e}");
            }
        }
        match classifier
            .classify_conversational(AMBIGUOUS_MESSAGE, &mut state)
            .await
        {
            Ok(result) => {
                println!("Conversational intent: {}", result.intent);
                println!("Transition: {}", result.intent_transition);
                println!("Reasoning: {}", result.reasoning);
            }
            Err(e) => println!("Conversational error: {e}"),
        }

        Ok(())
    }
}
