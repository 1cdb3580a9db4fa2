//! Conversational classification command.
//!
//! Every message is classified against the same conversation, which can be
//! resumed from and saved to a JSON file.

use std::io::Write;
use std::path::{Path, PathBuf};

use intentrs_classifier::Classifier;
use intentrs_core::ConversationState;
use tracing::{error, info};

use super::{init_classifier, print_turn};

/// Input parameters for the Chat command strategy.
#[derive(Debug, Clone)]
pub struct ChatInput {
    /// Scripted messages; interactive mode when empty
    pub messages: Vec<String>,
    /// Conversation file to resume from and save to
    pub state_path: Option<PathBuf>,
}

#[derive(Debug, Clone, Copy)]
pub struct ChatStrategy;

impl super::CommandStrategy for ChatStrategy {
    type Input = ChatInput;

    async fn execute(&self, input: Self::Input) -> anyhow::Result<()> {
        let classifier = init_classifier()?;
        let mut state = match &input.state_path {
            Some(path) => load_state(path)?,
            None => ConversationState::new(),
        };

        info!(
            "Conversation {} ({} previous turn(s))",
            state.id(),
            state.turn_count()
        );

        if input.messages.is_empty() {
            run_interactive(&classifier, &mut state, input.state_path.as_deref()).await?;
        } else {
            for (i, message) in input.messages.iter().enumerate() {
                println!("\nTurn {}: {message}", i + 1);
                classify_turn(&classifier, &mut state, message, input.state_path.as_deref())
                    .await?;
                println!("{}", "-".repeat(50));
            }
        }

        info!(
            "Conversation ended: {} total turn(s)",
            state.turn_count()
        );
        Ok(())
    }
}

async fn classify_turn(
    classifier: &Classifier,
    state: &mut ConversationState,
    message: &str,
    state_path: Option<&Path>,
) -> anyhow::Result<()> {
    let result = classifier.classify_conversational(message, state).await?;
    print_turn(&result, state);

    if let Some(path) = state_path {
        save_state(path, state)?;
    }
    Ok(())
}

async fn run_interactive(
    classifier: &Classifier,
    state: &mut ConversationState,
    state_path: Option<&Path>,
) -> anyhow::Result<()> {
    println!("=== Conversation: {} ===", state.id());
    println!("Type 'exit', 'quit', or Ctrl+C to end the conversation.\n");

    loop {
        print!("> ");
        std::io::stdout().flush()?;

        let mut input = String::new();
        if std::io::stdin().read_line(&mut input)? == 0 {
            break;
        }
        let input = input.trim();

        if matches!(input, "exit" | "quit" | "q") {
            break;
        }
        if input.is_empty() {
            continue;
        }

        if let Err(e) = classify_turn(classifier, state, input, state_path).await {
            error!("Turn failed: {e}");
            eprintln!("Error: {e}");
        }
        println!();
    }

    println!(
        "\nConversation ended. Final intent: {}, resolved: {}",
        super::format_intent(state.current_intent()),
        super::format_resolved(state)
    );
    Ok(())
}

fn load_state(path: &Path) -> anyhow::Result<ConversationState> {
    if !path.exists() {
        info!("Starting new conversation file at {}", path.display());
        return Ok(ConversationState::new());
    }

    let content = std::fs::read_to_string(path)?;
    let state = serde_json::from_str(&content)
        .map_err(|e| anyhow::anyhow!("Invalid conversation file {}: {e}", path.display()))?;
    Ok(state)
}

fn save_state(path: &Path, state: &ConversationState) -> anyhow::Result<()> {
    std::fs::write(path, serde_json::to_string_pretty(state)?)?;
    Ok(())
}
