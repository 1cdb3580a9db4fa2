//! Context window over conversation history.
//!
//! Selects which recent turns are shown to the classifier and renders them
//! as a plain transcript.

use intentrs_core::{ConversationState, ConversationTurn, DEFAULT_CONTEXT_TURNS};

/// Rendered in place of a transcript when the conversation has no turns yet.
pub const NO_PREVIOUS_CONVERSATION: &str = "No previous conversation";

/// A sliding window over conversation history.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ContextWindow {
    max_turns: usize,
}

impl ContextWindow {
    #[must_use]
    pub const fn new(max_turns: usize) -> Self {
        Self { max_turns }
    }

    #[must_use]
    pub const fn max_turns(&self) -> usize {
        self.max_turns
    }

    /// Select the turns to include in context.
    #[must_use]
    pub fn select<'a>(&self, state: &'a ConversationState) -> &'a [ConversationTurn] {
        state.recent_context(self.max_turns)
    }

    /// Render the selected turns as `speaker: message` lines, oldest first.
    #[must_use]
    pub fn render(&self, state: &ConversationState) -> String {
        render_transcript(self.select(state))
    }
}

impl Default for ContextWindow {
    fn default() -> Self {
        Self::new(DEFAULT_CONTEXT_TURNS)
    }
}

pub(crate) fn render_transcript(turns: &[ConversationTurn]) -> String {
    if turns.is_empty() {
        return NO_PREVIOUS_CONVERSATION.to_string();
    }

    turns
        .iter()
        .map(|turn| format!("{}: {}", turn.speaker(), turn.message()))
        .collect::<Vec<_>>()
        .join("\n")
}
