//! Conversation state for multi-turn intent tracking.
//!
//! A [`ConversationState`] accumulates the turns of one conversation and
//! tracks which intent is currently active and which ones have been
//! superseded. It performs no I/O; the classifier drives it.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::intent::{Category, IntentTransition};

/// Number of turns handed to the classifier when no other limit is configured.
pub const DEFAULT_CONTEXT_TURNS: usize = 5;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Speaker {
    User,
    Agent,
}

impl Speaker {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::User => "user",
            Self::Agent => "agent",
        }
    }
}

impl fmt::Display for Speaker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One exchange unit. Immutable once recorded.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ConversationTurn {
    message: String,
    speaker: Speaker,
    timestamp: DateTime<Utc>,
    intent: Option<Category>,
}

impl ConversationTurn {
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }

    #[must_use]
    pub const fn speaker(&self) -> Speaker {
        self.speaker
    }

    #[must_use]
    pub const fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }

    /// Classified intent, present only on turns produced by classification.
    #[must_use]
    pub const fn intent(&self) -> Option<Category> {
        self.intent
    }
}

/// Accumulated knowledge about one conversation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConversationState {
    id: Uuid,
    created_at: DateTime<Utc>,
    current_intent: Option<Category>,
    conversation_history: Vec<ConversationTurn>,
    resolved_intents: Vec<Category>,
}

impl ConversationState {
    /// Create an empty conversation with no active intent.
    #[must_use]
    pub fn new() -> Self {
        Self {
            id: Uuid::now_v7(),
            created_at: Utc::now(),
            current_intent: None,
            conversation_history: Vec::new(),
            resolved_intents: Vec::new(),
        }
    }

    #[must_use]
    pub const fn id(&self) -> Uuid {
        self.id
    }

    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    #[must_use]
    pub const fn current_intent(&self) -> Option<Category> {
        self.current_intent
    }

    #[must_use]
    pub fn conversation_history(&self) -> &[ConversationTurn] {
        &self.conversation_history
    }

    #[must_use]
    pub fn resolved_intents(&self) -> &[Category] {
        &self.resolved_intents
    }

    #[must_use]
    pub const fn turn_count(&self) -> usize {
        self.conversation_history.len()
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.conversation_history.is_empty()
    }

    /// Append a turn stamped with the current time.
    ///
    /// Timestamps never go backwards within a conversation: if the clock
    /// reads earlier than the last recorded turn, that turn's time is reused.
    pub fn record_turn(
        &mut self,
        message: impl Into<String>,
        speaker: Speaker,
        intent: Option<Category>,
    ) {
        let now = Utc::now();
        let timestamp = self
            .conversation_history
            .last()
            .map_or(now, |last| last.timestamp.max(now));

        self.conversation_history.push(ConversationTurn {
            message: message.into(),
            speaker,
            timestamp,
            intent,
        });
    }

    /// The most recent `max_turns` turns, oldest first.
    #[must_use]
    pub fn recent_context(&self, max_turns: usize) -> &[ConversationTurn] {
        let start = self.conversation_history.len().saturating_sub(max_turns);
        &self.conversation_history[start..]
    }

    /// Apply a classified transition to the active intent.
    ///
    /// Only [`IntentTransition::New`] changes the active intent; the previous
    /// one, if any, moves to the resolved list. `Continue` and
    /// `Clarification` leave it untouched even when `new_intent` differs.
    /// A `New` that repeats the active label still resolves it once before
    /// making it current again.
    pub fn apply_transition(&mut self, new_intent: Category, transition: IntentTransition) {
        match transition {
            IntentTransition::New => {
                if let Some(previous) = self.current_intent.take() {
                    self.resolved_intents.push(previous);
                }
                self.current_intent = Some(new_intent);
            }
            IntentTransition::Continue | IntentTransition::Clarification => {}
        }
    }
}

impl Default for ConversationState {
    fn default() -> Self {
        Self::new()
    }
}
