#![warn(
    clippy::all,
    clippy::nursery,
    clippy::pedantic,
    clippy::style,
    clippy::complexity,
    clippy::perf,
    clippy::correctness,
    clippy::suspicious,
    clippy::unwrap_used,
    clippy::expect_used
)]
#![allow(
    clippy::similar_names,
    clippy::missing_safety_doc,
    clippy::missing_panics_doc,
    clippy::missing_errors_doc
)]

//! Customer-support intent classification.
//!
//! The [`Classifier`] turns a message, optionally within a
//! [`ConversationState`](intentrs_core::ConversationState), into a validated
//! classification by way of an [`LLMProvider`](intentrs_core::LLMProvider).
//!
//! # Key Features
//! - Single-turn classification into a closed category set
//! - Conversational classification with CONTINUE / NEW / CLARIFICATION transitions
//! - Bounded context window over the conversation history
//! - Strict normalization of provider output into typed results

mod classifier;
mod history;
mod normalize;
mod prompt;
mod shared;

pub use classifier::{Classifier, ClassifierConfig};
pub use history::{ContextWindow, NO_PREVIOUS_CONVERSATION};
pub use normalize::{normalize_classification, normalize_conversational};
pub use prompt::{build_conversational_messages, build_single_turn_messages};
pub use shared::SharedConversation;
