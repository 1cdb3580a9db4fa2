//! Intent labels and classification result records.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::OutputSchema;

/// The closed set of customer-support categories.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum Category {
    #[serde(rename = "Support, Feedback, Complaint")]
    SupportFeedbackComplaint,
    #[serde(rename = "Order Tracking")]
    OrderTracking,
    #[serde(rename = "Refund/Exchange")]
    RefundExchange,
}

impl Category {
    pub const ALL: [Self; 3] = [
        Self::SupportFeedbackComplaint,
        Self::OrderTracking,
        Self::RefundExchange,
    ];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::SupportFeedbackComplaint => "Support, Feedback, Complaint",
            Self::OrderTracking => "Order Tracking",
            Self::RefundExchange => "Refund/Exchange",
        }
    }

    /// Labels quoted and comma separated, as used in instructions.
    #[must_use]
    pub fn quoted_list() -> String {
        Self::ALL
            .iter()
            .map(|c| format!("'{}'", c.as_str()))
            .collect::<Vec<_>>()
            .join(", ")
    }

    fn json_enum() -> serde_json::Value {
        Self::ALL.iter().map(|c| c.as_str()).collect()
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|c| c.as_str() == s)
            .ok_or_else(|| format!("unknown category: {s}"))
    }
}

/// How a message relates to the conversation's active intent.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "UPPERCASE")]
pub enum IntentTransition {
    /// Same active intent.
    Continue,
    /// An unrelated intent is introduced.
    New,
    /// Elaborates on or clarifies the current message.
    Clarification,
}

impl IntentTransition {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Continue => "CONTINUE",
            Self::New => "NEW",
            Self::Clarification => "CLARIFICATION",
        }
    }
}

impl fmt::Display for IntentTransition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "UPPERCASE")]
pub enum Confidence {
    High,
    Medium,
    Low,
}

impl Confidence {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::High => "HIGH",
            Self::Medium => "MEDIUM",
            Self::Low => "LOW",
        }
    }
}

impl fmt::Display for Confidence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Output of single-turn classification.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ClassificationResult {
    /// The original message that was classified
    pub message: String,
    pub category: Category,
}

impl ClassificationResult {
    #[must_use]
    pub fn output_schema() -> OutputSchema {
        OutputSchema {
            name: "classifier_output",
            description: "Category assigned to a single customer support message",
            schema: json!({
                "type": "object",
                "properties": {
                    "message": {
                        "type": "string",
                        "description": "The original message that was classified"
                    },
                    "category": {
                        "type": "string",
                        "enum": Category::json_enum(),
                        "description": "The category of the message"
                    }
                },
                "required": ["message", "category"],
                "additionalProperties": false
            }),
        }
    }
}

/// Output of conversational classification.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ConversationalClassificationResult {
    /// The current message being classified
    pub message: String,
    pub reasoning: String,
    pub intent_transition: IntentTransition,
    pub intent: Category,
    pub confidence: Confidence,
}

impl ConversationalClassificationResult {
    #[must_use]
    pub fn output_schema() -> OutputSchema {
        OutputSchema {
            name: "conversational_classifier_output",
            description: "Intent and intent transition of a message within a conversation",
            schema: json!({
                "type": "object",
                "properties": {
                    "message": {
                        "type": "string",
                        "description": "The current message being classified"
                    },
                    "reasoning": {
                        "type": "string",
                        "description": "Reasoning for the classification"
                    },
                    "intent_transition": {
                        "type": "string",
                        "enum": ["CONTINUE", "NEW", "CLARIFICATION"],
                        "description": "Whether this is CONTINUE, NEW, or CLARIFICATION"
                    },
                    "intent": {
                        "type": "string",
                        "enum": Category::json_enum(),
                        "description": "The classified intent"
                    },
                    "confidence": {
                        "type": "string",
                        "enum": ["HIGH", "MEDIUM", "LOW"],
                        "description": "Confidence level"
                    }
                },
                "required": ["message", "reasoning", "intent_transition", "intent", "confidence"],
                "additionalProperties": false
            }),
        }
    }
}
