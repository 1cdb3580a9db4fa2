use thiserror::Error;

pub type Result<T> = std::result::Result<T, ClassifierError>;

#[derive(Debug, Error)]
pub enum ClassifierError {
    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Invalid classification response: {0}")]
    Validation(String),

    #[error("Inference provider error: {0}")]
    Transport(#[from] anyhow::Error),

    #[error("Message to classify is empty")]
    EmptyMessage,

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl ClassifierError {
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration(message.into())
    }

    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    #[must_use]
    pub const fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }
}
