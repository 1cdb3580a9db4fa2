use tracing::error;

use super::init_classifier;

/// Input parameters for the Classify command strategy.
#[derive(Debug, Clone)]
pub struct ClassifyInput {
    /// Messages to classify independently
    pub messages: Vec<String>,
}

/// Strategy for single-turn classification.
///
/// Prints one JSON record per message. A failed message is reported and the
/// remaining ones are still classified.
#[derive(Debug, Clone, Copy)]
pub struct ClassifyStrategy;

impl super::CommandStrategy for ClassifyStrategy {
    type Input = ClassifyInput;

    async fn execute(&self, input: Self::Input) -> anyhow::Result<()> {
        let classifier = init_classifier()?;
        let mut failures = 0_usize;

        for message in &input.messages {
            match classifier.classify(message).await {
                Ok(json) => println!("{json}"),
                Err(e) => {
                    error!("Failed to classify {message:?}: {e}");
                    failures += 1;
                }
            }
        }

        if failures > 0 {
            anyhow::bail!(
                "{failures} of {} message(s) could not be classified",
                input.messages.len()
            );
        }
        Ok(())
    }
}
