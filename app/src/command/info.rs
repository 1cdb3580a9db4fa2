use intentrs_config::Settings;

/// Strategy for displaying the effective configuration.
#[derive(Debug, Clone, Copy)]
pub struct InfoStrategy;

impl super::CommandStrategy for InfoStrategy {
    type Input = ();

    async fn execute(&self, _input: Self::Input) -> anyhow::Result<()> {
        let settings = Settings::load()?;

        println!("=== intentrs Configuration ===\n");

        println!("Config File: {}", Settings::config_path()?.display());
        println!();

        println!("Provider:");
        println!("  Name: {}", settings.provider);
        println!("  API Key: {}", settings.masked_api_key());
        if let Some(ref base_url) = settings.base_url {
            println!("  Base URL: {base_url}");
        }
        println!("  Cloud Region: {}", settings.cloud_region);
        println!(
            "  Cloud Profile: {}",
            settings.cloud_profile.as_deref().unwrap_or("(not set)")
        );
        println!();

        println!("Model:");
        println!("  Model ID: {}", settings.model_id);
        println!("  Max Tokens: {}", settings.max_tokens);
        println!("  Temperature: {}", settings.temperature);
        println!("  Context Turns: {}", settings.context_turns);
        println!();

        match settings.validate() {
            Ok(()) => println!("Status: Ready"),
            Err(e) => println!("Status: {e}"),
        }

        Ok(())
    }
}
