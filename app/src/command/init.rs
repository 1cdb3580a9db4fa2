use intentrs_config::Settings;

/// Strategy for initializing the configuration.
///
/// Creates the default configuration file at `~/intentrs/config.json`.
#[derive(Debug, Clone, Copy)]
pub struct InitStrategy;

impl super::CommandStrategy for InitStrategy {
    type Input = ();

    async fn execute(&self, _input: Self::Input) -> anyhow::Result<()> {
        let config_path = Settings::create_config()?;

        println!("✅ Created config file at: {}", config_path.display());
        println!();
        println!("📝 Next steps:");
        println!("   1. Edit the config file and add your API key");
        println!("   2. Run 'intentrs classify -m \"Where is my order?\"'");
        println!();
        println!("🔧 Environment variables override the file:");
        println!("   CLOUD_REGION, CLOUD_PROFILE, MODEL_ID (or MODEL_ARN), MAX_TOKENS,");
        println!("   PROVIDER, API_KEY, BASE_URL, TEMPERATURE, CONTEXT_TURNS");
        println!();
        Ok(())
    }
}
